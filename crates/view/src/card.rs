//! Placemark cards as pure HTML strings.
//!
//! Everything interpolated from KML content goes through `escape_html` /
//! `escape_attr`: placemark documents are untrusted input and must not be
//! able to inject markup. Rendering is a pure function of the record, so a
//! container repopulated with the same records ends up byte-identical.

use formats::Placemark;
use formats::markup::{escape_attr, escape_html};

use crate::embed;

/// One self-contained card.
pub fn card_html(pm: &Placemark) -> String {
    let header = match &pm.image_url {
        Some(url) => format!(
            r#"<img src="{}" alt="{}" class="placemark-image" loading="lazy" onerror="this.style.display='none';">"#,
            escape_attr(url),
            escape_attr(&pm.name)
        ),
        None => r#"<div class="placemark-overlay" aria-hidden="true"></div>"#.to_string(),
    };

    let description = if pm.description.is_empty() {
        String::new()
    } else {
        format!(
            r#"<p class="placemark-description">{}</p>"#,
            escape_html(&pm.description)
        )
    };

    let coordinates = match pm.coordinates {
        Some(p) => format!(
            r#"<div class="coordinates"><i class="fas fa-map-marker-alt" aria-hidden="true"></i><span>{}</span></div>"#,
            p.display_fixed6()
        ),
        None => String::new(),
    };

    // The zoom button carries raw lat/lng so the handler reads exact values,
    // not the 6-decimal display text.
    let actions = match pm.coordinates {
        Some(p) => format!(
            concat!(
                r#"<button class="placemark-btn primary zoom-btn" data-lat="{lat}" data-lng="{lng}" data-name="{name}">"#,
                r#"<i class="fas fa-search-plus" aria-hidden="true"></i> View on map</button>"#,
                r#"<a href="{link}" target="_blank" rel="noopener noreferrer" class="placemark-btn secondary">"#,
                r#"<i class="fas fa-external-link-alt" aria-hidden="true"></i> Open in Google Maps</a>"#
            ),
            lat = p.lat(),
            lng = p.lng(),
            name = escape_attr(&pm.name),
            link = escape_attr(&embed::point_link(p)),
        ),
        None => String::new(),
    };

    format!(
        concat!(
            r#"<div class="placemark-card" role="article" tabindex="0">"#,
            r#"<div class="placemark-header">{header}"#,
            r#"<div class="placemark-overlay"><h3 class="placemark-title">{title}</h3></div></div>"#,
            r#"<div class="placemark-content">{description}{coordinates}"#,
            r#"<div class="placemark-actions">{actions}</div></div></div>"#
        ),
        header = header,
        title = escape_html(&pm.name),
        description = description,
        coordinates = coordinates,
        actions = actions,
    )
}

/// Concatenated cards for a grid element.
pub fn cards_html(pms: &[Placemark]) -> String {
    pms.iter().map(card_html).collect()
}

/// Full contents of the classic single-list container.
pub fn classic_list_html(pms: &[Placemark]) -> String {
    format!(r#"<div class="placemarks-grid">{}</div>"#, cards_html(pms))
}

#[cfg(test)]
mod tests {
    use formats::Placemark;
    use foundation::LatLng;
    use pretty_assertions::assert_eq;

    use super::{card_html, cards_html, classic_list_html};

    fn full_placemark() -> Placemark {
        Placemark {
            name: "Library".to_string(),
            description: "Main library.".to_string(),
            image_url: Some("https://x/y.jpg".to_string()),
            coordinates: LatLng::new(35.681236, 139.767306),
        }
    }

    #[test]
    fn full_card_has_image_description_coordinates_and_actions() {
        let html = card_html(&full_placemark());
        assert!(html.contains(r#"<img src="https://x/y.jpg""#));
        assert!(html.contains("Main library."));
        assert!(html.contains("35.681236, 139.767306"));
        assert!(html.contains(r#"data-lat="35.681236" data-lng="139.767306""#));
        assert!(html.contains("https://www.google.com/maps/@35.681236,139.767306,15z"));
        assert!(html.contains(r#"rel="noopener noreferrer""#));
    }

    #[test]
    fn missing_pieces_are_omitted_not_blank() {
        let pm = Placemark {
            name: "Bare".to_string(),
            description: String::new(),
            image_url: None,
            coordinates: None,
        };
        let html = card_html(&pm);
        assert!(!html.contains("<img"));
        assert!(html.contains(r#"<div class="placemark-overlay" aria-hidden="true"></div>"#));
        assert!(!html.contains("placemark-description"));
        assert!(!html.contains("coordinates\""));
        assert!(!html.contains("zoom-btn"));
        assert!(!html.contains("<a "));
    }

    #[test]
    fn hostile_kml_content_cannot_inject_markup() {
        let pm = Placemark {
            name: r#"<script>alert(1)</script>" onfocus="x"#.to_string(),
            description: "<b>not stripped here</b>".to_string(),
            image_url: Some(r#"x" onerror="evil()"#.to_string()),
            coordinates: LatLng::new(1.0, 2.0),
        };
        let html = card_html(&pm);
        assert!(!html.contains("<script"));
        assert!(!html.contains(r#"onerror="evil"#));
        assert!(!html.contains("<b>"));
    }

    #[test]
    fn rendering_is_idempotent() {
        let pms = vec![full_placemark(), full_placemark()];
        assert_eq!(classic_list_html(&pms), classic_list_html(&pms));
        assert_eq!(cards_html(&pms), cards_html(&pms));
    }

    #[test]
    fn empty_list_renders_an_empty_grid() {
        assert_eq!(classic_list_html(&[]), r#"<div class="placemarks-grid"></div>"#);
    }
}
