use foundation::LatLng;

use crate::markup;

/// Name used when a placemark carries no usable `<name>` element.
pub const UNKNOWN_NAME: &str = "name unknown";

/// Semantic record derived from one KML `Placemark` node.
///
/// Derived fresh from the document on every render; never cached on its own.
#[derive(Clone, Debug, PartialEq)]
pub struct Placemark {
    pub name: String,
    /// Plain display text: tags stripped, whitespace collapsed.
    pub description: String,
    /// First `<img src>` found in the raw description markup.
    pub image_url: Option<String>,
    pub coordinates: Option<LatLng>,
}

impl Placemark {
    pub fn from_node(node: roxmltree::Node) -> Self {
        let name = deep_text(node, "name")
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| UNKNOWN_NAME.to_string());
        let raw_description = deep_text(node, "description").unwrap_or_default();
        let coords_text = deep_text(node, "coordinates").unwrap_or_default();

        Placemark {
            name,
            image_url: markup::extract_image_src(&raw_description),
            description: markup::clean_description(&raw_description),
            coordinates: parse_coordinates(&coords_text),
        }
    }
}

/// Concatenated text content of the first descendant with the given tag name,
/// namespace-agnostic. CDATA counts as text.
fn deep_text(node: roxmltree::Node, tag: &str) -> Option<String> {
    let el = node
        .descendants()
        .find(|n| n.is_element() && n.tag_name().name() == tag)?;
    let text: String = el
        .descendants()
        .filter(|n| n.is_text())
        .filter_map(|n| n.text())
        .collect();
    Some(text)
}

/// First whitespace-separated "lon,lat[,alt]" tuple, as a validated pair.
///
/// Subsequent tuples are ignored: only point geometries are meaningfully
/// supported. Absent unless both components parse to finite floats.
pub fn parse_coordinates(text: &str) -> Option<LatLng> {
    let first = text.split_whitespace().next()?;
    let mut parts = first.split(',');
    let lng: f64 = parts.next()?.trim().parse().ok()?;
    let lat: f64 = parts.next()?.trim().parse().ok()?;
    LatLng::new(lat, lng)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::{Placemark, UNKNOWN_NAME, parse_coordinates};

    fn placemark_from(xml: &str) -> Placemark {
        let doc = roxmltree::Document::parse(xml).unwrap();
        let node = doc
            .descendants()
            .find(|n| n.tag_name().name() == "Placemark")
            .unwrap();
        Placemark::from_node(node)
    }

    #[test]
    fn coordinates_are_lon_lat_order_at_full_precision() {
        let p = parse_coordinates("139.767306,35.681236,12.5").unwrap();
        assert_eq!(p.lat(), 35.681236);
        assert_eq!(p.lng(), 139.767306);
    }

    #[test]
    fn only_the_first_tuple_counts() {
        let p = parse_coordinates("10,20 30,40 50,60").unwrap();
        assert_eq!((p.lat(), p.lng()), (20.0, 10.0));
    }

    #[test]
    fn malformed_coordinates_are_absent_not_zero() {
        assert_eq!(parse_coordinates(""), None);
        assert_eq!(parse_coordinates("   "), None);
        assert_eq!(parse_coordinates("abc,def"), None);
        assert_eq!(parse_coordinates("139.7"), None);
        assert_eq!(parse_coordinates("NaN,35"), None);
        assert_eq!(parse_coordinates("1e999,35"), None);
    }

    #[test]
    fn missing_name_gets_the_placeholder() {
        let p = placemark_from("<Placemark><Point><coordinates>1,2</coordinates></Point></Placemark>");
        assert_eq!(p.name, UNKNOWN_NAME);
        let p = placemark_from("<Placemark><name>  </name></Placemark>");
        assert_eq!(p.name, UNKNOWN_NAME);
    }

    #[test]
    fn description_markup_is_lifted_and_stripped() {
        let p = placemark_from(
            r#"<Placemark>
  <name>Cafe</name>
  <description><![CDATA[<img src="https://x/y.jpg"><p>Open   daily.</p>]]></description>
</Placemark>"#,
        );
        assert_eq!(p.image_url.as_deref(), Some("https://x/y.jpg"));
        assert_eq!(p.description, "Open daily.");
    }

    #[test]
    fn placemark_without_point_has_no_coordinates() {
        let p = placemark_from("<Placemark><name>A</name></Placemark>");
        assert_eq!(p.coordinates, None);
    }

    #[test]
    fn namespaced_kml_elements_are_found() {
        let p = placemark_from(
            r#"<kml xmlns="http://www.opengis.net/kml/2.2"><Placemark><name>N</name><Point><coordinates>139,35</coordinates></Point></Placemark></kml>"#,
        );
        assert_eq!(p.name, "N");
        let c = p.coordinates.unwrap();
        assert_eq!((c.lat(), c.lng()), (35.0, 139.0));
    }
}
