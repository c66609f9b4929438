//! Best-effort hygiene for untrusted KML description markup.
//!
//! Descriptions arrive as arbitrary HTML-ish text. We lift the first image
//! out, strip every remaining tag for display, and escape anything that gets
//! interpolated back into markup. Formatting and additional images are
//! discarded by design.

use std::sync::OnceLock;

use regex::Regex;

fn img_tag_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)<img[^>]*>").expect("img tag pattern compiles"))
}

fn img_src_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"(?i)<img[^>]+src\s*=\s*["']([^"']+)["'][^>]*>"#)
            .expect("img src pattern compiles")
    })
}

fn any_tag_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"<[^>]*>").expect("tag pattern compiles"))
}

fn whitespace_run_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\s+").expect("whitespace pattern compiles"))
}

/// First `<img ... src="...">` URL in the raw markup, if any.
pub fn extract_image_src(raw: &str) -> Option<String> {
    img_src_re()
        .captures(raw)
        .map(|c| c[1].to_string())
}

/// Raw markup reduced to plain display text: images removed, tags stripped,
/// whitespace runs collapsed to single spaces, trimmed.
pub fn clean_description(raw: &str) -> String {
    let without_imgs = img_tag_re().replace_all(raw, "");
    let without_tags = any_tag_re().replace_all(&without_imgs, "");
    whitespace_run_re()
        .replace_all(&without_tags, " ")
        .trim()
        .to_string()
}

/// Escape for interpolation into HTML text content.
pub fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;").replace('<', "&lt;").replace('>', "&gt;")
}

/// Escape for interpolation into a double-quoted HTML attribute value.
pub fn escape_attr(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('"', "&quot;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::{clean_description, escape_attr, escape_html, extract_image_src};

    #[test]
    fn lifts_first_image_src() {
        let raw = r#"<p>hi</p><img class="x" src="https://a/b.jpg" alt=""><img src="https://c/d.png">"#;
        assert_eq!(extract_image_src(raw).as_deref(), Some("https://a/b.jpg"));
    }

    #[test]
    fn accepts_single_quoted_src_and_mixed_case() {
        assert_eq!(
            extract_image_src("<IMG SRC='x.png'>").as_deref(),
            Some("x.png")
        );
    }

    #[test]
    fn no_image_yields_none() {
        assert_eq!(extract_image_src("plain text"), None);
        assert_eq!(extract_image_src("<img>"), None);
    }

    #[test]
    fn cleaned_text_has_no_tags_and_no_whitespace_runs() {
        let raw = "<div>Cafe  near\n the <b>north</b> gate.<img src=\"x.jpg\"></div>";
        let clean = clean_description(raw);
        assert_eq!(clean, "Cafe near the north gate.");
        assert!(!clean.contains('<'));
        assert!(!clean.contains("  "));
    }

    #[test]
    fn cleaning_empty_or_tag_only_markup_is_empty() {
        assert_eq!(clean_description(""), "");
        assert_eq!(clean_description("<img src='a.png'>"), "");
        assert_eq!(clean_description("  <br/> \n "), "");
    }

    #[test]
    fn escapes_are_injection_safe() {
        assert_eq!(
            escape_html("<script>a&b</script>"),
            "&lt;script&gt;a&amp;b&lt;/script&gt;"
        );
        assert_eq!(
            escape_attr("\" onmouseover=\"x<y&z"),
            "&quot; onmouseover=&quot;x&lt;y&amp;z"
        );
    }
}
