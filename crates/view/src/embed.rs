//! Embed-URL construction for the third-party map frames.
//!
//! Centered URLs are always rebuilt from the base constant, so sequential
//! re-centerings can never accumulate stale query fragments.

use formats::markup::escape_attr;
use foundation::LatLng;

use crate::state::MapMode;

pub const CAMPUS_EMBED_URL: &str =
    "https://www.google.com/maps/d/u/1/embed?mid=1nTgYFWkXf1UQHwGZCwdXuRv-aopgUkY&ehbc=2E312F";
pub const WORLD_EMBED_URL: &str =
    "https://www.google.com/maps/d/embed?mid=1qtamWdIhe4du3uLXQxcD9IrGgNgaVoc&ehbc=2E312F";

/// Zoom when jumping to an individual placemark.
pub const PLACEMARK_ZOOM: u8 = 17;
/// Zoom when centering a whole region.
pub const REGION_ZOOM: u8 = 14;
/// Zoom for the external full-map link on cards.
pub const POINT_LINK_ZOOM: u8 = 15;

/// Base embed URL a placemark zoom should target in the given mode.
///
/// Japan has no embed base: its frame belongs to the external national-map
/// widget, so zooming there is a no-op for this layer.
pub fn zoom_base(mode: MapMode) -> Option<&'static str> {
    match mode {
        MapMode::Campus => Some(CAMPUS_EMBED_URL),
        MapMode::World => Some(WORLD_EMBED_URL),
        MapMode::Japan => None,
    }
}

pub fn centered(base: &str, point: LatLng, zoom: u8) -> String {
    format!("{base}&ll={},{}&z={zoom}", point.lat(), point.lng())
}

/// World-frame URL for a selected region: centered on the region's first
/// located placemark at region zoom, or the plain base when none exists.
pub fn world_region_url(first_point: Option<LatLng>) -> String {
    match first_point {
        Some(p) => centered(WORLD_EMBED_URL, p, REGION_ZOOM),
        None => WORLD_EMBED_URL.to_string(),
    }
}

/// External point-of-interest link opened in a new browsing context.
pub fn point_link(point: LatLng) -> String {
    format!(
        "https://www.google.com/maps/@{},{},{}z",
        point.lat(),
        point.lng(),
        POINT_LINK_ZOOM
    )
}

/// Full iframe markup for a frame slot. URL and title are attribute-escaped;
/// the title doubles as the frame's accessible name.
pub fn iframe_html(url: &str, title: &str) -> String {
    format!(
        r#"<iframe src="{}" width="100%" height="100%" style="border:0;" allowfullscreen loading="lazy" title="{}"></iframe>"#,
        escape_attr(url),
        escape_attr(title)
    )
}
