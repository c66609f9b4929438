use foundation::{PrefCode, RegionKey, Timestamp};

/// Identity of one KML source: the campus document, one prefecture, or one
/// world region. Doubles as the cache key, so the three logical partitions
/// (campus slot, prefecture map, region map) never collide.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SourceKey {
    Campus,
    Prefecture(PrefCode),
    Region(RegionKey),
}

impl SourceKey {
    /// Relative path of the KML document on the hosting origin.
    pub fn path(&self) -> String {
        match self {
            SourceKey::Campus => "placemark/campus.kml".to_string(),
            SourceKey::Prefecture(code) => format!("placemark/{code}.kml"),
            SourceKey::Region(key) => format!("placemark/region-{key}.kml"),
        }
    }

    /// Path with the cache-busting token appended.
    pub fn request_url(&self, now: Timestamp) -> String {
        format!("{}?t={}", self.path(), now.as_millis())
    }

    /// Short label used when logging a failed load.
    pub fn context_label(&self) -> String {
        match self {
            SourceKey::Campus => "campus".to_string(),
            SourceKey::Prefecture(code) => format!("prefecture {code}"),
            SourceKey::Region(key) => format!("region {key}"),
        }
    }
}

impl std::fmt::Display for SourceKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.context_label())
    }
}

#[cfg(test)]
mod tests {
    use foundation::{PrefCode, RegionKey, Timestamp};

    use super::SourceKey;

    #[test]
    fn paths_follow_the_agreed_naming() {
        assert_eq!(SourceKey::Campus.path(), "placemark/campus.kml");
        assert_eq!(
            SourceKey::Prefecture(PrefCode::new("35").unwrap()).path(),
            "placemark/35.kml"
        );
        assert_eq!(
            SourceKey::Region(RegionKey::NorthAmerica).path(),
            "placemark/region-north-america.kml"
        );
    }

    #[test]
    fn request_url_carries_the_cache_buster() {
        let url = SourceKey::Campus.request_url(Timestamp::from_millis(1234));
        assert_eq!(url, "placemark/campus.kml?t=1234");
    }
}
