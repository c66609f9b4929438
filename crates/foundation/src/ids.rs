/// One of the five fixed world regions.
///
/// The variant order is the canonical display order: region blocks are always
/// populated in `ALL` order regardless of which load settles first.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RegionKey {
    Asia,
    Europe,
    Africa,
    Oceania,
    NorthAmerica,
}

impl RegionKey {
    pub const ALL: [RegionKey; 5] = [
        RegionKey::Asia,
        RegionKey::Europe,
        RegionKey::Africa,
        RegionKey::Oceania,
        RegionKey::NorthAmerica,
    ];

    /// The wire identifier used in KML paths, DOM ids, and history payloads.
    pub fn as_str(&self) -> &'static str {
        match self {
            RegionKey::Asia => "asia",
            RegionKey::Europe => "europe",
            RegionKey::Africa => "africa",
            RegionKey::Oceania => "oceania",
            RegionKey::NorthAmerica => "north-america",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "asia" => Some(RegionKey::Asia),
            "europe" => Some(RegionKey::Europe),
            "africa" => Some(RegionKey::Africa),
            "oceania" => Some(RegionKey::Oceania),
            "north-america" => Some(RegionKey::NorthAmerica),
            _ => None,
        }
    }

    /// Human-readable name shown on the selected-region badge.
    pub fn display_name(&self) -> &'static str {
        match self {
            RegionKey::Asia => "Asia",
            RegionKey::Europe => "Europe",
            RegionKey::Africa => "Africa",
            RegionKey::Oceania => "Oceania",
            RegionKey::NorthAmerica => "North America",
        }
    }
}

impl std::fmt::Display for RegionKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A prefecture code as used in KML file names (e.g. "35").
///
/// Codes come from the external national-map collaborator; validation only
/// guards against values that would be unsafe to splice into a path.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PrefCode(String);

impl PrefCode {
    pub fn new(code: impl Into<String>) -> Option<Self> {
        let code = code.into();
        let ok = !code.is_empty()
            && code.len() <= 4
            && code.chars().all(|c| c.is_ascii_alphanumeric());
        ok.then_some(Self(code))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for PrefCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
