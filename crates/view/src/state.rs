use foundation::{PrefCode, RegionKey};

/// Which of the three map surfaces a state runs on. Exactly one frame and one
/// mode button are active at a time; both derive from this value.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MapMode {
    Campus,
    Japan,
    World,
}

impl MapMode {
    pub const ALL: [MapMode; 3] = [MapMode::Campus, MapMode::Japan, MapMode::World];

    pub fn as_str(&self) -> &'static str {
        match self {
            MapMode::Campus => "campus",
            MapMode::Japan => "japan",
            MapMode::World => "world",
        }
    }
}

/// The page's navigation state as a tagged union.
///
/// `Japan`'s prefecture and `WorldRegion`'s key only exist on the variants
/// where they mean something, so the cross-field invariants of the reference
/// behavior hold by construction.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ViewState {
    Campus,
    Japan { pref: Option<PrefCode> },
    WorldAll,
    WorldRegion(RegionKey),
}

impl Default for ViewState {
    fn default() -> Self {
        ViewState::Campus
    }
}

impl ViewState {
    pub fn mode(&self) -> MapMode {
        match self {
            ViewState::Campus => MapMode::Campus,
            ViewState::Japan { .. } => MapMode::Japan,
            ViewState::WorldAll | ViewState::WorldRegion(_) => MapMode::World,
        }
    }

    pub fn region(&self) -> Option<RegionKey> {
        match self {
            ViewState::WorldRegion(key) => Some(*key),
            _ => None,
        }
    }

    pub fn pref(&self) -> Option<&PrefCode> {
        match self {
            ViewState::Japan { pref } => pref.as_ref(),
            _ => None,
        }
    }
}
