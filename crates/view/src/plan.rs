use foundation::RegionKey;

use crate::state::{MapMode, ViewState};

/// What the region-picker control should show.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RegionPicker {
    /// Control hidden entirely (campus and japan modes).
    Hidden,
    /// Dropdown visible with the empty "all regions" value.
    Dropdown,
    /// Dropdown swapped for the selected-region badge.
    Selected(RegionKey),
}

/// Static presentation derived from one `ViewState`.
///
/// Holding the active mode as a single field is what makes "exactly one
/// frame, exactly one button" structural rather than convention-enforced;
/// there is no way to express two active frames.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct RenderPlan {
    pub active: MapMode,
    pub region_picker: RegionPicker,
}

impl RenderPlan {
    /// Value the dropdown control should mirror.
    pub fn dropdown_value(&self) -> &'static str {
        match self.region_picker {
            RegionPicker::Selected(key) => key.as_str(),
            _ => "",
        }
    }

    /// Text for the selected-region badge, empty when no region is chosen.
    pub fn badge_text(&self) -> &'static str {
        match self.region_picker {
            RegionPicker::Selected(key) => key.display_name(),
            _ => "",
        }
    }
}

/// Pair settled region loads with their keys, index-aligned with
/// `RegionKey::ALL` and dropping failures.
///
/// Joining positionally instead of by arrival order is what makes the
/// world-all population deterministic: sections always fill as asia, europe,
/// africa, oceania, north-america, and one failed region leaves a hole
/// without disturbing the other four.
pub fn settled_region_blocks<T, E>(
    results: impl IntoIterator<Item = Result<T, E>>,
) -> Vec<(RegionKey, T)> {
    RegionKey::ALL
        .iter()
        .copied()
        .zip(results)
        .filter_map(|(key, result)| result.ok().map(|value| (key, value)))
        .collect()
}

pub fn render_plan(state: &ViewState) -> RenderPlan {
    let region_picker = match state {
        ViewState::Campus | ViewState::Japan { .. } => RegionPicker::Hidden,
        ViewState::WorldAll => RegionPicker::Dropdown,
        ViewState::WorldRegion(key) => RegionPicker::Selected(*key),
    };
    RenderPlan {
        active: state.mode(),
        region_picker,
    }
}
