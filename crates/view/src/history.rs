use foundation::{PrefCode, RegionKey};
use serde::{Deserialize, Serialize};

use crate::state::ViewState;

/// Current payload schema version.
pub const HISTORY_VERSION: u32 = 1;

/// Typed, versioned snapshot of the view state carried by each history entry
/// and mirrored into the page's query string.
///
/// Decoding is lenient by contract: unknown keys are ignored, missing fields
/// fall back field by field, and anything unrecognizable lands on campus.
/// Entries pushed before the `v` field existed therefore still replay.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryPayload {
    #[serde(default)]
    pub v: Option<u32>,
    #[serde(default)]
    pub view: Option<String>,
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default)]
    pub code: Option<String>,
}

impl HistoryPayload {
    pub fn from_state(state: &ViewState) -> Self {
        let mut payload = HistoryPayload {
            v: Some(HISTORY_VERSION),
            view: Some(state.mode().as_str().to_string()),
            region: None,
            code: None,
        };
        match state {
            ViewState::WorldRegion(key) => payload.region = Some(key.as_str().to_string()),
            ViewState::Japan { pref: Some(code) } => payload.code = Some(code.to_string()),
            _ => {}
        }
        payload
    }

    /// Best-effort reconstruction; never fails.
    pub fn to_state(&self) -> ViewState {
        match self.view.as_deref() {
            Some("japan") => ViewState::Japan {
                pref: self.code.as_deref().and_then(PrefCode::new),
            },
            Some("world") => match self.region.as_deref().and_then(RegionKey::parse) {
                Some(key) => ViewState::WorldRegion(key),
                None => ViewState::WorldAll,
            },
            _ => ViewState::Campus,
        }
    }

    /// Query-string form without the leading `?`, e.g.
    /// `v=1&view=world&region=asia`. Every value is a validated identifier,
    /// so no percent-encoding is required.
    pub fn to_query(&self) -> String {
        let mut parts: Vec<String> = Vec::new();
        if let Some(v) = self.v {
            parts.push(format!("v={v}"));
        }
        if let Some(view) = &self.view {
            parts.push(format!("view={view}"));
        }
        if let Some(region) = &self.region {
            parts.push(format!("region={region}"));
        }
        if let Some(code) = &self.code {
            parts.push(format!("code={code}"));
        }
        parts.join("&")
    }

    /// Parse a query string, tolerating a leading `?` and unknown keys.
    pub fn from_query(query: &str) -> Self {
        let mut payload = HistoryPayload::default();
        for pair in query.trim_start_matches('?').split('&') {
            let Some((key, value)) = pair.split_once('=') else {
                continue;
            };
            if value.is_empty() {
                continue;
            }
            match key {
                "v" => payload.v = value.parse().ok(),
                "view" => payload.view = Some(value.to_string()),
                "region" => payload.region = Some(value.to_string()),
                "code" => payload.code = Some(value.to_string()),
                _ => {}
            }
        }
        payload
    }
}

#[cfg(test)]
mod tests {
    use foundation::{PrefCode, RegionKey};
    use pretty_assertions::assert_eq;

    use super::{HISTORY_VERSION, HistoryPayload};
    use crate::state::ViewState;

    fn round_trip(state: ViewState) {
        let payload = HistoryPayload::from_state(&state);
        assert_eq!(payload.v, Some(HISTORY_VERSION));
        let query = payload.to_query();
        assert_eq!(HistoryPayload::from_query(&query).to_state(), state);
    }

    #[test]
    fn every_state_survives_a_query_round_trip() {
        round_trip(ViewState::Campus);
        round_trip(ViewState::Japan { pref: None });
        round_trip(ViewState::Japan { pref: Some(PrefCode::new("35").unwrap()) });
        round_trip(ViewState::WorldAll);
        for key in RegionKey::ALL {
            round_trip(ViewState::WorldRegion(key));
        }
    }

    #[test]
    fn query_shape_matches_the_page_contract() {
        let q = HistoryPayload::from_state(&ViewState::WorldRegion(RegionKey::Asia)).to_query();
        assert_eq!(q, "v=1&view=world&region=asia");
        let q = HistoryPayload::from_state(&ViewState::Campus).to_query();
        assert_eq!(q, "v=1&view=campus");
    }

    #[test]
    fn legacy_entries_without_a_version_still_replay() {
        let state = HistoryPayload::from_query("view=world&region=oceania").to_state();
        assert_eq!(state, ViewState::WorldRegion(RegionKey::Oceania));
    }

    #[test]
    fn unrecognizable_payloads_fall_back_to_campus() {
        assert_eq!(HistoryPayload::from_query("").to_state(), ViewState::Campus);
        assert_eq!(
            HistoryPayload::from_query("?utm_source=mail&view=moon").to_state(),
            ViewState::Campus
        );
    }

    #[test]
    fn partial_decay_is_per_field() {
        // Bad region inside world mode degrades to world-all, not campus.
        let state = HistoryPayload::from_query("v=1&view=world&region=atlantis").to_state();
        assert_eq!(state, ViewState::WorldAll);
        // Bad code inside japan mode degrades to plain japan.
        let state = HistoryPayload::from_query("view=japan&code=../x").to_state();
        assert_eq!(state, ViewState::Japan { pref: None });
    }

    #[test]
    fn json_payload_round_trips_for_push_state() {
        let payload = HistoryPayload::from_state(&ViewState::WorldRegion(RegionKey::Africa));
        let json = serde_json::to_string(&payload).unwrap();
        let back: HistoryPayload = serde_json::from_str(&json).unwrap();
        assert_eq!(back, payload);
    }
}
