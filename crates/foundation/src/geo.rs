/// A geographic coordinate pair in degrees, latitude first.
///
/// Construction is the only validation point: a `LatLng` always holds two
/// finite values, so downstream URL and display formatting never has to
/// re-check for NaN or infinities.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct LatLng {
    lat: f64,
    lng: f64,
}

impl LatLng {
    /// Returns `None` unless both components are finite.
    pub fn new(lat: f64, lng: f64) -> Option<Self> {
        if lat.is_finite() && lng.is_finite() {
            Some(Self { lat, lng })
        } else {
            None
        }
    }

    pub fn lat(&self) -> f64 {
        self.lat
    }

    pub fn lng(&self) -> f64 {
        self.lng
    }

    /// "lat, lng" to six decimal places, the display form used on cards.
    pub fn display_fixed6(&self) -> String {
        format!("{:.6}, {:.6}", self.lat, self.lng)
    }
}
