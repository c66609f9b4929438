pub mod kml;
pub mod markup;
pub mod placemark;

pub use kml::{KmlDocument, KmlError};
pub use placemark::{Placemark, parse_coordinates};
