pub mod cache;
pub mod error;
pub mod source;

pub use cache::KmlCache;
pub use error::LoadError;
pub use source::SourceKey;
