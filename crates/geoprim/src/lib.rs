pub mod bounds;
pub mod latlng;

// Geoprim crate: small, well-tested primitives only.
pub use bounds::*;
pub use latlng::*;
