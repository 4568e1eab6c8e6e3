//! Fire-marker toggle controller.
//!
//! The controller owns toggle state and the active marker set; it talks to
//! the host map only through the `MapSurface` capability trait, so the state
//! machine is unit-testable without a DOM or a live map.

pub mod config;
pub mod controller;
pub mod surface;

pub use config::ViewportConfig;
pub use controller::{ClickOutcome, ClickPath, FIT_PAD_RATIO, FireOverlay};
pub use surface::MapSurface;
