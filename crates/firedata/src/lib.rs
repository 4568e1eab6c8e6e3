//! Fire-data domain model shared by the viewer and the server.
//!
//! - `FireRecord`: one thermal-anomaly detection as served by the API
//! - `FireApiResponse`: the `{success, error, data, count}` JSON envelope
//! - `decode_active_fires`: fail-closed envelope decoding
//! - `DataError`: transport / application / decode error taxonomy

pub mod envelope;
pub mod error;
pub mod record;

pub use envelope::{FireApiResponse, decode_active_fires};
pub use error::DataError;
pub use record::{Confidence, DayNight, FireRecord};
