//! Data ingestion
//!
//! Season table, Statcast CSV parsing and the remote/local pitch sources.

pub mod season;
pub mod sources;
pub mod statcast;

pub use season::season_window;
pub use sources::{PitchSource, PlayerDirectory};
