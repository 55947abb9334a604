//! Ferrous DNSWire Application Layer
pub mod ports;
pub mod stats;
pub mod use_cases;

pub use stats::{InspectionStats, StatsSnapshot};
