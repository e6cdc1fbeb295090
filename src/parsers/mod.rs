pub mod asv;
pub mod types;

pub use asv::Asv;
pub use types::{ParseError, Parseable, TelemetryRow, TripLog};
