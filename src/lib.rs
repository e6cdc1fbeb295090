//! MareeLog - decoder and normalization engine for ASV marine refrigeration
//! telemetry logs.
//!
//! The ASV monitoring unit exports newline-delimited CSV logs in which most
//! lines are obscured with a fixed substitution codec. This library turns that
//! raw text into a chronologically ordered sequence of telemetry rows plus the
//! derived trip statistics (distance travelled, duration, active sensor set)
//! consumed by the charting and printing front end.
//!
//! ## Module Structure
//!
//! - [`codec`] - Substitution codec and plaintext line detection
//! - [`datetime`] - Timestamp parsing and duration formatting
//! - [`parsers`] - ASV log file parser and core data types
//! - [`analysis`] - Geodesic distance accumulation and trip summaries
//! - [`series`] - Carry-forward gap fill, display thinning and pagination
//! - [`settings`] - Chart and sensor configuration persistence

pub mod analysis;
pub mod codec;
pub mod datetime;
pub mod parsers;
pub mod series;
pub mod settings;
