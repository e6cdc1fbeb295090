//! Derived statistics over a parsed trip log.
//!
//! Everything here is a pure function of an already-sorted row sequence:
//! geodesic distance accumulation in [`distance`] and the per-trip summary
//! (duration, distances, active sensors) in [`trip`]. Rows with sentinel
//! coordinates or missing timestamps are filtered here, not upstream - the
//! parser emits them as data and the statistics decide what counts.

pub mod distance;
pub mod trip;

pub use distance::{direct_distance_nm, nm_to_km, pair_distance_nm, total_distance_nm};
pub use trip::{summarize, TripSummary};
