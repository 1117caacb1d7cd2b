//! # Algorithms
//!
//! Pure computations over domain types: location decoding, distance, and
//! dashboard statistics. No I/O, no suspension points.

pub mod distance;
pub mod stats;

pub use distance::{decode_location, distance_to_code, planar_distance};
pub use stats::hunt_stats;
