//! The write-path intake pipeline: repair, validate, normalize.
//!
//! Each stage is a pure function of its input. Repair and validation
//! failures are terminal for a request; normalization never fails.

pub mod normalize;
pub mod repair;
pub mod schema;
