//! Pure transformation pipeline for the forecast visualization core: color
//! assignment, calendar-ordered series transformation and plot assembly.
//! Nothing in this crate performs I/O; it turns already-fetched payloads
//! into drawable primitives.

pub mod error;
pub mod palette;
pub mod plot;
pub mod series;

pub use error::{ComputeError, Result};
