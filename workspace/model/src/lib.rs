//! Domain model for the forecast visualization core: the static
//! configuration supplied by the host page and the mutable selection state
//! the controller owns for the lifetime of a session.

pub mod interval;
pub mod options;
pub mod selection;

pub use interval::{Interval, Quantile};
pub use options::{AvailableAsOfs, TargetVariable, Unit, VizOptions, DEFAULT_MAX_SELECTABLE_MODELS};
pub use selection::{SelectionState, TruthKind};
