use crate::navigation::StepDirection;
use model::{Interval, TruthKind};

/// Typed UI commands consumed by the controller. UI adapters translate raw
/// toolkit events (select changes, checkbox clicks, key presses) into these,
/// keeping the core independent of any particular toolkit.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    SetTargetVariable(String),
    SetUnit(String),
    SetInterval(Interval),
    ToggleTruth { kind: TruthKind, checked: bool },
    ToggleModel { model: String, checked: bool },
    /// The "select all models" checkbox: checking snapshots the current
    /// selection and selects every selectable model; unchecking restores
    /// the snapshot.
    ToggleAllModels(bool),
    ShuffleColors,
    StepAsOf(StepDirection),
}
