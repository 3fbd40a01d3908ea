use crate::interval::Interval;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Roster index at or beyond which models are never selectable. Kept as a
/// configurable option default; see `VizOptions::max_selectable_models`.
pub const DEFAULT_MAX_SELECTABLE_MODELS: usize = 100;

/// A forecasted quantity offered in the target-variable select, e.g.
/// incident weekly deaths.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TargetVariable {
    /// Internal key, e.g. `"death"`. Matches the keys of `AvailableAsOfs`.
    pub value: String,
    /// Select-box label, e.g. `"Deaths"`.
    pub text: String,
    /// Axis/title label, e.g. `"Incident weekly deaths"`.
    pub plot_text: String,
    /// Whether median lines for this variable carry point markers. The
    /// daily-granularity variables set this to false.
    #[serde(default = "default_point_markers")]
    pub point_markers: bool,
}

fn default_point_markers() -> bool {
    true
}

/// A geographic or organizational entity forecasts apply to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Unit {
    /// Unit abbreviation used in fetch requests, e.g. `"US"` or `"01"`.
    pub value: String,
    /// Select-box label, e.g. `"Alabama"`.
    pub text: String,
}

/// For each target-variable key, the chronologically ascending reference
/// dates at which forecasts exist. Navigation never moves outside these.
pub type AvailableAsOfs = HashMap<String, Vec<String>>;

/// Static configuration supplied by the host page at initialization.
/// Everything except `disclaimer`, `models_at_top` and `x_axis_range_offset`
/// is required for a correct initial render; `validate()` reports every
/// violation it finds rather than stopping at the first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VizOptions {
    pub target_variables: Vec<TargetVariable>,
    pub units: Vec<Unit>,
    /// Interval widths offered in the interval select, as percentages.
    pub intervals: Vec<Interval>,
    pub available_as_ofs: AvailableAsOfs,
    /// The fixed "current" reference date used for current-truth fetches.
    pub current_date: String,
    /// The full model roster. Order determines color assignment and the
    /// selectable-model cap.
    pub models: Vec<String>,
    /// Models checked when the widget first renders.
    pub initial_checked_models: Vec<String>,
    /// Models pinned to the top of the roster list.
    #[serde(default)]
    pub models_at_top: Vec<String>,
    /// Cosmetic text shown above the plot.
    #[serde(default)]
    pub disclaimer: String,
    pub initial_target_var: String,
    pub initial_unit: String,
    pub initial_interval: Interval,
    /// Models at roster indexes at or beyond this are always disabled.
    #[serde(default = "default_max_selectable_models")]
    pub max_selectable_models: usize,
    /// Initial x-axis range as (weeks before, weeks after) the latest
    /// reference date. Both must be at least 1 when present.
    #[serde(default)]
    pub x_axis_range_offset: Option<(u32, u32)>,
}

fn default_max_selectable_models() -> usize {
    DEFAULT_MAX_SELECTABLE_MODELS
}

impl VizOptions {
    /// Validates the document, returning one message per violation and an
    /// empty list for a valid document.
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if self.target_variables.is_empty() {
            errors.push("target_variables is empty".to_string());
        }
        if self.units.is_empty() {
            errors.push("units is empty".to_string());
        }

        if self.intervals.is_empty() {
            errors.push("intervals is empty".to_string());
        }
        for interval in &self.intervals {
            if interval.0 > 100 {
                errors.push(format!(
                    "interval {} is not between 0 and 100 inclusive",
                    interval.0
                ));
            } else if !interval.is_supported() {
                errors.push(format!(
                    "interval {} has no quantile pair in the forecast data",
                    interval
                ));
            }
        }
        if !self.intervals.contains(&self.initial_interval) {
            errors.push(format!(
                "initial_interval {} is not one of the offered intervals",
                self.initial_interval
            ));
        }

        let target_vals: Vec<&str> = self
            .target_variables
            .iter()
            .map(|t| t.value.as_str())
            .collect();
        if !target_vals.contains(&self.initial_target_var.as_str()) {
            errors.push(format!(
                "initial_target_var {:?} is not a known target variable",
                self.initial_target_var
            ));
        }
        for target in &target_vals {
            match self.available_as_ofs.get(*target) {
                Some(as_ofs) if !as_ofs.is_empty() => {}
                _ => errors.push(format!(
                    "available_as_ofs has no reference dates for target variable {:?}",
                    target
                )),
            }
        }

        if !self.units.iter().any(|u| u.value == self.initial_unit) {
            errors.push(format!(
                "initial_unit {:?} is not a known unit",
                self.initial_unit
            ));
        }

        if self.models.is_empty() {
            errors.push("models is empty".to_string());
        }
        if self.initial_checked_models.is_empty() {
            errors.push("initial_checked_models is empty".to_string());
        }
        for model in &self.initial_checked_models {
            if !self.models.contains(model) {
                errors.push(format!(
                    "initial_checked_models entry {:?} is not in the model roster",
                    model
                ));
            }
        }
        for model in &self.models_at_top {
            if !self.models.contains(model) {
                errors.push(format!(
                    "models_at_top entry {:?} is not in the model roster",
                    model
                ));
            }
        }

        if self.current_date.is_empty() {
            errors.push("current_date is empty".to_string());
        }

        if let Some((before, after)) = self.x_axis_range_offset {
            if before < 1 || after < 1 {
                errors.push(format!(
                    "x_axis_range_offset must be two ints > 0, got ({}, {})",
                    before, after
                ));
            }
        }

        errors
    }
}
