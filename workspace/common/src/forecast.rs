use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Quantile forecast columns for a single model, as returned by the data
/// endpoint.
///
/// All columns are parallel: index `i` across the arrays describes one
/// (target end date, quantile values) tuple. The endpoint does NOT guarantee
/// date order; consumers must sort before use. The five quantile keys are the
/// full predictive distribution the endpoint exposes.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ModelForecast {
    /// Forecast target end dates in `YYYY-MM-DD` format.
    #[serde(default)]
    pub target_end_date: Vec<String>,
    #[serde(default, rename = "q0.025")]
    pub q0_025: Vec<f64>,
    #[serde(default, rename = "q0.25")]
    pub q0_25: Vec<f64>,
    #[serde(default, rename = "q0.5")]
    pub q0_5: Vec<f64>,
    #[serde(default, rename = "q0.75")]
    pub q0_75: Vec<f64>,
    #[serde(default, rename = "q0.975")]
    pub q0_975: Vec<f64>,
}

impl ModelForecast {
    pub fn len(&self) -> usize {
        self.target_end_date.len()
    }

    pub fn is_empty(&self) -> bool {
        self.target_end_date.is_empty()
    }
}

/// Forecast payload for one (target variable, unit, reference date)
/// combination: model abbreviation to that model's forecast columns.
/// Models with no forecast at the reference date are simply absent.
pub type ForecastSet = HashMap<String, ModelForecast>;
