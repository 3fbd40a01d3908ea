use serde::{Deserialize, Serialize};

/// Observed ground truth for one (target variable, unit, reference date)
/// combination, as returned by the data endpoint.
///
/// The payload is columnar: `date` and `y` are parallel arrays, one
/// observation per index. The endpoint answers `{}` when it has nothing for
/// the requested combination, so both columns default to empty on
/// deserialization. An empty series means "no data", not an error.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TruthSeries {
    /// Observation dates in `YYYY-MM-DD` format.
    #[serde(default)]
    pub date: Vec<String>,
    /// Observed values, parallel to `date`.
    #[serde(default)]
    pub y: Vec<f64>,
}

impl TruthSeries {
    pub fn len(&self) -> usize {
        self.date.len()
    }

    pub fn is_empty(&self) -> bool {
        self.date.is_empty()
    }
}
