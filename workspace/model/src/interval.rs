use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the five predictive quantiles the data endpoint exposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Quantile {
    Q0_025,
    Q0_25,
    Q0_5,
    Q0_75,
    Q0_975,
}

impl Quantile {
    /// The payload column key, e.g. `"q0.5"`.
    pub fn key(&self) -> &'static str {
        match self {
            Quantile::Q0_025 => "q0.025",
            Quantile::Q0_25 => "q0.25",
            Quantile::Q0_5 => "q0.5",
            Quantile::Q0_75 => "q0.75",
            Quantile::Q0_975 => "q0.975",
        }
    }
}

/// A symmetric central prediction interval, identified by its percentage
/// width. `Interval(0)` is the degenerate median-only choice: no band is
/// drawn for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Interval(pub u8);

impl Interval {
    pub const MEDIAN: Interval = Interval(0);

    pub fn is_median(&self) -> bool {
        self.0 == 0
    }

    /// The (lower, upper) quantile columns bounding this interval, or `None`
    /// for the median-only choice. Widths with no matching quantile pair in
    /// the endpoint's five columns also return `None`; callers that need a
    /// band must treat that as an error rather than skip it silently.
    pub fn quantile_pair(&self) -> Option<(Quantile, Quantile)> {
        match self.0 {
            50 => Some((Quantile::Q0_25, Quantile::Q0_75)),
            95 => Some((Quantile::Q0_025, Quantile::Q0_975)),
            _ => None,
        }
    }

    /// Whether this width can be rendered from the endpoint's five quantile
    /// columns.
    pub fn is_supported(&self) -> bool {
        self.is_median() || self.quantile_pair().is_some()
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}
