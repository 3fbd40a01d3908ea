//! Transport-layer types for the forecast data endpoint.
//! These structs mirror the endpoint's JSON payloads so the visualization
//! core can deserialize responses without duplicating shapes.

mod forecast;
mod truth;

pub use forecast::{ForecastSet, ModelForecast};
pub use truth::TruthSeries;
