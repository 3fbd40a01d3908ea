//! Per-model series transformation: calendar-ordered sorting of the raw
//! parallel arrays, the lead-in connector joining observed truth to the
//! first forecast point, and the interval band polygon.

use chrono::NaiveDate;
use common::{ModelForecast, TruthSeries};
use model::{Interval, Quantile};
use tracing::debug;

use crate::error::{ComputeError, Result};
use crate::plot::{BandTrace, LineTrace};

/// Parses a payload date. `YYYY-MM-DD` is the canonical endpoint format;
/// `YYYY/MM/DD` is tolerated. Comparison downstream is by calendar date,
/// never lexical.
pub fn parse_date(raw: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(raw, "%Y/%m/%d"))
        .map_err(|_| ComputeError::DateParse(raw.to_string()))
}

/// One observed truth value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TruthPoint {
    pub date: NaiveDate,
    pub value: f64,
}

/// Parses a truth payload into calendar-ordered points.
pub fn parse_truth(series: &TruthSeries) -> Result<Vec<TruthPoint>> {
    if series.date.len() != series.y.len() {
        return Err(ComputeError::TruthLength {
            dates: series.date.len(),
            values: series.y.len(),
        });
    }
    let mut points = Vec::with_capacity(series.len());
    for (raw, value) in series.date.iter().zip(&series.y) {
        points.push(TruthPoint {
            date: parse_date(raw)?,
            value: *value,
        });
    }
    points.sort_by_key(|p| p.date);
    Ok(points)
}

/// A model's forecast columns re-ordered ascending by calendar date. Built
/// fresh from the raw payload; the fetched data is never mutated.
#[derive(Debug, Clone, PartialEq)]
pub struct SortedForecast {
    pub model: String,
    pub dates: Vec<NaiveDate>,
    pub q0_025: Vec<f64>,
    pub q0_25: Vec<f64>,
    pub q0_5: Vec<f64>,
    pub q0_75: Vec<f64>,
    pub q0_975: Vec<f64>,
}

impl SortedForecast {
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    pub fn series(&self, quantile: Quantile) -> &[f64] {
        match quantile {
            Quantile::Q0_025 => &self.q0_025,
            Quantile::Q0_25 => &self.q0_25,
            Quantile::Q0_5 => &self.q0_5,
            Quantile::Q0_75 => &self.q0_75,
            Quantile::Q0_975 => &self.q0_975,
        }
    }
}

fn check_column(model: &str, column: &'static str, expected: usize, actual: usize) -> Result<()> {
    if expected == actual {
        Ok(())
    } else {
        Err(ComputeError::ColumnLength {
            model: model.to_string(),
            column,
            expected,
            actual,
        })
    }
}

fn reorder(values: &[f64], order: &[usize]) -> Vec<f64> {
    order.iter().map(|&i| values[i]).collect()
}

/// Zips the raw parallel arrays into (date, quantiles) tuples, sorts them
/// ascending by calendar date and unzips into a new `SortedForecast`.
pub fn sort_forecast(model: &str, raw: &ModelForecast) -> Result<SortedForecast> {
    let n = raw.target_end_date.len();
    check_column(model, "q0.025", n, raw.q0_025.len())?;
    check_column(model, "q0.25", n, raw.q0_25.len())?;
    check_column(model, "q0.5", n, raw.q0_5.len())?;
    check_column(model, "q0.75", n, raw.q0_75.len())?;
    check_column(model, "q0.975", n, raw.q0_975.len())?;

    let dates = raw
        .target_end_date
        .iter()
        .map(|d| parse_date(d))
        .collect::<Result<Vec<_>>>()?;

    let mut order: Vec<usize> = (0..n).collect();
    order.sort_by_key(|&i| dates[i]);

    Ok(SortedForecast {
        model: model.to_string(),
        dates: order.iter().map(|&i| dates[i]).collect(),
        q0_025: reorder(&raw.q0_025, &order),
        q0_25: reorder(&raw.q0_25, &order),
        q0_5: reorder(&raw.q0_5, &order),
        q0_75: reorder(&raw.q0_75, &order),
        q0_975: reorder(&raw.q0_975, &order),
    })
}

/// The drawables one model contributes to the plot.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelDrawables {
    /// Two-point connector from the last as-of-truth observation to the
    /// first forecast point. Absent when as-of truth is not loaded.
    pub lead_in: Option<LineTrace>,
    pub median: LineTrace,
    /// Interval band; absent for the median-only interval.
    pub band: Option<BandTrace>,
}

/// Builds a model's median line, lead-in connector and interval band from a
/// sorted forecast. Returns `Ok(None)` for a zero-length forecast. A
/// non-median interval with no quantile pair in the data is an error, not a
/// silent skip.
pub fn build_model_drawables(
    sorted: &SortedForecast,
    color: &str,
    interval: Interval,
    as_of_truth: Option<&[TruthPoint]>,
    point_markers: bool,
) -> Result<Option<ModelDrawables>> {
    if sorted.is_empty() {
        debug!(model = %sorted.model, "empty forecast, nothing to draw");
        return Ok(None);
    }

    let median = LineTrace {
        name: sorted.model.clone(),
        x: sorted.dates.clone(),
        y: sorted.q0_5.clone(),
        color: color.to_string(),
        width: 2.0,
        markers: point_markers,
        show_legend: true,
    };

    let last_truth = as_of_truth.and_then(|points| points.last().copied());
    let lead_in = last_truth.map(|truth| LineTrace {
        name: sorted.model.clone(),
        x: vec![truth.date, sorted.dates[0]],
        y: vec![truth.value, sorted.q0_5[0]],
        color: color.to_string(),
        width: 2.0,
        markers: false,
        show_legend: false,
    });

    let band = if interval.is_median() {
        None
    } else {
        let (lower, upper) = interval
            .quantile_pair()
            .ok_or(ComputeError::UnsupportedInterval(interval.0))?;
        let lower = sorted.series(lower);
        let upper = sorted.series(upper);

        // Closed path: lower boundary forward, upper boundary reversed,
        // prefixed by the last truth observation when present.
        let n = sorted.len();
        let mut x = Vec::with_capacity(2 * n + 1);
        let mut y = Vec::with_capacity(2 * n + 1);
        if let Some(truth) = last_truth {
            x.push(truth.date);
            y.push(truth.value);
        }
        x.extend(&sorted.dates);
        y.extend(lower);
        x.extend(sorted.dates.iter().rev());
        y.extend(upper.iter().rev());

        Some(BandTrace {
            name: sorted.model.clone(),
            x,
            y,
            color: color.to_string(),
            show_legend: false,
        })
    };

    Ok(Some(ModelDrawables {
        lead_in,
        median,
        band,
    }))
}
