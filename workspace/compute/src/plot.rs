//! Plot assembly: combines truth lines, lead-in connectors and per-model
//! median/band drawables into one ordered list plus a layout descriptor.

use chrono::{Duration, NaiveDate};
use common::{ForecastSet, TruthSeries};
use model::{SelectionState, TargetVariable, Unit};
use tracing::debug;

use crate::error::Result;
use crate::palette::PALETTE;
use crate::series::{build_model_drawables, parse_truth, sort_forecast, TruthPoint};

/// Layout title used when nothing is drawable.
pub const NO_DATA_TITLE: &str = "No Visualization Data Found";

/// Line color of the current-truth series.
pub const CURRENT_TRUTH_COLOR: &str = "#000000";

/// Line color of the as-of-truth series.
pub const AS_OF_TRUTH_COLOR: &str = "#999999";

/// Fill alpha applied to a band's model color.
pub const BAND_FILL_ALPHA: f64 = 0.2;

/// A line with optional point markers.
#[derive(Debug, Clone, PartialEq)]
pub struct LineTrace {
    pub name: String,
    pub x: Vec<NaiveDate>,
    pub y: Vec<f64>,
    pub color: String,
    pub width: f64,
    pub markers: bool,
    pub show_legend: bool,
}

/// A closed filled polygon with no visible border.
#[derive(Debug, Clone, PartialEq)]
pub struct BandTrace {
    pub name: String,
    pub x: Vec<NaiveDate>,
    pub y: Vec<f64>,
    /// Model color; rendered at `BAND_FILL_ALPHA`.
    pub color: String,
    pub show_legend: bool,
}

/// One drawable plot primitive, in z-order.
#[derive(Debug, Clone, PartialEq)]
pub enum Drawable {
    Line(LineTrace),
    Band(BandTrace),
}

impl Drawable {
    pub fn name(&self) -> &str {
        match self {
            Drawable::Line(line) => &line.name,
            Drawable::Band(band) => &band.name,
        }
    }

    pub fn point_count(&self) -> usize {
        match self {
            Drawable::Line(line) => line.x.len(),
            Drawable::Band(band) => band.x.len(),
        }
    }
}

/// Layout descriptor for the assembled plot.
#[derive(Debug, Clone, PartialEq)]
pub struct PlotLayout {
    pub title: String,
    /// Absent in the no-data fallback.
    pub y_title: Option<String>,
    /// Initial x-axis range, when the host configured one.
    pub x_range: Option<(NaiveDate, NaiveDate)>,
}

/// Static inputs to `assemble_plot` beyond the fetched data.
#[derive(Debug)]
pub struct PlotContext<'a> {
    pub target: &'a TargetVariable,
    pub unit: &'a Unit,
    /// The full model roster; position determines the color index.
    pub roster: &'a [String],
    pub selection: &'a SelectionState,
    pub x_range: Option<(NaiveDate, NaiveDate)>,
}

impl PlotContext<'_> {
    fn color_for(&self, model: &str) -> String {
        self.roster
            .iter()
            .position(|m| m == model)
            .and_then(|i| self.selection.colors.get(i).cloned())
            .unwrap_or_else(|| PALETTE[0].to_string())
    }
}

fn truth_line(name: String, color: &str, points: &[TruthPoint]) -> LineTrace {
    LineTrace {
        name,
        x: points.iter().map(|p| p.date).collect(),
        y: points.iter().map(|p| p.value).collect(),
        color: color.to_string(),
        width: 2.0,
        markers: false,
        show_legend: true,
    }
}

/// Derives the initial x-axis range from a (weeks before, weeks after)
/// offset around the given reference date.
pub fn initial_x_range(
    offset: Option<(u32, u32)>,
    reference_date: &str,
) -> Result<Option<(NaiveDate, NaiveDate)>> {
    let Some((before, after)) = offset else {
        return Ok(None);
    };
    let reference = crate::series::parse_date(reference_date)?;
    Ok(Some((
        reference - Duration::weeks(i64::from(before)),
        reference + Duration::weeks(i64::from(after)),
    )))
}

/// Combines truth and forecast series into one ordered drawable list plus a
/// layout descriptor. Ordering is fixed: current truth, as-of truth, every
/// model's lead-in connector, then each model's median and band. Only models
/// both checked and present in the forecast set are drawn. An empty result
/// falls back to the no-data layout.
pub fn assemble_plot(
    ctx: &PlotContext<'_>,
    current_truth: Option<&TruthSeries>,
    as_of_truth: Option<&TruthSeries>,
    forecasts: &ForecastSet,
) -> Result<(Vec<Drawable>, PlotLayout)> {
    // The as-of truth feeds lead-in connectors even when its line is
    // unchecked, so parse it up front.
    let as_of_points = match as_of_truth {
        Some(truth) if !truth.is_empty() => Some(parse_truth(truth)?),
        _ => None,
    };

    let mut drawables = Vec::new();

    if ctx.selection.current_truth_checked {
        if let Some(truth) = current_truth.filter(|t| !t.is_empty()) {
            let points = parse_truth(truth)?;
            drawables.push(Drawable::Line(truth_line(
                "Current Truth".to_string(),
                CURRENT_TRUTH_COLOR,
                &points,
            )));
        }
    }
    if ctx.selection.as_of_truth_checked {
        if let Some(points) = &as_of_points {
            drawables.push(Drawable::Line(truth_line(
                format!("Truth as of {}", ctx.selection.as_of),
                AS_OF_TRUTH_COLOR,
                points,
            )));
        }
    }

    let mut per_model = Vec::new();
    for model in &ctx.selection.checked_models {
        let Some(raw) = forecasts.get(model) else {
            continue;
        };
        let sorted = sort_forecast(model, raw)?;
        let built = build_model_drawables(
            &sorted,
            &ctx.color_for(model),
            ctx.selection.interval,
            as_of_points.as_deref(),
            ctx.target.point_markers,
        )?;
        if let Some(built) = built {
            per_model.push(built);
        }
    }

    for model in &per_model {
        if let Some(lead_in) = &model.lead_in {
            drawables.push(Drawable::Line(lead_in.clone()));
        }
    }
    for model in per_model {
        drawables.push(Drawable::Line(model.median));
        if let Some(band) = model.band {
            drawables.push(Drawable::Band(band));
        }
    }

    let layout = if drawables.is_empty() {
        debug!("nothing drawable, falling back to the no-data layout");
        PlotLayout {
            title: NO_DATA_TITLE.to_string(),
            y_title: None,
            x_range: None,
        }
    } else {
        PlotLayout {
            title: format!(
                "Forecasts of {} in {} as of {}",
                ctx.target.plot_text, ctx.unit.text, ctx.selection.as_of
            ),
            y_title: Some(ctx.target.plot_text.clone()),
            x_range: ctx.x_range,
        }
    };

    Ok((drawables, layout))
}
