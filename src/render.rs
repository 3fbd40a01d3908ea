//! Rendering adapters: conversion of assembled drawables into a plotly
//! figure, and a `UiSurface` that writes each render to an HTML file (used
//! by the CLI).

use crate::error::{Result, VizError};
use crate::roster::RosterView;
use crate::state::VizState;
use crate::ui::UiSurface;
use chrono::NaiveDate;
use compute::plot::{BandTrace, Drawable, LineTrace, PlotLayout, BAND_FILL_ALPHA};
use plotly::common::{Fill, Line, Mode, Title};
use plotly::layout::Axis;
use plotly::{Layout, Plot, Scatter};
use std::path::PathBuf;
use tracing::{debug, info};

fn date_strings(dates: &[NaiveDate]) -> Vec<String> {
    dates.iter().map(|d| d.to_string()).collect()
}

/// CSS `rgba()` string for a `#rrggbb` color at the given alpha. Non-hex
/// inputs pass through unchanged.
fn rgba(color: &str, alpha: f64) -> String {
    let Some(hex) = color.strip_prefix('#') else {
        return color.to_string();
    };
    if hex.len() != 6 {
        return color.to_string();
    }
    match (
        u8::from_str_radix(&hex[0..2], 16),
        u8::from_str_radix(&hex[2..4], 16),
        u8::from_str_radix(&hex[4..6], 16),
    ) {
        (Ok(r), Ok(g), Ok(b)) => format!("rgba({r}, {g}, {b}, {alpha})"),
        _ => color.to_string(),
    }
}

fn line_trace(trace: &LineTrace) -> Box<Scatter<String, f64>> {
    let mode = if trace.markers {
        Mode::LinesMarkers
    } else {
        Mode::Lines
    };
    Scatter::new(date_strings(&trace.x), trace.y.clone())
        .name(&trace.name)
        .mode(mode)
        .line(Line::new().color(trace.color.clone()).width(trace.width))
        .show_legend(trace.show_legend)
}

fn band_trace(trace: &BandTrace) -> Box<Scatter<String, f64>> {
    Scatter::new(date_strings(&trace.x), trace.y.clone())
        .name(&trace.name)
        .mode(Mode::Lines)
        .line(Line::new().width(0.0))
        .fill(Fill::ToSelf)
        .fill_color(rgba(&trace.color, BAND_FILL_ALPHA))
        .show_legend(trace.show_legend)
}

/// Converts an assembled drawable list and layout descriptor into a plotly
/// figure, preserving drawable order as trace z-order.
pub fn to_plotly(drawables: &[Drawable], layout: &PlotLayout) -> Plot {
    let mut plot = Plot::new();
    for drawable in drawables {
        match drawable {
            Drawable::Line(line) => plot.add_trace(line_trace(line)),
            Drawable::Band(band) => plot.add_trace(band_trace(band)),
        }
    }

    let mut x_axis = Axis::new().title(Title::with_text("Date"));
    if let Some((start, end)) = layout.x_range {
        x_axis = x_axis.range(vec![start.to_string(), end.to_string()]);
    }
    let mut plot_layout = Layout::new()
        .title(Title::with_text(layout.title.clone()))
        .x_axis(x_axis)
        .height(600);
    if let Some(y_title) = &layout.y_title {
        plot_layout = plot_layout.y_axis(Axis::new().title(Title::with_text(y_title.clone())));
    }
    plot.set_layout(plot_layout);
    plot
}

/// UI surface for the CLI: every plot render is written to an HTML file.
/// The "container" is the output file's parent directory.
pub struct HtmlFileUi {
    output: PathBuf,
}

impl HtmlFileUi {
    pub fn new(output: impl Into<PathBuf>) -> Self {
        Self {
            output: output.into(),
        }
    }
}

impl UiSurface for HtmlFileUi {
    fn ensure_container(&mut self, container_id: &str) -> Result<()> {
        debug!(container_id, output = %self.output.display(), "resolving output location");
        if let Some(parent) = self.output.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                return Err(VizError::Container(parent.display().to_string()));
            }
        }
        Ok(())
    }

    fn build(&mut self, state: &VizState) {
        if !state.disclaimer.is_empty() {
            info!(disclaimer = %state.disclaimer, "disclaimer");
        }
    }

    fn set_busy(&mut self, busy: bool) {
        debug!(busy, "busy state changed");
    }

    fn render_plot(&mut self, drawables: &[Drawable], layout: &PlotLayout) {
        let plot = to_plotly(drawables, layout);
        plot.write_html(&self.output);
        info!(
            path = %self.output.display(),
            traces = drawables.len(),
            "wrote plot"
        );
    }

    fn render_roster(&mut self, roster: &RosterView) {
        debug!(entries = roster.entries.len(), "roster updated");
    }

    fn set_as_of_label(&mut self, as_of: &str) {
        debug!(as_of, "as-of label updated");
    }
}
