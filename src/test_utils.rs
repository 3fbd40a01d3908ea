//! Shared fixtures for the integration tests: a programmable fetch
//! collaborator with call counting, and a recording UI surface.

use crate::error::{Result, VizError};
use crate::fetch::{DataFetcher, FetchError};
use crate::roster::RosterView;
use crate::state::VizState;
use crate::ui::UiSurface;
use async_trait::async_trait;
use compute::plot::{Drawable, PlotLayout};
use model::{Interval, TargetVariable, Unit, VizOptions};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

pub type FetchKey = (bool, String, String, String);

/// Fetch collaborator with canned responses. Unknown requests answer `{}`
/// (the endpoint's "no data" payload); every request is recorded.
#[derive(Default)]
pub struct MockFetcher {
    responses: Mutex<HashMap<FetchKey, Value>>,
    calls: Mutex<Vec<FetchKey>>,
    fail_truth: AtomicBool,
    fail_forecasts: AtomicBool,
}

impl MockFetcher {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn set_response(&self, is_forecast: bool, target: &str, unit: &str, date: &str, value: Value) {
        self.responses.lock().unwrap().insert(
            (is_forecast, target.into(), unit.into(), date.into()),
            value,
        );
    }

    pub fn set_fail_truth(&self, fail: bool) {
        self.fail_truth.store(fail, Ordering::SeqCst);
    }

    pub fn set_fail_forecasts(&self, fail: bool) {
        self.fail_forecasts.store(fail, Ordering::SeqCst);
    }

    pub fn clear_calls(&self) {
        self.calls.lock().unwrap().clear();
    }

    pub fn total_calls(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// Calls matching kind and reference date, across targets and units.
    pub fn count(&self, is_forecast: bool, reference_date: &str) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|(forecast, _, _, date)| *forecast == is_forecast && date == reference_date)
            .count()
    }
}

#[async_trait]
impl DataFetcher for MockFetcher {
    async fn fetch_data(
        &self,
        is_forecast: bool,
        target_key: &str,
        unit_abbrev: &str,
        reference_date: &str,
    ) -> std::result::Result<Value, FetchError> {
        let key = (
            is_forecast,
            target_key.to_string(),
            unit_abbrev.to_string(),
            reference_date.to_string(),
        );
        self.calls.lock().unwrap().push(key.clone());

        let failing = if is_forecast {
            self.fail_forecasts.load(Ordering::SeqCst)
        } else {
            self.fail_truth.load(Ordering::SeqCst)
        };
        if failing {
            return Err(FetchError::Status(500));
        }

        Ok(self
            .responses
            .lock()
            .unwrap()
            .get(&key)
            .cloned()
            .unwrap_or_else(|| json!({})))
    }
}

#[derive(Debug, Clone)]
pub struct PlotRecord {
    pub drawables: usize,
    pub title: String,
    pub x_range: Option<(String, String)>,
}

#[derive(Debug, Default)]
struct UiRecord {
    container: Option<String>,
    built: bool,
    busy: Vec<bool>,
    plots: Vec<PlotRecord>,
    rosters: Vec<Vec<(String, bool, bool)>>,
    as_of_labels: Vec<String>,
}

/// UI surface that records everything the controller asks of it. Cloning
/// shares the recording, so tests keep a handle after handing the surface
/// to the controller.
#[derive(Debug, Clone, Default)]
pub struct RecordingUi {
    record: Arc<Mutex<UiRecord>>,
    fail_container: bool,
}

impl RecordingUi {
    pub fn new() -> Self {
        Self::default()
    }

    /// A surface whose container never resolves.
    pub fn failing_container() -> Self {
        Self {
            fail_container: true,
            ..Self::default()
        }
    }

    pub fn built(&self) -> bool {
        self.record.lock().unwrap().built
    }

    pub fn busy_transitions(&self) -> Vec<bool> {
        self.record.lock().unwrap().busy.clone()
    }

    pub fn plot_count(&self) -> usize {
        self.record.lock().unwrap().plots.len()
    }

    pub fn last_plot(&self) -> Option<PlotRecord> {
        self.record.lock().unwrap().plots.last().cloned()
    }

    /// Each roster render as (model, enabled, checked) triples.
    pub fn last_roster(&self) -> Option<Vec<(String, bool, bool)>> {
        self.record.lock().unwrap().rosters.last().cloned()
    }

    pub fn rosters(&self) -> Vec<Vec<(String, bool, bool)>> {
        self.record.lock().unwrap().rosters.clone()
    }

    pub fn as_of_labels(&self) -> Vec<String> {
        self.record.lock().unwrap().as_of_labels.clone()
    }
}

impl UiSurface for RecordingUi {
    fn ensure_container(&mut self, container_id: &str) -> Result<()> {
        if self.fail_container {
            return Err(VizError::Container(container_id.to_string()));
        }
        self.record.lock().unwrap().container = Some(container_id.to_string());
        Ok(())
    }

    fn build(&mut self, _state: &VizState) {
        self.record.lock().unwrap().built = true;
    }

    fn set_busy(&mut self, busy: bool) {
        self.record.lock().unwrap().busy.push(busy);
    }

    fn render_plot(&mut self, drawables: &[Drawable], layout: &PlotLayout) {
        self.record.lock().unwrap().plots.push(PlotRecord {
            drawables: drawables.len(),
            title: layout.title.clone(),
            x_range: layout
                .x_range
                .map(|(start, end)| (start.to_string(), end.to_string())),
        });
    }

    fn render_roster(&mut self, roster: &RosterView) {
        self.record.lock().unwrap().rosters.push(
            roster
                .entries
                .iter()
                .map(|e| (e.model.clone(), e.enabled, e.checked))
                .collect(),
        );
    }

    fn set_as_of_label(&mut self, as_of: &str) {
        self.record.lock().unwrap().as_of_labels.push(as_of.to_string());
    }
}

pub fn truth_value(dates: &[&str], values: &[f64]) -> Value {
    json!({ "date": dates, "y": values })
}

/// A forecast set where every named model carries the same two-step
/// forecast.
pub fn forecast_value(models: &[&str]) -> Value {
    let mut set = serde_json::Map::new();
    for model in models {
        set.insert(
            model.to_string(),
            json!({
                "target_end_date": ["2022-01-29", "2022-01-22"],
                "q0.025": [2.0, 1.0],
                "q0.25": [4.0, 3.0],
                "q0.5": [6.0, 5.0],
                "q0.75": [8.0, 7.0],
                "q0.975": [10.0, 9.0]
            }),
        );
    }
    Value::Object(set)
}

pub fn sample_options() -> VizOptions {
    VizOptions {
        target_variables: vec![
            TargetVariable {
                value: "cases".to_string(),
                text: "Cases".to_string(),
                plot_text: "Incident weekly cases".to_string(),
                point_markers: true,
            },
            TargetVariable {
                value: "hosp".to_string(),
                text: "Hospitalizations".to_string(),
                plot_text: "Incident daily hospitalizations".to_string(),
                point_markers: false,
            },
        ],
        units: vec![
            Unit {
                value: "US".to_string(),
                text: "United States".to_string(),
            },
            Unit {
                value: "01".to_string(),
                text: "Alabama".to_string(),
            },
        ],
        intervals: vec![Interval(0), Interval(50), Interval(95)],
        available_as_ofs: HashMap::from([
            (
                "cases".to_string(),
                vec![
                    "2022-01-03".to_string(),
                    "2022-01-10".to_string(),
                    "2022-01-17".to_string(),
                ],
            ),
            ("hosp".to_string(), vec!["2022-01-10".to_string()]),
        ]),
        current_date: "2022-01-21".to_string(),
        models: vec!["A".to_string(), "B".to_string(), "C".to_string()],
        initial_checked_models: vec!["A".to_string()],
        models_at_top: vec![],
        disclaimer: "Forecasts are not guarantees.".to_string(),
        initial_target_var: "cases".to_string(),
        initial_unit: "US".to_string(),
        initial_interval: Interval(95),
        max_selectable_models: model::DEFAULT_MAX_SELECTABLE_MODELS,
        x_axis_range_offset: None,
    }
}
