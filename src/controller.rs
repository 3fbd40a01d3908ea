//! The widget controller: owns the state, consumes typed commands, and
//! coordinates the asynchronous fetch cycle with the roster and plot
//! updates that follow it.

use crate::commands::Command;
use crate::error::{Result, VizError};
use crate::fetch::{DataFetcher, FetchError};
use crate::navigation::step_as_of;
use crate::roster::refresh_roster;
use crate::state::VizState;
use crate::ui::UiSurface;
use common::{ForecastSet, TruthSeries};
use compute::palette::shuffled_color_cycle;
use compute::plot::{assemble_plot, initial_x_range, PlotContext};
use model::VizOptions;
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, error, instrument, warn};

/// One widget instance. All state is constructor-injected and owned here;
/// component operations receive it explicitly.
pub struct VizController {
    state: VizState,
    fetcher: Arc<dyn DataFetcher>,
    ui: Box<dyn UiSurface>,
}

/// The inputs one fetch group was parametrized with, captured when the
/// group started.
#[derive(Debug, Clone)]
pub(crate) struct FetchGroup {
    seq: u64,
    target: String,
    unit: String,
    as_of: String,
    current_date: String,
    fetch_current: bool,
}

type FetchResult = std::result::Result<Value, FetchError>;

/// The settled responses of one fetch group: as-of truth, forecasts, and
/// the optional current truth.
pub(crate) type RawResults = (FetchResult, FetchResult, Option<FetchResult>);

impl VizController {
    /// Builds the widget: resolves the container, validates the options
    /// document, seeds state, builds the static UI and performs the initial
    /// full fetch and render. Configuration problems abort startup; the
    /// initial fetch failing does not (the widget renders empty and the user
    /// can retry by interacting).
    pub async fn initialize(
        container_id: &str,
        fetcher: Arc<dyn DataFetcher>,
        mut ui: Box<dyn UiSurface>,
        options: VizOptions,
    ) -> Result<Self> {
        ui.ensure_container(container_id)?;
        let state = VizState::from_options(options)?;
        ui.build(&state);

        let as_of = state.selection.as_of.clone();
        let mut controller = Self { state, fetcher, ui };
        controller.ui.set_as_of_label(&as_of);
        controller.fetch_and_update(true, Some(true)).await?;
        Ok(controller)
    }

    pub fn state(&self) -> &VizState {
        &self.state
    }

    /// Dispatches one typed UI command. Target and unit changes re-fetch
    /// everything including current truth; paging re-fetches as-of series
    /// only; interval, truth, model and color commands re-render from state.
    #[instrument(skip(self))]
    pub async fn handle_command(&mut self, command: Command) -> Result<()> {
        match command {
            Command::SetTargetVariable(target) => {
                if self.state.target(&target).is_none() {
                    warn!(%target, "unknown target variable, ignoring");
                    return Ok(());
                }
                let as_of = match self.state.latest_as_of_for(&target) {
                    Some(as_of) => as_of.clone(),
                    None => {
                        warn!(%target, "no reference dates for target variable, ignoring");
                        return Ok(());
                    }
                };
                self.state.selection.target_variable = target;
                self.state.selection.as_of = as_of.clone();
                self.ui.set_as_of_label(&as_of);
                self.fetch_and_update(true, Some(true)).await
            }
            Command::SetUnit(unit) => {
                if self.state.unit(&unit).is_none() {
                    warn!(%unit, "unknown unit, ignoring");
                    return Ok(());
                }
                self.state.selection.unit = unit;
                self.fetch_and_update(true, Some(true)).await
            }
            Command::SetInterval(interval) => {
                if !self.state.intervals.contains(&interval) {
                    warn!(%interval, "interval not offered, ignoring");
                    return Ok(());
                }
                self.state.selection.interval = interval;
                self.fetch_and_update(false, None).await
            }
            Command::ToggleTruth { kind, checked } => {
                self.state.selection.set_truth_checked(kind, checked);
                self.fetch_and_update(false, None).await
            }
            Command::ToggleModel { model, checked } => {
                self.state.selection.set_model_checked(&model, checked);
                self.fetch_and_update(false, None).await
            }
            Command::ToggleAllModels(checked) => {
                if checked {
                    self.state.selection.snapshot_checked_models();
                    let selectable: Vec<String> = self
                        .state
                        .models
                        .iter()
                        .enumerate()
                        .filter(|(idx, model)| {
                            *idx < self.state.max_selectable_models
                                && self.state.data.forecasts.contains_key(*model)
                        })
                        .map(|(_, model)| model.clone())
                        .collect();
                    for model in selectable {
                        self.state.selection.checked_models.insert(model);
                    }
                } else {
                    self.state.selection.restore_snapshot();
                }
                self.fetch_and_update(false, None).await
            }
            Command::ShuffleColors => {
                self.state.selection.colors = shuffled_color_cycle(self.state.models.len());
                self.fetch_and_update(false, None).await
            }
            Command::StepAsOf(direction) => match step_as_of(&mut self.state, direction) {
                Some(as_of) => {
                    self.ui.set_as_of_label(&as_of);
                    self.fetch_and_update(true, Some(false)).await
                }
                None => Ok(()),
            },
        }
    }

    /// Re-derives the roster and plot, first fetching fresh series when the
    /// inputs affecting them changed. All requested fetches run concurrently
    /// and every one must settle before anything is committed; a failure in
    /// any of them is logged and leaves the previously rendered data
    /// untouched. Results of a fetch group superseded by a newer one are
    /// discarded.
    #[instrument(skip(self))]
    pub async fn fetch_and_update(
        &mut self,
        should_fetch: bool,
        fetch_current_truth: Option<bool>,
    ) -> Result<()> {
        if !should_fetch {
            return self.refresh_and_render();
        }

        let group = self.begin_fetch(fetch_current_truth);
        let results = Self::run_fetch(Arc::clone(&self.fetcher), &group).await;
        self.commit_fetch(group, results)
    }

    /// Starts a new fetch group: bumps the sequence token, captures the
    /// selection inputs the requests are parametrized by, and raises the
    /// busy indicator.
    pub(crate) fn begin_fetch(&mut self, fetch_current_truth: Option<bool>) -> FetchGroup {
        let group = FetchGroup {
            seq: self.state.next_fetch_seq(),
            target: self.state.selection.target_variable.clone(),
            unit: self.state.selection.unit.clone(),
            as_of: self.state.selection.as_of.clone(),
            current_date: self.state.current_date.clone(),
            fetch_current: fetch_current_truth.unwrap_or(false),
        };
        self.ui.set_busy(true);
        group
    }

    /// Issues the group's requests concurrently and waits for every one to
    /// settle. This is the only join point; a race primitive would let a
    /// partial result set through.
    pub(crate) async fn run_fetch(fetcher: Arc<dyn DataFetcher>, group: &FetchGroup) -> RawResults {
        let as_of_truth = fetcher.fetch_data(false, &group.target, &group.unit, &group.as_of);
        let forecasts = fetcher.fetch_data(true, &group.target, &group.unit, &group.as_of);
        if group.fetch_current {
            let current_truth =
                fetcher.fetch_data(false, &group.target, &group.unit, &group.current_date);
            let (a, f, c) = tokio::join!(as_of_truth, forecasts, current_truth);
            (a, f, Some(c))
        } else {
            let (a, f) = tokio::join!(as_of_truth, forecasts);
            (a, f, None)
        }
    }

    /// Commits a settled fetch group and re-renders. Groups superseded by a
    /// newer `begin_fetch` are discarded without touching state or the busy
    /// indicator (the newer group owns both).
    pub(crate) fn commit_fetch(&mut self, group: FetchGroup, results: RawResults) -> Result<()> {
        if !self.state.is_current_fetch(group.seq) {
            debug!(seq = group.seq, "fetch group superseded by a newer one, discarding results");
            return Ok(());
        }
        self.ui.set_busy(false);

        let (as_of_truth, forecasts, current_truth) = results;
        match decode_results(as_of_truth, forecasts, current_truth) {
            Ok((as_of_truth, forecasts, current_truth)) => {
                self.state.data.as_of_truth = as_of_truth;
                self.state.data.forecasts = forecasts;
                if let Some(current_truth) = current_truth {
                    self.state.data.current_truth = current_truth;
                }
                self.refresh_and_render()
            }
            Err(err) => {
                error!(%err, "fetch failed, keeping previously rendered data");
                Ok(())
            }
        }
    }

    fn refresh_and_render(&mut self) -> Result<()> {
        let roster = refresh_roster(&mut self.state);
        self.ui.render_roster(&roster);
        self.render_plot()
    }

    fn render_plot(&mut self) -> Result<()> {
        let state = &self.state;
        let target = state.current_target().ok_or_else(|| {
            VizError::Config(format!(
                "unknown target variable {:?}",
                state.selection.target_variable
            ))
        })?;
        let unit = state
            .current_unit()
            .ok_or_else(|| VizError::Config(format!("unknown unit {:?}", state.selection.unit)))?;
        let x_range = match state.as_ofs_for_current_target().last() {
            Some(reference) => initial_x_range(state.x_axis_range_offset, reference)?,
            None => None,
        };

        let ctx = PlotContext {
            target,
            unit,
            roster: &state.models,
            selection: &state.selection,
            x_range,
        };
        let (drawables, layout) = assemble_plot(
            &ctx,
            state.data.current_truth.as_ref(),
            state.data.as_of_truth.as_ref(),
            &state.data.forecasts,
        )?;
        debug!(drawables = drawables.len(), title = %layout.title, "rendering plot");
        self.ui.render_plot(&drawables, &layout);
        Ok(())
    }
}

/// Decodes the settled fetch results into typed payloads. Any transport or
/// decode failure fails the whole group; empty truth payloads become `None`.
#[allow(clippy::type_complexity)]
fn decode_results(
    as_of_truth: std::result::Result<Value, FetchError>,
    forecasts: std::result::Result<Value, FetchError>,
    current_truth: Option<std::result::Result<Value, FetchError>>,
) -> std::result::Result<(Option<TruthSeries>, ForecastSet, Option<Option<TruthSeries>>), FetchError>
{
    let as_of_truth = decode_truth(as_of_truth?)?;
    let forecasts: ForecastSet =
        serde_json::from_value(forecasts?).map_err(|e| FetchError::Decode(e.to_string()))?;
    let current_truth = match current_truth {
        Some(result) => Some(decode_truth(result?)?),
        None => None,
    };
    Ok((as_of_truth, forecasts, current_truth))
}

fn decode_truth(value: Value) -> std::result::Result<Option<TruthSeries>, FetchError> {
    let truth: TruthSeries =
        serde_json::from_value(value).map_err(|e| FetchError::Decode(e.to_string()))?;
    Ok((!truth.is_empty()).then_some(truth))
}
