use crate::error::{Result, VizError};
use common::{ForecastSet, TruthSeries};
use compute::palette::color_cycle;
use indexmap::IndexSet;
use model::{AvailableAsOfs, Interval, SelectionState, TargetVariable, Unit, VizOptions};

/// Series data currently backing the plot. Truth series are `None` until a
/// fetch delivers a non-empty payload; an empty forecast set just means no
/// model has data at the selected reference date.
#[derive(Debug, Clone, Default)]
pub struct FetchedData {
    pub current_truth: Option<TruthSeries>,
    pub as_of_truth: Option<TruthSeries>,
    pub forecasts: ForecastSet,
}

/// The widget's whole in-memory state, owned by one controller instance and
/// passed explicitly to component operations. Lives only for the session.
#[derive(Debug, Clone)]
pub struct VizState {
    pub target_variables: Vec<TargetVariable>,
    pub units: Vec<Unit>,
    pub intervals: Vec<Interval>,
    pub available_as_ofs: AvailableAsOfs,
    pub current_date: String,
    pub models: Vec<String>,
    pub models_at_top: Vec<String>,
    pub disclaimer: String,
    pub max_selectable_models: usize,
    pub x_axis_range_offset: Option<(u32, u32)>,
    pub selection: SelectionState,
    pub data: FetchedData,
    fetch_seq: u64,
}

impl VizState {
    /// Builds initial state from a host-supplied options document. The
    /// initial as-of date is the latest available for the initial target
    /// variable; both truth series start checked.
    pub fn from_options(options: VizOptions) -> Result<Self> {
        let errors = options.validate();
        if !errors.is_empty() {
            return Err(VizError::Options(errors));
        }

        let as_of = options
            .available_as_ofs
            .get(&options.initial_target_var)
            .and_then(|as_ofs| as_ofs.last())
            .cloned()
            .ok_or_else(|| {
                VizError::Options(vec![format!(
                    "no reference dates for initial target variable {:?}",
                    options.initial_target_var
                )])
            })?;

        let selection = SelectionState {
            target_variable: options.initial_target_var,
            unit: options.initial_unit,
            interval: options.initial_interval,
            as_of,
            current_truth_checked: true,
            as_of_truth_checked: true,
            checked_models: options.initial_checked_models.into_iter().collect(),
            last_selected_models: IndexSet::new(),
            colors: color_cycle(options.models.len()),
        };

        Ok(Self {
            target_variables: options.target_variables,
            units: options.units,
            intervals: options.intervals,
            available_as_ofs: options.available_as_ofs,
            current_date: options.current_date,
            models: options.models,
            models_at_top: options.models_at_top,
            disclaimer: options.disclaimer,
            max_selectable_models: options.max_selectable_models,
            x_axis_range_offset: options.x_axis_range_offset,
            selection,
            data: FetchedData::default(),
            fetch_seq: 0,
        })
    }

    pub fn target(&self, key: &str) -> Option<&TargetVariable> {
        self.target_variables.iter().find(|t| t.value == key)
    }

    pub fn unit(&self, abbrev: &str) -> Option<&Unit> {
        self.units.iter().find(|u| u.value == abbrev)
    }

    pub fn current_target(&self) -> Option<&TargetVariable> {
        self.target(&self.selection.target_variable)
    }

    pub fn current_unit(&self) -> Option<&Unit> {
        self.unit(&self.selection.unit)
    }

    /// The ascending reference dates available for the selected target
    /// variable.
    pub fn as_ofs_for_current_target(&self) -> &[String] {
        self.available_as_ofs
            .get(&self.selection.target_variable)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn latest_as_of_for(&self, target_key: &str) -> Option<&String> {
        self.available_as_ofs
            .get(target_key)
            .and_then(|as_ofs| as_ofs.last())
    }

    /// Starts a new logical fetch group, superseding any still in flight.
    pub fn next_fetch_seq(&mut self) -> u64 {
        self.fetch_seq += 1;
        self.fetch_seq
    }

    /// Whether `seq` is still the newest fetch group. Results from an older
    /// group must be discarded before commit.
    pub fn is_current_fetch(&self, seq: u64) -> bool {
        self.fetch_seq == seq
    }
}
