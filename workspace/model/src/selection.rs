use crate::interval::Interval;
use indexmap::IndexSet;
use tracing::debug;

/// The two truth series the widget can overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TruthKind {
    /// Truth as known at the fixed "current" date.
    Current,
    /// Truth as it was known at the selected as-of date.
    AsOf,
}

/// Mutable selection state for one widget session. Owned by the controller
/// and passed explicitly to every component operation; it is never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectionState {
    /// Selected target-variable key.
    pub target_variable: String,
    /// Selected unit abbreviation.
    pub unit: String,
    pub interval: Interval,
    /// Selected as-of reference date, `YYYY-MM-DD`.
    pub as_of: String,
    pub current_truth_checked: bool,
    pub as_of_truth_checked: bool,
    /// Checked models, in check order.
    pub checked_models: IndexSet<String>,
    /// Snapshot taken when "select all" is enabled, restored when it is
    /// disabled.
    pub last_selected_models: IndexSet<String>,
    /// Color per roster index (tiled palette; reshuffled on demand).
    pub colors: Vec<String>,
}

impl SelectionState {
    pub fn truth_checked(&self, kind: TruthKind) -> bool {
        match kind {
            TruthKind::Current => self.current_truth_checked,
            TruthKind::AsOf => self.as_of_truth_checked,
        }
    }

    pub fn set_truth_checked(&mut self, kind: TruthKind, checked: bool) {
        match kind {
            TruthKind::Current => self.current_truth_checked = checked,
            TruthKind::AsOf => self.as_of_truth_checked = checked,
        }
    }

    pub fn set_model_checked(&mut self, model: &str, checked: bool) {
        if checked {
            self.checked_models.insert(model.to_string());
        } else {
            self.checked_models.shift_remove(model);
        }
        debug!(model, checked, "model selection changed");
    }

    /// Snapshots the current checked set for later restore by
    /// `restore_snapshot`.
    pub fn snapshot_checked_models(&mut self) {
        self.last_selected_models = self.checked_models.clone();
    }

    pub fn restore_snapshot(&mut self) {
        self.checked_models = self.last_selected_models.clone();
        debug!(
            restored = self.checked_models.len(),
            "restored manually selected models"
        );
    }
}
