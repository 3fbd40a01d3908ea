//! Model roster management: partitions the static roster into selectable
//! entries (forecast data present, below the selectable cap) and disabled
//! ones, producing a pure view value the UI surface renders from.

use crate::state::VizState;
use compute::palette::DISABLED_COLOR;
use tracing::debug;

#[derive(Debug, Clone, PartialEq)]
pub struct RosterEntry {
    pub model: String,
    pub color: String,
    pub enabled: bool,
    pub checked: bool,
}

/// The rendered model list, enabled group first. Rebuilding from unchanged
/// state yields an identical view.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RosterView {
    pub entries: Vec<RosterEntry>,
}

impl RosterView {
    pub fn checked_models(&self) -> Vec<&str> {
        self.entries
            .iter()
            .filter(|e| e.checked)
            .map(|e| e.model.as_str())
            .collect()
    }

    pub fn enabled_models(&self) -> Vec<&str> {
        self.entries
            .iter()
            .filter(|e| e.enabled)
            .map(|e| e.model.as_str())
            .collect()
    }
}

/// Re-derives the roster from current state. Models without forecast data,
/// or at roster indexes at or beyond the selectable cap, are disabled,
/// forced unchecked and dropped from the checked set. Within the enabled
/// group, pinned models come first; both groups otherwise keep roster order.
pub fn refresh_roster(state: &mut VizState) -> RosterView {
    let cap = state.max_selectable_models;
    let mut enabled = Vec::new();
    let mut disabled = Vec::new();
    for (idx, model) in state.models.iter().enumerate() {
        if idx < cap && state.data.forecasts.contains_key(model) {
            enabled.push(idx);
        } else {
            disabled.push(idx);
        }
    }

    enabled.sort_by_key(|&idx| {
        match state
            .models_at_top
            .iter()
            .position(|m| m == &state.models[idx])
        {
            Some(pin) => (0, pin),
            None => (1, idx),
        }
    });

    for &idx in &disabled {
        if state.selection.checked_models.shift_remove(&state.models[idx]) {
            debug!(model = %state.models[idx], "model not selectable, forcing unchecked");
        }
    }

    let mut entries = Vec::with_capacity(state.models.len());
    for &idx in &enabled {
        let model = state.models[idx].clone();
        entries.push(RosterEntry {
            checked: state.selection.checked_models.contains(&model),
            color: state
                .selection
                .colors
                .get(idx)
                .cloned()
                .unwrap_or_else(|| DISABLED_COLOR.to_string()),
            enabled: true,
            model,
        });
    }
    for &idx in &disabled {
        entries.push(RosterEntry {
            model: state.models[idx].clone(),
            color: DISABLED_COLOR.to_string(),
            enabled: false,
            checked: false,
        });
    }

    RosterView { entries }
}
