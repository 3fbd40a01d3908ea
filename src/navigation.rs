//! As-of date paging through the per-target list of available reference
//! dates. Steps beyond either end are silent no-ops.

use crate::state::VizState;
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepDirection {
    Back,
    Forward,
}

impl StepDirection {
    fn delta(self) -> isize {
        match self {
            StepDirection::Back => -1,
            StepDirection::Forward => 1,
        }
    }
}

/// Moves the as-of date one entry in `direction` within the current target
/// variable's available list. Returns the new date when the step stayed in
/// bounds; `None` (with no state change) at either boundary.
pub fn step_as_of(state: &mut VizState, direction: StepDirection) -> Option<String> {
    let new_as_of = {
        let as_ofs = state
            .available_as_ofs
            .get(&state.selection.target_variable)?;
        let position = match as_ofs.iter().position(|d| d == &state.selection.as_of) {
            Some(position) => position,
            None => {
                warn!(
                    as_of = %state.selection.as_of,
                    "current as-of date is not in the available list"
                );
                return None;
            }
        };
        let next = position as isize + direction.delta();
        if next < 0 || next as usize >= as_ofs.len() {
            debug!(position, ?direction, "as-of step out of bounds, ignoring");
            return None;
        }
        as_ofs[next as usize].clone()
    };

    debug!(from = %state.selection.as_of, to = %new_as_of, "stepping as-of date");
    state.selection.as_of = new_as_of.clone();
    Some(new_as_of)
}
