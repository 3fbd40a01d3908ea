//! The UI seam: the surface the controller keeps synchronized, and the
//! keyboard-to-command translation for as-of paging.

use crate::commands::Command;
use crate::error::Result;
use crate::navigation::StepDirection;
use crate::roster::RosterView;
use crate::state::VizState;
use compute::plot::{Drawable, PlotLayout};
use tracing::debug;

/// The named interactive surface the widget drives. Implementations adapt a
/// concrete toolkit (DOM, HTML writer, test recorder); the controller only
/// talks to this trait.
pub trait UiSurface: Send {
    /// Resolves the region the widget mounts into. Failure aborts
    /// initialization.
    fn ensure_container(&mut self, container_id: &str) -> Result<()>;

    /// Builds the static elements once at startup: target-variable, unit and
    /// interval selects, truth and select-all checkboxes, shuffle button,
    /// paging buttons, disclaimer text.
    fn build(&mut self, state: &VizState);

    /// Dims or restores the plot area while fetches are outstanding.
    fn set_busy(&mut self, busy: bool);

    fn render_plot(&mut self, drawables: &[Drawable], layout: &PlotLayout);

    /// Re-renders the model checkbox list. Implementations must re-bind
    /// change handlers idempotently; the checked state comes from the view,
    /// never from event bubbling.
    fn render_roster(&mut self, roster: &RosterView);

    fn set_as_of_label(&mut self, as_of: &str);
}

/// Translates a key press into a command. The two horizontal arrows page the
/// as-of date; nothing fires while focus is inside a text input, so typing
/// is never hijacked.
pub fn key_to_command(key: &str, in_text_input: bool) -> Option<Command> {
    if in_text_input {
        return None;
    }
    match key {
        "ArrowLeft" => Some(Command::StepAsOf(StepDirection::Back)),
        "ArrowRight" => Some(Command::StepAsOf(StepDirection::Forward)),
        _ => None,
    }
}

/// A surface that renders nowhere and logs what it is asked to do. Useful
/// for driving the controller without any UI attached.
#[derive(Debug, Default)]
pub struct HeadlessUi;

impl UiSurface for HeadlessUi {
    fn ensure_container(&mut self, container_id: &str) -> Result<()> {
        debug!(container_id, "headless surface, container accepted");
        Ok(())
    }

    fn build(&mut self, state: &VizState) {
        debug!(
            targets = state.target_variables.len(),
            units = state.units.len(),
            models = state.models.len(),
            "built static UI"
        );
    }

    fn set_busy(&mut self, busy: bool) {
        debug!(busy, "busy state changed");
    }

    fn render_plot(&mut self, drawables: &[Drawable], layout: &PlotLayout) {
        debug!(drawables = drawables.len(), title = %layout.title, "rendered plot");
    }

    fn render_roster(&mut self, roster: &RosterView) {
        debug!(entries = roster.entries.len(), "rendered roster");
    }

    fn set_as_of_label(&mut self, as_of: &str) {
        debug!(as_of, "as-of label updated");
    }
}
