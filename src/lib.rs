//! Client-side core of a quantile-forecast visualization widget: selection
//! state, asynchronous truth/forecast fetch coordination, model roster
//! management, as-of navigation and plot assembly, behind an abstract UI
//! surface and an injected fetch collaborator.

pub mod cli;
pub mod commands;
pub mod config;
pub mod controller;
pub mod error;
pub mod fetch;
pub mod navigation;
pub mod render;
pub mod roster;
pub mod state;
pub mod ui;

#[cfg(test)]
mod test_utils;

pub use commands::Command;
pub use controller::VizController;
pub use error::{Result, VizError};
pub use fetch::{CachedFetcher, DataFetcher, FetchError, HttpDataFetcher};
pub use state::VizState;
pub use ui::UiSurface;
