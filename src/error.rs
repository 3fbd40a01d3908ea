use compute::ComputeError;
use thiserror::Error;

/// Error types for the visualization controller
#[derive(Error, Debug)]
pub enum VizError {
    /// The UI region the widget should mount into does not resolve
    #[error("container not found: {0}")]
    Container(String),

    /// The host-supplied viz options document is invalid
    #[error("invalid viz options: {}", .0.join("; "))]
    Options(Vec<String>),

    /// Application configuration error
    #[error("configuration error: {0}")]
    Config(String),

    /// Error from the plot pipeline
    #[error(transparent)]
    Compute(#[from] ComputeError),
}

/// Type alias for Result with VizError
pub type Result<T> = std::result::Result<T, VizError>;
