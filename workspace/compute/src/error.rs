use thiserror::Error;

/// Error types for the plot pipeline
#[derive(Error, Debug)]
pub enum ComputeError {
    /// A date string in a payload could not be parsed
    #[error("could not parse date {0:?}")]
    DateParse(String),

    /// A forecast quantile column does not line up with its date column
    #[error("model {model}: column {column} has {actual} values, expected {expected}")]
    ColumnLength {
        model: String,
        column: &'static str,
        expected: usize,
        actual: usize,
    },

    /// A truth payload's date and value columns differ in length
    #[error("truth series has {dates} dates but {values} values")]
    TruthLength { dates: usize, values: usize },

    /// The selected interval has no quantile pair in the forecast data
    #[error("interval {0}% has no quantile columns in the forecast data")]
    UnsupportedInterval(u8),
}

/// Type alias for Result with ComputeError
pub type Result<T> = std::result::Result<T, ComputeError>;
