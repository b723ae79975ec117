use thiserror::Error;

pub type ChartResult<T> = Result<T, ChartError>;

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("invalid viewport size: width={width}, height={height}")]
    InvalidViewport { width: u32, height: u32 },

    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("invalid moving-average window: {window} (must be >= 1)")]
    InvalidWindow { window: usize },

    /// An accessor produced `NaN` or an infinity for a row.
    #[error("non-finite `{field}` value at index {index}")]
    NonFiniteValue { field: &'static str, index: usize },

    #[error("drawing backend failure: {0}")]
    Backend(String),

    #[error("feed error: {0}")]
    Feed(String),

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
