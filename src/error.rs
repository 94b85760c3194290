use thiserror::Error;

pub type ChartResult<T> = Result<T, ChartError>;

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("invalid option `{option}`: {reason}")]
    InvalidOption {
        option: &'static str,
        reason: String,
    },

    #[error("unknown point: dataset={dataset}, bucket={bucket}, sub={sub}")]
    UnknownPoint {
        dataset: usize,
        bucket: usize,
        sub: usize,
    },

    #[error("invalid color: {0}")]
    InvalidColor(String),

    #[error("serialization failed: {0}")]
    Serialization(String),
}
