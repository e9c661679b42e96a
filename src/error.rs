use thiserror::Error;

pub type ArtworkResult<T> = Result<T, ArtworkError>;

#[derive(Debug, Error)]
pub enum ArtworkError {
    #[error("invalid time window: start={start}, end={end}, step={step}")]
    InvalidTimeWindow { start: i64, end: i64, step: i64 },

    #[error("invalid graph size: width={width}, height={height}")]
    InvalidGraphSize { width: u32, height: u32 },

    #[error("invalid line type: {0:?}")]
    InvalidLineType(String),

    #[error("metric resolution failed: {0}")]
    MetricResolution(String),

    #[error("invalid data: {0}")]
    InvalidData(String),
}
