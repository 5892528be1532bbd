use thiserror::Error;

pub type TimelineResult<T> = Result<T, TimelineError>;

#[derive(Debug, Error)]
pub enum TimelineError {
    #[error("invalid time range: start={start}, end={end}")]
    InvalidRange { start: f64, end: f64 },

    #[error("invalid viewport: left={left_px}, width={width_px}")]
    InvalidViewport { left_px: f64, width_px: f64 },

    #[error("timestamp out of calendar range: {0}")]
    InvalidTimestamp(f64),

    #[error("invalid tick measurement for `{label}`: {width_px}")]
    InvalidMeasure { label: String, width_px: f64 },

    #[error("invalid data: {0}")]
    InvalidData(String),
}
