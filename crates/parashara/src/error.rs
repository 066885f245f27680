use thiserror::Error;

use crate::zodiac::{Graha, Point};

/// Failures reported by a position provider. Never retried by the engine.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ProviderError {
    #[error("Ephemeris file not found at path: {path}. {message}")]
    FileNotFound { path: String, message: String },
    #[error("Failed to calculate position for {body} at JD {jd}: {message}")]
    CalculationFailed { body: String, jd: f64, message: String },
    #[error("Body {0} is derived, not queried from the ephemeris")]
    UnsupportedBody(Graha),
}

/// Errors surfaced by the chart, dasha and yoga engines.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ChartError {
    #[error("Invalid input: {0}")]
    Input(String),
    #[error("Out of range: {0}")]
    Range(String),
    #[error("Chart is missing {0}")]
    IncompleteChart(Point),
    #[error(transparent)]
    Provider(#[from] ProviderError),
}

impl ChartError {
    pub(crate) fn input(message: impl Into<String>) -> Self {
        ChartError::Input(message.into())
    }

    pub(crate) fn range(message: impl Into<String>) -> Self {
        ChartError::Range(message.into())
    }
}
