//! Error types for the invoice-forecast library.

use chrono::NaiveDate;
use thiserror::Error;

/// Result type alias for forecast operations.
pub type Result<T> = std::result::Result<T, ForecastError>;

/// Errors that can occur while regularizing, fitting or composing a forecast.
///
/// A group that fails the sufficiency gate is not an error: the pipeline
/// returns `Ok(None)` for it.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ForecastError {
    /// Input group is empty.
    #[error("empty input data")]
    EmptyData,

    /// Two observations in one group share a calendar date.
    #[error("duplicate observation date: {0}")]
    DuplicateDate(NaiveDate),

    /// Insufficient data points for model initialization.
    #[error("insufficient data: need at least {needed}, got {got}")]
    InsufficientData { needed: usize, got: usize },

    /// Invalid parameter value.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// Forecast length differs from the requested horizon.
    #[error("dimension mismatch: expected {expected}, got {got}")]
    DimensionMismatch { expected: usize, got: usize },

    /// Model has not been fitted yet.
    #[error("model must be fitted before prediction")]
    FitRequired,

    /// The smoothing model could not be fitted to a usable state.
    #[error("fit failure: {0}")]
    FitFailure(String),

    /// The outcome log could not record a line.
    #[error("outcome log error: {0}")]
    OutcomeLog(String),
}

impl From<std::io::Error> for ForecastError {
    fn from(err: std::io::Error) -> Self {
        ForecastError::OutcomeLog(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_messages_are_descriptive() {
        let err = ForecastError::EmptyData;
        assert_eq!(err.to_string(), "empty input data");

        let err = ForecastError::InsufficientData { needed: 34, got: 20 };
        assert_eq!(
            err.to_string(),
            "insufficient data: need at least 34, got 20"
        );

        let err = ForecastError::InvalidParameter("seasonal period must be at least 2".to_string());
        assert_eq!(
            err.to_string(),
            "invalid parameter: seasonal period must be at least 2"
        );

        let err = ForecastError::FitFailure("non-finite level".to_string());
        assert_eq!(err.to_string(), "fit failure: non-finite level");

        let date = NaiveDate::from_ymd_opt(2023, 3, 14).unwrap();
        let err = ForecastError::DuplicateDate(date);
        assert_eq!(err.to_string(), "duplicate observation date: 2023-03-14");

        let err = ForecastError::FitRequired;
        assert_eq!(err.to_string(), "model must be fitted before prediction");
    }

    #[test]
    fn io_errors_become_outcome_log_errors() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only");
        let err: ForecastError = io.into();
        assert!(matches!(err, ForecastError::OutcomeLog(_)));
        assert_eq!(err.to_string(), "outcome log error: read-only");
    }
}
