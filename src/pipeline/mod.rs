//! The fill-fit-forecast-merge pipeline for one (vendor, region) group.
//!
//! ```text
//! observations ─► gate ─┬─► skip (Ok(None), logged)
//!                        └─► regularize ─► fit + forecast ─► compose ─► Ok(Some(frame))
//! ```

mod compose;
mod gate;
mod seasonal;

pub use compose::compose;
pub use gate::SufficiencyGate;
pub use seasonal::SeasonalForecaster;

use crate::config::PipelineConfig;
use crate::core::{GroupIdentity, Observation, RegularizedSeries, ResultFrame};
use crate::error::{ForecastError, Result};
use crate::outcome::{Outcome, OutcomeLog};

/// Forecast one (vendor, region) group and splice the projection onto its
/// gap-filled history.
///
/// Returns `Ok(None)` when the group has fewer than
/// `config.min_observations` rows; the skip is recorded in `log`. On success
/// the frame spans the first observed day through `config.horizon` days past
/// the last one, and the success is recorded in `log`.
///
/// The gate looks only at the row count, so a short group is skipped even if
/// its rows would not regularize (e.g. a repeated date). The group is only
/// borrowed. An empty group, regularization errors and fit failures are
/// returned as errors without touching the log; whether to skip, retry or
/// abort is up to the caller.
///
/// # Example
///
/// ```
/// use chrono::{Duration, NaiveDate};
/// use invoice_forecast::prelude::*;
///
/// let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
/// let group: Vec<Observation> = (0..10)
///     .map(|i| Observation::new(start + Duration::days(i), 5.0, "V-1"))
///     .collect();
///
/// let log = MemoryLog::new();
/// let frame = generate_forecast("Acme", "EMEA", &group, &PipelineConfig::default(), &log).unwrap();
///
/// assert!(frame.is_none());
/// assert_eq!(log.lines(), vec!["Not enough data to forecast for Vendor: Acme in Geo-region:EMEA"]);
/// ```
pub fn generate_forecast(
    vendor: &str,
    region: &str,
    group: &[Observation],
    config: &PipelineConfig,
    log: &dyn OutcomeLog,
) -> Result<Option<ResultFrame>> {
    tracing::info!(vendor, region, "forecasting started");

    if group.is_empty() {
        return Err(ForecastError::EmptyData);
    }

    let gate = SufficiencyGate::new(config.min_observations);
    if !gate.admits(group.len()) {
        let outcome = Outcome::InsufficientData;
        log.record(outcome, vendor, region)?;
        tracing::info!(
            vendor,
            region,
            %outcome,
            observations = group.len(),
            threshold = gate.threshold(),
            "forecasting ended"
        );
        return Ok(None);
    }

    let history = RegularizedSeries::regularize(group)?;
    tracing::debug!(
        vendor,
        region,
        observed = history.observed_count(),
        days = history.len(),
        "history regularized"
    );

    let forecast = SeasonalForecaster::from_config(config).forecast(&history)?;
    let identity =
        GroupIdentity::from_group(vendor, region, group).ok_or(ForecastError::EmptyData)?;
    let frame = compose(&history, &forecast, &identity, config.horizon)?;

    let outcome = Outcome::Forecasted;
    log.record(outcome, vendor, region)?;
    tracing::info!(vendor, region, %outcome, rows = frame.len(), "forecasting ended");

    Ok(Some(frame))
}
