//! Batch forecasting across many (vendor, region) groups.
//!
//! Rows for all vendors and regions are split into groups, each group runs
//! through [`generate_forecast`] on the rayon thread pool, and the frames are
//! concatenated into one aggregate table. A failing group never aborts the
//! batch; its error is reported alongside the result.

use crate::config::PipelineConfig;
use crate::core::{Observation, ResultFrame};
use crate::error::ForecastError;
use crate::outcome::OutcomeLog;
use crate::pipeline::generate_forecast;
use rayon::prelude::*;
use std::collections::HashMap;
use std::fmt;

/// An observation tagged with the vendor and region it belongs to.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupedObservation {
    pub vendor: String,
    pub region: String,
    pub observation: Observation,
}

impl GroupedObservation {
    pub fn new(
        vendor: impl Into<String>,
        region: impl Into<String>,
        observation: Observation,
    ) -> Self {
        Self {
            vendor: vendor.into(),
            region: region.into(),
            observation,
        }
    }
}

/// A (vendor, region) pair.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GroupKey {
    pub vendor: String,
    pub region: String,
}

impl GroupKey {
    pub fn new(vendor: impl Into<String>, region: impl Into<String>) -> Self {
        Self {
            vendor: vendor.into(),
            region: region.into(),
        }
    }
}

impl fmt::Display for GroupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} / {}", self.vendor, self.region)
    }
}

/// Split rows into groups, keeping groups and rows in first-seen order.
pub fn group_observations(rows: &[GroupedObservation]) -> Vec<(GroupKey, Vec<Observation>)> {
    let mut index: HashMap<GroupKey, usize> = HashMap::new();
    let mut groups: Vec<(GroupKey, Vec<Observation>)> = Vec::new();

    for row in rows {
        let key = GroupKey::new(row.vendor.as_str(), row.region.as_str());
        let slot = *index.entry(key.clone()).or_insert_with(|| {
            groups.push((key, Vec::new()));
            groups.len() - 1
        });
        groups[slot].1.push(row.observation.clone());
    }

    groups
}

/// Outcome of a batch run.
#[derive(Debug, Clone, Default)]
pub struct BatchReport {
    /// Frames of every forecast group, concatenated in group order.
    pub frame: ResultFrame,
    /// Groups that were forecast.
    pub forecasted: Vec<GroupKey>,
    /// Groups that fell below the sufficiency threshold.
    pub skipped: Vec<GroupKey>,
    /// Groups whose pipeline returned an error.
    pub failed: Vec<(GroupKey, ForecastError)>,
}

impl BatchReport {
    pub fn group_count(&self) -> usize {
        self.forecasted.len() + self.skipped.len() + self.failed.len()
    }

    pub fn has_failures(&self) -> bool {
        !self.failed.is_empty()
    }
}

/// Forecast every (vendor, region) group in `rows` in parallel.
pub fn forecast_batch(
    rows: &[GroupedObservation],
    config: &PipelineConfig,
    log: &dyn OutcomeLog,
) -> BatchReport {
    let groups = group_observations(rows);
    tracing::info!(groups = groups.len(), rows = rows.len(), "batch forecast started");

    let results: Vec<_> = groups
        .par_iter()
        .map(|(key, group)| {
            let result = generate_forecast(&key.vendor, &key.region, group, config, log);
            (key.clone(), result)
        })
        .collect();

    let mut report = BatchReport::default();
    for (key, result) in results {
        match result {
            Ok(Some(frame)) => {
                report.frame.append(frame);
                report.forecasted.push(key);
            }
            Ok(None) => report.skipped.push(key),
            Err(err) => {
                tracing::error!(vendor = %key.vendor, region = %key.region, error = %err, "group forecast failed");
                report.failed.push((key, err));
            }
        }
    }

    tracing::info!(
        forecasted = report.forecasted.len(),
        skipped = report.skipped.len(),
        failed = report.failed.len(),
        rows = report.frame.len(),
        "batch forecast finished"
    );

    report
}
