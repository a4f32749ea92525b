//! Gap-free daily series built from a sparse group of observations.

use crate::core::Observation;
use crate::error::{ForecastError, Result};
use chrono::{Duration, NaiveDate};

/// A daily series covering every calendar day from the first to the last
/// observed date, inclusive.
///
/// Days absent from the input read as `0.0`. The series is always in
/// ascending date order and `len() == (end - start).num_days() + 1`.
#[derive(Debug, Clone, PartialEq)]
pub struct RegularizedSeries {
    start: NaiveDate,
    amounts: Vec<f64>,
    /// Number of observations the series was built from.
    observed: usize,
}

impl RegularizedSeries {
    /// Expand a group of observations onto the full daily calendar between
    /// its minimum and maximum date.
    ///
    /// Input order does not matter. Missing amounts (NaN) are read as zero,
    /// like absent days. Two observations on the same date are rejected with
    /// [`ForecastError::DuplicateDate`].
    pub fn regularize(observations: &[Observation]) -> Result<Self> {
        let first = observations.first().ok_or(ForecastError::EmptyData)?;
        let (start, end) = observations
            .iter()
            .fold((first.date, first.date), |(lo, hi), obs| {
                (lo.min(obs.date), hi.max(obs.date))
            });

        let len = (end - start).num_days() as usize + 1;
        let mut amounts = vec![0.0; len];
        let mut seen = vec![false; len];

        for obs in observations {
            let idx = (obs.date - start).num_days() as usize;
            if seen[idx] {
                return Err(ForecastError::DuplicateDate(obs.date));
            }
            seen[idx] = true;
            if !obs.amount.is_nan() {
                amounts[idx] = obs.amount;
            }
        }

        Ok(Self {
            start,
            amounts,
            observed: observations.len(),
        })
    }

    /// Build a series directly from contiguous daily amounts.
    pub fn from_amounts(start: NaiveDate, amounts: Vec<f64>) -> Result<Self> {
        if amounts.is_empty() {
            return Err(ForecastError::EmptyData);
        }
        let observed = amounts.len();
        Ok(Self {
            start,
            amounts,
            observed,
        })
    }

    /// Number of calendar days covered.
    pub fn len(&self) -> usize {
        self.amounts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.amounts.is_empty()
    }

    /// Number of observations present before gap filling.
    pub fn observed_count(&self) -> usize {
        self.observed
    }

    /// First calendar day.
    pub fn start(&self) -> NaiveDate {
        self.start
    }

    /// Last calendar day.
    pub fn end(&self) -> NaiveDate {
        self.start + Duration::days(self.amounts.len() as i64 - 1)
    }

    /// Daily amounts in date order.
    pub fn amounts(&self) -> &[f64] {
        &self.amounts
    }

    /// Calendar dates in order, one per amount.
    pub fn dates(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        (0..self.amounts.len()).map(move |i| self.start + Duration::days(i as i64))
    }

    /// Amount on a given day, or `None` when the day lies outside the series.
    pub fn amount_on(&self, date: NaiveDate) -> Option<f64> {
        let offset = (date - self.start).num_days();
        if offset < 0 {
            return None;
        }
        self.amounts.get(offset as usize).copied()
    }

    /// Iterate over `(date, amount)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (NaiveDate, f64)> + '_ {
        self.dates().zip(self.amounts.iter().copied())
    }
}
