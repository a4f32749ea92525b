//! Result composer: splices the projection after the history and attaches
//! the group's identifying columns.

use crate::core::{Forecast, GroupIdentity, RegularizedSeries, ResultFrame, ResultRow};
use crate::error::{ForecastError, Result};
use chrono::{Duration, NaiveDate};

/// Build one continuous frame from `history` and a forecast starting the day
/// after `history.end()`.
///
/// The frame has one row per day from `history.start()` through
/// `history.end() + horizon` days. A day covered by history keeps its
/// historical amount, including zeros from gap filling; the forecast only
/// fills days history does not cover.
///
/// Fails with [`ForecastError::DimensionMismatch`] when the forecast does not
/// hold exactly `horizon` steps.
pub fn compose(
    history: &RegularizedSeries,
    forecast: &Forecast,
    identity: &GroupIdentity,
    horizon: usize,
) -> Result<ResultFrame> {
    if forecast.horizon() != horizon {
        return Err(ForecastError::DimensionMismatch {
            expected: horizon,
            got: forecast.horizon(),
        });
    }

    let horizon_start = history.end() + Duration::days(1);
    let total = history.len() + horizon;

    let rows = (0..total)
        .map(|i| {
            let date = history.start() + Duration::days(i as i64);
            ResultRow {
                date,
                amount: amount_on(history, forecast, horizon_start, date),
                vendor: identity.vendor.clone(),
                region: identity.region.clone(),
                vendor_id: identity.vendor_id.clone(),
            }
        })
        .collect();

    Ok(ResultFrame::from_rows(rows))
}

/// Historical amount first, then forecast, then zero.
fn amount_on(
    history: &RegularizedSeries,
    forecast: &Forecast,
    horizon_start: NaiveDate,
    date: NaiveDate,
) -> f64 {
    history
        .amount_on(date)
        .or_else(|| {
            let step = (date - horizon_start).num_days() + 1;
            usize::try_from(step).ok().and_then(|h| forecast.step(h))
        })
        .unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, m, d).unwrap()
    }

    fn identity() -> GroupIdentity {
        GroupIdentity::new("Acme", "EMEA", "V-42")
    }

    #[test]
    fn history_then_forecast() {
        let history = RegularizedSeries::from_amounts(date(1, 30), vec![4.0, 0.0, 6.0]).unwrap();
        let forecast = Forecast::from_values(vec![7.0, 8.0]);

        let frame = compose(&history, &forecast, &identity(), 2).unwrap();

        let dates: Vec<_> = frame.iter().map(|r| r.date).collect();
        assert_eq!(
            dates,
            vec![date(1, 30), date(1, 31), date(2, 1), date(2, 2), date(2, 3)]
        );
        assert_eq!(frame.amounts(), vec![4.0, 0.0, 6.0, 7.0, 8.0]);
    }

    #[test]
    fn historical_zero_is_not_overridden() {
        let history = RegularizedSeries::from_amounts(date(3, 1), vec![0.0, 0.0]).unwrap();
        let forecast = Forecast::from_values(vec![9.0]);

        let frame = compose(&history, &forecast, &identity(), 1).unwrap();
        assert_eq!(frame.amounts(), vec![0.0, 0.0, 9.0]);
    }

    #[test]
    fn every_row_carries_identity() {
        let history = RegularizedSeries::from_amounts(date(5, 5), vec![1.0; 3]).unwrap();
        let forecast = Forecast::from_values(vec![2.0; 4]);

        let frame = compose(&history, &forecast, &identity(), 4).unwrap();
        assert_eq!(frame.len(), 7);
        for row in &frame {
            assert_eq!(row.vendor, "Acme");
            assert_eq!(row.region, "EMEA");
            assert_eq!(row.vendor_id, "V-42");
        }
    }

    #[test]
    fn empty_forecast_returns_history_only() {
        let history = RegularizedSeries::from_amounts(date(6, 1), vec![3.0, 5.0]).unwrap();
        let frame = compose(&history, &Forecast::new(), &identity(), 0).unwrap();

        assert_eq!(frame.len(), 2);
        assert_eq!(frame.last_date(), Some(date(6, 2)));
    }

    #[test]
    fn short_forecast_is_rejected() {
        let history = RegularizedSeries::from_amounts(date(6, 1), vec![3.0, 5.0]).unwrap();
        let forecast = Forecast::from_values(vec![1.0; 5]);

        assert_eq!(
            compose(&history, &forecast, &identity(), 300),
            Err(ForecastError::DimensionMismatch {
                expected: 300,
                got: 5
            })
        );
    }
}
