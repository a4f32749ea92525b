//! Seasonal forecaster: fits additive Holt-Winters with the heuristic period
//! and projects a clamped horizon.

use crate::config::PipelineConfig;
use crate::core::{Forecast, RegularizedSeries};
use crate::error::Result;
use crate::models::exponential::{heuristic_period, HoltWinters};
use crate::models::Forecaster;
use crate::utils::optimization::NelderMeadConfig;

#[derive(Debug, Clone)]
pub struct SeasonalForecaster {
    horizon: usize,
    season_divisor: usize,
    suppress_convergence_warnings: bool,
    optimizer: NelderMeadConfig,
}

impl SeasonalForecaster {
    pub fn from_config(config: &PipelineConfig) -> Self {
        Self {
            horizon: config.horizon,
            season_divisor: config.season_divisor,
            suppress_convergence_warnings: config.suppress_convergence_warnings,
            optimizer: config.optimizer.clone(),
        }
    }

    /// Seasonal period used for a series of `len` days.
    pub fn period_for(&self, len: usize) -> usize {
        heuristic_period(len, self.season_divisor)
    }

    /// Fit the series and forecast `horizon` days past its end, with every
    /// projected value `<= 0` replaced by `0.0`.
    ///
    /// Fit errors (invalid period, too little history, divergence) are
    /// returned to the caller untouched.
    pub fn forecast(&self, series: &RegularizedSeries) -> Result<Forecast> {
        let period = self.period_for(series.len());
        let mut model = HoltWinters::auto(period)
            .with_optimizer(self.optimizer.clone())
            .suppress_convergence_warnings(self.suppress_convergence_warnings);

        model.fit(series)?;
        tracing::debug!(
            period,
            days = series.len(),
            params = ?model.params(),
            converged = ?model.converged(),
            "fitted {}",
            model.name()
        );

        Ok(model.predict(self.horizon)?.clamped_non_negative())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ForecastError;
    use chrono::NaiveDate;

    fn forecaster(horizon: usize) -> SeasonalForecaster {
        SeasonalForecaster::from_config(&PipelineConfig::default().with_horizon(horizon))
    }

    fn series(values: Vec<f64>) -> RegularizedSeries {
        let start = NaiveDate::from_ymd_opt(2021, 6, 1).unwrap();
        RegularizedSeries::from_amounts(start, values).unwrap()
    }

    #[test]
    fn projects_full_horizon() {
        let values: Vec<f64> = (0..90).map(|i| 50.0 + 10.0 * ((i % 7) as f64)).collect();
        let forecast = forecaster(300).forecast(&series(values)).unwrap();

        assert_eq!(forecast.horizon(), 300);
        assert!(forecast.primary().iter().all(|v| *v >= 0.0));
    }

    #[test]
    fn clamps_downward_trend_to_zero() {
        let values: Vec<f64> = (0..60).map(|i| 200.0 - 3.0 * i as f64).collect();
        let forecast = forecaster(300).forecast(&series(values)).unwrap();

        assert!(forecast.primary().iter().all(|v| *v >= 0.0));
        assert_eq!(forecast.step(300), Some(0.0));
    }

    #[test]
    fn period_is_a_third_of_length() {
        let model = forecaster(300);
        assert_eq!(model.period_for(60), 20);
        assert_eq!(model.period_for(365), 122);
    }

    #[test]
    fn divisor_comes_from_config() {
        let config = PipelineConfig::default().with_season_divisor(4);
        assert_eq!(SeasonalForecaster::from_config(&config).period_for(60), 15);
    }

    #[test]
    fn invalid_period_propagates() {
        assert!(matches!(
            forecaster(10).forecast(&series(vec![1.0, 2.0, 3.0, 4.0])),
            Err(ForecastError::InvalidParameter(_))
        ));
    }
}
