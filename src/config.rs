//! Pipeline configuration.

use crate::utils::optimization::NelderMeadConfig;

/// Minimum number of original observations needed to attempt a fit.
pub const DEFAULT_MIN_OBSERVATIONS: usize = 50;

/// Number of daily points projected past the last observed day.
pub const DEFAULT_HORIZON: usize = 300;

/// The seasonal period is the regularized length divided by this, rounded.
pub const DEFAULT_SEASON_DIVISOR: usize = 3;

/// Settings for one run of the fill-fit-forecast-merge pipeline.
///
/// The defaults reproduce the production behaviour: a 50-observation gate,
/// a 300-day horizon, a period of one third of the history, and silent
/// optimizer non-convergence.
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineConfig {
    /// Groups with fewer observations than this are skipped.
    pub min_observations: usize,
    /// Forecast horizon in days.
    pub horizon: usize,
    /// Divisor applied to the regularized length to get the seasonal period.
    pub season_divisor: usize,
    /// Log optimizer non-convergence at debug instead of warn level.
    pub suppress_convergence_warnings: bool,
    /// Parameter search settings for the smoothing model.
    pub optimizer: NelderMeadConfig,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            min_observations: DEFAULT_MIN_OBSERVATIONS,
            horizon: DEFAULT_HORIZON,
            season_divisor: DEFAULT_SEASON_DIVISOR,
            suppress_convergence_warnings: true,
            optimizer: NelderMeadConfig::default(),
        }
    }
}

impl PipelineConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_min_observations(mut self, min_observations: usize) -> Self {
        self.min_observations = min_observations;
        self
    }

    pub fn with_horizon(mut self, horizon: usize) -> Self {
        self.horizon = horizon;
        self
    }

    pub fn with_season_divisor(mut self, divisor: usize) -> Self {
        self.season_divisor = divisor;
        self
    }

    pub fn with_convergence_warnings(mut self, enabled: bool) -> Self {
        self.suppress_convergence_warnings = !enabled;
        self
    }

    pub fn with_optimizer(mut self, optimizer: NelderMeadConfig) -> Self {
        self.optimizer = optimizer;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_production_settings() {
        let config = PipelineConfig::default();
        assert_eq!(config.min_observations, 50);
        assert_eq!(config.horizon, 300);
        assert_eq!(config.season_divisor, 3);
        assert!(config.suppress_convergence_warnings);
        assert_eq!(config.optimizer, NelderMeadConfig::default());
    }

    #[test]
    fn builder_overrides_fields() {
        let config = PipelineConfig::new()
            .with_min_observations(10)
            .with_horizon(30)
            .with_season_divisor(4)
            .with_convergence_warnings(true);

        assert_eq!(config.min_observations, 10);
        assert_eq!(config.horizon, 30);
        assert_eq!(config.season_divisor, 4);
        assert!(!config.suppress_convergence_warnings);
    }
}
