//! Additive Holt-Winters forecasting model.
//!
//! Triple exponential smoothing with an additive trend and an additive
//! seasonal component.

use crate::core::{Forecast, RegularizedSeries};
use crate::error::{ForecastError, Result};
use crate::models::Forecaster;
use crate::utils::optimization::{nelder_mead, NelderMeadConfig};

const PARAM_MIN: f64 = 0.0001;
const PARAM_MAX: f64 = 0.9999;
const PARAM_BOUNDS: [(f64, f64); 3] = [(PARAM_MIN, PARAM_MAX); 3];
const INITIAL_GUESS: [f64; 3] = [0.3, 0.1, 0.1];

/// Seasonal period derived from the length of history: `round(len / divisor)`.
///
/// This is a fraction of the series length, not a calendar period, so the
/// cycle a model sees grows with the amount of history. A zero divisor
/// yields 0, which [`HoltWinters`] rejects at fit time.
pub fn heuristic_period(len: usize, divisor: usize) -> usize {
    if divisor == 0 {
        return 0;
    }
    (len as f64 / divisor as f64).round() as usize
}

/// Smoothing parameters, each in `(0, 1)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SmoothingParams {
    /// Level.
    pub alpha: f64,
    /// Trend.
    pub beta: f64,
    /// Seasonal.
    pub gamma: f64,
}

impl SmoothingParams {
    pub fn new(alpha: f64, beta: f64, gamma: f64) -> Self {
        Self {
            alpha: alpha.clamp(PARAM_MIN, PARAM_MAX),
            beta: beta.clamp(PARAM_MIN, PARAM_MAX),
            gamma: gamma.clamp(PARAM_MIN, PARAM_MAX),
        }
    }

    fn from_slice(p: &[f64]) -> Self {
        Self::new(p[0], p[1], p[2])
    }
}

/// Level, trend and seasonal indices after some number of observations.
#[derive(Debug, Clone)]
struct State {
    level: f64,
    trend: f64,
    seasonals: Vec<f64>,
}

impl State {
    /// Heuristic start from the first two seasons.
    ///
    /// Level is the mean of the first season, trend the mean per-step change
    /// between the first two seasons, and seasonal indices the first season's
    /// deviations from the level, centred to sum to zero.
    fn initialize(values: &[f64], period: usize) -> Self {
        let first = &values[..period];
        let level = first.iter().sum::<f64>() / period as f64;

        let trend = (0..period)
            .map(|i| (values[period + i] - values[i]) / period as f64)
            .sum::<f64>()
            / period as f64;

        let mut seasonals: Vec<f64> = first.iter().map(|y| y - level).collect();
        let offset = seasonals.iter().sum::<f64>() / period as f64;
        for s in seasonals.iter_mut() {
            *s -= offset;
        }

        Self {
            level,
            trend,
            seasonals,
        }
    }

    fn one_step(&self, season_idx: usize) -> f64 {
        self.level + self.trend + self.seasonals[season_idx]
    }

    fn update(&mut self, y: f64, season_idx: usize, p: &SmoothingParams) {
        let s = self.seasonals[season_idx];
        let level_prev = self.level;
        self.level = p.alpha * (y - s) + (1.0 - p.alpha) * (level_prev + self.trend);
        self.trend = p.beta * (self.level - level_prev) + (1.0 - p.beta) * self.trend;
        self.seasonals[season_idx] = p.gamma * (y - self.level) + (1.0 - p.gamma) * s;
    }

    fn is_finite(&self) -> bool {
        self.level.is_finite()
            && self.trend.is_finite()
            && self.seasonals.iter().all(|s| s.is_finite())
    }
}

/// Run the smoothing recursion over everything after the first season,
/// handing each `(actual, one_step_forecast)` pair to `visit`.
fn smooth<F>(values: &[f64], period: usize, params: &SmoothingParams, mut visit: F) -> State
where
    F: FnMut(f64, f64),
{
    let mut state = State::initialize(values, period);
    for (t, &y) in values.iter().enumerate().skip(period) {
        let idx = t % period;
        visit(y, state.one_step(idx));
        state.update(y, idx, params);
    }
    state
}

fn sse(values: &[f64], period: usize, params: &SmoothingParams) -> f64 {
    let mut total = 0.0;
    smooth(values, period, params, |y, forecast| {
        total += (y - forecast) * (y - forecast);
    });
    total
}

/// Additive Holt-Winters forecaster.
///
/// - Level: `l_t = α(y_t - s_{t-m}) + (1-α)(l_{t-1} + b_{t-1})`
/// - Trend: `b_t = β(l_t - l_{t-1}) + (1-β)b_{t-1}`
/// - Seasonal: `s_t = γ(y_t - l_t) + (1-γ)s_{t-m}`
/// - Forecast: `ŷ_{t+h} = l_t + h*b_t + s_{t+h-m}`
///
/// The parameters are estimated at fit time by minimizing the in-sample
/// one-step squared error with a bounded Nelder-Mead search. If the search
/// stops before converging the best point found is used; a warning is emitted
/// unless convergence warnings are suppressed.
#[derive(Debug, Clone)]
pub struct HoltWinters {
    params: Option<SmoothingParams>,
    seasonal_period: usize,
    optimizer: NelderMeadConfig,
    suppress_convergence_warnings: bool,
    converged: Option<bool>,
    state: Option<State>,
    n: usize,
}

impl HoltWinters {
    /// Create an unfitted model with the given seasonal period.
    pub fn auto(seasonal_period: usize) -> Self {
        Self {
            params: None,
            seasonal_period,
            optimizer: NelderMeadConfig::default(),
            suppress_convergence_warnings: false,
            converged: None,
            state: None,
            n: 0,
        }
    }

    /// Use a custom optimizer configuration for parameter estimation.
    pub fn with_optimizer(mut self, config: NelderMeadConfig) -> Self {
        self.optimizer = config;
        self
    }

    /// Log a non-converged parameter search at debug instead of warn.
    pub fn suppress_convergence_warnings(mut self, suppress: bool) -> Self {
        self.suppress_convergence_warnings = suppress;
        self
    }

    /// Estimated parameters, `None` before fitting.
    pub fn params(&self) -> Option<SmoothingParams> {
        self.params
    }

    pub fn seasonal_period(&self) -> usize {
        self.seasonal_period
    }

    /// Whether the last parameter search converged. `None` before fitting.
    pub fn converged(&self) -> Option<bool> {
        self.converged
    }

    fn validate(&self, len: usize) -> Result<()> {
        let period = self.seasonal_period;
        if period < 2 {
            return Err(ForecastError::InvalidParameter(format!(
                "seasonal period must be at least 2, got {period}"
            )));
        }
        if period >= len {
            return Err(ForecastError::InvalidParameter(format!(
                "seasonal period {period} must be shorter than the series ({len} days)"
            )));
        }
        if len < 2 * period {
            return Err(ForecastError::InsufficientData {
                needed: 2 * period,
                got: len,
            });
        }
        Ok(())
    }

    fn estimate_params(&mut self, values: &[f64]) -> Result<SmoothingParams> {
        let period = self.seasonal_period;
        let result = nelder_mead(
            |p| sse(values, period, &SmoothingParams::from_slice(p)),
            &INITIAL_GUESS,
            Some(&PARAM_BOUNDS),
            &self.optimizer,
        );

        if !result.optimal_value.is_finite() {
            return Err(ForecastError::FitFailure(
                "smoothing objective is not finite".to_string(),
            ));
        }

        self.converged = Some(result.converged);
        if !result.converged {
            if self.suppress_convergence_warnings {
                tracing::debug!(
                    iterations = result.iterations,
                    period,
                    "Holt-Winters parameter search did not converge"
                );
            } else {
                tracing::warn!(
                    iterations = result.iterations,
                    period,
                    sse = result.optimal_value,
                    "Holt-Winters parameter search did not converge"
                );
            }
        }

        Ok(SmoothingParams::from_slice(&result.optimal_point))
    }
}

impl Forecaster for HoltWinters {
    fn fit(&mut self, series: &RegularizedSeries) -> Result<()> {
        let values = series.amounts();
        self.validate(values.len())?;
        if values.iter().any(|v| !v.is_finite()) {
            return Err(ForecastError::FitFailure(
                "series contains non-finite amounts".to_string(),
            ));
        }

        let params = self.estimate_params(values)?;
        let state = smooth(values, self.seasonal_period, &params, |_, _| {});
        if !state.is_finite() {
            return Err(ForecastError::FitFailure(
                "smoothing state diverged".to_string(),
            ));
        }

        self.params = Some(params);
        self.n = values.len();
        self.state = Some(state);
        Ok(())
    }

    fn predict(&self, horizon: usize) -> Result<Forecast> {
        let state = self.state.as_ref().ok_or(ForecastError::FitRequired)?;
        let period = self.seasonal_period;

        let predictions = (1..=horizon)
            .map(|h| {
                let s = state.seasonals[(self.n + h - 1) % period];
                state.level + h as f64 * state.trend + s
            })
            .collect();

        Ok(Forecast::from_values(predictions))
    }

    fn name(&self) -> &str {
        "HoltWinters(additive)"
    }
}
