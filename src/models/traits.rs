//! Seam between the pipeline and the smoothing model it fits.

use crate::core::{Forecast, RegularizedSeries};
use crate::error::Result;

/// A model that learns from a gap-filled daily series and projects the days
/// after its last one.
///
/// `predict` before a successful `fit` fails with
/// [`ForecastError::FitRequired`](crate::ForecastError::FitRequired).
pub trait Forecaster {
    fn fit(&mut self, series: &RegularizedSeries) -> Result<()>;

    /// Point predictions for `horizon` days, step 1 being the day after the
    /// fitted series ends.
    fn predict(&self, horizon: usize) -> Result<Forecast>;

    /// Short label used in log events.
    fn name(&self) -> &str;
}
