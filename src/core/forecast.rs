//! Forecast result structure for holding point predictions.

/// Point predictions for the steps following the last observed day.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Forecast {
    point: Vec<f64>,
}

impl Forecast {
    /// Create an empty forecast.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a forecast from point predictions.
    pub fn from_values(values: Vec<f64>) -> Self {
        Self { point: values }
    }

    /// Get the forecast horizon (number of steps).
    pub fn horizon(&self) -> usize {
        self.point.len()
    }

    pub fn is_empty(&self) -> bool {
        self.point.is_empty()
    }

    /// Get the point predictions.
    pub fn primary(&self) -> &[f64] {
        &self.point
    }

    /// Prediction for a 1-based step ahead.
    pub fn step(&self, h: usize) -> Option<f64> {
        h.checked_sub(1).and_then(|i| self.point.get(i).copied())
    }

    /// Replace every prediction `<= 0` with `0.0`.
    ///
    /// Invoice activity cannot be negative.
    pub fn clamped_non_negative(mut self) -> Self {
        for value in self.point.iter_mut() {
            if *value <= 0.0 {
                *value = 0.0;
            }
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamp_replaces_non_positive_values() {
        let forecast = Forecast::from_values(vec![3.5, -0.2, 0.0, -12.0, 0.1]).clamped_non_negative();
        assert_eq!(forecast.primary(), &[3.5, 0.0, 0.0, 0.0, 0.1]);
    }

    #[test]
    fn step_is_one_based() {
        let forecast = Forecast::from_values(vec![1.0, 2.0]);
        assert_eq!(forecast.step(0), None);
        assert_eq!(forecast.step(1), Some(1.0));
        assert_eq!(forecast.step(2), Some(2.0));
        assert_eq!(forecast.step(3), None);
    }

    #[test]
    fn empty_forecast_has_zero_horizon() {
        let forecast = Forecast::new();
        assert!(forecast.is_empty());
        assert_eq!(forecast.horizon(), 0);
    }
}
