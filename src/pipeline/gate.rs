//! Sufficiency gate: decides whether a group has enough history to fit.

use crate::config::DEFAULT_MIN_OBSERVATIONS;

/// Minimum-observation threshold, inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SufficiencyGate {
    threshold: usize,
}

impl SufficiencyGate {
    pub fn new(threshold: usize) -> Self {
        Self { threshold }
    }

    pub fn threshold(&self) -> usize {
        self.threshold
    }

    /// `true` when `observed` (the count before gap filling) reaches the
    /// threshold.
    pub fn admits(&self, observed: usize) -> bool {
        observed >= self.threshold
    }
}

impl Default for SufficiencyGate {
    fn default() -> Self {
        Self::new(DEFAULT_MIN_OBSERVATIONS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boundary_is_inclusive() {
        let gate = SufficiencyGate::default();
        assert_eq!(gate.threshold(), 50);
        assert!(!gate.admits(0));
        assert!(!gate.admits(49));
        assert!(gate.admits(50));
        assert!(gate.admits(51));
    }

    #[test]
    fn zero_threshold_admits_everything() {
        assert!(SufficiencyGate::new(0).admits(0));
    }
}
