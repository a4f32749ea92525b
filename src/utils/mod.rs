//! Utility functions for forecasting models.

pub mod optimization;

pub use optimization::{nelder_mead, NelderMeadConfig, NelderMeadResult};
