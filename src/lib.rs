//! # invoice-forecast
//!
//! Daily invoice total forecasting per (vendor, region) group.
//!
//! Each group is checked against a minimum-observation gate, its sparse
//! history is expanded onto a full daily calendar with zero-filled gaps, and
//! additive Holt-Winters with a period of one third of that length projects
//! it 300 days ahead. The projection is spliced back onto the history as one
//! frame.
//! [`batch::forecast_batch`] runs many groups in parallel.

pub mod batch;
pub mod config;
pub mod core;
pub mod error;
pub mod models;
pub mod outcome;
pub mod pipeline;
pub mod utils;

pub use error::{ForecastError, Result};

pub mod prelude {
    pub use crate::batch::{forecast_batch, BatchReport, GroupKey, GroupedObservation};
    pub use crate::config::PipelineConfig;
    pub use crate::core::{
        Forecast, GroupIdentity, Observation, RegularizedSeries, ResultFrame, ResultRow,
    };
    pub use crate::error::{ForecastError, Result};
    pub use crate::models::Forecaster;
    pub use crate::outcome::{AppendFileLog, MemoryLog, NullLog, Outcome, OutcomeLog};
    pub use crate::pipeline::generate_forecast;
}
