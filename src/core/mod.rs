//! Core data structures: input observations, the regularized daily series,
//! forecasts and result frames.

mod forecast;
mod frame;
mod observation;
mod series;

pub use forecast::Forecast;
pub use frame::{ResultFrame, ResultRow, COLUMNS};
pub use observation::{GroupIdentity, Observation};
pub use series::RegularizedSeries;
