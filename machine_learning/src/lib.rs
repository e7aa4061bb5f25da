pub mod error;
pub mod features;
pub mod metrics;
mod pipeline;
pub mod regression;
pub mod sparse;
mod summary;

pub use error::{MlErr, Result};
pub use pipeline::fit_temperature_model;
pub use summary::summarize;
