//! Period-comparison metrics engine.
//!
//! Given the monitored sites and a reporting window, this module
//! computes the current and previous periods, fetches aggregate and
//! per-day search statistics for each, and reduces every metric pair
//! to a value plus a normalized growth percentage.

mod aggregate;
mod fetch;
mod growth;
mod report;
mod window;

pub use aggregate::*;
pub use fetch::*;
pub use growth::*;
pub use report::*;
pub use window::*;

use crate::gsc::GscError;
use thiserror::Error;

/// Metrics engine error types.
#[derive(Error, Debug)]
pub enum MetricsError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    #[error("unknown site: {0}")]
    UnknownSite(String),
    #[error(transparent)]
    Upstream(#[from] GscError),
}
