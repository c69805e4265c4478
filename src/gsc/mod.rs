//! Search Console provider abstraction.
//!
//! The rest of the service talks to Google Search Console through the
//! [`SearchStatsProvider`] trait: one query for a property and date
//! range, either as a single aggregate row or broken down per day.

mod client;
mod mock;

pub use client::*;
pub use mock::*;

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors from the upstream Search Console collaborator.
#[derive(Error, Debug)]
pub enum GscError {
    #[error("search console request failed: {0}")]
    Http(String),
    #[error("search console returned {status}: {message}")]
    Api { status: u16, message: String },
}

/// Breakdown dimension for a search analytics query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dimension {
    /// No dimension: the API returns at most one row of totals.
    Aggregate,
    /// Per-day breakdown: `keys[0]` of each row is the ISO date.
    Date,
}

/// One row of a search analytics response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchStatsRow {
    pub clicks: f64,
    pub impressions: f64,
    /// Click-through rate as a fraction in [0, 1].
    pub ctr: f64,
    /// Average search-result rank; lower is better.
    pub position: f64,
    /// Dimension values; empty for aggregate queries.
    #[serde(default)]
    pub keys: Vec<String>,
}

/// Search analytics response body.
///
/// Google omits `rows` entirely when a range has no traffic, so it
/// defaults to empty rather than erroring.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchStatsResponse {
    #[serde(default)]
    pub rows: Vec<SearchStatsRow>,
}

/// A source of search analytics data for registered properties.
#[async_trait]
pub trait SearchStatsProvider: Send + Sync {
    /// Query search statistics for `property_url` over the inclusive
    /// date range `[start, end]`.
    async fn query(
        &self,
        property_url: &str,
        start: NaiveDate,
        end: NaiveDate,
        dimension: Dimension,
        row_limit: u32,
    ) -> Result<SearchStatsResponse, GscError>;
}
