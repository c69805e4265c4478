//! Fetching and shaping of per-window search statistics.

use super::DateWindow;
use crate::gsc::{Dimension, GscError, SearchStatsProvider, SearchStatsRow};

use serde::Serialize;

/// Aggregate totals for one window.
///
/// Windows with no traffic come back from the API with no rows at all;
/// those collapse to the zero snapshot rather than an error.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct MetricsSnapshot {
    pub clicks: f64,
    pub impressions: f64,
    pub ctr: f64,
    pub position: f64,
}

impl From<&SearchStatsRow> for MetricsSnapshot {
    fn from(row: &SearchStatsRow) -> Self {
        Self {
            clicks: row.clicks,
            impressions: row.impressions,
            ctr: row.ctr,
            position: row.position,
        }
    }
}

/// One day of the current window's trend line.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendPoint {
    pub date: String,
    pub clicks: f64,
    pub impressions: f64,
    pub ctr: f64,
    pub position: f64,
}

/// Current-window data for one site: totals plus the daily breakdown.
#[derive(Debug, Clone)]
pub struct SiteWindowData {
    pub total: MetricsSnapshot,
    pub daily: Vec<TrendPoint>,
}

/// Fetch the aggregate totals for one property over one window.
pub async fn fetch_window_total(
    provider: &dyn SearchStatsProvider,
    property_url: &str,
    window: DateWindow,
) -> Result<MetricsSnapshot, GscError> {
    let response = provider
        .query(property_url, window.start, window.end, Dimension::Aggregate, 1)
        .await?;

    Ok(response
        .rows
        .first()
        .map(MetricsSnapshot::from)
        .unwrap_or_default())
}

/// Fetch totals and the per-day breakdown for one property over one
/// window.
///
/// The row limit matches the window's day count so a full window fits
/// in a single response. Days without traffic are simply absent from
/// the result; no zero rows are synthesized here.
pub async fn fetch_site_metrics(
    provider: &dyn SearchStatsProvider,
    property_url: &str,
    window: DateWindow,
) -> Result<SiteWindowData, GscError> {
    let (total, daily) = tokio::join!(
        fetch_window_total(provider, property_url, window),
        provider.query(
            property_url,
            window.start,
            window.end,
            Dimension::Date,
            window.len_days(),
        ),
    );

    let daily = daily?
        .rows
        .iter()
        .map(|row| TrendPoint {
            date: row.keys.first().cloned().unwrap_or_default(),
            clicks: row.clicks,
            impressions: row.impressions,
            ctr: row.ctr,
            position: row.position,
        })
        .collect();

    Ok(SiteWindowData {
        total: total?,
        daily,
    })
}
