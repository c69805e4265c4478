//! Assembly of the external-facing summary and detail payloads.

use super::{
    aggregate_all, build_site_metrics, compute_windows, fetch_site_metrics, fetch_window_total,
    MetricsError, SiteMetrics, SiteSummary, TrendPoint, WindowPair,
};
use crate::gsc::SearchStatsProvider;
use crate::sites::SiteRegistry;

use chrono::NaiveDate;
use serde::Serialize;

/// Site identity fields echoed back in a detail response.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteRef {
    pub id: String,
    pub name: String,
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon_url: Option<String>,
}

/// Summary across all monitored sites for one window pair.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryReport {
    pub period: WindowPair,
    /// Most recent date with upstream data, i.e. the as-of date after
    /// the reporting lag.
    pub latest_data_date: NaiveDate,
    pub sites: Vec<SiteSummary>,
}

/// Single-site detail: KPI points plus the daily trend for the current
/// window.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DetailReport {
    pub site: SiteRef,
    pub period: WindowPair,
    pub latest_data_date: NaiveDate,
    pub metrics: SiteMetrics,
    pub daily: Vec<TrendPoint>,
}

/// Build the multi-site summary.
///
/// Per-site fetch failures surface as `error` entries inside the
/// result; only invalid arguments fail the request as a whole.
pub async fn get_summary(
    provider: &dyn SearchStatsProvider,
    registry: &SiteRegistry,
    as_of: NaiveDate,
    window_days: u32,
) -> Result<SummaryReport, MetricsError> {
    let windows = compute_windows(as_of, window_days)?;
    let sites = aggregate_all(provider, registry.sites(), windows.current, windows.previous).await;

    Ok(SummaryReport {
        period: windows,
        latest_data_date: as_of,
        sites,
    })
}

/// Build the single-site detail.
///
/// With only one site there is no partial-success mode: an upstream
/// failure fails the whole request.
pub async fn get_detail(
    provider: &dyn SearchStatsProvider,
    registry: &SiteRegistry,
    site_id: &str,
    as_of: NaiveDate,
    window_days: u32,
) -> Result<DetailReport, MetricsError> {
    let site = registry
        .get(site_id)
        .ok_or_else(|| MetricsError::UnknownSite(site_id.to_string()))?;

    let windows = compute_windows(as_of, window_days)?;

    let (current, previous_total) = tokio::join!(
        fetch_site_metrics(provider, &site.property_url, windows.current),
        fetch_window_total(provider, &site.property_url, windows.previous),
    );
    let current = current?;
    let previous_total = previous_total?;

    Ok(DetailReport {
        site: SiteRef {
            id: site.id.clone(),
            name: site.name.clone(),
            url: site.property_url.clone(),
            icon_url: site.icon_url.clone(),
        },
        period: windows,
        latest_data_date: as_of,
        metrics: build_site_metrics(current.total, previous_total),
        daily: current.daily,
    })
}
