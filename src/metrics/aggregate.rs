//! Multi-site fan-out and per-site growth assembly.

use super::{fetch_window_total, percent_change, DateWindow, MetricsSnapshot};
use crate::gsc::SearchStatsProvider;
use crate::sites::MonitoredSite;

use futures::future::join_all;
use serde::Serialize;

/// One KPI: the current raw value and its change versus the previous
/// window, in percent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MetricPoint {
    pub value: f64,
    pub change: f64,
}

/// The four KPIs tracked per site.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SiteMetrics {
    pub clicks: MetricPoint,
    pub impressions: MetricPoint,
    pub ctr: MetricPoint,
    pub position: MetricPoint,
}

/// Per-site summary entry: either metrics or an error, never both.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteSummary {
    pub id: String,
    pub name: String,
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metrics: Option<SiteMetrics>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Pair two window snapshots into the four KPI points.
///
/// Position is the one metric where a lower raw value is the better
/// one, so its change percentage is computed with the inverted sign
/// convention.
pub fn build_site_metrics(current: MetricsSnapshot, previous: MetricsSnapshot) -> SiteMetrics {
    SiteMetrics {
        clicks: MetricPoint {
            value: current.clicks,
            change: percent_change(current.clicks, previous.clicks, false),
        },
        impressions: MetricPoint {
            value: current.impressions,
            change: percent_change(current.impressions, previous.impressions, false),
        },
        ctr: MetricPoint {
            value: current.ctr,
            change: percent_change(current.ctr, previous.ctr, false),
        },
        position: MetricPoint {
            value: current.position,
            change: percent_change(current.position, previous.position, true),
        },
    }
}

/// Fetch and summarize every monitored site over the window pair.
///
/// All sites are queried concurrently, and within a site the current
/// and previous totals are fetched concurrently too. A failing site
/// becomes an `error` entry in place; it never takes the rest of the
/// batch down, and the output preserves the registry order with one
/// entry per input site.
pub async fn aggregate_all(
    provider: &dyn SearchStatsProvider,
    sites: &[MonitoredSite],
    current: DateWindow,
    previous: DateWindow,
) -> Vec<SiteSummary> {
    join_all(
        sites
            .iter()
            .map(|site| summarize_site(provider, site, current, previous)),
    )
    .await
}

async fn summarize_site(
    provider: &dyn SearchStatsProvider,
    site: &MonitoredSite,
    current: DateWindow,
    previous: DateWindow,
) -> SiteSummary {
    let (current_total, previous_total) = tokio::join!(
        fetch_window_total(provider, &site.property_url, current),
        fetch_window_total(provider, &site.property_url, previous),
    );

    let (metrics, error) = match (current_total, previous_total) {
        (Ok(current), Ok(previous)) => (Some(build_site_metrics(current, previous)), None),
        (Err(e), _) | (_, Err(e)) => {
            tracing::warn!("fetch failed for {}: {}", site.id, e);
            (None, Some(e.to_string()))
        }
    };

    SiteSummary {
        id: site.id.clone(),
        name: site.name.clone(),
        url: site.property_url.clone(),
        icon_url: site.icon_url.clone(),
        metrics,
        error,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gsc::{Dimension, GscError, SearchStatsResponse, SearchStatsRow};
    use async_trait::async_trait;
    use chrono::NaiveDate;

    /// Provider that fails for one property and returns fixed totals
    /// for everything else.
    struct FlakyProvider {
        failing_property: String,
    }

    #[async_trait]
    impl SearchStatsProvider for FlakyProvider {
        async fn query(
            &self,
            property_url: &str,
            start: NaiveDate,
            _end: NaiveDate,
            _dimension: Dimension,
            _row_limit: u32,
        ) -> Result<SearchStatsResponse, GscError> {
            if property_url == self.failing_property {
                return Err(GscError::Api {
                    status: 403,
                    message: "user does not have access".to_string(),
                });
            }
            // Current window (June) gets higher clicks and a better
            // position than the previous window (May).
            let row = if start.format("%m").to_string() == "06" {
                SearchStatsRow {
                    clicks: 120.0,
                    impressions: 4000.0,
                    ctr: 0.03,
                    position: 8.0,
                    keys: vec![],
                }
            } else {
                SearchStatsRow {
                    clicks: 100.0,
                    impressions: 4000.0,
                    ctr: 0.025,
                    position: 10.0,
                    keys: vec![],
                }
            };
            Ok(SearchStatsResponse { rows: vec![row] })
        }
    }

    fn site(id: &str, url: &str) -> MonitoredSite {
        MonitoredSite {
            id: id.to_string(),
            name: id.to_uppercase(),
            property_url: url.to_string(),
            icon_url: None,
        }
    }

    fn windows() -> (DateWindow, DateWindow) {
        (
            DateWindow {
                start: "2025-06-04".parse().unwrap(),
                end: "2025-06-10".parse().unwrap(),
            },
            DateWindow {
                start: "2025-05-28".parse().unwrap(),
                end: "2025-06-03".parse().unwrap(),
            },
        )
    }

    #[test]
    fn test_position_change_uses_inverted_sign() {
        let current = MetricsSnapshot {
            clicks: 120.0,
            impressions: 4000.0,
            ctr: 0.03,
            position: 8.0,
        };
        let previous = MetricsSnapshot {
            clicks: 100.0,
            impressions: 4000.0,
            ctr: 0.025,
            position: 10.0,
        };

        let metrics = build_site_metrics(current, previous);
        assert_eq!(metrics.clicks.change, 20.0);
        assert_eq!(metrics.impressions.change, 0.0);
        // The raw value stays un-flipped; only the change is inverted.
        assert_eq!(metrics.position.value, 8.0);
        assert_eq!(metrics.position.change, 20.0);
    }

    #[test]
    fn test_zero_previous_snapshot_yields_zero_changes() {
        let current = MetricsSnapshot {
            clicks: 50.0,
            impressions: 900.0,
            ctr: 0.055,
            position: 12.0,
        };
        let metrics = build_site_metrics(current, MetricsSnapshot::default());
        assert_eq!(metrics.clicks.change, 0.0);
        assert_eq!(metrics.position.change, 0.0);
        assert_eq!(metrics.clicks.value, 50.0);
    }

    #[tokio::test]
    async fn test_one_bad_site_does_not_sink_the_batch() {
        let provider = FlakyProvider {
            failing_property: "https://broken.test/".to_string(),
        };
        let sites = vec![
            site("a", "https://a.test/"),
            site("broken", "https://broken.test/"),
            site("c", "sc-domain:c.test"),
        ];
        let (current, previous) = windows();

        let summaries = aggregate_all(&provider, &sites, current, previous).await;

        assert_eq!(summaries.len(), 3);
        assert_eq!(summaries[0].id, "a");
        assert_eq!(summaries[1].id, "broken");
        assert_eq!(summaries[2].id, "c");

        assert!(summaries[0].metrics.is_some() && summaries[0].error.is_none());
        assert!(summaries[2].metrics.is_some() && summaries[2].error.is_none());

        let broken = &summaries[1];
        assert!(broken.metrics.is_none());
        assert!(broken.error.as_deref().unwrap().contains("403"));
    }

    #[tokio::test]
    async fn test_success_entries_omit_error_in_json() {
        let provider = FlakyProvider {
            failing_property: "https://broken.test/".to_string(),
        };
        let sites = vec![site("a", "https://a.test/"), site("broken", "https://broken.test/")];
        let (current, previous) = windows();

        let summaries = aggregate_all(&provider, &sites, current, previous).await;

        let ok = serde_json::to_value(&summaries[0]).unwrap();
        assert!(ok.get("error").is_none());
        assert!(ok.get("metrics").is_some());

        let failed = serde_json::to_value(&summaries[1]).unwrap();
        assert!(failed.get("metrics").is_none());
        assert!(failed.get("error").is_some());
    }
}
