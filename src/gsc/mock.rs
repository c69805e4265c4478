//! Deterministic mock provider.
//!
//! Used when no access token is configured and as a test double. Values
//! are derived from a seed hashed out of (property, date), so the same
//! query always returns the same rows and period-over-period
//! comparisons stay stable across requests.

use super::{Dimension, GscError, SearchStatsProvider, SearchStatsResponse, SearchStatsRow};

use async_trait::async_trait;
use chrono::{Days, NaiveDate};
use rand::{rngs::StdRng, Rng, SeedableRng};
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

/// Mock Search Console provider with deterministic per-day traffic.
#[derive(Debug, Clone, Default)]
pub struct MockSearchConsole;

impl MockSearchConsole {
    pub fn new() -> Self {
        Self
    }

    fn day_row(property_url: &str, date: NaiveDate) -> SearchStatsRow {
        let mut hasher = DefaultHasher::new();
        property_url.hash(&mut hasher);
        date.hash(&mut hasher);
        let mut rng = StdRng::seed_from_u64(hasher.finish());

        let impressions = rng.gen_range(800.0..40_000.0_f64).round();
        let ctr = rng.gen_range(0.01..0.12);
        let clicks = (impressions * ctr).round();
        let position = rng.gen_range(3.0..45.0_f64);

        SearchStatsRow {
            clicks,
            impressions,
            ctr,
            position,
            keys: vec![date.to_string()],
        }
    }

    fn days_in(start: NaiveDate, end: NaiveDate) -> impl Iterator<Item = NaiveDate> {
        std::iter::successors(Some(start), move |d| {
            let next = d.checked_add_days(Days::new(1))?;
            (next <= end).then_some(next)
        })
    }
}

#[async_trait]
impl SearchStatsProvider for MockSearchConsole {
    async fn query(
        &self,
        property_url: &str,
        start: NaiveDate,
        end: NaiveDate,
        dimension: Dimension,
        row_limit: u32,
    ) -> Result<SearchStatsResponse, GscError> {
        let daily: Vec<SearchStatsRow> = Self::days_in(start, end)
            .map(|d| Self::day_row(property_url, d))
            .collect();

        let rows = match dimension {
            Dimension::Date => daily.into_iter().take(row_limit as usize).collect(),
            Dimension::Aggregate => {
                let clicks: f64 = daily.iter().map(|r| r.clicks).sum();
                let impressions: f64 = daily.iter().map(|r| r.impressions).sum();
                let position = daily.iter().map(|r| r.position).sum::<f64>() / daily.len() as f64;
                vec![SearchStatsRow {
                    clicks,
                    impressions,
                    ctr: if impressions > 0.0 { clicks / impressions } else { 0.0 },
                    position,
                    keys: vec![],
                }]
            }
        };

        Ok(SearchStatsResponse { rows })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    #[tokio::test]
    async fn test_mock_is_deterministic() {
        let mock = MockSearchConsole::new();
        let a = mock
            .query("https://example.com/", date("2025-06-04"), date("2025-06-10"), Dimension::Date, 7)
            .await
            .unwrap();
        let b = mock
            .query("https://example.com/", date("2025-06-04"), date("2025-06-10"), Dimension::Date, 7)
            .await
            .unwrap();
        assert_eq!(a.rows, b.rows);
    }

    #[tokio::test]
    async fn test_daily_rows_cover_range_in_order() {
        let mock = MockSearchConsole::new();
        let resp = mock
            .query("sc-domain:example.com", date("2025-06-04"), date("2025-06-10"), Dimension::Date, 7)
            .await
            .unwrap();
        assert_eq!(resp.rows.len(), 7);
        assert_eq!(resp.rows[0].keys[0], "2025-06-04");
        assert_eq!(resp.rows[6].keys[0], "2025-06-10");
    }

    #[tokio::test]
    async fn test_aggregate_returns_single_total_row() {
        let mock = MockSearchConsole::new();
        let resp = mock
            .query("https://example.com/", date("2025-06-04"), date("2025-06-10"), Dimension::Aggregate, 1)
            .await
            .unwrap();
        assert_eq!(resp.rows.len(), 1);
        assert!(resp.rows[0].keys.is_empty());
        assert!(resp.rows[0].clicks > 0.0);
    }

    #[tokio::test]
    async fn test_different_properties_differ() {
        let mock = MockSearchConsole::new();
        let a = mock
            .query("https://a.test/", date("2025-06-04"), date("2025-06-04"), Dimension::Date, 1)
            .await
            .unwrap();
        let b = mock
            .query("https://b.test/", date("2025-06-04"), date("2025-06-04"), Dimension::Date, 1)
            .await
            .unwrap();
        assert_ne!(a.rows, b.rows);
    }
}
