//! HTTP client for the Search Console search analytics API.

use super::{Dimension, GscError, SearchStatsProvider, SearchStatsResponse};

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

const DEFAULT_API_BASE: &str = "https://www.googleapis.com/webmasters/v3";

/// Query body for `searchAnalytics/query`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct QueryRequest {
    start_date: String,
    end_date: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    dimensions: Option<Vec<String>>,
    row_limit: u32,
}

/// Google's error envelope, used to pull a readable message out of
/// non-2xx responses.
#[derive(Debug, Deserialize)]
struct ApiErrorEnvelope {
    error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}

/// Real Search Console client.
///
/// Holds a single process-wide bearer token; the client is cheap to
/// clone and safe to share across concurrent requests.
#[derive(Debug, Clone)]
pub struct SearchConsoleClient {
    http: reqwest::Client,
    base_url: String,
    access_token: String,
}

impl SearchConsoleClient {
    pub fn new(access_token: impl Into<String>) -> Self {
        Self::with_base_url(access_token, DEFAULT_API_BASE)
    }

    /// Create a client against a non-default API base, for tests.
    pub fn with_base_url(access_token: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
            access_token: access_token.into(),
        }
    }

    fn query_url(&self, property_url: &str) -> Result<reqwest::Url, GscError> {
        let mut url = reqwest::Url::parse(&self.base_url)
            .map_err(|e| GscError::Http(format!("invalid API base url: {}", e)))?;
        // push() percent-encodes the property identifier, which matters
        // for URL-prefix properties like "https://host/".
        url.path_segments_mut()
            .map_err(|_| GscError::Http("API base url cannot be a base".to_string()))?
            .push("sites")
            .push(property_url)
            .push("searchAnalytics")
            .push("query");
        Ok(url)
    }
}

#[async_trait]
impl SearchStatsProvider for SearchConsoleClient {
    async fn query(
        &self,
        property_url: &str,
        start: NaiveDate,
        end: NaiveDate,
        dimension: Dimension,
        row_limit: u32,
    ) -> Result<SearchStatsResponse, GscError> {
        let body = QueryRequest {
            start_date: start.to_string(),
            end_date: end.to_string(),
            dimensions: match dimension {
                Dimension::Aggregate => None,
                Dimension::Date => Some(vec!["date".to_string()]),
            },
            row_limit,
        };

        let url = self.query_url(property_url)?;

        let response = self
            .http
            .post(url)
            .bearer_auth(&self.access_token)
            .json(&body)
            .send()
            .await
            .map_err(|e| GscError::Http(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ApiErrorEnvelope>(&text)
                .map(|e| e.error.message)
                .unwrap_or(text);
            return Err(GscError::Api {
                status: status.as_u16(),
                message,
            });
        }

        response
            .json::<SearchStatsResponse>()
            .await
            .map_err(|e| GscError::Http(e.to_string()))
    }
}
