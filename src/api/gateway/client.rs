//! reqwest-backed implementation of [`DashboardGateway`].

use std::time::Duration;

use async_trait::async_trait;
use http::header::{ACCEPT, CONTENT_TYPE, HeaderValue};
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use url::Url;

use crate::api::error::DashboardError;
use crate::api::models::{
    CrawlerAction, CrawlerStatusUpdate, ReviewPage, ReviewStats, RetryOutcome,
};
use crate::api::query::ReviewQuery;

use super::DashboardGateway;
use super::error_mapping::{map_decode_error, map_http_error, map_transport_error};
use super::http_utils::describe_error_body;

/// Connection settings for the crawler backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiSettings {
    base_url: Url,
    timeout: Duration,
}

impl ApiSettings {
    /// Creates settings from an already validated base URL.
    #[must_use]
    pub const fn new(base_url: Url, timeout: Duration) -> Self {
        Self { base_url, timeout }
    }

    /// Parses the base URL and creates settings.
    ///
    /// # Errors
    ///
    /// Returns [`DashboardError::Configuration`] when the URL is malformed or
    /// does not use HTTP(S).
    pub fn parse(base_url: &str, timeout: Duration) -> Result<Self, DashboardError> {
        let parsed = Url::parse(base_url.trim()).map_err(|error| DashboardError::Configuration {
            message: format!("API base URL '{base_url}' is invalid: {error}"),
        })?;

        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(DashboardError::Configuration {
                message: format!("API base URL '{base_url}' must use http or https"),
            });
        }

        Ok(Self::new(parsed, timeout))
    }

    /// Returns the configured base URL.
    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Returns the per-request timeout.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Resolves a path relative to the base URL.
    ///
    /// # Errors
    ///
    /// Returns [`DashboardError::Configuration`] when the joined URL is invalid.
    pub fn endpoint(&self, path: &str) -> Result<Url, DashboardError> {
        let base = self.base_url.as_str().trim_end_matches('/');
        let relative = path.trim_start_matches('/');
        Url::parse(&format!("{base}/{relative}")).map_err(|error| DashboardError::Configuration {
            message: format!("cannot build endpoint URL for '{path}': {error}"),
        })
    }

    /// Builds the `/reviews` URL for a query, including its parameters.
    ///
    /// # Errors
    ///
    /// Returns [`DashboardError::Configuration`] when the joined URL is invalid.
    pub fn reviews_url(&self, query: &ReviewQuery) -> Result<Url, DashboardError> {
        let mut url = self.endpoint("reviews")?;
        {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in query.query_pairs() {
                pairs.append_pair(key, &value);
            }
        }
        Ok(url)
    }
}

/// Gateway that talks to the backend over HTTP.
#[derive(Debug, Clone)]
pub struct HttpDashboardGateway {
    client: Client,
    settings: ApiSettings,
}

impl HttpDashboardGateway {
    /// Creates a gateway for the given settings.
    ///
    /// # Errors
    ///
    /// Returns [`DashboardError::Configuration`] when the HTTP client cannot
    /// be built.
    pub fn new(settings: ApiSettings) -> Result<Self, DashboardError> {
        let client = Client::builder()
            .timeout(settings.timeout())
            .build()
            .map_err(|error| DashboardError::Configuration {
                message: format!("failed to configure HTTP client: {error}"),
            })?;
        Ok(Self { client, settings })
    }

    /// Returns the settings this gateway was built with.
    #[must_use]
    pub const fn settings(&self) -> &ApiSettings {
        &self.settings
    }

    async fn send(
        &self,
        operation: &str,
        request: RequestBuilder,
    ) -> Result<Response, DashboardError> {
        let response = request
            .header(ACCEPT, HeaderValue::from_static("application/json"))
            .send()
            .await
            .map_err(|error| map_transport_error(operation, &error))?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        tracing::warn!(operation, status = status.as_u16(), "backend rejected request");
        Err(map_http_error(operation, status, describe_error_body(&body)))
    }

    async fn read_json<T: DeserializeOwned>(
        operation: &str,
        response: Response,
    ) -> Result<T, DashboardError> {
        let bytes = response
            .bytes()
            .await
            .map_err(|error| map_transport_error(operation, &error))?;
        serde_json::from_slice(&bytes).map_err(|error| map_decode_error(operation, &error))
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        operation: &str,
        url: Url,
    ) -> Result<T, DashboardError> {
        tracing::debug!(operation, %url, "GET");
        let response = self.send(operation, self.client.get(url)).await?;
        Self::read_json(operation, response).await
    }

    async fn post(&self, operation: &str, url: Url) -> Result<Response, DashboardError> {
        tracing::debug!(operation, %url, "POST");
        let request = self
            .client
            .post(url)
            .header(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        self.send(operation, request).await
    }
}

#[async_trait]
impl DashboardGateway for HttpDashboardGateway {
    async fn crawler_status(&self) -> Result<CrawlerStatusUpdate, DashboardError> {
        let url = self.settings.endpoint("crawler/status")?;
        self.get_json("crawler status", url).await
    }

    async fn control_crawler(
        &self,
        action: CrawlerAction,
    ) -> Result<CrawlerStatusUpdate, DashboardError> {
        let operation = format!("{} crawler", action.verb());
        let url = self
            .settings
            .endpoint(&format!("crawler/{}", action.verb()))?;
        let response = self.post(&operation, url).await?;
        Self::read_json(&operation, response).await
    }

    async fn list_reviews(&self, query: &ReviewQuery) -> Result<ReviewPage, DashboardError> {
        let url = self.settings.reviews_url(query)?;
        self.get_json("review listing", url).await
    }

    async fn list_topics(&self) -> Result<Vec<String>, DashboardError> {
        let url = self.settings.endpoint("reviews/topics")?;
        self.get_json("review topics", url).await
    }

    async fn review_stats(&self) -> Result<ReviewStats, DashboardError> {
        let url = self.settings.endpoint("reviews/stats")?;
        self.get_json("review stats", url).await
    }

    async fn retry_failed(&self) -> Result<RetryOutcome, DashboardError> {
        let operation = "retry failed reviews";
        let url = self.settings.endpoint("reviews/retry-failed")?;
        let response = self.post(operation, url).await?;
        let body = response.text().await.unwrap_or_default();

        // The body is informational only; an unexpected shape is not an error.
        let outcome = serde_json::from_str::<RetryOutcome>(&body).unwrap_or_default();
        Ok(outcome)
    }
}

#[cfg(test)]
#[path = "tests.rs"]
mod tests;
