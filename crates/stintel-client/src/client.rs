//! HTTP client for the analysis backend's REST API.
//!
//! Wraps `reqwest` with typed response deserialization and the backend's
//! error envelope: any body carrying an `"error"` field is surfaced as
//! [`ClientError::Api`], whatever the HTTP status.

use std::time::Duration;

use reqwest::{Client, Url};
use serde::de::DeserializeOwned;
use serde_json::Value;
use stintel_core::{ConsumerSentiment, NewsAnalysis, StartupProfile};

use crate::error::ClientError;
use crate::path::{news_path, sentiment_path, SEARCH_PATH};

/// Client for the analysis backend.
///
/// Cheap to clone: the connection pool is shared between clones, so each
/// in-flight request can own its own handle.
#[derive(Debug, Clone)]
pub struct BackendClient {
    client: Client,
    base_url: Url,
}

impl BackendClient {
    /// Creates a client rooted at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns [`ClientError::InvalidBaseUrl`] if `base_url` does not parse,
    /// or [`ClientError::Http`] if the `reqwest::Client` cannot be built.
    pub fn new(base_url: &str, timeout_secs: u64, user_agent: &str) -> Result<Self, ClientError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;

        // Exactly one trailing slash, so relative endpoint paths join onto
        // the base path instead of replacing its last segment.
        let normalised = format!("{}/", base_url.trim().trim_end_matches('/'));
        let base_url = Url::parse(&normalised).map_err(|e| ClientError::InvalidBaseUrl {
            base_url: base_url.to_owned(),
            reason: e.to_string(),
        })?;
        if base_url.cannot_be_a_base() {
            return Err(ClientError::InvalidBaseUrl {
                base_url: base_url.to_string(),
                reason: "URL cannot be used as a base".to_owned(),
            });
        }

        Ok(Self { client, base_url })
    }

    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// `POST /api/search` with `{"company_name": ...}`.
    ///
    /// The name is sent exactly as given; trimming is the caller's concern.
    ///
    /// # Errors
    ///
    /// - [`ClientError::Api`] if the backend returned an `error` message.
    /// - [`ClientError::UnexpectedStatus`] on a non-2xx status without one.
    /// - [`ClientError::Http`] on network failure or timeout.
    /// - [`ClientError::Deserialize`] if the body is not a profile.
    pub async fn search(&self, company_name: &str) -> Result<StartupProfile, ClientError> {
        let url = self.endpoint(SEARCH_PATH)?;
        tracing::debug!(%url, company_name, "POST search");
        let request = self
            .client
            .post(url.clone())
            .json(&serde_json::json!({ "company_name": company_name }));
        Self::send_json(request, &url, &format!("search({company_name})"))
            .await
    }

    /// `GET /api/news/{company}/{industry}`.
    ///
    /// # Errors
    ///
    /// Same as [`BackendClient::search`].
    pub async fn news_analysis(
        &self,
        company: &str,
        industry: &str,
    ) -> Result<NewsAnalysis, ClientError> {
        let url = self.endpoint(&news_path(company, industry))?;
        tracing::debug!(%url, "GET news analysis");
        Self::send_json(
            self.client.get(url.clone()),
            &url,
            &format!("news({company}, {industry})"),
        )
        .await
    }

    /// `GET /api/sentiment/{company}`.
    ///
    /// # Errors
    ///
    /// Same as [`BackendClient::search`].
    pub async fn consumer_sentiment(&self, company: &str) -> Result<ConsumerSentiment, ClientError> {
        let url = self.endpoint(&sentiment_path(company))?;
        tracing::debug!(%url, "GET consumer sentiment");
        Self::send_json(
            self.client.get(url.clone()),
            &url,
            &format!("sentiment({company})"),
        )
        .await
    }

    fn endpoint(&self, path: &str) -> Result<Url, ClientError> {
        self.base_url
            .join(path)
            .map_err(|e| ClientError::InvalidBaseUrl {
                base_url: self.base_url.to_string(),
                reason: format!("cannot join '{path}': {e}"),
            })
    }

    /// Sends `request` and decodes the body as `T`.
    ///
    /// The body is inspected for an `error` field before the status is
    /// checked, so a 4xx/5xx with a message yields that message.
    async fn send_json<T: DeserializeOwned>(
        request: reqwest::RequestBuilder,
        url: &Url,
        context: &str,
    ) -> Result<T, ClientError> {
        let response = request.send().await?;
        let status = response.status();
        let text = response.text().await?;

        let body: Value = match serde_json::from_str(&text) {
            Ok(body) => body,
            Err(source) => {
                if !status.is_success() {
                    return Err(ClientError::UnexpectedStatus {
                        status: status.as_u16(),
                        url: url.to_string(),
                    });
                }
                return Err(ClientError::Deserialize {
                    context: context.to_owned(),
                    source,
                });
            }
        };

        if let Some(message) = error_message(&body) {
            tracing::debug!(status = status.as_u16(), %message, context, "backend returned error body");
            return Err(ClientError::Api {
                status: status.as_u16(),
                message,
            });
        }

        if !status.is_success() {
            return Err(ClientError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        serde_json::from_value(body).map_err(|source| ClientError::Deserialize {
            context: context.to_owned(),
            source,
        })
    }
}

/// Extracts the backend's `error` field. Non-string values are stringified;
/// `null` and blank strings count as absent.
fn error_message(body: &Value) -> Option<String> {
    match body.get("error")? {
        Value::Null => None,
        Value::String(s) if s.trim().is_empty() => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}

#[cfg(test)]
#[path = "client_test.rs"]
mod tests;
