use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

use crate::config::UpstreamConfig;
use super::types::{Comment, CommentsResponse, SubfedditsResponse};

#[derive(Debug, Error)]
pub enum FedditError {
    #[error("Feddit request to {endpoint} timed out")]
    Timeout { endpoint: &'static str },

    #[error("Feddit backend unreachable at {endpoint}: {source}")]
    Unavailable {
        endpoint: &'static str,
        #[source]
        source: reqwest::Error,
    },

    #[error("Feddit backend returned {status} for {endpoint}")]
    Status {
        endpoint: &'static str,
        status: StatusCode,
    },

    #[error("Unexpected response shape from {endpoint}: {source}")]
    Decode {
        endpoint: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to build Feddit HTTP client: {0}")]
    Build(#[source] reqwest::Error),
}

impl FedditError {
    fn from_transport(endpoint: &'static str, source: reqwest::Error) -> Self {
        if source.is_timeout() {
            FedditError::Timeout { endpoint }
        } else {
            FedditError::Unavailable { endpoint, source }
        }
    }
}

/// Read-only client for the Feddit comments backend.
#[derive(Debug, Clone)]
pub struct FedditClient {
    client: Client,
    base_url: String,
}

impl FedditClient {
    pub fn new(config: &UpstreamConfig) -> Result<Self, FedditError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(FedditError::Build)?;

        Ok(Self {
            client,
            base_url: config.base_url(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn subfeddits(&self) -> Result<Vec<serde_json::Value>, FedditError> {
        let response: SubfedditsResponse = self.get("subfeddits", &[]).await?;
        Ok(response.subfeddits)
    }

    pub async fn subfeddit_count(&self) -> Result<usize, FedditError> {
        Ok(self.subfeddits().await?.len())
    }

    /// Fetches up to `limit` comments of a subfeddit, starting at `skip`.
    pub async fn comments(
        &self,
        subfeddit_id: i64,
        skip: u32,
        limit: u32,
    ) -> Result<Vec<Comment>, FedditError> {
        let query = [
            ("subfeddit_id", subfeddit_id.to_string()),
            ("skip", skip.to_string()),
            ("limit", limit.to_string()),
        ];
        let response: CommentsResponse = self.get("comments", &query).await?;
        Ok(response.comments)
    }

    async fn get<T: DeserializeOwned>(
        &self,
        endpoint: &'static str,
        query: &[(&str, String)],
    ) -> Result<T, FedditError> {
        let url = format!("{}/{}", self.base_url, endpoint);
        debug!("GET {} {:?}", url, query);

        let response = self
            .client
            .get(&url)
            .query(query)
            .send()
            .await
            .map_err(|e| FedditError::from_transport(endpoint, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FedditError::Status { endpoint, status });
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| FedditError::from_transport(endpoint, e))?;

        serde_json::from_slice(&body).map_err(|source| FedditError::Decode { endpoint, source })
    }
}
