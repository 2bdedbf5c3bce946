use async_trait::async_trait;
use reqwest::StatusCode;
use serde_json::Value;
use tracing::debug;

use crate::config::PracticumConfig;
use crate::error::PollError;

/// Source of homework review statuses.
#[async_trait]
pub trait HomeworkApi: Send + Sync {
    /// Fetch raw statuses changed since `from_date` (seconds since epoch).
    /// The body's shape is not validated here.
    async fn homework_statuses(&self, from_date: i64) -> Result<Value, PollError>;
}

pub struct PracticumClient {
    client: reqwest::Client,
    endpoint: String,
    token: String,
}

impl PracticumClient {
    pub fn new(config: &PracticumConfig, token: impl Into<String>) -> Result<Self, PollError> {
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .build()
            .map_err(PollError::transport)?;
        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
            token: token.into(),
        })
    }
}

#[async_trait]
impl HomeworkApi for PracticumClient {
    async fn homework_statuses(&self, from_date: i64) -> Result<Value, PollError> {
        debug!("Requesting homework statuses from {} (from_date={})", self.endpoint, from_date);

        let response = self
            .client
            .get(&self.endpoint)
            .header("Authorization", format!("OAuth {}", self.token))
            .query(&[("from_date", from_date)])
            .send()
            .await
            .map_err(PollError::transport)?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(PollError::Endpoint {
                status: status.as_u16(),
                url: self.endpoint.clone(),
            });
        }

        let body = response.bytes().await.map_err(PollError::transport)?;
        serde_json::from_slice(&body)
            .map_err(|e| PollError::malformed(format!("invalid JSON body: {}", e)))
    }
}
