use async_trait::async_trait;
use reqwest::Client;

use crate::config::ApiConfig;
use crate::error::Result;

use super::{FetchError, StatusSource};

/// Client for the homework status endpoint.
pub struct StatusApiClient {
    client: Client,
    endpoint: String,
    authorization: String,
}

impl StatusApiClient {
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let client = Client::builder().timeout(config.timeout()).build()?;

        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
            authorization: format!("{} {}", config.auth_scheme, config.token),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl StatusSource for StatusApiClient {
    async fn fetch(&self, from_timestamp: i64) -> std::result::Result<serde_json::Value, FetchError> {
        let response = self
            .client
            .get(&self.endpoint)
            .header(reqwest::header::AUTHORIZATION, &self.authorization)
            .query(&[("from_date", from_timestamp)])
            .send()
            .await
            .map_err(|e| FetchError::Request(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status));
        }

        let body = response
            .text()
            .await
            .map_err(|e| FetchError::Request(e.to_string()))?;

        serde_json::from_str(&body).map_err(|e| FetchError::Decode(e.to_string()))
    }
}
