//! The transport seam: send a signed request, get raw bytes back.
//!
//! The client never retries and holds no connection state of its own.
//! [`HttpTransport`] is the production implementation; tests substitute
//! their own.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;

use crate::client::request::RequestDescriptor;
use crate::error::{FatsecretError, Result};

#[async_trait]
pub trait Transport: Send + Sync {
    /// Perform `request` and return the response body.
    async fn fetch(&self, request: &RequestDescriptor) -> Result<Vec<u8>>;
}

/// reqwest-backed transport with a per-request timeout.
#[derive(Clone, Debug)]
pub struct HttpTransport {
    client: Client,
    timeout: Duration,
}

impl HttpTransport {
    pub fn new(timeout: Duration) -> Self {
        Self {
            client: Client::new(),
            timeout,
        }
    }
}

impl Default for HttpTransport {
    fn default() -> Self {
        Self::new(Duration::from_secs(10))
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn fetch(&self, request: &RequestDescriptor) -> Result<Vec<u8>> {
        tracing::debug!("Sending {} request for {}", request.method(), request.api_method());

        let response = self
            .client
            .get(request.url())
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| {
                tracing::error!("Network error calling {}: {}", request.api_method(), e);
                FatsecretError::transport(e)
            })?;

        let status = response.status();
        tracing::debug!("{} response status: {}", request.api_method(), status);

        if !status.is_success() {
            let error_body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unable to read error response".to_string());
            tracing::error!(
                "{} failed with status {}: {}",
                request.api_method(),
                status,
                error_body
            );

            let message = match status.as_u16() {
                400 => format!("Bad request: {error_body}"),
                401 | 403 => "Request rejected: check the consumer key and secret".to_string(),
                404 => "FatSecret endpoint not found. Check FATSECRET_BASE_URL".to_string(),
                500..=599 => format!("FatSecret server error ({status}): {error_body}"),
                _ => format!("Request failed with status {status}: {error_body}"),
            };
            return Err(FatsecretError::transport(message));
        }

        let body = response.bytes().await.map_err(FatsecretError::transport)?;
        Ok(body.to_vec())
    }
}
