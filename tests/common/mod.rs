#![allow(dead_code)]

use std::sync::{Arc, Mutex, Once};

use async_trait::async_trait;
use mcp_fatsecret::client::auth::{Credential, NonceSource};
use mcp_fatsecret::client::transport::Transport;
use mcp_fatsecret::client::RequestDescriptor;
use mcp_fatsecret::{FatsecretClient, FatsecretError};

pub const BASE_URL: &str = "https://platform.fatsecret.com/rest/server.api";
pub const CONSUMER_KEY: &str = "test-key";
pub const CONSUMER_SECRET: &str = "test-secret";
pub const NONCE: &str = "abcdef";
pub const TIMESTAMP: i64 = 1_700_000_000;

/// Pins the nonce and timestamp so signatures are reproducible.
pub struct FixedNonce {
    pub nonce: String,
    pub timestamp: i64,
}

impl Default for FixedNonce {
    fn default() -> Self {
        Self {
            nonce: NONCE.to_string(),
            timestamp: TIMESTAMP,
        }
    }
}

impl NonceSource for FixedNonce {
    fn nonce(&self) -> String {
        self.nonce.clone()
    }

    fn timestamp(&self) -> i64 {
        self.timestamp
    }
}

/// Answers every request with the same canned body and records what was asked.
pub struct FixtureTransport {
    body: Vec<u8>,
    requests: Mutex<Vec<RequestDescriptor>>,
}

impl FixtureTransport {
    pub fn new(body: &str) -> Arc<Self> {
        Arc::new(Self {
            body: body.as_bytes().to_vec(),
            requests: Mutex::new(Vec::new()),
        })
    }

    pub fn requests(&self) -> Vec<RequestDescriptor> {
        self.requests.lock().unwrap().clone()
    }

    pub fn last_url(&self) -> String {
        self.requests()
            .last()
            .map(|r| r.url().to_string())
            .expect("no request was sent")
    }
}

#[async_trait]
impl Transport for FixtureTransport {
    async fn fetch(&self, request: &RequestDescriptor) -> mcp_fatsecret::Result<Vec<u8>> {
        self.requests.lock().unwrap().push(request.clone());
        Ok(self.body.clone())
    }
}

/// Always fails as if the network were down.
pub struct UnreachableTransport;

#[async_trait]
impl Transport for UnreachableTransport {
    async fn fetch(&self, _request: &RequestDescriptor) -> mcp_fatsecret::Result<Vec<u8>> {
        Err(FatsecretError::transport("connection refused"))
    }
}

pub fn credential() -> Credential {
    Credential::new(CONSUMER_KEY, CONSUMER_SECRET)
}

pub fn client_with(transport: Arc<dyn Transport>) -> FatsecretClient {
    FatsecretClient::with_nonce_source(
        credential(),
        Arc::new(FixedNonce::default()),
        BASE_URL,
        transport,
    )
}

/// Client plus the transport it talks to, replying with `body`.
pub fn fixture_client(body: &str) -> (FatsecretClient, Arc<FixtureTransport>) {
    let transport = FixtureTransport::new(body);
    (client_with(transport.clone()), transport)
}

/// Query parameters of a URL, in the order they appear.
pub fn query_params(url: &str) -> Vec<(String, String)> {
    let query = url.split_once('?').map(|(_, q)| q).unwrap_or_default();
    query
        .split('&')
        .filter(|pair| !pair.is_empty())
        .map(|pair| {
            let (k, v) = pair.split_once('=').unwrap_or((pair, ""));
            (k.to_string(), v.to_string())
        })
        .collect()
}

pub fn query_param(url: &str, key: &str) -> Option<String> {
    query_params(url)
        .into_iter()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v)
}

static LOGGING: Once = Once::new();

pub fn init_test_logging() {
    LOGGING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| "debug".into()),
            )
            .with_test_writer()
            .try_init();
    });
}
