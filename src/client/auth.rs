//! OAuth 1.0a request signing for the FatSecret REST API.
//!
//! FatSecret authenticates every call with a two-legged OAuth 1.0a
//! signature: there is no token exchange, only the consumer key and
//! secret issued to the application. Each request carries a fresh nonce
//! and timestamp, so signatures are never reused between calls.
//!
//! ## Signature
//!
//! ```text
//! base   = METHOD & encode(base_url) & encode(canonical(params))
//! key    = encode(consumer_secret) & ""
//! sig    = encode(base64(HMAC-SHA1(key, base)))
//! ```
//!
//! For a fixed nonce and timestamp [`OAuthSigner::sign`] is a pure function
//! of its inputs. Tests supply a [`NonceSource`] to pin both.

use std::fmt;
use std::sync::Arc;

use base64::{engine::general_purpose, Engine as _};
use hmac::{Hmac, Mac};
use rand::Rng;
use sha1::Sha1;

use crate::client::encoding::{encode, ParameterSet};
use crate::error::{FatsecretError, Result};

type HmacSha1 = Hmac<Sha1>;

pub const SIGNATURE_METHOD: &str = "HMAC-SHA1";
pub const OAUTH_VERSION: &str = "1.0";
pub const RESPONSE_FORMAT: &str = "json";

/// Consumer key and secret issued by FatSecret.
///
/// Set once at construction and never mutated, so it can be shared freely
/// between concurrent requests.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential {
    consumer_key: String,
    consumer_secret: String,
}

impl Credential {
    pub fn new(consumer_key: impl Into<String>, consumer_secret: impl Into<String>) -> Self {
        Self {
            consumer_key: consumer_key.into(),
            consumer_secret: consumer_secret.into(),
        }
    }

    pub fn consumer_key(&self) -> &str {
        &self.consumer_key
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credential")
            .field("consumer_key", &self.consumer_key)
            .field("consumer_secret", &"<redacted>")
            .finish()
    }
}

/// Per-request entropy: the OAuth nonce and timestamp.
pub trait NonceSource: Send + Sync {
    /// A short token of lowercase ASCII letters, at least two characters long.
    fn nonce(&self) -> String;

    /// Seconds since the Unix epoch.
    fn timestamp(&self) -> i64 {
        chrono::Utc::now().timestamp()
    }
}

/// Thread-local RNG nonces of 2 to 9 lowercase letters.
#[derive(Clone, Copy, Debug, Default)]
pub struct RandomNonce;

impl NonceSource for RandomNonce {
    fn nonce(&self) -> String {
        let mut rng = rand::thread_rng();
        let len = rng.gen_range(2..10);
        (0..len).map(|_| rng.gen_range(b'a'..=b'z') as char).collect()
    }
}

/// Signs request parameter sets with the application's consumer secret.
#[derive(Clone)]
pub struct OAuthSigner {
    credential: Credential,
    nonce_source: Arc<dyn NonceSource>,
}

impl OAuthSigner {
    pub fn new(credential: Credential) -> Self {
        Self::with_nonce_source(credential, Arc::new(RandomNonce))
    }

    pub fn with_nonce_source(credential: Credential, nonce_source: Arc<dyn NonceSource>) -> Self {
        Self {
            credential,
            nonce_source,
        }
    }

    /// The OAuth and format parameters every call starts from.
    ///
    /// Draws a fresh nonce and timestamp on each call.
    pub fn oauth_params(&self) -> ParameterSet {
        let mut params = ParameterSet::new();
        params
            .insert("oauth_consumer_key", self.credential.consumer_key.as_str())
            .insert("oauth_signature_method", SIGNATURE_METHOD)
            .insert("oauth_timestamp", self.nonce_source.timestamp().to_string())
            .insert("oauth_nonce", self.nonce_source.nonce())
            .insert("oauth_version", OAUTH_VERSION)
            .insert("format", RESPONSE_FORMAT);
        params
    }

    /// `METHOD&encode(url)&encode(canonical params)`.
    pub fn signature_base_string(http_method: &str, base_url: &str, params: &ParameterSet) -> String {
        format!(
            "{}&{}&{}",
            http_method,
            encode(base_url),
            encode(&params.canonicalize())
        )
    }

    /// Compute the percent-encoded `oauth_signature` value for `params`.
    ///
    /// `params` must already hold every parameter that will be sent, apart
    /// from `oauth_signature` itself.
    pub fn sign(&self, http_method: &str, base_url: &str, params: &ParameterSet) -> Result<String> {
        let text = Self::signature_base_string(http_method, base_url, params);
        let key = format!("{}&", encode(&self.credential.consumer_secret));

        let mut mac = HmacSha1::new_from_slice(key.as_bytes())
            .map_err(|e| FatsecretError::Signing(format!("Invalid HMAC-SHA1 key: {e}")))?;
        mac.update(text.as_bytes());
        let digest = mac.finalize().into_bytes();

        Ok(encode(&general_purpose::STANDARD.encode(digest)))
    }
}

impl fmt::Debug for OAuthSigner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OAuthSigner")
            .field("credential", &self.credential)
            .finish_non_exhaustive()
    }
}
