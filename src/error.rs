//! Error types for the FatSecret client.
//!
//! Every fallible operation in the crate returns [`FatsecretError`]. Optional
//! fields that fail to parse are *not* errors: the normalizer records them as
//! absent and carries on with the rest of the record.

/// Boxed error used for opaque transport failures.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

pub type Result<T> = std::result::Result<T, FatsecretError>;

#[derive(Debug, thiserror::Error)]
pub enum FatsecretError {
    /// The HMAC-SHA1 primitive could not be initialised with the derived key.
    #[error("Failed to sign request: {0}")]
    Signing(String),

    /// Passed through from the transport collaborator. Never retried.
    #[error("Transport error: {0}")]
    Transport(#[source] BoxError),

    /// The service answered with its `{"error": {...}}` envelope.
    #[error("FatSecret API error {code}: {message}")]
    Api { code: i64, message: String },

    /// The payload is not JSON, or a top-level key the operation needs is missing.
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    /// A mandatory id/name/type field is missing or unparsable.
    #[error("Missing identity field `{field}` on {record}")]
    IdentityFieldMissing {
        record: &'static str,
        field: &'static str,
    },

    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl FatsecretError {
    pub fn transport<E>(err: E) -> Self
    where
        E: Into<BoxError>,
    {
        FatsecretError::Transport(err.into())
    }

    pub fn malformed(message: impl Into<String>) -> Self {
        FatsecretError::MalformedResponse(message.into())
    }

    /// Short message suitable for tool results shown to end users.
    pub fn user_message(&self) -> String {
        match self {
            FatsecretError::Signing(_) => "Request could not be signed".to_string(),
            FatsecretError::Transport(_) => {
                "FatSecret is unreachable or returned an HTTP error".to_string()
            }
            FatsecretError::Api { message, .. } => message.clone(),
            FatsecretError::MalformedResponse(_) => {
                "FatSecret returned an unexpected response".to_string()
            }
            FatsecretError::IdentityFieldMissing { record, .. } => {
                format!("FatSecret returned an incomplete {record}")
            }
            FatsecretError::Configuration(msg) => msg.clone(),
        }
    }
}
