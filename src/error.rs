//! Error types surfaced by the transport and the cached services.

use serde_json::Value;
use thiserror::Error;

/// Failures a caller of the API layer can observe.
///
/// Throttling (409 cooldowns and 429 rate limits) is retried inside the
/// transport and only shows up here once the retry budget is spent.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Non-retriable response with status >= 400.
    #[error("API error ({status}): {message}")]
    Api {
        status: u16,
        message: String,
        /// The `error` object of the envelope, the whole JSON body when there
        /// is no `error` object, or an empty object when the body is not JSON.
        payload: Value,
    },

    /// The resource stayed on cooldown for every attempt.
    #[error("retry budget exhausted after {attempts} attempts (cooldown)")]
    CooldownExhausted { attempts: u32, payload: Value },

    /// The server kept rate limiting for every attempt.
    #[error("retry budget exhausted after {attempts} attempts (rate limit)")]
    RateLimitExhausted { attempts: u32 },

    /// A successful response that does not carry a usable `data` envelope.
    #[error("malformed response envelope: {0}")]
    Envelope(String),

    /// `data` was present but did not match the expected entity shape.
    #[error("failed to decode response data: {0}")]
    Decode(#[from] serde_json::Error),

    /// The token cannot be used as an HTTP header value.
    #[error("API token contains characters that are not valid in a header")]
    InvalidToken,

    /// Network-level failure before a status code was received.
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
}

impl ApiError {
    /// HTTP status associated with the failure, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Api { status, .. } => Some(*status),
            ApiError::CooldownExhausted { .. } => Some(409),
            ApiError::RateLimitExhausted { .. } => Some(429),
            ApiError::Request(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Structured payload worth showing to a user, if any.
    pub fn payload(&self) -> Option<&Value> {
        match self {
            ApiError::Api { payload, .. } | ApiError::CooldownExhausted { payload, .. } => {
                match payload {
                    Value::Object(map) if map.is_empty() => None,
                    Value::Null => None,
                    other => Some(other),
                }
            }
            _ => None,
        }
    }

    pub fn is_retry_exhausted(&self) -> bool {
        matches!(
            self,
            ApiError::CooldownExhausted { .. } | ApiError::RateLimitExhausted { .. }
        )
    }
}

/// Problems loading or validating the TOML configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to access config file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config file {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },

    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("invalid configuration: {0}")]
    Invalid(String),
}

/// No usable API token could be found.
#[derive(Debug, Error)]
pub enum TokenError {
    #[error("no API token: pass --token, set {env}, or create {file}")]
    Missing { env: &'static str, file: &'static str },

    #[error("failed to read {file}: {source}")]
    Io {
        file: &'static str,
        #[source]
        source: std::io::Error,
    },
}

/// A ship argument that does not name a ship.
#[derive(Debug, Error)]
pub enum ShipLookupError {
    #[error("ship index {index} is out of range ({count} ships)")]
    IndexOutOfRange { index: usize, count: usize },

    #[error(transparent)]
    Api(#[from] ApiError),
}
