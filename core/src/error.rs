//! Error types for the build service client.
//!
//! # Design
//! One error type per stage so callers can tell where things went wrong:
//! `UrlError` for base URL normalization, `OptionError` for a rejected
//! option value, `ClientError` for `Client::new` as a whole, and
//! `RequestError` for a single `build_request` call. Nothing here is retried
//! or logged by the core.

use thiserror::Error;

/// Errors returned by [`normalize`](crate::base_url::normalize).
#[derive(Debug, Error)]
pub enum UrlError {
    /// The string could not be parsed as an absolute URL.
    #[error("malformed URL {url:?}")]
    Malformed {
        url: String,
        #[source]
        source: url::ParseError,
    },

    /// The URL parsed, but its scheme is neither `http` nor `https`.
    #[error("unsupported protocol scheme {scheme:?}")]
    UnsupportedScheme { scheme: String },
}

/// A custom option rejected the value it was given.
#[derive(Debug, Error)]
#[error("{cause}")]
pub struct OptionError {
    cause: Box<dyn std::error::Error + Send + Sync>,
}

impl OptionError {
    pub fn new(cause: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        Self {
            cause: cause.into(),
        }
    }
}

/// Errors returned by [`Client::new`](crate::Client::new).
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("failed to apply client option")]
    Option(#[from] OptionError),

    #[error("invalid base URL")]
    BaseUrl(#[from] UrlError),
}

/// Errors returned by [`Client::build_request`](crate::Client::build_request).
#[derive(Debug, Error)]
pub enum RequestError {
    /// The relative path could not be resolved against the base URL.
    #[error("failed to resolve request path {path:?}")]
    Resolve {
        path: String,
        #[source]
        source: url::ParseError,
    },

    /// The method, URI or a header value was rejected by `http`.
    #[error("failed to construct request")]
    Construct(#[from] http::Error),
}
