//! Client configuration and request construction for the Sylabs build service.
//!
//! # Overview
//! Builds `http::Request` values addressed to the build service without
//! touching the network. The caller executes them, normally with the
//! `ureq::Agent` carried by the `Client`.
//!
//! # Design
//! - `Client::new` applies a sequence of `ClientOption`s to a default
//!   `ClientConfig`, normalizes the base URL and freezes the result.
//! - The base URL path always ends with `/`, so relative paths extend it
//!   instead of replacing its last segment.
//! - `Client::build_request` adds `Authorization: BEARER <token>` and
//!   `User-Agent` when they are configured, and nothing else.
//!
//! ```
//! use build_client::{opt_base_url, opt_bearer_token, Client};
//!
//! let client = Client::new([
//!     opt_base_url("https://example.com/api"),
//!     opt_bearer_token("abc123"),
//! ])?;
//! let req = client.build_request("GET", "/v1/builds", None)?;
//! assert_eq!(req.uri(), "https://example.com/api/v1/builds");
//! assert_eq!(req.headers()["authorization"], "BEARER abc123");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod base_url;
pub mod client;
pub mod error;
pub mod options;
pub mod request;

pub use base_url::normalize;
pub use client::Client;
pub use error::{ClientError, OptionError, RequestError, UrlError};
pub use options::{
    opt_base_url, opt_bearer_token, opt_http_client, opt_user_agent, ClientConfig, ClientOption,
    DEFAULT_BASE_URL,
};
pub use request::{Request, BEARER_SCHEME};
