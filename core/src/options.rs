//! Construction-time configuration for [`Client`](crate::Client).
//!
//! # Design
//! Each option is a deferred mutation of a `ClientConfig`. `Client::new`
//! starts from the defaults, applies the options in order (so a later option
//! overrides an earlier one touching the same field), stops at the first
//! failure, and then copies the result into an immutable `Client`. The
//! `ClientConfig` itself never outlives construction.

use std::fmt;
use std::sync::LazyLock;

use crate::error::OptionError;

/// Address of the Sylabs build service, used when no base URL is supplied.
pub const DEFAULT_BASE_URL: &str = "https://build.sylabs.io/";

/// Shared agent handed to every client that does not bring its own. Clones of
/// an agent share one connection pool.
static DEFAULT_HTTP_CLIENT: LazyLock<ureq::Agent> = LazyLock::new(ureq::Agent::new_with_defaults);

/// Mutable configuration seen by options while a `Client` is being built.
///
/// Only `Client::new` can create one. Custom options receive it through
/// [`ClientOption::new`].
#[non_exhaustive]
pub struct ClientConfig {
    /// Raw base URL. Normalized after all options have been applied.
    pub base_url: String,
    /// Bearer token. Empty means no `Authorization` header.
    pub bearer_token: String,
    /// User agent. Empty means no `User-Agent` header.
    pub user_agent: String,
    /// Transport used by the caller to execute requests.
    pub http_client: ureq::Agent,
}

impl ClientConfig {
    pub(crate) fn new() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            bearer_token: String::new(),
            user_agent: String::new(),
            http_client: DEFAULT_HTTP_CLIENT.clone(),
        }
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("base_url", &self.base_url)
            .field("bearer_token", &redacted(&self.bearer_token))
            .field("user_agent", &self.user_agent)
            .finish_non_exhaustive()
    }
}

pub(crate) fn redacted(token: &str) -> &'static str {
    if token.is_empty() {
        ""
    } else {
        "<redacted>"
    }
}

type ApplyFn = Box<dyn FnOnce(&mut ClientConfig) -> Result<(), OptionError> + Send>;

/// A deferred change to a `ClientConfig`, applied by `Client::new`.
pub struct ClientOption(ApplyFn);

impl ClientOption {
    /// Wrap an arbitrary mutation. Returning an error aborts client
    /// construction with [`ClientError::Option`](crate::ClientError::Option).
    pub fn new<F>(apply: F) -> Self
    where
        F: FnOnce(&mut ClientConfig) -> Result<(), OptionError> + Send + 'static,
    {
        Self(Box::new(apply))
    }

    pub(crate) fn apply(self, config: &mut ClientConfig) -> Result<(), OptionError> {
        (self.0)(config)
    }
}

impl fmt::Debug for ClientOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ClientOption")
    }
}

/// Set the base URL of the build service. Stored as-is and normalized when
/// the client is built.
pub fn opt_base_url(url: impl Into<String>) -> ClientOption {
    let url = url.into();
    ClientOption::new(move |config| {
        config.base_url = url;
        Ok(())
    })
}

/// Set the bearer token sent in the `Authorization` header of each request.
pub fn opt_bearer_token(token: impl Into<String>) -> ClientOption {
    let token = token.into();
    ClientOption::new(move |config| {
        config.bearer_token = token;
        Ok(())
    })
}

/// Set the `User-Agent` header sent with each request.
pub fn opt_user_agent(agent: impl Into<String>) -> ClientOption {
    let agent = agent.into();
    ClientOption::new(move |config| {
        config.user_agent = agent;
        Ok(())
    })
}

/// Replace the default shared agent.
pub fn opt_http_client(agent: ureq::Agent) -> ClientOption {
    ClientOption::new(move |config| {
        config.http_client = agent;
        Ok(())
    })
}
