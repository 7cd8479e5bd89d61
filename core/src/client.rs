//! Immutable client configuration and request construction.
//!
//! # Design
//! `Client` is a frozen snapshot of a `ClientConfig`: it has no setters and
//! no interior mutability, so one value can be shared across threads and used
//! for any number of `build_request` calls. Building a request resolves the
//! caller's relative path against the normalized base URL and attaches the
//! standard headers. Executing the request is left to the caller.

use std::borrow::Cow;
use std::fmt;

use tracing::{debug, trace};
use url::Url;

use crate::base_url::normalize;
use crate::error::{ClientError, RequestError};
use crate::options::{redacted, ClientConfig, ClientOption};
use crate::request::{with_standard_headers, Request};

/// Connection details for the build service.
#[derive(Clone)]
pub struct Client {
    base_url: Url,
    auth_token: String,
    user_agent: String,
    http_client: ureq::Agent,
}

impl Client {
    /// Build a client from the defaults plus `options`, applied in order.
    ///
    /// By default the Sylabs build service is used and requests are not
    /// authenticated. Use [`opt_base_url`](crate::opt_base_url) and
    /// [`opt_bearer_token`](crate::opt_bearer_token) to change that.
    pub fn new<I>(options: I) -> Result<Self, ClientError>
    where
        I: IntoIterator<Item = ClientOption>,
    {
        let mut config = ClientConfig::new();
        for option in options {
            option.apply(&mut config)?;
        }

        let base_url = normalize(&config.base_url)?;
        debug!(
            base_url = %base_url,
            authenticated = !config.bearer_token.is_empty(),
            user_agent = !config.user_agent.is_empty(),
            "client configured"
        );

        Ok(Self {
            base_url,
            auth_token: config.bearer_token,
            user_agent: config.user_agent,
            http_client: config.http_client,
        })
    }

    /// Normalized base URL. Its path always ends with `/`.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Bearer token, empty when requests are unauthenticated.
    pub fn auth_token(&self) -> &str {
        &self.auth_token
    }

    /// User agent, empty when the header is omitted.
    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    /// Agent to execute built requests with.
    pub fn http_client(&self) -> &ureq::Agent {
        &self.http_client
    }

    /// Build a request for `path`, relative to the base URL.
    ///
    /// A single leading `/` is ignored, so `/v1/builds` and `v1/builds` name
    /// the same resource. `body` is passed through untouched; no
    /// `Content-Type` or `Content-Length` is added.
    pub fn build_request(
        &self,
        method: &str,
        path: &str,
        body: Option<Vec<u8>>,
    ) -> Result<Request, RequestError> {
        let url = self.resolve(path)?;
        trace!(method, url = %url, "built request");

        let builder = http::Request::builder().method(method).uri(url.as_str());
        let request = with_standard_headers(builder, &self.auth_token, &self.user_agent)
            .body(body.unwrap_or_default())?;
        Ok(request)
    }

    fn resolve(&self, path: &str) -> Result<Url, RequestError> {
        let relative = path.strip_prefix('/').unwrap_or(path);
        self.base_url
            .join(&path_reference(relative))
            .map_err(|source| RequestError::Resolve {
                path: path.to_string(),
                source,
            })
    }
}

impl fmt::Debug for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client")
            .field("base_url", &self.base_url.as_str())
            .field("auth_token", &redacted(&self.auth_token))
            .field("user_agent", &self.user_agent)
            .finish_non_exhaustive()
    }
}

/// Turn a plain path into a relative reference that resolves to exactly that
/// path. Characters the URL parser would drop or read as an escape, query,
/// fragment or separator are percent-encoded. A leading `//` is shielded with
/// `/.` so it cannot name a host, and a colon in the first segment is
/// shielded with `./` so it is not read as a scheme.
fn path_reference(path: &str) -> Cow<'_, str> {
    let escaped = if path.contains(needs_escape) {
        let mut out = String::with_capacity(path.len() + 8);
        for c in path.chars() {
            if needs_escape(c) {
                out.push_str(&format!("%{:02X}", u32::from(c)));
            } else {
                out.push(c);
            }
        }
        Cow::Owned(out)
    } else {
        Cow::Borrowed(path)
    };

    if escaped.starts_with("//") {
        return Cow::Owned(format!("/.{escaped}"));
    }

    let first_segment = escaped.split('/').next().unwrap_or_default();
    if first_segment.contains(':') {
        Cow::Owned(format!("./{escaped}"))
    } else {
        escaped
    }
}

fn needs_escape(c: char) -> bool {
    matches!(c, '%' | '?' | '#' | '\\') || c <= ' ' || c == '\x7f'
}
