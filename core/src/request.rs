//! Outgoing request representation and standard headers.
//!
//! # Design
//! Requests are plain `http::Request` values. The core never executes them;
//! the caller hands them to a transport (usually the `ureq::Agent` carried by
//! the `Client`). Only two headers are ever set here, and only when the
//! corresponding client setting is non-empty.

use http::header::{AUTHORIZATION, USER_AGENT};
use http::request::Builder;

/// A fully-formed outgoing request. An absent body is empty.
pub type Request = http::Request<Vec<u8>>;

/// Authentication scheme sent in `Authorization`. The build service expects
/// it upper-cased.
pub const BEARER_SCHEME: &str = "BEARER";

/// Add `Authorization` and `User-Agent` to `builder`, skipping empty values.
pub(crate) fn with_standard_headers(
    mut builder: Builder,
    auth_token: &str,
    user_agent: &str,
) -> Builder {
    if !auth_token.is_empty() {
        builder = builder.header(AUTHORIZATION, format!("{BEARER_SCHEME} {auth_token}"));
    }
    if !user_agent.is_empty() {
        builder = builder.header(USER_AGENT, user_agent);
    }
    builder
}
