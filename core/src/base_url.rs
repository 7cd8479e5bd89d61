//! Base URL normalization.
//!
//! A base URL is resolved against with RFC 3986 reference resolution, which
//! replaces the last path segment of the base. `https://example.com/api`
//! joined with `v1/builds` would therefore lose `api`. `normalize` makes sure
//! the path always ends with `/` so every segment of the base survives.

use url::Url;

use crate::error::UrlError;

const SUPPORTED_SCHEMES: [&str; 2] = ["http", "https"];

/// Parse `raw` as an absolute `http`/`https` URL whose path ends with `/`.
pub fn normalize(raw: &str) -> Result<Url, UrlError> {
    let mut url = Url::parse(raw).map_err(|source| UrlError::Malformed {
        url: raw.to_string(),
        source,
    })?;

    // The parser lowercases schemes, so match against what the caller wrote.
    let scheme = raw_scheme(raw).unwrap_or(url.scheme());
    if !SUPPORTED_SCHEMES.contains(&scheme) {
        return Err(UrlError::UnsupportedScheme {
            scheme: scheme.to_string(),
        });
    }

    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }

    Ok(url)
}

/// The scheme as written in `raw`, ignoring the leading whitespace and control
/// characters the URL parser strips.
fn raw_scheme(raw: &str) -> Option<&str> {
    raw.trim_start_matches(|c: char| c <= ' ')
        .split_once(':')
        .map(|(scheme, _)| scheme)
}
