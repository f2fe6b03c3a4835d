//! Fetching pages over HTTP and decoding their charset

use std::borrow::Cow;
use std::sync::LazyLock;
use std::time::Duration;

use encoding_rs::{Encoding, UTF_8};
use regex::Regex;
use url::Url;

use crate::error::LoadError;

/// How far into a document to look for a `<meta>` charset declaration
const META_SNIFF_LIMIT: usize = 1024;

static META_CHARSET_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<meta[^>]+charset\s*=\s*["']?\s*([\w\-:.]+)"#)
        .expect("meta charset pattern is valid")
});

/// Settings for loading a document from a URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchConfig {
    /// Sent as the `User-Agent` header, the client default otherwise
    pub user_agent: Option<String>,
    /// Whole-request timeout, unlimited when `None`
    pub timeout: Option<Duration>,
    /// Decode using the declared charset instead of assuming UTF-8
    pub detect_charset: bool,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            user_agent: None,
            timeout: None,
            detect_charset: true,
        }
    }
}

/// Fetch a page (using ureq) and return it decoded to UTF-8
pub fn fetch_blocking(url: &str, config: &FetchConfig) -> Result<String, LoadError> {
    let parsed = Url::parse(url)?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(LoadError::UnsupportedScheme(parsed.scheme().to_string()));
    }

    // A fresh agent per fetch, its cookie jar only spans this redirect chain
    let agent = ureq::Agent::new_with_config(
        ureq::Agent::config_builder()
            .timeout_global(config.timeout)
            .build(),
    );

    let mut request = agent.get(parsed.as_str());
    if let Some(user_agent) = &config.user_agent {
        request = request.header("User-Agent", user_agent.as_str());
    }

    tracing::debug!(url = %parsed, timeout = ?config.timeout, "fetching document");
    let response = request.call()?;

    let content_type = response
        .headers()
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .map(String::from);
    let body = response.into_body().read_to_vec()?;

    Ok(decode(&body, content_type.as_deref(), config.detect_charset).into_owned())
}

/// Decode raw document bytes.
///
/// With `detect` the encoding is taken from the `Content-Type` charset, then
/// from a `<meta>` declaration near the top of the document, then from a BOM,
/// falling back to UTF-8. Without it the bytes are read as UTF-8.
pub fn decode<'a>(bytes: &'a [u8], content_type: Option<&str>, detect: bool) -> Cow<'a, str> {
    if !detect {
        return String::from_utf8_lossy(bytes);
    }

    let label = content_type
        .and_then(charset_from_content_type)
        .or_else(|| charset_from_meta(bytes));

    let encoding = match label {
        Some(label) => Encoding::for_label(label.as_bytes()).unwrap_or_else(|| {
            tracing::warn!(charset = %label, "unknown charset, decoding as utf-8");
            UTF_8
        }),
        None => UTF_8,
    };

    let (text, used, had_errors) = encoding.decode(bytes);
    if had_errors {
        tracing::warn!(encoding = used.name(), "document contains malformed sequences");
    }
    text
}

/// `charset` parameter of a `Content-Type` header value
fn charset_from_content_type(content_type: &str) -> Option<String> {
    content_type.split(';').skip(1).find_map(|part| {
        let (key, value) = part.split_once('=')?;
        if key.trim().eq_ignore_ascii_case("charset") {
            let value = value.trim().trim_matches('"').trim_matches('\'');
            (!value.is_empty()).then(|| value.to_string())
        } else {
            None
        }
    })
}

/// Charset declared by a `<meta>` tag in the head of the document
fn charset_from_meta(bytes: &[u8]) -> Option<String> {
    let head = String::from_utf8_lossy(&bytes[..bytes.len().min(META_SNIFF_LIMIT)]);
    META_CHARSET_RE
        .captures(&head)
        .map(|caps| caps[1].to_string())
}
