//! Wisdom fetcher: one inspirational quote per call, never a visible failure
//!
//! The remote call is bounded twice (client timeout and an outer
//! `tokio::time::timeout`). Every failure is a typed `QuoteError` that maps to
//! a reason code; callers always get a `QuoteOutcome` with a quote in it.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use lazy_static::lazy_static;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use thiserror::Error;

use crate::config::QuoteConfig;
use crate::types::{Quote, QuoteOutcome, ReasonCode};
use crate::Result;

lazy_static! {
    /// Served in rotation whenever the provider cannot be used
    pub static ref FALLBACK_QUOTES: Vec<Quote> = vec![
        Quote::new("Clear is kind. Unclear is unkind.", "Brené Brown"),
        Quote::new(
            "Anyone who does anything to help a child in his life is a hero to me.",
            "Fred Rogers",
        ),
        Quote::new(
            "Children must be taught how to think, not what to think.",
            "Margaret Mead",
        ),
        Quote::new(
            "There can be no keener revelation of a society's soul than the way in which it treats its children.",
            "Nelson Mandela",
        ),
    ];
}

/// Why a remote fetch could not be used
#[derive(Debug, Error)]
pub enum QuoteError {
    #[error("provider did not answer within the timeout")]
    Timeout,

    #[error("network failure: {0}")]
    Network(reqwest::Error),

    #[error("provider returned status {0}")]
    Status(StatusCode),

    #[error("malformed response: {0}")]
    Malformed(String),

    #[error("response carried no quote")]
    Empty,
}

impl QuoteError {
    pub fn reason(&self) -> ReasonCode {
        match self {
            QuoteError::Timeout => ReasonCode::R202_QUOTE_TIMEOUT,
            QuoteError::Network(_) => ReasonCode::R203_QUOTE_NETWORK,
            QuoteError::Status(_) => ReasonCode::R204_QUOTE_STATUS,
            QuoteError::Malformed(_) => ReasonCode::R205_QUOTE_MALFORMED,
            QuoteError::Empty => ReasonCode::R206_QUOTE_EMPTY,
        }
    }
}

impl From<reqwest::Error> for QuoteError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            QuoteError::Timeout
        } else {
            QuoteError::Network(err)
        }
    }
}

/// Provider payload element: `{"q": "...", "a": "..."}`
#[derive(Debug, Deserialize)]
struct ProviderQuote {
    #[serde(alias = "quote", default)]
    q: Option<String>,
    #[serde(alias = "author", default)]
    a: Option<String>,
}

/// Parse a provider body (a JSON list whose first element is the quote)
pub fn parse_quote_body(body: &str) -> std::result::Result<Quote, QuoteError> {
    let items: Vec<ProviderQuote> =
        serde_json::from_str(body).map_err(|e| QuoteError::Malformed(e.to_string()))?;
    let first = items.into_iter().next().ok_or(QuoteError::Empty)?;

    let text = first.q.map(|t| t.trim().to_string()).unwrap_or_default();
    if text.is_empty() {
        return Err(QuoteError::Empty);
    }
    let attribution = first
        .a
        .map(|a| a.trim().to_string())
        .filter(|a| !a.is_empty())
        .unwrap_or_else(|| "Unknown".to_string());

    Ok(Quote::new(text, attribution))
}

/// Quote fetcher with a fixed fallback rotation
#[derive(Debug)]
pub struct QuoteFetcher {
    client: Client,
    endpoint: String,
    timeout: Duration,
    next_fallback: AtomicUsize,
}

impl QuoteFetcher {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self::with_client(client, endpoint, timeout))
    }

    /// Use a prebuilt client (proxy settings, TLS roots, ...)
    pub fn with_client(client: Client, endpoint: impl Into<String>, timeout: Duration) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
            timeout,
            next_fallback: AtomicUsize::new(0),
        }
    }

    pub fn from_config(config: &QuoteConfig) -> Result<Self> {
        Self::new(config.endpoint.clone(), Duration::from_millis(config.timeout_ms))
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Fetch a quote; falls back on any failure
    pub async fn fetch_quote(&self) -> QuoteOutcome {
        match self.try_fetch().await {
            Ok(quote) => {
                tracing::debug!(attribution = %quote.attribution, "quote fetched");
                QuoteOutcome::remote(quote)
            }
            Err(err) => {
                let reason = err.reason();
                tracing::warn!(
                    endpoint = %self.endpoint,
                    reason = reason.code(),
                    error = %err,
                    "quote fetch failed, using fallback"
                );
                QuoteOutcome::fallback(self.fallback_quote(), reason)
            }
        }
    }

    /// Remote fetch only, bounded by the timeout
    pub async fn try_fetch(&self) -> std::result::Result<Quote, QuoteError> {
        tokio::time::timeout(self.timeout, self.request())
            .await
            .map_err(|_| QuoteError::Timeout)?
    }

    async fn request(&self) -> std::result::Result<Quote, QuoteError> {
        let response = self.client.get(&self.endpoint).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(QuoteError::Status(status));
        }
        let body = response.text().await?;
        parse_quote_body(&body)
    }

    /// Next quote from the fallback rotation
    pub fn fallback_quote(&self) -> Quote {
        let i = self.next_fallback.fetch_add(1, Ordering::Relaxed);
        FALLBACK_QUOTES[i % FALLBACK_QUOTES.len()].clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_provider_shape() {
        let quote = parse_quote_body(r#"[{"q": " Be kind. ", "a": "Someone", "h": "<b>"}]"#).unwrap();
        assert_eq!(quote, Quote::new("Be kind.", "Someone"));
    }

    #[test]
    fn test_parse_accepts_long_field_names() {
        let quote = parse_quote_body(r#"[{"quote": "Breathe.", "author": "Coach"}]"#).unwrap();
        assert_eq!(quote.text, "Breathe.");
        assert_eq!(quote.attribution, "Coach");
    }

    #[test]
    fn test_parse_missing_author_is_unknown() {
        let quote = parse_quote_body(r#"[{"q": "Rest."}]"#).unwrap();
        assert_eq!(quote.attribution, "Unknown");
    }

    #[test]
    fn test_parse_failures_are_typed() {
        assert!(matches!(parse_quote_body("[]"), Err(QuoteError::Empty)));
        assert!(matches!(parse_quote_body(r#"[{"q": "  "}]"#), Err(QuoteError::Empty)));
        assert!(matches!(parse_quote_body("<html>"), Err(QuoteError::Malformed(_))));
        assert!(matches!(
            parse_quote_body(r#"{"q": "not a list"}"#),
            Err(QuoteError::Malformed(_))
        ));
    }

    #[test]
    fn test_fallback_rotates_through_fixed_set() {
        let fetcher = QuoteFetcher::new("http://127.0.0.1:9/", Duration::from_millis(100)).unwrap();
        let seen: Vec<Quote> = (0..FALLBACK_QUOTES.len() + 1)
            .map(|_| fetcher.fallback_quote())
            .collect();
        assert_eq!(seen[0], FALLBACK_QUOTES[0]);
        assert_eq!(seen[1], FALLBACK_QUOTES[1]);
        assert_eq!(seen[FALLBACK_QUOTES.len()], FALLBACK_QUOTES[0]);
    }

    #[tokio::test]
    async fn test_unreachable_host_falls_back() {
        let fetcher = QuoteFetcher::new("http://127.0.0.1:9/", Duration::from_millis(500)).unwrap();
        let outcome = fetcher.fetch_quote().await;
        assert!(outcome.reason.is_quote_fallback());
        assert!(FALLBACK_QUOTES.contains(&outcome.quote));
        assert!(!outcome.quote.text.is_empty());
    }
}
