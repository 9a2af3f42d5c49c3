//! Quote types

use serde::{Deserialize, Serialize};

use crate::types::ReasonCode;

/// An inspirational quote and who said it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quote {
    pub text: String,
    pub attribution: String,
}

impl Quote {
    pub fn new(text: impl Into<String>, attribution: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            attribution: attribution.into(),
        }
    }
}

impl std::fmt::Display for Quote {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "\"{}\" - {}", self.text, self.attribution)
    }
}

/// Where a quote came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuoteSource {
    Remote,
    Fallback,
}

/// Result of a quote fetch. Always carries a quote.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuoteOutcome {
    pub quote: Quote,
    pub source: QuoteSource,
    pub reason: ReasonCode,
}

impl QuoteOutcome {
    pub fn remote(quote: Quote) -> Self {
        Self {
            quote,
            source: QuoteSource::Remote,
            reason: ReasonCode::R201_QUOTE_REMOTE,
        }
    }

    pub fn fallback(quote: Quote, reason: ReasonCode) -> Self {
        Self {
            quote,
            source: QuoteSource::Fallback,
            reason,
        }
    }
}
