//! Reason codes for resolutions, advice and quote outcomes

use serde::{Deserialize, Serialize};

/// Reason codes attached to every outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[allow(non_camel_case_types)]
pub enum ReasonCode {
    // =========================================================================
    // R1xx: Resolution
    // =========================================================================
    /// Danger lexicon matched, safety message returned
    R101_SAFETY_OVERRIDE,
    /// A trigger from the audience table matched
    R102_TRIGGER_MATCHED,
    /// Nothing matched, templated tiers returned
    R103_DEFAULT_FALLBACK,

    // =========================================================================
    // R15x: Advice
    // =========================================================================
    /// An advisory topic matched
    R151_TOPIC_MATCHED,
    /// No topic matched, generic advice returned
    R152_TOPIC_DEFAULT,

    // =========================================================================
    // R2xx: Quotes
    // =========================================================================
    /// Quote came from the remote provider
    R201_QUOTE_REMOTE,
    /// Provider did not answer in time
    R202_QUOTE_TIMEOUT,
    /// Connection or transport failure
    R203_QUOTE_NETWORK,
    /// Provider answered with a non-success status
    R204_QUOTE_STATUS,
    /// Body was not the expected JSON shape
    R205_QUOTE_MALFORMED,
    /// Body parsed but carried no usable quote
    R206_QUOTE_EMPTY,
}

impl ReasonCode {
    /// Get the code string (for logging)
    pub fn code(&self) -> &'static str {
        match self {
            Self::R101_SAFETY_OVERRIDE => "R101_SAFETY_OVERRIDE",
            Self::R102_TRIGGER_MATCHED => "R102_TRIGGER_MATCHED",
            Self::R103_DEFAULT_FALLBACK => "R103_DEFAULT_FALLBACK",
            Self::R151_TOPIC_MATCHED => "R151_TOPIC_MATCHED",
            Self::R152_TOPIC_DEFAULT => "R152_TOPIC_DEFAULT",
            Self::R201_QUOTE_REMOTE => "R201_QUOTE_REMOTE",
            Self::R202_QUOTE_TIMEOUT => "R202_QUOTE_TIMEOUT",
            Self::R203_QUOTE_NETWORK => "R203_QUOTE_NETWORK",
            Self::R204_QUOTE_STATUS => "R204_QUOTE_STATUS",
            Self::R205_QUOTE_MALFORMED => "R205_QUOTE_MALFORMED",
            Self::R206_QUOTE_EMPTY => "R206_QUOTE_EMPTY",
        }
    }

    /// Get human-readable description
    pub fn description(&self) -> &'static str {
        match self {
            Self::R101_SAFETY_OVERRIDE => "Crisis language detected",
            Self::R102_TRIGGER_MATCHED => "Matched a known behavior",
            Self::R103_DEFAULT_FALLBACK => "No known behavior, generic tiers",
            Self::R151_TOPIC_MATCHED => "Matched a relationship topic",
            Self::R152_TOPIC_DEFAULT => "No known topic, generic advice",
            Self::R201_QUOTE_REMOTE => "Quote from provider",
            Self::R202_QUOTE_TIMEOUT => "Provider timed out, fallback quote",
            Self::R203_QUOTE_NETWORK => "Network failure, fallback quote",
            Self::R204_QUOTE_STATUS => "Provider error status, fallback quote",
            Self::R205_QUOTE_MALFORMED => "Malformed provider response, fallback quote",
            Self::R206_QUOTE_EMPTY => "Empty provider response, fallback quote",
        }
    }

    /// True for quote outcomes that used the fallback set
    pub fn is_quote_fallback(&self) -> bool {
        matches!(
            self,
            Self::R202_QUOTE_TIMEOUT
                | Self::R203_QUOTE_NETWORK
                | Self::R204_QUOTE_STATUS
                | Self::R205_QUOTE_MALFORMED
                | Self::R206_QUOTE_EMPTY
        )
    }
}

impl std::fmt::Display for ReasonCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code(), self.description())
    }
}
