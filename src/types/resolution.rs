//! Resolution results

use serde::{Deserialize, Serialize};

use crate::types::{ReasonCode, ResponseTier};

/// How lexicon entries and triggers are tested against normalized input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchMode {
    /// Unanchored containment: "hit" matches inside "white"
    #[default]
    Substring,
    /// Entry must sit between word boundaries
    WordBoundary,
}

/// Outcome of one resolve call. Exactly one shape per call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ResolutionResult {
    /// Danger lexicon matched; nothing else was consulted
    SafetyOverride { message: String },
    /// First-declared trigger in the audience table matched
    Tiers { trigger: String, tiers: ResponseTier },
    /// No trigger matched; tiers templated from the raw input
    DefaultTiers { tiers: ResponseTier },
}

impl ResolutionResult {
    /// The tiers, if this is not a safety override
    pub fn tiers(&self) -> Option<&ResponseTier> {
        match self {
            ResolutionResult::SafetyOverride { .. } => None,
            ResolutionResult::Tiers { tiers, .. } | ResolutionResult::DefaultTiers { tiers } => {
                Some(tiers)
            }
        }
    }

    pub fn is_safety_override(&self) -> bool {
        matches!(self, ResolutionResult::SafetyOverride { .. })
    }

    /// Matched trigger, only for `Tiers`
    pub fn trigger(&self) -> Option<&str> {
        match self {
            ResolutionResult::Tiers { trigger, .. } => Some(trigger),
            _ => None,
        }
    }

    pub fn reason(&self) -> ReasonCode {
        match self {
            ResolutionResult::SafetyOverride { .. } => ReasonCode::R101_SAFETY_OVERRIDE,
            ResolutionResult::Tiers { .. } => ReasonCode::R102_TRIGGER_MATCHED,
            ResolutionResult::DefaultTiers { .. } => ReasonCode::R103_DEFAULT_FALLBACK,
        }
    }
}
