//! Advisory (relationship / co-parenting) results

use serde::{Deserialize, Serialize};

use crate::types::{ReasonCode, ResponseTier};

/// Canned advice for one topic
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Advice {
    pub tiers: ResponseTier,
    /// Book, article or program worth reading
    pub resource: String,
    /// Query string for an external lookup
    pub search_query: String,
}

/// Outcome of one advise call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum AdviceResult {
    /// Danger lexicon matched
    SafetyOverride { message: String },
    /// First-declared topic matched
    Topic { topic: String, advice: Advice },
    /// No topic matched
    DefaultAdvice { advice: Advice },
}

impl AdviceResult {
    pub fn advice(&self) -> Option<&Advice> {
        match self {
            AdviceResult::SafetyOverride { .. } => None,
            AdviceResult::Topic { advice, .. } | AdviceResult::DefaultAdvice { advice } => {
                Some(advice)
            }
        }
    }

    pub fn is_safety_override(&self) -> bool {
        matches!(self, AdviceResult::SafetyOverride { .. })
    }

    pub fn reason(&self) -> ReasonCode {
        match self {
            AdviceResult::SafetyOverride { .. } => ReasonCode::R101_SAFETY_OVERRIDE,
            AdviceResult::Topic { .. } => ReasonCode::R151_TOPIC_MATCHED,
            AdviceResult::DefaultAdvice { .. } => ReasonCode::R152_TOPIC_DEFAULT,
        }
    }
}
