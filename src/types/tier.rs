//! Three-step escalation of suggested phrasing

use serde::{Deserialize, Serialize};

/// Ordered triple: gentle redirect, firm boundary, consequence
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResponseTier {
    /// Tier 1 - gentle redirect
    pub gentle: String,
    /// Tier 2 - firm boundary
    pub firm: String,
    /// Tier 3 - consequence / direct line
    pub consequence: String,
}

impl ResponseTier {
    pub fn new(
        gentle: impl Into<String>,
        firm: impl Into<String>,
        consequence: impl Into<String>,
    ) -> Self {
        Self {
            gentle: gentle.into(),
            firm: firm.into(),
            consequence: consequence.into(),
        }
    }

    /// Tiers in escalation order
    pub fn as_array(&self) -> [&str; 3] {
        [&self.gentle, &self.firm, &self.consequence]
    }

    /// Tier by 1-based level, None outside 1..=3
    pub fn level(&self, level: u8) -> Option<&str> {
        match level {
            1 => Some(&self.gentle),
            2 => Some(&self.firm),
            3 => Some(&self.consequence),
            _ => None,
        }
    }
}
