//! Family profile, grace filter and script selectors

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::GuardianError;

/// Child's emotional state as judged by the parent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GraceLevel {
    #[default]
    Calm,
    Tired,
    Stressed,
    Meltdown,
}

impl GraceLevel {
    pub const ALL: [GraceLevel; 4] = [
        GraceLevel::Calm,
        GraceLevel::Tired,
        GraceLevel::Stressed,
        GraceLevel::Meltdown,
    ];
}

impl FromStr for GraceLevel {
    type Err = GuardianError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "calm" => Ok(GraceLevel::Calm),
            "tired" => Ok(GraceLevel::Tired),
            "stressed" => Ok(GraceLevel::Stressed),
            "meltdown" => Ok(GraceLevel::Meltdown),
            other => Err(GuardianError::InvalidArgument(format!(
                "unknown grace level '{}', expected calm, tired, stressed or meltdown",
                other
            ))),
        }
    }
}

impl std::fmt::Display for GraceLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            GraceLevel::Calm => "Calm",
            GraceLevel::Tired => "Tired",
            GraceLevel::Stressed => "Stressed",
            GraceLevel::Meltdown => "Meltdown",
        };
        write!(f, "{}", name)
    }
}

/// Who is using the dashboard and who they parent with
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FamilyProfile {
    pub parent_role: String,
    pub partner_name: String,
}

impl Default for FamilyProfile {
    fn default() -> Self {
        Self {
            parent_role: "Parent".to_string(),
            partner_name: "Partner".to_string(),
        }
    }
}

impl FamilyProfile {
    pub fn new(parent_role: impl Into<String>, partner_name: impl Into<String>) -> Self {
        Self {
            parent_role: parent_role.into(),
            partner_name: partner_name.into(),
        }
    }

    /// Header line shown under the title
    pub fn caption(&self) -> String {
        format!(
            "Logged in as: {} | Unified Front with: {}",
            self.parent_role, self.partner_name
        )
    }
}

/// Situations covered by the unified-front scripts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnifiedFrontSituation {
    /// Child asking for a 'Yes' after a 'No'
    YesAfterNo,
    /// Disagreement with partner
    PartnerDisagreement,
}

impl UnifiedFrontSituation {
    pub const ALL: [UnifiedFrontSituation; 2] = [
        UnifiedFrontSituation::YesAfterNo,
        UnifiedFrontSituation::PartnerDisagreement,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            UnifiedFrontSituation::YesAfterNo => "Child asking for a 'Yes' after a 'No'",
            UnifiedFrontSituation::PartnerDisagreement => "Disagreement with Partner",
        }
    }
}

/// One knowledge-base principle
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principle {
    pub title: String,
    pub body: String,
}
