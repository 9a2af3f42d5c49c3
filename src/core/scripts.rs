//! Fixed scripts: grace alert, accountability repair, unified front, principles

use lazy_static::lazy_static;
use serde::Serialize;

use crate::types::{FamilyProfile, GraceLevel, Principle, UnifiedFrontSituation};

pub const GRACE_ALERT: &str = "GRACE ALERT: The child is over-stimulated. High firmness will likely \
escalate the situation. Prioritize safety and calm breathing first.";

pub const ACCOUNTABILITY_SCRIPT: &str = "I'm sorry I raised my voice. I was feeling frustrated, \
but that isn't an excuse. Can we try again?";

lazy_static! {
    pub static ref PRINCIPLES: Vec<Principle> = vec![
        Principle {
            title: "No Sugar-Coating".to_string(),
            body: "Clarity is kindness. Being vague is confusing.".to_string(),
        },
        Principle {
            title: "Natural Consequences".to_string(),
            body: "Let life teach the lessons that words cannot.".to_string(),
        },
        Principle {
            title: "Non-Binary Thinking".to_string(),
            body: "You can be 100% firm on the rule and 100% soft on the person.".to_string(),
        },
    ];
}

/// Alert for the current grace level, Meltdown only
pub fn grace_alert(level: GraceLevel) -> Option<&'static str> {
    match level {
        GraceLevel::Meltdown => Some(GRACE_ALERT),
        GraceLevel::Calm | GraceLevel::Tired | GraceLevel::Stressed => None,
    }
}

/// Repair script after losing your cool
pub fn accountability_script() -> &'static str {
    ACCOUNTABILITY_SCRIPT
}

/// Unified-front script with the partner's name filled in
pub fn unified_front_script(situation: UnifiedFrontSituation, profile: &FamilyProfile) -> String {
    match situation {
        UnifiedFrontSituation::YesAfterNo => format!(
            "Unified Move: '{} already gave you an answer, and I support that. We are a team.'",
            profile.partner_name
        ),
        UnifiedFrontSituation::PartnerDisagreement => format!(
            "Grace Move: Support {} in front of the child now. Discuss your different view in private later.",
            profile.partner_name
        ),
    }
}

pub fn principles() -> &'static [Principle] {
    &PRINCIPLES
}

/// One unified-front entry in a script sheet
#[derive(Debug, Clone, Serialize)]
pub struct UnifiedFrontEntry {
    pub situation: UnifiedFrontSituation,
    pub title: &'static str,
    pub script: String,
}

/// Every script for a profile and grace level, ready to render or serialize
#[derive(Debug, Clone, Serialize)]
pub struct ScriptSheet {
    pub caption: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grace_alert: Option<&'static str>,
    pub accountability: &'static str,
    pub unified_front: Vec<UnifiedFrontEntry>,
}

impl ScriptSheet {
    pub fn new(profile: &FamilyProfile, grace: GraceLevel) -> Self {
        Self {
            caption: profile.caption(),
            grace_alert: grace_alert(grace),
            accountability: accountability_script(),
            unified_front: UnifiedFrontSituation::ALL
                .iter()
                .map(|&situation| UnifiedFrontEntry {
                    situation,
                    title: situation.title(),
                    script: unified_front_script(situation, profile),
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_meltdown_alerts() {
        for level in GraceLevel::ALL {
            assert_eq!(grace_alert(level).is_some(), level == GraceLevel::Meltdown);
        }
    }

    #[test]
    fn test_unified_front_uses_partner_name() {
        let profile = FamilyProfile::new("Mom", "Jordan");
        let yes_after_no = unified_front_script(UnifiedFrontSituation::YesAfterNo, &profile);
        assert!(yes_after_no.contains("Jordan already gave you an answer"));
        let disagreement =
            unified_front_script(UnifiedFrontSituation::PartnerDisagreement, &profile);
        assert!(disagreement.contains("Support Jordan in front of the child"));
    }

    #[test]
    fn test_sheet_covers_every_situation() {
        let sheet = ScriptSheet::new(&FamilyProfile::default(), GraceLevel::Meltdown);
        assert_eq!(sheet.unified_front.len(), UnifiedFrontSituation::ALL.len());
        assert_eq!(sheet.grace_alert, Some(GRACE_ALERT));
        assert_eq!(sheet.caption, "Logged in as: Parent | Unified Front with: Partner");
    }

    #[test]
    fn test_three_principles() {
        let titles: Vec<&str> = principles().iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, vec!["No Sugar-Coating", "Natural Consequences", "Non-Binary Thinking"]);
    }
}
