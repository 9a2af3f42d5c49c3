//! Audience categories

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::GuardianError;

/// Which response table a resolution consults
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AudienceCategory {
    /// Younger kids: short, concrete redirects
    Child,
    /// Teenagers: no sugar-coating, focus on respect
    Teen,
}

impl AudienceCategory {
    /// All categories, in display order
    pub const ALL: [AudienceCategory; 2] = [AudienceCategory::Child, AudienceCategory::Teen];
}

impl FromStr for AudienceCategory {
    type Err = GuardianError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "child" | "kid" => Ok(AudienceCategory::Child),
            "teen" | "teenager" => Ok(AudienceCategory::Teen),
            other => Err(GuardianError::InvalidArgument(format!(
                "unknown audience '{}', expected 'child' or 'teen'",
                other
            ))),
        }
    }
}

impl std::fmt::Display for AudienceCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            AudienceCategory::Child => "Child",
            AudienceCategory::Teen => "Teen",
        };
        write!(f, "{}", name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!("CHILD".parse::<AudienceCategory>().unwrap(), AudienceCategory::Child);
        assert_eq!(" Teen ".parse::<AudienceCategory>().unwrap(), AudienceCategory::Teen);
        assert_eq!("teenager".parse::<AudienceCategory>().unwrap(), AudienceCategory::Teen);
    }

    #[test]
    fn test_unknown_audience_is_invalid_argument() {
        let err = "toddler".parse::<AudienceCategory>().unwrap_err();
        assert!(matches!(err, GuardianError::InvalidArgument(_)));
        assert!(err.to_string().contains("toddler"));
    }

    #[test]
    fn test_serde_uses_snake_case() {
        let json = serde_json::to_string(&AudienceCategory::Teen).unwrap();
        assert_eq!(json, "\"teen\"");
        let back: AudienceCategory = serde_json::from_str("\"child\"").unwrap();
        assert_eq!(back, AudienceCategory::Child);
    }
}
