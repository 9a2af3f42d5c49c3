//! Terminal and parseable rendering of results
//!
//! Lives outside the resolver: results carry no display logic.

use colored::Colorize;

use crate::core::scripts::ScriptSheet;
use crate::types::{AdviceResult, Principle, QuoteOutcome, ResolutionResult, ResponseTier};

/// Colored, multi-line rendering of a resolution
pub fn resolution_terminal(result: &ResolutionResult) -> String {
    match result {
        ResolutionResult::SafetyOverride { message } => safety_terminal(message),
        ResolutionResult::Tiers { trigger, tiers } => format!(
            "{}\n{}",
            format!("Try saying: (matched \"{}\")", trigger).bold(),
            tiers_terminal(tiers)
        ),
        ResolutionResult::DefaultTiers { tiers } => format!(
            "{}\n{}",
            "Try saying:".bold(),
            tiers_terminal(tiers)
        ),
    }
}

/// Single-line, color-free rendering of a resolution
pub fn resolution_parseable(result: &ResolutionResult) -> String {
    let reason = result.reason().code();
    match result {
        ResolutionResult::SafetyOverride { message } => {
            format!("reason={} | message={}", reason, message)
        }
        ResolutionResult::Tiers { trigger, tiers } => format!(
            "reason={} | trigger={} | {}",
            reason,
            trigger,
            tiers_parseable(tiers)
        ),
        ResolutionResult::DefaultTiers { tiers } => {
            format!("reason={} | {}", reason, tiers_parseable(tiers))
        }
    }
}

pub fn advice_terminal(result: &AdviceResult) -> String {
    match result {
        AdviceResult::SafetyOverride { message } => safety_terminal(message),
        AdviceResult::Topic { advice, .. } | AdviceResult::DefaultAdvice { advice } => {
            let heading = match result {
                AdviceResult::Topic { topic, .. } => format!("Advice: (topic \"{}\")", topic),
                _ => "Advice:".to_string(),
            };
            format!(
                "{}\n{}\n  {} {}\n  {} {}",
                heading.bold(),
                tiers_terminal(&advice.tiers),
                "Read:".cyan(),
                advice.resource,
                "Search:".cyan(),
                advice.search_query
            )
        }
    }
}

pub fn advice_parseable(result: &AdviceResult) -> String {
    let reason = result.reason().code();
    match result {
        AdviceResult::SafetyOverride { message } => {
            format!("reason={} | message={}", reason, message)
        }
        AdviceResult::Topic { advice, .. } | AdviceResult::DefaultAdvice { advice } => format!(
            "reason={} | {} | resource={} | search={}",
            reason,
            tiers_parseable(&advice.tiers),
            advice.resource,
            advice.search_query
        ),
    }
}

pub fn quote_terminal(outcome: &QuoteOutcome) -> String {
    format!(
        "{} {}",
        format!("\"{}\"", outcome.quote.text).italic(),
        format!("- {}", outcome.quote.attribution).dimmed()
    )
}

pub fn quote_parseable(outcome: &QuoteOutcome) -> String {
    format!(
        "reason={} | text={} | attribution={}",
        outcome.reason.code(),
        outcome.quote.text,
        outcome.quote.attribution
    )
}

pub fn scripts_terminal(sheet: &ScriptSheet) -> String {
    let mut lines = vec![sheet.caption.dimmed().to_string()];
    if let Some(alert) = sheet.grace_alert {
        lines.push(alert.red().bold().to_string());
    }
    lines.push(format!("{} '{}'", "Your Script:".bold(), sheet.accountability));
    for entry in &sheet.unified_front {
        lines.push(format!("{} {}", format!("[{}]", entry.title).yellow(), entry.script));
    }
    lines.join("\n")
}

pub fn principles_terminal(principles: &[Principle]) -> String {
    principles
        .iter()
        .map(|p| format!("- {} {}", format!("{}:", p.title).bold(), p.body))
        .collect::<Vec<_>>()
        .join("\n")
}

fn safety_terminal(message: &str) -> String {
    message.red().bold().to_string()
}

fn tiers_terminal(tiers: &ResponseTier) -> String {
    let [gentle, firm, consequence] = tiers.as_array();
    format!(
        "  {} {}\n  {} {}\n  {} {}",
        "1. Gentle:".green(),
        gentle,
        "2. Firm:".yellow(),
        firm,
        "3. Consequence:".red(),
        consequence
    )
}

fn tiers_parseable(tiers: &ResponseTier) -> String {
    format!(
        "tier1={} | tier2={} | tier3={}",
        tiers.gentle, tiers.firm, tiers.consequence
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::resolver::resolve;
    use crate::types::AudienceCategory;

    #[test]
    fn test_parseable_has_reason_and_tiers() {
        let result = resolve("put the phone down", AudienceCategory::Teen);
        let line = resolution_parseable(&result);
        assert!(line.starts_with("reason=R102_TRIGGER_MATCHED"));
        assert!(line.contains("trigger=phone"));
        assert!(line.contains("tier1="));
        assert!(line.contains("tier3="));
        assert!(!line.contains('\n'));
    }

    #[test]
    fn test_terminal_lists_three_tiers() {
        colored::control::set_override(false);
        let result = resolve("They won't stop singing", AudienceCategory::Child);
        let text = resolution_terminal(&result);
        assert!(text.contains("1. Gentle:"));
        assert!(text.contains("2. Firm:"));
        assert!(text.contains("3. Consequence:"));
    }

    #[test]
    fn test_safety_parseable_has_message() {
        let result = resolve("I want to kill myself", AudienceCategory::Teen);
        let line = resolution_parseable(&result);
        assert!(line.starts_with("reason=R101_SAFETY_OVERRIDE"));
        assert!(line.contains("SAFETY FIRST"));
    }
}
