//! Response Resolver: safety gate, then first-declared trigger, then templates
//!
//! Resolution steps:
//! 1. normalize (trim + lowercase); the raw input is kept for templates
//! 2. danger lexicon on the whole normalized string → SafetyOverride
//! 3. audience table in declaration order → Tiers
//! 4. otherwise → DefaultTiers templated from the raw input
//!
//! Total and pure: no I/O, no shared mutable state.

use lazy_static::lazy_static;

use crate::core::matcher::{normalize, SafetyGate, TermMatcher};
use crate::core::tables::{
    DangerLexicon, DefaultTemplates, ResponseTable, CHILD_TABLE, DANGER_LEXICON,
    DEFAULT_TEMPLATES, TEEN_TABLE,
};
use crate::types::{AudienceCategory, MatchMode, ResolutionResult};
use crate::{Result, SAFETY_MESSAGE};

/// Everything a resolver is parameterized by
#[derive(Debug, Clone)]
pub struct ResolverConfig {
    pub child: ResponseTable,
    pub teen: ResponseTable,
    pub lexicon: DangerLexicon,
    pub templates: DefaultTemplates,
    pub safety_message: String,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            child: CHILD_TABLE.clone(),
            teen: TEEN_TABLE.clone(),
            lexicon: DANGER_LEXICON.clone(),
            templates: DEFAULT_TEMPLATES.clone(),
            safety_message: SAFETY_MESSAGE.to_string(),
        }
    }
}

/// One audience's table with its compiled matcher
#[derive(Debug, Clone)]
struct AudienceTable {
    table: ResponseTable,
    matcher: TermMatcher,
}

impl AudienceTable {
    fn new(table: ResponseTable, mode: MatchMode) -> Result<Self> {
        let matcher = TermMatcher::new(table.triggers().map(|t| t.as_str()), mode)?;
        Ok(Self { table, matcher })
    }

    fn substring(table: ResponseTable) -> Self {
        let matcher = TermMatcher::substring(table.triggers().map(|t| t.as_str()));
        Self { table, matcher }
    }
}

/// Parameterized response resolver
#[derive(Debug, Clone)]
pub struct Resolver {
    gate: SafetyGate,
    child: AudienceTable,
    teen: AudienceTable,
    templates: DefaultTemplates,
}

impl Default for Resolver {
    fn default() -> Self {
        Self::substring(ResolverConfig::default())
    }
}

impl Resolver {
    /// Build a resolver; only `WordBoundary` mode can fail (pattern compile)
    pub fn new(config: ResolverConfig, mode: MatchMode) -> Result<Self> {
        let gate = SafetyGate::for_mode(config.lexicon.terms(), mode, config.safety_message)?;
        Ok(Self {
            gate,
            child: AudienceTable::new(config.child, mode)?,
            teen: AudienceTable::new(config.teen, mode)?,
            templates: config.templates,
        })
    }

    /// Unanchored substring resolver
    pub fn substring(config: ResolverConfig) -> Self {
        Self {
            gate: SafetyGate::new(
                TermMatcher::substring(config.lexicon.terms()),
                config.safety_message,
            ),
            child: AudienceTable::substring(config.child),
            teen: AudienceTable::substring(config.teen),
            templates: config.templates,
        }
    }

    /// Resolve free text for an audience. Caller skips empty input.
    pub fn resolve(&self, raw: &str, audience: AudienceCategory) -> ResolutionResult {
        let normalized = normalize(raw);

        let result = if let Some(message) = self.gate.check(&normalized) {
            ResolutionResult::SafetyOverride {
                message: message.to_string(),
            }
        } else {
            let table = self.table(audience);
            match table
                .matcher
                .first_match(&normalized)
                .and_then(|i| table.table.entry(i))
            {
                Some((trigger, tiers)) => ResolutionResult::Tiers {
                    trigger: trigger.as_str().to_string(),
                    tiers: tiers.clone(),
                },
                None => ResolutionResult::DefaultTiers {
                    tiers: self.templates.render(raw),
                },
            }
        };

        tracing::debug!(
            audience = %audience,
            reason = result.reason().code(),
            trigger = result.trigger().unwrap_or("-"),
            "resolved input"
        );
        result
    }

    /// True if the danger lexicon would fire for this input
    pub fn is_dangerous(&self, raw: &str) -> bool {
        self.gate.check(&normalize(raw)).is_some()
    }

    pub fn safety_message(&self) -> &str {
        self.gate.message()
    }

    /// The table consulted for an audience
    pub fn response_table(&self, audience: AudienceCategory) -> &ResponseTable {
        &self.table(audience).table
    }

    fn table(&self, audience: AudienceCategory) -> &AudienceTable {
        match audience {
            AudienceCategory::Child => &self.child,
            AudienceCategory::Teen => &self.teen,
        }
    }
}

lazy_static! {
    static ref DEFAULT_RESOLVER: Resolver = Resolver::default();
}

/// Resolve against the authored tables with substring matching
pub fn resolve(raw: &str, audience: AudienceCategory) -> ResolutionResult {
    DEFAULT_RESOLVER.resolve(raw, audience)
}
