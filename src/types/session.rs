//! Session model for the presentation layer
//!
//! A session is an immutable snapshot; every user interaction is an event
//! folded in with `reduce`, which returns the next snapshot:
//! - Resolved / Advised append to history (bounded, oldest dropped)
//! - GraceChanged / ProfileUpdated replace the corresponding field
//! - Cleared empties history, keeps profile and grace level
//!
//! The resolver never sees any of this.

use std::collections::VecDeque;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::types::{
    AdviceResult, AudienceCategory, FamilyProfile, GraceLevel, ReasonCode, ResolutionResult,
};
use crate::HISTORY_LIMIT;

/// What produced a history entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HistoryKind {
    Resolve,
    Advise,
}

/// One logged interaction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub timestamp: DateTime<Utc>,
    pub kind: HistoryKind,
    /// Audience, only for resolve entries
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audience: Option<AudienceCategory>,
    pub input: String,
    pub reason: ReasonCode,
    /// First suggestion shown to the parent (safety message on override)
    pub headline: String,
}

/// Events folded into a session
#[derive(Debug, Clone)]
pub enum SessionEvent {
    Resolved {
        input: String,
        audience: AudienceCategory,
        result: ResolutionResult,
    },
    Advised {
        input: String,
        result: AdviceResult,
    },
    GraceChanged(GraceLevel),
    ProfileUpdated(FamilyProfile),
    Cleared,
}

/// Immutable session snapshot
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionState {
    pub profile: FamilyProfile,
    pub grace: GraceLevel,
    history: VecDeque<HistoryEntry>,
}

impl SessionState {
    pub fn new(profile: FamilyProfile) -> Self {
        Self {
            profile,
            grace: GraceLevel::default(),
            history: VecDeque::new(),
        }
    }

    /// Apply one event and return the next snapshot
    pub fn reduce(self, event: SessionEvent) -> SessionState {
        let mut next = self;
        match event {
            SessionEvent::Resolved {
                input,
                audience,
                result,
            } => {
                let headline = match &result {
                    ResolutionResult::SafetyOverride { message } => message.clone(),
                    ResolutionResult::Tiers { tiers, .. }
                    | ResolutionResult::DefaultTiers { tiers } => tiers.gentle.clone(),
                };
                next.push(HistoryEntry {
                    timestamp: Utc::now(),
                    kind: HistoryKind::Resolve,
                    audience: Some(audience),
                    input,
                    reason: result.reason(),
                    headline,
                });
            }
            SessionEvent::Advised { input, result } => {
                let headline = match &result {
                    AdviceResult::SafetyOverride { message } => message.clone(),
                    AdviceResult::Topic { advice, .. } | AdviceResult::DefaultAdvice { advice } => {
                        advice.tiers.gentle.clone()
                    }
                };
                next.push(HistoryEntry {
                    timestamp: Utc::now(),
                    kind: HistoryKind::Advise,
                    audience: None,
                    input,
                    reason: result.reason(),
                    headline,
                });
            }
            SessionEvent::GraceChanged(level) => next.grace = level,
            SessionEvent::ProfileUpdated(profile) => next.profile = profile,
            SessionEvent::Cleared => next.history.clear(),
        }
        next
    }

    fn push(&mut self, entry: HistoryEntry) {
        self.history.push_back(entry);
        while self.history.len() > HISTORY_LIMIT {
            self.history.pop_front();
        }
    }

    /// History, oldest first
    pub fn history(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.history.iter()
    }

    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    /// Number of safety overrides in the retained history
    pub fn safety_override_count(&self) -> usize {
        self.history
            .iter()
            .filter(|e| e.reason == ReasonCode::R101_SAFETY_OVERRIDE)
            .count()
    }
}
