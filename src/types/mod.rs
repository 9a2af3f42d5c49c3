//! Core types for Guardian 360

mod advice;
mod audience;
mod quote;
mod reason;
mod resolution;
mod script;
mod session;
mod tier;

pub use advice::{Advice, AdviceResult};
pub use audience::AudienceCategory;
pub use quote::{Quote, QuoteOutcome, QuoteSource};
pub use reason::ReasonCode;
pub use resolution::{MatchMode, ResolutionResult};
pub use script::{FamilyProfile, GraceLevel, Principle, UnifiedFrontSituation};
pub use session::{HistoryEntry, HistoryKind, SessionEvent, SessionState};
pub use tier::ResponseTier;
