//! Guardian 360: tiered, safety-gated parenting phrase resolver
//!
//! Free text in, three escalating responses out (gentle → firm → consequence),
//! unless the text trips the danger lexicon, in which case a fixed safety
//! message wins over everything else.

pub mod config;
pub mod core;
pub mod error;
pub mod types;

pub use error::{GuardianError, Result};

// =============================================================================
// SAFETY
// =============================================================================

/// Returned verbatim whenever the danger lexicon matches
pub const SAFETY_MESSAGE: &str = "SAFETY FIRST: This sounds like someone may be hurt or in danger. \
Pause the script, make sure everyone is physically safe, and reach out for help now. \
In the US you can call or text 988, or call 911 in an emergency.";

// =============================================================================
// QUOTE FETCHER
// =============================================================================

/// Default quote provider (single-element JSON list of {q, a})
pub const DEFAULT_QUOTE_ENDPOINT: &str = "https://zenquotes.io/api/random";

/// Hard ceiling on a quote fetch (milliseconds)
pub const DEFAULT_QUOTE_TIMEOUT_MS: u64 = 2500;

// =============================================================================
// SESSION
// =============================================================================

/// History entries kept per session before the oldest are dropped
pub const HISTORY_LIMIT: usize = 50;

// =============================================================================
// VERSION
// =============================================================================

pub const VERSION: &str = "1.0.0";
