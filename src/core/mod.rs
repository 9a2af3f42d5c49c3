//! Core modules for Guardian 360

pub mod matcher;
pub mod tables;
pub mod resolver;
pub mod advisor;
pub mod wisdom;
pub mod scripts;
pub mod render;
pub mod api;

pub use matcher::{normalize, SafetyGate, TermMatcher};
pub use tables::{DangerLexicon, DefaultTemplates, ResponseTable, Trigger};
pub use resolver::{resolve, Resolver, ResolverConfig};
pub use advisor::{AdvisoryMatcher, DefaultAdvice, TopicTable};
pub use wisdom::{parse_quote_body, QuoteError, QuoteFetcher, FALLBACK_QUOTES};
pub use scripts::{accountability_script, grace_alert, principles, unified_front_script, ScriptSheet};
pub use api::{create_router, run_server, AppState};
