//! Term matching shared by the resolver, the advisor and the safety gate
//!
//! Input is normalized once (trim + lowercase); terms are tested in their
//! declaration order against the whole normalized string. In `Substring`
//! mode containment is unanchored, so "hit" is found inside "white".
//! The safety gate in `WordBoundary` mode anchors only the start of a term,
//! so inflections ("hurting", "killed") still count as crisis language.

use regex::Regex;

use crate::types::MatchMode;
use crate::Result;

/// Lowercase and strip surrounding whitespace
pub fn normalize(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Ordered list of lowercase terms with a matching strategy
#[derive(Debug, Clone)]
pub struct TermMatcher {
    terms: Vec<String>,
    /// One compiled pattern per term, only in `WordBoundary` mode
    patterns: Option<Vec<Regex>>,
}

impl TermMatcher {
    /// Unanchored substring matcher. Cannot fail.
    pub fn substring<I, S>(terms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            terms: clean_terms(terms),
            patterns: None,
        }
    }

    /// Matcher for the given mode
    pub fn new<I, S>(terms: I, mode: MatchMode) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let terms = clean_terms(terms);
        let patterns = match mode {
            MatchMode::Substring => None,
            MatchMode::WordBoundary => Some(compile(&terms, |t| format!(r"\b{}\b", t))?),
        };
        Ok(Self { terms, patterns })
    }

    /// Terms must start on a word boundary but may run on ("hurt" finds "hurting")
    pub fn leading_boundary<I, S>(terms: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let terms = clean_terms(terms);
        let patterns = compile(&terms, |t| format!(r"\b{}", t))?;
        Ok(Self {
            terms,
            patterns: Some(patterns),
        })
    }

    pub fn mode(&self) -> MatchMode {
        if self.patterns.is_some() {
            MatchMode::WordBoundary
        } else {
            MatchMode::Substring
        }
    }

    /// Index of the first declared term found in `normalized`
    pub fn first_match(&self, normalized: &str) -> Option<usize> {
        match &self.patterns {
            None => self.terms.iter().position(|t| normalized.contains(t.as_str())),
            Some(patterns) => patterns.iter().position(|re| re.is_match(normalized)),
        }
    }

    /// The first declared term found in `normalized`
    pub fn first_term(&self, normalized: &str) -> Option<&str> {
        self.first_match(normalized).map(|i| self.terms[i].as_str())
    }

    pub fn is_match(&self, normalized: &str) -> bool {
        self.first_match(normalized).is_some()
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }
}

fn compile(terms: &[String], pattern: impl Fn(&str) -> String) -> Result<Vec<Regex>> {
    let mut compiled = Vec::with_capacity(terms.len());
    for term in terms {
        compiled.push(Regex::new(&pattern(&regex::escape(term)))?);
    }
    Ok(compiled)
}

/// Lowercased, trimmed, empties dropped (an empty term would match everything)
fn clean_terms<I, S>(terms: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    terms
        .into_iter()
        .map(|t| normalize(t.as_ref()))
        .filter(|t| !t.is_empty())
        .collect()
}

/// Crisis-language check with absolute precedence
#[derive(Debug, Clone)]
pub struct SafetyGate {
    matcher: TermMatcher,
    message: String,
}

impl SafetyGate {
    pub fn new(matcher: TermMatcher, message: impl Into<String>) -> Self {
        Self {
            matcher,
            message: message.into(),
        }
    }

    /// Safety message if any lexicon entry appears in `normalized`
    pub fn check(&self, normalized: &str) -> Option<&str> {
        self.matcher.first_term(normalized).map(|term| {
            tracing::debug!(term, "danger lexicon matched");
            self.message.as_str()
        })
    }

    /// Gate over `terms` for a resolver mode. `WordBoundary` only anchors the
    /// start of each term, never the end.
    pub fn for_mode<I, S>(terms: I, mode: MatchMode, message: impl Into<String>) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let matcher = match mode {
            MatchMode::Substring => TermMatcher::substring(terms),
            MatchMode::WordBoundary => TermMatcher::leading_boundary(terms)?,
        };
        Ok(Self::new(matcher, message))
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}
