//! Advisory Topic Matcher: relationship and co-parenting questions
//!
//! Same contract as the resolver (normalize, safety gate, first-declared
//! topic wins) with a resource citation and a search query on every answer.

use lazy_static::lazy_static;

use crate::core::matcher::{normalize, SafetyGate, TermMatcher};
use crate::core::tables::{DangerLexicon, DANGER_LEXICON, INPUT_PLACEHOLDER};
use crate::types::{Advice, AdviceResult, MatchMode, ResponseTier};
use crate::{Result, SAFETY_MESSAGE};

/// Ordered topic → advice mapping
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TopicTable {
    entries: Vec<(String, Advice)>,
}

impl TopicTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a topic. Empty keys and repeats are ignored.
    pub fn with(mut self, key: &str, tiers: ResponseTier, resource: &str, search_query: &str) -> Self {
        let key = normalize(key);
        if !key.is_empty() && !self.entries.iter().any(|(k, _)| *k == key) {
            self.entries.push((
                key,
                Advice {
                    tiers,
                    resource: resource.to_string(),
                    search_query: search_query.to_string(),
                },
            ));
        }
        self
    }

    /// Topic keys in declaration order
    pub fn topics(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Advice returned when no topic matches. `{input}` is the raw question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DefaultAdvice {
    pub tiers: [String; 3],
    pub resource: String,
    pub search_suffix: String,
}

impl DefaultAdvice {
    fn render(&self, raw: &str) -> Advice {
        let [gentle, firm, consequence] = &self.tiers;
        Advice {
            tiers: ResponseTier::new(
                gentle.replace(INPUT_PLACEHOLDER, raw),
                firm.replace(INPUT_PLACEHOLDER, raw),
                consequence.replace(INPUT_PLACEHOLDER, raw),
            ),
            resource: self.resource.clone(),
            search_query: format!("{} {}", raw.trim(), self.search_suffix),
        }
    }
}

lazy_static! {
    pub static ref ADVISORY_TOPICS: TopicTable = TopicTable::new()
        .with(
            "undermin",
            ResponseTier::new(
                "Support each other in front of the kids now; talk through the difference in private later.",
                "We agreed not to overrule each other in front of them. I need that from you, and you'll get it from me.",
                "If it keeps happening, we sit down this week and write our house rules down together.",
            ),
            "Mom's House, Dad's House - Isolina Ricci",
            "how to stop undermining each other as parents",
        )
        .with(
            "disagree",
            ResponseTier::new(
                "Support your partner in front of the child now. Discuss your different view in private later.",
                "Name the disagreement calmly: 'I see it differently, and I want us to decide together.'",
                "If you can't agree, pick a time-boxed trial of one approach and review it together in a week.",
            ),
            "The Gottman Institute - The Four Horsemen and Their Antidotes",
            "how parents can disagree without fighting in front of kids",
        )
        .with(
            "said no",
            ResponseTier::new(
                "Your other parent already gave you an answer, and I support that. We are a team.",
                "Asking me after hearing no won't change the answer. Let's talk about why it matters to you.",
                "If you keep shopping for a yes, the answer becomes no for the rest of the week.",
            ),
            "Parenting with Love and Logic - Foster Cline & Jim Fay",
            "child asks other parent after hearing no",
        )
        .with(
            "yell",
            ResponseTier::new(
                "I'm sorry I raised my voice. I was feeling frustrated, but that isn't an excuse. Can we try again?",
                "Take ten minutes away, then come back and name what happened without blaming the child.",
                "If it keeps happening, pick one trigger to work on this week and ask your partner to tag in early.",
            ),
            "Peaceful Parent, Happy Kids - Laura Markham",
            "how to repair after yelling at your child",
        )
        .with(
            "lost my cool",
            ResponseTier::new(
                "I'm sorry I raised my voice. I was feeling frustrated, but that isn't an excuse. Can we try again?",
                "Own it out loud: what you did, how it felt for them, what you'll do next time.",
                "Model the repair you expect from them: follow through on the next-time plan and check in tomorrow.",
            ),
            "Peaceful Parent, Happy Kids - Laura Markham",
            "modeling repair after losing your temper with kids",
        )
        .with(
            "custody",
            ResponseTier::new(
                "Keep handoffs short and warm; the kids should never carry messages between homes.",
                "Schedule changes go through the agreed channel in writing, not through the kids.",
                "If the agreement keeps breaking down, bring the pattern to a mediator rather than the children.",
            ),
            "Two Homes, One Childhood - Robert E. Emery",
            "co-parenting custody handoff tips",
        )
        .with(
            "co-parent",
            ResponseTier::new(
                "Lead with what you both want for the kids before getting into who does what.",
                "Keep the conversation about the children's needs, not about the past between you.",
                "If talks keep escalating, move them to a shared calendar or co-parenting app with written records.",
            ),
            "The Co-Parenting Handbook - Karen Bonnell",
            "effective co-parenting communication",
        )
        .with(
            "screen time",
            ResponseTier::new(
                "Agree on the screen rules together before announcing them to the kids.",
                "Whatever you agree on applies in both parents' presence, including your own phones.",
                "Review the plan together monthly; if one of you keeps bending it, reset it in writing.",
            ),
            "American Academy of Pediatrics - Family Media Plan",
            "family media plan screen time rules",
        )
        .with(
            "burnout",
            ResponseTier::new(
                "Tell your partner plainly that your tank is empty and ask for one specific thing.",
                "Protect one block of time this week that is yours, and hold to it.",
                "If the exhaustion doesn't lift, talk to your doctor or a counselor; it's part of parenting well.",
            ),
            "Burnout - Emily Nagoski & Amelia Nagoski",
            "parental burnout recovery",
        );

    pub static ref DEFAULT_ADVICE: DefaultAdvice = DefaultAdvice {
        tiers: [
            "About \"{input}\": start by listening to each other before deciding anything.".to_string(),
            "On \"{input}\", agree on one shared position you can both say out loud to the kids.".to_string(),
            "If \"{input}\" keeps coming up, set a weekly check-in to review how the plan is working.".to_string(),
        ],
        resource: "How to Talk So Kids Will Listen & Listen So Kids Will Talk - Adele Faber & Elaine Mazlish".to_string(),
        search_suffix: "parenting advice".to_string(),
    };
}

/// Parameterized advisory matcher
#[derive(Debug, Clone)]
pub struct AdvisoryMatcher {
    gate: SafetyGate,
    topics: TopicTable,
    matcher: TermMatcher,
    fallback: DefaultAdvice,
}

impl Default for AdvisoryMatcher {
    fn default() -> Self {
        let matcher = TermMatcher::substring(ADVISORY_TOPICS.topics());
        Self {
            gate: SafetyGate::new(TermMatcher::substring(DANGER_LEXICON.terms()), SAFETY_MESSAGE),
            topics: ADVISORY_TOPICS.clone(),
            matcher,
            fallback: DEFAULT_ADVICE.clone(),
        }
    }
}

impl AdvisoryMatcher {
    pub fn new(
        topics: TopicTable,
        lexicon: &DangerLexicon,
        safety_message: &str,
        fallback: DefaultAdvice,
        mode: MatchMode,
    ) -> Result<Self> {
        Ok(Self {
            gate: SafetyGate::for_mode(lexicon.terms(), mode, safety_message)?,
            matcher: TermMatcher::new(topics.topics(), mode)?,
            topics,
            fallback,
        })
    }

    /// Authored topics with the given match mode
    pub fn with_mode(mode: MatchMode) -> Result<Self> {
        Self::new(
            ADVISORY_TOPICS.clone(),
            &DANGER_LEXICON,
            SAFETY_MESSAGE,
            DEFAULT_ADVICE.clone(),
            mode,
        )
    }

    /// Match a relationship question. Caller skips empty input.
    pub fn advise(&self, raw: &str) -> AdviceResult {
        let normalized = normalize(raw);

        let result = if let Some(message) = self.gate.check(&normalized) {
            AdviceResult::SafetyOverride {
                message: message.to_string(),
            }
        } else {
            match self
                .matcher
                .first_match(&normalized)
                .and_then(|i| self.topics.entries.get(i))
            {
                Some((topic, advice)) => AdviceResult::Topic {
                    topic: topic.clone(),
                    advice: advice.clone(),
                },
                None => AdviceResult::DefaultAdvice {
                    advice: self.fallback.render(raw),
                },
            }
        };

        tracing::debug!(reason = result.reason().code(), "advised input");
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ReasonCode;

    #[test]
    fn test_topic_match_carries_resource_and_query() {
        let advisor = AdvisoryMatcher::default();
        let result = advisor.advise("My partner and I DISAGREE about bedtime");
        match result {
            AdviceResult::Topic { topic, advice } => {
                assert_eq!(topic, "disagree");
                assert!(advice.resource.contains("Gottman"));
                assert!(!advice.search_query.is_empty());
            }
            other => panic!("expected topic, got {:?}", other),
        }
    }

    #[test]
    fn test_first_declared_topic_wins() {
        let advisor = AdvisoryMatcher::default();
        // both "disagree" and "co-parent" appear; "disagree" is declared first
        let result = advisor.advise("my co-parent and I disagree");
        assert!(matches!(result, AdviceResult::Topic { ref topic, .. } if topic == "disagree"));
    }

    #[test]
    fn test_safety_gate_applies_to_advice() {
        let advisor = AdvisoryMatcher::default();
        let result = advisor.advise("my ex threatened to hurt the kids during custody");
        assert!(result.is_safety_override());
        assert_eq!(result.reason(), ReasonCode::R101_SAFETY_OVERRIDE);
    }

    #[test]
    fn test_default_advice_interpolates_raw_input() {
        let advisor = AdvisoryMatcher::default();
        let result = advisor.advise(" Grandma spoils them ");
        let advice = result.advice().unwrap();
        assert_eq!(result.reason(), ReasonCode::R152_TOPIC_DEFAULT);
        for tier in advice.tiers.as_array() {
            assert!(tier.contains(" Grandma spoils them "));
        }
        assert_eq!(advice.search_query, "Grandma spoils them parenting advice");
    }

    #[test]
    fn test_with_mode_word_boundary() {
        let advisor = AdvisoryMatcher::with_mode(MatchMode::WordBoundary).unwrap();
        // "undermin" is a stem; it only matches as a substring
        let result = advisor.advise("she undermines me");
        assert_eq!(result.reason(), ReasonCode::R152_TOPIC_DEFAULT);
    }

    #[test]
    fn test_word_boundary_gate_catches_inflections() {
        let advisor = AdvisoryMatcher::with_mode(MatchMode::WordBoundary).unwrap();
        let result = advisor.advise("my ex is hurting the kids");
        assert!(result.is_safety_override());
    }
}
