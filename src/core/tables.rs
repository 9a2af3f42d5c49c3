//! Authored response tables, danger lexicon and fallback templates
//!
//! Declaration order inside a table is match priority: the first trigger
//! found in the input wins, so reorder with care.

use lazy_static::lazy_static;

use crate::core::matcher::normalize;
use crate::types::ResponseTier;

/// Lowercase substring key
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Trigger(String);

impl Trigger {
    pub fn new(key: &str) -> Self {
        Self(normalize(key))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Trigger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Ordered trigger → tiers mapping for one audience
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResponseTable {
    entries: Vec<(Trigger, ResponseTier)>,
}

impl ResponseTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a trigger. Empty keys and repeats of an earlier key are ignored.
    pub fn with(mut self, key: &str, tiers: ResponseTier) -> Self {
        let trigger = Trigger::new(key);
        if !trigger.as_str().is_empty() && self.get(trigger.as_str()).is_none() {
            self.entries.push((trigger, tiers));
        }
        self
    }

    pub fn get(&self, key: &str) -> Option<&ResponseTier> {
        self.entries
            .iter()
            .find(|(t, _)| t.as_str() == key)
            .map(|(_, tiers)| tiers)
    }

    /// Entry by declaration index
    pub fn entry(&self, index: usize) -> Option<(&Trigger, &ResponseTier)> {
        self.entries.get(index).map(|(t, tiers)| (t, tiers))
    }

    /// Triggers in declaration order
    pub fn triggers(&self) -> impl Iterator<Item = &Trigger> {
        self.entries.iter().map(|(t, _)| t)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Crisis substrings; audience-independent
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DangerLexicon {
    terms: Vec<String>,
}

impl DangerLexicon {
    pub fn new<I, S>(terms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut lexicon = Self::default();
        for term in terms {
            let term = normalize(term.as_ref());
            if !term.is_empty() && !lexicon.terms.contains(&term) {
                lexicon.terms.push(term);
            }
        }
        lexicon
    }

    pub fn terms(&self) -> impl Iterator<Item = &str> {
        self.terms.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }
}

/// Placeholder replaced by the caller's raw input
pub const INPUT_PLACEHOLDER: &str = "{input}";

/// Sentences used when no trigger matches
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DefaultTemplates {
    pub gentle: String,
    pub firm: String,
    pub consequence: String,
}

impl DefaultTemplates {
    /// Interpolate the raw (not normalized) input into every tier
    pub fn render(&self, raw: &str) -> ResponseTier {
        ResponseTier::new(
            self.gentle.replace(INPUT_PLACEHOLDER, raw),
            self.firm.replace(INPUT_PLACEHOLDER, raw),
            self.consequence.replace(INPUT_PLACEHOLDER, raw),
        )
    }
}

impl Default for DefaultTemplates {
    fn default() -> Self {
        DEFAULT_TEMPLATES.clone()
    }
}

lazy_static! {
    // =========================================================================
    // Child: short, concrete, body-focused
    // =========================================================================
    pub static ref CHILD_TABLE: ResponseTable = ResponseTable::new()
        .with("running", ResponseTier::new(
            "Remember we walk when indoors.",
            "Walking feet inside. If you need to run, we can go outside after this.",
            "If you keep running inside, we will sit together until your body is calm.",
        ))
        .with("hit", ResponseTier::new(
            "Hitting is not allowed. Hands are for helping.",
            "I will not let you hit. I'm going to hold your hands until they are safe.",
            "Your hands aren't safe right now, so play time is over and we'll take a break together.",
        ))
        .with("quiet", ResponseTier::new(
            "Use your indoor voice please?",
            "That voice is too loud for inside. Show me your indoor voice.",
            "If the loud voice keeps going, we'll leave the room until you're ready to be quieter.",
        ))
        .with("crying", ResponseTier::new(
            "I can see you are having a hard time. I'm here to help you.",
            "It's okay to be upset. When you're ready, take a big breath with me and tell me what you need.",
            "I'll stay right here. We won't do the next thing until your body is calm, and that's okay.",
        ))
        .with("touch", ResponseTier::new(
            "Let's keep our hands to ourselves for now.",
            "Their body, their choice. Hands stay on your own body.",
            "If you touch them again, you'll play on your own for a while.",
        ))
        .with("dessert", ResponseTier::new(
            "We can have dessert after we finish dinner.",
            "The answer is still no dessert before dinner. Dinner comes first.",
            "If we keep arguing about it, there won't be dessert tonight.",
        ));

    // =========================================================================
    // Teen: no sugar-coating, focus on respect
    // =========================================================================
    pub static ref TEEN_TABLE: ResponseTable = ResponseTable::new()
        .with("phone", ResponseTier::new(
            "Let's put the phones away for dinner?",
            "Phones go in the basket during dinner. That includes mine.",
            "If the phone comes back to the table, you lose [privilege] for the evening.",
        ))
        .with("room", ResponseTier::new(
            "We need to get this room clean. Do you need some help?",
            "The room needs to be done by Saturday noon. That isn't up for debate.",
            "If it isn't done by then, [privilege] waits until it is.",
        ))
        .with("talk back", ResponseTier::new(
            "Let us talk in a manner that is respectful. Keep in mind that I am still your parent.",
            "I'm willing to hear you out, but not in that tone. Try again.",
            "This conversation is over until we can both speak respectfully. We'll try again in an hour.",
        ))
        .with("late", ResponseTier::new(
            "Coming home past curfew is unacceptable for your safety. How can we make sure it doesn't happen next time?",
            "Curfew is there for your safety. Next time you call before you're late, not after.",
            "Because you came home late, you'll be home an hour earlier next weekend.",
        ))
        .with("curfew", ResponseTier::new(
            "Let's talk about curfew. What got in the way tonight?",
            "Curfew isn't negotiated on the night. If you want it changed, bring it up on a calm day.",
            "Missing curfew means no going out next weekend. You can earn the time back.",
        ))
        .with("disrespect", ResponseTier::new(
            "That came across as disrespectful. Want to try that again?",
            "You can disagree with me, but you can't disrespect me.",
            "We'll pick this up when you're ready to be respectful. Until then, [privilege] is on hold.",
        ));

    // =========================================================================
    // Danger lexicon: checked before any table
    // =========================================================================
    pub static ref DANGER_LEXICON: DangerLexicon = DangerLexicon::new([
        "hurt", "kill", "suicide", "suicidal", "abuse", "hit", "self-harm", "weapon",
    ]);

    pub static ref DEFAULT_TEMPLATES: DefaultTemplates = DefaultTemplates {
        gentle: "I noticed \"{input}\". Let's pause, take a breath, and find a better way together.".to_string(),
        firm: "About \"{input}\": the expectation hasn't changed, and I'm here to help you meet it.".to_string(),
        consequence: "If \"{input}\" keeps happening, the consequence we agreed on will follow.".to_string(),
    };
}
