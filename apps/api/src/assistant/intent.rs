//! Intent classification: an ordered keyword rule table over the lowercased message.
//!
//! Rules are evaluated top to bottom and the first match wins. The order is part of
//! the observable contract: "tell me about your skills and projects" is a skills
//! question because skills are checked before projects, and "hire me" opens with
//! "hi" so it is a greeting. Do not reorder.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    Greeting,
    Skills,
    Experience,
    Projects,
    Education,
    Contact,
    About,
    Help,
    /// Nothing matched. Answered with the help menu.
    Fallback,
}

/// How a rule tests the lowercased, trimmed message.
#[derive(Debug, Clone, Copy)]
pub enum Matcher {
    StartsWith(&'static [&'static str]),
    Contains(&'static [&'static str]),
}

impl Matcher {
    pub fn matches(&self, lowered: &str) -> bool {
        match self {
            Matcher::StartsWith(prefixes) => prefixes.iter().any(|p| lowered.starts_with(p)),
            Matcher::Contains(needles) => needles.iter().any(|n| lowered.contains(n)),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct IntentRule {
    pub intent: Intent,
    pub matcher: Matcher,
}

pub const RULES: &[IntentRule] = &[
    IntentRule {
        intent: Intent::Greeting,
        matcher: Matcher::StartsWith(&["hi", "hello", "hey", "greetings"]),
    },
    IntentRule {
        intent: Intent::Skills,
        matcher: Matcher::Contains(&["skill", "technology", "tech stack"]),
    },
    IntentRule {
        intent: Intent::Experience,
        matcher: Matcher::Contains(&["experience", "work", "job"]),
    },
    IntentRule {
        intent: Intent::Projects,
        matcher: Matcher::Contains(&["project"]),
    },
    IntentRule {
        intent: Intent::Education,
        matcher: Matcher::Contains(&["education", "degree", "college", "study", "university"]),
    },
    IntentRule {
        intent: Intent::Contact,
        matcher: Matcher::Contains(&["contact", "email", "phone", "reach", "hire"]),
    },
    IntentRule {
        intent: Intent::About,
        matcher: Matcher::Contains(&["about", "who", "introduce", "bio"]),
    },
    IntentRule {
        intent: Intent::Help,
        matcher: Matcher::Contains(&["help", "what can"]),
    },
];

/// Classifies a raw user message. Blank input is treated as a request for help.
pub fn classify(message: &str) -> Intent {
    let lowered = message.trim().to_lowercase();
    if lowered.is_empty() {
        return Intent::Help;
    }
    RULES
        .iter()
        .find(|rule| rule.matcher.matches(&lowered))
        .map(|rule| rule.intent)
        .unwrap_or(Intent::Fallback)
}
