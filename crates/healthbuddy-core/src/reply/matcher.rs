//! Local keyword reply matcher.
//!
//! A stateless, deterministic fallback: the utterance is lowercased
//! and tested against an ordered rule table; the first rule with a
//! matching keyword wins. The order of `RULES` is part of the contract
//! (e.g. a clinic question mentioning fever still routes to the clinic
//! reply), so the table stays an ordered slice, never a lookup map.

/// Reply key used when no rule matches.
pub const FALLBACK_REPLY_KEY: &str = "bot_more_short";

/// One ordered matching rule: a topic, its keyword set across the
/// supported scripts, and the reply key it resolves to.
#[derive(Debug, Clone, Copy)]
pub struct ReplyRule {
    pub topic: &'static str,
    pub keywords: &'static [&'static str],
    pub reply_key: &'static str,
}

impl ReplyRule {
    /// Substring test against an already-lowercased utterance.
    fn matches(&self, lowered: &str) -> bool {
        self.keywords.iter().any(|kw| lowered.contains(kw))
    }
}

/// The rule table, in priority order.
///
/// Keywords cover Latin, Devanagari, Kannada, Telugu, and Tamil
/// scripts for the same topic. "cold" appears under both fever and
/// cough; the fever rule wins by order.
pub const RULES: &[ReplyRule] = &[
    ReplyRule {
        topic: "clinic",
        keywords: &[
            "where", "near", "clinic", "hospital", "vaccin", "camp", "क्लिनिक", "कहाँ", "नज़दीक",
        ],
        reply_key: "rep_vaccine",
    },
    ReplyRule {
        topic: "fever",
        keywords: &[
            "fever", "temperature", "hot", "cold", "बुखार", "ಜ್ವರ", "జ్వర", "காய்ச்சல்",
        ],
        reply_key: "rep_fever",
    },
    ReplyRule {
        topic: "cough",
        keywords: &[
            "cough", "cold", "breath", "breathing", "chest", "खाँसी", "केश", "ಕೆಮ್ಮು",
        ],
        reply_key: "rep_cough",
    },
    ReplyRule {
        topic: "rash",
        keywords: &["rash", "spot", "itch", "skin", "blister", "दाने", "ತೋಲು", "தோல்"],
        reply_key: "rep_rash",
    },
    ReplyRule {
        topic: "diarrhoea",
        keywords: &["diarr", "vomit", "vomiting", "dehydrat", "दस्त", "దస్త్"],
        reply_key: "rep_diarr",
    },
];

/// Matcher seam for the resolver.
///
/// A trait (rather than a bare function) so tests can substitute a
/// counting matcher and assert the remote-success short-circuit.
pub trait ReplyMatcher: Send + Sync {
    /// Match an utterance to a reply key, or `None` when no rule fires.
    ///
    /// Identical input always yields the identical key for the same
    /// rule table: no randomness, no state.
    fn match_reply(&self, utterance: &str) -> Option<&str>;
}

/// The ordered-rule-table matcher.
pub struct LocalReplyMatcher {
    rules: &'static [ReplyRule],
}

impl LocalReplyMatcher {
    /// Matcher over the default rule table.
    pub fn new() -> Self {
        Self { rules: RULES }
    }

    /// Matcher over a custom rule table (tests).
    pub fn with_rules(rules: &'static [ReplyRule]) -> Self {
        Self { rules }
    }
}

impl Default for LocalReplyMatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl ReplyMatcher for LocalReplyMatcher {
    fn match_reply(&self, utterance: &str) -> Option<&str> {
        let lowered = utterance.to_lowercase();
        self.rules
            .iter()
            .find(|rule| rule.matches(&lowered))
            .map(|rule| rule.reply_key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fever_matches_in_every_script() {
        let matcher = LocalReplyMatcher::new();
        for utterance in [
            "I have a fever",
            "my TEMPERATURE is high",
            "मुझे बुखार है",
            "జ్వరం వచ్చింది",
            "காய்ச்சல் இருக்கிறது",
        ] {
            assert_eq!(
                matcher.match_reply(utterance),
                Some("rep_fever"),
                "failed for: {utterance}"
            );
        }
    }

    #[test]
    fn test_match_is_case_insensitive() {
        let matcher = LocalReplyMatcher::new();
        assert_eq!(matcher.match_reply("FEVER"), Some("rep_fever"));
        assert_eq!(matcher.match_reply("Fever and chills"), Some("rep_fever"));
    }

    #[test]
    fn test_first_rule_wins_on_overlap() {
        let matcher = LocalReplyMatcher::new();
        // "cold" is a keyword of both fever and cough; fever is earlier.
        assert_eq!(matcher.match_reply("I caught a cold"), Some("rep_fever"));
        // fever and cough both present; fever rule is earlier.
        assert_eq!(
            matcher.match_reply("I have a fever and cough"),
            Some("rep_fever")
        );
        // clinic rule outranks fever.
        assert_eq!(
            matcher.match_reply("where is a clinic for fever"),
            Some("rep_vaccine")
        );
    }

    #[test]
    fn test_no_match_returns_none() {
        let matcher = LocalReplyMatcher::new();
        assert_eq!(matcher.match_reply("hello there"), None);
    }

    #[test]
    fn test_determinism() {
        let matcher = LocalReplyMatcher::new();
        let first = matcher.match_reply("my skin itches").map(str::to_string);
        for _ in 0..10 {
            assert_eq!(
                matcher.match_reply("my skin itches").map(str::to_string),
                first
            );
        }
        assert_eq!(first.as_deref(), Some("rep_rash"));
    }

    #[test]
    fn test_all_rules_reachable() {
        let matcher = LocalReplyMatcher::new();
        assert_eq!(matcher.match_reply("nearest hospital?"), Some("rep_vaccine"));
        assert_eq!(matcher.match_reply("bad cough"), Some("rep_cough"));
        assert_eq!(matcher.match_reply("red rash on arm"), Some("rep_rash"));
        assert_eq!(matcher.match_reply("vomiting all night"), Some("rep_diarr"));
    }
}
