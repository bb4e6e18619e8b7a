//! Keyword blocklist matching.
//!
//! The blocklist is compiled once into a single case-insensitive regex:
//!
//! - single words are anchored with `\b` on their word-character edges, so
//!   `class` never matches inside `classic` while `$$$` still matches;
//! - phrases are split on whitespace, each token is escaped, and tokens are
//!   rejoined with `[\s_-]+`, so `make money fast` also matches
//!   `make-money_fast` and `make   money fast` (but not `makemoneyfast`).
//!
//! All alternatives are merged into one pattern that is run once per field
//! value.

use regex::Regex;
use std::collections::BTreeSet;
use tracing::{debug, warn};

/// Separator accepted between the tokens of a phrase.
const PHRASE_SEPARATOR: &str = r"[\s_-]+";

/// Compiled blocklist.
#[derive(Debug, Clone)]
pub struct KeywordMatcher {
    /// `None` when the blocklist is empty; such a matcher never matches.
    pattern: Option<Regex>,
    keywords: Vec<String>,
}

/// Outcome of testing one text against the blocklist.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeywordHits {
    /// Matched literals, lowercased, in scan order.
    pub matches: Vec<String>,
}

impl KeywordHits {
    #[inline]
    pub fn matched(&self) -> bool {
        !self.matches.is_empty()
    }
}

impl KeywordMatcher {
    /// Compile a blocklist.
    ///
    /// Keywords are trimmed, lowercased and deduplicated; blank entries are
    /// ignored. If compilation fails the matcher is disabled and a warning is
    /// logged.
    pub fn build<I, S>(keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let keywords: Vec<String> = keywords
            .into_iter()
            .map(|k| k.as_ref().trim().to_lowercase())
            .filter(|k| !k.is_empty())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect();

        let pattern = match compile(&keywords) {
            Ok(pattern) => pattern,
            Err(err) => {
                warn!(error = %err, "Failed to build spam keyword matcher; keyword matching disabled");
                None
            }
        };

        debug!(count = keywords.len(), "Spam keyword matcher compiled");
        Self { pattern, keywords }
    }

    /// Matcher over the built-in blocklist.
    pub fn with_defaults() -> Self {
        Self::build(default_spam_keywords())
    }

    /// Normalized keywords this matcher was built from.
    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }

    /// Test a text against the blocklist.
    pub fn test(&self, text: &str) -> KeywordHits {
        let Some(pattern) = &self.pattern else {
            return KeywordHits::default();
        };

        KeywordHits {
            matches: pattern
                .find_iter(text)
                .map(|m| m.as_str().to_lowercase())
                .collect(),
        }
    }
}

/// Word characters as understood by `\b`.
fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Anchor `body` with `\b` on each edge where `keyword` starts or ends with a
/// word character. A `\b` next to punctuation would require a word character
/// on the other side, so `$$$` could never match between spaces.
fn anchored(keyword: &str, body: String) -> String {
    let lead = keyword.chars().next().is_some_and(is_word_char);
    let trail = keyword.chars().next_back().is_some_and(is_word_char);
    format!(
        "{}{}{}",
        if lead { r"\b" } else { "" },
        body,
        if trail { r"\b" } else { "" }
    )
}

fn compile(keywords: &[String]) -> Result<Option<Regex>, regex::Error> {
    let (phrases, words): (Vec<&String>, Vec<&String>) =
        keywords.iter().partition(|k| k.split_whitespace().nth(1).is_some());

    let alternatives: Vec<String> = words
        .iter()
        .map(|word| anchored(word, regex::escape(word)))
        .chain(phrases.iter().map(|phrase| {
            let body = phrase
                .split_whitespace()
                .map(regex::escape)
                .collect::<Vec<_>>()
                .join(PHRASE_SEPARATOR);
            anchored(phrase, body)
        }))
        .collect();

    if alternatives.is_empty() {
        return Ok(None);
    }

    Regex::new(&format!("(?i)(?:{})", alternatives.join("|"))).map(Some)
}

/// Default spam blocklist, collected from form spam seen in the wild.
pub fn default_spam_keywords() -> Vec<&'static str> {
    vec![
        // Pharmaceuticals and health
        "viagra",
        "cialis",
        "pharmacy",
        "diet pills",
        "male enhancement",
        // Financial and money schemes
        "casino",
        "payday loan",
        "quick cash",
        "bitcoin",
        "forex",
        "make money fast",
        "get rich",
        "investment opportunity",
        // Adult content
        "xxx",
        "adult dating",
        "hot singles",
        "sexy",
        // Gambling
        "betting",
        "gambling",
        "poker",
        "slots",
        "sportsbook",
        // Fake services
        "cheap seo",
        "buy followers",
        "boost rankings",
        "search engine",
        "video promotion",
        "search index",
        "free daily traffic",
        "seo",
        "postura",
        "business data",
        // Domains
        "gazeta.pl",
        "easerelief.net",
        // Common spam phrases
        "free money",
        "congratulations you won",
        "lucky winner",
        "claim your prize",
        "limited time offer",
        // Scams
        "verify your account",
        "western union",
        "wire transfer",
        "nigerian prince",
        "inheritance",
        "lottery winner",
        // Malicious
        "your computer has virus",
        "urgent action required",
        // Foreign language
        "datos relevantes",
    ]
}
