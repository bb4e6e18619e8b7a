//! Gibberish detection for free-text form fields.
//!
//! Scores a single string for how much it resembles random characters
//! (keyboard mashing, generated tokens like `mMjMUEsycpBMqHruCOvQDf`)
//! rather than natural language. Five independent checks each add to a
//! running score bounded by their own weight cap:
//!
//! | Check                   | Cap  |
//! |-------------------------|------|
//! | Consonant ratio         | 0.30 |
//! | Mixed-case churn        | 0.25 |
//! | No common words         | 0.20 |
//! | Character repetition    | 0.15 |
//! | Consonant runs          | 0.10 |
//!
//! Only checks that fire contribute to the maximum, so the normalized score is
//! the share of the triggered checks' caps that was actually reached.

use serde::Serialize;

/// Texts shorter than this (after trimming) are never scored.
const MIN_TEXT_LEN: usize = 8;
/// Texts whose alphanumeric core is shorter than this are never scored.
const MIN_CLEAN_LEN: usize = 6;

const CONSONANT_RATIO_CAP: f64 = 0.3;
const MIXED_CASE_CAP: f64 = 0.25;
const NO_COMMON_WORDS_CAP: f64 = 0.2;
const REPETITION_CAP: f64 = 0.15;
const CONSONANT_RUN_CAP: f64 = 0.1;

/// Minimum length of a consonant-only run to count as suspicious.
const CONSONANT_RUN_LEN: usize = 5;

/// Short English words expected somewhere in legitimate prose.
const COMMON_WORDS: &[&str] = &[
    "the", "and", "for", "are", "but", "not", "you", "all", "can", "her", "was", "one", "our",
    "out", "day", "get", "has", "him", "his", "how", "its", "may", "new", "now", "old", "see",
    "two", "way", "who", "boy", "did", "let", "put", "say", "she", "too", "use",
];

/// Result of scoring one text.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GibberishReport {
    pub is_spam: bool,
    /// Normalized score in `[0, 1]`.
    pub score: f64,
    /// Human-readable explanations, in check order.
    pub reasons: Vec<String>,
}

impl GibberishReport {
    fn clean() -> Self {
        Self {
            is_spam: false,
            score: 0.0,
            reasons: Vec::new(),
        }
    }
}

/// Running score accumulator.
#[derive(Default)]
struct Tally {
    score: f64,
    max: f64,
    reasons: Vec<String>,
}

impl Tally {
    fn add(&mut self, score: f64, cap: f64) {
        self.score += score.min(cap);
        self.max += cap;
    }

    fn normalized(&self) -> f64 {
        if self.max > 0.0 {
            (self.score / self.max).clamp(0.0, 1.0)
        } else {
            0.0
        }
    }
}

/// Gibberish detector bound to a decision threshold.
#[derive(Debug, Clone, Copy)]
pub struct GibberishDetector {
    threshold: f64,
}

impl GibberishDetector {
    /// Create a detector; the threshold is clamped to `[0, 1]`.
    pub fn new(threshold: f64) -> Self {
        Self {
            threshold: threshold.clamp(0.0, 1.0),
        }
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    pub fn analyze(&self, text: &str) -> GibberishReport {
        analyze(text, self.threshold)
    }
}

impl Default for GibberishDetector {
    fn default() -> Self {
        Self::new(0.7)
    }
}

#[inline]
fn is_vowel(c: char) -> bool {
    matches!(c.to_ascii_lowercase(), 'a' | 'e' | 'i' | 'o' | 'u')
}

#[inline]
fn is_consonant(c: char) -> bool {
    c.is_ascii_alphabetic() && !is_vowel(c)
}

/// Score `text` and flag it when the normalized score reaches `threshold`.
pub fn analyze(text: &str, threshold: f64) -> GibberishReport {
    let text = text.trim();
    let length = text.chars().count();
    if length < MIN_TEXT_LEN {
        return GibberishReport::clean();
    }

    let clean: Vec<char> = text.chars().filter(char::is_ascii_alphanumeric).collect();
    let clean_len = clean.len();
    if clean_len < MIN_CLEAN_LEN {
        return GibberishReport::clean();
    }

    let mut tally = Tally::default();
    check_consonant_ratio(&clean, &mut tally);
    check_mixed_case(&clean, &mut tally);
    check_common_words(text, length, &mut tally);
    check_repetition(&clean, &mut tally);
    check_consonant_runs(&clean, &mut tally);

    let score = tally.normalized();
    GibberishReport {
        is_spam: score >= threshold,
        score,
        reasons: tally.reasons,
    }
}

/// Random strings lean heavily on consonants; prose sits around 40-60%.
/// Digits count on the consonant side.
fn check_consonant_ratio(clean: &[char], tally: &mut Tally) {
    let vowels = clean.iter().filter(|c| is_vowel(**c)).count();
    let ratio = (clean.len() - vowels) as f64 / clean.len() as f64;
    if ratio > 0.75 {
        tally.add((ratio - 0.75) * 4.0, CONSONANT_RATIO_CAP);
        if ratio > 0.8 {
            tally
                .reasons
                .push(format!("high consonant ratio ({}%)", (ratio * 100.0).round()));
        }
    }
}

/// Counts case flips between consecutive letters (digits are skipped).
fn check_mixed_case(clean: &[char], tally: &mut Tally) {
    let mut changes = 0usize;
    let mut prev_upper: Option<bool> = None;
    for c in clean.iter().filter(|c| c.is_ascii_alphabetic()) {
        let upper = c.is_ascii_uppercase();
        if prev_upper.is_some_and(|prev| prev != upper) {
            changes += 1;
        }
        prev_upper = Some(upper);
    }

    let ratio = changes as f64 / clean.len() as f64;
    if ratio > 0.3 && clean.len() > 10 {
        tally.add((ratio - 0.3) * 2.0, MIXED_CASE_CAP);
        if ratio > 0.4 {
            tally.reasons.push("excessive mixed case pattern".to_string());
        }
    }
}

/// Several words of which none is a common English word.
fn check_common_words(text: &str, length: usize, tally: &mut Tally) {
    let words: Vec<&str> = text.split_whitespace().collect();
    let word_count = words.iter().filter(|w| w.chars().count() > 2).count();
    let found = words
        .iter()
        .map(|w| {
            w.to_lowercase()
                .chars()
                .filter(char::is_ascii_lowercase)
                .collect::<String>()
        })
        .filter(|w| w.len() >= 3 && COMMON_WORDS.contains(&w.as_str()))
        .count();

    if word_count >= 3 && found == 0 && length > 20 {
        tally.add((word_count - 2) as f64 * 0.05, NO_COMMON_WORDS_CAP);
        tally.reasons.push("no common words found".to_string());
    }
}

/// One character (case-folded) dominating the token.
fn check_repetition(clean: &[char], tally: &mut Tally) {
    let mut counts = [0usize; 128];
    for c in clean {
        counts[c.to_ascii_lowercase() as usize] += 1;
    }
    let max_repeats = counts.iter().copied().max().unwrap_or(0);

    let ratio = max_repeats as f64 / clean.len() as f64;
    if ratio > 0.3 && clean.len() > 8 {
        tally.add((ratio - 0.3) * 2.0, REPETITION_CAP);
        if ratio > 0.4 {
            tally
                .reasons
                .push("excessive character repetition".to_string());
        }
    }
}

/// Maximal runs of consonant letters at least [`CONSONANT_RUN_LEN`] long.
fn check_consonant_runs(clean: &[char], tally: &mut Tally) {
    let mut runs = 0usize;
    let mut current = 0usize;
    for c in clean {
        if is_consonant(*c) {
            current += 1;
        } else {
            if current >= CONSONANT_RUN_LEN {
                runs += 1;
            }
            current = 0;
        }
    }
    if current >= CONSONANT_RUN_LEN {
        runs += 1;
    }

    if runs > 0 {
        tally.add(runs as f64 * 0.1, CONSONANT_RUN_CAP);
        tally
            .reasons
            .push("consecutive consonants without vowels".to_string());
    }
}
