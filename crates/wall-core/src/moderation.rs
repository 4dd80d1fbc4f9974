//! Abuse filter - stateless heuristics applied to post text before it is
//! admitted to the wall.
//!
//! Any single heuristic firing is enough to reject; there is no scoring.

use std::collections::{HashMap, HashSet};
use std::fmt;

use unicode_segmentation::UnicodeSegmentation;

/// Uppercase share of letters above which text counts as shouting.
const CAPS_RATIO_THRESHOLD: f64 = 0.8;
/// Texts with this many letters or fewer are never flagged for caps.
const CAPS_MIN_LETTERS: usize = 5;
/// Run length of identical characters that counts as spam.
const CHAR_RUN_LIMIT: usize = 5;
/// Word repetition is only checked above this word count.
const WORD_REPEAT_MIN_WORDS: usize = 5;

/// Built-in profanity dictionary. Entries are lowercase whole words.
const DEFAULT_BLOCKED_WORDS: &[&str] = &[
    "arse",
    "arsehole",
    "asshole",
    "bastard",
    "bitch",
    "bollocks",
    "bullshit",
    "cock",
    "crap",
    "cunt",
    "dick",
    "dickhead",
    "fuck",
    "fucked",
    "fucker",
    "fucking",
    "motherfucker",
    "piss",
    "prick",
    "shit",
    "shitty",
    "slut",
    "twat",
    "wanker",
    "whore",
];

/// Which heuristic flagged a text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AbuseKind {
    Profanity,
    ExcessiveCaps,
    RepeatedCharacters,
    RepeatedWords,
}

impl fmt::Display for AbuseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let reason = match self {
            AbuseKind::Profanity => "message contains inappropriate language",
            AbuseKind::ExcessiveCaps => "message is mostly uppercase",
            AbuseKind::RepeatedCharacters => "message repeats the same character too many times",
            AbuseKind::RepeatedWords => "message repeats the same word too many times",
        };
        f.write_str(reason)
    }
}

/// Stateless text classifier.
#[derive(Debug, Clone)]
pub struct AbuseFilter {
    blocked_words: HashSet<String>,
    /// Entries that tokenize to several words, e.g. `f-off`.
    blocked_phrases: Vec<Vec<String>>,
}

impl Default for AbuseFilter {
    fn default() -> Self {
        Self::new()
    }
}

impl AbuseFilter {
    /// Filter with the built-in dictionary.
    pub fn new() -> Self {
        Self {
            blocked_words: DEFAULT_BLOCKED_WORDS.iter().map(|w| w.to_string()).collect(),
            blocked_phrases: Vec::new(),
        }
    }

    /// Extend the dictionary.
    ///
    /// Entries go through the same tokenizer as post text. One that splits
    /// into several words matches that word sequence; one with no words at
    /// all can never match and is skipped with a warning.
    pub fn with_blocked_words<I, S>(mut self, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for entry in words {
            let entry = entry.as_ref().trim();
            if entry.is_empty() {
                continue;
            }

            let tokens = tokenize(entry);
            match tokens.len() {
                0 => tracing::warn!(entry, "Blocked word contains no letters or digits, ignoring"),
                1 => self.blocked_words.extend(tokens),
                _ => self.blocked_phrases.push(tokens),
            }
        }
        self
    }

    /// Whether any heuristic flags `text`.
    pub fn is_abusive(&self, text: &str) -> bool {
        self.check(text).is_some()
    }

    /// The first heuristic that flags `text`, if any.
    pub fn check(&self, text: &str) -> Option<AbuseKind> {
        if self.contains_blocked_word(text) {
            Some(AbuseKind::Profanity)
        } else if is_shouting(text) {
            Some(AbuseKind::ExcessiveCaps)
        } else if has_character_run(text) {
            Some(AbuseKind::RepeatedCharacters)
        } else if has_dominant_word(text) {
            Some(AbuseKind::RepeatedWords)
        } else {
            None
        }
    }

    fn contains_blocked_word(&self, text: &str) -> bool {
        let words = tokenize(text);

        words.iter().any(|w| self.blocked_words.contains(w))
            || self.blocked_phrases.iter().any(|phrase| {
                words
                    .windows(phrase.len())
                    .any(|window| window == phrase.as_slice())
            })
    }
}

/// Lowercased words on Unicode word boundaries.
fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .unicode_words()
        .map(str::to_string)
        .collect()
}

fn is_shouting(text: &str) -> bool {
    let (letters, upper) = text
        .chars()
        .filter(|c| c.is_alphabetic())
        .fold((0usize, 0usize), |(letters, upper), c| {
            (letters + 1, upper + usize::from(c.is_uppercase()))
        });

    letters > CAPS_MIN_LETTERS && upper as f64 / letters as f64 > CAPS_RATIO_THRESHOLD
}

fn has_character_run(text: &str) -> bool {
    let mut run = 0;
    let mut previous = None;

    for c in text.chars() {
        if previous == Some(c) {
            run += 1;
        } else {
            run = 1;
            previous = Some(c);
        }
        if run >= CHAR_RUN_LIMIT {
            return true;
        }
    }
    false
}

fn has_dominant_word(text: &str) -> bool {
    let words: Vec<String> = text.split_whitespace().map(str::to_lowercase).collect();
    if words.len() <= WORD_REPEAT_MIN_WORDS {
        return false;
    }

    let mut counts: HashMap<&str, usize> = HashMap::new();
    for word in &words {
        *counts.entry(word.as_str()).or_default() += 1;
    }
    counts.values().any(|&count| count * 2 > words.len())
}
