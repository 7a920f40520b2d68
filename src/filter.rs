//! Word filtering module
//!
//! Reduces a dictionary to the candidate words that can be spelled from the
//! available letters, plus an optional pattern/length pre-filter applied to
//! the dictionary itself.

use crate::signature::LetterSignature;
use rayon::prelude::*;
use regex::Regex;

/// A dictionary word together with its letter signature
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub word: String,
    pub signature: LetterSignature,
}

impl Candidate {
    pub fn new(word: &str) -> Self {
        Self {
            word: word.to_string(),
            signature: LetterSignature::from_text(word),
        }
    }
}

/// Keep the words that can be spelled from `letters` on their own.
///
/// A word qualifies when it is non-empty and every one of its characters is
/// available in `letters` at least as often as the word uses it. This is checked
/// against the full, unconsumed signature only. Output order matches `words`.
pub fn filter_candidates<S>(letters: &LetterSignature, words: &[S]) -> Vec<Candidate>
where
    S: AsRef<str> + Sync,
{
    if letters.is_empty() {
        return Vec::new();
    }

    words
        .par_iter()
        .filter_map(|word| {
            let word = word.as_ref();
            if word.is_empty() {
                return None;
            }

            let candidate = Candidate::new(word);
            if letters.covers(&candidate.signature) {
                Some(candidate)
            } else {
                None
            }
        })
        .collect()
}

/// Pre-filter applied to dictionary words before candidate filtering
#[derive(Debug, Clone, Default)]
pub struct DictionaryFilter {
    /// Regex a word must match (None means no pattern filter)
    pub pattern: Option<Regex>,
    /// Minimum word length in characters (None means no length filter)
    pub min_length: Option<usize>,
}

impl DictionaryFilter {
    /// Create a new dictionary filter
    pub fn new(pattern: Option<&str>, min_length: Option<usize>) -> anyhow::Result<Self> {
        let pattern = match pattern {
            Some(p) if !p.is_empty() => {
                let regex = Regex::new(p)
                    .map_err(|e| anyhow::anyhow!("Invalid regex pattern '{}': {}", p, e))?;
                Some(regex)
            }
            _ => None,
        };

        Ok(Self { pattern, min_length })
    }

    /// Check if a word passes the filter
    #[inline]
    pub fn matches(&self, word: &str) -> bool {
        if let Some(min) = self.min_length {
            let len = if word.is_ascii() {
                word.len()
            } else {
                word.chars().count()
            };
            if len < min {
                return false;
            }
        }

        if let Some(ref pattern) = self.pattern {
            if !pattern.is_match(word) {
                return false;
            }
        }

        true
    }

    /// Check if any filter is active
    pub fn has_filters(&self) -> bool {
        self.pattern.is_some() || self.min_length.is_some()
    }

    /// Drop the words that do not pass
    pub fn apply(&self, words: &mut Vec<String>) {
        if self.has_filters() {
            words.retain(|w| self.matches(w));
        }
    }
}

/// Helper to validate a regex pattern before use
pub fn validate_pattern(pattern: &str) -> anyhow::Result<()> {
    Regex::new(pattern)
        .map_err(|e| anyhow::anyhow!("Invalid regex pattern '{}': {}", pattern, e))?;
    Ok(())
}
