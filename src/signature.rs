//! Letter signature module
//!
//! A signature is the multiset of characters in a piece of text, stored as
//! character -> count. Every stored count is positive; a missing key means zero.

use ahash::RandomState;
use hashbrown::HashMap;
use std::fmt;

/// Case-insensitive character counts for a piece of text
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LetterSignature {
    counts: HashMap<char, u32, RandomState>,
}

impl LetterSignature {
    /// Build a signature from any text.
    ///
    /// The text is lower-cased and counted per `char`, so a multi-byte
    /// character is one unit. Whitespace, digits and punctuation are counted
    /// like any other character.
    pub fn from_text(text: &str) -> Self {
        let mut counts = HashMap::with_capacity_and_hasher(text.len().min(64), RandomState::new());

        for ch in text.to_lowercase().chars() {
            *counts.entry(ch).or_insert(0) += 1;
        }

        Self { counts }
    }

    /// Build the canonical signature for raw user input.
    ///
    /// Whitespace separates groups of letters on input and is never a letter
    /// to be matched, so it is stripped before counting.
    pub fn from_letters(raw: &str) -> Self {
        let letters: String = raw.chars().filter(|c| !c.is_whitespace()).collect();
        Self::from_text(&letters)
    }

    /// Count for a character (zero when absent)
    #[inline]
    pub fn count(&self, ch: char) -> u32 {
        self.counts.get(&ch).copied().unwrap_or(0)
    }

    /// True when no character remains
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Number of distinct characters
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// Total number of characters, counting repeats
    pub fn total(&self) -> u64 {
        self.counts.values().map(|&n| n as u64).sum()
    }

    /// Check whether every character of `other` is available here in at
    /// least the same quantity.
    #[inline]
    pub fn covers(&self, other: &LetterSignature) -> bool {
        other.counts.iter().all(|(&ch, &n)| self.count(ch) >= n)
    }

    /// Subtract `other`, returning a fresh signature.
    ///
    /// Returns `None` if any count would go negative. Entries that reach zero
    /// are removed.
    pub fn checked_sub(&self, other: &LetterSignature) -> Option<LetterSignature> {
        if !self.covers(other) {
            return None;
        }

        let mut counts = self.counts.clone();
        for (ch, &n) in &other.counts {
            if let Some(left) = counts.get_mut(ch) {
                *left -= n;
                if *left == 0 {
                    counts.remove(ch);
                }
            }
        }

        Some(Self { counts })
    }

    /// Add the counts of `other` into this signature
    pub fn merge(&mut self, other: &LetterSignature) {
        for (&ch, &n) in &other.counts {
            *self.counts.entry(ch).or_insert(0) += n;
        }
    }

    /// Iterate over `(char, count)` pairs in no particular order
    pub fn iter(&self) -> impl Iterator<Item = (char, u32)> + '_ {
        self.counts.iter().map(|(&ch, &n)| (ch, n))
    }
}

impl fmt::Display for LetterSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut entries: Vec<_> = self.iter().collect();
        entries.sort_unstable();

        for (i, (ch, n)) in entries.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{}:{}", ch, n)?;
        }

        Ok(())
    }
}
