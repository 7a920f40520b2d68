//! Combination deduplication and result ordering
//!
//! Search paths can reach the same multiset of words more than once, so every
//! completed path is reduced to a canonical string (words sorted, joined by a
//! single space) and collected into a hash set before the final ordering.

use ahash::RandomState;
use hashbrown::HashSet;
use std::cmp::Ordering;
use std::fmt;

/// Separator between the words of a combination
pub const WORD_SEPARATOR: char = ' ';

/// A canonical exact-cover combination of words
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Combination(String);

impl Combination {
    /// Canonicalize a list of words: sort alphabetically, join with a space
    pub fn from_words<S: AsRef<str>>(words: &[S]) -> Self {
        let mut sorted: Vec<&str> = words.iter().map(|w| w.as_ref()).collect();
        sorted.sort_unstable();

        let mut joined = String::with_capacity(sorted.iter().map(|w| w.len() + 1).sum());
        for (i, word) in sorted.iter().enumerate() {
            if i > 0 {
                joined.push(WORD_SEPARATOR);
            }
            joined.push_str(word);
        }

        Self(joined)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Split back into the individual words
    pub fn words(&self) -> impl Iterator<Item = &str> {
        self.0.split(WORD_SEPARATOR).filter(|w| !w.is_empty())
    }

    pub fn word_count(&self) -> usize {
        self.words().count()
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

/// Results order by ascending word count, then lexicographically
impl Ord for Combination {
    fn cmp(&self, other: &Self) -> Ordering {
        self.word_count()
            .cmp(&other.word_count())
            .then_with(|| self.0.cmp(&other.0))
    }
}

impl PartialOrd for Combination {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Combination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for Combination {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Hash set of canonical combinations seen during one search
#[derive(Debug, Default)]
pub struct CombinationSet {
    seen: HashSet<Combination, RandomState>,
    duplicates: u64,
}

impl CombinationSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a combination.
    /// Returns true if it was not seen before.
    pub fn insert(&mut self, combination: Combination) -> bool {
        let fresh = self.seen.insert(combination);
        if !fresh {
            self.duplicates += 1;
        }
        fresh
    }

    pub fn contains(&self, combination: &Combination) -> bool {
        self.seen.contains(combination)
    }

    /// Number of unique combinations
    pub fn len(&self) -> usize {
        self.seen.len()
    }

    pub fn is_empty(&self) -> bool {
        self.seen.is_empty()
    }

    /// Number of rejected repeats
    pub fn duplicates(&self) -> u64 {
        self.duplicates
    }

    /// Sort the unique combinations into the final result order
    pub fn into_result_set(self) -> ResultSet {
        let mut combinations: Vec<Combination> = self.seen.into_iter().collect();
        combinations.sort_unstable();
        ResultSet { combinations }
    }
}

/// Unique combinations, ordered by word count then alphabetically
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResultSet {
    combinations: Vec<Combination>,
}

impl ResultSet {
    pub fn len(&self) -> usize {
        self.combinations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.combinations.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Combination> {
        self.combinations.iter()
    }

    pub fn as_slice(&self) -> &[Combination] {
        &self.combinations
    }

    /// Group consecutive results by word count: `(word_count, results)`,
    /// groups in ascending word count.
    pub fn groups(&self) -> Vec<(usize, &[Combination])> {
        let mut groups = Vec::new();
        let mut start = 0;

        while start < self.combinations.len() {
            let count = self.combinations[start].word_count();
            let end = self.combinations[start..]
                .iter()
                .position(|c| c.word_count() != count)
                .map(|offset| start + offset)
                .unwrap_or(self.combinations.len());

            groups.push((count, &self.combinations[start..end]));
            start = end;
        }

        groups
    }

    /// Canonical strings in result order
    pub fn to_strings(&self) -> Vec<String> {
        self.combinations.iter().map(|c| c.as_str().to_string()).collect()
    }
}

impl<'a> IntoIterator for &'a ResultSet {
    type Item = &'a Combination;
    type IntoIter = std::slice::Iter<'a, Combination>;

    fn into_iter(self) -> Self::IntoIter {
        self.combinations.iter()
    }
}

impl IntoIterator for ResultSet {
    type Item = Combination;
    type IntoIter = std::vec::IntoIter<Combination>;

    fn into_iter(self) -> Self::IntoIter {
        self.combinations.into_iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set_of(list: &[&[&str]]) -> CombinationSet {
        let mut set = CombinationSet::new();
        for words in list {
            set.insert(Combination::from_words(words));
        }
        set
    }

    #[test]
    fn test_canonical_form() {
        let combination = Combination::from_words(&["tea", "at", "eat"]);

        assert_eq!(combination.as_str(), "at eat tea");
        assert_eq!(combination.word_count(), 3);
        assert_eq!(combination.words().collect::<Vec<_>>(), vec!["at", "eat", "tea"]);
    }

    #[test]
    fn test_order_insensitive_dedup() {
        let mut set = CombinationSet::new();

        assert!(set.insert(Combination::from_words(&["at", "tea"])));
        assert!(!set.insert(Combination::from_words(&["tea", "at"])));
        assert!(set.insert(Combination::from_words(&["at", "eat"])));

        assert_eq!(set.len(), 2);
        assert_eq!(set.duplicates(), 1);
        assert!(set.contains(&Combination::from_words(&["tea", "at"])));
    }

    #[test]
    fn test_result_order() {
        let results = set_of(&[&["tea", "at"], &["tea"], &["ate"], &["a", "b", "c"], &["at", "eat"]])
            .into_result_set();

        assert_eq!(
            results.to_strings(),
            vec!["ate", "tea", "at eat", "at tea", "a b c"]
        );
    }

    #[test]
    fn test_groups() {
        let results = set_of(&[&["tea"], &["at", "eat"], &["ate"], &["a", "b", "c"], &["at", "tea"]])
            .into_result_set();
        let groups = results.groups();

        assert_eq!(groups.len(), 3);
        assert_eq!(groups[0].0, 1);
        assert_eq!(groups[0].1.len(), 2);
        assert_eq!(groups[1].0, 2);
        assert_eq!(groups[1].1.len(), 2);
        assert_eq!(groups[2].0, 3);
        assert_eq!(groups[2].1[0].as_str(), "a b c");
    }

    #[test]
    fn test_empty_result_set() {
        let results = CombinationSet::new().into_result_set();

        assert!(results.is_empty());
        assert!(results.groups().is_empty());
        assert_eq!(results, ResultSet::default());
    }
}
