//! Exact-cover combination enumerator
//!
//! Depth-first backtracking over the candidate list. Each step picks a
//! candidate at or after the current index cursor whose letters are still
//! available, subtracts them, and recurses with the cursor moved past it. A path
//! is complete once no letter remains.
//!
//! Moving the cursor to `i + 1` means an index is never revisited, so every
//! multiset of candidates is produced in exactly one order and no candidate is
//! used twice within one combination.

use crate::cancel::{CancellationToken, Deadline};
use crate::dedup::{Combination, CombinationSet, ResultSet};
use crate::filter::Candidate;
use crate::signature::LetterSignature;
use log::debug;
use std::time::Duration;

/// Nodes visited between two deadline checks
const DEADLINE_POLL_INTERVAL: u64 = 256;

/// How an enumeration ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchStatus {
    /// Every branch was explored
    Completed,
    /// The cancellation token was tripped
    Cancelled,
    /// The time budget expired. Contains the elapsed time.
    TimedOut { elapsed: Duration },
}

impl SearchStatus {
    pub fn is_complete(&self) -> bool {
        matches!(self, SearchStatus::Completed)
    }
}

/// Counters collected during one enumeration
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnumerationStats {
    pub candidates: usize,
    pub nodes_visited: u64,
    pub combinations_found: u64,
    pub duplicates: u64,
}

/// Outcome of [`Enumerator::run`]
#[derive(Debug, Clone)]
pub struct Enumeration {
    /// Unique results found, in final order. Partial if the search stopped early.
    pub results: ResultSet,
    pub status: SearchStatus,
    pub stats: EnumerationStats,
}

/// Configurable enumerator over one letter signature and candidate list
pub struct Enumerator<'a> {
    letters: &'a LetterSignature,
    candidates: &'a [Candidate],
    token: Option<CancellationToken>,
    timeout: Option<Duration>,
}

impl<'a> Enumerator<'a> {
    pub fn new(letters: &'a LetterSignature, candidates: &'a [Candidate]) -> Self {
        Self {
            letters,
            candidates,
            token: None,
            timeout: None,
        }
    }

    /// Stop early once `token` is cancelled
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.token = Some(token);
        self
    }

    /// Stop early once `timeout` has elapsed
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn run(self) -> Enumeration {
        let mut walk = Walk {
            candidates: self.candidates,
            path: Vec::new(),
            found: CombinationSet::new(),
            nodes: 0,
            combinations: 0,
            token: self.token,
            deadline: self.timeout.map(Deadline::new),
            stopped: None,
        };

        debug!(
            "Enumerating {} candidates over {} letters ({})",
            self.candidates.len(),
            self.letters.total(),
            self.letters
        );

        // An empty signature has no cover worth reporting
        if !self.letters.is_empty() && !self.candidates.is_empty() {
            walk.backtrack(self.letters, 0);
        }

        let status = walk.stopped.unwrap_or(SearchStatus::Completed);
        let stats = EnumerationStats {
            candidates: self.candidates.len(),
            nodes_visited: walk.nodes,
            combinations_found: walk.combinations,
            duplicates: walk.found.duplicates(),
        };
        let results = walk.found.into_result_set();

        debug!(
            "Enumeration {:?}: {} nodes, {} unique results",
            status,
            stats.nodes_visited,
            results.len()
        );

        Enumeration {
            results,
            status,
            stats,
        }
    }
}

/// Enumerate every exact cover of `letters` by `candidates`.
///
/// Never fails: empty inputs or an unsatisfiable signature give an empty
/// result set.
pub fn enumerate(letters: &LetterSignature, candidates: &[Candidate]) -> ResultSet {
    Enumerator::new(letters, candidates).run().results
}

/// Mutable state of one depth-first walk
struct Walk<'a> {
    candidates: &'a [Candidate],
    /// Candidate indices chosen so far
    path: Vec<usize>,
    found: CombinationSet,
    nodes: u64,
    combinations: u64,
    token: Option<CancellationToken>,
    deadline: Option<Deadline>,
    stopped: Option<SearchStatus>,
}

impl<'a> Walk<'a> {
    fn backtrack(&mut self, remaining: &LetterSignature, start: usize) {
        if self.should_stop() {
            return;
        }
        self.nodes += 1;

        if remaining.is_empty() {
            self.record();
            return;
        }

        let candidates = self.candidates;
        for (i, candidate) in candidates.iter().enumerate().skip(start) {
            // an empty word covers nothing
            if candidate.signature.is_empty() {
                continue;
            }
            let Some(next) = remaining.checked_sub(&candidate.signature) else {
                continue;
            };

            self.path.push(i);
            self.backtrack(&next, i + 1);
            self.path.pop();

            if self.stopped.is_some() {
                return;
            }
        }
    }

    fn record(&mut self) {
        let candidates = self.candidates;
        let words: Vec<&str> = self
            .path
            .iter()
            .map(|&i| candidates[i].word.as_str())
            .collect();

        self.combinations += 1;
        self.found.insert(Combination::from_words(&words));
    }

    fn should_stop(&mut self) -> bool {
        if self.stopped.is_some() {
            return true;
        }

        if let Some(ref token) = self.token {
            if token.is_cancelled() {
                self.stopped = Some(SearchStatus::Cancelled);
                return true;
            }
        }

        if let Some(ref deadline) = self.deadline {
            if self.nodes % DEADLINE_POLL_INTERVAL == 0 && deadline.expired() {
                self.stopped = Some(SearchStatus::TimedOut {
                    elapsed: deadline.elapsed(),
                });
                return true;
            }
        }

        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::filter_candidates;

    fn run(letters: &str, dict: &[&str]) -> Vec<String> {
        let signature = LetterSignature::from_letters(letters);
        let candidates = filter_candidates(&signature, dict);
        enumerate(&signature, &candidates).to_strings()
    }

    #[test]
    fn test_single_word_covers() {
        let results = run("eat", &["eat", "ate", "tea", "at", "ea"]);
        assert_eq!(results, vec!["ate", "eat", "tea"]);
    }

    #[test]
    fn test_multi_word_covers() {
        let results = run("eatat", &["eat", "ate", "tea", "at", "ea"]);
        assert_eq!(results, vec!["at ate", "at eat", "at tea"]);
    }

    #[test]
    fn test_word_count_groups_first() {
        let results = run("stop", &["post", "spot", "st", "op", "to", "ps", "s", "t", "o", "p"]);

        assert_eq!(
            results,
            vec![
                "post", "spot",
                "op st", "ps to",
                "o p st", "o ps t", "op s t", "p s to",
                "o p s t",
            ]
        );
    }

    #[test]
    fn test_candidate_used_once_per_combination() {
        // "at" could be spelled twice from the letters, but appears once in the list
        assert!(run("atat", &["at"]).is_empty());
        assert_eq!(run("atat", &["at", "ta"]), vec!["at ta"]);
    }

    #[test]
    fn test_repeated_dictionary_entries_dedup() {
        let signature = LetterSignature::from_letters("atat");
        let candidates = filter_candidates(&signature, &["at", "ta", "at"]);

        let outcome = Enumerator::new(&signature, &candidates).run();

        assert_eq!(outcome.results.to_strings(), vec!["at at", "at ta"]);
        assert_eq!(outcome.stats.combinations_found, 3);
        assert_eq!(outcome.stats.duplicates, 1);
        assert_eq!(outcome.status, SearchStatus::Completed);
    }

    #[test]
    fn test_empty_inputs() {
        assert!(run("", &["a", "b"]).is_empty());
        assert!(run("   ", &["a"]).is_empty());
        assert!(run("abc", &[]).is_empty());
        assert!(run("abc", &["ab", "bc"]).is_empty());
    }

    #[test]
    fn test_exact_coverage_and_filter_necessity() {
        let dict = [
            "listen", "silent", "enlist", "tinsel", "list", "ten", "net", "lie", "nest",
            "lit", "sen", "els", "nil", "tie", "sit", "lens", "tin", "let", "is", "in",
            "el", "ti", "st", "ne", "lint", "isle", "lies", "lines", "stile",
        ];
        let signature = LetterSignature::from_letters("listen");
        let candidates = filter_candidates(&signature, &dict);
        let results = enumerate(&signature, &candidates);

        assert!(!results.is_empty());
        for combination in &results {
            let mut sum = LetterSignature::default();
            for word in combination.words() {
                assert!(candidates.iter().any(|c| c.word == word));
                assert!(signature.covers(&LetterSignature::from_text(word)));
                sum.merge(&LetterSignature::from_text(word));
            }
            assert_eq!(sum, signature, "{} is not an exact cover", combination);
        }
    }

    #[test]
    fn test_sorted_and_unique() {
        let dict = ["on", "no", "one", "neon", "eon", "n", "e", "o", "noon", "nene"];
        let results = run("noone", &dict);

        let mut seen = std::collections::HashSet::new();
        for pair in results.windows(2) {
            let (a, b) = (&pair[0], &pair[1]);
            let (wa, wb) = (a.split(' ').count(), b.split(' ').count());
            assert!(wa < wb || (wa == wb && a < b), "{} before {}", a, b);
        }
        for r in &results {
            assert!(seen.insert(r.clone()));
        }
    }

    #[test]
    fn test_deterministic() {
        let dict = ["pat", "tap", "apt", "a", "p", "t", "at", "pa", "ta"];
        assert_eq!(run("tapa", &dict), run("tapa", &dict));
    }

    #[test]
    fn test_pre_cancelled_search() {
        let signature = LetterSignature::from_letters("eat");
        let candidates = filter_candidates(&signature, &["eat", "tea"]);
        let token = CancellationToken::new();
        token.cancel();

        let outcome = Enumerator::new(&signature, &candidates)
            .with_cancellation(token)
            .run();

        assert_eq!(outcome.status, SearchStatus::Cancelled);
        assert!(outcome.results.is_empty());
        assert_eq!(outcome.stats.nodes_visited, 0);
    }

    #[test]
    fn test_zero_timeout() {
        let signature = LetterSignature::from_letters("eat");
        let candidates = filter_candidates(&signature, &["eat", "tea"]);

        let outcome = Enumerator::new(&signature, &candidates)
            .with_timeout(Duration::ZERO)
            .run();

        assert!(matches!(outcome.status, SearchStatus::TimedOut { .. }));
        assert!(!outcome.status.is_complete());
    }

    #[test]
    fn test_generous_timeout_completes() {
        let signature = LetterSignature::from_letters("eat");
        let candidates = filter_candidates(&signature, &["eat", "tea"]);

        let outcome = Enumerator::new(&signature, &candidates)
            .with_timeout(Duration::from_secs(60))
            .with_cancellation(CancellationToken::new())
            .run();

        assert_eq!(outcome.status, SearchStatus::Completed);
        assert_eq!(outcome.results.to_strings(), vec!["eat", "tea"]);
    }

    #[test]
    fn test_empty_candidates_skipped() {
        let signature = LetterSignature::from_letters("eat");
        let candidates = vec![Candidate::new(""), Candidate::new("eat"), Candidate::new("")];

        let outcome = Enumerator::new(&signature, &candidates).run();

        assert_eq!(outcome.results.to_strings(), vec!["eat"]);
        assert_eq!(outcome.stats.combinations_found, 1);
    }
}
