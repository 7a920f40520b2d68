//! # Wordcover
//!
//! Exact-cover word search: find every combination of dictionary words that
//! uses a given set of letters exactly once.
//!
//! ## Features
//!
//! - **Letter signatures**: case-insensitive, Unicode-aware letter counting
//! - **Candidate filtering**: parallel reduction of the dictionary to spellable words
//! - **Exhaustive enumeration**: backtracking search over candidates with deduplication
//! - **Defined ordering**: results sorted by word count, then alphabetically
//! - **Cancellable**: searches can run on a worker thread with a cancel token and time budget
//! - **Dictionary loading**: memory-mapped files with automatic encoding detection
//!
//! ## Usage
//!
//! ```bash
//! # Every cover of "listen"
//! wordcover -d words.txt listen
//!
//! # Flat output to a file, giving up after 30 seconds
//! wordcover -d words.txt --flat -o covers.txt --timeout 30s astronomers
//! ```
//!
//! ## Example
//!
//! ```rust
//! use wordcover::search;
//!
//! let dictionary = vec!["eat", "ate", "tea", "at"];
//! let results = search("eat", &dictionary);
//!
//! assert_eq!(results.to_strings(), vec!["ate", "eat", "tea"]);
//! ```

pub mod cancel;
pub mod cli;
pub mod dedup;
pub mod dictionary;
pub mod enumerator;
pub mod filter;
pub mod output;
pub mod progress;
pub mod runner;
pub mod search;
pub mod signature;

pub use cancel::CancellationToken;
pub use cli::Args;
pub use dedup::{Combination, ResultSet};
pub use dictionary::{Dictionary, DictionaryError, DictionarySource};
pub use enumerator::{enumerate, Enumerator, SearchStatus};
pub use filter::{filter_candidates, Candidate};
pub use runner::{Runner, SearchConfig};
pub use search::{search, SearchOutcome, Searcher};
pub use signature::LetterSignature;
