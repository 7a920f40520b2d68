//! Search entry points
//!
//! Composes the pipeline: raw letters -> signature -> candidate filter ->
//! enumerator. [`search`] is the plain total function; [`Searcher`] adds a
//! dictionary pre-filter, a time budget and cancellation, and [`spawn`] runs a
//! search on a worker thread so the caller stays responsive.

use crate::cancel::CancellationToken;
use crate::dedup::ResultSet;
use crate::enumerator::{EnumerationStats, Enumerator, SearchStatus};
use crate::filter::{filter_candidates, DictionaryFilter};
use crate::signature::LetterSignature;

use crossbeam_channel::{bounded, Receiver, RecvTimeoutError};
use log::{debug, info};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

/// Find every exact cover of `raw_letters` by words from `dictionary`.
///
/// Whitespace in `raw_letters` is ignored. Dictionary words are expected to be
/// trimmed and lower-case already.
pub fn search<S>(raw_letters: &str, dictionary: &[S]) -> ResultSet
where
    S: AsRef<str> + Sync,
{
    let letters = LetterSignature::from_letters(raw_letters);
    let candidates = filter_candidates(&letters, dictionary);
    crate::enumerator::enumerate(&letters, &candidates)
}

/// Everything known about one finished search
#[derive(Debug, Clone)]
pub struct SearchOutcome {
    pub letters: LetterSignature,
    /// Dictionary words considered after the pre-filter
    pub dictionary_words: usize,
    pub results: ResultSet,
    pub status: SearchStatus,
    pub stats: EnumerationStats,
    pub elapsed: Duration,
}

/// Search with options
#[derive(Debug, Clone, Default)]
pub struct Searcher {
    filter: DictionaryFilter,
    timeout: Option<Duration>,
    token: CancellationToken,
}

impl Searcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Restrict dictionary words before candidate filtering
    pub fn with_filter(mut self, filter: DictionaryFilter) -> Self {
        self.filter = filter;
        self
    }

    /// Give up after `timeout`; a zero duration means no limit
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout.filter(|t| !t.is_zero());
        self
    }

    /// Use an externally owned cancellation token
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.token = token;
        self
    }

    pub fn token(&self) -> &CancellationToken {
        &self.token
    }

    pub fn run<S>(&self, raw_letters: &str, dictionary: &[S]) -> SearchOutcome
    where
        S: AsRef<str> + Sync,
    {
        let start = Instant::now();
        let letters = LetterSignature::from_letters(raw_letters);

        let words: Vec<&str> = dictionary
            .iter()
            .map(|w| w.as_ref())
            .filter(|w| self.filter.matches(w))
            .collect();

        let candidates = filter_candidates(&letters, &words);
        info!(
            "{} of {} dictionary words are candidates for {} letters",
            candidates.len(),
            words.len(),
            letters.total()
        );

        let mut enumerator = Enumerator::new(&letters, &candidates).with_cancellation(self.token.clone());
        if let Some(timeout) = self.timeout {
            enumerator = enumerator.with_timeout(timeout);
        }
        let enumeration = enumerator.run();

        SearchOutcome {
            dictionary_words: words.len(),
            letters,
            results: enumeration.results,
            status: enumeration.status,
            stats: enumeration.stats,
            elapsed: start.elapsed(),
        }
    }
}

/// Handle to a search running on a worker thread
pub struct SearchHandle {
    receiver: Receiver<SearchOutcome>,
    token: CancellationToken,
    worker: Option<thread::JoinHandle<()>>,
}

impl SearchHandle {
    /// Ask the worker to stop; partial results are still delivered
    pub fn cancel(&self) {
        self.token.cancel();
    }

    pub fn token(&self) -> &CancellationToken {
        &self.token
    }

    /// Wait up to `timeout` for the outcome.
    /// Returns `Ok(None)` if the search is still running.
    pub fn wait_timeout(&mut self, timeout: Duration) -> anyhow::Result<Option<SearchOutcome>> {
        match self.receiver.recv_timeout(timeout) {
            Ok(outcome) => {
                self.join();
                Ok(Some(outcome))
            }
            Err(RecvTimeoutError::Timeout) => Ok(None),
            Err(RecvTimeoutError::Disconnected) => {
                self.join();
                anyhow::bail!("Search worker exited without a result")
            }
        }
    }

    /// Block until the search finishes
    pub fn wait(mut self) -> anyhow::Result<SearchOutcome> {
        let outcome = self
            .receiver
            .recv()
            .map_err(|_| anyhow::anyhow!("Search worker exited without a result"));
        self.join();
        outcome
    }

    fn join(&mut self) {
        if let Some(worker) = self.worker.take() {
            let _ = worker.join();
        }
    }
}

/// Run `searcher` on a dedicated worker thread
pub fn spawn(
    searcher: Searcher,
    raw_letters: String,
    dictionary: Arc<Vec<String>>,
) -> anyhow::Result<SearchHandle> {
    let (sender, receiver) = bounded(1);
    let token = searcher.token().clone();

    let worker = thread::Builder::new()
        .name("wordcover-search".to_string())
        .spawn(move || {
            let outcome = searcher.run(&raw_letters, dictionary.as_slice());
            debug!("Search worker finished: {:?}", outcome.status);
            // receiver may already be gone if the caller gave up
            let _ = sender.send(outcome);
        })?;

    Ok(SearchHandle {
        receiver,
        token,
        worker: Some(worker),
    })
}
