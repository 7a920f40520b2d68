//! Search runner
//!
//! Loads the dictionary, runs the search on a worker thread behind a spinner,
//! and writes the grouped results.

use crate::cli::Args;
use crate::dictionary::DictionarySource;
use crate::filter::DictionaryFilter;
use crate::output::{OutputFormat, ResultWriter};
use crate::progress::{
    create_spinner, print_header, print_info, print_success, print_summary, print_warning,
};
use crate::search::{self, SearchOutcome, Searcher};

use bytesize::ByteSize;
use colored::*;
use log::info;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

/// Spinner refresh interval while the worker searches
const SPINNER_TICK: Duration = Duration::from_millis(100);

/// Runner configuration
#[derive(Debug, Clone)]
pub struct SearchConfig {
    pub letters: String,
    pub dictionary: PathBuf,
    pub recursive: bool,
    pub extensions: Vec<String>,
    pub pattern: Option<String>,
    pub min_length: Option<usize>,
    pub output: Option<PathBuf>,
    pub format: OutputFormat,
    pub timeout: Option<Duration>,
    pub buffer_size: usize,
    pub stats: bool,
    pub quiet: bool,
    pub verbose: bool,
}

impl SearchConfig {
    pub fn from_args(args: &Args) -> anyhow::Result<Self> {
        Ok(Self {
            letters: args.letters_input(),
            dictionary: args.dictionary.clone(),
            recursive: args.recursive,
            extensions: args.get_extensions(),
            pattern: args.pattern.clone(),
            min_length: args.min_length,
            output: args.output.clone(),
            format: args.output_format(),
            timeout: args.parse_timeout()?,
            buffer_size: args.parse_buffer_size()?,
            stats: args.stats,
            quiet: args.quiet,
            verbose: args.verbose,
        })
    }
}

/// Drives one search from dictionary to written results
pub struct Runner {
    config: SearchConfig,
}

impl Runner {
    pub fn new(config: SearchConfig) -> Self {
        Self { config }
    }

    pub fn run(&self) -> anyhow::Result<SearchOutcome> {
        let source = DictionarySource {
            path: self.config.dictionary.clone(),
            recursive: self.config.recursive,
            extensions: self.config.extensions.clone(),
        };

        if !self.config.quiet {
            print_header("Loading dictionary...");
        }

        let dictionary = source.load()?;
        let dictionary_bytes = dictionary.bytes();

        if !self.config.quiet {
            print_info(&format!(
                "{} words from {} file{} ({})",
                dictionary.len(),
                dictionary.files(),
                if dictionary.files() == 1 { "" } else { "s" },
                ByteSize(dictionary_bytes)
            ));
            if dictionary.duplicates() > 0 && self.config.verbose {
                print_info(&format!("{} words repeat an earlier entry", dictionary.duplicates()));
            }
            if dictionary.is_empty() {
                print_warning("Dictionary is empty, no combinations can be found");
            }
        }

        let filter = DictionaryFilter::new(self.config.pattern.as_deref(), self.config.min_length)?;
        let searcher = Searcher::new()
            .with_filter(filter)
            .with_timeout(self.config.timeout);

        let outcome = self.search(searcher, Arc::new(dictionary.into_words()))?;
        self.write(&outcome)?;

        if self.config.stats && !self.config.quiet {
            print_summary(&outcome, dictionary_bytes);
        }

        Ok(outcome)
    }

    fn search(&self, searcher: Searcher, words: Arc<Vec<String>>) -> anyhow::Result<SearchOutcome> {
        if !self.config.quiet {
            print_header(&format!("Searching \"{}\"...", self.config.letters.trim()));
        }

        let pb = if self.config.quiet {
            indicatif::ProgressBar::hidden()
        } else {
            create_spinner("Enumerating combinations...")
        };

        let mut handle = search::spawn(searcher, self.config.letters.clone(), words)?;
        let outcome = loop {
            if let Some(outcome) = handle.wait_timeout(SPINNER_TICK)? {
                break outcome;
            }
            pb.tick();
        };

        if outcome.status.is_complete() {
            pb.finish_with_message("Complete".green().to_string());
        } else {
            pb.finish_with_message("Stopped early".yellow().to_string());
        }

        info!(
            "Search finished with {:?}: {} results in {:?}",
            outcome.status,
            outcome.results.len(),
            outcome.elapsed
        );

        Ok(outcome)
    }

    fn write(&self, outcome: &SearchOutcome) -> anyhow::Result<()> {
        if !self.config.quiet {
            if outcome.results.is_empty() {
                print_warning("No combinations found");
            } else {
                print_success(&format!("Found {} combinations", outcome.results.len()));
            }
            if !outcome.status.is_complete() {
                print_warning("Search stopped early, results are incomplete");
            }
        }

        let mut writer = match self.config.output {
            Some(ref path) => ResultWriter::to_file(path.clone(), self.config.buffer_size)?,
            None => {
                if !self.config.quiet && !outcome.results.is_empty() {
                    print_header("Results");
                }
                ResultWriter::stdout()
            }
        };

        writer.write_results(&outcome.results, self.config.format)?;
        writer.flush()?;

        if let Some(path) = writer.path() {
            if !self.config.quiet {
                print_success(&format!("Output written to: {:?}", path));
            }
        }

        Ok(())
    }
}
