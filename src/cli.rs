//! Command-line interface definition for wordcover
//!
//! Provides argument parsing and validation for the exact-cover word search.

use crate::output::OutputFormat;
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

/// Find every combination of dictionary words that uses the given letters
/// exactly once
#[derive(Parser, Debug, Clone)]
#[command(
    name = "wordcover",
    author = "m0h1nd4",
    version,
    about = "Find every combination of dictionary words that uses all given letters exactly once",
    long_about = r#"
Find every way to split a set of letters into whole dictionary words.
Every letter must be used exactly once; results are grouped by the number
of words and sorted alphabetically inside each group.

EXAMPLES:
    # All covers of "listen" using a word list
    wordcover -d words.txt listen

    # Whitespace between letters is ignored
    wordcover -d words.txt "dormitory" "  "

    # Dictionary directory, only lowercase words of 2+ letters
    wordcover -d ./dicts --recursive -p "^[a-z]+$" --min-length 2 astronomer

    # Stop after ten seconds and keep what was found
    wordcover -d words.txt --timeout 10s conversationalists
"#
)]
pub struct Args {
    /// Letters to cover; whitespace is ignored
    #[arg(required = true, num_args = 1.., value_name = "LETTERS")]
    pub letters: Vec<String>,

    /// Dictionary file or directory (one word per line)
    #[arg(short, long, required = true, value_name = "PATH")]
    pub dictionary: PathBuf,

    /// Read dictionary directories recursively
    #[arg(short, long, default_value_t = false)]
    pub recursive: bool,

    /// Dictionary file extensions to read from a directory
    #[arg(long, value_name = "EXT", default_value = "txt")]
    pub extensions: String,

    /// Only use dictionary words matching this regex
    #[arg(short, long, value_name = "PATTERN")]
    pub pattern: Option<String>,

    /// Only use dictionary words with at least this many characters
    #[arg(long, value_name = "N")]
    pub min_length: Option<usize>,

    /// Write results to a file instead of stdout
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// One combination per line, without group headers
    #[arg(long, default_value_t = false)]
    pub flat: bool,

    /// Give up after this long and keep partial results (e.g. "500ms", "30s", "2m"; 0 = no limit)
    #[arg(long, value_name = "DURATION", default_value = "0")]
    pub timeout: String,

    /// Number of threads for candidate filtering (default: auto-detect)
    #[arg(short = 't', long, value_name = "NUM")]
    pub threads: Option<usize>,

    /// Buffer size for the output writer (default: 1MB)
    #[arg(long, value_name = "SIZE", default_value = "1MB")]
    pub buffer_size: String,

    /// Show detailed statistics
    #[arg(long, default_value_t = false)]
    pub stats: bool,

    /// Quiet mode - results only
    #[arg(short, long, default_value_t = false)]
    pub quiet: bool,

    /// Verbose mode - detailed logging
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,
}

impl Args {
    /// All letter arguments as one string
    pub fn letters_input(&self) -> String {
        self.letters.join(" ")
    }

    /// Parse the timeout; `None` means no limit
    pub fn parse_timeout(&self) -> anyhow::Result<Option<Duration>> {
        let timeout = parse_duration(&self.timeout)?;
        Ok(if timeout.is_zero() { None } else { Some(timeout) })
    }

    /// Parse buffer size string to bytes
    pub fn parse_buffer_size(&self) -> anyhow::Result<usize> {
        parse_size(&self.buffer_size)
    }

    /// Parse dictionary file extensions
    pub fn get_extensions(&self) -> Vec<String> {
        self.extensions
            .split(',')
            .map(|s| s.trim().trim_start_matches('.').to_lowercase())
            .filter(|s| !s.is_empty())
            .collect()
    }

    pub fn output_format(&self) -> OutputFormat {
        if self.flat {
            OutputFormat::Flat
        } else {
            OutputFormat::Grouped
        }
    }
}

/// Parse a human-readable duration ("250ms", "30s", "2m", "1h"; bare numbers are seconds)
pub fn parse_duration(duration_str: &str) -> anyhow::Result<Duration> {
    let s = duration_str.trim().to_lowercase();

    let (num_str, millis_per_unit) = if let Some(n) = s.strip_suffix("ms") {
        (n, 1)
    } else if let Some(n) = s.strip_suffix('s') {
        (n, 1000)
    } else if let Some(n) = s.strip_suffix('m') {
        (n, 60 * 1000)
    } else if let Some(n) = s.strip_suffix('h') {
        (n, 60 * 60 * 1000)
    } else {
        (s.as_str(), 1000)
    };

    let num: u64 = num_str
        .trim()
        .parse()
        .map_err(|_| anyhow::anyhow!("Invalid duration format: '{}'", duration_str))?;

    let millis = num
        .checked_mul(millis_per_unit)
        .ok_or_else(|| anyhow::anyhow!("Invalid duration format: '{}'", duration_str))?;

    Ok(Duration::from_millis(millis))
}

/// Parse human-readable size string to bytes
fn parse_size(size_str: &str) -> anyhow::Result<usize> {
    let size_str = size_str.trim().to_uppercase();

    let (num_str, multiplier) = if let Some(n) = size_str.strip_suffix("GB") {
        (n, 1024 * 1024 * 1024)
    } else if let Some(n) = size_str.strip_suffix("MB") {
        (n, 1024 * 1024)
    } else if let Some(n) = size_str.strip_suffix("KB") {
        (n, 1024)
    } else if let Some(n) = size_str.strip_suffix('B') {
        (n, 1)
    } else {
        (size_str.as_str(), 1)
    };

    let num: usize = num_str
        .trim()
        .parse()
        .map_err(|_| anyhow::anyhow!("Invalid size format: '{}'", size_str))?;

    Ok(num * multiplier)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(argv: &[&str]) -> Args {
        Args::try_parse_from(argv).unwrap()
    }

    #[test]
    fn test_parse_minimal() {
        let args = parse(&["wordcover", "-d", "words.txt", "eat"]);

        assert_eq!(args.letters, vec!["eat"]);
        assert_eq!(args.dictionary, PathBuf::from("words.txt"));
        assert_eq!(args.parse_timeout().unwrap(), None);
        assert_eq!(args.get_extensions(), vec!["txt"]);
        assert_eq!(args.output_format(), OutputFormat::Grouped);
        assert!(!args.recursive);
    }

    #[test]
    fn test_parse_multiple_letter_args() {
        let args = parse(&["wordcover", "--dictionary", "d", "ea", "t"]);
        assert_eq!(args.letters_input(), "ea t");
    }

    #[test]
    fn test_parse_options() {
        let args = parse(&[
            "wordcover", "-d", "dicts", "-r", "--extensions", "txt, .DIC", "-p", "^[a-z]+$",
            "--min-length", "2", "--flat", "--timeout", "1500ms", "-o", "out.txt", "listen",
        ]);

        assert!(args.recursive);
        assert_eq!(args.get_extensions(), vec!["txt", "dic"]);
        assert_eq!(args.pattern.as_deref(), Some("^[a-z]+$"));
        assert_eq!(args.min_length, Some(2));
        assert_eq!(args.output_format(), OutputFormat::Flat);
        assert_eq!(args.parse_timeout().unwrap(), Some(Duration::from_millis(1500)));
        assert_eq!(args.output, Some(PathBuf::from("out.txt")));
    }

    #[test]
    fn test_letters_required() {
        assert!(Args::try_parse_from(["wordcover", "-d", "words.txt"]).is_err());
        assert!(Args::try_parse_from(["wordcover", "eat"]).is_err());
    }

    #[test]
    fn test_parse_duration() {
        assert_eq!(parse_duration("250ms").unwrap(), Duration::from_millis(250));
        assert_eq!(parse_duration("30s").unwrap(), Duration::from_secs(30));
        assert_eq!(parse_duration("2m").unwrap(), Duration::from_secs(120));
        assert_eq!(parse_duration("1H").unwrap(), Duration::from_secs(3600));
        assert_eq!(parse_duration("5").unwrap(), Duration::from_secs(5));
        assert_eq!(parse_duration("0").unwrap(), Duration::ZERO);
        assert!(parse_duration("soon").is_err());
    }

    #[test]
    fn test_parse_duration_overflow() {
        let err = parse_duration("99999999999999999h").unwrap_err();
        assert!(err.to_string().contains("Invalid duration"));
    }

    #[test]
    fn test_parse_size() {
        assert_eq!(parse_size("64MB").unwrap(), 64 * 1024 * 1024);
        assert_eq!(parse_size("1024KB").unwrap(), 1024 * 1024);
        assert_eq!(parse_size("512").unwrap(), 512);
        assert!(parse_size("lots").is_err());
    }
}
