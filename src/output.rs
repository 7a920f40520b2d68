//! Output management module
//!
//! Writes search results to stdout or a file, either grouped by word count or
//! as a flat list of combinations.

use crate::dedup::ResultSet;
use std::fs::OpenOptions;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

/// Default buffer size for result writing (1MB)
pub const DEFAULT_BUFFER_SIZE: usize = 1024 * 1024;

/// Layout of the written results
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// A header per word count, then its combinations
    Grouped,
    /// One combination per line, nothing else
    Flat,
}

/// Buffered result writer
pub struct ResultWriter {
    writer: BufWriter<Box<dyn Write + Send>>,
    path: Option<PathBuf>,
    lines_written: u64,
    bytes_written: u64,
}

impl ResultWriter {
    /// Write to standard output
    pub fn stdout() -> Self {
        Self::from_writer(Box::new(io::stdout()), None, DEFAULT_BUFFER_SIZE)
    }

    /// Create (or truncate) an output file
    pub fn to_file(path: PathBuf, buffer_size: usize) -> anyhow::Result<Self> {
        if let Some(parent) = path.parent() {
            ensure_output_dir(parent)?;
        }

        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&path)
            .map_err(|e| anyhow::anyhow!("Cannot create output file {:?}: {}", path, e))?;

        Ok(Self::from_writer(Box::new(file), Some(path), buffer_size))
    }

    pub fn from_writer(writer: Box<dyn Write + Send>, path: Option<PathBuf>, buffer_size: usize) -> Self {
        Self {
            writer: BufWriter::with_capacity(buffer_size, writer),
            path,
            lines_written: 0,
            bytes_written: 0,
        }
    }

    /// Write a line to the output
    pub fn write_line(&mut self, line: &str) -> anyhow::Result<()> {
        writeln!(self.writer, "{}", line)?;
        self.lines_written += 1;
        self.bytes_written += line.len() as u64 + 1; // +1 for newline
        Ok(())
    }

    /// Write all results in the given layout
    pub fn write_results(&mut self, results: &ResultSet, format: OutputFormat) -> anyhow::Result<()> {
        match format {
            OutputFormat::Flat => {
                for combination in results {
                    self.write_line(combination.as_str())?;
                }
            }
            OutputFormat::Grouped => {
                for (i, (word_count, group)) in results.groups().into_iter().enumerate() {
                    if i > 0 {
                        self.write_line("")?;
                    }
                    self.write_line(&group_header(word_count, group.len()))?;
                    for combination in group {
                        self.write_line(combination.as_str())?;
                    }
                }
            }
        }

        Ok(())
    }

    /// Flush the buffer
    pub fn flush(&mut self) -> anyhow::Result<()> {
        self.writer.flush()?;
        Ok(())
    }

    /// Output path, `None` for stdout
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn lines_written(&self) -> u64 {
        self.lines_written
    }

    pub fn bytes_written(&self) -> u64 {
        self.bytes_written
    }
}

impl Drop for ResultWriter {
    fn drop(&mut self) {
        let _ = self.writer.flush();
    }
}

/// Header line for one word-count group
pub fn group_header(word_count: usize, combinations: usize) -> String {
    format!(
        "# {} word{} ({} combination{})",
        word_count,
        if word_count == 1 { "" } else { "s" },
        combinations,
        if combinations == 1 { "" } else { "s" },
    )
}

/// Ensure output directory exists
pub fn ensure_output_dir(path: &Path) -> anyhow::Result<()> {
    if !path.as_os_str().is_empty() && !path.exists() {
        std::fs::create_dir_all(path)?;
    }
    Ok(())
}
