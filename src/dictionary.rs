//! Dictionary loading module
//!
//! Loads word lists from a file or a directory of files. Files are memory-mapped,
//! their encoding is detected and transcoded to UTF-8, and every line becomes a
//! trimmed, lower-case word. Blank lines are dropped; repeated words are kept.

use ahash::RandomState;
use chardetng::EncodingDetector;
use encoding_rs::Encoding;
use hashbrown::HashSet;
use log::{debug, warn};
use std::fs::File;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

/// Errors raised while loading a dictionary
#[derive(Debug, Error)]
pub enum DictionaryError {
    /// The dictionary source could not be opened or read
    #[error("dictionary unavailable: {path:?}")]
    Unavailable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A dictionary directory contained no matching files
    #[error("no dictionary files with extensions {extensions:?} found in {path:?}")]
    NoFiles {
        path: PathBuf,
        extensions: Vec<String>,
    },
}

impl DictionaryError {
    fn unavailable(path: &Path, source: io::Error) -> Self {
        Self::Unavailable {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Options for locating dictionary files
#[derive(Debug, Clone)]
pub struct DictionarySource {
    pub path: PathBuf,
    /// Descend into subdirectories when `path` is a directory
    pub recursive: bool,
    /// Lower-case file extensions accepted inside a directory
    pub extensions: Vec<String>,
}

impl DictionarySource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            recursive: false,
            extensions: vec!["txt".to_string()],
        }
    }

    /// Collect the files to read, with their sizes
    pub fn collect_files(&self) -> Result<Vec<(PathBuf, u64)>, DictionaryError> {
        let metadata = std::fs::metadata(&self.path)
            .map_err(|e| DictionaryError::unavailable(&self.path, e))?;

        if metadata.is_file() {
            return Ok(vec![(self.path.clone(), metadata.len())]);
        }

        let walker = if self.recursive {
            WalkDir::new(&self.path)
        } else {
            WalkDir::new(&self.path).max_depth(1)
        };

        let mut files = Vec::new();
        for entry in walker.into_iter() {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    warn!("Skipping unreadable dictionary entry: {}", e);
                    continue;
                }
            };

            let path = entry.path();
            if !entry.file_type().is_file() {
                continue;
            }

            let accepted = path
                .extension()
                .and_then(|e| e.to_str())
                .map(|e| self.extensions.contains(&e.to_lowercase()))
                .unwrap_or(false);

            if accepted {
                let size = entry
                    .metadata()
                    .map_err(|e| DictionaryError::unavailable(path, e.into()))?
                    .len();
                files.push((path.to_path_buf(), size));
            }
        }

        if files.is_empty() {
            return Err(DictionaryError::NoFiles {
                path: self.path.clone(),
                extensions: self.extensions.clone(),
            });
        }

        files.sort();
        Ok(files)
    }

    /// Load every word from every collected file
    pub fn load(&self) -> Result<Dictionary, DictionaryError> {
        let files = self.collect_files()?;
        let mut dictionary = Dictionary::default();

        for (path, size) in &files {
            debug!("Loading dictionary file {:?} ({} bytes)", path, size);
            dictionary.extend_from_file(path)?;
            dictionary.files += 1;
            dictionary.bytes += size;
        }

        Ok(dictionary)
    }
}

/// Normalized dictionary words in source order
#[derive(Debug, Default)]
pub struct Dictionary {
    words: Vec<String>,
    seen: HashSet<String, RandomState>,
    duplicates: u64,
    files: usize,
    bytes: u64,
}

impl Dictionary {
    /// Build from in-memory lines, normalizing each one
    pub fn from_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut dictionary = Self::default();
        for line in lines {
            dictionary.push(line.as_ref());
        }
        dictionary
    }

    /// Add one raw line. Returns true if it produced a word.
    ///
    /// A repeated word is kept and counted, since each listing is a separate
    /// candidate for the search.
    pub fn push(&mut self, line: &str) -> bool {
        let word = line.trim();
        if word.is_empty() {
            return false;
        }

        let word = word.to_lowercase();
        if self.seen.contains(&word) {
            self.duplicates += 1;
        } else {
            self.seen.insert(word.clone());
        }

        self.words.push(word);
        true
    }

    fn extend_from_file(&mut self, path: &Path) -> Result<(), DictionaryError> {
        for line in MmapLineIterator::new(path)? {
            self.push(&line);
        }
        Ok(())
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }

    pub fn into_words(self) -> Vec<String> {
        self.words
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Words that repeat an earlier entry
    pub fn duplicates(&self) -> u64 {
        self.duplicates
    }

    pub fn files(&self) -> usize {
        self.files
    }

    /// Total size of the files read
    pub fn bytes(&self) -> u64 {
        self.bytes
    }
}

/// Detect the encoding of a byte sample
pub fn detect_encoding(sample: &[u8]) -> &'static Encoding {
    if sample.is_empty() {
        return encoding_rs::UTF_8;
    }

    if let Some((encoding, _)) = Encoding::for_bom(sample) {
        return encoding;
    }

    // a sample cut mid-character is still UTF-8
    match std::str::from_utf8(sample) {
        Ok(_) => return encoding_rs::UTF_8,
        Err(e) if e.error_len().is_none() => return encoding_rs::UTF_8,
        Err(_) => {}
    }

    let mut detector = EncodingDetector::new();
    detector.feed(sample, true);
    detector.guess(None, true)
}

/// Detect the encoding of a file by sampling its first 64KB
pub fn detect_file_encoding(path: &Path) -> Result<&'static Encoding, DictionaryError> {
    let mut file = File::open(path).map_err(|e| DictionaryError::unavailable(path, e))?;

    let mut sample = vec![0u8; 64 * 1024];
    let bytes_read = file
        .read(&mut sample)
        .map_err(|e| DictionaryError::unavailable(path, e))?;
    sample.truncate(bytes_read);

    Ok(detect_encoding(&sample))
}

/// Memory-mapped line reader that transcodes to UTF-8
pub struct MmapLineIterator {
    mmap: Option<memmap2::Mmap>,
    encoding: &'static Encoding,
    position: usize,
}

impl MmapLineIterator {
    pub fn new(path: &Path) -> Result<Self, DictionaryError> {
        let encoding = detect_file_encoding(path)?;
        let file = File::open(path).map_err(|e| DictionaryError::unavailable(path, e))?;
        let len = file
            .metadata()
            .map_err(|e| DictionaryError::unavailable(path, e))?
            .len();

        // mapping a zero-length file fails on some platforms
        let mmap = if len == 0 {
            None
        } else {
            // SAFETY: the map is read-only and dropped with the iterator
            Some(unsafe { memmap2::Mmap::map(&file) }.map_err(|e| DictionaryError::unavailable(path, e))?)
        };

        let position = mmap
            .as_deref()
            .and_then(Encoding::for_bom)
            .map(|(_, bom_len)| bom_len)
            .unwrap_or(0);

        if encoding != encoding_rs::UTF_8 {
            debug!("Dictionary {:?} detected as {}", path, encoding.name());
        }

        Ok(Self {
            mmap,
            encoding,
            position,
        })
    }

    fn bytes(&self) -> &[u8] {
        self.mmap.as_deref().unwrap_or(&[])
    }
}

impl Iterator for MmapLineIterator {
    type Item = String;

    fn next(&mut self) -> Option<Self::Item> {
        if self.position >= self.bytes().len() {
            return None;
        }

        // UTF-16 newlines are two bytes wide
        if self.encoding == encoding_rs::UTF_16LE || self.encoding == encoding_rs::UTF_16BE {
            return Some(self.next_utf16_line());
        }

        let remaining = &self.bytes()[self.position..];
        let line_end = memchr::memchr(b'\n', remaining)
            .map(|i| i + 1)
            .unwrap_or(remaining.len());

        let line_bytes = &remaining[..line_end];
        let line_bytes = line_bytes.strip_suffix(b"\n").unwrap_or(line_bytes);
        let line_bytes = line_bytes.strip_suffix(b"\r").unwrap_or(line_bytes);

        let line = if self.encoding == encoding_rs::UTF_8 {
            String::from_utf8_lossy(line_bytes).into_owned()
        } else {
            let (decoded, had_errors) = self.encoding.decode_without_bom_handling(line_bytes);
            if had_errors {
                warn!("Encoding errors in dictionary line, using lossy conversion");
            }
            decoded.into_owned()
        };

        self.position += line_end;
        Some(line)
    }
}

impl MmapLineIterator {
    fn next_utf16_line(&mut self) -> String {
        let newline: [u8; 2] = if self.encoding == encoding_rs::UTF_16LE {
            [b'\n', 0]
        } else {
            [0, b'\n']
        };

        let (line, line_end) = {
            let remaining = &self.bytes()[self.position..];
            let line_end = remaining
                .chunks(2)
                .position(|unit| unit == &newline[..])
                .map(|units| (units + 1) * 2)
                .unwrap_or(remaining.len());

            let (decoded, _) = self
                .encoding
                .decode_without_bom_handling(&remaining[..line_end]);
            (decoded.trim_end_matches(['\n', '\r']).to_string(), line_end)
        };

        self.position += line_end;
        line
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::{NamedTempFile, TempDir};

    fn write_file(dir: &Path, name: &str, content: &[u8]) -> PathBuf {
        let path = dir.join(name);
        std::fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_from_lines_normalizes() {
        let dictionary = Dictionary::from_lines(["  Eat ", "", "TEA", "eat", "\t", "at"]);

        assert_eq!(dictionary.words(), &["eat", "tea", "eat", "at"]);
        assert_eq!(dictionary.duplicates(), 1);
        assert_eq!(dictionary.len(), 4);
    }

    #[test]
    fn test_repeated_words_stay_candidates() {
        let lines = ["at", "ta", "at"];
        let dictionary = Dictionary::from_lines(lines);

        let loaded = crate::search::search("atat", dictionary.words());
        assert_eq!(loaded.to_strings(), vec!["at at", "at ta"]);
        assert_eq!(loaded, crate::search::search("atat", &lines));
    }

    #[test]
    fn test_load_single_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "eat\r\nAte\n\ntea\nat").unwrap();

        let dictionary = DictionarySource::new(file.path()).load().unwrap();

        assert_eq!(dictionary.words(), &["eat", "ate", "tea", "at"]);
        assert_eq!(dictionary.files(), 1);
    }

    #[test]
    fn test_load_utf8_with_bom() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(&[0xEF, 0xBB, 0xBF]).unwrap();
        write!(file, "über\nstraße\n").unwrap();

        let dictionary = DictionarySource::new(file.path()).load().unwrap();
        assert_eq!(dictionary.words(), &["über", "straße"]);
    }

    #[test]
    fn test_load_utf16le() {
        let mut bytes = vec![0xFF, 0xFE];
        for unit in "Eat\nTea\n".encode_utf16() {
            bytes.extend_from_slice(&unit.to_le_bytes());
        }

        let temp_dir = TempDir::new().unwrap();
        let path = write_file(temp_dir.path(), "words.txt", &bytes);

        let dictionary = DictionarySource::new(path).load().unwrap();
        assert_eq!(dictionary.words(), &["eat", "tea"]);
    }

    #[test]
    fn test_load_empty_file() {
        let file = NamedTempFile::new().unwrap();

        let dictionary = DictionarySource::new(file.path()).load().unwrap();
        assert!(dictionary.is_empty());
    }

    #[test]
    fn test_load_directory() {
        let temp_dir = TempDir::new().unwrap();
        write_file(temp_dir.path(), "a.txt", b"eat\nate\n");
        write_file(temp_dir.path(), "b.TXT", b"tea\neat\n");
        write_file(temp_dir.path(), "notes.md", b"ignored\n");
        std::fs::create_dir(temp_dir.path().join("nested")).unwrap();
        write_file(&temp_dir.path().join("nested"), "c.txt", b"at\n");

        let flat = DictionarySource::new(temp_dir.path()).load().unwrap();
        assert_eq!(flat.words(), &["eat", "ate", "tea", "eat"]);
        assert_eq!(flat.duplicates(), 1);
        assert_eq!(flat.files(), 2);

        let mut source = DictionarySource::new(temp_dir.path());
        source.recursive = true;
        let deep = source.load().unwrap();
        assert_eq!(deep.words(), &["eat", "ate", "tea", "eat", "at"]);
    }

    #[test]
    fn test_missing_dictionary_is_unavailable() {
        let temp_dir = TempDir::new().unwrap();
        let missing = temp_dir.path().join("missing.txt");

        let err = DictionarySource::new(&missing).load().unwrap_err();
        assert!(matches!(err, DictionaryError::Unavailable { .. }));
    }

    #[test]
    fn test_directory_without_files() {
        let temp_dir = TempDir::new().unwrap();
        write_file(temp_dir.path(), "words.csv", b"eat\n");

        let err = DictionarySource::new(temp_dir.path()).load().unwrap_err();
        assert!(matches!(err, DictionaryError::NoFiles { .. }));
    }

    #[test]
    fn test_detect_encoding() {
        assert_eq!(detect_encoding(b""), encoding_rs::UTF_8);
        assert_eq!(detect_encoding(&[0xFF, 0xFE, b'a', 0]), encoding_rs::UTF_16LE);
        assert_eq!(detect_encoding("plain words\n".as_bytes()), encoding_rs::UTF_8);
    }
}
