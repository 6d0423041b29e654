//! Corpus loading from a directory tree.
//!
//! Every regular file under the root is read, except files whose name is in
//! the skip list. Files are visited in path order so the concatenated text
//! is reproducible.

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::error::{Result, SpellerError};

/// Separator placed between documents when the corpus is concatenated.
pub const DOCUMENT_SEPARATOR: &str = "\n";

/// Text encoding of corpus files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextEncoding {
    /// ISO-8859-1: every byte is the code point of the same value.
    #[default]
    Latin1,
    /// UTF-8, with invalid sequences replaced by U+FFFD.
    Utf8,
}

impl TextEncoding {
    /// Decode raw file bytes.
    pub fn decode(&self, bytes: &[u8]) -> String {
        match self {
            TextEncoding::Latin1 => bytes.iter().map(|&b| b as char).collect(),
            TextEncoding::Utf8 => String::from_utf8_lossy(bytes).into_owned(),
        }
    }
}

/// Configuration for corpus loading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CorpusConfig {
    /// Encoding used to decode every file.
    pub encoding: TextEncoding,
    /// File names (not paths) that are never read.
    pub skip_files: BTreeSet<String>,
}

impl Default for CorpusConfig {
    fn default() -> Self {
        CorpusConfig {
            encoding: TextEncoding::default(),
            skip_files: BTreeSet::from(["cmds".to_string()]),
        }
    }
}

/// One file of the corpus.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorpusDocument {
    pub path: PathBuf,
    pub text: String,
}

/// The decoded contents of a corpus directory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Corpus {
    documents: Vec<CorpusDocument>,
}

impl Corpus {
    /// Build a corpus from in-memory documents.
    pub fn from_documents(documents: Vec<CorpusDocument>) -> Self {
        Corpus { documents }
    }

    /// The documents in path order.
    pub fn documents(&self) -> &[CorpusDocument] {
        &self.documents
    }

    /// All document texts joined with [`DOCUMENT_SEPARATOR`].
    pub fn text(&self) -> String {
        self.documents
            .iter()
            .map(|doc| doc.text.as_str())
            .collect::<Vec<_>>()
            .join(DOCUMENT_SEPARATOR)
    }

    /// Number of documents.
    pub fn len(&self) -> usize {
        self.documents.len()
    }

    /// Whether no document was read.
    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }
}

/// Reads a corpus directory tree.
#[derive(Debug, Clone, Default)]
pub struct CorpusReader {
    config: CorpusConfig,
}

impl CorpusReader {
    /// Create a reader with the given configuration.
    pub fn new(config: CorpusConfig) -> Self {
        CorpusReader { config }
    }

    /// Read every non-skipped file under `root`.
    ///
    /// `root` may also be a single file. A missing root is an I/O error.
    pub fn read<P: AsRef<Path>>(&self, root: P) -> Result<Corpus> {
        let root = root.as_ref();
        let metadata = fs::metadata(root)?;

        let mut paths = Vec::new();
        if metadata.is_file() {
            paths.push(root.to_path_buf());
        } else if metadata.is_dir() {
            self.collect_files(root, &mut paths)?;
        } else {
            return Err(SpellerError::corpus(format!(
                "{} is neither a file nor a directory",
                root.display()
            )));
        }
        paths.sort();

        let mut documents = Vec::with_capacity(paths.len());
        for path in paths {
            info!("reading corpus file {}", path.display());
            let bytes = fs::read(&path)?;
            let text = self.config.encoding.decode(&bytes);
            documents.push(CorpusDocument { path, text });
        }

        info!(
            "read {} corpus files from {}",
            documents.len(),
            root.display()
        );
        Ok(Corpus { documents })
    }

    fn collect_files(&self, dir: &Path, paths: &mut Vec<PathBuf>) -> Result<()> {
        for entry in fs::read_dir(dir)? {
            let entry = entry?;
            let path = entry.path();
            let file_type = entry.file_type()?;

            if file_type.is_dir() {
                self.collect_files(&path, paths)?;
            } else if file_type.is_file() {
                if self.is_skipped(&path) {
                    debug!("skipping corpus file {}", path.display());
                    continue;
                }
                paths.push(path);
            }
        }
        Ok(())
    }

    fn is_skipped(&self, path: &Path) -> bool {
        path.file_name()
            .and_then(|name| name.to_str())
            .is_some_and(|name| self.config.skip_files.contains(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_latin1_decoding() {
        let bytes = [b'c', b'a', b'f', 0xE9];
        assert_eq!(TextEncoding::Latin1.decode(&bytes), "café");
        assert_eq!(TextEncoding::Utf8.decode("café".as_bytes()), "café");
        assert_eq!(TextEncoding::Utf8.decode(&bytes), "caf\u{FFFD}");
    }

    #[test]
    fn test_read_directory_tree() {
        let dir = tempdir().unwrap();
        let nested = dir.path().join("article").join("sports");
        fs::create_dir_all(&nested).unwrap();

        fs::write(dir.path().join("a.txt"), "alpha text").unwrap();
        fs::write(nested.join("b.txt"), "beta text").unwrap();
        fs::write(nested.join("cmds"), "should never be read").unwrap();

        let corpus = CorpusReader::default().read(dir.path()).unwrap();

        assert_eq!(corpus.len(), 2);
        assert!(corpus.documents()[0].path.ends_with("a.txt"));
        assert!(corpus.documents()[1].path.ends_with("b.txt"));
        assert_eq!(corpus.text(), "alpha text\nbeta text");
    }

    #[test]
    fn test_custom_skip_list() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("keep.txt"), "keep").unwrap();
        fs::write(dir.path().join("README"), "skip").unwrap();

        let config = CorpusConfig {
            skip_files: BTreeSet::from(["README".to_string()]),
            ..Default::default()
        };
        let corpus = CorpusReader::new(config).read(dir.path()).unwrap();

        assert_eq!(corpus.len(), 1);
        assert_eq!(corpus.text(), "keep");
    }

    #[test]
    fn test_single_file_root() {
        let dir = tempdir().unwrap();
        let file = dir.path().join("only.txt");
        fs::write(&file, "just one").unwrap();

        let corpus = CorpusReader::default().read(&file).unwrap();
        assert_eq!(corpus.text(), "just one");
    }

    #[test]
    fn test_missing_root_is_io_error() {
        let dir = tempdir().unwrap();
        let result = CorpusReader::default().read(dir.path().join("missing"));
        assert!(matches!(result, Err(SpellerError::Io(_))));
    }

    #[test]
    fn test_empty_directory() {
        let dir = tempdir().unwrap();
        let corpus = CorpusReader::default().read(dir.path()).unwrap();
        assert!(corpus.is_empty());
        assert_eq!(corpus.text(), "");
    }
}
