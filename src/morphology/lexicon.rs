//! Lemma dictionary loaded from tab-separated files.
//!
//! Format, one entry per line:
//!
//! ```text
//! # comment
//! kitap	Noun
//! yüz	Noun
//! yüz	Verb
//! ```

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use super::turkish::turkish_lowercase;
use super::Pos;

#[derive(Debug, Error)]
pub enum LexiconError {
    #[error("failed to read lexicon {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed lexicon line {line} in {}: expected 'lemma<TAB>POS'", .path.display())]
    Malformed { path: PathBuf, line: usize },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LexiconEntry {
    pub lemma: String,
    pub pos: Pos,
}

/// Entries keyed by Turkish-lowercased lemma. One key may carry several
/// POS readings; they keep file order.
#[derive(Debug, Default)]
pub struct Lexicon {
    entries: HashMap<String, Vec<LexiconEntry>>,
    len: usize,
}

impl Lexicon {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a single lexicon file.
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, LexiconError> {
        let mut lexicon = Self::new();
        lexicon.merge_file(path)?;
        Ok(lexicon)
    }

    /// Add every entry of `path`. Returns the number of new entries.
    pub fn merge_file<P: AsRef<Path>>(&mut self, path: P) -> Result<usize, LexiconError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| LexiconError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        self.merge_str(&content).map_err(|line| LexiconError::Malformed {
            path: path.to_path_buf(),
            line,
        })
    }

    /// Parse `content`, returning the 1-based number of the first bad line on error.
    fn merge_str(&mut self, content: &str) -> Result<usize, usize> {
        let mut added = 0;
        for (idx, raw) in content.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let mut columns = line.split('\t');
            let lemma = columns.next().map(str::trim).unwrap_or_default();
            let tag = columns.next().map(str::trim).unwrap_or_default();
            if lemma.is_empty() || tag.is_empty() {
                return Err(idx + 1);
            }
            if self.insert(lemma, Pos::from_tag(tag)) {
                added += 1;
            }
        }
        Ok(added)
    }

    /// Insert one reading; duplicates (same lemma and POS) are ignored.
    ///
    /// Verbs may be listed in infinitive form (`okumak`); they are keyed by
    /// their bare stem (`oku`) since that is what surfaces before suffixes.
    pub fn insert(&mut self, lemma: &str, pos: Pos) -> bool {
        let readings = self.entries.entry(lookup_key(lemma, &pos)).or_default();
        if readings.iter().any(|e| e.lemma == lemma && e.pos == pos) {
            return false;
        }
        readings.push(LexiconEntry {
            lemma: lemma.to_string(),
            pos,
        });
        self.len += 1;
        true
    }

    /// Readings for an already-lowercased key.
    pub fn lookup(&self, key: &str) -> &[LexiconEntry] {
        self.entries.get(key).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

fn lookup_key(lemma: &str, pos: &Pos) -> String {
    let key = turkish_lowercase(lemma);
    if pos.is_verb() {
        for infinitive in ["mek", "mak"] {
            if let Some(stem) = key.strip_suffix(infinitive) {
                if !stem.is_empty() {
                    return stem.to_string();
                }
            }
        }
    }
    key
}
