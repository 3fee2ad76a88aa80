//! Lexicon-backed Turkish analyzer.
//!
//! Every stem/rest split of the normalized token is tried: the stem (or its
//! hardened dictionary form, `kitab` -> `kitap`) must be a lexicon key and the
//! rest must segment into the suffix chain of that reading's POS. Candidates
//! are ranked by fewest suffixes, then longest stem, then lexicon order.

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use super::lexicon::{Lexicon, LexiconError};
use super::suffixes::{segment, Slot, NOUN_CHAIN, VERB_CHAIN};
use super::{AnalysisCandidate, AnalysisError, AnalysisSet, MorphAnalyzer, Pos};

/// Dictionary file expected inside the model directory.
pub const LEXICON_FILE: &str = "lexicon.tsv";

/// Longest normalized token the analyzer will segment. Longer tokens
/// (URLs, hashes) get no readings and fall back to their surface form.
pub const MAX_TOKEN_CHARS: usize = 64;

const VOWELS: &[char] = &['a', 'e', 'ı', 'i', 'o', 'ö', 'u', 'ü'];

/// Lowercase with Turkish dotted/dotless i rules.
pub fn turkish_lowercase(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            'I' => out.push('ı'),
            'İ' => out.push('i'),
            _ => out.extend(c.to_lowercase()),
        }
    }
    out
}

/// Strip edge punctuation and apostrophes (`İstanbul'da` -> `istanbulda`).
fn normalize(token: &str) -> String {
    let core = token.trim_matches(|c: char| !c.is_alphanumeric());
    let joined: String = core.chars().filter(|&c| !matches!(c, '\'' | '’')).collect();
    turkish_lowercase(&joined)
}

/// Dictionary form of a stem whose final consonant softened before a vowel.
fn harden(stem: &str) -> Option<String> {
    let last = stem.chars().last()?;
    let hard = match last {
        'b' => 'p',
        'c' => 'ç',
        'd' => 't',
        'g' | 'ğ' => 'k',
        _ => return None,
    };
    let mut out = stem[..stem.len() - last.len_utf8()].to_string();
    out.push(hard);
    Some(out)
}

fn chain_for(pos: &Pos) -> &'static [Slot] {
    match pos {
        Pos::Noun => NOUN_CHAIN,
        Pos::Verb => VERB_CHAIN,
        Pos::Other(_) => &[],
    }
}

#[derive(Debug)]
pub struct TurkishAnalyzer {
    lexicon: Lexicon,
}

impl TurkishAnalyzer {
    pub fn from_lexicon(lexicon: Lexicon) -> Self {
        Self { lexicon }
    }

    /// Load `<model_dir>/lexicon.tsv`, then every `*.tsv` overlay found in
    /// `cache_dir` in file-name order. A missing cache directory is fine; a
    /// missing model lexicon is not.
    pub fn load<P: AsRef<Path>, Q: AsRef<Path>>(
        model_dir: P,
        cache_dir: Q,
    ) -> Result<Self, LexiconError> {
        let model_lexicon = model_dir.as_ref().join(LEXICON_FILE);
        let mut lexicon = Lexicon::load_from(&model_lexicon)?;
        info!(
            "Loaded {} lexicon entries from {}",
            lexicon.len(),
            model_lexicon.display()
        );

        for overlay in overlay_files(cache_dir.as_ref())? {
            let added = lexicon.merge_file(&overlay)?;
            debug!("Merged {} entries from overlay {}", added, overlay.display());
        }

        Ok(Self::from_lexicon(lexicon))
    }

    fn push_readings(
        &self,
        key: &str,
        surface_stem: &str,
        rest: &str,
        out: &mut Vec<AnalysisCandidate>,
    ) {
        for entry in self.lexicon.lookup(key) {
            if let Some(suffixes) = segment(rest, chain_for(&entry.pos)) {
                let candidate = AnalysisCandidate {
                    lemma: entry.lemma.clone(),
                    pos: entry.pos.clone(),
                    surface_stem: surface_stem.to_string(),
                    suffixes: suffixes.into_iter().map(str::to_string).collect(),
                };
                if !out.contains(&candidate) {
                    out.push(candidate);
                }
            }
        }
    }
}

impl MorphAnalyzer for TurkishAnalyzer {
    fn analyze(&self, token: &str) -> Result<AnalysisSet, AnalysisError> {
        let word = normalize(token);
        let len = word.chars().count();
        if len > MAX_TOKEN_CHARS {
            debug!("Skipping analysis of {len}-character token (max {MAX_TOKEN_CHARS})");
            return Ok(Vec::new());
        }

        let mut candidates = Vec::new();
        let boundaries = word
            .char_indices()
            .map(|(i, _)| i)
            .skip(1)
            .chain(std::iter::once(word.len()));
        for boundary in boundaries {
            let (stem, rest) = word.split_at(boundary);
            self.push_readings(stem, stem, rest, &mut candidates);
            if rest.starts_with(VOWELS) {
                if let Some(hard) = harden(stem) {
                    self.push_readings(&hard, stem, rest, &mut candidates);
                }
            }
        }

        candidates.sort_by(|a, b| {
            a.suffixes
                .len()
                .cmp(&b.suffixes.len())
                .then_with(|| b.surface_stem.len().cmp(&a.surface_stem.len()))
        });
        Ok(candidates)
    }

    fn entry_count(&self) -> usize {
        self.lexicon.len()
    }
}

fn overlay_files(dir: &Path) -> Result<Vec<PathBuf>, LexiconError> {
    if !dir.is_dir() {
        return Ok(Vec::new());
    }
    let read_dir = std::fs::read_dir(dir).map_err(|source| LexiconError::Io {
        path: dir.to_path_buf(),
        source,
    })?;
    let mut files: Vec<PathBuf> = read_dir
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.is_file() && path.extension().is_some_and(|ext| ext == "tsv"))
        .collect();
    files.sort();
    Ok(files)
}
