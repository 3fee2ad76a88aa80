//! Morphological analysis provider.
//!
//! The pipeline only sees the [`MorphAnalyzer`] trait. The bundled
//! implementation is [`TurkishAnalyzer`], a lexicon-backed suffix-chain
//! analyzer; anything else that can produce ranked candidates per token
//! can be plugged in behind the same trait.

mod lexicon;
mod suffixes;
mod turkish;

pub use lexicon::{Lexicon, LexiconEntry, LexiconError};
pub use turkish::{turkish_lowercase, TurkishAnalyzer, LEXICON_FILE, MAX_TOKEN_CHARS};

use std::fmt;
use thiserror::Error;

/// Coarse part-of-speech tag attached to one candidate.
///
/// Noun and Verb drive disambiguation; every other tag is carried verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Pos {
    Noun,
    Verb,
    Other(String),
}

impl Pos {
    /// Parse a lexicon tag. `Noun`/`Verb` match case-insensitively.
    pub fn from_tag(tag: &str) -> Self {
        let tag = tag.trim();
        if tag.eq_ignore_ascii_case("noun") {
            Pos::Noun
        } else if tag.eq_ignore_ascii_case("verb") {
            Pos::Verb
        } else {
            Pos::Other(tag.to_string())
        }
    }

    pub fn is_noun(&self) -> bool {
        matches!(self, Pos::Noun)
    }

    pub fn is_verb(&self) -> bool {
        matches!(self, Pos::Verb)
    }
}

impl fmt::Display for Pos {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Pos::Noun => f.write_str("Noun"),
            Pos::Verb => f.write_str("Verb"),
            Pos::Other(tag) => f.write_str(tag),
        }
    }
}

/// One morphological parse of a token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisCandidate {
    /// Dictionary form as written in the lexicon.
    pub lemma: String,
    pub pos: Pos,
    /// Stem as it appears in the surface form (may be softened, e.g. `kitab`).
    pub surface_stem: String,
    /// Suffix allomorphs in surface order.
    pub suffixes: Vec<String>,
}

impl AnalysisCandidate {
    pub fn new(lemma: impl Into<String>, pos: Pos) -> Self {
        let lemma = lemma.into();
        Self {
            surface_stem: lemma.clone(),
            lemma,
            pos,
            suffixes: Vec::new(),
        }
    }
}

/// Debug form used in detail output: `[kitap:Noun] kitab+ı`.
impl fmt::Display for AnalysisCandidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}:{}] {}", self.lemma, self.pos, self.surface_stem)?;
        for suffix in &self.suffixes {
            write!(f, "+{}", suffix)?;
        }
        Ok(())
    }
}

/// Ranked candidates for a single token. Empty means "no parse found".
pub type AnalysisSet = Vec<AnalysisCandidate>;

#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("analyzer failure: {0}")]
    Internal(String),
}

/// Provider seam consumed by the pipeline.
///
/// Implementations are constructed once and shared read-only across request
/// handlers, hence `Send + Sync` and `&self` receivers.
pub trait MorphAnalyzer: Send + Sync {
    /// All candidate parses of `token`, most likely first.
    fn analyze(&self, token: &str) -> Result<AnalysisSet, AnalysisError>;

    /// Legacy simplified form: distinct candidate lemmas in ranking order.
    fn lemmatize(&self, token: &str) -> Result<Vec<String>, AnalysisError> {
        let mut lemmas: Vec<String> = Vec::new();
        for candidate in self.analyze(token)? {
            if !lemmas.contains(&candidate.lemma) {
                lemmas.push(candidate.lemma);
            }
        }
        Ok(lemmas)
    }

    /// Number of dictionary entries backing the analyzer.
    fn entry_count(&self) -> usize;
}
