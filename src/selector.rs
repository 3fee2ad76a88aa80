//! Lemma disambiguation policies.
//!
//! An analyzer usually returns several candidates per token; a policy picks
//! exactly one lemma from them. The policy is chosen once at startup and is
//! the same for every request.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use thiserror::Error;

use crate::morphology::AnalysisCandidate;

/// Outcome of selecting a lemma for one token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub lemma: String,
    /// True when no candidate existed and the raw token was used.
    pub used_fallback: bool,
}

impl Selection {
    fn chosen(candidate: &AnalysisCandidate) -> Self {
        Self {
            lemma: candidate.lemma.clone(),
            used_fallback: false,
        }
    }

    fn fallback(token: &str) -> Self {
        Self {
            lemma: token.to_string(),
            used_fallback: true,
        }
    }
}

pub trait LemmaPolicy: Send + Sync {
    /// Stable name, as accepted by `LEMMA_POLICY`.
    fn name(&self) -> &'static str;

    /// Pick one lemma for `token`. Must fall back to `token` itself when
    /// `analyses` is empty, and only then.
    fn select(&self, token: &str, analyses: &[AnalysisCandidate]) -> Selection;
}

/// Noun readings over verb readings over everything else; the first
/// candidate of the winning category is taken.
#[derive(Debug, Clone, Copy, Default)]
pub struct PosPreferring;

impl LemmaPolicy for PosPreferring {
    fn name(&self) -> &'static str {
        PolicyKind::PosPreferring.as_str()
    }

    fn select(&self, token: &str, analyses: &[AnalysisCandidate]) -> Selection {
        if analyses.is_empty() {
            return Selection::fallback(token);
        }
        let noun = analyses.iter().find(|c| c.pos.is_noun());
        let verb = analyses.iter().find(|c| c.pos.is_verb());
        let other = analyses
            .iter()
            .find(|c| !c.pos.is_noun() && !c.pos.is_verb());

        noun.or(verb)
            .or(other)
            .or_else(|| analyses.first())
            .map(Selection::chosen)
            .unwrap_or_else(|| Selection::fallback(token))
    }
}

/// Trust the analyzer's own ranking: the first candidate wins.
#[derive(Debug, Clone, Copy, Default)]
pub struct FirstCandidate;

impl LemmaPolicy for FirstCandidate {
    fn name(&self) -> &'static str {
        PolicyKind::FirstCandidate.as_str()
    }

    fn select(&self, token: &str, analyses: &[AnalysisCandidate]) -> Selection {
        analyses
            .first()
            .map(Selection::chosen)
            .unwrap_or_else(|| Selection::fallback(token))
    }
}

#[derive(Debug, Error)]
#[error("unknown lemma policy '{0}' (expected 'pos-preferring' or 'first-candidate')")]
pub struct UnknownPolicy(pub String);

/// Configurable policy names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PolicyKind {
    #[default]
    PosPreferring,
    FirstCandidate,
}

impl PolicyKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            PolicyKind::PosPreferring => "pos-preferring",
            PolicyKind::FirstCandidate => "first-candidate",
        }
    }

    pub fn build(self) -> Arc<dyn LemmaPolicy> {
        match self {
            PolicyKind::PosPreferring => Arc::new(PosPreferring),
            PolicyKind::FirstCandidate => Arc::new(FirstCandidate),
        }
    }
}

impl fmt::Display for PolicyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PolicyKind {
    type Err = UnknownPolicy;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "pos-preferring" | "pos" => Ok(PolicyKind::PosPreferring),
            "first-candidate" | "first" => Ok(PolicyKind::FirstCandidate),
            _ => Err(UnknownPolicy(s.to_string())),
        }
    }
}
