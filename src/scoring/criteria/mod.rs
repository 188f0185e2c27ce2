//! Criterion scorers.
//!
//! Each criterion is a [`Criterion`] strategy. The aggregator only sees the
//! trait, so a placeholder (grammar, sentiment) can be swapped for a
//! model-backed implementation without touching any other criterion.

mod filler;
mod flow;
mod grammar;
mod keywords;
mod salutation;
mod sentiment;
mod speech_rate;
mod vocabulary;

pub use filler::FillerWordRate;
pub use flow::Flow;
pub use grammar::{grammar_result, grammar_score, PlaceholderGrammar};
pub use keywords::KeywordPresence;
pub use salutation::SalutationLevel;
pub use sentiment::PlaceholderSentiment;
pub use speech_rate::{CalibrationOverride, SpeechRate};
pub use vocabulary::VocabularyRichness;

use super::engine::DurationDecision;
use super::result::{CriterionKind, CriterionResult};

/// Per-run inputs shared by every criterion.
///
/// Built once by the aggregator so word counts and the duration decision are
/// identical across criteria.
#[derive(Debug, Clone)]
pub struct ScoringContext<'a> {
    pub words: &'a [String],
    pub duration: DurationDecision,
}

impl ScoringContext<'_> {
    pub fn word_count(&self) -> usize {
        self.words.len()
    }
}

/// A scoring strategy for one rubric criterion.
pub trait Criterion: Send + Sync {
    fn kind(&self) -> CriterionKind;

    fn score(&self, transcript: &str, ctx: &ScoringContext<'_>) -> CriterionResult;
}

/// Lowercase and trim, the normalization used by prefix/suffix checks.
pub(crate) fn normalize(transcript: &str) -> String {
    transcript.to_lowercase().trim().to_string()
}

pub(crate) fn lowercase_all(phrases: &[String]) -> Vec<String> {
    phrases.iter().map(|p| p.to_lowercase()).collect()
}

/// Round half to even, so x.5 scores land on the even neighbour.
pub(crate) fn round_score(value: f64) -> u32 {
    value.max(0.0).round_ties_even() as u32
}
