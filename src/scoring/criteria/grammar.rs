use super::{round_score, Criterion, ScoringContext};
use crate::config::GrammarConfig;
use crate::scoring::result::{score_suffix, CriterionKind, CriterionResult};

const PLACEHOLDER_NOTE: &str =
    "A placeholder was used for grammar errors. Integrate a grammar checker for real scoring.";

/// `(1 - min(errors_per_100_words / max_errors, 1)) * max_score`, rounded.
pub fn grammar_score(errors_per_100_words: f64, max_errors_per_100_words: f64, max_score: u32) -> u32 {
    let penalty = (errors_per_100_words.max(0.0) / max_errors_per_100_words).min(1.0);
    round_score((1.0 - penalty) * max_score as f64).min(max_score)
}

/// Build a grammar result from an error count.
///
/// A real grammar checker supplies its own `error_count` and reuses this so
/// the formula and rounding stay identical to the placeholder.
pub fn grammar_result(
    error_count: usize,
    word_count: usize,
    config: &GrammarConfig,
    max_score: u32,
) -> CriterionResult {
    let errors_per_100_words = if word_count == 0 {
        0.0
    } else {
        (error_count as f64 / word_count as f64) * 100.0
    };
    let score = grammar_score(errors_per_100_words, config.max_errors_per_100_words, max_score);

    let feedback = if error_count == 0 {
        format!(
            "No grammar errors detected (or placeholder used). {}",
            score_suffix(score, max_score)
        )
    } else {
        format!(
            "Grammar error rate: {:.2} errors/100 words. {}",
            errors_per_100_words,
            score_suffix(score, max_score)
        )
    };

    CriterionResult::new(CriterionKind::GrammarErrors, score, max_score, feedback)
        .with_detail("errors_per_100_words", format!("{:.2}", errors_per_100_words))
        .with_detail("error_count", error_count)
}

/// Grammar stand-in: always zero errors, always flagged as a placeholder.
pub struct PlaceholderGrammar {
    config: GrammarConfig,
    max_score: u32,
}

impl PlaceholderGrammar {
    pub fn new(config: &GrammarConfig, max_score: u32) -> Self {
        Self {
            config: config.clone(),
            max_score,
        }
    }
}

impl Criterion for PlaceholderGrammar {
    fn kind(&self) -> CriterionKind {
        CriterionKind::GrammarErrors
    }

    fn score(&self, _transcript: &str, ctx: &ScoringContext<'_>) -> CriterionResult {
        grammar_result(0, ctx.word_count(), &self.config, self.max_score).with_note(PLACEHOLDER_NOTE)
    }
}
