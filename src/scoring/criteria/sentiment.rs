use super::{Criterion, ScoringContext};
use crate::config::SentimentConfig;
use crate::scoring::result::{score_suffix, CriterionKind, CriterionResult};

const PLACEHOLDER_NOTE: &str =
    "This score is a placeholder for the required NLP-based semantic analysis.";

/// Sentiment stand-in returning a fixed score.
pub struct PlaceholderSentiment {
    score: u32,
    max_score: u32,
}

impl PlaceholderSentiment {
    pub fn new(config: &SentimentConfig, max_score: u32) -> Self {
        Self {
            score: config.placeholder_score.min(max_score),
            max_score,
        }
    }
}

impl Criterion for PlaceholderSentiment {
    fn kind(&self) -> CriterionKind {
        CriterionKind::SentimentPositivity
    }

    fn score(&self, _transcript: &str, _ctx: &ScoringContext<'_>) -> CriterionResult {
        let feedback = format!(
            "Sentiment model placeholder: score fixed at {}. {}",
            self.score,
            score_suffix(self.score, self.max_score)
        );
        CriterionResult::new(self.kind(), self.score, self.max_score, feedback)
            .with_detail(
                "sentiment_score",
                format!("Placeholder: {}/{}", self.score, self.max_score),
            )
            .with_note(PLACEHOLDER_NOTE)
    }
}
