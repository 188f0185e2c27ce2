use super::{lowercase_all, normalize, Criterion, ScoringContext};
use crate::config::FlowConfig;
use crate::scoring::result::{score_suffix, CriterionKind, CriterionResult};

/// Structural completeness: an opening marker and a closing marker.
pub struct Flow {
    start_phrases: Vec<String>,
    end_phrases: Vec<String>,
    max_score: u32,
}

impl Flow {
    pub fn new(config: &FlowConfig, max_score: u32) -> Self {
        Self {
            start_phrases: lowercase_all(&config.start_phrases),
            end_phrases: lowercase_all(&config.end_phrases),
            max_score,
        }
    }
}

impl Criterion for Flow {
    fn kind(&self) -> CriterionKind {
        CriterionKind::Flow
    }

    fn score(&self, transcript: &str, _ctx: &ScoringContext<'_>) -> CriterionResult {
        let normalized = normalize(transcript);
        let has_start = self
            .start_phrases
            .iter()
            .any(|p| normalized.starts_with(p.as_str()));

        // Only trailing ASCII punctuation is stripped; inner punctuation stays.
        let closing = normalized
            .trim_end_matches(|c: char| c.is_ascii_punctuation())
            .trim();
        let has_end = self.end_phrases.iter().any(|p| closing.ends_with(p.as_str()));

        let half = self.max_score.div_ceil(2);
        let (score, message) = match (has_start, has_end) {
            (true, true) => (
                self.max_score,
                "Flow appears complete (Salutation and Closing detected).",
            ),
            (true, false) => (
                half,
                "Starting salutation is present, but a clear closing statement is missing.",
            ),
            (false, true) => (
                half,
                "Closing statement is present, but a clear starting salutation is missing.",
            ),
            (false, false) => (
                0,
                "Both starting salutation and closing statement are missing.",
            ),
        };

        let feedback = format!("{} {}", message, score_suffix(score, self.max_score));
        CriterionResult::new(self.kind(), score, self.max_score, feedback)
            .with_detail("has_start", has_start)
            .with_detail("has_end", has_end)
    }
}
