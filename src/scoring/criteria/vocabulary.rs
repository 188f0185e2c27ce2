use std::collections::HashSet;

use super::{Criterion, ScoringContext};
use crate::config::VocabularyConfig;
use crate::error::RubricError;
use crate::scoring::bands::{first_match, Band};
use crate::scoring::result::{score_suffix, CriterionKind, CriterionResult};

/// Vocabulary richness as a type-token ratio.
///
/// Band edges are used literally and inclusively; a ratio that lands in a gap
/// between two bands (e.g. 0.295) scores zero. An empty transcript scores zero
/// as well, even though a ratio of 0.0 sits inside the lowest band.
pub struct VocabularyRichness {
    bands: Vec<Band<u32>>,
    max_score: u32,
}

impl VocabularyRichness {
    pub fn new(config: &VocabularyConfig, max_score: u32) -> Result<Self, RubricError> {
        let bands = config
            .bands
            .iter()
            .map(|b| Band::parse(&b.range, b.score))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { bands, max_score })
    }
}

impl Criterion for VocabularyRichness {
    fn kind(&self) -> CriterionKind {
        CriterionKind::VocabularyRichness
    }

    fn score(&self, _transcript: &str, ctx: &ScoringContext<'_>) -> CriterionResult {
        let total = ctx.word_count();
        let distinct = ctx.words.iter().collect::<HashSet<_>>().len();
        let ttr = if total == 0 {
            0.0
        } else {
            distinct as f64 / total as f64
        };

        let band = if total == 0 { None } else { first_match(&self.bands, ttr) };
        let (score, feedback) = match band {
            Some(band) => {
                let score = band.value.min(self.max_score);
                (
                    score,
                    format!(
                        "Vocabulary TTR: {:.4} is in the range {}. {}",
                        ttr,
                        band.label,
                        score_suffix(score, self.max_score)
                    ),
                )
            }
            None => (
                0,
                format!(
                    "Vocabulary TTR: {:.4} is outside defined ranges. {}",
                    ttr,
                    score_suffix(0, self.max_score)
                ),
            ),
        };

        CriterionResult::new(self.kind(), score, self.max_score, feedback)
            .with_detail("ttr", format!("{:.4}", ttr))
            .with_detail("distinct_words", distinct)
            .with_detail("total_words", total)
    }
}
