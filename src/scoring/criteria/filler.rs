use regex::Regex;
use serde_json::json;

use super::{round_score, Criterion, ScoringContext};
use crate::config::FillerConfig;
use crate::error::RubricError;
use crate::scoring::result::{score_suffix, CriterionKind, CriterionResult};

/// Filler frequency: (filler, occurrences), in rubric order, zero counts dropped.
pub type FillerCounts = Vec<(String, usize)>;

/// Filler words as a share of all words.
///
/// Fillers match whole words or phrases only ("so" does not match "soft").
pub struct FillerWordRate {
    fillers: Vec<(String, Regex)>,
    zero_score_rate: f64,
    top_n: usize,
    max_score: u32,
}

impl FillerWordRate {
    pub fn new(config: &FillerConfig, max_score: u32) -> Result<Self, RubricError> {
        let fillers = config
            .words
            .iter()
            .map(|word| {
                let word = word.to_lowercase();
                let pattern = format!(r"\b{}\b", regex::escape(&word));
                Regex::new(&pattern)
                    .map(|re| (word, re))
                    .map_err(|source| RubricError::InvalidPattern { pattern, source })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            fillers,
            zero_score_rate: config.zero_score_rate,
            top_n: config.top_n,
            max_score,
        })
    }

    /// Count every filler independently over the lowercased transcript.
    pub fn count(&self, transcript: &str) -> FillerCounts {
        let normalized = transcript.to_lowercase();
        self.fillers
            .iter()
            .fold(Vec::new(), |mut counts, (word, re)| {
                let n = re.find_iter(&normalized).count();
                if n > 0 {
                    counts.push((word.clone(), n));
                }
                counts
            })
    }

    /// Most frequent fillers, count descending. Ties keep rubric order.
    pub fn top(&self, counts: &FillerCounts) -> FillerCounts {
        let mut ranked = counts.clone();
        ranked.sort_by(|a, b| b.1.cmp(&a.1));
        ranked.truncate(self.top_n);
        ranked
    }
}

impl Criterion for FillerWordRate {
    fn kind(&self) -> CriterionKind {
        CriterionKind::FillerWordRate
    }

    fn score(&self, transcript: &str, ctx: &ScoringContext<'_>) -> CriterionResult {
        let counts = self.count(transcript);
        let filler_count: usize = counts.iter().map(|(_, n)| n).sum();
        let word_count = ctx.word_count();

        let filler_rate = if word_count == 0 {
            0.0
        } else {
            (filler_count as f64 / word_count as f64) * 100.0
        };

        let max = self.max_score as f64;
        let score = round_score(max - (filler_rate / self.zero_score_rate) * max).min(self.max_score);

        let top = self.top(&counts);
        let mut feedback = format!(
            "Filler word rate: {:.2}%. Found {} filler words. {}",
            filler_rate,
            filler_count,
            score_suffix(score, self.max_score)
        );
        if filler_count > 0 {
            let listed = top
                .iter()
                .map(|(word, n)| format!("{} ({})", word, n))
                .collect::<Vec<_>>()
                .join(", ");
            feedback.push_str(&format!(" Top fillers: {}.", listed));
        }

        let top_json: Vec<_> = top
            .iter()
            .map(|(word, n)| json!({ "word": word, "count": n }))
            .collect();

        CriterionResult::new(self.kind(), score, self.max_score, feedback)
            .with_detail("filler_rate_percent", format!("{:.2}", filler_rate))
            .with_detail("filler_count", filler_count)
            .with_detail("top_fillers", top_json)
    }
}
