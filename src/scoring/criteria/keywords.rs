use regex::Regex;

use super::{Criterion, ScoringContext};
use crate::config::KeywordConfig;
use crate::error::RubricError;
use crate::scoring::result::{score_suffix, CriterionKind, CriterionResult};

/// Coverage of the mandatory self-introduction topics.
///
/// Each topic is a proxy regex over the lowercased transcript; a topic counts
/// once no matter how often it matches.
pub struct KeywordPresence {
    keywords: Vec<(String, Regex)>,
    points_per_keyword: u32,
    max_score: u32,
}

impl KeywordPresence {
    pub fn new(config: &KeywordConfig, max_score: u32) -> Result<Self, RubricError> {
        let keywords = config
            .keywords
            .iter()
            .map(|k| {
                Regex::new(&k.pattern)
                    .map(|re| (k.name.clone(), re))
                    .map_err(|source| RubricError::InvalidPattern {
                        pattern: k.pattern.clone(),
                        source,
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            keywords,
            points_per_keyword: config.points_per_keyword,
            max_score,
        })
    }
}

impl Criterion for KeywordPresence {
    fn kind(&self) -> CriterionKind {
        CriterionKind::KeywordPresence
    }

    fn score(&self, transcript: &str, _ctx: &ScoringContext<'_>) -> CriterionResult {
        let normalized = transcript.to_lowercase();

        let (found, missing): (Vec<&str>, Vec<&str>) = self
            .keywords
            .iter()
            .map(|(name, re)| (name.as_str(), re.is_match(&normalized)))
            .fold((Vec::new(), Vec::new()), |(mut found, mut missing), (name, hit)| {
                if hit {
                    found.push(name);
                } else {
                    missing.push(name);
                }
                (found, missing)
            });

        let score = (found.len() as u32 * self.points_per_keyword).min(self.max_score);
        let feedback = format!(
            "Found {}/{} mandatory keywords. {}",
            found.len(),
            self.keywords.len(),
            score_suffix(score, self.max_score)
        );

        CriterionResult::new(self.kind(), score, self.max_score, feedback)
            .with_detail("found_keywords", found)
            .with_detail("missing_keywords", missing)
    }
}
