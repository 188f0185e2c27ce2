use super::{lowercase_all, normalize, Criterion, ScoringContext};
use crate::config::{SalutationConfig, SalutationTier};
use crate::scoring::result::{score_suffix, CriterionKind, CriterionResult};

const NO_SALUTATION: &str = "No Salutation";

/// Opening greeting quality. Tiers are checked top-down and the first tier
/// with a phrase the transcript starts with wins, regardless of phrase length.
pub struct SalutationLevel {
    tiers: Vec<SalutationTier>,
    max_score: u32,
}

impl SalutationLevel {
    pub fn new(config: &SalutationConfig, max_score: u32) -> Self {
        let tiers = config
            .tiers
            .iter()
            .map(|tier| SalutationTier {
                name: tier.name.clone(),
                score: tier.score,
                phrases: lowercase_all(&tier.phrases),
            })
            .collect();
        Self { tiers, max_score }
    }

    fn matching_tier(&self, normalized: &str) -> Option<&SalutationTier> {
        self.tiers
            .iter()
            .find(|tier| tier.phrases.iter().any(|p| normalized.starts_with(p.as_str())))
    }
}

impl Criterion for SalutationLevel {
    fn kind(&self) -> CriterionKind {
        CriterionKind::SalutationLevel
    }

    fn score(&self, transcript: &str, _ctx: &ScoringContext<'_>) -> CriterionResult {
        let normalized = normalize(transcript);

        let (category, score, feedback) = match self.matching_tier(&normalized) {
            Some(tier) => {
                let score = tier.score.min(self.max_score);
                (
                    tier.name.as_str(),
                    score,
                    format!(
                        "Salutation found: '{}' {}",
                        tier.name,
                        score_suffix(score, self.max_score)
                    ),
                )
            }
            None => (
                NO_SALUTATION,
                0,
                format!(
                    "No clear salutation found at the beginning of the transcript. {}",
                    score_suffix(0, self.max_score)
                ),
            ),
        };

        CriterionResult::new(self.kind(), score, self.max_score, feedback)
            .with_detail("category", category)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::criteria::test_support::run;

    fn scorer() -> SalutationLevel {
        SalutationLevel::new(&SalutationConfig::default(), 5)
    }

    #[test]
    fn test_good_tier() {
        let result = run(&scorer(), "Hello everyone, myself Muskan.", 52.0);
        assert_eq!(result.score, 4);
        assert_eq!(result.details["category"], "Good");
        assert_eq!(result.feedback, "Salutation found: 'Good' (Score: 4/5)");
    }

    #[test]
    fn test_normal_tier() {
        let result = run(&scorer(), "  Hello there", 0.0);
        assert_eq!(result.score, 2);
        assert_eq!(result.details["category"], "Normal");
    }

    #[test]
    fn test_excellent_tier_case_insensitive() {
        let result = run(&scorer(), "EXCITED TO INTRODUCE myself today", 0.0);
        assert_eq!(result.score, 5);
        assert_eq!(result.details["category"], "Excellent");
    }

    #[test]
    fn test_tier_priority_beats_longer_match() {
        let config = SalutationConfig {
            tiers: vec![
                SalutationTier {
                    name: "Top".to_string(),
                    score: 5,
                    phrases: vec!["hel".to_string()],
                },
                SalutationTier {
                    name: "Lower".to_string(),
                    score: 2,
                    phrases: vec!["hello everyone".to_string()],
                },
            ],
        };
        let result = run(&SalutationLevel::new(&config, 5), "hello everyone", 0.0);
        assert_eq!(result.details["category"], "Top");
    }

    #[test]
    fn test_no_salutation() {
        let result = run(&scorer(), "My name is Alex.", 0.0);
        assert_eq!(result.score, 0);
        assert_eq!(result.details["category"], "No Salutation");
        assert!(result.feedback.starts_with("No clear salutation"));
    }

    #[test]
    fn test_greeting_later_in_text_ignored() {
        let result = run(&scorer(), "Well, hello everyone", 0.0);
        assert_eq!(result.score, 0);
    }
}
