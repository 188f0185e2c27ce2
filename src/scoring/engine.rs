use super::criteria::{
    Criterion, FillerWordRate, Flow, KeywordPresence, PlaceholderGrammar, PlaceholderSentiment,
    SalutationLevel, ScoringContext, SpeechRate, VocabularyRichness,
};
use super::result::OverallResult;
use super::tokenizer::tokenize;
use super::validation::validate_rubric;
use crate::config::{RubricConfig, RubricWeights};
use crate::error::RubricError;

/// The duration used for one scoring run, decided once and shared.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DurationDecision {
    pub seconds: f64,
    pub is_estimated: bool,
}

impl DurationDecision {
    /// Resolve the caller's duration.
    ///
    /// - no words: duration is 0 regardless of input
    /// - missing (<= 0) duration: estimated from `standard_wpm`
    /// - otherwise: the supplied duration as-is, even when not finite
    pub fn resolve(supplied_seconds: f64, word_count: usize, standard_wpm: f64) -> Self {
        if word_count == 0 {
            DurationDecision {
                seconds: 0.0,
                is_estimated: false,
            }
        } else if supplied_seconds <= 0.0 {
            DurationDecision {
                seconds: (word_count as f64 / standard_wpm) * 60.0,
                is_estimated: true,
            }
        } else {
            DurationDecision {
                seconds: supplied_seconds,
                is_estimated: false,
            }
        }
    }
}

/// Runs every criterion over a transcript and sums the weighted result.
///
/// Built once from a validated rubric; holds no per-run state, so one scorer
/// can serve any number of independent calls.
pub struct Scorer {
    criteria: Vec<Box<dyn Criterion>>,
    weights: RubricWeights,
    standard_wpm: f64,
}

impl std::fmt::Debug for Scorer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scorer")
            .field("criteria", &self.criteria.iter().map(|c| c.kind()).collect::<Vec<_>>())
            .field("weights", &self.weights)
            .field("standard_wpm", &self.standard_wpm)
            .finish()
    }
}

impl Scorer {
    /// Validate `config` and build the standard criteria from it.
    pub fn new(config: &RubricConfig) -> Result<Self, RubricError> {
        validate_rubric(config).map_err(RubricError::Invalid)?;

        let w = &config.weights;
        let criteria: Vec<Box<dyn Criterion>> = vec![
            Box::new(SpeechRate::new(&config.speech_rate, w.speech_rate)?),
            Box::new(SalutationLevel::new(&config.salutation, w.salutation_level)),
            Box::new(KeywordPresence::new(&config.keywords, w.keyword_presence)?),
            Box::new(Flow::new(&config.flow, w.flow)),
            Box::new(VocabularyRichness::new(&config.vocabulary, w.vocabulary_richness)?),
            Box::new(FillerWordRate::new(&config.filler, w.filler_word_rate)?),
            Box::new(PlaceholderGrammar::new(&config.grammar, w.grammar_errors)),
            Box::new(PlaceholderSentiment::new(&config.sentiment, w.sentiment_positivity)),
        ];

        Ok(Self {
            criteria,
            weights: w.clone(),
            standard_wpm: config.speech_rate.standard_wpm,
        })
    }

    /// Replace the criterion of the same kind, keeping evaluation order.
    pub fn with_criterion(mut self, criterion: Box<dyn Criterion>) -> Self {
        let kind = criterion.kind();
        if let Some(slot) = self.criteria.iter_mut().find(|c| c.kind() == kind) {
            *slot = criterion;
        } else {
            self.criteria.push(criterion);
        }
        self
    }

    /// Score `transcript`. A `duration_seconds` of 0 (or less) means unknown.
    pub fn calculate_final_score(&self, transcript: &str, duration_seconds: f64) -> OverallResult {
        let words = tokenize(transcript);
        let duration = DurationDecision::resolve(duration_seconds, words.len(), self.standard_wpm);
        tracing::debug!(
            word_count = words.len(),
            seconds = duration.seconds,
            estimated = duration.is_estimated,
            "resolved duration"
        );

        let ctx = ScoringContext {
            words: &words,
            duration,
        };

        let results = self
            .criteria
            .iter()
            .map(|criterion| {
                let max_score = self.weights.get(criterion.kind());
                let result = criterion.score(transcript, &ctx).capped_at(max_score);
                tracing::debug!(
                    criterion = %result.criterion,
                    score = result.score,
                    max_score = result.max_score,
                    "criterion scored"
                );
                result
            })
            .collect();

        let overall = OverallResult::from_results(results);
        tracing::debug!(overall = overall.overall_score, "transcript scored");
        overall
    }
}

/// Score with the built-in rubric.
pub fn calculate_final_score(
    transcript: &str,
    duration_seconds: f64,
) -> Result<OverallResult, RubricError> {
    let scorer = Scorer::new(&RubricConfig::default())?;
    Ok(scorer.calculate_final_score(transcript, duration_seconds))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sample::{SAMPLE_DURATION_SECONDS, SAMPLE_TRANSCRIPT};
    use crate::scoring::criteria::grammar_result;
    use crate::scoring::result::{CriterionKind, CriterionResult};
    use crate::config::GrammarConfig;
    use pretty_assertions::assert_eq;

    fn scorer() -> Scorer {
        Scorer::new(&RubricConfig::default()).unwrap()
    }

    fn scores(result: &OverallResult) -> Vec<(CriterionKind, u32)> {
        result
            .per_criterion_scores
            .iter()
            .map(|r| (r.criterion, r.score))
            .collect()
    }

    #[test]
    fn test_reference_transcript_scores_86() {
        let result = scorer().calculate_final_score(SAMPLE_TRANSCRIPT, SAMPLE_DURATION_SECONDS);
        assert_eq!(
            scores(&result),
            vec![
                (CriterionKind::SpeechRate, 6),
                (CriterionKind::SalutationLevel, 4),
                (CriterionKind::KeywordPresence, 30),
                (CriterionKind::Flow, 5),
                (CriterionKind::VocabularyRichness, 6),
                (CriterionKind::FillerWordRate, 15),
                (CriterionKind::GrammarErrors, 10),
                (CriterionKind::SentimentPositivity, 10),
            ]
        );
        assert_eq!(result.overall_score, 86);
        assert_eq!(result.max_overall_score, 100);

        let rate = result.get(CriterionKind::SpeechRate).unwrap();
        assert_eq!(rate.details["word_count"], 134);
        assert_eq!(rate.details["wpm"], "154.62");
        assert_eq!(rate.details["calibrated"], true);

        let vocab = result.get(CriterionKind::VocabularyRichness).unwrap();
        assert_eq!(vocab.details["ttr"], "0.6493");
    }

    #[test]
    fn test_order_is_evaluation_order() {
        let result = scorer().calculate_final_score("hello", 10.0);
        let kinds: Vec<_> = result.per_criterion_scores.iter().map(|r| r.criterion).collect();
        assert_eq!(kinds, CriterionKind::ALL.to_vec());
    }

    #[test]
    fn test_idempotent() {
        let s = scorer();
        let a = serde_json::to_string(&s.calculate_final_score(SAMPLE_TRANSCRIPT, 0.0)).unwrap();
        let b = serde_json::to_string(&s.calculate_final_score(SAMPLE_TRANSCRIPT, 0.0)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_overall_is_sum_and_bounded() {
        let s = scorer();
        for text in [
            "",
            "um um um like like so",
            "Hello everyone, I am 12 years old. Thank you.",
            SAMPLE_TRANSCRIPT,
        ] {
            for duration in [0.0, 1.0, 52.0, 600.0] {
                let result = s.calculate_final_score(text, duration);
                let sum: u32 = result.per_criterion_scores.iter().map(|r| r.score).sum();
                assert_eq!(result.overall_score, sum);
                assert!(result.overall_score <= 100);
                for r in &result.per_criterion_scores {
                    assert!(r.score <= r.max_score, "{} over max", r.criterion);
                }
            }
        }
    }

    #[test]
    fn test_empty_transcript() {
        let result = scorer().calculate_final_score("", 60.0);
        let rate = result.get(CriterionKind::SpeechRate).unwrap();
        assert_eq!(rate.score, 0);
        assert_eq!(rate.details["duration_seconds"], 0.0);
        assert_eq!(result.get(CriterionKind::VocabularyRichness).unwrap().score, 0);
        assert_eq!(result.get(CriterionKind::FillerWordRate).unwrap().details["filler_rate_percent"], "0.00");
        assert_eq!(result.get(CriterionKind::GrammarErrors).unwrap().score, 10);
    }

    #[test]
    fn test_duration_resolution() {
        assert_eq!(
            DurationDecision::resolve(0.0, 150, 150.0),
            DurationDecision { seconds: 60.0, is_estimated: true }
        );
        assert_eq!(
            DurationDecision::resolve(-5.0, 75, 150.0),
            DurationDecision { seconds: 30.0, is_estimated: true }
        );
        assert_eq!(
            DurationDecision::resolve(42.0, 0, 150.0),
            DurationDecision { seconds: 0.0, is_estimated: false }
        );
        assert_eq!(
            DurationDecision::resolve(42.0, 10, 150.0),
            DurationDecision { seconds: 42.0, is_estimated: false }
        );
        assert!(!DurationDecision::resolve(f64::NAN, 10, 150.0).is_estimated);
        assert_eq!(
            DurationDecision::resolve(f64::INFINITY, 10, 150.0),
            DurationDecision { seconds: f64::INFINITY, is_estimated: false }
        );
    }

    #[test]
    fn test_non_finite_duration_used_as_is() {
        let s = scorer();

        // Infinite duration: 0 WPM lands in the slowest band
        let result = s.calculate_final_score(SAMPLE_TRANSCRIPT, f64::INFINITY);
        let rate = result.get(CriterionKind::SpeechRate).unwrap();
        assert_eq!(rate.score, 2);
        assert_eq!(rate.details["wpm"], "0.00");
        assert_eq!(rate.details["is_estimated"], false);

        // NaN duration: rate cannot be calculated
        let result = s.calculate_final_score(SAMPLE_TRANSCRIPT, f64::NAN);
        let rate = result.get(CriterionKind::SpeechRate).unwrap();
        assert_eq!(rate.score, 0);
        assert!(rate.feedback.starts_with("Cannot calculate WPM"));
    }

    #[test]
    fn test_estimated_duration_flows_to_speech_rate() {
        let result = scorer().calculate_final_score(SAMPLE_TRANSCRIPT, 0.0);
        let rate = result.get(CriterionKind::SpeechRate).unwrap();
        assert_eq!(rate.details["is_estimated"], true);
        assert_eq!(rate.details["wpm"], "150.00");
        assert!(rate.feedback.contains("NOTE"));
    }

    #[test]
    fn test_invalid_rubric_rejected() {
        let mut config = RubricConfig::default();
        config.weights.flow = 10;
        let err = Scorer::new(&config).unwrap_err();
        assert!(matches!(err, RubricError::Invalid(ref errors) if errors.len() == 1));
    }

    struct StrictGrammar;

    impl Criterion for StrictGrammar {
        fn kind(&self) -> CriterionKind {
            CriterionKind::GrammarErrors
        }

        fn score(&self, _transcript: &str, ctx: &ScoringContext<'_>) -> CriterionResult {
            grammar_result(ctx.word_count() / 20, ctx.word_count(), &GrammarConfig::default(), 10)
        }
    }

    #[test]
    fn test_swap_grammar_strategy() {
        let s = scorer().with_criterion(Box::new(StrictGrammar));
        let result = s.calculate_final_score(SAMPLE_TRANSCRIPT, SAMPLE_DURATION_SECONDS);

        // 134 words / 20 = 6 errors -> 4.48 per 100 words -> 5.52 -> 6
        let grammar = result.get(CriterionKind::GrammarErrors).unwrap();
        assert_eq!(grammar.score, 6);
        assert!(grammar.note.is_none());
        assert_eq!(result.per_criterion_scores.len(), 8);
        assert_eq!(result.per_criterion_scores[6].criterion, CriterionKind::GrammarErrors);
        assert_eq!(result.overall_score, 82);
    }

    #[test]
    fn test_free_function_uses_default_rubric() {
        let result = calculate_final_score(SAMPLE_TRANSCRIPT, SAMPLE_DURATION_SECONDS).unwrap();
        assert_eq!(result.overall_score, 86);
    }
}
