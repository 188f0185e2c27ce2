use regex::Regex;

use super::bands::RangeOp;
use crate::config::RubricConfig;

/// Validate a rubric once, before any transcript is scored.
/// Returns all validation errors at once (not just the first).
pub fn validate_rubric(config: &RubricConfig) -> Result<(), Vec<String>> {
    let mut errors = Vec::new();
    let weights = &config.weights;

    let total = weights.total();
    if total != 100 {
        errors.push(format!("weights: must sum to 100, got {}", total));
    }

    // Salutation tiers
    for (i, tier) in config.salutation.tiers.iter().enumerate() {
        if tier.score > weights.salutation_level {
            errors.push(format!(
                "salutation.tiers[{}].score: {} exceeds weight {}",
                i, tier.score, weights.salutation_level
            ));
        }
        if tier.phrases.iter().any(|p| p.trim().is_empty()) {
            errors.push(format!("salutation.tiers[{}].phrases: empty phrase", i));
        }
    }

    // Keyword patterns
    let keyword_points = config.keywords.points_per_keyword as usize * config.keywords.keywords.len();
    if keyword_points > weights.keyword_presence as usize {
        errors.push(format!(
            "keywords: {} keywords x {} points exceeds weight {}",
            config.keywords.keywords.len(),
            config.keywords.points_per_keyword,
            weights.keyword_presence
        ));
    }
    for (i, keyword) in config.keywords.keywords.iter().enumerate() {
        if let Err(e) = Regex::new(&keyword.pattern) {
            errors.push(format!(
                "keywords.keywords[{}].pattern: invalid '{}' - {}",
                i, keyword.pattern, e
            ));
        }
    }

    // Flow phrases
    if config.flow.start_phrases.iter().any(|p| p.trim().is_empty()) {
        errors.push("flow.start_phrases: empty phrase".to_string());
    }
    if config.flow.end_phrases.iter().any(|p| p.trim().is_empty()) {
        errors.push("flow.end_phrases: empty phrase".to_string());
    }

    // Speech rate bands
    let rate = &config.speech_rate;
    if !(rate.standard_wpm.is_finite() && rate.standard_wpm > 0.0) {
        errors.push("speech_rate.standard_wpm: must be a positive number".to_string());
    }
    for (i, band) in rate.bands.iter().enumerate() {
        if let Err(e) = RangeOp::parse(&band.range) {
            errors.push(format!("speech_rate.bands[{}].range: {}", i, e));
        }
        if band.score > weights.speech_rate {
            errors.push(format!(
                "speech_rate.bands[{}].score: {} exceeds weight {}",
                i, band.score, weights.speech_rate
            ));
        }
    }
    for (i, rule) in rate.overrides.iter().enumerate() {
        if rule.wpm_above >= rule.wpm_below {
            errors.push(format!(
                "speech_rate.overrides[{}]: wpm_above must be below wpm_below",
                i
            ));
        }
        if rule.tolerance <= 0.0 {
            errors.push(format!("speech_rate.overrides[{}].tolerance: must be positive", i));
        }
        if rule.score > weights.speech_rate {
            errors.push(format!(
                "speech_rate.overrides[{}].score: {} exceeds weight {}",
                i, rule.score, weights.speech_rate
            ));
        }
    }

    // Vocabulary bands
    for (i, band) in config.vocabulary.bands.iter().enumerate() {
        if let Err(e) = RangeOp::parse(&band.range) {
            errors.push(format!("vocabulary.bands[{}].range: {}", i, e));
        }
        if band.score > weights.vocabulary_richness {
            errors.push(format!(
                "vocabulary.bands[{}].score: {} exceeds weight {}",
                i, band.score, weights.vocabulary_richness
            ));
        }
    }

    let max_errors = config.grammar.max_errors_per_100_words;
    if !(max_errors.is_finite() && max_errors > 0.0) {
        errors.push("grammar.max_errors_per_100_words: must be a positive number".to_string());
    }

    // Fillers
    if config.filler.words.iter().any(|w| w.trim().is_empty()) {
        errors.push("filler.words: empty filler".to_string());
    }
    let zero_rate = config.filler.zero_score_rate;
    if !(zero_rate.is_finite() && zero_rate > 0.0) {
        errors.push("filler.zero_score_rate: must be a positive number".to_string());
    }

    if config.sentiment.placeholder_score > weights.sentiment_positivity {
        errors.push(format!(
            "sentiment.placeholder_score: {} exceeds weight {}",
            config.sentiment.placeholder_score, weights.sentiment_positivity
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{KeywordPattern, RateBand};

    #[test]
    fn test_default_rubric_is_valid() {
        assert!(validate_rubric(&RubricConfig::default()).is_ok());
    }

    #[test]
    fn test_weights_must_sum_to_100() {
        let mut config = RubricConfig::default();
        config.weights.flow = 6;
        let errors = validate_rubric(&config).unwrap_err();
        assert_eq!(errors, vec!["weights: must sum to 100, got 101".to_string()]);
    }

    #[test]
    fn test_invalid_rate_band_range() {
        let mut config = RubricConfig::default();
        config.speech_rate.bands.push(RateBand {
            category: "Broken".to_string(),
            range: "fast".to_string(),
            score: 1,
            feedback: String::new(),
        });
        let errors = validate_rubric(&config).unwrap_err();
        assert!(errors[0].starts_with("speech_rate.bands[4].range"));
    }

    #[test]
    fn test_invalid_keyword_pattern() {
        let mut config = RubricConfig::default();
        config.keywords.keywords[0] = KeywordPattern {
            name: "name".to_string(),
            pattern: "(unclosed".to_string(),
        };
        let errors = validate_rubric(&config).unwrap_err();
        assert!(errors[0].contains("keywords.keywords[0].pattern"));
    }

    #[test]
    fn test_keyword_points_exceed_weight() {
        let mut config = RubricConfig::default();
        config.keywords.points_per_keyword = 6;
        let errors = validate_rubric(&config).unwrap_err();
        assert!(errors[0].contains("exceeds weight 30"));
    }

    #[test]
    fn test_collects_all_errors() {
        let mut config = RubricConfig::default();
        config.weights.flow = 0; // Error 1
        config.filler.zero_score_rate = 0.0; // Error 2
        config.sentiment.placeholder_score = 20; // Error 3
        let errors = validate_rubric(&config).unwrap_err();
        assert_eq!(errors.len(), 3);
    }
}
