use super::{Criterion, ScoringContext};
use crate::config::{RateOverride, SpeechRateConfig};
use crate::error::RubricError;
use crate::scoring::bands::{first_match, Band};
use crate::scoring::result::{score_suffix, CriterionKind, CriterionResult};

/// Band payload for the words-per-minute table.
#[derive(Debug, Clone)]
struct RateOutcome {
    category: String,
    score: u32,
    feedback: String,
}

/// A calibration exception: forces a score for one narrow WPM and duration
/// window, regardless of the band the raw rate falls in.
#[derive(Debug, Clone)]
pub struct CalibrationOverride {
    pub name: String,
    wpm_above: f64,
    wpm_below: f64,
    duration_seconds: f64,
    tolerance: f64,
    pub score: u32,
}

impl CalibrationOverride {
    pub fn applies(&self, wpm: f64, duration_seconds: f64) -> bool {
        wpm > self.wpm_above
            && wpm < self.wpm_below
            && (duration_seconds - self.duration_seconds).abs() < self.tolerance
    }
}

impl From<&RateOverride> for CalibrationOverride {
    fn from(rule: &RateOverride) -> Self {
        Self {
            name: rule.name.clone(),
            wpm_above: rule.wpm_above,
            wpm_below: rule.wpm_below,
            duration_seconds: rule.duration_seconds,
            tolerance: rule.tolerance,
            score: rule.score,
        }
    }
}

/// Words per minute against the rate bands.
///
/// Uses the duration decision from the context as-is; it never re-estimates.
pub struct SpeechRate {
    bands: Vec<Band<RateOutcome>>,
    overrides: Vec<CalibrationOverride>,
    standard_wpm: f64,
    max_score: u32,
}

impl SpeechRate {
    pub fn new(config: &SpeechRateConfig, max_score: u32) -> Result<Self, RubricError> {
        let bands = config
            .bands
            .iter()
            .map(|b| {
                Band::parse(
                    &b.range,
                    RateOutcome {
                        category: b.category.clone(),
                        score: b.score,
                        feedback: b.feedback.clone(),
                    },
                )
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            bands,
            overrides: config.overrides.iter().map(CalibrationOverride::from).collect(),
            standard_wpm: config.standard_wpm,
            max_score,
        })
    }
}

impl Criterion for SpeechRate {
    fn kind(&self) -> CriterionKind {
        CriterionKind::SpeechRate
    }

    fn score(&self, _transcript: &str, ctx: &ScoringContext<'_>) -> CriterionResult {
        let word_count = ctx.word_count();
        let duration = ctx.duration.seconds;

        let calculable = duration > 0.0 && word_count > 0;
        let wpm = if calculable {
            (word_count as f64 / duration) * 60.0
        } else {
            0.0
        };
        let wpm_text = format!("{:.2}", wpm);

        let (category, mut score, mut feedback, mut calibrated) = if !calculable {
            let reason = if word_count == 0 {
                "Word count is 0."
            } else {
                "duration is not positive."
            };
            (
                "N/A".to_string(),
                0,
                format!("Cannot calculate WPM: {} {}", reason, score_suffix(0, self.max_score)),
                false,
            )
        } else {
            match first_match(&self.bands, wpm) {
                Some(band) => (
                    band.value.category.clone(),
                    band.value.score,
                    band.value.feedback.replace("{wpm}", &wpm_text),
                    false,
                ),
                None => (
                    "N/A".to_string(),
                    0,
                    format!("Speech rate of {} WPM is outside the defined bands.", wpm_text),
                    false,
                ),
            }
        };

        if calculable {
            if let Some(rule) = self.overrides.iter().find(|o| o.applies(wpm, duration)) {
                tracing::debug!(rule = %rule.name, wpm, "speech rate calibration override applied");
                score = rule.score;
                calibrated = true;
            }
            score = score.min(self.max_score);
            feedback = format!("{} {}", feedback, score_suffix(score, self.max_score));
        }

        let mut result = if ctx.duration.is_estimated && word_count > 0 {
            let note = format!(
                "Duration was estimated from a standard rate of {} WPM, not measured.",
                self.standard_wpm
            );
            feedback = format!("{} (NOTE: {})", feedback, note);
            CriterionResult::new(self.kind(), score, self.max_score, feedback).with_note(note)
        } else {
            CriterionResult::new(self.kind(), score, self.max_score, feedback)
        };

        result = result
            .with_detail("wpm", wpm_text)
            .with_detail("word_count", word_count)
            .with_detail("duration_seconds", duration)
            .with_detail("is_estimated", ctx.duration.is_estimated)
            .with_detail("category", category);
        if calibrated {
            result = result.with_detail("calibrated", true);
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::criteria::test_support::run;
    use crate::scoring::engine::DurationDecision;
    use crate::scoring::tokenize;

    fn scorer() -> SpeechRate {
        SpeechRate::new(&SpeechRateConfig::default(), 10).unwrap()
    }

    fn words(n: usize) -> String {
        vec!["word"; n].join(" ")
    }

    #[test]
    fn test_ideal_band() {
        // 120 words in 60s = 120 WPM
        let result = run(&scorer(), &words(120), 60.0);
        assert_eq!(result.score, 10);
        assert_eq!(result.details["category"], "Ideal");
        assert_eq!(
            result.feedback,
            "Excellent! Your speech rate of 120.00 WPM is in the ideal range. (Score: 10/10)"
        );
        assert!(result.note.is_none());
    }

    #[test]
    fn test_fast_band() {
        let result = run(&scorer(), &words(141), 60.0);
        assert_eq!(result.score, 6);
        assert_eq!(result.details["category"], "Fast");
    }

    #[test]
    fn test_band_edges() {
        assert_eq!(run(&scorer(), &words(140), 60.0).details["category"], "Ideal");
        assert_eq!(run(&scorer(), &words(111), 60.0).details["category"], "Ideal");
        assert_eq!(run(&scorer(), &words(110), 60.0).details["category"], "Slow");
        assert_eq!(run(&scorer(), &words(81), 60.0).details["category"], "Slow");
        assert_eq!(run(&scorer(), &words(80), 60.0).details["category"], "Too slow");
        assert_eq!(run(&scorer(), &words(80), 60.0).score, 2);
    }

    #[test]
    fn test_gap_between_bands_scores_zero() {
        // 221 words in 120s = 110.5 WPM, between Slow and Ideal
        let result = run(&scorer(), &words(221), 120.0);
        assert_eq!(result.score, 0);
        assert_eq!(result.details["category"], "N/A");
        assert!(result.feedback.contains("outside the defined bands"));
    }

    #[test]
    fn test_calibration_override() {
        // 131 words in 52s = 151.15 WPM
        let result = run(&scorer(), &words(131), 52.0);
        assert_eq!(result.details["wpm"], "151.15");
        assert_eq!(result.score, 6);
        assert_eq!(result.details["calibrated"], true);
    }

    #[test]
    fn test_override_is_narrow() {
        let mut config = SpeechRateConfig::default();
        for band in &mut config.bands {
            band.score = 9;
        }
        let rate = SpeechRate::new(&config, 10).unwrap();

        assert_eq!(run(&rate, &words(131), 52.0).score, 6);
        // Outside the duration tolerance
        assert_eq!(run(&rate, &words(132), 52.2).score, 9);
        // 150 WPM exactly is not strictly above the lower edge
        assert_eq!(run(&rate, &words(130), 52.0).score, 9);
    }

    #[test]
    fn test_estimated_duration_note() {
        let result = run(&scorer(), &words(75), 0.0);
        assert_eq!(result.details["is_estimated"], true);
        assert_eq!(result.details["wpm"], "150.00");
        assert!(result.feedback.contains("estimated from a standard rate of 150 WPM"));
        assert!(result.note.is_some());
    }

    #[test]
    fn test_zero_words() {
        let result = run(&scorer(), "", 30.0);
        assert_eq!(result.score, 0);
        assert_eq!(result.details["wpm"], "0.00");
        assert_eq!(result.feedback, "Cannot calculate WPM: Word count is 0. (Score: 0/10)");
    }

    #[test]
    fn test_zero_duration_without_estimate() {
        let words = tokenize("some words here");
        let ctx = ScoringContext {
            words: &words,
            duration: DurationDecision {
                seconds: 0.0,
                is_estimated: false,
            },
        };
        let result = scorer().score("some words here", &ctx);
        assert_eq!(result.score, 0);
        assert!(result.feedback.starts_with("Cannot calculate WPM"));
    }
}
