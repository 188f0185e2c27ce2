use serde::{Deserialize, Serialize};
use std::fmt;

/// Criterion-specific payload. Opaque to the aggregator.
pub type Details = serde_json::Map<String, serde_json::Value>;

/// The eight rubric criteria.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CriterionKind {
    #[serde(rename = "Speech Rate")]
    SpeechRate,
    #[serde(rename = "Salutation Level")]
    SalutationLevel,
    #[serde(rename = "Key word Presence")]
    KeywordPresence,
    #[serde(rename = "Flow")]
    Flow,
    #[serde(rename = "Vocabulary Richness")]
    VocabularyRichness,
    #[serde(rename = "Filler Word Rate")]
    FillerWordRate,
    #[serde(rename = "Grammar Errors")]
    GrammarErrors,
    #[serde(rename = "Sentiment/Positivity")]
    SentimentPositivity,
}

impl CriterionKind {
    /// Evaluation order. Results are always reported in this order.
    pub const ALL: [CriterionKind; 8] = [
        CriterionKind::SpeechRate,
        CriterionKind::SalutationLevel,
        CriterionKind::KeywordPresence,
        CriterionKind::Flow,
        CriterionKind::VocabularyRichness,
        CriterionKind::FillerWordRate,
        CriterionKind::GrammarErrors,
        CriterionKind::SentimentPositivity,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            CriterionKind::SpeechRate => "Speech Rate",
            CriterionKind::SalutationLevel => "Salutation Level",
            CriterionKind::KeywordPresence => "Key word Presence",
            CriterionKind::Flow => "Flow",
            CriterionKind::VocabularyRichness => "Vocabulary Richness",
            CriterionKind::FillerWordRate => "Filler Word Rate",
            CriterionKind::GrammarErrors => "Grammar Errors",
            CriterionKind::SentimentPositivity => "Sentiment/Positivity",
        }
    }
}

impl fmt::Display for CriterionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Score and feedback for one criterion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CriterionResult {
    pub criterion: CriterionKind,
    pub score: u32,
    pub max_score: u32,
    pub feedback: String,
    pub details: Details,
    /// Advisory note, e.g. for placeholder criteria or estimated durations.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl CriterionResult {
    pub fn new(criterion: CriterionKind, score: u32, max_score: u32, feedback: String) -> Self {
        Self {
            criterion,
            score: score.min(max_score),
            max_score,
            feedback,
            details: Details::new(),
            note: None,
        }
    }

    pub fn with_detail(mut self, key: &str, value: impl Into<serde_json::Value>) -> Self {
        self.details.insert(key.to_string(), value.into());
        self
    }

    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }

    /// Clamp to a new maximum, keeping `0 <= score <= max_score`.
    pub(crate) fn capped_at(mut self, max_score: u32) -> Self {
        self.max_score = max_score;
        self.score = self.score.min(max_score);
        self
    }
}

/// `(Score: X/Y)` suffix shared by every feedback line.
pub(crate) fn score_suffix(score: u32, max_score: u32) -> String {
    format!("(Score: {}/{})", score, max_score)
}

/// General feedback tier for the overall score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Assessment {
    Excellent,
    Good,
    NeedsImprovement,
}

impl Assessment {
    pub fn from_score(score: u32) -> Self {
        if score >= 80 {
            Assessment::Excellent
        } else if score >= 60 {
            Assessment::Good
        } else {
            Assessment::NeedsImprovement
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            Assessment::Excellent => "Excellent submission! The structure and content are well-covered, with only minor areas for improvement.",
            Assessment::Good => "Good effort. Focus on improving specific areas like flow and vocabulary richness.",
            Assessment::NeedsImprovement => "The submission requires substantial improvement. Review the detailed feedback to target key missing components.",
        }
    }
}

/// Weighted total plus the per-criterion breakdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OverallResult {
    pub overall_score: u32,
    pub max_overall_score: u32,
    pub per_criterion_scores: Vec<CriterionResult>,
}

impl OverallResult {
    pub const MAX_SCORE: u32 = 100;

    pub(crate) fn from_results(results: Vec<CriterionResult>) -> Self {
        let overall_score = results.iter().map(|r| r.score).sum();
        Self {
            overall_score,
            max_overall_score: Self::MAX_SCORE,
            per_criterion_scores: results,
        }
    }

    pub fn get(&self, kind: CriterionKind) -> Option<&CriterionResult> {
        self.per_criterion_scores.iter().find(|r| r.criterion == kind)
    }

    pub fn assessment(&self) -> Assessment {
        Assessment::from_score(self.overall_score)
    }

    /// True when any criterion carries an advisory note.
    pub fn has_placeholders(&self) -> bool {
        self.per_criterion_scores.iter().any(|r| r.note.is_some())
    }
}
