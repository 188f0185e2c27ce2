pub mod bands;
pub mod criteria;
pub mod engine;
pub mod result;
pub mod tokenizer;
pub mod validation;

pub use bands::RangeOp;
pub use criteria::{Criterion, ScoringContext};
pub use engine::{calculate_final_score, DurationDecision, Scorer};
pub use result::{Assessment, CriterionKind, CriterionResult, Details, OverallResult};
pub use tokenizer::tokenize;
pub use validation::validate_rubric;
