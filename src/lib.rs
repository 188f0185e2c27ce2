pub mod config;
pub mod error;
pub mod input;
pub mod logging;
pub mod output;
pub mod sample;
pub mod scoring;
pub mod tui;

pub use error::RubricError;
pub use scoring::{calculate_final_score, OverallResult, Scorer};
