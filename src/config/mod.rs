mod init;
mod schema;

pub use init::write_default_rubric;
pub use schema::{
    FillerConfig, FlowConfig, GrammarConfig, KeywordConfig, KeywordPattern, RateBand,
    RateOverride, RubricConfig, RubricWeights, SalutationConfig, SalutationTier, ScoreBand,
    SentimentConfig, SpeechRateConfig, VocabularyConfig,
};

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Get the config directory path (~/.config/speech-rubric/)
pub fn get_config_dir() -> Result<PathBuf> {
    let home = dirs::home_dir().context("Could not determine home directory")?;
    Ok(home.join(".config").join("speech-rubric"))
}

/// Get the default rubric file path (~/.config/speech-rubric/rubric.yaml)
pub fn get_rubric_path() -> Result<PathBuf> {
    Ok(get_config_dir()?.join("rubric.yaml"))
}

/// Resolve the rubric to use.
///
/// An explicit path must exist. Without one, the default path is used when
/// present and the built-in rubric otherwise.
///
/// # Errors
///
/// Returns an error if:
/// - An explicit rubric file does not exist
/// - The rubric file cannot be read
/// - The YAML cannot be parsed
pub fn load_rubric(path: Option<PathBuf>) -> Result<RubricConfig> {
    let rubric_path = match path {
        Some(p) => {
            if !p.exists() {
                anyhow::bail!("Rubric file not found at {}", p.display());
            }
            p
        }
        None => {
            let default_path = get_rubric_path()?;
            if !default_path.exists() {
                tracing::debug!("no rubric file at {}, using built-in rubric", default_path.display());
                return Ok(RubricConfig::default());
            }
            default_path
        }
    };

    read_rubric(&rubric_path)
}

/// Read and parse a rubric YAML file.
pub fn read_rubric(path: &Path) -> Result<RubricConfig> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read rubric file at {}", path.display()))?;

    let config: RubricConfig = serde_saphyr::from_str(&content)
        .with_context(|| format!("Failed to parse rubric: invalid YAML in {}", path.display()))?;

    tracing::debug!("loaded rubric from {}", path.display());
    Ok(config)
}
