use anyhow::{Context, Result};
use atomic_write_file::AtomicWriteFile;
use std::io::Write;
use std::path::Path;

use super::RubricConfig;

const HEADER: &str = "\
# speech-rubric scoring rubric
# Weights must total 100. Ranges use <N, <=N, >N, >=N, N-M (inclusive) or N.
";

/// Write the built-in rubric as YAML so it can be tuned by hand.
///
/// Refuses to replace an existing file unless `force` is set. The write is
/// atomic: the file is either the old content or the complete new rubric.
pub fn write_default_rubric(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        anyhow::bail!(
            "Rubric already exists at {}. Use --force to overwrite.",
            path.display()
        );
    }

    let yaml = serde_saphyr::to_string(&RubricConfig::default())
        .map_err(|e| anyhow::anyhow!("Failed to serialize rubric: {}", e))?;

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }

    let mut file = AtomicWriteFile::open(path)
        .with_context(|| format!("Failed to open atomic write file at {}", path.display()))?;
    file.write_all(HEADER.as_bytes())
        .and_then(|_| file.write_all(yaml.as_bytes()))
        .with_context(|| format!("Failed to write rubric to {}", path.display()))?;
    file.commit()
        .with_context(|| format!("Failed to save rubric to {}", path.display()))?;

    tracing::info!("wrote default rubric to {}", path.display());
    Ok(())
}
