use std::io::Read;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Problems with the transcript or duration a user supplied.
#[derive(Debug, Error)]
pub enum InputError {
    #[error("transcript is empty")]
    EmptyTranscript,

    #[error("invalid duration '{input}': {reason}")]
    InvalidDuration { input: String, reason: String },

    #[error("failed to read transcript from {}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to read transcript from stdin")]
    Stdin(#[source] std::io::Error),
}

/// Parse a duration as plain seconds (`52`, `52.5`) or a humantime string
/// (`52s`, `1m 5s`). Blank input means "unknown" and yields 0.
pub fn parse_duration_seconds(input: &str) -> Result<f64, InputError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Ok(0.0);
    }

    if let Ok(seconds) = trimmed.parse::<f64>() {
        if seconds.is_finite() && seconds >= 0.0 {
            return Ok(seconds);
        }
        return Err(InputError::InvalidDuration {
            input: input.to_string(),
            reason: "must be a non-negative number of seconds".to_string(),
        });
    }

    humantime::parse_duration(trimmed)
        .map(|d| d.as_secs_f64())
        .map_err(|e| InputError::InvalidDuration {
            input: input.to_string(),
            reason: e.to_string(),
        })
}

/// Read the transcript from a file, inline text, or stdin (in that order of
/// preference). A transcript with no visible characters is rejected.
pub fn load_transcript(file: Option<&Path>, text: Option<&str>) -> Result<String, InputError> {
    let transcript = match (file, text) {
        (Some(path), _) => std::fs::read_to_string(path).map_err(|source| InputError::Read {
            path: path.to_path_buf(),
            source,
        })?,
        (None, Some(text)) => text.to_string(),
        (None, None) => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .map_err(InputError::Stdin)?;
            buf
        }
    };

    if transcript.trim().is_empty() {
        return Err(InputError::EmptyTranscript);
    }
    Ok(transcript)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_plain_seconds() {
        assert_eq!(parse_duration_seconds("52").unwrap(), 52.0);
        assert_eq!(parse_duration_seconds(" 52.5 ").unwrap(), 52.5);
        assert_eq!(parse_duration_seconds("0").unwrap(), 0.0);
    }

    #[test]
    fn test_blank_means_unknown() {
        assert_eq!(parse_duration_seconds("").unwrap(), 0.0);
        assert_eq!(parse_duration_seconds("   ").unwrap(), 0.0);
    }

    #[test]
    fn test_humantime() {
        assert_eq!(parse_duration_seconds("52s").unwrap(), 52.0);
        assert_eq!(parse_duration_seconds("1m 5s").unwrap(), 65.0);
    }

    #[test]
    fn test_invalid_duration() {
        assert!(matches!(
            parse_duration_seconds("-3"),
            Err(InputError::InvalidDuration { .. })
        ));
        assert!(matches!(
            parse_duration_seconds("soon"),
            Err(InputError::InvalidDuration { .. })
        ));
        assert!(parse_duration_seconds("NaN").is_err());
    }

    #[test]
    fn test_load_from_text_and_file() {
        assert_eq!(load_transcript(None, Some("Hello")).unwrap(), "Hello");

        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "Good morning everyone").unwrap();
        let loaded = load_transcript(Some(file.path()), Some("ignored")).unwrap();
        assert_eq!(loaded, "Good morning everyone");
    }

    #[test]
    fn test_empty_transcript_rejected() {
        assert!(matches!(
            load_transcript(None, Some("  \n ")),
            Err(InputError::EmptyTranscript)
        ));
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_transcript(Some(&dir.path().join("nope.txt")), None).unwrap_err();
        assert!(err.to_string().contains("nope.txt"));
    }
}
