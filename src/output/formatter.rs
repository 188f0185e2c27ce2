use std::io::IsTerminal;

use owo_colors::OwoColorize;
use terminal_size::{terminal_size, Width};

use crate::scoring::{Assessment, Details, OverallResult};


#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable report
    #[default]
    Table,
    /// The full result as JSON
    Json,
    /// One tab-separated line per criterion
    Tsv,
}

/// Check if stdout is a TTY (for auto-detecting color support)
pub fn should_use_colors() -> bool {
    std::io::stdout().is_terminal()
}

/// Get terminal width, defaulting to None for pipes (unlimited)
fn get_terminal_width() -> Option<usize> {
    terminal_size().map(|(Width(w), _)| w as usize)
}

/// Truncate text to fit available width, accounting for Unicode
fn truncate(text: &str, max_width: usize) -> String {
    let chars: Vec<char> = text.chars().collect();
    if chars.len() <= max_width {
        text.to_string()
    } else if max_width > 3 {
        format!("{}...", chars[..max_width - 3].iter().collect::<String>())
    } else {
        chars[..max_width].iter().collect()
    }
}

fn score_bar(score: u32, max_score: u32, width: usize) -> String {
    let ratio = if max_score > 0 {
        (score as f64 / max_score as f64).min(1.0)
    } else {
        0.0
    };
    let filled = (ratio * width as f64).round() as usize;
    format!("{}{}", "█".repeat(filled), "░".repeat(width.saturating_sub(filled)))
}

/// Full human-readable report: overall score, assessment, one line per
/// criterion, then advisory notes.
pub fn format_report(result: &OverallResult, use_colors: bool) -> String {
    format_report_with_width(result, use_colors, get_terminal_width())
}

fn format_report_with_width(
    result: &OverallResult,
    use_colors: bool,
    term_width: Option<usize>,
) -> String {
    let mut lines = Vec::new();

    let headline = format!(
        "Overall Communication Score: {}/{}",
        result.overall_score, result.max_overall_score
    );
    let assessment = result.assessment();
    if use_colors {
        lines.push(headline.bold().to_string());
        let message = assessment.message();
        lines.push(match assessment {
            Assessment::Excellent => message.green().to_string(),
            Assessment::Good => message.yellow().to_string(),
            Assessment::NeedsImprovement => message.red().to_string(),
        });
    } else {
        lines.push(headline);
        lines.push(assessment.message().to_string());
    }
    lines.push(String::new());

    // Name column: 22 chars, score: 5 chars, bar: 10 chars, 2-space separators
    let name_width = 22;
    let fixed_width = name_width + 2 + 5 + 2 + 10 + 2;

    for r in &result.per_criterion_scores {
        let name = format!("{:<width$}", r.criterion.name(), width = name_width);
        let score = format!("{:>2}/{:<2}", r.score, r.max_score);
        let bar = score_bar(r.score, r.max_score, 10);
        let feedback = match term_width {
            Some(width) if width > fixed_width + 10 => truncate(&r.feedback, width - fixed_width),
            Some(_) => truncate(&r.feedback, 20),
            None => r.feedback.clone(),
        };

        if use_colors {
            let ratio = if r.max_score > 0 {
                r.score as f64 / r.max_score as f64
            } else {
                0.0
            };
            let bar = if ratio >= 0.7 {
                bar.green().to_string()
            } else if ratio >= 0.4 {
                bar.yellow().to_string()
            } else {
                bar.red().to_string()
            };
            lines.push(format!("{}  {}  {}  {}", name.bold(), score, bar, feedback.dimmed()));
        } else {
            lines.push(format!("{}  {}  {}  {}", name, score, bar, feedback));
        }
    }

    if result.has_placeholders() {
        lines.push(String::new());
        if use_colors {
            lines.push("Notes:".yellow().to_string());
        } else {
            lines.push("Notes:".to_string());
        }
        for r in &result.per_criterion_scores {
            if let Some(note) = &r.note {
                lines.push(format!("  {}: {}", r.criterion, note));
            }
        }
    }

    lines.join("\n")
}

/// Pretty-printed JSON of the full result.
pub fn format_json(result: &OverallResult) -> serde_json::Result<String> {
    serde_json::to_string_pretty(result)
}

/// Tab-separated values for scripting
/// Columns: criterion, score, max_score, feedback (no headers, no colors)
pub fn format_tsv(result: &OverallResult) -> String {
    result
        .per_criterion_scores
        .iter()
        .map(|r| format!("{}\t{}\t{}\t{}", r.criterion, r.score, r.max_score, r.feedback))
        .collect::<Vec<_>>()
        .join("\n")
}

/// One `key: value` line per detail entry, strings unquoted.
pub fn format_details(details: &Details) -> Vec<String> {
    details
        .iter()
        .map(|(key, value)| match value {
            serde_json::Value::String(s) => format!("{}: {}", key, s),
            other => format!("{}: {}", key, other),
        })
        .collect()
}
