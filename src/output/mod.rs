pub mod formatter;

pub use formatter::{
    format_details, format_json, format_report, format_tsv, should_use_colors, OutputFormat,
};
