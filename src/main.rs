use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use speech_rubric::config::{self, RubricConfig};
use speech_rubric::input::{self, InputError};
use speech_rubric::output::{self, OutputFormat};
use speech_rubric::sample::{SAMPLE_DURATION_SECONDS, SAMPLE_TRANSCRIPT};
use speech_rubric::{RubricError, Scorer};

const EXIT_SUCCESS: i32 = 0;
const EXIT_FAILURE: i32 = 1;
const EXIT_INPUT: i32 = 2;
const EXIT_CONFIG: i32 = 4;

#[derive(Args, Debug, Default)]
struct ScoreArgs {
    /// Read the transcript from a file
    #[arg(short, long, conflicts_with = "text")]
    file: Option<PathBuf>,

    /// Transcript text given inline
    #[arg(short, long)]
    text: Option<String>,

    /// Speech duration: seconds (52, 52.5) or a duration (52s, 1m 5s).
    /// Omitted or 0 estimates it from the word count
    #[arg(short, long)]
    duration: Option<String>,

    /// Score the built-in sample transcript (52 seconds)
    #[arg(long, conflicts_with_all = ["file", "text", "duration"])]
    sample: bool,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    format: OutputFormat,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Score a transcript (default if no subcommand; reads stdin when no
    /// --file or --text is given)
    Score(ScoreArgs),
    /// Interactive form for editing and scoring a transcript
    Tui,
    /// Write the default rubric to the config location
    Init {
        /// Overwrite an existing rubric file
        #[arg(long)]
        force: bool,
        /// Where to write the rubric (defaults to ~/.config/speech-rubric/rubric.yaml)
        #[arg(long)]
        path: Option<PathBuf>,
    },
    /// Print the effective rubric as YAML
    Rubric,
}

#[derive(Parser, Debug)]
#[command(name = "speech-rubric")]
#[command(about = "Score spoken self-introduction transcripts against a rubric", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to rubric file (defaults to ~/.config/speech-rubric/rubric.yaml)
    #[arg(short, long, global = true)]
    rubric: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    speech_rubric::logging::init(cli.verbose);

    let command = cli
        .command
        .unwrap_or_else(|| Commands::Score(ScoreArgs::default()));

    let code = match command {
        Commands::Init { force, path } => run_init(force, path),
        Commands::Rubric => match load_scorer(cli.rubric) {
            Ok((rubric, _)) => print_rubric(&rubric),
            Err(code) => code,
        },
        Commands::Score(args) => match load_scorer(cli.rubric) {
            Ok((_, scorer)) => run_score(&scorer, args),
            Err(code) => code,
        },
        Commands::Tui => match load_scorer(cli.rubric) {
            Ok((_, scorer)) => {
                let app = speech_rubric::tui::App::new(scorer);
                match speech_rubric::tui::run_tui(app).await {
                    Ok(()) => EXIT_SUCCESS,
                    Err(e) => {
                        eprintln!("TUI error: {:#}", e);
                        EXIT_FAILURE
                    }
                }
            }
            Err(code) => code,
        },
    };

    std::process::exit(code);
}

/// Load and validate the rubric once. On failure the error has already been
/// reported and the exit code is returned.
fn load_scorer(path: Option<PathBuf>) -> Result<(RubricConfig, Scorer), i32> {
    let rubric = match config::load_rubric(path) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("Config error: {:#}", e);
            return Err(EXIT_CONFIG);
        }
    };

    match Scorer::new(&rubric) {
        Ok(scorer) => {
            tracing::debug!(?scorer, "rubric loaded");
            Ok((rubric, scorer))
        }
        Err(e @ RubricError::Invalid(_)) => {
            eprintln!("Rubric errors:");
            for error in e.messages() {
                eprintln!("  - {}", error);
            }
            Err(EXIT_CONFIG)
        }
        Err(e) => {
            eprintln!("Rubric error: {}", e);
            Err(EXIT_CONFIG)
        }
    }
}

fn run_score(scorer: &Scorer, args: ScoreArgs) -> i32 {
    let (transcript, duration) = if args.sample {
        (SAMPLE_TRANSCRIPT.to_string(), SAMPLE_DURATION_SECONDS)
    } else {
        match read_input(&args) {
            Ok(input) => input,
            Err(e) => {
                eprintln!("Input error: {}", e);
                if let Some(source) = std::error::Error::source(&e) {
                    eprintln!("  caused by: {}", source);
                }
                return EXIT_INPUT;
            }
        }
    };

    let result = scorer.calculate_final_score(&transcript, duration);

    match args.format {
        OutputFormat::Table => {
            println!("{}", output::format_report(&result, output::should_use_colors()));
        }
        OutputFormat::Tsv => println!("{}", output::format_tsv(&result)),
        OutputFormat::Json => match output::format_json(&result) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("Failed to serialize result: {}", e);
                return EXIT_FAILURE;
            }
        },
    }

    EXIT_SUCCESS
}

fn read_input(args: &ScoreArgs) -> Result<(String, f64), InputError> {
    let duration = match &args.duration {
        Some(d) => input::parse_duration_seconds(d)?,
        None => 0.0,
    };
    let transcript = input::load_transcript(args.file.as_deref(), args.text.as_deref())?;
    Ok((transcript, duration))
}

fn print_rubric(rubric: &RubricConfig) -> i32 {
    match serde_saphyr::to_string(rubric) {
        Ok(yaml) => {
            print!("{}", yaml);
            EXIT_SUCCESS
        }
        Err(e) => {
            eprintln!("Failed to serialize rubric: {}", e);
            EXIT_FAILURE
        }
    }
}

fn run_init(force: bool, path: Option<PathBuf>) -> i32 {
    let path = match path.map_or_else(config::get_rubric_path, Ok) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("Config error: {:#}", e);
            return EXIT_CONFIG;
        }
    };

    match config::write_default_rubric(&path, force) {
        Ok(()) => {
            println!("Wrote default rubric to {}", path.display());
            EXIT_SUCCESS
        }
        Err(e) => {
            eprintln!("Config error: {:#}", e);
            EXIT_CONFIG
        }
    }
}
