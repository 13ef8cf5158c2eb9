//! Otogram CLI - hearing-test severity evaluation tool

#![deny(warnings)]

// Global invariants enforced:
// - Reports go to stdout (or --output); diagnostics stay on stderr
// - Identical input yields byte-for-byte identical output

use anyhow::Context;
use clap::{Parser, Subcommand};
use otogram_core::report::{criteria_rows, render_criteria_json, render_criteria_text};
use otogram_core::{
    evaluate_session, load_session_file, render_json, render_plan, render_plan_json, render_text,
    Gender,
};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "otogram")]
#[command(about = "Hearing-test severity classification against age- and gender-normed criteria")]
#[command(version = env!("OTOGRAM_VERSION"))]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate a session file and report per-ear severity
    Evaluate {
        /// Path to the session JSON file
        session: PathBuf,

        /// Output format
        #[arg(long, default_value = "text")]
        format: OutputFormat,

        /// Output file path (default: stdout)
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Emit the render plan (gauges and audiogram) for the drawing layer
    Render {
        /// Path to the session JSON file
        session: PathBuf,

        /// Output file path (default: stdout)
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Show reference criteria rows
    Criteria {
        /// Age to look up (default: every tabulated age)
        #[arg(long)]
        age: Option<u8>,

        /// Gender column (default: both)
        #[arg(long)]
        gender: Option<GenderArg>,

        /// Output format
        #[arg(long, default_value = "text")]
        format: OutputFormat,
    },
    /// Validate a session file without evaluating it
    Validate {
        /// Path to the session JSON file
        session: PathBuf,
    },
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum GenderArg {
    Male,
    Female,
}

impl From<GenderArg> for Gender {
    fn from(arg: GenderArg) -> Gender {
        match arg {
            GenderArg::Male => Gender::Male,
            GenderArg::Female => Gender::Female,
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Evaluate {
            session,
            format,
            output,
        } => {
            let session = load_session_file(&session)?;
            let report = evaluate_session(&session);

            let content = match format {
                OutputFormat::Text => render_text(&report),
                OutputFormat::Json => {
                    let mut json = render_json(&report);
                    json.push('\n');
                    json
                }
            };
            emit_output(&content, output.as_deref())?;
        }
        Commands::Render { session, output } => {
            let session = load_session_file(&session)?;
            let plan = render_plan(&session);

            let mut json = render_plan_json(&plan);
            json.push('\n');
            emit_output(&json, output.as_deref())?;
        }
        Commands::Criteria {
            age,
            gender,
            format,
        } => {
            let rows = criteria_rows(age, gender.map(Gender::from))?;

            match format {
                OutputFormat::Text => {
                    print!("{}", render_criteria_text(&rows));
                }
                OutputFormat::Json => {
                    println!("{}", render_criteria_json(&rows));
                }
            }
        }
        Commands::Validate { session } => match load_session_file(&session) {
            Ok(_) => {
                println!("Session valid: {}", session.display());
            }
            Err(e) => {
                eprintln!("Session validation failed: {:#}", e);
                std::process::exit(1);
            }
        },
    }

    Ok(())
}

/// Print to stdout, or write to a file when --output is given
fn emit_output(content: &str, output: Option<&Path>) -> anyhow::Result<()> {
    match output {
        Some(path) => {
            write_output_file(path, content)?;
            eprintln!("Output written to: {}", path.display());
        }
        None => {
            print!("{}", content);
        }
    }
    Ok(())
}

/// Write output to file with atomic write pattern
fn write_output_file(path: &Path, content: &str) -> anyhow::Result<()> {
    use std::fs;

    // Create parent directories if needed
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    // Atomic write (temp + rename pattern)
    let temp_path = path.with_extension("tmp");
    fs::write(&temp_path, content)
        .with_context(|| format!("Failed to write temporary file: {}", temp_path.display()))?;
    fs::rename(&temp_path, path)
        .with_context(|| format!("Failed to rename temporary file to: {}", path.display()))?;

    Ok(())
}
