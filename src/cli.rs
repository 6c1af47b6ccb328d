//! CLI interface for resume-gpt

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "resume-gpt")]
#[command(about = "AI-powered resume analysis and job matching tool")]
#[command(
    long_about = "Upload a resume, get a structured AI analysis, then search for job matches and improvement suggestions"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Analyze a resume into a structured breakdown
    Analyze {
        /// Path to resume file (PDF, TXT)
        #[arg(short, long)]
        resume: PathBuf,

        /// Output format: console, json
        #[arg(short, long, default_value = "console")]
        output: String,

        /// Save the analysis as JSON for later reuse
        #[arg(short, long)]
        save: Option<PathBuf>,
    },

    /// Find job matches for an analyzed resume
    Match {
        /// Path to resume file to analyze first (PDF, TXT)
        #[arg(short, long)]
        resume: Option<PathBuf>,

        /// Path to a previously saved analysis JSON
        #[arg(short, long)]
        analysis: Option<PathBuf>,

        /// Target job title to search for
        #[arg(short, long)]
        job_title: String,

        /// Output format: console, json
        #[arg(short, long, default_value = "console")]
        output: String,
    },

    /// Request improvement suggestions for an analyzed resume
    Improve {
        /// Path to resume file to analyze first (PDF, TXT)
        #[arg(short, long)]
        resume: Option<PathBuf>,

        /// Path to a previously saved analysis JSON
        #[arg(short, long)]
        analysis: Option<PathBuf>,

        /// Output format: console, json
        #[arg(short, long, default_value = "console")]
        output: String,
    },

    /// Show configuration
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Reset configuration to defaults
    Reset,
}

/// Parse and validate output format
pub fn parse_output_format(format: &str) -> Result<crate::config::OutputFormat, String> {
    match format.to_lowercase().as_str() {
        "console" => Ok(crate::config::OutputFormat::Console),
        "json" => Ok(crate::config::OutputFormat::Json),
        _ => Err(format!(
            "Invalid output format: {}. Supported: console, json",
            format
        )),
    }
}

/// Validate file extension
pub fn validate_file_extension(path: &PathBuf, allowed_extensions: &[&str]) -> Result<(), String> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) => {
            if allowed_extensions.contains(&ext.to_lowercase().as_str()) {
                Ok(())
            } else {
                Err(format!(
                    "Unsupported file extension: .{}. Allowed: {}",
                    ext,
                    allowed_extensions.join(", ")
                ))
            }
        }
        None => Err("File has no extension".to_string()),
    }
}
