//! Resume-gpt: AI-powered resume analysis and job matching tool

use clap::Parser;
use log::{error, info};
use resume_gpt::cli::{self, Cli, Commands, ConfigAction};
use resume_gpt::config::{Config, OutputFormat};
use resume_gpt::error::{Result, ResumeGptError};
use resume_gpt::input::manager::InputManager;
use resume_gpt::llm::analyzer::ResumeAnalyzer;
use resume_gpt::llm::response::ResumeAnalysis;
use resume_gpt::output::formatter::{ConsoleFormatter, JsonFormatter};
use resume_gpt::session::Session;
use std::path::PathBuf;
use std::process;

#[tokio::main]
async fn main() {
    // .env is optional; the variable itself is not
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let config = match Config::load() {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    // Missing credential is fatal at startup, never a per-request error.
    // Only the config subcommand runs without it.
    if !matches!(cli.command, Commands::Config { .. }) {
        if let Err(e) = config.api_key() {
            error!("{}", e);
            process::exit(1);
        }
    }

    if let Err(e) = run_command(cli.command, config).await {
        error!("Command failed: {}", e);
        process::exit(1);
    }
}

async fn run_command(command: Commands, config: Config) -> Result<()> {
    match command {
        Commands::Analyze { resume, output, save } => {
            cli::validate_file_extension(&resume, &["pdf", "txt"])
                .map_err(|e| ResumeGptError::InvalidInput(format!("Resume file: {}", e)))?;
            let output_format =
                cli::parse_output_format(&output).map_err(ResumeGptError::InvalidInput)?;
            let api_key = config.api_key()?;

            println!("🚀 Resume analysis");
            println!("📄 Resume: {}", resume.display());

            let input_manager = InputManager::new();
            let text = input_manager.extract_text(&resume).await?;
            info!("Extracted {} characters of resume text", text.len());

            let analyzer = ResumeAnalyzer::new(&config, api_key);
            let mut session = Session::new();
            let token = session.begin_request();

            println!("🧠 Analyzing resume...");
            let analysis = match analyzer.analyze_resume(&text).await {
                Ok(analysis) => analysis,
                Err(e) => {
                    error!("Resume analysis failed: {}", e);
                    eprintln!("❌ Failed to analyze resume. Please check your OpenAI API key configuration.");
                    return Err(e);
                }
            };
            session.apply_resume(token, analysis.clone());

            render(&output_format, &config, &analysis, |formatter| {
                formatter.format_analysis(&analysis)
            })?;

            if let Some(save_path) = save {
                let json = serde_json::to_string_pretty(&analysis)?;
                std::fs::write(&save_path, json)?;
                println!("💾 Saved analysis to {}", save_path.display());
            }
        }

        Commands::Match {
            resume,
            analysis,
            job_title,
            output,
        } => {
            let output_format =
                cli::parse_output_format(&output).map_err(ResumeGptError::InvalidInput)?;
            let api_key = config.api_key()?;

            let analyzer = ResumeAnalyzer::new(&config, api_key);
            let mut session = Session::new();

            let token = session.begin_request();
            let held = match load_or_analyze(resume, analysis, &analyzer).await {
                Ok(held) => held,
                Err(e) => {
                    error!("Resume analysis failed: {}", e);
                    eprintln!("❌ Failed to analyze resume. Please check your OpenAI API key configuration.");
                    return Err(e);
                }
            };
            session.apply_resume(token, held.clone());

            println!("🔍 Searching job matches for '{}'...", job_title);
            let token = session.begin_request();
            let matches = match analyzer.find_job_matches(&held, &job_title).await {
                Ok(matches) => matches,
                Err(e) => {
                    error!("Job match search failed: {}", e);
                    eprintln!("❌ Failed to find job matches. Please try again.");
                    return Err(e);
                }
            };
            session.apply_matches(token, matches);

            let matches = session.matches().to_vec();
            render(&output_format, &config, &matches, |formatter| {
                formatter.format_matches(&matches)
            })?;
        }

        Commands::Improve {
            resume,
            analysis,
            output,
        } => {
            let output_format =
                cli::parse_output_format(&output).map_err(ResumeGptError::InvalidInput)?;
            let api_key = config.api_key()?;

            let analyzer = ResumeAnalyzer::new(&config, api_key);

            let held = match load_or_analyze(resume, analysis, &analyzer).await {
                Ok(held) => held,
                Err(e) => {
                    error!("Resume analysis failed: {}", e);
                    eprintln!("❌ Failed to analyze resume. Please check your OpenAI API key configuration.");
                    return Err(e);
                }
            };

            println!("✨ Requesting improvement suggestions...");
            let improvement = match analyzer.improve_resume(&held).await {
                Ok(improvement) => improvement,
                Err(e) => {
                    error!("Improvement analysis failed: {}", e);
                    eprintln!("❌ Failed to analyze resume. Please try again.");
                    return Err(e);
                }
            };

            render(&output_format, &config, &improvement, |formatter| {
                formatter.format_improvement(&improvement)
            })?;
        }

        Commands::Config { action } => match action {
            Some(ConfigAction::Show) | None => {
                println!("⚙️  Current Configuration\n");
                println!("API Base URL: {}", config.api.base_url);
                println!("Model: {}", config.api.model);
                println!("Output Format: {:?}", config.output.format);
                println!("Color Output: {}", config.output.color_output);
            }

            Some(ConfigAction::Reset) => {
                println!("🔄 Resetting configuration to defaults...");
                let default_config = Config::default();
                default_config.save()?;
                println!("✅ Configuration reset successfully!");
            }
        },
    }

    Ok(())
}

/// Reuse a saved analysis when given, otherwise extract and analyze the
/// resume file.
async fn load_or_analyze(
    resume: Option<PathBuf>,
    analysis_path: Option<PathBuf>,
    analyzer: &ResumeAnalyzer,
) -> Result<ResumeAnalysis> {
    if let Some(path) = analysis_path {
        let content = std::fs::read_to_string(&path)?;
        let analysis = serde_json::from_str(&content)?;
        info!("Loaded saved analysis from {}", path.display());
        return Ok(analysis);
    }

    let resume = resume.ok_or_else(|| {
        ResumeGptError::InvalidInput("Provide either --resume or --analysis".to_string())
    })?;
    cli::validate_file_extension(&resume, &["pdf", "txt"])
        .map_err(|e| ResumeGptError::InvalidInput(format!("Resume file: {}", e)))?;

    println!("📄 Resume: {}", resume.display());
    let text = InputManager::new().extract_text(&resume).await?;
    println!("🧠 Analyzing resume...");
    analyzer.analyze_resume(&text).await
}

fn render<T, F>(format: &OutputFormat, config: &Config, value: &T, console: F) -> Result<()>
where
    T: serde::Serialize,
    F: FnOnce(&ConsoleFormatter) -> String,
{
    match format {
        OutputFormat::Console => {
            let formatter = ConsoleFormatter::new(config.output.color_output);
            println!("\n{}", console(&formatter));
        }
        OutputFormat::Json => {
            println!("{}", JsonFormatter.format(value)?);
        }
    }
    Ok(())
}
