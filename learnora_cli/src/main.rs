use anyhow::{Context, Result};
/// Learnora CLI - terminal learning dashboard
///
/// Provides the interactive dashboard plus one-shot assess, paths, progress
/// and chat commands against the Learnora API.
use clap::{Parser, Subcommand};
use env_logger::{Env, Target};
use learnora_cli::screens::assessment::{capitalize, format_percent, theta_label};
use learnora_cli::screens::paths::progress_bar;
use learnora_cli::ui;
use learnora_core::config::{self, API_URL_ENV};
use learnora_core::types::Assessment;
use learnora_core::{ClientConfig, HttpApi, LearnoraApi};
use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "learnora")]
#[command(about = "Learnora - adaptive learning dashboard", long_about = None)]
struct Cli {
    /// Base URL of the Learnora API
    #[arg(long, env = API_URL_ENV, global = true)]
    api_url: Option<String>,
    /// Path to a YAML config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,
    /// Where the interactive dashboard writes its log
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,
    /// Print raw JSON instead of text (one-shot commands)
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Launch the interactive dashboard (default)
    Tui,
    /// Start a new assessment and print the result
    Assess,
    /// List learning paths, or the content of one path
    Paths {
        /// Learning path ID
        #[arg(short, long)]
        id: Option<i64>,
    },
    /// Set the progress of a learning path
    Progress {
        /// Learning path ID
        #[arg(short, long)]
        id: i64,
        /// Progress percent
        #[arg(short, long, value_parser = clap::value_parser!(u8).range(0..=100))]
        value: u8,
    },
    /// Send one message to the learning assistant
    Chat {
        /// Message text
        #[arg(short, long)]
        message: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let command = cli.command.unwrap_or(Commands::Tui);

    match &command {
        Commands::Tui => {
            let log_path = cli.log_file.clone().unwrap_or_else(config::default_log_path);
            init_file_logging(&log_path)?;
        }
        _ => init_stderr_logging(),
    }

    let config = ClientConfig::load(cli.config.as_deref(), cli.api_url.as_deref())
        .context("Failed to load configuration")?;
    log::debug!("[CONFIG] API base URL: {}", config.api_base_url);

    match command {
        Commands::Tui => ui::run_tui(&config)?,
        Commands::Assess => run_assess_cli(&config, cli.json)?,
        Commands::Paths { id } => run_paths_cli(&config, id, cli.json)?,
        Commands::Progress { id, value } => run_progress_cli(&config, id, value)?,
        Commands::Chat { message } => run_chat_cli(&config, &message, cli.json)?,
    }

    Ok(())
}

fn init_stderr_logging() {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();
}

/// The dashboard owns the terminal, so its log goes to a file.
fn init_file_logging(path: &Path) -> Result<()> {
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create log directory {}", dir.display()))?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open log file {}", path.display()))?;

    env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .target(Target::Pipe(Box::new(file)))
        .init();
    Ok(())
}

fn block_on<F: std::future::Future>(future: F) -> Result<F::Output> {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;
    Ok(runtime.block_on(future))
}

fn run_assess_cli(config: &ClientConfig, json: bool) -> Result<()> {
    let api = HttpApi::new(&config.api_base_url)?;

    println!("Running assessment...");
    let assessment = block_on(api.start_assessment())?.context("Assessment failed")?;

    if json {
        println!("{}", serde_json::to_string_pretty(&assessment)?);
        return Ok(());
    }

    print_assessment(&assessment);
    Ok(())
}

fn print_assessment(assessment: &Assessment) {
    println!("\nAssessment complete.");
    println!("  Ability score (θ): {}", theta_label(assessment.theta));

    if !assessment.mastery_scores.is_empty() {
        println!("\n  Mastery:");
        for (skill, score) in &assessment.mastery_scores {
            println!("    {:<24} {:>4}", capitalize(skill), format_percent(*score));
        }
    }

    if assessment.learning_gaps.is_empty() {
        println!("\n  No gaps identified. Great job!");
    } else {
        println!("\n  Learning gaps:");
        for gap in &assessment.learning_gaps {
            println!("    {} - {}", gap.skill, gap.priority.label());
            println!(
                "      Mastery: {} | Level: {}",
                format_percent(gap.mastery_level),
                gap.recommended_difficulty
            );
        }
    }
}

fn run_paths_cli(config: &ClientConfig, id: Option<i64>, json: bool) -> Result<()> {
    let api = HttpApi::new(&config.api_base_url)?;

    if let Some(path_id) = id {
        let items = block_on(api.path_details(path_id))?
            .with_context(|| format!("Failed to load learning path {}", path_id))?;

        if json {
            println!("{}", serde_json::to_string_pretty(&items)?);
            return Ok(());
        }

        println!("Learning path {}: {} content items", path_id, items.len());
        for (idx, item) in items.iter().enumerate() {
            println!("\n  {}. {}", idx + 1, item.title);
            if let Some(desc) = item.description.as_deref().filter(|d| !d.is_empty()) {
                println!("     {}", desc);
            }
            println!(
                "     {} | {} min | {}",
                item.difficulty, item.duration_minutes, item.content_type
            );
            if !item.url.is_empty() {
                println!("     {}", item.url);
            }
        }
        return Ok(());
    }

    let paths = block_on(api.learning_paths())?.context("Failed to load learning paths")?;

    if json {
        println!("{}", serde_json::to_string_pretty(&paths)?);
        return Ok(());
    }

    if paths.is_empty() {
        println!("No learning paths yet.");
        println!("Take an assessment to get personalized recommendations!");
        return Ok(());
    }

    for path in &paths {
        let done = if path.is_completed() { "  ✓ Completed" } else { "" };
        println!("\n  [{}] {}{}", path.id, path.title, done);
        println!(
            "      {} {}% Complete",
            progress_bar(path.progress, 20),
            path.progress
        );
    }
    Ok(())
}

fn run_progress_cli(config: &ClientConfig, id: i64, value: u8) -> Result<()> {
    let api = HttpApi::new(&config.api_base_url)?;

    block_on(api.update_progress(id, value))?
        .with_context(|| format!("Failed to update progress for learning path {}", id))?;

    println!("Learning path {} progress set to {}%.", id, value);
    Ok(())
}

fn run_chat_cli(config: &ClientConfig, message: &str, json: bool) -> Result<()> {
    let message = message.trim();
    if message.is_empty() {
        anyhow::bail!("Message is empty");
    }

    let api = HttpApi::new(&config.api_base_url)?;
    let reply = block_on(api.send_chat(message))?.context("Chat request failed")?;

    if json {
        println!("{}", serde_json::json!({ "message": message, "response": reply }));
    } else {
        println!("You: {}", message);
        println!("Assistant: {}", reply);
    }
    Ok(())
}
