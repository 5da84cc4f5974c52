use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::{ArgAction, Parser, Subcommand};

use crate::config::CollectorConfig;
use crate::models::RunSummary;
use crate::output::write_output;
use crate::pipeline::collect;
use crate::utils::{format_path_with_tilde, init_logging, preview_line};

/// Rejected lines listed by `stats` before the rest are summarized
const MAX_LISTED_ERRORS: usize = 20;
const ERROR_PREVIEW_CHARS: usize = 80;

#[derive(Parser)]
#[command(name = "conversation-collector")]
#[command(version)]
#[command(
    about = "Collect Claude Code conversation logs into a deduplicated, privacy-scrubbed record",
    long_about = None
)]
pub struct Cli {
    /// Data directory holding history.jsonl and projects/ (default: ~/.claude)
    #[arg(long, global = true)]
    pub claude_dir: Option<PathBuf>,

    /// Keep message text as-is instead of masking PII
    #[arg(long, global = true)]
    pub no_mask: bool,

    /// Extra regex to redact (repeatable)
    #[arg(long = "mask-pattern", global = true)]
    pub mask_patterns: Vec<String>,

    /// Read log files one at a time
    #[arg(long, global = true)]
    pub sequential: bool,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Write every session with its messages (full form)
    Collect {
        /// Destination file
        #[arg(short, long, default_value = "conversations.json")]
        output: PathBuf,
    },
    /// Write user/assistant conversation turns (portfolio form)
    Portfolio {
        /// Only include this project (name or full path)
        #[arg(short, long)]
        project: Option<String>,

        /// Destination file
        #[arg(short, long, default_value = "portfolio.json")]
        output: PathBuf,
    },
    /// Show what a collection run would keep and drop, without writing anything
    Stats,
}

impl Cli {
    fn config(&self) -> Result<CollectorConfig> {
        let mut config = match &self.claude_dir {
            Some(dir) => CollectorConfig::new(dir.clone()),
            None => CollectorConfig::from_env()?,
        };
        config.mask_pii = !self.no_mask;
        config.mask_patterns = self.mask_patterns.clone();
        config.parallel = !self.sequential;
        if let Some(Commands::Portfolio { project, .. }) = &self.command {
            config.project_filter = project.clone();
        }
        Ok(config)
    }
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let Some(command) = &cli.command else {
        println!("Use --help for usage information");
        return Ok(());
    };

    let config = cli.config()?;
    match command {
        Commands::Collect { output } => run_collect(&config, output),
        Commands::Portfolio { output, .. } => run_portfolio(&config, output),
        Commands::Stats => show_stats(&config),
    }
}

fn run_collect(config: &CollectorConfig, output: &Path) -> Result<()> {
    let run = collect(config)?;
    write_output(output, &run.full_output())?;

    println!(
        "Wrote {} sessions ({} messages) to {}",
        run.stats.total_sessions,
        run.stats.total_messages,
        output.display()
    );
    print_run_line(&run.summary);
    Ok(())
}

fn run_portfolio(config: &CollectorConfig, output: &Path) -> Result<()> {
    let run = collect(config)?;
    let portfolio = run.portfolio_output(config.project_filter.as_deref());
    write_output(output, &portfolio)?;

    println!(
        "Wrote {} conversations for project '{}' to {}",
        portfolio.stats.total_conversations,
        portfolio.project,
        output.display()
    );
    print_run_line(&run.summary);
    Ok(())
}

fn print_run_line(summary: &RunSummary) {
    println!(
        "Files processed: {}, lines skipped: {}, noise removed: {}, duplicates removed: {}",
        summary.files_processed,
        summary.lines_skipped,
        summary.noise_removed,
        summary.duplicates_removed
    );
}

fn show_stats(config: &CollectorConfig) -> Result<()> {
    let run = collect(config)?;
    let summary = &run.summary;

    println!("Conversation Collection Statistics");
    println!("==================================");
    println!("Files processed: {}", summary.files_processed);
    if summary.files_failed > 0 {
        println!("Files unreadable: {}", summary.files_failed);
    }
    println!("Lines read: {}", summary.lines_read);
    println!("  Skipped (errors): {}", summary.lines_skipped);
    println!("  Ignored (non-conversation): {}", summary.lines_ignored);
    println!("Noise removed: {}", summary.noise_removed);
    println!("Duplicates removed: {}", summary.duplicates_removed);
    println!("Messages retained: {}", run.stats.total_messages);
    println!("Sessions: {}", run.stats.total_sessions);
    println!();

    if !run.stats.by_source.is_empty() {
        println!("By source:");
        for (source, count) in &run.stats.by_source {
            println!("  {:?}: {}", source, count);
        }
    }
    if !run.stats.by_project.is_empty() {
        println!("By project:");
        for (project, count) in &run.stats.by_project {
            println!("  {}: {}", project, count);
        }
    }

    if !summary.errors.is_empty() {
        println!();
        println!("Rejected lines:");
        for error in summary.errors.iter().take(MAX_LISTED_ERRORS) {
            println!(
                "  {}:{}: {}",
                format_path_with_tilde(&error.path),
                error.line_number,
                error.kind
            );
            println!("    {}", preview_line(&error.raw_text, ERROR_PREVIEW_CHARS));
        }
        if summary.errors.len() > MAX_LISTED_ERRORS {
            println!("  ... and {} more", summary.errors.len() - MAX_LISTED_ERRORS);
        }
    }

    println!();
    println!("Data directory: {}", format_path_with_tilde(&config.claude_dir));

    if let (Some(first), Some(last)) = (run.sessions.first(), run.sessions.last()) {
        println!("Earliest session: {}", first.start_time);
        println!("Latest session: {}", last.start_time);
    }

    Ok(())
}
