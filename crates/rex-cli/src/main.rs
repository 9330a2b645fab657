//! REX CLI - Command-line interface
//!
//! Usage:
//!   rex extract <dir> [--output contacts.csv] [--format csv|json]
//!   rex recognize <file>

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use rex_batch::{export, BatchRunner, ExportOutcome};
use rex_core::{AppConfig, ExportFormat, Field, LoggingConfig};
use rex_extractor::FieldRecognizer;

#[derive(Parser)]
#[command(name = "rex")]
#[command(about = "Extract contact details from a folder of PDF résumés")]
#[command(version)]
struct Cli {
    /// Path to a TOML configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Process every PDF in a folder and export the contacts
    Extract {
        /// Folder containing PDF résumés
        dir: PathBuf,

        /// Export file (default: <dir>/contacts.<format>)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Export format
        #[arg(short, long)]
        format: Option<ExportFormat>,
    },
    /// Recognize fields in one PDF or text file and print them as JSON
    Recognize {
        /// PDF or plain text file
        path: PathBuf,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => AppConfig::from_file(path)?,
        None => AppConfig::default(),
    }
    .with_env_override()?;

    init_tracing(&config.logging);
    install_panic_hook();

    match cli.command {
        Commands::Extract {
            dir,
            output,
            format,
        } => run_extract(&config, dir, output, format).await,
        Commands::Recognize { path } => run_recognize(&config, &path),
    }
}

fn init_tracing(logging: &LoggingConfig) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&logging.level));

    // Progress goes to stdout, logs to stderr
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_file(logging.include_location)
        .with_line_number(logging.include_location);

    if logging.json_format {
        builder.json().init();
    } else {
        builder.init();
    }
}

/// Report panics as log events on stderr.
///
/// Panics inside the PDF backend are caught per file and reported as a
/// failed document; this keeps their message out of the progress output.
fn install_panic_hook() {
    std::panic::set_hook(Box::new(|info| {
        let location = info
            .location()
            .map(|l| format!("{}:{}", l.file(), l.line()))
            .unwrap_or_default();
        let message = info
            .payload()
            .downcast_ref::<&str>()
            .map(|s| s.to_string())
            .or_else(|| info.payload().downcast_ref::<String>().cloned())
            .unwrap_or_default();

        tracing::error!(%location, %message, "Panic");
    }));
}

fn build_recognizer(config: &AppConfig) -> anyhow::Result<FieldRecognizer> {
    let recognizer = FieldRecognizer::new()
        .with_patterns(config.recognizer.overrides())
        .context("invalid [recognizer] pattern in configuration")?;

    for field in Field::ALL {
        tracing::debug!(%field, pattern = recognizer.pattern(field), "Field matcher");
    }

    Ok(recognizer)
}

async fn run_extract(
    config: &AppConfig,
    dir: PathBuf,
    output: Option<PathBuf>,
    format: Option<ExportFormat>,
) -> anyhow::Result<()> {
    let runner = BatchRunner::new()
        .with_recognizer(build_recognizer(config)?)
        .with_suffix(config.input.suffix.clone());

    let mut handle = runner.spawn(dir.clone());
    while let Some(event) = handle.next_event().await {
        println!("{event}");
    }

    let result = handle
        .finish()
        .await
        .with_context(|| format!("failed to process {}", dir.display()))?;

    // An empty folder was already reported by the batch
    if result.is_empty() && result.failures.is_empty() {
        return Ok(());
    }

    let format = format.unwrap_or(config.export.format);
    let path = resolve_output(&dir, output, config, format);
    let outcome = export(&result.records(), &path, format)
        .with_context(|| format!("failed to export to {}", path.display()))?;
    println!("{outcome}");

    if let ExportOutcome::Saved { records, .. } = outcome {
        tracing::info!(records, skipped = result.failures.len(), "Done");
    }

    Ok(())
}

fn run_recognize(config: &AppConfig, path: &Path) -> anyhow::Result<()> {
    let is_document = path
        .file_name()
        .map(|name| name.to_string_lossy().ends_with(&config.input.suffix))
        .unwrap_or(false);

    let text = if is_document {
        rex_parser::extract_text(path)?
    } else {
        std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?
    };

    let record = build_recognizer(config)?.recognize(&text);
    println!("{}", serde_json::to_string_pretty(&record)?);

    Ok(())
}

/// CLI flag, then configuration, then `<dir>/contacts.<ext>`
fn resolve_output(
    dir: &Path,
    output: Option<PathBuf>,
    config: &AppConfig,
    format: ExportFormat,
) -> PathBuf {
    output
        .or_else(|| config.export.path.clone())
        .unwrap_or_else(|| dir.join(format!("contacts.{}", format.extension())))
}
