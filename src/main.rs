use anyhow::Result;
use chrono::Utc;
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tracing::{info, Level};

use zahlwort::{
    discover_inputs, process_files_parallel, Dialect, Normalizer, NormalizerConfig,
    ProcessingConfig, RunStats,
};

#[derive(Parser, Debug)]
#[command(name = "zahlwort")]
#[command(about = "Spell out numbers, dates and times in German text as Swiss-German words")]
#[command(version)]
struct Args {
    /// Files or directories (walked for *.txt); stdin to stdout when omitted
    inputs: Vec<PathBuf>,

    /// Dialect, overrides the config file
    #[arg(short, long, value_enum)]
    dialect: Option<Dialect>,

    /// TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Normalize this text and print the result
    #[arg(short, long)]
    text: Option<String>,

    /// Rewrite existing _spoken.txt outputs
    #[arg(long)]
    overwrite_all: bool,

    /// Abort on first error
    #[arg(long)]
    fail_fast: bool,

    /// Suppress console progress bar
    #[arg(long)]
    no_progress: bool,

    /// Stats output file path
    #[arg(long, default_value = "run_stats.json")]
    stats_out: PathBuf,

    /// Debug-level logging
    #[arg(short, long)]
    verbose: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Logs go to stderr, stdout carries normalized text
    let level = if args.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    tracing_subscriber::fmt()
        .with_target(false)
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .json()
        .init();

    info!(?args, "Parsed CLI arguments");

    let mut config = match &args.config {
        Some(path) => NormalizerConfig::load(path).await?,
        None => NormalizerConfig::default(),
    };
    if let Some(dialect) = args.dialect {
        config.dialect = dialect;
    }

    let normalizer = Arc::new(Normalizer::from_config(&config).await?);

    if let Some(text) = &args.text {
        let normalized = normalize_blocking(&normalizer, text.clone()).await?;
        println!("{normalized}");
        return Ok(());
    }

    if args.inputs.is_empty() {
        let mut input = String::new();
        tokio::io::stdin().read_to_string(&mut input).await?;
        let normalized = normalize_blocking(&normalizer, input).await?;
        let mut stdout = tokio::io::stdout();
        stdout.write_all(normalized.as_bytes()).await?;
        stdout.flush().await?;
        return Ok(());
    }

    let run_start = Utc::now();
    let started = Instant::now();
    let files = discover_inputs(&args.inputs)?;

    let progress = (!args.no_progress).then(|| {
        let bar = ProgressBar::new(files.len() as u64);
        if let Ok(style) =
            ProgressStyle::with_template("{spinner} [{elapsed_precise}] {bar:40} {pos}/{len} files")
        {
            bar.set_style(style);
        }
        bar
    });

    let processing = ProcessingConfig {
        overwrite_all: args.overwrite_all,
        fail_fast: args.fail_fast,
    };
    let file_stats = process_files_parallel(normalizer, files, processing, progress).await?;

    let run_stats = RunStats::from_file_stats(run_start, started.elapsed(), file_stats);
    run_stats.write(&args.stats_out).await?;

    info!(
        "Run complete: {} processed, {} skipped, {} failed, {} spans replaced, {} span failures",
        run_stats.files_processed,
        run_stats.files_skipped,
        run_stats.files_failed,
        run_stats.total_spans_replaced,
        run_stats.total_span_failures
    );
    if run_stats.files_failed > 0 {
        eprintln!("{} files failed, see {}", run_stats.files_failed, args.stats_out.display());
    }
    Ok(())
}

async fn normalize_blocking(normalizer: &Arc<Normalizer>, text: String) -> Result<String> {
    let normalizer = Arc::clone(normalizer);
    Ok(tokio::task::spawn_blocking(move || normalizer.convert(&text)).await?)
}
