// WHY: File-level driver shared by the CLI, tests and benches: finds inputs, writes
// `<stem>_spoken.txt` next to each source and collects per-file and per-run statistics

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use futures::stream::{self, StreamExt};
use indicatif::ProgressBar;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::io::{AsyncWriteExt, BufWriter};
use tracing::{debug, info, warn};
use walkdir::WalkDir;

use crate::pipeline::Normalizer;

/// Suffix appended to the stem of every generated file
pub const OUTPUT_SUFFIX: &str = "_spoken";

pub const STATUS_SUCCESS: &str = "success";
pub const STATUS_SKIPPED: &str = "skipped";
pub const STATUS_FAILED: &str = "failed";

/// Output path for a source file: `dir/name.txt` becomes `dir/name_spoken.txt`
pub fn output_path(source_path: &Path) -> PathBuf {
    let stem = source_path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("unknown");
    source_path.with_file_name(format!("{stem}{OUTPUT_SUFFIX}.txt"))
}

/// True for files this tool wrote itself
pub fn is_generated_output(path: &Path) -> bool {
    path.file_stem()
        .and_then(|s| s.to_str())
        .is_some_and(|stem| stem.ends_with(OUTPUT_SUFFIX))
}

fn is_text_input(path: &Path) -> bool {
    path.extension().is_some_and(|ext| ext == "txt") && !is_generated_output(path)
}

/// Expand inputs into source files: files are taken as given, directories are walked
/// recursively for `*.txt` that are not generated outputs. Sorted and deduplicated.
pub fn discover_inputs(inputs: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for input in inputs {
        if input.is_file() {
            files.push(input.clone());
            continue;
        }
        if !input.is_dir() {
            anyhow::bail!("Input does not exist: {}", input.display());
        }
        for entry in WalkDir::new(input).follow_links(false) {
            let entry = entry
                .with_context(|| format!("Failed to walk directory {}", input.display()))?;
            if entry.file_type().is_file() && is_text_input(entry.path()) {
                debug!("Found input file: {}", entry.path().display());
                files.push(entry.into_path());
            }
        }
    }
    files.sort();
    files.dedup();
    info!("Discovered {} input files", files.len());
    Ok(files)
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessingConfig {
    /// Rewrite outputs that already exist
    pub overwrite_all: bool,
    /// Stop at the first file that fails
    pub fail_fast: bool,
}

/// Per-file processing statistics
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct FileStats {
    pub path: String,
    pub chars_processed: u64,
    pub spans_replaced: u64,
    pub span_failures: u64,
    pub processing_time_ms: u64,
    /// success, skipped or failed
    pub status: String,
    pub error: Option<String>,
}

impl FileStats {
    fn skipped(path: &Path) -> Self {
        Self {
            path: path.display().to_string(),
            chars_processed: 0,
            spans_replaced: 0,
            span_failures: 0,
            processing_time_ms: 0,
            status: STATUS_SKIPPED.to_string(),
            error: None,
        }
    }

    fn failed(path: &Path, elapsed: Duration, error: &anyhow::Error) -> Self {
        Self {
            path: path.display().to_string(),
            chars_processed: 0,
            spans_replaced: 0,
            span_failures: 0,
            processing_time_ms: elapsed.as_millis() as u64,
            status: STATUS_FAILED.to_string(),
            error: Some(format!("{error:#}")),
        }
    }
}

/// Whole-run statistics written to `--stats-out`
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct RunStats {
    pub run_start: DateTime<Utc>,
    pub total_processing_time_ms: u64,
    pub files_processed: u64,
    pub files_skipped: u64,
    pub files_failed: u64,
    pub total_spans_replaced: u64,
    pub total_span_failures: u64,
    pub file_stats: Vec<FileStats>,
}

impl RunStats {
    pub fn from_file_stats(
        run_start: DateTime<Utc>,
        elapsed: Duration,
        file_stats: Vec<FileStats>,
    ) -> Self {
        let count = |status: &str| file_stats.iter().filter(|s| s.status == status).count() as u64;
        Self {
            run_start,
            total_processing_time_ms: elapsed.as_millis() as u64,
            files_processed: count(STATUS_SUCCESS),
            files_skipped: count(STATUS_SKIPPED),
            files_failed: count(STATUS_FAILED),
            total_spans_replaced: file_stats.iter().map(|s| s.spans_replaced).sum(),
            total_span_failures: file_stats.iter().map(|s| s.span_failures).sum(),
            file_stats,
        }
    }

    pub async fn write(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("Failed to serialize run stats")?;
        tokio::fs::write(path, json)
            .await
            .with_context(|| format!("Failed to write run stats to {}", path.display()))?;
        info!("Run statistics written to {}", path.display());
        Ok(())
    }
}

async fn write_output(path: &Path, text: &str) -> Result<()> {
    let file = tokio::fs::File::create(path)
        .await
        .with_context(|| format!("Failed to create {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    writer.write_all(text.as_bytes()).await?;
    writer.flush().await?;
    Ok(())
}

/// Normalize one file into its `_spoken.txt` sibling
pub async fn process_file(
    normalizer: Arc<Normalizer>,
    source_path: &Path,
    config: ProcessingConfig,
) -> Result<FileStats> {
    let target = output_path(source_path);
    if !config.overwrite_all && tokio::fs::try_exists(&target).await.unwrap_or(false) {
        debug!("Skipping {}, output exists", source_path.display());
        return Ok(FileStats::skipped(source_path));
    }

    let started = Instant::now();
    let content = tokio::fs::read_to_string(source_path)
        .await
        .with_context(|| format!("Failed to read {}", source_path.display()))?;
    let chars_processed = content.chars().count() as u64;

    // Tagger calls may block; keep them off the async workers
    let result = tokio::task::spawn_blocking(move || normalizer.normalize(&content))
        .await
        .context("Normalization task failed")?;

    for failure in &result.failures {
        warn!(
            "{}: {} '{}' at byte {} left unconverted: {}",
            source_path.display(),
            failure.kind,
            failure.original,
            failure.start,
            failure.error
        );
    }

    write_output(&target, &result.text).await?;

    Ok(FileStats {
        path: source_path.display().to_string(),
        chars_processed,
        spans_replaced: result.replacements.len() as u64,
        span_failures: result.failures.len() as u64,
        processing_time_ms: started.elapsed().as_millis() as u64,
        status: STATUS_SUCCESS.to_string(),
        error: None,
    })
}

/// Process files concurrently, at most one per CPU at a time
pub async fn process_files_parallel(
    normalizer: Arc<Normalizer>,
    files: Vec<PathBuf>,
    config: ProcessingConfig,
    progress: Option<ProgressBar>,
) -> Result<Vec<FileStats>> {
    let concurrency = num_cpus::get().max(1);
    let mut results = stream::iter(files)
        .map(|path| {
            let normalizer = Arc::clone(&normalizer);
            async move {
                let started = Instant::now();
                let outcome = process_file(normalizer, &path, config).await;
                (path, started.elapsed(), outcome)
            }
        })
        .buffer_unordered(concurrency);

    let mut stats = Vec::new();
    while let Some((path, elapsed, outcome)) = results.next().await {
        if let Some(bar) = &progress {
            bar.inc(1);
        }
        match outcome {
            Ok(file_stats) => stats.push(file_stats),
            Err(error) if config.fail_fast => {
                return Err(error.context(format!("Failed to process {}", path.display())));
            }
            Err(error) => {
                warn!("Failed to process {}: {:#}", path.display(), error);
                stats.push(FileStats::failed(&path, elapsed, &error));
            }
        }
    }

    if let Some(bar) = &progress {
        bar.finish_and_clear();
    }
    Ok(stats)
}
