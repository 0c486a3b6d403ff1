//! Sequential per-file extraction pipeline.
//!
//! One generator instance serves the whole run. Files are processed strictly
//! one at a time in directory-listing order; a failure on one file is logged
//! and the loop moves on. No retries, no partial output for a failed file.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use glass_miner_core::{BatchReport, RunConfig};
use glass_miner_llm::extraction::parse_generation;
use glass_miner_llm::host::Generator;
use glass_miner_llm::prompts::make_extraction_prompt;
use tracing::{info, warn};

/// Run extraction over every file in the configured input directory.
///
/// Returns the per-run accounting. Errors are returned only for batch-level
/// problems (unreadable input directory, uncreatable output directory);
/// per-file errors land in the report.
pub fn run_batch<G: Generator>(config: &RunConfig, generator: &G) -> anyhow::Result<BatchReport> {
    fs::create_dir_all(&config.output_dir).with_context(|| {
        format!(
            "failed to create output directory {}",
            config.output_dir.display()
        )
    })?;

    let entries = fs::read_dir(&config.input_dir).with_context(|| {
        format!(
            "failed to read input directory {}",
            config.input_dir.display()
        )
    })?;

    let mut report = BatchReport::new();

    for entry in entries {
        let entry = entry.with_context(|| {
            format!(
                "failed to list entry in {}",
                config.input_dir.display()
            )
        })?;

        let path = entry.path();
        let file_name = entry.file_name().to_string_lossy().into_owned();

        if path.is_dir() {
            info!(entry = %file_name, "skipping subdirectory");
            continue;
        }

        match process_file(config, generator, &path, &file_name) {
            Ok(output_path) => {
                info!(file = %file_name, output = %output_path.display(), "extracted");
                report.record_success();
            }
            Err(err) => {
                let rendered = format!("{err:#}");
                warn!(file = %file_name, error = %rendered, "skipping file");
                report.record_failure(file_name, rendered);
            }
        }
    }

    info!(
        attempted = report.attempted,
        succeeded = report.succeeded,
        failed = report.failed.len(),
        "batch finished"
    );

    Ok(report)
}

/// End-to-end pipeline for one file: read, prompt, generate, parse, persist.
fn process_file<G: Generator>(
    config: &RunConfig,
    generator: &G,
    path: &Path,
    file_name: &str,
) -> anyhow::Result<PathBuf> {
    let document = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;

    let prompt = make_extraction_prompt(&document);
    let raw = generator
        .generate(&prompt)
        .context("generation failed")?;

    let output = parse_generation(&raw).context("could not extract payload")?;

    let output_path = config.output_path(file_name);
    let json = serde_json::to_string_pretty(&output)?;
    fs::write(&output_path, json)
        .with_context(|| format!("failed to write {}", output_path.display()))?;

    Ok(output_path)
}
