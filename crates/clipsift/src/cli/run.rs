//! The `clipsift run` command: enumerate, score, copy matches, persist scores.
//!
//! The run is fully sequential: one image is read, embedded, scored, and
//! optionally copied before the next is started. Per-item failures are
//! recorded as 0.0 and never abort the batch; setup failures (destination
//! directory, model loading) and copy failures do.

use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Args;

use clipsift_core::{
    ClipScorer, Config, EmbeddingEngine, FileDiscovery, ImageDecoder, ImageScorer, RunSummary,
    ScoreReport,
};

/// Arguments for the `run` command.
#[derive(Args, Debug)]
pub struct RunArgs {
    /// Directory to scan for images
    #[arg(required = true)]
    pub input_dir: PathBuf,

    /// Description of the subject to search for (e.g. "a red car")
    #[arg(short, long)]
    pub text: String,

    /// Destination directory for matching images
    #[arg(long, default_value = "clipped_dir")]
    pub dest_dir: PathBuf,

    /// Inclusive minimum score to trigger a copy (0.0 - 1.0).
    /// Defaults to `scoring.threshold` from the config file.
    #[arg(long)]
    pub threshold: Option<f32>,

    /// Path for the saved score report
    #[arg(short, long, default_value = "results.json")]
    pub output: PathBuf,
}

/// Execute the run command.
pub fn execute(args: RunArgs, config: Config) -> anyhow::Result<()> {
    let threshold = args.threshold.unwrap_or(config.scoring.threshold);
    if !(0.0..=1.0).contains(&threshold) {
        anyhow::bail!("threshold must be between 0.0 and 1.0 (got {threshold})");
    }

    // Destination directory failure is fatal: without it no output can be
    // produced, so abort before any scoring happens.
    ensure_dest_dir(&args.dest_dir)?;

    let discovery = FileDiscovery::new(config.processing.clone());
    let files = discovery.discover(&args.input_dir);
    if files.is_empty() {
        println!("No image files found in {}", args.input_dir.display());
        return Ok(());
    }

    println!("Found {} images. Start processing...", files.len());
    println!("Target: '{}' (Threshold: {})", args.text, threshold);

    // Model loading is fatal-setup; happens after the empty-input check so an
    // empty directory exits cleanly without touching the model.
    let engine = EmbeddingEngine::load(&config.embedding, &config.model_dir())
        .context("Failed to initialize the CLIP model")?;
    let decoder = ImageDecoder::new(config.limits.clone());
    let scorer = ClipScorer::new(engine, decoder, &args.text, &config.scoring.distractors)
        .context("Failed to build the scorer")?;
    tracing::debug!("Scoring against {} phrases", scorer.bank_size());

    let summary = run_batch(
        &scorer,
        &files,
        &args.dest_dir,
        threshold,
        &args.text,
        &args.output,
    )?;

    println!("{}", "-".repeat(30));
    println!("Processing complete.");
    println!("Found {} images.", summary.found);
    println!(
        "Copied {} images to '{}'.",
        summary.copied,
        args.dest_dir.display()
    );
    println!("Scores saved to {}", summary.output.display());

    Ok(())
}

/// Create the destination directory if absent, printing a creation notice
/// exactly once when it is newly made.
fn ensure_dest_dir(dest_dir: &Path) -> anyhow::Result<()> {
    if !dest_dir.exists() {
        std::fs::create_dir_all(dest_dir).with_context(|| {
            format!(
                "Failed to create destination directory {}",
                dest_dir.display()
            )
        })?;
        println!("Created directory: {}", dest_dir.display());
    }
    Ok(())
}

/// One sequential pass over the candidates: score, record, copy at or above
/// the threshold, then persist the complete score map in a single write.
///
/// Takes the scorer as a trait object so tests can drive the loop without a
/// model on disk.
fn run_batch(
    scorer: &dyn ImageScorer,
    files: &[PathBuf],
    dest_dir: &Path,
    threshold: f32,
    target: &str,
    output: &Path,
) -> anyhow::Result<RunSummary> {
    let progress = create_progress_bar(files.len() as u64);

    let mut report = ScoreReport::new(target, threshold);
    let mut copied = 0usize;

    for path in files {
        let outcome = scorer.score(path);
        let score = outcome.value();
        report.record(path, score);

        // Inclusive comparison: a score exactly at the threshold copies.
        if score >= threshold {
            let file_name = path
                .file_name()
                .with_context(|| format!("Candidate path has no file name: {}", path.display()))?;
            let dest = dest_dir.join(file_name);
            copy_preserving_times(path, &dest).with_context(|| {
                format!("Failed to copy {} to {}", path.display(), dest.display())
            })?;
            copied += 1;
            progress.println(format!(
                "[COPY] {} (Score: {:.4})",
                file_name.to_string_lossy(),
                score
            ));
        }

        progress.inc(1);
    }

    progress.finish_and_clear();

    report
        .save(output)
        .with_context(|| format!("Failed to save score report to {}", output.display()))?;

    Ok(RunSummary {
        found: files.len(),
        copied,
        output: output.to_path_buf(),
    })
}

/// Copy a file and carry over its modified/accessed timestamps.
fn copy_preserving_times(src: &Path, dest: &Path) -> std::io::Result<()> {
    std::fs::copy(src, dest)?;

    let metadata = std::fs::metadata(src)?;
    let mut times = std::fs::FileTimes::new();
    if let Ok(modified) = metadata.modified() {
        times = times.set_modified(modified);
    }
    if let Ok(accessed) = metadata.accessed() {
        times = times.set_accessed(accessed);
    }

    let dest_file = std::fs::OpenOptions::new().write(true).open(dest)?;
    dest_file.set_times(times)
}

/// Create a progress bar for the scoring pass.
fn create_progress_bar(total: u64) -> indicatif::ProgressBar {
    use indicatif::{ProgressBar, ProgressStyle};

    let pb = ProgressBar::new(total);
    pb.set_style(
        ProgressStyle::default_bar()
            .template(
                "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) {msg}",
            )
            .unwrap()
            .progress_chars("##-"),
    );
    pb
}
