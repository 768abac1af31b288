//! Command-line interface for codegauge.

use clap::{Parser, Subcommand};
use globset::{Glob, GlobSet, GlobSetBuilder};
use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::config::Thresholds;
use crate::report::{self, FileExtractionReport, FileMetricsReport};
use crate::{compute_metrics_with, extract_text, languages};

/// Exit codes.
pub const EXIT_SUCCESS: i32 = 0;
pub const EXIT_FAILED: i32 = 1;
pub const EXIT_ERROR: i32 = 2;

/// Multi-language code metrics and text extraction.
///
/// Codegauge parses source files with tree-sitter and interprets
/// declarative per-language definitions to compute metrics (complexity,
/// comment lines, RLOC, per-function statistics, message chains) and to
/// extract identifiers, comments and string literals.
#[derive(Parser)]
#[command(name = "codegauge")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Compute code metrics for a file or directory
    #[command(visible_alias = "m")]
    Metrics(ScanArgs),
    /// Extract identifiers, comments and strings
    #[command(visible_alias = "x")]
    Extract(ScanArgs),
    /// List supported languages and extensions
    Languages,
}

/// Arguments shared by the scanning commands.
#[derive(Parser)]
pub struct ScanArgs {
    /// Path to analyze (file or directory)
    pub path: PathBuf,

    /// Output format: pretty or json
    #[arg(short, long, default_value = "pretty")]
    pub format: String,

    /// Glob patterns to exclude (repeatable)
    #[arg(short, long)]
    pub exclude: Vec<String>,

    /// Path to a thresholds YAML file for the derived metrics
    #[arg(short, long)]
    pub thresholds: Option<PathBuf>,
}

/// One analyzable file with its resolved language id.
struct Candidate {
    path: PathBuf,
    language: &'static str,
}

/// Collect analyzable files under the path, honoring exclude globs.
fn collect_candidates(root: &Path, excludes: &GlobSet) -> anyhow::Result<Vec<Candidate>> {
    let mut candidates = Vec::new();

    if root.is_file() {
        if let Some(language) = language_for_path(root) {
            candidates.push(Candidate {
                path: root.to_path_buf(),
                language,
            });
        } else {
            anyhow::bail!("unsupported file type: {}", root.display());
        }
        return Ok(candidates);
    }

    for entry in WalkDir::new(root).into_iter().filter_map(Result::ok) {
        if !entry.file_type().is_file() {
            continue;
        }
        let path = entry.path();
        if excludes.is_match(path) {
            continue;
        }
        if let Some(language) = language_for_path(path) {
            candidates.push(Candidate {
                path: path.to_path_buf(),
                language,
            });
        }
    }

    Ok(candidates)
}

fn language_for_path(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?;
    languages::by_extension(ext).map(|l| l.id)
}

fn build_excludes(patterns: &[String]) -> anyhow::Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        builder.add(Glob::new(pattern)?);
    }
    Ok(builder.build()?)
}

fn load_thresholds(args: &ScanArgs) -> anyhow::Result<Thresholds> {
    match &args.thresholds {
        Some(path) => Thresholds::load(path),
        None => Ok(Thresholds::default()),
    }
}

fn progress_bar(len: usize, quiet: bool) -> ProgressBar {
    // Only worth drawing on larger scans, and never into JSON output.
    if quiet || len < 16 {
        return ProgressBar::hidden();
    }
    let bar = ProgressBar::new(len as u64);
    bar.set_style(
        ProgressStyle::with_template("  {bar:30} {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );
    bar
}

/// Run the `metrics` command.
pub fn run_metrics(args: &ScanArgs) -> anyhow::Result<i32> {
    let excludes = build_excludes(&args.exclude)?;
    let thresholds = load_thresholds(args)?;
    let candidates = collect_candidates(&args.path, &excludes)?;
    let json = args.format == "json";

    let bar = progress_bar(candidates.len(), json);
    // Definitions are immutable and shared; per-file analysis runs in
    // parallel with no locking.
    let outcomes: Vec<anyhow::Result<FileMetricsReport>> = candidates
        .par_iter()
        .map(|candidate| {
            let source = std::fs::read_to_string(&candidate.path)?;
            let result = compute_metrics_with(&source, candidate.language, &thresholds)?;
            bar.inc(1);
            Ok(FileMetricsReport {
                path: candidate.path.display().to_string(),
                language: candidate.language.to_string(),
                result,
            })
        })
        .collect();
    bar.finish_and_clear();

    let (reports, errors) = split_outcomes(outcomes);

    if json {
        report::write_json(reports)?;
    } else {
        report::write_header(&args.path.display().to_string());
        for file_report in &reports {
            report::write_metrics_pretty(file_report);
        }
        report::write_summary(reports.len(), errors);
    }

    Ok(if errors == 0 { EXIT_SUCCESS } else { EXIT_FAILED })
}

/// Run the `extract` command.
pub fn run_extract(args: &ScanArgs) -> anyhow::Result<i32> {
    let excludes = build_excludes(&args.exclude)?;
    let candidates = collect_candidates(&args.path, &excludes)?;
    let json = args.format == "json";

    let bar = progress_bar(candidates.len(), json);
    let outcomes: Vec<anyhow::Result<FileExtractionReport>> = candidates
        .par_iter()
        .map(|candidate| {
            let source = std::fs::read_to_string(&candidate.path)?;
            let result = extract_text(&source, candidate.language)?;
            bar.inc(1);
            Ok(FileExtractionReport::new(
                candidate.path.display().to_string(),
                candidate.language.to_string(),
                &result,
            ))
        })
        .collect();
    bar.finish_and_clear();

    let (reports, errors) = split_outcomes(outcomes);

    if json {
        report::write_json(reports)?;
    } else {
        report::write_header(&args.path.display().to_string());
        for file_report in &reports {
            report::write_extraction_pretty(file_report);
        }
        report::write_summary(reports.len(), errors);
    }

    Ok(if errors == 0 { EXIT_SUCCESS } else { EXIT_FAILED })
}

/// Run the `languages` command.
pub fn run_languages() -> anyhow::Result<i32> {
    println!("supported languages:");
    for id in languages::supported_languages() {
        let support = languages::by_id(id);
        let extensions = support.map(|l| l.extensions.join(", ")).unwrap_or_default();
        println!("  {:<12} {}", id, extensions);
    }
    Ok(EXIT_SUCCESS)
}

fn split_outcomes<T>(outcomes: Vec<anyhow::Result<T>>) -> (Vec<T>, usize) {
    let mut reports = Vec::with_capacity(outcomes.len());
    let mut errors = 0;
    for outcome in outcomes {
        match outcome {
            Ok(report) => reports.push(report),
            Err(e) => {
                eprintln!("error: {e}");
                errors += 1;
            }
        }
    }
    (reports, errors)
}
