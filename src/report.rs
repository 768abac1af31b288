//! Output formatting for codegauge results.
//!
//! Supports two output formats:
//! - Pretty: colored terminal output for human readability
//! - JSON: structured output for programmatic consumption

use colored::*;
use serde::Serialize;

use crate::analysis::{ExtractionContext, ExtractionResult, MetricsResult};

// =============================================================================
// JSON Format
// =============================================================================

/// Per-file metrics entry in the JSON report.
#[derive(Serialize)]
pub struct FileMetricsReport {
    pub path: String,
    pub language: String,
    #[serde(flatten)]
    pub result: MetricsResult,
}

/// Per-file extraction entry in the JSON report.
#[derive(Serialize)]
pub struct FileExtractionReport {
    pub path: String,
    pub language: String,
    pub identifiers: Vec<String>,
    pub comments: Vec<String>,
    pub strings: Vec<String>,
}

impl FileExtractionReport {
    pub fn new(path: String, language: String, result: &ExtractionResult) -> Self {
        Self {
            path,
            language,
            identifiers: owned(result, ExtractionContext::Identifier),
            comments: owned(result, ExtractionContext::Comment),
            strings: owned(result, ExtractionContext::String),
        }
    }
}

fn owned(result: &ExtractionResult, context: ExtractionContext) -> Vec<String> {
    result
        .extracted_texts
        .iter()
        .filter(|e| e.context == context)
        .map(|e| e.text.clone())
        .collect()
}

/// Top-level JSON report.
#[derive(Serialize)]
pub struct JsonReport<T: Serialize> {
    pub version: String,
    pub files_scanned: usize,
    pub files: Vec<T>,
}

/// Write any per-file report list as pretty-printed JSON.
pub fn write_json<T: Serialize>(files: Vec<T>) -> anyhow::Result<()> {
    let report = JsonReport {
        version: env!("CARGO_PKG_VERSION").to_string(),
        files_scanned: files.len(),
        files,
    };
    let json = serde_json::to_string_pretty(&report)?;
    println!("{}", json);
    Ok(())
}

// =============================================================================
// Pretty Format
// =============================================================================

/// The file-level metric keys in display order.
const METRIC_ORDER: &[&str] = &[
    "complexity",
    "logic_complexity",
    "number_of_functions",
    "loc",
    "rloc",
    "comment_lines",
    "comment_ratio",
    "message_chains",
    "long_method",
    "long_parameter_list",
    "excessive_comments",
];

/// Write the tool header.
pub fn write_header(scanned: &str) {
    println!();
    print!("  ");
    print!("{}", "codegauge".cyan().bold());
    println!(" v{}", env!("CARGO_PKG_VERSION"));
    println!();
    print!("  {}", "Scanning: ".dimmed());
    println!("{}", scanned);
    println!();
}

/// Write one file's metrics in pretty format.
pub fn write_metrics_pretty(report: &FileMetricsReport) {
    println!(
        "  {} {}",
        report.path.bold(),
        format!("({})", report.language).dimmed()
    );

    for key in METRIC_ORDER {
        if let Some(value) = report.result.metrics.get(*key) {
            println!("    {:<22} {}", key.dimmed(), format_value(*value));
        }
    }

    if report.result.number_of_functions() > 0.0 {
        println!("    {}", "per function:".dimmed());
        for series in ["complexity", "rloc", "parameters"] {
            let line = ["min", "max", "mean", "median"]
                .iter()
                .map(|stat| {
                    let key = format!("{stat}_{series}_per_function");
                    format!("{stat} {}", format_value(report.result.per_function(&key)))
                })
                .collect::<Vec<_>>()
                .join("  ");
            println!("      {:<20} {}", series.dimmed(), line);
        }
    }
    println!();
}

/// Write one file's extraction results in pretty format.
pub fn write_extraction_pretty(report: &FileExtractionReport) {
    println!(
        "  {} {}",
        report.path.bold(),
        format!("({})", report.language).dimmed()
    );

    for (label, items) in [
        ("identifiers", &report.identifiers),
        ("comments", &report.comments),
        ("strings", &report.strings),
    ] {
        println!("    {} ({}):", label.dimmed(), items.len());
        for item in items {
            // Keep multi-line fragments on one display line.
            let flat = item.replace('\n', "\\n");
            println!("      {}", flat);
        }
    }
    println!();
}

/// Write the final summary line.
pub fn write_summary(files: usize, errors: usize) {
    if errors == 0 {
        println!("  {} {} file(s) analyzed", "✓".green(), files);
    } else {
        println!(
            "  {} {} file(s) analyzed, {} error(s)",
            "✗".red(),
            files,
            errors.to_string().red()
        );
    }
    println!();
}

fn format_value(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        format!("{:.2}", value)
    }
}
