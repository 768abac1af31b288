//! Codegauge - multi-language code metrics and text extraction.
//!
//! Given source text and a language identifier, codegauge computes
//! quantitative code metrics (complexity, comment density, real/total
//! lines, function counts and per-function statistics, method-chain
//! density) and extracts semantically classified text fragments
//! (identifier names, comment bodies, string-literal contents).
//!
//! # Architecture
//!
//! A declarative rule-interpretation core sits between tree-sitter parse
//! trees and the published results:
//!
//! - `analysis`: the language-agnostic engines (walker, rule compiler,
//!   metrics, extraction, format decoders)
//! - `languages`: per-language declarative tables plus the registry
//! - `report`: output formatting (pretty, JSON)
//! - `config`: thresholds for the derived metrics
//!
//! # Adding a New Language
//!
//! Add a data module under `src/languages/` mapping node types to
//! metrics and extractions, then register it in `languages/mod.rs`.
//! No engine code changes.
//!
//! # Example
//!
//! ```
//! let result = codegauge::compute_metrics("function f(a) { return a; }", "javascript")?;
//! assert_eq!(result.number_of_functions(), 1.0);
//! # Ok::<(), codegauge::AnalyzeError>(())
//! ```

pub mod analysis;
pub mod cli;
pub mod config;
pub mod languages;
pub mod report;

use std::path::Path;

use thiserror::Error;

pub use analysis::{
    ExtractedText, ExtractionContext, ExtractionResult, MetricsResult, CHAIN_LINK_THRESHOLD,
};
pub use config::Thresholds;
pub use languages::LanguageSupport;

/// Errors surfaced by the analysis entry points.
///
/// An unrecognized language is the only analysis-time failure; empty
/// source, missing functions or comments all degrade to defined zero or
/// empty results instead.
#[derive(Error, Debug)]
pub enum AnalyzeError {
    #[error("unsupported language or extension: {0}")]
    UnsupportedLanguage(String),
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("parser error: {0}")]
    Parser(String),
}

fn language_for(id: &str) -> Result<&'static LanguageSupport, AnalyzeError> {
    languages::resolve(id).ok_or_else(|| AnalyzeError::UnsupportedLanguage(id.to_string()))
}

/// Compute all metrics for the given source, with default thresholds.
pub fn compute_metrics(source: &str, language: &str) -> Result<MetricsResult, AnalyzeError> {
    compute_metrics_with(source, language, &Thresholds::default())
}

/// Compute all metrics with explicit derived-metric thresholds.
pub fn compute_metrics_with(
    source: &str,
    language: &str,
    thresholds: &Thresholds,
) -> Result<MetricsResult, AnalyzeError> {
    let support = language_for(language)?;
    if source.is_empty() {
        return Ok(analysis::metrics::collect(
            None,
            source,
            &support.compiled,
            thresholds,
        ));
    }

    let tree = support
        .parse(source)
        .map_err(|e| AnalyzeError::Parser(e.to_string()))?;
    Ok(analysis::metrics::collect(
        Some(tree.root_node()),
        source,
        &support.compiled,
        thresholds,
    ))
}

/// Extract classified text fragments from the given source.
pub fn extract_text(source: &str, language: &str) -> Result<ExtractionResult, AnalyzeError> {
    let support = language_for(language)?;
    if source.trim().is_empty() {
        return Ok(ExtractionResult::default());
    }

    let tree = support
        .parse(source)
        .map_err(|e| AnalyzeError::Parser(e.to_string()))?;
    Ok(analysis::extraction::extract(
        Some(tree.root_node()),
        source,
        &support.compiled,
    ))
}

/// Compute metrics for a file, inferring the language from its extension.
pub fn metrics_for_file(path: &Path) -> Result<MetricsResult, AnalyzeError> {
    let (source, language) = read_with_language(path)?;
    compute_metrics(&source, language)
}

/// Extract text from a file, inferring the language from its extension.
pub fn extract_for_file(path: &Path) -> Result<ExtractionResult, AnalyzeError> {
    let (source, language) = read_with_language(path)?;
    extract_text(&source, language)
}

fn read_with_language(path: &Path) -> Result<(String, &'static str), AnalyzeError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .ok_or_else(|| AnalyzeError::UnsupportedLanguage(path.display().to_string()))?;
    let support = languages::by_extension(ext)
        .ok_or_else(|| AnalyzeError::UnsupportedLanguage(ext.to_string()))?;
    let source = std::fs::read_to_string(path).map_err(|source| AnalyzeError::Io {
        path: path.display().to_string(),
        source,
    })?;
    Ok((source, support.id))
}

/// Whether the given language id or file extension is supported.
pub fn is_supported(id_or_extension: &str) -> bool {
    languages::resolve(id_or_extension).is_some()
}

/// All supported language ids.
pub fn supported_languages() -> Vec<&'static str> {
    languages::supported_languages()
}

/// All supported file extensions (without dots).
pub fn supported_extensions() -> Vec<&'static str> {
    languages::supported_extensions()
}
