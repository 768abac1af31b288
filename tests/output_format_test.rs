//! Tests for report serialization and the file-based entry points.

use std::io::Write;
use std::path::Path;

use codegauge::report::{FileExtractionReport, FileMetricsReport};
use codegauge::{extract_for_file, metrics_for_file, AnalyzeError};

fn testdata(name: &str) -> std::path::PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("testdata").join(name)
}

#[test]
fn test_metrics_for_file_infers_language() {
    let result = metrics_for_file(&testdata("sample.js")).expect("should analyze");
    assert_eq!(result.number_of_functions(), 1.0);
    assert!(result.loc() > 0.0);
}

#[test]
fn test_extract_for_file_infers_language() {
    let result = extract_for_file(&testdata("sample.py")).expect("should extract");
    assert!(result.identifiers().contains(&"fetch_rows"));
}

#[test]
fn test_unknown_extension_is_unsupported() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("notes.txt");
    let mut file = std::fs::File::create(&path).expect("create");
    writeln!(file, "plain text").expect("write");

    let err = metrics_for_file(&path).expect_err("txt must be unsupported");
    assert!(matches!(err, AnalyzeError::UnsupportedLanguage(_)));
}

#[test]
fn test_missing_file_reports_io_error() {
    let err = metrics_for_file(Path::new("does/not/exist.go")).expect_err("must fail");
    assert!(matches!(err, AnalyzeError::Io { .. }));
}

#[test]
fn test_metrics_json_shape() {
    let result = codegauge::compute_metrics("function f() {}", "javascript").expect("analyze");
    let report = FileMetricsReport {
        path: "f.js".to_string(),
        language: "javascript".to_string(),
        result,
    };

    let value = serde_json::to_value(&report).expect("serialize");
    assert_eq!(value["path"], "f.js");
    assert_eq!(value["language"], "javascript");
    assert_eq!(value["metrics"]["number_of_functions"], 1.0);
    assert_eq!(
        value["per_function_metrics"]["mean_complexity_per_function"],
        0.0
    );
    assert_eq!(
        value["per_function_metrics"]
            .as_object()
            .map(|m| m.len()),
        Some(12)
    );
}

#[test]
fn test_extraction_json_shape() {
    let result =
        codegauge::extract_text("// note\nconst a = \"x\";", "javascript").expect("extract");
    let report = FileExtractionReport::new("a.js".to_string(), "javascript".to_string(), &result);

    let value = serde_json::to_value(&report).expect("serialize");
    assert_eq!(value["identifiers"][0], "a");
    assert_eq!(value["comments"][0], "note");
    assert_eq!(value["strings"][0], "x");
}

#[test]
fn test_registry_surface() {
    assert!(codegauge::is_supported("go"));
    assert!(codegauge::is_supported("py"));
    assert!(codegauge::is_supported(".rs"));
    assert!(!codegauge::is_supported("brainfuck"));

    let languages = codegauge::supported_languages();
    assert_eq!(languages.len(), 10);
    assert!(languages.contains(&"typescript"));

    let extensions = codegauge::supported_extensions();
    assert!(extensions.contains(&"tsx"));
    assert!(extensions.len() >= languages.len());
}
