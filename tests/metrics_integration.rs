//! Integration tests for the metrics engine.
//!
//! These exercise the full pipeline (parse, compile, walk, aggregate)
//! against real sources in the bundled languages.

use codegauge::{compute_metrics, compute_metrics_with, AnalyzeError, Thresholds};

// =============================================================================
// JavaScript
// =============================================================================

#[test]
fn test_javascript_simple_function() {
    let source = "function add(a, b) {\n  // sum\n  return a + b;\n}";
    let result = compute_metrics(source, "javascript").expect("should analyze");

    assert_eq!(result.number_of_functions(), 1.0);
    assert_eq!(result.complexity(), 1.0, "one function, no branches");
    assert_eq!(result.logic_complexity(), 0.0);
    assert_eq!(result.comment_lines(), 1.0);
    assert_eq!(result.loc(), 4.0);
    assert_eq!(result.rloc(), 3.0, "comment-only line is not real code");
}

#[test]
fn test_javascript_function_name_is_not_a_parameter() {
    let source = "function add(a, b) {\n  return a + b;\n}";
    let result = compute_metrics(source, "javascript").expect("should analyze");

    assert_eq!(result.per_function("mean_parameters_per_function"), 2.0);
    assert_eq!(result.per_function("max_parameters_per_function"), 2.0);
    assert_eq!(result.per_function("min_parameters_per_function"), 2.0);
}

#[test]
fn test_javascript_logic_complexity_counts_branches() {
    let source = r#"
function classify(x) {
  if (x > 0 && x < 10) {
    return "small";
  }
  for (let i = 0; i < x; i++) {
    x--;
  }
  return x ? "big" : "zero";
}
"#;
    let result = compute_metrics(source, "javascript").expect("should analyze");

    // if + && + for + ternary
    assert_eq!(result.logic_complexity(), 4.0);
    assert_eq!(result.complexity(), 5.0);
}

#[test]
fn test_javascript_named_arrow_counts_inline_arrow_does_not() {
    let source = "const handler = (x) => { return x + 1; };\nitems.map((item) => { return item * 2; });";
    let result = compute_metrics(source, "javascript").expect("should analyze");

    // Both arrows add complexity, only the named binding is a function.
    assert_eq!(result.number_of_functions(), 1.0);
    assert_eq!(result.complexity(), 2.0);
}

#[test]
fn test_javascript_chain_of_three_links_is_not_recorded() {
    // member(a.b) -> member(a.b.c) -> member(a.b.c.d): three links.
    let source = "const v = a.b.c.d;";
    let result = compute_metrics(source, "javascript").expect("should analyze");
    assert_eq!(result.message_chains(), 0.0);
}

#[test]
fn test_javascript_chain_of_four_links_is_recorded_once() {
    let source = "const v = a.b.c.d.e;";
    let result = compute_metrics(source, "javascript").expect("should analyze");
    assert_eq!(result.message_chains(), 1.0);
}

#[test]
fn test_javascript_long_chain_still_counts_once() {
    let source = "const v = a.b.c.d.e.f.g.h.i;";
    let result = compute_metrics(source, "javascript").expect("should analyze");
    assert_eq!(result.message_chains(), 1.0);
}

#[test]
fn test_javascript_separate_chains_count_separately() {
    let source = "const v = a.b.c.d.e;\nconst w = z.y.x.w.v;";
    let result = compute_metrics(source, "javascript").expect("should analyze");
    assert_eq!(result.message_chains(), 2.0);
}

// =============================================================================
// Python
// =============================================================================

#[test]
fn test_python_docstring_counts_as_comment_not_code() {
    let source = "def greet(name):\n    \"\"\"Say hello.\"\"\"\n    # comment\n    if name:\n        print(name)\n";
    let result = compute_metrics(source, "python").expect("should analyze");

    assert_eq!(result.number_of_functions(), 1.0);
    assert_eq!(result.comment_lines(), 2.0, "docstring line + comment line");
    assert_eq!(result.logic_complexity(), 1.0);
    assert_eq!(result.complexity(), 2.0);
    assert_eq!(result.loc(), 6.0);
    assert_eq!(result.rloc(), 3.0, "def line, if line, print line");
}

#[test]
fn test_python_module_docstring_only() {
    let source = "\"\"\"Module docs.\"\"\"\n";
    let result = compute_metrics(source, "python").expect("should analyze");

    assert_eq!(result.comment_lines(), 1.0);
    assert_eq!(result.rloc(), 0.0);
    assert_eq!(result.number_of_functions(), 0.0);
}

#[test]
fn test_python_string_in_expression_is_real_code() {
    let source = "x = \"value\"\n";
    let result = compute_metrics(source, "python").expect("should analyze");

    assert_eq!(result.rloc(), 1.0);
    assert_eq!(result.comment_lines(), 0.0);
}

#[test]
fn test_python_named_lambda_counts_inline_does_not() {
    let source = "square = lambda x: x * x\nvalues.sort(key=lambda v: v.rank)\n";
    let result = compute_metrics(source, "python").expect("should analyze");

    assert_eq!(result.number_of_functions(), 1.0);
    assert_eq!(result.complexity(), 2.0, "both lambdas add complexity");
}

#[test]
fn test_python_parameters_exclude_function_name() {
    let source = "def move(src, dst):\n    return src, dst\n";
    let result = compute_metrics(source, "python").expect("should analyze");

    assert_eq!(result.per_function("mean_parameters_per_function"), 2.0);
}

// =============================================================================
// Go
// =============================================================================

#[test]
fn test_go_function_with_branches() {
    let source = "package main\n\nfunc add(a int, b int) int {\n\tif a > 0 && b > 0 {\n\t\treturn a + b\n\t}\n\treturn 0\n}\n";
    let result = compute_metrics(source, "go").expect("should analyze");

    assert_eq!(result.number_of_functions(), 1.0);
    assert_eq!(result.logic_complexity(), 2.0, "if + &&");
    assert_eq!(result.complexity(), 3.0);
    assert_eq!(result.loc(), 9.0);
    assert_eq!(result.rloc(), 7.0, "blank line is not real code");
    assert_eq!(result.per_function("mean_parameters_per_function"), 2.0);
}

#[test]
fn test_go_method_chain() {
    let source = "package main\n\nfunc run() {\n\tsvc.Get().Check().Result().Value().Done()\n}\n";
    let result = compute_metrics(source, "go").expect("should analyze");
    assert_eq!(result.message_chains(), 1.0);
}

// =============================================================================
// Java
// =============================================================================

#[test]
fn test_java_methods_and_comment() {
    let source = "class Calculator {\n    // adds\n    public int add(int a, int b) {\n        return a + b;\n    }\n\n    void noop() {}\n}\n";
    let result = compute_metrics(source, "java").expect("should analyze");

    assert_eq!(result.number_of_functions(), 2.0);
    assert_eq!(result.complexity(), 2.0);
    assert_eq!(result.comment_lines(), 1.0);
    assert_eq!(result.per_function("max_parameters_per_function"), 2.0);
    assert_eq!(result.per_function("min_parameters_per_function"), 0.0);
    assert_eq!(result.per_function("mean_parameters_per_function"), 1.0);
}

#[test]
fn test_java_interface_method_is_a_bare_declaration() {
    let source = "interface Shape {\n    double area();\n}\n";
    let result = compute_metrics(source, "java").expect("should analyze");

    // The declaration has no realized body, so it is not counted as a
    // function even though it still contributes complexity.
    assert_eq!(result.number_of_functions(), 0.0);
    assert_eq!(result.complexity(), 1.0);
}

// =============================================================================
// Rust
// =============================================================================

#[test]
fn test_rust_functions_and_branches() {
    let source = "fn main() {\n    let value = compute(4);\n    if value > 0 {\n        println!(\"positive\");\n    }\n}\n\nfn compute(x: i32) -> i32 {\n    x * 2\n}\n";
    let result = compute_metrics(source, "rust").expect("should analyze");

    assert_eq!(result.number_of_functions(), 2.0);
    assert_eq!(result.logic_complexity(), 1.0);
    assert_eq!(result.complexity(), 3.0);
    assert_eq!(result.per_function("max_parameters_per_function"), 1.0);
    assert_eq!(result.per_function("min_parameters_per_function"), 0.0);
}

#[test]
fn test_rust_named_closure_counts() {
    let source = "fn main() {\n    let double = |x: i32| { x * 2 };\n    let _ = double(2);\n}\n";
    let result = compute_metrics(source, "rust").expect("should analyze");

    // fn main + named closure binding.
    assert_eq!(result.number_of_functions(), 2.0);
}

// =============================================================================
// C / C++
// =============================================================================

#[test]
fn test_c_function_with_branch() {
    let source = "int add(int a, int b) {\n    if (a > 0) {\n        return a + b;\n    }\n    return 0;\n}\n";
    let result = compute_metrics(source, "c").expect("should analyze");

    assert_eq!(result.number_of_functions(), 1.0);
    assert_eq!(result.logic_complexity(), 1.0);
    assert_eq!(result.complexity(), 2.0);
    assert_eq!(result.per_function("mean_parameters_per_function"), 2.0);
}

#[test]
fn test_cpp_loops_and_branches() {
    let source = "int main() {\n    for (int i = 0; i < 3; i++) {\n        if (i == 1) {\n            break;\n        }\n    }\n    return 0;\n}\n";
    let result = compute_metrics(source, "cpp").expect("should analyze");

    assert_eq!(result.number_of_functions(), 1.0);
    assert_eq!(result.logic_complexity(), 2.0);
    assert_eq!(result.complexity(), 3.0);
}

// =============================================================================
// TypeScript / Scala / Swift
// =============================================================================

#[test]
fn test_typescript_wrapped_parameters() {
    let source = "function greet(name: string, title?: string): string {\n    return name;\n}\n";
    let result = compute_metrics(source, "typescript").expect("should analyze");

    assert_eq!(result.number_of_functions(), 1.0);
    assert_eq!(result.per_function("mean_parameters_per_function"), 2.0);
}

#[test]
fn test_scala_method_with_branch() {
    let source = "class Greeter {\n  // politeness\n  def greet(name: String): String = {\n    if (name.isEmpty) \"hello\" else \"hello \" + name\n  }\n}\n";
    let result = compute_metrics(source, "scala").expect("should analyze");

    assert_eq!(result.number_of_functions(), 1.0);
    assert_eq!(result.logic_complexity(), 1.0);
    assert_eq!(result.complexity(), 2.0);
    assert_eq!(result.comment_lines(), 1.0);
}

#[test]
fn test_swift_function_with_branch() {
    let source = "func greet(name: String) -> String {\n    if name.isEmpty {\n        return \"hello\"\n    }\n    return name\n}\n";
    let result = compute_metrics(source, "swift").expect("should analyze");

    assert_eq!(result.number_of_functions(), 1.0);
    assert_eq!(result.logic_complexity(), 1.0);
    assert_eq!(result.complexity(), 2.0);
}

// =============================================================================
// Contract properties
// =============================================================================

#[test]
fn test_empty_source_yields_all_zero_metrics() {
    for language in codegauge::supported_languages() {
        let result = compute_metrics("", language).expect("empty source must succeed");
        for (key, value) in &result.metrics {
            assert_eq!(*value, 0.0, "{language}: metric {key} not zero");
        }
        for (key, value) in &result.per_function_metrics {
            assert_eq!(*value, 0.0, "{language}: per-function {key} not zero");
        }
    }
}

#[test]
fn test_unsupported_language_is_a_distinct_error() {
    let err = compute_metrics("x", "cobol").expect_err("must be unsupported");
    assert!(matches!(err, AnalyzeError::UnsupportedLanguage(_)));
    assert!(err.to_string().contains("cobol"));
}

#[test]
fn test_appending_a_blank_line_increments_loc_only() {
    let base = "let a = 1;";
    let first = compute_metrics(base, "javascript").expect("should analyze");
    let second =
        compute_metrics(&format!("{base}\n"), "javascript").expect("should analyze");

    assert_eq!(second.loc(), first.loc() + 1.0);
    assert_eq!(second.rloc(), first.rloc());
}

#[test]
fn test_rloc_never_exceeds_loc() {
    let sources = [
        ("javascript", "function f() {\n\n  // gap\n  return 1;\n}"),
        ("python", "def f():\n\n    # gap\n    return 1\n"),
        ("go", "package main\n\nfunc f() int {\n\treturn 1\n}\n"),
    ];
    for (language, source) in sources {
        let result = compute_metrics(source, language).expect("should analyze");
        assert!(
            result.rloc() <= result.loc(),
            "{language}: rloc {} > loc {}",
            result.rloc(),
            result.loc()
        );
    }
}

#[test]
fn test_per_function_statistics_ordering() {
    let source = "function a() {}\nfunction b(x) { if (x) { return x; } }\nfunction c(x, y) { if (x) { if (y) { return 1; } } }\n";
    let result = compute_metrics(source, "javascript").expect("should analyze");

    for series in ["complexity", "rloc", "parameters"] {
        let min = result.per_function(&format!("min_{series}_per_function"));
        let max = result.per_function(&format!("max_{series}_per_function"));
        let mean = result.per_function(&format!("mean_{series}_per_function"));
        let median = result.per_function(&format!("median_{series}_per_function"));
        assert!(min <= mean && mean <= max, "{series}: mean out of range");
        assert!(min <= median && median <= max, "{series}: median out of range");
    }
}

#[test]
fn test_per_function_complexity_mean_and_median() {
    // Complexities per function: {0, 1, 5}.
    let source = "\
function zero() {}
function one(x) { if (x) { return x; } }
function five(x) {
  if (x > 0) { return 1; }
  if (x > 1) { return 2; }
  if (x > 2) { return 3; }
  if (x > 3) { return 4; }
  if (x > 4) { return 5; }
  return 0;
}
";
    let result = compute_metrics(source, "javascript").expect("should analyze");

    assert_eq!(result.number_of_functions(), 3.0);
    assert_eq!(result.per_function("mean_complexity_per_function"), 2.0);
    assert_eq!(result.per_function("median_complexity_per_function"), 1.0);
    assert_eq!(result.per_function("min_complexity_per_function"), 0.0);
    assert_eq!(result.per_function("max_complexity_per_function"), 5.0);
}

#[test]
fn test_nested_function_complexity_is_not_subtracted() {
    let source = "\
function outer(x) {
  function inner(y) {
    if (y) { return y; }
    return 0;
  }
  if (x) { return inner(x); }
  return 0;
}
";
    let result = compute_metrics(source, "javascript").expect("should analyze");

    assert_eq!(result.number_of_functions(), 2.0);
    // inner: its own if. outer: its if + inner's if + inner's function
    // point; nothing is subtracted for nesting.
    assert_eq!(result.per_function("min_complexity_per_function"), 1.0);
    assert_eq!(result.per_function("max_complexity_per_function"), 3.0);
}

#[test]
fn test_derived_metrics_respect_thresholds() {
    let source = "function f(a, b, c) { return a + b + c; }";
    let strict = Thresholds {
        long_parameter_list: 2,
        ..Thresholds::default()
    };
    let lax = Thresholds::default();

    let flagged =
        compute_metrics_with(source, "javascript", &strict).expect("should analyze");
    let clean = compute_metrics_with(source, "javascript", &lax).expect("should analyze");

    assert_eq!(flagged.long_parameter_list(), 1.0);
    assert_eq!(clean.long_parameter_list(), 0.0);
}

#[test]
fn test_comment_ratio_is_comments_over_rloc() {
    let source = "// one\n// two\nlet a = 1;\nlet b = 2;";
    let result = compute_metrics(source, "javascript").expect("should analyze");

    assert_eq!(result.comment_lines(), 2.0);
    assert_eq!(result.rloc(), 2.0);
    assert_eq!(result.comment_ratio(), 1.0);
}

#[test]
fn test_metrics_result_exposes_all_published_keys() {
    let result = compute_metrics("let x = 1;", "javascript").expect("should analyze");

    for key in [
        "complexity",
        "logic_complexity",
        "comment_lines",
        "rloc",
        "loc",
        "number_of_functions",
        "long_method",
        "long_parameter_list",
        "excessive_comments",
        "comment_ratio",
        "message_chains",
    ] {
        assert!(result.metrics.contains_key(key), "missing metric {key}");
    }
    assert_eq!(result.per_function_metrics.len(), 12);
}
