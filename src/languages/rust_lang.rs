//! Rust language definition.
//!
//! Trait methods without a default body are `function_signature_item`
//! nodes, so `function_item` always has a realized body. One
//! `line_comment` node type spans `//`, `///` and `//!`, hence the
//! auto-detecting comment decoder.

use std::collections::HashMap;

use tree_sitter::Node;

use crate::analysis::definition::{
    CalculationConfig, CommentFormat, Extract, ExtractionStrategy, IdentifierExtract, IgnoreRule,
    LanguageDefinition, Metric, MetricCondition, StringFormat,
};
use crate::analysis::walker;

/// Doc comments nest marker/body tokens inside the comment node; none of
/// them are real code.
const DOC_COMMENT_TOKENS: &[&str] = &[
    "doc_comment",
    "inner_doc_comment_marker",
    "outer_doc_comment_marker",
];

pub(crate) fn grammar() -> tree_sitter::Language {
    tree_sitter_rust::LANGUAGE.into()
}

pub(crate) fn definition() -> LanguageDefinition {
    LanguageDefinition {
        node_metrics: node_metrics(),
        node_extractions: node_extractions(),
        calculation_config: CalculationConfig {
            has_function_body_markers: true,
            ignore_for_rloc: vec![IgnoreRule::TypeInSet(DOC_COMMENT_TOKENS)],
            ..CalculationConfig::default()
        },
    }
}

fn node_metrics() -> HashMap<&'static str, Vec<Metric>> {
    let mut metrics = HashMap::new();

    for ty in [
        "if_expression",
        "while_expression",
        "for_expression",
        "match_arm",
        "loop_expression",
    ] {
        metrics.insert(ty, vec![Metric::LogicComplexity]);
    }

    metrics.insert(
        "binary_expression",
        vec![Metric::LogicComplexityConditional(
            MetricCondition::ChildFieldMatches {
                field: "operator",
                allowed: &["&&", "||"],
            },
        )],
    );

    metrics.insert(
        "function_item",
        vec![Metric::FunctionComplexity, Metric::Function],
    );
    metrics.insert("closure_expression", vec![Metric::FunctionComplexity]);
    // `let double = |x| x * 2;` names a function value; a closure passed
    // inline does not.
    metrics.insert(
        "let_declaration",
        vec![Metric::FunctionConditional(
            MetricCondition::ChildFieldMatches {
                field: "value",
                allowed: &["closure_expression"],
            },
        )],
    );

    metrics.insert("line_comment", vec![Metric::CommentLine]);
    metrics.insert("block_comment", vec![Metric::CommentLine]);

    metrics.insert("block", vec![Metric::FunctionBody]);
    metrics.insert("parameter", vec![Metric::Parameter]);
    metrics.insert("self_parameter", vec![Metric::Parameter]);

    metrics.insert("field_expression", vec![Metric::MessageChain]);
    metrics.insert(
        "call_expression",
        vec![Metric::MessageChain, Metric::MessageChainCall],
    );

    metrics
}

fn node_extractions() -> HashMap<&'static str, Extract> {
    let mut extractions = HashMap::new();

    extractions.insert(
        "function_item",
        Extract::identifier(ExtractionStrategy::FirstChildByType("identifier")),
    );
    extractions.insert(
        "function_signature_item",
        Extract::identifier(ExtractionStrategy::FirstChildByType("identifier")),
    );
    for ty in ["struct_item", "enum_item", "trait_item", "union_item"] {
        extractions.insert(
            ty,
            Extract::identifier(ExtractionStrategy::FirstChildByType("type_identifier")),
        );
    }
    extractions.insert(
        "type_item",
        Extract::identifier(ExtractionStrategy::FirstChildByType("type_identifier")),
    );
    extractions.insert(
        "mod_item",
        Extract::identifier(ExtractionStrategy::FirstChildByType("identifier")),
    );
    for ty in ["const_item", "static_item"] {
        extractions.insert(
            ty,
            Extract::identifier(ExtractionStrategy::FirstChildByType("identifier")),
        );
    }
    extractions.insert(
        "field_declaration",
        Extract::identifier(ExtractionStrategy::FirstChildByType("field_identifier")),
    );
    extractions.insert(
        "let_declaration",
        Extract::Identifier(IdentifierExtract::custom_multi(let_pattern_identifiers)),
    );
    extractions.insert(
        "parameter",
        Extract::Identifier(IdentifierExtract::custom_single(parameter_name)),
    );

    extractions.insert("line_comment", Extract::comment(CommentFormat::AutoDetect));
    extractions.insert("block_comment", Extract::comment(CommentFormat::Block));

    extractions.insert(
        "string_literal",
        Extract::string(StringFormat::Quoted {
            strip_single_quotes: false,
        }),
    );
    extractions.insert("raw_string_literal", Extract::string(StringFormat::RustRaw));

    extractions
}

/// Names bound by a `let`, unpacking tuple and struct patterns.
pub(crate) fn let_pattern_identifiers(node: Node, source: &str) -> Vec<String> {
    let mut out = Vec::new();
    if let Some(pattern) = node.child_by_field_name("pattern") {
        collect_pattern(pattern, source, &mut out);
    }
    out
}

fn collect_pattern(node: Node, source: &str, out: &mut Vec<String>) {
    match node.kind() {
        "identifier" => out.push(walker::node_text(node, source).to_string()),
        _ => {
            for child in walker::children(node) {
                collect_pattern(child, source, out);
            }
        }
    }
}

/// A parameter's bound name; `self` parameters and wildcard patterns
/// yield nothing.
pub(crate) fn parameter_name(node: Node, source: &str) -> Option<String> {
    let pattern = node.child_by_field_name("pattern")?;
    match pattern.kind() {
        "identifier" => Some(walker::node_text(pattern, source).to_string()),
        _ => walker::find_descendant_by_type(pattern, "identifier")
            .map(|n| walker::node_text(n, source).to_string()),
    }
}
