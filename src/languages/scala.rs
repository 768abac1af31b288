//! Scala language definition.
//!
//! `def` bodies may be plain expressions; only block-bodied functions get
//! a marked body span, the rest fall back to the definition's own span.
//! Abstract members are `function_declaration` nodes and stay uncounted.

use std::collections::HashMap;

use tree_sitter::Node;

use crate::analysis::definition::{
    CalculationConfig, CommentFormat, Extract, ExtractionStrategy, IdentifierExtract,
    LanguageDefinition, Metric, MetricCondition, StringFormat,
};
use crate::analysis::walker;

pub(crate) fn grammar() -> tree_sitter::Language {
    tree_sitter_scala::LANGUAGE.into()
}

pub(crate) fn definition() -> LanguageDefinition {
    LanguageDefinition {
        node_metrics: node_metrics(),
        node_extractions: node_extractions(),
        calculation_config: CalculationConfig {
            // Expression-bodied defs have no brace-delimited body node.
            has_function_body_markers: false,
            ..CalculationConfig::default()
        },
    }
}

fn node_metrics() -> HashMap<&'static str, Vec<Metric>> {
    let mut metrics = HashMap::new();

    for ty in [
        "if_expression",
        "while_expression",
        "do_while_expression",
        "for_expression",
        "case_clause",
        "catch_clause",
    ] {
        metrics.insert(ty, vec![Metric::LogicComplexity]);
    }

    metrics.insert(
        "infix_expression",
        vec![Metric::LogicComplexityConditional(
            MetricCondition::ChildFieldMatches {
                field: "operator",
                allowed: &["&&", "||"],
            },
        )],
    );

    metrics.insert(
        "function_definition",
        vec![Metric::FunctionComplexity, Metric::Function],
    );
    metrics.insert("lambda_expression", vec![Metric::FunctionComplexity]);
    metrics.insert(
        "val_definition",
        vec![Metric::FunctionConditional(
            MetricCondition::ChildFieldMatches {
                field: "value",
                allowed: &["lambda_expression"],
            },
        )],
    );

    metrics.insert("comment", vec![Metric::CommentLine]);
    metrics.insert("block_comment", vec![Metric::CommentLine]);
    metrics.insert("block", vec![Metric::FunctionBody]);
    metrics.insert("parameter", vec![Metric::Parameter]);

    metrics.insert("field_expression", vec![Metric::MessageChain]);
    metrics.insert(
        "call_expression",
        vec![Metric::MessageChain, Metric::MessageChainCall],
    );

    metrics
}

fn node_extractions() -> HashMap<&'static str, Extract> {
    let mut extractions = HashMap::new();

    for ty in [
        "class_definition",
        "object_definition",
        "trait_definition",
        "function_definition",
        "function_declaration",
    ] {
        extractions.insert(
            ty,
            Extract::identifier(ExtractionStrategy::FirstChildByType("identifier")),
        );
    }
    extractions.insert(
        "parameter",
        Extract::identifier(ExtractionStrategy::FirstChildByType("identifier")),
    );
    extractions.insert(
        "class_parameter",
        Extract::identifier(ExtractionStrategy::FirstChildByType("identifier")),
    );
    for ty in ["val_definition", "var_definition"] {
        extractions.insert(
            ty,
            Extract::Identifier(IdentifierExtract::custom_multi(binding_identifiers)),
        );
    }

    extractions.insert("comment", Extract::comment(CommentFormat::AutoDetect));
    extractions.insert("block_comment", Extract::comment(CommentFormat::Block));

    extractions.insert("string", Extract::string(StringFormat::TripleQuoted));
    extractions.insert("symbol_literal", Extract::string(StringFormat::Symbol("'")));

    extractions
}

/// Names bound by a `val`/`var` pattern, tuples included.
pub(crate) fn binding_identifiers(node: Node, source: &str) -> Vec<String> {
    let mut out = Vec::new();
    if let Some(pattern) = node.child_by_field_name("pattern") {
        match pattern.kind() {
            "identifier" => out.push(walker::node_text(pattern, source).to_string()),
            _ => walker::collect_descendant_texts(pattern, source, "identifier", &mut out),
        }
    }
    out
}
