//! Go language definition.

use std::collections::HashMap;

use tree_sitter::Node;

use crate::analysis::definition::{
    CalculationConfig, CommentFormat, Extract, ExtractionStrategy, IdentifierExtract,
    LanguageDefinition, Metric, MetricCondition, StringFormat,
};
use crate::analysis::walker;

pub(crate) fn grammar() -> tree_sitter::Language {
    tree_sitter_go::LANGUAGE.into()
}

pub(crate) fn definition() -> LanguageDefinition {
    LanguageDefinition {
        node_metrics: node_metrics(),
        node_extractions: node_extractions(),
        calculation_config: CalculationConfig::with_body_markers(),
    }
}

fn node_metrics() -> HashMap<&'static str, Vec<Metric>> {
    let mut metrics = HashMap::new();

    for ty in [
        "if_statement",
        "for_statement",
        "communication_case",
        "expression_case",
        "type_case",
        "default_case",
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

    // method_spec (interface methods) stays out: a bare declaration has
    // no realized body to count.
    for ty in ["function_declaration", "method_declaration", "func_literal"] {
        metrics.insert(ty, vec![Metric::FunctionComplexity, Metric::Function]);
    }

    metrics.insert("comment", vec![Metric::CommentLine]);
    metrics.insert("block", vec![Metric::FunctionBody]);
    metrics.insert("parameter_declaration", vec![Metric::Parameter]);
    metrics.insert("selector_expression", vec![Metric::MessageChain]);
    metrics.insert(
        "call_expression",
        vec![Metric::MessageChain, Metric::MessageChainCall],
    );

    metrics
}

fn node_extractions() -> HashMap<&'static str, Extract> {
    let mut extractions = HashMap::new();

    extractions.insert(
        "function_declaration",
        Extract::identifier(ExtractionStrategy::FirstChildByType("identifier")),
    );
    extractions.insert(
        "method_declaration",
        Extract::identifier(ExtractionStrategy::FirstChildByType("field_identifier")),
    );
    extractions.insert(
        "method_elem",
        Extract::identifier(ExtractionStrategy::FirstChildByType("field_identifier")),
    );
    extractions.insert(
        "type_declaration",
        Extract::identifier(ExtractionStrategy::NestedInChild {
            container: "type_spec",
            target: "type_identifier",
        }),
    );
    extractions.insert(
        "parameter_declaration",
        Extract::Identifier(IdentifierExtract {
            single: Some(ExtractionStrategy::FirstChildByType("identifier")),
            multi: Some(ExtractionStrategy::AllChildrenByType("identifier")),
            ..IdentifierExtract::default()
        }),
    );
    extractions.insert(
        "var_declaration",
        Extract::Identifier(IdentifierExtract::custom_multi(spec_identifiers)),
    );
    extractions.insert(
        "const_declaration",
        Extract::Identifier(IdentifierExtract::custom_multi(spec_identifiers)),
    );
    extractions.insert(
        "short_var_declaration",
        Extract::Identifier(IdentifierExtract::custom_multi(short_var_identifiers)),
    );

    extractions.insert("comment", Extract::comment(CommentFormat::AutoDetect));

    extractions.insert(
        "interpreted_string_literal",
        Extract::string(StringFormat::Quoted {
            strip_single_quotes: false,
        }),
    );
    // Go raw strings are backtick-delimited, same as templates.
    extractions.insert("raw_string_literal", Extract::string(StringFormat::Template));

    extractions
}

/// Names declared by `var`/`const` groups: every identifier inside each
/// `var_spec`/`const_spec`, covering grouped declarations.
pub(crate) fn spec_identifiers(node: Node, source: &str) -> Vec<String> {
    let mut out = Vec::new();
    for child in walker::children(node) {
        match child.kind() {
            "var_spec" | "const_spec" => {
                out.extend(walker::all_children_text_by_type(child, source, "identifier"));
            }
            "var_spec_list" | "const_spec_list" => {
                for spec in walker::children(child) {
                    out.extend(walker::all_children_text_by_type(spec, source, "identifier"));
                }
            }
            _ => {}
        }
    }
    out
}

/// Left-hand names of `a, b := ...`.
pub(crate) fn short_var_identifiers(node: Node, source: &str) -> Vec<String> {
    node.child_by_field_name("left")
        .map(|left| walker::all_children_text_by_type(left, source, "identifier"))
        .unwrap_or_default()
}
