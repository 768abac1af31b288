//! JavaScript language definition.
//!
//! Grammar: tree-sitter-javascript. TypeScript reuses these extraction
//! tables; its metric table differs slightly (see `typescript.rs`).

use std::collections::HashMap;

use tree_sitter::Node;

use crate::analysis::definition::{
    CalculationConfig, CommentFormat, Extract, ExtractionStrategy, IdentifierExtract, IgnoreRule,
    LanguageDefinition, Metric, MetricCondition, StringFormat,
};
use crate::analysis::walker;

pub(crate) fn grammar() -> tree_sitter::Language {
    tree_sitter_javascript::LANGUAGE.into()
}

pub(crate) fn definition() -> LanguageDefinition {
    LanguageDefinition {
        node_metrics: node_metrics(),
        node_extractions: node_extractions(),
        calculation_config: CalculationConfig {
            has_function_body_markers: true,
            // The identifier directly under a function declaration is the
            // function's name sharing a node type with parameters.
            ignore_for_parameters: vec![
                IgnoreRule::TypeWithParentType {
                    node_type: "identifier",
                    parent_type: "function_declaration",
                },
                IgnoreRule::TypeWithParentType {
                    node_type: "identifier",
                    parent_type: "function_expression",
                },
            ],
            ..CalculationConfig::default()
        },
    }
}

pub(crate) fn node_metrics() -> HashMap<&'static str, Vec<Metric>> {
    let mut metrics = HashMap::new();

    for ty in [
        "if_statement",
        "do_statement",
        "for_statement",
        "while_statement",
        "for_in_statement",
        "ternary_expression",
        "switch_case",
        "switch_default",
        "catch_clause",
    ] {
        metrics.insert(ty, vec![Metric::LogicComplexity]);
    }

    metrics.insert(
        "binary_expression",
        vec![Metric::LogicComplexityConditional(
            MetricCondition::ChildFieldMatches {
                field: "operator",
                allowed: &["&&", "||", "??"],
            },
        )],
    );

    // Function-shaped nodes that add complexity but are never counted as
    // declared functions on their own.
    for ty in ["arrow_function", "generator_function", "class_static_block"] {
        metrics.insert(ty, vec![Metric::FunctionComplexity]);
    }

    for ty in [
        "function_declaration",
        "generator_function_declaration",
        "method_definition",
        "function_expression",
    ] {
        metrics.insert(ty, vec![Metric::FunctionComplexity, Metric::Function]);
    }

    // A declarator whose bound value is an arrow function is a named
    // function; an arrow passed inline as a call argument is not.
    metrics.insert(
        "variable_declarator",
        vec![Metric::FunctionConditional(
            MetricCondition::ChildFieldMatches {
                field: "value",
                allowed: &["arrow_function"],
            },
        )],
    );

    metrics.insert("comment", vec![Metric::CommentLine]);
    metrics.insert("html_comment", vec![Metric::CommentLine]);
    metrics.insert("statement_block", vec![Metric::FunctionBody]);
    metrics.insert("identifier", vec![Metric::Parameter]);
    metrics.insert("member_expression", vec![Metric::MessageChain]);
    metrics.insert(
        "call_expression",
        vec![Metric::MessageChain, Metric::MessageChainCall],
    );

    metrics
}

pub(crate) fn node_extractions() -> HashMap<&'static str, Extract> {
    let mut extractions = HashMap::new();

    for ty in [
        "function_declaration",
        "generator_function_declaration",
        "function_expression",
        "class_declaration",
    ] {
        extractions.insert(
            ty,
            Extract::identifier(ExtractionStrategy::FirstChildByType("identifier")),
        );
    }
    extractions.insert(
        "method_definition",
        Extract::identifier(ExtractionStrategy::FirstChildByTypes(&[
            "property_identifier",
            "private_property_identifier",
        ])),
    );
    extractions.insert(
        "variable_declarator",
        Extract::Identifier(IdentifierExtract::custom_multi(declarator_identifiers)),
    );
    extractions.insert(
        "formal_parameters",
        Extract::Identifier(IdentifierExtract::custom_multi(parameter_identifiers)),
    );

    extractions.insert("comment", Extract::comment(CommentFormat::AutoDetect));
    extractions.insert("html_comment", Extract::comment(CommentFormat::Html));

    extractions.insert(
        "string",
        Extract::string(StringFormat::Quoted {
            strip_single_quotes: true,
        }),
    );
    extractions.insert("template_string", Extract::string(StringFormat::Template));

    extractions
}

/// Identifiers bound by a declarator, including destructuring patterns:
/// `const {a, b: [c]} = obj` binds `a` and `c`.
pub(crate) fn declarator_identifiers(node: Node, source: &str) -> Vec<String> {
    let mut out = Vec::new();
    if let Some(name) = node.child_by_field_name("name") {
        pattern_identifiers(name, source, &mut out);
    }
    out
}

/// Identifiers bound by a parameter list, following patterns but not
/// default-value expressions.
pub(crate) fn parameter_identifiers(node: Node, source: &str) -> Vec<String> {
    let mut out = Vec::new();
    for child in walker::children(node) {
        pattern_identifiers(child, source, &mut out);
    }
    out
}

/// Collect binding identifiers from a pattern subtree. Assignment
/// defaults and pair values keep only their binding side.
pub(crate) fn pattern_identifiers(node: Node, source: &str, out: &mut Vec<String>) {
    match node.kind() {
        "identifier" | "shorthand_property_identifier_pattern" => {
            out.push(walker::node_text(node, source).to_string());
        }
        "assignment_pattern" => {
            if let Some(left) = node.child_by_field_name("left") {
                pattern_identifiers(left, source, out);
            }
        }
        "pair_pattern" => {
            if let Some(value) = node.child_by_field_name("value") {
                pattern_identifiers(value, source, out);
            }
        }
        _ => {
            for child in walker::children(node) {
                pattern_identifiers(child, source, out);
            }
        }
    }
}
