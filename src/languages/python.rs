//! Python language definition.
//!
//! Indentation delimits bodies, so `has_function_body_markers` is off.
//! Docstrings are the interesting case throughout: they count as comment
//! lines, never as real code, and a string is only promoted back to a
//! countable leaf when it is not alone under its parent.

use std::collections::HashMap;

use tree_sitter::Node;

use crate::analysis::definition::{
    CalculationConfig, CommentFormat, Extract, ExtractionStrategy, IdentifierExtract, IgnoreRule,
    LanguageDefinition, LeafNodeRule, Metric, MetricCondition, StringFormat,
};
use crate::analysis::walker;

const STRING_COMPONENTS: &[&str] = &["string_start", "string_content", "string_end"];

pub(crate) fn grammar() -> tree_sitter::Language {
    tree_sitter_python::LANGUAGE.into()
}

pub(crate) fn definition() -> LanguageDefinition {
    LanguageDefinition {
        node_metrics: node_metrics(),
        node_extractions: node_extractions(),
        calculation_config: CalculationConfig {
            has_function_body_markers: false,
            ignore_for_comment_lines: vec![
                IgnoreRule::TypeInSet(STRING_COMPONENTS),
                IgnoreRule::SingleChildOfParentWithType("string"),
            ],
            ignore_for_rloc: vec![
                IgnoreRule::TypeInSet(STRING_COMPONENTS),
                IgnoreRule::SingleChildOfParentWithType("string"),
                IgnoreRule::FirstChildIsDocstring,
            ],
            ignore_for_parameters: vec![IgnoreRule::TypeWithParentType {
                node_type: "identifier",
                parent_type: "function_definition",
            }],
            count_as_leaf_node: Some(LeafNodeRule::WhenParentHasMultipleChildren("string")),
            ..CalculationConfig::default()
        },
    }
}

fn node_metrics() -> HashMap<&'static str, Vec<Metric>> {
    let mut metrics = HashMap::new();

    for ty in [
        "if_statement",
        "elif_clause",
        "if_clause",
        "for_statement",
        "while_statement",
        "for_in_clause",
        "conditional_expression",
        "boolean_operator",
        "case_pattern",
        "except_clause",
    ] {
        metrics.insert(ty, vec![Metric::LogicComplexity]);
    }

    metrics.insert(
        "function_definition",
        vec![Metric::FunctionComplexity, Metric::Function],
    );
    // An inline lambda adds complexity like any function shape but is
    // only counted as a function when bound to a name below.
    metrics.insert("lambda", vec![Metric::FunctionComplexity]);
    metrics.insert(
        "assignment",
        vec![Metric::FunctionConditional(
            MetricCondition::ChildFieldMatches {
                field: "right",
                allowed: &["lambda"],
            },
        )],
    );

    metrics.insert("comment", vec![Metric::CommentLine]);
    // Docstring: an expression statement whose only child is a string.
    metrics.insert(
        "expression_statement",
        vec![Metric::CommentLineConditional(
            MetricCondition::ChildPositionMatches {
                position: 0,
                required_child_count: 1,
                allowed: &["string"],
            },
        )],
    );

    metrics.insert("block", vec![Metric::FunctionBody]);
    metrics.insert("identifier", vec![Metric::Parameter]);
    metrics.insert("call", vec![Metric::MessageChain, Metric::MessageChainCall]);
    metrics.insert("attribute", vec![Metric::MessageChain]);

    metrics
}

fn node_extractions() -> HashMap<&'static str, Extract> {
    let mut extractions = HashMap::new();

    extractions.insert(
        "function_definition",
        Extract::identifier(ExtractionStrategy::FirstChildByType("identifier")),
    );
    extractions.insert(
        "class_definition",
        Extract::identifier(ExtractionStrategy::FirstChildByType("identifier")),
    );
    extractions.insert(
        "parameters",
        Extract::Identifier(IdentifierExtract::custom_multi(parameter_identifiers)),
    );
    extractions.insert(
        "assignment",
        Extract::Identifier(IdentifierExtract::custom_multi(assignment_targets)),
    );
    extractions.insert(
        "decorator",
        Extract::Identifier(IdentifierExtract::custom_single(decorator_name)),
    );
    extractions.insert(
        "global_statement",
        Extract::Identifier(IdentifierExtract::multi(
            ExtractionStrategy::AllChildrenByType("identifier"),
        )),
    );

    extractions.insert("comment", Extract::comment(CommentFormat::Line("#")));
    extractions.insert("string", Extract::string(StringFormat::Prefixed));

    extractions
}

/// Bound names from a parameter list: plain, typed and defaulted
/// parameters, and `*args`/`**kwargs` splats.
pub(crate) fn parameter_identifiers(node: Node, source: &str) -> Vec<String> {
    let mut out = Vec::new();
    for child in walker::children(node) {
        match child.kind() {
            "identifier" => out.push(walker::node_text(child, source).to_string()),
            "typed_parameter" | "default_parameter" | "typed_default_parameter" => {
                if let Some(name) = walker::first_child_by_type(child, "identifier") {
                    out.push(walker::node_text(name, source).to_string());
                }
            }
            "list_splat_pattern" | "dictionary_splat_pattern" => {
                if let Some(name) = walker::first_child_by_type(child, "identifier") {
                    out.push(walker::node_text(name, source).to_string());
                }
            }
            _ => {}
        }
    }
    out
}

/// Assignment targets, unpacking tuple/list patterns on the left side.
pub(crate) fn assignment_targets(node: Node, source: &str) -> Vec<String> {
    let mut out = Vec::new();
    if let Some(left) = node.child_by_field_name("left") {
        match left.kind() {
            "identifier" => out.push(walker::node_text(left, source).to_string()),
            "pattern_list" | "tuple_pattern" | "list_pattern" => {
                walker::collect_descendant_texts(left, source, "identifier", &mut out);
            }
            _ => {}
        }
    }
    out
}

/// A decorator's name: the bare identifier or the dotted path's text.
pub(crate) fn decorator_name(node: Node, source: &str) -> Option<String> {
    for child in walker::children(node) {
        match child.kind() {
            "identifier" | "attribute" => {
                return Some(walker::node_text(child, source).to_string());
            }
            "call" => {
                return child
                    .child_by_field_name("function")
                    .map(|f| walker::node_text(f, source).to_string());
            }
            _ => {}
        }
    }
    None
}
