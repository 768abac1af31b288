//! Java language definition.
//!
//! Abstract and interface methods share the `method_declaration` node
//! type with concrete ones; only declarations with a realized body count
//! toward `number_of_functions`.

use std::collections::HashMap;

use crate::analysis::definition::{
    CalculationConfig, CommentFormat, Extract, ExtractionStrategy, LanguageDefinition, Metric,
    MetricCondition, StringFormat,
};

pub(crate) fn grammar() -> tree_sitter::Language {
    tree_sitter_java::LANGUAGE.into()
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
        "do_statement",
        "for_statement",
        "while_statement",
        "enhanced_for_statement",
        "ternary_expression",
        "switch_label",
        "catch_clause",
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

    for ty in [
        "method_declaration",
        "constructor_declaration",
        "compact_constructor_declaration",
    ] {
        metrics.insert(ty, vec![Metric::FunctionComplexity, Metric::Function]);
    }
    metrics.insert("lambda_expression", vec![Metric::FunctionComplexity]);
    metrics.insert("static_initializer", vec![Metric::FunctionComplexity]);

    metrics.insert(
        "variable_declarator",
        vec![Metric::FunctionConditional(
            MetricCondition::ChildFieldMatches {
                field: "value",
                allowed: &["lambda_expression"],
            },
        )],
    );

    metrics.insert("line_comment", vec![Metric::CommentLine]);
    metrics.insert("block_comment", vec![Metric::CommentLine]);

    metrics.insert("block", vec![Metric::FunctionBody]);
    metrics.insert("constructor_body", vec![Metric::FunctionBody]);
    metrics.insert("formal_parameter", vec![Metric::Parameter]);
    metrics.insert("spread_parameter", vec![Metric::Parameter]);

    metrics.insert(
        "method_invocation",
        vec![Metric::MessageChain, Metric::MessageChainCall],
    );
    metrics.insert("field_access", vec![Metric::MessageChain]);

    metrics
}

fn node_extractions() -> HashMap<&'static str, Extract> {
    let mut extractions = HashMap::new();

    for ty in [
        "class_declaration",
        "interface_declaration",
        "enum_declaration",
        "record_declaration",
        "annotation_type_declaration",
    ] {
        extractions.insert(
            ty,
            Extract::identifier(ExtractionStrategy::FirstChildByType("identifier")),
        );
    }
    for ty in ["method_declaration", "constructor_declaration"] {
        extractions.insert(
            ty,
            Extract::identifier(ExtractionStrategy::FirstChildByType("identifier")),
        );
    }
    extractions.insert(
        "formal_parameter",
        Extract::identifier(ExtractionStrategy::FirstChildByType("identifier")),
    );
    extractions.insert(
        "variable_declarator",
        Extract::identifier(ExtractionStrategy::FirstChildByType("identifier")),
    );
    extractions.insert(
        "enum_constant",
        Extract::identifier(ExtractionStrategy::FirstChildByType("identifier")),
    );

    extractions.insert("line_comment", Extract::comment(CommentFormat::AutoDetect));
    extractions.insert("block_comment", Extract::comment(CommentFormat::Block));

    extractions.insert(
        "string_literal",
        Extract::string(StringFormat::Quoted {
            strip_single_quotes: false,
        }),
    );
    extractions.insert("text_block", Extract::string(StringFormat::JavaTextBlock));

    extractions
}
