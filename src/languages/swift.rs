//! Swift language definition.

use std::collections::HashMap;

use tree_sitter::Node;

use crate::analysis::definition::{
    CalculationConfig, CommentFormat, Extract, ExtractionStrategy, IdentifierExtract,
    LanguageDefinition, Metric, StringFormat,
};
use crate::analysis::walker;

pub(crate) fn grammar() -> tree_sitter::Language {
    tree_sitter_swift::LANGUAGE.into()
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
        "guard_statement",
        "while_statement",
        "repeat_while_statement",
        "for_statement",
        "switch_entry",
        "catch_block",
        "ternary_expression",
        "conjunction_expression",
        "disjunction_expression",
    ] {
        metrics.insert(ty, vec![Metric::LogicComplexity]);
    }

    metrics.insert(
        "function_declaration",
        vec![Metric::FunctionComplexity, Metric::Function],
    );
    metrics.insert("init_declaration", vec![Metric::FunctionComplexity]);
    metrics.insert("lambda_literal", vec![Metric::FunctionComplexity]);

    metrics.insert("comment", vec![Metric::CommentLine]);
    metrics.insert("multiline_comment", vec![Metric::CommentLine]);

    metrics.insert("function_body", vec![Metric::FunctionBody]);
    metrics.insert("parameter", vec![Metric::Parameter]);

    metrics.insert("navigation_expression", vec![Metric::MessageChain]);
    metrics.insert(
        "call_expression",
        vec![Metric::MessageChain, Metric::MessageChainCall],
    );

    metrics
}

fn node_extractions() -> HashMap<&'static str, Extract> {
    let mut extractions = HashMap::new();

    for ty in ["class_declaration", "protocol_declaration"] {
        extractions.insert(
            ty,
            Extract::identifier(ExtractionStrategy::FirstChildByType("type_identifier")),
        );
    }
    extractions.insert(
        "function_declaration",
        Extract::identifier(ExtractionStrategy::FirstChildByType("simple_identifier")),
    );
    extractions.insert(
        "parameter",
        Extract::identifier(ExtractionStrategy::FirstChildByType("simple_identifier")),
    );
    extractions.insert(
        "property_declaration",
        Extract::Identifier(IdentifierExtract::custom_multi(property_identifiers)),
    );

    extractions.insert("comment", Extract::comment(CommentFormat::AutoDetect));
    extractions.insert("multiline_comment", Extract::comment(CommentFormat::Block));

    extractions.insert(
        "line_string_literal",
        Extract::string(StringFormat::Quoted {
            strip_single_quotes: false,
        }),
    );
    extractions.insert(
        "multi_line_string_literal",
        Extract::string(StringFormat::TripleQuoted),
    );
    extractions.insert("regex_literal", Extract::string(StringFormat::Regex));

    extractions
}

/// Names bound by a property declaration's patterns, tuples included.
pub(crate) fn property_identifiers(node: Node, source: &str) -> Vec<String> {
    let mut out = Vec::new();
    for child in walker::children(node) {
        if child.kind() != "pattern" {
            continue;
        }
        let mut names = Vec::new();
        walker::collect_descendant_texts(child, source, "simple_identifier", &mut names);
        if names.is_empty() {
            // A bare pattern is itself the name.
            let text = walker::node_text(child, source).trim().to_string();
            if !text.is_empty() {
                names.push(text);
            }
        }
        out.extend(names);
    }
    out
}
