//! C++ language definition.
//!
//! Builds on the C tables; adds range-for, try/catch, lambdas, classes
//! and raw string literals.

use std::collections::HashMap;

use crate::analysis::definition::{
    CalculationConfig, Extract, ExtractionStrategy, IdentifierExtract, LanguageDefinition, Metric,
    StringFormat,
};

use super::c;

pub(crate) fn grammar() -> tree_sitter::Language {
    tree_sitter_cpp::LANGUAGE.into()
}

pub(crate) fn definition() -> LanguageDefinition {
    LanguageDefinition {
        node_metrics: node_metrics(),
        node_extractions: node_extractions(),
        calculation_config: CalculationConfig::with_body_markers(),
    }
}

fn node_metrics() -> HashMap<&'static str, Vec<Metric>> {
    let mut metrics = c::node_metrics();

    metrics.insert("for_range_loop", vec![Metric::LogicComplexity]);
    metrics.insert("catch_clause", vec![Metric::LogicComplexity]);
    metrics.insert("lambda_expression", vec![Metric::FunctionComplexity]);
    metrics.insert("optional_parameter_declaration", vec![Metric::Parameter]);

    metrics
}

fn node_extractions() -> HashMap<&'static str, Extract> {
    let mut extractions = c::node_extractions();

    extractions.insert(
        "class_specifier",
        Extract::identifier(ExtractionStrategy::FirstChildByType("type_identifier")),
    );
    extractions.insert(
        "namespace_definition",
        Extract::identifier(ExtractionStrategy::FirstChildByTypes(&[
            "namespace_identifier",
            "identifier",
        ])),
    );
    extractions.insert(
        "optional_parameter_declaration",
        Extract::Identifier(IdentifierExtract::custom_single(c::declarator_identifier)),
    );
    extractions.insert(
        "raw_string_literal",
        Extract::string(StringFormat::CppRaw),
    );

    extractions
}
