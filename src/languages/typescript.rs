//! TypeScript language definition.
//!
//! Shares extraction tables with JavaScript (same AST shape); the metric
//! table differs where the TypeScript grammar does: parameters are
//! `required_parameter`/`optional_parameter` wrappers instead of bare
//! identifiers, and `conditional_type` branches the type system.

use std::collections::HashMap;

use crate::analysis::definition::{
    CalculationConfig, Extract, ExtractionStrategy, LanguageDefinition, Metric,
};

use super::javascript;

pub(crate) fn grammar() -> tree_sitter::Language {
    tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into()
}

pub(crate) fn definition() -> LanguageDefinition {
    LanguageDefinition {
        node_metrics: node_metrics(),
        node_extractions: node_extractions(),
        calculation_config: CalculationConfig::with_body_markers(),
    }
}

fn node_metrics() -> HashMap<&'static str, Vec<Metric>> {
    let mut metrics = javascript::node_metrics();

    metrics.insert("conditional_type", vec![Metric::LogicComplexity]);

    // Parameters are wrapped nodes here; the bare-identifier entry would
    // double count through the wrapper.
    metrics.remove("identifier");
    metrics.insert("required_parameter", vec![Metric::Parameter]);
    metrics.insert("optional_parameter", vec![Metric::Parameter]);

    metrics
}

fn node_extractions() -> HashMap<&'static str, Extract> {
    let mut extractions = javascript::node_extractions();

    for ty in [
        "interface_declaration",
        "type_alias_declaration",
        "enum_declaration",
    ] {
        extractions.insert(
            ty,
            Extract::identifier(ExtractionStrategy::FirstChildByTypes(&[
                "type_identifier",
                "identifier",
            ])),
        );
    }
    extractions.insert(
        "type_parameter",
        Extract::identifier(ExtractionStrategy::FirstChildByTypes(&[
            "type_identifier",
            "identifier",
        ])),
    );

    extractions
}
