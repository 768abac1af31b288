//! C language definition.
//!
//! Prototypes are `declaration` nodes, distinct from `function_definition`,
//! so every counted function has a body. Declarator nesting (pointers,
//! arrays, function declarators) needs custom extractors.

use std::collections::HashMap;

use tree_sitter::Node;

use crate::analysis::definition::{
    CalculationConfig, CommentFormat, Extract, ExtractionStrategy, IdentifierExtract,
    LanguageDefinition, Metric, MetricCondition, StringFormat,
};
use crate::analysis::walker;

pub(crate) fn grammar() -> tree_sitter::Language {
    tree_sitter_c::LANGUAGE.into()
}

pub(crate) fn definition() -> LanguageDefinition {
    LanguageDefinition {
        node_metrics: node_metrics(),
        node_extractions: node_extractions(),
        calculation_config: CalculationConfig::with_body_markers(),
    }
}

pub(crate) fn node_metrics() -> HashMap<&'static str, Vec<Metric>> {
    let mut metrics = HashMap::new();

    for ty in [
        "if_statement",
        "for_statement",
        "while_statement",
        "do_statement",
        "case_statement",
        "conditional_expression",
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
        "function_definition",
        vec![Metric::FunctionComplexity, Metric::Function],
    );

    metrics.insert("comment", vec![Metric::CommentLine]);
    metrics.insert("compound_statement", vec![Metric::FunctionBody]);
    metrics.insert("parameter_declaration", vec![Metric::Parameter]);

    metrics.insert("field_expression", vec![Metric::MessageChain]);
    metrics.insert(
        "call_expression",
        vec![Metric::MessageChain, Metric::MessageChainCall],
    );

    metrics
}

pub(crate) fn node_extractions() -> HashMap<&'static str, Extract> {
    let mut extractions = HashMap::new();

    extractions.insert(
        "function_definition",
        Extract::Identifier(IdentifierExtract::custom_single(declarator_identifier)),
    );
    extractions.insert(
        "parameter_declaration",
        Extract::Identifier(IdentifierExtract::custom_single(declarator_identifier)),
    );
    extractions.insert(
        "declaration",
        Extract::Identifier(IdentifierExtract::custom_multi(declaration_identifiers)),
    );
    extractions.insert(
        "struct_specifier",
        Extract::identifier(ExtractionStrategy::FirstChildByType("type_identifier")),
    );
    extractions.insert(
        "union_specifier",
        Extract::identifier(ExtractionStrategy::FirstChildByType("type_identifier")),
    );
    extractions.insert(
        "enum_specifier",
        Extract::identifier(ExtractionStrategy::FirstChildByType("type_identifier")),
    );
    extractions.insert(
        "type_definition",
        Extract::Identifier(IdentifierExtract::multi(
            ExtractionStrategy::AllChildrenByType("type_identifier"),
        )),
    );

    extractions.insert("comment", Extract::comment(CommentFormat::AutoDetect));
    extractions.insert(
        "string_literal",
        Extract::string(StringFormat::Quoted {
            strip_single_quotes: false,
        }),
    );

    extractions
}

/// The identifier buried in a (possibly nested) declarator:
/// `int *name[3]` and `void name(void)` both resolve to `name`.
pub(crate) fn declarator_identifier(node: Node, source: &str) -> Option<String> {
    let declarator = node.child_by_field_name("declarator")?;
    resolve_declarator(declarator, source)
}

pub(crate) fn resolve_declarator(node: Node, source: &str) -> Option<String> {
    match node.kind() {
        "identifier" | "field_identifier" => Some(walker::node_text(node, source).to_string()),
        _ => walker::find_descendant_by_type(node, "identifier")
            .map(|n| walker::node_text(n, source).to_string()),
    }
}

/// Every name declared by a `declaration`: one entry per declarator,
/// skipping initializer expressions.
pub(crate) fn declaration_identifiers(node: Node, source: &str) -> Vec<String> {
    let mut out = Vec::new();
    for child in walker::children(node) {
        match child.kind() {
            "identifier" => out.push(walker::node_text(child, source).to_string()),
            "init_declarator" => {
                if let Some(decl) = child.child_by_field_name("declarator") {
                    out.extend(resolve_declarator(decl, source));
                }
            }
            "pointer_declarator" | "array_declarator" | "function_declarator" => {
                out.extend(resolve_declarator(child, source));
            }
            _ => {}
        }
    }
    out
}
