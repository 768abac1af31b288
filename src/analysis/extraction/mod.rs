//! Extraction engine: produces an ordered list of classified text
//! fragments in one walk.
//!
//! The same walker drives a different visitor: per node the extraction
//! map is consulted and the configured strategy or decoder runs.
//! Traversal order is the sole determinant of output order.

pub mod comments;
pub mod strings;

use serde::Serialize;
use tree_sitter::Node;

use crate::analysis::compile::CompiledDefinition;
use crate::analysis::definition::{
    CommentDecode, Extract, ExtractionStrategy, IdentifierExtract, StringDecode,
};
use crate::analysis::walker::{self, TreeVisitor};

/// The semantic class a fragment was extracted from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ExtractionContext {
    Identifier,
    Comment,
    String,
}

/// One extracted fragment, created once per match and never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExtractedText {
    pub text: String,
    pub context: ExtractionContext,
}

/// All fragments from one pass, in traversal order, with filtered views
/// per context.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ExtractionResult {
    pub extracted_texts: Vec<ExtractedText>,
}

impl ExtractionResult {
    pub fn identifiers(&self) -> Vec<&str> {
        self.texts_for(ExtractionContext::Identifier)
    }

    pub fn comments(&self) -> Vec<&str> {
        self.texts_for(ExtractionContext::Comment)
    }

    pub fn strings(&self) -> Vec<&str> {
        self.texts_for(ExtractionContext::String)
    }

    fn texts_for(&self, context: ExtractionContext) -> Vec<&str> {
        self.extracted_texts
            .iter()
            .filter(|e| e.context == context)
            .map(|e| e.text.as_str())
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.extracted_texts.is_empty()
    }
}

/// The conventional "intentionally unnamed" placeholder.
const WILDCARD: &str = "_";

/// Execute a strategy for a single identifier.
fn execute_single(node: Node, source: &str, strategy: &ExtractionStrategy) -> Option<String> {
    match strategy {
        ExtractionStrategy::FirstChildByType(ty) => {
            walker::first_child_text_by_types(node, source, std::slice::from_ref(ty))
        }
        ExtractionStrategy::FirstChildByTypes(types) => {
            walker::first_child_text_by_types(node, source, types)
        }
        ExtractionStrategy::NestedInChild { container, target } => {
            walker::first_child_by_type(node, container)
                .and_then(|c| walker::find_descendant_by_type(c, target))
                .map(|n| walker::node_text(n, source).to_string())
        }
        ExtractionStrategy::AllChildrenByType(ty) => {
            walker::first_child_text_by_types(node, source, std::slice::from_ref(ty))
        }
    }
}

/// Execute a strategy for multiple identifiers.
fn execute_multi(node: Node, source: &str, strategy: &ExtractionStrategy) -> Vec<String> {
    match strategy {
        ExtractionStrategy::AllChildrenByType(ty) => {
            walker::all_children_text_by_type(node, source, ty)
        }
        other => execute_single(node, source, other).into_iter().collect(),
    }
}

struct ExtractionVisitor<'a> {
    source: &'a str,
    compiled: &'a CompiledDefinition,
    results: Vec<ExtractedText>,
}

impl ExtractionVisitor<'_> {
    /// Append a fragment unless it is blank after decoding.
    fn push(&mut self, text: String, context: ExtractionContext) {
        if !text.trim().is_empty() {
            self.results.push(ExtractedText { text, context });
        }
    }

    fn push_identifier(&mut self, text: String) {
        if text != WILDCARD {
            self.push(text, ExtractionContext::Identifier);
        }
    }

    /// Priority: custom multi, multi strategy, custom single, single.
    fn extract_identifiers(&mut self, node: Node, spec: &IdentifierExtract) {
        if let Some(custom) = spec.custom_multi {
            for text in custom(node, self.source) {
                self.push_identifier(text);
            }
            return;
        }
        if let Some(strategy) = &spec.multi {
            for text in execute_multi(node, self.source, strategy) {
                self.push_identifier(text);
            }
            return;
        }
        if let Some(custom) = spec.custom_single {
            if let Some(text) = custom(node, self.source) {
                self.push_identifier(text);
            }
            return;
        }
        if let Some(strategy) = &spec.single {
            if let Some(text) = execute_single(node, self.source, strategy) {
                self.push_identifier(text);
            }
        }
    }

    fn extract_comment(&mut self, node: Node, decode: &CommentDecode) {
        let raw = walker::node_text(node, self.source);
        let text = match decode {
            CommentDecode::Format(format) => Some(comments::decode(raw, *format)),
            // A custom extractor returning None means "skip this node".
            CommentDecode::Custom(custom) => custom(node, self.source),
        };
        if let Some(text) = text {
            self.push(text, ExtractionContext::Comment);
        }
    }

    fn extract_string(&mut self, node: Node, decode: &StringDecode) {
        let raw = walker::node_text(node, self.source);
        let text = match decode {
            StringDecode::Format(format) => Some(strings::decode(raw, *format)),
            StringDecode::Custom(custom) => custom(node, self.source),
        };
        if let Some(text) = text {
            self.push(text, ExtractionContext::String);
        }
    }
}

impl TreeVisitor for ExtractionVisitor<'_> {
    fn enter(&mut self, node: Node) {
        let Some(extract) = self.compiled.definition.node_extractions.get(node.kind()) else {
            return;
        };
        match extract {
            Extract::Identifier(spec) => self.extract_identifiers(node, spec),
            Extract::Comment(decode) => self.extract_comment(node, decode),
            Extract::StringLiteral(decode) => self.extract_string(node, decode),
        }
    }
}

/// Extract all classified fragments from already-parsed source.
///
/// Empty source or an absent root yields the empty result.
pub fn extract(
    root: Option<Node>,
    source: &str,
    compiled: &CompiledDefinition,
) -> ExtractionResult {
    if source.trim().is_empty() {
        return ExtractionResult::default();
    }

    let mut visitor = ExtractionVisitor {
        source,
        compiled,
        results: Vec::new(),
    };
    walker::walk(root, &mut visitor);

    ExtractionResult {
        extracted_texts: visitor.results,
    }
}
