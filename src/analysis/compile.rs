//! Rule compiler: turns a declarative definition into the lookup
//! structures the engines consult per node.
//!
//! Compilation happens once per language; the result is immutable and
//! shared. This keeps the metrics engine free of per-language branching:
//! all specificity lives in the compiled index and predicates.

use std::collections::HashSet;

use tree_sitter::Node;

use super::definition::{
    CalculationConfig, IgnoreRule, LanguageDefinition, LeafNodeRule, Metric, MetricCondition,
};

/// Which arm of a type matcher matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchKind {
    Simple,
    Conditional,
}

/// A conditional entry: base node type plus the condition to interpret.
#[derive(Debug, Clone)]
struct ConditionalType {
    base: &'static str,
    condition: MetricCondition,
}

/// Matches a node against a metric category: either its type is in the
/// simple set, or a conditional entry for its type holds.
#[derive(Debug, Clone, Default)]
pub struct TypeMatcher {
    simple: HashSet<&'static str>,
    conditional: Vec<ConditionalType>,
}

impl TypeMatcher {
    pub fn matches(&self, node: Node, node_type: &str) -> bool {
        self.match_kind(node, node_type).is_some()
    }

    pub fn match_kind(&self, node: Node, node_type: &str) -> Option<MatchKind> {
        if self.simple.contains(node_type) {
            return Some(MatchKind::Simple);
        }
        let conditional = self
            .conditional
            .iter()
            .filter(|c| c.base == node_type)
            .any(|c| c.condition.matches(node));
        conditional.then_some(MatchKind::Conditional)
    }

    /// Whether the type appears in the simple set at all, regardless of
    /// node shape. Used to recognize comment-typed nodes during RLOC.
    pub fn contains_type(&self, node_type: &str) -> bool {
        self.simple.contains(node_type)
    }

    pub fn is_empty(&self) -> bool {
        self.simple.is_empty() && self.conditional.is_empty()
    }
}

/// Per-category node-type index built from a definition's metric map.
#[derive(Debug, Clone, Default)]
pub struct MetricIndex {
    pub logic_complexity: TypeMatcher,
    pub function_complexity: TypeMatcher,
    pub comment_line: TypeMatcher,
    pub function: TypeMatcher,
    pub function_body: HashSet<&'static str>,
    pub parameter: HashSet<&'static str>,
    pub message_chain: HashSet<&'static str>,
    pub message_chain_call: HashSet<&'static str>,
}

impl MetricIndex {
    pub fn build(definition: &LanguageDefinition) -> Self {
        let mut index = MetricIndex::default();

        for (&node_type, metrics) in &definition.node_metrics {
            for metric in metrics {
                match metric {
                    Metric::LogicComplexity => {
                        index.logic_complexity.simple.insert(node_type);
                    }
                    Metric::LogicComplexityConditional(cond) => {
                        index.logic_complexity.conditional.push(ConditionalType {
                            base: node_type,
                            condition: cond.clone(),
                        });
                    }
                    Metric::FunctionComplexity => {
                        index.function_complexity.simple.insert(node_type);
                    }
                    Metric::CommentLine => {
                        index.comment_line.simple.insert(node_type);
                    }
                    Metric::CommentLineConditional(cond) => {
                        index.comment_line.conditional.push(ConditionalType {
                            base: node_type,
                            condition: cond.clone(),
                        });
                    }
                    Metric::Function => {
                        index.function.simple.insert(node_type);
                    }
                    Metric::FunctionConditional(cond) => {
                        index.function.conditional.push(ConditionalType {
                            base: node_type,
                            condition: cond.clone(),
                        });
                    }
                    Metric::FunctionBody => {
                        index.function_body.insert(node_type);
                    }
                    Metric::Parameter => {
                        index.parameter.insert(node_type);
                    }
                    Metric::MessageChain => {
                        index.message_chain.insert(node_type);
                    }
                    Metric::MessageChainCall => {
                        index.message_chain_call.insert(node_type);
                    }
                }
            }
        }

        index
    }

    /// Whether the node type belongs to a chain (member access or call).
    pub fn is_chain_node(&self, node_type: &str) -> bool {
        self.message_chain.contains(node_type) || self.message_chain_call.contains(node_type)
    }
}

/// Compiled ignore/leaf predicates for one language.
///
/// Unset rule lists compile to constantly-false predicates. The rules stay
/// an interpreted closed union rather than per-rule closures, so the
/// expressible rule set remains enumerable.
#[derive(Debug, Clone, Default)]
pub struct CalculationExtensions {
    pub has_function_body_markers: bool,
    ignore_for_complexity: Vec<IgnoreRule>,
    ignore_for_comment_lines: Vec<IgnoreRule>,
    ignore_for_function_count: Vec<IgnoreRule>,
    ignore_for_rloc: Vec<IgnoreRule>,
    ignore_for_parameters: Vec<IgnoreRule>,
    count_as_leaf_node: Option<LeafNodeRule>,
}

fn any_rule_matches(rules: &[IgnoreRule], node: Node, node_type: &str) -> bool {
    rules.iter().any(|rule| rule.matches(node, node_type))
}

impl CalculationExtensions {
    /// Compile a declarative config. Pure; called once per language.
    pub fn compile(config: &CalculationConfig) -> Self {
        Self {
            has_function_body_markers: config.has_function_body_markers,
            ignore_for_complexity: config.ignore_for_complexity.clone(),
            ignore_for_comment_lines: config.ignore_for_comment_lines.clone(),
            ignore_for_function_count: config.ignore_for_function_count.clone(),
            ignore_for_rloc: config.ignore_for_rloc.clone(),
            ignore_for_parameters: config.ignore_for_parameters.clone(),
            count_as_leaf_node: config.count_as_leaf_node.clone(),
        }
    }

    pub fn ignore_for_complexity(&self, node: Node, node_type: &str) -> bool {
        any_rule_matches(&self.ignore_for_complexity, node, node_type)
    }

    pub fn ignore_for_comment_lines(&self, node: Node, node_type: &str) -> bool {
        any_rule_matches(&self.ignore_for_comment_lines, node, node_type)
    }

    pub fn ignore_for_function_count(&self, node: Node, node_type: &str) -> bool {
        any_rule_matches(&self.ignore_for_function_count, node, node_type)
    }

    pub fn ignore_for_rloc(&self, node: Node, node_type: &str) -> bool {
        any_rule_matches(&self.ignore_for_rloc, node, node_type)
    }

    pub fn ignore_for_parameters(&self, node: Node, node_type: &str) -> bool {
        any_rule_matches(&self.ignore_for_parameters, node, node_type)
    }

    pub fn count_as_leaf_node(&self, node: Node) -> bool {
        self.count_as_leaf_node
            .as_ref()
            .is_some_and(|rule| rule.matches(node))
    }
}

/// A language definition together with its compiled lookup structures.
///
/// Built once (behind the registry's `Lazy`) and shared read-only across
/// analyses; parallel per-file callers need no locking.
pub struct CompiledDefinition {
    pub definition: LanguageDefinition,
    pub metrics: MetricIndex,
    pub extensions: CalculationExtensions,
}

impl CompiledDefinition {
    pub fn compile(definition: LanguageDefinition) -> Self {
        let metrics = MetricIndex::build(&definition);
        let extensions = CalculationExtensions::compile(&definition.calculation_config);
        Self {
            definition,
            metrics,
            extensions,
        }
    }
}
