//! Declarative language definition model.
//!
//! A [`LanguageDefinition`] is pure data: maps from AST node types to the
//! metrics they contribute and the text they yield, plus calculation
//! configuration for the handful of behaviors that differ structurally
//! between languages. The engines interpret this data during a single
//! traversal; adding a language means adding tables, not code.

use std::collections::HashMap;

use tree_sitter::Node;

/// What a node contributes to code metrics.
///
/// A node type may carry several metrics at once (a function declaration
/// typically carries both `FunctionComplexity` and `Function`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Metric {
    /// Contributes to cyclomatic-style complexity (if, for, while, ...).
    LogicComplexity,
    /// Contributes to complexity only when the condition holds
    /// (e.g. binary expressions count only for `&&`/`||`/`??`).
    LogicComplexityConditional(MetricCondition),
    /// A function-like node: adds to total complexity and opens a
    /// per-function aggregation scope.
    FunctionComplexity,
    /// A comment node (line or block).
    CommentLine,
    /// A comment only when the condition holds (e.g. Python docstrings).
    CommentLineConditional(MetricCondition),
    /// A function declaration counted toward `number_of_functions`.
    Function,
    /// A function declaration counted only when the condition holds
    /// (e.g. a variable declarator whose bound value is a lambda).
    FunctionConditional(MetricCondition),
    /// Marks a function body's span for per-function line counting.
    FunctionBody,
    /// A function parameter.
    Parameter,
    /// A member-access link in a method chain.
    MessageChain,
    /// An actual call link in a method chain.
    MessageChainCall,
}

/// Condition that must hold for a conditional metric to count.
///
/// Kept as a closed, interpretable union rather than closures so the
/// expressible condition set stays enumerable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MetricCondition {
    /// No additional condition.
    Always,
    /// The named field resolves to a child whose type is in the allowed
    /// set. Operator tokens have their text as their type, so this covers
    /// both type and text matching.
    ChildFieldMatches {
        field: &'static str,
        allowed: &'static [&'static str],
    },
    /// The node has exactly `required_child_count` children and the child
    /// at `position` has one of the allowed types.
    ChildPositionMatches {
        position: usize,
        required_child_count: usize,
        allowed: &'static [&'static str],
    },
}

impl MetricCondition {
    /// Interpret the condition against a node.
    pub fn matches(&self, node: Node) -> bool {
        match self {
            MetricCondition::Always => true,
            MetricCondition::ChildFieldMatches { field, allowed } => node
                .child_by_field_name(field)
                .is_some_and(|child| allowed.contains(&child.kind())),
            MetricCondition::ChildPositionMatches {
                position,
                required_child_count,
                allowed,
            } => {
                node.child_count() == *required_child_count
                    && node
                        .child(*position)
                        .is_some_and(|child| allowed.contains(&child.kind()))
            }
        }
    }
}

/// Declarative rule suppressing a node for one metric category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IgnoreRule {
    /// Node type matches and the parent has the given type.
    /// Example: `identifier` under `function_declaration` is the function
    /// name, not a parameter.
    TypeWithParentType {
        node_type: &'static str,
        parent_type: &'static str,
    },
    /// Node type is in the set.
    TypeInSet(&'static [&'static str]),
    /// Node type is in the set and equals its parent's type. Prevents
    /// double-counting directly nested control structures.
    TypeEqualsParentTypeWhenInSet(&'static [&'static str]),
    /// Node type matches and the parent has exactly one child. A string
    /// that is its parent's only child is a docstring, not code.
    SingleChildOfParentWithType(&'static str),
    /// Node type matches and the parent is NOT the given type.
    TypeWhenParentTypeIsNot {
        node_type: &'static str,
        required_parent_type: &'static str,
    },
    /// The node's first child is an expression statement with exactly one
    /// child (a docstring position).
    FirstChildIsDocstring,
}

impl IgnoreRule {
    pub fn matches(&self, node: Node, node_type: &str) -> bool {
        match self {
            IgnoreRule::TypeWithParentType {
                node_type: ty,
                parent_type,
            } => node_type == *ty && node.parent().is_some_and(|p| p.kind() == *parent_type),
            IgnoreRule::TypeInSet(types) => types.contains(&node_type),
            IgnoreRule::TypeEqualsParentTypeWhenInSet(types) => {
                types.contains(&node_type)
                    && node.parent().is_some_and(|p| p.kind() == node_type)
            }
            IgnoreRule::SingleChildOfParentWithType(ty) => {
                node_type == *ty && node.parent().is_some_and(|p| p.child_count() == 1)
            }
            IgnoreRule::TypeWhenParentTypeIsNot {
                node_type: ty,
                required_parent_type,
            } => {
                node_type == *ty
                    && node
                        .parent()
                        .is_some_and(|p| p.kind() != *required_parent_type)
            }
            IgnoreRule::FirstChildIsDocstring => node
                .child(0)
                .is_some_and(|c| c.kind() == "expression_statement" && c.child_count() == 1),
        }
    }
}

/// Rule reclassifying an otherwise-ignored node as a countable leaf.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LeafNodeRule {
    /// Count the node as a leaf when its parent has more than one child.
    /// Python: a `string` whose parent has other children is real code,
    /// not a docstring.
    WhenParentHasMultipleChildren(&'static str),
}

impl LeafNodeRule {
    pub fn matches(&self, node: Node) -> bool {
        match self {
            LeafNodeRule::WhenParentHasMultipleChildren(ty) => {
                node.kind() == *ty && node.parent().is_some_and(|p| p.child_count() != 1)
            }
        }
    }
}

/// Language-specific calculation configuration, compiled once per language
/// into predicates by the rule compiler.
#[derive(Debug, Clone, Default)]
pub struct CalculationConfig {
    /// Whether the language marks function bodies with explicit start/end
    /// nodes (braces). Indentation-based languages set this to false,
    /// which waives the realized-body requirement for function counting.
    pub has_function_body_markers: bool,
    pub ignore_for_complexity: Vec<IgnoreRule>,
    pub ignore_for_comment_lines: Vec<IgnoreRule>,
    pub ignore_for_function_count: Vec<IgnoreRule>,
    pub ignore_for_rloc: Vec<IgnoreRule>,
    pub ignore_for_parameters: Vec<IgnoreRule>,
    pub count_as_leaf_node: Option<LeafNodeRule>,
}

impl CalculationConfig {
    /// Config for a brace-delimited language with no special rules.
    pub fn with_body_markers() -> Self {
        Self {
            has_function_body_markers: true,
            ..Self::default()
        }
    }
}

/// Custom single-result extractor: `(node, source) -> text?`.
pub type CustomSingle = fn(Node, &str) -> Option<String>;
/// Custom multi-result extractor: `(node, source) -> [text]`.
pub type CustomMulti = fn(Node, &str) -> Vec<String>;

/// Generic, language-agnostic extraction patterns.
///
/// Anything these cannot express (destructuring, decorators, declarator
/// nesting) goes through a custom extractor instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtractionStrategy {
    /// First child matching a single type.
    FirstChildByType(&'static str),
    /// First child matching any of the types, in document order.
    FirstChildByTypes(&'static [&'static str]),
    /// First child of the container type, then its first descendant of
    /// the target type.
    NestedInChild {
        container: &'static str,
        target: &'static str,
    },
    /// All direct children matching a single type, in order.
    AllChildrenByType(&'static str),
}

/// Comment formats the decoders know how to strip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommentFormat {
    /// Line comment with a fixed prefix (`//`, `#`).
    Line(&'static str),
    /// Block comment with `/*` `*/` delimiters and optional per-line `*`.
    Block,
    /// Doc comment where each line starts with `///`.
    XmlDoc,
    /// HTML comment with `<!--` `-->` delimiters.
    Html,
    /// Detect the style from the text's own delimiters. For languages
    /// whose single comment node type spans several styles.
    AutoDetect,
}

/// String literal formats the decoders know how to strip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StringFormat {
    /// Double-quoted string; optionally also strips single quotes.
    Quoted { strip_single_quotes: bool },
    /// Backtick-delimited string (JS templates, Go raw strings).
    Template,
    /// Triple-quoted string, falling back to plain quote stripping when
    /// the text is not triple-quoted.
    TripleQuoted,
    /// Java text block with indentation normalization.
    JavaTextBlock,
    /// C++ raw string `R"delim(content)delim"`.
    CppRaw,
    /// Rust raw string `r#"content"#` (any number of hashes).
    RustRaw,
    /// String with optional prefix letters (Python `f`/`r`/`b`/`u`).
    Prefixed,
    /// Heredoc body: drop the two outermost delimiter lines.
    Heredoc,
    /// Symbol literal with a leading sigil (`:name`, `'name`).
    Symbol(&'static str),
    /// Regex literal with `/` delimiters.
    Regex,
}

/// How to decode a comment node: a built-in format or a custom function.
///
/// The tagged union makes "neither format nor custom" unrepresentable, so
/// the invariant holds by construction.
#[derive(Clone)]
pub enum CommentDecode {
    Format(CommentFormat),
    Custom(CustomSingle),
}

/// How to decode a string literal node.
#[derive(Clone)]
pub enum StringDecode {
    Format(StringFormat),
    Custom(CustomSingle),
}

/// Identifier extraction spec. Resolution priority when several are set:
/// custom multi, then multi strategy, then custom single, then single.
#[derive(Clone, Default)]
pub struct IdentifierExtract {
    pub single: Option<ExtractionStrategy>,
    pub multi: Option<ExtractionStrategy>,
    pub custom_single: Option<CustomSingle>,
    pub custom_multi: Option<CustomMulti>,
}

impl IdentifierExtract {
    pub fn single(strategy: ExtractionStrategy) -> Self {
        Self {
            single: Some(strategy),
            ..Self::default()
        }
    }

    pub fn multi(strategy: ExtractionStrategy) -> Self {
        Self {
            multi: Some(strategy),
            ..Self::default()
        }
    }

    pub fn custom_single(f: CustomSingle) -> Self {
        Self {
            custom_single: Some(f),
            ..Self::default()
        }
    }

    pub fn custom_multi(f: CustomMulti) -> Self {
        Self {
            custom_multi: Some(f),
            ..Self::default()
        }
    }
}

/// What to extract when a node of a mapped type is visited.
#[derive(Clone)]
pub enum Extract {
    Identifier(IdentifierExtract),
    Comment(CommentDecode),
    StringLiteral(StringDecode),
}

impl Extract {
    /// Shorthand for a single-identifier strategy.
    pub fn identifier(strategy: ExtractionStrategy) -> Self {
        Extract::Identifier(IdentifierExtract::single(strategy))
    }

    pub fn comment(format: CommentFormat) -> Self {
        Extract::Comment(CommentDecode::Format(format))
    }

    pub fn string(format: StringFormat) -> Self {
        Extract::StringLiteral(StringDecode::Format(format))
    }
}

/// A language's complete declarative definition.
///
/// Constructed once per language, then shared read-only across unbounded
/// concurrent analyses; nothing here is mutated after construction.
#[derive(Clone, Default)]
pub struct LanguageDefinition {
    /// Node type -> metrics the node contributes.
    pub node_metrics: HashMap<&'static str, Vec<Metric>>,
    /// Node type -> extraction behavior.
    pub node_extractions: HashMap<&'static str, Extract>,
    /// Calculation configuration compiled by the rule compiler.
    pub calculation_config: CalculationConfig,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::walker;

    fn parse_js(source: &str) -> tree_sitter::Tree {
        let mut parser = tree_sitter::Parser::new();
        parser
            .set_language(&tree_sitter_javascript::LANGUAGE.into())
            .unwrap();
        parser.parse(source, None).unwrap()
    }

    fn find<'t>(root: Node<'t>, kind: &str) -> Node<'t> {
        walker::find_descendant_by_type(root, kind)
            .unwrap_or_else(|| panic!("no {kind} node in fixture"))
    }

    #[test]
    fn child_field_condition_matches_operator_token() {
        let tree = parse_js("const ok = a && b;");
        let node = find(tree.root_node(), "binary_expression");

        let and_or = MetricCondition::ChildFieldMatches {
            field: "operator",
            allowed: &["&&", "||"],
        };
        assert!(and_or.matches(node));

        let tree = parse_js("const sum = a + b;");
        let node = find(tree.root_node(), "binary_expression");
        assert!(!and_or.matches(node));
    }

    #[test]
    fn child_position_condition_requires_exact_child_count() {
        let tree = parse_js("f();");
        let node = find(tree.root_node(), "expression_statement");

        // expression_statement has [call_expression, ";"]: two children.
        let two = MetricCondition::ChildPositionMatches {
            position: 0,
            required_child_count: 2,
            allowed: &["call_expression"],
        };
        let one = MetricCondition::ChildPositionMatches {
            position: 0,
            required_child_count: 1,
            allowed: &["call_expression"],
        };
        assert!(two.matches(node));
        assert!(!one.matches(node));
    }

    #[test]
    fn ignore_rule_type_with_parent_type() {
        let tree = parse_js("function f(a) {}");
        let root = tree.root_node();
        let rule = IgnoreRule::TypeWithParentType {
            node_type: "identifier",
            parent_type: "function_declaration",
        };

        let name = find(root, "identifier");
        assert_eq!(name.parent().unwrap().kind(), "function_declaration");
        assert!(rule.matches(name, "identifier"));

        let params = find(root, "formal_parameters");
        let param = find(params, "identifier");
        assert!(!rule.matches(param, "identifier"));
    }

    #[test]
    fn ignore_rule_type_in_set() {
        let tree = parse_js("let x;");
        let node = find(tree.root_node(), "identifier");
        assert!(IgnoreRule::TypeInSet(&["identifier"]).matches(node, "identifier"));
        assert!(!IgnoreRule::TypeInSet(&["comment"]).matches(node, "identifier"));
    }

    #[test]
    fn ignore_rule_type_equals_parent_type_when_in_set() {
        // The left operand of the outer && is itself a binary_expression.
        let tree = parse_js("const ok = a && b && c;");
        let outer = find(tree.root_node(), "binary_expression");
        let inner = find(outer, "binary_expression");

        let rule = IgnoreRule::TypeEqualsParentTypeWhenInSet(&["binary_expression"]);
        assert!(rule.matches(inner, "binary_expression"));
        assert!(!rule.matches(outer, "binary_expression"));
    }

    #[test]
    fn ignore_rule_type_when_parent_type_is_not() {
        let tree = parse_js("function f(a) {}");
        let root = tree.root_node();
        let rule = IgnoreRule::TypeWhenParentTypeIsNot {
            node_type: "identifier",
            required_parent_type: "formal_parameters",
        };

        let name = find(root, "identifier");
        assert!(rule.matches(name, "identifier"));

        let param = find(find(root, "formal_parameters"), "identifier");
        assert!(!rule.matches(param, "identifier"));
    }

    #[test]
    fn leaf_rule_checks_parent_child_count() {
        let tree = parse_js("const pair = [a];");
        let array = find(tree.root_node(), "array");
        let element = find(array, "identifier");

        // The array has three children: "[", identifier, "]".
        let rule = LeafNodeRule::WhenParentHasMultipleChildren("identifier");
        assert!(rule.matches(element));
    }
}
