//! Metrics engine: accumulates whole-file metrics and per-function
//! statistics in one walk.
//!
//! Per visited node the engine looks the node type up in the compiled
//! metric index and applies every contribution it carries. All
//! per-language specificity was compiled ahead of time; nothing here
//! branches on the language.

mod chains;
mod scopes;

pub use chains::CHAIN_LINK_THRESHOLD;
pub use scopes::{round2, SeriesStats};

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;
use tree_sitter::Node;

use self::chains::ChainTracker;
use self::scopes::ScopeStack;
use crate::analysis::compile::{CompiledDefinition, MatchKind};
use crate::analysis::walker::{self, TreeVisitor};
use crate::config::Thresholds;

/// Result of one metrics pass: whole-file metrics plus the twelve
/// per-function aggregate keys. Immutable per call.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct MetricsResult {
    pub metrics: BTreeMap<String, f64>,
    pub per_function_metrics: BTreeMap<String, f64>,
}

impl MetricsResult {
    fn get(&self, key: &str) -> f64 {
        self.metrics.get(key).copied().unwrap_or(0.0)
    }

    pub fn complexity(&self) -> f64 {
        self.get("complexity")
    }

    pub fn logic_complexity(&self) -> f64 {
        self.get("logic_complexity")
    }

    pub fn comment_lines(&self) -> f64 {
        self.get("comment_lines")
    }

    pub fn rloc(&self) -> f64 {
        self.get("rloc")
    }

    pub fn loc(&self) -> f64 {
        self.get("loc")
    }

    pub fn number_of_functions(&self) -> f64 {
        self.get("number_of_functions")
    }

    pub fn long_method(&self) -> f64 {
        self.get("long_method")
    }

    pub fn long_parameter_list(&self) -> f64 {
        self.get("long_parameter_list")
    }

    pub fn excessive_comments(&self) -> f64 {
        self.get("excessive_comments")
    }

    pub fn comment_ratio(&self) -> f64 {
        self.get("comment_ratio")
    }

    pub fn message_chains(&self) -> f64 {
        self.get("message_chains")
    }

    pub fn per_function(&self, key: &str) -> f64 {
        self.per_function_metrics.get(key).copied().unwrap_or(0.0)
    }
}

/// Raw counters accumulated during the walk.
#[derive(Debug, Default)]
struct Tally {
    logic_complexity: u32,
    function_complexity: u32,
    comment_lines: u32,
    functions: u32,
    message_chains: u32,
}

struct MetricsVisitor<'a> {
    compiled: &'a CompiledDefinition,
    root_id: usize,
    tally: Tally,
    last_comment_row: Option<usize>,
    code_lines: BTreeSet<usize>,
    chain: ChainTracker,
    scopes: ScopeStack,
}

impl<'a> MetricsVisitor<'a> {
    fn new(compiled: &'a CompiledDefinition, root_id: usize) -> Self {
        Self {
            compiled,
            root_id,
            tally: Tally::default(),
            last_comment_row: None,
            code_lines: BTreeSet::new(),
            chain: ChainTracker::default(),
            scopes: ScopeStack::default(),
        }
    }

    /// A function counts only with a realized body: for simple matches in
    /// body-marker languages, a direct child in the body set. Conditional
    /// matches (named lambdas, possibly expression-bodied) rely on their
    /// condition alone.
    fn has_realized_body(&self, node: Node, kind: MatchKind) -> bool {
        let index = &self.compiled.metrics;
        match kind {
            MatchKind::Conditional => true,
            MatchKind::Simple => {
                !self.compiled.extensions.has_function_body_markers
                    || index.function_body.is_empty()
                    || walker::children(node).any(|c| index.function_body.contains(c.kind()))
            }
        }
    }
}

impl TreeVisitor for MetricsVisitor<'_> {
    fn enter(&mut self, node: Node) {
        if node.id() == self.root_id {
            return;
        }

        let index = &self.compiled.metrics;
        let ext = &self.compiled.extensions;
        let kind = node.kind();
        let start_row = node.start_position().row;
        let end_row = node.end_position().row;

        self.tally.message_chains += self.chain.on_enter(node, kind, index);

        if index.logic_complexity.matches(node, kind) && !ext.ignore_for_complexity(node, kind) {
            self.tally.logic_complexity += 1;
            self.scopes.add_complexity(1);
        }

        if index.function_complexity.matches(node, kind) && !ext.ignore_for_complexity(node, kind) {
            // The node's own point is credited to enclosing scopes before
            // its scope opens, so a function never counts itself.
            self.tally.function_complexity += 1;
            self.scopes.add_complexity(1);
            self.scopes.open(node);
        }

        if index.comment_line.matches(node, kind)
            && !ext.ignore_for_comment_lines(node, kind)
            && self.last_comment_row.map_or(true, |row| start_row > row)
        {
            self.tally.comment_lines += (end_row - start_row + 1) as u32;
            self.last_comment_row = Some(start_row);
        }

        if let Some(kind_match) = index.function.match_kind(node, kind) {
            if !ext.ignore_for_function_count(node, kind)
                && self.has_realized_body(node, kind_match)
            {
                self.tally.functions += 1;
            }
        }

        if index.parameter.contains(kind) && !ext.ignore_for_parameters(node, kind) {
            self.scopes.add_parameter();
        }

        if index.function_body.contains(kind) {
            self.scopes.enter_body(node);
        }

        // Real lines: lines spanned by non-comment leaves (or nodes a leaf
        // rule promotes) that no ignore rule excludes.
        if !index.comment_line.contains_type(kind) {
            let promoted = ext.count_as_leaf_node(node);
            if promoted || (node.child_count() == 0 && !ext.ignore_for_rloc(node, kind)) {
                self.code_lines.extend(start_row..=end_row);
            }
        }
    }

    fn exit(&mut self, node: Node) {
        if node.id() == self.root_id {
            return;
        }
        self.scopes.exit_node(node, &self.code_lines);
    }
}

/// Collect all metrics for already-parsed source.
///
/// `root` of `None` (or empty source) produces the defined all-zero
/// result rather than an error.
pub fn collect(
    root: Option<Node>,
    source: &str,
    compiled: &CompiledDefinition,
    thresholds: &Thresholds,
) -> MetricsResult {
    let root = match root {
        Some(root) if !source.is_empty() => root,
        _ => return build_result(source, &Tally::default(), 0, &[], thresholds),
    };

    let mut visitor = MetricsVisitor::new(compiled, root.id());
    walker::walk(Some(root), &mut visitor);
    debug_assert!(
        !visitor.scopes.has_open_scopes(),
        "every function scope must close by end of walk"
    );

    build_result(
        source,
        &visitor.tally,
        visitor.code_lines.len(),
        visitor.scopes.closed(),
        thresholds,
    )
}

fn build_result(
    source: &str,
    tally: &Tally,
    rloc: usize,
    closed: &[scopes::ClosedScope],
    thresholds: &Thresholds,
) -> MetricsResult {
    let loc = if source.is_empty() {
        0
    } else {
        1 + source.matches('\n').count()
    };

    let complexity_series: Vec<u32> = closed.iter().map(|s| s.complexity).collect();
    let rloc_series: Vec<u32> = closed.iter().map(|s| s.rloc).collect();
    let parameter_series: Vec<u32> = closed.iter().map(|s| s.parameters).collect();

    let long_method = rloc_series
        .iter()
        .filter(|&&lines| lines > thresholds.long_method)
        .count();
    let long_parameter_list = parameter_series
        .iter()
        .filter(|&&params| params > thresholds.long_parameter_list)
        .count();
    let excessive_comments = if tally.comment_lines > thresholds.excessive_comments {
        1.0
    } else {
        0.0
    };
    let comment_ratio = if rloc > 0 {
        round2(tally.comment_lines as f64 / rloc as f64)
    } else {
        0.0
    };

    let mut metrics = BTreeMap::new();
    metrics.insert(
        "complexity".to_string(),
        (tally.logic_complexity + tally.function_complexity) as f64,
    );
    metrics.insert(
        "logic_complexity".to_string(),
        tally.logic_complexity as f64,
    );
    metrics.insert("comment_lines".to_string(), tally.comment_lines as f64);
    metrics.insert("rloc".to_string(), rloc as f64);
    metrics.insert("loc".to_string(), loc as f64);
    metrics.insert(
        "number_of_functions".to_string(),
        tally.functions as f64,
    );
    metrics.insert("long_method".to_string(), long_method as f64);
    metrics.insert(
        "long_parameter_list".to_string(),
        long_parameter_list as f64,
    );
    metrics.insert("excessive_comments".to_string(), excessive_comments);
    metrics.insert("comment_ratio".to_string(), comment_ratio);
    metrics.insert(
        "message_chains".to_string(),
        tally.message_chains as f64,
    );

    let mut per_function = BTreeMap::new();
    for (name, series) in [
        ("complexity", &complexity_series),
        ("rloc", &rloc_series),
        ("parameters", &parameter_series),
    ] {
        let stats = SeriesStats::compute(series);
        per_function.insert(format!("min_{name}_per_function"), stats.min);
        per_function.insert(format!("max_{name}_per_function"), stats.max);
        per_function.insert(format!("mean_{name}_per_function"), stats.mean);
        per_function.insert(format!("median_{name}_per_function"), stats.median);
    }

    MetricsResult {
        metrics,
        per_function_metrics: per_function,
    }
}
