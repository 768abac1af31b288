//! Per-function aggregation scopes.
//!
//! Every `FunctionComplexity` node opens a scope; closing it records the
//! function's complexity, real lines, and parameter count. Scopes nest,
//! and an enclosing scope's statistics include everything found in its
//! subtree — nested functions are not subtracted.

use std::collections::BTreeSet;

use tree_sitter::Node;

/// One open function scope.
#[derive(Debug)]
struct Scope {
    /// Node id of the function node, matched on exit to pop the scope.
    node_id: usize,
    /// Line span of the function node itself (0-indexed rows).
    span: (usize, usize),
    /// Node id of the body node once entered.
    body_node_id: Option<usize>,
    /// Line span of the body, if the language marks one.
    body_span: Option<(usize, usize)>,
    /// Whether traversal is currently inside the body.
    in_body: bool,
    complexity: u32,
    parameters: u32,
}

/// A closed function's recorded measurements.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClosedScope {
    pub complexity: u32,
    pub rloc: u32,
    pub parameters: u32,
}

/// Explicit stack of open function scopes plus the closed-scope record.
///
/// The stack replaces the recursion-implicit state a visitor would
/// otherwise carry, so the aggregation contract is testable on its own.
#[derive(Debug, Default)]
pub struct ScopeStack {
    open: Vec<Scope>,
    closed: Vec<ClosedScope>,
}

impl ScopeStack {
    /// Open a scope for a function node. Call after crediting the node's
    /// own complexity point to enclosing scopes: a function's +1 belongs
    /// to its enclosing functions' statistics, never its own.
    pub fn open(&mut self, node: Node) {
        self.open.push(Scope {
            node_id: node.id(),
            span: (node.start_position().row, node.end_position().row),
            body_node_id: None,
            body_span: None,
            in_body: false,
            complexity: 0,
            parameters: 0,
        });
    }

    /// Credit a complexity point to every open scope currently inside its
    /// body. Enclosing scopes accumulate nested functions' points too.
    pub fn add_complexity(&mut self, amount: u32) {
        for scope in self.open.iter_mut().filter(|s| s.in_body) {
            scope.complexity += amount;
        }
    }

    /// Credit a parameter to the innermost scope still ahead of its body.
    /// Identifiers seen inside a body are not parameters.
    pub fn add_parameter(&mut self) {
        if let Some(scope) = self.open.last_mut() {
            if !scope.in_body {
                scope.parameters += 1;
            }
        }
    }

    /// Record a body node for the innermost scope that has none yet.
    /// Nested blocks inside an already-entered body are left alone.
    pub fn enter_body(&mut self, node: Node) {
        if let Some(scope) = self.open.last_mut() {
            if scope.body_node_id.is_none() && !scope.in_body {
                scope.body_node_id = Some(node.id());
                scope.body_span = Some((node.start_position().row, node.end_position().row));
                scope.in_body = true;
            }
        }
    }

    /// Handle a node exit: leave the body when its node exits, and close
    /// the scope when the function node itself exits. `code_lines` is the
    /// set of real-code rows accumulated so far; by the time a function
    /// exits, its whole subtree has been visited, so the function's lines
    /// are all present.
    pub fn exit_node(&mut self, node: Node, code_lines: &BTreeSet<usize>) {
        let id = node.id();
        if let Some(scope) = self.open.last_mut() {
            if scope.body_node_id == Some(id) {
                scope.in_body = false;
            }
        }
        if self.open.last().is_some_and(|s| s.node_id == id) {
            if let Some(scope) = self.open.pop() {
                let (start, end) = scope.body_span.unwrap_or(scope.span);
                let rloc = code_lines.range(start..=end).count() as u32;
                self.closed.push(ClosedScope {
                    complexity: scope.complexity,
                    rloc,
                    parameters: scope.parameters,
                });
            }
        }
    }

    pub fn has_open_scopes(&self) -> bool {
        !self.open.is_empty()
    }

    /// Measurements of all closed scopes, in close order.
    pub fn closed(&self) -> &[ClosedScope] {
        &self.closed
    }
}

/// Four summary statistics over one per-function measurement series.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeriesStats {
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub median: f64,
}

impl SeriesStats {
    /// Zero functions is a defined case: every statistic is 0.0.
    pub const ZERO: SeriesStats = SeriesStats {
        min: 0.0,
        max: 0.0,
        mean: 0.0,
        median: 0.0,
    };

    /// Compute min/max/mean/median for a series. Mean is rounded to two
    /// decimals; median is the middle value, or the average of the two
    /// middle values for an even count, after ascending sort.
    pub fn compute(values: &[u32]) -> SeriesStats {
        if values.is_empty() {
            return SeriesStats::ZERO;
        }

        let mut sorted: Vec<u32> = values.to_vec();
        sorted.sort_unstable();

        let min = sorted[0] as f64;
        let max = sorted[sorted.len() - 1] as f64;
        let sum: u64 = sorted.iter().map(|&v| v as u64).sum();
        let mean = round2(sum as f64 / sorted.len() as f64);

        let mid = sorted.len() / 2;
        let median = if sorted.len() % 2 == 1 {
            sorted[mid] as f64
        } else {
            (sorted[mid - 1] as f64 + sorted[mid] as f64) / 2.0
        };

        SeriesStats {
            min,
            max,
            mean,
            median,
        }
    }
}

/// Round to two decimal places.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stats_of_empty_series_are_zero() {
        assert_eq!(SeriesStats::compute(&[]), SeriesStats::ZERO);
    }

    #[test]
    fn stats_of_single_value() {
        let stats = SeriesStats::compute(&[3]);
        assert_eq!(stats.min, 3.0);
        assert_eq!(stats.max, 3.0);
        assert_eq!(stats.mean, 3.0);
        assert_eq!(stats.median, 3.0);
    }

    #[test]
    fn mean_and_median_for_odd_count() {
        // Three functions with complexities {0, 1, 5}.
        let stats = SeriesStats::compute(&[0, 1, 5]);
        assert_eq!(stats.mean, 2.0);
        assert_eq!(stats.median, 1.0);
        assert_eq!(stats.min, 0.0);
        assert_eq!(stats.max, 5.0);
    }

    #[test]
    fn median_averages_two_middle_values_for_even_count() {
        let stats = SeriesStats::compute(&[4, 1, 3, 2]);
        assert_eq!(stats.median, 2.5);
        assert_eq!(stats.mean, 2.5);
    }

    #[test]
    fn mean_rounds_to_two_decimals() {
        let stats = SeriesStats::compute(&[1, 1, 0]);
        assert_eq!(stats.mean, 0.67);
    }

    #[test]
    fn ordering_invariants_hold() {
        let stats = SeriesStats::compute(&[7, 2, 9, 4, 4]);
        assert!(stats.min <= stats.mean && stats.mean <= stats.max);
        assert!(stats.min <= stats.median && stats.median <= stats.max);
    }
}
