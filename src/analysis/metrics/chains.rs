//! Message chain detection.
//!
//! Member-access and call nodes linked by direct receiver/operand
//! relationships form a chain; chained nodes nest in the tree, so during
//! a pre-order walk a maximal chain arrives as an unbroken run of chain
//! nodes whose parents are chain nodes too. A chain with at least
//! [`CHAIN_LINK_THRESHOLD`] links counts exactly once, no matter how much
//! longer it runs.

use tree_sitter::Node;

use crate::analysis::compile::MetricIndex;

/// Minimum links (member accesses + calls) before a chain is recorded.
pub const CHAIN_LINK_THRESHOLD: u32 = 4;

/// Walk-local chain state.
#[derive(Debug, Default)]
pub struct ChainTracker {
    links: u32,
    counted: bool,
}

impl ChainTracker {
    /// Feed the next visited node; returns 1 the moment a chain reaches
    /// the threshold, 0 otherwise.
    pub fn on_enter(&mut self, node: Node, node_type: &str, index: &MetricIndex) -> u32 {
        if !index.is_chain_node(node_type) {
            self.reset();
            return 0;
        }

        // A chain node whose parent is not part of a chain starts a new
        // maximal chain.
        let parent_is_chain = node
            .parent()
            .is_some_and(|p| index.is_chain_node(p.kind()));
        if !parent_is_chain {
            self.reset();
        }

        self.links += 1;
        if self.links >= CHAIN_LINK_THRESHOLD && !self.counted {
            self.counted = true;
            return 1;
        }
        0
    }

    fn reset(&mut self) {
        self.links = 0;
        self.counted = false;
    }
}
