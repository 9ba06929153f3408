//! The addability oracle: given a block-cut tree over the current graph,
//! decides whether a candidate edge can be routed through the existing
//! planar embedding without forcing a crossing.

pub(crate) mod bc_path;
pub(crate) mod block_linkable;

use hashbrown::HashMap;

use crate::{block_cut::BlockCutTree, spqr::SpqrTree};

/// Per-block SPQR trees and `block_linkable` memoization, scoped to a
/// single `recalculate` pass and discarded on the next.
#[derive(Default)]
pub(crate) struct BlockCache {
    trees: HashMap<usize, Option<SpqrTree>>,
    memo: HashMap<usize, HashMap<(usize, usize), bool>>,
}

impl BlockCache {
    pub fn new() -> Self {
        BlockCache::default()
    }

    fn ensure_tree(&mut self, bct: &BlockCutTree, b_node: usize) {
        self.trees
            .entry(b_node)
            .or_insert_with(|| crate::spqr::build_spqr_tree(&bct.blocks[b_node]));
    }

    fn tree(&self, b_node: usize) -> Option<&SpqrTree> {
        self.trees.get(&b_node).and_then(|t| t.as_ref())
    }
}

pub(crate) use bc_path::can_add;
