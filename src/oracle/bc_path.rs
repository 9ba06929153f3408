//! Block-cut-tree path walk: decides whether two vertices of the whole
//! graph can be joined by a new edge anywhere along the blocks between
//! them without losing planarity.

use crate::{
    block_cut::{BCNodeKind, BlockCutTree},
    oracle::{BlockCache, block_linkable::block_linkable},
};

/// `can_add(u, v)`: true unless some block on the path between `u` and
/// `v` in the block-cut tree refuses to route the new edge.
pub(crate) fn can_add(bct: &BlockCutTree, cache: &mut BlockCache, u: usize, v: usize) -> bool {
    if u == v {
        return true;
    }

    let u_b = bct.bc_node(u);
    let v_b = bct.bc_node(v);

    let w_bc = match bct.nca(u_b, v_b) {
        Some(w) => w,
        None => return true,
    };

    if !walk_side(bct, cache, u_b, w_bc, u) {
        return false;
    }
    if !walk_side(bct, cache, v_b, w_bc, v) {
        return false;
    }

    if bct.kind(w_bc) == BCNodeKind::Block {
        let u_attach = attachment_at(bct, u_b, w_bc, u);
        let v_attach = attachment_at(bct, v_b, w_bc, v);
        if !block_linkable(bct, cache, w_bc, u_attach, v_attach) {
            return false;
        }
    }

    true
}

/// Walks the branch from `start` up to (but not including) `w_bc`,
/// running `block_linkable` on every B-node encountered.
fn walk_side(bct: &BlockCutTree, cache: &mut BlockCache, start: usize, w_bc: usize, orig_vertex: usize) -> bool {
    if start == w_bc {
        return true;
    }

    let mut path = vec![start];
    let mut cur = start;
    while cur != w_bc {
        cur = bct.parent(cur).expect("w_bc must be an ancestor of start");
        path.push(cur);
    }

    for i in 0..path.len() - 1 {
        let node = path[i];
        if bct.kind(node) != BCNodeKind::Block {
            continue;
        }

        let downward = if i == 0 {
            orig_vertex
        } else {
            bct.cut_vertex(path[i - 1], node)
        };
        let upward = bct.cut_vertex(path[i + 1], node);

        if !block_linkable(bct, cache, node, downward, upward) {
            return false;
        }
    }

    true
}

fn node_just_below(bct: &BlockCutTree, start: usize, w_bc: usize) -> Option<usize> {
    if start == w_bc {
        return None;
    }
    let mut cur = start;
    loop {
        let parent = bct.parent(cur).expect("w_bc must be an ancestor of start");
        if parent == w_bc {
            return Some(cur);
        }
        cur = parent;
    }
}

fn attachment_at(bct: &BlockCutTree, start: usize, w_bc: usize, orig_vertex: usize) -> usize {
    match node_just_below(bct, start, w_bc) {
        None => orig_vertex,
        Some(child) => bct.cut_vertex(child, w_bc),
    }
}
