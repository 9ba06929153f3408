//! Decides, for two attachment vertices inside one block's auxiliary
//! graph, whether some planar embedding of the block puts both on a
//! common face.

use crate::{
    block_cut::BlockCutTree,
    oracle::BlockCache,
    spqr::{SpqrNodeType, SpqrTree, face_index::FaceIndex, is_trivial_block},
};

/// `block_linkable(a_h, b_h)`: can `a_h` and `b_h` be joined by a new
/// edge inside `b_node` without losing planarity? Memoized per block by
/// the unordered pair of block-local vertices.
pub(crate) fn block_linkable(
    bct: &BlockCutTree,
    cache: &mut BlockCache,
    b_node: usize,
    a_h: usize,
    b_h: usize,
) -> bool {
    if is_trivial_block(&bct.blocks[b_node]) {
        return true;
    }

    let a_b = match bct.rep_vertex(a_h, b_node) {
        Some(v) => v,
        None => return false,
    };
    let b_b = match bct.rep_vertex(b_h, b_node) {
        Some(v) => v,
        None => return false,
    };
    if a_b == b_b {
        return true;
    }

    let key = if a_b < b_b { (a_b, b_b) } else { (b_b, a_b) };
    if let Some(&cached) = cache.memo.entry(b_node).or_default().get(&key) {
        return cached;
    }

    cache.ensure_tree(bct, b_node);
    let result = {
        let tree = cache
            .tree(b_node)
            .expect("non-trivial block must have an SPQR tree");
        compute(tree, a_b, b_b)
    };

    cache.memo.entry(b_node).or_default().insert(key, result);
    result
}

fn compute(tree: &SpqrTree, a_b: usize, b_b: usize) -> bool {
    let a_t = match tree.repr[a_b] {
        Some(t) => t,
        None => return false,
    };
    let b_t = match tree.repr[b_b] {
        Some(t) => t,
        None => return false,
    };

    if a_t == b_t {
        return cofacial_at_node(tree, a_t, a_b, b_b);
    }

    let w = tree.index.lca(a_t, b_t);
    let a_boundary = boundary_of(tree, a_t, b_t, w, a_b);
    let b_boundary = boundary_of(tree, b_t, a_t, w, b_b);

    // One side may have walked down past where the other's path to `w`
    // turned off, so it is not enough to check for exact equality: if
    // either boundary is an ancestor of the other, the two representations
    // already share a tree node.
    if tree.index.is_ancestor(a_boundary, b_boundary) || tree.index.is_ancestor(b_boundary, a_boundary) {
        return true;
    }

    let w_prime = tree.index.lca(a_boundary, b_boundary);
    let left = propagate_mask(tree, a_boundary, w_prime, a_b);
    let right = propagate_mask(tree, b_boundary, w_prime, b_b);

    combine_at(tree, w_prime, left, right, a_b, b_b)
}

fn cofacial_at_node(tree: &SpqrTree, node: usize, a_b: usize, b_b: usize) -> bool {
    match tree.node_type(node) {
        SpqrNodeType::S | SpqrNodeType::P => true,
        SpqrNodeType::R => {
            let (la, lb) = (tree.local_vertex(node, a_b), tree.local_vertex(node, b_b));
            match (la, lb) {
                (Some(la), Some(lb)) => FaceIndex::shares_face(
                    tree.face_index(node).vertex_face_ids(la),
                    tree.face_index(node).vertex_face_ids(lb),
                ),
                _ => false,
            }
        }
    }
}

fn skeleton_edge_block_endpoints(tree: &SpqrTree, tree_edge: usize, node: usize) -> (usize, usize) {
    let (a, b) = tree.tree_edge_endpoints[tree_edge];
    let (su, sv) = if a == node {
        tree.skeleton_edge_src[tree_edge]
    } else {
        debug_assert_eq!(b, node);
        tree.skeleton_edge_tgt[tree_edge]
    };
    (tree.nodes[node].original[su], tree.nodes[node].original[sv])
}

fn face_ids_of_tree_edge_at(tree: &SpqrTree, tree_edge: usize, node: usize) -> (usize, usize) {
    let (a, b) = tree.tree_edge_endpoints[tree_edge];
    let (u, v) = if a == node {
        tree.skeleton_edge_src[tree_edge]
    } else {
        debug_assert_eq!(b, node);
        tree.skeleton_edge_tgt[tree_edge]
    };
    tree.face_index(node).edge_face_ids(u, v)
}

/// Climbs from `start` toward `w` while the incoming tree-edge's skeleton
/// edge, viewed at the parent, still has `contains_b` as an endpoint.
fn walk_up_containing(tree: &SpqrTree, start: usize, w: usize, contains_b: usize) -> usize {
    let mut cur = start;
    while cur != w {
        let pe = tree.index.parent_edge_t[cur].unwrap();
        let parent = tree.index.parent_t[cur].unwrap();
        let (pu, pv) = skeleton_edge_block_endpoints(tree, pe, parent);
        if pu == contains_b || pv == contains_b {
            cur = parent;
        } else {
            break;
        }
    }
    cur
}

/// Symmetric descent from `w` along `path_from_w` (`path_from_w[0] == w`)
/// while the edge to each next child, viewed at the child, still has
/// `contains_b` as an endpoint.
fn walk_down_containing(tree: &SpqrTree, path_from_w: &[usize], contains_b: usize) -> usize {
    let mut idx = 0;
    while idx + 1 < path_from_w.len() {
        let child = path_from_w[idx + 1];
        let pe = tree.index.parent_edge_t[child].unwrap();
        let (cu, cv) = skeleton_edge_block_endpoints(tree, pe, child);
        if cu == contains_b || cv == contains_b {
            idx += 1;
        } else {
            break;
        }
    }
    path_from_w[idx]
}

fn boundary_of(tree: &SpqrTree, start: usize, other: usize, w: usize, contains_b: usize) -> usize {
    let up = walk_up_containing(tree, start, w, contains_b);
    if up != w {
        return up;
    }

    let mut path = vec![other];
    let mut cur = other;
    while cur != w {
        cur = tree.index.parent_t[cur].unwrap();
        path.push(cur);
    }
    path.reverse();
    walk_down_containing(tree, &path, contains_b)
}

fn endpoint_mask_at(tree: &SpqrTree, node: usize, tree_edge: usize, block_vertex: usize) -> u8 {
    let (left, right) = face_ids_of_tree_edge_at(tree, tree_edge, node);
    let local = match tree.local_vertex(node, block_vertex) {
        Some(v) => v,
        None => return 0,
    };
    let vfaces = tree.face_index(node).vertex_face_ids(local);
    let mut mask = 0u8;
    if FaceIndex::contains_face_id(vfaces, left) {
        mask |= 0b01;
    }
    if FaceIndex::contains_face_id(vfaces, right) {
        mask |= 0b10;
    }
    mask
}

/// Walks from `start` up to `w_prime`, propagating the 2-bit face mask.
/// Returns the tree edge feeding into `w_prime` (`None` if `start ==
/// w_prime`) and the final mask.
fn propagate_mask(tree: &SpqrTree, start: usize, w_prime: usize, block_vertex: usize) -> (Option<usize>, u8) {
    if start == w_prime {
        return (None, 0);
    }

    let mut cur = tree.index.parent_t[start].unwrap();
    let mut incoming_edge = tree.index.parent_edge_t[start].unwrap();
    let mut mask = match tree.node_type(cur) {
        SpqrNodeType::S | SpqrNodeType::P => 0b11,
        SpqrNodeType::R => {
            let seed = endpoint_mask_at(tree, cur, incoming_edge, block_vertex);
            if seed == 0 { 0b11 } else { seed }
        }
    };

    while cur != w_prime {
        let next_node = tree.index.parent_t[cur].unwrap();
        let next_edge = tree.index.parent_edge_t[cur].unwrap();

        mask = match tree.node_type(cur) {
            SpqrNodeType::S | SpqrNodeType::P => {
                if mask != 0 {
                    0b11
                } else {
                    0
                }
            }
            SpqrNodeType::R => {
                let f_in = face_ids_of_tree_edge_at(tree, incoming_edge, cur);
                let f_out = face_ids_of_tree_edge_at(tree, next_edge, cur);
                let f_in = [f_in.0, f_in.1];
                let f_out = [f_out.0, f_out.1];
                let mut next_mask = 0u8;
                for (i, &fo) in f_out.iter().enumerate() {
                    for (j, &fi) in f_in.iter().enumerate() {
                        if (mask >> j) & 1 == 1 && fo == fi {
                            next_mask |= 1 << i;
                        }
                    }
                }
                next_mask
            }
        };

        incoming_edge = next_edge;
        cur = next_node;
    }

    (Some(incoming_edge), mask)
}

fn combine_at(
    tree: &SpqrTree,
    w_prime: usize,
    left: (Option<usize>, u8),
    right: (Option<usize>, u8),
    a_b: usize,
    b_b: usize,
) -> bool {
    let (left_edge, left_mask) = left;
    let (right_edge, right_mask) = right;

    if left_edge.is_some() && left_mask == 0 {
        return false;
    }
    if right_edge.is_some() && right_mask == 0 {
        return false;
    }

    match tree.node_type(w_prime) {
        SpqrNodeType::S | SpqrNodeType::P => true,
        SpqrNodeType::R => match (left_edge, right_edge) {
            (Some(le), Some(re)) => {
                let (l0, l1) = face_ids_of_tree_edge_at(tree, le, w_prime);
                let (r0, r1) = face_ids_of_tree_edge_at(tree, re, w_prime);
                let lfaces = [l0, l1];
                let rfaces = [r0, r1];
                let mut shares = false;
                for (i, &lf) in lfaces.iter().enumerate() {
                    if (left_mask >> i) & 1 == 0 {
                        continue;
                    }
                    for (j, &rf) in rfaces.iter().enumerate() {
                        if (right_mask >> j) & 1 == 1 && lf == rf {
                            shares = true;
                        }
                    }
                }
                shares
            }
            (Some(le), None) => endpoint_mask_at(tree, w_prime, le, b_b) != 0,
            (None, Some(re)) => endpoint_mask_at(tree, w_prime, re, a_b) != 0,
            (None, None) => cofacial_at_node(tree, w_prime, a_b, b_b),
        },
    }
}
