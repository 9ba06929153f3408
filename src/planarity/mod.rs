//! Left-right planarity testing, embedding, and minimal non-planar witness
//! extraction.
//!
//! The core algorithm is Brandes' left-right planarity test, run as three
//! DFS passes ([`orient::dfs1`], [`lr::dfs2`], [`embed::embed_graph`]'s
//! `dfs3`) over a dense internal [`structures::GraphInternal`]. Disconnected
//! inputs are handled by running all three passes once per root of the DFS
//! forest.
//!
//! Reference: [The Left-Right Planarity Test](https://acm.math.spbu.ru/~sk1/download/papers/planar//brandes2010-planarity.pdf)

mod acceptable_adj;
mod counterexample;
mod embed;
mod lr;
mod orient;
pub(crate) mod structures;

use petgraph::graph::NodeIndex;
use petgraph::visit::EdgeRef;

use crate::error::PlanarError;
use crate::types::{DiGraph, EdgeLabel, UnGraph};
use acceptable_adj::make_adjacency_lists_acceptable;
use embed::embed_graph;
use lr::dfs2;
use orient::dfs1;
use structures::{GraphInternal, LrOrientation};

/// Runs the left-right planarity test on `graph`. Returns `(true, embedding)`
/// with a rotation-system digraph if planar, `(false, counterexample)` with a
/// minimal non-planar subgraph otherwise (empty digraph if `with_counterexample`
/// is false).
pub(crate) fn is_planar(graph: &UnGraph, with_counterexample: bool) -> (bool, DiGraph) {
    let n = graph.node_count();
    let m = graph.edge_count();

    let mut g = GraphInternal::new(n, m);
    for e in graph.edge_references() {
        g.add_edge(e.source().index(), e.target().index());
    }

    let mut roots = vec![];
    for u in 0..n {
        if g.height[u] == usize::MAX {
            roots.push(u);
            g.height[u] = 0;
            dfs1(&mut g, u);
        }
    }

    make_adjacency_lists_acceptable(&mut g);

    let mut lr_stuff = LrOrientation::new(n, m);
    for &u in &roots {
        if !dfs2(&mut g, &mut lr_stuff, u) {
            if with_counterexample {
                return (false, counterexample::get_counterexample(graph.clone()));
            }
            return (false, DiGraph::new());
        }
    }

    (true, embed_graph(&mut g, &mut lr_stuff, &roots))
}

/// Tests a vertex set and candidate edge multiset for planarity, returning
/// a canonical, deduplicated minimal non-planar witness when the edges do
/// not admit a planar embedding, or an empty vector when they do.
///
/// Self-loops are ignored (they never affect planarity). Parallel edges are
/// accepted. Vertex indices in `edges` must be less than `n`.
///
/// # Errors
///
/// Returns [`PlanarError::OutOfRange`] if any edge endpoint is `>= n`.
pub fn witness(n: usize, edges: &[(usize, usize)]) -> Result<Vec<(usize, usize)>, PlanarError> {
    for &(u, v) in edges {
        if u >= n {
            return Err(PlanarError::OutOfRange { index: u, bound: n });
        }
        if v >= n {
            return Err(PlanarError::OutOfRange { index: v, bound: n });
        }
    }

    let mut graph = UnGraph::new_undirected();
    for i in 0..n {
        graph.add_node(i.try_into().unwrap());
    }
    for &(u, v) in edges {
        if u == v {
            continue;
        }
        graph.add_edge(NodeIndex::new(u), NodeIndex::new(v), EdgeLabel::Real);
    }

    let (planar, counterexample) = is_planar(&graph, true);
    if planar {
        return Ok(Vec::new());
    }

    let mut out: Vec<(usize, usize)> = counterexample
        .edge_references()
        .map(|e| {
            let (a, b) = (e.source().index(), e.target().index());
            if a <= b { (a, b) } else { (b, a) }
        })
        .collect();
    out.sort_unstable();
    out.dedup();

    Ok(out)
}
