use crate::triconnected::graph_internal::{EdgeType, GraphInternal};

/// Bucket-sorts each vertex's adjacency list by the edge's phi value, the
/// ordering the split-finding DFS needs to visit subtrees in non-decreasing
/// lowpoint order. `phi(tree edge to v) = 3*low1[v]` (or `+2` when the edge
/// is on a path that cannot return above `low1`), `phi(back edge to v) =
/// 3*num[v]+1`.
pub(crate) fn make_adjacency_lists_acceptable(graph: &mut GraphInternal) {
    let max_phi = 3 * graph.n + 2;

    let phi = |eid: usize, graph: &GraphInternal| -> usize {
        let (u, v) = graph.edges[eid];
        match graph.edge_type[eid] {
            Some(EdgeType::Tree) => {
                if graph.low2[v] < graph.num[u] {
                    3 * graph.low1[v] + 2
                } else {
                    3 * graph.low1[v]
                }
            }
            Some(EdgeType::Back) => 3 * graph.num[v] + 1,
            _ => unreachable!("edges must be classified Tree/Back before bucket sorting"),
        }
    };

    let mut buckets: Vec<Vec<usize>> = vec![Vec::new(); max_phi + 1];
    for eid in 0..graph.m {
        buckets[phi(eid, graph)].push(eid);
    }

    let mut new_adj = vec![Vec::new(); graph.n];
    for bucket in buckets {
        for eid in bucket {
            let (u, _) = graph.edges[eid];
            new_adj[u].push(eid);
        }
    }

    graph.adj = new_adj;
}
