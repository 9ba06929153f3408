use crate::triconnected::graph_internal::{EdgeType, GraphInternal};

/// Renumbers vertices by a DFS that always continues along the first edge
/// of each (phi-sorted) adjacency list, decomposing the tree into the
/// paths the split-finding DFS walks one at a time. Also computes, for
/// each vertex, its highpoint stack: the back edges targeting it, ordered
/// by the newnum of their source, used by `check_highpoint` to discard
/// split candidates made obsolete by a later, higher-reaching back edge.
pub(crate) fn run_pathfinder(root: usize, graph: &mut GraphInternal) {
    let n = graph.n;
    let mut newnum = vec![0usize; n];
    let mut counter = 0usize;
    assign(root, graph, &mut newnum, &mut counter);

    let mut num2newnum = vec![0usize; n];
    for v in 0..n {
        num2newnum[graph.num[v]] = newnum[v];
    }
    for v in 0..n {
        graph.numrev[newnum[v]] = v;
    }
    for v in 0..n {
        graph.low1[v] = num2newnum[graph.low1[v]];
        graph.low2[v] = num2newnum[graph.low2[v]];
        graph.num[v] = newnum[v];
    }

    for u in 0..n {
        for (i, &eid) in graph.adj[u].iter().enumerate() {
            graph.starts_path[eid] = i != 0;
        }
    }

    let mut order: Vec<usize> = (0..n).collect();
    order.sort_by_key(|&v| std::cmp::Reverse(graph.num[v]));
    for v in order {
        for &eid in graph.adj[v].clone().iter() {
            if graph.edge_type[eid] == Some(EdgeType::Back) {
                let w = graph.get_other_vertex(eid, v);
                let num_v = graph.num[v];
                graph.push_high(w, num_v);
            }
        }
    }
}

fn assign(u: usize, graph: &GraphInternal, newnum: &mut [usize], counter: &mut usize) {
    newnum[u] = *counter;
    *counter += 1;
    for &eid in &graph.adj[u] {
        if graph.edge_type[eid] == Some(EdgeType::Tree) {
            let v = graph.get_other_vertex(eid, u);
            if graph.par[v] == Some(u) {
                assign(v, graph, newnum, counter);
            }
        }
    }
}
