use crate::triconnected::graph_internal::{EdgeType, GraphInternal};

/// First DFS over the biconnected input: assigns `num` (DFS preorder),
/// `low1`/`low2` (lowest and second-lowest reachable `num`), `sub`
/// (subtree size), classifies each edge Tree/Back, and orients every edge
/// source-to-target in the direction its type implies (tree edges point
/// parent -> child, back edges point descendant -> ancestor).
pub(crate) fn run_palm_dfs(graph: &mut GraphInternal, root: usize) {
    let mut time = 0;
    dfs(graph, root, &mut time);
}

fn dfs(graph: &mut GraphInternal, u: usize, time: &mut usize) {
    graph.num[u] = *time;
    graph.low1[u] = *time;
    graph.low2[u] = *time;
    *time += 1;

    let neighbors = graph.adj[u].clone();
    for eid in neighbors {
        if graph.edge_type[eid].is_some() {
            continue;
        }

        let v = graph.get_other_vertex(eid, u);

        if graph.num[v] == usize::MAX {
            graph.edge_type[eid] = Some(EdgeType::Tree);
            graph.par[v] = Some(u);
            graph.par_edge[v] = Some(eid);
            graph.edges[eid] = (u, v);

            dfs(graph, v, time);

            graph.sub[u] += graph.sub[v];

            if graph.low1[v] < graph.low1[u] {
                graph.low2[u] = graph.low1[u].min(graph.low2[v]);
                graph.low1[u] = graph.low1[v];
            } else if graph.low1[v] == graph.low1[u] {
                graph.low2[u] = graph.low2[u].min(graph.low2[v]);
            } else {
                graph.low2[u] = graph.low2[u].min(graph.low1[v]);
            }
        } else if graph.num[v] < graph.num[u] {
            graph.edge_type[eid] = Some(EdgeType::Back);
            graph.edges[eid] = (u, v);

            if graph.num[v] < graph.low1[u] {
                graph.low2[u] = graph.low1[u];
                graph.low1[u] = graph.num[v];
            } else if graph.num[v] > graph.low1[u] {
                graph.low2[u] = graph.low2[u].min(graph.num[v]);
            }
        }
    }
}
