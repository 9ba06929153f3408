use crate::triconnected::graph_internal::GraphInternal;
use crate::triconnected::outside_structures::{Component, ComponentType};

/// Removes self-loops and collapses each group of parallel edges between
/// the same pair of vertices into a single P component plus one surviving
/// virtual edge, so the rest of the pipeline can assume simplicity.
///
/// Uses a stable two-pass bucket sort (by max endpoint, then by min
/// endpoint) to group parallel edges together without a general-purpose
/// sort.
pub(crate) fn handle_duplicate_edges(graph: &mut GraphInternal, split_components: &mut Vec<Component>) {
    let m = graph.m;
    let n = graph.n;

    let mut order: Vec<usize> = (0..m).collect();

    let mut by_max: Vec<Vec<usize>> = vec![Vec::new(); n];
    for &eid in &order {
        let (u, v) = graph.edges[eid];
        by_max[u.max(v)].push(eid);
    }
    order = by_max.into_iter().flatten().collect();

    let mut by_min: Vec<Vec<usize>> = vec![Vec::new(); n];
    for &eid in &order {
        let (u, v) = graph.edges[eid];
        by_min[u.min(v)].push(eid);
    }
    order = by_min.into_iter().flatten().collect();

    let mut i = 0;
    while i < order.len() {
        let eid = order[i];
        let (u, v) = graph.edges[eid];

        if u == v {
            graph.remove_edge(eid);
            i += 1;
            continue;
        }

        let key = (u.min(v), u.max(v));
        let mut j = i + 1;
        while j < order.len() {
            let (u2, v2) = graph.edges[order[j]];
            if (u2.min(v2), u2.max(v2)) != key {
                break;
            }
            j += 1;
        }

        if j - i > 1 {
            let mut component = Component::new(ComponentType::P);
            for &ge in &order[i..j] {
                component.push_edge(ge, graph, false);
                graph.remove_edge(ge);
            }
            let evirt = graph.new_edge(u, v, None);
            component.push_edge(evirt, graph, true);
            component.commit(split_components);
        }

        i = j;
    }
}
