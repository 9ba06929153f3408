//! Hopcroft-Tarjan split-component (triconnected-component) finder.
//!
//! Reference: Hopcroft, J., & Tarjan, R. (1973). "Dividing a Graph into
//! Triconnected Components." SIAM Journal on Computing, 2(3), 135-158.

pub(crate) mod acceptable_adj;
pub(crate) mod graph_internal;
pub(crate) mod handle_duplicate_edges;
pub(crate) mod merge_components;
pub(crate) mod outside_structures;
pub(crate) mod palm_dfs;
pub(crate) mod pathfinder;

use hashbrown::HashMap;
use petgraph::visit::EdgeRef;

use crate::{
    UnGraph,
    block_cut::get_block_cut_tree,
    triconnected::{
        acceptable_adj::make_adjacency_lists_acceptable,
        graph_internal::{EdgeType, GraphInternal},
        handle_duplicate_edges::handle_duplicate_edges,
        merge_components::merge_components,
        outside_structures::{Component, ComponentType, TriconnectedComponents},
        palm_dfs::run_palm_dfs,
        pathfinder::run_pathfinder,
    },
};

fn find_components(
    root: usize,
    u: usize,
    vedges_cutoff: usize,
    graph: &mut GraphInternal,
    estack: &mut Vec<usize>,
    tstack: &mut Vec<(usize, usize, usize)>,
    split_components: &mut Vec<Component>,
) {
    fn update_tstack(
        u: usize,
        to: usize,
        eid: usize,
        tstack: &mut Vec<(usize, usize, usize)>,
        graph: &GraphInternal,
    ) {
        fn pop_tstack(
            cutoff: usize,
            mut max_h: usize,
            mut last_b: usize,
            tstack: &mut Vec<(usize, usize, usize)>,
        ) -> (usize, usize, usize) {
            while let Some(&(h, a, b)) = tstack.last() {
                if a > cutoff {
                    tstack.pop();
                    max_h = h.max(max_h);
                    last_b = b;
                } else {
                    break;
                }
            }
            (max_h, cutoff, last_b)
        }

        let (max_h, a, last_b) = if graph.edge_type[eid] == Some(EdgeType::Tree) {
            pop_tstack(
                graph.low1[to],
                graph.num[to] + graph.sub[to] - 1,
                graph.num[u],
                tstack,
            )
        } else {
            pop_tstack(graph.num[to], graph.num[u], graph.num[u], tstack)
        };

        tstack.push((max_h, a, last_b));
    }

    fn check_highpoint(u: usize, tstack: &mut Vec<(usize, usize, usize)>, graph: &GraphInternal) {
        let u_high = graph.get_high(u);

        while let Some(&(h, a, b)) = tstack.last() {
            if a != graph.num[u] && b != graph.num[u] && u_high > h {
                tstack.pop();
            } else {
                break;
            }
        }
    }

    fn check_type_2(
        root: usize,
        u: usize,
        mut to: usize,
        tstack: &mut Vec<(usize, usize, usize)>,
        estack: &mut Vec<usize>,
        graph: &mut GraphInternal,
        split_components: &mut Vec<Component>,
    ) {
        if graph.num[u] == root {
            return;
        }

        loop {
            let (h, a, b) = if let Some(&last) = tstack.last() {
                last
            } else {
                (0, usize::MAX, 0)
            };

            let cond_1 = a == graph.num[u];
            let cond_2 = graph.deg[to] == 2
                && graph.num[graph.first_alive(root, to).unwrap()] > graph.num[to];

            if !(cond_1 || cond_2) {
                break;
            }
            if a == graph.num[u] && graph.par[graph.numrev[b]] == Some(u) {
                tstack.pop();
                continue;
            }

            let mut eab = None;
            let evirt;
            if cond_2 {
                to = graph.first_alive(root, to).unwrap();

                let mut component = Component::new(ComponentType::S);
                for _ in 0..2 {
                    let eid = estack.pop().unwrap();
                    component.push_edge(eid, graph, false);
                }

                let v = graph.new_edge(u, to, None);
                component.push_edge(v, graph, true);
                component.commit(split_components);
                evirt = v;

                if let Some(&eid) = estack.last() {
                    if graph.edges[eid] == (to, u) {
                        estack.pop();
                        eab = Some(eid);
                    }
                }
            } else {
                to = graph.numrev[b];
                tstack.pop();

                let mut component = Component::new(ComponentType::Unsure);
                loop {
                    if let Some(&eid) = estack.last() {
                        let (x, y) = graph.edges[eid];
                        let x_in_subtree = graph.num[u] <= graph.num[x] && graph.num[x] <= h;
                        let y_in_subtree = graph.num[u] <= graph.num[y] && graph.num[y] <= h;
                        if !(x_in_subtree && y_in_subtree) {
                            break;
                        }

                        estack.pop();

                        if (x == u && y == to) || (y == u && x == to) {
                            eab = Some(eid);
                        } else {
                            component.push_edge(eid, graph, false);
                        }
                    } else {
                        break;
                    }
                }

                let v = graph.new_edge(u, to, None);
                component.push_edge(v, graph, true);
                component.commit(split_components);
                evirt = v;
            }

            if let Some(eab) = eab {
                let mut component = Component::new(ComponentType::P);
                component.push_edge(eab, graph, false);
                component.push_edge(evirt, graph, false);

                let v = graph.new_edge(u, to, None);
                component.push_edge(v, graph, true);
                component.commit(split_components);

                estack.push(v);
                graph.make_tedge(v);
            } else {
                estack.push(evirt);
                graph.make_tedge(evirt);
            }
        }
    }

    fn check_type_1(
        root: usize,
        u: usize,
        to: usize,
        estack: &mut Vec<usize>,
        graph: &mut GraphInternal,
        split_components: &mut Vec<Component>,
        t_edges_left: usize,
    ) {
        if graph.low2[to] >= graph.num[u]
            && graph.low1[to] < graph.num[u]
            && (Some(root) != graph.par[u] || t_edges_left != 0)
        {
            let mut component = Component::new(ComponentType::Unsure);
            while let Some(&eid) = estack.last() {
                let (x, y) = graph.edges[eid];
                let x_in_subtree =
                    graph.num[to] <= graph.num[x] && graph.num[x] < graph.num[to] + graph.sub[to];
                let y_in_subtree =
                    graph.num[to] <= graph.num[y] && graph.num[y] < graph.num[to] + graph.sub[to];

                if !(x_in_subtree || y_in_subtree) {
                    break;
                }

                estack.pop();
                component.push_edge(eid, graph, true);
                graph.remove_edge(eid);
            }

            let low1_vertex = graph.numrev[graph.low1[to]];
            let mut evirt = graph.new_edge(u, low1_vertex, None);
            component.push_edge(evirt, graph, true);
            component.commit(split_components);

            if let Some(&eid) = estack.last() {
                let (x, y) = graph.edges[eid];
                if (x == u && y == low1_vertex) || (y == u && x == low1_vertex) {
                    estack.pop();

                    let mut component = Component::new(ComponentType::P);
                    component.push_edge(eid, graph, false);
                    component.push_edge(evirt, graph, false);

                    evirt = graph.new_edge(u, low1_vertex, None);
                    component.push_edge(evirt, graph, true);
                    component.commit(split_components);
                }
            }

            if Some(low1_vertex) != graph.par[u] {
                estack.push(evirt);
                graph.make_bedge(evirt);
            } else {
                let parent_edge = graph.par_edge[u].unwrap();

                let mut component = Component::new(ComponentType::P);
                component.push_edge(parent_edge, graph, false);
                component.push_edge(evirt, graph, false);

                let new_parent_edge = graph.new_edge(graph.par[u].unwrap(), u, None);
                component.push_edge(new_parent_edge, graph, true);
                component.commit(split_components);

                graph.make_tedge(new_parent_edge);
                graph.par_edge[u] = Some(new_parent_edge);
            }
        }
    }

    let mut adjacent_tedges = graph.adj[u]
        .iter()
        .filter(|&&eid| graph.edge_type[eid] == Some(EdgeType::Tree))
        .count();

    let mut i = 0;
    while i < graph.adj[u].len() {
        let eid = graph.adj[u][i];
        if eid >= vedges_cutoff {
            break;
        }

        let to = graph.get_other_vertex(eid, u);
        if graph.starts_path[eid] {
            update_tstack(u, to, eid, tstack, graph);
        }

        if graph.edge_type[eid] == Some(EdgeType::Tree) {
            let mut new_tstack = vec![];
            find_components(
                root,
                to,
                vedges_cutoff,
                graph,
                estack,
                if graph.starts_path[eid] {
                    &mut new_tstack
                } else {
                    tstack
                },
                split_components,
            );
            adjacent_tedges -= 1;

            let push_eid = graph.par_edge[to].unwrap();
            estack.push(push_eid);

            check_type_2(
                root,
                u,
                to,
                if graph.starts_path[eid] {
                    &mut new_tstack
                } else {
                    tstack
                },
                estack,
                graph,
                split_components,
            );
            check_type_1(
                root,
                u,
                to,
                estack,
                graph,
                split_components,
                adjacent_tedges,
            );

            check_highpoint(u, tstack, graph);
        } else {
            estack.push(eid);
        }

        i += 1;
    }
}

/// Computes the split components (triconnected components) of a
/// biconnected, loopless undirected graph.
///
/// A pair of vertices `(s, t)` is a *split-pair* if removing both
/// disconnects the graph, or if there are multiple edges directly between
/// them. Splitting the graph on every split-pair and re-gluing each
/// resulting piece with a virtual `(s, t)` edge yields, after merging
/// adjacent same-type pieces, the classic P (triple-or-more parallel
/// edges), S (cycle), and R (rigid/triconnected) components.
pub(crate) fn get_triconnected_components(in_graph: &UnGraph) -> TriconnectedComponents {
    let n = in_graph.node_count();
    let m = in_graph.edge_count();
    let root = 0;

    let mut split_components = Vec::new();

    debug_assert!(get_block_cut_tree(in_graph).block_count == 1);
    debug_assert!(n >= 2);

    if n == 2 {
        let mut c = Component::new(ComponentType::P);
        let mut edges = Vec::new();
        let mut scratch = GraphInternal::new(0, 0);
        for e in in_graph.edge_references() {
            let (s, t) = (e.source().index(), e.target().index());
            edges.push((s, t));
            c.push_edge(e.id().index(), &mut scratch, true);
        }

        if m >= 3 {
            return TriconnectedComponents {
                comp: vec![c],
                edges,
                is_real: vec![true; m],
                to_split: vec![Some(0); m],
            };
        }
        return TriconnectedComponents {
            comp: vec![],
            edges,
            is_real: vec![true; m],
            to_split: vec![None; m],
        };
    }

    let mut graph = GraphInternal::from_petgraph(in_graph);

    handle_duplicate_edges(&mut graph, &mut split_components);
    run_palm_dfs(&mut graph, root);
    make_adjacency_lists_acceptable(&mut graph);
    run_pathfinder(root, &mut graph);

    let mut estack = Vec::new();
    let mut tstack = Vec::new();
    find_components(
        root,
        root,
        graph.m,
        &mut graph,
        &mut estack,
        &mut tstack,
        &mut split_components,
    );

    let mut component = Component::new(ComponentType::Unsure);
    while let Some(eid) = estack.pop() {
        component.push_edge(eid, &mut graph, false);
    }
    component.commit(&mut split_components);

    merge_components(graph.m, &mut split_components);

    let mut is_real_edge = vec![false; graph.m];
    let mut real_to_split_component = vec![None; graph.m];
    let mut edges_occs = vec![0; graph.m];

    for (i, c) in split_components.iter().enumerate() {
        for &eid in &c.edges {
            edges_occs[eid] += 1;
            is_real_edge[eid] = true;
            real_to_split_component[eid] = Some(i);

            if edges_occs[eid] > 1 {
                is_real_edge[eid] = false;
                real_to_split_component[eid] = None;
            }
        }
    }

    let mut pair_to_indices: HashMap<(usize, usize), Vec<usize>> = HashMap::new();
    let mut vedges = Vec::new();
    for (eid, &(s, t)) in graph.edges.iter().enumerate() {
        let (s, t) = if s < t { (s, t) } else { (t, s) };
        if is_real_edge[eid] {
            pair_to_indices.entry((s, t)).or_default().push(eid);
        } else if edges_occs[eid] != 0 {
            vedges.push(eid);
        }
    }

    let mut new_edges = Vec::with_capacity(graph.m);
    let mut old_eid_to_new = vec![0; graph.m];
    for e in in_graph.edge_references() {
        let (mut s, mut t) = (e.source().index(), e.target().index());
        if s > t {
            std::mem::swap(&mut s, &mut t);
        }
        let take = pair_to_indices.get_mut(&(s, t)).unwrap().pop().unwrap();
        old_eid_to_new[take] = e.id().index();
        new_edges.push((s, t));
    }

    for &eid in &vedges {
        let (s, t) = graph.edges[eid];
        old_eid_to_new[eid] = new_edges.len();
        new_edges.push((s, t));
    }

    for c in &mut split_components {
        for edge in &mut c.edges {
            *edge = old_eid_to_new[*edge];
        }
    }

    let mut new_is_real_edge = vec![false; new_edges.len()];
    let mut new_real_to_split_component = vec![None; new_edges.len()];
    for i in 0..graph.m {
        if edges_occs[i] == 1 {
            new_is_real_edge[old_eid_to_new[i]] = is_real_edge[i];
            new_real_to_split_component[old_eid_to_new[i]] = real_to_split_component[i];
        }
    }

    TriconnectedComponents {
        comp: split_components,
        edges: new_edges,
        is_real: new_is_real_edge,
        to_split: new_real_to_split_component,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::EdgeLabel;
    use rand::Rng;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use petgraph::visit::IntoNodeReferences;

    /// A random biconnected graph: a random Hamiltonian cycle on `n`
    /// vertices (guaranteeing biconnectivity) plus up to `m - n` extra
    /// random chords.
    fn random_biconnected_graph(n: usize, m: usize, seed: u64) -> UnGraph {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut order: Vec<usize> = (0..n).collect();
        for i in (1..n).rev() {
            let j = rng.random_range(0..=i);
            order.swap(i, j);
        }

        let mut g = UnGraph::new_undirected();
        for i in 0..n {
            g.add_node(i.try_into().unwrap());
        }
        for i in 0..n {
            let a = order[i];
            let b = order[(i + 1) % n];
            g.add_edge(
                petgraph::graph::NodeIndex::new(a),
                petgraph::graph::NodeIndex::new(b),
                EdgeLabel::Real,
            );
        }

        let extra = m.saturating_sub(n);
        for _ in 0..extra {
            let u = rng.random_range(0..n);
            let v = rng.random_range(0..n);
            if u != v {
                g.add_edge(
                    petgraph::graph::NodeIndex::new(u),
                    petgraph::graph::NodeIndex::new(v),
                    EdgeLabel::Real,
                );
            }
        }
        g
    }

    fn verify_components(split_components: &[Component], edges: &[(usize, usize)]) {
        let m = edges.len();
        let mut edges_occs = vec![0; m];

        for c in split_components {
            for &eid in &c.edges {
                edges_occs[eid] += 1;
            }

            let mut nodes = Vec::new();
            for &eid in &c.edges {
                let (s, t) = edges[eid];
                nodes.push(s);
                nodes.push(t);
            }
            nodes.sort_unstable();
            nodes.dedup();

            match c.comp_type {
                ComponentType::P => assert_eq!(nodes.len(), 2),
                ComponentType::S => {
                    assert!(nodes.len() >= 3);
                    assert_eq!(c.edges.len(), nodes.len());
                }
                ComponentType::R => assert!(nodes.len() >= 4),
                ComponentType::Unsure => panic!("component left unresolved after commit"),
            }
        }

        assert!(edges_occs.iter().all(|&c| c <= 2));
    }

    #[test]
    fn test_triconnected_components_light() {
        for i in 0..30u64 {
            let n = 4 + (i as usize) / 5;
            let m = n + 2 + (i as usize) % 5;

            let in_graph = random_biconnected_graph(n, m, i);
            if get_block_cut_tree(&in_graph).block_count != 1 {
                continue;
            }

            let tricon = get_triconnected_components(&in_graph);
            verify_components(&tricon.comp, &tricon.edges);
            assert_eq!(in_graph.node_references().count(), n);
        }
    }

    #[test]
    fn test_triconnected_p_node_parallel_edges() {
        let mut g = UnGraph::new_undirected();
        let a = g.add_node(0);
        let b = g.add_node(1);
        g.add_edge(a, b, EdgeLabel::Real);
        g.add_edge(a, b, EdgeLabel::Real);
        g.add_edge(a, b, EdgeLabel::Real);

        let tricon = get_triconnected_components(&g);
        assert_eq!(tricon.comp.len(), 1);
        assert_eq!(tricon.comp[0].comp_type, ComponentType::P);
    }

    #[test]
    fn test_triconnected_s_node_cycle() {
        let mut g = UnGraph::new_undirected();
        let a = g.add_node(0);
        let b = g.add_node(1);
        let c = g.add_node(2);
        let d = g.add_node(3);
        g.add_edge(a, b, EdgeLabel::Real);
        g.add_edge(b, c, EdgeLabel::Real);
        g.add_edge(c, d, EdgeLabel::Real);
        g.add_edge(d, a, EdgeLabel::Real);

        let tricon = get_triconnected_components(&g);
        verify_components(&tricon.comp, &tricon.edges);
        assert!(tricon.comp.iter().any(|c| c.comp_type == ComponentType::S));
    }
}
