//! SPQR tree assembly for a single biconnected block: split components
//! from [`crate::triconnected`] become tree nodes, tree edges connect
//! components sharing a virtual edge, and each R-node gets a planar
//! embedding and face index.

pub(crate) mod embedding;
pub(crate) mod face_index;
pub(crate) mod tree_index;

use hashbrown::HashMap;
use petgraph::graph::NodeIndex;
use petgraph::visit::EdgeRef;

use crate::{
    spqr::{face_index::FaceIndex, tree_index::TreeIndex},
    triconnected::{get_triconnected_components, outside_structures::ComponentType},
    types::{EdgeLabel, UnGraph},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SpqrNodeType {
    S,
    P,
    R,
}

/// A single SPQR-tree node: its skeleton graph (compactly indexed), the
/// block vertex each skeleton vertex stands for, and (for R-nodes) a
/// planar embedding and face index.
pub(crate) struct SpqrNode {
    pub node_type: SpqrNodeType,
    pub skeleton: UnGraph,
    pub original: Vec<usize>,
    pub block_to_skel: HashMap<usize, usize>,
    pub face_index: Option<FaceIndex>,
}

/// The SPQR tree of one biconnected block. Built fresh whenever the
/// oracle touches that block; never mutated thereafter.
pub(crate) struct SpqrTree {
    pub nodes: Vec<SpqrNode>,
    pub adj: Vec<Vec<(usize, usize)>>,
    pub tree_edge_endpoints: Vec<(usize, usize)>,
    pub skeleton_edge_src: Vec<(usize, usize)>,
    pub skeleton_edge_tgt: Vec<(usize, usize)>,
    /// Block vertex -> an arbitrary SPQR node whose skeleton contains it.
    pub repr: Vec<Option<usize>>,
    pub root: usize,
    pub index: TreeIndex,
}

impl SpqrTree {
    pub fn node_type(&self, v_t: usize) -> SpqrNodeType {
        self.nodes[v_t].node_type
    }

    pub fn root_node(&self) -> usize {
        self.root
    }

    pub fn face_index(&self, v_t: usize) -> &FaceIndex {
        self.nodes[v_t]
            .face_index
            .as_ref()
            .expect("face_index only available for R-nodes")
    }

    /// The skeleton-local vertex standing for block vertex `b` at node
    /// `v_t`, if `v_t`'s skeleton contains it.
    pub fn local_vertex(&self, v_t: usize, b: usize) -> Option<usize> {
        self.nodes[v_t].block_to_skel.get(&b).copied()
    }
}

/// Whether a block is too small to need an SPQR tree: any two vertices in
/// it are trivially cofacial.
pub(crate) fn is_trivial_block(block: &UnGraph) -> bool {
    let n = block.node_count();
    n < 2 || (n == 2 && block.edge_count() < 3)
}

/// Builds the SPQR tree of `block`, or `None` if the block is trivial.
pub(crate) fn build_spqr_tree(block: &UnGraph) -> Option<SpqrTree> {
    if is_trivial_block(block) {
        return None;
    }

    let tricon = get_triconnected_components(block);
    let num_nodes = tricon.comp.len();
    debug_assert!(num_nodes > 0, "a non-trivial block must split into at least one component");

    let mut nodes = Vec::with_capacity(num_nodes);
    let mut tricon_edge_to_skel: Vec<HashMap<usize, (usize, usize)>> = Vec::with_capacity(num_nodes);

    for comp in &tricon.comp {
        let mut verts: Vec<usize> = Vec::new();
        let mut seen: HashMap<usize, ()> = HashMap::new();
        for &eid in &comp.edges {
            let (u, v) = tricon.edges[eid];
            for x in [u, v] {
                if seen.insert(x, ()).is_none() {
                    verts.push(x);
                }
            }
        }
        verts.sort_unstable();

        let mut block_to_skel = HashMap::new();
        let mut skeleton = UnGraph::new_undirected();
        for (i, &bv) in verts.iter().enumerate() {
            skeleton.add_node(bv.try_into().unwrap());
            block_to_skel.insert(bv, i);
        }

        let mut edge_map = HashMap::new();
        for &eid in &comp.edges {
            let (u, v) = tricon.edges[eid];
            let (su, sv) = (block_to_skel[&u], block_to_skel[&v]);
            skeleton.add_edge(NodeIndex::new(su), NodeIndex::new(sv), EdgeLabel::Real);
            edge_map.insert(eid, (su, sv));
        }

        let node_type = match comp.comp_type {
            ComponentType::P => SpqrNodeType::P,
            ComponentType::S => SpqrNodeType::S,
            ComponentType::R => SpqrNodeType::R,
            ComponentType::Unsure => {
                unreachable!("split components are resolved before the tree is assembled")
            }
        };

        let face_index = matches!(node_type, SpqrNodeType::R).then(|| FaceIndex::build(&skeleton));

        nodes.push(SpqrNode {
            node_type,
            original: verts,
            skeleton,
            block_to_skel,
            face_index,
        });
        tricon_edge_to_skel.push(edge_map);
    }

    let mut edge_to_nodes: Vec<Vec<usize>> = vec![Vec::new(); tricon.edges.len()];
    for (i, comp) in tricon.comp.iter().enumerate() {
        for &eid in &comp.edges {
            edge_to_nodes[eid].push(i);
        }
    }

    let mut adj = vec![Vec::new(); num_nodes];
    let mut tree_edge_endpoints = Vec::new();
    let mut skeleton_edge_src = Vec::new();
    let mut skeleton_edge_tgt = Vec::new();

    for (eid, owners) in edge_to_nodes.iter().enumerate() {
        if owners.len() != 2 {
            continue;
        }
        let (a, b) = (owners[0], owners[1]);
        let tree_eid = tree_edge_endpoints.len();
        tree_edge_endpoints.push((a, b));
        skeleton_edge_src.push(tricon_edge_to_skel[a][&eid]);
        skeleton_edge_tgt.push(tricon_edge_to_skel[b][&eid]);
        adj[a].push((b, tree_eid));
        adj[b].push((a, tree_eid));
    }

    let mut repr = vec![None; block.node_count()];
    for (i, node) in nodes.iter().enumerate() {
        for &bv in node.block_to_skel.keys() {
            repr[bv].get_or_insert(i);
        }
    }

    let root = 0;
    let index = TreeIndex::build(num_nodes, &adj, root);

    Some(SpqrTree {
        nodes,
        adj,
        tree_edge_endpoints,
        skeleton_edge_src,
        skeleton_edge_tgt,
        repr,
        root,
        index,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::EdgeLabel;

    fn cycle(n: usize) -> UnGraph {
        let mut g = UnGraph::new_undirected();
        let vs: Vec<_> = (0..n).map(|i| g.add_node(i.try_into().unwrap())).collect();
        for i in 0..n {
            g.add_edge(vs[i], vs[(i + 1) % n], EdgeLabel::Real);
        }
        g
    }

    #[test]
    fn trivial_block_has_no_spqr_tree() {
        let mut g = UnGraph::new_undirected();
        let a = g.add_node(0);
        let b = g.add_node(1);
        g.add_edge(a, b, EdgeLabel::Real);
        assert!(build_spqr_tree(&g).is_none());
    }

    #[test]
    fn parallel_edges_form_a_single_p_node() {
        let mut g = UnGraph::new_undirected();
        let a = g.add_node(0);
        let b = g.add_node(1);
        g.add_edge(a, b, EdgeLabel::Real);
        g.add_edge(a, b, EdgeLabel::Real);
        g.add_edge(a, b, EdgeLabel::Real);

        let tree = build_spqr_tree(&g).unwrap();
        assert_eq!(tree.nodes.len(), 1);
        assert_eq!(tree.node_type(0), SpqrNodeType::P);
    }

    #[test]
    fn cycle_forms_a_single_s_node() {
        let g = cycle(5);
        let tree = build_spqr_tree(&g).unwrap();
        assert_eq!(tree.nodes.len(), 1);
        assert_eq!(tree.node_type(0), SpqrNodeType::S);
    }

    #[test]
    fn k4_forms_a_single_r_node_with_faces() {
        let mut g = UnGraph::new_undirected();
        let vs: Vec<_> = (0..4).map(|i| g.add_node(i)).collect();
        for i in 0..4 {
            for j in (i + 1)..4 {
                g.add_edge(vs[i], vs[j], EdgeLabel::Real);
            }
        }

        let tree = build_spqr_tree(&g).unwrap();
        assert_eq!(tree.nodes.len(), 1);
        assert_eq!(tree.node_type(0), SpqrNodeType::R);
        let fi = tree.face_index(0);
        // K4 is planar with 4 triangular faces.
        assert_eq!(fi.vertex_face_ids(0).len(), 3);
    }
}
