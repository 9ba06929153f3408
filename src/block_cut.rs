//! Block-cut tree construction and query API.
//!
//! Decomposes a graph into biconnected components ("blocks") and cut
//! vertices via a single Tarjan-Hopcroft DFS, then exposes the bipartite
//! block/cut-vertex tree with the lookups the BC-path walk needs:
//! `bc_node`, `parent`, `nca`, `type`, `cut_vertex`, `rep_vertex`, `h_edges`.
//!
//! Disconnected inputs are handled: each connected component gets its own
//! tree, together forming a forest (multiple roots, `parent(root) == None`).

use crate::{DFSEdgeLabel, EdgeLabel, UnGraph};
use hashbrown::HashMap;
use petgraph::graph::{EdgeIndex, NodeIndex};
use petgraph::visit::{EdgeRef, NodeIndexable};

/// The two kinds of node in a block-cut tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BCNodeKind {
    Block,
    Cut,
}

const LCA_LEVELS: usize = 20;

/// The block-cut tree (forest, for disconnected inputs) of a graph.
#[derive(Debug, Clone)]
pub struct BlockCutTree {
    /// Number of blocks in the graph.
    pub block_count: usize,
    /// Number of cut vertices in the graph.
    pub cut_count: usize,
    /// Blocks of the graph, as their own local vertex-indexed subgraphs.
    pub blocks: Vec<UnGraph>,
    /// Bipartite tree/forest of blocks (`0..block_count`) and cut vertices
    /// (`block_count..block_count+cut_count`).
    pub graph: UnGraph,
    /// Maps an original-graph vertex to the BC node that *properly contains*
    /// it: its own cut node if it is a cut vertex, else its unique block.
    pub node_to_id: Vec<usize>,
    /// DFS edge classification, indexed by original-graph edge id.
    pub edge_labels: Vec<DFSEdgeLabel>,
    /// DFS preorder number, indexed by original-graph vertex.
    pub preorder: Vec<usize>,

    /// Per block, the original-graph vertex each local vertex came from.
    block_original: Vec<Vec<usize>>,
    /// Per block, the inverse of `block_original`: original vertex -> local index.
    rep_vertex_table: Vec<HashMap<usize, usize>>,
    /// Original-graph vertex carried by each cut node (indexed by `cut_id`,
    /// i.e. `graph` node index minus `block_count`).
    cut_vertex_of: Vec<usize>,

    parent: Vec<Option<usize>>,
    depth: Vec<usize>,
    up: Vec<Vec<usize>>,
    tin: Vec<usize>,
    tout: Vec<usize>,
}

impl BlockCutTree {
    /// The B- or C-node properly containing `v`.
    pub fn bc_node(&self, v: usize) -> usize {
        self.node_to_id[v]
    }

    /// Tree parent of BC node `x`, or `None` at a forest root.
    pub fn parent(&self, x: usize) -> Option<usize> {
        self.parent[x]
    }

    /// Whether `x` is B or C.
    pub fn kind(&self, x: usize) -> BCNodeKind {
        if x < self.block_count {
            BCNodeKind::Block
        } else {
            BCNodeKind::Cut
        }
    }

    /// Nearest common ancestor of `x` and `y` in the rooted BC tree. `None`
    /// if they lie in different components of the underlying forest.
    pub fn nca(&self, mut x: usize, mut y: usize) -> Option<usize> {
        if self.tin[x] == usize::MAX || self.tin[y] == usize::MAX {
            return None;
        }
        if self.find_root(x) != self.find_root(y) {
            return None;
        }
        if self.depth[x] < self.depth[y] {
            std::mem::swap(&mut x, &mut y);
        }
        let diff = self.depth[x] - self.depth[y];
        x = self.kth_ancestor(x, diff);
        if x == y {
            return Some(x);
        }
        for level in (0..LCA_LEVELS).rev() {
            if self.up[level][x] != self.up[level][y] {
                x = self.up[level][x];
                y = self.up[level][y];
            }
        }
        self.parent[x]
    }

    /// The `k`-th ancestor of `x` via the binary-lifting table.
    pub fn kth_ancestor(&self, mut x: usize, mut k: usize) -> usize {
        let mut level = 0;
        while k > 0 {
            if k & 1 == 1 {
                x = self.up[level][x];
            }
            k >>= 1;
            level += 1;
        }
        x
    }

    fn find_root(&self, mut x: usize) -> usize {
        while let Some(p) = self.parent[x] {
            x = p;
        }
        x
    }

    /// The original-graph vertex a C-node carries. `b_node` is accepted for
    /// symmetry with the spec's signature but is not needed to answer this
    /// (a C-node carries exactly one original vertex regardless of which
    /// adjacent block is asked about).
    pub fn cut_vertex(&self, c_node: usize, _b_node: usize) -> usize {
        debug_assert!(c_node >= self.block_count);
        self.cut_vertex_of[c_node - self.block_count]
    }

    /// The local-vertex "copy" of original-graph vertex `v` inside block
    /// `b_node`'s auxiliary graph.
    pub fn rep_vertex(&self, v: usize, b_node: usize) -> Option<usize> {
        self.rep_vertex_table[b_node].get(&v).copied()
    }

    /// Edges of block `b_node`'s auxiliary graph, as local-vertex pairs.
    pub fn h_edges(&self, b_node: usize) -> Vec<(usize, usize)> {
        self.blocks[b_node]
            .edge_references()
            .map(|e| (e.source().index(), e.target().index()))
            .collect()
    }
}

/// Returns the lowest preorder vertex reachable from the subtree of u
/// [lowpoint], and along the way collects biconnected components (blocks)
/// and cut vertices.
///
/// Based on [Tarjan & Hopcroft](https://en.wikipedia.org/wiki/Biconnected_component).
fn dfs(
    graph: &UnGraph,
    u: usize,
    parent: Option<usize>,
    time: &mut usize,
    preorder: &mut [usize],
    edge_labels: &mut [DFSEdgeLabel],
    edge_stack: &mut Vec<usize>,
    blocks: &mut Vec<Vec<usize>>,
    is_cut: &mut [bool],
) -> usize {
    preorder[u] = *time;
    *time += 1;
    let mut low = preorder[u];
    let mut children = 0;

    for e in graph.edges(NodeIndex::new(u)) {
        let v = e.target().index();
        if preorder[v] == usize::MAX {
            edge_labels[e.id().index()] = DFSEdgeLabel::Tree;
            children += 1;

            let stack_len = edge_stack.len();
            edge_stack.push(e.id().index());

            let low_v = dfs(
                graph,
                v,
                Some(u),
                time,
                preorder,
                edge_labels,
                edge_stack,
                blocks,
                is_cut,
            );

            low = low.min(low_v);
            if low_v >= preorder[u] {
                is_cut[u] = parent.is_some();
                let block = edge_stack[stack_len..].to_vec();
                edge_stack.truncate(stack_len);
                blocks.push(block);
            }
        } else if preorder[v] < preorder[u] && edge_labels[e.id().index()] == DFSEdgeLabel::Unvisited {
            edge_stack.push(e.id().index());
            edge_labels[e.id().index()] = DFSEdgeLabel::Back;
            low = low.min(preorder[v]);
        }

        if parent.is_none() && children > 1 {
            is_cut[u] = true;
        }
    }

    low
}

fn root_and_index_tree(graph: &UnGraph) -> (Vec<Option<usize>>, Vec<usize>, Vec<Vec<usize>>, Vec<usize>, Vec<usize>) {
    let n = graph.node_count();
    let mut parent = vec![None; n];
    let mut depth = vec![0; n];
    let mut tin = vec![usize::MAX; n];
    let mut tout = vec![usize::MAX; n];
    let mut up = vec![vec![0; n]; LCA_LEVELS];
    let mut time = 0;

    for root in 0..n {
        if tin[root] != usize::MAX {
            continue;
        }
        // iterative DFS to avoid recursion depth issues on large trees
        let mut stack = vec![(root, None::<usize>, false)];
        while let Some((u, par, processed)) = stack.pop() {
            if processed {
                tout[u] = time;
                time += 1;
                continue;
            }
            if tin[u] != usize::MAX {
                continue;
            }
            tin[u] = time;
            time += 1;
            parent[u] = par;
            depth[u] = par.map(|p| depth[p] + 1).unwrap_or(0);
            up[0][u] = par.unwrap_or(u);

            stack.push((u, par, true));
            for nb in graph.neighbors(NodeIndex::new(u)) {
                let v = nb.index();
                if Some(v) != par && tin[v] == usize::MAX {
                    stack.push((v, Some(u), false));
                }
            }
        }
    }

    for level in 1..LCA_LEVELS {
        for v in 0..n {
            up[level][v] = up[level - 1][up[level - 1][v]];
        }
    }

    (parent, depth, up, tin, tout)
}

/// Builds the block-cut tree (forest, for disconnected graphs) of `graph`.
///
/// A singleton graph (one vertex, no edges) is treated as a single trivial
/// block. Assumes `graph` is simple (no parallel edges feeding into the
/// same biconnected-component computation is fine; parallel edges are
/// themselves a 2-vertex block).
pub fn get_block_cut_tree(graph: &UnGraph) -> BlockCutTree {
    let graph_size = graph.node_count();

    if graph_size == 0 {
        return BlockCutTree {
            block_count: 0,
            cut_count: 0,
            blocks: vec![],
            graph: UnGraph::new_undirected(),
            node_to_id: vec![],
            edge_labels: vec![],
            preorder: vec![],
            block_original: vec![],
            rep_vertex_table: vec![],
            cut_vertex_of: vec![],
            parent: vec![],
            depth: vec![],
            up: vec![vec![]; LCA_LEVELS],
            tin: vec![],
            tout: vec![],
        };
    }

    let mut time = 0;
    let mut preorder = vec![usize::MAX; graph_size];
    let mut edge_labels = vec![DFSEdgeLabel::Unvisited; graph.edge_count()];
    let mut edge_stack = Vec::with_capacity(graph.edge_count());
    let mut is_cut = vec![false; graph_size];
    let mut blocks = Vec::new();

    for u in 0..graph_size {
        if preorder[u] == usize::MAX {
            dfs(
                graph,
                u,
                None,
                &mut time,
                &mut preorder,
                &mut edge_labels,
                &mut edge_stack,
                &mut blocks,
                &mut is_cut,
            );
        }
    }

    // isolated vertices never enter a block via the DFS above (no edges to
    // stack); give each one a trivial singleton block.
    let mut covered = vec![false; graph_size];
    for block in &blocks {
        for &eid in block {
            let (v, w) = graph.edge_endpoints(EdgeIndex::new(eid)).unwrap();
            covered[v.index()] = true;
            covered[w.index()] = true;
        }
    }
    for u in 0..graph_size {
        if !covered[u] {
            blocks.push(vec![]);
            // mark via a sentinel: store the vertex directly in block_original below
        }
    }

    let mut blocks_vertices_sets: Vec<Vec<usize>> = vec![Vec::new(); blocks.len()];
    let mut bicon_internal_indices: Vec<usize> = vec![0; graph_size];

    let mut bct_blocks = Vec::with_capacity(blocks.len());
    let mut bct_graph = UnGraph::new_undirected();
    let mut node_to_id = vec![0usize; graph_size];
    let mut block_original = Vec::with_capacity(blocks.len());
    let mut rep_vertex_table = Vec::with_capacity(blocks.len());

    let mut isolated_cursor = 0;
    for (i, block) in blocks.iter().enumerate() {
        let mut vset: Vec<usize> = Vec::new();
        if block.is_empty() {
            // synthetic singleton block for an isolated vertex
            while covered[isolated_cursor] {
                isolated_cursor += 1;
            }
            vset.push(isolated_cursor);
            covered[isolated_cursor] = true;
        } else {
            let mut seen = HashMap::new();
            for &eid in block {
                let (v, w) = graph.edge_endpoints(EdgeIndex::new(eid)).unwrap();
                for x in [v.index(), w.index()] {
                    if seen.insert(x, ()).is_none() {
                        vset.push(x);
                    }
                }
            }
            radsort::sort(&mut vset);
        }
        blocks_vertices_sets[i] = vset;
    }

    for (i, block) in blocks.iter().enumerate() {
        let mut block_graph = UnGraph::new_undirected();
        let mut local_of = HashMap::new();
        let mut original = Vec::new();

        for &u in &blocks_vertices_sets[i] {
            let label = graph.node_weight(NodeIndex::new(u)).unwrap().clone();
            let local = block_graph.add_node(label).index();
            bicon_internal_indices[u] = local;
            local_of.insert(u, local);
            original.push(u);
            node_to_id[u] = i;
        }

        for &eid in block {
            let (v, w) = graph.edge_endpoints(EdgeIndex::new(eid)).unwrap();
            block_graph.add_edge(
                NodeIndex::new(bicon_internal_indices[v.index()]),
                NodeIndex::new(bicon_internal_indices[w.index()]),
                EdgeLabel::Real,
            );
        }

        bct_graph.add_node(i.try_into().unwrap());
        bct_blocks.push(block_graph);
        block_original.push(original);
        rep_vertex_table.push(local_of);
    }

    let block_count = blocks.len();
    let mut cut_count = 0;
    let mut cut_vertex_of = Vec::new();

    for u in 0..graph_size {
        if is_cut[u] {
            let idx = bct_graph
                .add_node(graph.node_weight(NodeIndex::new(u)).unwrap().clone())
                .index();
            node_to_id[u] = idx;
            cut_vertex_of.push(u);
            cut_count += 1;
        }
    }

    for (i, vertex_set) in blocks_vertices_sets.iter().enumerate() {
        for &u in vertex_set {
            if is_cut[u] {
                bct_graph.add_edge(
                    bct_graph.from_index(i),
                    bct_graph.from_index(node_to_id[u]),
                    EdgeLabel::Structure,
                );
            }
        }
    }

    let (parent, depth, up, tin, tout) = root_and_index_tree(&bct_graph);

    BlockCutTree {
        block_count,
        cut_count,
        blocks: bct_blocks,
        graph: bct_graph,
        node_to_id,
        edge_labels,
        preorder,
        block_original,
        rep_vertex_table,
        cut_vertex_of,
        parent,
        depth,
        up,
        tin,
        tout,
    }
}

#[cfg(test)]
mod dfs_tests {
    use super::*;
    use crate::types::UnGraph;

    fn run_dfs(g: &UnGraph, start: usize) -> (Vec<bool>, Vec<Vec<usize>>, Vec<usize>) {
        let mut time = 0;
        let mut preorder = vec![usize::MAX; g.node_count()];
        let mut edge_labels = vec![DFSEdgeLabel::Unvisited; g.edge_count()];
        let mut edge_stack = Vec::new();
        let mut blocks = Vec::new();
        let mut is_cut = vec![false; g.node_count()];
        dfs(
            g,
            start,
            None,
            &mut time,
            &mut preorder,
            &mut edge_labels,
            &mut edge_stack,
            &mut blocks,
            &mut is_cut,
        );
        (is_cut, blocks, preorder)
    }

    fn assert_dfs(
        g: &UnGraph,
        start: usize,
        expected_is_cut: &[bool],
        expected_blocks: &mut [Vec<usize>],
    ) {
        let (is_cut, mut blocks, _) = run_dfs(g, start);
        for block in &mut blocks {
            block.sort();
        }
        for block in &mut *expected_blocks {
            block.sort();
        }
        blocks.sort();
        expected_blocks.sort();
        assert_eq!(is_cut, expected_is_cut);
        assert_eq!(blocks, expected_blocks);
    }

    #[test]
    fn test_dfs_single_edge() {
        let mut g = UnGraph::new_undirected();
        let a = g.add_node(0);
        let b = g.add_node(1);
        g.add_edge(a, b, EdgeLabel::Real);
        assert_dfs(&g, 0, &[false, false], &mut [vec![0]]);
    }

    #[test]
    fn test_dfs_triangle() {
        let mut g = UnGraph::new_undirected();
        let a = g.add_node(0);
        let b = g.add_node(1);
        let c = g.add_node(2);
        g.add_edge(a, b, EdgeLabel::Real);
        g.add_edge(b, c, EdgeLabel::Real);
        g.add_edge(c, a, EdgeLabel::Real);
        assert_dfs(&g, 0, &[false, false, false], &mut [vec![0, 1, 2]]);
    }

    #[test]
    fn test_dfs_with_cut_vertex() {
        let mut g = UnGraph::new_undirected();
        let a = g.add_node(0);
        let b = g.add_node(1);
        let c = g.add_node(2);
        g.add_edge(a, b, EdgeLabel::Real);
        g.add_edge(b, c, EdgeLabel::Real);

        assert_dfs(&g, 0, &[false, true, false], &mut [vec![0], vec![1]]);
    }

    #[test]
    fn test_dfs_root_cut_vertex() {
        let mut g = UnGraph::new_undirected();
        let a = g.add_node(0);
        let b = g.add_node(1);
        let c = g.add_node(2);
        g.add_edge(a, b, EdgeLabel::Real);
        g.add_edge(a, c, EdgeLabel::Real);

        assert_dfs(&g, 0, &[true, false, false], &mut [vec![0], vec![1]]);
    }

    #[test]
    fn test_dfs_complex_graph() {
        let mut g = UnGraph::new_undirected();
        let a = g.add_node(0);
        let b = g.add_node(1);
        let c = g.add_node(2);
        let d = g.add_node(3);
        let e = g.add_node(4);
        let f = g.add_node(5);
        g.add_edge(a, b, EdgeLabel::Real);
        g.add_edge(b, c, EdgeLabel::Real);
        g.add_edge(c, a, EdgeLabel::Real);
        g.add_edge(d, e, EdgeLabel::Real);
        g.add_edge(e, f, EdgeLabel::Real);
        g.add_edge(f, d, EdgeLabel::Real);
        g.add_edge(a, d, EdgeLabel::Real);

        assert_dfs(
            &g,
            0,
            &[true, false, false, true, false, false],
            &mut [vec![0, 1, 2], vec![3, 4, 5], vec![6]],
        );
    }

    #[test]
    fn test_dfs_multigraph() {
        let mut g = UnGraph::new_undirected();
        let a = g.add_node(0);
        let b = g.add_node(1);
        let c = g.add_node(2);
        let d = g.add_node(3);
        g.add_edge(a, b, EdgeLabel::Real);
        g.add_edge(a, b, EdgeLabel::Real);
        g.add_edge(a, b, EdgeLabel::Real);
        g.add_edge(b, c, EdgeLabel::Real);
        g.add_edge(c, d, EdgeLabel::Real);
        g.add_edge(d, b, EdgeLabel::Real);

        assert_dfs(
            &g,
            0,
            &[false, true, false, false],
            &mut [vec![0, 1, 2], vec![3, 4, 5]],
        );
    }
}

#[cfg(test)]
mod bc_tests {
    use super::*;
    use petgraph::graph::UnGraph;

    #[test]
    fn test_bc_single_edge() {
        let mut g = UnGraph::new_undirected();
        let a = g.add_node(0);
        let b = g.add_node(1);
        g.add_edge(a, b, EdgeLabel::Real);

        let bct = get_block_cut_tree(&g);
        assert_eq!(bct.block_count, 1);
        assert_eq!(bct.cut_count, 0);
    }

    #[test]
    fn test_bc_triangle() {
        let mut g = UnGraph::new_undirected();
        let a = g.add_node(0);
        let b = g.add_node(1);
        let c = g.add_node(2);
        g.add_edge(a, b, EdgeLabel::Real);
        g.add_edge(b, c, EdgeLabel::Real);
        g.add_edge(c, a, EdgeLabel::Real);

        let bct = get_block_cut_tree(&g);
        assert_eq!(bct.block_count, 1);
        assert_eq!(bct.cut_count, 0);
    }

    #[test]
    fn test_bc_cut_vertex() {
        let mut g = UnGraph::new_undirected();
        let a = g.add_node(0);
        let b = g.add_node(1);
        let c = g.add_node(2);
        g.add_edge(a, b, EdgeLabel::Real);
        g.add_edge(b, c, EdgeLabel::Real);

        let bct = get_block_cut_tree(&g);
        assert_eq!(bct.cut_count, 1);
        assert_eq!(bct.block_count, 2);

        let cut_node = bct.bc_node(1);
        assert_eq!(bct.kind(cut_node), BCNodeKind::Cut);
        assert_eq!(bct.cut_vertex(cut_node, bct.bc_node(0)), 1);
    }

    #[test]
    fn test_bc_root_cut_vertex() {
        let mut g = UnGraph::new_undirected();
        let a = g.add_node(0);
        let b = g.add_node(1);
        let c = g.add_node(2);
        g.add_edge(a, b, EdgeLabel::Real);
        g.add_edge(a, c, EdgeLabel::Real);

        let bct = get_block_cut_tree(&g);
        assert_eq!(bct.cut_count, 1);
        assert_eq!(bct.block_count, 2);
    }

    #[test]
    fn test_bc_disconnected() {
        let mut g = UnGraph::new_undirected();
        let a = g.add_node(0);
        let b = g.add_node(1);
        let c = g.add_node(2);
        let d = g.add_node(3);
        g.add_edge(a, b, EdgeLabel::Real);
        g.add_edge(c, d, EdgeLabel::Real);

        let bct = get_block_cut_tree(&g);
        assert_eq!(bct.block_count, 2);
        assert_eq!(bct.cut_count, 0);
        assert!(bct.nca(bct.bc_node(0), bct.bc_node(2)).is_none());
    }

    #[test]
    fn test_bc_isolated_vertex() {
        let mut g = UnGraph::new_undirected();
        g.add_node(0);
        let bct = get_block_cut_tree(&g);
        assert_eq!(bct.block_count, 1);
        assert_eq!(bct.blocks[0].node_count(), 1);
    }

    #[test]
    fn test_bc_nca_and_rep_vertex() {
        let mut g = UnGraph::new_undirected();
        let a = g.add_node(0);
        let b = g.add_node(1);
        let c = g.add_node(2);
        let d = g.add_node(3);
        let e = g.add_node(4);
        g.add_edge(a, b, EdgeLabel::Real);
        g.add_edge(b, c, EdgeLabel::Real);
        g.add_edge(c, a, EdgeLabel::Real);
        g.add_edge(c, d, EdgeLabel::Real);
        g.add_edge(d, e, EdgeLabel::Real);

        let bct = get_block_cut_tree(&g);
        // blocks: {0,1,2}, {2,3}, {3,4}; cut vertices: 2, 3
        assert_eq!(bct.block_count, 3);
        assert_eq!(bct.cut_count, 2);

        let block_012 = bct.bc_node(0);
        let block_34 = bct.bc_node(4);
        let nca = bct.nca(block_012, block_34).unwrap();
        assert_eq!(bct.kind(nca), BCNodeKind::Cut);
        assert_eq!(bct.cut_vertex(nca, block_012), 3);

        assert!(bct.rep_vertex(0, block_012).is_some());
        assert!(bct.rep_vertex(4, block_012).is_none());
    }
}
