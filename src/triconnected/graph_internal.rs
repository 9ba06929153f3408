use petgraph::visit::EdgeRef;

use crate::types::UnGraph;

/// Classification of an edge during the Hopcroft-Tarjan split-component
/// search: `Tree`/`Back` mirror the palm-tree DFS, `Killed` marks an edge
/// consumed into a split component and no longer part of the live graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum EdgeType {
    Tree,
    Back,
    Killed,
}

/// Working graph for triconnected-component finding. Vertices are dense
/// `0..n` in DFS arrival order once `run_palm_dfs`/`run_pathfinder` have
/// run; edges may be appended (virtual split-pair edges) but never
/// removed, only marked `Killed`.
#[derive(Debug, Clone)]
pub(crate) struct GraphInternal {
    pub n: usize,
    pub m: usize,
    pub adj: Vec<Vec<usize>>,
    pub edges: Vec<(usize, usize)>,
    pub edge_type: Vec<Option<EdgeType>>,

    pub num: Vec<usize>,
    pub low1: Vec<usize>,
    pub low2: Vec<usize>,
    pub sub: Vec<usize>,
    pub deg: Vec<usize>,
    pub par: Vec<Option<usize>>,
    pub par_edge: Vec<Option<usize>>,

    /// Per-vertex stack of highpoint numbers, maintained while the
    /// split-finding DFS ascends and descends.
    pub highpt: Vec<Vec<usize>>,
    /// `newnum -> vertex`, filled in by the pathfinder pass.
    pub numrev: Vec<usize>,
    /// Per edge: whether it starts a new path in the pathfinder's
    /// decomposition of the DFS tree into paths.
    pub starts_path: Vec<bool>,
}

impl GraphInternal {
    pub fn new(n: usize, m_hint: usize) -> Self {
        GraphInternal {
            n,
            m: 0,
            adj: vec![Vec::new(); n],
            edges: Vec::with_capacity(m_hint),
            edge_type: Vec::with_capacity(m_hint),
            num: vec![usize::MAX; n],
            low1: vec![usize::MAX; n],
            low2: vec![usize::MAX; n],
            sub: vec![1; n],
            deg: vec![0; n],
            par: vec![None; n],
            par_edge: vec![None; n],
            highpt: vec![Vec::new(); n],
            numrev: vec![0; n],
            starts_path: Vec::with_capacity(m_hint),
        }
    }

    pub fn from_petgraph(graph: &UnGraph) -> Self {
        let n = graph.node_count();
        let mut g = GraphInternal::new(n, graph.edge_count());
        for e in graph.edge_references() {
            g.new_edge(e.source().index(), e.target().index(), None);
        }
        g
    }

    pub fn get_other_vertex(&self, eid: usize, u: usize) -> usize {
        let (s, t) = self.edges[eid];
        if s == u { t } else { s }
    }

    pub fn new_edge(&mut self, u: usize, v: usize, edge_type: Option<EdgeType>) -> usize {
        let eid = self.edges.len();
        self.edges.push((u, v));
        self.edge_type.push(edge_type);
        self.starts_path.push(false);
        self.adj[u].push(eid);
        self.adj[v].push(eid);
        self.deg[u] += 1;
        self.deg[v] += 1;
        self.m += 1;
        eid
    }

    pub fn remove_edge(&mut self, eid: usize) {
        self.edge_type[eid] = Some(EdgeType::Killed);
        let (u, v) = self.edges[eid];
        self.deg[u] -= 1;
        self.deg[v] -= 1;
    }

    pub fn make_tedge(&mut self, eid: usize) {
        self.edge_type[eid] = Some(EdgeType::Tree);
    }

    pub fn make_bedge(&mut self, eid: usize) {
        self.edge_type[eid] = Some(EdgeType::Back);
    }

    /// Follows the chain of degree-2 vertices starting at `v` (each
    /// represents a path compressed by an earlier split) until it reaches
    /// `root` or a vertex that is not degree-2, returning that vertex.
    pub fn first_alive(&self, root: usize, mut v: usize) -> Option<usize> {
        loop {
            if v == root || self.deg[v] != 2 {
                return Some(v);
            }
            let mut advanced = false;
            for &eid in &self.adj[v] {
                if self.edge_type[eid] == Some(EdgeType::Killed) {
                    continue;
                }
                let other = self.get_other_vertex(eid, v);
                if self.num[other] > self.num[v] {
                    v = other;
                    advanced = true;
                    break;
                }
            }
            if !advanced {
                return Some(v);
            }
        }
    }

    /// Current highpoint of `u`: the largest still-relevant back-edge
    /// target recorded while descending the DFS tree.
    pub fn get_high(&self, u: usize) -> usize {
        self.highpt[u].last().copied().unwrap_or(0)
    }

    /// Records a new highpoint for `u`, keeping the stack sorted ascending
    /// so `get_high` is always its maximum.
    pub fn push_high(&mut self, u: usize, value: usize) {
        self.highpt[u].push(value);
    }
}
