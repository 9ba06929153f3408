use crate::triconnected::graph_internal::GraphInternal;

/// The three kinds of split component, plus a provisional `Unsure` state
/// used while a component is still being assembled: whether it ends up S
/// or R is only decided once its final edge count is known, in `commit`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ComponentType {
    P,
    S,
    R,
    Unsure,
}

/// A split (triconnected) component under construction: a set of edge ids
/// into the working [`GraphInternal`], plus its (possibly still
/// provisional) type.
#[derive(Debug, Clone)]
pub(crate) struct Component {
    pub edges: Vec<usize>,
    pub comp_type: ComponentType,
}

impl Component {
    pub fn new(comp_type: ComponentType) -> Self {
        Component {
            edges: Vec::new(),
            comp_type,
        }
    }

    /// Adds `eid` to this component. `is_virtual` marks edges introduced as
    /// the split-pair's virtual edge, which later bookkeeping in
    /// `triconnected::get_triconnected_components` re-derives independently
    /// from occurrence counts; it is accepted here only to mirror the call
    /// shape used throughout the split-finding DFS.
    pub fn push_edge(&mut self, eid: usize, _graph: &mut GraphInternal, _is_virtual: bool) {
        self.edges.push(eid);
    }

    /// Finalizes this component's type (resolving `Unsure` by edge count —
    /// four or more distinct endpoints/edges makes it rigid, fewer makes it
    /// a cycle) and moves it into `split_components`.
    pub fn commit(mut self, split_components: &mut Vec<Component>) {
        if self.comp_type == ComponentType::Unsure {
            self.comp_type = if self.edges.len() >= 4 {
                ComponentType::R
            } else {
                ComponentType::S
            };
        }
        split_components.push(self);
    }
}

/// The full output of [`crate::triconnected::get_triconnected_components`]:
/// every split component found, plus the (possibly renumbered) edge list
/// they reference and which of those edges are real (vs. virtual,
/// introduced purely to glue components back together).
#[derive(Debug, Clone)]
pub(crate) struct TriconnectedComponents {
    pub comp: Vec<Component>,
    pub edges: Vec<(usize, usize)>,
    pub is_real: Vec<bool>,
    pub to_split: Vec<Option<usize>>,
}
