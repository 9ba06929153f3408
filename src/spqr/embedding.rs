//! Planar combinatorial embedding of a single R-node's skeleton, built by
//! re-running the left-right planarity embedder and tracing faces out of
//! the resulting rotation system.

use hashbrown::HashMap;
use petgraph::visit::EdgeRef;

use crate::types::UnGraph;

/// A rotation system (cyclic edge order per vertex) together with the
/// face each directed half-edge borders.
pub(crate) struct RigidEmbedding {
    rotation: Vec<Vec<usize>>,
    arc_face: HashMap<(usize, usize), usize>,
    pub num_faces: usize,
}

impl RigidEmbedding {
    /// Builds the embedding of `skeleton`, which must be planar (true of
    /// every R-node skeleton of a planar graph by construction).
    pub fn build(skeleton: &UnGraph) -> Self {
        let (planar, digraph) = crate::planarity::is_planar(skeleton, false);
        debug_assert!(planar, "R-node skeleton must itself be planar");

        let n = skeleton.node_count();
        let mut rotation = vec![Vec::new(); n];
        for e in digraph.edge_references() {
            rotation[e.source().index()].push(e.target().index());
        }

        let (arc_face, num_faces) = trace_faces(&rotation);
        RigidEmbedding {
            rotation,
            arc_face,
            num_faces,
        }
    }

    pub fn rotation_of(&self, v: usize) -> &[usize] {
        &self.rotation[v]
    }

    /// The face bordering the directed half-edge `u -> v`.
    pub fn left_face(&self, u: usize, v: usize) -> usize {
        self.arc_face[&(u, v)]
    }

    /// The face bordering the reverse half-edge, i.e. `left_face(v, u)`.
    pub fn right_face(&self, u: usize, v: usize) -> usize {
        self.arc_face[&(v, u)]
    }
}

/// Walks each directed half-edge once, assigning a fresh face id the first
/// time a half-edge is seen and following `next(v, u) = rotation[v]`'s
/// entry just after `u`, the standard face-tracing rule for a rotation
/// system.
fn trace_faces(rotation: &[Vec<usize>]) -> (HashMap<(usize, usize), usize>, usize) {
    let n = rotation.len();
    let mut arc_face = HashMap::new();
    let mut face_id = 0;

    for u in 0..n {
        for &v in &rotation[u] {
            if arc_face.contains_key(&(u, v)) {
                continue;
            }

            let (mut a, mut b) = (u, v);
            loop {
                arc_face.insert((a, b), face_id);
                let pos = rotation[b]
                    .iter()
                    .position(|&x| x == a)
                    .expect("skeleton rotation must be symmetric");
                let next = rotation[b][(pos + 1) % rotation[b].len()];
                a = b;
                b = next;
                if (a, b) == (u, v) {
                    break;
                }
            }
            face_id += 1;
        }
    }

    (arc_face, face_id)
}
