//! Per-R-node face index: dense face ids, per-vertex incident-face sets,
//! per-edge (left, right) face pairs.

use crate::spqr::embedding::RigidEmbedding;
use crate::types::UnGraph;

pub(crate) struct FaceIndex {
    embedding: RigidEmbedding,
    vertex_faces: Vec<Vec<usize>>,
}

impl FaceIndex {
    pub fn build(skeleton: &UnGraph) -> Self {
        let embedding = RigidEmbedding::build(skeleton);
        let n = skeleton.node_count();

        let mut vertex_faces = vec![Vec::new(); n];
        for v in 0..n {
            for &w in embedding.rotation_of(v) {
                vertex_faces[v].push(embedding.left_face(v, w));
                vertex_faces[v].push(embedding.left_face(w, v));
            }
            vertex_faces[v].sort_unstable();
            vertex_faces[v].dedup();
        }

        FaceIndex {
            embedding,
            vertex_faces,
        }
    }

    /// Sorted, deduplicated ids of the faces incident to skeleton vertex `v`.
    pub fn vertex_face_ids(&self, v: usize) -> &[usize] {
        &self.vertex_faces[v]
    }

    /// `(left, right)` face ids of the skeleton edge `u -> v`.
    pub fn edge_face_ids(&self, u: usize, v: usize) -> (usize, usize) {
        (self.embedding.left_face(u, v), self.embedding.right_face(u, v))
    }

    pub fn contains_face_id(ids: &[usize], id: usize) -> bool {
        ids.binary_search(&id).is_ok()
    }

    /// Whether the two sorted face-id lists share any id.
    pub fn shares_face(a: &[usize], b: &[usize]) -> bool {
        let (mut i, mut j) = (0, 0);
        while i < a.len() && j < b.len() {
            match a[i].cmp(&b[j]) {
                std::cmp::Ordering::Equal => return true,
                std::cmp::Ordering::Less => i += 1,
                std::cmp::Ordering::Greater => j += 1,
            }
        }
        false
    }
}
