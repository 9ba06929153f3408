//! The edit engine: `PlanarSubgraph`, the single value this crate exposes to
//! an interactive caller. Construction fixes the vertex set and the ordered
//! candidate-edge list; `set` toggles one candidate edge's membership in the
//! current planar graph H and recomputes the per-edge addability vector;
//! `query` returns the latest computed vector.
//!
//! Derived structures (the block-cut tree, the SPQR tree of every block the
//! walk actually touches, and their face indices) are scratch state rebuilt
//! from scratch inside `recalculate` and dropped at the end of it. The only
//! state carried between calls is `added` (which candidate edges are in H)
//! and the last published `addable` snapshot.

use std::panic::{self, AssertUnwindSafe};
use std::sync::{Arc, Mutex};

use petgraph::graph::NodeIndex;

use crate::block_cut::get_block_cut_tree;
use crate::error::PlanarError;
use crate::oracle::{BlockCache, can_add};
use crate::types::{EdgeLabel, UnGraph};

struct Inner {
    added: Vec<bool>,
    snapshot: Arc<Vec<u8>>,
    poisoned: bool,
}

/// A planar-subgraph edit index over a fixed vertex set and a fixed ordered
/// multiset of candidate edges.
///
/// Single-writer, multi-reader: [`set`](Self::set) takes a short-lived mutex
/// to mutate `added` and publish a fresh snapshot; [`query`](Self::query)
/// takes the same mutex only long enough to clone the published `Arc`, so a
/// concurrent reader never blocks for the duration of a recalculation and
/// never observes a torn value. Move-only: there is no `Clone`/`Copy` impl,
/// matching the external interface's "engine is move-only, non-copyable".
pub struct PlanarSubgraph {
    n: usize,
    edges_all: Vec<(usize, usize)>,
    inner: Mutex<Inner>,
}

impl PlanarSubgraph {
    /// Constructs a new index over `n` vertices and candidate edge list
    /// `edges_all`, with `added_init[i]` (any nonzero byte is truthy) giving
    /// the initial membership of edge `i` in H.
    ///
    /// # Errors
    ///
    /// - [`PlanarError::Invalid`] if `added_init.len() != edges_all.len()`,
    ///   or if `edges_all` contains a self-loop.
    /// - [`PlanarError::OutOfRange`] if any edge endpoint is `>= n`.
    pub fn new(
        n: usize,
        edges_all: Vec<(usize, usize)>,
        added_init: &[u8],
    ) -> Result<Self, PlanarError> {
        if added_init.len() != edges_all.len() {
            return Err(PlanarError::Invalid(format!(
                "added_init has length {} but edges_all has length {}",
                added_init.len(),
                edges_all.len()
            )));
        }
        for &(u, v) in &edges_all {
            if u >= n {
                return Err(PlanarError::OutOfRange { index: u, bound: n });
            }
            if v >= n {
                return Err(PlanarError::OutOfRange { index: v, bound: n });
            }
            if u == v {
                return Err(PlanarError::Invalid(format!(
                    "edges_all contains a self-loop at vertex {u}"
                )));
            }
        }

        let added: Vec<bool> = added_init.iter().map(|&b| b != 0).collect();
        let snapshot = recalculate(n, &edges_all, &added)?;

        Ok(PlanarSubgraph {
            n,
            edges_all,
            inner: Mutex::new(Inner {
                added,
                snapshot,
                poisoned: false,
            }),
        })
    }

    /// Number of vertices this index was constructed over.
    pub fn vertex_count(&self) -> usize {
        self.n
    }

    /// Number of candidate edges this index was constructed over.
    pub fn edge_count(&self) -> usize {
        self.edges_all.len()
    }

    /// Sets whether candidate edge `edge_id` is currently in H, recomputing
    /// the addability snapshot if this changes anything. A no-op (other than
    /// an `Ok(())` return) when the edge's membership already equals
    /// `present`.
    ///
    /// The caller is responsible for only setting an edge to `present=true`
    /// when it was last reported addable; this engine does not validate that
    /// (see spec's open question on illegal toggles) and does not reject the
    /// call.
    ///
    /// # Errors
    ///
    /// - [`PlanarError::OutOfRange`] if `edge_id >= edge_count()`.
    /// - [`PlanarError::Fatal`] if the engine previously hit, or now hits, an
    ///   internal consistency violation. Once returned, the engine must be
    ///   discarded; further calls keep returning `Fatal`.
    pub fn set(&self, edge_id: usize, present: bool) -> Result<(), PlanarError> {
        if edge_id >= self.edges_all.len() {
            return Err(PlanarError::OutOfRange {
                index: edge_id,
                bound: self.edges_all.len(),
            });
        }

        let mut guard = self.inner.lock().expect("engine mutex poisoned by a panic");

        if guard.poisoned {
            return Err(PlanarError::Fatal(
                "engine already hit a fatal error and must be discarded".to_string(),
            ));
        }
        if guard.added[edge_id] == present {
            return Ok(());
        }

        guard.added[edge_id] = present;
        match recalculate(self.n, &self.edges_all, &guard.added) {
            Ok(snapshot) => {
                guard.snapshot = snapshot;
                Ok(())
            }
            Err(err) => {
                guard.poisoned = true;
                Err(err)
            }
        }
    }

    /// Returns a copy of the most recently published addability vector: one
    /// byte per candidate edge, `1` if addable, `0` otherwise. Reflects the
    /// effect of `added_init` on a freshly constructed engine.
    pub fn query(&self) -> Vec<u8> {
        let guard = self.inner.lock().expect("engine mutex poisoned by a panic");
        guard.snapshot.as_ref().clone()
    }

    /// Whether the engine has hit a fatal internal error and must no longer
    /// be used (beyond this check).
    pub fn is_poisoned(&self) -> bool {
        self.inner.lock().expect("engine mutex poisoned by a panic").poisoned
    }
}

/// Rebuilds H from `added`, rebuilds its block-cut tree, and computes the
/// per-edge addability vector by running the oracle on every not-yet-added
/// edge. Blocks are built lazily by the oracle's [`BlockCache`] and discarded
/// when this function returns.
///
/// A panic from deep inside block-cut/SPQR construction (an internal
/// consistency violation the spec calls out as `Fatal`, e.g. an SPQR tree
/// failing to build over a block the caller expected biconnected) is caught
/// at this one boundary and turned into `PlanarError::Fatal` rather than
/// unwinding into the caller; every path feeding this crate's derived
/// structures is otherwise infallible Rust, so `catch_unwind` only ever
/// observes the `debug_assert!`/`expect` failures the rest of the crate
/// documents as "must never happen for a valid graph".
fn recalculate(
    n: usize,
    edges_all: &[(usize, usize)],
    added: &[bool],
) -> Result<Arc<Vec<u8>>, PlanarError> {
    log::debug!(
        "recalculating addability over {} vertices, {} candidate edges ({} currently added)",
        n,
        edges_all.len(),
        added.iter().filter(|&&b| b).count()
    );

    let result = panic::catch_unwind(AssertUnwindSafe(|| {
        if n == 0 {
            return Vec::new();
        }

        let mut h = UnGraph::new_undirected();
        for i in 0..n {
            h.add_node(i.try_into().unwrap());
        }
        for (&(u, v), &is_added) in edges_all.iter().zip(added.iter()) {
            if is_added {
                h.add_edge(NodeIndex::new(u), NodeIndex::new(v), EdgeLabel::Real);
            }
        }

        let bct = get_block_cut_tree(&h);
        log::trace!(
            "block-cut tree built: {} blocks, {} cut vertices",
            bct.block_count,
            bct.cut_count
        );
        let mut cache = BlockCache::new();

        edges_all
            .iter()
            .zip(added.iter())
            .map(|(&(u, v), &is_added)| {
                if is_added {
                    0u8
                } else if can_add(&bct, &mut cache, u, v) {
                    1u8
                } else {
                    0u8
                }
            })
            .collect::<Vec<u8>>()
    }));

    result.map(Arc::new).map_err(|_| {
        PlanarError::Fatal(
            "internal consistency violation while rebuilding block-cut/SPQR structures"
                .to_string(),
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn edge(u: usize, v: usize) -> (usize, usize) {
        (u, v)
    }

    #[test]
    fn rejects_length_mismatch() {
        let err = PlanarSubgraph::new(3, vec![edge(0, 1)], &[]).unwrap_err();
        assert!(matches!(err, PlanarError::Invalid(_)));
    }

    #[test]
    fn rejects_out_of_range_endpoint() {
        let err = PlanarSubgraph::new(2, vec![edge(0, 5)], &[0]).unwrap_err();
        assert_eq!(err, PlanarError::OutOfRange { index: 5, bound: 2 });
    }

    #[test]
    fn rejects_self_loop() {
        let err = PlanarSubgraph::new(2, vec![edge(0, 0)], &[0]).unwrap_err();
        assert!(matches!(err, PlanarError::Invalid(_)));
    }

    #[test]
    fn out_of_range_edge_id_on_set() {
        let eng = PlanarSubgraph::new(2, vec![edge(0, 1)], &[0]).unwrap();
        let err = eng.set(5, true).unwrap_err();
        assert_eq!(err, PlanarError::OutOfRange { index: 5, bound: 1 });
    }

    #[test]
    fn k4_starts_all_addable_and_stays_planar_once_all_added() {
        let edges = vec![
            edge(0, 1),
            edge(0, 2),
            edge(0, 3),
            edge(1, 2),
            edge(1, 3),
            edge(2, 3),
        ];
        let eng = PlanarSubgraph::new(4, edges.clone(), &[0; 6]).unwrap();
        assert_eq!(eng.query(), vec![1u8; 6]);

        for i in 0..edges.len() {
            eng.set(i, true).unwrap();
            let q = eng.query();
            assert_eq!(q[i], 0, "edge {i} just added must not be addable");
            for (j, &is_addable) in q.iter().enumerate() {
                if j > i {
                    assert_eq!(is_addable, 1, "K4 is planar, edge {j} should stay addable");
                }
            }
        }
    }

    #[test]
    fn k5_missing_one_edge_leaves_it_unaddable() {
        let mut edges = Vec::new();
        for i in 0..5 {
            for j in (i + 1)..5 {
                edges.push(edge(i, j));
            }
        }
        let mut added = vec![1u8; 10];
        let last = edges.len() - 1;
        added[last] = 0;
        let eng = PlanarSubgraph::new(5, edges, &added).unwrap();
        let q = eng.query();
        assert_eq!(q[last], 0);
        for (i, &v) in q.iter().enumerate() {
            if i != last {
                assert_eq!(v, 0);
            }
        }
    }

    #[test]
    fn pendant_edge_to_isolated_vertex_is_always_addable() {
        // a 6-cycle on {0..5} plus a pendant edge to vertex 6
        let mut edges = Vec::new();
        for i in 0..6 {
            edges.push(edge(i, (i + 1) % 6));
        }
        edges.push(edge(0, 6));

        let mut added = vec![1u8; 6];
        added.push(0);
        let eng = PlanarSubgraph::new(7, edges, &added).unwrap();
        assert_eq!(eng.query()[6], 1);
    }

    #[test]
    fn toggle_twice_returns_to_previous_snapshot() {
        let edges = vec![edge(0, 1), edge(1, 2), edge(2, 0)];
        let eng = PlanarSubgraph::new(3, edges, &[0, 0, 0]).unwrap();
        let before = eng.query();
        eng.set(0, true).unwrap();
        eng.set(0, false).unwrap();
        assert_eq!(eng.query(), before);
    }

    #[test]
    fn idempotent_set_leaves_snapshot_unchanged() {
        let edges = vec![edge(0, 1), edge(1, 2), edge(2, 0)];
        let eng = PlanarSubgraph::new(3, edges, &[1, 0, 0]).unwrap();
        let before = eng.query();
        eng.set(0, true).unwrap();
        assert_eq!(eng.query(), before);
    }

    #[test]
    fn three_parallel_edges_are_each_addable() {
        let edges = vec![edge(0, 1), edge(0, 1), edge(0, 1)];
        let eng = PlanarSubgraph::new(2, edges, &[1, 0, 0]).unwrap();
        let q = eng.query();
        assert_eq!(q, vec![0, 1, 1]);
    }

    #[test]
    fn k5_cycle_chords_are_each_individually_addable() {
        // K5 as a 5-cycle plus every chord; only the cycle is added.
        let edges = vec![
            edge(0, 1),
            edge(1, 2),
            edge(2, 3),
            edge(3, 4),
            edge(4, 0),
            edge(0, 2),
            edge(0, 3),
            edge(1, 3),
            edge(1, 4),
            edge(2, 4),
        ];
        let mut added = vec![0u8; 10];
        for a in added.iter_mut().take(5) {
            *a = 1;
        }
        let eng = PlanarSubgraph::new(5, edges, &added).unwrap();
        let q = eng.query();
        for &v in &q[5..] {
            assert_eq!(v, 1, "every single chord extension of a 5-cycle is planar");
        }
    }
}
