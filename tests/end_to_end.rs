//! End-to-end scenarios straight from the design spec's testable-properties
//! section: fixed small graphs exercised through the public `PlanarSubgraph`
//! and `witness` surface only.

use spqr_planar::{PlanarSubgraph, witness};

fn edge(u: usize, v: usize) -> (usize, usize) {
    (u, v)
}

fn k_n_edges(n: usize) -> Vec<(usize, usize)> {
    let mut edges = Vec::new();
    for i in 0..n {
        for j in (i + 1)..n {
            edges.push(edge(i, j));
        }
    }
    edges
}

#[test]
fn scenario_1_k5_minus_one_edge() {
    let edges = k_n_edges(5);
    let mut added = vec![1u8; 10];
    *added.last_mut().unwrap() = 0;

    let eng = PlanarSubgraph::new(5, edges.clone(), &added).unwrap();
    let q = eng.query();
    for (i, &v) in q.iter().enumerate() {
        if i < 9 {
            assert_eq!(v, 0, "edge {i} is already added");
        } else {
            assert_eq!(v, 0, "adding the 10th edge would complete K5, non-planar");
        }
    }

    let w = witness(5, &edges).unwrap();
    assert_eq!(w.len(), 10, "K5 itself witnesses as all 10 of its own edges");
}

#[test]
fn scenario_2_k4_all_zero_then_fill_in() {
    let edges = k_n_edges(4);
    let eng = PlanarSubgraph::new(4, edges.clone(), &vec![0u8; 6]).unwrap();
    assert_eq!(eng.query(), vec![1u8; 6], "K4 is planar, every edge individually addable");

    for i in 0..edges.len() {
        eng.set(i, true).unwrap();
        let q = eng.query();
        for (j, &v) in q.iter().enumerate() {
            if j <= i {
                assert_eq!(v, 0);
            } else {
                assert_eq!(v, 1, "K4 stays planar as edges are added one by one");
            }
        }
    }
}

#[test]
fn scenario_3_k33_minus_one_edge() {
    let mut edges = Vec::new();
    for i in 0..3 {
        for j in 3..6 {
            edges.push(edge(i, j));
        }
    }
    let mut added = vec![1u8; 9];
    *added.last_mut().unwrap() = 0;

    let eng = PlanarSubgraph::new(6, edges.clone(), &added).unwrap();
    assert_eq!(eng.query()[8], 0);

    let w = witness(6, &edges).unwrap();
    assert_eq!(w.len(), 9, "K3,3 itself witnesses as all 9 of its own edges");
}

#[test]
fn scenario_4_pendant_edge_to_pendant_component() {
    let mut edges = Vec::new();
    for i in 0..6 {
        edges.push(edge(i, (i + 1) % 6));
    }
    edges.push(edge(0, 6));

    let mut added = vec![1u8; 6];
    added.push(0);

    let eng = PlanarSubgraph::new(7, edges, &added).unwrap();
    assert_eq!(eng.query()[6], 1, "a bridge to an isolated vertex never creates a Kuratowski subdivision");
}

#[test]
fn scenario_5_k5_as_cycle_plus_chords() {
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
        assert_eq!(v, 1, "each single chord extension of a 5-cycle stays planar");
    }
}

#[test]
fn scenario_6_three_parallel_edges() {
    let edges = vec![edge(0, 1), edge(0, 1), edge(0, 1)];
    let eng = PlanarSubgraph::new(2, edges, &[1, 0, 0]).unwrap();
    let q = eng.query();
    assert_eq!(q[1], 1);
    assert_eq!(q[2], 1);
}

/// Two K4s glued along a shared edge (0,1): a single block whose SPQR tree
/// is R - P - R (a 3-node path), the separator pair {0,1} sitting in the
/// P-node's 3-way bond. Vertex 2 and vertex 4 each live in a different
/// R-node and reach the bond through a distinct face of their own lobe, so
/// some embedding puts them on a common face: edge (2,4) stays planar.
#[test]
fn scenario_7_two_k4_lobes_glued_on_an_edge() {
    let mut edges = k_n_edges(4); // K4 on {0,1,2,3}
    for (u, v) in [(0, 4), (0, 5), (1, 4), (1, 5), (4, 5)] {
        edges.push(edge(u, v));
    }
    edges.push(edge(2, 4));

    let mut added = vec![1u8; edges.len()];
    *added.last_mut().unwrap() = 0;

    let eng = PlanarSubgraph::new(6, edges, &added).unwrap();
    let q = eng.query();
    assert_eq!(
        *q.last().unwrap(),
        1,
        "vertex 2 and vertex 4 can both reach the shared separator's bond through a face that contains it"
    );
}

/// Three K4 lobes chained through two distinct separator pairs, {0,1} and
/// {4,5}: a single block whose SPQR tree is R - P - R - P - R (5 nodes).
/// Vertex 2 (only in the first lobe) and vertex 6 (only in the last lobe)
/// must cross the middle R-node's skeleton to share a face, and that
/// skeleton's two bonding edges (0,1) and (4,5) sit on four pairwise
/// distinct faces of a K4 skeleton, so no face carries both: {0,1,2} and
/// {4,5,6} already form a K3,3 once edge (2,6) is added, so it must be
/// reported unaddable.
#[test]
fn scenario_8_three_k4_lobes_chained_through_two_separators() {
    let mut edges = k_n_edges(4); // K4 on {0,1,2,3}
    for (u, v) in [(0, 4), (0, 5), (1, 4), (1, 5), (4, 5)] {
        edges.push(edge(u, v)); // K4 on {0,1,4,5}, sharing edge (0,1)
    }
    for (u, v) in [(4, 6), (4, 7), (5, 6), (5, 7), (6, 7)] {
        edges.push(edge(u, v)); // K4 on {4,5,6,7}, sharing edge (4,5)
    }
    edges.push(edge(2, 6));

    let mut added = vec![1u8; edges.len()];
    *added.last_mut().unwrap() = 0;

    let eng = PlanarSubgraph::new(8, edges, &added).unwrap();
    let q = eng.query();
    assert_eq!(
        *q.last().unwrap(),
        0,
        "{{0,1,6}} vs {{4,5,2}} already forms a K3,3 once (2,6) is added"
    );
}

#[test]
fn witness_planar_inputs_return_empty() {
    assert_eq!(witness(0, &[]).unwrap(), Vec::new());
    assert_eq!(witness(4, &k_n_edges(4)).unwrap(), k_n_edges(4));
}

#[test]
fn witness_is_sorted_deduplicated_and_canonical() {
    let w = witness(5, &k_n_edges(5)).unwrap();
    assert!(!w.is_empty());
    let mut sorted = w.clone();
    sorted.sort_unstable();
    sorted.dedup();
    assert_eq!(w, sorted, "output must already be sorted and deduplicated");
    for &(u, v) in &w {
        assert!(u < v, "every returned edge must be normalized to (min, max)");
    }
}

#[test]
fn witness_out_of_range_is_rejected() {
    let err = witness(3, &[edge(0, 10)]).unwrap_err();
    assert_eq!(
        err,
        spqr_planar::PlanarError::OutOfRange { index: 10, bound: 3 }
    );
}
