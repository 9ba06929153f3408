#![warn(missing_docs)]

//! # spqr_planar
//!
//! A per-edge planarity-addability index for an interactive planar-subgraph
//! editor: given a fixed vertex set and a fixed multiset of candidate edges,
//! which of the remaining (not-yet-added) edges could be added individually
//! while keeping the current subgraph planar.
//!
//! Two pieces carry the weight:
//!
//! - [`planarity::witness`], a standalone Boyer-Myrvold-style linear-time
//!   planarity test that returns a Kuratowski subdivision when the input is
//!   not planar.
//! - [`engine::PlanarSubgraph`], a single-writer/multi-reader index that
//!   maintains a block-cut tree and, per block, an SPQR tree with per-R-node
//!   planar embeddings, and answers "can edge i be added?" via an
//!   SPQR-tree feasibility walk instead of re-running the planarity test
//!   from scratch on every query.
//!
//! Built on [`petgraph`](https://docs.rs/petgraph) for the underlying graph
//! representation.

pub mod block_cut;
pub mod engine;
pub mod error;
pub(crate) mod oracle;
pub mod planarity;
pub(crate) mod spqr;
pub(crate) mod triconnected;
pub mod types;

pub use engine::PlanarSubgraph;
pub use error::PlanarError;
pub use planarity::witness;
pub use types::{DFSEdgeLabel, DiGraph, EdgeLabel, UnGraph};
