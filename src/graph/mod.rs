pub mod static_graph;

pub use static_graph::{GraphBuilder, StaticSparseGraph};

use crate::types::*;

/// Read-only view of a sparse weighted graph, as consumed by the cost engine.
///
/// Every materialized (nonzero-weight) edge carries a dense rank in
/// `1..=num_edges()`; rank 0 means "no such edge".
pub trait SparseGraph {
    fn num_nodes(&self) -> usize;

    /// Number of ranked edges. Rank tables are sized `1 + num_edges()`.
    fn num_edges(&self) -> usize;

    /// Neighbours joined to `node` by a nonzero-weight edge, sorted ascending.
    fn non_zero_neighbours(&self, node: NodeId) -> &[NodeId];

    /// Weight of `edge`, or [`ZERO`] if the edge is absent.
    fn weight(&self, edge: Edge) -> EdgeWeight;

    /// Weight of the edge holding `rank`, or [`ZERO`] for the dummy rank.
    fn rank_weight(&self, rank: RankId) -> EdgeWeight;

    /// Rank of `edge`, or [`RankId::DUMMY`] if it is absent.
    fn rank_of(&self, edge: Edge) -> RankId;
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GraphError {
    #[error("self-loop on node {0}")]
    SelfLoop(u32),

    #[error("node {node} out of range for a graph with {num_nodes} nodes")]
    NodeOutOfRange { node: u32, num_nodes: usize },

    #[error("edge {0} added twice")]
    DuplicateEdge(Edge),

    #[error("edge {0} has a NaN weight")]
    NanWeight(Edge),
}
