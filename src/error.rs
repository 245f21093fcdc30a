use crate::graph::GraphError;
use crate::types::{Edge, RankId};

/// Which of the two per-edge costs an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CostKind {
    Forbid,
    Permit,
}

impl std::fmt::Display for CostKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CostKind::Forbid => f.write_str("forbid"),
            CostKind::Permit => f.write_str("permit"),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("{kind} cost of rank {rank} is NaN after initialisation")]
    NanCost { rank: RankId, kind: CostKind },

    #[error("cost update on edge {edge} with a NaN delta")]
    NanDelta { edge: Edge },

    #[error("cost lookup on edge {edge}, which has no tracked rank")]
    UntrackedEdge { edge: Edge },

    #[error("merge touched rank {rank}, whose {kind} cost is no longer tracked")]
    RetiredRepresentative { rank: RankId, kind: CostKind },

    #[error("induced costs were already initialised")]
    AlreadyInitialized,

    #[error("heap invariant violated: {0}")]
    HeapInvariant(String),

    #[error(transparent)]
    Graph(#[from] GraphError),
}

pub type Result<T> = std::result::Result<T, Error>;
