#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Node identifier of the underlying graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct NodeId(pub u32);

impl NodeId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Dense rank of a tracked edge. Rank 0 is the reserved dummy slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RankId(pub u32);

impl RankId {
    /// The dummy rank. Never a real edge; present in both heaps as a base element.
    pub const DUMMY: RankId = RankId(0);

    #[inline]
    pub fn is_dummy(self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for RankId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Combined identifier of an unordered node pair.
pub type EdgeId = u64;

/// Edge weights are plain reals with three reserved values.
pub type EdgeWeight = f64;

/// Weight of an absent edge.
pub const ZERO: EdgeWeight = 0.0;
/// Weight of an edge that is permanently excluded.
pub const FORBIDDEN: EdgeWeight = f64::NEG_INFINITY;
/// Weight of an edge that is permanently included.
pub const PERMANENT: EdgeWeight = f64::INFINITY;

/// Whether `w` is one of the sentinels that are never cost-tracked.
#[inline]
pub fn is_sentinel_weight(w: EdgeWeight) -> bool {
    w == ZERO || w == FORBIDDEN || w == PERMANENT
}

/// Unordered node pair, stored with `u <= v`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Edge {
    pub u: NodeId,
    pub v: NodeId,
}

/// Returned where an edge is required but none exists.
pub const INVALID_EDGE: Edge = Edge {
    u: NodeId(u32::MAX),
    v: NodeId(u32::MAX),
};

impl Edge {
    pub fn new(a: NodeId, b: NodeId) -> Self {
        if a <= b {
            Edge { u: a, v: b }
        } else {
            Edge { u: b, v: a }
        }
    }

    /// Triangular index of the pair: `v * (v - 1) / 2 + u` for `u < v`.
    ///
    /// Unique among all pairs with distinct endpoints, independent of the
    /// graph size.
    pub fn id(&self) -> EdgeId {
        let u = self.u.0 as u64;
        let v = self.v.0 as u64;
        v * v.saturating_sub(1) / 2 + u
    }

    pub fn is_valid(&self) -> bool {
        *self != INVALID_EDGE && self.u != self.v
    }
}

impl From<(u32, u32)> for Edge {
    fn from((a, b): (u32, u32)) -> Self {
        Edge::new(NodeId(a), NodeId(b))
    }
}

impl std::fmt::Display for Edge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({},{})", self.u.0, self.v.0)
    }
}
