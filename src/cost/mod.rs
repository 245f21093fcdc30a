pub mod model;
pub mod table;

pub use model::{CostModel, FnCostModel};
pub use table::CostTable;

use std::cmp::Ordering;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Induced cost of one rank.
///
/// `Retired` and `Fixed` never carry a value and order below every
/// `Tracked` cost in both heaps.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Cost {
    /// Live nonnegative conflict cost.
    Tracked(f64),
    /// Was tracked; removed from consideration for good.
    Retired,
    /// Never tracked: the dummy rank, or an edge with a sentinel weight.
    Fixed,
}

impl Cost {
    #[inline]
    pub fn is_tracked(self) -> bool {
        matches!(self, Cost::Tracked(_))
    }

    pub fn value(self) -> Option<f64> {
        match self {
            Cost::Tracked(v) => Some(v),
            _ => None,
        }
    }

    /// Add `delta` to a tracked cost, clamping at zero. Other states are unchanged.
    pub fn shifted(self, delta: f64) -> Cost {
        match self {
            Cost::Tracked(v) => Cost::Tracked((v + delta).max(0.0)),
            other => other,
        }
    }

    /// Heap order: tracked costs by value, untracked states below all of them.
    #[inline]
    pub fn heap_cmp(&self, other: &Cost) -> Ordering {
        match (self, other) {
            (Cost::Tracked(a), Cost::Tracked(b)) => a.total_cmp(b),
            (Cost::Tracked(_), _) => Ordering::Greater,
            (_, Cost::Tracked(_)) => Ordering::Less,
            _ => Ordering::Equal,
        }
    }
}

impl std::fmt::Display for Cost {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Cost::Tracked(v) => write!(f, "{v}"),
            Cost::Retired => f.write_str("retired"),
            Cost::Fixed => f.write_str("fixed"),
        }
    }
}
