use std::ops::{Index, IndexMut};

use crate::types::RankId;

/// Dense per-rank attribute storage backed by a `Vec`.
///
/// Every engine table (costs, bundle pointers, heap positions, edges) is one
/// `RankVec`, so a rank is the only handle that crosses between them.
#[derive(Debug, Clone, PartialEq)]
pub struct RankVec<T> {
    items: Vec<T>,
}

impl<T: Clone> RankVec<T> {
    /// `len` slots, all set to `fill`.
    pub fn filled(len: usize, fill: T) -> Self {
        RankVec {
            items: vec![fill; len],
        }
    }
}

impl<T> RankVec<T> {
    pub fn new() -> Self {
        RankVec { items: Vec::new() }
    }

    pub fn from_fn(len: usize, f: impl FnMut(usize) -> T) -> Self {
        RankVec {
            items: (0..len).map(f).collect(),
        }
    }

    pub fn get(&self, rank: RankId) -> Option<&T> {
        self.items.get(rank.index())
    }

    /// Whether `rank` addresses a slot of this table.
    #[inline]
    pub fn contains(&self, rank: RankId) -> bool {
        rank.index() < self.items.len()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// All ranks addressable in this table, dummy included.
    pub fn ranks(&self) -> impl Iterator<Item = RankId> + use<T> {
        (0..self.items.len() as u32).map(RankId)
    }

    pub fn iter(&self) -> impl Iterator<Item = (RankId, &T)> {
        self.items
            .iter()
            .enumerate()
            .map(|(i, t)| (RankId(i as u32), t))
    }

    /// Borrow the underlying slice (read-only access while mutating other tables).
    pub fn items(&self) -> &[T] {
        &self.items
    }
}

impl<T> Default for RankVec<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Index<RankId> for RankVec<T> {
    type Output = T;
    fn index(&self, rank: RankId) -> &T {
        &self.items[rank.index()]
    }
}

impl<T> IndexMut<RankId> for RankVec<T> {
    fn index_mut(&mut self, rank: RankId) -> &mut T {
        &mut self.items[rank.index()]
    }
}
