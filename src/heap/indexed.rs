use crate::cost::Cost;
use crate::types::RankId;
use crate::util::rank_vec::RankVec;

/// Binary max-heap over ranks, ordered by an external cost table.
///
/// `position` mirrors `heap`: `position[heap[i]] == i` for every slot. Costs
/// live outside the heap, so after changing one rank's cost the caller must
/// restore order with [`sift_up`](Self::sift_up) (cost rose) or
/// [`sift_down`](Self::sift_down) (cost fell).
///
/// Index arithmetic is zero-based: parent of `i` is `(i - 1) / 2`, children
/// are `2i + 1` and `2i + 2`.
#[derive(Debug, Clone)]
pub struct IndexedMaxHeap {
    heap: Vec<RankId>,
    position: RankVec<usize>,
}

impl IndexedMaxHeap {
    /// Heap over every rank of `costs`, dummy included.
    ///
    /// A descending sort is already in heap order.
    pub fn build(costs: &RankVec<Cost>) -> Self {
        let mut heap: Vec<RankId> = costs.ranks().collect();
        heap.sort_by(|a, b| costs[*b].heap_cmp(&costs[*a]));
        let mut position = RankVec::filled(heap.len(), 0);
        for (i, &rank) in heap.iter().enumerate() {
            position[rank] = i;
        }
        IndexedMaxHeap { heap, position }
    }

    /// Rank at the root, if the heap is non-empty.
    #[inline]
    pub fn peek(&self) -> Option<RankId> {
        self.heap.first().copied()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    pub fn position(&self, rank: RankId) -> Option<usize> {
        self.position.get(rank).copied()
    }

    /// Ranks in array order.
    pub fn as_slice(&self) -> &[RankId] {
        &self.heap
    }

    #[inline]
    fn swap(&mut self, a: usize, b: usize) {
        self.heap.swap(a, b);
        self.position[self.heap[a]] = a;
        self.position[self.heap[b]] = b;
    }

    /// Move `rank` towards the root while its parent has a strictly smaller cost.
    pub fn sift_up(&mut self, rank: RankId, costs: &RankVec<Cost>) {
        let Some(mut pos) = self.position(rank) else {
            return;
        };
        while pos > 0 {
            let parent = (pos - 1) / 2;
            if costs[self.heap[parent]].heap_cmp(&costs[self.heap[pos]]).is_ge() {
                break;
            }
            self.swap(pos, parent);
            pos = parent;
        }
    }

    /// Move `rank` towards the leaves while a child has a strictly larger cost,
    /// always swapping with the larger child.
    pub fn sift_down(&mut self, rank: RankId, costs: &RankVec<Cost>) {
        let Some(mut pos) = self.position(rank) else {
            return;
        };
        let n = self.heap.len();
        loop {
            let left = 2 * pos + 1;
            let right = left + 1;
            if left >= n {
                break;
            }
            let mut child = left;
            if right < n && costs[self.heap[left]].heap_cmp(&costs[self.heap[right]]).is_lt() {
                child = right;
            }
            if costs[self.heap[pos]].heap_cmp(&costs[self.heap[child]]).is_ge() {
                break;
            }
            self.swap(pos, child);
            pos = child;
        }
    }

    /// Check heap order and the position mirror against `costs`.
    pub fn validate(&self, costs: &RankVec<Cost>) -> Result<(), String> {
        if self.heap.len() != self.position.len() {
            return Err(format!(
                "heap holds {} ranks but the position mirror has {}",
                self.heap.len(),
                self.position.len()
            ));
        }
        for (i, &rank) in self.heap.iter().enumerate() {
            if self.position[rank] != i {
                return Err(format!(
                    "rank {} sits at {} but the mirror says {}",
                    rank.0, i, self.position[rank]
                ));
            }
            if i > 0 {
                let parent = self.heap[(i - 1) / 2];
                if costs[parent].heap_cmp(&costs[rank]).is_lt() {
                    return Err(format!(
                        "rank {} ({}) is above rank {} ({})",
                        parent.0, costs[parent], rank.0, costs[rank]
                    ));
                }
            }
        }
        Ok(())
    }
}
