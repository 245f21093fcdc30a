use tracing::{Level, debug, error, info, trace};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::bundle::Bundles;
use crate::cost::{Cost, CostModel, CostTable};
use crate::error::{CostKind, Error, Result};
use crate::graph::SparseGraph;
use crate::heap::IndexedMaxHeap;
use crate::types::*;
use crate::util::rank_vec::RankVec;

/// Heap contents in array order, for diagnostics.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct HeapSnapshot {
    pub forbid: Vec<(Edge, Cost)>,
    pub permit: Vec<(Edge, Cost)>,
}

/// Induced-cost engine for cluster editing.
///
/// Tracks, per ranked edge of `graph`, the cost of forbidding and of
/// permitting it, and keeps one max-heap for each. Ranks merged by
/// [`merge_edges`](Self::merge_edges) share a single bundle whose
/// representative carries the summed costs.
///
/// Single-threaded: every mutation touches several tables at once.
pub struct EdgeHeap<'g, G: SparseGraph + ?Sized> {
    graph: &'g G,
    costs: CostTable,
    forbid_heap: IndexedMaxHeap,
    permit_heap: IndexedMaxHeap,
    bundles: Bundles,
    unprocessed: usize,
    initialized: bool,
}

impl<'g, G: SparseGraph + ?Sized> EdgeHeap<'g, G> {
    /// An engine with every rank untracked. Call
    /// [`init_induced_costs`](Self::init_induced_costs) before use.
    pub fn new(graph: &'g G) -> Self {
        let costs = CostTable::untracked(graph.num_edges());
        EdgeHeap {
            graph,
            forbid_heap: IndexedMaxHeap::build(&costs.forbid),
            permit_heap: IndexedMaxHeap::build(&costs.permit),
            bundles: Bundles::singletons(costs.forbid.len()),
            costs,
            unprocessed: 0,
            initialized: false,
        }
    }

    /// Compute all induced costs and build both heaps. May only run once.
    pub fn init_induced_costs<M: CostModel + ?Sized>(&mut self, model: &M) -> Result<()> {
        if self.initialized {
            return Err(Error::AlreadyInitialized);
        }
        let costs = CostTable::compute(self.graph, model)?;
        self.forbid_heap = IndexedMaxHeap::build(&costs.forbid);
        self.permit_heap = IndexedMaxHeap::build(&costs.permit);
        self.bundles = Bundles::singletons(costs.forbid.len());
        self.unprocessed = costs.tracked;
        self.costs = costs;
        self.initialized = true;
        info!(
            tracked = self.unprocessed,
            num_nodes = self.graph.num_nodes(),
            num_edges = self.graph.num_edges(),
            "induced costs initialised"
        );
        Ok(())
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    // -------------------------------------------------------------------
    // Queries
    // -------------------------------------------------------------------

    /// Edge with the largest forbid cost, or `None` if nothing is tracked.
    pub fn max_forbid_edge(&self) -> Option<Edge> {
        self.max_edge(CostKind::Forbid)
    }

    /// Edge with the largest permit cost, or `None` if nothing is tracked.
    pub fn max_permit_edge(&self) -> Option<Edge> {
        self.max_edge(CostKind::Permit)
    }

    fn max_edge(&self, kind: CostKind) -> Option<Edge> {
        let heap = self.heap(kind);
        if heap.len() <= 1 {
            return None;
        }
        let rank = heap.peek()?;
        let cost = self.costs.get(kind)[rank];
        if !cost.is_tracked() {
            return None;
        }
        if tracing::enabled!(Level::TRACE) {
            self.dump_heap(kind);
        }
        let edge = self.costs.edges[rank];
        debug!(%kind, rank = rank.0, %edge, %cost, "max edge");
        Some(edge)
    }

    /// Current forbid cost of the bundle containing `edge`.
    pub fn forbid_cost(&self, edge: Edge) -> Result<Cost> {
        self.cost(edge, CostKind::Forbid)
    }

    /// Current permit cost of the bundle containing `edge`.
    pub fn permit_cost(&self, edge: Edge) -> Result<Cost> {
        self.cost(edge, CostKind::Permit)
    }

    fn cost(&self, edge: Edge, kind: CostKind) -> Result<Cost> {
        let Some(rank) = self.rank_of(edge) else {
            error!(%edge, %kind, "cost lookup on an edge without rank");
            return Err(Error::UntrackedEdge { edge });
        };
        Ok(self.costs.get(kind)[self.bundles.representative(rank)])
    }

    /// Number of bundles still tracked.
    pub fn num_unprocessed(&self) -> usize {
        self.unprocessed
    }

    /// Edge holding `rank`, as recorded during initialisation.
    pub fn edge_of(&self, rank: RankId) -> Option<Edge> {
        self.costs
            .edges
            .get(rank)
            .copied()
            .filter(|e| *e != INVALID_EDGE)
    }

    /// Representative rank of the bundle containing `edge`.
    pub fn representative(&self, edge: Edge) -> Option<RankId> {
        self.rank_of(edge).map(|r| self.bundles.representative(r))
    }

    /// Edges sharing a bundle with `edge`, `edge` itself included.
    pub fn bundle_members(&self, edge: Edge) -> Vec<Edge> {
        let Some(rep) = self.representative(edge) else {
            return Vec::new();
        };
        self.bundles
            .members(rep)
            .iter()
            .map(|&r| self.costs.edges[r])
            .collect()
    }

    // -------------------------------------------------------------------
    // Mutations
    // -------------------------------------------------------------------

    /// Add `delta` to the forbid cost of the bundle containing `edge`.
    pub fn increase_forbid_cost(&mut self, edge: Edge, delta: EdgeWeight) -> Result<()> {
        self.increase(edge, delta, CostKind::Forbid)
    }

    /// Add `delta` to the permit cost of the bundle containing `edge`.
    pub fn increase_permit_cost(&mut self, edge: Edge, delta: EdgeWeight) -> Result<()> {
        self.increase(edge, delta, CostKind::Permit)
    }

    /// The cost is clamped at zero. A zero delta, an edge without rank and a
    /// retired bundle are all no-ops.
    fn increase(&mut self, edge: Edge, delta: EdgeWeight, kind: CostKind) -> Result<()> {
        if delta.is_nan() {
            error!(%edge, %kind, "NaN cost delta");
            return Err(Error::NanDelta { edge });
        }
        if delta == 0.0 {
            return Ok(());
        }
        let Some(rank) = self.rank_of(edge) else {
            return Ok(());
        };
        let rep = self.bundles.representative(rank);
        let (costs, heap) = self.table_and_heap(kind);
        if !costs[rep].is_tracked() {
            return Ok(());
        }
        costs[rep] = costs[rep].shifted(delta);
        if delta > 0.0 {
            heap.sift_up(rep, costs);
        } else {
            heap.sift_down(rep, costs);
        }
        Ok(())
    }

    /// Declare the bundles of `e1` and `e2` equivalent.
    ///
    /// The smaller bundle is folded into the larger; the survivor carries the
    /// summed costs and the absorbed representative is retired. Edges without
    /// rank and edges already sharing a bundle are no-ops. Merging into a
    /// bundle that is no longer tracked is rejected without any change.
    pub fn merge_edges(&mut self, e1: Edge, e2: Edge) -> Result<()> {
        let (Some(r1), Some(r2)) = (self.rank_of(e1), self.rank_of(e2)) else {
            return Ok(());
        };
        let b1 = self.bundles.representative(r1);
        let b2 = self.bundles.representative(r2);
        if b1 == b2 {
            return Ok(());
        }

        let plan = self.bundles.plan_union(b1, b2);
        for rank in [plan.absorbed, plan.survivor] {
            for kind in [CostKind::Forbid, CostKind::Permit] {
                if !self.costs.get(kind)[rank].is_tracked() {
                    error!(rank = rank.0, %kind, %e1, %e2, "merge with an untracked representative");
                    return Err(Error::RetiredRepresentative { rank, kind });
                }
            }
        }

        self.bundles.apply(plan);
        for kind in [CostKind::Forbid, CostKind::Permit] {
            let (costs, heap) = self.table_and_heap(kind);
            let added = costs[plan.absorbed].value().unwrap_or(0.0);
            costs[plan.survivor] = costs[plan.survivor].shifted(added);
            heap.sift_up(plan.survivor, costs);
        }
        debug!(
            survivor = plan.survivor.0,
            absorbed = plan.absorbed.0,
            size = self.bundles.members(plan.survivor).len(),
            "merged bundles"
        );
        self.remove_rank(plan.absorbed);
        Ok(())
    }

    /// Retire the rank of `edge`. Returns whether anything was retired; an
    /// edge already absorbed into another bundle is a no-op.
    pub fn remove_edge(&mut self, edge: Edge) -> bool {
        match self.rank_of(edge) {
            Some(rank) => self.remove_rank(rank),
            None => false,
        }
    }

    /// Retire `rank` itself: both costs become [`Cost::Retired`] and the rank
    /// sinks to the bottom of both heaps. Returns whether anything was retired;
    /// the dummy, unknown ranks and already retired ranks are no-ops.
    pub fn remove_rank(&mut self, rank: RankId) -> bool {
        if rank.is_dummy() || !self.costs.forbid.contains(rank) {
            return false;
        }
        if !self.costs.forbid[rank].is_tracked() || !self.costs.permit[rank].is_tracked() {
            return false;
        }
        debug!(rank = rank.0, edge = %self.costs.edges[rank], "removing edge from heap");
        for kind in [CostKind::Forbid, CostKind::Permit] {
            let (costs, heap) = self.table_and_heap(kind);
            costs[rank] = Cost::Retired;
            heap.sift_down(rank, costs);
        }
        self.unprocessed -= 1;
        true
    }

    // -------------------------------------------------------------------
    // Diagnostics
    // -------------------------------------------------------------------

    /// Both heaps in array order.
    pub fn snapshot(&self) -> HeapSnapshot {
        let dump = |kind: CostKind| -> Vec<(Edge, Cost)> {
            self.heap(kind)
                .as_slice()
                .iter()
                .map(|&r| (self.costs.edges[r], self.costs.get(kind)[r]))
                .collect()
        };
        HeapSnapshot {
            forbid: dump(CostKind::Forbid),
            permit: dump(CostKind::Permit),
        }
    }

    fn dump_heap(&self, kind: CostKind) {
        let costs = self.costs.get(kind);
        let contents: Vec<String> = self
            .heap(kind)
            .as_slice()
            .iter()
            .map(|&r| format!("{}={}", self.costs.edges[r], costs[r]))
            .collect();
        trace!(%kind, heap = %contents.join(" ; "), "heap contents");
    }

    /// Check every structural invariant and report the first violation.
    ///
    /// Covers heap order, the position mirrors, the bundle partition, cost
    /// non-negativity, retirement of absorbed ranks and the unprocessed count.
    pub fn validate(&self) -> Result<()> {
        for kind in [CostKind::Forbid, CostKind::Permit] {
            self.heap(kind)
                .validate(self.costs.get(kind))
                .map_err(|e| Error::HeapInvariant(format!("{kind} heap: {e}")))?;
        }
        self.bundles.validate().map_err(Error::HeapInvariant)?;

        let mut live = 0;
        for rank in self.costs.forbid.ranks() {
            let rep = self.bundles.representative(rank);
            for kind in [CostKind::Forbid, CostKind::Permit] {
                let cost = self.costs.get(kind)[rank];
                if cost.value().is_some_and(|v| v.is_nan() || v < 0.0) {
                    return Err(Error::HeapInvariant(format!(
                        "rank {} has {kind} cost {cost}",
                        rank.0
                    )));
                }
                if rep != rank && cost.is_tracked() {
                    return Err(Error::HeapInvariant(format!(
                        "absorbed rank {} still has a tracked {kind} cost",
                        rank.0
                    )));
                }
            }
            if rep == rank && !rank.is_dummy() && self.costs.forbid[rank].is_tracked() {
                live += 1;
            }
        }
        if live != self.unprocessed {
            return Err(Error::HeapInvariant(format!(
                "{live} live bundles but {} unprocessed",
                self.unprocessed
            )));
        }
        Ok(())
    }

    // -------------------------------------------------------------------
    // Internals
    // -------------------------------------------------------------------

    /// Rank of `edge` if it is a real rank of this engine.
    fn rank_of(&self, edge: Edge) -> Option<RankId> {
        if !edge.is_valid() {
            return None;
        }
        let rank = self.graph.rank_of(edge);
        (!rank.is_dummy() && self.costs.forbid.contains(rank)).then_some(rank)
    }

    fn heap(&self, kind: CostKind) -> &IndexedMaxHeap {
        match kind {
            CostKind::Forbid => &self.forbid_heap,
            CostKind::Permit => &self.permit_heap,
        }
    }

    fn table_and_heap(
        &mut self,
        kind: CostKind,
    ) -> (&mut RankVec<Cost>, &mut IndexedMaxHeap) {
        match kind {
            CostKind::Forbid => (&mut self.costs.forbid, &mut self.forbid_heap),
            CostKind::Permit => (&mut self.costs.permit, &mut self.permit_heap),
        }
    }
}
