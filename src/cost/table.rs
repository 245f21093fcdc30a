use tracing::{debug, debug_span, error};

use crate::error::{CostKind, Error, Result};
use crate::graph::SparseGraph;
use crate::types::*;
use crate::util::rank_vec::RankVec;

use super::{Cost, CostModel};

/// Per-rank forbid and permit costs plus the rank -> edge table.
#[derive(Debug, Clone)]
pub struct CostTable {
    pub forbid: RankVec<Cost>,
    pub permit: RankVec<Cost>,
    pub edges: RankVec<Edge>,
    /// Number of ranks that started out tracked.
    pub tracked: usize,
}

impl CostTable {
    /// A table of `1 + num_edges` ranks, none of them tracked.
    pub fn untracked(num_edges: usize) -> Self {
        CostTable {
            forbid: RankVec::filled(num_edges + 1, Cost::Fixed),
            permit: RankVec::filled(num_edges + 1, Cost::Fixed),
            edges: RankVec::filled(num_edges + 1, INVALID_EDGE),
            tracked: 0,
        }
    }

    /// Compute the induced costs of every ranked edge of `graph`.
    ///
    /// An edge's own weight goes to its forbid cost when nonnegative and to
    /// its permit cost otherwise; every common neighbour then adds the
    /// model's triple contributions. Common neighbours come from a merge of
    /// the two sorted neighbour lists, so the work is bounded by the number
    /// of triangles.
    pub fn compute<G, M>(graph: &G, model: &M) -> Result<Self>
    where
        G: SparseGraph + ?Sized,
        M: CostModel + ?Sized,
    {
        let num_nodes = graph.num_nodes();
        let mut table = CostTable::untracked(graph.num_edges());
        let mut common = Vec::new();

        let span = debug_span!("induced_costs", num_nodes, num_edges = graph.num_edges());
        let _guard = span.enter();
        let progress_step = (num_nodes / 16).max(1);

        for u in 0..num_nodes {
            let u = NodeId(u as u32);
            let nu = graph.non_zero_neighbours(u);
            for &v in nu {
                if v <= u {
                    continue;
                }
                let uv = Edge::new(u, v);
                let rank = graph.rank_of(uv);
                if rank.is_dummy() || !table.edges.contains(rank) {
                    continue;
                }
                table.edges[rank] = uv;

                let w_uv = graph.rank_weight(rank);
                if is_sentinel_weight(w_uv) {
                    continue;
                }

                let (mut icf, mut icp) = if w_uv >= 0.0 { (w_uv, 0.0) } else { (0.0, -w_uv) };

                sorted_intersection(nu, graph.non_zero_neighbours(v), &mut common);
                for &w in &common {
                    let w_uw = graph.weight(Edge::new(u, w));
                    let w_vw = graph.weight(Edge::new(v, w));
                    icf += model.triple_forbid(w_uw, w_vw);
                    icp += model.triple_permit(w_uw, w_vw);
                }

                table.forbid[rank] = Cost::Tracked(icf);
                table.permit[rank] = Cost::Tracked(icp);
                table.tracked += 1;
            }
            if (u.index() + 1) % progress_step == 0 {
                debug!(done = u.index() + 1, num_nodes, "induced cost progress");
            }
        }

        table.check_nan()?;
        Ok(table)
    }

    fn check_nan(&self) -> Result<()> {
        for (kind, costs) in [(CostKind::Forbid, &self.forbid), (CostKind::Permit, &self.permit)] {
            for (rank, cost) in costs.iter() {
                if cost.value().is_some_and(f64::is_nan) {
                    error!(rank = rank.0, %kind, "NaN induced cost");
                    return Err(Error::NanCost { rank, kind });
                }
            }
        }
        Ok(())
    }

    pub fn get(&self, kind: CostKind) -> &RankVec<Cost> {
        match kind {
            CostKind::Forbid => &self.forbid,
            CostKind::Permit => &self.permit,
        }
    }

}

/// Write the intersection of two ascending slices into `out`.
pub(crate) fn sorted_intersection(a: &[NodeId], b: &[NodeId], out: &mut Vec<NodeId>) {
    out.clear();
    let (mut i, mut j) = (0, 0);
    while i < a.len() && j < b.len() {
        match a[i].cmp(&b[j]) {
            std::cmp::Ordering::Less => i += 1,
            std::cmp::Ordering::Greater => j += 1,
            std::cmp::Ordering::Equal => {
                out.push(a[i]);
                i += 1;
                j += 1;
            }
        }
    }
}
