//! Bundles of ranks that the solver declared interchangeable.
//!
//! Each rank points at its bundle's representative, and each representative
//! owns the explicit member list. Merging appends the smaller list to the
//! larger one and retargets the moved members, so a rank is moved at most
//! `O(log n)` times over any merge sequence. There is no path compression:
//! every member points directly at its representative at all times.

use crate::types::RankId;
use crate::util::rank_vec::RankVec;

/// Outcome of a union: which representative lives on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Union {
    pub survivor: RankId,
    pub absorbed: RankId,
}

#[derive(Debug, Clone)]
pub struct Bundles {
    bundle_of: RankVec<RankId>,
    members: RankVec<Vec<RankId>>,
}

impl Bundles {
    /// Every rank in `0..len` as its own singleton bundle.
    pub fn singletons(len: usize) -> Self {
        Bundles {
            bundle_of: RankVec::from_fn(len, |i| RankId(i as u32)),
            members: RankVec::from_fn(len, |i| vec![RankId(i as u32)]),
        }
    }

    #[inline]
    pub fn representative(&self, rank: RankId) -> RankId {
        self.bundle_of[rank]
    }

    pub fn same_bundle(&self, a: RankId, b: RankId) -> bool {
        self.bundle_of[a] == self.bundle_of[b]
    }

    /// Members of the bundle represented by `rep`; empty if `rep` was absorbed.
    pub fn members(&self, rep: RankId) -> &[RankId] {
        &self.members[rep]
    }

    pub fn len(&self) -> usize {
        self.bundle_of.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bundle_of.is_empty()
    }

    /// Number of distinct bundles, dummy included.
    pub fn num_bundles(&self) -> usize {
        self.members.iter().filter(|(_, m)| !m.is_empty()).count()
    }

    /// Which of two distinct representatives would survive a union.
    ///
    /// The larger bundle survives; on a tie the second one does.
    pub fn plan_union(&self, a: RankId, b: RankId) -> Union {
        if self.members[a].len() > self.members[b].len() {
            Union {
                survivor: a,
                absorbed: b,
            }
        } else {
            Union {
                survivor: b,
                absorbed: a,
            }
        }
    }

    /// Fold the bundle of `plan.absorbed` into `plan.survivor`.
    pub fn apply(&mut self, plan: Union) {
        let moved = std::mem::take(&mut self.members[plan.absorbed]);
        for &rank in &moved {
            self.bundle_of[rank] = plan.survivor;
        }
        self.members[plan.survivor].extend(moved);
    }

    /// Check that the member lists partition all ranks and agree with the pointers.
    pub fn validate(&self) -> Result<(), String> {
        let mut seen = RankVec::filled(self.len(), false);
        for (rep, members) in self.members.iter() {
            if !members.is_empty() && self.bundle_of[rep] != rep {
                return Err(format!("rank {} has members but is not a representative", rep.0));
            }
            for &m in members {
                if std::mem::replace(&mut seen[m], true) {
                    return Err(format!("rank {} appears in two bundles", m.0));
                }
                if self.bundle_of[m] != rep {
                    return Err(format!(
                        "rank {} is listed under {} but points at {}",
                        m.0, rep.0, self.bundle_of[m].0
                    ));
                }
            }
        }
        if let Some((rank, _)) = seen.iter().find(|(_, s)| !**s) {
            return Err(format!("rank {} belongs to no bundle", rank.0));
        }
        Ok(())
    }
}
