use crate::types::EdgeWeight;

/// Contribution of a third node `w` to the induced costs of an edge `uv`.
///
/// Both methods receive the weights of `uw` and `vw`, which may be the
/// [`FORBIDDEN`](crate::types::FORBIDDEN) or
/// [`PERMANENT`](crate::types::PERMANENT) sentinels. Implementations must be
/// pure, symmetric in their two arguments and return a nonnegative value.
pub trait CostModel {
    /// Cost added to removing `uv`.
    fn triple_forbid(&self, w_uw: EdgeWeight, w_vw: EdgeWeight) -> EdgeWeight;

    /// Cost added to keeping `uv`.
    fn triple_permit(&self, w_uw: EdgeWeight, w_vw: EdgeWeight) -> EdgeWeight;
}

impl<M: CostModel + ?Sized> CostModel for &M {
    fn triple_forbid(&self, w_uw: EdgeWeight, w_vw: EdgeWeight) -> EdgeWeight {
        (**self).triple_forbid(w_uw, w_vw)
    }

    fn triple_permit(&self, w_uw: EdgeWeight, w_vw: EdgeWeight) -> EdgeWeight {
        (**self).triple_permit(w_uw, w_vw)
    }
}

/// A [`CostModel`] backed by two closures.
pub struct FnCostModel<F, P> {
    forbid: F,
    permit: P,
}

impl<F, P> FnCostModel<F, P>
where
    F: Fn(EdgeWeight, EdgeWeight) -> EdgeWeight,
    P: Fn(EdgeWeight, EdgeWeight) -> EdgeWeight,
{
    pub fn new(forbid: F, permit: P) -> Self {
        FnCostModel { forbid, permit }
    }
}

impl<F, P> CostModel for FnCostModel<F, P>
where
    F: Fn(EdgeWeight, EdgeWeight) -> EdgeWeight,
    P: Fn(EdgeWeight, EdgeWeight) -> EdgeWeight,
{
    fn triple_forbid(&self, w_uw: EdgeWeight, w_vw: EdgeWeight) -> EdgeWeight {
        (self.forbid)(w_uw, w_vw)
    }

    fn triple_permit(&self, w_uw: EdgeWeight, w_vw: EdgeWeight) -> EdgeWeight {
        (self.permit)(w_uw, w_vw)
    }
}
