//! Per-node search state.
//!
//! One `Label` exists per node per query, stored in a dense array indexed by
//! node id and owned by the engine for the duration of the search.

use num_traits::Zero;

use crate::cost::Cost;
use crate::graph::Arc;

#[derive(Copy, Clone, Debug)]
pub struct Label {
    /// Best known accumulated cost from the origin.
    cost: Cost,
    /// The arc that achieved `cost`.
    predecessor: Option<Arc>,
    /// Once settled, `cost` is final and the node is never revisited.
    settled: bool,
    /// Fixed estimate of the remaining cost to the destination.
    /// Zero for uninformed search.
    estimate: Cost,
}

impl Label {
    pub fn new(estimate: Cost) -> Self {
        Self {
            cost: Cost::infinity(),
            predecessor: None,
            settled: false,
            estimate,
        }
    }

    #[inline(always)]
    pub fn cost(&self) -> Cost {
        self.cost
    }

    #[inline(always)]
    pub fn estimate(&self) -> Cost {
        self.estimate
    }

    #[inline(always)]
    pub fn predecessor(&self) -> Option<Arc> {
        self.predecessor
    }

    #[inline(always)]
    pub fn is_settled(&self) -> bool {
        self.settled
    }

    /// Seeds the origin label.
    pub(crate) fn seed(&mut self) {
        debug_assert!(self.predecessor.is_none());
        self.cost = Cost::zero();
    }

    /// Gives this node a better route through `predecessor`.
    pub(crate) fn improve(&mut self, cost: Cost, predecessor: Arc) {
        debug_assert!(cost < self.cost);
        debug_assert!(!self.settled);
        self.cost = cost;
        self.predecessor = Some(predecessor);
    }

    pub(crate) fn settle(&mut self) {
        debug_assert!(!self.settled);
        self.settled = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::NodeId;

    #[test]
    fn starts_unreached() {
        let label = Label::new(Cost::zero());
        assert!(!label.cost().is_finite());
        assert!(label.predecessor().is_none());
        assert!(!label.is_settled());
    }

    #[test]
    fn improvement_tracks_cost_and_predecessor() {
        let arc = Arc::new(NodeId::new(0), NodeId::new(1), 100.0, 50.0);
        let mut label = Label::new(Cost::zero());
        label.improve(Cost::new(100.0), arc);
        assert_eq!(label.cost(), Cost::new(100.0));
        assert_eq!(label.predecessor(), Some(arc));

        label.improve(Cost::new(80.0), arc);
        assert_eq!(label.cost(), Cost::new(80.0));

        label.settle();
        assert!(label.is_settled());
    }
}
