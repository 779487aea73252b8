//! Heuristic-guided search.
//!
//! A* folds a straight-line estimate of the remaining cost into each queue
//! rank. The estimate never overestimates (no road is shorter than the
//! great-circle distance, and nothing legal drives faster than the graph's
//! maximum speed), so results stay optimal while far fewer nodes settle.

use num_traits::Zero;

use crate::cost::Cost;
use crate::geo::Point;
use crate::graph::Graph;
use crate::graph::Node;
use crate::graph::NodeId;
use crate::query::ArcFilter;
use crate::query::CostMode;
use crate::query::Query;
use crate::query::SearchObserver;
use crate::search::RankingPolicy;
use crate::search::SearchEngine;
use crate::search::SearchError;
use crate::search::SearchResult;

/// The ranking tuple for A*
///
/// We prefer better f-values, and tie break for lower remaining estimates:
/// among equally-promising entries the one closer to the destination (the
/// larger accumulated cost) goes first, which cuts re-expansions on the
/// frontier.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct AStarRank {
    f: Cost,
    h: Cost,
}

impl AStarRank {
    #[must_use]
    pub fn new(cost: Cost, estimate: Cost) -> Self {
        Self {
            f: cost + estimate,
            h: estimate,
        }
    }
}

/// Policy for A*: straight-line distance to the destination, converted to the
/// query's cost units.
#[derive(Copy, Clone, Debug)]
pub struct StraightLineEstimate {
    destination: Point,
    mode: CostMode,
    /// Graph-wide legal maximum speed, km/h. Bounds every travel time from
    /// below in `Time` mode.
    maximum_speed: f64,
}

impl StraightLineEstimate {
    pub fn new(graph: &Graph, destination: NodeId, mode: CostMode) -> Result<Self, SearchError> {
        let destination = graph
            .node(destination)
            .ok_or(SearchError::UnknownNode(destination))?;
        Ok(Self {
            destination: *destination.point(),
            mode,
            maximum_speed: graph.maximum_speed(),
        })
    }
}

impl RankingPolicy for StraightLineEstimate {
    type Rank = AStarRank;

    fn estimate(&self, _graph: &Graph, node: &Node) -> Cost {
        let distance = node.point().distance_to(&self.destination);
        match self.mode {
            CostMode::Length => Cost::new(distance),
            CostMode::Time if self.maximum_speed > 0.0 => {
                Cost::new(3.6 * distance / self.maximum_speed)
            }
            // An arc-less graph has no speed to divide by; every pair is
            // infeasible anyway.
            CostMode::Time => Cost::zero(),
        }
    }

    #[inline(always)]
    fn rank(&self, cost: Cost, estimate: Cost) -> Self::Rank {
        AStarRank::new(cost, estimate)
    }
}

/// Runs one A* query against `graph`.
pub fn astar<F, O>(
    graph: &Graph,
    query: &Query<F>,
    observer: &mut O,
) -> Result<SearchResult, SearchError>
where
    F: ArcFilter,
    O: SearchObserver,
{
    let policy = StraightLineEstimate::new(graph, query.destination, query.mode)?;
    SearchEngine::new(graph, policy).run(query, observer)
}
