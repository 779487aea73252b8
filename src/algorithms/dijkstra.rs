//! Uninformed least-cost search.

use num_traits::Zero;

use crate::cost::Cost;
use crate::graph::Graph;
use crate::graph::Node;
use crate::query::ArcFilter;
use crate::query::Query;
use crate::query::SearchObserver;
use crate::search::RankingPolicy;
use crate::search::SearchEngine;
use crate::search::SearchError;
use crate::search::SearchResult;

/// The ranking value for Dijkstra
///
/// We prefer better accumulated costs; there is nothing else to go on.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct DijkstraRank {
    cost: Cost,
}

impl DijkstraRank {
    #[must_use]
    pub fn new(cost: Cost) -> Self {
        Self { cost }
    }
}

/// Policy for plain Dijkstra: zero estimates, rank by accumulated cost.
#[derive(Copy, Clone, Debug, Default)]
pub struct Dijkstra;

impl RankingPolicy for Dijkstra {
    type Rank = DijkstraRank;

    #[inline(always)]
    fn estimate(&self, _graph: &Graph, _node: &Node) -> Cost {
        Cost::zero()
    }

    #[inline(always)]
    fn rank(&self, cost: Cost, _estimate: Cost) -> Self::Rank {
        DijkstraRank::new(cost)
    }
}

/// Runs one Dijkstra query against `graph`.
pub fn dijkstra<F, O>(
    graph: &Graph,
    query: &Query<F>,
    observer: &mut O,
) -> Result<SearchResult, SearchError>
where
    F: ArcFilter,
    O: SearchObserver,
{
    SearchEngine::new(graph, Dijkstra).run(query, observer)
}
