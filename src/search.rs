//! The generic relaxation loop shared by Dijkstra and A*.
//!
//! The engine owns no per-query state between calls: every `run` builds a
//! fresh label array and queue, so one engine (and one graph) can serve any
//! number of queries.

use num_traits::Zero;
use thiserror::Error;

use crate::cost::Cost;
use crate::graph::Graph;
use crate::graph::Node;
use crate::graph::NodeId;
use crate::heap::HeapError;
use crate::heap::OpenHeap;
use crate::label::Label;
use crate::path::Path;
use crate::query::ArcFilter;
use crate::query::Event;
use crate::query::Query;
use crate::query::SearchObserver;

#[derive(Debug, Error, PartialEq)]
pub enum SearchError {
    #[error("{0} is not a node of this graph")]
    UnknownNode(NodeId),
    /// The queue lost track of a reached, unsettled node. The query cannot
    /// continue: finishing it anyway could silently return a non-optimal
    /// route.
    #[error("queue out of sync: {0}")]
    QueueOutOfSync(#[from] HeapError),
}

/// Terminal outcome of a query.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchResult {
    /// A least-cost route honoring the query's filter.
    Optimal(Path),
    /// No route exists between origin and destination under the filter.
    Infeasible,
}

impl SearchResult {
    #[inline(always)]
    pub fn is_optimal(&self) -> bool {
        matches!(self, SearchResult::Optimal(_))
    }

    pub fn path(&self) -> Option<&Path> {
        match self {
            SearchResult::Optimal(path) => Some(path),
            SearchResult::Infeasible => None,
        }
    }
}

/// The strategy separating Dijkstra from A*: how labels get their fixed
/// remaining-cost estimate, and how `(cost, estimate)` become a queue rank.
///
/// Estimates must never exceed the true remaining cost, or routes stop being
/// optimal.
pub trait RankingPolicy {
    type Rank: Copy + Ord + std::fmt::Debug;

    /// Fixed estimate of the remaining cost from `node` to the destination.
    fn estimate(&self, graph: &Graph, node: &Node) -> Cost;

    /// Queue priority for a label with accumulated `cost` and `estimate`.
    fn rank(&self, cost: Cost, estimate: Cost) -> Self::Rank;
}

/// Drives queries over one graph with one ranking policy.
#[derive(Debug)]
pub struct SearchEngine<'g, P>
where
    P: RankingPolicy,
{
    graph: &'g Graph,
    policy: P,
}

impl<'g, P> SearchEngine<'g, P>
where
    P: RankingPolicy,
{
    #[must_use]
    pub fn new(graph: &'g Graph, policy: P) -> Self {
        Self { graph, policy }
    }

    /// Runs one query to completion.
    ///
    /// Infeasibility is a result, not an error; errors are malformed queries
    /// and internal invariant violations.
    pub fn run<F, O>(
        &self,
        query: &Query<F>,
        observer: &mut O,
    ) -> Result<SearchResult, SearchError>
    where
        F: ArcFilter,
        O: SearchObserver,
    {
        let graph = self.graph;
        if !graph.contains(query.origin) {
            return Err(SearchError::UnknownNode(query.origin));
        }
        if !graph.contains(query.destination) {
            return Err(SearchError::UnknownNode(query.destination));
        }
        log::debug!(
            "routing {} -> {} ({:?})",
            query.origin,
            query.destination,
            query.mode
        );

        let mut labels: Vec<Label> = graph
            .nodes()
            .iter()
            .map(|node| Label::new(self.policy.estimate(graph, node)))
            .collect();
        let mut open = OpenHeap::new(graph.size());

        labels[query.origin.index()].seed();
        observer.on_event(Event::OriginProcessed(query.origin));
        open.insert(
            query.origin,
            self.policy
                .rank(Cost::zero(), labels[query.origin.index()].estimate()),
        );

        while let Some((current, _rank)) = open.extract_min() {
            let current_cost = labels[current.index()].cost();

            for arc in graph.outgoing(current) {
                if !query.filter.is_allowed(arc) {
                    continue;
                }
                let next = arc.destination();
                let next_label = &labels[next.index()];
                if next_label.is_settled() {
                    continue;
                }

                let old_cost = next_label.cost();
                let new_cost = current_cost + query.mode.arc_cost(arc);
                if !old_cost.is_finite() && new_cost.is_finite() {
                    observer.on_event(Event::NodeReached(next));
                }
                if new_cost < old_cost {
                    // Decrease-key: drop the stale entry, reinsert with the
                    // improved rank.
                    if old_cost.is_finite() {
                        open.remove(next)?;
                    }
                    let next_label = &mut labels[next.index()];
                    next_label.improve(new_cost, *arc);
                    open.insert(next, self.policy.rank(new_cost, next_label.estimate()));
                }
            }

            labels[current.index()].settle();
            observer.on_event(Event::NodeSettled(current));
            log::trace!("settled {current} at {current_cost}");

            if current == query.destination {
                break;
            }
        }

        self.assemble(query.origin, query.destination, &labels, observer)
    }

    fn assemble<O>(
        &self,
        origin: NodeId,
        destination: NodeId,
        labels: &[Label],
        observer: &mut O,
    ) -> Result<SearchResult, SearchError>
    where
        O: SearchObserver,
    {
        if destination == origin {
            observer.on_event(Event::DestinationReached(destination));
            return Ok(SearchResult::Optimal(Path::single_node(self.graph, origin)));
        }
        if labels[destination.index()].predecessor().is_none() {
            log::debug!("{destination} is unreachable from {origin}");
            return Ok(SearchResult::Infeasible);
        }

        observer.on_event(Event::DestinationReached(destination));
        let mut arcs = Vec::new();
        let mut predecessor = labels[destination.index()].predecessor();
        while let Some(arc) = predecessor {
            arcs.push(arc);
            predecessor = labels[arc.origin().index()].predecessor();
        }
        arcs.reverse();
        Ok(SearchResult::Optimal(Path::from_arcs(self.graph, arcs)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algorithms::dijkstra::Dijkstra;
    use crate::geo::Point;
    use crate::graph::Arc;
    use crate::query::CostMode;
    use crate::query::EventLog;
    use crate::query::SilentObserver;

    fn n(id: u32) -> NodeId {
        NodeId::new(id)
    }

    /// Five nodes; a detour 0 -> 1 -> 2 (4m + 4m) beating a direct 10m arc,
    /// plus two nodes connected to nothing.
    fn detour_graph() -> Graph {
        let points = (0..5).map(|i| Point::new(0.0, i as f64 * 1e-5)).collect();
        let arcs = vec![
            Arc::new(n(0), n(1), 4.0, 50.0),
            Arc::new(n(1), n(2), 4.0, 50.0),
            Arc::new(n(0), n(2), 10.0, 50.0),
        ];
        Graph::new("detour", points, arcs).unwrap()
    }

    #[test]
    fn detour_beats_direct_arc() {
        let graph = detour_graph();
        let engine = SearchEngine::new(&graph, Dijkstra);
        let query = Query::new(n(0), n(2), CostMode::Length);

        let result = engine.run(&query, &mut SilentObserver).unwrap();
        let path = result.path().unwrap();
        assert!(path.is_valid());
        assert_eq!(path.length(), 8.0);
        assert_eq!(path.size(), 3);
        assert_eq!(path.origin(), Some(n(0)));
        assert_eq!(path.destination(), Some(n(2)));
    }

    #[test]
    fn disconnected_pair_is_infeasible() {
        let graph = detour_graph();
        let engine = SearchEngine::new(&graph, Dijkstra);
        let query = Query::new(n(0), n(4), CostMode::Length);

        let result = engine.run(&query, &mut SilentObserver).unwrap();
        assert_eq!(result, SearchResult::Infeasible);
        assert!(result.path().is_none());
    }

    #[test]
    fn origin_equals_destination() {
        let graph = detour_graph();
        let engine = SearchEngine::new(&graph, Dijkstra);
        let query = Query::new(n(1), n(1), CostMode::Length);

        let result = engine.run(&query, &mut SilentObserver).unwrap();
        let path = result.path().unwrap();
        assert!(path.is_valid());
        assert_eq!(path.size(), 1);
        assert_eq!(path.length(), 0.0);
        assert!(path.arcs().is_empty());
    }

    #[test]
    fn unknown_nodes_are_rejected() {
        let graph = detour_graph();
        let engine = SearchEngine::new(&graph, Dijkstra);

        let query = Query::new(n(0), n(99), CostMode::Length);
        assert_eq!(
            engine.run(&query, &mut SilentObserver),
            Err(SearchError::UnknownNode(n(99)))
        );
        let query = Query::new(n(99), n(0), CostMode::Length);
        assert_eq!(
            engine.run(&query, &mut SilentObserver),
            Err(SearchError::UnknownNode(n(99)))
        );
    }

    #[test]
    fn filters_reroute_queries() {
        let graph = detour_graph();
        let engine = SearchEngine::new(&graph, Dijkstra);

        // With the detour forbidden, the direct arc is all that is left.
        let no_detour = |arc: &Arc| arc.length() > 5.0;
        let query = Query::with_filter(n(0), n(2), CostMode::Length, no_detour);
        let result = engine.run(&query, &mut SilentObserver).unwrap();
        assert_eq!(result.path().unwrap().length(), 10.0);

        // With everything forbidden, there is no route at all.
        let nothing = |_arc: &Arc| false;
        let query = Query::with_filter(n(0), n(2), CostMode::Length, nothing);
        let result = engine.run(&query, &mut SilentObserver).unwrap();
        assert_eq!(result, SearchResult::Infeasible);
    }

    #[test]
    fn events_fire_in_loop_order() {
        let graph = detour_graph();
        let engine = SearchEngine::new(&graph, Dijkstra);
        let query = Query::new(n(0), n(2), CostMode::Length);

        let mut log = EventLog::new();
        engine.run(&query, &mut log).unwrap();
        let events = log.events();

        assert_eq!(events.first(), Some(&Event::OriginProcessed(n(0))));
        assert_eq!(events.last(), Some(&Event::DestinationReached(n(2))));

        // Every node is reached before it settles, and settles exactly once.
        for &node in &[n(1), n(2)] {
            let reached = events
                .iter()
                .position(|e| *e == Event::NodeReached(node))
                .unwrap();
            let settled = events
                .iter()
                .position(|e| *e == Event::NodeSettled(node))
                .unwrap();
            assert!(reached < settled);
        }
        assert_eq!(log.settled_count(), 3);
    }

    #[test]
    fn runs_are_deterministic() {
        let graph = detour_graph();
        let engine = SearchEngine::new(&graph, Dijkstra);
        let query = Query::new(n(0), n(2), CostMode::Time);

        let mut log_a = EventLog::new();
        let mut log_b = EventLog::new();
        let a = engine.run(&query, &mut log_a).unwrap();
        let b = engine.run(&query, &mut log_b).unwrap();
        assert_eq!(a, b);
        assert_eq!(log_a.events(), log_b.events());
    }
}
