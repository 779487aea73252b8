//! Query descriptors, arc admissibility filters and search observers.

use crate::cost::Cost;
use crate::graph::Arc;
use crate::graph::NodeId;

/// Which scalar a query minimises.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum CostMode {
    /// Physical length, in meters.
    Length,
    /// Travel time at each arc's legal maximum speed, in seconds.
    Time,
}

impl CostMode {
    /// The cost of traversing `arc` under this mode.
    #[inline(always)]
    pub fn arc_cost(&self, arc: &Arc) -> Cost {
        match self {
            CostMode::Length => Cost::new(arc.length()),
            CostMode::Time => Cost::new(arc.minimum_travel_time()),
        }
    }
}

/// Decides whether a query may use an arc.
pub trait ArcFilter {
    fn is_allowed(&self, arc: &Arc) -> bool;
}

/// Allows every arc.
#[derive(Copy, Clone, Debug, Default)]
pub struct AllArcs;

impl ArcFilter for AllArcs {
    #[inline(always)]
    fn is_allowed(&self, _arc: &Arc) -> bool {
        true
    }
}

impl<F> ArcFilter for F
where
    F: Fn(&Arc) -> bool,
{
    #[inline(always)]
    fn is_allowed(&self, arc: &Arc) -> bool {
        self(arc)
    }
}

/// One routing request against a graph.
#[derive(Copy, Clone, Debug)]
pub struct Query<F = AllArcs> {
    pub origin: NodeId,
    pub destination: NodeId,
    pub mode: CostMode,
    pub filter: F,
}

impl Query<AllArcs> {
    pub fn new(origin: NodeId, destination: NodeId, mode: CostMode) -> Self {
        Self {
            origin,
            destination,
            mode,
            filter: AllArcs,
        }
    }
}

impl<F: ArcFilter> Query<F> {
    pub fn with_filter(origin: NodeId, destination: NodeId, mode: CostMode, filter: F) -> Self {
        Self {
            origin,
            destination,
            mode,
            filter,
        }
    }
}

/// Progress notification fired synchronously, in loop order, during a search.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Event {
    /// The origin's label was seeded.
    OriginProcessed(NodeId),
    /// A node went from unreached to reached for the first time.
    NodeReached(NodeId),
    /// A node's cost became final.
    NodeSettled(NodeId),
    /// The destination was settled with a route to it.
    DestinationReached(NodeId),
}

/// Receives search events.
///
/// Observers must not block and cannot touch engine state; the engine calls
/// them in-line from the relaxation loop.
pub trait SearchObserver {
    fn on_event(&mut self, _event: Event) {}
}

/// Ignores every event.
#[derive(Copy, Clone, Debug, Default)]
pub struct SilentObserver;

impl SearchObserver for SilentObserver {}

/// Records events in order, for the caller to inspect or drain afterwards.
#[derive(Debug, Default)]
pub struct EventLog {
    events: Vec<Event>,
}

impl EventLog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    /// Takes the recorded events out of the log.
    pub fn drain(&mut self) -> Vec<Event> {
        std::mem::take(&mut self.events)
    }

    /// How many nodes were settled; a proxy for search effort.
    pub fn settled_count(&self) -> usize {
        self.events
            .iter()
            .filter(|event| matches!(event, Event::NodeSettled(_)))
            .count()
    }
}

impl SearchObserver for EventLog {
    fn on_event(&mut self, event: Event) {
        self.events.push(event);
    }
}
