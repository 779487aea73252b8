//! The static road-network multigraph.
//!
//! A graph owns its nodes and arcs and is never mutated after construction;
//! it may be shared by any number of concurrently running queries. Several
//! parallel arcs between the same two nodes are allowed, which is why routes
//! are arc sequences and never node sequences.

use derive_more::Display;
use smallvec::SmallVec;
use thiserror::Error;

use crate::geo::Point;

/// Identifier of a node, indexable in `0..graph.size()`.
#[derive(Copy, Clone, Debug, Display, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(transparent)]
#[display("node #{_0}")]
pub struct NodeId(u32);

impl NodeId {
    pub fn new(id: u32) -> Self {
        Self(id)
    }

    #[inline(always)]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// A node of the road network.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Node {
    id: NodeId,
    point: Point,
}

impl Node {
    #[inline(always)]
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// Position used only for heuristic estimation.
    #[inline(always)]
    pub fn point(&self) -> &Point {
        &self.point
    }
}

/// A directed road segment.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Arc {
    origin: NodeId,
    destination: NodeId,
    length: f64,
    maximum_speed: f64,
}

impl Arc {
    /// `length` in meters, `maximum_speed` in km/h.
    pub fn new(origin: NodeId, destination: NodeId, length: f64, maximum_speed: f64) -> Self {
        Self {
            origin,
            destination,
            length,
            maximum_speed,
        }
    }

    #[inline(always)]
    pub fn origin(&self) -> NodeId {
        self.origin
    }

    #[inline(always)]
    pub fn destination(&self) -> NodeId {
        self.destination
    }

    /// Length in meters.
    #[inline(always)]
    pub fn length(&self) -> f64 {
        self.length
    }

    /// Legal maximum speed on this segment, in km/h.
    #[inline(always)]
    pub fn maximum_speed(&self) -> f64 {
        self.maximum_speed
    }

    /// Time in seconds to traverse this arc at `speed` km/h.
    #[inline(always)]
    pub fn travel_time(&self, speed: f64) -> f64 {
        3.6 * self.length / speed
    }

    /// Time in seconds to traverse this arc at its own legal maximum speed.
    #[inline(always)]
    pub fn minimum_travel_time(&self) -> f64 {
        self.travel_time(self.maximum_speed)
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum GraphError {
    #[error("arc {origin} -> {destination} references a node outside 0..{size}")]
    ArcOutOfRange {
        origin: NodeId,
        destination: NodeId,
        size: usize,
    },
}

/// An immutable, array-indexed road network.
#[derive(Debug, Clone)]
pub struct Graph {
    map_id: String,
    nodes: Vec<Node>,
    // Outgoing adjacency per node. Road junctions rarely exceed degree 4.
    outgoing: Vec<SmallVec<[Arc; 4]>>,
    maximum_speed: f64,
}

impl Graph {
    /// Builds a graph from node positions and arcs.
    ///
    /// Node ids are assigned from the position of each point in `points`.
    /// Arcs referencing nodes outside `0..points.len()` are rejected.
    pub fn new(
        map_id: impl Into<String>,
        points: Vec<Point>,
        arcs: Vec<Arc>,
    ) -> Result<Self, GraphError> {
        let size = points.len();
        let nodes = points
            .into_iter()
            .enumerate()
            .map(|(i, point)| Node {
                id: NodeId(i as u32),
                point,
            })
            .collect();

        let mut outgoing: Vec<SmallVec<[Arc; 4]>> = vec![SmallVec::new(); size];
        let mut maximum_speed = 0.0f64;
        for arc in arcs {
            if arc.origin.index() >= size || arc.destination.index() >= size {
                return Err(GraphError::ArcOutOfRange {
                    origin: arc.origin,
                    destination: arc.destination,
                    size,
                });
            }
            maximum_speed = maximum_speed.max(arc.maximum_speed);
            outgoing[arc.origin.index()].push(arc);
        }

        Ok(Self {
            map_id: map_id.into(),
            nodes,
            outgoing,
            maximum_speed,
        })
    }

    /// Identity of the map this graph was built from.
    pub fn map_id(&self) -> &str {
        &self.map_id
    }

    /// Number of nodes.
    #[inline(always)]
    pub fn size(&self) -> usize {
        self.nodes.len()
    }

    #[inline(always)]
    pub fn contains(&self, id: NodeId) -> bool {
        id.index() < self.nodes.len()
    }

    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Arcs leaving `id`. Empty for dead-end nodes.
    #[inline(always)]
    pub fn outgoing(&self, id: NodeId) -> &[Arc] {
        &self.outgoing[id.index()]
    }

    /// Fastest legal speed over any arc of the graph, in km/h.
    ///
    /// 0 when the graph has no arcs.
    #[inline(always)]
    pub fn maximum_speed(&self) -> f64 {
        self.maximum_speed
    }
}
