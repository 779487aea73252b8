//! Routes assembled from arc sequences.
//!
//! A path is built complete or not at all: constructors either return a whole
//! path or reject the input. An empty path and a single bare node (no arcs)
//! are both legal paths.

use thiserror::Error;

use crate::graph::{Arc, Graph, NodeId};

#[derive(Debug, Error, PartialEq)]
pub enum PathError {
    #[error("no arc connects {from} to {to}")]
    NoConnectingArc { from: NodeId, to: NodeId },
    #[error("{0} is not a node of this graph")]
    UnknownNode(NodeId),
    #[error("cannot concatenate paths from different graphs")]
    GraphMismatch,
    #[error("arcs do not chain into a single path")]
    BrokenChain,
    #[error("cannot concatenate an empty list of paths")]
    NoPaths,
}

/// An ordered arc sequence within one graph.
#[derive(Debug, Clone, PartialEq)]
pub struct Path {
    map_id: String,
    origin: Option<NodeId>,
    arcs: Vec<Arc>,
}

impl Path {
    /// A path with no nodes at all.
    pub fn empty(graph: &Graph) -> Self {
        Self {
            map_id: graph.map_id().to_owned(),
            origin: None,
            arcs: Vec::new(),
        }
    }

    /// A path standing on `node`, traversing no arc.
    pub fn single_node(graph: &Graph, node: NodeId) -> Self {
        Self {
            map_id: graph.map_id().to_owned(),
            origin: Some(node),
            arcs: Vec::new(),
        }
    }

    /// Wraps an arc sequence; the declared origin is the first arc's origin.
    pub fn from_arcs(graph: &Graph, arcs: Vec<Arc>) -> Self {
        Self {
            map_id: graph.map_id().to_owned(),
            origin: arcs.first().map(Arc::origin),
            arcs,
        }
    }

    /// Path through `nodes` in order, picking the fastest arc (at its own
    /// legal speed) between each consecutive pair.
    pub fn fastest_from_nodes(graph: &Graph, nodes: &[NodeId]) -> Result<Self, PathError> {
        Self::from_nodes(graph, nodes, Arc::minimum_travel_time)
    }

    /// Path through `nodes` in order, picking the shortest arc between each
    /// consecutive pair.
    pub fn shortest_from_nodes(graph: &Graph, nodes: &[NodeId]) -> Result<Self, PathError> {
        Self::from_nodes(graph, nodes, Arc::length)
    }

    // Ties between equally-good parallel arcs keep the first one encountered.
    fn from_nodes(
        graph: &Graph,
        nodes: &[NodeId],
        key: impl Fn(&Arc) -> f64,
    ) -> Result<Self, PathError> {
        for &node in nodes {
            if !graph.contains(node) {
                return Err(PathError::UnknownNode(node));
            }
        }
        match nodes {
            [] => return Ok(Self::empty(graph)),
            [only] => return Ok(Self::single_node(graph, *only)),
            _ => {}
        }

        let mut arcs = Vec::with_capacity(nodes.len() - 1);
        for pair in nodes.windows(2) {
            let (from, to) = (pair[0], pair[1]);
            let mut best: Option<&Arc> = None;
            for arc in graph.outgoing(from) {
                if arc.destination() == to
                    && best.is_none_or(|b| key(arc) < key(b))
                {
                    best = Some(arc);
                }
            }
            match best {
                Some(arc) => arcs.push(*arc),
                None => return Err(PathError::NoConnectingArc { from, to }),
            }
        }
        Ok(Self {
            map_id: graph.map_id().to_owned(),
            origin: Some(nodes[0]),
            arcs,
        })
    }

    /// Joins `paths` end-to-end.
    ///
    /// All paths must belong to the same graph and their arcs must chain
    /// across the boundaries.
    pub fn concatenate(paths: &[Path]) -> Result<Self, PathError> {
        let first = paths.first().ok_or(PathError::NoPaths)?;
        if paths.iter().any(|p| p.map_id != first.map_id) {
            return Err(PathError::GraphMismatch);
        }

        let arcs: Vec<Arc> = paths.iter().flat_map(|p| p.arcs.iter().copied()).collect();
        let origin = arcs
            .first()
            .map(Arc::origin)
            .or_else(|| paths.iter().find_map(|p| p.origin));
        let path = Self {
            map_id: first.map_id.clone(),
            origin,
            arcs,
        };
        if !path.is_valid() {
            return Err(PathError::BrokenChain);
        }
        Ok(path)
    }

    /// First node of the path, if any.
    #[inline(always)]
    pub fn origin(&self) -> Option<NodeId> {
        self.origin
    }

    /// Last node of the path, if any.
    pub fn destination(&self) -> Option<NodeId> {
        self.arcs.last().map(Arc::destination).or(self.origin)
    }

    #[inline(always)]
    pub fn arcs(&self) -> &[Arc] {
        &self.arcs
    }

    /// Number of nodes in the path.
    pub fn size(&self) -> usize {
        if self.is_empty() { 0 } else { 1 + self.arcs.len() }
    }

    /// A path is empty when it does not contain any node.
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.origin.is_none()
    }

    /// A path is valid if any of the following holds:
    /// - it is empty;
    /// - it contains a single node and no arcs;
    /// - its first arc leaves the declared origin and every consecutive arc
    ///   pair chains (destination of the former == origin of the latter).
    pub fn is_valid(&self) -> bool {
        let Some(origin) = self.origin else {
            return true;
        };
        if self.arcs.is_empty() {
            return true;
        }
        if self.arcs[0].origin() != origin {
            return false;
        }
        self.arcs
            .windows(2)
            .all(|pair| pair[0].destination() == pair[1].origin())
    }

    /// Total length in meters.
    pub fn length(&self) -> f64 {
        self.arcs.iter().map(Arc::length).sum()
    }

    /// Time in seconds to travel the whole path at `speed` km/h.
    pub fn travel_time(&self, speed: f64) -> f64 {
        self.arcs.iter().map(|arc| arc.travel_time(speed)).sum()
    }

    /// Time in seconds when driving each arc at its own legal maximum speed.
    pub fn minimum_travel_time(&self) -> f64 {
        self.arcs.iter().map(Arc::minimum_travel_time).sum()
    }
}
