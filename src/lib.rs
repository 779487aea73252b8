//! Least-cost routing over static road networks.
//!
//! A `Graph` is an immutable multigraph of located nodes and directed road
//! arcs. A `Query` names an origin, a destination, a cost mode (length or
//! travel time) and an arc admissibility filter; running it yields either an
//! optimal `Path` or a definitive infeasibility result.

// Internals
// ---------
pub mod heap_primitives;

// Network model
// -------------
pub mod cost;
pub mod geo;
pub mod graph;
pub mod path;

// Search engine
// -------------
pub mod heap;
pub mod label;
pub mod query;
pub mod search;

// Algorithms
// ----------
pub mod algorithms;
