// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Planar graph primitives.
//!
//! Nodes, edges and directed edges are stored in a [`PlanarGraph`] arena.
//! Every edge is wired to exactly two directed edges that are each other's
//! sym; every node keeps the directed edges leaving it in counter-clockwise
//! order. Edges carry an ordered [`EdgeIntersectionList`] recording where
//! they are crossed by other edges.

mod directed_edge;
mod directed_edge_star;
mod edge;
mod edge_end;
mod edge_intersection;
mod geometry_graph;
mod label;
mod node;
mod planar_graph;
pub mod quadrant;
mod segment_intersector;

pub use directed_edge::{DirectedEdge, NULL_DEPTH};
pub use edge::Edge;
pub use edge_end::EdgeDirection;
pub use edge_intersection::{EdgeIntersection, EdgeIntersectionList};
pub use geometry_graph::GeometryGraph;
pub use label::{Label, Location, Position, TopologyLocation};
pub use node::Node;
pub use planar_graph::PlanarGraph;
pub use segment_intersector::SegmentIntersector;
