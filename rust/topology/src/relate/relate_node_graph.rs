// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Node graph used to compute relate labellings.
//!
//! Only nodes are built, each with the bundled edge ends leaving it; the
//! edges themselves stay in the source [`GeometryGraph`]s.

use std::collections::BTreeMap;

use crate::coordinate::{CoordKey, Coordinate};
use crate::error::Result;
use crate::geometry::Dimension;
use crate::graph::{Edge, EdgeIntersection, GeometryGraph, Label, Location, PlanarGraph};
use crate::keys::EdgeKey;

use super::edge_end_bundle::{EdgeEnd, EdgeEndBundleStar};
use super::intersection_matrix::IntersectionMatrix;

/// A node of a [`RelateNodeGraph`].
#[derive(Debug, Clone)]
pub struct RelateNode {
    coord: Coordinate,
    pub label: Label,
    pub star: EdgeEndBundleStar,
}

impl RelateNode {
    fn new(coord: Coordinate) -> Self {
        Self {
            coord,
            label: Label::default(),
            star: EdgeEndBundleStar::new(),
        }
    }

    pub fn coordinate(&self) -> Coordinate {
        self.coord
    }

    /// Known to only one of the two geometries.
    pub fn is_isolated(&self) -> bool {
        self.label.geometry_count() == 1
    }

    pub fn set_label(&mut self, geom_index: usize, loc: Location) {
        self.label.set_location(geom_index, loc);
    }

    /// Mod-2 boundary toggle for geometry `geom_index`.
    pub fn set_label_boundary(&mut self, geom_index: usize) {
        let loc = match self.label.location(geom_index) {
            Location::Boundary => Location::Interior,
            _ => Location::Boundary,
        };
        self.label.set_location(geom_index, loc);
    }

    /// Records the node itself (dimension 0) and its edge bundles.
    pub fn update_im(&self, im: &mut IntersectionMatrix) {
        im.set_at_least_if_valid(self.label.location(0), self.label.location(1), Dimension::Point);
        self.star.update_im(im);
    }
}

/// Relate nodes keyed by coordinate.
///
/// # Example
///
/// ```
/// use geotopo_topology::geometry::Geometry;
/// use geotopo_topology::graph::GeometryGraph;
/// use geotopo_topology::relate::RelateNodeGraph;
///
/// let square = Geometry::rectangle(0.0, 0.0, 10.0, 10.0);
/// let graph = GeometryGraph::new(0, &square);
/// let mut nodes = RelateNodeGraph::new();
/// nodes.build(&graph).unwrap();
///
/// // The ring start carries both ends of the ring.
/// let node = nodes.nodes().next().unwrap();
/// assert_eq!(node.star.len(), 2);
/// ```
#[derive(Debug, Clone, Default)]
pub struct RelateNodeGraph {
    nodes: BTreeMap<CoordKey, RelateNode>,
}

impl RelateNodeGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the node at `coord`, creating it if needed.
    pub fn add_node(&mut self, coord: Coordinate) -> &mut RelateNode {
        self.nodes
            .entry(CoordKey::new(coord))
            .or_insert_with(|| RelateNode::new(coord))
    }

    pub fn find_node(&self, coord: &Coordinate) -> Option<&RelateNode> {
        self.nodes.get(&CoordKey::new(*coord))
    }

    /// Nodes ordered by coordinate.
    pub fn nodes(&self) -> impl Iterator<Item = &RelateNode> + '_ {
        self.nodes.values()
    }

    pub fn nodes_mut(&mut self) -> impl Iterator<Item = &mut RelateNode> + '_ {
        self.nodes.values_mut()
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Builds the nodes of a single geometry graph, with its edge ends.
    pub fn build(&mut self, graph: &GeometryGraph<'_>) -> Result<()> {
        self.compute_intersection_nodes(graph);
        self.copy_nodes_and_labels(graph);
        self.insert_edge_ends(compute_edge_ends(&graph.graph));
        tracing::trace!(nodes = self.nodes.len(), "Built relate node graph");
        Ok(())
    }

    /// Creates a node at every intersection recorded on the edges of
    /// `graph`. Intersections on boundary edges toggle the node's boundary
    /// status; others make it interior unless it is already labelled.
    pub fn compute_intersection_nodes(&mut self, graph: &GeometryGraph<'_>) {
        let arg = graph.arg_index();
        for (_, edge) in graph.graph.edges() {
            let edge_loc = edge.label.location(arg);
            for ei in edge.intersections().iter() {
                let node = self.add_node(ei.coordinate);
                if edge_loc == Location::Boundary {
                    node.set_label_boundary(arg);
                } else if node.label.is_null(arg) {
                    node.set_label(arg, Location::Interior);
                }
            }
        }
    }

    /// Copies the nodes of `graph` with their labels, overriding labels
    /// derived from intersections.
    pub fn copy_nodes_and_labels(&mut self, graph: &GeometryGraph<'_>) {
        let arg = graph.arg_index();
        for (_, n) in graph.graph.nodes() {
            let loc = n.label.location(arg);
            self.add_node(n.coordinate()).set_label(arg, loc);
        }
    }

    /// Inserts edge ends into the stars of the nodes they start at.
    pub fn insert_edge_ends(&mut self, ends: Vec<EdgeEnd>) {
        for end in ends {
            self.add_node(end.coordinate()).star.insert(end);
        }
    }
}

/// Computes the edge ends of every edge in `graph`: at each intersection
/// (and at the endpoints) one end points back along the edge and one
/// forward.
pub fn compute_edge_ends(graph: &PlanarGraph) -> Vec<EdgeEnd> {
    let mut ends = Vec::new();
    for (key, edge) in graph.edges() {
        edge_ends_of(key, edge, &mut ends);
    }
    ends
}

fn edge_ends_of(key: EdgeKey, edge: &Edge, ends: &mut Vec<EdgeEnd>) {
    let mut list = edge.intersections().clone();
    list.add_endpoints(edge.coordinates());
    let points: Vec<EdgeIntersection> = list.iter().copied().collect();
    for (i, curr) in points.iter().enumerate() {
        let prev = i.checked_sub(1).map(|j| &points[j]);
        let next = points.get(i + 1);
        if let Some(end) = edge_end_for_prev(key, edge, curr, prev) {
            ends.push(end);
        }
        if let Some(end) = edge_end_for_next(key, edge, curr, next) {
            ends.push(end);
        }
    }
}

/// The end leaving `curr` towards the start of the edge, with the label
/// flipped. None at the first point of the edge.
fn edge_end_for_prev(key: EdgeKey, edge: &Edge, curr: &EdgeIntersection, prev: Option<&EdgeIntersection>) -> Option<EdgeEnd> {
    let mut i_prev = curr.segment_index;
    if curr.distance == 0.0 {
        i_prev = i_prev.checked_sub(1)?;
    }
    let mut p_prev = *edge.coordinate(i_prev)?;
    if let Some(prev) = prev {
        if prev.segment_index >= i_prev {
            p_prev = prev.coordinate;
        }
    }
    EdgeEnd::new(key, curr.coordinate, p_prev, edge.label.flipped())
}

/// The end leaving `curr` towards the end of the edge. None at the last
/// point of the edge.
fn edge_end_for_next(key: EdgeKey, edge: &Edge, curr: &EdgeIntersection, next: Option<&EdgeIntersection>) -> Option<EdgeEnd> {
    let i_next = curr.segment_index + 1;
    if i_next >= edge.num_points() && next.is_none() {
        return None;
    }
    let mut p_next = edge.coordinate(i_next).copied();
    if let Some(next) = next {
        if next.segment_index == curr.segment_index {
            p_next = Some(next.coordinate);
        }
    }
    EdgeEnd::new(key, curr.coordinate, p_next?, edge.label)
}
