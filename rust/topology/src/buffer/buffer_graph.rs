// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Planar graph of labelled buffer curves.
//!
//! Curves are added with the locations on their left and right sides. On
//! [`BufferGraph::build`] they are noded against each other, equal edges are
//! merged (summing their depth deltas), and the resulting graph is split into
//! connected [`BufferSubgraph`]s. Subgraphs are labelled with depths from the
//! rightmost (outermost) to the leftmost, so a shell is always labelled
//! before the holes and islands it contains.

use rustc_hash::FxHashMap;

use crate::algorithm::is_ccw;
use crate::config::Config;
use crate::coordinate::{remove_repeated_points, Coordinate};
use crate::error::Result;
use crate::geometry::Polygon;
use crate::graph::{Edge, Label, Location, PlanarGraph, Position, SegmentIntersector};
use crate::keys::DirectedEdgeKey;

use super::buffer_subgraph::BufferSubgraph;
use super::subgraph_depth_locater::SubgraphDepthLocater;

/// Builds and labels the graph of a set of buffer curves.
///
/// # Example
///
/// ```
/// use geotopo_topology::buffer::BufferGraph;
/// use geotopo_topology::geometry::{coords, Polygon};
///
/// let shell = coords(&[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0), (0.0, 0.0)]);
/// let mut buffer = BufferGraph::new();
/// buffer.add_polygon(&Polygon::new(shell, vec![]));
/// buffer.build().unwrap();
///
/// assert_eq!(buffer.subgraphs().len(), 1);
/// assert_eq!(buffer.result_edges().unwrap().len(), 1);
/// ```
#[derive(Debug)]
pub struct BufferGraph {
    graph: PlanarGraph,
    curves: Vec<Edge>,
    subgraphs: Vec<BufferSubgraph>,
    node_capacity: usize,
}

impl Default for BufferGraph {
    fn default() -> Self {
        Self::new()
    }
}

impl BufferGraph {
    pub fn new() -> Self {
        Self::with_config(&Config::default())
    }

    pub fn with_config(config: &Config) -> Self {
        Self {
            graph: PlanarGraph::new(),
            curves: Vec::new(),
            subgraphs: Vec::new(),
            node_capacity: config.node_capacity,
        }
    }

    // --- Input ---

    /// Adds a curve with the given locations on its left and right sides.
    /// Curves with fewer than two points are ignored.
    pub fn add_curve(&mut self, coords: &[Coordinate], left: Location, right: Location) {
        if coords.len() < 2 {
            return;
        }
        let label = Label::area_for(0, Location::Boundary, left, right);
        self.curves.push(Edge::new(coords.to_vec(), label));
    }

    /// Adds a closed ring whose sides are `cw_left` and `cw_right` when it is
    /// traversed clockwise. Rings that collapse below four points are
    /// ignored.
    pub fn add_ring(&mut self, ring: &[Coordinate], cw_left: Location, cw_right: Location) {
        let coords = remove_repeated_points(ring);
        if coords.len() < 4 {
            return;
        }
        if is_ccw(&coords) {
            self.add_curve(&coords, cw_right, cw_left);
        } else {
            self.add_curve(&coords, cw_left, cw_right);
        }
    }

    /// Adds the rings of a polygon as zero-distance curves: the shell with
    /// the exterior outside, holes with the interior outside.
    pub fn add_polygon(&mut self, polygon: &Polygon) {
        if polygon.is_empty() {
            return;
        }
        self.add_ring(&polygon.shell, Location::Exterior, Location::Interior);
        for hole in &polygon.holes {
            self.add_ring(hole, Location::Interior, Location::Exterior);
        }
    }

    // --- Build ---

    /// Nodes the curves, builds the planar graph and labels every subgraph.
    pub fn build(&mut self) -> Result<()> {
        let edges = self.node_curves()?;
        let curve_count = self.curves.len();
        let merged = merge_equal_edges(edges);
        for edge in merged {
            self.graph.add_edge(edge)?;
        }
        self.curves.clear();

        let mut subgraphs = self.create_subgraphs()?;
        // Descending rightmost X; the sort is stable, so ties keep node order.
        subgraphs.sort_by(|a, b| b.cmp(a));

        let mut processed: Vec<BufferSubgraph> = Vec::with_capacity(subgraphs.len());
        for sg in subgraphs {
            let p = sg.rightmost_coordinate();
            let outside_depth = SubgraphDepthLocater::new(&self.graph, &processed).depth(&p)?;
            sg.compute_depth(&mut self.graph, outside_depth)?;
            sg.find_result_edges(&mut self.graph)?;
            tracing::trace!(x = p.x, y = p.y, outside_depth, "Labelled buffer subgraph");
            processed.push(sg);
        }
        tracing::debug!(
            curves = curve_count,
            edges = self.graph.edge_count(),
            nodes = self.graph.node_count(),
            subgraphs = processed.len(),
            "Built buffer graph"
        );
        self.subgraphs = processed;
        Ok(())
    }

    /// Computes all intersections between the curves and splits them into
    /// noded edges.
    fn node_curves(&self) -> Result<Vec<Edge>> {
        let mut noding = PlanarGraph::new();
        for curve in &self.curves {
            noding.insert_edge(curve.clone());
        }
        let mut si = SegmentIntersector::new(true, false);
        si.self_intersections(&mut noding, true, self.node_capacity)?;

        let keys = noding.edge_keys().to_vec();
        let mut pieces = Vec::new();
        for key in keys {
            for piece in noding.edge_mut(key)?.split() {
                let pts = piece.coordinates();
                if pts.len() == 2 && pts[0] == pts[1] {
                    continue;
                }
                pieces.push(piece);
            }
        }
        Ok(pieces)
    }

    fn create_subgraphs(&mut self) -> Result<Vec<BufferSubgraph>> {
        let mut subgraphs = Vec::new();
        let nodes: Vec<_> = self.graph.node_keys().collect();
        for node in nodes {
            if !self.graph.node(node)?.is_visited() {
                subgraphs.push(BufferSubgraph::create(&mut self.graph, node)?);
            }
        }
        Ok(subgraphs)
    }

    // --- Results ---

    pub fn graph(&self) -> &PlanarGraph {
        &self.graph
    }

    /// Subgraphs in processing order (descending rightmost X).
    pub fn subgraphs(&self) -> &[BufferSubgraph] {
        &self.subgraphs
    }

    /// Directed edges bounding the buffer result, interior on their right.
    pub fn result_edges(&self) -> Result<Vec<DirectedEdgeKey>> {
        let mut result = Vec::new();
        for sg in &self.subgraphs {
            for de in sg.directed_edges() {
                if self.graph.directed_edge(*de)?.is_in_result() {
                    result.push(*de);
                }
            }
        }
        Ok(result)
    }
}

/// Change in depth crossing an edge from its right side to its left.
pub fn depth_delta(label: &Label) -> i32 {
    let left = label.location_at(0, Position::Left);
    let right = label.location_at(0, Position::Right);
    match (left, right) {
        (Location::Interior, Location::Exterior) => 1,
        (Location::Exterior, Location::Interior) => -1,
        _ => 0,
    }
}

/// Collapses edges with equal coordinates (in either direction) into one,
/// merging labels and summing depth deltas. First occurrence order is kept.
fn merge_equal_edges(edges: Vec<Edge>) -> Vec<Edge> {
    let mut merged: Vec<Edge> = Vec::with_capacity(edges.len());
    let mut index: FxHashMap<Vec<(u64, u64)>, usize> = FxHashMap::default();
    for mut edge in edges {
        let key = oriented_key(edge.coordinates());
        if let Some(&i) = index.get(&key) {
            let existing = &mut merged[i];
            let mut label = edge.label;
            if !existing.is_pointwise_equal(&edge) {
                label.flip();
            }
            existing.label.merge(&label);
            let delta = existing.depth_delta() + depth_delta(&label);
            existing.set_depth_delta(delta);
        } else {
            edge.set_depth_delta(depth_delta(&edge.label));
            index.insert(key, merged.len());
            merged.push(edge);
        }
    }
    merged
}

/// Direction-independent identity of a coordinate sequence: the smaller of
/// the forward and reversed bit patterns.
fn oriented_key(coords: &[Coordinate]) -> Vec<(u64, u64)> {
    let bits = |c: &Coordinate| ((c.x + 0.0).to_bits(), (c.y + 0.0).to_bits());
    let forward: Vec<_> = coords.iter().map(bits).collect();
    let reverse: Vec<_> = coords.iter().rev().map(bits).collect();
    forward.min(reverse)
}
