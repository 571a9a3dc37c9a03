// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Undirected graph edges.

use geotopo_index::Envelope;

use crate::algorithm::LineIntersector;
use crate::coordinate::{envelope_of, Coordinate};
use crate::keys::DirectedEdgeKey;

use super::edge_intersection::EdgeIntersectionList;
use super::label::Label;

/// An ordered coordinate sequence with a topological label and the list of
/// points where it is intersected.
#[derive(Debug, Clone)]
pub struct Edge {
    coords: Vec<Coordinate>,
    pub label: Label,
    pub(crate) intersections: EdgeIntersectionList,
    /// Change in buffer depth crossing the edge from right to left.
    depth_delta: i32,
    isolated: bool,
    /// The forward and backward directed edges once the edge is wired into a
    /// graph.
    pub(crate) directed: Option<[DirectedEdgeKey; 2]>,
}

impl Edge {
    pub fn new(coords: Vec<Coordinate>, label: Label) -> Self {
        Self {
            coords,
            label,
            intersections: EdgeIntersectionList::new(),
            depth_delta: 0,
            isolated: true,
            directed: None,
        }
    }

    pub fn coordinates(&self) -> &[Coordinate] {
        &self.coords
    }

    pub fn coordinate(&self, i: usize) -> Option<&Coordinate> {
        self.coords.get(i)
    }

    pub fn num_points(&self) -> usize {
        self.coords.len()
    }

    pub fn max_segment_index(&self) -> usize {
        self.coords.len().saturating_sub(1)
    }

    pub fn is_closed(&self) -> bool {
        crate::geometry::is_closed(&self.coords)
    }

    pub fn envelope(&self) -> Envelope {
        envelope_of(&self.coords)
    }

    pub fn intersections(&self) -> &EdgeIntersectionList {
        &self.intersections
    }

    pub fn depth_delta(&self) -> i32 {
        self.depth_delta
    }

    pub fn set_depth_delta(&mut self, delta: i32) {
        self.depth_delta = delta;
    }

    /// An isolated edge does not touch any edge of the other geometry.
    pub fn is_isolated(&self) -> bool {
        self.isolated
    }

    pub fn set_isolated(&mut self, isolated: bool) {
        self.isolated = isolated;
    }

    /// The directed edges of this edge, forward first.
    pub fn directed_edges(&self) -> Option<[DirectedEdgeKey; 2]> {
        self.directed
    }

    /// A three-point edge that doubles back on itself.
    pub fn is_collapsed(&self) -> bool {
        self.label.is_area() && self.coords.len() == 3 && self.coords[0] == self.coords[2]
    }

    /// The line edge a collapsed edge reduces to.
    pub fn collapsed_edge(&self) -> Edge {
        Edge::new(self.coords[..2].to_vec(), Label::to_line_label(&self.label))
    }

    /// Same coordinates in the same order.
    pub fn is_pointwise_equal(&self, other: &Edge) -> bool {
        self.coords == other.coords
    }

    /// Same coordinates in the same or reverse order.
    pub fn equals(&self, other: &Edge) -> bool {
        self.coords.len() == other.coords.len()
            && (self.coords == other.coords || self.coords.iter().eq(other.coords.iter().rev()))
    }

    /// Records every intersection computed by `li` for segment
    /// `segment_index`, where this edge was input `geom_index` of `li`.
    pub fn add_intersections(&mut self, li: &LineIntersector, segment_index: usize, geom_index: usize) {
        for i in 0..li.intersection_num() {
            self.add_intersection(li, segment_index, geom_index, i);
        }
    }

    /// Records intersection `int_index` of `li`. A point equal to the next
    /// vertex is stored as the start of the next segment.
    pub fn add_intersection(&mut self, li: &LineIntersector, segment_index: usize, geom_index: usize, int_index: usize) {
        let pt = li.intersection(int_index);
        let mut seg = segment_index;
        let mut dist = li.edge_distance(geom_index, int_index);
        let next = seg + 1;
        if next < self.coords.len() && self.coords[next] == pt {
            seg = next;
            dist = 0.0;
        }
        self.intersections.add(pt, seg, dist);
    }

    /// Splits this edge at its recorded intersections. Endpoints are added
    /// first, so an edge with no interior intersections yields itself.
    pub fn split(&mut self) -> Vec<Edge> {
        self.intersections.add_endpoints(&self.coords);
        self.intersections
            .split(&self.coords)
            .into_iter()
            .map(|pts| Edge::new(pts, self.label))
            .collect()
    }
}
