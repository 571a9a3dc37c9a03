// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Finding the rightmost edge of a set of directed edges.
//!
//! The rightmost coordinate of a connected subgraph always lies on the
//! outside of the subgraph, so the directed edge through it whose right side
//! faces outward can seed the depth labelling.

use crate::algorithm::{orientation, Orientation};
use crate::coordinate::Coordinate;
use crate::error::{Error, Result};
use crate::graph::{PlanarGraph, Position};
use crate::keys::{DirectedEdgeKey, NodeKey};

/// Locates the rightmost coordinate of a directed edge set and the directed
/// edge through it whose right side is the exterior.
#[derive(Debug, Clone, Default)]
pub struct RightmostEdgeFinder {
    min_index: usize,
    min_coord: Option<Coordinate>,
    min_de: Option<DirectedEdgeKey>,
    oriented_de: Option<DirectedEdgeKey>,
}

impl RightmostEdgeFinder {
    pub fn new() -> Self {
        Self::default()
    }

    /// The edge found by the last [`find_edge`](Self::find_edge).
    pub fn edge(&self) -> Option<DirectedEdgeKey> {
        self.oriented_de
    }

    /// The rightmost coordinate found by the last search.
    pub fn coordinate(&self) -> Option<Coordinate> {
        self.min_coord
    }

    /// Searches the forward edges of `dir_edges` for the rightmost
    /// coordinate and returns the directed edge through it with the exterior
    /// on its right.
    pub fn find_edge(&mut self, graph: &PlanarGraph, dir_edges: &[DirectedEdgeKey]) -> Result<DirectedEdgeKey> {
        *self = Self::default();
        for de in dir_edges {
            if graph.directed_edge(*de)?.is_forward() {
                self.check_for_rightmost_coordinate(graph, *de)?;
            }
        }
        let min_de = self
            .min_de
            .ok_or_else(|| Error::topology("no forward edge to search for the rightmost coordinate", None))?;

        let last_index = graph.parent_edge(min_de)?.max_segment_index();
        if self.min_index == 0 {
            self.find_rightmost_edge_at_node(graph, graph.from_node(min_de)?)?;
        } else if self.min_index == last_index {
            self.find_rightmost_edge_at_node(graph, graph.to_node(min_de)?)?;
        } else {
            self.find_rightmost_edge_at_vertex(graph)?;
        }

        let min_de = self
            .min_de
            .ok_or_else(|| Error::topology("rightmost edge lost during search", self.min_coord))?;
        let side = self.rightmost_side(graph, min_de, self.min_index)?;
        let oriented = if side == Some(Position::Left) {
            graph.sym(min_de)?
        } else {
            min_de
        };
        self.oriented_de = Some(oriented);
        Ok(oriented)
    }

    /// The rightmost coordinate is a node: take the rightmost edge of its
    /// star, as a forward edge.
    fn find_rightmost_edge_at_node(&mut self, graph: &PlanarGraph, node: NodeKey) -> Result<()> {
        let coord = graph.node(node)?.coordinate();
        let de = graph
            .rightmost_edge(node)?
            .ok_or_else(|| Error::topology("rightmost node has no edges", coord))?;
        if graph.directed_edge(de)?.is_forward() {
            self.min_de = Some(de);
            self.min_index = 0;
        } else {
            let sym = graph.sym(de)?;
            self.min_index = graph.parent_edge(sym)?.max_segment_index();
            self.min_de = Some(sym);
        }
        Ok(())
    }

    /// The rightmost coordinate is an interior vertex: choose the segment
    /// before or after it so that the segment is the one on the outside.
    fn find_rightmost_edge_at_vertex(&mut self, graph: &PlanarGraph) -> Result<()> {
        let (Some(min_de), Some(min_coord)) = (self.min_de, self.min_coord) else {
            return Ok(());
        };
        let pts = graph.parent_edge(min_de)?.coordinates();
        let i = self.min_index;
        if i == 0 || i + 1 >= pts.len() {
            return Err(Error::topology(
                "rightmost point expected to be an interior vertex of the edge",
                min_coord,
            ));
        }
        let prev = pts[i - 1];
        let next = pts[i + 1];
        let orient = orientation(&min_coord, &next, &prev);
        let use_prev = (prev.y < min_coord.y && next.y < min_coord.y && orient == Orientation::CounterClockwise)
            || (prev.y > min_coord.y && next.y > min_coord.y && orient == Orientation::Clockwise);
        if use_prev {
            self.min_index = i - 1;
        }
        Ok(())
    }

    /// Scans every vertex of the edge of `de`; strict comparison keeps the
    /// first of equal maxima.
    fn check_for_rightmost_coordinate(&mut self, graph: &PlanarGraph, de: DirectedEdgeKey) -> Result<()> {
        let coords = graph.parent_edge(de)?.coordinates();
        for (i, c) in coords.iter().enumerate() {
            if self.min_coord.map_or(true, |m| c.x > m.x) {
                self.min_de = Some(de);
                self.min_index = i;
                self.min_coord = Some(*c);
            }
        }
        Ok(())
    }

    /// Which side of segment `index` (or the one before it) faces right.
    /// When neither tells, the coordinate search is redone on `de` and `None`
    /// is returned.
    fn rightmost_side(&mut self, graph: &PlanarGraph, de: DirectedEdgeKey, index: usize) -> Result<Option<Position>> {
        let coords = graph.parent_edge(de)?.coordinates();
        let mut side = rightmost_side_of_segment(coords, Some(index));
        if side.is_none() {
            side = rightmost_side_of_segment(coords, index.checked_sub(1));
        }
        if side.is_none() {
            tracing::trace!(index, "Rightmost segments are horizontal, rescanning edge");
            self.min_coord = None;
            self.check_for_rightmost_coordinate(graph, de)?;
        }
        Ok(side)
    }
}

/// `Left` for a downward segment, `Right` for an upward one; `None` for a
/// horizontal segment or an index outside the edge.
fn rightmost_side_of_segment(coords: &[Coordinate], index: Option<usize>) -> Option<Position> {
    let i = index?;
    let (p0, p1) = (coords.get(i)?, coords.get(i + 1)?);
    if p0.y == p1.y {
        None
    } else if p0.y < p1.y {
        Some(Position::Right)
    } else {
        Some(Position::Left)
    }
}
