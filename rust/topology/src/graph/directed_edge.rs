// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Directed views of graph edges.

use crate::coordinate::Coordinate;
use crate::error::{Error, Result};
use crate::keys::{DirectedEdgeKey, EdgeKey, NodeKey};

use super::edge_end::EdgeDirection;
use super::label::{Label, Location, Position};

/// Depth value meaning "not yet assigned".
pub const NULL_DEPTH: i32 = -999;

/// One of the two directed traversals of an [`Edge`](super::Edge).
///
/// The backward view carries the edge label flipped, so `Left` and `Right`
/// always refer to the direction of travel.
#[derive(Debug, Clone)]
pub struct DirectedEdge {
    pub(crate) edge: EdgeKey,
    pub(crate) forward: bool,
    pub(crate) sym: Option<DirectedEdgeKey>,
    pub(crate) from: Option<NodeKey>,
    pub label: Label,
    direction: EdgeDirection,
    depth: [i32; 3],
    visited: bool,
    in_result: bool,
}

impl DirectedEdge {
    /// Creates the view of an edge with coordinates `pts` and label `label`.
    ///
    /// Fails if the leading segment in the direction of travel has zero
    /// length.
    pub(crate) fn new(edge: EdgeKey, pts: &[Coordinate], label: &Label, forward: bool) -> Result<Self> {
        let n = pts.len();
        if n < 2 {
            return Err(Error::topology("directed edge needs at least two points", pts.first().copied()));
        }
        let direction = if forward {
            EdgeDirection::new(pts[0], pts[1])?
        } else {
            EdgeDirection::new(pts[n - 1], pts[n - 2])?
        };
        let label = if forward { *label } else { label.flipped() };
        Ok(Self {
            edge,
            forward,
            sym: None,
            from: None,
            label,
            direction,
            depth: [0, NULL_DEPTH, NULL_DEPTH],
            visited: false,
            in_result: false,
        })
    }

    pub fn edge(&self) -> EdgeKey {
        self.edge
    }

    pub fn is_forward(&self) -> bool {
        self.forward
    }

    /// The opposite view of the same edge.
    pub fn sym(&self) -> Option<DirectedEdgeKey> {
        self.sym
    }

    /// The node this edge leaves from.
    pub fn from_node(&self) -> Option<NodeKey> {
        self.from
    }

    pub fn direction(&self) -> &EdgeDirection {
        &self.direction
    }

    /// Start point.
    pub fn coordinate(&self) -> Coordinate {
        self.direction.p0
    }

    /// Second point in the direction of travel.
    pub fn directed_coordinate(&self) -> Coordinate {
        self.direction.p1
    }

    pub fn quadrant(&self) -> u8 {
        self.direction.quadrant
    }

    pub fn dx(&self) -> f64 {
        self.direction.dx
    }

    pub fn dy(&self) -> f64 {
        self.direction.dy
    }

    pub fn depth(&self, pos: Position) -> i32 {
        self.depth[pos as usize]
    }

    pub fn is_depth_set(&self, pos: Position) -> bool {
        self.depth[pos as usize] != NULL_DEPTH
    }

    /// Assigns the depth on one side. Reassigning a different value is a
    /// topology error.
    pub fn set_depth(&mut self, pos: Position, depth: i32) -> Result<()> {
        let current = self.depth[pos as usize];
        if current != NULL_DEPTH && current != depth {
            return Err(Error::topology("assigned depths do not match", self.coordinate()));
        }
        self.depth[pos as usize] = depth;
        Ok(())
    }

    pub fn is_visited(&self) -> bool {
        self.visited
    }

    pub fn set_visited(&mut self, visited: bool) {
        self.visited = visited;
    }

    pub fn is_in_result(&self) -> bool {
        self.in_result
    }

    pub fn set_in_result(&mut self, in_result: bool) {
        self.in_result = in_result;
    }

    /// A line edge that, for each area argument, lies wholly in its exterior.
    pub fn is_line_edge(&self) -> bool {
        let is_line = self.label.is_line(0) || self.label.is_line(1);
        let exterior_if_area =
            |i: usize| !self.label.is_area_for(i) || self.label.all_positions_equal(i, Location::Exterior);
        is_line && exterior_if_area(0) && exterior_if_area(1)
    }

    /// An area edge with the interior of every argument on both sides.
    pub fn is_interior_area_edge(&self) -> bool {
        (0..2).all(|i| {
            self.label.is_area_for(i)
                && self.label.location_at(i, Position::Left) == Location::Interior
                && self.label.location_at(i, Position::Right) == Location::Interior
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::coords;
    use slotmap::SlotMap;

    fn edge_key() -> EdgeKey {
        let mut map: SlotMap<EdgeKey, ()> = SlotMap::with_key();
        map.insert(())
    }

    #[test]
    fn backward_view_flips_label_and_direction() {
        let pts = coords(&[(0.0, 0.0), (5.0, 0.0), (5.0, 5.0)]);
        let label = Label::area_for(0, Location::Boundary, Location::Interior, Location::Exterior);
        let de = DirectedEdge::new(edge_key(), &pts, &label, false).unwrap();
        assert_eq!(de.coordinate(), Coordinate::new(5.0, 5.0));
        assert_eq!(de.directed_coordinate(), Coordinate::new(5.0, 0.0));
        assert_eq!(de.label.location_at(0, Position::Left), Location::Exterior);
    }

    #[test]
    fn conflicting_depth_is_rejected() {
        let pts = coords(&[(0.0, 0.0), (5.0, 0.0)]);
        let mut de = DirectedEdge::new(edge_key(), &pts, &Label::default(), true).unwrap();
        de.set_depth(Position::Left, 1).unwrap();
        de.set_depth(Position::Left, 1).unwrap();
        assert!(matches!(de.set_depth(Position::Left, 2), Err(Error::Topology { .. })));
    }

    #[test]
    fn interior_area_edge() {
        let pts = coords(&[(0.0, 0.0), (5.0, 0.0)]);
        let label = Label::area(Location::Boundary, Location::Interior, Location::Interior);
        let de = DirectedEdge::new(edge_key(), &pts, &label, true).unwrap();
        assert!(de.is_interior_area_edge());
        let label = Label::area_for(0, Location::Boundary, Location::Interior, Location::Interior);
        let de = DirectedEdge::new(edge_key(), &pts, &label, true).unwrap();
        assert!(!de.is_interior_area_edge());
    }
}
