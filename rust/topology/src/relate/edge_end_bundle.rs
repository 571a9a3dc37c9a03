// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Edge ends grouped by direction around a relate node.
//!
//! Edges of both input geometries that leave a node in the same direction
//! are collinear there and form one [`EdgeEndBundle`]. The bundles of a node
//! form an [`EdgeEndBundleStar`], which computes the full label of every
//! bundle by propagating side locations around the node.

use crate::algorithm::simple_point_in_area;
use crate::coordinate::Coordinate;
use crate::error::{Error, Result};
use crate::geometry::{Dimension, Geometry};
use crate::graph::{EdgeDirection, Label, Location, Position};
use crate::keys::EdgeKey;

use super::intersection_matrix::IntersectionMatrix;

/// One end of an edge at a node: the direction the edge leaves the node in,
/// and the edge label as seen in that direction.
#[derive(Debug, Clone, Copy)]
pub struct EdgeEnd {
    pub edge: EdgeKey,
    pub direction: EdgeDirection,
    pub label: Label,
}

impl EdgeEnd {
    /// `None` when `p0` and `p1` coincide.
    pub fn new(edge: EdgeKey, p0: Coordinate, p1: Coordinate, label: Label) -> Option<Self> {
        let direction = EdgeDirection::new(p0, p1).ok()?;
        Some(Self { edge, direction, label })
    }

    pub fn coordinate(&self) -> Coordinate {
        self.direction.p0
    }

    pub fn directed_coordinate(&self) -> Coordinate {
        self.direction.p1
    }
}

/// The edge ends leaving a node in one direction, with a combined label.
#[derive(Debug, Clone)]
pub struct EdgeEndBundle {
    direction: EdgeDirection,
    ends: Vec<EdgeEnd>,
    pub label: Label,
}

impl EdgeEndBundle {
    fn new(end: EdgeEnd) -> Self {
        Self {
            direction: end.direction,
            label: end.label,
            ends: vec![end],
        }
    }

    pub fn direction(&self) -> &EdgeDirection {
        &self.direction
    }

    pub fn coordinate(&self) -> Coordinate {
        self.direction.p0
    }

    pub fn edge_ends(&self) -> &[EdgeEnd] {
        &self.ends
    }

    /// Combines the labels of the bundled ends.
    ///
    /// The On location uses the Mod-2 boundary rule; a side is interior if
    /// any area end has the interior on that side.
    pub fn compute_label(&mut self) {
        let is_area = self.ends.iter().any(|e| e.label.is_area());
        self.label = if is_area {
            Label::area(Location::Null, Location::Null, Location::Null)
        } else {
            Label::line(Location::Null)
        };
        for i in 0..2 {
            self.compute_label_on(i);
            if is_area {
                self.compute_label_side(i, Position::Left);
                self.compute_label_side(i, Position::Right);
            }
        }
    }

    fn compute_label_on(&mut self, geom_index: usize) {
        let mut boundary_count = 0;
        let mut found_interior = false;
        for e in &self.ends {
            match e.label.location(geom_index) {
                Location::Boundary => boundary_count += 1,
                Location::Interior => found_interior = true,
                _ => {}
            }
        }
        let loc = if boundary_count > 0 {
            if boundary_count % 2 == 1 {
                Location::Boundary
            } else {
                Location::Interior
            }
        } else if found_interior {
            Location::Interior
        } else {
            Location::Null
        };
        self.label.set_location(geom_index, loc);
    }

    fn compute_label_side(&mut self, geom_index: usize, side: Position) {
        for e in &self.ends {
            if !e.label.is_area() {
                continue;
            }
            match e.label.location_at(geom_index, side) {
                Location::Interior => {
                    self.label.set_location_at(geom_index, side, Location::Interior);
                    return;
                }
                Location::Exterior => self.label.set_location_at(geom_index, side, Location::Exterior),
                _ => {}
            }
        }
    }

    /// Records the dimensions this bundle contributes: its line between the
    /// On locations and, for areas, the regions on either side.
    pub fn update_im(&self, im: &mut IntersectionMatrix) {
        update_im_from_label(&self.label, im);
    }
}

/// Contribution of an edge with `label` to an intersection matrix.
pub(crate) fn update_im_from_label(label: &Label, im: &mut IntersectionMatrix) {
    im.set_at_least_if_valid(label.location(0), label.location(1), Dimension::Curve);
    if label.is_area() {
        im.set_at_least_if_valid(
            label.location_at(0, Position::Left),
            label.location_at(1, Position::Left),
            Dimension::Surface,
        );
        im.set_at_least_if_valid(
            label.location_at(0, Position::Right),
            label.location_at(1, Position::Right),
            Dimension::Surface,
        );
    }
}

/// The bundles of a node in counter-clockwise order.
#[derive(Debug, Clone)]
pub struct EdgeEndBundleStar {
    bundles: Vec<EdgeEndBundle>,
    pt_in_area: [Location; 2],
}

impl Default for EdgeEndBundleStar {
    fn default() -> Self {
        Self {
            bundles: Vec::new(),
            pt_in_area: [Location::Null; 2],
        }
    }
}

impl EdgeEndBundleStar {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an edge end to the bundle with its direction, creating the
    /// bundle if needed.
    pub fn insert(&mut self, end: EdgeEnd) {
        let found = self
            .bundles
            .binary_search_by(|b| b.direction.compare_direction(&end.direction));
        match found {
            Ok(i) => self.bundles[i].ends.push(end),
            Err(i) => self.bundles.insert(i, EdgeEndBundle::new(end)),
        }
    }

    pub fn bundles(&self) -> &[EdgeEndBundle] {
        &self.bundles
    }

    pub fn len(&self) -> usize {
        self.bundles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bundles.is_empty()
    }

    pub fn compute_edge_end_labels(&mut self) {
        for b in &mut self.bundles {
            b.compute_label();
        }
    }

    /// Completes the labels of every bundle relative to both geometries.
    ///
    /// Side locations are propagated around the node; ends still unlabelled
    /// for a geometry are either exterior (a collapsed line edge on the
    /// boundary is present) or located by a point-in-area test.
    pub fn compute_labelling(&mut self, geometries: [&Geometry; 2]) -> Result<()> {
        self.compute_edge_end_labels();
        self.propagate_side_labels(0)?;
        self.propagate_side_labels(1)?;

        let mut has_dimensional_collapse = [false; 2];
        for b in &self.bundles {
            for (i, collapse) in has_dimensional_collapse.iter_mut().enumerate() {
                if b.label.is_line(i) && b.label.location(i) == Location::Boundary {
                    *collapse = true;
                }
            }
        }

        for idx in 0..self.bundles.len() {
            for i in 0..2 {
                if !self.bundles[idx].label.is_any_null(i) {
                    continue;
                }
                let loc = if has_dimensional_collapse[i] {
                    Location::Exterior
                } else {
                    let p = self.bundles[idx].coordinate();
                    self.location(i, &p, geometries[i])
                };
                self.bundles[idx].label.set_all_locations_if_null(i, loc);
            }
        }
        Ok(())
    }

    /// Location of the node in the area of geometry `geom_index`, computed
    /// once per star.
    fn location(&mut self, geom_index: usize, p: &Coordinate, geometry: &Geometry) -> Location {
        if self.pt_in_area[geom_index] == Location::Null {
            self.pt_in_area[geom_index] = simple_point_in_area(p, geometry);
        }
        self.pt_in_area[geom_index]
    }

    fn propagate_side_labels(&mut self, geom_index: usize) -> Result<()> {
        let start = self
            .bundles
            .iter()
            .filter(|b| b.label.is_area_for(geom_index))
            .map(|b| b.label.location_at(geom_index, Position::Left))
            .filter(|loc| *loc != Location::Null)
            .last();
        let Some(mut current) = start else {
            return Ok(());
        };

        for b in &mut self.bundles {
            let label = &mut b.label;
            if label.location(geom_index) == Location::Null {
                label.set_location(geom_index, current);
            }
            if !label.is_area_for(geom_index) {
                continue;
            }
            let left = label.location_at(geom_index, Position::Left);
            let right = label.location_at(geom_index, Position::Right);
            if right != Location::Null {
                if right != current {
                    return Err(Error::topology("side location conflict", b.direction.p0));
                }
                if left == Location::Null {
                    return Err(Error::topology("found single null side", b.direction.p0));
                }
                current = left;
            } else {
                if left != Location::Null {
                    return Err(Error::topology("found single null side", b.direction.p0));
                }
                label.set_location_at(geom_index, Position::Right, current);
                label.set_location_at(geom_index, Position::Left, current);
            }
        }
        Ok(())
    }

    /// Whether walking around the node the area labels of geometry 0 close
    /// up: every edge has different sides and each right side matches the
    /// previous left side.
    pub fn is_area_labels_consistent(&mut self) -> Result<bool> {
        self.compute_edge_end_labels();
        let Some(last) = self.bundles.last() else {
            return Ok(true);
        };
        let mut current = last.label.location_at(0, Position::Left);
        if current == Location::Null {
            return Err(Error::topology("found unlabelled area edge", last.coordinate()));
        }
        for b in &self.bundles {
            if !b.label.is_area_for(0) {
                return Err(Error::topology("found non-area edge", b.coordinate()));
            }
            let left = b.label.location_at(0, Position::Left);
            let right = b.label.location_at(0, Position::Right);
            if left == right || right != current {
                return Ok(false);
            }
            current = left;
        }
        Ok(true)
    }

    pub fn update_im(&self, im: &mut IntersectionMatrix) {
        for b in &self.bundles {
            b.update_im(im);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use slotmap::SlotMap;

    fn edge_key() -> EdgeKey {
        let mut edges: SlotMap<EdgeKey, ()> = SlotMap::with_key();
        edges.insert(())
    }

    fn end(to: (f64, f64), label: Label) -> EdgeEnd {
        EdgeEnd::new(edge_key(), Coordinate::new(0.0, 0.0), to.into(), label).unwrap()
    }

    fn area(geom: usize, left: Location, right: Location) -> Label {
        Label::area_for(geom, Location::Boundary, left, right)
    }

    #[test]
    fn zero_length_end_is_skipped() {
        assert!(EdgeEnd::new(edge_key(), Coordinate::new(1.0, 1.0), Coordinate::new(1.0, 1.0), Label::default()).is_none());
    }

    #[test]
    fn ends_in_same_direction_share_a_bundle() {
        let mut star = EdgeEndBundleStar::new();
        star.insert(end((1.0, 0.0), area(0, Location::Interior, Location::Exterior)));
        star.insert(end((0.0, 1.0), area(0, Location::Exterior, Location::Interior)));
        star.insert(end((2.0, 0.0), area(1, Location::Interior, Location::Exterior)));
        assert_eq!(star.len(), 2);
        assert_eq!(star.bundles()[0].edge_ends().len(), 2);
        assert_eq!(star.bundles()[0].direction().dx, 1.0);
    }

    #[test]
    fn bundle_label_uses_mod2_and_interior_wins() {
        let mut star = EdgeEndBundleStar::new();
        star.insert(end((1.0, 0.0), area(0, Location::Interior, Location::Exterior)));
        star.insert(end((1.0, 0.0), area(0, Location::Exterior, Location::Interior)));
        star.compute_edge_end_labels();
        let label = star.bundles()[0].label;
        assert_eq!(label.location(0), Location::Interior);
        assert_eq!(label.location_at(0, Position::Left), Location::Interior);
        assert_eq!(label.location_at(0, Position::Right), Location::Interior);
    }

    #[test]
    fn side_labels_propagate_around_the_node() {
        // A square corner of geometry 0 with a line of geometry 1 inside it.
        let square = Geometry::rectangle(0.0, 0.0, 10.0, 10.0);
        let line = Geometry::line_string(&[(0.0, 0.0), (5.0, 5.0)]);
        let mut star = EdgeEndBundleStar::new();
        star.insert(end((10.0, 0.0), area(0, Location::Interior, Location::Exterior)));
        star.insert(end((0.0, 10.0), area(0, Location::Exterior, Location::Interior)));
        star.insert(end((5.0, 5.0), Label::line_for(1, Location::Interior)));
        star.compute_labelling([&square, &line]).unwrap();

        let diagonal = star.bundles()[1].label;
        assert_eq!(diagonal.location(0), Location::Interior);
        assert_eq!(diagonal.location(1), Location::Interior);
        // Geometry 1 is not an area, so the square's ends are located as
        // exterior to it.
        let east = star.bundles()[0].label;
        assert!(east.all_positions_equal(1, Location::Exterior));

        let mut im = IntersectionMatrix::new();
        star.update_im(&mut im);
        assert_eq!(im.get(Location::Interior, Location::Interior), Dimension::Curve);
        assert_eq!(im.get(Location::Boundary, Location::Exterior), Dimension::Curve);
    }

    #[test]
    fn conflicting_sides_are_a_topology_error() {
        let square = Geometry::rectangle(0.0, 0.0, 10.0, 10.0);
        let mut star = EdgeEndBundleStar::new();
        star.insert(end((10.0, 0.0), area(0, Location::Interior, Location::Exterior)));
        star.insert(end((0.0, 10.0), area(0, Location::Interior, Location::Exterior)));
        let err = star.compute_labelling([&square, &square]).unwrap_err();
        assert!(matches!(err, Error::Topology { .. }));
    }

    #[test]
    fn area_consistency() {
        let mut good = EdgeEndBundleStar::new();
        good.insert(end((10.0, 0.0), area(0, Location::Interior, Location::Exterior)));
        good.insert(end((0.0, 10.0), area(0, Location::Exterior, Location::Interior)));
        assert!(good.is_area_labels_consistent().unwrap());

        let mut bad = EdgeEndBundleStar::new();
        bad.insert(end((10.0, 0.0), area(0, Location::Interior, Location::Exterior)));
        bad.insert(end((0.0, 10.0), area(0, Location::Interior, Location::Exterior)));
        assert!(!bad.is_area_labels_consistent().unwrap());
    }
}
