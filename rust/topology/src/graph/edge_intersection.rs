// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Points where an edge is crossed by another edge or ends at a node.

use std::cmp::Ordering;
use std::collections::BTreeSet;

use crate::coordinate::Coordinate;

/// A point on an edge, located by segment index and distance along that
/// segment.
#[derive(Debug, Clone, Copy)]
pub struct EdgeIntersection {
    pub coordinate: Coordinate,
    /// Index of the segment containing the point.
    pub segment_index: usize,
    /// Distance from the start of the segment, in the units of
    /// [`edge_distance`](crate::algorithm::edge_distance).
    pub distance: f64,
}

impl EdgeIntersection {
    pub fn new(coordinate: Coordinate, segment_index: usize, distance: f64) -> Self {
        Self {
            coordinate,
            segment_index,
            distance,
        }
    }

    /// Whether this intersection is the first or last point of an edge
    /// whose last segment index is `max_segment_index`.
    pub fn is_end_point(&self, max_segment_index: usize) -> bool {
        (self.segment_index == 0 && self.distance == 0.0) || self.segment_index == max_segment_index
    }
}

impl PartialEq for EdgeIntersection {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for EdgeIntersection {}

impl PartialOrd for EdgeIntersection {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for EdgeIntersection {
    /// Earlier segments first, then by distance along the segment.
    fn cmp(&self, other: &Self) -> Ordering {
        self.segment_index
            .cmp(&other.segment_index)
            .then_with(|| self.distance.total_cmp(&other.distance))
    }
}

/// The ordered, duplicate-free intersections of one edge.
#[derive(Debug, Clone, Default)]
pub struct EdgeIntersectionList {
    nodes: BTreeSet<EdgeIntersection>,
}

impl EdgeIntersectionList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an intersection, returning the stored entry. Adding a point
    /// already present at the same position returns the existing entry.
    pub fn add(&mut self, coordinate: Coordinate, segment_index: usize, distance: f64) -> EdgeIntersection {
        let ei = EdgeIntersection::new(coordinate, segment_index, distance);
        if let Some(existing) = self.nodes.get(&ei) {
            return *existing;
        }
        self.nodes.insert(ei);
        ei
    }

    /// Adds the first and last points of `coords`.
    pub fn add_endpoints(&mut self, coords: &[Coordinate]) {
        let Some(max) = coords.len().checked_sub(1) else {
            return;
        };
        self.add(coords[0], 0, 0.0);
        self.add(coords[max], max, 0.0);
    }

    pub fn is_intersection(&self, pt: &Coordinate) -> bool {
        self.nodes.iter().any(|ei| ei.coordinate == *pt)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &EdgeIntersection> {
        self.nodes.iter()
    }

    /// Intersections strictly after `ei`.
    pub fn after(&self, ei: &EdgeIntersection) -> impl Iterator<Item = &EdgeIntersection> {
        use std::ops::Bound;
        self.nodes.range((Bound::Excluded(*ei), Bound::Unbounded))
    }

    /// Intersections strictly before `ei`, nearest first.
    pub fn before(&self, ei: &EdgeIntersection) -> impl Iterator<Item = &EdgeIntersection> {
        self.nodes.range(..*ei).rev()
    }

    pub fn clear(&mut self) {
        self.nodes.clear();
    }

    /// Splits `coords` at every intersection, returning the coordinate
    /// sequences of the pieces in order. The endpoints must have been added.
    pub fn split(&self, coords: &[Coordinate]) -> Vec<Vec<Coordinate>> {
        let mut pieces = Vec::with_capacity(self.nodes.len().saturating_sub(1));
        let mut iter = self.nodes.iter();
        let Some(mut prev) = iter.next() else {
            return pieces;
        };
        for next in iter {
            pieces.push(split_piece(coords, prev, next));
            prev = next;
        }
        pieces
    }
}

fn split_piece(coords: &[Coordinate], ei0: &EdgeIntersection, ei1: &EdgeIntersection) -> Vec<Coordinate> {
    // The last intersection is a new point unless it coincides with the
    // vertex that ends the segment range.
    let last_vertex = coords.get(ei1.segment_index);
    let use_ei1 = ei1.distance > 0.0 || last_vertex != Some(&ei1.coordinate);

    let mut pts = Vec::with_capacity(ei1.segment_index.saturating_sub(ei0.segment_index) + 2);
    pts.push(ei0.coordinate);
    for c in coords
        .iter()
        .take(ei1.segment_index + 1)
        .skip(ei0.segment_index + 1)
    {
        pts.push(*c);
    }
    if use_ei1 {
        pts.push(ei1.coordinate);
    }
    pts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::coords;

    #[test]
    fn ordered_by_segment_then_distance() {
        let mut list = EdgeIntersectionList::new();
        list.add(Coordinate::new(5.0, 0.0), 1, 3.0);
        list.add(Coordinate::new(1.0, 0.0), 0, 1.0);
        list.add(Coordinate::new(3.0, 0.0), 1, 1.0);
        let segs: Vec<_> = list.iter().map(|e| (e.segment_index, e.distance)).collect();
        assert_eq!(segs, vec![(0, 1.0), (1, 1.0), (1, 3.0)]);
    }

    #[test]
    fn add_is_idempotent() {
        let mut list = EdgeIntersectionList::new();
        list.add(Coordinate::new(1.0, 0.0), 0, 1.0);
        list.add(Coordinate::new(1.0, 0.0), 0, 1.0);
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn split_at_interior_point() {
        let line = coords(&[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0)]);
        let mut list = EdgeIntersectionList::new();
        list.add_endpoints(&line);
        list.add(Coordinate::new(4.0, 0.0), 0, 4.0);
        let pieces = list.split(&line);
        assert_eq!(pieces.len(), 2);
        assert_eq!(pieces[0], coords(&[(0.0, 0.0), (4.0, 0.0)]));
        assert_eq!(pieces[1], coords(&[(4.0, 0.0), (10.0, 0.0), (10.0, 10.0)]));
    }

    #[test]
    fn split_at_vertex_does_not_duplicate() {
        let line = coords(&[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0)]);
        let mut list = EdgeIntersectionList::new();
        list.add_endpoints(&line);
        list.add(Coordinate::new(10.0, 0.0), 1, 0.0);
        let pieces = list.split(&line);
        assert_eq!(pieces[0], coords(&[(0.0, 0.0), (10.0, 0.0)]));
        assert_eq!(pieces[1], coords(&[(10.0, 0.0), (10.0, 10.0)]));
    }

    #[test]
    fn end_points() {
        let ei = EdgeIntersection::new(Coordinate::new(0.0, 0.0), 0, 0.0);
        assert!(ei.is_end_point(2));
        let ei = EdgeIntersection::new(Coordinate::new(1.0, 0.0), 0, 1.0);
        assert!(!ei.is_end_point(2));
        let ei = EdgeIntersection::new(Coordinate::new(10.0, 10.0), 2, 0.0);
        assert!(ei.is_end_point(2));
    }
}
