// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The topology graph of a single argument geometry.
//!
//! Every ring and line becomes an [`Edge`] labelled with its location
//! relative to the geometry; endpoints, ring start points and points become
//! labelled nodes. Boundaries of multi-part lineal geometries follow the
//! Mod-2 rule.

use crate::algorithm::is_ccw;
use crate::config::Config;
use crate::coordinate::{remove_repeated_points, Coordinate};
use crate::error::Result;
use crate::geometry::{Geometry, Polygon};

use super::edge::Edge;
use super::label::{Label, Location};
use super::planar_graph::PlanarGraph;
use super::segment_intersector::SegmentIntersector;

/// Graph of one argument (`arg_index` 0 or 1) of a binary operation.
#[derive(Debug)]
pub struct GeometryGraph<'a> {
    arg_index: usize,
    geometry: &'a Geometry,
    pub graph: PlanarGraph,
    use_boundary_rule: bool,
    invalid_point: Option<Coordinate>,
    node_capacity: usize,
}

impl<'a> GeometryGraph<'a> {
    pub fn new(arg_index: usize, geometry: &'a Geometry) -> Self {
        Self::with_config(arg_index, geometry, &Config::default())
    }

    pub fn with_config(arg_index: usize, geometry: &'a Geometry, config: &Config) -> Self {
        let mut gg = Self {
            arg_index,
            geometry,
            graph: PlanarGraph::new(),
            use_boundary_rule: true,
            invalid_point: None,
            node_capacity: config.node_capacity,
        };
        gg.add(geometry);
        gg
    }

    pub fn arg_index(&self) -> usize {
        self.arg_index
    }

    pub fn geometry(&self) -> &'a Geometry {
        self.geometry
    }

    /// A ring or line collapsed below its minimum point count.
    pub fn has_too_few_points(&self) -> bool {
        self.invalid_point.is_some()
    }

    pub fn invalid_point(&self) -> Option<Coordinate> {
        self.invalid_point
    }

    fn add(&mut self, geometry: &Geometry) {
        if geometry.is_empty() {
            return;
        }
        // Polygon rings never share boundary points in a valid multipolygon.
        if matches!(geometry, Geometry::MultiPolygon(_)) {
            self.use_boundary_rule = false;
        }
        match geometry {
            Geometry::Point(c) => self.add_point(*c),
            Geometry::MultiPoint(points) => points.iter().for_each(|c| self.add_point(*c)),
            Geometry::LineString(line) => self.add_line_string(line),
            Geometry::MultiLineString(lines) => lines.iter().for_each(|l| self.add_line_string(l)),
            Geometry::Polygon(polygon) => self.add_polygon(polygon),
            Geometry::MultiPolygon(polygons) => polygons.iter().for_each(|p| self.add_polygon(p)),
            Geometry::GeometryCollection(parts) => parts.iter().for_each(|g| self.add(g)),
        }
    }

    fn add_point(&mut self, c: Coordinate) {
        self.insert_point(c, Location::Interior);
    }

    fn add_polygon(&mut self, polygon: &Polygon) {
        if polygon.is_empty() {
            return;
        }
        self.add_polygon_ring(&polygon.shell, Location::Exterior, Location::Interior);
        for hole in &polygon.holes {
            // Holes are labelled with the polygon interior on their outside.
            self.add_polygon_ring(hole, Location::Interior, Location::Exterior);
        }
    }

    /// Adds a ring whose left side is `cw_left` and right side is `cw_right`
    /// when traversed clockwise.
    fn add_polygon_ring(&mut self, ring: &[Coordinate], cw_left: Location, cw_right: Location) {
        if ring.is_empty() {
            return;
        }
        let coords = remove_repeated_points(ring);
        if coords.len() < 4 {
            self.invalid_point = Some(coords[0]);
            return;
        }
        let (left, right) = if is_ccw(&coords) {
            (cw_right, cw_left)
        } else {
            (cw_left, cw_right)
        };
        let start = coords[0];
        let label = Label::area_for(self.arg_index, Location::Boundary, left, right);
        self.graph.insert_edge(Edge::new(coords, label));
        self.insert_point(start, Location::Boundary);
    }

    fn add_line_string(&mut self, line: &[Coordinate]) {
        if line.is_empty() {
            return;
        }
        let coords = remove_repeated_points(line);
        if coords.len() < 2 {
            self.invalid_point = Some(coords[0]);
            return;
        }
        let (first, last) = (coords[0], coords[coords.len() - 1]);
        self.graph
            .insert_edge(Edge::new(coords, Label::line_for(self.arg_index, Location::Interior)));
        self.insert_boundary_point(first);
        self.insert_boundary_point(last);
    }

    fn insert_point(&mut self, c: Coordinate, loc: Location) {
        let node = self.graph.add_node(c);
        if let Some(n) = self.graph.nodes.get_mut(node) {
            n.set_label(self.arg_index, loc);
        }
    }

    /// Adds a lineal endpoint; an endpoint shared by an even number of lines
    /// is interior.
    fn insert_boundary_point(&mut self, c: Coordinate) {
        let node = self.graph.add_node(c);
        if let Some(n) = self.graph.nodes.get_mut(node) {
            n.set_label_boundary(self.arg_index);
        }
    }

    /// Coordinates of the nodes on the boundary of the geometry.
    pub fn boundary_nodes(&self) -> Vec<Coordinate> {
        self.graph
            .nodes()
            .filter(|(_, n)| n.label.location(self.arg_index) == Location::Boundary)
            .map(|(_, n)| n.coordinate())
            .collect()
    }

    /// Nodes the geometry's edges at their self-intersections.
    ///
    /// For polygonal inputs rings are assumed simple unless
    /// `compute_ring_self_nodes` is set; distinct rings are always tested
    /// against each other.
    pub fn compute_self_nodes(&mut self, compute_ring_self_nodes: bool) -> Result<SegmentIntersector> {
        let is_rings = matches!(self.geometry, Geometry::Polygon(_) | Geometry::MultiPolygon(_));
        let test_all = compute_ring_self_nodes || !is_rings;
        let mut si = SegmentIntersector::new(true, false);
        si.self_intersections(&mut self.graph, test_all, self.node_capacity)?;
        self.add_self_intersection_nodes();
        Ok(si)
    }

    fn add_self_intersection_nodes(&mut self) {
        let mut points = Vec::new();
        for (_, edge) in self.graph.edges() {
            let loc = edge.label.location(self.arg_index);
            for ei in edge.intersections().iter() {
                points.push((ei.coordinate, loc));
            }
        }
        for (c, loc) in points {
            self.add_self_intersection_node(c, loc);
        }
    }

    fn add_self_intersection_node(&mut self, c: Coordinate, loc: Location) {
        if self.is_boundary_node(&c) {
            return;
        }
        if loc == Location::Boundary && self.use_boundary_rule {
            self.insert_boundary_point(c);
        } else {
            self.insert_point(c, loc);
        }
    }

    fn is_boundary_node(&self, c: &Coordinate) -> bool {
        self.graph
            .find_node(c)
            .and_then(|k| self.graph.node(k).ok())
            .is_some_and(|n| n.label.location(self.arg_index) == Location::Boundary)
    }

    /// Records the intersections between the edges of this graph and those of
    /// `other` on both. Proper crossings are only recorded on the edges if
    /// `include_proper` is set.
    pub fn compute_edge_intersections(&mut self, other: &mut GeometryGraph<'_>, include_proper: bool) -> Result<SegmentIntersector> {
        let mut si = SegmentIntersector::new(include_proper, true);
        si.set_boundary_nodes(self.boundary_nodes(), other.boundary_nodes());
        si.mutual_intersections(&mut self.graph, &mut other.graph, self.node_capacity)?;
        Ok(si)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::Position;

    #[test]
    fn shell_labels_follow_orientation() {
        let cw = Geometry::polygon(&[(0.0, 0.0), (0.0, 10.0), (10.0, 10.0), (10.0, 0.0), (0.0, 0.0)], &[]);
        let gg = GeometryGraph::new(0, &cw);
        let (_, edge) = gg.graph.edges().next().unwrap();
        assert_eq!(edge.label.location_at(0, Position::Left), Location::Exterior);
        assert_eq!(edge.label.location_at(0, Position::Right), Location::Interior);

        let ccw = Geometry::rectangle(0.0, 0.0, 10.0, 10.0);
        let gg = GeometryGraph::new(1, &ccw);
        let (_, edge) = gg.graph.edges().next().unwrap();
        assert_eq!(edge.label.location_at(1, Position::Left), Location::Interior);
        assert_eq!(edge.label.location_at(1, Position::Right), Location::Exterior);
        assert!(edge.label.is_null(0));
    }

    #[test]
    fn line_endpoints_follow_mod2() {
        let g = Geometry::MultiLineString(vec![
            crate::geometry::coords(&[(0.0, 0.0), (5.0, 0.0)]),
            crate::geometry::coords(&[(5.0, 0.0), (10.0, 0.0)]),
        ]);
        let gg = GeometryGraph::new(0, &g);
        let boundary = gg.boundary_nodes();
        assert_eq!(boundary, vec![Coordinate::new(0.0, 0.0), Coordinate::new(10.0, 0.0)]);
    }

    #[test]
    fn collapsed_ring_is_flagged() {
        let g = Geometry::polygon(&[(0.0, 0.0), (1.0, 1.0), (0.0, 0.0)], &[]);
        let gg = GeometryGraph::new(0, &g);
        assert!(gg.has_too_few_points());
        assert_eq!(gg.graph.edge_count(), 0);
    }

    #[test]
    fn self_crossing_line_gets_a_node() {
        let g = Geometry::line_string(&[(0.0, 0.0), (10.0, 10.0), (10.0, 0.0), (0.0, 10.0)]);
        let mut gg = GeometryGraph::new(0, &g);
        gg.compute_self_nodes(false).unwrap();
        let node = gg.graph.find_node(&Coordinate::new(5.0, 5.0)).unwrap();
        assert_eq!(gg.graph.node(node).unwrap().label.location(0), Location::Interior);
    }
}
