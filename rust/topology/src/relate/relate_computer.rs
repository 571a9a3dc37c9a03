// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Computation of the DE-9IM matrix of two geometries.
//!
//! Both geometries are turned into [`GeometryGraph`]s and intersected. The
//! intersection points become relate nodes; the edge ends around each node
//! are labelled against both geometries, and every labelled node, edge
//! bundle and isolated edge contributes the dimension of the point set it
//! represents to the matrix.

use geotopo_index::Bounds;

use crate::algorithm::PointLocator;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::geometry::{Dimension, Geometry};
use crate::graph::{GeometryGraph, Label, Location, SegmentIntersector};

use super::edge_end_bundle::update_im_from_label;
use super::intersection_matrix::IntersectionMatrix;
use super::relate_node_graph::{compute_edge_ends, RelateNodeGraph};

/// Computes the intersection matrix of two geometries.
///
/// # Example
///
/// ```
/// use geotopo_topology::geometry::Geometry;
/// use geotopo_topology::relate::relate;
///
/// let a = Geometry::rectangle(0.0, 0.0, 10.0, 10.0);
/// let b = Geometry::rectangle(5.0, 5.0, 15.0, 15.0);
/// assert_eq!(relate(&a, &b).unwrap().to_string(), "212101212");
/// ```
pub fn relate(a: &Geometry, b: &Geometry) -> Result<IntersectionMatrix> {
    RelateComputer::new(a, b)?.compute_im()
}

/// Relate computation over a pair of geometry graphs.
#[derive(Debug)]
pub struct RelateComputer<'a> {
    args: [GeometryGraph<'a>; 2],
    nodes: RelateNodeGraph,
    isolated_edges: Vec<Label>,
}

impl<'a> RelateComputer<'a> {
    pub fn new(a: &'a Geometry, b: &'a Geometry) -> Result<Self> {
        Self::with_config(a, b, &Config::default())
    }

    /// Geometry collections are rejected: their parts may overlap, which
    /// the graph labelling cannot represent.
    pub fn with_config(a: &'a Geometry, b: &'a Geometry, config: &Config) -> Result<Self> {
        if a.is_collection() || b.is_collection() {
            return Err(Error::InvalidArgument(
                "relate does not support geometry collections".into(),
            ));
        }
        Ok(Self {
            args: [
                GeometryGraph::with_config(0, a, config),
                GeometryGraph::with_config(1, b, config),
            ],
            nodes: RelateNodeGraph::new(),
            isolated_edges: Vec::new(),
        })
    }

    pub fn compute_im(mut self) -> Result<IntersectionMatrix> {
        let mut im = IntersectionMatrix::new();
        im.set(Location::Exterior, Location::Exterior, Dimension::Surface);

        let (ga, gb) = (self.args[0].geometry(), self.args[1].geometry());
        if !ga.envelope().intersects(&gb.envelope()) {
            compute_disjoint_im(&mut im, ga, gb);
            tracing::debug!(im = %im, "Relate of disjoint envelopes");
            return Ok(im);
        }

        let [g0, g1] = &mut self.args;
        g0.compute_self_nodes(false)?;
        g1.compute_self_nodes(false)?;
        let intersector = g0.compute_edge_intersections(g1, false)?;

        for arg in &self.args {
            self.nodes.compute_intersection_nodes(arg);
        }
        for arg in &self.args {
            self.nodes.copy_nodes_and_labels(arg);
        }
        self.label_isolated_nodes()?;
        compute_proper_intersection_im(&intersector, &mut im, ga.dimension(), gb.dimension())?;

        for arg in &self.args {
            self.nodes.insert_edge_ends(compute_edge_ends(&arg.graph));
        }
        self.label_node_edges()?;
        self.label_isolated_edges(0, 1)?;
        self.label_isolated_edges(1, 0)?;
        self.update_im(&mut im);

        tracing::debug!(
            nodes = self.nodes.node_count(),
            isolated_edges = self.isolated_edges.len(),
            tests = intersector.num_tests(),
            im = %im,
            "Computed relate matrix"
        );
        Ok(im)
    }

    /// Nodes known to one geometry only are located in the other.
    fn label_isolated_nodes(&mut self) -> Result<()> {
        let locator = PointLocator::new();
        let geoms = [self.args[0].geometry(), self.args[1].geometry()];
        for node in self.nodes.nodes_mut() {
            if node.label.geometry_count() == 0 {
                return Err(Error::topology("node with empty label found", node.coordinate()));
            }
            if node.is_isolated() {
                let target = if node.label.is_null(0) { 0 } else { 1 };
                let loc = locator.locate(&node.coordinate(), geoms[target]);
                node.label.set_all_locations(target, loc);
            }
        }
        Ok(())
    }

    fn label_node_edges(&mut self) -> Result<()> {
        let geoms = [self.args[0].geometry(), self.args[1].geometry()];
        for node in self.nodes.nodes_mut() {
            node.star.compute_labelling(geoms)?;
        }
        Ok(())
    }

    /// Edges of `this` that touch nothing of `target` lie wholly in one of
    /// its regions; that location is found from their first point.
    fn label_isolated_edges(&mut self, this: usize, target: usize) -> Result<()> {
        let locator = PointLocator::new();
        let target_geom = self.args[target].geometry();
        let graph = &mut self.args[this].graph;
        let keys = graph.edge_keys().to_vec();
        for key in keys {
            let edge = graph.edge_mut(key)?;
            if !edge.is_isolated() {
                continue;
            }
            let loc = if target_geom.dimension().value() > 0 {
                match edge.coordinate(0) {
                    Some(p) => locator.locate(p, target_geom),
                    None => Location::Exterior,
                }
            } else {
                Location::Exterior
            };
            edge.label.set_all_locations(target, loc);
            self.isolated_edges.push(edge.label);
        }
        Ok(())
    }

    fn update_im(&self, im: &mut IntersectionMatrix) {
        for label in &self.isolated_edges {
            update_im_from_label(label, im);
        }
        for node in self.nodes.nodes() {
            node.update_im(im);
        }
    }
}

/// Matrix of two geometries with disjoint envelopes.
fn compute_disjoint_im(im: &mut IntersectionMatrix, a: &Geometry, b: &Geometry) {
    if !a.is_empty() {
        im.set(Location::Interior, Location::Exterior, a.dimension());
        im.set(Location::Boundary, Location::Exterior, a.boundary_dimension());
    }
    if !b.is_empty() {
        im.set(Location::Exterior, Location::Interior, b.dimension());
        im.set(Location::Exterior, Location::Boundary, b.boundary_dimension());
    }
}

/// A proper intersection fixes several entries outright, depending on the
/// dimensions of the inputs.
fn compute_proper_intersection_im(
    si: &SegmentIntersector,
    im: &mut IntersectionMatrix,
    dim_a: Dimension,
    dim_b: Dimension,
) -> Result<()> {
    let has_proper = si.has_proper_intersection();
    let has_proper_interior = si.has_proper_interior_intersection();
    match (dim_a, dim_b) {
        (Dimension::Surface, Dimension::Surface) => {
            if has_proper {
                im.set_at_least_pattern("212101212")?;
            }
        }
        (Dimension::Surface, Dimension::Curve) => {
            if has_proper {
                im.set_at_least_pattern("FFF0FFFF2")?;
            }
            if has_proper_interior {
                im.set_at_least_pattern("1FFFFF1FF")?;
            }
        }
        (Dimension::Curve, Dimension::Surface) => {
            if has_proper {
                im.set_at_least_pattern("F0FFFFFF2")?;
            }
            if has_proper_interior {
                im.set_at_least_pattern("1F1FFFFFF")?;
            }
        }
        (Dimension::Curve, Dimension::Curve) => {
            if has_proper_interior {
                im.set_at_least_pattern("0FFFFFFFF")?;
            }
        }
        _ => {}
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matrix(a: &Geometry, b: &Geometry) -> String {
        relate(a, b).unwrap().to_string()
    }

    #[test]
    fn overlapping_squares() {
        let a = Geometry::rectangle(0.0, 0.0, 10.0, 10.0);
        let b = Geometry::rectangle(5.0, 5.0, 15.0, 15.0);
        assert_eq!(matrix(&a, &b), "212101212");
    }

    #[test]
    fn disjoint_squares() {
        let a = Geometry::rectangle(0.0, 0.0, 1.0, 1.0);
        let b = Geometry::rectangle(5.0, 5.0, 6.0, 6.0);
        let im = relate(&a, &b).unwrap();
        assert_eq!(im.to_string(), "FF2FF1212");
        assert!(im.is_disjoint());
    }

    #[test]
    fn squares_sharing_an_edge_touch() {
        let a = Geometry::rectangle(0.0, 0.0, 10.0, 10.0);
        let b = Geometry::rectangle(10.0, 0.0, 20.0, 10.0);
        let im = relate(&a, &b).unwrap();
        assert_eq!(im.to_string(), "FF2F11212");
        assert!(im.is_touches(Dimension::Surface, Dimension::Surface));
    }

    #[test]
    fn line_crossing_square() {
        let line = Geometry::line_string(&[(-5.0, 5.0), (15.0, 5.0)]);
        let square = Geometry::rectangle(0.0, 0.0, 10.0, 10.0);
        let im = relate(&line, &square).unwrap();
        assert_eq!(im.to_string(), "101FF0212");
        assert!(im.is_crosses(Dimension::Curve, Dimension::Surface));
    }

    #[test]
    fn point_inside_square() {
        let point = Geometry::point(5.0, 5.0);
        let square = Geometry::rectangle(0.0, 0.0, 10.0, 10.0);
        let im = relate(&point, &square).unwrap();
        assert_eq!(im.to_string(), "0FFFFF212");
        assert!(im.is_within());
    }

    #[test]
    fn collections_are_rejected() {
        let gc = Geometry::GeometryCollection(vec![Geometry::point(0.0, 0.0)]);
        let square = Geometry::rectangle(0.0, 0.0, 10.0, 10.0);
        assert!(matches!(relate(&gc, &square), Err(Error::InvalidArgument(_))));
    }
}
