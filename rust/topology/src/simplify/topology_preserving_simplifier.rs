// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Topology-preserving simplification of whole geometries.

use crate::config::Config;
use crate::coordinate::Coordinate;
use crate::error::{Error, Result};
use crate::geometry::{Geometry, Polygon};

use super::tagged_line_string::TaggedLineString;
use super::tagged_lines_simplifier::TaggedLinesSimplifier;

/// Simplifies `geom` with distance tolerance `tolerance`.
///
/// # Example
///
/// ```
/// use geotopo_topology::geometry::Geometry;
/// use geotopo_topology::simplify::simplify;
///
/// let line = Geometry::line_string(&[(0.0, 0.0), (5.0, 0.1), (10.0, 0.0)]);
/// let simplified = simplify(&line, 1.0).unwrap();
/// assert_eq!(simplified, Geometry::line_string(&[(0.0, 0.0), (10.0, 0.0)]));
/// ```
pub fn simplify(geom: &Geometry, tolerance: f64) -> Result<Geometry> {
    TopologyPreservingSimplifier::new(tolerance)?.simplify(geom)
}

/// Douglas-Peucker simplification that keeps rings valid and never makes
/// lines or rings cross one another.
///
/// Every line and ring of the geometry is simplified together with all the
/// others. Rings keep at least four points; points pass through unchanged.
#[derive(Debug, Clone)]
pub struct TopologyPreservingSimplifier {
    tolerance: f64,
    node_capacity: usize,
}

impl TopologyPreservingSimplifier {
    pub fn new(tolerance: f64) -> Result<Self> {
        Self::build(tolerance, &Config::default())
    }

    /// Uses the configured tolerance and index node capacity.
    pub fn from_config(config: &Config) -> Result<Self> {
        Self::build(config.simplify_tolerance, config)
    }

    fn build(tolerance: f64, config: &Config) -> Result<Self> {
        if !(tolerance >= 0.0) {
            return Err(Error::InvalidArgument(format!(
                "tolerance must be non-negative, got {tolerance}"
            )));
        }
        Ok(Self {
            tolerance,
            node_capacity: config.node_capacity,
        })
    }

    pub fn tolerance(&self) -> f64 {
        self.tolerance
    }

    pub fn simplify(&self, geom: &Geometry) -> Result<Geometry> {
        if geom.is_empty() {
            return Ok(geom.clone());
        }
        let mut lines = Vec::new();
        collect_lines(geom, &mut lines);

        let mut simplifier = TaggedLinesSimplifier::new(self.tolerance, self.node_capacity)?;
        simplifier.simplify(&mut lines)?;

        let before = geom.num_points();
        let mut results = lines.iter().map(TaggedLineString::result_coordinates);
        let simplified = rebuild(geom, &mut results);
        tracing::debug!(
            tolerance = self.tolerance,
            lines = lines.len(),
            points_before = before,
            points_after = simplified.num_points(),
            "Topology-preserving simplification"
        );
        Ok(simplified)
    }
}

// --- Geometry traversal ---

/// Lines and rings of `geom` in traversal order.
fn collect_lines(geom: &Geometry, lines: &mut Vec<TaggedLineString>) {
    match geom {
        Geometry::Point(_) | Geometry::MultiPoint(_) => {}
        Geometry::LineString(line) => lines.push(TaggedLineString::line(line.clone())),
        Geometry::MultiLineString(parts) => {
            lines.extend(parts.iter().map(|l| TaggedLineString::line(l.clone())));
        }
        Geometry::Polygon(polygon) => collect_rings(polygon, lines),
        Geometry::MultiPolygon(polygons) => polygons.iter().for_each(|p| collect_rings(p, lines)),
        Geometry::GeometryCollection(parts) => parts.iter().for_each(|g| collect_lines(g, lines)),
    }
}

fn collect_rings(polygon: &Polygon, lines: &mut Vec<TaggedLineString>) {
    lines.extend(polygon.rings().map(|r| TaggedLineString::ring(r.clone())));
}

/// Rebuilds `geom` taking line and ring coordinates from `results`, in the
/// order [`collect_lines`] produced them.
fn rebuild(geom: &Geometry, results: &mut impl Iterator<Item = Vec<Coordinate>>) -> Geometry {
    match geom {
        Geometry::Point(_) | Geometry::MultiPoint(_) => geom.clone(),
        Geometry::LineString(line) => Geometry::LineString(next_line(results, line)),
        Geometry::MultiLineString(parts) => {
            Geometry::MultiLineString(parts.iter().map(|l| next_line(results, l)).collect())
        }
        Geometry::Polygon(polygon) => Geometry::Polygon(rebuild_polygon(polygon, results)),
        Geometry::MultiPolygon(polygons) => {
            Geometry::MultiPolygon(polygons.iter().map(|p| rebuild_polygon(p, results)).collect())
        }
        Geometry::GeometryCollection(parts) => {
            Geometry::GeometryCollection(parts.iter().map(|g| rebuild(g, results)).collect())
        }
    }
}

fn rebuild_polygon(polygon: &Polygon, results: &mut impl Iterator<Item = Vec<Coordinate>>) -> Polygon {
    let shell = next_line(results, &polygon.shell);
    let holes = polygon.holes.iter().map(|h| next_line(results, h)).collect();
    Polygon::new(shell, holes)
}

fn next_line(results: &mut impl Iterator<Item = Vec<Coordinate>>, original: &[Coordinate]) -> Vec<Coordinate> {
    results.next().unwrap_or_else(|| original.to_vec())
}
