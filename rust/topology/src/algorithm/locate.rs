// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Point location against rings and geometries.

use crate::coordinate::{envelope_of, Coordinate};
use crate::geometry::{is_closed, Geometry, Polygon};
use crate::graph::Location;

use super::{is_on_segment, orientation_index};

/// Locates `p` relative to a closed ring by counting crossings of a ray to
/// positive X. Points on the ring are [`Location::Boundary`].
pub fn locate_point_in_ring(p: &Coordinate, ring: &[Coordinate]) -> Location {
    let mut crossings = 0usize;
    for i in 1..ring.len() {
        let p1 = &ring[i];
        let p2 = &ring[i - 1];

        // Segment strictly left of the ray.
        if p1.x < p.x && p2.x < p.x {
            continue;
        }
        if p == p2 {
            return Location::Boundary;
        }
        if p1.y == p.y && p2.y == p.y {
            let min_x = p1.x.min(p2.x);
            let max_x = p1.x.max(p2.x);
            if min_x <= p.x && p.x <= max_x {
                return Location::Boundary;
            }
            continue;
        }
        // Half-open rule on Y avoids double counting at vertices.
        if (p1.y > p.y && p2.y <= p.y) || (p2.y > p.y && p1.y <= p.y) {
            let mut sign = orientation_index(p, p1, p2);
            if sign == 0 {
                return Location::Boundary;
            }
            if p2.y < p1.y {
                sign = -sign;
            }
            if sign > 0 {
                crossings += 1;
            }
        }
    }
    if crossings % 2 == 1 {
        Location::Interior
    } else {
        Location::Exterior
    }
}

fn locate_in_polygon(p: &Coordinate, polygon: &Polygon) -> Location {
    if polygon.is_empty() {
        return Location::Exterior;
    }
    match locate_point_in_ring(p, &polygon.shell) {
        Location::Exterior => return Location::Exterior,
        Location::Boundary => return Location::Boundary,
        _ => {}
    }
    for hole in &polygon.holes {
        match locate_point_in_ring(p, hole) {
            Location::Interior => return Location::Exterior,
            Location::Boundary => return Location::Boundary,
            _ => {}
        }
    }
    Location::Interior
}

fn locate_on_line(p: &Coordinate, line: &[Coordinate]) -> Location {
    if !envelope_of(line).intersects_point(p.x, p.y) {
        return Location::Exterior;
    }
    if !is_closed(line) {
        if let (Some(first), Some(last)) = (line.first(), line.last()) {
            if p == first || p == last {
                return Location::Boundary;
            }
        }
    }
    if line.windows(2).any(|s| is_on_segment(p, &s[0], &s[1])) {
        Location::Interior
    } else {
        Location::Exterior
    }
}

/// Locates points against arbitrary geometries, combining the boundaries of
/// multi-part geometries with the Mod-2 rule: a point on an odd number of
/// component boundaries is on the boundary, otherwise it is interior.
#[derive(Debug, Default, Clone, Copy)]
pub struct PointLocator;

impl PointLocator {
    pub fn new() -> Self {
        Self
    }

    pub fn locate(&self, p: &Coordinate, geom: &Geometry) -> Location {
        if geom.is_empty() {
            return Location::Exterior;
        }
        match geom {
            Geometry::LineString(line) => return locate_on_line(p, line),
            Geometry::Polygon(polygon) => return locate_in_polygon(p, polygon),
            _ => {}
        }

        let mut is_in = false;
        let mut boundaries = 0usize;
        let mut update = |loc: Location| match loc {
            Location::Interior => is_in = true,
            Location::Boundary => boundaries += 1,
            _ => {}
        };

        let mut stack = vec![geom];
        while let Some(g) = stack.pop() {
            match g {
                Geometry::Point(c) => update(point_location(p, c)),
                Geometry::MultiPoint(points) => points.iter().for_each(|c| update(point_location(p, c))),
                Geometry::LineString(line) => update(locate_on_line(p, line)),
                Geometry::MultiLineString(lines) => lines.iter().for_each(|l| update(locate_on_line(p, l))),
                Geometry::Polygon(polygon) => update(locate_in_polygon(p, polygon)),
                Geometry::MultiPolygon(polygons) => {
                    polygons.iter().for_each(|poly| update(locate_in_polygon(p, poly)))
                }
                Geometry::GeometryCollection(parts) => stack.extend(parts.iter()),
            }
        }

        if boundaries % 2 == 1 {
            Location::Boundary
        } else if boundaries > 0 || is_in {
            Location::Interior
        } else {
            Location::Exterior
        }
    }

    /// Whether `p` is in the interior or on the boundary of `geom`.
    pub fn intersects(&self, p: &Coordinate, geom: &Geometry) -> bool {
        self.locate(p, geom) != Location::Exterior
    }
}

fn point_location(p: &Coordinate, point: &Coordinate) -> Location {
    if p == point {
        Location::Interior
    } else {
        Location::Exterior
    }
}

/// Locates `p` against the polygonal components of `geom` only; points on a
/// polygon boundary count as interior. Non-polygonal parts are ignored.
pub fn simple_point_in_area(p: &Coordinate, geom: &Geometry) -> Location {
    let mut stack = vec![geom];
    while let Some(g) = stack.pop() {
        let inside = match g {
            Geometry::Polygon(polygon) => locate_in_polygon(p, polygon) != Location::Exterior,
            Geometry::MultiPolygon(polygons) => polygons
                .iter()
                .any(|poly| locate_in_polygon(p, poly) != Location::Exterior),
            Geometry::GeometryCollection(parts) => {
                stack.extend(parts.iter());
                false
            }
            _ => false,
        };
        if inside {
            return Location::Interior;
        }
    }
    Location::Exterior
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::coords;

    fn c(x: f64, y: f64) -> Coordinate {
        Coordinate::new(x, y)
    }

    fn square() -> Vec<Coordinate> {
        coords(&[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0), (0.0, 0.0)])
    }

    #[test]
    fn ring_location() {
        let ring = square();
        assert_eq!(locate_point_in_ring(&c(5.0, 5.0), &ring), Location::Interior);
        assert_eq!(locate_point_in_ring(&c(15.0, 5.0), &ring), Location::Exterior);
        assert_eq!(locate_point_in_ring(&c(10.0, 5.0), &ring), Location::Boundary);
        assert_eq!(locate_point_in_ring(&c(5.0, 0.0), &ring), Location::Boundary);
        assert_eq!(locate_point_in_ring(&c(0.0, 0.0), &ring), Location::Boundary);
        // Ray passes exactly through a vertex.
        let diamond = coords(&[(0.0, 5.0), (5.0, 0.0), (10.0, 5.0), (5.0, 10.0), (0.0, 5.0)]);
        assert_eq!(locate_point_in_ring(&c(2.0, 5.0), &diamond), Location::Interior);
        assert_eq!(locate_point_in_ring(&c(-2.0, 5.0), &diamond), Location::Exterior);
    }

    #[test]
    fn polygon_with_hole() {
        let g = Geometry::polygon(
            &[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0), (0.0, 0.0)],
            &[&[(4.0, 4.0), (4.0, 6.0), (6.0, 6.0), (6.0, 4.0), (4.0, 4.0)]],
        );
        let locator = PointLocator::new();
        assert_eq!(locator.locate(&c(5.0, 5.0), &g), Location::Exterior);
        assert_eq!(locator.locate(&c(4.0, 5.0), &g), Location::Boundary);
        assert_eq!(locator.locate(&c(2.0, 2.0), &g), Location::Interior);
    }

    #[test]
    fn line_endpoints_are_boundary() {
        let g = Geometry::line_string(&[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0)]);
        let locator = PointLocator::new();
        assert_eq!(locator.locate(&c(0.0, 0.0), &g), Location::Boundary);
        assert_eq!(locator.locate(&c(10.0, 5.0), &g), Location::Interior);
        assert_eq!(locator.locate(&c(5.0, 5.0), &g), Location::Exterior);
    }

    #[test]
    fn mod2_rule_for_multilines() {
        // Two lines sharing an endpoint: the shared point is on two
        // boundaries, so it is interior.
        let g = Geometry::MultiLineString(vec![
            coords(&[(0.0, 0.0), (5.0, 0.0)]),
            coords(&[(5.0, 0.0), (10.0, 0.0)]),
        ]);
        let locator = PointLocator::new();
        assert_eq!(locator.locate(&c(5.0, 0.0), &g), Location::Interior);
        assert_eq!(locator.locate(&c(10.0, 0.0), &g), Location::Boundary);
    }

    #[test]
    fn simple_area_location_ignores_lines() {
        let g = Geometry::GeometryCollection(vec![
            Geometry::line_string(&[(20.0, 0.0), (30.0, 0.0)]),
            Geometry::rectangle(0.0, 0.0, 10.0, 10.0),
        ]);
        assert_eq!(simple_point_in_area(&c(10.0, 3.0), &g), Location::Interior);
        assert_eq!(simple_point_in_area(&c(25.0, 0.0), &g), Location::Exterior);
    }
}
