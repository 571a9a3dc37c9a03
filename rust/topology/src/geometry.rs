// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Minimal vector geometry model consumed by the topology graphs.
//!
//! Polygons store their rings as closed coordinate sequences (first point
//! equal to last). No validity checks are made on construction; the graphs
//! detect rings that are too short and skip them.

use geotopo_index::{Bounds, Envelope};

use crate::coordinate::{envelope_of, Coordinate};

/// Topological dimension of a point set, plus the pattern symbols used by
/// intersection matrices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dimension {
    /// Empty set (`F`).
    False,
    /// Points (`0`).
    Point,
    /// Curves (`1`).
    Curve,
    /// Surfaces (`2`).
    Surface,
    /// Any non-empty set (`T`), only meaningful in patterns.
    True,
    /// Anything (`*`), only meaningful in patterns.
    DontCare,
}

impl Dimension {
    /// Numeric value used for "at least" comparisons.
    pub fn value(self) -> i32 {
        match self {
            Dimension::DontCare => -3,
            Dimension::True => -2,
            Dimension::False => -1,
            Dimension::Point => 0,
            Dimension::Curve => 1,
            Dimension::Surface => 2,
        }
    }

    pub fn symbol(self) -> char {
        match self {
            Dimension::False => 'F',
            Dimension::Point => '0',
            Dimension::Curve => '1',
            Dimension::Surface => '2',
            Dimension::True => 'T',
            Dimension::DontCare => '*',
        }
    }

    pub fn from_symbol(symbol: char) -> Option<Self> {
        match symbol.to_ascii_uppercase() {
            'F' => Some(Dimension::False),
            '0' => Some(Dimension::Point),
            '1' => Some(Dimension::Curve),
            '2' => Some(Dimension::Surface),
            'T' => Some(Dimension::True),
            '*' => Some(Dimension::DontCare),
            _ => None,
        }
    }

    fn max(self, other: Dimension) -> Dimension {
        if other.value() > self.value() {
            other
        } else {
            self
        }
    }
}

/// Polygon with one shell and zero or more holes.
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    pub shell: Vec<Coordinate>,
    pub holes: Vec<Vec<Coordinate>>,
}

impl Polygon {
    pub fn new(shell: Vec<Coordinate>, holes: Vec<Vec<Coordinate>>) -> Self {
        Self { shell, holes }
    }

    /// Shell followed by holes.
    pub fn rings(&self) -> impl Iterator<Item = &Vec<Coordinate>> {
        std::iter::once(&self.shell).chain(self.holes.iter())
    }

    pub fn is_empty(&self) -> bool {
        self.shell.is_empty()
    }
}

/// A vector geometry.
#[derive(Debug, Clone, PartialEq)]
pub enum Geometry {
    Point(Coordinate),
    LineString(Vec<Coordinate>),
    Polygon(Polygon),
    MultiPoint(Vec<Coordinate>),
    MultiLineString(Vec<Vec<Coordinate>>),
    MultiPolygon(Vec<Polygon>),
    GeometryCollection(Vec<Geometry>),
}

/// Builds a coordinate list from `(x, y)` pairs.
pub fn coords(points: &[(f64, f64)]) -> Vec<Coordinate> {
    points.iter().copied().map(Coordinate::from).collect()
}

pub(crate) fn is_closed(line: &[Coordinate]) -> bool {
    match (line.first(), line.last()) {
        (Some(first), Some(last)) => line.len() > 1 && first == last,
        _ => false,
    }
}

impl Geometry {
    pub fn point(x: f64, y: f64) -> Self {
        Geometry::Point(Coordinate::new(x, y))
    }

    pub fn line_string(points: &[(f64, f64)]) -> Self {
        Geometry::LineString(coords(points))
    }

    pub fn polygon(shell: &[(f64, f64)], holes: &[&[(f64, f64)]]) -> Self {
        Geometry::Polygon(Polygon::new(
            coords(shell),
            holes.iter().map(|h| coords(h)).collect(),
        ))
    }

    /// Axis-aligned rectangle polygon, counter-clockwise.
    pub fn rectangle(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Geometry::polygon(
            &[
                (min_x, min_y),
                (max_x, min_y),
                (max_x, max_y),
                (min_x, max_y),
                (min_x, min_y),
            ],
            &[],
        )
    }

    pub fn is_empty(&self) -> bool {
        match self {
            Geometry::Point(_) => false,
            Geometry::LineString(line) => line.is_empty(),
            Geometry::Polygon(polygon) => polygon.is_empty(),
            Geometry::MultiPoint(points) => points.is_empty(),
            Geometry::MultiLineString(lines) => lines.iter().all(|l| l.is_empty()),
            Geometry::MultiPolygon(polygons) => polygons.iter().all(Polygon::is_empty),
            Geometry::GeometryCollection(parts) => parts.iter().all(Geometry::is_empty),
        }
    }

    pub fn is_collection(&self) -> bool {
        matches!(self, Geometry::GeometryCollection(_))
    }

    pub fn dimension(&self) -> Dimension {
        match self {
            Geometry::Point(_) | Geometry::MultiPoint(_) => Dimension::Point,
            Geometry::LineString(_) | Geometry::MultiLineString(_) => Dimension::Curve,
            Geometry::Polygon(_) | Geometry::MultiPolygon(_) => Dimension::Surface,
            Geometry::GeometryCollection(parts) => parts
                .iter()
                .map(Geometry::dimension)
                .fold(Dimension::False, Dimension::max),
        }
    }

    /// Dimension of the boundary under the Mod-2 rule.
    pub fn boundary_dimension(&self) -> Dimension {
        match self {
            Geometry::Point(_) | Geometry::MultiPoint(_) => Dimension::False,
            Geometry::LineString(line) => {
                if is_closed(line) {
                    Dimension::False
                } else {
                    Dimension::Point
                }
            }
            Geometry::MultiLineString(lines) => {
                if !lines.is_empty() && lines.iter().all(|l| is_closed(l)) {
                    Dimension::False
                } else {
                    Dimension::Point
                }
            }
            Geometry::Polygon(_) | Geometry::MultiPolygon(_) => Dimension::Curve,
            Geometry::GeometryCollection(parts) => parts
                .iter()
                .map(Geometry::boundary_dimension)
                .fold(Dimension::False, Dimension::max),
        }
    }

    pub fn envelope(&self) -> Envelope {
        match self {
            Geometry::Point(c) => Envelope::of_point(c.x, c.y),
            Geometry::LineString(line) => envelope_of(line),
            Geometry::Polygon(polygon) => envelope_of(&polygon.shell),
            Geometry::MultiPoint(points) => envelope_of(points),
            Geometry::MultiLineString(lines) => {
                let mut env = Envelope::null();
                for line in lines {
                    env.expand_to_include(&envelope_of(line));
                }
                env
            }
            Geometry::MultiPolygon(polygons) => {
                let mut env = Envelope::null();
                for polygon in polygons {
                    env.expand_to_include(&envelope_of(&polygon.shell));
                }
                env
            }
            Geometry::GeometryCollection(parts) => {
                let mut env = Envelope::null();
                for part in parts {
                    env.expand_to_include(&part.envelope());
                }
                env
            }
        }
    }

    /// All coordinates in storage order.
    pub fn coordinates(&self) -> Vec<Coordinate> {
        let mut out = Vec::new();
        self.for_each_coordinate(|c| out.push(*c));
        out
    }

    pub fn num_points(&self) -> usize {
        let mut n = 0;
        self.for_each_coordinate(|_| n += 1);
        n
    }

    pub fn for_each_coordinate(&self, mut f: impl FnMut(&Coordinate)) {
        let mut stack = vec![self];
        while let Some(geom) = stack.pop() {
            match geom {
                Geometry::Point(c) => f(c),
                Geometry::LineString(line) | Geometry::MultiPoint(line) => line.iter().for_each(&mut f),
                Geometry::Polygon(polygon) => polygon.rings().flatten().for_each(&mut f),
                Geometry::MultiLineString(lines) => lines.iter().flatten().for_each(&mut f),
                Geometry::MultiPolygon(polygons) => polygons
                    .iter()
                    .flat_map(Polygon::rings)
                    .flatten()
                    .for_each(&mut f),
                Geometry::GeometryCollection(parts) => stack.extend(parts.iter().rev()),
            }
        }
    }

    /// Applies `f` to every coordinate in place.
    pub fn apply_coordinates_mut(&mut self, mut f: impl FnMut(&mut Coordinate)) {
        let mut stack = vec![self];
        while let Some(geom) = stack.pop() {
            match geom {
                Geometry::Point(c) => f(c),
                Geometry::LineString(line) | Geometry::MultiPoint(line) => line.iter_mut().for_each(&mut f),
                Geometry::Polygon(polygon) => apply_polygon(polygon, &mut f),
                Geometry::MultiLineString(lines) => lines.iter_mut().flatten().for_each(&mut f),
                Geometry::MultiPolygon(polygons) => {
                    for polygon in polygons {
                        apply_polygon(polygon, &mut f);
                    }
                }
                Geometry::GeometryCollection(parts) => stack.extend(parts.iter_mut()),
            }
        }
    }

    /// Shifts every coordinate by `(dx, dy)`.
    pub fn translate(&mut self, dx: f64, dy: f64) {
        self.apply_coordinates_mut(|c| {
            c.x += dx;
            c.y += dy;
        });
    }
}

fn apply_polygon(polygon: &mut Polygon, f: &mut impl FnMut(&mut Coordinate)) {
    polygon.shell.iter_mut().for_each(&mut *f);
    for hole in &mut polygon.holes {
        hole.iter_mut().for_each(&mut *f);
    }
}
