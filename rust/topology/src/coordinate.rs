// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! 2-D coordinates.

use std::cmp::Ordering;

use geotopo_index::Envelope;
use nalgebra::{Point2, Vector2};

/// A planar coordinate with an optional elevation.
///
/// Equality and ordering only look at `x` and `y`, and are exact: two
/// coordinates are equal only if both ordinates are bit-for-bit equal
/// floating-point values (with `0.0 == -0.0`).
#[derive(Debug, Clone, Copy)]
pub struct Coordinate {
    pub x: f64,
    pub y: f64,
    /// Elevation; `NaN` when absent.
    pub z: f64,
}

impl Coordinate {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y, z: f64::NAN }
    }

    pub fn new_3d(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Lexicographic comparison by x, then y.
    pub fn compare_to(&self, other: &Coordinate) -> Ordering {
        match self.x.partial_cmp(&other.x) {
            Some(Ordering::Equal) | None => {}
            Some(ord) => return ord,
        }
        self.y.partial_cmp(&other.y).unwrap_or(Ordering::Equal)
    }

    pub fn distance(&self, other: &Coordinate) -> f64 {
        (self.to_vector() - other.to_vector()).norm()
    }

    pub fn to_point(&self) -> Point2<f64> {
        Point2::new(self.x, self.y)
    }

    pub(crate) fn to_vector(self) -> Vector2<f64> {
        Vector2::new(self.x, self.y)
    }

    pub(crate) fn xy(&self) -> [f64; 2] {
        [self.x, self.y]
    }
}

impl Default for Coordinate {
    fn default() -> Self {
        Coordinate::new(0.0, 0.0)
    }
}

impl PartialEq for Coordinate {
    fn eq(&self, other: &Self) -> bool {
        self.x == other.x && self.y == other.y
    }
}

impl From<(f64, f64)> for Coordinate {
    fn from((x, y): (f64, f64)) -> Self {
        Coordinate::new(x, y)
    }
}

impl From<[f64; 2]> for Coordinate {
    fn from([x, y]: [f64; 2]) -> Self {
        Coordinate::new(x, y)
    }
}

impl std::fmt::Display for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({} {})", self.x, self.y)
    }
}

/// Totally ordered map key for a coordinate (x, then y).
///
/// Negative zero is folded onto positive zero so that keys agree with
/// [`Coordinate`] equality.
#[derive(Debug, Clone, Copy)]
pub struct CoordKey(Coordinate);

impl CoordKey {
    pub fn new(c: Coordinate) -> Self {
        Self(Coordinate::new(c.x + 0.0, c.y + 0.0))
    }

    pub fn coordinate(&self) -> Coordinate {
        self.0
    }
}

impl PartialEq for CoordKey {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for CoordKey {}

impl PartialOrd for CoordKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for CoordKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0
            .x
            .total_cmp(&other.0.x)
            .then_with(|| self.0.y.total_cmp(&other.0.y))
    }
}

/// Envelope covering a coordinate sequence.
pub fn envelope_of(coords: &[Coordinate]) -> Envelope {
    let mut env = Envelope::null();
    for c in coords {
        env.expand_to_include_point(c.x, c.y);
    }
    env
}

/// Envelope of the segment `p0`-`p1`.
pub fn segment_envelope(p0: &Coordinate, p1: &Coordinate) -> Envelope {
    Envelope::new(p0.x, p0.y, p1.x, p1.y)
}

/// Copies `coords`, dropping consecutive duplicates.
pub fn remove_repeated_points(coords: &[Coordinate]) -> Vec<Coordinate> {
    let mut out: Vec<Coordinate> = Vec::with_capacity(coords.len());
    for c in coords {
        if out.last() != Some(c) {
            out.push(*c);
        }
    }
    out
}
