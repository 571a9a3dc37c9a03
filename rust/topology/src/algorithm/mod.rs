// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Robust geometric predicates and the algorithms built on them.
//!
//! Orientation tests use adaptive-precision arithmetic from the
//! `geometry-predicates` crate, so the sign is always exact even when the
//! floating-point determinant would round to the wrong side.

mod line_intersector;
mod locate;

pub use line_intersector::{edge_distance, IntersectionKind, LineIntersector};
pub use locate::{locate_point_in_ring, simple_point_in_area, PointLocator};

use crate::coordinate::Coordinate;

/// Orientation of the triple `(p1, p2, q)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Clockwise,
    Collinear,
    CounterClockwise,
}

impl Orientation {
    /// `1` for counter-clockwise (left), `-1` for clockwise (right), `0`
    /// for collinear.
    pub fn index(self) -> i32 {
        match self {
            Orientation::Clockwise => -1,
            Orientation::Collinear => 0,
            Orientation::CounterClockwise => 1,
        }
    }
}

/// Which side of the directed line `p1 -> p2` the point `q` lies on.
pub fn orientation(p1: &Coordinate, p2: &Coordinate, q: &Coordinate) -> Orientation {
    let det = geometry_predicates::orient2d(p1.xy(), p2.xy(), q.xy());
    if det > 0.0 {
        Orientation::CounterClockwise
    } else if det < 0.0 {
        Orientation::Clockwise
    } else {
        Orientation::Collinear
    }
}

/// [`orientation`] as `-1`, `0` or `1`.
pub fn orientation_index(p1: &Coordinate, p2: &Coordinate, q: &Coordinate) -> i32 {
    orientation(p1, p2, q).index()
}

/// Orientation of segment `q0 q1` relative to segment `p0 p1`: `1` if `q` is
/// entirely left (or touching), `-1` if entirely right, `0` if it straddles
/// or is collinear.
pub fn segment_orientation_index(
    p0: &Coordinate,
    p1: &Coordinate,
    q0: &Coordinate,
    q1: &Coordinate,
) -> i32 {
    let comp0 = orientation_index(p0, p1, q0);
    let comp1 = orientation_index(p0, p1, q1);
    if comp0 >= 0 && comp1 >= 0 {
        return comp0.max(comp1);
    }
    if comp0 <= 0 && comp1 <= 0 {
        return comp0.min(comp1);
    }
    0
}

/// Whether a closed ring is oriented counter-clockwise.
///
/// Uses the highest vertex and its distinct neighbours, so rings with
/// repeated points are handled. Degenerate rings (fewer than three distinct
/// points, or flat at the top) report `false`.
pub fn is_ccw(ring: &[Coordinate]) -> bool {
    if ring.len() < 4 {
        return false;
    }
    let n = ring.len() - 1;

    let mut hi_index = 0;
    for i in 1..=n {
        if ring[i].y > ring[hi_index].y {
            hi_index = i;
        }
    }
    let hi = ring[hi_index];

    let mut prev_index = hi_index;
    loop {
        prev_index = if prev_index == 0 { n } else { prev_index - 1 };
        if ring[prev_index] != hi || prev_index == hi_index {
            break;
        }
    }
    let mut next_index = hi_index;
    loop {
        next_index = (next_index + 1) % n;
        if ring[next_index] != hi || next_index == hi_index {
            break;
        }
    }

    let prev = ring[prev_index];
    let next = ring[next_index];
    if prev == hi || next == hi || prev == next {
        return false;
    }

    match orientation(&prev, &hi, &next) {
        // Top is flat and horizontal: CCW if the previous point lies to the right.
        Orientation::Collinear => prev.x > next.x,
        o => o == Orientation::CounterClockwise,
    }
}

/// Distance from `p` to the closed segment `a b`.
pub fn distance_point_segment(p: &Coordinate, a: &Coordinate, b: &Coordinate) -> f64 {
    if a == b {
        return p.distance(a);
    }
    let ab = b.to_vector() - a.to_vector();
    let ap = p.to_vector() - a.to_vector();
    let len2 = ab.norm_squared();
    let r = ap.dot(&ab) / len2;
    if r <= 0.0 {
        return p.distance(a);
    }
    if r >= 1.0 {
        return p.distance(b);
    }
    let s = ((a.y - p.y) * ab.x - (a.x - p.x) * ab.y) / len2;
    s.abs() * len2.sqrt()
}

/// Whether `p` lies on the closed segment `a b`.
pub fn is_on_segment(p: &Coordinate, a: &Coordinate, b: &Coordinate) -> bool {
    let env = crate::coordinate::segment_envelope(a, b);
    env.intersects_point(p.x, p.y) && orientation(a, b, p) == Orientation::Collinear
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::coords;

    fn c(x: f64, y: f64) -> Coordinate {
        Coordinate::new(x, y)
    }

    #[test]
    fn orientation_signs() {
        assert_eq!(orientation_index(&c(0.0, 0.0), &c(1.0, 0.0), &c(0.5, 1.0)), 1);
        assert_eq!(orientation_index(&c(0.0, 0.0), &c(1.0, 0.0), &c(0.5, -1.0)), -1);
        assert_eq!(orientation_index(&c(0.0, 0.0), &c(1.0, 0.0), &c(7.0, 0.0)), 0);
    }

    #[test]
    fn orientation_is_exact_near_degeneracy() {
        // Classic failure case for naive floating-point determinants.
        let p = c(0.5, 0.5);
        let q = c(12.0, 12.0);
        let r = c(24.0, 24.0);
        assert_eq!(orientation(&p, &q, &r), Orientation::Collinear);
        let r_off = c(24.0, 24.000_000_000_000_004);
        assert_eq!(orientation(&p, &q, &r_off), Orientation::CounterClockwise);
    }

    #[test]
    fn ring_orientation() {
        let ccw = coords(&[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0), (0.0, 0.0)]);
        let mut cw = ccw.clone();
        cw.reverse();
        assert!(is_ccw(&ccw));
        assert!(!is_ccw(&cw));
    }

    #[test]
    fn ring_orientation_with_flat_top_and_repeats() {
        let ring = coords(&[
            (0.0, 0.0),
            (4.0, 0.0),
            (4.0, 4.0),
            (4.0, 4.0),
            (0.0, 4.0),
            (0.0, 0.0),
        ]);
        assert!(is_ccw(&ring));
    }

    #[test]
    fn segment_distance() {
        let d = distance_point_segment(&c(5.0, 3.0), &c(0.0, 0.0), &c(10.0, 0.0));
        assert!((d - 3.0).abs() < 1e-12);
        let d = distance_point_segment(&c(-3.0, 4.0), &c(0.0, 0.0), &c(10.0, 0.0));
        assert!((d - 5.0).abs() < 1e-12);
        let d = distance_point_segment(&c(1.0, 1.0), &c(0.0, 0.0), &c(0.0, 0.0));
        assert!((d - 2f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn segment_relative_orientation() {
        let p0 = c(0.0, 0.0);
        let p1 = c(10.0, 0.0);
        assert_eq!(segment_orientation_index(&p0, &p1, &c(0.0, 1.0), &c(5.0, 2.0)), 1);
        assert_eq!(segment_orientation_index(&p0, &p1, &c(0.0, -1.0), &c(5.0, 0.0)), -1);
        assert_eq!(segment_orientation_index(&p0, &p1, &c(0.0, -1.0), &c(5.0, 1.0)), 0);
    }
}
