// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Homogeneous coordinates.
//!
//! A point `(x, y)` is the line through the origin `(x, y, 1)` in projective
//! space; the line through two points is their cross product, and the
//! intersection of two lines is the cross product of the lines. The
//! construction is exact up to the final division, which is where nearly
//! parallel lines lose all precision.

use nalgebra::Vector3;

use crate::coordinate::Coordinate;
use crate::error::{Error, Result};

/// A point in homogeneous form `(x, y, w)`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HCoordinate {
    pub x: f64,
    pub y: f64,
    pub w: f64,
}

impl HCoordinate {
    pub fn new(x: f64, y: f64, w: f64) -> Self {
        Self { x, y, w }
    }

    pub fn from_coordinate(p: &Coordinate) -> Self {
        Self::new(p.x, p.y, 1.0)
    }

    /// The homogeneous line through two points.
    pub fn line_through(p: &Coordinate, q: &Coordinate) -> Self {
        Self::from_vector(Self::from_coordinate(p).to_vector().cross(&Self::from_coordinate(q).to_vector()))
    }

    /// Intersection of two homogeneous lines (or line through two points).
    pub fn meet(l1: &HCoordinate, l2: &HCoordinate) -> Self {
        Self::from_vector(l1.to_vector().cross(&l2.to_vector()))
    }

    /// Intersection point of the infinite lines `p1 p2` and `q1 q2`.
    ///
    /// Fails with [`Error::NotRepresentable`] when the lines are parallel or
    /// the result overflows.
    pub fn intersection(
        p1: &Coordinate,
        p2: &Coordinate,
        q1: &Coordinate,
        q2: &Coordinate,
    ) -> Result<Coordinate> {
        let l1 = Self::line_through(p1, p2);
        let l2 = Self::line_through(q1, q2);
        Self::meet(&l1, &l2).to_coordinate()
    }

    pub fn get_x(&self) -> Result<f64> {
        finite(self.x / self.w)
    }

    pub fn get_y(&self) -> Result<f64> {
        finite(self.y / self.w)
    }

    pub fn to_coordinate(&self) -> Result<Coordinate> {
        Ok(Coordinate::new(self.get_x()?, self.get_y()?))
    }

    fn to_vector(self) -> Vector3<f64> {
        Vector3::new(self.x, self.y, self.w)
    }

    fn from_vector(v: Vector3<f64>) -> Self {
        Self::new(v.x, v.y, v.z)
    }
}

fn finite(value: f64) -> Result<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(Error::NotRepresentable)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn c(x: f64, y: f64) -> Coordinate {
        Coordinate::new(x, y)
    }

    #[test]
    fn crossing_diagonals() {
        let p = HCoordinate::intersection(&c(0.0, 0.0), &c(10.0, 10.0), &c(0.0, 10.0), &c(10.0, 0.0)).unwrap();
        assert_relative_eq!(p.x, 5.0);
        assert_relative_eq!(p.y, 5.0);
    }

    #[test]
    fn intersection_of_extended_lines() {
        // The segments do not touch, but their lines do.
        let p = HCoordinate::intersection(&c(0.0, 0.0), &c(1.0, 0.0), &c(5.0, 1.0), &c(5.0, 2.0)).unwrap();
        assert_relative_eq!(p.x, 5.0);
        assert_relative_eq!(p.y, 0.0);
    }

    #[test]
    fn parallel_lines_are_not_representable() {
        let result = HCoordinate::intersection(&c(0.0, 0.0), &c(10.0, 0.0), &c(0.0, 1.0), &c(10.0, 1.0));
        assert!(matches!(result, Err(Error::NotRepresentable)));
    }

    #[test]
    fn coincident_lines_are_not_representable() {
        let result = HCoordinate::intersection(&c(0.0, 0.0), &c(1.0, 1.0), &c(2.0, 2.0), &c(3.0, 3.0));
        assert!(matches!(result, Err(Error::NotRepresentable)));
    }

    #[test]
    fn line_through_points_contains_them() {
        let l = HCoordinate::line_through(&c(1.0, 2.0), &c(3.0, 7.0));
        for p in [c(1.0, 2.0), c(3.0, 7.0)] {
            assert_relative_eq!(l.x * p.x + l.y * p.y + l.w, 0.0);
        }
    }
}
