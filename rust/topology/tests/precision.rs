// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Common-bits shifting is lossless, and homogeneous intersection matches
//! the geometric answer.

use approx::assert_relative_eq;
use geotopo_topology::geometry::{coords, Geometry};
use geotopo_topology::precision::{CommonBitsOp, CommonBitsRemover};
use geotopo_topology::{Coordinate, Error, HCoordinate};
use proptest::prelude::*;

fn line(points: &[(f64, f64)]) -> Geometry {
    Geometry::LineString(coords(points))
}

proptest! {
    #[test]
    fn common_bits_round_trip_is_exact(
        points in prop::collection::vec((1000.0..1001.0f64, -3000.0..-2999.0f64), 1..20),
    ) {
        let original = line(&points);
        let mut remover = CommonBitsRemover::new();
        remover.add(&original);

        let mut shifted = original.clone();
        remover.remove_common_bits(&mut shifted);
        let env = shifted.envelope();
        prop_assert!(env.max_x.abs() < 1000.0 && env.max_y.abs() < 3000.0);

        remover.add_common_bits(&mut shifted);
        prop_assert_eq!(shifted, original);
    }

    #[test]
    fn round_trip_holds_for_mixed_signs(
        points in prop::collection::vec((-1e6..1e6f64, -1e6..1e6f64), 1..20),
    ) {
        let original = line(&points);
        let restored = CommonBitsOp::new(true).execute(&original, Ok).unwrap();
        prop_assert_eq!(restored, original);
    }
}

#[test]
fn shared_prefix_is_removed() {
    let g = line(&[(1000.25, 7.0), (1000.5, 7.0)]);
    let mut remover = CommonBitsRemover::new();
    remover.add(&g);
    let common = remover.common_coordinate();
    assert_eq!(common, Coordinate::new(1000.0, 7.0));
}

#[test]
fn results_can_stay_shifted() {
    let g = line(&[(1000.25, 7.0), (1000.5, 7.0)]);
    let shifted = CommonBitsOp::new(false).execute(&g, Ok).unwrap();
    assert_eq!(shifted, line(&[(0.25, 0.0), (0.5, 0.0)]));
}

#[test]
fn homogeneous_intersection_of_diagonals() {
    let p = HCoordinate::intersection(
        &Coordinate::new(0.0, 0.0),
        &Coordinate::new(10.0, 10.0),
        &Coordinate::new(0.0, 10.0),
        &Coordinate::new(10.0, 0.0),
    )
    .unwrap();
    assert_relative_eq!(p.x, 5.0);
    assert_relative_eq!(p.y, 5.0);
}

#[test]
fn parallel_lines_are_not_representable() {
    let result = HCoordinate::intersection(
        &Coordinate::new(0.0, 0.0),
        &Coordinate::new(10.0, 0.0),
        &Coordinate::new(0.0, 1.0),
        &Coordinate::new(10.0, 1.0),
    );
    assert!(matches!(result, Err(Error::NotRepresentable)));
}
