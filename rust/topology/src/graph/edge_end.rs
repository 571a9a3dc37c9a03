// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Direction of an edge end leaving a node, and the angular order used to
//! sort edge stars.

use std::cmp::Ordering;

use crate::algorithm::orientation_index;
use crate::coordinate::Coordinate;
use crate::error::{Error, Result};

use super::quadrant;

/// The initial direction of an edge leaving `p0` towards `p1`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EdgeDirection {
    pub p0: Coordinate,
    pub p1: Coordinate,
    pub dx: f64,
    pub dy: f64,
    pub quadrant: u8,
}

impl EdgeDirection {
    /// Fails if `p0 == p1`.
    pub fn new(p0: Coordinate, p1: Coordinate) -> Result<Self> {
        let dx = p1.x - p0.x;
        let dy = p1.y - p0.y;
        let quadrant = quadrant::quadrant(dx, dy)
            .map_err(|_| Error::topology("edge end has zero length", p0))?;
        Ok(Self {
            p0,
            p1,
            dx,
            dy,
            quadrant,
        })
    }

    /// Counter-clockwise angular order starting from the positive X axis.
    ///
    /// Quadrants are compared first; within a quadrant the orientation test
    /// decides, so no trigonometry or division is involved.
    pub fn compare_direction(&self, other: &EdgeDirection) -> Ordering {
        if self.dx == other.dx && self.dy == other.dy {
            return Ordering::Equal;
        }
        match self.quadrant.cmp(&other.quadrant) {
            Ordering::Equal => {}
            ord => return ord,
        }
        match orientation_index(&other.p0, &other.p1, &self.p1) {
            1 => Ordering::Greater,
            -1 => Ordering::Less,
            _ => Ordering::Equal,
        }
    }

    pub fn is_northern(&self) -> bool {
        quadrant::is_northern(self.quadrant)
    }
}
