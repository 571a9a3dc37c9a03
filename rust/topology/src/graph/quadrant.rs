// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Plane quadrants, numbered counter-clockwise from the positive X axis.
//!
//! ```text
//!   1 | 0
//!  ---+---
//!   2 | 3
//! ```

use crate::coordinate::Coordinate;
use crate::error::{Error, Result};

pub const NE: u8 = 0;
pub const NW: u8 = 1;
pub const SW: u8 = 2;
pub const SE: u8 = 3;

/// Quadrant of the direction `(dx, dy)`. Points on an axis belong to the
/// quadrant counter-clockwise of it.
pub fn quadrant(dx: f64, dy: f64) -> Result<u8> {
    if dx == 0.0 && dy == 0.0 {
        return Err(Error::InvalidArgument(format!(
            "cannot compute the quadrant of the zero direction ({dx} {dy})"
        )));
    }
    Ok(if dx >= 0.0 {
        if dy >= 0.0 {
            NE
        } else {
            SE
        }
    } else if dy >= 0.0 {
        NW
    } else {
        SW
    })
}

/// Quadrant of the direction from `p0` to `p1`.
pub fn quadrant_of(p0: &Coordinate, p1: &Coordinate) -> Result<u8> {
    quadrant(p1.x - p0.x, p1.y - p0.y)
}

pub fn is_northern(quad: u8) -> bool {
    quad == NE || quad == NW
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn axes_belong_counter_clockwise() {
        assert_eq!(quadrant(1.0, 0.0).unwrap(), NE);
        assert_eq!(quadrant(0.0, 1.0).unwrap(), NE);
        assert_eq!(quadrant(-1.0, 0.0).unwrap(), NW);
        assert_eq!(quadrant(0.0, -1.0).unwrap(), SE);
        assert_eq!(quadrant(-1.0, -1.0).unwrap(), SW);
    }

    #[test]
    fn zero_direction_is_rejected() {
        assert!(quadrant(0.0, 0.0).is_err());
    }

    #[test]
    fn northern() {
        assert!(is_northern(NE));
        assert!(is_northern(NW));
        assert!(!is_northern(SW));
        assert!(!is_northern(SE));
    }
}
