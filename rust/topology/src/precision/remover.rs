// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Shifting geometries by their common coordinate bits.

use crate::config::Config;
use crate::coordinate::Coordinate;
use crate::error::Result;
use crate::geometry::Geometry;

use super::common_bits::CommonBits;

/// Removes the leading bits shared by every ordinate of a set of
/// geometries, moving them close to the origin where more mantissa bits are
/// available for computation.
///
/// # Example
///
/// ```
/// use geotopo_topology::geometry::Geometry;
/// use geotopo_topology::precision::CommonBitsRemover;
///
/// let original = Geometry::rectangle(1_000_000.0, 2_000_000.0, 1_000_010.0, 2_000_010.0);
/// let mut remover = CommonBitsRemover::new();
/// remover.add(&original);
///
/// let mut shifted = original.clone();
/// remover.remove_common_bits(&mut shifted);
/// remover.add_common_bits(&mut shifted);
/// assert_eq!(shifted, original);
/// ```
#[derive(Debug, Clone)]
pub struct CommonBitsRemover {
    x: CommonBits,
    y: CommonBits,
}

impl Default for CommonBitsRemover {
    fn default() -> Self {
        Self::new()
    }
}

impl CommonBitsRemover {
    pub fn new() -> Self {
        Self {
            x: CommonBits::new(),
            y: CommonBits::new(),
        }
    }

    /// Adds every coordinate of `geom` to the common-bits computation.
    pub fn add(&mut self, geom: &Geometry) {
        geom.for_each_coordinate(|c| {
            self.x.add(c.x);
            self.y.add(c.y);
        });
    }

    /// The coordinate made of the common bits of each ordinate.
    pub fn common_coordinate(&self) -> Coordinate {
        Coordinate::new(self.x.common(), self.y.common())
    }

    /// Translates `geom` by minus the common coordinate.
    pub fn remove_common_bits(&self, geom: &mut Geometry) {
        let common = self.common_coordinate();
        if common.x == 0.0 && common.y == 0.0 {
            return;
        }
        geom.translate(-common.x, -common.y);
    }

    /// Translates `geom` back by the common coordinate.
    pub fn add_common_bits(&self, geom: &mut Geometry) {
        let common = self.common_coordinate();
        geom.translate(common.x, common.y);
    }
}

/// Runs operations on copies of their inputs with the common bits removed.
#[derive(Debug, Clone, Copy)]
pub struct CommonBitsOp {
    return_to_original_precision: bool,
}

impl Default for CommonBitsOp {
    fn default() -> Self {
        Self::new(true)
    }
}

impl CommonBitsOp {
    /// With `return_to_original_precision` unset, results stay in the shifted
    /// coordinate space.
    pub fn new(return_to_original_precision: bool) -> Self {
        Self {
            return_to_original_precision,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.return_to_original_precision)
    }

    /// Applies a unary geometry operation.
    pub fn execute(&self, geom: &Geometry, op: impl FnOnce(Geometry) -> Result<Geometry>) -> Result<Geometry> {
        let mut remover = CommonBitsRemover::new();
        remover.add(geom);
        let mut shifted = geom.clone();
        remover.remove_common_bits(&mut shifted);
        let result = op(shifted)?;
        Ok(self.restore(&remover, result))
    }

    /// Applies a binary geometry operation; both inputs share one shift.
    pub fn execute_pair(
        &self,
        a: &Geometry,
        b: &Geometry,
        op: impl FnOnce(Geometry, Geometry) -> Result<Geometry>,
    ) -> Result<Geometry> {
        let (remover, a, b) = shifted_pair(a, b);
        let result = op(a, b)?;
        Ok(self.restore(&remover, result))
    }

    /// Evaluates a translation-invariant predicate or measure on shifted
    /// copies of both inputs.
    pub fn evaluate_pair<R>(&self, a: &Geometry, b: &Geometry, op: impl FnOnce(&Geometry, &Geometry) -> Result<R>) -> Result<R> {
        let (_, a, b) = shifted_pair(a, b);
        op(&a, &b)
    }

    fn restore(&self, remover: &CommonBitsRemover, mut result: Geometry) -> Geometry {
        if self.return_to_original_precision {
            remover.add_common_bits(&mut result);
        }
        result
    }
}

fn shifted_pair(a: &Geometry, b: &Geometry) -> (CommonBitsRemover, Geometry, Geometry) {
    let mut remover = CommonBitsRemover::new();
    remover.add(a);
    remover.add(b);
    let mut a = a.clone();
    let mut b = b.clone();
    remover.remove_common_bits(&mut a);
    remover.remove_common_bits(&mut b);
    tracing::trace!(common = %remover.common_coordinate(), "Removed common bits");
    (remover, a, b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn common_coordinate_of_far_geometry() {
        let g = Geometry::rectangle(1_000_000.0, 1_000_000.0, 1_000_001.0, 1_000_001.0);
        let mut remover = CommonBitsRemover::new();
        remover.add(&g);
        let common = remover.common_coordinate();
        assert!(common.x > 999_000.0);
        assert!(common.y > 999_000.0);

        let mut shifted = g.clone();
        remover.remove_common_bits(&mut shifted);
        let env = shifted.envelope();
        assert!(env.max_x < 1000.0);
        assert!(env.max_y < 1000.0);
    }

    #[test]
    fn zero_common_coordinate_leaves_geometry_alone() {
        let g = Geometry::line_string(&[(-5.0, 1.0), (5.0, 300.0)]);
        let mut remover = CommonBitsRemover::new();
        remover.add(&g);
        assert_eq!(remover.common_coordinate(), Coordinate::new(0.0, 0.0));
        let mut copy = g.clone();
        remover.remove_common_bits(&mut copy);
        assert_eq!(copy, g);
    }

    #[test]
    fn op_restores_precision_when_asked() {
        let g = Geometry::point(1_000_000.5, 2_000_000.25);
        let restored = CommonBitsOp::new(true).execute(&g, Ok).unwrap();
        assert_eq!(restored, g);

        let shifted = CommonBitsOp::new(false).execute(&g, Ok).unwrap();
        assert_ne!(shifted, g);
    }

    #[test]
    fn pair_op_uses_one_shift() {
        let a = Geometry::point(1_000_000.0, 1_000_000.0);
        let b = Geometry::point(1_000_003.0, 1_000_004.0);
        let distance = CommonBitsOp::default()
            .evaluate_pair(&a, &b, |a, b| {
                let (Geometry::Point(p), Geometry::Point(q)) = (a, b) else {
                    unreachable!()
                };
                Ok(p.distance(q))
            })
            .unwrap();
        assert!((distance - 5.0).abs() < 1e-12);
    }
}
