// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Dimensionally extended nine-intersection matrices (DE-9IM).

use std::fmt;

use crate::error::{Error, Result};
use crate::geometry::Dimension;
use crate::graph::Location;

/// Dimensions of the intersections between the interior, boundary and
/// exterior of two geometries. Rows index the first geometry, columns the
/// second, both in the order interior, boundary, exterior.
///
/// # Example
///
/// ```
/// use geotopo_topology::relate::IntersectionMatrix;
///
/// let im: IntersectionMatrix = "212101212".parse().unwrap();
/// assert!(im.is_intersects());
/// assert!(im.matches("T*T***T**").unwrap());
/// assert!(!im.is_within());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntersectionMatrix {
    matrix: [[Dimension; 3]; 3],
}

impl Default for IntersectionMatrix {
    fn default() -> Self {
        Self::new()
    }
}

impl IntersectionMatrix {
    /// A matrix with every entry `F`.
    pub fn new() -> Self {
        Self {
            matrix: [[Dimension::False; 3]; 3],
        }
    }

    pub fn get(&self, row: Location, col: Location) -> Dimension {
        match (row.index(), col.index()) {
            (Some(r), Some(c)) => self.matrix[r][c],
            _ => Dimension::False,
        }
    }

    /// Sets an entry. Entries addressed by a null location are ignored.
    pub fn set(&mut self, row: Location, col: Location, dim: Dimension) {
        if let (Some(r), Some(c)) = (row.index(), col.index()) {
            self.matrix[r][c] = dim;
        }
    }

    /// Raises an entry to at least `dim`.
    pub fn set_at_least(&mut self, row: Location, col: Location, dim: Dimension) {
        if let (Some(r), Some(c)) = (row.index(), col.index()) {
            if self.matrix[r][c].value() < dim.value() {
                self.matrix[r][c] = dim;
            }
        }
    }

    /// [`set_at_least`](Self::set_at_least) that tolerates null locations.
    pub fn set_at_least_if_valid(&mut self, row: Location, col: Location, dim: Dimension) {
        if row != Location::Null && col != Location::Null {
            self.set_at_least(row, col, dim);
        }
    }

    /// Raises every entry to at least the dimension in the matching position
    /// of a nine-character pattern. `*`, `T` and `F` leave entries alone.
    pub fn set_at_least_pattern(&mut self, pattern: &str) -> Result<()> {
        let dims = parse_pattern(pattern)?;
        for (i, dim) in dims.into_iter().enumerate() {
            let cell = &mut self.matrix[i / 3][i % 3];
            if cell.value() < dim.value() {
                *cell = dim;
            }
        }
        Ok(())
    }

    pub fn set_all(&mut self, dim: Dimension) {
        self.matrix = [[dim; 3]; 3];
    }

    /// Whether every entry matches the corresponding pattern symbol.
    ///
    /// `*` matches anything, `T` any non-empty dimension, `F` the empty set
    /// and `0`, `1`, `2` exactly that dimension.
    pub fn matches(&self, pattern: &str) -> Result<bool> {
        let required = parse_pattern(pattern)?;
        Ok(required
            .iter()
            .enumerate()
            .all(|(i, req)| matches_dimension(self.matrix[i / 3][i % 3], *req)))
    }

    /// Swaps rows and columns, giving the matrix of the reversed relation.
    pub fn transpose(&self) -> Self {
        let mut t = Self::new();
        for r in 0..3 {
            for c in 0..3 {
                t.matrix[c][r] = self.matrix[r][c];
            }
        }
        t
    }

    // --- Named predicates ---

    pub fn is_disjoint(&self) -> bool {
        self.cell(0, 0) == Dimension::False
            && self.cell(0, 1) == Dimension::False
            && self.cell(1, 0) == Dimension::False
            && self.cell(1, 1) == Dimension::False
    }

    pub fn is_intersects(&self) -> bool {
        !self.is_disjoint()
    }

    /// The geometries touch: their interiors are disjoint but their
    /// boundaries meet. Undefined (false) when both are points.
    pub fn is_touches(&self, dim_a: Dimension, dim_b: Dimension) -> bool {
        if dim_a.value() > dim_b.value() {
            return self.is_touches(dim_b, dim_a);
        }
        let defined = matches!(
            (dim_a, dim_b),
            (Dimension::Surface, Dimension::Surface)
                | (Dimension::Curve, Dimension::Curve)
                | (Dimension::Curve, Dimension::Surface)
                | (Dimension::Point, Dimension::Surface)
                | (Dimension::Point, Dimension::Curve)
        );
        defined
            && self.cell(0, 0) == Dimension::False
            && (is_true(self.cell(0, 1)) || is_true(self.cell(1, 0)) || is_true(self.cell(1, 1)))
    }

    pub fn is_crosses(&self, dim_a: Dimension, dim_b: Dimension) -> bool {
        use Dimension::{Curve, Point, Surface};
        match (dim_a, dim_b) {
            (Point, Curve) | (Point, Surface) | (Curve, Surface) => {
                is_true(self.cell(0, 0)) && is_true(self.cell(0, 2))
            }
            (Curve, Point) | (Surface, Point) | (Surface, Curve) => {
                is_true(self.cell(0, 0)) && is_true(self.cell(2, 0))
            }
            (Curve, Curve) => self.cell(0, 0) == Point,
            _ => false,
        }
    }

    pub fn is_within(&self) -> bool {
        is_true(self.cell(0, 0)) && self.cell(0, 2) == Dimension::False && self.cell(1, 2) == Dimension::False
    }

    pub fn is_contains(&self) -> bool {
        is_true(self.cell(0, 0)) && self.cell(2, 0) == Dimension::False && self.cell(2, 1) == Dimension::False
    }

    pub fn is_covers(&self) -> bool {
        self.has_point_in_common() && self.cell(2, 0) == Dimension::False && self.cell(2, 1) == Dimension::False
    }

    pub fn is_covered_by(&self) -> bool {
        self.has_point_in_common() && self.cell(0, 2) == Dimension::False && self.cell(1, 2) == Dimension::False
    }

    /// Topological equality; geometries of different dimension are never
    /// equal.
    pub fn is_equals(&self, dim_a: Dimension, dim_b: Dimension) -> bool {
        dim_a == dim_b
            && is_true(self.cell(0, 0))
            && self.cell(0, 2) == Dimension::False
            && self.cell(1, 2) == Dimension::False
            && self.cell(2, 0) == Dimension::False
            && self.cell(2, 1) == Dimension::False
    }

    pub fn is_overlaps(&self, dim_a: Dimension, dim_b: Dimension) -> bool {
        match (dim_a, dim_b) {
            (Dimension::Point, Dimension::Point) | (Dimension::Surface, Dimension::Surface) => {
                is_true(self.cell(0, 0)) && is_true(self.cell(0, 2)) && is_true(self.cell(2, 0))
            }
            (Dimension::Curve, Dimension::Curve) => {
                self.cell(0, 0) == Dimension::Curve && is_true(self.cell(0, 2)) && is_true(self.cell(2, 0))
            }
            _ => false,
        }
    }

    fn has_point_in_common(&self) -> bool {
        is_true(self.cell(0, 0)) || is_true(self.cell(0, 1)) || is_true(self.cell(1, 0)) || is_true(self.cell(1, 1))
    }

    fn cell(&self, r: usize, c: usize) -> Dimension {
        self.matrix[r][c]
    }
}

fn is_true(dim: Dimension) -> bool {
    dim.value() >= 0 || dim == Dimension::True
}

fn matches_dimension(actual: Dimension, required: Dimension) -> bool {
    match required {
        Dimension::DontCare => true,
        Dimension::True => is_true(actual),
        _ => actual == required,
    }
}

fn parse_pattern(pattern: &str) -> Result<[Dimension; 9]> {
    let symbols: Vec<char> = pattern.chars().collect();
    if symbols.len() != 9 {
        return Err(Error::InvalidArgument(format!(
            "intersection matrix pattern must have 9 symbols: {pattern}"
        )));
    }
    let mut dims = [Dimension::DontCare; 9];
    for (dim, ch) in dims.iter_mut().zip(symbols) {
        *dim = Dimension::from_symbol(ch)
            .ok_or_else(|| Error::InvalidArgument(format!("invalid dimension symbol '{ch}' in pattern {pattern}")))?;
    }
    Ok(dims)
}

impl std::str::FromStr for IntersectionMatrix {
    type Err = Error;

    /// Parses a nine-character matrix of `F`, `0`, `1` and `2`.
    fn from_str(s: &str) -> Result<Self> {
        let dims = parse_pattern(s)?;
        let mut im = Self::new();
        for (i, dim) in dims.into_iter().enumerate() {
            if matches!(dim, Dimension::True | Dimension::DontCare) {
                return Err(Error::InvalidArgument(format!("matrix entries must be F, 0, 1 or 2: {s}")));
            }
            im.matrix[i / 3][i % 3] = dim;
        }
        Ok(im)
    }
}

impl fmt::Display for IntersectionMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in &self.matrix {
            for dim in row {
                write!(f, "{}", dim.symbol())?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn im(s: &str) -> IntersectionMatrix {
        s.parse().unwrap()
    }

    #[test]
    fn new_matrix_is_all_false() {
        assert_eq!(IntersectionMatrix::new().to_string(), "FFFFFFFFF");
    }

    #[test]
    fn set_at_least_only_raises() {
        let mut m = IntersectionMatrix::new();
        m.set_at_least(Location::Interior, Location::Interior, Dimension::Curve);
        m.set_at_least(Location::Interior, Location::Interior, Dimension::Point);
        assert_eq!(m.get(Location::Interior, Location::Interior), Dimension::Curve);
        m.set_at_least_if_valid(Location::Null, Location::Interior, Dimension::Surface);
        assert_eq!(m.to_string(), "1FFFFFFFF");
        m.set_at_least_pattern("F0*T*****").unwrap();
        assert_eq!(m.to_string(), "10FFFFFFF");
    }

    #[test]
    fn pattern_matching() {
        let m = im("212101212");
        assert!(m.matches("T*T***T**").unwrap());
        assert!(m.matches("2********").unwrap());
        assert!(!m.matches("F********").unwrap());
        assert!(m.matches("TTTTTTTTT").unwrap());
        assert!(m.matches("1**").is_err());
        assert!(m.matches("X********").is_err());
    }

    #[test]
    fn named_predicates() {
        let disjoint = im("FF2FF1212");
        assert!(disjoint.is_disjoint());
        assert!(!disjoint.is_intersects());

        let overlap = im("212101212");
        assert!(overlap.is_overlaps(Dimension::Surface, Dimension::Surface));
        assert!(!overlap.is_within());

        let touch = im("FF2F11212");
        assert!(touch.is_touches(Dimension::Surface, Dimension::Surface));
        assert!(!touch.is_touches(Dimension::Point, Dimension::Point));

        let within = im("0FFFFF212");
        assert!(within.is_within());
        assert!(within.is_covered_by());
        assert!(within.transpose().is_contains());
        assert!(within.transpose().is_covers());

        let equal = im("2FFF1FFF2");
        assert!(equal.is_equals(Dimension::Surface, Dimension::Surface));
        assert!(!equal.is_equals(Dimension::Surface, Dimension::Curve));

        let crossing = im("101FF0212");
        assert!(crossing.is_crosses(Dimension::Curve, Dimension::Surface));
        assert!(crossing.transpose().is_crosses(Dimension::Surface, Dimension::Curve));
    }

    #[test]
    fn transpose_swaps_rows_and_columns() {
        assert_eq!(im("012F12FF2").transpose().to_string(), "0FF11F222");
    }
}
