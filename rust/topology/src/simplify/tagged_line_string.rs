// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Lines under simplification and the segments they are built from.

use geotopo_index::Envelope;

use crate::coordinate::{segment_envelope, Coordinate};

/// A segment of one of the simplified lines, identified by the line's
/// position in the simplifier input and the segment's index in that line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SegmentRef {
    pub line: usize,
    pub index: usize,
}

/// A straight segment between two coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineSegment {
    pub p0: Coordinate,
    pub p1: Coordinate,
}

impl LineSegment {
    pub fn new(p0: Coordinate, p1: Coordinate) -> Self {
        Self { p0, p1 }
    }

    pub fn envelope(&self) -> Envelope {
        segment_envelope(&self.p0, &self.p1)
    }
}

/// A line or ring with its simplified output.
///
/// The input coordinates never change; flattened sections are collected as
/// result segments, in line order.
#[derive(Debug, Clone)]
pub struct TaggedLineString {
    coords: Vec<Coordinate>,
    min_size: usize,
    result: Vec<LineSegment>,
}

impl TaggedLineString {
    /// `min_size` is the fewest points the output may keep: 4 for rings,
    /// 2 for lines.
    pub fn new(coords: Vec<Coordinate>, min_size: usize) -> Self {
        Self {
            coords,
            min_size,
            result: Vec::new(),
        }
    }

    pub fn ring(coords: Vec<Coordinate>) -> Self {
        Self::new(coords, 4)
    }

    pub fn line(coords: Vec<Coordinate>) -> Self {
        Self::new(coords, 2)
    }

    pub fn coordinates(&self) -> &[Coordinate] {
        &self.coords
    }

    pub fn min_size(&self) -> usize {
        self.min_size
    }

    pub fn num_segments(&self) -> usize {
        self.coords.len().saturating_sub(1)
    }

    /// Input segment `index`, if it exists.
    pub fn segment(&self, index: usize) -> Option<LineSegment> {
        Some(LineSegment::new(*self.coords.get(index)?, *self.coords.get(index + 1)?))
    }

    pub fn result_segments(&self) -> &[LineSegment] {
        &self.result
    }

    pub(crate) fn set_result(&mut self, result: Vec<LineSegment>) {
        self.result = result;
    }

    /// Number of points in the output so far.
    pub fn result_size(&self) -> usize {
        result_size(&self.result)
    }

    /// The simplified coordinates. A line that was never simplified (fewer
    /// than two points) is returned unchanged.
    pub fn result_coordinates(&self) -> Vec<Coordinate> {
        let Some(first) = self.result.first() else {
            return self.coords.clone();
        };
        std::iter::once(first.p0).chain(self.result.iter().map(|s| s.p1)).collect()
    }
}

/// Point count of a chain of result segments.
pub(crate) fn result_size(segments: &[LineSegment]) -> usize {
    if segments.is_empty() {
        0
    } else {
        segments.len() + 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::coords;

    #[test]
    fn result_chains_segments() {
        let mut line = TaggedLineString::line(coords(&[(0.0, 0.0), (1.0, 1.0), (2.0, 0.0)]));
        assert_eq!(line.result_size(), 0);
        assert_eq!(line.num_segments(), 2);
        assert_eq!(line.segment(2), None);

        line.set_result(vec![LineSegment::new(Coordinate::new(0.0, 0.0), Coordinate::new(2.0, 0.0))]);
        assert_eq!(line.result_size(), 2);
        assert_eq!(line.result_coordinates(), coords(&[(0.0, 0.0), (2.0, 0.0)]));
    }

    #[test]
    fn unsimplified_line_keeps_its_points() {
        let line = TaggedLineString::line(coords(&[(3.0, 3.0)]));
        assert_eq!(line.result_coordinates(), coords(&[(3.0, 3.0)]));
        assert_eq!(TaggedLineString::ring(Vec::new()).min_size(), 4);
    }
}
