// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Douglas-Peucker simplification of a set of lines that never introduces
//! an intersection between them.
//!
//! Each line is split recursively at its furthest point until a section can
//! be replaced by a single segment. A replacement is rejected when it would
//! drop a ring below its minimum size, deviate more than the tolerance, or
//! cross the interior of any output segment or any input segment outside
//! the section being replaced.
//!
//! Input segments live in a packed [`StrTree`] and are removed as they are
//! flattened. Output segments grow during the run, so they go into an
//! `rstar` tree that takes inserts.

use geotopo_index::StrTree;
use rstar::{RTree, RTreeObject, AABB};

use crate::algorithm::{distance_point_segment, LineIntersector};
use crate::coordinate::Coordinate;
use crate::error::Result;

use super::tagged_line_string::{result_size, LineSegment, SegmentRef, TaggedLineString};

/// A section `[start, end]` of point indexes and its recursion depth.
#[derive(Debug, Clone, Copy)]
struct Section {
    start: usize,
    end: usize,
    depth: usize,
}

/// Simplifies a set of [`TaggedLineString`]s together.
#[derive(Debug)]
pub struct TaggedLinesSimplifier {
    tolerance: f64,
    input_index: StrTree<SegmentRef>,
    output: RTree<LineSegment>,
    li: LineIntersector,
}

impl TaggedLinesSimplifier {
    pub fn new(tolerance: f64, node_capacity: usize) -> Result<Self> {
        Ok(Self {
            tolerance,
            input_index: StrTree::new(node_capacity)?,
            output: RTree::new(),
            li: LineIntersector::new(),
        })
    }

    /// Simplifies every line in place, in order.
    pub fn simplify(&mut self, lines: &mut [TaggedLineString]) -> Result<()> {
        for (line, tagged) in lines.iter().enumerate() {
            for index in 0..tagged.num_segments() {
                if let Some(seg) = tagged.segment(index) {
                    self.input_index.insert(seg.envelope(), SegmentRef { line, index })?;
                }
            }
        }
        for k in 0..lines.len() {
            let result = self.simplify_line(lines, k)?;
            lines[k].set_result(result);
        }
        tracing::debug!(
            lines = lines.len(),
            flattened = self.output.size(),
            tolerance = self.tolerance,
            "Simplified tagged lines"
        );
        Ok(())
    }

    fn simplify_line(&mut self, lines: &[TaggedLineString], line: usize) -> Result<Vec<LineSegment>> {
        let pts = lines[line].coordinates();
        let mut result = Vec::new();
        if pts.len() < 2 {
            return Ok(result);
        }
        let min_size = lines[line].min_size();

        let mut stack = vec![Section {
            start: 0,
            end: pts.len() - 1,
            depth: 1,
        }];
        while let Some(Section { start: i, end: j, depth }) = stack.pop() {
            if i + 1 == j {
                // Unchanged segments stay in the input index.
                result.push(LineSegment::new(pts[i], pts[j]));
                continue;
            }

            let mut valid = true;
            if result_size(&result) < min_size && depth + 1 < min_size {
                valid = false;
            }
            let (furthest, distance) = find_furthest_point(pts, i, j);
            if distance > self.tolerance {
                valid = false;
            }
            let candidate = LineSegment::new(pts[i], pts[j]);
            if valid && self.has_bad_intersection(lines, line, i, j, &candidate)? {
                valid = false;
            }

            if valid {
                self.flatten(lines, line, i, j, candidate)?;
                result.push(candidate);
                continue;
            }
            // The first half is finished before the second.
            stack.push(Section {
                start: furthest,
                end: j,
                depth: depth + 1,
            });
            stack.push(Section {
                start: i,
                end: furthest,
                depth: depth + 1,
            });
        }
        Ok(result)
    }

    /// Replaces the input segments `i..j` of `line` by `candidate`.
    fn flatten(&mut self, lines: &[TaggedLineString], line: usize, i: usize, j: usize, candidate: LineSegment) -> Result<()> {
        self.output.insert(candidate);
        for index in i..j {
            if let Some(seg) = lines[line].segment(index) {
                self.input_index.remove(&seg.envelope(), &SegmentRef { line, index })?;
            }
        }
        tracing::trace!(line, start = i, end = j, "Flattened section");
        Ok(())
    }

    fn has_bad_intersection(
        &mut self,
        lines: &[TaggedLineString],
        line: usize,
        i: usize,
        j: usize,
        candidate: &LineSegment,
    ) -> Result<bool> {
        Ok(self.has_bad_output_intersection(candidate) || self.has_bad_input_intersection(lines, line, i, j, candidate)?)
    }

    fn has_bad_output_intersection(&mut self, candidate: &LineSegment) -> bool {
        let li = &mut self.li;
        self.output
            .locate_in_envelope_intersecting(&candidate.envelope_2d())
            .any(|seg| has_interior_intersection(li, seg, candidate))
    }

    fn has_bad_input_intersection(
        &mut self,
        lines: &[TaggedLineString],
        line: usize,
        i: usize,
        j: usize,
        candidate: &LineSegment,
    ) -> Result<bool> {
        let hits: Vec<SegmentRef> = self.input_index.query(&candidate.envelope())?.into_iter().copied().collect();
        for hit in hits {
            // Segments being replaced cannot block their own replacement.
            if hit.line == line && hit.index >= i && hit.index < j {
                continue;
            }
            let Some(seg) = lines.get(hit.line).and_then(|l| l.segment(hit.index)) else {
                continue;
            };
            if has_interior_intersection(&mut self.li, &seg, candidate) {
                return Ok(true);
            }
        }
        Ok(false)
    }
}

impl RTreeObject for LineSegment {
    type Envelope = AABB<[f64; 2]>;

    fn envelope(&self) -> Self::Envelope {
        self.envelope_2d()
    }
}

impl LineSegment {
    fn envelope_2d(&self) -> AABB<[f64; 2]> {
        AABB::from_corners([self.p0.x, self.p0.y], [self.p1.x, self.p1.y])
    }
}

fn has_interior_intersection(li: &mut LineIntersector, a: &LineSegment, b: &LineSegment) -> bool {
    li.compute_intersection(&a.p0, &a.p1, &b.p0, &b.p1);
    li.is_interior_intersection()
}

/// Index of the point strictly between `i` and `j` furthest from the
/// segment `pts[i] pts[j]`, and its distance. Ties keep the first.
fn find_furthest_point(pts: &[Coordinate], i: usize, j: usize) -> (usize, f64) {
    let (p0, p1) = (&pts[i], &pts[j]);
    let mut max_index = i;
    let mut max_dist = -1.0;
    for (k, p) in pts.iter().enumerate().take(j).skip(i + 1) {
        let dist = distance_point_segment(p, p0, p1);
        if dist > max_dist {
            max_dist = dist;
            max_index = k;
        }
    }
    (max_index, max_dist)
}
