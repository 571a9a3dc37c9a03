// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Robust segment intersection.
//!
//! Intersection *existence* is decided with exact orientation predicates.
//! The intersection *point* of a proper crossing is computed with
//! homogeneous coordinates after translating the inputs towards the origin;
//! when that result is not representable or falls outside both segment
//! envelopes, the input endpoint closest to the centre of the four endpoints
//! is used instead.

use geotopo_index::{Bounds, Envelope};

use crate::coordinate::{segment_envelope, Coordinate};
use crate::hcoordinate::HCoordinate;

use super::orientation_index;

/// Outcome of the last intersection computation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IntersectionKind {
    #[default]
    None,
    /// The segments meet in a single point.
    Point,
    /// The segments overlap along a sub-segment.
    Collinear,
}

/// Computes the intersection of two segments (or a point and a segment).
///
/// Stores the result of the most recent computation; query it with the
/// accessor methods.
#[derive(Debug, Clone, Copy, Default)]
pub struct LineIntersector {
    kind: IntersectionKind,
    points: [Coordinate; 2],
    input: [[Coordinate; 2]; 2],
    proper: bool,
}

impl LineIntersector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Intersects the point `p` with the segment `p1 p2`.
    pub fn compute_point_intersection(&mut self, p: &Coordinate, p1: &Coordinate, p2: &Coordinate) {
        self.proper = false;
        self.kind = IntersectionKind::None;
        if segment_envelope(p1, p2).intersects_point(p.x, p.y)
            && orientation_index(p1, p2, p) == 0
            && orientation_index(p2, p1, p) == 0
        {
            self.proper = !(p == p1 || p == p2);
            self.points[0] = *p;
            self.kind = IntersectionKind::Point;
        }
    }

    /// Intersects segment `p1 p2` with segment `q1 q2`.
    pub fn compute_intersection(&mut self, p1: &Coordinate, p2: &Coordinate, q1: &Coordinate, q2: &Coordinate) {
        self.input = [[*p1, *p2], [*q1, *q2]];
        self.kind = self.compute_intersect(p1, p2, q1, q2);
    }

    fn compute_intersect(&mut self, p1: &Coordinate, p2: &Coordinate, q1: &Coordinate, q2: &Coordinate) -> IntersectionKind {
        self.proper = false;
        if !segment_envelope(p1, p2).intersects(&segment_envelope(q1, q2)) {
            return IntersectionKind::None;
        }

        let pq1 = orientation_index(p1, p2, q1);
        let pq2 = orientation_index(p1, p2, q2);
        if (pq1 > 0 && pq2 > 0) || (pq1 < 0 && pq2 < 0) {
            return IntersectionKind::None;
        }
        let qp1 = orientation_index(q1, q2, p1);
        let qp2 = orientation_index(q1, q2, p2);
        if (qp1 > 0 && qp2 > 0) || (qp1 < 0 && qp2 < 0) {
            return IntersectionKind::None;
        }

        if pq1 == 0 && pq2 == 0 && qp1 == 0 && qp2 == 0 {
            return self.compute_collinear_intersection(p1, p2, q1, q2);
        }

        if pq1 == 0 || pq2 == 0 || qp1 == 0 || qp2 == 0 {
            // An endpoint lies on the other segment. Prefer exact endpoint
            // matches so the reported point is an input vertex.
            self.points[0] = if p1 == q1 || p1 == q2 {
                *p1
            } else if p2 == q1 || p2 == q2 {
                *p2
            } else if pq1 == 0 {
                *q1
            } else if pq2 == 0 {
                *q2
            } else if qp1 == 0 {
                *p1
            } else {
                *p2
            };
        } else {
            self.proper = true;
            self.points[0] = self.proper_intersection_point(p1, p2, q1, q2);
        }
        IntersectionKind::Point
    }

    fn compute_collinear_intersection(
        &mut self,
        p1: &Coordinate,
        p2: &Coordinate,
        q1: &Coordinate,
        q2: &Coordinate,
    ) -> IntersectionKind {
        let env_p = segment_envelope(p1, p2);
        let env_q = segment_envelope(q1, q2);
        let p1q1p2 = env_p.intersects_point(q1.x, q1.y);
        let p1q2p2 = env_p.intersects_point(q2.x, q2.y);
        let q1p1q2 = env_q.intersects_point(p1.x, p1.y);
        let q1p2q2 = env_q.intersects_point(p2.x, p2.y);

        let (a, b, single) = if p1q1p2 && p1q2p2 {
            (*q1, *q2, false)
        } else if q1p1q2 && q1p2q2 {
            (*p1, *p2, false)
        } else if p1q1p2 && q1p1q2 {
            (*q1, *p1, q1 == p1 && !p1q2p2 && !q1p2q2)
        } else if p1q1p2 && q1p2q2 {
            (*q1, *p2, q1 == p2 && !p1q2p2 && !q1p1q2)
        } else if p1q2p2 && q1p1q2 {
            (*q2, *p1, q2 == p1 && !p1q1p2 && !q1p2q2)
        } else if p1q2p2 && q1p2q2 {
            (*q2, *p2, q2 == p2 && !p1q1p2 && !q1p1q2)
        } else {
            return IntersectionKind::None;
        };
        self.points = [a, b];
        if single {
            IntersectionKind::Point
        } else {
            IntersectionKind::Collinear
        }
    }

    fn proper_intersection_point(&self, p1: &Coordinate, p2: &Coordinate, q1: &Coordinate, q2: &Coordinate) -> Coordinate {
        let centre = normalization_centre(p1, p2, q1, q2);
        let shift = |c: &Coordinate| Coordinate::new(c.x - centre.x, c.y - centre.y);
        let computed = HCoordinate::intersection(&shift(p1), &shift(p2), &shift(q1), &shift(q2))
            .map(|c| Coordinate::new(c.x + centre.x, c.y + centre.y));

        match computed {
            Ok(pt) if self.is_in_segment_envelopes(&pt) => pt,
            _ => central_endpoint(p1, p2, q1, q2),
        }
    }

    fn is_in_segment_envelopes(&self, pt: &Coordinate) -> bool {
        let [[p1, p2], [q1, q2]] = &self.input;
        segment_envelope(p1, p2).intersects_point(pt.x, pt.y)
            && segment_envelope(q1, q2).intersects_point(pt.x, pt.y)
    }

    // --- Result accessors ---

    pub fn kind(&self) -> IntersectionKind {
        self.kind
    }

    pub fn has_intersection(&self) -> bool {
        self.kind != IntersectionKind::None
    }

    /// Number of intersection points (0, 1 or 2).
    pub fn intersection_num(&self) -> usize {
        match self.kind {
            IntersectionKind::None => 0,
            IntersectionKind::Point => 1,
            IntersectionKind::Collinear => 2,
        }
    }

    pub fn intersection(&self, index: usize) -> Coordinate {
        self.points[index]
    }

    /// Whether the single intersection point is interior to both segments.
    pub fn is_proper(&self) -> bool {
        self.has_intersection() && self.proper
    }

    pub fn is_collinear(&self) -> bool {
        self.kind == IntersectionKind::Collinear
    }

    /// Whether some intersection point is not an endpoint of either input.
    pub fn is_interior_intersection(&self) -> bool {
        self.is_interior_intersection_of(0) || self.is_interior_intersection_of(1)
    }

    /// Whether some intersection point is not an endpoint of input `line`.
    pub fn is_interior_intersection_of(&self, line: usize) -> bool {
        (0..self.intersection_num()).any(|i| {
            let pt = &self.points[i];
            pt != &self.input[line][0] && pt != &self.input[line][1]
        })
    }

    /// Whether `pt` is one of the computed intersection points.
    pub fn is_intersection(&self, pt: &Coordinate) -> bool {
        (0..self.intersection_num()).any(|i| &self.points[i] == pt)
    }

    /// Distance of intersection `index` along input segment `segment`.
    pub fn edge_distance(&self, segment: usize, index: usize) -> f64 {
        let [p0, p1] = &self.input[segment];
        edge_distance(&self.points[index], p0, p1)
    }
}

/// Centre of the overlap of the two segment envelopes.
fn normalization_centre(p1: &Coordinate, p2: &Coordinate, q1: &Coordinate, q2: &Coordinate) -> Coordinate {
    let a = segment_envelope(p1, p2);
    let b = segment_envelope(q1, q2);
    let overlap = Envelope {
        min_x: a.min_x.max(b.min_x),
        min_y: a.min_y.max(b.min_y),
        max_x: a.max_x.min(b.max_x),
        max_y: a.max_y.min(b.max_y),
    };
    Coordinate::new(
        (overlap.min_x + overlap.max_x) / 2.0,
        (overlap.min_y + overlap.max_y) / 2.0,
    )
}

/// The input endpoint nearest the average of all four endpoints.
fn central_endpoint(p1: &Coordinate, p2: &Coordinate, q1: &Coordinate, q2: &Coordinate) -> Coordinate {
    let pts = [*p1, *p2, *q1, *q2];
    let centre = Coordinate::new(
        pts.iter().map(|p| p.x).sum::<f64>() / 4.0,
        pts.iter().map(|p| p.y).sum::<f64>() / 4.0,
    );
    let mut best = pts[0];
    let mut best_dist = f64::INFINITY;
    for p in pts {
        let d = p.distance(&centre);
        if d < best_dist {
            best_dist = d;
            best = p;
        }
    }
    best
}

/// Monotone "distance" of `p` along segment `p0 p1`.
///
/// Uses the larger axis delta rather than the Euclidean length, which is
/// exact for points computed on the segment and preserves their order. A
/// point different from `p0` always gets a positive distance.
pub fn edge_distance(p: &Coordinate, p0: &Coordinate, p1: &Coordinate) -> f64 {
    let dx = (p1.x - p0.x).abs();
    let dy = (p1.y - p0.y).abs();
    if p == p0 {
        return 0.0;
    }
    if p == p1 {
        return dx.max(dy);
    }
    let pdx = (p.x - p0.x).abs();
    let pdy = (p.y - p0.y).abs();
    let dist = if dx > dy { pdx } else { pdy };
    if dist == 0.0 {
        pdx.max(pdy)
    } else {
        dist
    }
}
