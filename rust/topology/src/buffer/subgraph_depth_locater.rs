// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Depth of a point relative to already labelled buffer subgraphs.
//!
//! A ray is cast from the query point in the positive X direction. Among the
//! non-horizontal segments it stabs, the one closest to the point (leftmost
//! in the ray's sense) carries the depth on the side facing the point.

use std::cmp::Ordering;

use crate::algorithm::{orientation_index, segment_orientation_index};
use crate::coordinate::Coordinate;
use crate::error::Result;
use crate::graph::{DirectedEdge, PlanarGraph, Position};

use super::buffer_subgraph::BufferSubgraph;

/// Locates the depth of points against a set of subgraphs whose depths have
/// been computed.
#[derive(Debug, Clone, Copy)]
pub struct SubgraphDepthLocater<'a> {
    graph: &'a PlanarGraph,
    subgraphs: &'a [BufferSubgraph],
}

impl<'a> SubgraphDepthLocater<'a> {
    pub fn new(graph: &'a PlanarGraph, subgraphs: &'a [BufferSubgraph]) -> Self {
        Self { graph, subgraphs }
    }

    /// Depth of the region containing `p`; `0` when no subgraph lies to its
    /// right.
    pub fn depth(&self, p: &Coordinate) -> Result<i32> {
        let stabbed = self.find_stabbed_segments(p)?;
        Ok(stabbed
            .iter()
            .min_by(|a, b| a.compare(b))
            .map_or(0, |ds| ds.left_depth))
    }

    fn find_stabbed_segments(&self, p: &Coordinate) -> Result<Vec<DepthSegment>> {
        let mut stabbed = Vec::new();
        for sg in self.subgraphs {
            let env = sg.envelope();
            if p.y < env.min_y || p.y > env.max_y {
                continue;
            }
            for key in sg.directed_edges() {
                let de = self.graph.directed_edge(*key)?;
                if !de.is_forward() {
                    continue;
                }
                let coords = self.graph.edge(de.edge())?.coordinates();
                stab_edge(p, de, coords, &mut stabbed);
            }
        }
        Ok(stabbed)
    }
}

fn stab_edge(p: &Coordinate, de: &DirectedEdge, coords: &[Coordinate], stabbed: &mut Vec<DepthSegment>) {
    for w in coords.windows(2) {
        let flipped = w[0].y > w[1].y;
        let (p0, p1) = if flipped { (w[1], w[0]) } else { (w[0], w[1]) };
        if p0.x.max(p1.x) < p.x {
            continue;
        }
        // Horizontal segments are never the first stabbed.
        if p0.y == p1.y {
            continue;
        }
        if p.y < p0.y || p.y > p1.y {
            continue;
        }
        if orientation_index(&p0, &p1, p) < 0 {
            continue;
        }
        let left_depth = if flipped {
            de.depth(Position::Right)
        } else {
            de.depth(Position::Left)
        };
        stabbed.push(DepthSegment { p0, p1, left_depth });
    }
}

/// An upward-oriented segment and the depth on its left side.
#[derive(Debug, Clone, Copy)]
struct DepthSegment {
    p0: Coordinate,
    p1: Coordinate,
    left_depth: i32,
}

impl DepthSegment {
    fn min_x(&self) -> f64 {
        self.p0.x.min(self.p1.x)
    }

    fn max_x(&self) -> f64 {
        self.p0.x.max(self.p1.x)
    }

    /// Orders segments left to right along a horizontal ray. Segments whose
    /// X extents are disjoint compare by position; overlapping ones by
    /// relative orientation, with a lexicographic fallback so the order is
    /// total.
    fn compare(&self, other: &DepthSegment) -> Ordering {
        if self.min_x() >= other.max_x() {
            return Ordering::Greater;
        }
        if self.max_x() <= other.min_x() {
            return Ordering::Less;
        }
        let orient = segment_orientation_index(&self.p0, &self.p1, &other.p0, &other.p1);
        if orient != 0 {
            return orient.cmp(&0);
        }
        let orient = -segment_orientation_index(&other.p0, &other.p1, &self.p0, &self.p1);
        if orient != 0 {
            return orient.cmp(&0);
        }
        self.p0
            .compare_to(&other.p0)
            .then_with(|| self.p1.compare_to(&other.p1))
    }
}
