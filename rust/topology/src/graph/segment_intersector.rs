// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Intersection of edge sets.
//!
//! Candidate segment pairs are found with an STR tree over segment
//! envelopes; each candidate is then intersected exactly and the result
//! recorded on both edges.

use geotopo_index::StrTree;

use crate::algorithm::LineIntersector;
use crate::coordinate::{segment_envelope, Coordinate};
use crate::error::Result;
use crate::keys::EdgeKey;

use super::planar_graph::PlanarGraph;

/// Records segment intersections onto edges and summarises what was found.
#[derive(Debug, Clone, Default)]
pub struct SegmentIntersector {
    li: LineIntersector,
    include_proper: bool,
    record_isolated: bool,
    boundary_nodes: [Vec<Coordinate>; 2],

    has_intersection: bool,
    has_proper: bool,
    has_proper_interior: bool,
    proper_intersection_point: Option<Coordinate>,
    num_tests: usize,
}

/// Identity of a segment under test.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
struct SegmentId {
    edge: usize,
    segment: usize,
}

impl SegmentIntersector {
    /// `include_proper` also records proper crossings on the edges;
    /// `record_isolated` clears the isolated flag of every edge touched.
    pub fn new(include_proper: bool, record_isolated: bool) -> Self {
        Self {
            include_proper,
            record_isolated,
            ..Self::default()
        }
    }

    /// Boundary node coordinates of the two inputs. A proper intersection
    /// at one of them does not count as interior.
    pub fn set_boundary_nodes(&mut self, bdy0: Vec<Coordinate>, bdy1: Vec<Coordinate>) {
        self.boundary_nodes = [bdy0, bdy1];
    }

    /// Some non-trivial intersection was found.
    pub fn has_intersection(&self) -> bool {
        self.has_intersection
    }

    /// A proper intersection was found.
    pub fn has_proper_intersection(&self) -> bool {
        self.has_proper
    }

    /// A proper intersection not at a boundary node was found.
    pub fn has_proper_interior_intersection(&self) -> bool {
        self.has_proper_interior
    }

    pub fn proper_intersection_point(&self) -> Option<Coordinate> {
        self.proper_intersection_point
    }

    pub fn num_tests(&self) -> usize {
        self.num_tests
    }

    /// Intersects every pair of segments of the edges of `graph`.
    ///
    /// With `test_all` false, segments of the same edge are not tested
    /// against each other.
    pub fn self_intersections(&mut self, graph: &mut PlanarGraph, test_all: bool, node_capacity: usize) -> Result<()> {
        let edges: Vec<EdgeKey> = graph.edge_keys().to_vec();
        let tree = segment_tree(graph, &edges, node_capacity)?;
        let mut pairs = Vec::new();
        for (i, key) in edges.iter().enumerate() {
            let coords = graph.edge(*key)?.coordinates();
            for s in 0..coords.len().saturating_sub(1) {
                let id0 = SegmentId { edge: i, segment: s };
                tree.query_with(&segment_envelope(&coords[s], &coords[s + 1]), |id1| {
                    if *id1 > id0 && (test_all || id1.edge != id0.edge) {
                        pairs.push((id0, *id1));
                    }
                })?;
            }
        }
        tracing::debug!(edges = edges.len(), candidates = pairs.len(), "Self-intersecting edge set");

        for (id0, id1) in pairs {
            let (k0, k1) = (edges[id0.edge], edges[id1.edge]);
            let trivial = {
                let e0 = graph.edge(k0)?;
                let e1 = graph.edge(k1)?;
                let (p00, p01) = (e0.coordinates()[id0.segment], e0.coordinates()[id0.segment + 1]);
                let (p10, p11) = (e1.coordinates()[id1.segment], e1.coordinates()[id1.segment + 1]);
                self.li.compute_intersection(&p00, &p01, &p10, &p11);
                self.num_tests += 1;
                k0 == k1 && self.is_trivial_self_intersection(id0.segment, id1.segment, e0.is_closed(), e0.num_points())
            };
            self.record(graph, k0, id0.segment, None, k1, id1.segment, trivial)?;
        }
        Ok(())
    }

    /// Intersects every segment of `graph0` with every segment of `graph1`.
    pub fn mutual_intersections(
        &mut self,
        graph0: &mut PlanarGraph,
        graph1: &mut PlanarGraph,
        node_capacity: usize,
    ) -> Result<()> {
        let edges0: Vec<EdgeKey> = graph0.edge_keys().to_vec();
        let edges1: Vec<EdgeKey> = graph1.edge_keys().to_vec();
        let tree = segment_tree(graph1, &edges1, node_capacity)?;
        let mut pairs = Vec::new();
        for (i, key) in edges0.iter().enumerate() {
            let coords = graph0.edge(*key)?.coordinates();
            for s in 0..coords.len().saturating_sub(1) {
                let id0 = SegmentId { edge: i, segment: s };
                tree.query_with(&segment_envelope(&coords[s], &coords[s + 1]), |id1| {
                    pairs.push((id0, *id1));
                })?;
            }
        }
        tracing::debug!(
            edges0 = edges0.len(),
            edges1 = edges1.len(),
            candidates = pairs.len(),
            "Intersecting edge sets"
        );

        for (id0, id1) in pairs {
            let (k0, k1) = (edges0[id0.edge], edges1[id1.edge]);
            {
                let e0 = graph0.edge(k0)?;
                let e1 = graph1.edge(k1)?;
                let (p00, p01) = (e0.coordinates()[id0.segment], e0.coordinates()[id0.segment + 1]);
                let (p10, p11) = (e1.coordinates()[id1.segment], e1.coordinates()[id1.segment + 1]);
                self.li.compute_intersection(&p00, &p01, &p10, &p11);
                self.num_tests += 1;
            }
            self.record(graph0, k0, id0.segment, Some(&mut *graph1), k1, id1.segment, false)?;
        }
        Ok(())
    }

    /// Applies the last computed intersection to both edges. `graph1` is
    /// `None` when both edges live in `graph0`.
    #[allow(clippy::too_many_arguments)]
    fn record(
        &mut self,
        graph0: &mut PlanarGraph,
        k0: EdgeKey,
        seg0: usize,
        graph1: Option<&mut PlanarGraph>,
        k1: EdgeKey,
        seg1: usize,
        trivial: bool,
    ) -> Result<()> {
        if !self.li.has_intersection() {
            return Ok(());
        }
        let li = self.li;
        let mut graph1 = graph1;

        if self.record_isolated {
            graph0.edge_mut(k0)?.set_isolated(false);
            match graph1.as_deref_mut() {
                Some(g1) => g1.edge_mut(k1)?.set_isolated(false),
                None => graph0.edge_mut(k1)?.set_isolated(false),
            }
        }
        if trivial {
            return Ok(());
        }
        self.has_intersection = true;
        if self.include_proper || !li.is_proper() {
            graph0.edge_mut(k0)?.add_intersections(&li, seg0, 0);
            match graph1.as_deref_mut() {
                Some(g1) => g1.edge_mut(k1)?.add_intersections(&li, seg1, 1),
                None => graph0.edge_mut(k1)?.add_intersections(&li, seg1, 1),
            }
        }
        if li.is_proper() {
            self.proper_intersection_point = Some(li.intersection(0));
            self.has_proper = true;
            if !self.is_boundary_point(&li) {
                self.has_proper_interior = true;
            }
        }
        Ok(())
    }

    /// A single intersection between adjacent segments of one edge is just
    /// the shared vertex; so is the closing vertex of a ring.
    fn is_trivial_self_intersection(&self, seg0: usize, seg1: usize, closed: bool, num_points: usize) -> bool {
        if self.li.intersection_num() != 1 {
            return false;
        }
        if seg0.abs_diff(seg1) == 1 {
            return true;
        }
        if closed && num_points >= 2 {
            let last = num_points - 2;
            if (seg0 == 0 && seg1 == last) || (seg1 == 0 && seg0 == last) {
                return true;
            }
        }
        false
    }

    fn is_boundary_point(&self, li: &LineIntersector) -> bool {
        self.boundary_nodes
            .iter()
            .flatten()
            .any(|c| li.is_intersection(c))
    }
}

fn segment_tree(graph: &PlanarGraph, edges: &[EdgeKey], node_capacity: usize) -> Result<StrTree<SegmentId>> {
    let mut tree = StrTree::new(node_capacity)?;
    for (i, key) in edges.iter().enumerate() {
        let coords = graph.edge(*key)?.coordinates();
        for s in 0..coords.len().saturating_sub(1) {
            tree.insert(
                segment_envelope(&coords[s], &coords[s + 1]),
                SegmentId { edge: i, segment: s },
            )?;
        }
    }
    tree.build()?;
    Ok(tree)
}
