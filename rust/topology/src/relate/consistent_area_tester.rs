// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Node-level consistency checks for polygonal geometries.

use crate::coordinate::Coordinate;
use crate::error::Result;
use crate::graph::GeometryGraph;

use super::relate_node_graph::RelateNodeGraph;

/// Checks that the area labels around every node of a polygonal geometry
/// graph are consistent, and finds rings that share a segment.
///
/// A geometry that passes has no proper self-intersections and no node at
/// which the interior appears on both sides of an edge.
#[derive(Debug, Default)]
pub struct ConsistentAreaTester {
    nodes: RelateNodeGraph,
    invalid_point: Option<Coordinate>,
}

impl ConsistentAreaTester {
    pub fn new() -> Self {
        Self::default()
    }

    /// The location of the last inconsistency found.
    pub fn invalid_point(&self) -> Option<Coordinate> {
        self.invalid_point
    }

    /// Nodes `graph` fully and checks its node labelling.
    pub fn is_node_consistent_area(&mut self, graph: &mut GeometryGraph<'_>) -> Result<bool> {
        let si = graph.compute_self_nodes(true)?;
        if si.has_proper_intersection() {
            self.invalid_point = si.proper_intersection_point();
            tracing::debug!(point = ?self.invalid_point, "Proper self-intersection in area");
            return Ok(false);
        }

        self.nodes = RelateNodeGraph::new();
        self.nodes.build(graph)?;
        for node in self.nodes.nodes_mut() {
            if !node.star.is_area_labels_consistent()? {
                self.invalid_point = Some(node.coordinate());
                tracing::debug!(point = ?self.invalid_point, "Inconsistent area labels");
                return Ok(false);
            }
        }
        Ok(true)
    }

    /// Whether two rings share a segment, visible as a bundle holding more
    /// than one edge end. Only meaningful after
    /// [`is_node_consistent_area`](Self::is_node_consistent_area).
    pub fn has_duplicate_rings(&mut self) -> bool {
        for node in self.nodes.nodes() {
            if let Some(bundle) = node.star.bundles().iter().find(|b| b.edge_ends().len() > 1) {
                self.invalid_point = Some(bundle.coordinate());
                return true;
            }
        }
        false
    }
}
