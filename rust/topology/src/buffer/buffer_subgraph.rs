// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Connected components of a buffer graph.
//!
//! A [`BufferSubgraph`] is created from a seed node, labelled with side
//! depths starting from its rightmost edge (whose right side is known to be
//! outside), and finally marks the directed edges that bound the buffer
//! result.

use std::cmp::Ordering;
use std::collections::VecDeque;

use geotopo_index::Envelope;
use rustc_hash::FxHashSet;

use crate::coordinate::Coordinate;
use crate::error::{Error, Result};
use crate::graph::{PlanarGraph, Position};
use crate::keys::{DirectedEdgeKey, NodeKey};

use super::rightmost_edge_finder::RightmostEdgeFinder;

/// A connected set of nodes and directed edges of a buffer graph.
#[derive(Debug, Clone)]
pub struct BufferSubgraph {
    dir_edges: Vec<DirectedEdgeKey>,
    nodes: Vec<NodeKey>,
    rightmost_coord: Coordinate,
    rightmost_edge: DirectedEdgeKey,
    envelope: Envelope,
}

impl BufferSubgraph {
    /// Collects every node and directed edge reachable from `seed`, marking
    /// the nodes visited, and locates the rightmost edge.
    pub fn create(graph: &mut PlanarGraph, seed: NodeKey) -> Result<Self> {
        let mut nodes = Vec::new();
        let mut dir_edges = Vec::new();
        let mut stack = vec![seed];
        while let Some(node) = stack.pop() {
            let n = graph.node_mut(node)?;
            if n.is_visited() {
                continue;
            }
            n.set_visited(true);
            let star = n.star().to_vec();
            nodes.push(node);
            for de in star {
                dir_edges.push(de);
                let sym_node = graph.to_node(de)?;
                if !graph.node(sym_node)?.is_visited() {
                    stack.push(sym_node);
                }
            }
        }

        let mut finder = RightmostEdgeFinder::new();
        let rightmost_edge = finder.find_edge(graph, &dir_edges)?;
        let rightmost_coord = finder
            .coordinate()
            .ok_or_else(|| Error::topology("subgraph has no rightmost coordinate", None))?;

        let mut envelope = Envelope::null();
        for de in &dir_edges {
            for c in graph.parent_edge(*de)?.coordinates() {
                envelope.expand_to_include_point(c.x, c.y);
            }
        }

        tracing::trace!(
            nodes = nodes.len(),
            directed_edges = dir_edges.len(),
            rightmost_x = rightmost_coord.x,
            "Created buffer subgraph"
        );
        Ok(Self {
            dir_edges,
            nodes,
            rightmost_coord,
            rightmost_edge,
            envelope,
        })
    }

    pub fn directed_edges(&self) -> &[DirectedEdgeKey] {
        &self.dir_edges
    }

    pub fn nodes(&self) -> &[NodeKey] {
        &self.nodes
    }

    /// The coordinate with the largest X in the subgraph.
    pub fn rightmost_coordinate(&self) -> Coordinate {
        self.rightmost_coord
    }

    /// The directed edge through the rightmost coordinate with the outside
    /// on its right.
    pub fn rightmost_edge(&self) -> DirectedEdgeKey {
        self.rightmost_edge
    }

    pub fn envelope(&self) -> &Envelope {
        &self.envelope
    }

    /// Assigns side depths to every directed edge, given the depth outside
    /// the subgraph.
    ///
    /// Depths spread breadth-first from the rightmost edge; at each node they
    /// are propagated around the star from an edge already labelled.
    pub fn compute_depth(&self, graph: &mut PlanarGraph, outside_depth: i32) -> Result<()> {
        for de in &self.dir_edges {
            graph.directed_edge_mut(*de)?.set_visited(false);
        }
        let start = self.rightmost_edge;
        graph.set_edge_depths(start, Position::Right, outside_depth)?;
        graph.copy_sym_depths(start)?;
        self.compute_depths(graph, start)
    }

    fn compute_depths(&self, graph: &mut PlanarGraph, start: DirectedEdgeKey) -> Result<()> {
        let start_node = graph.from_node(start)?;
        let mut nodes_visited: FxHashSet<NodeKey> = FxHashSet::default();
        let mut queue = VecDeque::new();
        queue.push_back(start_node);
        nodes_visited.insert(start_node);
        graph.directed_edge_mut(start)?.set_visited(true);

        while let Some(node) = queue.pop_front() {
            compute_node_depth(graph, node)?;
            for de in graph.node(node)?.star().to_vec() {
                let sym = graph.sym(de)?;
                if graph.directed_edge(sym)?.is_visited() {
                    continue;
                }
                let adjacent = graph.from_node(sym)?;
                if nodes_visited.insert(adjacent) {
                    queue.push_back(adjacent);
                }
            }
        }
        tracing::trace!(nodes = nodes_visited.len(), "Computed subgraph depths");
        Ok(())
    }

    /// Marks the directed edges with the buffer interior on their right and
    /// the exterior on their left.
    pub fn find_result_edges(&self, graph: &mut PlanarGraph) -> Result<()> {
        for key in &self.dir_edges {
            let de = graph.directed_edge_mut(*key)?;
            if de.depth(Position::Right) >= 1 && de.depth(Position::Left) <= 0 && !de.is_interior_area_edge() {
                de.set_in_result(true);
            }
        }
        Ok(())
    }
}

fn compute_node_depth(graph: &mut PlanarGraph, node: NodeKey) -> Result<()> {
    let star = graph.node(node)?.star().to_vec();
    let mut start = None;
    for de in &star {
        if graph.directed_edge(*de)?.is_visited() || graph.directed_edge(graph.sym(*de)?)?.is_visited() {
            start = Some(*de);
            break;
        }
    }
    let Some(start) = start else {
        return Err(Error::topology(
            "unable to find edge to compute depths",
            graph.node(node)?.coordinate(),
        ));
    };
    graph.compute_star_depths(node, start)?;
    for de in star {
        graph.directed_edge_mut(de)?.set_visited(true);
        graph.copy_sym_depths(de)?;
    }
    Ok(())
}

impl PartialEq for BufferSubgraph {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for BufferSubgraph {}

impl PartialOrd for BufferSubgraph {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for BufferSubgraph {
    /// Ascending by rightmost X; subgraphs with the same rightmost X rank
    /// equal.
    fn cmp(&self, other: &Self) -> Ordering {
        self.rightmost_coord.x.total_cmp(&other.rightmost_coord.x)
    }
}
