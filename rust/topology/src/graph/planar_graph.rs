// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Arena storage for planar graphs.
//!
//! The [`PlanarGraph`] owns every node, edge and directed edge in slot maps.
//! Cross references (edge to its directed edges, directed edge to its sym,
//! its parent edge and its start node, node to its star) are generational
//! keys, so the cyclic node/edge structure needs no shared ownership and a
//! removed entity can never be reached through a stale key.

use std::collections::BTreeMap;

use slotmap::SlotMap;

use crate::coordinate::{CoordKey, Coordinate};
use crate::error::{Error, Result};
use crate::keys::{DirectedEdgeKey, EdgeKey, NodeKey};

use super::directed_edge::DirectedEdge;
use super::edge::Edge;
use super::label::{Label, Position};
use super::node::Node;

/// A planar graph of nodes, edges and directed edges.
///
/// # Example
///
/// ```
/// use geotopo_topology::graph::{Label, PlanarGraph};
/// use geotopo_topology::geometry::coords;
///
/// let mut graph = PlanarGraph::new();
/// let edge = graph
///     .add_edge_coords(coords(&[(0.0, 0.0), (10.0, 0.0)]), Label::default())
///     .unwrap();
/// let [fwd, bwd] = graph.edge(edge).unwrap().directed_edges().unwrap();
///
/// assert_eq!(graph.sym(fwd).unwrap(), bwd);
/// assert_eq!(graph.node_count(), 2);
/// ```
#[derive(Debug, Default)]
pub struct PlanarGraph {
    pub(crate) nodes: SlotMap<NodeKey, Node>,
    pub(crate) edges: SlotMap<EdgeKey, Edge>,
    pub(crate) directed_edges: SlotMap<DirectedEdgeKey, DirectedEdge>,

    // Coordinate lookup, also giving nodes a deterministic iteration order.
    node_map: BTreeMap<CoordKey, NodeKey>,
    // Edges in insertion order.
    edge_order: Vec<EdgeKey>,
}

impl PlanarGraph {
    pub fn new() -> Self {
        Self::default()
    }

    // --- Node operations ---

    /// Returns the node at `coord`, creating it if needed.
    pub fn add_node(&mut self, coord: Coordinate) -> NodeKey {
        let key = CoordKey::new(coord);
        if let Some(existing) = self.node_map.get(&key) {
            return *existing;
        }
        let node = self.nodes.insert(Node::new(coord));
        self.node_map.insert(key, node);
        node
    }

    pub fn find_node(&self, coord: &Coordinate) -> Option<NodeKey> {
        self.node_map.get(&CoordKey::new(*coord)).copied()
    }

    pub fn node(&self, key: NodeKey) -> Result<&Node> {
        self.nodes.get(key).ok_or_else(|| Error::not_found(key))
    }

    pub fn node_mut(&mut self, key: NodeKey) -> Result<&mut Node> {
        self.nodes.get_mut(key).ok_or_else(|| Error::not_found(key))
    }

    /// Node keys ordered by coordinate (x, then y).
    pub fn node_keys(&self) -> impl Iterator<Item = NodeKey> + '_ {
        self.node_map.values().copied()
    }

    /// Nodes ordered by coordinate (x, then y).
    pub fn nodes(&self) -> impl Iterator<Item = (NodeKey, &Node)> + '_ {
        self.node_map
            .values()
            .filter_map(|k| self.nodes.get(*k).map(|n| (*k, n)))
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    // --- Edge operations ---

    /// Stores an edge without creating directed edges or nodes.
    pub fn insert_edge(&mut self, edge: Edge) -> EdgeKey {
        let key = self.edges.insert(edge);
        self.edge_order.push(key);
        key
    }

    /// Stores an edge and wires it into the graph with a pair of directed
    /// edges.
    pub fn add_edge(&mut self, edge: Edge) -> Result<EdgeKey> {
        let key = self.insert_edge(edge);
        if let Err(e) = self.link_edge(key) {
            self.remove_edge(key)?;
            return Err(e);
        }
        Ok(key)
    }

    pub fn add_edge_coords(&mut self, coords: Vec<Coordinate>, label: Label) -> Result<EdgeKey> {
        let key = self.create_edge(coords, label)?;
        if let Err(e) = self.link_edge(key) {
            self.remove_edge(key)?;
            return Err(e);
        }
        Ok(key)
    }

    /// Stores a new edge that has no directed edges yet. It takes part in
    /// traversals only after [`set_directed_edges`](Self::set_directed_edges).
    pub fn create_edge(&mut self, coords: Vec<Coordinate>, label: Label) -> Result<EdgeKey> {
        if coords.len() < 2 {
            return Err(Error::InvalidArgument(format!(
                "an edge needs at least two points, got {}",
                coords.len()
            )));
        }
        Ok(self.insert_edge(Edge::new(coords, label)))
    }

    /// Creates an unattached directed view of `edge`.
    pub fn create_directed_edge(&mut self, edge: EdgeKey, forward: bool) -> Result<DirectedEdgeKey> {
        let e = self.edge(edge)?;
        let de = DirectedEdge::new(edge, e.coordinates(), &e.label, forward)?;
        Ok(self.directed_edges.insert(de))
    }

    /// Creates both directed edges of a stored edge and wires them in.
    fn link_edge(&mut self, key: EdgeKey) -> Result<[DirectedEdgeKey; 2]> {
        let de0 = self.create_directed_edge(key, true)?;
        let de1 = match self.create_directed_edge(key, false) {
            Ok(de) => de,
            Err(e) => {
                self.directed_edges.remove(de0);
                return Err(e);
            }
        };
        self.set_directed_edges(key, de0, de1)?;
        Ok([de0, de1])
    }

    /// Wires `de0` and `de1` as the two directions of `edge`: each becomes
    /// the other's sym, both point back at `edge`, and each is added to the
    /// star of its start node.
    pub fn set_directed_edges(&mut self, edge: EdgeKey, de0: DirectedEdgeKey, de1: DirectedEdgeKey) -> Result<()> {
        self.edge_mut(edge)?.directed = Some([de0, de1]);
        for (de, sym) in [(de0, de1), (de1, de0)] {
            let start = {
                let d = self.directed_edge_mut(de)?;
                d.edge = edge;
                d.sym = Some(sym);
                d.coordinate()
            };
            let node = self.add_node(start);
            self.directed_edge_mut(de)?.from = Some(node);
            self.insert_into_star(node, de)?;
        }
        Ok(())
    }

    /// Removes an edge and its directed edges, unlinking them from the node
    /// stars. Nodes are kept.
    pub fn remove_edge(&mut self, key: EdgeKey) -> Result<()> {
        let edge = self.edges.remove(key).ok_or_else(|| Error::not_found(key))?;
        self.edge_order.retain(|k| *k != key);
        if let Some(directed) = edge.directed {
            for de in directed {
                if let Some(d) = self.directed_edges.remove(de) {
                    if let Some(node) = d.from.and_then(|n| self.nodes.get_mut(n)) {
                        node.star.retain(|k| *k != de);
                    }
                }
            }
        }
        Ok(())
    }

    pub fn edge(&self, key: EdgeKey) -> Result<&Edge> {
        self.edges.get(key).ok_or_else(|| Error::not_found(key))
    }

    pub fn edge_mut(&mut self, key: EdgeKey) -> Result<&mut Edge> {
        self.edges.get_mut(key).ok_or_else(|| Error::not_found(key))
    }

    /// Edge keys in insertion order.
    pub fn edge_keys(&self) -> &[EdgeKey] {
        &self.edge_order
    }

    /// Edges in insertion order.
    pub fn edges(&self) -> impl Iterator<Item = (EdgeKey, &Edge)> + '_ {
        self.edge_order
            .iter()
            .filter_map(|k| self.edges.get(*k).map(|e| (*k, e)))
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    // --- Directed edge operations ---

    pub fn directed_edge(&self, key: DirectedEdgeKey) -> Result<&DirectedEdge> {
        self.directed_edges.get(key).ok_or_else(|| Error::not_found(key))
    }

    pub fn directed_edge_mut(&mut self, key: DirectedEdgeKey) -> Result<&mut DirectedEdge> {
        self.directed_edges.get_mut(key).ok_or_else(|| Error::not_found(key))
    }

    pub fn directed_edge_count(&self) -> usize {
        self.directed_edges.len()
    }

    /// All directed edges, forward before backward for each edge, in edge
    /// insertion order.
    pub fn directed_edge_keys(&self) -> impl Iterator<Item = DirectedEdgeKey> + '_ {
        self.edges().filter_map(|(_, e)| e.directed).flatten()
    }

    pub fn sym(&self, key: DirectedEdgeKey) -> Result<DirectedEdgeKey> {
        self.directed_edge(key)?
            .sym
            .ok_or_else(|| Error::topology("directed edge has no sym", None))
    }

    pub fn from_node(&self, key: DirectedEdgeKey) -> Result<NodeKey> {
        let de = self.directed_edge(key)?;
        de.from
            .ok_or_else(|| Error::topology("directed edge is not attached to a node", de.coordinate()))
    }

    /// The node the directed edge ends at (the start node of its sym).
    pub fn to_node(&self, key: DirectedEdgeKey) -> Result<NodeKey> {
        self.from_node(self.sym(key)?)
    }

    /// The parent edge of a directed edge.
    pub fn parent_edge(&self, key: DirectedEdgeKey) -> Result<&Edge> {
        self.edge(self.directed_edge(key)?.edge)
    }

    /// Depth change crossing the directed edge from right to left.
    pub fn depth_delta(&self, key: DirectedEdgeKey) -> Result<i32> {
        let de = self.directed_edge(key)?;
        let delta = self.edge(de.edge)?.depth_delta();
        Ok(if de.forward { delta } else { -delta })
    }

    /// Sets the depth on side `pos` and derives the opposite side from the
    /// edge depth delta.
    pub fn set_edge_depths(&mut self, key: DirectedEdgeKey, pos: Position, depth: i32) -> Result<()> {
        let delta = self.depth_delta(key)?;
        let direction_factor = if pos == Position::Left { -1 } else { 1 };
        let opposite_depth = depth + delta * direction_factor;
        let de = self.directed_edge_mut(key)?;
        de.set_depth(pos, depth)?;
        de.set_depth(pos.opposite(), opposite_depth)
    }

    /// Copies the side depths of `key` onto its sym, swapped.
    pub fn copy_sym_depths(&mut self, key: DirectedEdgeKey) -> Result<()> {
        let (left, right, sym) = {
            let de = self.directed_edge(key)?;
            (de.depth(Position::Left), de.depth(Position::Right), self.sym(key)?)
        };
        let sym = self.directed_edge_mut(sym)?;
        sym.set_depth(Position::Left, right)?;
        sym.set_depth(Position::Right, left)
    }

    /// Clears visited flags on every node and directed edge.
    pub fn clear_visited(&mut self) {
        for node in self.nodes.values_mut() {
            node.set_visited(false);
        }
        for de in self.directed_edges.values_mut() {
            de.set_visited(false);
        }
    }
}
