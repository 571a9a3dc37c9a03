// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! JSON snapshots of planar graphs.
//!
//! A snapshot carries the nodes, the edges with their coordinates, labels
//! and depth deltas, and for each edge its two directed edges with depths
//! and result flags. It is meant for debugging and for handing labelled
//! buffer graphs to a polygon assembly stage outside this crate.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::coordinate::Coordinate;
use crate::error::{Error, Result};
use crate::graph::{Label, PlanarGraph, Position};
use crate::keys::NodeKey;

/// Serializable representation of a [`PlanarGraph`].
#[derive(Debug, Serialize, Deserialize)]
pub struct GraphSnapshot {
    pub nodes: Vec<NodeSnapshot>,
    pub edges: Vec<EdgeSnapshot>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct NodeSnapshot {
    pub id: usize,
    pub x: f64,
    pub y: f64,
    pub label: Label,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct EdgeSnapshot {
    pub id: usize,
    pub coordinates: Vec<[f64; 2]>,
    pub label: Label,
    pub depth_delta: i32,
    pub isolated: bool,
    pub directed: Vec<DirectedEdgeSnapshot>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DirectedEdgeSnapshot {
    pub forward: bool,
    /// Id of the start node.
    pub from: usize,
    pub label: Label,
    pub depth_left: i32,
    pub depth_right: i32,
    pub in_result: bool,
}

impl PlanarGraph {
    /// Serializes the graph to a JSON string.
    pub fn to_json(&self) -> Result<String> {
        let snapshot = self.to_snapshot()?;
        let json = serde_json::to_string_pretty(&snapshot).map_err(|e| Error::Serialization(e.to_string()))?;
        tracing::debug!(
            nodes = snapshot.nodes.len(),
            edges = snapshot.edges.len(),
            bytes = json.len(),
            "Exported graph snapshot"
        );
        Ok(json)
    }

    /// Creates a serializable snapshot of the graph.
    ///
    /// Slot map keys are mapped to sequential ids: nodes in coordinate
    /// order, edges in insertion order.
    pub fn to_snapshot(&self) -> Result<GraphSnapshot> {
        let mut node_ids: FxHashMap<NodeKey, usize> = FxHashMap::default();
        let nodes: Vec<NodeSnapshot> = self
            .nodes()
            .enumerate()
            .map(|(i, (k, n))| {
                node_ids.insert(k, i);
                let c = n.coordinate();
                NodeSnapshot {
                    id: i,
                    x: c.x,
                    y: c.y,
                    label: n.label,
                }
            })
            .collect();

        let mut edges = Vec::with_capacity(self.edge_count());
        for (i, (_, e)) in self.edges().enumerate() {
            let mut directed = Vec::new();
            for de_key in e.directed_edges().into_iter().flatten() {
                let de = self.directed_edge(de_key)?;
                let from = de
                    .from_node()
                    .and_then(|n| node_ids.get(&n).copied())
                    .ok_or_else(|| Error::topology("directed edge has no start node", de.coordinate()))?;
                directed.push(DirectedEdgeSnapshot {
                    forward: de.is_forward(),
                    from,
                    label: de.label,
                    depth_left: de.depth(Position::Left),
                    depth_right: de.depth(Position::Right),
                    in_result: de.is_in_result(),
                });
            }
            edges.push(EdgeSnapshot {
                id: i,
                coordinates: e.coordinates().iter().map(|c| [c.x, c.y]).collect(),
                label: e.label,
                depth_delta: e.depth_delta(),
                isolated: e.is_isolated(),
                directed,
            });
        }
        Ok(GraphSnapshot { nodes, edges })
    }

    /// Deserializes a graph from a JSON string.
    pub fn from_json(json: &str) -> Result<Self> {
        let snapshot: GraphSnapshot =
            serde_json::from_str(json).map_err(|e| Error::Serialization(e.to_string()))?;
        Self::from_snapshot(&snapshot)
    }

    /// Rebuilds a graph from a snapshot. Stars and syms are rewired from the
    /// edge geometry; the directed edges' labels, depths and result flags
    /// are restored from the snapshot.
    pub fn from_snapshot(snap: &GraphSnapshot) -> Result<Self> {
        let mut graph = PlanarGraph::new();
        for es in &snap.edges {
            let coords = es.coordinates.iter().map(|&[x, y]| Coordinate::new(x, y)).collect();
            let key = graph.add_edge_coords(coords, es.label)?;
            let edge = graph.edge_mut(key)?;
            edge.set_depth_delta(es.depth_delta);
            edge.set_isolated(es.isolated);
            let Some(directed) = edge.directed_edges() else {
                continue;
            };
            for ds in &es.directed {
                let de_key = if ds.forward { directed[0] } else { directed[1] };
                let de = graph.directed_edge_mut(de_key)?;
                de.label = ds.label;
                de.set_depth(Position::Left, ds.depth_left)?;
                de.set_depth(Position::Right, ds.depth_right)?;
                de.set_in_result(ds.in_result);
            }
        }
        for ns in &snap.nodes {
            let key = graph.add_node(Coordinate::new(ns.x, ns.y));
            graph.node_mut(key)?.label = ns.label;
        }
        Ok(graph)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::buffer::BufferGraph;
    use crate::geometry::{coords, Polygon};
    use crate::graph::{Location, NULL_DEPTH};

    #[test]
    fn roundtrip_empty_graph() {
        let graph = PlanarGraph::new();
        let json = graph.to_json().unwrap();
        let restored = PlanarGraph::from_json(&json).unwrap();
        assert_eq!(restored.node_count(), 0);
        assert_eq!(restored.edge_count(), 0);
    }

    #[test]
    fn roundtrip_keeps_isolated_nodes_and_labels() {
        let mut graph = PlanarGraph::new();
        graph
            .add_edge_coords(coords(&[(0.0, 0.0), (5.0, 0.0)]), Label::line(Location::Interior))
            .unwrap();
        let lone = graph.add_node(Coordinate::new(9.0, 9.0));
        graph.node_mut(lone).unwrap().label = Label::line(Location::Boundary);

        let restored = PlanarGraph::from_json(&graph.to_json().unwrap()).unwrap();
        assert_eq!(restored.node_count(), 3);
        assert_eq!(restored.directed_edge_count(), 2);
        let key = restored.find_node(&Coordinate::new(9.0, 9.0)).unwrap();
        assert_eq!(restored.node(key).unwrap().label.location(0), Location::Boundary);
        let (_, edge) = restored.edges().next().unwrap();
        assert_eq!(edge.label.location(0), Location::Interior);
    }

    #[test]
    fn roundtrip_buffer_depths_and_result_flags() {
        let shell = coords(&[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0), (0.0, 10.0), (0.0, 0.0)]);
        let mut buffer = BufferGraph::new();
        buffer.add_polygon(&Polygon::new(shell, vec![]));
        buffer.build().unwrap();

        let snapshot = buffer.graph().to_snapshot().unwrap();
        assert_eq!(snapshot.edges.len(), 1);
        let directed = &snapshot.edges[0].directed;
        assert_eq!(directed.len(), 2);
        assert!(directed.iter().all(|d| d.depth_left != NULL_DEPTH));
        assert_eq!(directed.iter().filter(|d| d.in_result).count(), 1);

        let restored = PlanarGraph::from_json(&buffer.graph().to_json().unwrap()).unwrap();
        let in_result: Vec<_> = restored
            .directed_edge_keys()
            .filter(|k| restored.directed_edge(*k).unwrap().is_in_result())
            .collect();
        assert_eq!(in_result.len(), 1);
        let de = restored.directed_edge(in_result[0]).unwrap();
        assert_eq!(de.depth(Position::Right), 1);
        assert_eq!(de.depth(Position::Left), 0);
    }

    #[test]
    fn malformed_json_is_a_serialization_error() {
        assert!(matches!(PlanarGraph::from_json("{ not json"), Err(Error::Serialization(_))));
    }

    #[test]
    fn short_edge_in_snapshot_is_rejected() {
        let json = r#"{"nodes":[],"edges":[{"id":0,"coordinates":[[0.0,0.0]],
            "label":{"elt":[{"locations":["Null","Null","Null"],"area":false},
                            {"locations":["Null","Null","Null"],"area":false}]},
            "depth_delta":0,"isolated":true,"directed":[]}]}"#;
        assert!(matches!(PlanarGraph::from_json(json), Err(Error::InvalidArgument(_))));
    }
}
