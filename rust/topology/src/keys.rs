// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Key types for arena-based graph storage.
//!
//! Nodes, edges and directed edges live in `slotmap::SlotMap`s and refer to
//! each other through these generational keys. A key whose entity was removed
//! simply resolves to `None`; it never aliases a newer entity.

use slotmap::new_key_type;

new_key_type! {
    /// Key for a graph node (a unique coordinate).
    pub struct NodeKey;

    /// Key for an undirected edge (an ordered coordinate sequence).
    pub struct EdgeKey;

    /// Key for one of the two directed views of an edge.
    pub struct DirectedEdgeKey;
}

/// A key that can reference any graph entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GraphKey {
    Node(NodeKey),
    Edge(EdgeKey),
    DirectedEdge(DirectedEdgeKey),
}

impl GraphKey {
    /// Returns the element type of this key.
    pub fn element_type(&self) -> ElementType {
        match self {
            GraphKey::Node(_) => ElementType::Node,
            GraphKey::Edge(_) => ElementType::Edge,
            GraphKey::DirectedEdge(_) => ElementType::DirectedEdge,
        }
    }
}

/// Discriminant for graph element types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ElementType {
    Node = 0,
    Edge = 1,
    DirectedEdge = 2,
}

impl ElementType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ElementType::Node => "node",
            ElementType::Edge => "edge",
            ElementType::DirectedEdge => "directed edge",
        }
    }
}

impl std::fmt::Display for ElementType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<NodeKey> for GraphKey {
    fn from(k: NodeKey) -> Self {
        GraphKey::Node(k)
    }
}

impl From<EdgeKey> for GraphKey {
    fn from(k: EdgeKey) -> Self {
        GraphKey::Edge(k)
    }
}

impl From<DirectedEdgeKey> for GraphKey {
    fn from(k: DirectedEdgeKey) -> Self {
        GraphKey::DirectedEdge(k)
    }
}
