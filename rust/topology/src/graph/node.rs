// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Graph nodes.

use crate::coordinate::Coordinate;
use crate::keys::DirectedEdgeKey;

use super::label::{Label, Location};

/// A unique coordinate in a graph, with the directed edges leaving it sorted
/// counter-clockwise.
#[derive(Debug, Clone)]
pub struct Node {
    coord: Coordinate,
    pub label: Label,
    pub(crate) star: Vec<DirectedEdgeKey>,
    visited: bool,
}

impl Node {
    pub(crate) fn new(coord: Coordinate) -> Self {
        Self {
            coord,
            label: Label::default(),
            star: Vec::new(),
            visited: false,
        }
    }

    pub fn coordinate(&self) -> Coordinate {
        self.coord
    }

    /// Outgoing directed edges in counter-clockwise order from the positive
    /// X axis.
    pub fn star(&self) -> &[DirectedEdgeKey] {
        &self.star
    }

    pub fn degree(&self) -> usize {
        self.star.len()
    }

    pub fn is_visited(&self) -> bool {
        self.visited
    }

    pub fn set_visited(&mut self, visited: bool) {
        self.visited = visited;
    }

    /// A node known to only one argument geometry.
    pub fn is_isolated(&self) -> bool {
        self.label.geometry_count() == 1
    }

    pub fn set_label(&mut self, geom_index: usize, loc: Location) {
        self.label.set_location(geom_index, loc);
    }

    /// Marks the node as lying on the boundary of geometry `geom_index`,
    /// applying the Mod-2 rule: a node already on the boundary becomes
    /// interior.
    pub fn set_label_boundary(&mut self, geom_index: usize) {
        let loc = match self.label.location(geom_index) {
            Location::Boundary => Location::Interior,
            _ => Location::Boundary,
        };
        self.label.set_location(geom_index, loc);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boundary_label_toggles() {
        let mut n = Node::new(Coordinate::new(0.0, 0.0));
        n.set_label_boundary(0);
        assert_eq!(n.label.location(0), Location::Boundary);
        n.set_label_boundary(0);
        assert_eq!(n.label.location(0), Location::Interior);
        n.set_label_boundary(0);
        assert_eq!(n.label.location(0), Location::Boundary);
    }

    #[test]
    fn isolation_follows_label() {
        let mut n = Node::new(Coordinate::new(0.0, 0.0));
        assert!(!n.is_isolated());
        n.set_label(1, Location::Interior);
        assert!(n.is_isolated());
        n.set_label(0, Location::Exterior);
        assert!(!n.is_isolated());
    }
}
