// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Operations on the star of directed edges around a node.

use std::cmp::Ordering;

use crate::error::{Error, Result};
use crate::keys::{DirectedEdgeKey, NodeKey};

use super::label::Position;
use super::planar_graph::PlanarGraph;
use super::quadrant;

impl PlanarGraph {
    /// Inserts `de` into the star of `node`, keeping counter-clockwise order.
    /// A directed edge with exactly the same direction is replaced.
    pub(crate) fn insert_into_star(&mut self, node: NodeKey, de: DirectedEdgeKey) -> Result<()> {
        let direction = *self.directed_edge(de)?.direction();
        let star = &self.node(node)?.star;
        let mut position = Err(star.len());
        for (i, other) in star.iter().enumerate() {
            let other_dir = self.directed_edges.get(*other).map(|d| *d.direction());
            let Some(other_dir) = other_dir else {
                continue;
            };
            match direction.compare_direction(&other_dir) {
                Ordering::Equal => {
                    position = Ok(i);
                    break;
                }
                Ordering::Less => {
                    position = Err(i);
                    break;
                }
                Ordering::Greater => {}
            }
        }
        let star = &mut self.node_mut(node)?.star;
        match position {
            Ok(i) => star[i] = de,
            Err(i) => star.insert(i, de),
        }
        Ok(())
    }

    /// Position of `de` in the star of `node`.
    pub fn star_index(&self, node: NodeKey, de: DirectedEdgeKey) -> Result<usize> {
        self.node(node)?
            .star
            .iter()
            .position(|k| *k == de)
            .ok_or_else(|| Error::not_found(de))
    }

    /// Propagates side depths around the star of `node`, starting from `de`
    /// whose depths are already known.
    ///
    /// Walking counter-clockwise, each edge's right depth is the previous
    /// edge's left depth. Arriving back at `de` with a different depth than
    /// its right depth means the graph labelling is inconsistent.
    pub fn compute_star_depths(&mut self, node: NodeKey, de: DirectedEdgeKey) -> Result<()> {
        let index = self.star_index(node, de)?;
        let star = self.node(node)?.star.clone();
        let start = self.directed_edge(de)?;
        let start_depth = start.depth(Position::Left);
        let target_last_depth = start.depth(Position::Right);
        let coordinate = start.coordinate();

        let next_depth = self.propagate_depths(&star[index + 1..], start_depth)?;
        let last_depth = self.propagate_depths(&star[..index], next_depth)?;
        if last_depth != target_last_depth {
            return Err(Error::topology("depth mismatch", coordinate));
        }
        Ok(())
    }

    fn propagate_depths(&mut self, edges: &[DirectedEdgeKey], start_depth: i32) -> Result<i32> {
        let mut depth = start_depth;
        for de in edges {
            self.set_edge_depths(*de, Position::Right, depth)?;
            depth = self.directed_edge(*de)?.depth(Position::Left);
        }
        Ok(depth)
    }

    /// The directed edge of the star of `node` whose start segment is
    /// rightmost, preferring a non-horizontal one.
    pub fn rightmost_edge(&self, node: NodeKey) -> Result<Option<DirectedEdgeKey>> {
        let star = &self.node(node)?.star;
        let (Some(first), Some(last)) = (star.first(), star.last()) else {
            return Ok(None);
        };
        if star.len() == 1 {
            return Ok(Some(*first));
        }
        let de0 = self.directed_edge(*first)?;
        let de_last = self.directed_edge(*last)?;
        let north0 = quadrant::is_northern(de0.quadrant());
        let north_last = quadrant::is_northern(de_last.quadrant());
        if north0 && north_last {
            return Ok(Some(*first));
        }
        if !north0 && !north_last {
            return Ok(Some(*last));
        }
        // Edges straddle the X axis; one of them must leave it.
        if de0.dy() != 0.0 {
            Ok(Some(*first))
        } else if de_last.dy() != 0.0 {
            Ok(Some(*last))
        } else {
            Err(Error::topology(
                "found two horizontal edges incident on node",
                self.node(node)?.coordinate(),
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::coordinate::Coordinate;
    use crate::geometry::coords;
    use crate::graph::{Label, PlanarGraph};

    fn spoke_graph(ends: &[(f64, f64)]) -> PlanarGraph {
        let mut graph = PlanarGraph::new();
        for end in ends {
            graph
                .add_edge_coords(coords(&[(0.0, 0.0), *end]), Label::default())
                .unwrap();
        }
        graph
    }

    #[test]
    fn star_is_counter_clockwise() {
        let graph = spoke_graph(&[(0.0, -1.0), (-1.0, 0.0), (1.0, 1.0), (1.0, 0.0)]);
        let centre = graph.find_node(&Coordinate::new(0.0, 0.0)).unwrap();
        let ends: Vec<_> = graph
            .node(centre)
            .unwrap()
            .star()
            .iter()
            .map(|de| graph.directed_edge(*de).unwrap().directed_coordinate())
            .collect();
        assert_eq!(
            ends,
            vec![
                Coordinate::new(1.0, 0.0),
                Coordinate::new(1.0, 1.0),
                Coordinate::new(-1.0, 0.0),
                Coordinate::new(0.0, -1.0),
            ]
        );
    }

    #[test]
    fn rightmost_edge_prefers_non_horizontal() {
        // Star: east (horizontal, NE) first, south-west last.
        let graph = spoke_graph(&[(1.0, 0.0), (-1.0, -1.0)]);
        let centre = graph.find_node(&Coordinate::new(0.0, 0.0)).unwrap();
        let de = graph.rightmost_edge(centre).unwrap().unwrap();
        assert_eq!(
            graph.directed_edge(de).unwrap().directed_coordinate(),
            Coordinate::new(-1.0, -1.0)
        );
    }

    #[test]
    fn rightmost_edge_in_northern_half() {
        let graph = spoke_graph(&[(1.0, 1.0), (-1.0, 1.0)]);
        let centre = graph.find_node(&Coordinate::new(0.0, 0.0)).unwrap();
        let de = graph.rightmost_edge(centre).unwrap().unwrap();
        assert_eq!(
            graph.directed_edge(de).unwrap().directed_coordinate(),
            Coordinate::new(1.0, 1.0)
        );
    }

    #[test]
    fn rightmost_edge_with_horizontal_spokes() {
        let graph = spoke_graph(&[(1.0, 0.0), (-1.0, 0.0), (0.0, -1.0)]);
        let centre = graph.find_node(&Coordinate::new(0.0, 0.0)).unwrap();
        // First is east (NE), last is south (SE); the last one is not horizontal.
        assert!(graph.rightmost_edge(centre).is_ok());

        let graph = spoke_graph(&[(1.0, 0.0), (-1.0, 0.0)]);
        let centre = graph.find_node(&Coordinate::new(0.0, 0.0)).unwrap();
        // East is NE, west is NW: both northern, so the first is returned.
        assert!(graph.rightmost_edge(centre).unwrap().is_some());
    }
}
