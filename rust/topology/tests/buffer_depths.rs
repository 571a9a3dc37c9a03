// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Buffer graph labelling: depths close around every edge, subgraphs are
//! labelled from the right, and result edges separate inside from outside.

use geotopo_topology::buffer::BufferGraph;
use geotopo_topology::geometry::{coords, Polygon};
use geotopo_topology::graph::{Location, PlanarGraph, Position, NULL_DEPTH};
use geotopo_topology::Coordinate;
use proptest::prelude::*;

/// Rectangle `i` gets a distinct binary fraction added to its corners, so
/// no two rectangles have collinear sides.
fn rectangle(i: usize, x: i32, y: i32, w: i32, h: i32) -> Polygon {
    let offset = i as f64 / 64.0;
    let (x0, y0) = (x as f64 + offset, y as f64 + offset);
    let (x1, y1) = (x0 + w as f64, y0 + h as f64);
    Polygon::new(coords(&[(x0, y0), (x1, y0), (x1, y1), (x0, y1), (x0, y0)]), vec![])
}

fn assert_depths_close(graph: &PlanarGraph) -> Result<(), TestCaseError> {
    for key in graph.directed_edge_keys() {
        let de = graph.directed_edge(key).unwrap();
        let left = de.depth(Position::Left);
        let right = de.depth(Position::Right);
        prop_assert_ne!(left, NULL_DEPTH);
        prop_assert_ne!(right, NULL_DEPTH);
        prop_assert!(left >= 0 && right >= 0);
        prop_assert_eq!(left - right, graph.depth_delta(key).unwrap());

        let sym = graph.directed_edge(graph.sym(key).unwrap()).unwrap();
        prop_assert_eq!(sym.depth(Position::Left), right);
        prop_assert_eq!(sym.depth(Position::Right), left);

        if de.is_in_result() {
            prop_assert!(right >= 1 && left <= 0);
        }
    }
    Ok(())
}

proptest! {
    #[test]
    fn depths_close_on_random_rectangles(
        rects in prop::collection::vec((0i32..20, 0i32..20, 1i32..10, 1i32..10), 1..6),
    ) {
        let mut buffer = BufferGraph::new();
        for (i, (x, y, w, h)) in rects.iter().enumerate() {
            buffer.add_polygon(&rectangle(i, *x, *y, *w, *h));
        }
        buffer.build().unwrap();

        assert_depths_close(buffer.graph())?;
        prop_assert!(!buffer.result_edges().unwrap().is_empty());
        let xs: Vec<f64> = buffer.subgraphs().iter().map(|s| s.rightmost_coordinate().x).collect();
        prop_assert!(xs.windows(2).all(|w| w[0] >= w[1]));
    }
}

#[test]
fn square_is_labelled_from_its_rightmost_edge() {
    let mut buffer = BufferGraph::new();
    buffer.add_polygon(&rectangle(0, 0, 0, 10, 10));
    buffer.build().unwrap();

    let graph = buffer.graph();
    let subgraph = &buffer.subgraphs()[0];
    assert_eq!(subgraph.rightmost_coordinate(), Coordinate::new(10.0, 0.0));
    let rightmost = graph.directed_edge(subgraph.rightmost_edge()).unwrap();
    assert_eq!(rightmost.depth(Position::Right), 0);
    assert_eq!(rightmost.depth(Position::Left), 1);
}

/// Rings whose rightmost vertex is a spike with both neighbours on the same
/// side of it, in both traversal directions.
fn spike_rings() -> Vec<Vec<(f64, f64)>> {
    let below = vec![(0.0, 0.0), (10.0, 10.0), (4.0, 6.0), (0.0, 8.0), (0.0, 0.0)];
    let above: Vec<_> = below.iter().map(|&(x, y)| (x, -y)).collect();
    let mut rings = Vec::new();
    for ring in [below, above] {
        let mut reversed = ring.clone();
        reversed.reverse();
        rings.push(ring);
        rings.push(reversed);
    }
    rings
}

#[test]
fn spiked_rings_are_labelled_from_the_outside() {
    for ring in spike_rings() {
        let mut buffer = BufferGraph::new();
        buffer.add_polygon(&Polygon::new(coords(&ring), vec![]));
        buffer.build().unwrap();

        let graph = buffer.graph();
        let subgraph = &buffer.subgraphs()[0];
        assert_eq!(subgraph.rightmost_coordinate().x, 10.0, "{ring:?}");
        let key = subgraph.rightmost_edge();
        let rightmost = graph.directed_edge(key).unwrap();
        assert_eq!(rightmost.depth(Position::Right), 0, "{ring:?}");
        assert_eq!(rightmost.depth(Position::Left), 1, "{ring:?}");
        assert!(!rightmost.is_in_result(), "{ring:?}");
        let sym = graph.sym(key).unwrap();
        assert_ne!(sym, key);
        assert!(graph.directed_edge(sym).unwrap().is_in_result(), "{ring:?}");
    }
}

#[test]
fn island_in_hole_is_labelled_after_its_shell() {
    let shell = coords(&[(0.0, 0.0), (30.0, 0.0), (30.0, 30.0), (0.0, 30.0), (0.0, 0.0)]);
    let hole = coords(&[(5.0, 5.0), (25.0, 5.0), (25.0, 25.0), (5.0, 25.0), (5.0, 5.0)]);
    let island = coords(&[(10.0, 10.0), (20.0, 10.0), (20.0, 20.0), (10.0, 20.0), (10.0, 10.0)]);
    let mut buffer = BufferGraph::new();
    buffer.add_polygon(&Polygon::new(shell, vec![hole]));
    buffer.add_polygon(&Polygon::new(island, vec![]));
    buffer.build().unwrap();

    let xs: Vec<f64> = buffer.subgraphs().iter().map(|s| s.rightmost_coordinate().x).collect();
    assert_eq!(xs, vec![30.0, 25.0, 20.0]);
    assert_eq!(buffer.result_edges().unwrap().len(), 3);

    let graph = buffer.graph();
    for subgraph in buffer.subgraphs() {
        let de = graph.directed_edge(subgraph.rightmost_edge()).unwrap();
        let outside = de.depth(Position::Right).min(de.depth(Position::Left));
        assert_eq!(outside, 0);
    }
}

#[test]
fn line_curves_do_not_change_depth() {
    let mut buffer = BufferGraph::new();
    buffer.add_polygon(&rectangle(0, 0, 0, 10, 10));
    buffer.add_curve(&coords(&[(20.0, 0.0), (30.0, 0.0)]), Location::Exterior, Location::Exterior);
    buffer.build().unwrap();

    assert_eq!(buffer.subgraphs().len(), 2);
    assert_eq!(buffer.result_edges().unwrap().len(), 1);
}
