// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Planar graph wiring and edge intersection bookkeeping.

use geotopo_topology::geometry::coords;
use geotopo_topology::graph::{EdgeIntersectionList, Label, PlanarGraph};
use geotopo_topology::Coordinate;
use proptest::prelude::*;

/// Unit edges of a lattice, from `(x, y)` to the right or upwards. Distinct
/// lattice edges never leave a node in the same direction.
fn lattice_edges() -> impl Strategy<Value = Vec<(i32, i32, bool)>> {
    prop::collection::btree_set((0i32..6, 0i32..6, any::<bool>()), 1..40).prop_map(|s| s.into_iter().collect())
}

proptest! {
    #[test]
    fn directed_edges_are_wired_symmetrically(segments in lattice_edges()) {
        let mut graph = PlanarGraph::new();
        for &(x, y, horizontal) in &segments {
            let (x0, y0) = (x as f64, y as f64);
            let end = if horizontal { (x0 + 1.0, y0) } else { (x0, y0 + 1.0) };
            graph.add_edge_coords(coords(&[(x0, y0), end]), Label::default()).unwrap();
        }
        prop_assert_eq!(graph.directed_edge_count(), 2 * segments.len());

        for key in graph.directed_edge_keys() {
            let sym = graph.sym(key).unwrap();
            prop_assert_ne!(sym, key);
            prop_assert_eq!(graph.sym(sym).unwrap(), key);
            prop_assert_eq!(graph.from_node(sym).unwrap(), graph.to_node(key).unwrap());
            let from = graph.from_node(key).unwrap();
            prop_assert!(graph.node(from).unwrap().star().contains(&key));
        }
        let star_total: usize = graph.nodes().map(|(_, n)| n.degree()).sum();
        prop_assert_eq!(star_total, graph.directed_edge_count());
    }

    #[test]
    fn intersections_iterate_in_edge_order(
        entries in prop::collection::vec((0usize..5, 0.0..10.0f64), 0..40),
    ) {
        let mut list = EdgeIntersectionList::new();
        for (seg, dist) in &entries {
            list.add(Coordinate::new(*seg as f64, *dist), *seg, *dist);
        }
        let keys: Vec<(usize, f64)> = list.iter().map(|ei| (ei.segment_index, ei.distance)).collect();
        prop_assert!(keys.windows(2).all(|w| w[0].0 < w[1].0 || (w[0].0 == w[1].0 && w[0].1 < w[1].1)));

        let mut distinct: Vec<(usize, f64)> = entries.clone();
        distinct.sort_by(|a, b| a.0.cmp(&b.0).then(a.1.total_cmp(&b.1)));
        distinct.dedup();
        prop_assert_eq!(keys, distinct);
    }
}

#[test]
fn removing_an_edge_unlinks_its_stars() {
    let mut graph = PlanarGraph::new();
    let a = graph.add_edge_coords(coords(&[(0.0, 0.0), (1.0, 0.0)]), Label::default()).unwrap();
    graph.add_edge_coords(coords(&[(0.0, 0.0), (0.0, 1.0)]), Label::default()).unwrap();
    let [fwd, _] = graph.edge(a).unwrap().directed_edges().unwrap();

    graph.remove_edge(a).unwrap();
    assert!(graph.edge(a).is_err());
    assert!(graph.directed_edge(fwd).is_err());
    let origin = graph.find_node(&Coordinate::new(0.0, 0.0)).unwrap();
    assert_eq!(graph.node(origin).unwrap().degree(), 1);
}
