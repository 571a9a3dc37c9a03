// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Property tests: the STR tree answers exactly the brute-force intersection
//! set, before and after removals.

use geotopo_index::{Bounds, Envelope, StrTree};
use proptest::prelude::*;

fn envelope() -> impl Strategy<Value = Envelope> {
    (-100.0..100.0f64, -100.0..100.0f64, 0.0..20.0f64, 0.0..20.0f64)
        .prop_map(|(x, y, w, h)| Envelope::new(x, y, x + w, y + h))
}

fn brute_force(boxes: &[Envelope], search: &Envelope) -> Vec<usize> {
    boxes
        .iter()
        .enumerate()
        .filter(|(_, b)| b.intersects(search))
        .map(|(i, _)| i)
        .collect()
}

proptest! {
    #[test]
    fn query_matches_brute_force(
        boxes in prop::collection::vec(envelope(), 0..200),
        search in envelope(),
        capacity in 2usize..12,
    ) {
        let mut tree = StrTree::new(capacity).unwrap();
        for (i, b) in boxes.iter().enumerate() {
            tree.insert(*b, i).unwrap();
        }
        let mut hits: Vec<usize> = tree.query(&search).unwrap().into_iter().copied().collect();
        hits.sort_unstable();
        prop_assert_eq!(hits, brute_force(&boxes, &search));
        prop_assert_eq!(tree.len(), boxes.len());
        prop_assert_eq!(tree.size().unwrap(), boxes.len());
    }

    #[test]
    fn removal_keeps_remaining_items_reachable(
        boxes in prop::collection::vec(envelope(), 1..120),
        search in envelope(),
        stride in 1usize..5,
    ) {
        let mut tree = StrTree::new(3).unwrap();
        for (i, b) in boxes.iter().enumerate() {
            tree.insert(*b, i).unwrap();
        }
        let mut removed = Vec::new();
        for i in (0..boxes.len()).step_by(stride) {
            prop_assert!(tree.remove(&boxes[i], &i).unwrap());
            removed.push(i);
        }
        prop_assert_eq!(tree.len(), boxes.len() - removed.len());
        prop_assert_eq!(tree.size().unwrap(), tree.len());

        let mut hits: Vec<usize> = tree.query(&search).unwrap().into_iter().copied().collect();
        hits.sort_unstable();
        let expected: Vec<usize> = brute_force(&boxes, &search)
            .into_iter()
            .filter(|i| !removed.contains(i))
            .collect();
        prop_assert_eq!(hits, expected);
    }
}

#[test]
fn small_index_scenario() {
    let mut tree = StrTree::new(2).unwrap();
    tree.insert(Envelope::new(0.0, 0.0, 10.0, 10.0), "A").unwrap();
    tree.insert(Envelope::new(20.0, 20.0, 30.0, 30.0), "B").unwrap();
    tree.insert(Envelope::new(5.0, 5.0, 15.0, 15.0), "C").unwrap();

    let mut hits = tree.query(&Envelope::new(0.0, 0.0, 12.0, 12.0)).unwrap();
    hits.sort();
    assert_eq!(hits, vec![&"A", &"C"]);
}

#[test]
fn concurrent_queries_after_build() {
    let mut tree = StrTree::new(4).unwrap();
    for i in 0..500 {
        let x = (i % 25) as f64 * 4.0;
        let y = (i / 25) as f64 * 4.0;
        tree.insert(Envelope::new(x, y, x + 1.0, y + 1.0), i).unwrap();
    }
    tree.build().unwrap();

    std::thread::scope(|scope| {
        for t in 0..4 {
            let tree = &tree;
            scope.spawn(move || {
                let x = t as f64 * 20.0;
                let hits = tree.query(&Envelope::new(x, 0.0, x + 0.5, 0.5)).unwrap();
                assert_eq!(hits.len(), 1);
            });
        }
    });
}
