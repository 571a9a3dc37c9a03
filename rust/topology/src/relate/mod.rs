// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Relate: DE-9IM matrices from labelled node graphs.
//!
//! [`relate`] intersects two geometry graphs and labels the edge ends
//! around each intersection node. [`RelateNodeGraph`] holds those nodes,
//! each with an [`EdgeEndBundleStar`] that groups collinear edge ends and
//! propagates side labels around the node. [`ConsistentAreaTester`] reuses
//! the same machinery to check polygonal geometries.

mod consistent_area_tester;
mod edge_end_bundle;
mod intersection_matrix;
mod relate_computer;
mod relate_node_graph;

pub use consistent_area_tester::ConsistentAreaTester;
pub use edge_end_bundle::{EdgeEnd, EdgeEndBundle, EdgeEndBundleStar};
pub use intersection_matrix::IntersectionMatrix;
pub use relate_computer::{relate, RelateComputer};
pub use relate_node_graph::{compute_edge_ends, RelateNode, RelateNodeGraph};
