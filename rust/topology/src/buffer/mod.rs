// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Buffer graph labelling.
//!
//! Offset curves arrive labelled with the locations on their sides. The
//! [`BufferGraph`] nodes them into a planar graph, splits it into connected
//! [`BufferSubgraph`]s and assigns every directed edge a depth on each side;
//! the edges with the result on their right and nothing on their left are
//! marked as the boundary of the buffer.

mod buffer_graph;
mod buffer_subgraph;
mod rightmost_edge_finder;
mod subgraph_depth_locater;

pub use buffer_graph::{depth_delta, BufferGraph};
pub use buffer_subgraph::BufferSubgraph;
pub use rightmost_edge_finder::RightmostEdgeFinder;
pub use subgraph_depth_locater::SubgraphDepthLocater;
