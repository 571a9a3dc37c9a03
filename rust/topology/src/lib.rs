// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # geotopo-topology
//!
//! Planar topology graphs for 2-D vector geometry.
//!
//! Geometries are turned into a [`PlanarGraph`] of labelled nodes, edges and
//! directed edges stored in slot maps, noded at their intersections with the
//! help of the packed spatial index from `geotopo-index`. On top of the graph
//! the crate provides:
//!
//! - [`buffer`]: depth labelling of buffer curve graphs, from the rightmost
//!   edge of each connected subgraph inwards, and selection of the directed
//!   edges bounding the buffer.
//! - [`relate`]: DE-9IM intersection matrices of two geometries and
//!   node-level consistency checks for polygons.
//! - [`simplify`]: Douglas-Peucker simplification that never makes lines or
//!   rings cross.
//! - [`precision`] and [`HCoordinate`]: common-bits shifting and homogeneous
//!   line intersection for numerically robust computation.
//!
//! ## Ambient behaviour
//!
//! Failures are reported through [`Error`]; nothing panics on malformed
//! input. Operations log through `tracing` and never install a subscriber.
//! Defaults are read from the environment by [`Config::from_env`].

pub mod algorithm;
pub mod buffer;
pub mod config;
pub mod coordinate;
pub mod error;
pub mod geometry;
pub mod graph;
pub mod hcoordinate;
pub mod keys;
pub mod precision;
pub mod relate;
pub mod serialization;
pub mod simplify;

pub use buffer::{BufferGraph, BufferSubgraph, RightmostEdgeFinder};
pub use config::Config;
pub use coordinate::Coordinate;
pub use error::{Error, Result};
pub use geometry::{Dimension, Geometry, Polygon};
pub use graph::{Edge, GeometryGraph, Label, Location, PlanarGraph, Position};
pub use hcoordinate::HCoordinate;
pub use keys::{DirectedEdgeKey, EdgeKey, GraphKey, NodeKey};
pub use precision::{CommonBitsOp, CommonBitsRemover};
pub use relate::{relate, IntersectionMatrix, RelateNodeGraph};
pub use serialization::GraphSnapshot;
pub use simplify::{simplify, TopologyPreservingSimplifier};
