// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # geotopo-index
//!
//! Bulk-loaded packed spatial indexes.
//!
//! A [`PackedTree`] is generic over its [`Bounds`] type, which supplies the
//! intersection predicate and the level-packing strategy:
//!
//! - [`StrTree`] indexes 2-D rectangles ([`Envelope`]) and packs each level
//!   with Sort-Tile-Recursive slicing (X-centre slices, Y-centre runs).
//! - [`SirTree`] indexes 1-D intervals ([`Interval`]) and packs each level by
//!   interval centre.
//!
//! Items are inserted, the tree is packed once, and queries return every
//! item whose bounds intersect the search bounds. Precise item-level tests
//! are left to the caller.

pub mod bounds;
pub mod error;
pub mod node;
pub mod packed_tree;
pub mod sirtree;
pub mod strtree;

pub use bounds::{Bounds, Envelope, Interval};
pub use error::{Error, Result};
pub use node::{Boundable, ItemBoundable, Node};
pub use packed_tree::{PackedTree, DEFAULT_NODE_CAPACITY};
pub use sirtree::SirTree;
pub use strtree::StrTree;
