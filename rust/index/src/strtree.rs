// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Sort-Tile-Recursive R-tree over 2-D rectangles.

use crate::bounds::Envelope;
use crate::error::Result;
use crate::packed_tree::PackedTree;

/// Packed R-tree over [`Envelope`]s.
pub type StrTree<T> = PackedTree<Envelope, T>;

impl<T> PackedTree<Envelope, T> {
    /// Returns every item whose rectangle contains the point `(x, y)`.
    pub fn query_point(&self, x: f64, y: f64) -> Result<Vec<&T>> {
        self.query(&Envelope::of_point(x, y))
    }
}
