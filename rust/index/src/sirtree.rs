// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Sort-Interval-Recursive tree over 1-D intervals.
//!
//! Used for stabbing queries along a single axis, e.g. finding the segments
//! of a ring whose Y range spans a given ordinate.

use crate::bounds::Interval;
use crate::error::Result;
use crate::packed_tree::PackedTree;

/// Packed tree over [`Interval`]s.
pub type SirTree<T> = PackedTree<Interval, T>;

impl<T> PackedTree<Interval, T> {
    /// Inserts an item covering `[min(a, b), max(a, b)]`.
    pub fn insert_interval(&mut self, a: f64, b: f64, item: T) -> Result<()> {
        self.insert(Interval::new(a, b), item)
    }

    /// Items whose interval contains `x`.
    pub fn query_value(&self, x: f64) -> Result<Vec<&T>> {
        self.query(&Interval::new(x, x))
    }

    /// Items whose interval overlaps `[min(a, b), max(a, b)]`.
    pub fn query_range(&self, a: f64, b: f64) -> Result<Vec<&T>> {
        self.query(&Interval::new(a, b))
    }
}
