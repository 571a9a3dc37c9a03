// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Bounds abstractions for the packed tree.
//!
//! A [`Bounds`] type decides three things for an index flavor: when two
//! bounds intersect, how bounds are combined into a parent's bounds, and how
//! a level of children is packed into parent nodes. The rectangle flavor
//! ([`Envelope`]) packs with Sort-Tile-Recursive slicing; the interval flavor
//! ([`Interval`]) uses the default sort-and-chunk packing.

use std::cmp::Ordering;

use crate::error::{Error, Result};
use crate::node::{Boundable, Node};

/// Bounding region understood by [`crate::PackedTree`].
pub trait Bounds: Clone + std::fmt::Debug {
    /// Returns `true` if the two regions share at least one point.
    fn intersects(&self, other: &Self) -> bool;

    /// Grows `self` so that it also covers `other`.
    fn expand_to_include(&mut self, other: &Self);

    /// Key used by the default ordering when grouping runs of children.
    fn centre_key(&self) -> f64;

    /// Packs one level of children into parent nodes at `level`.
    ///
    /// The default sorts by [`Bounds::centre_key`] and groups consecutive
    /// runs of `capacity` children.
    fn pack_level(
        children: Vec<Boundable<Self>>,
        capacity: usize,
        level: usize,
    ) -> Result<Vec<Node<Self>>>
    where
        Self: Sized,
    {
        if children.is_empty() {
            return Err(Error::EmptyChildren);
        }
        let mut sorted = children;
        sort_by_key_value(&mut sorted, |b| b.centre_key());
        Ok(chunk_into_nodes(sorted, capacity, level))
    }
}

/// Stable sort of boundables by a floating-point key.
///
/// NaN keys order after every finite key via `total_cmp`.
pub(crate) fn sort_by_key_value<B: Bounds>(children: &mut [Boundable<B>], key: impl Fn(&B) -> f64) {
    children.sort_by(|a, b| match (a.bounds(), b.bounds()) {
        (Some(a), Some(b)) => key(a).total_cmp(&key(b)),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });
}

/// Groups consecutive runs of `capacity` children into parent nodes.
pub(crate) fn chunk_into_nodes<B: Bounds>(
    children: Vec<Boundable<B>>,
    capacity: usize,
    level: usize,
) -> Vec<Node<B>> {
    let mut parents = Vec::with_capacity(children.len().div_ceil(capacity));
    let mut run = Vec::with_capacity(capacity);
    for child in children {
        run.push(child);
        if run.len() == capacity {
            parents.push(Node::new(level, std::mem::take(&mut run)));
        }
    }
    if !run.is_empty() {
        parents.push(Node::new(level, run));
    }
    parents
}

// ============================================================================
// Envelope
// ============================================================================

/// Axis-aligned rectangle. A null envelope covers nothing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Envelope {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Default for Envelope {
    fn default() -> Self {
        Self::null()
    }
}

impl Envelope {
    /// Creates an envelope from two corners given in any order.
    pub fn new(x1: f64, y1: f64, x2: f64, y2: f64) -> Self {
        Self {
            min_x: x1.min(x2),
            min_y: y1.min(y2),
            max_x: x1.max(x2),
            max_y: y1.max(y2),
        }
    }

    /// The empty envelope.
    pub fn null() -> Self {
        Self {
            min_x: f64::INFINITY,
            min_y: f64::INFINITY,
            max_x: f64::NEG_INFINITY,
            max_y: f64::NEG_INFINITY,
        }
    }

    /// Envelope of a single point.
    pub fn of_point(x: f64, y: f64) -> Self {
        Self::new(x, y, x, y)
    }

    pub fn is_null(&self) -> bool {
        self.min_x > self.max_x
    }

    pub fn width(&self) -> f64 {
        if self.is_null() {
            0.0
        } else {
            self.max_x - self.min_x
        }
    }

    pub fn height(&self) -> f64 {
        if self.is_null() {
            0.0
        } else {
            self.max_y - self.min_y
        }
    }

    /// Centre point, or `None` for a null envelope.
    pub fn centre(&self) -> Option<(f64, f64)> {
        if self.is_null() {
            None
        } else {
            Some((
                (self.min_x + self.max_x) / 2.0,
                (self.min_y + self.max_y) / 2.0,
            ))
        }
    }

    pub fn expand_to_include_point(&mut self, x: f64, y: f64) {
        self.min_x = self.min_x.min(x);
        self.min_y = self.min_y.min(y);
        self.max_x = self.max_x.max(x);
        self.max_y = self.max_y.max(y);
    }

    /// Grows the envelope by `distance` on every side.
    pub fn expand_by(&mut self, distance: f64) {
        if self.is_null() {
            return;
        }
        self.min_x -= distance;
        self.min_y -= distance;
        self.max_x += distance;
        self.max_y += distance;
        if self.min_x > self.max_x || self.min_y > self.max_y {
            *self = Self::null();
        }
    }

    pub fn intersects_point(&self, x: f64, y: f64) -> bool {
        !(x < self.min_x || x > self.max_x || y < self.min_y || y > self.max_y)
    }

    /// Returns `true` if `other` lies entirely inside this envelope.
    pub fn covers(&self, other: &Envelope) -> bool {
        if self.is_null() || other.is_null() {
            return false;
        }
        other.min_x >= self.min_x
            && other.max_x <= self.max_x
            && other.min_y >= self.min_y
            && other.max_y <= self.max_y
    }

    fn centre_x(&self) -> f64 {
        (self.min_x + self.max_x) / 2.0
    }

    fn centre_y(&self) -> f64 {
        (self.min_y + self.max_y) / 2.0
    }
}

impl Bounds for Envelope {
    fn intersects(&self, other: &Self) -> bool {
        if self.is_null() || other.is_null() {
            return false;
        }
        !(other.min_x > self.max_x
            || other.max_x < self.min_x
            || other.min_y > self.max_y
            || other.max_y < self.min_y)
    }

    fn expand_to_include(&mut self, other: &Self) {
        if other.is_null() {
            return;
        }
        self.min_x = self.min_x.min(other.min_x);
        self.min_y = self.min_y.min(other.min_y);
        self.max_x = self.max_x.max(other.max_x);
        self.max_y = self.max_y.max(other.max_y);
    }

    /// Runs inside a vertical slice are grouped by Y centre.
    fn centre_key(&self) -> f64 {
        self.centre_y()
    }

    /// Sort-Tile-Recursive packing.
    ///
    /// Children are sorted by X centre and cut into
    /// `ceil(sqrt(ceil(n / capacity)))` vertical slices of
    /// `ceil(n / slice_count)` children; each slice is then packed with the
    /// default Y-centre ordering.
    fn pack_level(
        children: Vec<Boundable<Self>>,
        capacity: usize,
        level: usize,
    ) -> Result<Vec<Node<Self>>> {
        if children.is_empty() {
            return Err(Error::EmptyChildren);
        }
        let n = children.len();
        let min_leaf_count = n.div_ceil(capacity);
        let slice_count = (min_leaf_count as f64).sqrt().ceil() as usize;
        let slice_capacity = n.div_ceil(slice_count.max(1));

        let mut sorted = children;
        sort_by_key_value(&mut sorted, Envelope::centre_x);

        let mut parents = Vec::with_capacity(min_leaf_count);
        let mut slice = Vec::with_capacity(slice_capacity);
        for child in sorted {
            slice.push(child);
            if slice.len() == slice_capacity {
                parents.extend(pack_slice(std::mem::take(&mut slice), capacity, level));
            }
        }
        if !slice.is_empty() {
            parents.extend(pack_slice(slice, capacity, level));
        }
        Ok(parents)
    }
}

fn pack_slice(mut slice: Vec<Boundable<Envelope>>, capacity: usize, level: usize) -> Vec<Node<Envelope>> {
    sort_by_key_value(&mut slice, Envelope::centre_y);
    chunk_into_nodes(slice, capacity, level)
}

// ============================================================================
// Interval
// ============================================================================

/// Closed 1-D interval `[min, max]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interval {
    pub min: f64,
    pub max: f64,
}

impl Interval {
    /// Creates an interval from two endpoints given in any order.
    pub fn new(a: f64, b: f64) -> Self {
        Self {
            min: a.min(b),
            max: a.max(b),
        }
    }

    pub fn width(&self) -> f64 {
        self.max - self.min
    }
}

impl Bounds for Interval {
    fn intersects(&self, other: &Self) -> bool {
        !(other.min > self.max || other.max < self.min)
    }

    fn expand_to_include(&mut self, other: &Self) {
        self.min = self.min.min(other.min);
        self.max = self.max.max(other.max);
    }

    fn centre_key(&self) -> f64 {
        (self.min + self.max) / 2.0
    }
}
