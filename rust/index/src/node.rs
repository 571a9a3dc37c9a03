// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Tree entries: leaves wrapping caller items and internal nodes.

use crate::bounds::Bounds;

/// A child slot of a tree node.
#[derive(Debug, Clone)]
pub enum Boundable<B> {
    /// Leaf referring to an inserted item.
    Item(ItemBoundable<B>),
    /// Internal node.
    Node(Node<B>),
}

impl<B: Bounds> Boundable<B> {
    /// Bounds of this entry; `None` only for an emptied node.
    pub fn bounds(&self) -> Option<&B> {
        match self {
            Boundable::Item(item) => Some(&item.bounds),
            Boundable::Node(node) => node.bounds(),
        }
    }
}

/// Leaf entry: the bounds of an item plus its slot in the tree's item table.
#[derive(Debug, Clone)]
pub struct ItemBoundable<B> {
    pub bounds: B,
    pub(crate) index: usize,
}

impl<B> ItemBoundable<B> {
    pub(crate) fn new(bounds: B, index: usize) -> Self {
        Self { bounds, index }
    }
}

/// Internal node. Level 0 nodes hold leaves; level `k` nodes hold level
/// `k - 1` nodes.
///
/// Bounds are computed once at creation. Removing children never shrinks
/// them, so they stay a conservative cover of the subtree.
#[derive(Debug, Clone)]
pub struct Node<B> {
    level: usize,
    bounds: Option<B>,
    children: Vec<Boundable<B>>,
}

impl<B: Bounds> Node<B> {
    pub(crate) fn new(level: usize, children: Vec<Boundable<B>>) -> Self {
        let mut bounds: Option<B> = None;
        for child in &children {
            if let Some(child_bounds) = child.bounds() {
                match bounds.as_mut() {
                    Some(b) => b.expand_to_include(child_bounds),
                    None => bounds = Some(child_bounds.clone()),
                }
            }
        }
        Self {
            level,
            bounds,
            children,
        }
    }

    pub(crate) fn empty(level: usize) -> Self {
        Self {
            level,
            bounds: None,
            children: Vec::new(),
        }
    }

    pub fn level(&self) -> usize {
        self.level
    }

    pub fn bounds(&self) -> Option<&B> {
        if self.children.is_empty() {
            None
        } else {
            self.bounds.as_ref()
        }
    }

    pub fn children(&self) -> &[Boundable<B>] {
        &self.children
    }

    pub(crate) fn children_mut(&mut self) -> &mut Vec<Boundable<B>> {
        &mut self.children
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }
}
