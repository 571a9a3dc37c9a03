// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Generic bulk-loaded packed tree.
//!
//! Items are inserted first, then the tree is packed bottom-up in one pass
//! (explicitly with [`PackedTree::build`] or implicitly by the first query or
//! removal). After that the structure only ever shrinks, through
//! [`PackedTree::remove`].
//!
//! Every walk over the tree (queries, removal search, depth, size, level
//! enumeration) runs on an explicit stack so that stack usage does not grow
//! with tree height.

use std::sync::OnceLock;

use crate::bounds::Bounds;
use crate::error::{Error, Result};
use crate::node::{Boundable, ItemBoundable, Node};

/// Node capacity used by [`PackedTree::default`].
pub const DEFAULT_NODE_CAPACITY: usize = 10;

#[derive(Debug)]
struct Entry<B, T> {
    bounds: B,
    /// `None` once the item has been removed.
    item: Option<T>,
}

/// Bulk-loaded tree over items of type `T` with bounds of type `B`.
///
/// Once built, `&PackedTree` can be shared between threads for concurrent
/// queries; the build itself happens at most once.
///
/// # Example
///
/// ```
/// use geotopo_index::{Envelope, StrTree};
///
/// let mut tree = StrTree::new(2).unwrap();
/// tree.insert(Envelope::new(0.0, 0.0, 10.0, 10.0), "A").unwrap();
/// tree.insert(Envelope::new(20.0, 20.0, 30.0, 30.0), "B").unwrap();
///
/// let hits = tree.query(&Envelope::new(1.0, 1.0, 2.0, 2.0)).unwrap();
/// assert_eq!(hits, vec![&"A"]);
/// ```
#[derive(Debug)]
pub struct PackedTree<B, T> {
    node_capacity: usize,
    entries: Vec<Entry<B, T>>,
    root: OnceLock<Node<B>>,
    removed: usize,
}

impl<B: Bounds, T> Default for PackedTree<B, T> {
    fn default() -> Self {
        Self {
            node_capacity: DEFAULT_NODE_CAPACITY,
            entries: Vec::new(),
            root: OnceLock::new(),
            removed: 0,
        }
    }
}

impl<B: Bounds, T> PackedTree<B, T> {
    /// Creates an empty tree whose nodes hold at most `node_capacity` children.
    pub fn new(node_capacity: usize) -> Result<Self> {
        if node_capacity <= 1 {
            return Err(Error::InvalidNodeCapacity(node_capacity));
        }
        Ok(Self {
            node_capacity,
            ..Self::default()
        })
    }

    pub fn node_capacity(&self) -> usize {
        self.node_capacity
    }

    pub fn is_built(&self) -> bool {
        self.root.get().is_some()
    }

    /// Number of items inserted and not removed.
    pub fn len(&self) -> usize {
        self.entries.len() - self.removed
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    // --- Loading ---

    /// Adds an item. Fails once the tree has been built.
    pub fn insert(&mut self, bounds: B, item: T) -> Result<()> {
        if self.is_built() {
            return Err(Error::AlreadyBuilt);
        }
        self.entries.push(Entry {
            bounds,
            item: Some(item),
        });
        Ok(())
    }

    /// Packs the inserted items. Fails if the tree was already built.
    pub fn build(&mut self) -> Result<()> {
        if self.is_built() {
            return Err(Error::AlreadyBuilt);
        }
        let root = self.pack()?;
        self.root.set(root).map_err(|_| Error::AlreadyBuilt)
    }

    fn root(&self) -> Result<&Node<B>> {
        if let Some(root) = self.root.get() {
            return Ok(root);
        }
        let root = self.pack()?;
        Ok(self.root.get_or_init(|| root))
    }

    fn pack(&self) -> Result<Node<B>> {
        let mut level = 0;
        let leaves: Vec<Boundable<B>> = self
            .entries
            .iter()
            .enumerate()
            .map(|(index, entry)| Boundable::Item(ItemBoundable::new(entry.bounds.clone(), index)))
            .collect();
        if leaves.is_empty() {
            return Ok(Node::empty(level));
        }

        let mut nodes = B::pack_level(leaves, self.node_capacity, level)?;
        while nodes.len() > 1 {
            level += 1;
            let children = nodes.into_iter().map(Boundable::Node).collect();
            nodes = B::pack_level(children, self.node_capacity, level)?;
        }

        tracing::debug!(
            items = self.entries.len(),
            levels = level + 1,
            capacity = self.node_capacity,
            "Packed tree built"
        );
        nodes.pop().ok_or(Error::EmptyChildren)
    }

    // --- Queries ---

    /// Returns every item whose bounds intersect `search`, in depth-first
    /// tree order. Builds the tree on first use.
    pub fn query(&self, search: &B) -> Result<Vec<&T>> {
        let mut hits = Vec::new();
        self.visit(search, |item| hits.push(item))?;
        Ok(hits)
    }

    /// Calls `visitor` for every item whose bounds intersect `search`.
    pub fn query_with(&self, search: &B, mut visitor: impl FnMut(&T)) -> Result<()> {
        self.visit(search, |item| visitor(item))
    }

    fn visit<'a>(&'a self, search: &B, mut visitor: impl FnMut(&'a T)) -> Result<()> {
        let root = self.root()?;
        if !root.bounds().is_some_and(|b| b.intersects(search)) {
            return Ok(());
        }
        let mut stack = vec![root.children().iter()];
        while let Some(children) = stack.last_mut() {
            match children.next() {
                None => {
                    stack.pop();
                }
                Some(Boundable::Node(node)) => {
                    if node.bounds().is_some_and(|b| b.intersects(search)) {
                        stack.push(node.children().iter());
                    }
                }
                Some(Boundable::Item(leaf)) => {
                    if leaf.bounds.intersects(search) {
                        if let Some(item) = self.entries[leaf.index].item.as_ref() {
                            visitor(item);
                        }
                    }
                }
            }
        }
        Ok(())
    }

    /// Height of the tree: 0 when empty, 1 when the root holds only leaves.
    pub fn depth(&self) -> Result<usize> {
        let root = self.root()?;
        if root.is_empty() {
            return Ok(0);
        }
        let mut max_depth = 0;
        let mut stack = vec![(root, 1)];
        while let Some((node, depth)) = stack.pop() {
            max_depth = max_depth.max(depth);
            for child in node.children() {
                if let Boundable::Node(child) = child {
                    stack.push((child, depth + 1));
                }
            }
        }
        Ok(max_depth)
    }

    /// Number of leaves reachable from the root.
    pub fn size(&self) -> Result<usize> {
        let root = self.root()?;
        let mut count = 0;
        let mut stack = vec![root];
        while let Some(node) = stack.pop() {
            for child in node.children() {
                match child {
                    Boundable::Node(child) => stack.push(child),
                    Boundable::Item(_) => count += 1,
                }
            }
        }
        Ok(count)
    }

    /// Bounds of every non-empty node at `level` (0 is the level above the
    /// leaves).
    pub fn bounds_at_level(&self, level: usize) -> Result<Vec<B>> {
        let root = self.root()?;
        let mut found = Vec::new();
        let mut stack = vec![root];
        while let Some(node) = stack.pop() {
            if node.level() == level {
                if let Some(bounds) = node.bounds() {
                    found.push(bounds.clone());
                }
                continue;
            }
            for child in node.children().iter().rev() {
                if let Boundable::Node(child) = child {
                    stack.push(child);
                }
            }
        }
        Ok(found)
    }
}

impl<B: Bounds, T: PartialEq> PackedTree<B, T> {
    /// Removes one item equal to `item` whose bounds intersect `bounds`.
    ///
    /// Nodes emptied by the removal are pruned along the path back to the
    /// root. Returns `false` if no matching item was found.
    pub fn remove(&mut self, bounds: &B, item: &T) -> Result<bool> {
        if !self.is_built() {
            let root = self.pack()?;
            let _ = self.root.set(root);
        }
        let Some(root) = self.root.get_mut() else {
            return Ok(false);
        };
        if !root.bounds().is_some_and(|b| b.intersects(bounds)) {
            return Ok(false);
        }

        let entries = &self.entries;
        let is_target = |child: &Boundable<B>| match child {
            Boundable::Item(leaf) => {
                leaf.bounds.intersects(bounds) && entries[leaf.index].item.as_ref() == Some(item)
            }
            Boundable::Node(_) => false,
        };

        let mut found = None;
        let mut stack: Vec<Vec<usize>> = vec![Vec::new()];
        while let Some(path) = stack.pop() {
            let Some(node) = node_at(root, &path) else {
                continue;
            };
            if let Some(position) = node.children().iter().position(is_target) {
                found = Some((path, position));
                break;
            }
            for (i, child) in node.children().iter().enumerate().rev() {
                if let Boundable::Node(child) = child {
                    if child.bounds().is_some_and(|b| b.intersects(bounds)) {
                        let mut child_path = path.clone();
                        child_path.push(i);
                        stack.push(child_path);
                    }
                }
            }
        }

        let Some((path, position)) = found else {
            return Ok(false);
        };
        let Some(parent) = node_at_mut(root, &path) else {
            return Ok(false);
        };
        if let Boundable::Item(leaf) = parent.children_mut().remove(position) {
            self.entries[leaf.index].item = None;
            self.removed += 1;
        }

        // Prune emptied nodes bottom-up.
        for depth in (1..=path.len()).rev() {
            let Some(parent) = node_at_mut(root, &path[..depth - 1]) else {
                break;
            };
            let child = path[depth - 1];
            match parent.children().get(child) {
                Some(Boundable::Node(node)) if node.is_empty() => {
                    parent.children_mut().remove(child);
                }
                _ => break,
            }
        }
        Ok(true)
    }
}

fn node_at<'a, B: Bounds>(root: &'a Node<B>, path: &[usize]) -> Option<&'a Node<B>> {
    path.iter().try_fold(root, |node, &i| match node.children().get(i)? {
        Boundable::Node(child) => Some(child),
        Boundable::Item(_) => None,
    })
}

fn node_at_mut<'a, B: Bounds>(root: &'a mut Node<B>, path: &[usize]) -> Option<&'a mut Node<B>> {
    path.iter().try_fold(root, |node, &i| match node.children_mut().get_mut(i)? {
        Boundable::Node(child) => Some(child),
        Boundable::Item(_) => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bounds::Envelope;

    fn small_tree() -> PackedTree<Envelope, &'static str> {
        let mut tree = PackedTree::new(2).unwrap();
        tree.insert(Envelope::new(0.0, 0.0, 10.0, 10.0), "A").unwrap();
        tree.insert(Envelope::new(20.0, 20.0, 30.0, 30.0), "B").unwrap();
        tree.insert(Envelope::new(5.0, 5.0, 15.0, 15.0), "C").unwrap();
        tree
    }

    #[test]
    fn capacity_must_exceed_one() {
        assert_eq!(
            PackedTree::<Envelope, u32>::new(1).unwrap_err(),
            Error::InvalidNodeCapacity(1)
        );
        assert!(PackedTree::<Envelope, u32>::new(0).is_err());
        assert!(PackedTree::<Envelope, u32>::new(2).is_ok());
        assert_eq!(
            PackedTree::<Envelope, u32>::default().node_capacity(),
            DEFAULT_NODE_CAPACITY
        );
    }

    #[test]
    fn query_small_index() {
        let tree = small_tree();
        let mut hits = tree.query(&Envelope::new(0.0, 0.0, 12.0, 12.0)).unwrap();
        hits.sort();
        assert_eq!(hits, vec![&"A", &"C"]);
    }

    #[test]
    fn query_builds_lazily_once() {
        let tree = small_tree();
        assert!(!tree.is_built());
        tree.query(&Envelope::new(0.0, 0.0, 1.0, 1.0)).unwrap();
        assert!(tree.is_built());
        assert_eq!(tree.len(), 3);
        assert_eq!(tree.size().unwrap(), 3);
    }

    #[test]
    fn insert_and_build_after_build_fail() {
        let mut tree = small_tree();
        tree.build().unwrap();
        assert_eq!(tree.build().unwrap_err(), Error::AlreadyBuilt);
        assert_eq!(
            tree.insert(Envelope::new(0.0, 0.0, 1.0, 1.0), "D").unwrap_err(),
            Error::AlreadyBuilt
        );
    }

    #[test]
    fn explicit_build_after_implicit_build_fails() {
        let mut tree = small_tree();
        tree.query(&Envelope::new(0.0, 0.0, 1.0, 1.0)).unwrap();
        assert_eq!(tree.build().unwrap_err(), Error::AlreadyBuilt);
    }

    #[test]
    fn empty_tree() {
        let tree: PackedTree<Envelope, u32> = PackedTree::default();
        assert!(tree.query(&Envelope::new(0.0, 0.0, 1.0, 1.0)).unwrap().is_empty());
        assert_eq!(tree.depth().unwrap(), 0);
        assert_eq!(tree.size().unwrap(), 0);
        assert!(tree.is_empty());
    }

    #[test]
    fn depth_grows_with_item_count() {
        let mut tree = PackedTree::new(2).unwrap();
        tree.insert(Envelope::of_point(0.0, 0.0), 0).unwrap();
        tree.insert(Envelope::of_point(1.0, 1.0), 1).unwrap();
        assert_eq!(tree.depth().unwrap(), 1);

        let mut tree = PackedTree::new(2).unwrap();
        for i in 0..16 {
            tree.insert(Envelope::of_point(i as f64, (i * 3 % 7) as f64), i).unwrap();
        }
        assert!(tree.depth().unwrap() >= 4);
        assert_eq!(tree.size().unwrap(), 16);
    }

    #[test]
    fn bounds_at_level_covers_everything() {
        let mut tree = PackedTree::new(4).unwrap();
        for i in 0..40 {
            let x = (i % 8) as f64;
            let y = (i / 8) as f64;
            tree.insert(Envelope::new(x, y, x + 1.0, y + 1.0), i).unwrap();
        }
        let leaves_parents = tree.bounds_at_level(0).unwrap();
        assert!(leaves_parents.len() >= 10);
        let mut cover = Envelope::null();
        for b in &leaves_parents {
            cover.expand_to_include(b);
        }
        assert_eq!(cover, Envelope::new(0.0, 0.0, 8.0, 5.0));
    }

    #[test]
    fn remove_detaches_item() {
        let mut tree = small_tree();
        assert!(tree.remove(&Envelope::new(0.0, 0.0, 10.0, 10.0), &"A").unwrap());
        assert_eq!(tree.len(), 2);
        assert_eq!(tree.size().unwrap(), 2);
        let hits = tree.query(&Envelope::new(0.0, 0.0, 12.0, 12.0)).unwrap();
        assert_eq!(hits, vec![&"C"]);
    }

    #[test]
    fn remove_requires_matching_item_and_bounds() {
        let mut tree = small_tree();
        assert!(!tree.remove(&Envelope::new(0.0, 0.0, 10.0, 10.0), &"B").unwrap());
        assert!(!tree.remove(&Envelope::new(100.0, 100.0, 110.0, 110.0), &"A").unwrap());
        assert_eq!(tree.len(), 3);
    }

    #[test]
    fn remove_everything_prunes_nodes() {
        let mut tree = PackedTree::new(2).unwrap();
        let boxes: Vec<_> = (0..9)
            .map(|i| Envelope::new(i as f64, 0.0, i as f64 + 0.5, 0.5))
            .collect();
        for (i, b) in boxes.iter().enumerate() {
            tree.insert(*b, i).unwrap();
        }
        for (i, b) in boxes.iter().enumerate() {
            assert!(tree.remove(b, &i).unwrap());
        }
        assert!(tree.is_empty());
        assert_eq!(tree.size().unwrap(), 0);
        assert_eq!(tree.depth().unwrap(), 0);
        assert!(tree.query(&Envelope::new(-10.0, -10.0, 10.0, 10.0)).unwrap().is_empty());
    }
}
