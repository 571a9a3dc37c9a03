// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for packed index operations.
//!
//! Every variant is a contract violation by the caller: none of them can be
//! produced by well-formed usage, so callers are expected to propagate rather
//! than recover.

/// Result type alias for index operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building or mutating a packed index.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// Node capacity must be greater than 1.
    #[error("node capacity must be greater than 1, got {0}")]
    InvalidNodeCapacity(usize),

    /// The tree structure has already been built.
    #[error("cannot insert items or rebuild once the tree has been built")]
    AlreadyBuilt,

    /// A parent level was requested for an empty set of children.
    #[error("cannot create parent nodes from an empty child list")]
    EmptyChildren,
}
