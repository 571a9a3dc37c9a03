// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for topology operations.
//!
//! [`Error::Topology`] and [`Error::Index`] are internal contract violations
//! (a malformed graph, misuse of the index); [`Error::NotRepresentable`] is a
//! numeric condition callers are expected to handle with a fallback.

use crate::coordinate::Coordinate;
use crate::keys::GraphKey;

/// Result type alias for topology operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur during topology operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The graph is inconsistent (depth mismatch, unlabeled node, side
    /// location conflict, degenerate direction).
    #[error("topology error: {message}{}", at_suffix(.coordinate))]
    Topology {
        message: String,
        coordinate: Option<Coordinate>,
    },

    /// A homogeneous-coordinate intersection produced NaN or infinity.
    #[error("intersection point is not representable")]
    NotRepresentable,

    /// An argument is outside the accepted domain.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A referenced graph entity was not found in the arena.
    #[error("{} not found: {0:?}", .0.element_type())]
    NotFound(GraphKey),

    /// A packed index was misused.
    #[error(transparent)]
    Index(#[from] geotopo_index::Error),

    /// Serialization/deserialization error.
    #[error("serialization error: {0}")]
    Serialization(String),
}

impl Error {
    pub(crate) fn topology(message: impl Into<String>, coordinate: impl Into<Option<Coordinate>>) -> Self {
        Error::Topology {
            message: message.into(),
            coordinate: coordinate.into(),
        }
    }

    pub(crate) fn not_found(key: impl Into<GraphKey>) -> Self {
        Error::NotFound(key.into())
    }
}

fn at_suffix(coordinate: &Option<Coordinate>) -> String {
    match coordinate {
        Some(c) => format!(" at {c}"),
        None => String::new(),
    }
}
