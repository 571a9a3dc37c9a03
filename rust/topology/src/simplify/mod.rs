// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Topology-preserving line simplification.

mod tagged_line_string;
mod tagged_lines_simplifier;
mod topology_preserving_simplifier;

pub use tagged_line_string::{LineSegment, SegmentRef, TaggedLineString};
pub use tagged_lines_simplifier::TaggedLinesSimplifier;
pub use topology_preserving_simplifier::{simplify, TopologyPreservingSimplifier};
