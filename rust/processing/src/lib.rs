// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # Stria Processing
//!
//! The reconstruction pipeline: walks the model tables, builds geometric
//! primitives and groups them into property-keyed branches ready for a
//! rendering or editing layer.
//!
//! ## Overview
//!
//! - [`extract_nodes`]: dense 1-based node export with explicit gaps.
//! - [`build_elements`]: 1D segments with releases and 2D face meshes from
//!   explicit element topology; join mode consolidates each face branch and
//!   splits it into maximal connected pieces.
//! - [`build_members`]: polyline boundaries, voids and inclusions decoded
//!   from member topology strings.
//!
//! Every call is a pure, synchronous batch transform over fully materialized
//! tables; intermediates are created and discarded per invocation. Local
//! failures (unresolved nodes, malformed topology, unsupported lengths) skip
//! the entity with a [tracing](https://docs.rs/tracing) warning and never
//! abort the run.

pub mod branches;
pub mod elements;
pub mod members;
pub mod nodes;
pub mod records;

pub use branches::{Branches, GroupingMode};
pub use elements::{build_elements, ElementOptions, ElementOutput};
pub use members::{build_members, MemberOptions, MemberOutput};
pub use nodes::extract_nodes;
pub use records::{FaceElement, LineElement, LinearMember, PlanarMember};
