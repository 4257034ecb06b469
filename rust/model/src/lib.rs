// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! # Stria Model
//!
//! Sparse tables of a structural-analysis model and the domain grammar that
//! encodes member topology.
//!
//! ## Overview
//!
//! - **Tables**: integer-keyed node, element and member tables with gaps
//!   ([`Model`]); lookups resolve missing ids to placeholders, never panics.
//! - **Topology strings**: a compact textual encoding of a member's boundary,
//!   voids, line inclusions and point inclusions, decoded by
//!   [`parse_topology`] into tagged id sequences with arc annotations.
//! - **Selection lists**: `all`, id lists and `a to b` ranges
//!   ([`Selection`]), parsed with [nom](https://docs.rs/nom).
//!
//! ## Quick Start
//!
//! ```rust
//! use stria_model::{parse_topology, Model, Node};
//!
//! let parsed = parse_topology("1 2 3 V(4 5 6) 7").unwrap();
//! assert_eq!(parsed.outline_ids(), vec![1, 2, 3, 7]);
//! assert_eq!(parsed.voids[0].ids, vec![4, 5, 6]);
//!
//! let mut model = Model::new();
//! model.add_node(Node::new(1, 0.0, 0.0, 0.0));
//! let positions = model.resolve_positions(&[1, 2]);
//! assert!(positions[0].is_some());
//! assert!(positions[1].is_none());
//! ```
//!
//! ## Feature Flags
//!
//! - `serde`: Enable serialization support for table and topology types

pub mod error;
pub mod selection;
pub mod tables;
pub mod topology;

pub use error::{Error, Result};
pub use selection::Selection;
pub use tables::{Element, EndRelease, Member, MemberKind, Model, Node};
pub use topology::{parse_topology, OutlineItem, ParsedTopology, TopoChain};
