// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Sparse model tables: nodes, elements and members.
//!
//! Tables are integer-keyed with 1-based ids and may contain gaps. They are
//! supplied fully materialized by the caller; this crate never performs I/O.

use nalgebra::Point3;
use rustc_hash::FxHashMap;
use smallvec::SmallVec;

/// A labeled point in 3D space, referenced by id from elements and members.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Node {
    /// 1-based node id.
    pub id: u32,
    /// Position in model space.
    pub position: Point3<f64>,
}

impl Node {
    /// Create a node from id and coordinates.
    pub fn new(id: u32, x: f64, y: f64, z: f64) -> Self {
        Self {
            id,
            position: Point3::new(x, y, z),
        }
    }
}

/// Per-degree-of-freedom release flags at one end of a 1D element.
///
/// A set flag means the connection does not transmit that force or moment
/// component.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EndRelease {
    pub x: bool,
    pub y: bool,
    pub z: bool,
    pub xx: bool,
    pub yy: bool,
    pub zz: bool,
}

impl EndRelease {
    /// Fully fixed end (nothing released).
    pub const FIXED: EndRelease = EndRelease {
        x: false,
        y: false,
        z: false,
        xx: false,
        yy: false,
        zz: false,
    };

    /// True if any component is released.
    pub fn any(&self) -> bool {
        self.x || self.y || self.z || self.xx || self.yy || self.zz
    }
}

/// An analysis element with explicit topology (ordered node ids).
///
/// Valid topology lengths are 2 (bar/beam), 3, 4, 6 and 8 (shell faces);
/// classification happens downstream, the table stores whatever it was given.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Element {
    /// 1-based element id.
    pub id: u32,
    /// Ordered node ids.
    pub topology: SmallVec<[u32; 8]>,
    /// 1-based property id, the grouping key.
    pub property: u32,
    /// Release flags at the two ends, meaningful for 2-node elements only.
    pub releases: [EndRelease; 2],
}

impl Element {
    /// Create an element with fixed ends.
    pub fn new(id: u32, topology: &[u32], property: u32) -> Self {
        Self {
            id,
            topology: SmallVec::from_slice(topology),
            property,
            releases: [EndRelease::FIXED; 2],
        }
    }

    /// Create a 2-node element with explicit end releases.
    pub fn with_releases(
        id: u32,
        topology: &[u32],
        property: u32,
        start: EndRelease,
        end: EndRelease,
    ) -> Self {
        Self {
            id,
            topology: SmallVec::from_slice(topology),
            property,
            releases: [start, end],
        }
    }
}

/// Engineering type tag of a member, deciding 1D vs 2D reconstruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MemberKind {
    Beam,
    Column,
    Cantilever,
    Compos,
    Pile,
    Generic1d,
    Slab,
    Wall,
    Ribbed,
    Void2d,
    Generic2d,
}

impl MemberKind {
    /// Beam-like kinds reconstruct as 1D polylines, everything else as 2D
    /// surfaces.
    pub fn is_linear(&self) -> bool {
        matches!(
            self,
            MemberKind::Beam
                | MemberKind::Column
                | MemberKind::Cantilever
                | MemberKind::Compos
                | MemberKind::Pile
                | MemberKind::Generic1d
        )
    }
}

/// A design member whose boundary, voids and inclusions are encoded in a
/// compact topology string (see [`crate::topology`]).
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Member {
    /// 1-based member id.
    pub id: u32,
    /// Topology string in the domain grammar.
    pub topology: String,
    /// Engineering type tag.
    pub kind: MemberKind,
    /// 1-based property id, the grouping key.
    pub property: u32,
}

impl Member {
    /// Create a member.
    pub fn new(id: u32, topology: impl Into<String>, kind: MemberKind, property: u32) -> Self {
        Self {
            id,
            topology: topology.into(),
            kind,
            property,
        }
    }
}

/// A fully materialized analysis model: three sparse id-keyed tables.
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Model {
    /// Node table, id → node.
    pub nodes: FxHashMap<u32, Node>,
    /// Element table, id → element.
    pub elements: FxHashMap<u32, Element>,
    /// Member table, id → member.
    pub members: FxHashMap<u32, Member>,
}

impl Model {
    /// Create an empty model.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a node, replacing any previous node with the same id.
    pub fn add_node(&mut self, node: Node) {
        self.nodes.insert(node.id, node);
    }

    /// Insert an element, replacing any previous element with the same id.
    pub fn add_element(&mut self, element: Element) {
        self.elements.insert(element.id, element);
    }

    /// Insert a member, replacing any previous member with the same id.
    pub fn add_member(&mut self, member: Member) {
        self.members.insert(member.id, member);
    }

    /// Highest node id present, 0 for an empty table.
    pub fn max_node_id(&self) -> u32 {
        self.nodes.keys().copied().max().unwrap_or(0)
    }

    /// Resolve node ids to positions, one entry per requested id.
    ///
    /// Ids absent from the table yield `None` so the result stays positionally
    /// aligned with the request list; missing nodes are recovered locally, not
    /// propagated as failures.
    pub fn resolve_positions(&self, ids: &[u32]) -> Vec<Option<Point3<f64>>> {
        ids.iter()
            .map(|id| self.nodes.get(id).map(|n| n.position))
            .collect()
    }
}
