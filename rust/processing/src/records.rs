// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Output records handed to the rendering / further-processing layer.

use serde::Serialize;

use stria_geometry::{FaceMesh, Point3, Polyline, Segment};
use stria_model::EndRelease;

/// A reconstructed 1D element: straight segment plus end releases.
#[derive(Debug, Clone, Serialize)]
pub struct LineElement {
    /// Source element id.
    pub id: u32,
    /// 1-based property id.
    pub property: u32,
    /// Straight segment between the two resolved end nodes.
    pub segment: Segment,
    /// Release flags at the start node.
    pub release_start: EndRelease,
    /// Release flags at the end node.
    pub release_end: EndRelease,
}

/// A reconstructed 2D element or a joined piece of several.
///
/// `mesh.face_sources` records the source element id of every face, so a
/// consolidated piece keeps per-face provenance instead of collapsing to the
/// first contributor.
#[derive(Debug, Clone, Serialize)]
pub struct FaceElement {
    /// 1-based property id shared by every contributing element.
    pub property: u32,
    /// Face geometry with per-face source ids.
    pub mesh: FaceMesh,
}

impl FaceElement {
    /// Distinct contributing element ids in first-seen face order.
    pub fn source_ids(&self) -> Vec<u32> {
        let mut seen = Vec::new();
        for &source in &self.mesh.face_sources {
            if !seen.contains(&source) {
                seen.push(source);
            }
        }
        seen
    }
}

/// A reconstructed 1D member: its topology chain as an open polyline.
#[derive(Debug, Clone, Serialize)]
pub struct LinearMember {
    /// Source member id.
    pub id: u32,
    /// 1-based property id.
    pub property: u32,
    /// Topology chain with per-vertex curve intent.
    pub curve: Polyline,
}

/// A reconstructed 2D member: closed boundary with voids and inclusions.
#[derive(Debug, Clone, Serialize)]
pub struct PlanarMember {
    /// Source member id.
    pub id: u32,
    /// 1-based property id.
    pub property: u32,
    /// Closed outer boundary.
    pub boundary: Polyline,
    /// Closed void loops inside the boundary.
    pub voids: Vec<Polyline>,
    /// Open polylines the mesher must include.
    pub inclusion_lines: Vec<Polyline>,
    /// Standalone points the mesher must include.
    pub inclusion_points: Vec<Point3<f64>>,
}
