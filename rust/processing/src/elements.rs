// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Element reconstruction.
//!
//! Walks the filtered element table in ascending id order, classifies each
//! entry by topology length, builds the 1D or 2D primitive and hands it to
//! the branch collection. In join mode the per-branch 2D faces are
//! consolidated into one mesh and split back into maximal connected pieces.

use stria_geometry::{build_segment, tessellate_face, ElementShape, FaceMesh};
use stria_model::{Model, Selection};
use tracing::{debug, warn};

use crate::branches::Branches;
use crate::records::{FaceElement, LineElement};

/// Options for an element reconstruction run.
#[derive(Debug, Clone)]
pub struct ElementOptions {
    /// Which element ids to process.
    pub selection: Selection,
    /// Graft per-property branches and consolidate 2D faces per branch.
    /// Off keeps gap-preserving slot placement by source id.
    pub join: bool,
}

impl Default for ElementOptions {
    fn default() -> Self {
        Self {
            selection: Selection::All,
            join: true,
        }
    }
}

/// Result of an element reconstruction run.
#[derive(Debug)]
pub struct ElementOutput {
    /// 1D line primitives with release metadata.
    pub lines: Branches<LineElement>,
    /// 2D face primitives; joined pieces in join mode.
    pub faces: Branches<FaceElement>,
}

/// Reconstruct line and face primitives from the element table.
///
/// Failures are local: an element with an unsupported topology length or
/// unresolved nodes is skipped with a warning and the run continues. An
/// empty table is zero work, not an error.
pub fn build_elements(model: &Model, options: &ElementOptions) -> ElementOutput {
    let _span = tracing::debug_span!(
        "build_elements",
        selection = %options.selection,
        join = options.join,
        table = model.elements.len(),
    )
    .entered();

    let mut ids: Vec<u32> = model
        .elements
        .keys()
        .copied()
        .filter(|id| options.selection.contains(*id))
        .collect();
    ids.sort_unstable();

    let (mut lines, mut faces) = if options.join {
        (Branches::grafted(), Branches::grafted())
    } else {
        let len = ids.last().copied().unwrap_or(0) as usize;
        (Branches::indexed(len), Branches::indexed(len))
    };

    for id in ids {
        let element = &model.elements[&id];
        let shape = match ElementShape::classify(element.topology.len()) {
            Ok(shape) => shape,
            Err(err) => {
                warn!(element = id, %err, "skipping element");
                continue;
            }
        };

        // Unresolved node ids drop out of the position list; the builders
        // reject the primitive if too few positions remain.
        let positions: Vec<_> = model
            .resolve_positions(&element.topology)
            .into_iter()
            .flatten()
            .collect();

        if shape.is_linear() {
            let segment = match build_segment(&positions) {
                Ok(segment) => segment,
                Err(err) => {
                    warn!(element = id, %err, "skipping 1D element");
                    continue;
                }
            };
            lines.place(
                element.property,
                id,
                LineElement {
                    id,
                    property: element.property,
                    segment,
                    release_start: element.releases[0],
                    release_end: element.releases[1],
                },
            );
        } else {
            let mesh = match tessellate_face(shape, &positions, id) {
                Ok(mesh) => mesh,
                Err(err) => {
                    warn!(element = id, %err, "skipping 2D element");
                    continue;
                }
            };
            faces.place(
                element.property,
                id,
                FaceElement {
                    property: element.property,
                    mesh,
                },
            );
        }
    }

    if options.join {
        join_face_branches(&mut faces);
    }

    ElementOutput { lines, faces }
}

/// Consolidate every face branch into one mesh and re-expand it into its
/// maximal connected pieces. Per-face source ids survive the round trip.
fn join_face_branches(faces: &mut Branches<FaceElement>) {
    let keys: Vec<u32> = faces.keys().collect();
    for key in keys {
        let collected: Vec<FaceMesh> = faces
            .branch_values(key)
            .map(|record| record.mesh.clone())
            .collect();
        let property = match faces.branch_values(key).next() {
            Some(record) => record.property,
            None => continue,
        };

        let mut merged = FaceMesh::new();
        merged.merge_all(&collected);
        let pieces = merged.split_disjoint_pieces();

        debug!(
            branch = key,
            input = collected.len(),
            pieces = pieces.len(),
            "joined face branch"
        );

        faces.replace_branch(
            key,
            pieces
                .into_iter()
                .map(|mesh| Some(FaceElement { property, mesh }))
                .collect(),
        );
    }
}
