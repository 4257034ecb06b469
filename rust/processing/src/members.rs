// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Member reconstruction.
//!
//! Members carry their boundary as a topology string. Each entry is decoded
//! by the topology parser, its node ids resolved against the node table, and
//! the result expressed as polylines: an open chain for beam-like members, a
//! closed boundary with void loops, inclusion lines and inclusion points for
//! planar ones.

use stria_geometry::{CurveKind, Point3, Polyline};
use stria_model::{parse_topology, Model, Selection, TopoChain};
use tracing::warn;

use crate::branches::Branches;
use crate::records::{LinearMember, PlanarMember};

/// Options for a member reconstruction run.
#[derive(Debug, Clone)]
pub struct MemberOptions {
    /// Which member ids to process.
    pub selection: Selection,
    /// Graft one branch per property; off keeps gap-preserving slot
    /// placement by source id.
    pub graft: bool,
}

impl Default for MemberOptions {
    fn default() -> Self {
        Self {
            selection: Selection::All,
            graft: true,
        }
    }
}

/// Result of a member reconstruction run.
#[derive(Debug)]
pub struct MemberOutput {
    /// Beam-like members as open polylines.
    pub linear: Branches<LinearMember>,
    /// Planar members with voids and inclusions.
    pub planar: Branches<PlanarMember>,
}

/// Reconstruct members from the member table.
///
/// A malformed topology string skips that member with a warning; the rest of
/// the table is still processed.
pub fn build_members(model: &Model, options: &MemberOptions) -> MemberOutput {
    let _span = tracing::debug_span!(
        "build_members",
        selection = %options.selection,
        graft = options.graft,
        table = model.members.len(),
    )
    .entered();

    let mut ids: Vec<u32> = model
        .members
        .keys()
        .copied()
        .filter(|id| options.selection.contains(*id))
        .collect();
    ids.sort_unstable();

    let (mut linear, mut planar) = if options.graft {
        (Branches::grafted(), Branches::grafted())
    } else {
        let len = ids.last().copied().unwrap_or(0) as usize;
        (Branches::indexed(len), Branches::indexed(len))
    };

    for id in ids {
        let member = &model.members[&id];
        let parsed = match parse_topology(&member.topology) {
            Ok(parsed) => parsed,
            Err(err) => {
                warn!(member = id, %err, "skipping member with malformed topology");
                continue;
            }
        };

        let (points, kinds) = resolve_chain(model, id, &parsed.outline_chain());

        if member.kind.is_linear() {
            linear.place(
                member.property,
                id,
                LinearMember {
                    id,
                    property: member.property,
                    curve: Polyline::open(points, kinds),
                },
            );
        } else {
            let voids = parsed
                .voids
                .iter()
                .map(|chain| {
                    let (points, kinds) = resolve_chain(model, id, chain);
                    Polyline::closed(points, kinds)
                })
                .collect();
            let inclusion_lines = parsed
                .inclusion_lines
                .iter()
                .map(|chain| {
                    let (points, kinds) = resolve_chain(model, id, chain);
                    Polyline::open(points, kinds)
                })
                .collect();
            let inclusion_points: Vec<Point3<f64>> = model
                .resolve_positions(&parsed.inclusion_points)
                .into_iter()
                .flatten()
                .collect();

            planar.place(
                member.property,
                id,
                PlanarMember {
                    id,
                    property: member.property,
                    boundary: Polyline::closed(points, kinds),
                    voids,
                    inclusion_lines,
                    inclusion_points,
                },
            );
        }
    }

    MemberOutput { linear, planar }
}

/// Resolve a parsed chain to positions with parallel curve kinds.
///
/// An unresolved id drops both the point and its kind so the two sequences
/// stay in step.
fn resolve_chain(model: &Model, member: u32, chain: &TopoChain) -> (Vec<Point3<f64>>, Vec<CurveKind>) {
    let mut points = Vec::with_capacity(chain.len());
    let mut kinds = Vec::with_capacity(chain.len());
    for (&id, &arc) in chain.ids.iter().zip(&chain.arcs) {
        match model.nodes.get(&id) {
            Some(node) => {
                points.push(node.position);
                kinds.push(CurveKind::from_arc_flag(arc));
            }
            None => warn!(member, node = id, "unresolved node in member chain"),
        }
    }
    (points, kinds)
}
