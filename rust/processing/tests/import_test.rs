// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! End-to-end reconstruction over a small mixed model.

use approx::assert_relative_eq;
use stria_geometry::Point3;
use stria_model::{Element, EndRelease, Member, MemberKind, Model, Node, Selection};
use stria_processing::{
    build_elements, build_members, extract_nodes, ElementOptions, MemberOptions,
};

/// A 2x1 quad strip (ids 1-2, property 1), a detached quad (id 4,
/// property 1), a released beam (id 6, property 3) and two members: a
/// three-span beam and a slab with one void and an inclusion point.
fn sample_model() -> Model {
    let mut model = Model::new();

    for (id, x, y) in [
        (1, 0.0, 0.0),
        (2, 1.0, 0.0),
        (3, 2.0, 0.0),
        (4, 0.0, 1.0),
        (5, 1.0, 1.0),
        (6, 2.0, 1.0),
        (11, 8.0, 0.0),
        (12, 9.0, 0.0),
        (13, 9.0, 1.0),
        (14, 8.0, 1.0),
        (21, 4.0, 4.0),
        (22, 5.0, 4.5),
    ] {
        model.add_node(Node::new(id, x, y, 0.0));
    }

    model.add_element(Element::new(1, &[1, 2, 5, 4], 1));
    model.add_element(Element::new(2, &[2, 3, 6, 5], 1));
    model.add_element(Element::new(4, &[11, 12, 13, 14], 1));

    let pinned = EndRelease {
        yy: true,
        zz: true,
        ..EndRelease::FIXED
    };
    model.add_element(Element::with_releases(
        6,
        &[1, 3],
        3,
        pinned,
        EndRelease::FIXED,
    ));

    model.add_member(Member::new(1, "1 2 A 3 6", MemberKind::Beam, 2));
    model.add_member(Member::new(
        2,
        "1 3 6 4 V(2 5) P 21 P(22)",
        MemberKind::Slab,
        4,
    ));

    model
}

#[test]
fn node_extraction_spans_to_max_id() {
    let model = sample_model();
    let nodes = extract_nodes(&model, &Selection::All);

    assert_eq!(nodes.len(), 22);
    assert_eq!(nodes[0].unwrap().position, Point3::new(0.0, 0.0, 0.0));
    assert!(nodes[6].is_none()); // id 7 is a gap
    assert_eq!(nodes[21].unwrap().id, 22);
}

#[test]
fn joined_elements_split_by_connectivity() {
    let model = sample_model();
    let output = build_elements(&model, &ElementOptions::default());

    // Property 1 → branch 0: the strip fuses into one piece, the detached
    // quad stays separate. Provenance lists both strip elements.
    let pieces: Vec<_> = output.faces.branch_values(0).collect();
    assert_eq!(pieces.len(), 2);
    assert_eq!(pieces[0].source_ids(), vec![1, 2]);
    assert_eq!(pieces[1].source_ids(), vec![4]);

    // The fused piece covers both unit quads.
    assert_relative_eq!(pieces[0].mesh.area(), 2.0, epsilon = 1e-12);

    // Property 3 → branch 2 holds the beam with its releases intact.
    let beams: Vec<_> = output.lines.branch_values(2).collect();
    assert_eq!(beams.len(), 1);
    assert!(beams[0].release_start.yy);
    assert!(!beams[0].release_end.any());
    assert_relative_eq!(beams[0].segment.length(), 2.0);
}

#[test]
fn unjoined_elements_keep_source_slots() {
    let model = sample_model();
    let options = ElementOptions {
        selection: Selection::Ids(vec![2, 6]),
        join: false,
    };
    let output = build_elements(&model, &options);

    // Highest selected id is 6: both outputs expose six slots in branch 0.
    let faces = output.faces.branch(0).unwrap();
    let lines = output.lines.branch(0).unwrap();
    assert_eq!(faces.len(), 6);
    assert_eq!(lines.len(), 6);

    assert!(faces[1].is_some()); // element 2 at slot 1
    assert!(lines[5].is_some()); // element 6 at slot 5
    assert_eq!(faces.iter().filter(|slot| slot.is_some()).count(), 1);
    assert_eq!(lines.iter().filter(|slot| slot.is_some()).count(), 1);
}

#[test]
fn members_reconstruct_boundaries_and_inclusions() {
    let model = sample_model();
    let output = build_members(&model, &MemberOptions::default());

    // Beam member: property 2 → branch 1, open chain, arc intent on the
    // second vertex.
    let beams: Vec<_> = output.linear.branch_values(1).collect();
    assert_eq!(beams.len(), 1);
    let curve = &beams[0].curve;
    assert!(!curve.closed);
    assert_eq!(curve.len(), 4);
    assert!(curve.has_arcs());

    // Slab member: property 4 → branch 3, closed boundary, one void loop,
    // two inclusion points (group then standalone encounter order).
    let slabs: Vec<_> = output.planar.branch_values(3).collect();
    assert_eq!(slabs.len(), 1);
    let slab = slabs[0];
    assert!(slab.boundary.closed);
    assert_eq!(slab.boundary.len(), 4);
    assert_eq!(slab.voids.len(), 1);
    assert_eq!(slab.voids[0].len(), 2);
    assert_eq!(
        slab.inclusion_points,
        vec![Point3::new(5.0, 4.5, 0.0), Point3::new(4.0, 4.0, 0.0)]
    );
}

#[test]
fn selection_ranges_filter_members() {
    let model = sample_model();
    let options = MemberOptions {
        selection: "2 to 2".parse().unwrap(),
        graft: true,
    };
    let output = build_members(&model, &options);

    assert!(output.linear.is_empty());
    assert_eq!(output.planar.branch_values(3).count(), 1);
}

#[test]
fn line_records_serialize() {
    let model = sample_model();
    let output = build_elements(&model, &ElementOptions::default());
    let beam = output.lines.branch_values(2).next().unwrap();

    let json = serde_json::to_value(beam).unwrap();
    assert_eq!(json["id"], 6);
    assert_eq!(json["release_start"]["yy"], true);
}
