// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Element tessellation
//!
//! Topology length classifies an element exactly once into a closed shape
//! set; every downstream dispatch goes through [`ElementShape`] instead of
//! re-inferring from a length at each call site.
//!
//! Quadratic faces (6/8 nodes) gain a centroid vertex and are fanned into
//! triangles or quads around it, alternating corner and midside nodes.

use nalgebra::Point3;
use smallvec::SmallVec;

use crate::error::{Error, Result};
use crate::mesh::FaceMesh;

/// Closed shape set for analysis elements, decided by topology length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ElementShape {
    /// 2-node bar/beam
    Segment,
    /// 3-node linear triangle
    Tri,
    /// 4-node linear quadrilateral
    Quad,
    /// 6-node quadratic triangle (corners then midsides)
    Tri6,
    /// 8-node quadratic quadrilateral (corners then midsides)
    Quad8,
}

impl ElementShape {
    /// Classify a topology length, rejecting anything outside {2, 3, 4, 6, 8}.
    pub fn classify(topology_len: usize) -> Result<Self> {
        match topology_len {
            2 => Ok(ElementShape::Segment),
            3 => Ok(ElementShape::Tri),
            4 => Ok(ElementShape::Quad),
            6 => Ok(ElementShape::Tri6),
            8 => Ok(ElementShape::Quad8),
            other => Err(Error::UnsupportedTopology(other)),
        }
    }

    /// Number of topology vertices the shape expects.
    pub fn vertex_count(&self) -> usize {
        match self {
            ElementShape::Segment => 2,
            ElementShape::Tri => 3,
            ElementShape::Quad => 4,
            ElementShape::Tri6 => 6,
            ElementShape::Quad8 => 8,
        }
    }

    /// True for the 1D path.
    pub fn is_linear(&self) -> bool {
        matches!(self, ElementShape::Segment)
    }
}

/// A straight 1D segment between two resolved node positions.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Segment {
    pub start: Point3<f64>,
    pub end: Point3<f64>,
}

impl Segment {
    /// Segment length.
    pub fn length(&self) -> f64 {
        (self.end - self.start).norm()
    }
}

/// Build a 1D segment from exactly two resolved positions.
///
/// The caller must already have classified the element as
/// [`ElementShape::Segment`]; any other position count is rejected.
pub fn build_segment(positions: &[Point3<f64>]) -> Result<Segment> {
    if positions.len() != 2 {
        return Err(Error::PositionCountMismatch {
            expected: 2,
            actual: positions.len(),
        });
    }
    Ok(Segment {
        start: positions[0],
        end: positions[1],
    })
}

/// Tessellate a 2D element into a face mesh attributed to `source`.
///
/// - `Tri`/`Quad`: one direct face over the given vertices.
/// - `Tri6`: centroid appended as vertex 6, six triangles fanned
///   corner/midside around it.
/// - `Quad8`: centroid appended as vertex 8, four quads fanned around it.
pub fn tessellate_face(
    shape: ElementShape,
    positions: &[Point3<f64>],
    source: u32,
) -> Result<FaceMesh> {
    if shape.is_linear() {
        return Err(Error::SegmentTopology);
    }
    if positions.len() != shape.vertex_count() {
        return Err(Error::PositionCountMismatch {
            expected: shape.vertex_count(),
            actual: positions.len(),
        });
    }

    let mut vertices: SmallVec<[Point3<f64>; 9]> = SmallVec::from_slice(positions);
    if matches!(shape, ElementShape::Tri6 | ElementShape::Quad8) {
        vertices.push(centroid(positions));
    }

    let mut mesh = FaceMesh::with_capacity(vertices.len(), 6);
    for position in &vertices {
        mesh.add_vertex(*position);
    }

    match shape {
        ElementShape::Tri => mesh.add_tri(0, 1, 2, source),
        ElementShape::Quad => mesh.add_quad(0, 1, 2, 3, source),
        ElementShape::Tri6 => {
            mesh.add_tri(0, 3, 6, source);
            mesh.add_tri(3, 1, 6, source);
            mesh.add_tri(1, 4, 6, source);
            mesh.add_tri(4, 2, 6, source);
            mesh.add_tri(2, 5, 6, source);
            mesh.add_tri(5, 0, 6, source);
        }
        ElementShape::Quad8 => {
            mesh.add_quad(0, 4, 8, 7, source);
            mesh.add_quad(1, 5, 8, 4, source);
            mesh.add_quad(2, 6, 8, 5, source);
            mesh.add_quad(3, 7, 8, 6, source);
        }
        ElementShape::Segment => unreachable!("rejected above"),
    }

    Ok(mesh)
}

/// Arithmetic mean of the given vertex positions.
fn centroid(positions: &[Point3<f64>]) -> Point3<f64> {
    let mut sum = Point3::new(0.0, 0.0, 0.0);
    for p in positions {
        sum.x += p.x;
        sum.y += p.y;
        sum.z += p.z;
    }
    let count = positions.len() as f64;
    Point3::new(sum.x / count, sum.y / count, sum.z / count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::Face;
    use approx::assert_relative_eq;

    #[test]
    fn test_classify() {
        assert_eq!(ElementShape::classify(2).unwrap(), ElementShape::Segment);
        assert_eq!(ElementShape::classify(3).unwrap(), ElementShape::Tri);
        assert_eq!(ElementShape::classify(4).unwrap(), ElementShape::Quad);
        assert_eq!(ElementShape::classify(6).unwrap(), ElementShape::Tri6);
        assert_eq!(ElementShape::classify(8).unwrap(), ElementShape::Quad8);
        assert!(matches!(
            ElementShape::classify(5),
            Err(Error::UnsupportedTopology(5))
        ));
    }

    #[test]
    fn test_build_segment() {
        let segment = build_segment(&[
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(3.0, 4.0, 0.0),
        ])
        .unwrap();
        assert_relative_eq!(segment.length(), 5.0);

        assert!(build_segment(&[Point3::origin()]).is_err());
    }

    #[test]
    fn test_tri_direct_face() {
        let mesh = tessellate_face(
            ElementShape::Tri,
            &[
                Point3::new(0.0, 0.0, 0.0),
                Point3::new(1.0, 0.0, 0.0),
                Point3::new(0.0, 1.0, 0.0),
            ],
            7,
        )
        .unwrap();
        assert_eq!(mesh.faces, vec![Face::Tri([0, 1, 2])]);
        assert_eq!(mesh.face_sources, vec![7]);
        assert_eq!(mesh.vertex_count(), 3);
    }

    /// Regular hexagon, corners at even indices and midsides at odd ones in
    /// element ordering: corners first, then midsides.
    fn hexagon_tri6() -> Vec<Point3<f64>> {
        let ring: Vec<Point3<f64>> = (0..6)
            .map(|i| {
                let angle = std::f64::consts::FRAC_PI_3 * i as f64;
                Point3::new(angle.cos(), angle.sin(), 0.0)
            })
            .collect();
        // Topology order: corners 0, 2, 4 then midsides 1, 3, 5 of the ring.
        vec![ring[0], ring[2], ring[4], ring[1], ring[3], ring[5]]
    }

    #[test]
    fn test_tri6_centroid_fan() {
        let positions = hexagon_tri6();
        let mesh = tessellate_face(ElementShape::Tri6, &positions, 1).unwrap();

        assert_eq!(mesh.face_count(), 6);
        assert_eq!(mesh.vertex_count(), 7);
        // Every triangle shares the appended centroid vertex.
        for face in &mesh.faces {
            assert!(face.indices().contains(&6));
        }
        // Centroid of a regular hexagon ring is its center.
        assert_relative_eq!(mesh.vertices[6].x, 0.0, epsilon = 1e-12);
        assert_relative_eq!(mesh.vertices[6].y, 0.0, epsilon = 1e-12);

        // Fan area equals the hexagon area 3*sqrt(3)/2 * r^2.
        let expected = 3.0 * 3.0f64.sqrt() / 2.0;
        assert_relative_eq!(mesh.area(), expected, epsilon = 1e-12);
    }

    #[test]
    fn test_quad8_centroid_fan() {
        // Unit square, corners then edge midpoints.
        let positions = vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(1.0, 1.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
            Point3::new(0.5, 0.0, 0.0),
            Point3::new(1.0, 0.5, 0.0),
            Point3::new(0.5, 1.0, 0.0),
            Point3::new(0.0, 0.5, 0.0),
        ];
        let mesh = tessellate_face(ElementShape::Quad8, &positions, 3).unwrap();

        assert_eq!(mesh.face_count(), 4);
        assert_eq!(mesh.vertex_count(), 9);
        for face in &mesh.faces {
            assert!(face.indices().contains(&8));
        }
        assert_relative_eq!(mesh.area(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_position_count_mismatch() {
        let result = tessellate_face(ElementShape::Quad, &[Point3::origin()], 1);
        assert!(matches!(
            result,
            Err(Error::PositionCountMismatch {
                expected: 4,
                actual: 1
            })
        ));
    }

    #[test]
    fn test_segment_is_not_a_face() {
        let result = tessellate_face(
            ElementShape::Segment,
            &[Point3::origin(), Point3::new(1.0, 0.0, 0.0)],
            1,
        );
        assert!(matches!(result, Err(Error::SegmentTopology)));
    }
}
