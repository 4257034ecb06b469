// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Face mesh data structures
//!
//! Meshes carry mixed triangle/quad faces and a per-face source-element id,
//! so consolidation and splitting never lose provenance.

use nalgebra::Point3;
use rustc_hash::FxHashMap;

/// A single mesh face: triangle or quadrilateral, indices into the vertex list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Face {
    /// Triangle (i0, i1, i2)
    Tri([u32; 3]),
    /// Quadrilateral (i0, i1, i2, i3)
    Quad([u32; 4]),
}

impl Face {
    /// Vertex indices of this face.
    #[inline]
    pub fn indices(&self) -> &[u32] {
        match self {
            Face::Tri(idx) => idx,
            Face::Quad(idx) => idx,
        }
    }

    /// Rebuild the face with remapped indices.
    #[inline]
    fn remap(&self, mut map: impl FnMut(u32) -> u32) -> Face {
        match self {
            Face::Tri([a, b, c]) => Face::Tri([map(*a), map(*b), map(*c)]),
            Face::Quad([a, b, c, d]) => Face::Quad([map(*a), map(*b), map(*c), map(*d)]),
        }
    }
}

/// Mixed triangle/quad mesh with per-face provenance
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FaceMesh {
    /// Vertex positions
    pub vertices: Vec<Point3<f64>>,
    /// Faces, indices into `vertices`
    pub faces: Vec<Face>,
    /// Source element id per face, same length as `faces`
    pub face_sources: Vec<u32>,
}

impl FaceMesh {
    /// Create a new empty mesh
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mesh with capacity
    pub fn with_capacity(vertex_count: usize, face_count: usize) -> Self {
        Self {
            vertices: Vec::with_capacity(vertex_count),
            faces: Vec::with_capacity(face_count),
            face_sources: Vec::with_capacity(face_count),
        }
    }

    /// Add a vertex, returning its index
    #[inline]
    pub fn add_vertex(&mut self, position: Point3<f64>) -> u32 {
        self.vertices.push(position);
        (self.vertices.len() - 1) as u32
    }

    /// Add a triangle face attributed to a source element
    #[inline]
    pub fn add_tri(&mut self, i0: u32, i1: u32, i2: u32, source: u32) {
        self.faces.push(Face::Tri([i0, i1, i2]));
        self.face_sources.push(source);
    }

    /// Add a quad face attributed to a source element
    #[inline]
    pub fn add_quad(&mut self, i0: u32, i1: u32, i2: u32, i3: u32, source: u32) {
        self.faces.push(Face::Quad([i0, i1, i2, i3]));
        self.face_sources.push(source);
    }

    /// Get vertex count
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Get face count
    #[inline]
    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// Check if mesh is empty
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }

    /// Merge another mesh into this one
    #[inline]
    pub fn merge(&mut self, other: &FaceMesh) {
        if other.is_empty() {
            return;
        }

        let vertex_offset = self.vertices.len() as u32;

        self.vertices.reserve(other.vertices.len());
        self.faces.reserve(other.faces.len());
        self.face_sources.reserve(other.face_sources.len());

        self.vertices.extend_from_slice(&other.vertices);
        self.faces
            .extend(other.faces.iter().map(|f| f.remap(|i| i + vertex_offset)));
        self.face_sources.extend_from_slice(&other.face_sources);
    }

    /// Batch merge multiple meshes at once (more efficient than individual merges)
    pub fn merge_all(&mut self, meshes: &[FaceMesh]) {
        let total_vertices: usize = meshes.iter().map(|m| m.vertices.len()).sum();
        let total_faces: usize = meshes.iter().map(|m| m.faces.len()).sum();

        self.vertices.reserve(total_vertices);
        self.faces.reserve(total_faces);
        self.face_sources.reserve(total_faces);

        for mesh in meshes {
            self.merge(mesh);
        }
    }

    /// Total surface area (quads counted as two triangles)
    pub fn area(&self) -> f64 {
        let tri_area = |a: u32, b: u32, c: u32| -> f64 {
            let p0 = self.vertices[a as usize];
            let p1 = self.vertices[b as usize];
            let p2 = self.vertices[c as usize];
            0.5 * (p1 - p0).cross(&(p2 - p0)).norm()
        };

        self.faces
            .iter()
            .map(|face| match face {
                Face::Tri([a, b, c]) => tri_area(*a, *b, *c),
                Face::Quad([a, b, c, d]) => tri_area(*a, *b, *c) + tri_area(*a, *c, *d),
            })
            .sum()
    }

    /// Calculate bounds (min, max)
    pub fn bounds(&self) -> (Point3<f64>, Point3<f64>) {
        if self.vertices.is_empty() {
            return (Point3::origin(), Point3::origin());
        }

        let mut min = Point3::new(f64::MAX, f64::MAX, f64::MAX);
        let mut max = Point3::new(f64::MIN, f64::MIN, f64::MIN);

        for p in &self.vertices {
            min.x = min.x.min(p.x);
            min.y = min.y.min(p.y);
            min.z = min.z.min(p.z);
            max.x = max.x.max(p.x);
            max.y = max.y.max(p.y);
            max.z = max.z.max(p.z);
        }

        (min, max)
    }

    /// Centroid of all vertices
    pub fn centroid(&self) -> Point3<f64> {
        if self.vertices.is_empty() {
            return Point3::origin();
        }

        let mut sum = Point3::new(0.0, 0.0, 0.0);
        for p in &self.vertices {
            sum.x += p.x;
            sum.y += p.y;
            sum.z += p.z;
        }
        let count = self.vertices.len() as f64;
        Point3::new(sum.x / count, sum.y / count, sum.z / count)
    }

    /// Split into maximal topologically-connected pieces.
    ///
    /// Vertices are welded by exact coordinate bit-pattern: all positions of a
    /// consolidated branch originate from one node table, so coincident
    /// vertices are bitwise identical. Faces sharing a welded vertex belong to
    /// the same piece. Piece order follows the first face of each component;
    /// per-face source ids travel with their faces.
    pub fn split_disjoint_pieces(&self) -> Vec<FaceMesh> {
        if self.is_empty() {
            return Vec::new();
        }

        // Weld coincident vertices into classes.
        let mut classes: FxHashMap<[u64; 3], usize> = FxHashMap::default();
        let weld: Vec<usize> = self
            .vertices
            .iter()
            .map(|p| {
                let key = [p.x.to_bits(), p.y.to_bits(), p.z.to_bits()];
                let next = classes.len();
                *classes.entry(key).or_insert(next)
            })
            .collect();

        // Union welded classes across each face.
        let mut components = UnionFind::new(classes.len());
        for face in &self.faces {
            let indices = face.indices();
            let first = weld[indices[0] as usize];
            for &i in &indices[1..] {
                components.union(first, weld[i as usize]);
            }
        }

        // Emit one compact mesh per component, in first-face order.
        let mut piece_of_root: FxHashMap<usize, usize> = FxHashMap::default();
        let mut pieces: Vec<FaceMesh> = Vec::new();
        let mut vertex_maps: Vec<FxHashMap<u32, u32>> = Vec::new();

        for (face, &source) in self.faces.iter().zip(&self.face_sources) {
            let root = components.find(weld[face.indices()[0] as usize]);
            let piece_index = *piece_of_root.entry(root).or_insert_with(|| {
                pieces.push(FaceMesh::new());
                vertex_maps.push(FxHashMap::default());
                pieces.len() - 1
            });

            let piece = &mut pieces[piece_index];
            let vertex_map = &mut vertex_maps[piece_index];
            let remapped = face.remap(|i| {
                *vertex_map
                    .entry(i)
                    .or_insert_with(|| piece.add_vertex(self.vertices[i as usize]))
            });
            piece.faces.push(remapped);
            piece.face_sources.push(source);
        }

        pieces
    }

    /// Clear the mesh
    #[inline]
    pub fn clear(&mut self) {
        self.vertices.clear();
        self.faces.clear();
        self.face_sources.clear();
    }
}

/// Union-find over welded vertex classes, path-halving with union by size.
struct UnionFind {
    parent: Vec<usize>,
    size: Vec<usize>,
}

impl UnionFind {
    fn new(count: usize) -> Self {
        Self {
            parent: (0..count).collect(),
            size: vec![1; count],
        }
    }

    fn find(&mut self, mut x: usize) -> usize {
        while self.parent[x] != x {
            self.parent[x] = self.parent[self.parent[x]];
            x = self.parent[x];
        }
        x
    }

    fn union(&mut self, a: usize, b: usize) {
        let (mut ra, mut rb) = (self.find(a), self.find(b));
        if ra == rb {
            return;
        }
        if self.size[ra] < self.size[rb] {
            std::mem::swap(&mut ra, &mut rb);
        }
        self.parent[rb] = ra;
        self.size[ra] += self.size[rb];
    }
}
