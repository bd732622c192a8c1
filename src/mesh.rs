//! Triangle mesh representation

use crate::BBox3;
use nalgebra::Vector3;

mod io; // STL I/O implementation
mod math; // Mesh math helpers
pub use io::{parse_stl, ParseOptions, DEFAULT_UPLOAD_LIMIT_BYTES, FACET_SIZE, HEADER_SIZE};
pub use math::{analyze_geometry, GeometryReport};

/// One triangular face: the normal stored in the file plus three vertices
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Facet {
    pub normal: Vector3<f32>,
    pub vertices: [Vector3<f32>; 3],
}

impl Facet {
    pub fn new(normal: Vector3<f32>, v0: Vector3<f32>, v1: Vector3<f32>, v2: Vector3<f32>) -> Self {
        Self {
            normal,
            vertices: [v0, v1, v2],
        }
    }

    /// Build a facet whose stored normal is the unit geometric normal of its winding
    ///
    /// Degenerate triangles get a zero normal.
    pub fn from_vertices(v0: Vector3<f32>, v1: Vector3<f32>, v2: Vector3<f32>) -> Self {
        let cross = (v1 - v0).cross(&(v2 - v0));
        let normal = if cross.norm() > 1e-10 {
            cross.normalize()
        } else {
            Vector3::zeros()
        };
        Self::new(normal, v0, v1, v2)
    }

    /// Same vertices with the stored normal flipped
    pub fn flipped_normal(&self) -> Self {
        Self {
            normal: -self.normal,
            vertices: self.vertices,
        }
    }
}

/// Triangle mesh
///
/// An ordered sequence of facets as read from a binary STL file.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Mesh {
    facets: Vec<Facet>,
}

impl Mesh {
    /// Create an empty mesh
    pub fn new() -> Self {
        Self { facets: Vec::new() }
    }

    /// Create an empty mesh with room for `count` facets
    pub fn with_capacity(count: usize) -> Self {
        Self {
            facets: Vec::with_capacity(count),
        }
    }

    pub fn from_facets(facets: Vec<Facet>) -> Self {
        Self { facets }
    }

    /// Create a closed box mesh from a bounding box, normals pointing outward
    ///
    /// # Example
    ///
    /// ```rust
    /// use stl_quote::{BBox3, Mesh};
    /// use nalgebra::Vector3;
    ///
    /// let cube = Mesh::from_bbox(&BBox3::new(Vector3::zeros(), Vector3::repeat(1.0)));
    /// assert_eq!(cube.facet_count(), 12);
    /// ```
    pub fn from_bbox(bbox: &BBox3) -> Self {
        let min = bbox.min().cast::<f32>();
        let max = bbox.max().cast::<f32>();

        let vertices = [
            Vector3::new(min.x, min.y, min.z),
            Vector3::new(min.x, min.y, max.z),
            Vector3::new(min.x, max.y, min.z),
            Vector3::new(min.x, max.y, max.z),
            Vector3::new(max.x, min.y, min.z),
            Vector3::new(max.x, min.y, max.z),
            Vector3::new(max.x, max.y, min.z),
            Vector3::new(max.x, max.y, max.z),
        ];

        let mut mesh = Mesh::with_capacity(12);
        let mut add_tri = |normal: Vector3<f32>, a: usize, b: usize, c: usize| {
            mesh.add_facet(Facet::new(normal, vertices[a], vertices[b], vertices[c]));
        };

        // -X face
        add_tri(-Vector3::x(), 0, 1, 3);
        add_tri(-Vector3::x(), 0, 3, 2);

        // +X face
        add_tri(Vector3::x(), 4, 6, 7);
        add_tri(Vector3::x(), 4, 7, 5);

        // -Z face
        add_tri(-Vector3::z(), 0, 2, 6);
        add_tri(-Vector3::z(), 0, 6, 4);

        // +Z face
        add_tri(Vector3::z(), 1, 5, 7);
        add_tri(Vector3::z(), 1, 7, 3);

        // +Y face
        add_tri(Vector3::y(), 2, 3, 7);
        add_tri(Vector3::y(), 2, 7, 6);

        // -Y face
        add_tri(-Vector3::y(), 0, 4, 5);
        add_tri(-Vector3::y(), 0, 5, 1);

        mesh
    }

    /// Add a facet, returning its index
    pub fn add_facet(&mut self, facet: Facet) -> usize {
        self.facets.push(facet);
        self.facets.len() - 1
    }

    pub fn facet_count(&self) -> usize {
        self.facets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.facets.is_empty()
    }

    pub fn get_facet(&self, index: usize) -> Option<&Facet> {
        self.facets.get(index)
    }

    pub fn facets(&self) -> &[Facet] {
        &self.facets
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Facet> {
        self.facets.iter()
    }

    /// Size in bytes of this mesh in the binary STL layout
    pub fn stl_byte_len(&self) -> usize {
        HEADER_SIZE + 4 + FACET_SIZE * self.facets.len()
    }
}

impl<'a> IntoIterator for &'a Mesh {
    type Item = &'a Facet;
    type IntoIter = std::slice::Iter<'a, Facet>;

    fn into_iter(self) -> Self::IntoIter {
        self.facets.iter()
    }
}

impl FromIterator<Facet> for Mesh {
    fn from_iter<I: IntoIterator<Item = Facet>>(iter: I) -> Self {
        Self {
            facets: iter.into_iter().collect(),
        }
    }
}
