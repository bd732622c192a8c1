//! Mesh math utilities

use super::{Facet, Mesh};
use crate::{BBox3, BoundingBox};
use nalgebra::Vector3;

/// Geometry derived from one pass over a mesh
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeometryReport {
    /// Extents of every vertex of every facet
    pub bbox: BBox3,
    /// Sum of triangle areas (mm²)
    pub surface_area: f64,
    /// Divergence-theorem volume using the stored normals (mm³)
    ///
    /// Negative or inaccurate when stored normals disagree with the winding.
    pub signed_volume: f64,
    pub facet_count: usize,
}

impl GeometryReport {
    pub fn bounding_box(&self) -> BoundingBox {
        self.bbox.dimensions()
    }

    /// Absolute enclosed volume (mm³)
    pub fn volume(&self) -> f64 {
        self.signed_volume.abs()
    }
}

impl Facet {
    fn vertices_f64(&self) -> [Vector3<f64>; 3] {
        self.vertices.map(|v| v.cast::<f64>())
    }

    /// Triangle area, ½·|(v1−v0)×(v2−v0)|
    ///
    /// Collinear vertices give exactly zero.
    pub fn area(&self) -> f64 {
        let [a, b, c] = self.vertices_f64();
        0.5 * (b - a).cross(&(c - a)).norm()
    }

    pub fn centroid(&self) -> Vector3<f64> {
        let [a, b, c] = self.vertices_f64();
        (a + b + c) / 3.0
    }

    /// This facet's share of the enclosed volume, ⅓·(n·c)·area with the stored normal n
    pub fn signed_volume_contribution(&self) -> f64 {
        let normal = self.normal.cast::<f64>();
        normal.dot(&self.centroid()) * self.area() / 3.0
    }
}

/// Compute bounding box, surface area and signed volume in a single pass
///
/// An empty slice yields a zero-size box and zero totals.
pub fn analyze_geometry(facets: &[Facet]) -> GeometryReport {
    let mut bbox = BBox3::empty();
    let mut surface_area = 0.0f64;
    let mut signed_volume = 0.0f64;

    for facet in facets {
        let [a, b, c] = facet.vertices_f64();
        bbox.include_point(a);
        bbox.include_point(b);
        bbox.include_point(c);

        let area = 0.5 * (b - a).cross(&(c - a)).norm();
        let centroid = (a + b + c) / 3.0;
        surface_area += area;
        signed_volume += facet.normal.cast::<f64>().dot(&centroid) * area / 3.0;
    }

    GeometryReport {
        bbox,
        surface_area,
        signed_volume,
        facet_count: facets.len(),
    }
}

impl Mesh {
    /// Compute bounding box, surface area and signed volume
    pub fn analyze(&self) -> GeometryReport {
        analyze_geometry(self.facets())
    }

    /// Compute the axis-aligned bounds of all vertices
    pub fn bounding_box(&self) -> BBox3 {
        let mut bbox = BBox3::empty();
        for facet in self {
            for vertex in &facet.vertices {
                bbox.include_point(vertex.cast::<f64>());
            }
        }
        bbox
    }

    /// Compute total surface area of the mesh
    pub fn surface_area(&self) -> f64 {
        self.iter().map(Facet::area).sum()
    }

    /// Signed volume from the stored facet normals
    pub fn signed_volume(&self) -> f64 {
        self.iter().map(Facet::signed_volume_contribution).sum()
    }

    /// Absolute volume (helper around `signed_volume`).
    pub fn volume(&self) -> f64 {
        self.signed_volume().abs()
    }
}
