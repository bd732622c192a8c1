//! Upload analysis: bytes in, priced geometry out

use crate::error::{Error, ValidationError};
use crate::format::{format_dimensions, format_volume, format_weight};
use crate::material::Material;
use crate::mesh::{parse_stl, Mesh, ParseOptions};
use crate::pricing::{PricingPolicy, Quote};
use crate::{BoundingBox, Result};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Physical quantities derived from one uploaded mesh
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AnalysisResult {
    /// Printed-material volume after infill and safety scaling (mm³)
    pub volume: f64,
    /// Clamped printed weight (g)
    pub weight: f64,
    pub bounding_box: BoundingBox,
    /// Total facet area (mm²)
    pub surface_area: f64,
    /// Absolute enclosed mesh volume before scaling (mm³)
    pub mesh_volume: f64,
    pub facet_count: usize,
    pub material: Material,
}

impl AnalysisResult {
    /// Price `quantity` prints with the default policy
    pub fn cost(&self, quantity: u32) -> f64 {
        self.quote(quantity, &PricingPolicy::default()).total
    }

    pub fn quote(&self, quantity: u32, policy: &PricingPolicy) -> Quote {
        Quote::new(
            policy.unit_cost_for(self.weight, self.material.profile()),
            quantity,
        )
    }

    /// One-line human-readable summary
    pub fn summary(&self) -> String {
        let profile = self.material.profile();
        format!(
            "{} facets, {} {} (density {}), weight {}, printed volume {}, mesh volume {}, surface {:.1} mm²",
            self.facet_count,
            format_dimensions(&self.bounding_box),
            profile.name,
            profile.density,
            format_weight(self.weight),
            format_volume(self.volume),
            format_volume(self.mesh_volume),
            self.surface_area,
        )
    }
}

/// Analyze an already-parsed mesh
///
/// The material is resolved before any geometry work.
pub fn analyze_mesh(
    mesh: &Mesh,
    material_id: &str,
    policy: &PricingPolicy,
) -> std::result::Result<AnalysisResult, ValidationError> {
    let material: Material = material_id.parse()?;
    Ok(analyze_resolved(mesh, material, policy))
}

pub(crate) fn analyze_resolved(
    mesh: &Mesh,
    material: Material,
    policy: &PricingPolicy,
) -> AnalysisResult {
    let report = mesh.analyze();
    let mesh_volume = report.volume();

    AnalysisResult {
        volume: policy.effective_volume(mesh_volume),
        weight: policy.weight_for(mesh_volume, material.profile()),
        bounding_box: report.bounding_box(),
        surface_area: report.surface_area,
        mesh_volume,
        facet_count: report.facet_count,
        material,
    }
}

/// Parse a binary STL buffer and analyze it with the default pricing policy
///
/// # Example
///
/// ```rust
/// use stl_quote::{analyze_stl, BBox3, Mesh, ParseOptions};
/// use nalgebra::Vector3;
///
/// let bytes = Mesh::from_bbox(&BBox3::new(Vector3::zeros(), Vector3::repeat(1.0))).to_stl_bytes();
/// let result = analyze_stl(&bytes, "pla", &ParseOptions::default())?;
/// assert_eq!(result.weight, 2.0);
/// assert_eq!(result.cost(1), 18.0);
/// # Ok::<(), stl_quote::Error>(())
/// ```
pub fn analyze_stl(bytes: &[u8], material_id: &str, options: &ParseOptions) -> Result<AnalysisResult> {
    analyze_stl_with_policy(bytes, material_id, options, &PricingPolicy::default())
}

pub fn analyze_stl_with_policy(
    bytes: &[u8],
    material_id: &str,
    options: &ParseOptions,
    policy: &PricingPolicy,
) -> Result<AnalysisResult> {
    // Reject the material before decoding anything
    let material: Material = material_id.parse().map_err(Error::from)?;
    let mesh = parse_stl(bytes, options)?;
    Ok(analyze_resolved(&mesh, material, policy))
}
