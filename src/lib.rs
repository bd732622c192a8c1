//! # stl-quote
//!
//! Binary STL analysis and print-cost estimation.
//!
//! An uploaded mesh is decoded into facets, measured (bounding box, surface
//! area, enclosed volume) and converted into a printed weight and price for a
//! filament. Everything here is a pure function of the input bytes: no state
//! survives between calls and nothing touches the filesystem unless asked to.
//!
//! ## Example
//!
//! ```rust
//! use stl_quote::{analyze_stl, cost, BBox3, Mesh, ParseOptions};
//! use nalgebra::Vector3;
//!
//! // 20 mm cube
//! let bytes = Mesh::from_bbox(&BBox3::new(Vector3::zeros(), Vector3::repeat(20.0))).to_stl_bytes();
//!
//! let result = analyze_stl(&bytes, "petg", &ParseOptions::for_upload_limit(10 << 20))?;
//! let price = cost(result.weight, "petg", 3)?;
//! assert!(price > 0.0);
//! # Ok::<(), stl_quote::Error>(())
//! ```

pub mod analysis;
pub mod error;
pub mod format;
pub mod log;
pub mod material;
pub mod mesh;
pub mod pricing;
pub mod types;
pub mod utils;

// Re-exports
pub use analysis::{analyze_mesh, analyze_stl, analyze_stl_with_policy, AnalysisResult};
pub use error::{Error, ParseError, Result, ValidationError};
pub use format::{format_dimensions, format_price, format_volume, format_weight};
pub use log::LogFile;
pub use material::{lookup, Material, MaterialProfile, MATERIALS};
pub use mesh::{
    analyze_geometry, parse_stl, Facet, GeometryReport, Mesh, ParseOptions,
    DEFAULT_UPLOAD_LIMIT_BYTES,
};
pub use pricing::{
    cost, weight, ManufacturingType, PricingBreakdown, PricingPolicy, Quote, INFILL_FRACTION,
    MAX_WEIGHT_G, MIN_WEIGHT_G, RATE_PER_GRAM, SAFETY_MULTIPLIER,
};
pub use types::{BBox3, BoundingBox};
pub use utils::{TempFolder, Utils};
