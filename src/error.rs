//! Error types for stl-quote

use thiserror::Error;

/// Failures while decoding a binary STL buffer
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// Header declares zero facets
    #[error("STL header declares zero facets")]
    EmptyMesh,

    /// Buffer is shorter than the declared facet count requires
    #[error("STL file truncated: expected {expected} bytes, got {actual}")]
    TruncatedFile { expected: usize, actual: usize },

    /// Input does not match the binary STL layout
    #[error("Unsupported mesh format: {0}")]
    UnsupportedFormat(String),

    /// Declared facet count exceeds the caller's guard
    #[error("STL declares {declared} facets, limit is {limit}")]
    TooLarge { declared: u32, limit: u32 },
}

/// Failures in caller-supplied pricing inputs
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Material id is not in the material table
    #[error("Unknown material: {0}")]
    UnknownMaterial(String),

    /// On-demand orders need a positive selling price
    #[error("Selling price is required for on-demand manufacturing")]
    MissingSellingPrice,
}

/// stl-quote error types
#[derive(Error, Debug)]
pub enum Error {
    /// Mesh decoding failed
    #[error("Failed to analyze STL file: {0}")]
    Parse(#[from] ParseError),

    /// Pricing input rejected
    #[error("{0}")]
    Validation(#[from] ValidationError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for stl-quote operations
pub type Result<T> = std::result::Result<T, Error>;
