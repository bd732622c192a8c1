//! Binary STL I/O support for Mesh
//!
//! Layout:
//!
//! | bytes   | content                                        |
//! |---------|------------------------------------------------|
//! | 0..80   | opaque header                                  |
//! | 80..84  | facet count, u32 little-endian                 |
//! | 84..    | 50 bytes per facet: normal, 3 vertices, u16    |

use super::{Facet, Mesh};
use crate::error::ParseError;
use crate::Result;
use nalgebra::Vector3;
use std::fs;
use std::path::Path;

/// Size of the opaque header
pub const HEADER_SIZE: usize = 80;

/// Bytes per facet: 12 little-endian f32 plus a u16 attribute
pub const FACET_SIZE: usize = 50;

/// Upload cap applied by the surrounding application (10 MiB)
pub const DEFAULT_UPLOAD_LIMIT_BYTES: usize = 10 * 1024 * 1024;

const COUNT_SIZE: usize = 4;
const ASCII_PREVIEW_LEN: usize = 1024;

/// Parser limits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ParseOptions {
    /// Reject meshes declaring more facets than this
    pub max_facets: Option<u32>,
}

impl ParseOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_facets(mut self, max_facets: u32) -> Self {
        self.max_facets = Some(max_facets);
        self
    }

    /// Facet guard matching the largest binary STL that fits in `max_bytes`
    pub fn for_upload_limit(max_bytes: usize) -> Self {
        let facets = max_bytes.saturating_sub(HEADER_SIZE + COUNT_SIZE) / FACET_SIZE;
        Self {
            max_facets: Some(u32::try_from(facets).unwrap_or(u32::MAX)),
        }
    }
}

/// Total buffer length required for `facet_count` facets
fn required_len(facet_count: u32) -> Option<usize> {
    (facet_count as usize)
        .checked_mul(FACET_SIZE)?
        .checked_add(HEADER_SIZE + COUNT_SIZE)
}

/// Read f32 in little-endian format
fn read_f32(data: &[u8], offset: usize) -> f32 {
    f32::from_le_bytes([
        data[offset],
        data[offset + 1],
        data[offset + 2],
        data[offset + 3],
    ])
}

fn read_vec3(data: &[u8], offset: usize) -> Vector3<f32> {
    Vector3::new(
        read_f32(data, offset),
        read_f32(data, offset + 4),
        read_f32(data, offset + 8),
    )
}

/// Read u32 in little-endian format
fn read_u32(data: &[u8], offset: usize) -> u32 {
    u32::from_le_bytes([
        data[offset],
        data[offset + 1],
        data[offset + 2],
        data[offset + 3],
    ])
}

/// Text STL starts with `solid`, spells out `facet`/`vertex` keywords and
/// stays printable past the header
fn looks_like_ascii(bytes: &[u8]) -> bool {
    let header = String::from_utf8_lossy(&bytes[..HEADER_SIZE]);
    if !header.trim_start().to_lowercase().starts_with("solid") {
        return false;
    }

    let preview = &bytes[..bytes.len().min(ASCII_PREVIEW_LEN)];
    let Some(preview) = preview_text(preview) else {
        return false;
    };
    if preview.chars().any(|c| c.is_control() && !c.is_whitespace()) {
        return false;
    }

    let preview = preview.to_lowercase();
    preview.contains("facet") && preview.contains("vertex")
}

/// Decode the preview as UTF-8, tolerating a character cut at the end
fn preview_text(preview: &[u8]) -> Option<&str> {
    match std::str::from_utf8(preview) {
        Ok(text) => Some(text),
        Err(err) if err.error_len().is_none() => {
            std::str::from_utf8(&preview[..err.valid_up_to()]).ok()
        }
        Err(_) => None,
    }
}

fn read_facet(chunk: &[u8]) -> Facet {
    Facet::new(
        read_vec3(chunk, 0),
        read_vec3(chunk, 12),
        read_vec3(chunk, 24),
        read_vec3(chunk, 36),
    )
}

/// Decode a binary STL buffer into a mesh
///
/// Bytes after the last declared facet are ignored.
///
/// # Example
///
/// ```rust
/// use stl_quote::{parse_stl, BBox3, Mesh, ParseOptions};
/// use nalgebra::Vector3;
///
/// let bytes = Mesh::from_bbox(&BBox3::new(Vector3::zeros(), Vector3::repeat(1.0))).to_stl_bytes();
/// let mesh = parse_stl(&bytes, &ParseOptions::new().with_max_facets(1000))?;
/// assert_eq!(mesh.facet_count(), 12);
/// # Ok::<(), stl_quote::ParseError>(())
/// ```
pub fn parse_stl(bytes: &[u8], options: &ParseOptions) -> std::result::Result<Mesh, ParseError> {
    if bytes.len() < HEADER_SIZE + COUNT_SIZE {
        return Err(ParseError::UnsupportedFormat(format!(
            "{} bytes is too short for a binary STL header",
            bytes.len()
        )));
    }

    let declared = read_u32(bytes, HEADER_SIZE);
    let expected = required_len(declared);

    // A text file decodes to a nonsense count that never fits the buffer
    let fits = expected.is_some_and(|len| bytes.len() >= len);
    if !fits && looks_like_ascii(bytes) {
        return Err(ParseError::UnsupportedFormat(
            "ASCII STL is not supported".to_string(),
        ));
    }

    if declared == 0 {
        return Err(ParseError::EmptyMesh);
    }

    if let Some(limit) = options.max_facets {
        if declared > limit {
            return Err(ParseError::TooLarge { declared, limit });
        }
    }

    let expected = match expected {
        Some(len) if bytes.len() >= len => len,
        _ => {
            return Err(ParseError::TruncatedFile {
                expected: expected.unwrap_or(usize::MAX),
                actual: bytes.len(),
            })
        }
    };

    let mut mesh = Mesh::with_capacity(declared as usize);
    for chunk in bytes[HEADER_SIZE + COUNT_SIZE..expected].chunks_exact(FACET_SIZE) {
        mesh.add_facet(read_facet(chunk));
    }
    debug_assert_eq!(mesh.facet_count(), declared as usize);

    Ok(mesh)
}

impl Mesh {
    /// Decode a binary STL buffer with default options
    pub fn from_stl_bytes(bytes: &[u8]) -> std::result::Result<Self, ParseError> {
        parse_stl(bytes, &ParseOptions::default())
    }

    /// Encode the mesh in the binary STL layout
    ///
    /// Stored normals are written verbatim and the attribute field is zero.
    pub fn to_stl_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.stl_byte_len());

        let mut header = String::from("stl-quote binary STL");
        header.truncate(HEADER_SIZE);
        while header.len() < HEADER_SIZE {
            header.push(' ');
        }
        bytes.extend_from_slice(header.as_bytes());
        bytes.extend_from_slice(&(self.facet_count() as u32).to_le_bytes());

        for facet in self.facets() {
            write_vec3(&mut bytes, &facet.normal);
            for vertex in &facet.vertices {
                write_vec3(&mut bytes, vertex);
            }
            bytes.extend_from_slice(&[0u8, 0u8]);
        }

        bytes
    }

    /// Load a mesh from a binary STL file
    ///
    /// ```rust,no_run
    /// use stl_quote::{Mesh, ParseOptions};
    ///
    /// let mesh = Mesh::load_stl("part.stl", &ParseOptions::default())?;
    /// # Ok::<(), stl_quote::Error>(())
    /// ```
    pub fn load_stl<P: AsRef<Path>>(path: P, options: &ParseOptions) -> Result<Self> {
        let bytes = fs::read(path)?;
        Ok(parse_stl(&bytes, options)?)
    }

    /// Save the mesh to a binary STL file
    pub fn save_stl<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        fs::write(path, self.to_stl_bytes())?;
        Ok(())
    }
}

/// Write f32 triple in little-endian format
fn write_vec3(bytes: &mut Vec<u8>, v: &Vector3<f32>) {
    for value in [v.x, v.y, v.z] {
        bytes.extend_from_slice(&value.to_le_bytes());
    }
}
