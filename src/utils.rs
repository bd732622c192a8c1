//! Utility helpers and mesh primitives

use crate::{BBox3, Mesh, Result};
use nalgebra::Vector3;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

pub struct Utils;

impl Utils {
    pub fn date_time_filename(prefix: &str, postfix: &str) -> String {
        let now = chrono::Local::now();
        format!("{}{}{}", prefix, now.format("%Y%m%d_%H%M%S"), postfix)
    }

    pub fn shorten(text: &str, max_chars: usize) -> String {
        if text.chars().count() <= max_chars {
            text.to_string()
        } else {
            text.chars().take(max_chars).collect()
        }
    }

    /// Axis-aligned box mesh of the given size with its min corner at `origin`
    pub fn msh_create_cube(size: Vector3<f64>, origin: Vector3<f64>) -> Mesh {
        Mesh::from_bbox(&BBox3::new(origin, origin + size))
    }

    /// 1 × 1 × 1 mm cube at the origin
    pub fn msh_create_unit_cube() -> Mesh {
        Self::msh_create_cube(Vector3::repeat(1.0), Vector3::zeros())
    }
}

/// Scratch directory removed on drop
pub struct TempFolder {
    path: PathBuf,
}

impl TempFolder {
    pub fn new() -> Result<Self> {
        let mut path = env::temp_dir();
        let unique = format!(
            "stl_quote_{}_{}",
            std::process::id(),
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .map(|d| d.as_nanos())
                .unwrap_or(0)
        );
        path.push(unique);
        fs::create_dir_all(&path)?;
        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for TempFolder {
    fn drop(&mut self) {
        if let Ok(entries) = fs::read_dir(&self.path) {
            for entry in entries.flatten() {
                let path = entry.path();
                if path.is_file() {
                    let _ = fs::remove_file(path);
                }
            }
        }
        let _ = fs::remove_dir(&self.path);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shorten() {
        assert_eq!(Utils::shorten("bracket.stl", 20), "bracket.stl");
        assert_eq!(Utils::shorten("bracket.stl", 7), "bracket");
    }

    #[test]
    fn test_date_time_filename() {
        let name = Utils::date_time_filename("quote_", ".log");
        assert!(name.starts_with("quote_"));
        assert!(name.ends_with(".log"));
        assert_eq!(name.len(), "quote_".len() + 15 + ".log".len());
    }

    #[test]
    fn test_temp_folder_removed_on_drop() {
        let path = {
            let tmp = TempFolder::new().unwrap();
            fs::write(tmp.path().join("part.stl"), b"x").unwrap();
            tmp.path().to_path_buf()
        };
        assert!(!path.exists());
    }

    #[test]
    fn test_cube_fixture() {
        let mesh = Utils::msh_create_cube(Vector3::new(2.0, 3.0, 4.0), Vector3::new(1.0, 1.0, 1.0));
        assert_eq!(mesh.facet_count(), 12);
        assert!((mesh.volume() - 24.0).abs() < 1e-6);
    }
}
