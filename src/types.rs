//! Basic types for stl-quote

use nalgebra::Vector3;
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Axis-aligned extents of a mesh in millimeters
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BoundingBox {
    pub width: f64,
    pub height: f64,
    pub depth: f64,
}

impl BoundingBox {
    pub fn new(width: f64, height: f64, depth: f64) -> Self {
        Self {
            width,
            height,
            depth,
        }
    }

    /// Volume of the box itself, not of the enclosed mesh
    pub fn volume(&self) -> f64 {
        self.width * self.height * self.depth
    }

    /// Longest of the three extents
    pub fn max_extent(&self) -> f64 {
        self.width.max(self.height).max(self.depth)
    }
}

impl From<&BBox3> for BoundingBox {
    fn from(bbox: &BBox3) -> Self {
        let size = bbox.size();
        Self::new(size.x, size.y, size.z)
    }
}

/// 3D Bounding Box accumulated from running per-axis min/max
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BBox3 {
    min: Vector3<f64>,
    max: Vector3<f64>,
}

impl BBox3 {
    /// Create a new bounding box
    pub fn new(min: Vector3<f64>, max: Vector3<f64>) -> Self {
        debug_assert!(min.x <= max.x);
        debug_assert!(min.y <= max.y);
        debug_assert!(min.z <= max.z);
        Self { min, max }
    }

    /// Create an empty bounding box
    pub fn empty() -> Self {
        Self {
            min: Vector3::repeat(f64::MAX),
            max: Vector3::repeat(f64::MIN),
        }
    }

    /// Get minimum corner
    pub fn min(&self) -> Vector3<f64> {
        self.min
    }

    /// Get maximum corner
    pub fn max(&self) -> Vector3<f64> {
        self.max
    }

    /// Get the size of the bounding box
    ///
    /// An empty box has zero size rather than a negative one.
    pub fn size(&self) -> Vector3<f64> {
        if self.is_empty() {
            return Vector3::zeros();
        }
        self.max - self.min
    }

    /// Get the center of the bounding box
    pub fn center(&self) -> Vector3<f64> {
        if self.is_empty() {
            return Vector3::zeros();
        }
        (self.min + self.max) * 0.5
    }

    /// Check if the bounding box is empty
    pub fn is_empty(&self) -> bool {
        self.min.x > self.max.x || self.min.y > self.max.y || self.min.z > self.max.z
    }

    /// Check if a point is inside the bounding box
    pub fn contains(&self, point: Vector3<f64>) -> bool {
        point.x >= self.min.x
            && point.x <= self.max.x
            && point.y >= self.min.y
            && point.y <= self.max.y
            && point.z >= self.min.z
            && point.z <= self.max.z
    }

    /// Expand the bounding box to include a point
    pub fn include_point(&mut self, point: Vector3<f64>) {
        self.min.x = self.min.x.min(point.x);
        self.min.y = self.min.y.min(point.y);
        self.min.z = self.min.z.min(point.z);
        self.max.x = self.max.x.max(point.x);
        self.max.y = self.max.y.max(point.y);
        self.max.z = self.max.z.max(point.z);
    }

    /// Expand the bounding box to include another bounding box
    pub fn include_bbox(&mut self, other: &BBox3) {
        if other.is_empty() {
            return;
        }
        self.include_point(other.min());
        self.include_point(other.max());
    }

    /// Width/height/depth view of this box
    pub fn dimensions(&self) -> BoundingBox {
        BoundingBox::from(self)
    }
}

impl Default for BBox3 {
    fn default() -> Self {
        Self::empty()
    }
}

impl fmt::Display for BBox3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "<Min: <{:.2}, {:.2}, {:.2}> | Max: <{:.2}, {:.2}, {:.2}>>",
            self.min.x, self.min.y, self.min.z, self.max.x, self.max.y, self.max.z
        )
    }
}
