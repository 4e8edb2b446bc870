//! Point types for the two coordinate spaces of the pipeline.

use serde::{Deserialize, Serialize};
use std::ops::{Add, Sub};

/// A point on the floor plane, in floor-plane pixel units.
///
/// The floor plane is the top-down view of the room footprint. Its origin is
/// the top-left pixel of the floor image; the camera sits at the image center
/// `(floor_w / 2 - 0.5, floor_h / 2 - 0.5)`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct FloorPoint {
    /// X coordinate in floor-plane pixels.
    pub x: f32,
    /// Y coordinate in floor-plane pixels.
    pub y: f32,
}

impl FloorPoint {
    /// Create a new floor-plane point.
    #[inline]
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Squared distance to another point (avoids sqrt).
    #[inline]
    pub fn distance_squared(&self, other: &FloorPoint) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }

    /// Distance to another point.
    #[inline]
    pub fn distance(&self, other: &FloorPoint) -> f32 {
        self.distance_squared(other).sqrt()
    }
}

impl Add for FloorPoint {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        FloorPoint::new(self.x + other.x, self.y + other.y)
    }
}

impl Sub for FloorPoint {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        FloorPoint::new(self.x - other.x, self.y - other.y)
    }
}

/// A point in equirectangular pixel coordinates.
///
/// Columns map to azimuth (full 360° sweep across the panorama width) and
/// rows map to elevation (top row is the most positive elevation). Fractional
/// coordinates are meaningful: detector output is sub-pixel.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PanoPoint {
    /// Column (horizontal pixel position).
    pub col: f32,
    /// Row (vertical pixel position).
    pub row: f32,
}

impl PanoPoint {
    /// Create a new equirectangular point.
    #[inline]
    pub fn new(col: f32, row: f32) -> Self {
        Self { col, row }
    }
}
