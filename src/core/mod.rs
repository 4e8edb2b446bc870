//! Core types for the vastu-layout reconstruction library.
//!
//! This module provides the fundamental types used throughout the library:
//! - [`FloorPoint`]: top-down floor-plane Cartesian point (pixel units)
//! - [`PanoPoint`]: equirectangular pixel coordinate
//! - [`math`]: scalar statistics (median, percentiles, trimmed mean) and
//!   angle conversions

pub mod math;
mod point;

pub use point::{FloorPoint, PanoPoint};
