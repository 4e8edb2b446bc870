//! Equirectangular ↔ floor-plane coordinate transforms.
//!
//! The panorama addresses directions by pixel: column maps linearly to
//! azimuth `u ∈ (-π, π]`, row maps linearly to elevation `v ∈ (-π/2, π/2)`
//! with row 0 (top) at the most positive elevation. A boundary sample at
//! elevation `v` on a horizontal plane at height `z` above (or below) the
//! camera lies at radial distance `c = z / tan(v)` on the floor plane.
//!
//! Projections fail fast with [`ProjectionError::HorizonSingularity`] when a
//! sample's elevation approaches zero, where the radial distance diverges.

use std::f32::consts::PI;

use crate::config::PanoConfig;
use crate::core::math::TWO_PI;
use crate::core::{FloorPoint, PanoPoint};

/// Elevation magnitude below which a boundary sample is treated as crossing
/// the horizon and rejected.
pub const MIN_ELEVATION: f32 = 1e-4;

/// Errors raised during projection.
#[derive(Debug, Clone)]
pub enum ProjectionError {
    /// A boundary sample's elevation is too close to the horizon; its
    /// floor-plane position would be unbounded.
    HorizonSingularity {
        /// Index of the offending sample.
        index: usize,
        /// Its elevation in radians.
        elevation: f32,
    },
    /// A per-column curve does not have exactly one row per panorama column.
    ShapeMismatch {
        /// Expected length (panorama width).
        expected: usize,
        /// Actual length supplied.
        actual: usize,
    },
}

impl std::fmt::Display for ProjectionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProjectionError::HorizonSingularity { index, elevation } => write!(
                f,
                "sample {} crosses the horizon (elevation {:.2e} rad)",
                index, elevation
            ),
            ProjectionError::ShapeMismatch { expected, actual } => write!(
                f,
                "boundary curve has {} samples, expected one per column ({})",
                actual, expected
            ),
        }
    }
}

impl std::error::Error for ProjectionError {}

/// Azimuth of a panorama column: `((col + 0.5) / coor_w - 0.5) · 2π`.
///
/// Monotonic in `col`; columns `0..coor_w` partition `(-π, π]`.
#[inline]
pub fn column_to_azimuth(col: f32, coor_w: usize) -> f32 {
    ((col + 0.5) / coor_w as f32 - 0.5) * TWO_PI
}

/// Elevation of a panorama row: `-((row + 0.5) / coor_h - 0.5) · π`.
///
/// Row 0 (top of the image) maps to the most positive elevation.
#[inline]
pub fn row_to_elevation(row: f32, coor_h: usize) -> f32 {
    -((row + 0.5) / coor_h as f32 - 0.5) * PI
}

/// Inverse of [`column_to_azimuth`].
#[inline]
pub fn azimuth_to_column(u: f32, coor_w: usize) -> f32 {
    (u / TWO_PI + 0.5) * coor_w as f32 - 0.5
}

/// Inverse of [`row_to_elevation`].
#[inline]
pub fn elevation_to_row(v: f32, coor_h: usize) -> f32 {
    (-v / PI + 0.5) * coor_h as f32 - 0.5
}

#[inline]
fn project_sample(
    index: usize,
    col: f32,
    row: f32,
    z: f32,
    cfg: &PanoConfig,
    scale: f32,
) -> Result<FloorPoint, ProjectionError> {
    let u = column_to_azimuth(col, cfg.coor_w);
    let v = row_to_elevation(row, cfg.coor_h);
    if v.abs() < MIN_ELEVATION {
        return Err(ProjectionError::HorizonSingularity {
            index,
            elevation: v,
        });
    }
    let c = cfg.m_ratio * scale * z / v.tan();
    Ok(FloorPoint::new(
        c * u.sin() + cfg.center_x(),
        -c * u.cos() + cfg.center_y(),
    ))
}

/// Project a per-column boundary row curve onto the floor plane.
///
/// Sample `i` is the boundary position at column `i`; the curve must have
/// exactly one row per panorama column. `z` is the assumed plane height
/// (positive for the ceiling, the signed floor height for the floor).
pub fn boundary_to_floor(
    rows: &[f32],
    z: f32,
    cfg: &PanoConfig,
    scale: f32,
) -> Result<Vec<FloorPoint>, ProjectionError> {
    if rows.len() != cfg.coor_w {
        return Err(ProjectionError::ShapeMismatch {
            expected: cfg.coor_w,
            actual: rows.len(),
        });
    }
    rows.iter()
        .enumerate()
        .map(|(i, &row)| project_sample(i, i as f32, row, z, cfg, scale))
        .collect()
}

/// Project arbitrary equirectangular points onto the floor plane.
pub fn points_to_floor(
    points: &[PanoPoint],
    z: f32,
    cfg: &PanoConfig,
    scale: f32,
) -> Result<Vec<FloorPoint>, ProjectionError> {
    points
        .iter()
        .enumerate()
        .map(|(i, p)| project_sample(i, p.col, p.row, z, cfg, scale))
        .collect()
}

/// Project equirectangular points to polar floor-plane form `(u, d)`.
///
/// The distance `d = scale · |z / tan(v)|` is always non-negative, so this
/// form is safe for plane heights of either sign. Used by forced-inference
/// steps that need a distance along a known azimuth.
pub fn points_to_polar(
    points: &[PanoPoint],
    z: f32,
    cfg: &PanoConfig,
    scale: f32,
) -> Result<Vec<(f32, f32)>, ProjectionError> {
    points
        .iter()
        .enumerate()
        .map(|(i, p)| {
            let u = column_to_azimuth(p.col, cfg.coor_w);
            let v = row_to_elevation(p.row, cfg.coor_h);
            if v.abs() < MIN_ELEVATION {
                return Err(ProjectionError::HorizonSingularity {
                    index: i,
                    elevation: v,
                });
            }
            Ok((u, cfg.m_ratio * scale * (z / v.tan()).abs()))
        })
        .collect()
}

/// Cartesian floor-plane point from azimuth and distance.
///
/// With `offset_x` the point is shifted right by one canvas width, for
/// side-by-side rendering of a second polygon on a doubled canvas.
#[inline]
pub fn polar_to_floor(u: f32, d: f32, cfg: &PanoConfig, offset_x: bool) -> FloorPoint {
    let os_x = if offset_x { cfg.floor_w as f32 } else { 0.0 };
    FloorPoint::new(
        d * u.sin() + cfg.center_x() + os_x,
        -d * u.cos() + cfg.center_y(),
    )
}

/// Inverse projection: floor-plane points back to equirectangular pixels.
///
/// Recovers `u = atan2(x', -y')` and `v = atan(z / √(x'² + y'²))` relative
/// to the camera at the floor-image center.
pub fn floor_to_pano(points: &[FloorPoint], z: f32, cfg: &PanoConfig) -> Vec<PanoPoint> {
    points
        .iter()
        .map(|p| {
            let x = p.x - cfg.center_x();
            let y = p.y - cfg.center_y();
            let u = x.atan2(-y);
            let v = (z / (x * x + y * y).sqrt()).atan();
            PanoPoint::new(azimuth_to_column(u, cfg.coor_w), elevation_to_row(v, cfg.coor_h))
        })
        .collect()
}

/// Solve for the floor-plane Y coordinate where the ray at azimuth `u`
/// crosses the vertical plane `x = const`.
#[inline]
pub fn solve_y_on_ray(x: f32, u: f32, cfg: &PanoConfig) -> f32 {
    let c = (x - cfg.center_x()) / u.sin();
    -c * u.cos() + cfg.center_y()
}

/// Solve for the floor-plane X coordinate where the ray at azimuth `u`
/// crosses the vertical plane `y = const`.
#[inline]
pub fn solve_x_on_ray(y: f32, u: f32, cfg: &PanoConfig) -> f32 {
    let c = -(y - cfg.center_y()) / u.cos();
    c * u.sin() + cfg.center_x()
}

/// Spread a 1-D per-column signal over the floor plane by azimuth lookup.
///
/// Every floor pixel takes the signal value of the panorama column its
/// azimuth falls on, linearly interpolated with wraparound. Returns a
/// row-major `floor_h × floor_w` image.
pub fn signal_to_floor_image(
    signal: &[f32],
    cfg: &PanoConfig,
) -> Result<Vec<f32>, ProjectionError> {
    if signal.len() != cfg.coor_w {
        return Err(ProjectionError::ShapeMismatch {
            expected: cfg.coor_w,
            actual: signal.len(),
        });
    }
    let w = cfg.coor_w as i64;
    let mut image = Vec::with_capacity(cfg.floor_w * cfg.floor_h);
    for fy in 0..cfg.floor_h {
        for fx in 0..cfg.floor_w {
            let px = -(fy as f32 - cfg.floor_h as f32 / 2.0);
            let py = fx as f32 - cfg.floor_w as f32 / 2.0;
            let col = (py.atan2(px) / TWO_PI + 0.5) * cfg.coor_w as f32 - 0.5;
            let lo = col.floor();
            let frac = col - lo;
            let i0 = (lo as i64).rem_euclid(w) as usize;
            let i1 = (lo as i64 + 1).rem_euclid(w) as usize;
            image.push(signal[i0] * (1.0 - frac) + signal[i1] * frac);
        }
    }
    Ok(image)
}

/// Project ceiling and floor boundary curves to floor-plane contours.
///
/// Produces the pair of closed footprint outlines a visualization sink can
/// rasterize. The per-curve scale factors allow fitting both contours onto
/// the same canvas.
#[allow(clippy::too_many_arguments)]
pub fn boundary_contours(
    ceiling_rows: &[f32],
    floor_rows: &[f32],
    z_ceiling: f32,
    z_floor: f32,
    cfg: &PanoConfig,
    ceiling_scale: f32,
    floor_scale: f32,
) -> Result<(Vec<FloorPoint>, Vec<FloorPoint>), ProjectionError> {
    let ceiling = boundary_to_floor(ceiling_rows, z_ceiling, cfg, ceiling_scale)?;
    let floor = boundary_to_floor(floor_rows, z_floor, cfg, floor_scale)?;
    Ok((ceiling, floor))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn cfg() -> PanoConfig {
        PanoConfig::default()
    }

    #[test]
    fn test_azimuth_range_and_monotonicity() {
        let cfg = cfg();
        let mut prev = f32::NEG_INFINITY;
        for col in 0..cfg.coor_w {
            let u = column_to_azimuth(col as f32, cfg.coor_w);
            assert!(u > prev, "azimuth must be strictly increasing");
            assert!(u > -PI && u <= PI);
            prev = u;
        }
    }

    #[test]
    fn test_elevation_range_and_monotonicity() {
        let cfg = cfg();
        let mut prev = f32::INFINITY;
        for row in 0..cfg.coor_h {
            let v = row_to_elevation(row as f32, cfg.coor_h);
            assert!(v < prev, "elevation must decrease with row");
            assert!(v > -PI / 2.0 && v < PI / 2.0);
            prev = v;
        }
    }

    #[test]
    fn test_column_azimuth_round_trip() {
        let cfg = cfg();
        for col in [0.0, 17.25, 511.5, 1023.0] {
            let u = column_to_azimuth(col, cfg.coor_w);
            assert_relative_eq!(azimuth_to_column(u, cfg.coor_w), col, epsilon = 1e-3);
        }
    }

    #[test]
    fn test_floor_pano_round_trip() {
        let cfg = cfg();
        let z = 50.0;
        let points = vec![
            PanoPoint::new(100.0, 80.0),
            PanoPoint::new(700.0, 120.0),
            PanoPoint::new(1000.5, 60.25),
        ];
        let floor = points_to_floor(&points, z, &cfg, 1.0).unwrap();
        let back = floor_to_pano(&floor, z, &cfg);
        for (orig, recovered) in points.iter().zip(back.iter()) {
            assert_relative_eq!(recovered.col, orig.col, epsilon = 1e-2);
            assert_relative_eq!(recovered.row, orig.row, epsilon = 1e-2);
        }
    }

    #[test]
    fn test_horizon_sample_is_rejected() {
        let cfg = cfg();
        // Row at the exact image middle sits on the horizon.
        let horizon_row = cfg.coor_h as f32 / 2.0 - 0.5;
        let points = vec![PanoPoint::new(10.0, horizon_row)];
        let err = points_to_floor(&points, 50.0, &cfg, 1.0).unwrap_err();
        match err {
            ProjectionError::HorizonSingularity { index, .. } => assert_eq!(index, 0),
            other => panic!("Expected horizon error, got {:?}", other),
        }
    }

    #[test]
    fn test_boundary_shape_mismatch() {
        let cfg = cfg();
        let rows = vec![100.0; 100];
        assert!(matches!(
            boundary_to_floor(&rows, 50.0, &cfg, 1.0),
            Err(ProjectionError::ShapeMismatch { .. })
        ));
    }

    #[test]
    fn test_polar_matches_cartesian() {
        let cfg = cfg();
        let points = vec![PanoPoint::new(200.0, 100.0), PanoPoint::new(800.0, 90.0)];
        let cart = points_to_floor(&points, 50.0, &cfg, 1.0).unwrap();
        let polar = points_to_polar(&points, 50.0, &cfg, 1.0).unwrap();
        for (p, &(u, d)) in cart.iter().zip(polar.iter()) {
            let q = polar_to_floor(u, d, &cfg, false);
            assert_relative_eq!(q.x, p.x, epsilon = 1e-2);
            assert_relative_eq!(q.y, p.y, epsilon = 1e-2);
        }
    }

    #[test]
    fn test_polar_offset_shifts_by_canvas_width() {
        let cfg = cfg();
        let p = polar_to_floor(0.5, 100.0, &cfg, false);
        let q = polar_to_floor(0.5, 100.0, &cfg, true);
        assert_relative_eq!(q.x - p.x, cfg.floor_w as f32);
        assert_relative_eq!(q.y, p.y);
    }

    #[test]
    fn test_ray_solves_are_consistent() {
        let cfg = cfg();
        // A point on the ray at azimuth u: both solves must agree with it.
        let u = 0.8;
        let p = polar_to_floor(u, 150.0, &cfg, false);
        assert_relative_eq!(solve_y_on_ray(p.x, u, &cfg), p.y, epsilon = 1e-2);
        assert_relative_eq!(solve_x_on_ray(p.y, u, &cfg), p.x, epsilon = 1e-2);
    }

    #[test]
    fn test_signal_image_dimensions_and_wrap() {
        let cfg = PanoConfig::default().with_floor_size(64, 64).with_pano_size(256, 128);
        let signal: Vec<f32> = (0..256).map(|i| i as f32).collect();
        let image = signal_to_floor_image(&signal, &cfg).unwrap();
        assert_eq!(image.len(), 64 * 64);
        // All samples must stay inside the signal's value range.
        for &v in &image {
            assert!((0.0..=255.0).contains(&v));
        }
    }
}
