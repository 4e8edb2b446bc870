//! Plane-height statistics relating the two boundary curves.
//!
//! With the ceiling boundary assumed on a known plane height `z0`, the floor
//! boundary row at the same column fixes the second plane height through
//! `z1 = z0 · tan(v1) / tan(v0)`. These helpers derive, aggregate, and apply
//! that relation; they feed the reconstruction but carry no wall logic.
//!
//! Callers must supply off-horizon rows (the upstream detector guarantees
//! ceiling rows above and floor rows below the horizon); rows on the horizon
//! yield non-finite heights.

use crate::core::math::trimmed_mean;
use crate::projection::{elevation_to_row, row_to_elevation};

/// Percentile band used when aggregating noisy per-column heights.
const TRIM_LO: f32 = 25.0;
const TRIM_HI: f32 = 75.0;

/// Per-column second plane height from paired boundary rows.
///
/// `rows0` are assumed to lie on the plane at height `z0`; the result is the
/// height of the plane the `rows1` samples lie on, column by column.
pub fn plane_heights(rows0: &[f32], rows1: &[f32], z0: f32, coor_h: usize) -> Vec<f32> {
    debug_assert_eq!(rows0.len(), rows1.len());
    rows0
        .iter()
        .zip(rows1.iter())
        .map(|(&r0, &r1)| {
            let v0 = row_to_elevation(r0, coor_h);
            let v1 = row_to_elevation(r1, coor_h);
            (z0 / v0.tan()) * v1.tan()
        })
        .collect()
}

/// Robust aggregate of [`plane_heights`]: trimmed mean over the 25th–75th
/// percentile band.
///
/// # Panics
/// Panics if the curves are empty.
pub fn plane_height_mean(rows0: &[f32], rows1: &[f32], z0: f32, coor_h: usize) -> f32 {
    let heights = plane_heights(rows0, rows1, z0, coor_h);
    trimmed_mean(&heights, TRIM_LO, TRIM_HI)
}

/// Ceiling height estimate from paired ceiling/floor boundary rows, given
/// the signed floor plane height `z_floor`.
///
/// # Panics
/// Panics if the curves are empty.
pub fn ceiling_height_mean(
    ceiling_rows: &[f32],
    floor_rows: &[f32],
    z_floor: f32,
    coor_h: usize,
) -> f32 {
    plane_height_mean(floor_rows, ceiling_rows, z_floor, coor_h)
}

/// Refit the second boundary curve to a constant plane height.
///
/// Estimates a single robust height for the `rows1` plane, then recomputes
/// every `rows1` sample as the row that height predicts from the `rows0`
/// geometry. Returns the refined curve and the estimated height.
///
/// # Panics
/// Panics if the curves are empty.
pub fn refine_rows_by_fixed_height(
    rows0: &[f32],
    rows1: &[f32],
    z0: f32,
    coor_h: usize,
) -> (Vec<f32>, f32) {
    let z1_mean = plane_height_mean(rows0, rows1, z0, coor_h);
    let refined = rows0
        .iter()
        .map(|&r0| {
            let c0 = z0 / row_to_elevation(r0, coor_h).tan();
            elevation_to_row(z1_mean.atan2(c0), coor_h)
        })
        .collect();
    (refined, z1_mean)
}

/// Predict the second boundary curve for a plane offset `height_offset`
/// above the `rows0` plane.
pub fn infer_rows_for_offset(
    rows0: &[f32],
    height_offset: f32,
    z0: f32,
    coor_h: usize,
) -> Vec<f32> {
    let z1 = z0 + height_offset;
    rows0
        .iter()
        .map(|&r0| {
            let c0 = z0 / row_to_elevation(r0, coor_h).tan();
            elevation_to_row(z1.atan2(c0), coor_h)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use crate::projection::elevation_to_row;

    const COOR_H: usize = 512;

    /// Rows for a plane at height `z` seen at radial distance `c`.
    fn row_for(z: f32, c: f32) -> f32 {
        elevation_to_row((z / c).atan(), COOR_H)
    }

    #[test]
    fn test_plane_heights_recover_synthetic_plane() {
        let z0 = 50.0;
        let z1 = -80.0; // floor plane below the camera
        let distances = [60.0, 100.0, 150.0, 220.0];
        let rows0: Vec<f32> = distances.iter().map(|&c| row_for(z0, c)).collect();
        let rows1: Vec<f32> = distances.iter().map(|&c| row_for(z1, c)).collect();

        for h in plane_heights(&rows0, &rows1, z0, COOR_H) {
            assert_relative_eq!(h, z1, epsilon = 0.2);
        }
        assert_relative_eq!(plane_height_mean(&rows0, &rows1, z0, COOR_H), z1, epsilon = 0.2);
    }

    #[test]
    fn test_ceiling_height_from_floor_reference() {
        let z_floor = -100.0;
        let z_ceiling = 60.0;
        let distances = [80.0, 120.0, 90.0, 200.0, 140.0];
        let floor_rows: Vec<f32> = distances.iter().map(|&c| row_for(z_floor, c)).collect();
        let ceiling_rows: Vec<f32> = distances.iter().map(|&c| row_for(z_ceiling, c)).collect();

        let estimate = ceiling_height_mean(&ceiling_rows, &floor_rows, z_floor, COOR_H);
        assert_relative_eq!(estimate, z_ceiling, epsilon = 0.2);
    }

    #[test]
    fn test_refine_snaps_noisy_curve_to_plane() {
        let z0 = 50.0;
        let z1 = -75.0;
        let distances: Vec<f32> = (0..32).map(|i| 60.0 + 5.0 * i as f32).collect();
        let rows0: Vec<f32> = distances.iter().map(|&c| row_for(z0, c)).collect();
        // Noisy observation of the second plane.
        let rows1: Vec<f32> = distances
            .iter()
            .enumerate()
            .map(|(i, &c)| row_for(z1, c) + if i % 2 == 0 { 0.8 } else { -0.8 })
            .collect();

        let (refined, z1_est) = refine_rows_by_fixed_height(&rows0, &rows1, z0, COOR_H);
        assert_relative_eq!(z1_est, z1, epsilon = 1.0);
        for (i, &c) in distances.iter().enumerate() {
            assert_relative_eq!(refined[i], row_for(z1_est, c), epsilon = 1e-3);
        }
    }

    #[test]
    fn test_infer_rows_matches_forward_model() {
        let z0 = 50.0;
        let offset = -130.0;
        let distances = [70.0, 110.0, 160.0];
        let rows0: Vec<f32> = distances.iter().map(|&c| row_for(z0, c)).collect();

        let inferred = infer_rows_for_offset(&rows0, offset, z0, COOR_H);
        for (i, &c) in distances.iter().enumerate() {
            assert_relative_eq!(inferred[i], row_for(z0 + offset, c), epsilon = 1e-3);
        }
    }
}
