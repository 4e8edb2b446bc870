//! Global rotation alignment from per-wall principal directions.
//!
//! Under the Manhattan assumption every wall's floor-plane scatter runs
//! along one of two perpendicular directions, so each wall suggests the
//! same room rotation modulo 90°. Folding the suggestions into
//! `[-45°, 45°]` and clustering them yields an outlier-robust consensus
//! rotation, convertible into an equivalent panorama column shift.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::config::PanoConfig;
use crate::core::math::{compute_centroid, compute_covariance, mean, rad_to_deg};
use crate::core::FloorPoint;
use crate::grouping::{assign_groups, group_points, GroupingError};
use crate::projection::{boundary_to_floor, ProjectionError};

/// Sentinel appended to the suggestion list so the consensus walk closes
/// its final cluster.
const SENTINEL_DEG: f32 = 1e9;

/// Consensus rotation correction for a panorama.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RotationEstimate {
    /// Equivalent horizontal pixel shift of the panorama.
    pub pixel_shift: i32,
    /// Rotation in degrees, in `[-45, 45]`.
    pub degrees: f32,
}

/// Errors raised during rotation estimation.
#[derive(Debug, Clone)]
pub enum RotationError {
    /// Boundary projection failed.
    Projection(ProjectionError),
    /// Wall grouping failed.
    Grouping(GroupingError),
}

impl std::fmt::Display for RotationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RotationError::Projection(e) => write!(f, "projection failed: {}", e),
            RotationError::Grouping(e) => write!(f, "grouping failed: {}", e),
        }
    }
}

impl std::error::Error for RotationError {}

impl From<ProjectionError> for RotationError {
    fn from(e: ProjectionError) -> Self {
        RotationError::Projection(e)
    }
}

impl From<GroupingError> for RotationError {
    fn from(e: GroupingError) -> Self {
        RotationError::Grouping(e)
    }
}

/// Principal direction of a point scatter (unit-free direction components).
///
/// Leading eigenvector of the 2×2 covariance matrix, computed in closed
/// form; no decomposition library needed for the 2-D case.
pub fn principal_direction(points: &[FloorPoint]) -> (f32, f32) {
    let centroid = compute_centroid(points);
    let cov = compute_covariance(points, centroid);
    // Eigenvector angle of the larger eigenvalue.
    let theta = 0.5 * (2.0 * cov.cxy).atan2(cov.cxx - cov.cyy);
    (theta.cos(), theta.sin())
}

/// Fold a wall direction into a signed rotation suggestion in `[-45°, 45°]`.
///
/// A wall's principal axis is ambiguous modulo 90° in a rectilinear room;
/// reflections across the 90° boundaries collapse the ambiguity.
pub fn fold_rotation(px: f32, py: f32) -> f32 {
    let (px, py) = if px < 0.0 { (-px, -py) } else { (px, py) };
    let deg = rad_to_deg(py.atan2(px));
    if deg > 45.0 {
        90.0 - deg
    } else if deg < -45.0 {
        -90.0 - deg
    } else {
        -deg
    }
}

/// Estimate the room rotation from corner columns and a boundary curve.
///
/// Projects the boundary to the floor plane, takes one folded rotation
/// suggestion per wall group from its principal direction, then walks the
/// sorted suggestions grouping consecutive values within `tol` degrees. The
/// largest cluster's mean wins (first found on ties); if no cluster forms,
/// the mean of all suggestions is used.
pub fn estimate_rotation(
    corner_cols: &[f32],
    boundary_rows: &[f32],
    z: f32,
    cfg: &PanoConfig,
    tol: f32,
) -> Result<RotationEstimate, RotationError> {
    let group_ids = assign_groups(corner_cols, cfg.coor_w)?;
    let xy = boundary_to_floor(boundary_rows, z, cfg, 1.0)?;

    let mut suggestions: Vec<f32> = (0..corner_cols.len())
        .map(|j| {
            let points = group_points(&xy, &group_ids, j);
            let (px, py) = principal_direction(&points);
            fold_rotation(px, py)
        })
        .collect();
    suggestions.push(SENTINEL_DEG);
    suggestions.sort_by(|a, b| a.total_cmp(b));

    // Default: mean over all real suggestions, replaced by the largest
    // within-tolerance cluster once one forms.
    let mut degrees = mean(&suggestions[..suggestions.len() - 1]);
    let mut best_size = -1i64;
    let mut cluster_start = 0usize;
    for j in 1..suggestions.len() {
        if suggestions[j] - suggestions[j - 1] > tol {
            cluster_start = j;
        } else if (j - cluster_start) as i64 > best_size {
            degrees = mean(&suggestions[cluster_start..=j]);
            best_size = (j - cluster_start) as i64;
        }
    }

    let pixel_shift = (degrees * cfg.coor_w as f32 / 360.0).round() as i32;
    debug!(
        "rotation consensus: {:.2}° ({} px) from {} walls",
        degrees,
        pixel_shift,
        corner_cols.len()
    );
    Ok(RotationEstimate {
        pixel_shift,
        degrees,
    })
}
