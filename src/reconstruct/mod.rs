//! Wall-boundary reconstruction: from a projected boundary curve to a
//! closed Manhattan room polygon.
//!
//! The boundary curve is projected to the floor plane, partitioned into
//! wall groups, and voted into per-wall axis/value candidates. The cuboid
//! path assumes exactly four walls with strict alternation; the general
//! path resolves conflicts between an arbitrary number of walls. Finally
//! consecutive walls are intersected into corners, re-projected to
//! equirectangular coordinates, and the polygon start is canonicalized.

mod candidate;
mod cuboid;
mod general;

pub use candidate::{CandidateSource, WallAxis, WallCandidate};
pub use cuboid::cuboid_walls;
pub use general::{general_walls, resolve_conflicts};

use crate::config::LayoutConfig;
use crate::core::math::mean;
use crate::core::{FloorPoint, PanoPoint};
use crate::grouping::{assign_groups, GroupingError};
use crate::projection::{boundary_to_floor, floor_to_pano, ProjectionError};

/// Errors raised during reconstruction.
#[derive(Debug, Clone)]
pub enum ReconstructError {
    /// Boundary projection failed.
    Projection(ProjectionError),
    /// Wall grouping failed.
    Grouping(GroupingError),
    /// Group count incompatible with the requested room model.
    GroupCount {
        /// Required group count.
        expected: usize,
        /// Supplied group count.
        actual: usize,
    },
}

impl std::fmt::Display for ReconstructError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReconstructError::Projection(e) => write!(f, "projection failed: {}", e),
            ReconstructError::Grouping(e) => write!(f, "grouping failed: {}", e),
            ReconstructError::GroupCount { expected, actual } => {
                write!(f, "expected {} wall groups, got {}", expected, actual)
            }
        }
    }
}

impl std::error::Error for ReconstructError {}

impl From<ProjectionError> for ReconstructError {
    fn from(e: ProjectionError) -> Self {
        ReconstructError::Projection(e)
    }
}

impl From<GroupingError> for ReconstructError {
    fn from(e: GroupingError) -> Self {
        ReconstructError::Grouping(e)
    }
}

/// A reconstructed room layout.
#[derive(Debug, Clone)]
pub struct Reconstruction {
    /// Closed corner polygon in equirectangular coordinates, rotated so the
    /// even-indexed corner with the smallest column comes first.
    pub polygon: Vec<PanoPoint>,
    /// The same corners on the floor plane, in the same order.
    pub floor_polygon: Vec<FloorPoint>,
    /// Resolved wall candidates, kept in resolution order for diagnostics.
    pub walls: Vec<WallCandidate>,
}

/// Reconstruct the room polygon from corner columns and a boundary curve.
///
/// `corner_cols` are the detector's corner column positions (strictly
/// increasing, wraparound implied); `boundary_rows` is the per-column
/// boundary row curve (one sample per panorama column); `z` the assumed
/// plane height of that curve. The cuboid/general choice and all tunables
/// come from `config`.
pub fn reconstruct(
    corner_cols: &[f32],
    boundary_rows: &[f32],
    z: f32,
    config: &LayoutConfig,
) -> Result<Reconstruction, ReconstructError> {
    let pano = &config.pano;
    let group_ids = assign_groups(corner_cols, pano.coor_w)?;
    let xy = boundary_to_floor(boundary_rows, z, pano, 1.0)?;

    let walls = if config.reconstruct.force_cuboid {
        cuboid_walls(corner_cols, &xy, &group_ids, &config.vote, pano)?
    } else {
        general_walls(
            corner_cols,
            &xy,
            &group_ids,
            &config.vote,
            &config.reconstruct,
            pano,
        )
    };

    // Intersect consecutive walls into corners: the Y-type wall of each
    // pair supplies the y coordinate.
    let mut floor_polygon: Vec<FloorPoint> = Vec::with_capacity(walls.len());
    for (j, wall) in walls.iter().enumerate() {
        let next = &walls[(j + 1) % walls.len()];
        let corner = match wall.axis {
            WallAxis::Y => FloorPoint::new(next.value, wall.value),
            WallAxis::X => FloorPoint::new(wall.value, next.value),
        };
        floor_polygon.push(corner);
    }

    let mut polygon = floor_to_pano(&floor_polygon, z, pano);

    // Canonical start: the even-indexed corner with the smallest column.
    // Keeps output stable regardless of where voting started.
    let min_even = polygon
        .iter()
        .step_by(2)
        .enumerate()
        .min_by(|(_, a), (_, b)| a.col.total_cmp(&b.col))
        .map_or(0, |(k, _)| k);
    polygon.rotate_left(2 * min_even);
    floor_polygon.rotate_left(2 * min_even);

    Ok(Reconstruction {
        polygon,
        floor_polygon,
        walls,
    })
}

/// Split one ordered point run across two walls of known axis types.
///
/// Picks the split index maximizing the cumulative per-side score, then
/// returns the mean coordinate of each side along its wall's axis. Used
/// when a single detected group is known to span two walls.
///
/// # Panics
/// Panics if fewer than two points are supplied.
pub fn split_two_walls(points: &[FloorPoint], axis_a: WallAxis, axis_b: WallAxis) -> (f32, f32) {
    assert!(points.len() >= 2, "need at least two points to split");
    let n = points.len();

    // Prefix scores for wall A, suffix scores for wall B.
    let mut l1_a = vec![0.0f32; n];
    let mut cum = 0.0f32;
    for (k, p) in points.iter().enumerate() {
        cum += axis_a.coord(p);
        let m = (k + 1) as f32;
        l1_a[k] = cum / m - cum / (m * m);
    }
    let mut l1_b = vec![0.0f32; n];
    cum = 0.0;
    for (k, p) in points.iter().rev().enumerate() {
        cum += axis_b.coord(p);
        let m = (k + 1) as f32;
        l1_b[n - 1 - k] = cum / m - cum / (m * m);
    }

    let mut best_split = 1usize;
    let mut best_score = f32::NEG_INFINITY;
    for k in 0..n - 1 {
        let score = l1_a[k] + l1_b[k + 1];
        if score > best_score {
            best_score = score;
            best_split = k + 1;
        }
    }

    let va_samples: Vec<f32> = points[..best_split].iter().map(|p| axis_a.coord(p)).collect();
    let vb_samples: Vec<f32> = points[best_split..].iter().map(|p| axis_b.coord(p)).collect();
    (mean(&va_samples), mean(&vb_samples))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_split_two_walls_finds_corner() {
        // Six points on wall y = 100, four points on wall x = 200.
        let mut points = Vec::new();
        for i in 0..6 {
            points.push(FloorPoint::new(150.0 + 8.0 * i as f32, 100.0));
        }
        for i in 0..4 {
            points.push(FloorPoint::new(200.0, 95.0 - 10.0 * i as f32));
        }

        let (va, vb) = split_two_walls(&points, WallAxis::Y, WallAxis::X);
        assert_relative_eq!(va, 100.0, epsilon = 1e-3);
        assert_relative_eq!(vb, 200.0, epsilon = 1e-3);
    }

    #[test]
    fn test_corner_orientation_follows_y_wall() {
        // Two-wall sanity check of the corner-building rule via a manual
        // candidate list inside reconstruct's closing logic is covered by
        // the integration tests; here assert the axis rule itself.
        let p = FloorPoint::new(3.0, 9.0);
        assert_eq!(WallAxis::Y.coord(&p), 9.0);
        assert_eq!(WallAxis::X.coord(&p), 3.0);
    }
}
