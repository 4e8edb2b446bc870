//! Cuboid wall assignment: exactly four walls, strict X/Y alternation.

use crate::config::{PanoConfig, VoteConfig};
use crate::core::FloorPoint;
use crate::grouping::{group_points, group_span};
use crate::vote::vote;

use super::candidate::{CandidateSource, WallAxis, WallCandidate};
use super::ReconstructError;

/// Vote a wall for each of the four groups and force strict alternation.
///
/// Each group votes independently on its x and y samples and keeps the axis
/// with the better `(score, -residual)` rank. The four independent choices
/// are then overridden by whichever strict alternation pattern (`X,Y,X,Y`
/// or `Y,X,Y,X`) carries the higher summed signed score; a group whose own
/// vote disagreed keeps its voted value but is tagged as force-changed.
pub fn cuboid_walls(
    corner_cols: &[f32],
    xy: &[FloorPoint],
    group_ids: &[usize],
    vote_cfg: &VoteConfig,
    cfg: &PanoConfig,
) -> Result<Vec<WallCandidate>, ReconstructError> {
    let group_count = group_ids.iter().max().map_or(0, |&g| g + 1);
    if group_count != 4 {
        return Err(ReconstructError::GroupCount {
            expected: 4,
            actual: group_count,
        });
    }

    let mut walls = Vec::with_capacity(4);
    for j in 0..4 {
        let points = group_points(xy, group_ids, j);
        let xs: Vec<f32> = points.iter().map(|p| p.x).collect();
        let ys: Vec<f32> = points.iter().map(|p| p.y).collect();
        let x_vote = vote(&xs, vote_cfg);
        let y_vote = vote(&ys, vote_cfg);
        let span = group_span(corner_cols, j, cfg);

        let x_wins = x_vote.score > y_vote.score
            || (x_vote.score == y_vote.score && x_vote.residual < y_vote.residual);
        let candidate = if x_wins {
            WallCandidate::voted(WallAxis::X, x_vote, j, span)
        } else {
            WallCandidate::voted(WallAxis::Y, y_vote, j, span)
        };
        walls.push(candidate);
    }

    // Signed score per parity class decides which alternation pattern the
    // independent votes support better.
    let mut scores = [0.0f32; 2];
    for (j, wall) in walls.iter().enumerate() {
        match wall.axis {
            WallAxis::X => scores[j % 2] += wall.score,
            WallAxis::Y => scores[j % 2] -= wall.score,
        }
    }
    let even_axis = if scores[0] > scores[1] {
        WallAxis::X
    } else {
        WallAxis::Y
    };
    for (j, wall) in walls.iter_mut().enumerate() {
        let forced = if j % 2 == 0 { even_axis } else { even_axis.flip() };
        if wall.axis != forced {
            wall.axis = forced;
            wall.source = CandidateSource::ForcedChange;
        }
        wall.pending = false;
    }

    Ok(walls)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use crate::grouping::assign_groups;

    /// Exact axis-aligned rectangle samples: four groups of constant-x or
    /// constant-y points laid out over a small ring.
    fn rectangle_fixture() -> (Vec<f32>, Vec<FloorPoint>, Vec<usize>, PanoConfig) {
        let cfg = PanoConfig::default().with_pano_size(40, 512);
        let corner_cols = [0.0, 10.0, 20.0, 30.0];
        let group_ids = assign_groups(&corner_cols, cfg.coor_w).unwrap();

        // Group 1: wall y = 100, group 2: x = 500, group 3: y = 500,
        // group 0 (wrapping): x = 100.
        let mut xy = vec![FloorPoint::default(); cfg.coor_w];
        for col in 0..cfg.coor_w {
            let t = (col % 10) as f32 / 10.0;
            xy[col] = match group_ids[col] {
                1 => FloorPoint::new(100.0 + 400.0 * t, 100.0),
                2 => FloorPoint::new(500.0, 100.0 + 400.0 * t),
                3 => FloorPoint::new(500.0 - 400.0 * t, 500.0),
                _ => FloorPoint::new(100.0, 500.0 - 400.0 * t),
            };
        }
        (corner_cols.to_vec(), xy, group_ids, cfg)
    }

    #[test]
    fn test_exact_rectangle_full_scores() {
        let (corners, xy, group_ids, cfg) = rectangle_fixture();
        let walls = cuboid_walls(&corners, &xy, &group_ids, &VoteConfig::default(), &cfg).unwrap();

        assert_eq!(walls.len(), 4);
        let expected = [
            (WallAxis::X, 100.0),
            (WallAxis::Y, 100.0),
            (WallAxis::X, 500.0),
            (WallAxis::Y, 500.0),
        ];
        for (wall, &(axis, value)) in walls.iter().zip(expected.iter()) {
            assert_eq!(wall.axis, axis);
            assert_relative_eq!(wall.value, value, epsilon = 1e-3);
            assert_relative_eq!(wall.score, 1.0);
            assert_eq!(wall.source, CandidateSource::Voted);
        }
    }

    #[test]
    fn test_alternation_is_strict() {
        let (corners, xy, group_ids, cfg) = rectangle_fixture();
        let walls = cuboid_walls(&corners, &xy, &group_ids, &VoteConfig::default(), &cfg).unwrap();
        for j in 0..4 {
            assert_ne!(walls[j].axis, walls[(j + 1) % 4].axis);
        }
    }

    #[test]
    fn test_wrong_group_count_is_rejected() {
        let cfg = PanoConfig::default().with_pano_size(40, 512);
        let group_ids = assign_groups(&[0.0, 20.0], cfg.coor_w).unwrap();
        let xy = vec![FloorPoint::default(); cfg.coor_w];
        let err =
            cuboid_walls(&[0.0, 20.0], &xy, &group_ids, &VoteConfig::default(), &cfg).unwrap_err();
        assert!(matches!(
            err,
            ReconstructError::GroupCount {
                expected: 4,
                actual: 2
            }
        ));
    }
}
