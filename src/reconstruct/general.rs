//! General N-wall assignment with greedy conflict resolution.
//!
//! Walls are voted independently, then resolved from highest score to
//! lowest. A wall whose axis conflicts with an already-resolved neighbor is
//! first demoted (penalized and retried once more context exists); once its
//! score falls below the configured floor the conflict is closed
//! geometrically instead, by solving the resolved neighbor's axis equation
//! at the shared corner azimuth and inserting a synthetic bridging wall.

use log::debug;

use crate::config::{PanoConfig, ReconstructConfig, VoteConfig};
use crate::core::math::mean;
use crate::core::FloorPoint;
use crate::grouping::{group_points, group_span};
use crate::projection::{solve_x_on_ray, solve_y_on_ray};
use crate::vote::vote;

use super::candidate::{CandidateSource, WallAxis, WallCandidate};

/// Solve the perpendicular coordinate where `wall`'s plane meets the ray at
/// azimuth `u`.
fn solve_perpendicular(wall: &WallCandidate, u: f32, cfg: &PanoConfig) -> (WallAxis, f32) {
    match wall.axis {
        WallAxis::X => (WallAxis::Y, solve_y_on_ray(wall.value, u, cfg)),
        WallAxis::Y => (WallAxis::X, solve_x_on_ray(wall.value, u, cfg)),
    }
}

/// Vote one candidate per wall group, keeping the better-ranked axis.
fn vote_candidates(
    corner_cols: &[f32],
    xy: &[FloorPoint],
    group_ids: &[usize],
    vote_cfg: &VoteConfig,
    cfg: &PanoConfig,
) -> Vec<WallCandidate> {
    (0..corner_cols.len())
        .map(|j| {
            let points = group_points(xy, group_ids, j);
            let xs: Vec<f32> = points.iter().map(|p| p.x).collect();
            let ys: Vec<f32> = points.iter().map(|p| p.y).collect();
            let x_vote = vote(&xs, vote_cfg);
            let y_vote = vote(&ys, vote_cfg);
            let span = group_span(corner_cols, j, cfg);

            let x_wins = x_vote.score > y_vote.score
                || (x_vote.score == y_vote.score && x_vote.residual < y_vote.residual);
            if x_wins {
                WallCandidate::voted(WallAxis::X, x_vote, j, span)
            } else {
                WallCandidate::voted(WallAxis::Y, y_vote, j, span)
            }
        })
        .collect()
}

/// Assign walls for an arbitrary group count.
///
/// Votes per group, then runs the greedy resolution loop until no pending
/// candidate remains. See [`resolve_conflicts`] for the rule set.
pub fn general_walls(
    corner_cols: &[f32],
    xy: &[FloorPoint],
    group_ids: &[usize],
    vote_cfg: &VoteConfig,
    rec_cfg: &ReconstructConfig,
    cfg: &PanoConfig,
) -> Vec<WallCandidate> {
    let candidates = vote_candidates(corner_cols, xy, group_ids, vote_cfg, cfg);
    resolve_conflicts(candidates, xy, group_ids, rec_cfg, cfg)
}

/// Resolve adjacent axis-type conflicts, highest score first.
///
/// Rules applied when a candidate is taken off the pending set:
/// - both neighbors pending: nothing to check yet;
/// - one resolved neighbor with the same axis: demote while the score is
///   still above `score_floor`, afterwards insert one forced-inference wall
///   solved from that neighbor at the shared corner azimuth;
/// - both neighbors resolved with equal axes differing from this one: the
///   legal odd-one-out, kept as is;
/// - three consecutive walls of one axis: flip this wall's axis and refit
///   its value as the mean of its raw samples along the new axis;
/// - both neighbors resolved with different axes: replace this wall with
///   two forced-inference walls bridging the neighbors.
///
/// Each iteration either shrinks the pending set or exchanges one pending
/// candidate for resolved synthetics, so the loop terminates.
pub fn resolve_conflicts(
    mut cands: Vec<WallCandidate>,
    xy: &[FloorPoint],
    group_ids: &[usize],
    rec_cfg: &ReconstructConfig,
    cfg: &PanoConfig,
) -> Vec<WallCandidate> {
    loop {
        // Pending candidate with the highest score; lowest index on ties.
        let mut tbd: Option<usize> = None;
        for (i, cand) in cands.iter().enumerate() {
            if cand.pending && tbd.map_or(true, |t| cand.score > cands[t].score) {
                tbd = Some(i);
            }
        }
        let Some(t) = tbd else {
            break;
        };

        cands[t].pending = false;
        let len = cands.len();
        let p = (t + len - 1) % len;
        let n = (t + 1) % len;

        let pending_neighbors = cands[p].pending as u8 + cands[n].pending as u8;
        if pending_neighbors == 2 {
            continue;
        }

        if pending_neighbors == 1 {
            let conflict = (!cands[p].pending && cands[p].axis == cands[t].axis)
                || (!cands[n].pending && cands[n].axis == cands[t].axis);
            if conflict {
                if cands[t].score >= rec_cfg.score_floor {
                    // Not hopeless yet: retry once more context exists.
                    cands[t].pending = true;
                    cands[t].score -= rec_cfg.score_penalty;
                } else {
                    // Close the conflict with one bridging wall solved from
                    // the resolved neighbor.
                    let (insert_at, neighbor, u) = if !cands[p].pending {
                        (t, p, cands[p].span.1)
                    } else {
                        (n, n, cands[n].span.0)
                    };
                    let (axis, value) = solve_perpendicular(&cands[neighbor], u, cfg);
                    debug!(
                        "forced inference: bridging wall {:?}={:.1} inserted at {}",
                        axis, value, insert_at
                    );
                    cands.insert(insert_at, WallCandidate::forced_inference(axis, value, u));
                }
            }
            continue;
        }

        // Both neighbors resolved.
        if cands[p].axis == cands[n].axis {
            if cands[t].axis == cands[p].axis {
                // Three same-axis walls in a row are illegal under the
                // Manhattan assumption: flip the middle one.
                let new_axis = cands[t].axis.flip();
                let samples: Vec<f32> = cands[t]
                    .group
                    .map(|g| {
                        group_points(xy, group_ids, g)
                            .iter()
                            .map(|pt| new_axis.coord(pt))
                            .collect()
                    })
                    .unwrap_or_default();
                cands[t].axis = new_axis;
                cands[t].value = mean(&samples);
                cands[t].source = CandidateSource::ForcedChange;
                debug!(
                    "forced change: wall {} flipped to {:?}={:.1}",
                    t, cands[t].axis, cands[t].value
                );
            }
        } else {
            // Neighbors disagree: bridge the gap with two synthetic walls
            // in place of the ambiguous one.
            let (axis0, val0) = solve_perpendicular(&cands[p], cands[p].span.1, cfg);
            let (axis1, val1) = solve_perpendicular(&cands[n], cands[n].span.0, cfg);
            debug_assert_eq!(axis0, cands[n].axis);
            debug_assert_eq!(axis1, cands[p].axis);
            debug!(
                "forced inference: wall {} replaced by {:?}={:.1}, {:?}={:.1}",
                t, axis0, val0, axis1, val1
            );
            let bridge = [
                WallCandidate::forced_inference(axis0, val0, cands[p].span.1),
                WallCandidate::forced_inference(axis1, val1, cands[n].span.0),
            ];
            cands.splice(t..=t, bridge);
        }
    }

    cands
}
