//! Wall candidate records mutated by the conflict-resolution pass.

use serde::{Deserialize, Serialize};

use crate::core::FloorPoint;
use crate::vote::VoteResult;

/// Axis type of a wall: which floor-plane coordinate the wall holds
/// constant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WallAxis {
    /// Vertical plane of constant x.
    X,
    /// Vertical plane of constant y.
    Y,
}

impl WallAxis {
    /// The perpendicular axis.
    #[inline]
    pub fn flip(self) -> Self {
        match self {
            WallAxis::X => WallAxis::Y,
            WallAxis::Y => WallAxis::X,
        }
    }

    /// The coordinate of a floor-plane point along this axis.
    #[inline]
    pub fn coord(self, p: &FloorPoint) -> f32 {
        match self {
            WallAxis::X => p.x,
            WallAxis::Y => p.y,
        }
    }
}

/// Provenance of a wall candidate, kept as a diagnostic tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CandidateSource {
    /// Produced by the per-group consensus vote.
    Voted,
    /// Synthesized from a resolved neighbor's axis equation to bridge a
    /// topological conflict.
    ForcedInference,
    /// An original vote whose axis was overridden to restore a legal
    /// alternation.
    ForcedChange,
}

/// One wall hypothesis: an axis type, the constant coordinate, and the
/// bookkeeping the resolution loop needs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WallCandidate {
    /// Axis type of the wall plane.
    pub axis: WallAxis,
    /// The constant coordinate (floor-plane pixels).
    pub value: f32,
    /// Voting confidence; lowered by demotion penalties during resolution.
    pub score: f32,
    /// Mean absolute deviation of the wall's samples from `value`.
    pub residual: f32,
    /// How this candidate came to be.
    pub source: CandidateSource,
    /// Originating wall group, if any (forced insertions have none).
    pub group: Option<usize>,
    /// Angular span `(u0, u1)`: azimuths of the wall's bounding corners.
    /// Forced insertions carry the azimuth they were solved at in both
    /// slots.
    pub span: (f32, f32),
    /// Still awaiting resolution.
    pub pending: bool,
}

impl WallCandidate {
    /// Candidate from a per-group vote.
    pub fn voted(axis: WallAxis, vote: VoteResult, group: usize, span: (f32, f32)) -> Self {
        Self {
            axis,
            value: vote.best_fit,
            score: vote.score,
            residual: vote.residual,
            source: CandidateSource::Voted,
            group: Some(group),
            span,
            pending: true,
        }
    }

    /// Already-resolved synthetic candidate solved at azimuth `u`.
    pub fn forced_inference(axis: WallAxis, value: f32, u: f32) -> Self {
        Self {
            axis,
            value,
            score: 0.0,
            residual: 0.0,
            source: CandidateSource::ForcedInference,
            group: None,
            span: (u, u),
            pending: false,
        }
    }
}
