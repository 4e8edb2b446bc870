//! # Vastu-Layout: Panoramic Room Layout Reconstruction
//!
//! Recovers a closed Manhattan-world room polygon from a boundary curve
//! detected on an equirectangular panorama, assuming a single camera at a
//! known height above the floor.
//!
//! ## Features
//!
//! - **Coordinate transforms**: Equirectangular column/row to floor-plane
//!   XY and back, plus polar forms and ray solvers
//! - **Robust voting**: Consensus estimate of each wall's dominant
//!   coordinate, tolerant to boundary noise and occlusion
//! - **Cuboid and general rooms**: A strict four-wall path and a general
//!   path that resolves axis conflicts between any number of walls
//! - **Rotation alignment**: Estimates the panorama yaw that axis-aligns
//!   the walls, as a fractional-degree angle and a pixel shift
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use vastu_layout::{reconstruct, LayoutConfig};
//!
//! let config = LayoutConfig::default();
//! // Per-column ceiling-boundary rows and detected corner columns,
//! // e.g. from a boundary-detection network.
//! let boundary_rows: Vec<f32> = vec![128.0; config.pano.coor_w];
//! let corner_cols = [64.0, 320.0, 576.0, 832.0];
//!
//! let layout = reconstruct(&corner_cols, &boundary_rows, 50.0, &config).unwrap();
//! for corner in &layout.polygon {
//!     println!("corner at col {:.1}, row {:.1}", corner.col, corner.row);
//! }
//! ```
//!
//! ## Coordinate Frames
//!
//! - **Panorama**: column 0 at azimuth -π, increasing eastward; row 0 at
//!   elevation +π/2 (zenith), increasing downward. Pixel centers sit at
//!   half-integer offsets.
//! - **Floor plane**: X right, Y down, origin at the image corner with the
//!   camera at `(floor_w/2 - 0.5, floor_h/2 - 0.5)`. Azimuth 0 maps to -Y.
//!
//! ## Architecture
//!
//! The pipeline flows bottom-up through the modules:
//!
//! ```text
//! boundary rows + corner columns
//!        |
//!        v
//!   [projection]  column/row <-> azimuth/elevation <-> floor XY
//!        |
//!        v
//!   [grouping]    corner columns -> ring-ordered wall groups
//!        |
//!        v
//!   [vote]        per-group consensus of X or Y wall coordinate
//!        |
//!        v
//!   [reconstruct] axis assignment, conflict resolution, polygon closing
//! ```
//!
//! - [`core`]: Point types and shared numeric helpers
//! - [`config`]: Configuration types with YAML loading
//! - [`projection`]: Equirectangular/floor-plane transforms
//! - [`height`]: Plane-height estimation between two boundary curves
//! - [`vote`]: Robust consensus voting
//! - [`grouping`]: Corner validation and wall-group assignment
//! - [`rotation`]: Manhattan rotation alignment
//! - [`reconstruct`]: Wall candidates, conflict resolution, polygon output

pub mod config;
pub mod core;
pub mod grouping;
pub mod height;
pub mod projection;
pub mod reconstruct;
pub mod rotation;
pub mod vote;

pub use config::{LayoutConfig, PanoConfig, ReconstructConfig, VoteConfig};
pub use core::{FloorPoint, PanoPoint};
pub use reconstruct::{reconstruct, Reconstruction, WallAxis, WallCandidate};
pub use rotation::{estimate_rotation, RotationEstimate};
pub use vote::{vote, VoteResult};
