//! Wall-group assignment over the panorama column ring.
//!
//! Detected corner columns partition the panorama's columns into contiguous
//! wall groups. Columns form a ring (the last column is adjacent to column
//! 0), so the segment running past the panorama seam is merged into a
//! single group and can be iterated in ring-contiguous order.

use crate::config::PanoConfig;
use crate::core::FloorPoint;
use crate::projection::column_to_azimuth;

/// Errors raised by wall-group assignment.
#[derive(Debug, Clone)]
pub enum GroupingError {
    /// No corner columns were supplied.
    NoCorners,
    /// A corner column rounds outside `[0, coor_w)`.
    OutOfRange {
        /// The offending corner column.
        column: f32,
        /// Panorama width.
        coor_w: usize,
    },
    /// Corner columns are not strictly increasing after rounding.
    NotIncreasing {
        /// Index of the first out-of-order corner.
        index: usize,
    },
}

impl std::fmt::Display for GroupingError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GroupingError::NoCorners => write!(f, "no corner columns supplied"),
            GroupingError::OutOfRange { column, coor_w } => {
                write!(f, "corner column {} outside [0, {})", column, coor_w)
            }
            GroupingError::NotIncreasing { index } => {
                write!(f, "corner columns not strictly increasing at index {}", index)
            }
        }
    }
}

impl std::error::Error for GroupingError {}

/// Round corner columns to indices and validate them against the ring.
fn corner_indices(corner_cols: &[f32], coor_w: usize) -> Result<Vec<usize>, GroupingError> {
    if corner_cols.is_empty() {
        return Err(GroupingError::NoCorners);
    }
    let mut indices = Vec::with_capacity(corner_cols.len());
    for (i, &col) in corner_cols.iter().enumerate() {
        let rounded = col.round();
        if !(0.0..(coor_w as f32)).contains(&rounded) {
            return Err(GroupingError::OutOfRange {
                column: col,
                coor_w,
            });
        }
        let idx = rounded as usize;
        if let Some(&prev) = indices.last() {
            if idx <= prev {
                return Err(GroupingError::NotIncreasing { index: i });
            }
        }
        indices.push(idx);
    }
    Ok(indices)
}

/// Assign a wall-group id to every panorama column.
///
/// The labeling steps up by one at each corner column; the trailing fragment
/// after the last corner is relabeled to group 0, merging it with the
/// leading fragment into the single wraparound wall. The number of distinct
/// group ids equals the number of corners, and ids are consecutive from 0.
///
/// # Example
/// ```
/// use vastu_layout::grouping::assign_groups;
///
/// let groups = assign_groups(&[0.0, 300.0, 600.0, 900.0], 1024).unwrap();
/// assert_eq!(groups.len(), 1024);
/// assert_eq!(groups[0], 1);     // first corner sits at column 0
/// assert_eq!(groups[950], 0);   // trailing fragment wraps into group 0
/// ```
pub fn assign_groups(corner_cols: &[f32], coor_w: usize) -> Result<Vec<usize>, GroupingError> {
    let corners = corner_indices(corner_cols, coor_w)?;

    let mut groups = vec![0usize; coor_w];
    let mut current = 0usize;
    let mut next_corner = 0usize;
    for (col, group) in groups.iter_mut().enumerate() {
        if next_corner < corners.len() && corners[next_corner] == col {
            current += 1;
            next_corner += 1;
        }
        *group = current;
    }

    // Merge the trailing fragment with the leading one across the seam.
    let last = *groups.last().unwrap_or(&0);
    for group in groups.iter_mut() {
        if *group == last {
            *group = 0;
        }
    }
    Ok(groups)
}

/// Columns of one wall group, in ring-contiguous order.
///
/// For the wraparound group the trailing fragment (high column indices) is
/// rotated in front of the leading fragment, so consecutive entries are
/// always ring-adjacent.
pub fn group_columns(group_ids: &[usize], group: usize) -> Vec<usize> {
    let mut columns: Vec<usize> = group_ids
        .iter()
        .enumerate()
        .filter(|(_, &g)| g == group)
        .map(|(col, _)| col)
        .collect();

    // A group touching column 0 without being one contiguous run from 0 is
    // the split wraparound group.
    if columns.first() == Some(&0) && columns.last() != Some(&(columns.len() - 1)) {
        if let Some(split) = columns.iter().enumerate().position(|(k, &col)| col != k) {
            columns.rotate_left(split);
        }
    }
    columns
}

/// Gather one group's floor-plane points in ring-contiguous order.
pub fn group_points(xy: &[FloorPoint], group_ids: &[usize], group: usize) -> Vec<FloorPoint> {
    group_columns(group_ids, group)
        .into_iter()
        .map(|col| xy[col])
        .collect()
}

/// Angular span `(u0, u1)` of wall group `j`: the azimuths of its bounding
/// corners. Group `j` runs from corner `j-1` (ring-previous) to corner `j`.
pub fn group_span(corner_cols: &[f32], j: usize, cfg: &PanoConfig) -> (f32, f32) {
    let n = corner_cols.len();
    let u0 = column_to_azimuth(corner_cols[(j + n - 1) % n], cfg.coor_w);
    let u1 = column_to_azimuth(corner_cols[j], cfg.coor_w);
    (u0, u1)
}
