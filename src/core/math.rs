//! Scalar statistics and angle utilities shared across the pipeline.
//!
//! All angles are in radians unless a function name says degrees.

use std::f32::consts::PI;

/// Two times PI (full circle in radians).
pub const TWO_PI: f32 = 2.0 * PI;

/// Convert degrees to radians.
#[inline]
pub fn deg_to_rad(deg: f32) -> f32 {
    deg * PI / 180.0
}

/// Convert radians to degrees.
#[inline]
pub fn rad_to_deg(rad: f32) -> f32 {
    rad * 180.0 / PI
}

/// Mean of a slice. Returns 0.0 for an empty slice.
#[inline]
pub fn mean(values: &[f32]) -> f32 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f32>() / values.len() as f32
}

/// Median of a slice (average of the two middle values for even length).
///
/// # Panics
/// Panics if `values` is empty.
pub fn median(values: &[f32]) -> f32 {
    debug_assert!(!values.is_empty());
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    let n = sorted.len();
    if n % 2 == 1 {
        sorted[n / 2]
    } else {
        0.5 * (sorted[n / 2 - 1] + sorted[n / 2])
    }
}

/// Percentile of a slice with linear interpolation between ranks.
///
/// `p` is in `[0, 100]`. Uses the rank `p / 100 * (n - 1)` convention.
///
/// # Panics
/// Panics if `values` is empty.
pub fn percentile(values: &[f32], p: f32) -> f32 {
    debug_assert!(!values.is_empty());
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    let rank = (p / 100.0) * (sorted.len() - 1) as f32;
    let lo = rank.floor() as usize;
    let hi = rank.ceil() as usize;
    let frac = rank - lo as f32;
    sorted[lo] + frac * (sorted[hi] - sorted[lo])
}

/// Mean of the samples inside the inclusive percentile band `[p_lo, p_hi]`.
///
/// Robust to local outliers: samples below the `p_lo`-th or above the
/// `p_hi`-th percentile are dropped before averaging.
///
/// # Panics
/// Panics if `values` is empty.
///
/// # Example
/// ```
/// use vastu_layout::core::math::trimmed_mean;
///
/// let values = [1.0, 10.0, 10.0, 10.0, 10.0, 10.0, 100.0];
/// let m = trimmed_mean(&values, 25.0, 75.0);
/// assert!((m - 10.0).abs() < 1e-6);
/// ```
pub fn trimmed_mean(values: &[f32], p_lo: f32, p_hi: f32) -> f32 {
    debug_assert!(!values.is_empty());
    let vmin = percentile(values, p_lo);
    let vmax = percentile(values, p_hi);
    let mut sum = 0.0;
    let mut count = 0usize;
    for &v in values {
        if v >= vmin && v <= vmax {
            sum += v;
            count += 1;
        }
    }
    if count == 0 {
        // Band can be empty only under NaN contamination; fall back to mean.
        mean(values)
    } else {
        sum / count as f32
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Geometry Utilities (shared by principal-direction estimation)
// ─────────────────────────────────────────────────────────────────────────────

use super::FloorPoint;

/// Covariance matrix elements for 2D point sets.
///
/// Represents a symmetric 2x2 matrix:
/// ```text
/// | cxx  cxy |
/// | cxy  cyy |
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct Covariance2D {
    /// Sum of (x - cx)^2
    pub cxx: f32,
    /// Sum of (y - cy)^2
    pub cyy: f32,
    /// Sum of (x - cx)(y - cy)
    pub cxy: f32,
}

/// Compute the centroid of a set of points.
#[inline]
pub fn compute_centroid(points: &[FloorPoint]) -> FloorPoint {
    if points.is_empty() {
        return FloorPoint::new(0.0, 0.0);
    }

    let n = points.len() as f32;
    let mut sum_x: f32 = 0.0;
    let mut sum_y: f32 = 0.0;

    for p in points {
        sum_x += p.x;
        sum_y += p.y;
    }

    FloorPoint::new(sum_x / n, sum_y / n)
}

/// Compute the 2x2 covariance matrix elements for a set of points.
///
/// The covariance matrix describes the spread and orientation of points
/// around their centroid. Its leading eigenvector is the scatter's
/// principal direction.
///
/// # Arguments
/// * `points` - Point set
/// * `centroid` - Pre-computed centroid (use [`compute_centroid`])
#[inline]
pub fn compute_covariance(points: &[FloorPoint], centroid: FloorPoint) -> Covariance2D {
    let mut cxx: f32 = 0.0;
    let mut cyy: f32 = 0.0;
    let mut cxy: f32 = 0.0;

    for p in points {
        let dx = p.x - centroid.x;
        let dy = p.y - centroid.y;
        cxx += dx * dx;
        cyy += dy * dy;
        cxy += dx * dy;
    }

    Covariance2D { cxx, cyy, cxy }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_mean_empty() {
        assert_eq!(mean(&[]), 0.0);
    }

    #[test]
    fn test_median_odd_even() {
        assert_eq!(median(&[3.0, 1.0, 2.0]), 2.0);
        assert_eq!(median(&[4.0, 1.0, 2.0, 3.0]), 2.5);
    }

    #[test]
    fn test_percentile_interpolates() {
        let values = [0.0, 1.0, 2.0, 3.0, 4.0];
        assert_relative_eq!(percentile(&values, 0.0), 0.0);
        assert_relative_eq!(percentile(&values, 50.0), 2.0);
        assert_relative_eq!(percentile(&values, 100.0), 4.0);
        assert_relative_eq!(percentile(&values, 62.5), 2.5);
    }

    #[test]
    fn test_trimmed_mean_drops_outliers() {
        let mut values = vec![50.0; 20];
        values.push(-1000.0);
        values.push(1000.0);
        assert_relative_eq!(trimmed_mean(&values, 25.0, 75.0), 50.0);
    }

    #[test]
    fn test_deg_rad_round_trip() {
        assert_relative_eq!(rad_to_deg(deg_to_rad(37.5)), 37.5, epsilon = 1e-4);
    }

    #[test]
    fn test_centroid_and_covariance_on_diagonal() {
        let points = [
            FloorPoint::new(0.0, 0.0),
            FloorPoint::new(1.0, 1.0),
            FloorPoint::new(2.0, 2.0),
        ];
        let centroid = compute_centroid(&points);
        assert_relative_eq!(centroid.x, 1.0);
        assert_relative_eq!(centroid.y, 1.0);

        // Points lie on y=x, so cxx == cyy and cxy > 0.
        let cov = compute_covariance(&points, centroid);
        assert_relative_eq!(cov.cxx, cov.cyy);
        assert!(cov.cxy > 0.0);
    }
}
