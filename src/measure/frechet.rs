//! Discrete Fréchet distance.
//!
//! The Fréchet distance measures similarity between curves while respecting
//! the ordering of points. Picture a person walking along one polyline and a
//! dog along the other, connected by a leash: the Fréchet distance is the
//! shortest leash that lets both reach their end points, each moving at any
//! speed but never backtracking.
//!
//! Only vertices are considered. Both functions here compute the same value;
//! the linear-space variant keeps two rows of the DP table instead of all of it.
//!
//! # Example
//!
//! ```
//! use geo::coord;
//! use linesim::measure::discrete_frechet_distance;
//!
//! let path1: Vec<geo::Coord<f64>> = vec![coord! { x: 0.0, y: 0.0 }, coord! { x: 1.0, y: 0.0 }, coord! { x: 2.0, y: 0.0 }];
//! let path2 = vec![coord! { x: 0.0, y: 1.0 }, coord! { x: 1.0, y: 1.0 }, coord! { x: 2.0, y: 1.0 }];
//!
//! // Parallel paths 1 unit apart
//! let dist = discrete_frechet_distance(&path1, &path2);
//! assert!((dist - 1.0).abs() < 1e-10);
//! ```

use geo::{Coord, CoordNum};
use num_traits::Float;

#[inline]
fn distance<F: CoordNum + Float>(a: Coord<F>, b: Coord<F>) -> F {
    (a.x - b.x).hypot(a.y - b.y)
}

/// Computes the discrete Fréchet distance between two vertex sequences.
///
/// Uses the full O(nm) dynamic-programming table.
///
/// # Returns
///
/// The discrete Fréchet distance, or 0 if either sequence is empty.
pub fn discrete_frechet_distance<F: CoordNum + Float>(p: &[Coord<F>], q: &[Coord<F>]) -> F {
    if p.is_empty() || q.is_empty() {
        return F::zero();
    }

    let n = p.len();
    let m = q.len();

    // dp[i][j] = Fréchet distance for p[0..=i] and q[0..=j]
    let mut dp = vec![vec![F::neg_infinity(); m]; n];

    dp[0][0] = distance(p[0], q[0]);

    for j in 1..m {
        dp[0][j] = dp[0][j - 1].max(distance(p[0], q[j]));
    }

    for i in 1..n {
        dp[i][0] = dp[i - 1][0].max(distance(p[i], q[0]));
    }

    for i in 1..n {
        for j in 1..m {
            let prev_min = dp[i - 1][j].min(dp[i][j - 1]).min(dp[i - 1][j - 1]);
            dp[i][j] = distance(p[i], q[j]).max(prev_min);
        }
    }

    dp[n - 1][m - 1]
}

/// Computes the discrete Fréchet distance in O(m) space.
///
/// Same result as [`discrete_frechet_distance`], keeping only the previous
/// and current DP rows. This is the variant used by the similarity scorer.
pub fn discrete_frechet_distance_linear_space<F: CoordNum + Float>(
    p: &[Coord<F>],
    q: &[Coord<F>],
) -> F {
    if p.is_empty() || q.is_empty() {
        return F::zero();
    }

    let m = q.len();

    let mut prev = vec![F::neg_infinity(); m];
    let mut curr = vec![F::neg_infinity(); m];

    prev[0] = distance(p[0], q[0]);
    for j in 1..m {
        prev[j] = prev[j - 1].max(distance(p[0], q[j]));
    }

    for &p_point in p.iter().skip(1) {
        curr[0] = prev[0].max(distance(p_point, q[0]));

        for j in 1..m {
            let prev_min = prev[j].min(curr[j - 1]).min(prev[j - 1]);
            curr[j] = distance(p_point, q[j]).max(prev_min);
        }

        std::mem::swap(&mut prev, &mut curr);
    }

    prev[m - 1]
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use geo::coord;

    fn path(points: &[(f64, f64)]) -> Vec<Coord<f64>> {
        points.iter().map(|&(x, y)| coord! { x: x, y: y }).collect()
    }

    #[test]
    fn test_discrete_frechet_identical() {
        let p = path(&[(0.0, 0.0), (1.0, 0.0), (2.0, 0.0)]);
        assert_eq!(discrete_frechet_distance(&p, &p), 0.0);
        assert_eq!(discrete_frechet_distance_linear_space(&p, &p), 0.0);
    }

    #[test]
    fn test_discrete_frechet_diverging_paths() {
        // Start together, diverge, then converge
        let p = path(&[(0.0, 0.0), (1.0, 2.0), (2.0, 0.0)]);
        let q = path(&[(0.0, 0.0), (1.0, 0.0), (2.0, 0.0)]);

        assert_abs_diff_eq!(discrete_frechet_distance(&p, &q), 2.0, epsilon = 1e-10);
    }

    #[test]
    fn test_discrete_frechet_different_lengths() {
        let p = path(&[(0.0, 0.0), (2.0, 0.0)]);
        let q = path(&[(0.0, 1.0), (1.0, 1.0), (2.0, 1.0)]);

        // p[0] must cover q[0] and q[1]; |p[0] - q[1]| = sqrt(2)
        let dist = discrete_frechet_distance(&p, &q);
        assert_abs_diff_eq!(dist, std::f64::consts::SQRT_2, epsilon = 1e-10);
    }

    #[test]
    fn test_discrete_frechet_respects_ordering() {
        // Reversing one path forces the leash across the whole extent
        let p = path(&[(0.0, 0.0), (3.0, 4.0)]);
        let q = path(&[(3.0, 4.0), (0.0, 0.0)]);

        assert_abs_diff_eq!(discrete_frechet_distance(&p, &q), 5.0, epsilon = 1e-10);
    }

    #[test]
    fn test_discrete_frechet_empty() {
        let p: Vec<Coord<f64>> = vec![];
        let q = path(&[(0.0, 0.0)]);

        assert_eq!(discrete_frechet_distance(&p, &q), 0.0);
        assert_eq!(discrete_frechet_distance_linear_space(&q, &p), 0.0);
    }

    #[test]
    fn test_linear_space_matches_standard() {
        let p = path(&[(0.0, 0.0), (1.0, 1.0), (2.0, 0.0), (3.0, 1.0)]);
        let q = path(&[(0.0, 0.5), (1.0, 0.5), (2.0, 0.5)]);

        let full = discrete_frechet_distance(&p, &q);
        let linear = discrete_frechet_distance_linear_space(&p, &q);
        assert_abs_diff_eq!(full, linear, epsilon = 1e-12);

        let full = discrete_frechet_distance(&q, &p);
        let linear = discrete_frechet_distance_linear_space(&q, &p);
        assert_abs_diff_eq!(full, linear, epsilon = 1e-12);
    }

    #[test]
    fn test_frechet_symmetric() {
        let p = path(&[(0.0, 0.0), (1.0, 1.0), (2.0, 0.0)]);
        let q = path(&[(0.0, 0.5), (2.0, 0.5)]);

        assert_abs_diff_eq!(
            discrete_frechet_distance(&p, &q),
            discrete_frechet_distance(&q, &p),
            epsilon = 1e-10
        );
    }

    #[test]
    fn test_f32() {
        let p: Vec<Coord<f32>> = vec![coord! { x: 0.0, y: 0.0 }, coord! { x: 1.0, y: 0.0 }];
        let q: Vec<Coord<f32>> = vec![coord! { x: 0.0, y: 1.0 }, coord! { x: 1.0, y: 1.0 }];

        let dist = discrete_frechet_distance_linear_space(&p, &q);
        assert!((dist - 1.0).abs() < 0.001);
    }
}
