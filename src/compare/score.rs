//! Normalized Fréchet similarity score.

use super::SimilarityMethod;
use crate::error::{Result, SimilarityError};
use crate::measure::discrete_frechet_distance_linear_space;
use geo::Coord;

/// Scores two vertex sequences as `round(exp(-frechet(a, b) / length_a), precision)`.
///
/// `length_a` is the length of the first, unclipped line. The normalization
/// only uses the first line, so swapping the arguments generally changes the
/// score.
///
/// Fails with [`SimilarityError::InvalidGeometry`] if `length_a` is not
/// strictly positive and finite.
///
/// # Example
///
/// ```
/// use geo::coord;
/// use linesim::compare::score;
///
/// let a = vec![coord! { x: 0.0, y: 0.0 }, coord! { x: 1.0, y: 0.0 }];
/// assert_eq!(score(&a, &a, 1.0, 6).unwrap(), 1.0);
///
/// let b = vec![coord! { x: 0.0, y: 1.0 }, coord! { x: 1.0, y: 1.0 }];
/// // exp(-1 / 1)
/// assert_eq!(score(&a, &b, 1.0, 3).unwrap(), 0.368);
/// ```
pub fn score(coords_a: &[Coord<f64>], coords_b: &[Coord<f64>], length_a: f64, precision: u32) -> Result<f64> {
    score_with(SimilarityMethod::FrechetDist, coords_a, coords_b, length_a, precision)
}

/// Scores two vertex sequences with the given method.
pub fn score_with(
    method: SimilarityMethod,
    coords_a: &[Coord<f64>],
    coords_b: &[Coord<f64>],
    length_a: f64,
    precision: u32,
) -> Result<f64> {
    if !length_a.is_finite() || length_a <= 0.0 {
        return Err(SimilarityError::invalid_geometry(format!(
            "baseline line length must be positive and finite, got {length_a}"
        )));
    }

    let similarity = match method {
        SimilarityMethod::FrechetDist => {
            let raw = discrete_frechet_distance_linear_space(coords_a, coords_b);
            (-raw / length_a).exp()
        }
    };

    Ok(round_to(similarity, precision))
}

/// Rounds half away from zero to `precision` decimal digits.
///
/// Precisions beyond what `f64` can represent return `value` unchanged.
pub fn round_to(value: f64, precision: u32) -> f64 {
    if precision > 15 {
        return value;
    }
    let factor = 10f64.powi(precision as i32);
    (value * factor).round() / factor
}
