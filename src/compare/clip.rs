//! Restricting two lines to their shared bounding-box region.

use crate::error::{Result, SimilarityError};
use crate::geometry::{GeometryOps, LineGeometry};
use geo::{coord, Coord, Rect};

/// Why a pair was scored 0 without computing a distance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ZeroReason {
    /// The bounding boxes of the two lines do not overlap.
    DisjointBounds,
    /// At least one line has nothing inside the shared box.
    EmptyIntersection,
    /// At least one line kept less than the minimum coverage ratio.
    InsufficientCoverage {
        /// Fraction of the first line's length inside the shared box.
        ratio_a: f64,
        /// Fraction of the second line's length inside the shared box.
        ratio_b: f64,
    },
}

/// Result of clipping a pair of lines.
#[derive(Debug, Clone, PartialEq)]
pub enum ClipOutcome {
    /// Vertex sequences to score, first line then second line.
    Coordinates(Vec<Coord<f64>>, Vec<Coord<f64>>),
    /// The pair scores 0.
    Zero(ZeroReason),
}

impl ClipOutcome {
    /// Returns `true` if the pair short-circuits to a zero score.
    pub fn is_zero(&self) -> bool {
        matches!(self, ClipOutcome::Zero(_))
    }
}

/// Returns the overlap of two boxes, or `None` if they are disjoint.
///
/// Boxes sharing only an edge or a corner overlap in a degenerate rectangle.
pub fn overlap(a: Rect<f64>, b: Rect<f64>) -> Option<Rect<f64>> {
    let left = a.min().x.max(b.min().x);
    let bottom = a.min().y.max(b.min().y);
    let right = a.max().x.min(b.max().x);
    let top = a.max().y.min(b.max().y);

    if left > right || bottom > top {
        return None;
    }
    Some(Rect::new(coord! { x: left, y: bottom }, coord! { x: right, y: top }))
}

/// Clips two lines to the overlap of their bounding boxes.
///
/// With `clip` disabled the vertices of both lines are returned unchanged
/// and `ops` is never consulted. Otherwise the pair scores 0 when the boxes
/// are disjoint, when either clipped line is empty, or when either line keeps
/// less than `min_coverage` of its length.
pub fn clip_lines<O: GeometryOps + ?Sized>(
    ops: &O,
    line_a: &LineGeometry,
    line_b: &LineGeometry,
    clip: bool,
    min_coverage: f64,
) -> Result<ClipOutcome> {
    if !clip {
        return Ok(ClipOutcome::Coordinates(
            line_a.coordinates(),
            line_b.coordinates(),
        ));
    }

    let Some(shared) = overlap(ops.bounds(line_a), ops.bounds(line_b)) else {
        return Ok(ClipOutcome::Zero(ZeroReason::DisjointBounds));
    };

    let (Some(clipped_a), Some(clipped_b)) = (
        ops.intersection(line_a, shared),
        ops.intersection(line_b, shared),
    ) else {
        return Ok(ClipOutcome::Zero(ZeroReason::EmptyIntersection));
    };

    let ratio_a = ops.length(&clipped_a) / positive_length(ops, line_a)?;
    let ratio_b = ops.length(&clipped_b) / positive_length(ops, line_b)?;

    if ratio_a < min_coverage || ratio_b < min_coverage {
        return Ok(ClipOutcome::Zero(ZeroReason::InsufficientCoverage {
            ratio_a,
            ratio_b,
        }));
    }

    Ok(ClipOutcome::Coordinates(
        clipped_a.coordinates(),
        clipped_b.coordinates(),
    ))
}

/// Length of `line`, rejecting zero or non-finite values.
pub(crate) fn positive_length<O: GeometryOps + ?Sized>(ops: &O, line: &LineGeometry) -> Result<f64> {
    let length = ops.length(line);
    if length.is_finite() && length > 0.0 {
        Ok(length)
    } else {
        Err(SimilarityError::invalid_geometry(format!(
            "line length must be positive and finite, got {length}"
        )))
    }
}
