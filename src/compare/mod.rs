//! Pairwise line comparison.
//!
//! [`compare`] scores two lines in two stages:
//!
//! 1. [`clip_lines`] restricts both lines to the overlap of their bounding
//!    boxes and decides whether enough of each line is left to compare.
//! 2. [`score`] turns the discrete Fréchet distance between the surviving
//!    vertex sequences into a similarity in `[0, 1]`.
//!
//! # Example
//!
//! ```
//! use geo::line_string;
//! use linesim::{compare, CompareOptions, LineGeometry};
//!
//! let line1 = LineGeometry::single(line_string![(x: 0.0, y: 0.0), (x: 1.0, y: 1.0)]).unwrap();
//! let line2 = LineGeometry::single(line_string![(x: 0.0, y: 0.0), (x: 2.0, y: 2.0)]).unwrap();
//!
//! // Less than 70% of line2 lies in the shared box
//! let strict = CompareOptions::default().clip_max(0.7);
//! assert_eq!(compare(&line1, &line2, &strict).unwrap(), 0.0);
//!
//! // The clipped part of line2 matches line1 exactly
//! let lenient = CompareOptions::default().clip_max(0.2);
//! assert_eq!(compare(&line1, &line2, &lenient).unwrap(), 1.0);
//! ```

mod clip;
mod options;
mod score;

pub use clip::{clip_lines, overlap, ClipOutcome, ZeroReason};
pub use options::{CompareOptions, SimilarityMethod};
pub use score::{round_to, score, score_with};

use crate::error::Result;
use crate::geometry::{GeometryOps, LineGeometry, PlanarOps};
use log::trace;

/// Scores the similarity of `line1` to `line2` with the default geometry backend.
///
/// Returns a value in `[0, 1]`, where 1 means identical. The score is
/// normalized by the length of `line1`, so the argument order matters.
pub fn compare(line1: &LineGeometry, line2: &LineGeometry, options: &CompareOptions) -> Result<f64> {
    compare_with(&PlanarOps, line1, line2, options)
}

/// Like [`compare`], using `ops` for all geometric work.
pub fn compare_with<O: GeometryOps + ?Sized>(
    ops: &O,
    line1: &LineGeometry,
    line2: &LineGeometry,
    options: &CompareOptions,
) -> Result<f64> {
    options.validate()?;
    compare_unchecked(ops, line1, line2, options)
}

/// Comparison for options that were already validated.
pub(crate) fn compare_unchecked<O: GeometryOps + ?Sized>(
    ops: &O,
    line1: &LineGeometry,
    line2: &LineGeometry,
    options: &CompareOptions,
) -> Result<f64> {
    let length1 = clip::positive_length(ops, line1)?;

    match clip_lines(ops, line1, line2, options.clip, options.clip_max)? {
        ClipOutcome::Coordinates(coords1, coords2) => {
            score_with(options.method, &coords1, &coords2, length1, options.precision)
        }
        ClipOutcome::Zero(reason) => {
            trace!("pair scored 0: {reason:?}");
            Ok(0.0)
        }
    }
}
