//! Clipping line geometries to an axis-aligned rectangle.
//!
//! Each segment is clipped with the Liang–Barsky parametric test against the
//! closed rectangle. Consecutive clipped segments that meet at an unclipped
//! vertex are stitched back into one part, so a line lying fully inside the
//! rectangle comes back with exactly its original vertices.
//!
//! The rectangle may be degenerate (zero width or height); a line running
//! along it is kept.

use super::LineGeometry;
use geo::{Coord, Euclidean, Length, LineString, Rect};

/// A segment clipped to a rectangle, with the parameters it was cut at.
#[derive(Debug, Clone, Copy, PartialEq)]
struct ClippedSegment {
    start: Coord<f64>,
    end: Coord<f64>,
    t0: f64,
    t1: f64,
}

/// Clips every part of `line` to the closed rectangle `rect`.
///
/// Returns `None` if nothing of positive length remains. Pieces that touch
/// the rectangle in a single point are discarded.
///
/// # Example
///
/// ```
/// use geo::{coord, line_string, Rect};
/// use linesim::geometry::{clip_to_rect, LineGeometry};
///
/// let line = LineGeometry::single(line_string![(x: 0.0, y: 0.0), (x: 2.0, y: 2.0)]).unwrap();
/// let rect = Rect::new(coord! { x: 0.0, y: 0.0 }, coord! { x: 1.0, y: 1.0 });
///
/// let clipped = clip_to_rect(&line, rect).unwrap();
/// assert_eq!(clipped.coordinates(), vec![coord! { x: 0.0, y: 0.0 }, coord! { x: 1.0, y: 1.0 }]);
/// ```
pub fn clip_to_rect(line: &LineGeometry, rect: Rect<f64>) -> Option<LineGeometry> {
    let mut parts = Vec::new();

    for part in line.parts() {
        let mut run: Vec<Coord<f64>> = Vec::new();

        for segment in part.lines() {
            let Some(clipped) = clip_segment(segment.start, segment.end, rect) else {
                flush_run(&mut run, &mut parts);
                continue;
            };

            // Only touches the rectangle in one point
            if clipped.t1 <= clipped.t0 && segment.start != segment.end {
                flush_run(&mut run, &mut parts);
                continue;
            }

            if clipped.t0 > 0.0 || run.is_empty() {
                flush_run(&mut run, &mut parts);
                run.push(clipped.start);
            }
            run.push(clipped.end);

            if clipped.t1 < 1.0 {
                flush_run(&mut run, &mut parts);
            }
        }

        flush_run(&mut run, &mut parts);
    }

    LineGeometry::from_valid_parts(parts)
}

/// Moves a finished run into `parts` if it forms a valid line part.
fn flush_run(run: &mut Vec<Coord<f64>>, parts: &mut Vec<LineString<f64>>) {
    if run.len() >= 2 {
        let part = LineString::new(std::mem::take(run));
        let length = Euclidean.length(&part);
        if length.is_finite() && length > 0.0 {
            parts.push(part);
        }
    }
    run.clear();
}

/// Liang–Barsky clip of the segment `start -> end` against a closed rectangle.
fn clip_segment(start: Coord<f64>, end: Coord<f64>, rect: Rect<f64>) -> Option<ClippedSegment> {
    let min = rect.min();
    let max = rect.max();
    let d = end - start;

    let mut t0 = 0.0_f64;
    let mut t1 = 1.0_f64;

    let boundaries = [
        (-d.x, start.x - min.x),
        (d.x, max.x - start.x),
        (-d.y, start.y - min.y),
        (d.y, max.y - start.y),
    ];

    for (p, q) in boundaries {
        if p == 0.0 {
            // Parallel to this boundary: either fully inside or fully outside it
            if q < 0.0 {
                return None;
            }
            continue;
        }

        let t = q / p;
        if p < 0.0 {
            if t > t1 {
                return None;
            }
            if t > t0 {
                t0 = t;
            }
        } else {
            if t < t0 {
                return None;
            }
            if t < t1 {
                t1 = t;
            }
        }
    }

    let point_at = |t: f64| {
        let p = start + d * t;
        Coord {
            x: p.x.clamp(min.x, max.x),
            y: p.y.clamp(min.y, max.y),
        }
    };

    Some(ClippedSegment {
        start: if t0 == 0.0 { start } else { point_at(t0) },
        end: if t1 == 1.0 { end } else { point_at(t1) },
        t0,
        t1,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use geo::{coord, line_string, MultiLineString};

    fn rect(x0: f64, y0: f64, x1: f64, y1: f64) -> Rect<f64> {
        Rect::new(coord! { x: x0, y: y0 }, coord! { x: x1, y: y1 })
    }

    fn single(coords: &[(f64, f64)]) -> LineGeometry {
        LineGeometry::single(LineString::from(coords.to_vec())).unwrap()
    }

    #[test]
    fn test_clip_segment_inside() {
        let s = clip_segment(coord! { x: 1.0, y: 1.0 }, coord! { x: 2.0, y: 2.0 }, rect(0.0, 0.0, 3.0, 3.0))
            .unwrap();
        assert_eq!(s.t0, 0.0);
        assert_eq!(s.t1, 1.0);
        assert_eq!(s.end, coord! { x: 2.0, y: 2.0 });
    }

    #[test]
    fn test_clip_segment_outside() {
        let s = clip_segment(coord! { x: 5.0, y: 5.0 }, coord! { x: 6.0, y: 7.0 }, rect(0.0, 0.0, 3.0, 3.0));
        assert!(s.is_none());
    }

    #[test]
    fn test_clip_segment_crossing() {
        let s = clip_segment(coord! { x: -1.0, y: 1.0 }, coord! { x: 4.0, y: 1.0 }, rect(0.0, 0.0, 3.0, 3.0))
            .unwrap();
        assert_abs_diff_eq!(s.start.x, 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(s.end.x, 3.0, epsilon = 1e-12);
        assert_abs_diff_eq!(s.t0, 0.2, epsilon = 1e-12);
        assert_abs_diff_eq!(s.t1, 0.8, epsilon = 1e-12);
    }

    #[test]
    fn test_fully_inside_keeps_vertices() {
        let line = single(&[(0.1, 0.3), (0.7, 0.2), (0.9, 0.9)]);
        let clipped = clip_to_rect(&line, rect(0.1, 0.2, 0.9, 0.9)).unwrap();
        assert_eq!(clipped, line);
    }

    #[test]
    fn test_clip_splits_into_parts() {
        // Leaves the rectangle through the top and comes back
        let line = single(&[(0.0, 0.5), (1.0, 2.0), (2.0, 0.5)]);
        let clipped = clip_to_rect(&line, rect(0.0, 0.0, 2.0, 1.0)).unwrap();

        assert_eq!(clipped.num_parts(), 2);
        let coords = clipped.coordinates();
        assert_eq!(coords[0], coord! { x: 0.0, y: 0.5 });
        assert_abs_diff_eq!(coords[1].y, 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(coords[2].y, 1.0, epsilon = 1e-12);
        assert_eq!(coords[3], coord! { x: 2.0, y: 0.5 });
    }

    #[test]
    fn test_clip_along_degenerate_rect() {
        // Horizontal line, zero-height rectangle
        let line = single(&[(0.0, 0.0), (2.0, 0.0)]);
        let clipped = clip_to_rect(&line, rect(0.5, 0.0, 1.5, 0.0)).unwrap();
        assert_eq!(
            clipped.coordinates(),
            vec![coord! { x: 0.5, y: 0.0 }, coord! { x: 1.5, y: 0.0 }]
        );
    }

    #[test]
    fn test_corner_touch_is_empty() {
        let line = single(&[(0.0, 2.0), (2.0, 0.0)]);
        assert!(clip_to_rect(&line, rect(0.0, 0.0, 1.0, 1.0)).is_none());
    }

    #[test]
    fn test_multi_parts_stay_separate() {
        let line = LineGeometry::multi(MultiLineString::new(vec![
            line_string![(x: 0.0, y: 0.0), (x: 1.0, y: 1.0)],
            line_string![(x: 1.0, y: 1.0), (x: 2.0, y: 2.0)],
        ]))
        .unwrap();

        let clipped = clip_to_rect(&line, rect(0.0, 0.0, 2.0, 2.0)).unwrap();
        assert_eq!(clipped, line);

        let clipped = clip_to_rect(&line, rect(0.0, 0.0, 0.5, 0.5)).unwrap();
        assert_eq!(clipped.num_parts(), 1);
    }
}
