//! Validated single- and multi-part line geometries.

use crate::error::{Result, SimilarityError};
use geo::{Coord, Euclidean, Geometry, Length, LineString, MultiLineString};

/// Geometry category of a raw [`geo::Geometry`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GeometryKind {
    /// `LineString`, `MultiLineString` or `Line`.
    Line,
    /// `Polygon`, `MultiPolygon`, `Rect` or `Triangle`.
    Polygon,
    /// `Point` or `MultiPoint`.
    Point,
    /// `GeometryCollection`.
    Other,
}

impl GeometryKind {
    /// Classifies a geometry without inspecting its coordinates.
    pub fn of(geometry: &Geometry<f64>) -> Self {
        match geometry {
            Geometry::Line(_) | Geometry::LineString(_) | Geometry::MultiLineString(_) => {
                GeometryKind::Line
            }
            Geometry::Polygon(_)
            | Geometry::MultiPolygon(_)
            | Geometry::Rect(_)
            | Geometry::Triangle(_) => GeometryKind::Polygon,
            Geometry::Point(_) | Geometry::MultiPoint(_) => GeometryKind::Point,
            Geometry::GeometryCollection(_) => GeometryKind::Other,
        }
    }

    /// Lowercase name used in error messages.
    pub fn name(self) -> &'static str {
        match self {
            GeometryKind::Line => "line",
            GeometryKind::Polygon => "polygon",
            GeometryKind::Point => "point",
            GeometryKind::Other => "geometry collection",
        }
    }
}

/// A line geometry that is safe to score.
///
/// Every part has at least two vertices and a strictly positive, finite
/// length, so a line's length can always be used as a divisor.
#[derive(Debug, Clone, PartialEq)]
pub enum LineGeometry {
    /// A single polyline.
    Single(LineString<f64>),
    /// An ordered sequence of polylines.
    Multi(MultiLineString<f64>),
}

impl LineGeometry {
    /// Creates a single-part line, validating its vertices.
    pub fn single(line: LineString<f64>) -> Result<Self> {
        validate_part(&line)?;
        Ok(LineGeometry::Single(line))
    }

    /// Creates a multi-part line, validating every part.
    pub fn multi(lines: MultiLineString<f64>) -> Result<Self> {
        if lines.0.is_empty() {
            return Err(SimilarityError::invalid_geometry(
                "multi-line geometry has no parts",
            ));
        }
        for part in &lines.0 {
            validate_part(part)?;
        }
        Ok(LineGeometry::Multi(lines))
    }

    /// Creates a single- or multi-part line from parts that were already validated.
    ///
    /// Returns `None` when `parts` is empty.
    pub(crate) fn from_valid_parts(mut parts: Vec<LineString<f64>>) -> Option<Self> {
        match parts.len() {
            0 => None,
            1 => parts.pop().map(LineGeometry::Single),
            _ => Some(LineGeometry::Multi(MultiLineString::new(parts))),
        }
    }

    /// Returns the parts of this line in order.
    pub fn parts(&self) -> &[LineString<f64>] {
        match self {
            LineGeometry::Single(line) => std::slice::from_ref(line),
            LineGeometry::Multi(lines) => &lines.0,
        }
    }

    /// Returns the number of parts (1 for a single line).
    pub fn num_parts(&self) -> usize {
        self.parts().len()
    }

    /// Returns `true` for a multi-part geometry.
    pub fn is_multi(&self) -> bool {
        matches!(self, LineGeometry::Multi(_))
    }

    /// Returns the ordered vertex sequence of this line.
    ///
    /// A multi-line yields the vertices of each part in part order. Shared
    /// endpoints between consecutive parts are kept.
    ///
    /// # Example
    ///
    /// ```
    /// use geo::{coord, line_string, MultiLineString};
    /// use linesim::LineGeometry;
    ///
    /// let multi = LineGeometry::multi(MultiLineString::new(vec![
    ///     line_string![(x: 0.0, y: 0.0), (x: 1.0, y: 1.0)],
    ///     line_string![(x: 1.0, y: 1.0), (x: 2.0, y: 2.0)],
    /// ]))
    /// .unwrap();
    ///
    /// let coords = multi.coordinates();
    /// assert_eq!(coords.len(), 4);
    /// assert_eq!(coords[2], coord! { x: 1.0, y: 1.0 });
    /// ```
    pub fn coordinates(&self) -> Vec<Coord<f64>> {
        let capacity = self.parts().iter().map(|part| part.0.len()).sum();
        let mut coords = Vec::with_capacity(capacity);
        for part in self.parts() {
            coords.extend_from_slice(&part.0);
        }
        coords
    }

    /// Converts back into a [`geo::Geometry`].
    pub fn to_geometry(&self) -> Geometry<f64> {
        match self {
            LineGeometry::Single(line) => Geometry::LineString(line.clone()),
            LineGeometry::Multi(lines) => Geometry::MultiLineString(lines.clone()),
        }
    }
}

impl TryFrom<Geometry<f64>> for LineGeometry {
    type Error = SimilarityError;

    fn try_from(geometry: Geometry<f64>) -> Result<Self> {
        match geometry {
            Geometry::LineString(line) => LineGeometry::single(line),
            Geometry::MultiLineString(lines) => LineGeometry::multi(lines),
            Geometry::Line(line) => LineGeometry::single(LineString::from(vec![line.start, line.end])),
            other => Err(SimilarityError::invalid_geometry(format!(
                "expected a line geometry but got a {}",
                GeometryKind::of(&other).name()
            ))),
        }
    }
}

impl TryFrom<&Geometry<f64>> for LineGeometry {
    type Error = SimilarityError;

    fn try_from(geometry: &Geometry<f64>) -> Result<Self> {
        match geometry {
            Geometry::LineString(_) | Geometry::MultiLineString(_) | Geometry::Line(_) => {
                LineGeometry::try_from(geometry.clone())
            }
            other => Err(SimilarityError::invalid_geometry(format!(
                "expected a line geometry but got a {}",
                GeometryKind::of(other).name()
            ))),
        }
    }
}

impl From<LineGeometry> for Geometry<f64> {
    fn from(line: LineGeometry) -> Self {
        match line {
            LineGeometry::Single(line) => Geometry::LineString(line),
            LineGeometry::Multi(lines) => Geometry::MultiLineString(lines),
        }
    }
}

/// Extracts the ordered vertices of a raw line geometry.
///
/// Fails with [`SimilarityError::InvalidGeometry`] for non-line or degenerate
/// geometries.
pub fn extract(geometry: &Geometry<f64>) -> Result<Vec<Coord<f64>>> {
    LineGeometry::try_from(geometry).map(|line| line.coordinates())
}

/// Like [`extract`], treating `None` as a null geometry.
pub fn extract_optional(geometry: Option<&Geometry<f64>>) -> Result<Vec<Coord<f64>>> {
    match geometry {
        Some(geometry) => extract(geometry),
        None => Err(SimilarityError::invalid_geometry("geometry is null")),
    }
}

fn validate_part(line: &LineString<f64>) -> Result<()> {
    if line.0.len() < 2 {
        return Err(SimilarityError::invalid_geometry(format!(
            "line part needs at least 2 points, got {}",
            line.0.len()
        )));
    }
    let length = Euclidean.length(line);
    if !length.is_finite() || length <= 0.0 {
        return Err(SimilarityError::invalid_geometry(format!(
            "line part must have positive finite length, got {length}"
        )));
    }
    Ok(())
}
