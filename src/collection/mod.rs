//! Attribute-carrying geometry collections.
//!
//! A [`FeatureCollection`] is raw input: any geometry (or none) per row. It is
//! checked once by [`LineCollection::from_features`], which guarantees the
//! invariants the join engine relies on: every row holds a valid line, and
//! the collection is homogeneous.

mod flatten;

pub use flatten::{flatten, SOURCE_INDEX};

use crate::error::{InputError, Result, SimilarityError};
use crate::geometry::{GeometryKind, LineGeometry};
use geo::Geometry;
use std::collections::BTreeMap;
use std::fmt;

/// A single attribute value.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum AttrValue {
    /// Missing value.
    Null,
    /// Boolean value.
    Bool(bool),
    /// Integer value.
    Int(i64),
    /// Floating-point value.
    Float(f64),
    /// Text value.
    Text(String),
}

impl From<bool> for AttrValue {
    fn from(value: bool) -> Self {
        AttrValue::Bool(value)
    }
}

impl From<i64> for AttrValue {
    fn from(value: i64) -> Self {
        AttrValue::Int(value)
    }
}

impl From<f64> for AttrValue {
    fn from(value: f64) -> Self {
        AttrValue::Float(value)
    }
}

impl From<&str> for AttrValue {
    fn from(value: &str) -> Self {
        AttrValue::Text(value.to_string())
    }
}

impl From<String> for AttrValue {
    fn from(value: String) -> Self {
        AttrValue::Text(value)
    }
}

/// Named attributes of a row, ordered by name.
pub type Attributes = BTreeMap<String, AttrValue>;

/// Coordinate reference system identity, such as `EPSG:4326`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Crs(pub String);

impl Crs {
    /// Creates a CRS identity from its name.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }
}

impl fmt::Display for Crs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One input row: attributes plus an optional (possibly non-line) geometry.
#[derive(Debug, Clone, PartialEq)]
pub struct Feature {
    /// Non-geometry columns.
    pub attributes: Attributes,
    /// Geometry column; `None` is a null geometry.
    pub geometry: Option<Geometry<f64>>,
}

impl Feature {
    /// Creates a feature with no attributes.
    pub fn new(geometry: impl Into<Geometry<f64>>) -> Self {
        Self {
            attributes: Attributes::new(),
            geometry: Some(geometry.into()),
        }
    }

    /// Adds an attribute.
    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<AttrValue>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }
}

/// Unvalidated input collection.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FeatureCollection {
    /// Coordinate reference system shared by all rows.
    pub crs: Option<Crs>,
    /// Rows in input order.
    pub features: Vec<Feature>,
}

impl FeatureCollection {
    /// Creates a collection without a CRS.
    pub fn new(features: Vec<Feature>) -> Self {
        Self { crs: None, features }
    }

    /// Sets the CRS.
    pub fn with_crs(mut self, crs: Crs) -> Self {
        self.crs = Some(crs);
        self
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.features.len()
    }

    /// Returns `true` if the collection has no rows.
    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }
}

/// A validated row.
#[derive(Debug, Clone, PartialEq)]
pub struct LineRow {
    /// Non-geometry columns.
    pub attributes: Attributes,
    /// Line geometry.
    pub geometry: LineGeometry,
}

/// A validated, line-only collection.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LineCollection {
    /// Coordinate reference system shared by all rows.
    pub crs: Option<Crs>,
    /// Rows in order.
    pub rows: Vec<LineRow>,
}

impl LineCollection {
    /// Creates a collection from already validated rows.
    pub fn new(crs: Option<Crs>, rows: Vec<LineRow>) -> Self {
        Self { crs, rows }
    }

    /// Validates raw features.
    ///
    /// `position` is the 1-based position of the collection in the request
    /// and only appears in error messages.
    ///
    /// Fails with [`SimilarityError::InvalidGeometry`] for a null geometry,
    /// then with [`SimilarityError::MixedGeometry`] if several geometry
    /// categories are present, then with
    /// [`SimilarityError::UnsupportedGeometry`] if the single category is not
    /// lines, and finally with [`SimilarityError::InvalidGeometry`] for
    /// degenerate lines. The mix check comes first, so lines mixed with
    /// points or polygons report `MixedGeometry` rather than the foreign
    /// category.
    pub fn from_features(collection: &FeatureCollection, position: usize) -> Result<Self> {
        let geometries = collection
            .features
            .iter()
            .enumerate()
            .map(|(row, feature)| {
                feature.geometry.as_ref().ok_or_else(|| {
                    SimilarityError::invalid_geometry(format!(
                        "collection {position} row {row} has a null geometry"
                    ))
                })
            })
            .collect::<Result<Vec<_>>>()?;

        let mut kinds: Vec<GeometryKind> = Vec::new();
        for geometry in &geometries {
            let kind = GeometryKind::of(geometry);
            if !kinds.contains(&kind) {
                kinds.push(kind);
            }
        }

        if kinds.len() > 1 {
            return Err(SimilarityError::MixedGeometry {
                collection: position,
            });
        }
        if let Some(&kind) = kinds.first() {
            if kind != GeometryKind::Line {
                return Err(SimilarityError::UnsupportedGeometry {
                    collection: position,
                    kind: kind.name(),
                });
            }
        }

        let rows = collection
            .features
            .iter()
            .zip(geometries)
            .enumerate()
            .map(|(row, (feature, geometry))| {
                let geometry = LineGeometry::try_from(geometry).map_err(|err| match err {
                    SimilarityError::InvalidGeometry { reason } => SimilarityError::invalid_geometry(
                        format!("collection {position} row {row}: {reason}"),
                    ),
                    other => other,
                })?;
                Ok(LineRow {
                    attributes: feature.attributes.clone(),
                    geometry,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            crs: collection.crs.clone(),
            rows,
        })
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns `true` if the collection has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Checks the preconditions of a collection-to-collection join.
///
/// Both collections must be non-empty and share one CRS identity.
pub fn check_compatible(left: &FeatureCollection, right: &FeatureCollection) -> Result<()> {
    if left.is_empty() {
        return Err(InputError::EmptyCollection { collection: 1 }.into());
    }
    if right.is_empty() {
        return Err(InputError::EmptyCollection { collection: 2 }.into());
    }
    if left.crs != right.crs {
        let name = |crs: &Option<Crs>| crs.as_ref().map_or_else(|| "None".to_string(), Crs::to_string);
        return Err(SimilarityError::CrsMismatch {
            left: name(&left.crs),
            right: name(&right.crs),
        });
    }
    Ok(())
}
