//! Options for collection-to-collection joins.

use super::CancelToken;
use crate::compare::CompareOptions;
use crate::error::{InputError, Result, SimilarityError};
use std::fmt;
use std::str::FromStr;
use std::time::Instant;

/// How candidate pairs are generated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum JoinStrategy {
    /// Every row of the first collection against every row of the second.
    Cartesian,
    /// Only pairs whose bounding boxes overlap, found through a spatial index.
    #[default]
    #[cfg_attr(feature = "serde", serde(rename = "sindex"))]
    SpatialIndex,
}

impl JoinStrategy {
    /// Name accepted by [`FromStr`].
    pub fn name(self) -> &'static str {
        match self {
            JoinStrategy::Cartesian => "cartesian",
            JoinStrategy::SpatialIndex => "sindex",
        }
    }
}

impl fmt::Display for JoinStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for JoinStrategy {
    type Err = SimilarityError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "cartesian" => Ok(JoinStrategy::Cartesian),
            "sindex" => Ok(JoinStrategy::SpatialIndex),
            other => Err(InputError::invalid_option(
                "how",
                format!("expected 'cartesian' or 'sindex', got '{other}'"),
            )
            .into()),
        }
    }
}

/// Which side's geometry a result row keeps.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum KeepGeom {
    /// Geometry of the row from the first collection.
    #[default]
    #[cfg_attr(feature = "serde", serde(alias = "geometry_x"))]
    Left,
    /// Geometry of the row from the second collection.
    #[cfg_attr(feature = "serde", serde(alias = "geometry_y"))]
    Right,
}

impl FromStr for KeepGeom {
    type Err = SimilarityError;

    /// Accepts `left` and `right`, plus the column-name spellings
    /// `geometry_x` and `geometry_y`.
    fn from_str(s: &str) -> Result<Self> {
        match s {
            "left" | "geometry_x" => Ok(KeepGeom::Left),
            "right" | "geometry_y" => Ok(KeepGeom::Right),
            other => Err(InputError::invalid_option(
                "keep_geom",
                format!("expected 'left' or 'right', got '{other}'"),
            )
            .into()),
        }
    }
}

/// Options for [`similarity`](crate::similarity()).
///
/// # Example
///
/// ```
/// use linesim::{CompareOptions, JoinStrategy, KeepGeom, SimilarityOptions};
///
/// let options = SimilarityOptions::default()
///     .compare(CompareOptions::default().precision(3))
///     .how(JoinStrategy::Cartesian)
///     .keep_geom(KeepGeom::Right)
///     .drop_zeroes(true);
/// assert!(options.validate().is_ok());
///
/// // Pruning by bounding box is only sound when lines are clipped
/// let unclipped = SimilarityOptions::default().compare(CompareOptions::default().clip(false));
/// assert!(unclipped.validate().is_err());
/// ```
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SimilarityOptions {
    /// Per-pair comparison options.
    pub compare: CompareOptions,
    /// Candidate generation strategy.
    pub how: JoinStrategy,
    /// Geometry kept on each result row.
    pub keep_geom: KeepGeom,
    /// Omit pairs that scored 0.
    pub drop_zeroes: bool,
    /// Cooperative cancellation signal, checked before each pair.
    #[cfg_attr(feature = "serde", serde(skip))]
    pub cancel: Option<CancelToken>,
    /// Point in time after which the join gives up.
    #[cfg_attr(feature = "serde", serde(skip))]
    pub deadline: Option<Instant>,
}

impl SimilarityOptions {
    /// Sets the per-pair comparison options.
    pub fn compare(mut self, compare: CompareOptions) -> Self {
        self.compare = compare;
        self
    }

    /// Sets the join strategy.
    pub fn how(mut self, how: JoinStrategy) -> Self {
        self.how = how;
        self
    }

    /// Sets which geometry is kept.
    pub fn keep_geom(mut self, keep_geom: KeepGeom) -> Self {
        self.keep_geom = keep_geom;
        self
    }

    /// Enables or disables dropping zero scores.
    pub fn drop_zeroes(mut self, drop_zeroes: bool) -> Self {
        self.drop_zeroes = drop_zeroes;
        self
    }

    /// Attaches a cancellation token.
    pub fn cancel(mut self, token: CancelToken) -> Self {
        self.cancel = Some(token);
        self
    }

    /// Sets a deadline.
    pub fn deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Validates the comparison options and the strategy/clip combination.
    pub fn validate(&self) -> Result<()> {
        self.compare.validate()?;
        if self.how == JoinStrategy::SpatialIndex && !self.compare.clip {
            return Err(InputError::invalid_option(
                "how",
                "'sindex' requires clipping, use 'cartesian' with clip disabled",
            )
            .into());
        }
        Ok(())
    }
}
