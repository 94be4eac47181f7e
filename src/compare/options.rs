//! Options for pairwise comparison.

use crate::error::{InputError, Result, SimilarityError};
use std::fmt;
use std::str::FromStr;

/// Curve similarity measure.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum SimilarityMethod {
    /// `exp(-frechet(a, b) / length(a))`.
    #[default]
    FrechetDist,
}

impl SimilarityMethod {
    /// Every supported method.
    pub const ALL: [SimilarityMethod; 1] = [SimilarityMethod::FrechetDist];

    /// Name accepted by [`FromStr`].
    pub fn name(self) -> &'static str {
        match self {
            SimilarityMethod::FrechetDist => "frechet_dist",
        }
    }
}

impl fmt::Display for SimilarityMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SimilarityMethod {
    type Err = SimilarityError;

    fn from_str(s: &str) -> Result<Self> {
        SimilarityMethod::ALL
            .into_iter()
            .find(|method| method.name() == s)
            .ok_or_else(|| SimilarityError::UnsupportedMethod {
                method: s.to_string(),
            })
    }
}

/// Options for [`compare`](crate::compare()).
///
/// # Example
///
/// ```
/// use linesim::CompareOptions;
///
/// let options = CompareOptions::default().precision(3).clip_max(0.2);
/// assert!(options.clip);
/// assert!(options.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CompareOptions {
    /// Similarity measure.
    pub method: SimilarityMethod,
    /// Decimal digits the score is rounded to.
    pub precision: u32,
    /// Clip both lines to their shared bounding box before scoring.
    pub clip: bool,
    /// Minimum fraction of each line's length that must survive clipping.
    /// Below it the score is 0. Only used when `clip` is set.
    pub clip_max: f64,
}

impl Default for CompareOptions {
    fn default() -> Self {
        Self {
            method: SimilarityMethod::FrechetDist,
            precision: 6,
            clip: true,
            clip_max: 0.5,
        }
    }
}

impl CompareOptions {
    /// Sets the similarity method.
    pub fn method(mut self, method: SimilarityMethod) -> Self {
        self.method = method;
        self
    }

    /// Sets the rounding precision.
    pub fn precision(mut self, precision: u32) -> Self {
        self.precision = precision;
        self
    }

    /// Enables or disables clipping.
    pub fn clip(mut self, clip: bool) -> Self {
        self.clip = clip;
        self
    }

    /// Sets the minimum coverage ratio.
    pub fn clip_max(mut self, clip_max: f64) -> Self {
        self.clip_max = clip_max;
        self
    }

    /// Checks that `clip_max` lies in `[0, 1]`.
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.clip_max) {
            return Err(InputError::invalid_option(
                "clip_max",
                format!("must be within [0, 1], got {}", self.clip_max),
            )
            .into());
        }
        Ok(())
    }
}
