//! Error types for similarity operations.

use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, SimilarityError>;

/// Errors raised while validating inputs or scoring line geometries.
///
/// Every variant is a deterministic validation failure. A similarity score of
/// `0` for disjoint or under-covered lines is a valid result and never shows
/// up here.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SimilarityError {
    /// Geometry is null, not a line, or degenerate (too few points, zero length).
    #[error("invalid geometry: {reason}")]
    InvalidGeometry {
        /// What was wrong with the geometry.
        reason: String,
    },

    /// A collection contains polygons, points or other non-line geometries.
    #[error("collection {collection} contains unsupported {kind} geometries, expected lines")]
    UnsupportedGeometry {
        /// 1-based position of the offending collection.
        collection: usize,
        /// Category of the rejected geometry.
        kind: &'static str,
    },

    /// A collection mixes several geometry categories.
    #[error("collection {collection} contains mixed geometry types")]
    MixedGeometry {
        /// 1-based position of the offending collection.
        collection: usize,
    },

    /// The two collections use different coordinate reference systems.
    #[error("CRS must be equal for both collections but were '{left}' and '{right}'")]
    CrsMismatch {
        /// CRS of the first collection.
        left: String,
        /// CRS of the second collection.
        right: String,
    },

    /// The requested similarity method is not implemented.
    #[error("unsupported similarity method '{method}', expected one of: frechet_dist")]
    UnsupportedMethod {
        /// Name that failed to resolve.
        method: String,
    },

    /// Empty input or an invalid option combination.
    #[error(transparent)]
    Input(#[from] InputError),

    /// The cancellation token was triggered while scoring pairs.
    #[error("similarity join cancelled")]
    Cancelled,

    /// The configured deadline passed while scoring pairs.
    #[error("similarity join exceeded its deadline")]
    DeadlineExceeded,
}

impl SimilarityError {
    pub(crate) fn invalid_geometry(reason: impl Into<String>) -> Self {
        Self::InvalidGeometry {
            reason: reason.into(),
        }
    }
}

/// Problems with the shape of the request rather than with any geometry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    /// One of the collections has no rows.
    #[error("collection {collection} is empty")]
    EmptyCollection {
        /// 1-based position of the empty collection.
        collection: usize,
    },

    /// An option value or option combination is not allowed.
    #[error("invalid option `{option}`: {reason}")]
    InvalidOption {
        /// Option name.
        option: &'static str,
        /// Why the value was rejected.
        reason: String,
    },
}

impl InputError {
    pub(crate) fn invalid_option(option: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidOption {
            option,
            reason: reason.into(),
        }
    }
}
