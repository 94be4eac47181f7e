//! linesim - Fréchet-based similarity between polylines
//!
//! Scores how much two line geometries look alike, from 0 (unrelated) to 1
//! (identical), and joins two collections of lines pair by pair.
//!
//! A pairwise score clips both lines to the overlap of their bounding boxes,
//! rejects pairs where too little of either line survives, and maps the
//! discrete Fréchet distance of what is left through
//! `exp(-distance / length(line1))`.
//!
//! # Example
//!
//! ```
//! use geo::line_string;
//! use linesim::{compare, CompareOptions, LineGeometry};
//!
//! let line1 = LineGeometry::single(line_string![(x: 0.0, y: 0.0), (x: 1.0, y: 1.0)]).unwrap();
//! let line2 = LineGeometry::single(line_string![(x: 0.0, y: 0.5), (x: 1.0, y: 1.5)]).unwrap();
//!
//! let score = compare(&line1, &line2, &CompareOptions::default()).unwrap();
//! assert!(score > 0.0 && score < 1.0);
//! assert_eq!(compare(&line1, &line1, &CompareOptions::default()).unwrap(), 1.0);
//! ```
//!
//! # Features
//!
//! - `parallel`: score join pairs on the rayon thread pool.
//! - `serde`: `Serialize`/`Deserialize` for options and attribute values.

pub mod collection;
pub mod compare;
pub mod error;
pub mod geometry;
pub mod join;
pub mod measure;

pub use collection::{flatten, Feature, FeatureCollection, LineCollection};
pub use compare::{compare, compare_with, CompareOptions, SimilarityMethod};
pub use error::{InputError, Result, SimilarityError};
pub use geometry::{extract, GeometryOps, LineGeometry, PlanarOps};
pub use join::{
    similarity, similarity_with, CancelToken, JoinStrategy, KeepGeom, SimilarityOptions,
    SimilarityTable,
};
pub use measure::discrete_frechet_distance;
