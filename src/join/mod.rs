//! Similarity joins between two line collections.
//!
//! [`similarity`] validates and flattens both collections, generates
//! candidate pairs with the selected [`JoinStrategy`], scores each pair with
//! [`compare`](crate::compare()) and gathers the results in a
//! [`SimilarityTable`].
//!
//! With the `parallel` feature, pairs are scored on the rayon thread pool.
//! A [`CancelToken`] or a deadline in [`SimilarityOptions`] stops the join
//! between two pairs.

mod cancel;
mod options;
mod similarity;
mod strategy;
mod table;

pub use cancel::CancelToken;
pub use options::{JoinStrategy, KeepGeom, SimilarityOptions};
pub use similarity::{similarity, similarity_with};
pub use strategy::candidate_pairs;
pub use table::{merge_attributes, ResultRow, SimilarityTable, LEFT_SUFFIX, RIGHT_SUFFIX};
