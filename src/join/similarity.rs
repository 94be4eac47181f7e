//! Collection-to-collection similarity.

use super::cancel::Budget;
use super::strategy::{candidate_pairs, score_pairs};
use super::table::SimilarityTable;
use super::SimilarityOptions;
use crate::collection::{check_compatible, flatten, FeatureCollection, LineCollection};
use crate::error::Result;
use crate::geometry::{GeometryOps, PlanarOps};
use log::{debug, info};

/// Scores every candidate pair between two line collections.
///
/// Both collections are validated (non-empty, same CRS, lines only) and
/// flattened, so multi-line rows are compared part by part. Result indices
/// refer to rows of the flattened collections, whose `source_index`
/// attribute points back to the input row.
///
/// # Example
///
/// ```
/// use geo::{line_string, MultiLineString};
/// use linesim::collection::{Feature, FeatureCollection};
/// use linesim::{similarity, JoinStrategy, SimilarityOptions};
///
/// let roads = FeatureCollection::new(vec![Feature::new(line_string![(x: 0.0, y: 0.0), (x: 1.0, y: 1.0)])]);
/// let candidates = FeatureCollection::new(vec![Feature::new(MultiLineString::new(vec![
///     line_string![(x: 0.0, y: 0.0), (x: 1.0, y: 1.0)],
///     line_string![(x: 5.0, y: 5.0), (x: 6.0, y: 6.0)],
/// ]))]);
///
/// let table = similarity(&roads, &candidates, &SimilarityOptions::default()).unwrap();
/// assert_eq!(table.scores(), vec![(0, 0, 1.0)]);
///
/// let options = SimilarityOptions::default().how(JoinStrategy::Cartesian);
/// let table = similarity(&roads, &candidates, &options).unwrap();
/// assert_eq!(table.scores(), vec![(0, 0, 1.0), (0, 1, 0.0)]);
/// ```
pub fn similarity(
    collection1: &FeatureCollection,
    collection2: &FeatureCollection,
    options: &SimilarityOptions,
) -> Result<SimilarityTable> {
    similarity_with(&PlanarOps, collection1, collection2, options)
}

/// Like [`similarity`], using `ops` for all geometric work.
///
/// `ops` is shared across worker threads when the `parallel` feature is
/// enabled, hence the `Sync` bound.
pub fn similarity_with<O: GeometryOps + Sync + ?Sized>(
    ops: &O,
    collection1: &FeatureCollection,
    collection2: &FeatureCollection,
    options: &SimilarityOptions,
) -> Result<SimilarityTable> {
    options.validate()?;
    check_compatible(collection1, collection2)?;

    let left = flatten(&LineCollection::from_features(collection1, 1)?);
    let right = flatten(&LineCollection::from_features(collection2, 2)?);
    debug!(
        "flattened {} and {} input rows into {} and {} lines",
        collection1.len(),
        collection2.len(),
        left.len(),
        right.len()
    );

    let pairs = candidate_pairs(ops, &left, &right, options.how)?;
    let budget = Budget::new(options.cancel.as_ref(), options.deadline);
    let rows = score_pairs(ops, &left, &right, &pairs, options, budget)?;

    let mut table: SimilarityTable = rows.into_iter().collect();
    if options.drop_zeroes {
        table.drop_zeroes();
    }

    info!(
        "similarity join ({}): {} x {} lines, {} pairs scored, {} rows kept",
        options.how,
        left.len(),
        right.len(),
        pairs.len(),
        table.len()
    );
    Ok(table)
}
