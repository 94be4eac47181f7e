//! Candidate generation and per-pair scoring.

use super::cancel::Budget;
use super::table::{merge_attributes, ResultRow};
use super::{JoinStrategy, KeepGeom, SimilarityOptions};
use crate::collection::{LineCollection, LineRow};
use crate::compare::compare_unchecked;
use crate::error::{Result, SimilarityError};
use crate::geometry::{GeometryOps, SpatialIndex};
use geo::Rect;
use log::debug;

/// Lists the `(index1, index2)` pairs a strategy will score, sorted.
///
/// [`JoinStrategy::Cartesian`] yields every pair.
/// [`JoinStrategy::SpatialIndex`] yields only pairs whose bounding boxes
/// overlap, boxes touching on an edge or corner included.
///
/// Fails with [`SimilarityError::InvalidGeometry`] if the index built by
/// `ops` reports a position outside the second collection.
pub fn candidate_pairs<O: GeometryOps + ?Sized>(
    ops: &O,
    left: &LineCollection,
    right: &LineCollection,
    how: JoinStrategy,
) -> Result<Vec<(usize, usize)>> {
    let pairs = match how {
        JoinStrategy::Cartesian => (0..left.len())
            .flat_map(|index1| (0..right.len()).map(move |index2| (index1, index2)))
            .collect(),
        JoinStrategy::SpatialIndex => indexed_pairs(ops, left, right)?,
    };

    debug!(
        "{how} join: {} candidate pairs out of {}",
        pairs.len(),
        left.len() * right.len()
    );
    Ok(pairs)
}

fn indexed_pairs<O: GeometryOps + ?Sized>(
    ops: &O,
    left: &LineCollection,
    right: &LineCollection,
) -> Result<Vec<(usize, usize)>> {
    let boxes: Vec<Rect<f64>> = right.rows.iter().map(|row| ops.bounds(&row.geometry)).collect();
    let index = ops.build_index(&boxes);

    let mut pairs = Vec::new();
    for (index1, row) in left.rows.iter().enumerate() {
        let mut hits = index.query(ops.bounds(&row.geometry));
        if let Some(&bad) = hits.iter().find(|&&index2| index2 >= right.len()) {
            return Err(SimilarityError::invalid_geometry(format!(
                "spatial index returned position {bad} for {} indexed lines",
                right.len()
            )));
        }
        hits.sort_unstable();
        hits.dedup();
        pairs.extend(hits.into_iter().map(|index2| (index1, index2)));
    }
    Ok(pairs)
}

/// Scores every pair in `pairs`, returning rows in the same order.
///
/// Options must already be validated. The budget is checked before each
/// pair; the first failure aborts the whole batch.
pub(crate) fn score_pairs<O: GeometryOps + Sync + ?Sized>(
    ops: &O,
    left: &LineCollection,
    right: &LineCollection,
    pairs: &[(usize, usize)],
    options: &SimilarityOptions,
    budget: Budget<'_>,
) -> Result<Vec<ResultRow>> {
    let evaluate = |&(index1, index2): &(usize, usize)| -> Result<ResultRow> {
        budget.check()?;
        score_pair(ops, index1, &left.rows[index1], index2, &right.rows[index2], options)
    };

    #[cfg(feature = "parallel")]
    {
        use rayon::prelude::*;
        pairs.par_iter().map(evaluate).collect()
    }

    #[cfg(not(feature = "parallel"))]
    {
        pairs.iter().map(evaluate).collect()
    }
}

fn score_pair<O: GeometryOps + ?Sized>(
    ops: &O,
    index1: usize,
    row1: &LineRow,
    index2: usize,
    row2: &LineRow,
    options: &SimilarityOptions,
) -> Result<ResultRow> {
    let similarity_score = compare_unchecked(ops, &row1.geometry, &row2.geometry, &options.compare)?;
    let geometry = match options.keep_geom {
        KeepGeom::Left => row1.geometry.clone(),
        KeepGeom::Right => row2.geometry.clone(),
    };

    Ok(ResultRow {
        index1,
        index2,
        attributes: merge_attributes(&row1.attributes, &row2.attributes),
        similarity_score,
        geometry,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collection::{AttrValue, Attributes};
    use crate::geometry::{LineGeometry, PlanarOps};
    use crate::join::CancelToken;
    use geo::LineString;

    fn collection(lines: &[&[(f64, f64)]]) -> LineCollection {
        let rows = lines
            .iter()
            .enumerate()
            .map(|(idx, coords)| LineRow {
                attributes: Attributes::from([("id".to_string(), AttrValue::Int(idx as i64))]),
                geometry: LineGeometry::single(LineString::from(coords.to_vec())).unwrap(),
            })
            .collect();
        LineCollection::new(None, rows)
    }

    #[test]
    fn test_cartesian_pairs() {
        let left = collection(&[&[(0.0, 0.0), (1.0, 1.0)], &[(5.0, 5.0), (6.0, 6.0)]]);
        let right = collection(&[&[(0.0, 0.0), (1.0, 1.0)], &[(9.0, 9.0), (8.0, 8.0)], &[(2.0, 0.0), (3.0, 0.0)]]);

        let pairs = candidate_pairs(&PlanarOps, &left, &right, JoinStrategy::Cartesian).unwrap();
        assert_eq!(pairs, vec![(0, 0), (0, 1), (0, 2), (1, 0), (1, 1), (1, 2)]);
    }

    #[test]
    fn test_indexed_pairs_prune_disjoint_boxes() {
        let left = collection(&[&[(0.0, 0.0), (1.0, 1.0)], &[(5.0, 5.0), (6.0, 6.0)]]);
        let right = collection(&[
            &[(0.5, 0.5), (3.0, 3.0)],
            &[(9.0, 9.0), (8.0, 8.0)],
            // Touches the first left box at a corner
            &[(1.0, 1.0), (1.0, 4.0)],
            &[(5.5, 5.0), (5.5, 6.0)],
        ]);

        let pairs = candidate_pairs(&PlanarOps, &left, &right, JoinStrategy::SpatialIndex).unwrap();
        assert_eq!(pairs, vec![(0, 0), (0, 2), (1, 3)]);
    }

    /// Index that reports a position past the end of the indexed boxes.
    struct OverrunIndex(usize);

    impl SpatialIndex for OverrunIndex {
        fn query(&self, _query: Rect<f64>) -> Vec<usize> {
            vec![0, self.0]
        }
    }

    struct OverrunOps;

    impl GeometryOps for OverrunOps {
        type Index = OverrunIndex;

        fn bounds(&self, line: &LineGeometry) -> Rect<f64> {
            PlanarOps.bounds(line)
        }

        fn length(&self, line: &LineGeometry) -> f64 {
            PlanarOps.length(line)
        }

        fn intersection(&self, line: &LineGeometry, rect: Rect<f64>) -> Option<LineGeometry> {
            PlanarOps.intersection(line, rect)
        }

        fn build_index(&self, boxes: &[Rect<f64>]) -> OverrunIndex {
            OverrunIndex(boxes.len())
        }
    }

    #[test]
    fn test_out_of_range_index_position_rejected() {
        let left = collection(&[&[(0.0, 0.0), (1.0, 1.0)]]);
        let right = collection(&[&[(0.0, 0.0), (1.0, 1.0)]]);

        let result = candidate_pairs(&OverrunOps, &left, &right, JoinStrategy::SpatialIndex);
        assert!(matches!(result, Err(SimilarityError::InvalidGeometry { .. })));

        // Cartesian never consults the index
        let pairs = candidate_pairs(&OverrunOps, &left, &right, JoinStrategy::Cartesian).unwrap();
        assert_eq!(pairs, vec![(0, 0)]);
    }

    #[test]
    fn test_score_pairs_keep_geom() {
        let left = collection(&[&[(0.0, 0.0), (1.0, 1.0)]]);
        let right = collection(&[&[(0.0, 0.0), (1.0, 1.0), (2.0, 2.0)]]);
        let pairs = [(0, 0)];

        let options = SimilarityOptions::default().keep_geom(KeepGeom::Right);
        let rows = score_pairs(&PlanarOps, &left, &right, &pairs, &options, Budget::default()).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].geometry, right.rows[0].geometry);
        assert_eq!(rows[0].attributes["id_x"], AttrValue::Int(0));
        assert_eq!(rows[0].attributes["id_y"], AttrValue::Int(0));

        let options = SimilarityOptions::default();
        let rows = score_pairs(&PlanarOps, &left, &right, &pairs, &options, Budget::default()).unwrap();
        assert_eq!(rows[0].geometry, left.rows[0].geometry);
    }

    #[test]
    fn test_score_pairs_cancelled() {
        let left = collection(&[&[(0.0, 0.0), (1.0, 1.0)]]);
        let pairs = [(0, 0)];
        let token = CancelToken::new();
        token.cancel();

        let result = score_pairs(
            &PlanarOps,
            &left,
            &left,
            &pairs,
            &SimilarityOptions::default(),
            Budget::new(Some(&token), None),
        );
        assert_eq!(result, Err(SimilarityError::Cancelled));
    }
}
