//! Join results.

use crate::collection::Attributes;
use crate::geometry::LineGeometry;
use std::collections::btree_map;
use std::collections::BTreeMap;

/// Suffix for attribute names shared by both sides, left row.
pub const LEFT_SUFFIX: &str = "_x";
/// Suffix for attribute names shared by both sides, right row.
pub const RIGHT_SUFFIX: &str = "_y";

/// Merges the attributes of a left and a right row.
///
/// Names present on only one side are copied as is. A name present on both
/// sides is stored twice, as `{name}_x` with the left value and `{name}_y`
/// with the right value. If that suffixed name is already used by either
/// row, the suffix is repeated (`{name}_x_x`) until the name is free, so no
/// value is ever overwritten.
///
/// ```
/// use linesim::collection::{AttrValue, Attributes};
/// use linesim::join::merge_attributes;
///
/// let left = Attributes::from([("name".into(), AttrValue::from("a")), ("lanes".into(), AttrValue::from(2i64))]);
/// let right = Attributes::from([("name".into(), AttrValue::from("b"))]);
///
/// let merged = merge_attributes(&left, &right);
/// assert_eq!(merged["name_x"], AttrValue::from("a"));
/// assert_eq!(merged["name_y"], AttrValue::from("b"));
/// assert_eq!(merged["lanes"], AttrValue::from(2i64));
/// ```
pub fn merge_attributes(left: &Attributes, right: &Attributes) -> Attributes {
    let mut merged = Attributes::new();
    for (name, value) in left.iter().chain(right) {
        if !(left.contains_key(name) && right.contains_key(name)) {
            merged.insert(name.clone(), value.clone());
        }
    }

    for (name, value) in left {
        if let Some(other) = right.get(name) {
            let left_name = free_name(name, LEFT_SUFFIX, left, right, &merged);
            merged.insert(left_name, value.clone());
            let right_name = free_name(name, RIGHT_SUFFIX, left, right, &merged);
            merged.insert(right_name, other.clone());
        }
    }
    merged
}

/// Appends `suffix` to `name` until the result is used by no input row and
/// no merged entry.
fn free_name(name: &str, suffix: &str, left: &Attributes, right: &Attributes, merged: &Attributes) -> String {
    let mut candidate = format!("{name}{suffix}");
    while left.contains_key(&candidate) || right.contains_key(&candidate) || merged.contains_key(&candidate) {
        candidate.push_str(suffix);
    }
    candidate
}

/// One scored pair.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultRow {
    /// Row position in the flattened first collection.
    pub index1: usize,
    /// Row position in the flattened second collection.
    pub index2: usize,
    /// Merged attributes of both rows.
    pub attributes: Attributes,
    /// Similarity in `[0, 1]`.
    pub similarity_score: f64,
    /// Geometry of the side selected by [`KeepGeom`](super::KeepGeom).
    pub geometry: LineGeometry,
}

/// Scored pairs keyed by `(index1, index2)`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SimilarityTable {
    rows: BTreeMap<(usize, usize), ResultRow>,
}

impl SimilarityTable {
    /// Number of pairs.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns `true` if no pair was kept.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Row for the pair `(index1, index2)`.
    pub fn get(&self, index1: usize, index2: usize) -> Option<&ResultRow> {
        self.rows.get(&(index1, index2))
    }

    /// Rows in key order.
    pub fn iter(&self) -> btree_map::Values<'_, (usize, usize), ResultRow> {
        self.rows.values()
    }

    /// `(index1, index2, similarity_score)` for every row, in key order.
    pub fn scores(&self) -> Vec<(usize, usize, f64)> {
        self.iter()
            .map(|row| (row.index1, row.index2, row.similarity_score))
            .collect()
    }

    /// Consumes the table, returning rows in key order.
    pub fn into_rows(self) -> Vec<ResultRow> {
        self.rows.into_values().collect()
    }

    /// Removes rows that scored 0.
    pub fn drop_zeroes(&mut self) {
        self.rows.retain(|_, row| row.similarity_score != 0.0);
    }

    /// Removes the named attribute columns from every row.
    ///
    /// Unknown names are ignored.
    pub fn drop_columns(&mut self, columns: &[&str]) {
        for row in self.rows.values_mut() {
            for column in columns {
                row.attributes.remove(*column);
            }
        }
    }
}

impl FromIterator<ResultRow> for SimilarityTable {
    fn from_iter<I: IntoIterator<Item = ResultRow>>(iter: I) -> Self {
        Self {
            rows: iter
                .into_iter()
                .map(|row| ((row.index1, row.index2), row))
                .collect(),
        }
    }
}

impl<'a> IntoIterator for &'a SimilarityTable {
    type Item = &'a ResultRow;
    type IntoIter = btree_map::Values<'a, (usize, usize), ResultRow>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collection::AttrValue;
    use geo::line_string;

    fn row(index1: usize, index2: usize, score: f64) -> ResultRow {
        let mut attributes = Attributes::new();
        attributes.insert("name_x".to_string(), AttrValue::from("a"));
        attributes.insert("name_y".to_string(), AttrValue::from("b"));
        ResultRow {
            index1,
            index2,
            attributes,
            similarity_score: score,
            geometry: LineGeometry::single(line_string![(x: 0.0, y: 0.0), (x: 1.0, y: 0.0)]).unwrap(),
        }
    }

    #[test]
    fn test_merge_without_collisions() {
        let left = Attributes::from([("a".to_string(), AttrValue::Int(1))]);
        let right = Attributes::from([("b".to_string(), AttrValue::Int(2))]);
        let merged = merge_attributes(&left, &right);
        assert_eq!(merged.len(), 2);
        assert_eq!(merged["a"], AttrValue::Int(1));
        assert_eq!(merged["b"], AttrValue::Int(2));
    }

    #[test]
    fn test_merge_collisions() {
        let left = Attributes::from([
            ("id".to_string(), AttrValue::Int(1)),
            ("source_index".to_string(), AttrValue::Int(0)),
        ]);
        let right = Attributes::from([
            ("id".to_string(), AttrValue::Int(7)),
            ("source_index".to_string(), AttrValue::Int(3)),
        ]);
        let merged = merge_attributes(&left, &right);
        let names: Vec<&str> = merged.keys().map(String::as_str).collect();
        assert_eq!(names, vec!["id_x", "id_y", "source_index_x", "source_index_y"]);
        assert_eq!(merged["source_index_y"], AttrValue::Int(3));
    }

    #[test]
    fn test_merge_suffix_already_taken() {
        let left = Attributes::from([
            ("id".to_string(), AttrValue::Int(1)),
            ("id_x".to_string(), AttrValue::from("own id_x")),
        ]);
        let right = Attributes::from([
            ("id".to_string(), AttrValue::Int(7)),
            ("id_y".to_string(), AttrValue::from("own id_y")),
        ]);
        let merged = merge_attributes(&left, &right);

        assert_eq!(merged.len(), 4);
        assert_eq!(merged["id_x"], AttrValue::from("own id_x"));
        assert_eq!(merged["id_y"], AttrValue::from("own id_y"));
        assert_eq!(merged["id_x_x"], AttrValue::Int(1));
        assert_eq!(merged["id_y_y"], AttrValue::Int(7));
    }

    #[test]
    fn test_merge_suffix_taken_on_other_side() {
        let left = Attributes::from([("id".to_string(), AttrValue::Int(1))]);
        let right = Attributes::from([
            ("id".to_string(), AttrValue::Int(7)),
            ("id_x".to_string(), AttrValue::from("right id_x")),
        ]);
        let merged = merge_attributes(&left, &right);

        assert_eq!(merged.len(), 3);
        assert_eq!(merged["id_x"], AttrValue::from("right id_x"));
        assert_eq!(merged["id_x_x"], AttrValue::Int(1));
        assert_eq!(merged["id_y"], AttrValue::Int(7));
    }

    #[test]
    fn test_table_is_keyed() {
        let table: SimilarityTable = vec![row(1, 0, 0.5), row(0, 1, 0.0), row(0, 0, 1.0)]
            .into_iter()
            .collect();

        assert_eq!(table.len(), 3);
        assert_eq!(table.get(1, 0).unwrap().similarity_score, 0.5);
        assert!(table.get(1, 1).is_none());
        assert_eq!(table.scores(), vec![(0, 0, 1.0), (0, 1, 0.0), (1, 0, 0.5)]);
    }

    #[test]
    fn test_drop_zeroes() {
        let mut table: SimilarityTable = vec![row(0, 0, 0.0), row(0, 1, 0.25)].into_iter().collect();
        table.drop_zeroes();
        assert_eq!(table.len(), 1);
        assert!(table.get(0, 0).is_none());

        table.drop_zeroes();
        assert_eq!(table.len(), 1);
    }

    #[test]
    fn test_drop_columns() {
        let mut table: SimilarityTable = vec![row(0, 0, 1.0), row(1, 0, 1.0)].into_iter().collect();
        table.drop_columns(&["name_y", "missing"]);

        for row in &table {
            assert!(row.attributes.contains_key("name_x"));
            assert!(!row.attributes.contains_key("name_y"));
        }
        let rows = table.into_rows();
        assert_eq!((rows[1].index1, rows[1].index2), (1, 0));
    }
}
