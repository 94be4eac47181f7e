//! Exploding multi-part rows into single-part rows.

use super::{AttrValue, LineCollection, LineRow};
use crate::geometry::LineGeometry;

/// Attribute added by [`flatten`] holding the row's original position.
pub const SOURCE_INDEX: &str = "source_index";

/// Replaces every multi-line row by one row per part.
///
/// Each output row copies the original attributes and gains a
/// [`SOURCE_INDEX`] attribute with the position of the row it came from.
/// Single-line rows pass through and get the attribute as well. Output rows
/// keep input order, with a multi-line's parts inline in part order.
///
/// # Example
///
/// ```
/// use geo::{line_string, MultiLineString};
/// use linesim::collection::{flatten, AttrValue, LineCollection, LineRow, SOURCE_INDEX};
/// use linesim::LineGeometry;
///
/// let multi = LineGeometry::multi(MultiLineString::new(vec![
///     line_string![(x: 0.0, y: 0.0), (x: 1.0, y: 1.0)],
///     line_string![(x: 1.0, y: 1.0), (x: 2.0, y: 2.0)],
/// ]))
/// .unwrap();
/// let collection = LineCollection::new(None, vec![LineRow { attributes: Default::default(), geometry: multi }]);
///
/// let flat = flatten(&collection);
/// assert_eq!(flat.len(), 2);
/// assert_eq!(flat.rows[1].attributes[SOURCE_INDEX], AttrValue::Int(0));
/// ```
pub fn flatten(collection: &LineCollection) -> LineCollection {
    let capacity = collection.rows.iter().map(|row| row.geometry.num_parts()).sum();
    let mut rows = Vec::with_capacity(capacity);

    for (source, row) in collection.rows.iter().enumerate() {
        let mut attributes = row.attributes.clone();
        attributes.insert(SOURCE_INDEX.to_string(), AttrValue::Int(source as i64));

        match &row.geometry {
            LineGeometry::Single(_) => rows.push(LineRow {
                attributes,
                geometry: row.geometry.clone(),
            }),
            LineGeometry::Multi(lines) => {
                for part in &lines.0 {
                    rows.push(LineRow {
                        attributes: attributes.clone(),
                        // Parts were validated with the multi-line
                        geometry: LineGeometry::Single(part.clone()),
                    });
                }
            }
        }
    }

    LineCollection::new(collection.crs.clone(), rows)
}
