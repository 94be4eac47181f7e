//! Geometry capabilities consumed by the clipper and the join engine.
//!
//! The comparison pipeline never calls geometry algorithms directly. It goes
//! through [`GeometryOps`], so callers can substitute their own geometry
//! backend (or a test double) without touching the scoring code.
//!
//! [`PlanarOps`] is the default backend: bounding rectangles and Euclidean
//! lengths from `geo`, rectangle clipping from [`clip_to_rect`], and an
//! `rstar` R-tree as the spatial index.

use super::{clip_to_rect, LineGeometry};
use geo::{coord, BoundingRect, Euclidean, Length, Rect};
use rstar::primitives::{GeomWithData, Rectangle};
use rstar::{RTree, AABB};

/// A bounding-box index answering "which entries overlap this box".
pub trait SpatialIndex {
    /// Returns the positions of all indexed boxes overlapping `query`.
    ///
    /// Boxes that only touch `query` on an edge or a corner count as
    /// overlapping. Order is unspecified. Every position must be smaller
    /// than the number of boxes the index was built over; the join rejects
    /// anything else.
    fn query(&self, query: Rect<f64>) -> Vec<usize>;
}

/// Planar geometry operations on validated lines.
pub trait GeometryOps {
    /// Spatial index produced by [`GeometryOps::build_index`].
    type Index: SpatialIndex;

    /// Axis-aligned bounding rectangle of a line.
    fn bounds(&self, line: &LineGeometry) -> Rect<f64>;

    /// Total length of a line (sum over parts).
    fn length(&self, line: &LineGeometry) -> f64;

    /// Portion of `line` inside the closed rectangle, or `None` if empty.
    fn intersection(&self, line: &LineGeometry, rect: Rect<f64>) -> Option<LineGeometry>;

    /// Builds an index over `boxes`; query results are positions in `boxes`.
    fn build_index(&self, boxes: &[Rect<f64>]) -> Self::Index;
}

/// Default Euclidean geometry backend.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlanarOps;

impl GeometryOps for PlanarOps {
    type Index = RTreeIndex;

    fn bounds(&self, line: &LineGeometry) -> Rect<f64> {
        let rect = match line {
            LineGeometry::Single(line) => line.bounding_rect(),
            LineGeometry::Multi(lines) => lines.bounding_rect(),
        };
        // Validated lines always have vertices
        rect.unwrap_or_else(|| Rect::new(coord! { x: 0.0, y: 0.0 }, coord! { x: 0.0, y: 0.0 }))
    }

    fn length(&self, line: &LineGeometry) -> f64 {
        match line {
            LineGeometry::Single(line) => Euclidean.length(line),
            LineGeometry::Multi(lines) => Euclidean.length(lines),
        }
    }

    fn intersection(&self, line: &LineGeometry, rect: Rect<f64>) -> Option<LineGeometry> {
        clip_to_rect(line, rect)
    }

    fn build_index(&self, boxes: &[Rect<f64>]) -> RTreeIndex {
        RTreeIndex::new(boxes)
    }
}

type IndexedBox = GeomWithData<Rectangle<[f64; 2]>, usize>;

/// R-tree over bounding rectangles, keyed by position.
#[derive(Debug, Clone)]
pub struct RTreeIndex {
    tree: RTree<IndexedBox>,
}

impl RTreeIndex {
    /// Bulk-loads an R-tree over `boxes`.
    pub fn new(boxes: &[Rect<f64>]) -> Self {
        let items: Vec<IndexedBox> = boxes
            .iter()
            .enumerate()
            .map(|(idx, rect)| {
                let envelope = Rectangle::from_corners(
                    [rect.min().x, rect.min().y],
                    [rect.max().x, rect.max().y],
                );
                GeomWithData::new(envelope, idx)
            })
            .collect();

        Self {
            tree: RTree::bulk_load(items),
        }
    }

    /// Number of indexed boxes.
    pub fn len(&self) -> usize {
        self.tree.size()
    }

    /// Returns `true` if nothing is indexed.
    pub fn is_empty(&self) -> bool {
        self.tree.size() == 0
    }
}

impl SpatialIndex for RTreeIndex {
    fn query(&self, query: Rect<f64>) -> Vec<usize> {
        let envelope = AABB::from_corners([query.min().x, query.min().y], [query.max().x, query.max().y]);
        self.tree
            .locate_in_envelope_intersecting(&envelope)
            .map(|item| item.data)
            .collect()
    }
}
