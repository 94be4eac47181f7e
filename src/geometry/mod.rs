//! Line geometries and the geometry operations the comparison relies on.
//!
//! - [`LineGeometry`] - validated single- or multi-part line
//! - [`GeometryOps`] - injectable bounds/length/intersection/index capability
//! - [`clip_to_rect`] - closed-rectangle clipping used by [`PlanarOps`]

mod clip;
mod line;
mod ops;

pub use clip::clip_to_rect;
pub use line::{extract, extract_optional, GeometryKind, LineGeometry};
pub use ops::{GeometryOps, PlanarOps, RTreeIndex, SpatialIndex};
