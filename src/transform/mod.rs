//! Exact two-pass distance transforms.
//!
//! Both transforms run in O(n) over the grid: a column pass computes, per
//! column, the vertical distance (or coordinate) of the nearest set cell,
//! and a row pass combines all columns into the final 2D answer by
//! building the lower envelope of the columns' distance parabolas.
//!
//! - [`DistanceTransform`] - squared Euclidean distance to the nearest set cell
//! - [`NearestTransform`] - coordinate of the nearest set cell, for callers
//!   that need to resample the original signal at that location

mod coord;
mod distance;
mod nearest;
mod span;

pub use coord::Coord;
pub use distance::DistanceTransform;
pub use nearest::NearestTransform;

/// Largest representable coordinate magnitude.
///
/// Doubles as the "not set" sentinel in freshly initialized distance grids,
/// so `MAX_COORD²` bounds the squared-distance domain: exact results larger
/// than that saturate.
pub const MAX_COORD: i32 = 32767;

/// Upper bound of the squared-distance domain.
pub(crate) const MAX_DIST2: i64 = (MAX_COORD as i64) * (MAX_COORD as i64);
