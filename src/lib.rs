//! exactum - Exact distance transforms on integer grids
//!
//! Approximate is often good enough — until it isn't. This library computes
//! exact squared-Euclidean distance transforms over rectangular grids in
//! O(n), using the two-pass lower-envelope algorithm with integer-exact
//! tie-breaking, plus a variant that reports the coordinate of the nearest
//! set cell instead of the distance.
//!
//! # Example
//!
//! ```
//! use exactum::{DistanceTransform, Rect};
//!
//! let mut edt = DistanceTransform::new(Rect::new(0, 0, 3, 3)).unwrap();
//! edt.initialize_membership(|x, y| x == 1 && y == 1);
//! edt.transform();
//!
//! // Corners of a 3x3 grid are 1² + 1² away from the center.
//! assert_eq!(edt.squared_distance(0, 0), 2);
//! assert_eq!(edt.squared_distance(2, 2), 2);
//! ```

pub mod error;
pub mod field;
pub mod grid;
pub mod transform;

pub use error::TransformError;
pub use field::{DistanceField, signed_field};
pub use grid::{Grid, Rect};
pub use transform::{Coord, DistanceTransform, MAX_COORD, NearestTransform};
