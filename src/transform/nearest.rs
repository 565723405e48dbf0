//! Nearest-set-cell coordinate transform.

use std::ops::Range;

use num_traits::Float;

use super::distance::validate_domain;
use super::span::SpanStack;
use super::{Coord, MAX_COORD};
use crate::error::TransformError;
use crate::grid::{Grid, Rect};

/// Computes, for every cell of a rectangular domain, the coordinate of
/// the nearest "set" cell.
///
/// Structurally the same two-pass algorithm as
/// [`DistanceTransform`](super::DistanceTransform), but cells carry the
/// full coordinate of the nearest set cell instead of a scalar distance,
/// so callers can resample the original signal at that location. The
/// result cannot be recovered from the scalar transform by
/// post-processing: the passes must compare coordinate dominance, not
/// distances alone.
///
/// # Example
///
/// ```
/// use exactum::{Coord, NearestTransform, Rect};
///
/// let mut nearest = NearestTransform::new(Rect::new(0, 0, 4, 4)).unwrap();
/// nearest.initialize_membership(|x, y| x == 0 && y == 0);
/// assert!(nearest.transform());
///
/// assert_eq!(nearest.nearest(3, 3), Coord::new(0, 0));
/// assert_eq!(nearest.squared_distance(3, 3), 18);
/// ```
#[derive(Debug)]
pub struct NearestTransform {
    grid: Grid<Coord>,
    spans: SpanStack<i16>,
}

impl NearestTransform {
    /// Creates a transform over `rect`.
    ///
    /// Returns [`TransformError::DomainOutOfRange`] if the rectangle does
    /// not fit in the signed 16-bit coordinate domain.
    pub fn new(rect: Rect) -> Result<Self, TransformError> {
        validate_domain(rect)?;
        Ok(Self {
            grid: Grid::new(rect),
            spans: SpanStack::with_capacity(rect.width as usize),
        })
    }

    /// The domain rectangle.
    #[inline]
    pub fn rect(&self) -> Rect {
        self.grid.rect()
    }

    /// Re-targets the transform at a new rectangle, reusing the grid
    /// buffer when its capacity suffices.
    pub fn resize(&mut self, rect: Rect, force_reallocate: bool) -> Result<(), TransformError> {
        validate_domain(rect)?;
        self.grid.resize(rect, force_reallocate);
        self.spans = SpanStack::with_capacity(rect.width as usize);
        Ok(())
    }

    /// Seeds the grid from a membership predicate.
    ///
    /// A set cell stores its own coordinate; every other cell stores
    /// [`Coord::UNSET`]. The predicate is invoked at most once per cell.
    /// Must be called before each [`transform`](Self::transform).
    pub fn initialize_membership<P>(&mut self, mut predicate: P)
    where
        P: FnMut(i32, i32) -> bool,
    {
        let rect = self.grid.rect();
        for y in rect.top..rect.bottom() {
            for x in rect.left..rect.right() {
                let value = if predicate(x, y) {
                    Coord::new(x as i16, y as i16)
                } else {
                    Coord::UNSET
                };
                self.grid.set(x, y, value);
            }
        }
    }

    /// Runs the full transform.
    ///
    /// Returns false when the grid had no set cells at all; the grid
    /// contents are unspecified in that case and must not be trusted.
    pub fn transform(&mut self) -> bool {
        let rect = self.grid.rect();
        if !self.transform_columns(rect.left..rect.right()) {
            return false;
        }
        self.transform_rows(rect.top..rect.bottom());
        true
    }

    /// Runs the column pass over `columns` only.
    ///
    /// After this pass each processed cell holds the coordinate of the
    /// nearest set cell in its own column, or [`Coord::UNSET`] when the
    /// column has none. Returns true if any set cell was seen in the
    /// processed columns.
    pub fn transform_columns(&mut self, columns: Range<i32>) -> bool {
        let rect = self.grid.rect();
        let top = rect.top;
        let bottom = rect.bottom();
        let mut found = false;
        for x in columns {
            let mut nearest_y: Option<i32> = None;
            for y in top..bottom {
                // A cell is set when it stores its own coordinate.
                if self.grid.get(x, y) == Coord::new(x as i16, y as i16) {
                    found = true;
                    nearest_y = Some(y);
                    let mut yy = y - 1;
                    while yy >= top {
                        let current = self.grid.get(x, yy);
                        let current_d = if current.is_unset() {
                            i32::MAX
                        } else {
                            (yy - current.y as i32).abs()
                        };
                        if y - yy >= current_d {
                            break;
                        }
                        self.grid.set(x, yy, Coord::new(x as i16, y as i16));
                        yy -= 1;
                    }
                } else {
                    let value = match nearest_y {
                        Some(ny) => Coord::new(x as i16, ny as i16),
                        None => Coord::UNSET,
                    };
                    self.grid.set(x, y, value);
                }
            }
        }
        found
    }

    /// Runs the row pass over `rows` only.
    ///
    /// Requires column-pass output as input. After this pass each
    /// processed cell holds the coordinate of its nearest set cell over
    /// the whole domain.
    pub fn transform_rows(&mut self, rows: Range<i32>) {
        let rect = self.grid.rect();
        let left = rect.left;
        let right = rect.right();
        for y in rows {
            self.spans.clear();
            for x in left..right {
                let candidate = self.grid.get(x, y);
                if candidate.is_unset() {
                    continue; // no set cell in this column
                }
                let d = (y as i64 - candidate.y as i64).abs();
                if d >= MAX_COORD as i64 {
                    continue;
                }
                let dist2 = x as i64 * x as i64 + d * d;
                self.spans.offer(x, dist2, candidate.y, left, right);
            }
            let spans = self.spans.spans();
            for (i, span) in spans.iter().enumerate() {
                let end = spans.get(i + 1).map_or(right, |next| next.start);
                let value = Coord::new(span.candidate_x as i16, span.payload);
                for x in span.start..end {
                    self.grid.set(x, y, value);
                }
            }
        }
    }

    /// The coordinate of the nearest set cell to `(x, y)`. Meaningful
    /// only after a [`transform`](Self::transform) that returned true.
    #[inline]
    pub fn nearest(&self, x: i32, y: i32) -> Coord {
        self.grid.get(x, y)
    }

    /// The squared Euclidean distance from `(x, y)` to its nearest set
    /// cell.
    #[inline]
    pub fn squared_distance(&self, x: i32, y: i32) -> i32 {
        self.nearest(x, y).squared_distance_to(x, y)
    }

    /// The real-valued Euclidean distance from `(x, y)` to its nearest
    /// set cell.
    #[inline]
    pub fn distance<F: Float>(&self, x: i32, y: i32) -> F {
        F::from(self.squared_distance(x, y)).unwrap().sqrt()
    }
}
