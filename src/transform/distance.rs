//! Exact squared-Euclidean distance transform.

use std::ops::Range;

use num_traits::Float;

use super::span::SpanStack;
use super::{MAX_COORD, MAX_DIST2};
use crate::error::TransformError;
use crate::grid::{Grid, Rect};

/// Computes, for every cell of a rectangular domain, the exact squared
/// Euclidean distance to the nearest "set" cell.
///
/// The transform runs in two passes, each O(n) amortized: a column pass
/// that finds per-column vertical distances, and a row pass that combines
/// all columns through a lower envelope of parabolas. Distances are exact
/// integers up to the domain bound [`MAX_COORD`]`²`.
///
/// # Example
///
/// ```
/// use exactum::{DistanceTransform, Rect};
///
/// let mut edt = DistanceTransform::new(Rect::new(0, 0, 5, 1)).unwrap();
/// edt.initialize_membership(|x, _| x == 0 || x == 4);
/// edt.transform();
///
/// let row: Vec<i32> = (0..5).map(|x| edt.squared_distance(x, 0)).collect();
/// assert_eq!(row, [0, 1, 4, 1, 0]);
/// ```
#[derive(Debug)]
pub struct DistanceTransform {
    grid: Grid<i32>,
    spans: SpanStack<()>,
}

/// Checks that a rectangle fits the signed 16-bit coordinate domain.
///
/// Keeping every cell coordinate in `[-32768, 32766]` guarantees the
/// nearest-coordinate sentinel can never collide with a real cell and
/// that span arithmetic stays exact in `i64`.
pub(crate) fn validate_domain(rect: Rect) -> Result<(), TransformError> {
    if rect.left < i16::MIN as i32
        || rect.top < i16::MIN as i32
        || rect.right() > MAX_COORD
        || rect.bottom() > MAX_COORD
    {
        return Err(TransformError::DomainOutOfRange);
    }
    Ok(())
}

impl DistanceTransform {
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
    /// Every cell in the rectangle becomes 0 when `predicate(x, y)` is
    /// true, else the [`MAX_COORD`] sentinel. The predicate is invoked at
    /// most once per cell. Must be called before each [`transform`].
    ///
    /// [`transform`]: Self::transform
    pub fn initialize_membership<P>(&mut self, mut predicate: P)
    where
        P: FnMut(i32, i32) -> bool,
    {
        let rect = self.grid.rect();
        for y in rect.top..rect.bottom() {
            for x in rect.left..rect.right() {
                let value = if predicate(x, y) { 0 } else { MAX_COORD };
                self.grid.set(x, y, value);
            }
        }
    }

    /// Runs the full transform: a column pass over every column, then a
    /// row pass over every row, in place.
    ///
    /// If no cell was set the post-transform contents are unspecified;
    /// callers that need to detect that case should use
    /// [`NearestTransform`](super::NearestTransform), whose `transform`
    /// reports it.
    pub fn transform(&mut self) {
        let rect = self.grid.rect();
        self.transform_columns(rect.left..rect.right());
        self.transform_rows(rect.top..rect.bottom());
    }

    /// Runs the column pass over `columns` only.
    ///
    /// After this pass each processed cell holds the vertical distance to
    /// the nearest set cell in its column, clamped to [`MAX_COORD`].
    pub fn transform_columns(&mut self, columns: Range<i32>) {
        let rect = self.grid.rect();
        let top = rect.top;
        let bottom = rect.bottom();
        for x in columns {
            let mut nearest_y: Option<i32> = None;
            for y in top..bottom {
                if self.grid.get(x, y) == 0 {
                    nearest_y = Some(y);
                    // Cells above may be closer to this set cell than to
                    // the one above them; sweep upward while improving.
                    let mut yy = y - 1;
                    while yy >= top && y - yy < self.grid.get(x, yy) {
                        self.grid.set(x, yy, y - yy);
                        yy -= 1;
                    }
                } else {
                    let d = match nearest_y {
                        Some(ny) => (y - ny).min(MAX_COORD),
                        None => MAX_COORD,
                    };
                    self.grid.set(x, y, d);
                }
            }
        }
    }

    /// Runs the row pass over `rows` only.
    ///
    /// Requires column-pass output as input: each cell must hold its
    /// column's vertical distance. After this pass each processed cell
    /// holds its exact squared Euclidean distance.
    pub fn transform_rows(&mut self, rows: Range<i32>) {
        let rect = self.grid.rect();
        let left = rect.left;
        let right = rect.right();
        for y in rows {
            self.spans.clear();
            for x in left..right {
                let d = self.grid.get(x, y) as i64;
                if d >= MAX_COORD as i64 {
                    continue; // no reachable set cell in this column
                }
                let dist2 = x as i64 * x as i64 + d * d;
                self.spans.offer(x, dist2, (), left, right);
            }
            let spans = self.spans.spans();
            for (i, span) in spans.iter().enumerate() {
                let end = spans.get(i + 1).map_or(right, |next| next.start);
                let cx = span.candidate_x as i64;
                for x in span.start..end {
                    // (x − cx)² + d², expanded so the square term is not
                    // recomputed per cell.
                    let v = span.dist2 + x as i64 * (x as i64 - 2 * cx);
                    self.grid.set(x, y, v.min(MAX_DIST2) as i32);
                }
            }
        }
    }

    /// The squared Euclidean distance from `(x, y)` to the nearest set
    /// cell. Meaningful only after [`transform`](Self::transform).
    #[inline]
    pub fn squared_distance(&self, x: i32, y: i32) -> i32 {
        self.grid.get(x, y)
    }

    /// The real-valued Euclidean distance from `(x, y)` to the nearest
    /// set cell.
    #[inline]
    pub fn distance<F: Float>(&self, x: i32, y: i32) -> F {
        F::from(self.squared_distance(x, y)).unwrap().sqrt()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Brute-force squared distance from (x, y) to the nearest member.
    fn naive(members: &[(i32, i32)], x: i32, y: i32) -> i32 {
        members
            .iter()
            .map(|&(mx, my)| {
                let dx = (x - mx) as i64;
                let dy = (y - my) as i64;
                (dx * dx + dy * dy) as i32
            })
            .min()
            .unwrap()
    }

    /// Deterministic pseudo-random membership over a rectangle.
    fn scatter(rect: Rect, seed: u64, keep_one_in: u64) -> Vec<(i32, i32)> {
        let mut state = seed;
        let mut members = Vec::new();
        for y in rect.top..rect.bottom() {
            for x in rect.left..rect.right() {
                state ^= state << 13;
                state ^= state >> 7;
                state ^= state << 17;
                if state % keep_one_in == 0 {
                    members.push((x, y));
                }
            }
        }
        members
    }

    fn run(rect: Rect, members: &[(i32, i32)]) -> DistanceTransform {
        let mut edt = DistanceTransform::new(rect).unwrap();
        edt.initialize_membership(|x, y| members.contains(&(x, y)));
        edt.transform();
        edt
    }

    #[test]
    fn test_two_endpoints_row() {
        let edt = run(Rect::new(0, 0, 5, 1), &[(0, 0), (4, 0)]);
        let row: Vec<i32> = (0..5).map(|x| edt.squared_distance(x, 0)).collect();
        assert_eq!(row, [0, 1, 4, 1, 0]);
    }

    #[test]
    fn test_single_center_cell() {
        let edt = run(Rect::new(0, 0, 3, 3), &[(1, 1)]);
        assert_eq!(edt.squared_distance(1, 1), 0);
        for (x, y) in [(0, 0), (2, 0), (0, 2), (2, 2)] {
            assert_eq!(edt.squared_distance(x, y), 2);
        }
        for (x, y) in [(1, 0), (0, 1), (2, 1), (1, 2)] {
            assert_eq!(edt.squared_distance(x, y), 1);
        }
    }

    #[test]
    fn test_single_cell_exact_everywhere() {
        let rect = Rect::new(0, 0, 9, 7);
        let edt = run(rect, &[(6, 2)]);
        for y in rect.top..rect.bottom() {
            for x in rect.left..rect.right() {
                let dx = (x - 6) as i64;
                let dy = (y - 2) as i64;
                assert_eq!(edt.squared_distance(x, y) as i64, dx * dx + dy * dy);
            }
        }
    }

    #[test]
    fn test_all_cells_set() {
        let rect = Rect::new(0, 0, 6, 6);
        let mut edt = DistanceTransform::new(rect).unwrap();
        edt.initialize_membership(|_, _| true);
        edt.transform();
        for y in 0..6 {
            for x in 0..6 {
                assert_eq!(edt.squared_distance(x, y), 0);
            }
        }
    }

    #[test]
    fn test_matches_brute_force() {
        for seed in [1, 7, 42, 1234] {
            let rect = Rect::new(0, 0, 17, 13);
            let members = scatter(rect, seed, 23);
            if members.is_empty() {
                continue;
            }
            let edt = run(rect, &members);
            for y in rect.top..rect.bottom() {
                for x in rect.left..rect.right() {
                    assert_eq!(
                        edt.squared_distance(x, y),
                        naive(&members, x, y),
                        "mismatch at ({x}, {y}) with seed {seed}"
                    );
                }
            }
        }
    }

    #[test]
    fn test_negative_origin_matches_zero_origin() {
        let offset = (-20, -30);
        let zero = Rect::new(0, 0, 12, 9);
        let shifted = Rect::new(offset.0, offset.1, 12, 9);
        let members = scatter(zero, 99, 11);
        if members.is_empty() {
            return;
        }
        let shifted_members: Vec<(i32, i32)> = members
            .iter()
            .map(|&(x, y)| (x + offset.0, y + offset.1))
            .collect();

        let a = run(zero, &members);
        let b = run(shifted, &shifted_members);
        for y in zero.top..zero.bottom() {
            for x in zero.left..zero.right() {
                assert_eq!(
                    a.squared_distance(x, y),
                    b.squared_distance(x + offset.0, y + offset.1)
                );
            }
        }
    }

    #[test]
    fn test_deterministic() {
        let rect = Rect::new(0, 0, 16, 16);
        let members = scatter(rect, 5, 17);
        let a = run(rect, &members);
        let b = run(rect, &members);
        for y in rect.top..rect.bottom() {
            for x in rect.left..rect.right() {
                assert_eq!(a.squared_distance(x, y), b.squared_distance(x, y));
            }
        }
    }

    #[test]
    fn test_split_passes_match_full_transform() {
        let rect = Rect::new(0, 0, 14, 10);
        let members = scatter(rect, 3, 13);
        if members.is_empty() {
            return;
        }
        let full = run(rect, &members);

        let mut staged = DistanceTransform::new(rect).unwrap();
        staged.initialize_membership(|x, y| members.contains(&(x, y)));
        // Chunked passes: columns in two halves, then rows one at a time.
        staged.transform_columns(0..7);
        staged.transform_columns(7..14);
        for y in 0..10 {
            staged.transform_rows(y..y + 1);
        }

        for y in rect.top..rect.bottom() {
            for x in rect.left..rect.right() {
                assert_eq!(full.squared_distance(x, y), staged.squared_distance(x, y));
            }
        }
    }

    #[test]
    fn test_equidistant_tie_distance() {
        // (3, 0) is exactly 9 away from both members; either may win.
        let edt = run(Rect::new(0, 0, 7, 1), &[(0, 0), (6, 0)]);
        assert_eq!(edt.squared_distance(3, 0), 9);
    }

    #[test]
    fn test_real_distance_convenience() {
        use approx::assert_relative_eq;
        let edt = run(Rect::new(0, 0, 5, 5), &[(0, 0)]);
        let d: f64 = edt.distance(3, 4);
        assert_relative_eq!(d, 5.0, epsilon = 1e-12);
        let d: f32 = edt.distance(1, 1);
        assert_relative_eq!(d, std::f32::consts::SQRT_2, epsilon = 1e-6);
    }

    #[test]
    fn test_domain_validation() {
        assert!(DistanceTransform::new(Rect::new(0, 0, 40000, 1)).is_err());
        assert!(DistanceTransform::new(Rect::new(-40000, 0, 10, 10)).is_err());
        assert!(DistanceTransform::new(Rect::new(32760, 0, 10, 1)).is_err());
        assert!(DistanceTransform::new(Rect::new(-32768, -32768, 100, 100)).is_ok());
    }

    #[test]
    fn test_resize_revalidates_and_reuses() {
        let mut edt = DistanceTransform::new(Rect::new(0, 0, 8, 8)).unwrap();
        assert!(edt.resize(Rect::new(0, 0, 40000, 1), false).is_err());
        edt.resize(Rect::new(2, 2, 4, 4), false).unwrap();
        edt.initialize_membership(|x, y| x == 2 && y == 2);
        edt.transform();
        assert_eq!(edt.squared_distance(5, 5), 18);
    }
}
