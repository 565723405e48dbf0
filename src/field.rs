//! Real-valued views over completed transforms.

use num_traits::Float;

use crate::error::TransformError;
use crate::grid::Rect;
use crate::transform::DistanceTransform;

/// A real-valued distance field stored on a grid.
///
/// Holds the square-root distances of a completed
/// [`DistanceTransform`], or a signed field built by [`signed_field`].
/// Cell centers sit at integer coordinates of the rectangle.
#[derive(Debug, Clone)]
pub struct DistanceField<F> {
    rect: Rect,
    values: Vec<F>,
}

impl<F: Float> DistanceField<F> {
    /// Materializes real distances from a completed transform.
    pub fn from_transform(transform: &DistanceTransform) -> Self {
        let rect = transform.rect();
        let mut values = Vec::with_capacity(rect.area());
        for y in rect.top..rect.bottom() {
            for x in rect.left..rect.right() {
                values.push(transform.distance(x, y));
            }
        }
        Self { rect, values }
    }

    /// The rectangle this field covers.
    #[inline]
    pub fn rect(&self) -> Rect {
        self.rect
    }

    #[inline]
    fn index(&self, x: i32, y: i32) -> usize {
        debug_assert!(self.rect.contains(x, y));
        ((x - self.rect.left) + (y - self.rect.top) * self.rect.width) as usize
    }

    /// The field value at cell `(x, y)`.
    #[inline]
    pub fn get(&self, x: i32, y: i32) -> F {
        self.values[self.index(x, y)]
    }

    /// Samples the field at a continuous point using bilinear
    /// interpolation between the four surrounding cell centers.
    ///
    /// Coordinates outside the rectangle are clamped to its edges.
    pub fn sample(&self, x: F, y: F) -> F {
        let gx = x - F::from(self.rect.left).unwrap();
        let gy = y - F::from(self.rect.top).unwrap();
        let max_x = (self.rect.width - 1).max(0) as usize;
        let max_y = (self.rect.height - 1).max(0) as usize;

        let x0 = gx.floor().to_usize().unwrap_or(0).min(max_x);
        let y0 = gy.floor().to_usize().unwrap_or(0).min(max_y);
        let x1 = (x0 + 1).min(max_x);
        let y1 = (y0 + 1).min(max_y);

        let fx = (gx - F::from(x0).unwrap()).max(F::zero()).min(F::one());
        let fy = (gy - F::from(y0).unwrap()).max(F::zero()).min(F::one());

        let stride = self.rect.width as usize;
        let v00 = self.values[y0 * stride + x0];
        let v10 = self.values[y0 * stride + x1];
        let v01 = self.values[y1 * stride + x0];
        let v11 = self.values[y1 * stride + x1];

        let one = F::one();
        let v0 = v00 * (one - fx) + v10 * fx;
        let v1 = v01 * (one - fx) + v11 * fx;
        v0 * (one - fy) + v1 * fy
    }
}

/// Computes a signed distance field from a membership predicate.
///
/// Cells where the predicate is true are "inside". The 4-connected
/// boundary — inside cells adjacent to outside cells and vice versa — is
/// extracted, one exact transform measures distance to that boundary, and
/// the sign is applied afterward: negative inside, positive outside.
///
/// When the predicate is uniform over the whole rectangle there is no
/// boundary; every cell is then `-infinity` (all inside) or `+infinity`
/// (all outside).
///
/// # Example
///
/// ```
/// use exactum::{signed_field, Rect};
///
/// // A 3x3 solid block in the middle of a 9x9 domain.
/// let field = signed_field::<f64, _>(Rect::new(0, 0, 9, 9), |x, y| {
///     (3..6).contains(&x) && (3..6).contains(&y)
/// })
/// .unwrap();
///
/// assert!(field.get(4, 4) < 0.0); // inside
/// assert!(field.get(0, 0) > 0.0); // outside
/// ```
pub fn signed_field<F, P>(rect: Rect, mut predicate: P) -> Result<DistanceField<F>, TransformError>
where
    F: Float,
    P: FnMut(i32, i32) -> bool,
{
    let width = rect.width as usize;
    let idx = |x: i32, y: i32| (x - rect.left) as usize + (y - rect.top) as usize * width;

    // The predicate is only invoked once per cell; boundary extraction
    // reads this buffer.
    let mut inside = vec![false; rect.area()];
    for y in rect.top..rect.bottom() {
        for x in rect.left..rect.right() {
            inside[idx(x, y)] = predicate(x, y);
        }
    }

    // A cell is boundary when any 4-neighbor differs in membership,
    // whichever side of the surface it is on.
    let mut boundary = vec![false; rect.area()];
    for y in rect.top..rect.bottom() {
        for x in rect.left..rect.right() {
            let own = inside[idx(x, y)];
            let mut differs = false;
            if x > rect.left {
                differs |= inside[idx(x - 1, y)] != own;
            }
            if x + 1 < rect.right() {
                differs |= inside[idx(x + 1, y)] != own;
            }
            if y > rect.top {
                differs |= inside[idx(x, y - 1)] != own;
            }
            if y + 1 < rect.bottom() {
                differs |= inside[idx(x, y + 1)] != own;
            }
            boundary[idx(x, y)] = differs;
        }
    }
    let any_boundary = boundary.iter().any(|&b| b);

    let mut edt = DistanceTransform::new(rect)?;
    edt.initialize_membership(|x, y| boundary[idx(x, y)]);

    let mut values = Vec::with_capacity(rect.area());
    if any_boundary {
        edt.transform();
        for y in rect.top..rect.bottom() {
            for x in rect.left..rect.right() {
                let d: F = edt.distance(x, y);
                values.push(if inside[idx(x, y)] { -d } else { d });
            }
        }
    } else {
        // Uniform membership: no boundary to measure against.
        for &cell_inside in &inside {
            values.push(if cell_inside {
                F::neg_infinity()
            } else {
                F::infinity()
            });
        }
    }

    Ok(DistanceField { rect, values })
}
