//! Local Lagrange interpolation on a uniformly spaced grid.
//!
//! The value at `x0` is read off the unique polynomial of degree `n − 1`
//! through `n` consecutive samples. The stencil is centred on `x0` as far as
//! the data allows and slides inwards near either end of the grid, so the
//! window never runs off the samples.

use fdp_core::{errors::Result, Error, Real};

use super::Interpolation1D;

/// Interpolate `y(x)` at `x0` with an `n`-point local Lagrange polynomial.
///
/// `x` must be uniformly spaced; the spacing `x[1] − x[0]` is only used to
/// locate the stencil. An `n` larger than the sample count is clamped to the
/// sample count. With `n == 1` the nearest selected sample is returned as is.
///
/// # Errors
/// * [`Error::Precondition`] if `x` and `y` differ in length or the grid
///   spacing is zero or non-finite.
/// * [`Error::DegenerateInterpolation`] if no sample point is usable.
///
/// # Example
/// ```
/// use fdp_math::interpolations::lagrange_interpolation;
/// let x = [0.0, 1.0, 2.0, 3.0];
/// let y: Vec<f64> = x.iter().map(|v| v * v).collect();
/// let v = lagrange_interpolation(&y, &x, 1.5, 3).unwrap();
/// assert!((v - 2.25).abs() < 1e-12);
/// ```
pub fn lagrange_interpolation(y: &[Real], x: &[Real], x0: Real, n: usize) -> Result<Real> {
    fdp_core::ensure!(
        x.len() == y.len(),
        "x and y must have the same length ({} != {})",
        x.len(),
        y.len()
    );
    let n = n.min(x.len());
    if n == 0 {
        return Err(Error::DegenerateInterpolation(format!(
            "no sample points available for interpolation at {x0}"
        )));
    }
    check_spacing(x)?;
    let start = stencil_start(x, x0, n);
    Ok(evaluate(&y[start..start + n], &x[start..start + n], x0))
}

/// A reusable local Lagrange interpolation over fixed samples.
#[derive(Debug, Clone)]
pub struct LocalLagrangeInterpolation {
    xs: Vec<Real>,
    ys: Vec<Real>,
    order: usize,
}

impl LocalLagrangeInterpolation {
    /// Build an interpolation of the given stencil `order` (number of
    /// points). `order` is clamped to the number of samples.
    ///
    /// # Errors
    /// Same conditions as [`lagrange_interpolation`].
    pub fn new(xs: &[Real], ys: &[Real], order: usize) -> Result<Self> {
        fdp_core::ensure!(
            xs.len() == ys.len(),
            "xs and ys must have the same length ({} != {})",
            xs.len(),
            ys.len()
        );
        let order = order.min(xs.len());
        if order == 0 {
            return Err(Error::DegenerateInterpolation(
                "interpolation order resolves to zero points".into(),
            ));
        }
        check_spacing(xs)?;
        Ok(Self {
            xs: xs.to_vec(),
            ys: ys.to_vec(),
            order,
        })
    }

    /// Effective stencil size after clamping.
    pub fn order(&self) -> usize {
        self.order
    }
}

impl Interpolation1D for LocalLagrangeInterpolation {
    fn operator(&self, x: Real) -> Real {
        let n = self.order;
        let start = stencil_start(&self.xs, x, n);
        evaluate(&self.ys[start..start + n], &self.xs[start..start + n], x)
    }

    fn x_min(&self) -> Real {
        self.xs[0].min(self.xs[self.xs.len() - 1])
    }

    fn x_max(&self) -> Real {
        self.xs[0].max(self.xs[self.xs.len() - 1])
    }
}

fn check_spacing(x: &[Real]) -> Result<()> {
    if x.len() >= 2 {
        let dx = x[1] - x[0];
        fdp_core::ensure!(
            dx != 0.0 && dx.is_finite(),
            "grid spacing must be non-zero and finite, got {dx}"
        );
    }
    Ok(())
}

/// First index of the `n`-point stencil around `x0`, clamped to the data.
fn stencil_start(x: &[Real], x0: Real, n: usize) -> usize {
    let len = x.len();
    if len < 2 {
        return 0;
    }
    let pos = (x0 - x[0]) / (x[1] - x[0]);
    let half = (n / 2) as Real;
    // Float until the clamp: an infinite `pos` must saturate, not overflow.
    let start = if n % 2 == 0 {
        pos.floor() - (half - 1.0)
    } else {
        (pos + 0.5).floor() - half
    };
    if start.is_nan() {
        return 0;
    }
    start.clamp(0.0, (len - n) as Real) as usize
}

fn evaluate(ys: &[Real], xs: &[Real], x0: Real) -> Real {
    if ys.len() == 1 {
        return ys[0];
    }
    ys.iter()
        .zip(xs)
        .enumerate()
        .map(|(i, (&yi, &xi))| {
            xs.iter()
                .enumerate()
                .filter(|&(j, _)| j != i)
                .fold(yi, |acc, (_, &xj)| acc * (x0 - xj) / (xi - xj))
        })
        .sum()
}
