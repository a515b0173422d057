//! Tridiagonal linear systems and the Thomas algorithm.
//!
//! # Overview
//!
//! * [`TridiagonalSystem`] — the three bands plus a right-hand side
//! * [`thomas_solve`] — slice-level forward elimination / back substitution

use fdp_core::{errors::Result, Error, Real};

/// A tridiagonal linear system `A · x = rhs`.
///
/// Row `j` reads `lower[j]·x[j−1] + diag[j]·x[j] + upper[j]·x[j+1] = rhs[j]`.
/// `lower[0]` and `upper[n−1]` are unused.
#[derive(Debug, Clone, PartialEq)]
pub struct TridiagonalSystem {
    /// Sub-diagonal (index 0 unused).
    pub lower: Vec<Real>,
    /// Main diagonal.
    pub diag: Vec<Real>,
    /// Super-diagonal (last index unused).
    pub upper: Vec<Real>,
    /// Right-hand side.
    pub rhs: Vec<Real>,
}

impl TridiagonalSystem {
    /// Create an all-zero system of size `n`.
    pub fn new(n: usize) -> Self {
        Self {
            lower: vec![0.0; n],
            diag: vec![0.0; n],
            upper: vec![0.0; n],
            rhs: vec![0.0; n],
        }
    }

    /// Number of rows.
    pub fn size(&self) -> usize {
        self.diag.len()
    }

    /// Set row `j` in one call.
    #[inline]
    pub fn set_row(&mut self, j: usize, lower: Real, diag: Real, upper: Real, rhs: Real) {
        self.lower[j] = lower;
        self.diag[j] = diag;
        self.upper[j] = upper;
        self.rhs[j] = rhs;
    }

    /// Apply the matrix: `y = A · x`.
    ///
    /// # Errors
    /// Returns an error if `x` does not have one entry per row.
    pub fn apply(&self, x: &[Real]) -> Result<Vec<Real>> {
        let n = self.size();
        fdp_core::ensure!(x.len() == n, "vector size {} does not match system size {n}", x.len());
        let y = (0..n)
            .map(|j| {
                let mut v = self.diag[j] * x[j];
                if j > 0 {
                    v += self.lower[j] * x[j - 1];
                }
                if j + 1 < n {
                    v += self.upper[j] * x[j + 1];
                }
                v
            })
            .collect();
        Ok(y)
    }

    /// Solve the system with the Thomas algorithm.
    ///
    /// The system itself is left untouched.
    pub fn solve(&self) -> Result<Vec<Real>> {
        thomas_solve(&self.lower, &self.diag, &self.upper, &self.rhs)
    }
}

/// Solve a tridiagonal system by forward elimination and back substitution.
///
/// - `a`: sub-diagonal (`a[0]` unused)
/// - `b`: main diagonal
/// - `c`: super-diagonal (`c[n−1]` unused)
/// - `d`: right-hand side
///
/// The inputs are copied before elimination; the caller's slices are never
/// modified. The algorithm is stable for diagonally dominant systems.
///
/// # Errors
/// * [`Error::Precondition`] if the slices are empty or of unequal length.
/// * [`Error::SingularSystem`] if a pivot is zero or non-finite after
///   elimination.
///
/// # Example
/// ```
/// use fdp_math::tridiagonal::thomas_solve;
/// // [[2, -1, 0], [-1, 2, -1], [0, -1, 2]] · [1, 2, 3] = [0, 0, 4]
/// let x = thomas_solve(
///     &[0.0, -1.0, -1.0],
///     &[2.0, 2.0, 2.0],
///     &[-1.0, -1.0, 0.0],
///     &[0.0, 0.0, 4.0],
/// )
/// .unwrap();
/// assert!((x[1] - 2.0).abs() < 1e-12);
/// ```
pub fn thomas_solve(a: &[Real], b: &[Real], c: &[Real], d: &[Real]) -> Result<Vec<Real>> {
    let n = d.len();
    fdp_core::ensure!(n > 0, "tridiagonal system must have at least one row");
    fdp_core::ensure!(
        a.len() == n && b.len() == n && c.len() == n,
        "band lengths ({}, {}, {}) do not match rhs length {n}",
        a.len(),
        b.len(),
        c.len()
    );

    let mut pivot = b.to_vec();
    let mut rhs = d.to_vec();

    check_pivot(pivot[0], 0)?;
    for j in 1..n {
        let m = a[j] / pivot[j - 1];
        pivot[j] -= m * c[j - 1];
        rhs[j] -= m * rhs[j - 1];
        check_pivot(pivot[j], j)?;
    }

    let mut x = vec![0.0; n];
    x[n - 1] = rhs[n - 1] / pivot[n - 1];
    for j in (0..n - 1).rev() {
        x[j] = (rhs[j] - c[j] * x[j + 1]) / pivot[j];
    }
    Ok(x)
}

#[inline]
fn check_pivot(p: Real, row: usize) -> Result<()> {
    if p == 0.0 || !p.is_finite() {
        return Err(Error::SingularSystem { row });
    }
    Ok(())
}
