//! The operator set returned by a construction call.

use nalgebra::{DMatrix, DVector, RowDVector};

/// Positional form of [`OperatorBundle`]:
/// `(H, HI, D1, D2, M, Q, e_1, e_m, S_1, S_m, x, h)`.
pub type BundleParts = (
    DMatrix<f64>,
    DMatrix<f64>,
    DMatrix<f64>,
    DMatrix<f64>,
    DMatrix<f64>,
    DMatrix<f64>,
    DVector<f64>,
    DVector<f64>,
    RowDVector<f64>,
    RowDVector<f64>,
    Vec<f64>,
    f64,
);

/// Summation-by-parts operators for one spatial dimension.
///
/// A bundle is built fresh by every construction call and owned entirely by
/// the caller. With `B = e_m·e_mᵗ − e_1·e_1ᵗ` the operators satisfy
///
/// ```text
/// D1 = HI·Q,   Q + Qᵗ = B,   D2 = HI·(−M + e_m·S_m − e_1·S_1)
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct OperatorBundle {
    /// Diagonal norm `H` (quadrature weights times `h`).
    pub norm: DMatrix<f64>,
    /// `HI`, the inverse of `H`.
    pub norm_inverse: DMatrix<f64>,
    pub d1: DMatrix<f64>,
    pub d2: DMatrix<f64>,
    /// Symmetric positive semi-definite part of `D2`.
    pub m: DMatrix<f64>,
    pub q: DMatrix<f64>,
    pub e_1: DVector<f64>,
    pub e_m: DVector<f64>,
    /// First-derivative approximation at the left boundary point.
    pub s_1: RowDVector<f64>,
    /// First-derivative approximation at the right boundary point.
    pub s_m: RowDVector<f64>,
    /// Grid coordinates on `[0, L]`.
    pub x: Vec<f64>,
    /// Uniform interior spacing.
    pub h: f64,
}

impl OperatorBundle {
    pub fn points(&self) -> usize {
        self.x.len()
    }

    pub fn length(&self) -> f64 {
        self.x.last().copied().unwrap_or_default()
    }

    /// Quadrature weights, the diagonal of `H`.
    pub fn weights(&self) -> DVector<f64> {
        self.norm.diagonal()
    }

    /// `e_m·e_mᵗ − e_1·e_1ᵗ`.
    pub fn boundary_matrix(&self) -> DMatrix<f64> {
        &self.e_m * self.e_m.transpose() - &self.e_1 * self.e_1.transpose()
    }

    pub fn into_parts(self) -> BundleParts {
        (
            self.norm,
            self.norm_inverse,
            self.d1,
            self.d2,
            self.m,
            self.q,
            self.e_1,
            self.e_m,
            self.s_1,
            self.s_m,
            self.x,
            self.h,
        )
    }
}
