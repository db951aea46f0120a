//! Order-specific builders for boundary-optimised SBP operator sets.

use log::debug;
use nalgebra::{DMatrix, DVector};

use crate::{
    bundle::OperatorBundle,
    closure::{self, ClosureSpec},
    error::{OperatorError, OperatorResult},
    grid::Grid1D,
    order::{Narrowing, Order},
    stencil,
};

/// Builds a complete operator set for one interior order.
pub trait OperatorBuilder: Send + Sync {
    fn order(&self) -> Order;

    /// Fewest grid points accepted for the given narrowing.
    fn minimum_points(&self, narrowing: Narrowing) -> usize;

    fn build(&self, points: usize, length: f64, narrowing: Narrowing) -> OperatorResult<OperatorBundle>;
}

/// Builder shared by both orders; the order enters only through its
/// [`ClosureSpec`] and the narrowing corrections.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundaryOptimizedBuilder {
    spec: ClosureSpec,
}

pub static ORDER6_BUILDER: BoundaryOptimizedBuilder = BoundaryOptimizedBuilder::new(ClosureSpec::SIXTH);
pub static ORDER8_BUILDER: BoundaryOptimizedBuilder = BoundaryOptimizedBuilder::new(ClosureSpec::EIGHTH);

/// Sixth-order interior operators on `points` points spanning `[0, length]`.
pub fn order6(points: usize, length: f64, narrowing: Narrowing) -> OperatorResult<OperatorBundle> {
    ORDER6_BUILDER.build(points, length, narrowing)
}

/// Eighth-order interior operators on `points` points spanning `[0, length]`.
pub fn order8(points: usize, length: f64, narrowing: Narrowing) -> OperatorResult<OperatorBundle> {
    ORDER8_BUILDER.build(points, length, narrowing)
}

impl BoundaryOptimizedBuilder {
    pub const fn new(spec: ClosureSpec) -> Self {
        Self { spec }
    }

    pub fn spec(&self) -> &ClosureSpec {
        &self.spec
    }

    fn assemble(&self, grid: Grid1D, narrowing: Narrowing) -> OperatorResult<OperatorBundle> {
        let n = grid.len();
        let h = grid.spacing();
        let closure = closure::solve_closure(&self.spec, grid.offsets())?;

        let scaled = DVector::from_iterator(n, closure.weights.iter().map(|w| w * h));
        let norm = DMatrix::from_diagonal(&scaled);
        let norm_inverse = DMatrix::from_diagonal(&scaled.map(|w| 1.0 / w));
        let q = closure.q;
        let d1 = &norm_inverse * &q;

        let mut e_1 = DVector::<f64>::zeros(n);
        e_1[0] = 1.0;
        let mut e_m = DVector::<f64>::zeros(n);
        e_m[n - 1] = 1.0;
        let s_1 = d1.row(0).into_owned();
        let s_m = d1.row(n - 1).into_owned();

        let mut m = d1.transpose() * &norm * &d1;
        for &(degree, weight) in stencil::narrowing_corrections(self.spec.order, narrowing) {
            let delta = stencil::undivided_difference(grid.offsets(), degree);
            m += delta.tr_mul(&delta) * (weight / h);
        }
        let m = (&m + m.transpose()) * 0.5;

        let boundary = &e_m * &s_m - &e_1 * &s_1;
        let d2 = &norm_inverse * (boundary - &m);

        Ok(OperatorBundle {
            norm,
            norm_inverse,
            d1,
            d2,
            m,
            q,
            e_1,
            e_m,
            s_1,
            s_m,
            x: grid.into_coordinates(),
            h,
        })
    }
}

impl OperatorBuilder for BoundaryOptimizedBuilder {
    fn order(&self) -> Order {
        self.spec.order
    }

    fn minimum_points(&self, _narrowing: Narrowing) -> usize {
        self.spec.minimum_points()
    }

    fn build(&self, points: usize, length: f64, narrowing: Narrowing) -> OperatorResult<OperatorBundle> {
        if !(length.is_finite() && length > 0.0) {
            return Err(OperatorError::InvalidDomainLength { length });
        }
        let minimum = self.minimum_points(narrowing);
        if points < minimum {
            return Err(OperatorError::InsufficientGridSize {
                order: self.spec.order,
                narrowing,
                points,
                minimum,
            });
        }
        debug!(
            "building order {} operators: points={points} length={length} narrowing={narrowing}",
            self.spec.order
        );
        let grid = Grid1D::boundary_adapted(points, length, &self.spec.layout);
        self.assemble(grid, narrowing)
    }
}
