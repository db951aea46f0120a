//! Boundary closure of the diagonal-norm first-derivative operator.
//!
//! The closure is computed in grid units (`h = 1`). For the `r` boundary rows
//! the accuracy conditions
//!
//! ```text
//! Σ_j Q_ij ξ_j^k = w_i · k · ξ_i^(k-1),   k = 0..=p/2
//! ```
//!
//! are linear in the unknown norm weights `w_i` and in the strictly upper
//! entries of the skew-symmetric `r×r` block of `Q`. Both are solved for as
//! deviations from the interior stencil in the minimum-norm least-squares
//! sense; the right closure is the mirror image of the left one.

use log::trace;
use nalgebra::{DMatrix, DVector};

use crate::{
    error::{OperatorError, OperatorResult},
    grid::BoundaryLayout,
    order::Order,
    stencil,
};

/// Singular values below this fraction of the largest one are treated as zero.
const SINGULAR_CUTOFF: f64 = 1e-10;

/// Relative residual above which the closure conditions count as violated.
const RESIDUAL_TOLERANCE: f64 = 1e-9;

/// Closure parameters for one interior order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClosureSpec {
    pub order: Order,
    /// Number of rows with modified norm weights at each boundary.
    pub block: usize,
    pub layout: BoundaryLayout,
}

impl ClosureSpec {
    pub const SIXTH: Self = Self {
        order: Order::Sixth,
        block: 6,
        layout: BoundaryLayout::SIXTH,
    };

    pub const EIGHTH: Self = Self {
        order: Order::Eighth,
        block: 8,
        layout: BoundaryLayout::EIGHTH,
    };

    pub fn for_order(order: Order) -> Self {
        match order {
            Order::Sixth => Self::SIXTH,
            Order::Eighth => Self::EIGHTH,
        }
    }

    /// Smallest grid on which the two closures and the interior rows that
    /// couple into them do not overlap.
    pub fn minimum_points(&self) -> usize {
        2 * self.block + self.order.boundary_accuracy()
    }

    pub fn interior_stencil(&self) -> &'static [f64] {
        match self.order {
            Order::Sixth => &stencil::CENTRAL_6,
            Order::Eighth => &stencil::CENTRAL_8,
        }
    }
}

/// Norm weights and `Q` for a full grid, both in grid units.
#[derive(Debug, Clone)]
pub struct Closure {
    pub weights: Vec<f64>,
    pub q: DMatrix<f64>,
}

pub fn solve_closure(spec: &ClosureSpec, offsets: &[f64]) -> OperatorResult<Closure> {
    let n = offsets.len();
    let r = spec.block;
    let s = spec.order.boundary_accuracy();
    if n < spec.minimum_points() {
        return Err(OperatorError::ClosureSolve(format!(
            "{n} points cannot hold two closures of {r} rows"
        )));
    }

    let mut q = interior_q(n, spec.interior_stencil());
    let pairs: Vec<(usize, usize)> = (0..r)
        .flat_map(|i| (i + 1..r).map(move |j| (i, j)))
        .collect();
    let unknowns = r + pairs.len();
    let equations = r * (s + 1);

    let mut system = DMatrix::<f64>::zeros(equations, unknowns);
    let mut rhs = DVector::<f64>::zeros(equations);
    for i in 0..r {
        for k in 0..=s {
            let row = i * (s + 1) + k;
            let derivative = if k == 0 {
                0.0
            } else {
                k as f64 * offsets[i].powi(k as i32 - 1)
            };
            system[(row, i)] = -derivative;
            for (u, &(a, b)) in pairs.iter().enumerate() {
                if a == i {
                    system[(row, r + u)] += offsets[b].powi(k as i32);
                }
                if b == i {
                    system[(row, r + u)] -= offsets[a].powi(k as i32);
                }
            }
            let mut current: f64 = (0..n).map(|j| q[(i, j)] * offsets[j].powi(k as i32)).sum();
            if i == 0 {
                current -= 0.5 * offsets[0].powi(k as i32);
            }
            rhs[row] = derivative - current;
        }
    }

    let svd = system.clone().svd(true, true);
    let cutoff = svd.singular_values.max() * SINGULAR_CUTOFF;
    let rank = svd.singular_values.iter().filter(|&&v| v > cutoff).count();
    let solution = svd
        .solve(&rhs, cutoff)
        .map_err(|err| OperatorError::ClosureSolve(err.to_string()))?;
    let residual = (&system * &solution - &rhs).amax();
    trace!(
        "order {} closure: {equations} conditions, {unknowns} unknowns, rank {rank}, residual {residual:.3e}",
        spec.order
    );
    if !(residual <= RESIDUAL_TOLERANCE * (1.0 + rhs.amax())) {
        return Err(OperatorError::ClosureSolve(format!(
            "accuracy conditions left a residual of {residual:.3e}"
        )));
    }

    let mut weights = vec![1.0; n];
    for i in 0..r {
        weights[i] = 1.0 + solution[i];
        weights[n - 1 - i] = weights[i];
    }
    if let Some(w) = weights.iter().find(|&&w| !(w > 0.0)) {
        return Err(OperatorError::ClosureSolve(format!(
            "non-positive norm weight {w}"
        )));
    }

    for (u, &(a, b)) in pairs.iter().enumerate() {
        q[(a, b)] += solution[r + u];
        q[(b, a)] -= solution[r + u];
    }
    q[(0, 0)] = -0.5;
    for i in 0..r {
        for j in 0..r {
            q[(n - 1 - i, n - 1 - j)] = -q[(i, j)];
        }
    }

    Ok(Closure { weights, q })
}

/// Antisymmetric Toeplitz matrix carrying the central stencil on every row.
fn interior_q(n: usize, weights: &[f64]) -> DMatrix<f64> {
    let mut q = DMatrix::zeros(n, n);
    for i in 0..n {
        for (k, &a) in weights.iter().enumerate() {
            let k = k + 1;
            if i + k < n {
                q[(i, i + k)] = a;
            }
            if i >= k {
                q[(i, i - k)] = -a;
            }
        }
    }
    q
}
