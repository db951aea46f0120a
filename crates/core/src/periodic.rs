//! Central difference operators on periodic grids.
//!
//! Every matrix here is circulant: row `i` carries the stencil centred on
//! column `i`, wrapping around the ends. Explicit operators have `H = h·I`;
//! the implicit operator has a banded symmetric norm, so `D1` needs a solve.

use log::debug;
use nalgebra::DMatrix;

use crate::{
    error::{OperatorError, OperatorResult},
    stencil,
};

// Banded norm and skew stencil of the implicit operator.
const IMPLICIT_NORM: [f64; 6] = [
    4203267613564094932432577824954.0 / 7049220443079284250976145948443.0,
    22618790744689935699264926210401.0 / 84590645316951411011713751381316.0,
    -2209778222820418388602425303685.0 / 42295322658475705505856875690658.0,
    -1581945765.0 / 75409415044.0,
    228992488.0 / 33235651987.0,
    27214243.0 / 33751459947.0,
];
const IMPLICIT_Q: [f64; 5] = [
    9607266784889201296177.0 / 19560081711822931675052.0,
    8866705546306148289391.0 / 97800408559114658375260.0,
    -19659090145677941034997.0 / 293401225677343975125780.0,
    127051314.0 / 37983174851.0,
    389910724.0 / 128741750713.0,
];

/// Order of the dissipation added to the implicit operator.
const IMPLICIT_DISSIPATION_ORDER: u32 = 12;

#[derive(Debug, Clone, PartialEq)]
pub struct PeriodicOperators {
    pub norm: DMatrix<f64>,
    pub q: DMatrix<f64>,
}

impl PeriodicOperators {
    pub fn points(&self) -> usize {
        self.q.nrows()
    }

    /// `D1 = H⁻¹·Q`, via a Cholesky factorisation of `H`.
    pub fn d1(&self) -> OperatorResult<DMatrix<f64>> {
        let cholesky = self
            .norm
            .clone()
            .cholesky()
            .ok_or(OperatorError::SingularNorm)?;
        Ok(cholesky.solve(&self.q))
    }
}

/// Explicit central operator of the given order on `points` points with
/// spacing `h`, optionally with artificial dissipation `Q − a·S`.
pub fn periodic_explicit(
    points: usize,
    h: f64,
    order: u32,
    artificial_dissipation: bool,
) -> OperatorResult<PeriodicOperators> {
    check_spacing(h)?;
    let weights = stencil::central_first_derivative(order)
        .ok_or(OperatorError::UnsupportedPeriodicOrder { order })?;
    let dissipation_width = if artificial_dissipation { weights.len() } else { 0 };
    check_points(points, weights.len().max(dissipation_width))?;

    let mut q = circulant(points, &antisymmetric(weights));
    if artificial_dissipation {
        q -= dissipation(points, order)?;
    }
    debug!("periodic explicit operator: order={order} points={points} dissipation={artificial_dissipation}");
    Ok(PeriodicOperators {
        norm: DMatrix::identity(points, points) * h,
        q,
    })
}

/// Implicit operator with a banded norm, optionally with twelfth-order
/// dissipation.
pub fn periodic_implicit(
    points: usize,
    h: f64,
    artificial_dissipation: bool,
) -> OperatorResult<PeriodicOperators> {
    check_spacing(h)?;
    let half_width = if artificial_dissipation {
        IMPLICIT_DISSIPATION_ORDER as usize / 2
    } else {
        IMPLICIT_NORM.len() - 1
    };
    check_points(points, half_width)?;

    let mut norm_stencil: Vec<f64> = IMPLICIT_NORM[1..].iter().rev().copied().collect();
    norm_stencil.extend_from_slice(&IMPLICIT_NORM);
    let norm = circulant(points, &norm_stencil) * h;

    let mut q = circulant(points, &antisymmetric(&IMPLICIT_Q));
    if artificial_dissipation {
        q -= dissipation(points, IMPLICIT_DISSIPATION_ORDER)?;
    }
    debug!("periodic implicit operator: points={points} dissipation={artificial_dissipation}");
    Ok(PeriodicOperators { norm, q })
}

/// Variable-coefficient second derivative built from the explicit first
/// derivative: `M(c) = −(1/h)·Q·diag(c)·Q`.
#[derive(Debug, Clone, PartialEq)]
pub struct PeriodicVariableWide {
    q: DMatrix<f64>,
    h: f64,
}

impl PeriodicVariableWide {
    pub fn new(points: usize, h: f64, order: u32) -> OperatorResult<Self> {
        let ops = periodic_explicit(points, h, order, false)?;
        Ok(Self { q: ops.q, h })
    }

    pub fn points(&self) -> usize {
        self.q.nrows()
    }

    pub fn m(&self, c: &[f64]) -> OperatorResult<DMatrix<f64>> {
        let n = self.points();
        if c.len() != n {
            return Err(OperatorError::CoefficientLength {
                expected: n,
                actual: c.len(),
            });
        }
        let mut scaled = self.q.clone();
        for (j, &cj) in c.iter().enumerate() {
            scaled.column_mut(j).scale_mut(cj);
        }
        Ok(scaled * &self.q * (-1.0 / self.h))
    }
}

/// `a·S` with `S` the `order`-th undivided difference, signed so that `S` is
/// negative semi-definite.
fn dissipation(points: usize, order: u32) -> OperatorResult<DMatrix<f64>> {
    let a = match order {
        2 => 1.0 / 2.0,
        4 => 1.0 / 12.0,
        6 => 1.0 / 60.0,
        8 => 1.0 / 280.0,
        10 => 1.0 / 1260.0,
        12 => 1.0 / 5544.0,
        _ => return Err(OperatorError::UnsupportedPeriodicOrder { order }),
    };
    let q = order as usize / 2;
    let sign = if q % 2 == 1 { 1.0 } else { -1.0 };
    let coeffs: Vec<f64> = stencil::binomial_difference(q)
        .into_iter()
        .map(|c| sign * a * c)
        .collect();
    Ok(circulant(points, &coeffs))
}

/// Full stencil `[-a_l, …, -a_1, 0, a_1, …, a_l]`.
fn antisymmetric(weights: &[f64]) -> Vec<f64> {
    let mut full: Vec<f64> = weights.iter().rev().map(|a| -a).collect();
    full.push(0.0);
    full.extend_from_slice(weights);
    full
}

/// Circulant matrix from a centred stencil of odd length.
fn circulant(points: usize, stencil: &[f64]) -> DMatrix<f64> {
    let half = stencil.len() / 2;
    let mut matrix = DMatrix::zeros(points, points);
    for i in 0..points {
        for (k, &c) in stencil.iter().enumerate() {
            let j = (i + points + k - half) % points;
            matrix[(i, j)] = c;
        }
    }
    matrix
}

fn check_spacing(h: f64) -> OperatorResult<()> {
    if h.is_finite() && h > 0.0 {
        Ok(())
    } else {
        Err(OperatorError::InvalidSpacing { h })
    }
}

/// The stencil must fit on the grid without wrapping onto itself.
fn check_points(points: usize, half_width: usize) -> OperatorResult<()> {
    let minimum = 2 * half_width + 1;
    if points < minimum {
        return Err(OperatorError::TooFewPoints { points, minimum });
    }
    Ok(())
}
