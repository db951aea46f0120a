//! Interior difference stencils and the `D2` narrowing corrections.

use nalgebra::DMatrix;

use crate::order::{Narrowing, Order};

const CENTRAL_2: [f64; 1] = [1.0 / 2.0];
const CENTRAL_4: [f64; 2] = [2.0 / 3.0, -1.0 / 12.0];
pub(crate) const CENTRAL_6: [f64; 3] = [3.0 / 4.0, -3.0 / 20.0, 1.0 / 60.0];
pub(crate) const CENTRAL_8: [f64; 4] = [4.0 / 5.0, -1.0 / 5.0, 4.0 / 105.0, -1.0 / 280.0];
const CENTRAL_10: [f64; 5] = [5.0 / 6.0, -5.0 / 21.0, 5.0 / 84.0, -5.0 / 504.0, 1.0 / 1260.0];
const CENTRAL_12: [f64; 6] = [
    6.0 / 7.0,
    -15.0 / 56.0,
    5.0 / 63.0,
    -1.0 / 56.0,
    1.0 / 385.0,
    -1.0 / 5544.0,
];

/// Weights `a_1..a_{p/2}` of the central first-derivative stencil of order `p`.
///
/// The stencil is antisymmetric: the weight at offset `-k` is `-a_k` and the
/// centre weight is zero.
pub fn central_first_derivative(order: u32) -> Option<&'static [f64]> {
    match order {
        2 => Some(&CENTRAL_2),
        4 => Some(&CENTRAL_4),
        6 => Some(&CENTRAL_6),
        8 => Some(&CENTRAL_8),
        10 => Some(&CENTRAL_10),
        12 => Some(&CENTRAL_12),
        _ => None,
    }
}

/// Difference between the narrow and the wide interior symbols of `M`,
/// written as weights of `(Δ^k)ᵗΔ^k` for `k = p/2 + 1 ..= p`.
const NARROW_6: [(usize, f64); 3] = [(4, 1.0 / 80.0), (5, 1.0 / 600.0), (6, 1.0 / 3600.0)];
const NARROW_8: [(usize, f64); 4] = [
    (5, 1.0 / 350.0),
    (6, 1.0 / 2520.0),
    (7, 1.0 / 14700.0),
    (8, 1.0 / 78400.0),
];

// Narrow weights with the next θ² Taylor coefficient added at k = p/2 + 1
// (1/560 and 1/3150): the compact stencil one point wider per side.
const INTERMEDIATE_6: [(usize, f64); 3] = [(4, 1.0 / 70.0), (5, 1.0 / 600.0), (6, 1.0 / 3600.0)];
const INTERMEDIATE_8: [(usize, f64); 4] = [
    (5, 1.0 / 315.0),
    (6, 1.0 / 2520.0),
    (7, 1.0 / 14700.0),
    (8, 1.0 / 78400.0),
];

/// `(degree, weight)` pairs added to `M` as `weight / h · (Δ^degree)ᵗ Δ^degree`.
///
/// Every weight is positive, so the correction is positive semi-definite and
/// it annihilates polynomials of degree below `p/2 + 1`.
pub fn narrowing_corrections(order: Order, narrowing: Narrowing) -> &'static [(usize, f64)] {
    match (order, narrowing) {
        (_, Narrowing::Wide) => &[],
        (Order::Sixth, Narrowing::Intermediate) => &INTERMEDIATE_6,
        (Order::Sixth, Narrowing::Narrow) => &NARROW_6,
        (Order::Eighth, Narrowing::Intermediate) => &INTERMEDIATE_8,
        (Order::Eighth, Narrowing::Narrow) => &NARROW_8,
    }
}

/// Undivided difference operator of the given degree on a possibly
/// non-equidistant grid.
///
/// Row `j` holds `k!·f[ξ_j, …, ξ_{j+k}]` with offsets in units of `h`, which
/// reduces to the usual forward difference on equidistant points and vanishes
/// exactly on polynomials of degree below `k`.
pub fn undivided_difference(offsets: &[f64], degree: usize) -> DMatrix<f64> {
    let n = offsets.len();
    let rows = n.saturating_sub(degree);
    let scale = (1..=degree).map(|k| k as f64).product::<f64>();
    let mut delta = DMatrix::zeros(rows, n);
    for row in 0..rows {
        let nodes = &offsets[row..=row + degree];
        for (a, &xa) in nodes.iter().enumerate() {
            let denom: f64 = nodes
                .iter()
                .enumerate()
                .filter(|&(b, _)| b != a)
                .map(|(_, &xb)| xa - xb)
                .product();
            delta[(row, row + a)] = scale / denom;
        }
    }
    delta
}

/// Binomial stencil of the `2q`-th undivided difference, `(-1)^j C(2q, j)`.
pub fn binomial_difference(q: usize) -> Vec<f64> {
    let width = 2 * q;
    let mut coeffs = Vec::with_capacity(width + 1);
    let mut c = 1.0;
    for j in 0..=width {
        let sign = if j % 2 == 0 { 1.0 } else { -1.0 };
        coeffs.push(sign * c);
        c = c * (width - j) as f64 / (j + 1) as f64;
    }
    coeffs
}
