//! Upwind SBP first-derivative operators of order 3, 5 and 7.
//!
//! `D+` and `D-` share a diagonal norm and satisfy
//! `H·D+ + D-ᵗ·H = e_r·e_rᵗ − e_l·e_lᵗ`; their difference is dissipative.

use log::debug;
use nalgebra::{DMatrix, DVector};

use crate::error::{OperatorError, OperatorResult};

struct UpwindTable {
    /// Boundary norm weights in units of `h`.
    weights: &'static [f64],
    /// `(offset, value)` diagonals of the interior `Q+`.
    interior: &'static [(isize, f64)],
    /// Top-left block of `Q+`.
    block: &'static [&'static [f64]],
}

static THIRD: UpwindTable = UpwindTable {
    weights: &[
        0.4347899357e10 / 0.12695947216e11,
        0.12032349023e11 / 0.9521960412e10,
        0.32831414215e11 / 0.38087841648e11,
        0.6550489565e10 / 0.6347973608e10,
    ],
    interior: &[(-1, -1.0 / 3.0), (0, -1.0 / 2.0), (1, 1.0), (2, -1.0 / 6.0)],
    block: &[
        &[
            -0.847e3 / 0.37560e5,
            0.79604458492699e14 / 0.119214944358240e15,
            -0.1643521867663e13 / 0.14901868044780e14,
            -0.4160444549287e13 / 0.119214944358240e15,
        ],
        &[
            -0.22671019561497e14 / 0.39738314786080e14,
            -0.6023e4 / 0.37560e5,
            0.91628011326497e14 / 0.119214944358240e15,
            -0.749671686919e12 / 0.19869157393040e14,
        ],
        &[
            0.63495586071e11 / 0.1241822337065e13,
            -0.16644840223051e14 / 0.39738314786080e14,
            -0.4311e4 / 0.12520e5,
            0.104757273135509e15 / 0.119214944358240e15,
        ],
        &[
            0.4998377065543e13 / 0.119214944358240e15,
            -0.5276507651527e13 / 0.59607472179120e14,
            -0.12476888349687e14 / 0.39738314786080e14,
            -0.5919e4 / 0.12520e5,
        ],
    ],
};

static FIFTH: UpwindTable = UpwindTable {
    weights: &[251.0 / 720.0, 299.0 / 240.0, 211.0 / 240.0, 739.0 / 720.0],
    interior: &[
        (-2, 1.0 / 20.0),
        (-1, -1.0 / 2.0),
        (0, -1.0 / 3.0),
        (1, 1.0),
        (2, -1.0 / 4.0),
        (3, 1.0 / 30.0),
    ],
    block: &[
        &[-1.0 / 120.0, 941.0 / 1440.0, -47.0 / 360.0, -7.0 / 480.0],
        &[-869.0 / 1440.0, -11.0 / 120.0, 25.0 / 32.0, -43.0 / 360.0],
        &[29.0 / 360.0, -17.0 / 32.0, -29.0 / 120.0, 1309.0 / 1440.0],
        &[1.0 / 32.0, -11.0 / 360.0, -661.0 / 1440.0, -13.0 / 40.0],
    ],
};

static SEVENTH: UpwindTable = UpwindTable {
    weights: &[
        0.19087e5 / 0.60480e5,
        0.84199e5 / 0.60480e5,
        0.18869e5 / 0.30240e5,
        0.37621e5 / 0.30240e5,
        0.55031e5 / 0.60480e5,
        0.61343e5 / 0.60480e5,
    ],
    interior: &[
        (-3, -1.0 / 105.0),
        (-2, 1.0 / 10.0),
        (-1, -3.0 / 5.0),
        (0, -1.0 / 4.0),
        (1, 1.0),
        (2, -3.0 / 10.0),
        (3, 1.0 / 15.0),
        (4, -1.0 / 140.0),
    ],
    block: &[
        &[
            -0.265e3 / 0.300272e6,
            0.1587945773e10 / 0.2432203200e10,
            -0.1926361e7 / 0.25737600e8,
            -0.84398989e8 / 0.810734400e9,
            0.48781961e8 / 0.4864406400e10,
            0.3429119e7 / 0.202683600e9,
        ],
        &[
            -0.1570125773e10 / 0.2432203200e10,
            -0.26517e5 / 0.1501360e7,
            0.240029831e9 / 0.486440640e9,
            0.202934303e9 / 0.972881280e9,
            0.118207e6 / 0.13512240e8,
            -0.231357719e9 / 0.4864406400e10,
        ],
        &[
            0.1626361e7 / 0.25737600e8,
            -0.206937767e9 / 0.486440640e9,
            -0.61067e5 / 0.750680e6,
            0.49602727e8 / 0.81073440e8,
            -0.43783933e8 / 0.194576256e9,
            0.51815011e8 / 0.810734400e9,
        ],
        &[
            0.91418989e8 / 0.810734400e9,
            -0.53314099e8 / 0.194576256e9,
            -0.33094279e8 / 0.81073440e8,
            -0.18269e5 / 0.107240e6,
            0.440626231e9 / 0.486440640e9,
            -0.365711063e9 / 0.1621468800e10,
        ],
        &[
            -0.62551961e8 / 0.4864406400e10,
            0.799e3 / 0.35280e5,
            0.82588241e8 / 0.972881280e9,
            -0.279245719e9 / 0.486440640e9,
            -0.346583e6 / 0.1501360e7,
            0.2312302333e10 / 0.2432203200e10,
        ],
        &[
            -0.3375119e7 / 0.202683600e9,
            0.202087559e9 / 0.4864406400e10,
            -0.11297731e8 / 0.810734400e9,
            0.61008503e8 / 0.1621468800e10,
            -0.1360092253e10 / 0.2432203200e10,
            -0.10677e5 / 0.42896e5,
        ],
    ],
};

#[derive(Debug, Clone, PartialEq)]
pub struct UpwindOperators {
    pub norm: DMatrix<f64>,
    pub norm_inverse: DMatrix<f64>,
    pub d_plus: DMatrix<f64>,
    pub d_minus: DMatrix<f64>,
    pub e_l: DVector<f64>,
    pub e_r: DVector<f64>,
}

impl UpwindOperators {
    pub fn points(&self) -> usize {
        self.e_l.len()
    }
}

/// Fewest grid points accepted for an upwind operator of `order`.
pub fn upwind_minimum_points(order: u32) -> OperatorResult<usize> {
    Ok(2 * table(order)?.weights.len())
}

/// Upwind operators of the given order on `points` points with spacing `h`.
pub fn upwind(points: usize, h: f64, order: u32) -> OperatorResult<UpwindOperators> {
    let table = table(order)?;
    if !(h.is_finite() && h > 0.0) {
        return Err(OperatorError::InvalidSpacing { h });
    }
    let block = table.weights.len();
    let minimum = 2 * block;
    if points < minimum {
        return Err(OperatorError::TooFewPoints { points, minimum });
    }

    let mut weights = vec![1.0; points];
    for (i, &w) in table.weights.iter().enumerate() {
        weights[i] = w;
        weights[points - 1 - i] = w;
    }
    let scaled = DVector::from_iterator(points, weights.iter().map(|w| w * h));
    let norm = DMatrix::from_diagonal(&scaled);
    let norm_inverse = DMatrix::from_diagonal(&scaled.map(|w| 1.0 / w));

    let mut q_plus = DMatrix::<f64>::zeros(points, points);
    for i in 0..points {
        for &(offset, value) in table.interior {
            let j = i as isize + offset;
            if (0..points as isize).contains(&j) {
                q_plus[(i, j as usize)] = value;
            }
        }
    }
    for (a, row) in table.block.iter().enumerate() {
        for (b, &value) in row.iter().enumerate() {
            q_plus[(a, b)] = value;
            q_plus[(points - 1 - b, points - 1 - a)] = value;
        }
    }
    let q_minus = -q_plus.transpose();

    let mut e_l = DVector::<f64>::zeros(points);
    e_l[0] = 1.0;
    let mut e_r = DVector::<f64>::zeros(points);
    e_r[points - 1] = 1.0;
    let boundary = (&e_r * e_r.transpose() - &e_l * e_l.transpose()) * 0.5;

    let d_plus = &norm_inverse * (q_plus + &boundary);
    let d_minus = &norm_inverse * (q_minus + &boundary);
    debug!("upwind operators: order={order} points={points} h={h:.4e}");

    Ok(UpwindOperators {
        norm,
        norm_inverse,
        d_plus,
        d_minus,
        e_l,
        e_r,
    })
}

fn table(order: u32) -> OperatorResult<&'static UpwindTable> {
    match order {
        3 => Ok(&THIRD),
        5 => Ok(&FIFTH),
        7 => Ok(&SEVENTH),
        _ => Err(OperatorError::UnsupportedUpwindOrder { order }),
    }
}
