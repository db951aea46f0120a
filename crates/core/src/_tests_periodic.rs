#![cfg(test)]

use std::f64::consts::PI;

use nalgebra::{DMatrix, DVector};

use super::error::OperatorError;
use super::periodic::{periodic_explicit, periodic_implicit, PeriodicVariableWide};

fn sine_error(d1: &DMatrix<f64>, points: usize) -> f64 {
    let h = 1.0 / points as f64;
    let u = DVector::from_fn(points, |i, _| (2.0 * PI * i as f64 * h).sin());
    let du = d1 * u;
    (0..points)
        .map(|i| (du[i] - 2.0 * PI * (2.0 * PI * i as f64 * h).cos()).abs())
        .fold(0.0, f64::max)
}

#[test]
fn explicit_q_is_skew_symmetric_circulant() {
    for order in [2, 4, 6, 8, 10, 12] {
        let ops = periodic_explicit(30, 0.1, order, false).expect("explicit");
        assert!((&ops.q + ops.q.transpose()).amax() < 1e-15);
        assert_eq!(ops.norm, DMatrix::identity(30, 30) * 0.1);
        for i in 0..30 {
            assert!((ops.q[(i, (i + 1) % 30)] - ops.q[(0, 1)]).abs() < 1e-15);
        }
    }
}

#[test]
fn explicit_d1_converges_with_order() {
    let points = 40;
    let h = 1.0 / points as f64;
    let mut previous = f64::INFINITY;
    for order in [2, 4, 6, 8] {
        let ops = periodic_explicit(points, h, order, false).expect("explicit");
        let error = sine_error(&ops.d1().expect("d1"), points);
        assert!(error < previous, "order {order}: {error}");
        previous = error;
    }
    let fourth = periodic_explicit(points, h, 4, false).expect("explicit");
    assert!(sine_error(&fourth.d1().expect("d1"), points) < 1e-3);
}

#[test]
fn dissipation_keeps_constants_and_is_semidefinite() {
    for order in [2, 4, 6, 8, 10, 12] {
        let ops = periodic_explicit(32, 0.05, order, true).expect("dissipative");
        let ones = DVector::from_element(32, 1.0);
        assert!((&ops.q * ones).amax() < 1e-10);
        let symmetric = &ops.q + ops.q.transpose();
        let eigen = symmetric.symmetric_eigen();
        assert!(eigen.eigenvalues.min() > -1e-10, "order {order}");
        assert!(eigen.eigenvalues.max() > 1e-6, "order {order}");
    }
}

#[test]
fn implicit_norm_is_symmetric_positive_definite() {
    let ops = periodic_implicit(32, 1.0 / 32.0, false).expect("implicit");
    assert!((&ops.norm - ops.norm.transpose()).amax() < 1e-15);
    assert!(ops.norm.clone().cholesky().is_some());
    let row_sum: f64 = ops.norm.row(0).iter().sum();
    assert!((row_sum - 1.0 / 32.0).abs() < 1e-14);
    assert!((&ops.q + ops.q.transpose()).amax() < 1e-15);
}

#[test]
fn implicit_d1_is_highly_accurate() {
    let points = 40;
    let ops = periodic_implicit(points, 1.0 / points as f64, false).expect("implicit");
    assert!(sine_error(&ops.d1().expect("d1"), points) < 1e-6);
    let damped = periodic_implicit(points, 1.0 / points as f64, true).expect("implicit");
    assert!((&damped.q + damped.q.transpose()).amax() > 0.0);
}

#[test]
fn variable_wide_with_unit_coefficient_is_d1_squared() {
    let points = 24;
    let h = 1.0 / points as f64;
    let wide = PeriodicVariableWide::new(points, h, 6).expect("wide");
    let m = wide.m(&vec![1.0; points]).expect("m");
    let d1 = periodic_explicit(points, h, 6, false)
        .expect("explicit")
        .d1()
        .expect("d1");
    let expected = -(&d1 * &d1) * h;
    assert!((&m - expected).amax() < 1e-9);
    assert!((&m - m.transpose()).amax() < 1e-12);
}

#[test]
fn variable_wide_checks_coefficient_length() {
    let wide = PeriodicVariableWide::new(20, 0.05, 4).expect("wide");
    assert_eq!(
        wide.m(&[1.0; 5]).unwrap_err(),
        OperatorError::CoefficientLength {
            expected: 20,
            actual: 5
        }
    );
}

#[test]
fn invalid_requests_are_rejected() {
    assert_eq!(
        periodic_explicit(20, 0.1, 5, false).unwrap_err(),
        OperatorError::UnsupportedPeriodicOrder { order: 5 }
    );
    assert_eq!(
        periodic_explicit(8, 0.1, 12, false).unwrap_err(),
        OperatorError::TooFewPoints {
            points: 8,
            minimum: 13
        }
    );
    assert!(matches!(
        periodic_implicit(20, 0.0, false),
        Err(OperatorError::InvalidSpacing { .. })
    ));
    assert!(matches!(
        periodic_implicit(12, 0.1, true),
        Err(OperatorError::TooFewPoints { minimum: 13, .. })
    ));
}
