#![cfg(test)]

use std::fs;

use nalgebra::DMatrix;

use super::factory::construct;
use super::inspection::{dump_bundle, inspect, interior_half_bandwidth, polynomial_error};
use super::order::{Narrowing, Order};

#[test]
fn report_of_a_valid_bundle_passes() {
    let bundle = construct(Order::Sixth, 41, 1.0, Narrowing::Narrow).expect("construct");
    let report = inspect(&bundle, 5);
    assert!(report.passes(1e-10), "{report}");
    assert_eq!(report.points, 41);
    assert_eq!(report.d2_half_bandwidth, 3);
    assert_eq!(report.d1_exactness.len(), 6);
    assert_eq!(report.d2_exactness.len(), 6);
    assert!(report.d1_exactness[..=3].iter().all(|&e| e < 1e-9));
    // Degree 5 is past the boundary accuracy.
    assert!(report.d1_exactness[5] > 1e-9);
    assert_eq!(report.endpoint_error, 0.0);
    assert!(report.spacing_error < 1e-14);
    assert!(report.min_norm_weight > 0.0);
}

#[test]
fn report_display_lists_every_degree() {
    let bundle = construct(Order::Eighth, 24, 1.0, Narrowing::Wide).expect("construct");
    let text = inspect(&bundle, 2).to_string();
    assert!(text.contains("points            24"));
    assert!(text.contains("x^0 "));
    assert!(text.contains("x^2 "));
    assert!(!text.contains("x^3 "));
}

#[test]
fn half_bandwidth_of_a_tridiagonal_matrix_is_one() {
    let n = 9;
    let matrix = DMatrix::from_fn(n, n, |i, j| match i.abs_diff(j) {
        0 => -2.0,
        1 => 1.0,
        _ => 0.0,
    });
    assert_eq!(interior_half_bandwidth(&matrix), 1);
    assert_eq!(interior_half_bandwidth(&DMatrix::identity(5, 5)), 0);
}

#[test]
fn polynomial_error_vanishes_for_exact_operator() {
    // Forward difference is exact on linear functions.
    let x: Vec<f64> = (0..6).map(|i| 0.5 * i as f64).collect();
    let n = x.len();
    let d = DMatrix::from_fn(n, n, |i, j| {
        let i = i.min(n - 2);
        if j == i + 1 {
            2.0
        } else if j == i {
            -2.0
        } else {
            0.0
        }
    });
    assert!(polynomial_error(&d, &x, 1, 1) < 1e-14);
    assert!(polynomial_error(&d, &x, 0, 1) < 1e-14);
    assert!(polynomial_error(&d, &x, 2, 1) > 0.1);
}

#[test]
fn dump_writes_one_csv_per_part() {
    let bundle = construct(Order::Sixth, 16, 1.0, Narrowing::Wide).expect("construct");
    let dir = std::env::temp_dir().join(format!("sbp1d-dump-{}", std::process::id()));
    let paths = dump_bundle(&dir, &bundle).expect("dump");
    assert_eq!(paths.len(), 6);
    let d1 = fs::read_to_string(dir.join("D1.csv")).expect("D1.csv");
    assert_eq!(d1.lines().count(), 16);
    assert_eq!(d1.lines().next().map(|l| l.split(',').count()), Some(16));
    let grid = fs::read_to_string(dir.join("x.csv")).expect("x.csv");
    assert_eq!(grid.lines().count(), 17);
    assert!(grid.starts_with("index,x,x_over_h"));
    fs::remove_dir_all(&dir).ok();
}
