#![cfg(test)]

use super::order::{Narrowing, Order};
use super::stencil::{
    binomial_difference, central_first_derivative, narrowing_corrections, undivided_difference,
};

#[test]
fn central_stencils_have_their_order() {
    for order in [2u32, 4, 6, 8, 10, 12] {
        let weights = central_first_derivative(order).expect("tabulated order");
        assert_eq!(weights.len(), order as usize / 2);
        // 2·Σ a_k k^(2j+1) is 1 for j = 0 and vanishes up to the order.
        for j in 0..order / 2 {
            let moment: f64 = weights
                .iter()
                .enumerate()
                .map(|(k, a)| 2.0 * a * ((k + 1) as f64).powi(2 * j as i32 + 1))
                .sum();
            let expected = if j == 0 { 1.0 } else { 0.0 };
            assert!((moment - expected).abs() < 1e-9, "order {order}, j={j}: {moment}");
        }
    }
    assert!(central_first_derivative(5).is_none());
    assert!(central_first_derivative(14).is_none());
}

#[test]
fn undivided_difference_on_uniform_points_is_binomial() {
    let offsets: Vec<f64> = (0..8).map(|i| i as f64).collect();
    let delta = undivided_difference(&offsets, 4);
    assert_eq!(delta.nrows(), 4);
    let expected = binomial_difference(2);
    for row in 0..delta.nrows() {
        for (k, &c) in expected.iter().enumerate() {
            assert!((delta[(row, row + k)] - c).abs() < 1e-12);
        }
    }
}

#[test]
fn undivided_difference_annihilates_low_degrees() {
    let offsets = [0.0, 0.45, 1.52, 2.52, 3.52, 4.52, 5.52, 6.52];
    for degree in 1..=5 {
        let delta = undivided_difference(&offsets, degree);
        for power in 0..degree {
            for row in 0..delta.nrows() {
                let value: f64 = offsets
                    .iter()
                    .enumerate()
                    .map(|(j, &t)| delta[(row, j)] * t.powi(power as i32))
                    .sum();
                assert!(value.abs() < 1e-9, "degree {degree}, power {power}: {value}");
            }
        }
        // On t^degree the result is degree!.
        let factorial: f64 = (1..=degree).map(|k| k as f64).product();
        let value: f64 = offsets
            .iter()
            .enumerate()
            .map(|(j, &t)| delta[(0, j)] * t.powi(degree as i32))
            .sum();
        assert!((value - factorial).abs() < 1e-8 * factorial);
    }
}

#[test]
fn binomial_difference_matches_pascal_row() {
    assert_eq!(binomial_difference(1), vec![1.0, -2.0, 1.0]);
    assert_eq!(binomial_difference(2), vec![1.0, -4.0, 6.0, -4.0, 1.0]);
    let row = binomial_difference(6);
    assert_eq!(row.len(), 13);
    assert_eq!(row[6], 924.0);
    assert!(row.iter().sum::<f64>().abs() < 1e-9);
}

#[test]
fn narrowing_corrections_are_positive_and_high_degree() {
    for order in Order::ALL {
        assert!(narrowing_corrections(order, Narrowing::Wide).is_empty());
        for narrowing in [Narrowing::Intermediate, Narrowing::Narrow] {
            let terms = narrowing_corrections(order, narrowing);
            assert!(!terms.is_empty());
            for &(degree, weight) in terms {
                assert!(weight > 0.0);
                assert!(degree > order.boundary_accuracy());
                assert!(degree <= order.value() as usize);
            }
        }
    }
}
