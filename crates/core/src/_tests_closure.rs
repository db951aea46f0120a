#![cfg(test)]

use super::closure::{solve_closure, ClosureSpec};
use super::error::OperatorError;
use super::grid::Grid1D;
use super::order::Order;

fn closure_for(spec: &ClosureSpec, points: usize) -> (Grid1D, super::closure::Closure) {
    let grid = Grid1D::boundary_adapted(points, 1.0, &spec.layout);
    let closure = solve_closure(spec, grid.offsets()).expect("closure");
    (grid, closure)
}

#[test]
fn minimum_points_cover_both_closures() {
    assert_eq!(ClosureSpec::SIXTH.minimum_points(), 15);
    assert_eq!(ClosureSpec::EIGHTH.minimum_points(), 20);
    assert_eq!(ClosureSpec::for_order(Order::Eighth), ClosureSpec::EIGHTH);
}

#[test]
fn weights_are_positive_and_integrate_constants() {
    for spec in [ClosureSpec::SIXTH, ClosureSpec::EIGHTH] {
        let points = 31;
        let (grid, closure) = closure_for(&spec, points);
        assert_eq!(closure.weights.len(), points);
        assert!(closure.weights.iter().all(|&w| w > 0.0));
        let total: f64 = closure.weights.iter().sum();
        let span = grid.offsets()[points - 1];
        assert!((total - span).abs() < 1e-9, "order {}: {total} vs {span}", spec.order);
        for i in 0..points {
            assert_eq!(closure.weights[i], closure.weights[points - 1 - i]);
        }
    }
}

#[test]
fn q_is_skew_up_to_boundary_terms() {
    for spec in [ClosureSpec::SIXTH, ClosureSpec::EIGHTH] {
        let (_, closure) = closure_for(&spec, 26);
        let q = &closure.q;
        let n = q.nrows();
        for i in 0..n {
            for j in 0..n {
                let expected = if i == 0 && j == 0 {
                    -1.0
                } else if i == n - 1 && j == n - 1 {
                    1.0
                } else {
                    0.0
                };
                assert!((q[(i, j)] + q[(j, i)] - expected).abs() < 1e-12, "({i}, {j})");
            }
        }
    }
}

#[test]
fn boundary_rows_differentiate_low_degree_monomials() {
    for spec in [ClosureSpec::SIXTH, ClosureSpec::EIGHTH] {
        let (grid, closure) = closure_for(&spec, spec.minimum_points());
        let t = grid.offsets();
        let n = t.len();
        for k in 0..=spec.order.boundary_accuracy() {
            for i in 0..n {
                let applied: f64 = (0..n).map(|j| closure.q[(i, j)] * t[j].powi(k as i32)).sum();
                let exact = if k == 0 {
                    0.0
                } else {
                    closure.weights[i] * k as f64 * t[i].powi(k as i32 - 1)
                };
                assert!(
                    (applied - exact).abs() < 1e-8 * (1.0 + exact.abs()),
                    "order {}, row {i}, degree {k}: {applied} vs {exact}",
                    spec.order
                );
            }
        }
    }
}

#[test]
fn interior_rows_keep_the_central_stencil() {
    let spec = ClosureSpec::EIGHTH;
    let (_, closure) = closure_for(&spec, 41);
    let mid = 20;
    for (k, &a) in spec.interior_stencil().iter().enumerate() {
        assert!((closure.q[(mid, mid + k + 1)] - a).abs() < 1e-15);
        assert!((closure.q[(mid, mid - k - 1)] + a).abs() < 1e-15);
    }
    assert_eq!(closure.weights[mid], 1.0);
}

#[test]
fn too_short_grid_is_rejected() {
    let offsets: Vec<f64> = (0..10).map(|i| i as f64).collect();
    assert!(matches!(
        solve_closure(&ClosureSpec::SIXTH, &offsets),
        Err(OperatorError::ClosureSolve(_))
    ));
}
