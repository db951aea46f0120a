//! Diagnostics for a constructed operator set, plus CSV dumps of its parts.

use std::fmt;
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use nalgebra::{DMatrix, DVector};

use crate::bundle::OperatorBundle;

/// Entries below this fraction of the largest entry in a row count as zero
/// when measuring stencil width.
const BANDWIDTH_TOLERANCE: f64 = 1e-9;

#[derive(Debug, Clone, PartialEq)]
pub struct BundleReport {
    pub points: usize,
    pub spacing: f64,
    /// `‖H·HI − I‖∞`
    pub norm_identity_residual: f64,
    /// `‖H·D1 + D1ᵗ·H − (e_m·e_mᵗ − e_1·e_1ᵗ)‖∞`
    pub sbp_residual: f64,
    /// `‖M − Mᵗ‖∞`
    pub m_symmetry_residual: f64,
    pub min_norm_weight: f64,
    /// Half-width of the stencil in the middle row of `D2`.
    pub d2_half_bandwidth: usize,
    /// Max error of `D1` applied to `x^k`, indexed by `k`.
    pub d1_exactness: Vec<f64>,
    /// Max error of `D2` applied to `x^k`, indexed by `k`.
    pub d2_exactness: Vec<f64>,
    pub grid_monotone: bool,
    /// `|x[0]|`
    pub endpoint_error: f64,
    /// Deviation of the middle grid step from `h`.
    pub spacing_error: f64,
}

impl BundleReport {
    /// Structural checks only; polynomial exactness depends on the order and
    /// is left to the caller.
    pub fn passes(&self, tolerance: f64) -> bool {
        self.norm_identity_residual <= tolerance
            && self.sbp_residual <= tolerance
            && self.m_symmetry_residual <= tolerance
            && self.min_norm_weight > 0.0
            && self.grid_monotone
    }
}

impl fmt::Display for BundleReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "points            {}", self.points)?;
        writeln!(f, "spacing h         {:.6e}", self.spacing)?;
        writeln!(f, "|H*HI - I|        {:.3e}", self.norm_identity_residual)?;
        writeln!(f, "|SBP residual|    {:.3e}", self.sbp_residual)?;
        writeln!(f, "|M - M^T|         {:.3e}", self.m_symmetry_residual)?;
        writeln!(f, "min norm weight   {:.6e}", self.min_norm_weight)?;
        writeln!(f, "D2 half-bandwidth {}", self.d2_half_bandwidth)?;
        writeln!(f, "grid monotone     {}", self.grid_monotone)?;
        writeln!(f, "endpoint error    {:.3e}", self.endpoint_error)?;
        writeln!(f, "spacing error     {:.3e}", self.spacing_error)?;
        for (degree, (e1, e2)) in self
            .d1_exactness
            .iter()
            .zip(&self.d2_exactness)
            .enumerate()
        {
            writeln!(f, "x^{degree:<2} D1 {e1:.3e}  D2 {e2:.3e}")?;
        }
        Ok(())
    }
}

/// Run every diagnostic on `bundle`, testing exactness up to `max_degree`.
pub fn inspect(bundle: &OperatorBundle, max_degree: usize) -> BundleReport {
    let n = bundle.points();
    let identity = DMatrix::<f64>::identity(n, n);
    let norm_identity_residual = (&bundle.norm * &bundle.norm_inverse - identity).amax();

    let hd1 = &bundle.norm * &bundle.d1;
    let sbp_residual = (&hd1 + hd1.transpose() - bundle.boundary_matrix()).amax();
    let m_symmetry_residual = (&bundle.m - bundle.m.transpose()).amax();

    let min_norm_weight = bundle.weights().min();
    let grid_monotone = bundle.x.windows(2).all(|w| w[1] > w[0]);
    let endpoint_error = bundle.x.first().map_or(0.0, |x0| x0.abs());
    let mid = n / 2;
    let spacing_error = match (bundle.x.get(mid), bundle.x.get(mid + 1)) {
        (Some(&a), Some(&b)) => (b - a - bundle.h).abs(),
        _ => 0.0,
    };

    BundleReport {
        points: n,
        spacing: bundle.h,
        norm_identity_residual,
        sbp_residual,
        m_symmetry_residual,
        min_norm_weight,
        d2_half_bandwidth: interior_half_bandwidth(&bundle.d2),
        d1_exactness: (0..=max_degree)
            .map(|k| polynomial_error(&bundle.d1, &bundle.x, k, 1))
            .collect(),
        d2_exactness: (0..=max_degree)
            .map(|k| polynomial_error(&bundle.d2, &bundle.x, k, 2))
            .collect(),
        grid_monotone,
        endpoint_error,
        spacing_error,
    }
}

/// Half-width of the nonzero stencil in the middle row of `matrix`.
pub fn interior_half_bandwidth(matrix: &DMatrix<f64>) -> usize {
    let mid = matrix.nrows() / 2;
    let row = matrix.row(mid);
    let cutoff = row.amax() * BANDWIDTH_TOLERANCE;
    row.iter()
        .enumerate()
        .filter(|(_, v)| v.abs() > cutoff)
        .map(|(j, _)| j.abs_diff(mid))
        .max()
        .unwrap_or(0)
}

/// Max error of `operator · x^degree` against the exact `derivative`-th
/// derivative of `x^degree`.
pub fn polynomial_error(
    operator: &DMatrix<f64>,
    x: &[f64],
    degree: usize,
    derivative: usize,
) -> f64 {
    let values = DVector::from_iterator(x.len(), x.iter().map(|&xi| xi.powi(degree as i32)));
    let applied = operator * values;
    let factor: f64 = (0..derivative)
        .map(|j| degree as f64 - j as f64)
        .product();
    x.iter()
        .zip(applied.iter())
        .map(|(&xi, &approx)| {
            let exact = if degree < derivative {
                0.0
            } else {
                factor * xi.powi((degree - derivative) as i32)
            };
            (approx - exact).abs()
        })
        .fold(0.0, f64::max)
}

pub fn write_matrix_csv(path: &Path, matrix: &DMatrix<f64>) -> io::Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    for row in matrix.row_iter() {
        let line = row
            .iter()
            .map(|v| format!("{v:.17e}"))
            .collect::<Vec<_>>()
            .join(",");
        writeln!(writer, "{line}")?;
    }
    writer.flush()
}

pub fn write_grid_csv(path: &Path, x: &[f64], h: f64) -> io::Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    writeln!(writer, "index,x,x_over_h")?;
    for (i, &xi) in x.iter().enumerate() {
        writeln!(writer, "{i},{xi:.17e},{:.17e}", xi / h)?;
    }
    writer.flush()
}

/// Write `H`, `D1`, `D2`, `M`, `Q` and the grid of `bundle` into `dir`.
pub fn dump_bundle(dir: &Path, bundle: &OperatorBundle) -> io::Result<Vec<PathBuf>> {
    fs::create_dir_all(dir)?;
    let matrices = [
        ("H", &bundle.norm),
        ("D1", &bundle.d1),
        ("D2", &bundle.d2),
        ("M", &bundle.m),
        ("Q", &bundle.q),
    ];
    let mut paths = Vec::with_capacity(matrices.len() + 1);
    for (name, matrix) in matrices {
        let path = dir.join(format!("{name}.csv"));
        write_matrix_csv(&path, matrix)?;
        paths.push(path);
    }
    let path = dir.join("x.csv");
    write_grid_csv(&path, &bundle.x, bundle.h)?;
    paths.push(path);
    Ok(paths)
}
