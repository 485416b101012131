use nalgebra::{DMatrix, DVector};

use super::prepare::PreparedData;
use super::stats::{self, ColumnStats};

/// A fitted model: per-feature weights over standardized columns plus the
/// statistics needed to standardize new inputs. Replaced wholesale on
/// retraining.
#[derive(Debug, Clone)]
pub struct FittedModel {
    pub features: Vec<String>,
    pub target: String,
    pub weights: Vec<f64>,
    pub feature_stats: Vec<ColumnStats>,
    pub target_stats: ColumnStats,
    pub n: usize,
    pub confidence: f64,
}

/// Fit each feature's weight independently against the standardized target:
///
///   w_j = Σ_i(xs[i][j] * ys[i]) / Σ_i(xs[i][j]^2)
///
/// This is per-feature simple regression, not a joint multivariate solve;
/// weights do not account for inter-feature correlation. That approximation
/// is a defining property of the model and is kept as-is.
pub(crate) fn fit_model(data: &PreparedData) -> FittedModel {
    let n = data.x.nrows();
    let p = data.x.ncols();

    let feature_stats: Vec<ColumnStats> = (0..p)
        .map(|j| {
            let column: Vec<f64> = data.x.column(j).iter().copied().collect();
            stats::mean_std(&column)
        })
        .collect();
    let target_stats = stats::mean_std(data.y.as_slice());

    let xs = standardize_matrix(&data.x, &feature_stats);
    let ys = DVector::from_fn(n, |i, _| target_stats.standardize(data.y[i]));

    let weights: Vec<f64> = (0..p)
        .map(|j| {
            let column = xs.column(j);
            let numerator = column.dot(&ys);
            let mut denominator = column.norm_squared();
            // A constant-after-standardization column would zero the
            // denominator; floor it so the weight collapses to 0.
            if denominator == 0.0 {
                denominator = 1.0;
            }
            numerator / denominator
        })
        .collect();

    FittedModel {
        features: data.features.clone(),
        target: data.target.clone(),
        weights,
        feature_stats,
        target_stats,
        n,
        confidence: sample_confidence(n),
    }
}

pub(crate) fn standardize_matrix(x: &DMatrix<f64>, stats: &[ColumnStats]) -> DMatrix<f64> {
    DMatrix::from_fn(x.nrows(), x.ncols(), |i, j| stats[j].standardize(x[(i, j)]))
}

/// Sample-size heuristic, clamped to [0.5, 0.95]. Not a statistical
/// confidence interval.
pub(crate) fn sample_confidence(n: usize) -> f64 {
    (0.5 + n as f64 / 1000.0).clamp(0.5, 0.95)
}
