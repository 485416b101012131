use nalgebra::DVector;

use super::fit::{self, FittedModel};
use super::prepare::PreparedData;
use super::stats;
use super::PipelineError;

/// Display-only fit quality metrics.
#[derive(Debug, Clone, Copy)]
pub struct Metrics {
    pub r2: f64,
    pub rmse: f64,
    pub n: usize,
}

/// Rebuild predictions from the standardized weights and score them against
/// the original, non-standardized target.
pub(crate) fn evaluate_model(
    model: &FittedModel,
    data: &PreparedData,
) -> Result<Metrics, PipelineError> {
    let xs = fit::standardize_matrix(&data.x, &model.feature_stats);
    let weights = DVector::from_vec(model.weights.clone());

    let predicted_std = &xs * &weights;
    let predicted = predicted_std.map(|value| model.target_stats.destandardize(value));

    let r2 = stats::r_squared(data.y.as_slice(), predicted.as_slice())?;
    let rmse = stats::rmse(data.y.as_slice(), predicted.as_slice());

    Ok(Metrics {
        r2,
        rmse,
        n: model.n,
    })
}
