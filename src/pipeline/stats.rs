use super::PipelineError;

/// Population mean and standard deviation of one column.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColumnStats {
    pub mean: f64,
    pub std_dev: f64,
}

impl ColumnStats {
    pub fn standardize(&self, value: f64) -> f64 {
        (value - self.mean) / self.std_dev
    }

    pub fn destandardize(&self, value: f64) -> f64 {
        value * self.std_dev + self.mean
    }
}

/// Population statistics (divide by N, not N-1). The standard deviation is
/// floored to 1.0 when it would be 0 or non-finite, so standardization never
/// divides by zero.
pub fn mean_std(values: &[f64]) -> ColumnStats {
    if values.is_empty() {
        return ColumnStats {
            mean: 0.0,
            std_dev: 1.0,
        };
    }

    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;

    let mut variance_sum = 0.0;
    for value in values {
        let diff = value - mean;
        variance_sum += diff * diff;
    }

    let std_dev = (variance_sum / n).sqrt();
    let std_dev = if std_dev.is_finite() && std_dev > 0.0 {
        std_dev
    } else {
        1.0
    };

    ColumnStats { mean, std_dev }
}

/// Coefficient of determination against the mean of `actual`.
///
/// A zero-variance target makes the ratio undefined; a perfect fit on a
/// constant target is reported as 1.0, anything else fails with
/// `DegenerateTarget`.
pub fn r_squared(actual: &[f64], predicted: &[f64]) -> Result<f64, PipelineError> {
    debug_assert_eq!(actual.len(), predicted.len());

    let n = actual.len() as f64;
    let mean_actual = actual.iter().sum::<f64>() / n;

    let ss_res = actual
        .iter()
        .zip(predicted)
        .map(|(a, p)| {
            let diff = a - p;
            diff * diff
        })
        .sum::<f64>();

    let ss_tot = actual
        .iter()
        .map(|a| {
            let diff = a - mean_actual;
            diff * diff
        })
        .sum::<f64>();

    if ss_tot == 0.0 {
        if ss_res == 0.0 {
            return Ok(1.0);
        }
        return Err(PipelineError::DegenerateTarget);
    }

    Ok(1.0 - ss_res / ss_tot)
}

/// Root mean squared error.
pub fn rmse(actual: &[f64], predicted: &[f64]) -> f64 {
    debug_assert_eq!(actual.len(), predicted.len());

    let n = actual.len() as f64;
    let squared_sum = actual
        .iter()
        .zip(predicted)
        .map(|(a, p)| {
            let diff = a - p;
            diff * diff
        })
        .sum::<f64>();

    (squared_sum / n).sqrt()
}
