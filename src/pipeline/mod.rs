mod evaluate;
mod fit;
mod predict;
mod prepare;
mod stats;

use crate::ingest::{CellValue, RawTable};

pub use evaluate::Metrics;
pub use fit::FittedModel;
pub use predict::{Prediction, PredictionRecord, Segment};
pub use prepare::{PreparedData, MIN_CLEAN_ROWS};
pub use stats::ColumnStats;

/// Failure modes of the modeling pipeline. All are terminal for the
/// triggering operation and recoverable by retrying with different input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PipelineError {
    /// No column has even a single parseable numeric cell.
    NoNumericColumns,
    /// Numeric columns exist but none remain once the target is removed.
    InsufficientFeatures { target: String },
    /// Too few rows survived coercion and the all-zero filter.
    InsufficientData { found: usize, required: usize },
    /// Prediction attempted before any model was fitted.
    ModelNotTrained,
    /// The target has zero variance with non-zero residuals, so R² is
    /// undefined.
    DegenerateTarget,
    /// An explicit target override named a column that is not numeric.
    UnknownTarget { name: String },
}

impl std::fmt::Display for PipelineError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PipelineError::NoNumericColumns => {
                write!(f, "dataset has no column with any parseable numeric value")
            }
            PipelineError::InsufficientFeatures { target } => write!(
                f,
                "no feature columns remain after reserving '{}' as the target",
                target
            ),
            PipelineError::InsufficientData { found, required } => write!(
                f,
                "only {} usable rows after cleaning; at least {} required",
                found, required
            ),
            PipelineError::ModelNotTrained => {
                write!(f, "no model has been fitted yet; run a fit first")
            }
            PipelineError::DegenerateTarget => {
                write!(f, "target column has zero variance; fit quality is undefined")
            }
            PipelineError::UnknownTarget { name } => {
                write!(f, "target column '{}' is not a numeric column of the dataset", name)
            }
        }
    }
}

impl std::error::Error for PipelineError {}

/// Owns the current fitted model and the in-memory prediction log.
///
/// Retraining replaces the model wholesale; a failed train leaves the
/// previous model untouched. A second train simply overwrites the first
/// (last write wins).
#[derive(Debug, Default)]
pub struct Session {
    model: Option<FittedModel>,
    history: Vec<PredictionRecord>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Prepare, fit, and evaluate in one pass. The model is stored only
    /// after every stage succeeds, so no partial model is ever observable.
    pub fn train(
        &mut self,
        table: &RawTable,
        target_override: Option<&str>,
    ) -> Result<Metrics, PipelineError> {
        let prepared = prepare::prepare_dataset(table, target_override)?;
        let model = fit::fit_model(&prepared);
        let metrics = evaluate::evaluate_model(&model, &prepared)?;
        self.model = Some(model);
        Ok(metrics)
    }

    pub fn model(&self) -> Option<&FittedModel> {
        self.model.as_ref()
    }

    /// Predict the target for a raw input vector aligned positionally with
    /// the model's features. The prediction is logged as bookkeeping; the
    /// log never affects the estimate.
    pub fn predict(&mut self, inputs: &[CellValue]) -> Result<Prediction, PipelineError> {
        let model = self.model.as_ref().ok_or(PipelineError::ModelNotTrained)?;
        let (prediction, record) = predict::predict_one(model, inputs);
        self.history.push(record);
        Ok(prediction)
    }

    pub fn history(&self) -> &[PredictionRecord] {
        &self.history
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ingest::RawRow;
    use approx::assert_abs_diff_eq;

    fn table(headers: &[&str], rows: &[&[&str]]) -> RawTable {
        let headers: Vec<String> = headers.iter().map(|h| h.to_string()).collect();
        let rows = rows
            .iter()
            .map(|cells| {
                let mut row = RawRow::new();
                for (name, cell) in headers.iter().zip(cells.iter()) {
                    row.insert(name.clone(), CellValue::from_field(cell));
                }
                row
            })
            .collect();
        RawTable { headers, rows }
    }

    fn linear_table() -> RawTable {
        table(
            &["x", "price"],
            &[
                &["1", "10"],
                &["2", "20"],
                &["3", "30"],
                &["4", "40"],
                &["5", "50"],
            ],
        )
    }

    #[test]
    fn train_then_predict_recovers_linear_relation() {
        let mut session = Session::new();
        let metrics = session.train(&linear_table(), None).expect("train");

        assert_abs_diff_eq!(metrics.r2, 1.0, epsilon = 1e-9);
        assert_abs_diff_eq!(metrics.rmse, 0.0, epsilon = 1e-9);
        assert_eq!(metrics.n, 5);

        let prediction = session
            .predict(&[CellValue::Text("6".to_string())])
            .expect("predict");
        assert_abs_diff_eq!(prediction.predicted, 60.0, epsilon = 1e-9);
    }

    #[test]
    fn predict_without_model_fails() {
        let mut session = Session::new();
        let err = session.predict(&[CellValue::Number(1.0)]).unwrap_err();
        assert_eq!(err, PipelineError::ModelNotTrained);
    }

    #[test]
    fn failed_retrain_keeps_previous_model() {
        let mut session = Session::new();
        session.train(&linear_table(), None).expect("train");
        let weights_before = session.model().unwrap().weights.clone();

        let bad = table(&["name"], &[&["alpha"], &["beta"]]);
        let err = session.train(&bad, None).unwrap_err();
        assert_eq!(err, PipelineError::NoNumericColumns);

        assert_eq!(session.model().unwrap().weights, weights_before);
    }

    #[test]
    fn retrain_replaces_model_wholesale() {
        let mut session = Session::new();
        session.train(&linear_table(), None).expect("first train");

        let second = table(
            &["area", "price"],
            &[
                &["10", "5"],
                &["20", "9"],
                &["30", "16"],
                &["40", "22"],
                &["50", "24"],
            ],
        );
        session.train(&second, None).expect("second train");
        assert_eq!(session.model().unwrap().features, vec!["area".to_string()]);
    }

    #[test]
    fn predictions_accumulate_in_history() {
        let mut session = Session::new();
        session.train(&linear_table(), None).expect("train");

        session.predict(&[CellValue::Number(2.0)]).expect("predict");
        session.predict(&[CellValue::Number(4.0)]).expect("predict");

        assert_eq!(session.history().len(), 2);
        assert_eq!(session.history()[0].inputs, vec![2.0]);
    }

    #[test]
    fn target_override_must_be_numeric() {
        let mut session = Session::new();
        let err = session.train(&linear_table(), Some("label")).unwrap_err();
        assert_eq!(
            err,
            PipelineError::UnknownTarget {
                name: "label".to_string()
            }
        );
    }
}
