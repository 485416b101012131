use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::fit::FittedModel;
use crate::ingest::CellValue;

/// Market tier derived from how far an estimate sits from the target mean.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Segment {
    Budget,
    Standard,
    Premium,
}

impl Segment {
    pub fn label(self) -> &'static str {
        match self {
            Segment::Budget => "budget",
            Segment::Standard => "standard",
            Segment::Premium => "premium",
        }
    }

    /// Strict thresholds at ±10%; the closed interval [-10, 10] is standard.
    pub(crate) fn from_deviation(deviation_pct: f64) -> Self {
        if deviation_pct < -10.0 {
            Segment::Budget
        } else if deviation_pct > 10.0 {
            Segment::Premium
        } else {
            Segment::Standard
        }
    }
}

impl std::fmt::Display for Segment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// What the caller gets back for one input vector.
#[derive(Debug, Clone)]
pub struct Prediction {
    pub predicted: f64,
    pub deviation_pct: f64,
    pub segment: Segment,
    pub confidence: f64,
    pub feature_count: usize,
}

/// Session-log entry for one prediction. Never removed within a session.
#[derive(Debug, Clone)]
pub struct PredictionRecord {
    pub inputs: Vec<f64>,
    pub predicted: f64,
    pub timestamp: DateTime<Utc>,
}

/// Standardize the inputs with the model's per-feature statistics, dot with
/// the weights, and de-standardize. Inputs align positionally with
/// `model.features`; missing or unparseable entries default to 0.0.
pub(crate) fn predict_one(model: &FittedModel, inputs: &[CellValue]) -> (Prediction, PredictionRecord) {
    let coerced: Vec<f64> = (0..model.features.len())
        .map(|j| inputs.get(j).and_then(|cell| cell.coerce()).unwrap_or(0.0))
        .collect();

    let predicted_std: f64 = coerced
        .iter()
        .zip(&model.feature_stats)
        .zip(&model.weights)
        .map(|((value, stats), weight)| weight * stats.standardize(*value))
        .sum();

    let predicted = model.target_stats.destandardize(predicted_std);
    let deviation_pct = (predicted - model.target_stats.mean) / model.target_stats.mean * 100.0;

    let prediction = Prediction {
        predicted,
        deviation_pct,
        segment: Segment::from_deviation(deviation_pct),
        confidence: model.confidence,
        feature_count: model.features.len(),
    };

    let record = PredictionRecord {
        inputs: coerced,
        predicted,
        timestamp: Utc::now(),
    };

    (prediction, record)
}
