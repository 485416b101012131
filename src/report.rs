use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};

use crate::pipeline::{ColumnStats, FittedModel, Metrics, Prediction};

/// Plaintext summary of one fit, renderable to stdout or a file.
#[derive(Debug, Clone)]
pub struct FitReport {
    rows: usize,
    features: Vec<String>,
    target: String,
    timestamp: DateTime<Utc>,
    metrics: Metrics,
    confidence: f64,
    weights: Vec<(String, f64)>,
    feature_stats: Vec<(String, ColumnStats)>,
    target_stats: ColumnStats,
    notes: Vec<String>,
}

impl FitReport {
    pub fn new(model: &FittedModel, metrics: &Metrics) -> Self {
        let weights = model
            .features
            .iter()
            .cloned()
            .zip(model.weights.iter().copied())
            .collect();

        let feature_stats = model
            .features
            .iter()
            .cloned()
            .zip(model.feature_stats.iter().copied())
            .collect();

        let notes = vec![
            "Weights are fitted per feature against the standardized target; \
             inter-feature correlation is not modeled."
                .to_string(),
            "Confidence is a sample-size heuristic, not a confidence interval.".to_string(),
        ];

        Self {
            rows: model.n,
            features: model.features.clone(),
            target: model.target.clone(),
            timestamp: Utc::now(),
            metrics: *metrics,
            confidence: model.confidence,
            weights,
            feature_stats,
            target_stats: model.target_stats,
            notes,
        }
    }

    pub fn render(&self) -> String {
        let mut lines = Vec::new();
        lines.push(format!("Rows: {}", self.rows));
        lines.push(format!("Target: {}", self.target));
        lines.push(format!("Features: {}", self.features.join(", ")));
        lines.push(format!(
            "Generated at: {}",
            self.timestamp
                .to_rfc3339_opts(chrono::SecondsFormat::Secs, true)
        ));

        lines.push(String::new());
        lines.push("Metrics:".to_string());
        lines.push(format!("  R^2: {:.6}", self.metrics.r2));
        lines.push(format!("  RMSE: {:.6}", self.metrics.rmse));
        lines.push(format!("  Confidence: {:.2}", self.confidence));

        lines.push(String::new());
        lines.push("Weights (standardized):".to_string());
        for (name, value) in &self.weights {
            lines.push(format!("  {:<15} {:>12.6}", name, value));
        }

        lines.push(String::new());
        lines.push("Column statistics:".to_string());
        for (name, stats) in &self.feature_stats {
            lines.push(format!(
                "  {:<15} mean={:>12.6} std={:>12.6}",
                name, stats.mean, stats.std_dev
            ));
        }
        lines.push(format!(
            "  {:<15} mean={:>12.6} std={:>12.6}",
            self.target, self.target_stats.mean, self.target_stats.std_dev
        ));

        if !self.notes.is_empty() {
            lines.push(String::new());
            lines.push("Notes:".to_string());
            for note in &self.notes {
                lines.push(format!("  - {}", note));
            }
        }

        lines.join("\n")
    }

    pub fn persist(&self, path: &Path) -> Result<()> {
        fs::write(path, self.render())
            .with_context(|| format!("failed to write report to {}", path.display()))
    }
}

pub fn render_prediction(prediction: &Prediction, target: &str) -> String {
    [
        format!("Estimated {}: {:.2}", target, prediction.predicted),
        format!("Deviation from mean: {:+.1}%", prediction.deviation_pct),
        format!("Segment: {}", prediction.segment),
        format!("Confidence: {:.2}", prediction.confidence),
        format!("Features used: {}", prediction.feature_count),
    ]
    .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::Segment;

    fn sample_model() -> FittedModel {
        FittedModel {
            features: vec!["sqft".to_string(), "year".to_string()],
            target: "price".to_string(),
            weights: vec![0.8, 0.1],
            feature_stats: vec![
                ColumnStats {
                    mean: 120.0,
                    std_dev: 40.0,
                },
                ColumnStats {
                    mean: 1990.0,
                    std_dev: 12.0,
                },
            ],
            target_stats: ColumnStats {
                mean: 250_000.0,
                std_dev: 80_000.0,
            },
            n: 42,
            confidence: 0.542,
        }
    }

    #[test]
    fn render_includes_metrics_and_columns() {
        let metrics = Metrics {
            r2: 0.913,
            rmse: 1520.5,
            n: 42,
        };
        let rendered = FitReport::new(&sample_model(), &metrics).render();

        assert!(rendered.contains("Rows: 42"));
        assert!(rendered.contains("Target: price"));
        assert!(rendered.contains("R^2: 0.913000"));
        assert!(rendered.contains("sqft"));
        assert!(rendered.contains("Confidence: 0.54"));
    }

    #[test]
    fn prediction_rendering_names_the_target() {
        let prediction = Prediction {
            predicted: 310_000.0,
            deviation_pct: 24.0,
            segment: Segment::Premium,
            confidence: 0.542,
            feature_count: 2,
        };
        let rendered = render_prediction(&prediction, "price");

        assert!(rendered.contains("Estimated price: 310000.00"));
        assert!(rendered.contains("+24.0%"));
        assert!(rendered.contains("premium"));
    }
}
