use nalgebra::{DMatrix, DVector};

use super::PipelineError;
use crate::ingest::RawTable;

/// Minimum clean rows required before a model may be fitted.
pub const MIN_CLEAN_ROWS: usize = 5;

/// Numeric matrix extracted from the raw table, row and column order
/// preserved from the source.
#[derive(Debug, Clone)]
pub struct PreparedData {
    pub features: Vec<String>,
    pub target: String,
    pub x: DMatrix<f64>,
    pub y: DVector<f64>,
}

pub(crate) fn prepare_dataset(
    table: &RawTable,
    target_override: Option<&str>,
) -> Result<PreparedData, PipelineError> {
    let numeric = detect_numeric_columns(table);
    if numeric.is_empty() {
        return Err(PipelineError::NoNumericColumns);
    }

    let target = select_target(&numeric, target_override)?;

    let features: Vec<String> = numeric
        .iter()
        .filter(|name| **name != target)
        .cloned()
        .collect();
    if features.is_empty() {
        return Err(PipelineError::InsufficientFeatures { target });
    }

    let clean = clean_rows(table, &numeric);
    if clean.len() < MIN_CLEAN_ROWS {
        return Err(PipelineError::InsufficientData {
            found: clean.len(),
            required: MIN_CLEAN_ROWS,
        });
    }

    let target_pos = numeric
        .iter()
        .position(|name| *name == target)
        .expect("target is one of the numeric columns");
    let feature_positions: Vec<usize> = numeric
        .iter()
        .enumerate()
        .filter(|(_, name)| **name != target)
        .map(|(pos, _)| pos)
        .collect();

    let rows = clean.len();
    let cols = feature_positions.len();
    let mut buffer = Vec::with_capacity(rows * cols);
    let mut target_values = Vec::with_capacity(rows);
    for row in &clean {
        for pos in &feature_positions {
            buffer.push(row[*pos]);
        }
        target_values.push(row[target_pos]);
    }

    Ok(PreparedData {
        features,
        target,
        x: DMatrix::from_row_slice(rows, cols, &buffer),
        y: DVector::from_vec(target_values),
    })
}

/// A header counts as numeric when any single row's cell coerces to a finite
/// number. The criterion is deliberately permissive; the rest of the column
/// is zero-filled during cleaning.
fn detect_numeric_columns(table: &RawTable) -> Vec<String> {
    table
        .headers
        .iter()
        .filter(|header| {
            table
                .rows
                .iter()
                .any(|row| row.get(*header).and_then(|cell| cell.coerce()).is_some())
        })
        .cloned()
        .collect()
}

/// First numeric header containing "price" or "target" (case-insensitive)
/// wins; otherwise the last numeric header. An explicit override must still
/// name a numeric column.
fn select_target(numeric: &[String], target_override: Option<&str>) -> Result<String, PipelineError> {
    if let Some(name) = target_override {
        return numeric
            .iter()
            .find(|header| *header == name)
            .cloned()
            .ok_or_else(|| PipelineError::UnknownTarget {
                name: name.to_string(),
            });
    }

    let by_name = numeric.iter().find(|header| {
        let lower = header.to_lowercase();
        lower.contains("price") || lower.contains("target")
    });

    Ok(by_name
        .or_else(|| numeric.last())
        .expect("numeric columns are non-empty")
        .clone())
}

/// Coerce every numeric column of every row (failures become 0.0) and drop
/// rows whose values are all exactly zero.
fn clean_rows(table: &RawTable, numeric: &[String]) -> Vec<Vec<f64>> {
    table
        .rows
        .iter()
        .map(|row| {
            numeric
                .iter()
                .map(|header| {
                    row.get(header)
                        .and_then(|cell| cell.coerce())
                        .unwrap_or(0.0)
                })
                .collect::<Vec<f64>>()
        })
        .filter(|values| values.iter().any(|v| *v != 0.0))
        .collect()
}
