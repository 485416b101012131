use std::collections::HashMap;
use std::path::Path;

use anyhow::{Context, Result};
use csv::ReaderBuilder;

/// A single raw cell as read from the dataset, before numeric validation.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Absent,
    Number(f64),
    Text(String),
}

impl CellValue {
    pub fn from_field(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            CellValue::Absent
        } else {
            CellValue::Text(trimmed.to_string())
        }
    }

    /// Coerce to a finite number; anything else yields no value and the
    /// caller decides on the zero-fill.
    pub fn coerce(&self) -> Option<f64> {
        match self {
            CellValue::Absent => None,
            CellValue::Number(value) if value.is_finite() => Some(*value),
            CellValue::Number(_) => None,
            CellValue::Text(text) => text
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|value| value.is_finite()),
        }
    }
}

pub type RawRow = HashMap<String, CellValue>;

/// Header set plus rows, header order preserved from the source.
#[derive(Debug, Clone)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub rows: Vec<RawRow>,
}

pub fn read_table(path: &Path) -> Result<RawTable> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)
        .with_context(|| format!("failed to open dataset {}", path.display()))?;

    let raw_headers = reader
        .headers()
        .with_context(|| format!("{}: unable to read CSV header", path.display()))?;

    // Duplicate header names collapse to the first occurrence.
    let mut headers: Vec<String> = Vec::new();
    let mut indices: Vec<usize> = Vec::new();
    for (idx, raw) in raw_headers.iter().enumerate() {
        let name = raw.trim().to_string();
        if !headers.contains(&name) {
            headers.push(name);
            indices.push(idx);
        }
    }

    let mut rows = Vec::new();
    for (row_idx, record) in reader.records().enumerate() {
        let record = record.with_context(|| {
            format!("{}: failed to parse CSV row {}", path.display(), row_idx + 2)
        })?;

        let mut row = RawRow::with_capacity(headers.len());
        for (name, idx) in headers.iter().zip(&indices) {
            let cell = record
                .get(*idx)
                .map(CellValue::from_field)
                .unwrap_or(CellValue::Absent);
            row.insert(name.clone(), cell);
        }
        rows.push(row);
    }

    Ok(RawTable { headers, rows })
}
