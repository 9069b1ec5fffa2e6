//! Dataset overview attached to every analysis result.

use std::collections::BTreeMap;

use polars::prelude::DataFrame;
use prepcheck_model::ColumnTypeMap;
use serde_json::{Value, json};

use crate::checks::missing::missing_count;
use crate::stats::{any_to_string, cell, is_missing};

/// Builds the stable summary sections: `dataset_info` with frame-level
/// counts and `columns` with one entry per column.
pub fn build_summaries(df: &DataFrame, column_types: &ColumnTypeMap) -> BTreeMap<String, Value> {
    let rows = df.height();
    let total_missing: usize = df.get_columns().iter().map(missing_count).sum();

    let mut columns = BTreeMap::new();
    for column in df.get_columns() {
        let missing = missing_count(column);
        let mut distinct = std::collections::BTreeSet::new();
        for idx in 0..column.len() {
            let value = cell(column, idx);
            if !is_missing(&value) {
                distinct.insert(any_to_string(value));
            }
        }
        let semantic = column_types
            .get(column.name().as_str())
            .map(|t| t.as_str())
            .unwrap_or("Unsupported");
        columns.insert(
            column.name().to_string(),
            json!({
                "dtype": column.dtype().to_string(),
                "semantic_type": semantic,
                "missing_count": missing,
                "missing_pct": if rows > 0 {
                    missing as f64 * 100.0 / rows as f64
                } else {
                    0.0
                },
                "distinct_count": distinct.len(),
            }),
        );
    }

    let mut summaries = BTreeMap::new();
    summaries.insert(
        "dataset_info".to_string(),
        json!({
            "rows": rows,
            "columns": df.width(),
            "missing_cells": total_missing,
            "missing_cells_pct": if rows * df.width() > 0 {
                total_missing as f64 * 100.0 / (rows * df.width()) as f64
            } else {
                0.0
            },
        }),
    );
    summaries.insert("columns".to_string(), json!(columns));
    summaries
}
