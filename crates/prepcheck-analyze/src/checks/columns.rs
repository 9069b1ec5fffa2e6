//! Column-structure checks: cardinality, duplicate rows, mixed value
//! types, and constant columns.

use std::collections::{BTreeMap, BTreeSet};

use prepcheck_model::{ColumnThresholds, Issue, IssueCategory, Severity};

use super::{CheckContext, dataset_issue, issue};
use crate::stats::{any_to_string, cell, is_missing, is_string_like_dtype};

/// Share of non-missing values that must parse as numbers (with the rest
/// failing to parse) before a column counts as mixed-type.
const MIXED_MINORITY_SHARE: f64 = 0.05;

pub fn single_value_columns(ctx: &CheckContext<'_>) -> Vec<Issue> {
    let mut issues = Vec::new();
    for column in ctx.df.get_columns() {
        let mut distinct = BTreeSet::new();
        let mut seen_any = false;
        for idx in 0..column.len() {
            let value = cell(column, idx);
            if is_missing(&value) {
                continue;
            }
            seen_any = true;
            distinct.insert(any_to_string(value));
            if distinct.len() > 1 {
                break;
            }
        }
        if seen_any && distinct.len() == 1 {
            issues.push(issue(
                IssueCategory::SingleValue,
                Severity::Warning,
                column.name().to_string(),
                format!("Column '{}' holds a single distinct value", column.name()),
                "Drop the column",
                Some((1.0, "distinct_count")),
            ));
        }
    }
    issues
}

pub fn high_cardinality(ctx: &CheckContext<'_>, cfg: &ColumnThresholds) -> Vec<Issue> {
    let rows = ctx.df.height();
    let mut issues = Vec::new();
    for column in ctx.df.get_columns() {
        if !is_string_like_dtype(column.dtype()) {
            continue;
        }
        let mut distinct = BTreeSet::new();
        let mut non_missing = 0usize;
        for idx in 0..column.len() {
            let value = cell(column, idx);
            if is_missing(&value) {
                continue;
            }
            non_missing += 1;
            distinct.insert(any_to_string(value));
        }
        if non_missing == 0 || distinct.len() <= cfg.high_cardinality_count {
            continue;
        }
        let ratio = distinct.len() as f64 / rows as f64;
        let severity = if ratio >= cfg.high_cardinality_ratio_critical {
            Severity::Critical
        } else {
            Severity::Warning
        };
        issues.push(issue(
            IssueCategory::HighCardinality,
            severity,
            column.name().to_string(),
            format!(
                "Column '{}' has {} distinct values ({:.1}% of rows)",
                column.name(),
                distinct.len(),
                ratio * 100.0
            ),
            "Use frequency or hash encoding rather than one-hot",
            Some((distinct.len() as f64, "distinct_count")),
        ));
    }
    issues
}

pub fn duplicates(ctx: &CheckContext<'_>, cfg: &ColumnThresholds) -> Vec<Issue> {
    let rows = ctx.df.height();
    if rows < 2 {
        return Vec::new();
    }
    let mut seen: BTreeMap<String, usize> = BTreeMap::new();
    let columns = ctx.df.get_columns();
    for idx in 0..rows {
        let key = columns
            .iter()
            .map(|c| any_to_string(cell(c, idx)))
            .collect::<Vec<_>>()
            .join("\u{1f}");
        *seen.entry(key).or_insert(0) += 1;
    }
    let duplicate_rows: usize = seen.values().filter(|&&n| n > 1).map(|&n| n - 1).sum();
    if duplicate_rows == 0 {
        return Vec::new();
    }
    let ratio = duplicate_rows as f64 / rows as f64;
    let severity = if ratio > cfg.duplicate_ratio_critical {
        Severity::Critical
    } else {
        Severity::Warning
    };
    vec![dataset_issue(
        IssueCategory::Duplicates,
        severity,
        format!("{duplicate_rows} duplicate rows ({:.1}% of dataset)", ratio * 100.0),
        "Drop duplicate rows, keeping the first occurrence",
        Some((ratio * 100.0, "duplicate_pct")),
    )]
}

pub fn mixed_data_types(ctx: &CheckContext<'_>) -> Vec<Issue> {
    let mut issues = Vec::new();
    for column in ctx.df.get_columns() {
        if !matches!(column.dtype(), polars::prelude::DataType::String) {
            continue;
        }
        let mut numeric = 0usize;
        let mut textual = 0usize;
        for idx in 0..column.len() {
            let value = cell(column, idx);
            if is_missing(&value) {
                continue;
            }
            if any_to_string(value).trim().parse::<f64>().is_ok() {
                numeric += 1;
            } else {
                textual += 1;
            }
        }
        let total = numeric + textual;
        if total == 0 {
            continue;
        }
        let numeric_ratio = numeric as f64 / total as f64;
        let minority = numeric_ratio.min(1.0 - numeric_ratio);
        if minority < MIXED_MINORITY_SHARE {
            continue;
        }
        issues.push(issue(
            IssueCategory::MixedDataTypes,
            Severity::Warning,
            column.name().to_string(),
            format!(
                "Column '{}' mixes numeric ({:.1}%) and non-numeric values",
                column.name(),
                numeric_ratio * 100.0
            ),
            "Split or coerce the column to a single type",
            Some((numeric_ratio, "numeric_ratio")),
        ));
    }
    issues
}
