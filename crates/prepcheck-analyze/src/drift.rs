//! Dataset drift detection against a comparison frame.

use std::collections::BTreeMap;

use polars::prelude::{Column, DataType};
use prepcheck_model::{DriftThresholds, Issue, IssueCategory, Severity};

use crate::checks::{CheckContext, issue};
use crate::stats::{
    self, any_to_string, cell, is_missing, is_numeric_dtype, is_string_like_dtype, numeric_values,
};

/// Column-by-column comparison of the primary frame against the
/// comparison frame: a two-sample KS test for numeric columns, chi-square
/// goodness-of-fit for categorical ones, and explicit detection of
/// categories the primary frame has never seen.
pub fn dataset_drift(ctx: &CheckContext<'_>, cfg: &DriftThresholds) -> Vec<Issue> {
    let Some(comparison) = ctx.comparison else {
        return Vec::new();
    };

    let mut issues = Vec::new();
    for column in ctx.df.get_columns() {
        let name = column.name().as_str();
        let Ok(other) = comparison.column(name) else {
            continue;
        };
        // Physical dtype routing: coded numeric labels still drift as
        // distributions, strings and booleans as category frequencies.
        if is_numeric_dtype(column.dtype()) {
            numeric_drift(column, other, cfg, &mut issues);
        } else if is_string_like_dtype(column.dtype())
            || matches!(column.dtype(), DataType::Boolean)
        {
            categorical_drift(column, other, cfg, &mut issues);
        }
    }
    issues
}

fn severity_for_p(p_value: f64, cfg: &DriftThresholds) -> Option<Severity> {
    if p_value < cfg.critical_p_value {
        Some(Severity::Critical)
    } else if p_value < cfg.p_value {
        Some(Severity::Warning)
    } else {
        None
    }
}

fn numeric_drift(
    primary: &Column,
    comparison: &Column,
    cfg: &DriftThresholds,
    issues: &mut Vec<Issue>,
) {
    let a = numeric_values(primary);
    let b = numeric_values(comparison);
    let Some(test) = stats::ks_two_sample(&a, &b) else {
        return;
    };
    let Some(severity) = severity_for_p(test.p_value, cfg) else {
        return;
    };
    issues.push(issue(
        IssueCategory::DatasetDrift,
        severity,
        primary.name().to_string(),
        format!(
            "Column '{}' drifted between datasets (KS D = {:.3}, p = {:.2e})",
            primary.name(),
            test.statistic,
            test.p_value
        ),
        "Retrain or re-weight on the drifted distribution",
        Some((test.statistic, "ks_statistic")),
    ));
}

fn categorical_drift(
    primary: &Column,
    comparison: &Column,
    cfg: &DriftThresholds,
    issues: &mut Vec<Issue>,
) {
    let primary_counts = category_counts(primary);
    let comparison_counts = category_counts(comparison);
    if primary_counts.is_empty() || comparison_counts.is_empty() {
        return;
    }

    let new_categories: Vec<&str> = comparison_counts
        .keys()
        .filter(|k| !primary_counts.contains_key(*k))
        .map(String::as_str)
        .collect();
    if !new_categories.is_empty() {
        let shown: Vec<&str> = new_categories
            .iter()
            .take(cfg.max_new_category_samples)
            .copied()
            .collect();
        issues.push(issue(
            IssueCategory::DatasetDrift,
            Severity::Warning,
            primary.name().to_string(),
            format!(
                "Column '{}' has {} unseen categories in the comparison set: {}",
                primary.name(),
                new_categories.len(),
                shown.join(", ")
            ),
            "Handle unseen categories before encoding",
            Some((new_categories.len() as f64, "new_categories")),
        ));
    }

    // Combined category count bounds the goodness-of-fit test.
    let mut all_categories: Vec<&String> = primary_counts.keys().collect();
    for key in comparison_counts.keys() {
        if !primary_counts.contains_key(key) {
            all_categories.push(key);
        }
    }
    if all_categories.len() > cfg.max_categories_for_chi2 || all_categories.len() < 2 {
        return;
    }

    let primary_total: f64 = primary_counts.values().sum();
    let comparison_total: f64 = comparison_counts.values().sum();
    if primary_total <= 0.0 || comparison_total <= 0.0 {
        return;
    }
    let observed: Vec<f64> = all_categories
        .iter()
        .map(|c| comparison_counts.get(*c).copied().unwrap_or(0.0))
        .collect();
    let expected: Vec<f64> = all_categories
        .iter()
        .map(|c| {
            primary_counts.get(*c).copied().unwrap_or(0.0) * comparison_total / primary_total
        })
        .collect();
    let Some(test) = stats::chi2_goodness_of_fit(&observed, &expected) else {
        return;
    };
    let Some(severity) = severity_for_p(test.p_value, cfg) else {
        return;
    };
    issues.push(issue(
        IssueCategory::DatasetDrift,
        severity,
        primary.name().to_string(),
        format!(
            "Column '{}' category frequencies drifted (chi2 = {:.1}, p = {:.2e})",
            primary.name(),
            test.statistic,
            test.p_value
        ),
        "Review the categorical distribution shift",
        Some((test.statistic, "chi2_statistic")),
    ));
}

fn category_counts(column: &Column) -> BTreeMap<String, f64> {
    let mut counts = BTreeMap::new();
    for idx in 0..column.len() {
        let value = cell(column, idx);
        if is_missing(&value) {
            continue;
        }
        *counts.entry(any_to_string(value)).or_insert(0.0) += 1.0;
    }
    counts
}
