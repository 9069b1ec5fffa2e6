//! Outlier and distribution-shape checks on single columns.

use std::collections::BTreeMap;

use chrono::Datelike;
use polars::prelude::{AnyValue, Column, DataType, TimeUnit};
use prepcheck_model::{Issue, IssueCategory, OutlierThresholds, Severity};

use super::{CheckContext, issue};
use crate::stats::{
    self, any_to_f64, any_to_string, cell, is_missing, is_numeric_dtype, numeric_values,
    string_values,
};

/// Z-score outlier detection over physically numeric columns.
///
/// Uses the population standard deviation, so a column dominated by one
/// value still produces usable scores for its extremes.
pub fn outliers(ctx: &CheckContext<'_>, cfg: &OutlierThresholds) -> Vec<Issue> {
    let mut issues = Vec::new();
    for column in ctx.df.get_columns() {
        if !is_numeric_dtype(column.dtype()) {
            continue;
        }
        let values = numeric_values(column);
        if values.len() < cfg.min_sample_size {
            continue;
        }
        let Some(mean) = stats::mean(&values) else {
            continue;
        };
        let Some(std) = stats::std_population(&values) else {
            continue;
        };
        if std <= f64::EPSILON {
            continue;
        }
        let outlier_count = values
            .iter()
            .filter(|&&v| ((v - mean) / std).abs() > cfg.z_score)
            .count();
        if outlier_count == 0 {
            continue;
        }
        let ratio = outlier_count as f64 / values.len() as f64;
        let severity = if ratio > cfg.ratio_critical {
            Severity::Critical
        } else {
            Severity::Warning
        };
        issues.push(issue(
            IssueCategory::Outliers,
            severity,
            column.name().to_string(),
            format!(
                "Column '{}' has {} outliers beyond {:.1} standard deviations ({:.1}%)",
                column.name(),
                outlier_count,
                cfg.z_score,
                ratio * 100.0
            ),
            "Clip or winsorize extreme values",
            Some((ratio, "outlier_ratio")),
        ));
    }
    issues
}

pub fn high_zero_counts(ctx: &CheckContext<'_>, cfg: &OutlierThresholds) -> Vec<Issue> {
    let mut issues = Vec::new();
    for column in ctx.df.get_columns() {
        if !is_numeric_dtype(column.dtype()) {
            continue;
        }
        let values = numeric_values(column);
        if values.is_empty() {
            continue;
        }
        let zero_ratio =
            values.iter().filter(|&&v| v == 0.0).count() as f64 / values.len() as f64;
        if zero_ratio < cfg.zero_count_warning {
            continue;
        }
        let severity = if zero_ratio >= cfg.zero_count_critical {
            Severity::Critical
        } else {
            Severity::Warning
        };
        issues.push(issue(
            IssueCategory::HighZeroCounts,
            severity,
            column.name().to_string(),
            format!(
                "Column '{}' is {:.1}% zeros",
                column.name(),
                zero_ratio * 100.0
            ),
            "Consider a zero-inflation indicator feature",
            Some((zero_ratio, "zero_ratio")),
        ));
    }
    issues
}

pub fn extreme_text_lengths(ctx: &CheckContext<'_>, cfg: &OutlierThresholds) -> Vec<Issue> {
    let mut issues = Vec::new();
    for column in ctx.df.get_columns() {
        if !matches!(column.dtype(), DataType::String) {
            continue;
        }
        // Blank strings count as values here: a zero-length string is
        // exactly what the lower length bound exists to catch.
        let mut values: Vec<String> = Vec::new();
        for idx in 0..column.len() {
            match cell(column, idx) {
                AnyValue::String(s) => values.push(s.to_string()),
                AnyValue::StringOwned(s) => values.push(s.to_string()),
                _ => {}
            }
        }
        if values.is_empty() {
            continue;
        }
        let extreme = values
            .iter()
            .filter(|v| v.len() > cfg.text_length_max || v.len() < cfg.text_length_min)
            .count();
        if extreme == 0 {
            continue;
        }
        let ratio = extreme as f64 / values.len() as f64;
        let severity = if ratio > cfg.extreme_ratio_critical {
            Severity::Critical
        } else {
            Severity::Warning
        };
        issues.push(issue(
            IssueCategory::ExtremeTextLengths,
            severity,
            column.name().to_string(),
            format!(
                "Column '{}' has {} values outside the {}..{} character range",
                column.name(),
                extreme,
                cfg.text_length_min,
                cfg.text_length_max
            ),
            "Truncate or validate text values",
            Some((ratio, "extreme_ratio")),
        ));
    }
    issues
}

pub fn skewness(ctx: &CheckContext<'_>, cfg: &OutlierThresholds) -> Vec<Issue> {
    let mut issues = Vec::new();
    for column in ctx.df.get_columns() {
        if !is_numeric_dtype(column.dtype()) {
            continue;
        }
        let values = numeric_values(column);
        if values.len() < cfg.min_sample_size {
            continue;
        }
        let Some(skew) = stats::skewness(&values) else {
            continue;
        };
        if skew.abs() < cfg.skewness_warning {
            continue;
        }
        let severity = if skew.abs() >= cfg.skewness_critical {
            Severity::Critical
        } else {
            Severity::Warning
        };
        issues.push(issue(
            IssueCategory::Skewness,
            severity,
            column.name().to_string(),
            format!("Column '{}' is skewed (skewness {skew:.2})", column.name()),
            "Apply a log or power transform",
            Some((skew, "skewness")),
        ));
    }
    issues
}

/// Flags datetime columns where most values fall in a single year.
pub fn datetime_skew(ctx: &CheckContext<'_>, cfg: &OutlierThresholds) -> Vec<Issue> {
    let mut issues = Vec::new();
    for column in ctx.df.get_columns() {
        let years = column_years(column);
        if years.len() < cfg.min_sample_size {
            continue;
        }
        let mut counts: BTreeMap<i32, usize> = BTreeMap::new();
        for year in &years {
            *counts.entry(*year).or_insert(0) += 1;
        }
        let Some((&top_year, &top_count)) = counts.iter().max_by_key(|&(_, &count)| count) else {
            continue;
        };
        if counts.len() < 2 {
            continue;
        }
        let share = top_count as f64 / years.len() as f64;
        if share < cfg.datetime_skew {
            continue;
        }
        issues.push(issue(
            IssueCategory::DatetimeSkew,
            Severity::Warning,
            column.name().to_string(),
            format!(
                "Column '{}' concentrates {:.1}% of dates in {top_year}",
                column.name(),
                share * 100.0
            ),
            "Check for collection bias across time",
            Some((share, "top_year_share")),
        ));
    }
    issues
}

pub fn infinite_values(ctx: &CheckContext<'_>, cfg: &OutlierThresholds) -> Vec<Issue> {
    let mut issues = Vec::new();
    for column in ctx.df.get_columns() {
        if !matches!(column.dtype(), DataType::Float32 | DataType::Float64) {
            continue;
        }
        let mut infinite = 0usize;
        let mut total = 0usize;
        for idx in 0..column.len() {
            if let Some(v) = any_to_f64(cell(column, idx)) {
                total += 1;
                if v.is_infinite() {
                    infinite += 1;
                }
            }
        }
        if infinite == 0 || total == 0 {
            continue;
        }
        let ratio = infinite as f64 / total as f64;
        let severity = if ratio > cfg.infinite_ratio_critical {
            Severity::Critical
        } else {
            Severity::Warning
        };
        issues.push(issue(
            IssueCategory::InfiniteValues,
            severity,
            column.name().to_string(),
            format!(
                "Column '{}' contains {infinite} infinite values",
                column.name()
            ),
            "Replace infinities before scaling or modeling",
            Some((ratio, "infinite_ratio")),
        ));
    }
    issues
}

/// Near-constant string lengths usually indicate codes or identifiers
/// mislabeled as free text.
pub fn constant_length(ctx: &CheckContext<'_>, cfg: &OutlierThresholds) -> Vec<Issue> {
    let mut issues = Vec::new();
    for column in ctx.df.get_columns() {
        if !matches!(column.dtype(), DataType::String) {
            continue;
        }
        let values = string_values(column);
        if values.len() < cfg.min_sample_size {
            continue;
        }
        let mut lengths: BTreeMap<usize, usize> = BTreeMap::new();
        for value in &values {
            *lengths.entry(value.chars().count()).or_insert(0) += 1;
        }
        let Some(&top) = lengths.values().max() else {
            continue;
        };
        let share = top as f64 / values.len() as f64;
        if share < cfg.constant_length_ratio {
            continue;
        }
        issues.push(issue(
            IssueCategory::ConstantLength,
            Severity::Warning,
            column.name().to_string(),
            format!(
                "Column '{}' has near-constant value length ({:.1}% share)",
                column.name(),
                share * 100.0
            ),
            "Treat the column as a code or identifier",
            Some((share, "length_share")),
        ));
    }
    issues
}

/// Calendar years of a column's non-missing datetime values. Supports
/// native date/datetime dtypes and ISO-formatted strings.
fn column_years(column: &Column) -> Vec<i32> {
    let mut years = Vec::new();
    for idx in 0..column.len() {
        let value = cell(column, idx);
        if is_missing(&value) {
            continue;
        }
        let year = match value {
            AnyValue::Date(days) => epoch_days_to_year(days),
            AnyValue::Datetime(ts, unit, _) => timestamp_to_year(ts, unit),
            AnyValue::DatetimeOwned(ts, unit, _) => timestamp_to_year(ts, unit),
            AnyValue::String(_) | AnyValue::StringOwned(_) => {
                parse_string_year(any_to_string(value).trim())
            }
            _ => None,
        };
        if let Some(year) = year {
            years.push(year);
        }
    }
    years
}

fn epoch_days_to_year(days: i32) -> Option<i32> {
    // 719_163 days from CE to the unix epoch.
    chrono::NaiveDate::from_num_days_from_ce_opt(days + 719_163).map(|d| d.year())
}

fn timestamp_to_year(ts: i64, unit: TimeUnit) -> Option<i32> {
    let seconds = match unit {
        TimeUnit::Nanoseconds => ts / 1_000_000_000,
        TimeUnit::Microseconds => ts / 1_000_000,
        TimeUnit::Milliseconds => ts / 1_000,
    };
    chrono::DateTime::from_timestamp(seconds, 0).map(|d| d.year())
}

fn parse_string_year(value: &str) -> Option<i32> {
    crate::infer::parse_date_year(value)
}
