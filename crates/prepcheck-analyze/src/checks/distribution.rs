//! Distribution-shape checks: uniformity and near-unique numeric columns.

use std::collections::BTreeSet;

use prepcheck_model::{DistributionThresholds, Issue, IssueCategory, Severity};

use super::{CheckContext, issue};
use crate::stats::{self, is_numeric_dtype, numeric_values};

/// Kolmogorov-Smirnov test against a uniform reference over the column's
/// own min-max range. A high p-value means uniformity cannot be rejected,
/// which for measured data usually indicates synthetic or identifier-like
/// values.
pub fn uniform_distribution(
    ctx: &CheckContext<'_>,
    cfg: &DistributionThresholds,
) -> Vec<Issue> {
    let mut issues = Vec::new();
    for column in ctx.df.get_columns() {
        if !is_numeric_dtype(column.dtype()) {
            continue;
        }
        let values = numeric_values(column);
        if values.len() < cfg.uniform_min_samples {
            continue;
        }
        let min = values.iter().copied().fold(f64::INFINITY, f64::min);
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        if max - min <= f64::EPSILON {
            continue;
        }
        // A strictly monotonic sequence is a counter, not a measurement.
        if is_strictly_monotonic(&values) {
            issues.push(issue(
                IssueCategory::UniformDistribution,
                Severity::Warning,
                column.name().to_string(),
                format!("Column '{}' is a monotonic sequence", column.name()),
                "Verify the column carries real measurements",
                Some((1.0, "monotonic")),
            ));
            continue;
        }
        let normalized: Vec<f64> = values.iter().map(|v| (v - min) / (max - min)).collect();
        let Some(test) = stats::ks_uniform(&normalized) else {
            continue;
        };
        if test.p_value <= cfg.uniform_p_value {
            continue;
        }
        issues.push(issue(
            IssueCategory::UniformDistribution,
            Severity::Warning,
            column.name().to_string(),
            format!(
                "Column '{}' is indistinguishable from uniform (KS p = {:.3})",
                column.name(),
                test.p_value
            ),
            "Verify the column carries real measurements",
            Some((test.p_value, "ks_p_value")),
        ));
    }
    issues
}

fn is_strictly_monotonic(values: &[f64]) -> bool {
    values.windows(2).all(|w| w[0] < w[1]) || values.windows(2).all(|w| w[0] > w[1])
}

/// Numeric columns where nearly every value is distinct behave like row
/// identifiers. String identifiers surface through the cardinality check.
pub fn unique_values(ctx: &CheckContext<'_>, cfg: &DistributionThresholds) -> Vec<Issue> {
    let mut issues = Vec::new();
    for column in ctx.df.get_columns() {
        if !is_numeric_dtype(column.dtype()) {
            continue;
        }
        let values = numeric_values(column);
        if values.len() < cfg.unique_min_samples {
            continue;
        }
        let distinct: BTreeSet<u64> = values.iter().map(|v| v.to_bits()).collect();
        let ratio = distinct.len() as f64 / values.len() as f64;
        if ratio < cfg.unique_value_ratio {
            continue;
        }
        issues.push(issue(
            IssueCategory::UniqueValues,
            Severity::Warning,
            column.name().to_string(),
            format!(
                "Column '{}' is {:.1}% unique values",
                column.name(),
                ratio * 100.0
            ),
            "Exclude identifier-like columns from modeling",
            Some((ratio, "unique_ratio")),
        ));
    }
    issues
}
