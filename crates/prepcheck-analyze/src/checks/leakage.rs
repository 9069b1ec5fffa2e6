//! Target-leakage detection.
//!
//! Two complementary signals: features that are element-wise copies of
//! the target, and features whose statistical association with the
//! target is strong enough to suggest post-outcome information.

use std::collections::BTreeMap;

use polars::prelude::{Column, DataType};
use prepcheck_model::{Issue, IssueCategory, LeakageThresholds, Severity};

use super::{CheckContext, issue};
use crate::stats::{
    self, any_to_f64, any_to_string, cell, cramers_v, is_missing, is_numeric_dtype,
    is_string_like_dtype, paired_values, pearson,
};

/// Features element-wise identical to the target, nulls aligned.
pub fn data_leakage(ctx: &CheckContext<'_>) -> Vec<Issue> {
    let Some(target) = ctx.target else {
        return Vec::new();
    };
    let Ok(target_column) = ctx.df.column(target) else {
        return Vec::new();
    };

    let mut issues = Vec::new();
    for feature in ctx.df.get_columns() {
        if feature.name().as_str() == target {
            continue;
        }
        if !identical_columns(target_column, feature) {
            continue;
        }
        issues.push(issue(
            IssueCategory::DataLeakage,
            Severity::Critical,
            feature.name().to_string(),
            format!(
                "Column '{}' is identical to the target '{target}'",
                feature.name()
            ),
            "Drop the column before training",
            Some((100.0, "match_pct")),
        ));
    }
    issues
}

fn identical_columns(target: &Column, feature: &Column) -> bool {
    if target.len() != feature.len() || target.is_empty() {
        return false;
    }
    let mut matched = 0usize;
    for idx in 0..target.len() {
        let a = cell(target, idx);
        let b = cell(feature, idx);
        match (is_missing(&a), is_missing(&b)) {
            (true, true) => {}
            (false, false) => {
                if any_to_string(a) != any_to_string(b) {
                    return false;
                }
                matched += 1;
            }
            _ => return false,
        }
    }
    matched > 0
}

/// Statistical association between the target and every feature,
/// routed by the target's physical dtype. A numeric target (including a
/// low-cardinality 0/1 label) takes the Pearson path; any other target is
/// treated as categorical.
pub fn target_leakage_patterns(ctx: &CheckContext<'_>, cfg: &LeakageThresholds) -> Vec<Issue> {
    let Some(target) = ctx.target else {
        return Vec::new();
    };
    let Ok(target_column) = ctx.df.column(target) else {
        return Vec::new();
    };
    let numeric_target = is_numeric_dtype(target_column.dtype());

    let mut issues = Vec::new();
    for feature in ctx.df.get_columns() {
        if feature.name().as_str() == target {
            continue;
        }
        let finding = if numeric_target {
            if is_numeric_dtype(feature.dtype()) {
                numeric_association(target_column, feature, cfg)
            } else {
                None
            }
        } else if is_numeric_dtype(feature.dtype()) {
            anova_association(target_column, feature, cfg)
        } else if is_string_like_dtype(feature.dtype())
            || matches!(feature.dtype(), DataType::Boolean)
        {
            categorical_association(target_column, feature, cfg)
        } else {
            None
        };
        if let Some((severity, description, metric, metric_name)) = finding {
            issues.push(issue(
                IssueCategory::TargetLeakage,
                severity,
                feature.name().to_string(),
                description,
                "Drop the feature or verify it is known before prediction time",
                Some((metric, metric_name)),
            ));
        }
    }
    issues
}

type Association = (Severity, String, f64, &'static str);

fn numeric_association(
    target: &Column,
    feature: &Column,
    cfg: &LeakageThresholds,
) -> Option<Association> {
    let (xs, ys) = paired_values(target, feature);
    let r = pearson(&xs, &ys)?;
    if r.abs() < cfg.numeric_warning {
        return None;
    }
    let severity = if r.abs() >= cfg.numeric_critical {
        Severity::Critical
    } else {
        Severity::Warning
    };
    Some((
        severity,
        format!(
            "Feature '{}' correlates with the target at r = {r:.3}",
            feature.name()
        ),
        r,
        "pearson_r",
    ))
}

fn categorical_association(
    target: &Column,
    feature: &Column,
    cfg: &LeakageThresholds,
) -> Option<Association> {
    let table = contingency_table(target, feature)?;
    let v = cramers_v(&table)?;
    if v < cfg.categorical_warning {
        return None;
    }
    let severity = if v >= cfg.categorical_critical {
        Severity::Critical
    } else {
        Severity::Warning
    };
    Some((
        severity,
        format!(
            "Feature '{}' predicts the target (Cramér's V = {v:.3})",
            feature.name()
        ),
        v,
        "cramers_v",
    ))
}

/// Categorical target, numeric feature: one-way ANOVA of the feature
/// grouped by target level.
fn anova_association(
    categorical: &Column,
    numeric: &Column,
    cfg: &LeakageThresholds,
) -> Option<Association> {
    let groups = grouped_values(categorical, numeric)?;
    let test = stats::one_way_anova(&groups)?;
    if test.statistic < cfg.f_stat_warning || test.p_value >= cfg.f_stat_p_value {
        return None;
    }
    let severity = if test.statistic >= cfg.f_stat_critical {
        Severity::Critical
    } else {
        Severity::Warning
    };
    Some((
        severity,
        format!(
            "Feature separates target classes strongly (F = {:.1})",
            test.statistic
        ),
        test.statistic,
        "f_statistic",
    ))
}

pub(crate) fn contingency_table(a: &Column, b: &Column) -> Option<Vec<Vec<f64>>> {
    let len = a.len().min(b.len());
    let mut rows: BTreeMap<String, BTreeMap<String, f64>> = BTreeMap::new();
    let mut cols: std::collections::BTreeSet<String> = std::collections::BTreeSet::new();
    for idx in 0..len {
        let va = cell(a, idx);
        let vb = cell(b, idx);
        if is_missing(&va) || is_missing(&vb) {
            continue;
        }
        let ka = any_to_string(va);
        let kb = any_to_string(vb);
        cols.insert(kb.clone());
        *rows.entry(ka).or_default().entry(kb).or_insert(0.0) += 1.0;
    }
    if rows.len() < 2 || cols.len() < 2 {
        return None;
    }
    let table = rows
        .values()
        .map(|row| {
            cols.iter()
                .map(|c| row.get(c).copied().unwrap_or(0.0))
                .collect()
        })
        .collect();
    Some(table)
}

pub(crate) fn grouped_values(categorical: &Column, numeric: &Column) -> Option<Vec<Vec<f64>>> {
    let len = categorical.len().min(numeric.len());
    let mut groups: BTreeMap<String, Vec<f64>> = BTreeMap::new();
    for idx in 0..len {
        let level = cell(categorical, idx);
        if is_missing(&level) {
            continue;
        }
        if let Some(v) = any_to_f64(cell(numeric, idx))
            && v.is_finite()
        {
            groups.entry(any_to_string(level)).or_default().push(v);
        }
    }
    let groups: Vec<Vec<f64>> = groups.into_values().filter(|g| g.len() >= 2).collect();
    if groups.len() < 2 {
        return None;
    }
    Some(groups)
}
