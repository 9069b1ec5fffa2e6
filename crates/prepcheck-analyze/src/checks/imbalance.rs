//! Target class-imbalance detection.

use std::collections::BTreeMap;

use prepcheck_model::{ImbalanceThresholds, Issue, IssueCategory, SemanticType, Severity};

use super::{CheckContext, issue};
use crate::stats::{any_to_string, cell, is_missing};

/// Reports when the target's majority class dominates the label
/// distribution. Only runs when a target is set and reads as a discrete
/// label column.
pub fn class_imbalance(ctx: &CheckContext<'_>, cfg: &ImbalanceThresholds) -> Vec<Issue> {
    let Some(target) = ctx.target else {
        return Vec::new();
    };
    let Ok(column) = ctx.df.column(target) else {
        return Vec::new();
    };
    if !matches!(
        ctx.column_types.get(target),
        Some(SemanticType::Categorical | SemanticType::Boolean)
    ) {
        return Vec::new();
    }

    let mut counts: BTreeMap<String, usize> = BTreeMap::new();
    let mut total = 0usize;
    for idx in 0..column.len() {
        let value = cell(column, idx);
        if is_missing(&value) {
            continue;
        }
        *counts.entry(any_to_string(value)).or_insert(0) += 1;
        total += 1;
    }
    if counts.len() < 2 || total == 0 {
        return Vec::new();
    }
    let Some((majority, &majority_count)) = counts.iter().max_by_key(|&(_, &count)| count) else {
        return Vec::new();
    };
    let ratio = majority_count as f64 / total as f64;
    if ratio < cfg.majority_class_ratio {
        return Vec::new();
    }
    vec![issue(
        IssueCategory::ClassImbalance,
        Severity::Warning,
        target.to_string(),
        format!(
            "Target '{target}' majority class '{majority}' covers {:.1}% of labels",
            ratio * 100.0
        ),
        "Use stratified splits and class weighting or resampling",
        Some((ratio, "majority_ratio")),
    )]
}
