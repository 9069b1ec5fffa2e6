//! Pairwise interaction engine.
//!
//! Walks all column pairs once per analysis: numeric pairs get linear and
//! rank correlations, categorical pairs get Cramér's V, and mixed pairs
//! get the correlation ratio gated by an ANOVA significance test.
//! Target-feature association is the leakage check's job, so pairs
//! involving the target are skipped here.

use polars::prelude::Column;
use prepcheck_model::{
    CorrelationPair, CorrelationThresholds, Issue, IssueCategory, SemanticType, Severity,
};

use crate::checks::{CheckContext, issue, leakage};
use crate::stats::{self, paired_values};

pub fn correlations(ctx: &CheckContext<'_>, cfg: &CorrelationThresholds) -> Vec<Issue> {
    let columns = ctx.df.get_columns();
    let mut issues = Vec::new();

    for (i, a) in columns.iter().enumerate() {
        for b in &columns[i + 1..] {
            if let Some(target) = ctx.target
                && (a.name().as_str() == target || b.name().as_str() == target)
            {
                continue;
            }
            let ta = ctx.column_types.get(a.name().as_str()).copied();
            let tb = ctx.column_types.get(b.name().as_str()).copied();
            match (ta, tb) {
                (Some(SemanticType::Numeric), Some(SemanticType::Numeric)) => {
                    numeric_pair(a, b, cfg, &mut issues);
                }
                (
                    Some(SemanticType::Categorical | SemanticType::Boolean),
                    Some(SemanticType::Categorical | SemanticType::Boolean),
                ) => {
                    categorical_pair(a, b, cfg, &mut issues);
                }
                (
                    Some(SemanticType::Categorical | SemanticType::Boolean),
                    Some(SemanticType::Numeric),
                ) => {
                    mixed_pair(a, b, cfg, &mut issues);
                }
                (
                    Some(SemanticType::Numeric),
                    Some(SemanticType::Categorical | SemanticType::Boolean),
                ) => {
                    mixed_pair(b, a, cfg, &mut issues);
                }
                _ => {}
            }
        }
    }
    issues
}

fn grade(value: f64, pair: CorrelationPair) -> Option<Severity> {
    if value >= pair.critical {
        Some(Severity::Critical)
    } else if value >= pair.warning {
        Some(Severity::Warning)
    } else {
        None
    }
}

fn numeric_pair(
    a: &Column,
    b: &Column,
    cfg: &CorrelationThresholds,
    issues: &mut Vec<Issue>,
) {
    let (xs, ys) = paired_values(a, b);
    let coefficients: [(&str, Option<f64>, CorrelationPair); 3] = [
        ("pearson", stats::pearson(&xs, &ys), cfg.pearson),
        ("spearman", stats::spearman(&xs, &ys), cfg.spearman),
        ("kendall", stats::kendall_tau(&xs, &ys), cfg.kendall),
    ];
    for (name, value, pair) in coefficients {
        let Some(value) = value else { continue };
        let Some(severity) = grade(value.abs(), pair) else {
            continue;
        };
        issues.push(issue(
            IssueCategory::FeatureCorrelation,
            severity,
            b.name().to_string(),
            format!(
                "Columns '{}' and '{}' are highly correlated ({name} = {value:.3})",
                a.name(),
                b.name()
            ),
            "Drop one of the correlated columns",
            Some((value, name)),
        ));
    }
}

fn categorical_pair(
    a: &Column,
    b: &Column,
    cfg: &CorrelationThresholds,
    issues: &mut Vec<Issue>,
) {
    if distinct_count(a) > cfg.max_distinct_categories
        || distinct_count(b) > cfg.max_distinct_categories
    {
        return;
    }
    let Some(table) = leakage::contingency_table(a, b) else {
        return;
    };
    let Some(v) = stats::cramers_v(&table) else {
        return;
    };
    let Some(severity) = grade(v, cfg.categorical) else {
        return;
    };
    issues.push(issue(
        IssueCategory::CategoricalCorrelation,
        severity,
        b.name().to_string(),
        format!(
            "Columns '{}' and '{}' are associated (Cramér's V = {v:.3})",
            a.name(),
            b.name()
        ),
        "Drop one of the associated columns",
        Some((v, "cramers_v")),
    ));
}

/// Categorical-numeric pair: correlation ratio (eta) reported only when
/// the group separation is also statistically significant.
fn mixed_pair(
    categorical: &Column,
    numeric: &Column,
    cfg: &CorrelationThresholds,
    issues: &mut Vec<Issue>,
) {
    if distinct_count(categorical) > cfg.max_distinct_categories {
        return;
    }
    let Some(groups) = leakage::grouped_values(categorical, numeric) else {
        return;
    };
    let Some(eta) = stats::correlation_ratio(&groups) else {
        return;
    };
    let Some(anova) = stats::one_way_anova(&groups) else {
        return;
    };
    if anova.p_value >= 0.05 {
        return;
    }
    let Some(severity) = grade(eta, cfg.mixed) else {
        return;
    };
    issues.push(issue(
        IssueCategory::MixedCorrelation,
        severity,
        numeric.name().to_string(),
        format!(
            "Column '{}' varies strongly with '{}' (eta = {eta:.3})",
            numeric.name(),
            categorical.name()
        ),
        "Drop the redundant column or combine the pair",
        Some((eta, "eta")),
    ));
}

fn distinct_count(column: &Column) -> usize {
    use std::collections::BTreeSet;

    use crate::stats::{any_to_string, cell, is_missing};

    let mut distinct = BTreeSet::new();
    for idx in 0..column.len() {
        let value = cell(column, idx);
        if !is_missing(&value) {
            distinct.insert(any_to_string(value));
        }
    }
    distinct.len()
}
