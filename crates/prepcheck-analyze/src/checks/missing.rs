//! Missing-value checks: per-column ratios, fully empty columns,
//! dataset-wide missingness, and missingness-pattern association.

use polars::prelude::Column;
use prepcheck_model::{Issue, IssueCategory, MissingValueThresholds, SemanticType, Severity};

use super::{CheckContext, dataset_issue, issue};
use crate::stats::{
    self, any_to_f64, any_to_string, cell, chi2_contingency, cohens_d, cramers_v, is_missing,
};

pub(crate) fn missing_count(column: &Column) -> usize {
    (0..column.len())
        .filter(|&idx| is_missing(&cell(column, idx)))
        .count()
}

/// A frame with no rows, no columns, or only missing cells is reported as
/// a single critical issue; nothing else runs against it.
pub fn empty_dataset(ctx: &CheckContext<'_>) -> Vec<Issue> {
    let has_data = ctx.df.height() > 0
        && ctx.df.width() > 0
        && ctx
            .df
            .get_columns()
            .iter()
            .any(|column| missing_count(column) < column.len());
    if has_data {
        return Vec::new();
    }
    vec![dataset_issue(
        IssueCategory::EmptyDataset,
        Severity::Critical,
        "Dataset contains no data",
        "Load a non-empty dataset before analysis",
        None,
    )]
}

pub fn high_missing_values(ctx: &CheckContext<'_>, cfg: &MissingValueThresholds) -> Vec<Issue> {
    let rows = ctx.df.height();
    let mut issues = Vec::new();
    for column in ctx.df.get_columns() {
        let ratio = missing_count(column) as f64 / rows as f64;
        // Fully empty columns are the empty_columns check's finding.
        if ratio >= 1.0 || ratio < cfg.warning {
            continue;
        }
        let severity = if ratio >= cfg.critical {
            Severity::Critical
        } else {
            Severity::Warning
        };
        issues.push(issue(
            IssueCategory::HighMissingValues,
            severity,
            column.name().to_string(),
            format!(
                "Column '{}' is {:.1}% missing",
                column.name(),
                ratio * 100.0
            ),
            "Impute missing values or drop the column",
            Some((ratio * 100.0, "missing_pct")),
        ));
    }
    issues
}

pub fn empty_columns(ctx: &CheckContext<'_>) -> Vec<Issue> {
    let rows = ctx.df.height();
    let mut issues = Vec::new();
    for column in ctx.df.get_columns() {
        if missing_count(column) == rows {
            issues.push(issue(
                IssueCategory::EmptyColumn,
                Severity::Critical,
                column.name().to_string(),
                format!("Column '{}' has no non-missing values", column.name()),
                "Drop the column",
                Some((100.0, "missing_pct")),
            ));
        }
    }
    issues
}

pub fn dataset_missingness(ctx: &CheckContext<'_>, cfg: &MissingValueThresholds) -> Vec<Issue> {
    let cells = ctx.df.height() * ctx.df.width();
    if cells == 0 {
        return Vec::new();
    }
    let missing: usize = ctx.df.get_columns().iter().map(missing_count).sum();
    let pct = missing as f64 * 100.0 / cells as f64;
    if pct < cfg.dataset_warning_pct {
        return Vec::new();
    }
    let severity = if pct >= cfg.dataset_critical_pct {
        Severity::Critical
    } else {
        Severity::Warning
    };
    vec![dataset_issue(
        IssueCategory::DatasetMissingness,
        severity,
        format!("{pct:.1}% of all cells are missing"),
        "Review data collection before imputing broadly",
        Some((pct, "missing_pct")),
    )]
}

/// Tests whether a column's missingness is associated with the values of
/// other columns (missing-not-at-random evidence). Categorical companions
/// use a chi-square/Cramér's V test on a missing-indicator contingency
/// table; numeric companions use Cohen's d between the missing and
/// present groups.
pub fn missing_patterns(ctx: &CheckContext<'_>, cfg: &MissingValueThresholds) -> Vec<Issue> {
    let rows = ctx.df.height();
    let mut issues = Vec::new();

    for column in ctx.df.get_columns() {
        let mask: Vec<bool> = (0..rows)
            .map(|idx| is_missing(&cell(column, idx)))
            .collect();
        let n_missing = mask.iter().filter(|&&m| m).count();
        if n_missing < cfg.pattern_min_missing_count || rows - n_missing < cfg.pattern_min_group_size
        {
            continue;
        }

        let mut related: Vec<(String, f64, f64)> = Vec::new();
        for other in ctx.df.get_columns() {
            if other.name() == column.name() {
                continue;
            }
            let finding = match ctx.column_types.get(other.name().as_str()) {
                Some(SemanticType::Numeric) => numeric_pattern(other, &mask, cfg),
                Some(SemanticType::Categorical | SemanticType::Boolean) => {
                    categorical_pattern(other, &mask, cfg)
                }
                _ => None,
            };
            if let Some((effect, p_value)) = finding {
                related.push((other.name().to_string(), effect, p_value));
            }
        }
        if related.is_empty() {
            continue;
        }

        related.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
        related.truncate(cfg.pattern_top_correlations);
        let min_p = related
            .iter()
            .map(|r| r.2)
            .fold(f64::INFINITY, f64::min);
        // Critical is reserved for missingness tied to the target itself.
        let severity = if related.iter().any(|(name, _, p)| {
            *p < cfg.pattern_critical_p_value && Some(name.as_str()) == ctx.target
        }) {
            Severity::Critical
        } else {
            Severity::Warning
        };
        let names: Vec<&str> = related.iter().map(|r| r.0.as_str()).collect();
        issues.push(issue(
            IssueCategory::MissingPatterns,
            severity,
            column.name().to_string(),
            format!(
                "Missingness of '{}' is associated with: {}",
                column.name(),
                names.join(", ")
            ),
            "Investigate whether values are missing not at random",
            Some((min_p, "p_value")),
        ));
    }
    issues
}

fn numeric_pattern(
    other: &Column,
    mask: &[bool],
    cfg: &MissingValueThresholds,
) -> Option<(f64, f64)> {
    let mut when_missing = Vec::new();
    let mut when_present = Vec::new();
    for (idx, &missing) in mask.iter().enumerate() {
        if let Some(v) = any_to_f64(cell(other, idx))
            && v.is_finite()
        {
            if missing {
                when_missing.push(v);
            } else {
                when_present.push(v);
            }
        }
    }
    if when_missing.len() < cfg.pattern_min_group_size
        || when_present.len() < cfg.pattern_min_group_size
    {
        return None;
    }
    let d = cohens_d(&when_missing, &when_present)?;
    if d.abs() < cfg.pattern_cohens_d_min {
        return None;
    }
    let test = stats::one_way_anova(&[when_missing, when_present])?;
    if test.p_value >= cfg.pattern_p_value {
        return None;
    }
    Some((d.abs(), test.p_value))
}

fn categorical_pattern(
    other: &Column,
    mask: &[bool],
    cfg: &MissingValueThresholds,
) -> Option<(f64, f64)> {
    use std::collections::BTreeMap;

    let mut counts: BTreeMap<String, [f64; 2]> = BTreeMap::new();
    for (idx, &missing) in mask.iter().enumerate() {
        let value = cell(other, idx);
        if is_missing(&value) {
            continue;
        }
        let entry = counts.entry(any_to_string(value)).or_default();
        entry[usize::from(missing)] += 1.0;
    }
    // Rare levels are pooled so expected counts stay usable.
    let mut table: Vec<Vec<f64>> = Vec::new();
    let mut other_row = [0.0, 0.0];
    for row in counts.values() {
        if (row[0] + row[1]) as usize <= cfg.pattern_rare_category_count {
            other_row[0] += row[0];
            other_row[1] += row[1];
        } else {
            table.push(vec![row[0], row[1]]);
        }
    }
    if other_row[0] + other_row[1] > 0.0 {
        table.push(other_row.to_vec());
    }
    if table.len() < 2 {
        return None;
    }

    let test = chi2_contingency(&table)?;
    if test.p_value >= cfg.pattern_p_value {
        return None;
    }
    let v = cramers_v(&table)?;
    if v < cfg.pattern_cramers_v_min {
        return None;
    }
    Some((v, test.p_value))
}
