//! The statistical check registry.
//!
//! Every check is a pure function from a shared, read-only view of the
//! dataset to a list of issues. Checks fail open: degenerate statistics
//! skip the affected column instead of erroring, and never abort the run.

pub mod columns;
pub mod distribution;
pub mod imbalance;
pub mod leakage;
pub mod missing;
pub mod outliers;

use polars::prelude::DataFrame;
use prepcheck_model::{
    CheckKind, ColumnTypeMap, ImpactScore, Issue, IssueCategory, Severity, ThresholdConfig,
};
use tracing::debug;

use crate::{correlate, drift};

/// Read-only view shared across all checks in one run.
pub struct CheckContext<'a> {
    pub df: &'a DataFrame,
    pub column_types: &'a ColumnTypeMap,
    /// Label column for leakage and imbalance checks.
    pub target: Option<&'a str>,
    /// Reference frame for drift detection.
    pub comparison: Option<&'a DataFrame>,
}

/// Run the selected checks in canonical order and collect their issues.
///
/// The three correlation pseudo-checks share one interaction-engine pass;
/// the engine runs at most once per analysis no matter how many of them
/// are selected.
pub fn run_checks(
    ctx: &CheckContext<'_>,
    config: &ThresholdConfig,
    selected: &[CheckKind],
) -> Vec<Issue> {
    let mut issues = Vec::new();

    // An empty frame short-circuits everything else.
    if selected.contains(&CheckKind::EmptyDataset) {
        let empty = missing::empty_dataset(ctx);
        if !empty.is_empty() {
            return empty;
        }
    }
    if ctx.df.height() == 0 || ctx.df.width() == 0 {
        return issues;
    }

    let mut correlation_done = false;
    for kind in CheckKind::ALL {
        if !selected.contains(&kind) {
            continue;
        }
        let found = match kind {
            CheckKind::EmptyDataset => continue,
            CheckKind::DataLeakage => leakage::data_leakage(ctx),
            CheckKind::HighMissingValues => missing::high_missing_values(ctx, &config.missing),
            CheckKind::EmptyColumns => missing::empty_columns(ctx),
            CheckKind::SingleValueColumns => columns::single_value_columns(ctx),
            CheckKind::TargetLeakagePatterns => {
                leakage::target_leakage_patterns(ctx, &config.leakage)
            }
            CheckKind::ClassImbalance => imbalance::class_imbalance(ctx, &config.imbalance),
            CheckKind::HighCardinality => columns::high_cardinality(ctx, &config.columns),
            CheckKind::Duplicates => columns::duplicates(ctx, &config.columns),
            CheckKind::MixedDataTypes => columns::mixed_data_types(ctx),
            CheckKind::Outliers => outliers::outliers(ctx, &config.outliers),
            CheckKind::FeatureCorrelation
            | CheckKind::CategoricalCorrelation
            | CheckKind::MixedCorrelation => {
                if correlation_done {
                    continue;
                }
                correlation_done = true;
                correlate::correlations(ctx, &config.correlations)
            }
            CheckKind::DatasetMissingness => missing::dataset_missingness(ctx, &config.missing),
            CheckKind::HighZeroCounts => outliers::high_zero_counts(ctx, &config.outliers),
            CheckKind::ExtremeTextLengths => {
                outliers::extreme_text_lengths(ctx, &config.outliers)
            }
            CheckKind::DatetimeSkew => outliers::datetime_skew(ctx, &config.outliers),
            CheckKind::MissingPatterns => missing::missing_patterns(ctx, &config.missing),
            CheckKind::Skewness => outliers::skewness(ctx, &config.outliers),
            CheckKind::DatasetDrift => drift::dataset_drift(ctx, &config.drift),
            CheckKind::UniformDistribution => {
                distribution::uniform_distribution(ctx, &config.distribution)
            }
            CheckKind::UniqueValues => distribution::unique_values(ctx, &config.distribution),
            CheckKind::InfiniteValues => outliers::infinite_values(ctx, &config.outliers),
            CheckKind::ConstantLength => outliers::constant_length(ctx, &config.outliers),
        };
        if !found.is_empty() {
            debug!(check = %kind, issues = found.len(), "check raised issues");
        }
        issues.extend(found);
    }
    issues
}

/// Construct an issue with the conventional severity/impact pairing.
pub(crate) fn issue(
    category: IssueCategory,
    severity: Severity,
    column: impl Into<String>,
    description: impl Into<String>,
    quick_fix: impl Into<String>,
    metric: Option<(f64, &str)>,
) -> Issue {
    let (metric, metric_name) = match metric {
        Some((value, name)) => (Some(value), Some(name.to_string())),
        None => (None, None),
    };
    Issue {
        category,
        severity,
        column: column.into(),
        description: description.into(),
        impact: Issue::impact_for(severity),
        quick_fix: quick_fix.into(),
        metric,
        metric_name,
    }
}

/// Dataset-wide critical issue with high impact regardless of severity rules.
pub(crate) fn dataset_issue(
    category: IssueCategory,
    severity: Severity,
    description: impl Into<String>,
    quick_fix: impl Into<String>,
    metric: Option<(f64, &str)>,
) -> Issue {
    let mut issue = issue(
        category,
        severity,
        prepcheck_model::ALL_COLUMNS,
        description,
        quick_fix,
        metric,
    );
    issue.impact = ImpactScore::High;
    issue
}
