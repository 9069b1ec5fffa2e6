//! Issue-to-fix mapping.
//!
//! Routing decisions read the structured `metric` carried by each issue,
//! never the human-readable description. Categories without a safe
//! automated remediation return no suggestions.

use prepcheck_model::{
    ColumnTypeMap, DATASET_TARGET, EncodeMethod, FixSuggestion, FixType, ImputeMethod, Issue,
    IssueCategory, Result, SemanticType, TransformMethod,
};
use serde_json::json;

/// Distinct-count at or below which one-hot encoding stays tractable.
const ONEHOT_MAX_CATEGORIES: f64 = 10.0;

/// Missing percentage beyond which imputation is no longer credible.
const DROP_MISSING_PCT: f64 = 70.0;

/// Suggestions for a single issue.
///
/// Errors only on a registry bug (a suggestion constructed with no
/// columns); data-shaped inputs never fail.
pub fn suggest_for_issue(
    issue: &Issue,
    column_types: &ColumnTypeMap,
) -> Result<Vec<FixSuggestion>> {
    let column = issue.column.clone();
    let suggestions = match issue.category {
        IssueCategory::HighMissingValues => {
            let pct = issue.metric.unwrap_or(0.0);
            if issue.severity.is_critical() || pct > DROP_MISSING_PCT {
                vec![
                    FixSuggestion::new(FixType::DropColumn, vec![column], issue)?
                        .with_priority(0)
                        .with_reason(format!("{pct:.1}% missing, too sparse to impute")),
                ]
            } else {
                let method = match column_types.get(&issue.column) {
                    Some(SemanticType::Numeric) => ImputeMethod::Median,
                    _ => ImputeMethod::Mode,
                };
                vec![
                    FixSuggestion::new(FixType::Impute, vec![column], issue)?
                        .with_method(method.as_str())
                        .with_priority(1)
                        .with_reason(format!("{pct:.1}% missing values")),
                ]
            }
        }
        IssueCategory::EmptyColumn | IssueCategory::SingleValue => {
            vec![
                FixSuggestion::new(FixType::DropColumn, vec![column], issue)?
                    .with_priority(0)
                    .with_reason("column carries no information"),
            ]
        }
        IssueCategory::DataLeakage => {
            vec![
                FixSuggestion::new(FixType::DropColumn, vec![column], issue)?
                    .with_priority(0)
                    .with_reason("feature leaks target information"),
            ]
        }
        IssueCategory::TargetLeakage => {
            vec![
                FixSuggestion::new(FixType::DropColumn, vec![column], issue)?
                    .with_priority(0)
                    .with_reason("strong target association, verify before keeping"),
            ]
        }
        IssueCategory::MixedDataTypes => {
            let numeric_ratio = issue.metric.unwrap_or(0.0);
            let target = if numeric_ratio >= 0.5 { "numeric" } else { "string" };
            vec![
                FixSuggestion::new(FixType::CastType, vec![column], issue)?
                    .with_method(target)
                    .with_priority(1)
                    .with_reason("coerce mixed values to a single type"),
            ]
        }
        IssueCategory::HighCardinality => {
            let distinct = issue.metric.unwrap_or(f64::INFINITY);
            let method = if distinct <= ONEHOT_MAX_CATEGORIES {
                EncodeMethod::OneHot
            } else {
                EncodeMethod::Frequency
            };
            vec![
                FixSuggestion::new(FixType::Encode, vec![column], issue)?
                    .with_method(method.as_str())
                    .with_priority(2)
                    .with_reason(format!("{distinct:.0} distinct values")),
            ]
        }
        IssueCategory::Duplicates => {
            vec![
                FixSuggestion::new(FixType::DropDuplicates, vec![DATASET_TARGET.to_string()], issue)?
                    .with_parameter("keep", json!("first"))
                    .with_priority(0)
                    .with_reason("remove duplicated rows"),
            ]
        }
        IssueCategory::Outliers => {
            vec![
                FixSuggestion::new(FixType::ClipOutliers, vec![column], issue)?
                    .with_method("iqr")
                    .with_priority(3)
                    .with_reason("clip values outside the interquartile fences"),
            ]
        }
        IssueCategory::Skewness => {
            let skew = issue.metric.unwrap_or(0.0);
            let method = if skew.abs() > 10.0 {
                TransformMethod::YeoJohnson
            } else {
                TransformMethod::Log1p
            };
            vec![
                FixSuggestion::new(FixType::Transform, vec![column], issue)?
                    .with_method(method.as_str())
                    .with_priority(4)
                    .with_reason(format!("reduce skewness of {skew:.1}")),
            ]
        }
        IssueCategory::FeatureCorrelation
        | IssueCategory::CategoricalCorrelation
        | IssueCategory::MixedCorrelation => {
            vec![
                FixSuggestion::new(FixType::DropColumn, vec![column], issue)?
                    .with_priority(5)
                    .with_reason("redundant with a correlated column"),
            ]
        }
        IssueCategory::InfiniteValues => {
            vec![
                FixSuggestion::new(FixType::Impute, vec![column], issue)?
                    .with_method(ImputeMethod::Median.as_str())
                    .with_parameter("replace_infinite", json!(true))
                    .with_priority(1)
                    .with_reason("replace infinities before modeling"),
            ]
        }
        IssueCategory::UniqueValues => {
            vec![
                FixSuggestion::new(FixType::DropColumn, vec![column], issue)?
                    .with_priority(5)
                    .with_reason("identifier-like column"),
            ]
        }
        // Advisory findings; remediation needs human judgment.
        IssueCategory::ClassImbalance
        | IssueCategory::DatasetMissingness
        | IssueCategory::MissingPatterns
        | IssueCategory::HighZeroCounts
        | IssueCategory::ExtremeTextLengths
        | IssueCategory::DatetimeSkew
        | IssueCategory::DatasetDrift
        | IssueCategory::UniformDistribution
        | IssueCategory::ConstantLength
        | IssueCategory::EmptyDataset => Vec::new(),
    };
    Ok(suggestions)
}
