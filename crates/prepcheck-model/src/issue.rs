use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::types::ColumnTypeMap;

/// Severity of a detected issue.
///
/// Every check pairs a warning threshold with a strictly more extreme
/// critical threshold, so a critical issue always also satisfies the warning
/// condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Critical,
    Warning,
}

impl Severity {
    pub fn is_critical(self) -> bool {
        self == Severity::Critical
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Critical => "critical",
            Severity::Warning => "warning",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Rough downstream-impact grade attached to each issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImpactScore {
    Low,
    Medium,
    High,
}

impl ImpactScore {
    pub fn as_str(self) -> &'static str {
        match self {
            ImpactScore::Low => "low",
            ImpactScore::Medium => "medium",
            ImpactScore::High => "high",
        }
    }
}

/// Closed set of issue categories the check registry can emit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueCategory {
    DataLeakage,
    TargetLeakage,
    HighMissingValues,
    EmptyColumn,
    SingleValue,
    ClassImbalance,
    HighCardinality,
    Duplicates,
    MixedDataTypes,
    Outliers,
    FeatureCorrelation,
    CategoricalCorrelation,
    MixedCorrelation,
    DatasetMissingness,
    HighZeroCounts,
    ExtremeTextLengths,
    DatetimeSkew,
    MissingPatterns,
    Skewness,
    DatasetDrift,
    UniformDistribution,
    UniqueValues,
    InfiniteValues,
    ConstantLength,
    EmptyDataset,
}

impl IssueCategory {
    pub fn as_str(self) -> &'static str {
        match self {
            IssueCategory::DataLeakage => "data_leakage",
            IssueCategory::TargetLeakage => "target_leakage",
            IssueCategory::HighMissingValues => "high_missing_values",
            IssueCategory::EmptyColumn => "empty_column",
            IssueCategory::SingleValue => "single_value",
            IssueCategory::ClassImbalance => "class_imbalance",
            IssueCategory::HighCardinality => "high_cardinality",
            IssueCategory::Duplicates => "duplicates",
            IssueCategory::MixedDataTypes => "mixed_data_types",
            IssueCategory::Outliers => "outliers",
            IssueCategory::FeatureCorrelation => "feature_correlation",
            IssueCategory::CategoricalCorrelation => "categorical_correlation",
            IssueCategory::MixedCorrelation => "mixed_correlation",
            IssueCategory::DatasetMissingness => "dataset_missingness",
            IssueCategory::HighZeroCounts => "high_zero_counts",
            IssueCategory::ExtremeTextLengths => "extreme_text_lengths",
            IssueCategory::DatetimeSkew => "datetime_skew",
            IssueCategory::MissingPatterns => "missing_patterns",
            IssueCategory::Skewness => "skewness",
            IssueCategory::DatasetDrift => "dataset_drift",
            IssueCategory::UniformDistribution => "uniform_distribution",
            IssueCategory::UniqueValues => "unique_values",
            IssueCategory::InfiniteValues => "infinite_values",
            IssueCategory::ConstantLength => "constant_length",
            IssueCategory::EmptyDataset => "empty_dataset",
        }
    }
}

impl fmt::Display for IssueCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single data-quality finding.
///
/// Immutable once created. The numeric value that triggered the issue is
/// carried in `metric` so downstream consumers never re-parse the
/// human-readable description.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Issue {
    pub category: IssueCategory,
    pub severity: Severity,
    /// Column the issue refers to, or [`crate::ALL_COLUMNS`] for
    /// dataset-wide findings.
    pub column: String,
    pub description: String,
    pub impact: ImpactScore,
    pub quick_fix: String,
    /// Triggering numeric value (e.g. missing percentage, skewness).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metric: Option<f64>,
    /// Name of the metric carried in `metric`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metric_name: Option<String>,
}

impl Issue {
    /// Impact grade conventionally paired with a severity: critical issues
    /// are high impact, warnings medium.
    pub fn impact_for(severity: Severity) -> ImpactScore {
        if severity.is_critical() {
            ImpactScore::High
        } else {
            ImpactScore::Medium
        }
    }
}

/// Complete result of one analysis run.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisResult {
    pub critical_count: usize,
    pub warning_count: usize,
    pub total_issues: usize,
    pub issues: Vec<Issue>,
    /// Dataset overview owned by the summary subsystem; keys are stable
    /// section names (e.g. "dataset_info").
    pub summaries: BTreeMap<String, serde_json::Value>,
    pub column_types: ColumnTypeMap,
    /// Content hash of the analyzed frame, for reproducibility tracking.
    pub dataset_hash: String,
    /// Selected check names that were not recognized and were ignored.
    pub skipped_checks: Vec<String>,
}

impl AnalysisResult {
    /// Assemble a result from an issue list, computing the severity counts.
    pub fn from_issues(
        issues: Vec<Issue>,
        summaries: BTreeMap<String, serde_json::Value>,
        column_types: ColumnTypeMap,
        dataset_hash: String,
        skipped_checks: Vec<String>,
    ) -> Self {
        let critical_count = issues.iter().filter(|i| i.severity.is_critical()).count();
        let warning_count = issues.len() - critical_count;
        Self {
            critical_count,
            warning_count,
            total_issues: issues.len(),
            issues,
            summaries,
            column_types,
            dataset_hash,
            skipped_checks,
        }
    }

    pub fn has_critical(&self) -> bool {
        self.critical_count > 0
    }

    /// Issues for a single column.
    pub fn column_issues(&self, column: &str) -> Vec<&Issue> {
        self.issues.iter().filter(|i| i.column == column).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn severity_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&Severity::Critical).unwrap(),
            "\"critical\""
        );
        assert_eq!(
            serde_json::to_string(&Severity::Warning).unwrap(),
            "\"warning\""
        );
    }

    #[test]
    fn category_serializes_snake_case() {
        assert_eq!(
            serde_json::to_string(&IssueCategory::HighMissingValues).unwrap(),
            "\"high_missing_values\""
        );
        assert_eq!(IssueCategory::DatasetDrift.as_str(), "dataset_drift");
    }

    #[test]
    fn result_counts_add_up() {
        let issue = |severity| Issue {
            category: IssueCategory::Outliers,
            severity,
            column: "x".to_string(),
            description: String::new(),
            impact: Issue::impact_for(severity),
            quick_fix: String::new(),
            metric: None,
            metric_name: None,
        };
        let result = AnalysisResult::from_issues(
            vec![
                issue(Severity::Critical),
                issue(Severity::Warning),
                issue(Severity::Warning),
            ],
            BTreeMap::new(),
            ColumnTypeMap::new(),
            String::new(),
            Vec::new(),
        );
        assert_eq!(result.critical_count, 1);
        assert_eq!(result.warning_count, 2);
        assert_eq!(result.total_issues, 3);
        assert_eq!(
            result.critical_count + result.warning_count,
            result.issues.len()
        );
    }
}
