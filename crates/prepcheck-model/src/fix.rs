use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{ModelError, Result};
use crate::issue::{Issue, IssueCategory, Severity};

/// Remediation actions that can be applied to data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FixType {
    DropColumn,
    DropDuplicates,
    Impute,
    Encode,
    Scale,
    Transform,
    ClipOutliers,
    CastType,
}

impl FixType {
    pub fn as_str(self) -> &'static str {
        match self {
            FixType::DropColumn => "drop_column",
            FixType::DropDuplicates => "drop_duplicates",
            FixType::Impute => "impute",
            FixType::Encode => "encode",
            FixType::Scale => "scale",
            FixType::Transform => "transform",
            FixType::ClipOutliers => "clip_outliers",
            FixType::CastType => "cast_type",
        }
    }
}

impl fmt::Display for FixType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Imputation strategies. String values match the sklearn vocabulary used
/// by the code generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImputeMethod {
    Mean,
    Median,
    Mode,
    Constant,
    Knn,
}

impl ImputeMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            ImputeMethod::Mean => "mean",
            ImputeMethod::Median => "median",
            ImputeMethod::Mode => "most_frequent",
            ImputeMethod::Constant => "constant",
            ImputeMethod::Knn => "knn",
        }
    }
}

/// Encoding strategies for categorical variables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncodeMethod {
    OneHot,
    Label,
    Ordinal,
    Frequency,
}

impl EncodeMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            EncodeMethod::OneHot => "onehot",
            EncodeMethod::Label => "label",
            EncodeMethod::Ordinal => "ordinal",
            EncodeMethod::Frequency => "frequency",
        }
    }
}

/// Scaling strategies for numeric variables.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScaleMethod {
    Standard,
    MinMax,
    Robust,
    MaxAbs,
}

impl ScaleMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            ScaleMethod::Standard => "standard",
            ScaleMethod::MinMax => "minmax",
            ScaleMethod::Robust => "robust",
            ScaleMethod::MaxAbs => "maxabs",
        }
    }
}

/// Transformations for skewed distributions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransformMethod {
    Log,
    Log1p,
    Sqrt,
    BoxCox,
    YeoJohnson,
}

impl TransformMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            TransformMethod::Log => "log",
            TransformMethod::Log1p => "log1p",
            TransformMethod::Sqrt => "sqrt",
            TransformMethod::BoxCox => "boxcox",
            TransformMethod::YeoJohnson => "yeojohnson",
        }
    }
}

/// A structured, actionable remediation derived from one issue.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FixSuggestion {
    pub fix_type: FixType,
    /// Target columns. Never empty; enforced at construction.
    pub columns: Vec<String>,
    /// Method within the fix type (e.g. "median", "onehot").
    #[serde(skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,
    /// Extra strategy parameters (e.g. clip_method, keep).
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub parameters: BTreeMap<String, serde_json::Value>,
    /// Lower runs earlier in the generated script.
    pub priority: i32,
    pub reason: String,
    /// Category of the issue this suggestion was derived from.
    pub source_category: IssueCategory,
    /// Severity of the source issue; used for stable ordering ties.
    pub source_severity: Severity,
}

impl FixSuggestion {
    /// Create a suggestion for an issue. Fails if `columns` is empty, which
    /// indicates a registry bug rather than a data problem.
    pub fn new(fix_type: FixType, columns: Vec<String>, source: &Issue) -> Result<Self> {
        if columns.is_empty() {
            return Err(ModelError::EmptyColumnList {
                fix_type: fix_type.as_str().to_string(),
            });
        }
        Ok(Self {
            fix_type,
            columns,
            method: None,
            parameters: BTreeMap::new(),
            priority: 0,
            reason: String::new(),
            source_category: source.category,
            source_severity: source.severity,
        })
    }

    pub fn with_method(mut self, method: impl Into<String>) -> Self {
        self.method = Some(method.into());
        self
    }

    pub fn with_parameter(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.parameters.insert(key.into(), value);
        self
    }

    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = reason.into();
        self
    }

    /// Sorted column set used to deduplicate suggestions that target the
    /// same columns.
    pub fn column_key(&self) -> Vec<String> {
        let mut key = self.columns.clone();
        key.sort();
        key
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::issue::ImpactScore;

    fn dummy_issue() -> Issue {
        Issue {
            category: IssueCategory::HighMissingValues,
            severity: Severity::Warning,
            column: "age".to_string(),
            description: "test".to_string(),
            impact: ImpactScore::Medium,
            quick_fix: String::new(),
            metric: Some(45.0),
            metric_name: Some("missing_pct".to_string()),
        }
    }

    #[test]
    fn empty_column_list_is_rejected() {
        let err = FixSuggestion::new(FixType::DropColumn, vec![], &dummy_issue()).unwrap_err();
        assert!(matches!(err, ModelError::EmptyColumnList { .. }));
    }

    #[test]
    fn builder_carries_source_metadata() {
        let suggestion = FixSuggestion::new(
            FixType::Impute,
            vec!["age".to_string()],
            &dummy_issue(),
        )
        .unwrap()
        .with_method(ImputeMethod::Median.as_str())
        .with_priority(1)
        .with_reason("impute age");

        assert_eq!(suggestion.source_category, IssueCategory::HighMissingValues);
        assert_eq!(suggestion.source_severity, Severity::Warning);
        assert_eq!(suggestion.method.as_deref(), Some("median"));
        assert_eq!(suggestion.priority, 1);
    }

    #[test]
    fn column_key_is_sorted() {
        let suggestion = FixSuggestion::new(
            FixType::DropColumn,
            vec!["b".to_string(), "a".to_string()],
            &dummy_issue(),
        )
        .unwrap();
        assert_eq!(suggestion.column_key(), vec!["a", "b"]);
    }
}
