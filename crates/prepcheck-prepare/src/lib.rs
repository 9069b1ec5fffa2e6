//! Fix suggestion and code generation.
//!
//! Turns the issues from an analysis run into structured
//! [`FixSuggestion`]s, then renders them as an imperative pandas cleaning
//! script or a declarative sklearn pipeline.

mod codegen;
mod pipeline;
pub mod registry;
pub mod strategies;

use prepcheck_model::{AnalysisResult, FixSuggestion, Issue, Result};
use tracing::debug;

pub use codegen::generate_fix_script;
pub use pipeline::generate_pipeline_script;

/// Derive deduplicated, priority-ordered fix suggestions from an analysis
/// result.
///
/// Issues are visited critical-first so that when several issues target
/// the same columns, the most severe finding decides the fix. One
/// suggestion survives per distinct column set; output order is priority,
/// then severity, then first column name, and is fully deterministic.
pub fn suggest_fixes(result: &AnalysisResult) -> Result<Vec<FixSuggestion>> {
    let mut issues: Vec<&Issue> = result.issues.iter().collect();
    issues.sort_by(|a, b| {
        a.severity
            .cmp(&b.severity)
            .then_with(|| a.column.cmp(&b.column))
    });

    let mut suggestions: Vec<FixSuggestion> = Vec::new();
    let mut seen: Vec<Vec<String>> = Vec::new();
    for issue in issues {
        for suggestion in registry::suggest_for_issue(issue, &result.column_types)? {
            let key = suggestion.column_key();
            if seen.contains(&key) {
                debug!(
                    category = %issue.category,
                    columns = ?key,
                    "suggestion dropped, columns already covered"
                );
                continue;
            }
            seen.push(key);
            suggestions.push(suggestion);
        }
    }

    suggestions.sort_by(|a, b| {
        a.priority
            .cmp(&b.priority)
            .then_with(|| a.source_severity.cmp(&b.source_severity))
            .then_with(|| a.columns.first().cmp(&b.columns.first()))
    });
    Ok(suggestions)
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use prepcheck_model::{ColumnTypeMap, FixType, Issue, IssueCategory, SemanticType, Severity};

    use super::*;

    fn issue(category: IssueCategory, severity: Severity, column: &str, metric: f64) -> Issue {
        Issue {
            category,
            severity,
            column: column.to_string(),
            description: String::new(),
            impact: Issue::impact_for(severity),
            quick_fix: String::new(),
            metric: Some(metric),
            metric_name: None,
        }
    }

    fn result_with(issues: Vec<Issue>, column_types: ColumnTypeMap) -> AnalysisResult {
        AnalysisResult::from_issues(
            issues,
            BTreeMap::new(),
            column_types,
            String::new(),
            Vec::new(),
        )
    }

    #[test]
    fn critical_missing_column_is_dropped_not_imputed() {
        let mut types = ColumnTypeMap::new();
        types.insert("age".to_string(), SemanticType::Numeric);
        let result = result_with(
            vec![issue(
                IssueCategory::HighMissingValues,
                Severity::Critical,
                "age",
                82.0,
            )],
            types,
        );
        let fixes = suggest_fixes(&result).unwrap();
        assert_eq!(fixes.len(), 1);
        assert_eq!(fixes[0].fix_type, FixType::DropColumn);
        assert_eq!(fixes[0].priority, 0);
    }

    #[test]
    fn warning_missing_numeric_column_gets_median_impute() {
        let mut types = ColumnTypeMap::new();
        types.insert("age".to_string(), SemanticType::Numeric);
        let result = result_with(
            vec![issue(
                IssueCategory::HighMissingValues,
                Severity::Warning,
                "age",
                45.0,
            )],
            types,
        );
        let fixes = suggest_fixes(&result).unwrap();
        assert_eq!(fixes[0].fix_type, FixType::Impute);
        assert_eq!(fixes[0].method.as_deref(), Some("median"));
    }

    #[test]
    fn critical_finding_wins_over_warning_on_same_column() {
        let mut types = ColumnTypeMap::new();
        types.insert("salary".to_string(), SemanticType::Numeric);
        let result = result_with(
            vec![
                issue(IssueCategory::Outliers, Severity::Warning, "salary", 0.05),
                issue(
                    IssueCategory::HighMissingValues,
                    Severity::Critical,
                    "salary",
                    90.0,
                ),
            ],
            types,
        );
        let fixes = suggest_fixes(&result).unwrap();
        assert_eq!(fixes.len(), 1);
        assert_eq!(fixes[0].fix_type, FixType::DropColumn);
    }

    #[test]
    fn output_is_priority_ordered() {
        let mut types = ColumnTypeMap::new();
        types.insert("a".to_string(), SemanticType::Numeric);
        types.insert("b".to_string(), SemanticType::Numeric);
        types.insert("c".to_string(), SemanticType::Text);
        let result = result_with(
            vec![
                issue(IssueCategory::Skewness, Severity::Warning, "a", 5.0),
                issue(IssueCategory::HighCardinality, Severity::Warning, "c", 200.0),
                issue(IssueCategory::EmptyColumn, Severity::Critical, "b", 100.0),
            ],
            types,
        );
        let fixes = suggest_fixes(&result).unwrap();
        let priorities: Vec<i32> = fixes.iter().map(|f| f.priority).collect();
        let mut sorted = priorities.clone();
        sorted.sort_unstable();
        assert_eq!(priorities, sorted);
        assert_eq!(fixes[0].fix_type, FixType::DropColumn);
    }

    #[test]
    fn imbalance_is_advisory_only() {
        let result = result_with(
            vec![issue(
                IssueCategory::ClassImbalance,
                Severity::Warning,
                "label",
                0.93,
            )],
            ColumnTypeMap::new(),
        );
        assert!(suggest_fixes(&result).unwrap().is_empty());
    }
}
