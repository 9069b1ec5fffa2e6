//! Property tests over the suggestion pipeline.

use std::collections::BTreeMap;

use prepcheck_model::{
    AnalysisResult, ColumnTypeMap, Issue, IssueCategory, SemanticType, Severity,
};
use prepcheck_prepare::suggest_fixes;
use proptest::prelude::*;

fn arb_category() -> impl Strategy<Value = IssueCategory> {
    prop_oneof![
        Just(IssueCategory::HighMissingValues),
        Just(IssueCategory::EmptyColumn),
        Just(IssueCategory::SingleValue),
        Just(IssueCategory::HighCardinality),
        Just(IssueCategory::Outliers),
        Just(IssueCategory::Skewness),
        Just(IssueCategory::FeatureCorrelation),
        Just(IssueCategory::InfiniteValues),
        Just(IssueCategory::UniqueValues),
        Just(IssueCategory::Duplicates),
    ]
}

fn arb_issue() -> impl Strategy<Value = Issue> {
    (
        arb_category(),
        prop::bool::ANY,
        prop::sample::select(vec!["age", "income", "city", "score", "flag"]),
        0.0f64..100.0,
    )
        .prop_map(|(category, critical, column, metric)| {
            let severity = if critical {
                Severity::Critical
            } else {
                Severity::Warning
            };
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
        })
}

fn result_with(issues: Vec<Issue>) -> AnalysisResult {
    let mut types = ColumnTypeMap::new();
    for name in ["age", "income", "score"] {
        types.insert(name.to_string(), SemanticType::Numeric);
    }
    types.insert("city".to_string(), SemanticType::Text);
    types.insert("flag".to_string(), SemanticType::Boolean);
    AnalysisResult::from_issues(issues, BTreeMap::new(), types, String::new(), Vec::new())
}

proptest! {
    /// No two surviving suggestions may target the same column set.
    #[test]
    fn suggestions_are_deduplicated(issues in prop::collection::vec(arb_issue(), 0..20)) {
        let fixes = suggest_fixes(&result_with(issues)).unwrap();
        let mut keys: Vec<Vec<String>> = fixes.iter().map(|f| f.column_key()).collect();
        let before = keys.len();
        keys.sort();
        keys.dedup();
        prop_assert_eq!(before, keys.len());
    }

    /// Output order is priority-ascending, and every suggestion carries at
    /// least one column.
    #[test]
    fn suggestions_are_ordered_and_well_formed(
        issues in prop::collection::vec(arb_issue(), 0..20),
    ) {
        let fixes = suggest_fixes(&result_with(issues)).unwrap();
        for window in fixes.windows(2) {
            prop_assert!(window[0].priority <= window[1].priority);
        }
        for fix in &fixes {
            prop_assert!(!fix.columns.is_empty());
        }
    }

    /// Same issues in, same suggestions out.
    #[test]
    fn suggestion_derivation_is_deterministic(
        issues in prop::collection::vec(arb_issue(), 0..20),
    ) {
        let a = suggest_fixes(&result_with(issues.clone())).unwrap();
        let b = suggest_fixes(&result_with(issues)).unwrap();
        prop_assert_eq!(
            serde_json::to_string(&a).unwrap(),
            serde_json::to_string(&b).unwrap()
        );
    }
}
