//! End-to-end scenarios over the analysis engine.

use polars::prelude::{DataFrame, df};
use prepcheck_analyze::Analyzer;
use prepcheck_model::{IssueCategory, SemanticType, Severity};

#[test]
fn identical_target_copy_is_critical_leakage() {
    let values: Vec<i64> = (0..50).collect();
    let frame = df![
        "price" => values.clone(),
        "shadow" => values,
    ]
    .unwrap();
    let result = Analyzer::new(&frame).with_target("price").run();

    let leaks: Vec<_> = result
        .issues
        .iter()
        .filter(|i| i.category == IssueCategory::DataLeakage)
        .collect();
    assert_eq!(leaks.len(), 1, "exactly one identical-copy finding");
    assert_eq!(leaks[0].column, "shadow");
    assert_eq!(leaks[0].severity, Severity::Critical);
    assert_eq!(leaks[0].metric_name.as_deref(), Some("match_pct"));

    // The statistical association fires as well, at r = 1.
    let pattern = result
        .issues
        .iter()
        .find(|i| i.category == IssueCategory::TargetLeakage && i.column == "shadow")
        .expect("perfect correlation must be flagged");
    assert_eq!(pattern.severity, Severity::Critical);
    assert!((pattern.metric.unwrap() - 1.0).abs() < 1e-9);
}

#[test]
fn extreme_cluster_yields_outlier_warning() {
    // 95 zeros and five values at 1000: five points beyond four population
    // standard deviations, an outlier ratio of 0.05.
    let mut values = vec![0.0f64; 95];
    values.extend([1000.0; 5]);
    let frame = df!["amount" => values].unwrap();
    let result = Analyzer::new(&frame).run();

    let outliers = result
        .issues
        .iter()
        .find(|i| i.category == IssueCategory::Outliers)
        .expect("outlier cluster must be flagged");
    assert_eq!(outliers.severity, Severity::Warning);
    assert!((outliers.metric.unwrap() - 0.05).abs() < 1e-9);

    // The same column is almost all zeros, which is its own finding.
    let zeros = result
        .issues
        .iter()
        .find(|i| i.category == IssueCategory::HighZeroCounts)
        .expect("95% zeros must be flagged");
    assert_eq!(zeros.severity, Severity::Critical);
}

#[test]
fn empty_dataset_yields_exactly_one_critical_issue() {
    let frame = DataFrame::empty();
    let result = Analyzer::new(&frame).run();

    assert_eq!(result.total_issues, 1);
    assert_eq!(result.issues[0].category, IssueCategory::EmptyDataset);
    assert_eq!(result.issues[0].severity, Severity::Critical);

    let no_rows = df!["x" => Vec::<i64>::new()].unwrap();
    let result = Analyzer::new(&no_rows).run();
    assert_eq!(result.total_issues, 1);
    assert_eq!(result.issues[0].category, IssueCategory::EmptyDataset);
}

#[test]
fn large_mean_shift_is_critical_drift() {
    let primary: Vec<f64> = (0..100).map(|i| i as f64 / 10.0).collect();
    let shifted: Vec<f64> = primary.iter().map(|v| v + 10_000.0).collect();
    let a = df!["reading" => primary].unwrap();
    let b = df!["reading" => shifted].unwrap();

    let result = Analyzer::new(&a).with_comparison(&b).run();
    let drift = result
        .issues
        .iter()
        .find(|i| i.category == IssueCategory::DatasetDrift)
        .expect("disjoint distributions must be flagged as drift");
    assert_eq!(drift.severity, Severity::Critical);
}

#[test]
fn all_unique_string_column_is_critical_cardinality() {
    let ids: Vec<String> = (0..150).map(|i| format!("u{i}")).collect();
    let frame = df!["user" => ids].unwrap();
    let result = Analyzer::new(&frame).run();

    assert_eq!(result.column_types["user"], SemanticType::Text);
    let cardinality = result
        .issues
        .iter()
        .find(|i| i.category == IssueCategory::HighCardinality)
        .expect("fully unique column must be flagged");
    assert_eq!(cardinality.severity, Severity::Critical);
}

#[test]
fn severity_counts_partition_the_issue_list() {
    let mut values = vec![0.0f64; 95];
    values.extend([1000.0; 5]);
    let ids: Vec<String> = (0..100).map(|i| format!("row-{i}")).collect();
    let frame = df!["amount" => values, "id" => ids].unwrap();
    let result = Analyzer::new(&frame).run();

    assert!(result.total_issues > 0);
    assert_eq!(
        result.critical_count + result.warning_count,
        result.total_issues
    );
    assert_eq!(result.total_issues, result.issues.len());
    for issue in &result.issues {
        match issue.severity {
            Severity::Critical => assert!(result.critical_count > 0),
            Severity::Warning => assert!(result.warning_count > 0),
        }
    }
}

#[test]
fn analysis_is_deterministic() {
    let mut values = vec![0.0f64; 95];
    values.extend([1000.0; 5]);
    let labels: Vec<&str> = ["a", "b"].iter().cycle().take(100).copied().collect();
    let frame = df!["amount" => values, "label" => labels].unwrap();

    let first = Analyzer::new(&frame).with_target("label").run();
    let second = Analyzer::new(&frame).with_target("label").run();

    assert_eq!(first.dataset_hash, second.dataset_hash);
    assert_eq!(first.total_issues, second.total_issues);
    let a = serde_json::to_string(&first.issues).unwrap();
    let b = serde_json::to_string(&second.issues).unwrap();
    assert_eq!(a, b);
}

#[test]
fn all_missing_rows_count_as_empty_dataset() {
    let frame = df![
        "a" => [None::<i64>, None, None],
        "b" => [None::<&str>, None, None],
    ]
    .unwrap();
    let result = Analyzer::new(&frame).run();

    assert_eq!(result.total_issues, 1);
    assert_eq!(result.issues[0].category, IssueCategory::EmptyDataset);
    assert_eq!(result.issues[0].severity, Severity::Critical);
}

#[test]
fn check_selection_is_a_strict_filter() {
    // An explicit selection runs only the named checks, even on a frame
    // that would otherwise report itself as empty.
    let frame = DataFrame::empty();
    let result = Analyzer::new(&frame).with_checks(["duplicates"]).run();
    assert_eq!(result.total_issues, 0);
}

#[test]
fn missingness_tracking_another_column_is_a_pattern() {
    let mut income: Vec<Option<f64>> = Vec::new();
    let mut age: Vec<f64> = Vec::new();
    for i in 0..40 {
        if i < 15 {
            income.push(None);
            age.push(100.0 + f64::from(i) * 0.1);
        } else {
            income.push(Some(50.0 + f64::from(i)));
            age.push(f64::from(i) * 0.1);
        }
    }
    let frame = df!["income" => income, "age" => age].unwrap();

    let result = Analyzer::new(&frame).run();
    let pattern = result
        .issues
        .iter()
        .find(|i| i.category == IssueCategory::MissingPatterns && i.column == "income")
        .expect("missingness tied to age must be flagged");
    assert_eq!(pattern.severity, Severity::Warning);
    assert!(pattern.description.contains("age"));

    // The same pattern escalates only when the correlated column is the
    // declared target.
    let result = Analyzer::new(&frame).with_target("age").run();
    let pattern = result
        .issues
        .iter()
        .find(|i| i.category == IssueCategory::MissingPatterns && i.column == "income")
        .expect("pattern must still be flagged with a target set");
    assert_eq!(pattern.severity, Severity::Critical);
}

#[test]
fn numeric_strings_with_text_minority_are_mixed_types() {
    let mut values: Vec<String> = (0..18).map(|i| i.to_string()).collect();
    values.push("pending".to_string());
    values.push("backlog".to_string());
    let frame = df!["quantity" => values].unwrap();
    let result = Analyzer::new(&frame).run();

    let mixed = result
        .issues
        .iter()
        .find(|i| i.category == IssueCategory::MixedDataTypes)
        .expect("numeric/text mixture must be flagged");
    assert_eq!(mixed.severity, Severity::Warning);
    assert!((mixed.metric.unwrap() - 0.9).abs() < 1e-9);
}

#[test]
fn single_year_concentration_is_datetime_skew() {
    let mut dates: Vec<String> = (1..=18).map(|d| format!("2021-05-{d:02}")).collect();
    dates.push("2019-11-03".to_string());
    dates.push("2018-07-21".to_string());
    let frame = df!["observed" => dates].unwrap();
    let result = Analyzer::new(&frame).run();

    assert_eq!(result.column_types["observed"], SemanticType::DateTime);
    let skew = result
        .issues
        .iter()
        .find(|i| i.category == IssueCategory::DatetimeSkew)
        .expect("90% of dates in one year must be flagged");
    assert_eq!(skew.severity, Severity::Warning);
    assert!((skew.metric.unwrap() - 0.9).abs() < 1e-9);
}

#[test]
fn unseen_comparison_categories_are_drift() {
    let primary: Vec<&str> = ["north", "south"].iter().cycle().take(30).copied().collect();
    let mut comparison = vec!["north"; 10];
    comparison.extend(vec!["south"; 10]);
    comparison.extend(vec!["west"; 10]);
    let a = df!["city" => primary].unwrap();
    let b = df!["city" => comparison].unwrap();

    let result = Analyzer::new(&a).with_comparison(&b).run();
    let unseen = result
        .issues
        .iter()
        .find(|i| {
            i.category == IssueCategory::DatasetDrift
                && i.metric_name.as_deref() == Some("new_categories")
        })
        .expect("a category absent from the primary frame must be flagged");
    assert_eq!(unseen.severity, Severity::Warning);
    assert!(unseen.description.contains("west"));
    assert!((unseen.metric.unwrap() - 1.0).abs() < 1e-9);
}

#[test]
fn counter_and_uniform_columns_are_flagged() {
    let seq: Vec<f64> = (0..40).map(f64::from).collect();
    let scrambled: Vec<f64> = (0..40).map(|i| f64::from((i * 17) % 40)).collect();
    let frame = df!["seq" => seq, "scrambled" => scrambled].unwrap();
    let result = Analyzer::new(&frame).run();

    let monotonic = result
        .issues
        .iter()
        .find(|i| i.category == IssueCategory::UniformDistribution && i.column == "seq")
        .expect("a counter column must be flagged");
    assert_eq!(monotonic.metric_name.as_deref(), Some("monotonic"));

    let uniform = result
        .issues
        .iter()
        .find(|i| i.category == IssueCategory::UniformDistribution && i.column == "scrambled")
        .expect("an evenly spread column must be flagged");
    assert_eq!(uniform.metric_name.as_deref(), Some("ks_p_value"));

    let unique = result
        .issues
        .iter()
        .find(|i| i.category == IssueCategory::UniqueValues && i.column == "seq")
        .expect("an all-distinct numeric column must be flagged");
    assert_eq!(unique.severity, Severity::Warning);
}

#[test]
fn fixed_width_strings_are_constant_length() {
    let codes: Vec<String> = (0..20).map(|i| format!("SKU{i:02}")).collect();
    let frame = df!["sku" => codes].unwrap();
    let result = Analyzer::new(&frame).run();

    let constant = result
        .issues
        .iter()
        .find(|i| i.category == IssueCategory::ConstantLength)
        .expect("fixed-width codes must be flagged");
    assert_eq!(constant.severity, Severity::Warning);
}

#[test]
fn blank_strings_count_as_extreme_text_lengths() {
    let mut notes: Vec<String> = (0..17).map(|i| format!("comment number {i}")).collect();
    notes.extend(["", "", ""].map(String::from));
    let frame = df!["notes" => notes].unwrap();
    let result = Analyzer::new(&frame).run();

    let extreme = result
        .issues
        .iter()
        .find(|i| i.category == IssueCategory::ExtremeTextLengths)
        .expect("zero-length strings must be flagged");
    assert_eq!(extreme.severity, Severity::Critical);
    assert!((extreme.metric.unwrap() - 0.15).abs() < 1e-9);
}

#[test]
fn numeric_code_target_takes_the_correlation_path() {
    // A 0/1 label is physically numeric even though two distinct values
    // read as categorical, so it must be tested with Pearson.
    let churn: Vec<i64> = (0..40).map(|i| i % 2).collect();
    let risk: Vec<i64> = churn.iter().map(|c| c * 10).collect();
    let frame = df!["churn" => churn, "risk" => risk].unwrap();

    let result = Analyzer::new(&frame).with_target("churn").run();
    let leak = result
        .issues
        .iter()
        .find(|i| i.category == IssueCategory::TargetLeakage && i.column == "risk")
        .expect("perfectly aligned numeric feature must be flagged");
    assert_eq!(leak.severity, Severity::Critical);
    assert_eq!(leak.metric_name.as_deref(), Some("pearson_r"));
}

#[test]
fn text_features_are_tested_against_string_targets() {
    let status: Vec<&str> = ["ok", "bad"].iter().cycle().take(40).copied().collect();
    let note: Vec<String> = (0..40).map(|i| format!("note-{i}")).collect();
    let frame = df!["status" => status, "note" => note].unwrap();

    let result = Analyzer::new(&frame).with_target("status").run();
    assert_eq!(result.column_types["note"], SemanticType::Text);
    let leak = result
        .issues
        .iter()
        .find(|i| i.category == IssueCategory::TargetLeakage && i.column == "note")
        .expect("a text column separating target levels must be flagged");
    assert_eq!(leak.metric_name.as_deref(), Some("cramers_v"));
}

#[test]
fn unknown_check_names_are_reported_not_fatal() {
    let frame = df!["x" => [1i64, 2, 3]].unwrap();
    let result = Analyzer::new(&frame)
        .with_checks(["outliers", "no_such_check"])
        .run();
    assert_eq!(result.skipped_checks, vec!["no_such_check".to_string()]);
}
