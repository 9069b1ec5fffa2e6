//! Generated-code shape tests.

use prepcheck_model::{
    FixSuggestion, FixType, ImpactScore, Issue, IssueCategory, Severity,
};
use prepcheck_prepare::{generate_fix_script, generate_pipeline_script};
use serde_json::json;

fn source_issue(column: &str) -> Issue {
    Issue {
        category: IssueCategory::HighMissingValues,
        severity: Severity::Warning,
        column: column.to_string(),
        description: String::new(),
        impact: ImpactScore::Medium,
        quick_fix: String::new(),
        metric: None,
        metric_name: None,
    }
}

fn fix(fix_type: FixType, column: &str, method: Option<&str>, priority: i32) -> FixSuggestion {
    let mut fix = FixSuggestion::new(fix_type, vec![column.to_string()], &source_issue(column))
        .unwrap()
        .with_priority(priority)
        .with_reason("test fix");
    if let Some(method) = method {
        fix = fix.with_method(method);
    }
    fix
}

#[test]
fn fix_script_contains_expected_statements() {
    let fixes = vec![
        fix(FixType::DropColumn, "leaky", None, 0),
        fix(FixType::Impute, "age", Some("median"), 1),
        fix(FixType::Encode, "city", Some("frequency"), 2),
        fix(FixType::Transform, "income", Some("log1p"), 4),
    ];
    let script = generate_fix_script(&fixes);

    assert!(script.starts_with("\"\"\"Auto-generated data cleaning script.\"\"\""));
    assert!(script.contains("import pandas as pd"));
    assert!(script.contains("import numpy as np"));
    assert!(script.contains("def apply_fixes(df: pd.DataFrame) -> pd.DataFrame:"));
    assert!(script.contains("df = df.drop(columns=['leaky'], errors='ignore')"));
    assert!(script.contains("df['age'] = df['age'].fillna(df['age'].median())"));
    assert!(script.contains("df['city'].value_counts(normalize=True)"));
    assert!(script.contains("df['income'] = np.log1p(df['income'])"));
    assert!(script.contains("if __name__ == \"__main__\":"));
}

#[test]
fn fix_script_imports_are_deduplicated() {
    let fixes = vec![
        fix(FixType::Transform, "a", Some("log1p"), 4),
        fix(FixType::Transform, "b", Some("sqrt"), 4),
    ];
    let script = generate_fix_script(&fixes);
    assert_eq!(script.matches("import numpy as np").count(), 1);
}

#[test]
fn empty_suggestion_list_generates_identity_script() {
    let script = generate_fix_script(&[]);
    assert!(script.contains("def apply_fixes"));
    assert!(script.contains("    return df"));
}

#[test]
fn pipeline_splits_pre_steps_from_transformers() {
    let duplicates = FixSuggestion::new(
        FixType::DropDuplicates,
        vec![prepcheck_model::DATASET_TARGET.to_string()],
        &source_issue("__all__"),
    )
    .unwrap()
    .with_parameter("keep", json!("first"))
    .with_priority(0);
    let fixes = vec![
        duplicates,
        fix(FixType::ClipOutliers, "salary", Some("iqr"), 3),
        fix(FixType::Impute, "age", Some("median"), 1),
        fix(FixType::Encode, "kind", Some("onehot"), 2),
        fix(FixType::DropColumn, "leaky", None, 0),
    ];
    let script = generate_pipeline_script(&fixes);

    assert!(script.contains("def get_pre_pipeline_steps():"));
    assert!(script.contains(
        "steps.append(('drop_duplicates', lambda df: df.drop_duplicates(keep='first')))"
    ));
    assert!(script.contains("steps.append(('clip_outliers_salary', None))"));
    assert!(script.contains("from sklearn.impute import SimpleImputer"));
    assert!(script.contains("from sklearn.preprocessing import OneHotEncoder"));
    assert!(script.contains("('impute_age', SimpleImputer(strategy='median'), ['age'])"));
    assert!(
        script.contains("('encode_kind', OneHotEncoder(handle_unknown='ignore'), ['kind'])")
    );
    // Column drops belong in the transformer list, not the pre-steps.
    assert!(script.contains("('drop_column_leaky', 'drop', ['leaky'])"));
    assert!(script.contains("remainder='passthrough'"));
}

#[test]
fn pipeline_without_transformers_returns_none() {
    let duplicates = FixSuggestion::new(
        FixType::DropDuplicates,
        vec![prepcheck_model::DATASET_TARGET.to_string()],
        &source_issue("__all__"),
    )
    .unwrap()
    .with_parameter("keep", json!("first"));
    let script = generate_pipeline_script(&[duplicates]);

    assert!(script.contains("def build_preprocessing_pipeline():"));
    assert!(script.contains("    return None"));
    assert!(script.contains("def get_pre_pipeline_steps():"));
    assert!(!script.contains("ColumnTransformer(transformers="));
}

#[test]
fn colliding_step_names_get_numeric_suffixes() {
    let fixes = vec![
        fix(FixType::Impute, "age", Some("median"), 1),
        fix(FixType::Impute, "age", Some("mean"), 1),
    ];
    let script = generate_pipeline_script(&fixes);
    assert!(script.contains("('impute_age',"));
    assert!(script.contains("('impute_age_2',"));
}
