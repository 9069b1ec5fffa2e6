//! Declarative sklearn pipeline generation.
//!
//! Fixes split into two phases: row-level operations with no transformer
//! equivalent (dedup, outlier clipping) are listed as named pre-pipeline
//! steps, and the rest become entries in a `ColumnTransformer`.

use std::collections::{BTreeSet, HashMap};

use prepcheck_model::{FixSuggestion, FixType};

use crate::strategies::{sklearn_import, strategy_for};

/// Renders a pipeline-builder script for the given suggestions.
///
/// The module defines `build_preprocessing_pipeline()`, returning a
/// `Pipeline` or `None` when no fix maps onto a transformer, and
/// `get_pre_pipeline_steps()`, returning `(name, callable)` pairs for the
/// frame-level fixes that must run first.
pub fn generate_pipeline_script(suggestions: &[FixSuggestion]) -> String {
    let mut pre_steps: Vec<&FixSuggestion> = Vec::new();
    let mut transformers: Vec<(String, String, Vec<String>)> = Vec::new();
    let mut names: HashMap<String, usize> = HashMap::new();

    for fix in suggestions {
        if matches!(
            fix.fix_type,
            FixType::DropDuplicates | FixType::ClipOutliers
        ) {
            pre_steps.push(fix);
            continue;
        }
        // Fixes with no transformer form (frequency encoding, casts) stay
        // in the cleaning script.
        if let Some((constructor, columns)) = strategy_for(fix.fix_type).sklearn_transformer(fix) {
            let name = step_name(fix, &mut names);
            transformers.push((name, constructor, columns));
        }
    }

    let mut imports: BTreeSet<&'static str> = BTreeSet::new();
    imports.insert("from sklearn.compose import ColumnTransformer");
    imports.insert("from sklearn.pipeline import Pipeline");
    for (_, constructor, _) in &transformers {
        if let Some(import) = sklearn_import(constructor) {
            imports.insert(import);
        }
        if constructor.contains("np.") {
            imports.insert("import numpy as np");
        }
    }

    let mut out = String::new();
    out.push_str("\"\"\"Auto-generated preprocessing pipeline.\"\"\"\n");
    for import in &imports {
        out.push_str(import);
        out.push('\n');
    }
    out.push('\n');
    out.push('\n');

    out.push_str("def build_preprocessing_pipeline():\n");
    out.push_str("    \"\"\"Column transformers for the suggested fixes, or None.\"\"\"\n");
    if transformers.is_empty() {
        out.push_str("    # No transformations needed\n");
        out.push_str("    return None\n");
    } else {
        out.push_str("    transformers = [\n");
        for (name, constructor, columns) in &transformers {
            let quoted: Vec<String> = columns.iter().map(|c| format!("'{c}'")).collect();
            out.push_str(&format!(
                "        ('{name}', {constructor}, [{}]),\n",
                quoted.join(", ")
            ));
        }
        out.push_str("    ]\n");
        out.push_str("    preprocessor = ColumnTransformer(transformers=transformers, remainder='passthrough')\n");
        out.push_str("    return Pipeline(steps=[('preprocess', preprocessor)])\n");
    }
    out.push('\n');
    out.push('\n');

    out.push_str("def get_pre_pipeline_steps():\n");
    out.push_str(
        "    \"\"\"Frame-level steps to run before the pipeline, as (name, callable) pairs.\"\"\"\n",
    );
    out.push_str("    steps = []\n");
    for fix in &pre_steps {
        if matches!(fix.fix_type, FixType::DropDuplicates) {
            let keep = fix
                .parameters
                .get("keep")
                .and_then(|v| v.as_str())
                .unwrap_or("first");
            out.push_str(&format!(
                "    steps.append(('drop_duplicates', lambda df: df.drop_duplicates(keep='{keep}')))\n"
            ));
        } else {
            let column = fix.columns.first().map(String::as_str).unwrap_or("all");
            out.push_str(&format!(
                "    # Outlier clipping for ['{}']\n",
                fix.columns.join("', '")
            ));
            out.push_str(&format!(
                "    steps.append(('clip_outliers_{}', None))  # implement manually\n",
                sanitize(column)
            ));
        }
    }
    out.push_str("    return steps\n");
    out
}

/// Stable, unique step name: fix type plus first column, with a numeric
/// suffix on collision.
fn step_name(fix: &FixSuggestion, names: &mut HashMap<String, usize>) -> String {
    let base = format!(
        "{}_{}",
        fix.fix_type,
        sanitize(fix.columns.first().map(String::as_str).unwrap_or("all"))
    );
    let count = names.entry(base.clone()).or_insert(0);
    *count += 1;
    if *count == 1 {
        base
    } else {
        format!("{base}_{count}")
    }
}

fn sanitize(name: &str) -> String {
    name.chars()
        .map(|c| if c.is_ascii_alphanumeric() { c.to_ascii_lowercase() } else { '_' })
        .collect()
}
