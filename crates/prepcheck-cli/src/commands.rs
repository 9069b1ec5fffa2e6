//! Command implementations.

use std::fs;
use std::path::Path;

use anyhow::Context;
use polars::prelude::{CsvReadOptions, DataFrame, SerReader};
use prepcheck_analyze::Analyzer;
use prepcheck_model::{AnalysisResult, CheckKind, FixSuggestion};
use prepcheck_prepare::{generate_fix_script, generate_pipeline_script, suggest_fixes};
use tracing::info;

use crate::cli::AnalyzeArgs;

pub struct AnalyzeOutcome {
    pub result: AnalysisResult,
    pub suggestions: Vec<FixSuggestion>,
}

pub fn run_analyze(args: &AnalyzeArgs) -> anyhow::Result<AnalyzeOutcome> {
    let df = read_csv(&args.data)?;
    info!(
        path = %args.data.display(),
        rows = df.height(),
        columns = df.width(),
        "dataset loaded"
    );
    let comparison = args.compare.as_deref().map(read_csv).transpose()?;

    let mut analyzer = Analyzer::new(&df);
    if let Some(target) = &args.target {
        anyhow::ensure!(
            df.column(target).is_ok(),
            "target column '{target}' not found in {}",
            args.data.display()
        );
        analyzer = analyzer.with_target(target);
    }
    if let Some(comparison) = &comparison {
        analyzer = analyzer.with_comparison(comparison);
    }
    if let Some(checks) = &args.checks {
        analyzer = analyzer.with_checks(checks.iter().cloned());
    }
    let result = analyzer.run();
    for name in &result.skipped_checks {
        eprintln!("warning: unknown check '{name}' was ignored");
    }

    let suggestions = suggest_fixes(&result)?;

    if let Some(path) = &args.json {
        let json = serde_json::to_string_pretty(&result)?;
        fs::write(path, json).with_context(|| format!("writing {}", path.display()))?;
        info!(path = %path.display(), "analysis JSON written");
    }
    if let Some(path) = &args.fix_script {
        fs::write(path, generate_fix_script(&suggestions))
            .with_context(|| format!("writing {}", path.display()))?;
        info!(path = %path.display(), "fix script written");
    }
    if let Some(path) = &args.pipeline_script {
        fs::write(path, generate_pipeline_script(&suggestions))
            .with_context(|| format!("writing {}", path.display()))?;
        info!(path = %path.display(), "pipeline script written");
    }

    Ok(AnalyzeOutcome {
        result,
        suggestions,
    })
}

pub fn run_checks_list() {
    for kind in CheckKind::ALL {
        println!("{kind}");
    }
}

fn read_csv(path: &Path) -> anyhow::Result<DataFrame> {
    CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(100))
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .with_context(|| format!("opening {}", path.display()))?
        .finish()
        .with_context(|| format!("parsing {}", path.display()))
}
