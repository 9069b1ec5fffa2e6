//! Data-quality analysis engine.
//!
//! One [`Analyzer`] call inspects a fully materialized frame and returns a
//! complete [`AnalysisResult`]: inferred column types, severity-graded
//! issues from the check registry and interaction engine, dataset
//! summaries, and a content hash for reproducibility tracking.
//!
//! ```no_run
//! use polars::prelude::df;
//! use prepcheck_analyze::Analyzer;
//!
//! let frame = df!["age" => [34i64, 51, 29], "churned" => ["no", "yes", "no"]].unwrap();
//! let result = Analyzer::new(&frame).with_target("churned").run();
//! for issue in &result.issues {
//!     println!("[{}] {}", issue.severity, issue.description);
//! }
//! ```

pub mod checks;
mod correlate;
mod drift;
mod hash;
mod infer;
mod stats;
mod summaries;

use polars::prelude::DataFrame;
use prepcheck_model::{AnalysisResult, CheckKind, ThresholdConfig};
use tracing::info;

pub use hash::dataset_hash;
pub use infer::infer_column_types;

use checks::CheckContext;

/// Builder for one analysis run over a shared, read-only frame.
pub struct Analyzer<'a> {
    df: &'a DataFrame,
    target: Option<&'a str>,
    comparison: Option<&'a DataFrame>,
    config: ThresholdConfig,
    selected: Option<Vec<String>>,
}

impl<'a> Analyzer<'a> {
    pub fn new(df: &'a DataFrame) -> Self {
        Self {
            df,
            target: None,
            comparison: None,
            config: ThresholdConfig::default(),
            selected: None,
        }
    }

    /// Label column for leakage and imbalance checks.
    #[must_use]
    pub fn with_target(mut self, target: &'a str) -> Self {
        self.target = Some(target);
        self
    }

    /// Reference frame for drift detection.
    #[must_use]
    pub fn with_comparison(mut self, comparison: &'a DataFrame) -> Self {
        self.comparison = Some(comparison);
        self
    }

    #[must_use]
    pub fn with_config(mut self, config: ThresholdConfig) -> Self {
        self.config = config;
        self
    }

    /// Restrict the run to the named checks. The selection is a strict
    /// filter; checks not named never run, `empty_dataset` included.
    /// Unknown names are ignored and reported in
    /// [`AnalysisResult::skipped_checks`], never a fatal error.
    #[must_use]
    pub fn with_checks<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.selected = Some(names.into_iter().map(Into::into).collect());
        self
    }

    pub fn run(self) -> AnalysisResult {
        let (selected, skipped) = self.resolve_checks();
        let column_types = infer::infer_column_types(self.df, &self.config.type_inference);
        let hash = hash::dataset_hash(self.df);

        let ctx = CheckContext {
            df: self.df,
            column_types: &column_types,
            target: self.target,
            comparison: self.comparison,
        };
        let issues = checks::run_checks(&ctx, &self.config, &selected);
        let summaries = summaries::build_summaries(self.df, &column_types);
        info!(
            rows = self.df.height(),
            columns = self.df.width(),
            issues = issues.len(),
            "analysis complete"
        );
        AnalysisResult::from_issues(issues, summaries, column_types, hash, skipped)
    }

    fn resolve_checks(&self) -> (Vec<CheckKind>, Vec<String>) {
        match &self.selected {
            None => (CheckKind::ALL.to_vec(), Vec::new()),
            Some(names) => {
                let mut selected = Vec::new();
                let mut skipped = Vec::new();
                for name in names {
                    match CheckKind::parse(name) {
                        Some(kind) => {
                            if !selected.contains(&kind) {
                                selected.push(kind);
                            }
                        }
                        None => skipped.push(name.clone()),
                    }
                }
                (selected, skipped)
            }
        }
    }
}
