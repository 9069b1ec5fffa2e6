//! Shared data model for prepcheck.
//!
//! Defines the issue and fix-suggestion types produced by the analysis
//! engine, the semantic column types, the closed set of check names, and the
//! threshold configuration that every check receives explicitly.

mod check;
mod config;
mod error;
mod fix;
mod issue;
mod types;

pub use check::CheckKind;
pub use config::{
    ColumnThresholds, CorrelationPair, CorrelationThresholds, DistributionThresholds,
    DriftThresholds, ImbalanceThresholds, LeakageThresholds, MissingValueThresholds,
    OutlierThresholds, ThresholdConfig, TypeInferenceConfig,
};
pub use error::{ModelError, Result};
pub use fix::{EncodeMethod, FixSuggestion, FixType, ImputeMethod, ScaleMethod, TransformMethod};
pub use issue::{AnalysisResult, ImpactScore, Issue, IssueCategory, Severity};
pub use types::{ColumnTypeMap, SemanticType};

/// Column name used for dataset-wide issues.
pub const ALL_COLUMNS: &str = "__all__";

/// Column placeholder used by fixes that operate on whole rows.
pub const DATASET_TARGET: &str = "__dataset__";
