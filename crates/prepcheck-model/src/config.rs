//! Threshold configuration for every check family.
//!
//! All tuning knobs live here: one place to discover them, one immutable
//! value passed explicitly into every check and suggestion call. The
//! defaults are empirically chosen and domain-tunable, not algorithmic
//! invariants. For every warning/critical pair the critical level is
//! strictly more extreme than the warning level.

use serde::{Deserialize, Serialize};

/// Thresholds for missing-value detection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MissingValueThresholds {
    /// Per-column missing ratio above which a warning is raised.
    pub warning: f64,
    /// Per-column missing ratio above which the issue is critical.
    pub critical: f64,
    /// Dataset-wide missing-cell percentage for a warning.
    pub dataset_warning_pct: f64,
    /// Dataset-wide missing-cell percentage for a critical issue.
    pub dataset_critical_pct: f64,
    /// Significance level for missing-pattern association tests.
    pub pattern_p_value: f64,
    /// Stricter level that can escalate a pattern to critical.
    pub pattern_critical_p_value: f64,
    /// Minimum Cramér's V for a categorical pattern to count.
    pub pattern_cramers_v_min: f64,
    /// Minimum |Cohen's d| for a numeric pattern to count.
    pub pattern_cohens_d_min: f64,
    /// Minimum missing values in a column before patterns are tested.
    pub pattern_min_missing_count: usize,
    /// Minimum group size for the two-group comparison.
    pub pattern_min_group_size: usize,
    /// Categories rarer than this are collapsed into "Other".
    pub pattern_rare_category_count: usize,
    /// How many correlated columns to report per missing column.
    pub pattern_top_correlations: usize,
}

impl Default for MissingValueThresholds {
    fn default() -> Self {
        Self {
            warning: 0.4,
            critical: 0.7,
            dataset_warning_pct: 20.0,
            dataset_critical_pct: 50.0,
            pattern_p_value: 0.01,
            pattern_critical_p_value: 0.001,
            pattern_cramers_v_min: 0.1,
            pattern_cohens_d_min: 0.2,
            pattern_min_missing_count: 10,
            pattern_min_group_size: 10,
            pattern_rare_category_count: 5,
            pattern_top_correlations: 3,
        }
    }
}

/// Thresholds for outlier and shape checks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutlierThresholds {
    /// |z-score| (population std) above which a value is an outlier.
    pub z_score: f64,
    /// Outlier ratio above which the issue is critical.
    pub ratio_critical: f64,
    pub zero_count_warning: f64,
    pub zero_count_critical: f64,
    pub text_length_max: usize,
    pub text_length_min: usize,
    pub extreme_ratio_critical: f64,
    pub skewness_warning: f64,
    pub skewness_critical: f64,
    /// Fraction of values in a single year that flags datetime skew.
    pub datetime_skew: f64,
    pub infinite_ratio_critical: f64,
    /// Share of the most common string length that flags constant length.
    pub constant_length_ratio: f64,
    /// Minimum non-missing sample size for shape statistics.
    pub min_sample_size: usize,
}

impl Default for OutlierThresholds {
    fn default() -> Self {
        Self {
            z_score: 4.0,
            ratio_critical: 0.1,
            zero_count_warning: 0.5,
            zero_count_critical: 0.8,
            text_length_max: 1000,
            text_length_min: 1,
            extreme_ratio_critical: 0.1,
            skewness_warning: 3.0,
            skewness_critical: 10.0,
            datetime_skew: 0.8,
            infinite_ratio_critical: 0.01,
            constant_length_ratio: 0.95,
            min_sample_size: 10,
        }
    }
}

/// Thresholds for column-level structure checks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnThresholds {
    /// Distinct-count above which a column is high-cardinality.
    pub high_cardinality_count: usize,
    /// Distinct/row ratio that escalates high cardinality to critical.
    pub high_cardinality_ratio_critical: f64,
    /// Duplicate-row ratio that escalates duplicates to critical.
    pub duplicate_ratio_critical: f64,
}

impl Default for ColumnThresholds {
    fn default() -> Self {
        Self {
            high_cardinality_count: 100,
            high_cardinality_ratio_critical: 0.9,
            duplicate_ratio_critical: 0.1,
        }
    }
}

/// Per-coefficient warning/critical pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CorrelationPair {
    pub warning: f64,
    pub critical: f64,
}

/// Thresholds for the pairwise interaction engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorrelationThresholds {
    pub pearson: CorrelationPair,
    pub spearman: CorrelationPair,
    pub kendall: CorrelationPair,
    /// Cramér's V thresholds for categorical pairs.
    pub categorical: CorrelationPair,
    /// Correlation-ratio (eta) thresholds for categorical-numeric pairs.
    pub mixed: CorrelationPair,
    /// Categorical columns with more distinct values than this are skipped.
    pub max_distinct_categories: usize,
}

impl Default for CorrelationThresholds {
    fn default() -> Self {
        Self {
            pearson: CorrelationPair {
                warning: 0.7,
                critical: 0.95,
            },
            spearman: CorrelationPair {
                warning: 0.7,
                critical: 0.95,
            },
            kendall: CorrelationPair {
                warning: 0.6,
                critical: 0.85,
            },
            categorical: CorrelationPair {
                warning: 0.5,
                critical: 0.8,
            },
            mixed: CorrelationPair {
                warning: 0.5,
                critical: 0.8,
            },
            max_distinct_categories: 50,
        }
    }
}

/// Thresholds for target-leakage detection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeakageThresholds {
    pub numeric_warning: f64,
    pub numeric_critical: f64,
    pub categorical_warning: f64,
    pub categorical_critical: f64,
    pub f_stat_warning: f64,
    pub f_stat_critical: f64,
    pub f_stat_p_value: f64,
}

impl Default for LeakageThresholds {
    fn default() -> Self {
        Self {
            numeric_warning: 0.95,
            numeric_critical: 0.98,
            categorical_warning: 0.8,
            categorical_critical: 0.95,
            f_stat_warning: 10.0,
            f_stat_critical: 20.0,
            f_stat_p_value: 0.001,
        }
    }
}

/// Thresholds for dataset-drift detection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DriftThresholds {
    pub p_value: f64,
    pub critical_p_value: f64,
    /// Combined category count above which the chi-square test is skipped.
    pub max_categories_for_chi2: usize,
    /// How many unseen categories to list in the issue description.
    pub max_new_category_samples: usize,
}

impl Default for DriftThresholds {
    fn default() -> Self {
        Self {
            p_value: 0.05,
            critical_p_value: 0.001,
            max_categories_for_chi2: 50,
            max_new_category_samples: 5,
        }
    }
}

/// Thresholds for distribution-shape checks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistributionThresholds {
    /// KS p-value above which a column counts as uniform.
    pub uniform_p_value: f64,
    pub uniform_min_samples: usize,
    pub unique_value_ratio: f64,
    pub unique_min_samples: usize,
}

impl Default for DistributionThresholds {
    fn default() -> Self {
        Self {
            uniform_p_value: 0.1,
            uniform_min_samples: 20,
            unique_value_ratio: 0.95,
            unique_min_samples: 10,
        }
    }
}

/// Thresholds for class-imbalance detection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImbalanceThresholds {
    pub majority_class_ratio: f64,
}

impl Default for ImbalanceThresholds {
    fn default() -> Self {
        Self {
            majority_class_ratio: 0.9,
        }
    }
}

/// Knobs for semantic type inference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeInferenceConfig {
    /// Max distinct values for a string column to count as categorical.
    pub cat_cardinality_threshold: usize,
    /// Max distinct/non-null ratio for a string column to be categorical.
    pub cat_percentage_threshold: f64,
    /// Numeric columns with at most this many distinct values are treated
    /// as categorical codes.
    pub num_low_cat_threshold: usize,
}

impl Default for TypeInferenceConfig {
    fn default() -> Self {
        Self {
            cat_cardinality_threshold: 50,
            cat_percentage_threshold: 0.05,
            num_low_cat_threshold: 10,
        }
    }
}

/// Root configuration aggregating every threshold group.
///
/// A single default instance covers most runs; callers override per analysis
/// by constructing a modified value, never by mutating shared state.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ThresholdConfig {
    pub missing: MissingValueThresholds,
    pub outliers: OutlierThresholds,
    pub columns: ColumnThresholds,
    pub correlations: CorrelationThresholds,
    pub leakage: LeakageThresholds,
    pub drift: DriftThresholds,
    pub distribution: DistributionThresholds,
    pub imbalance: ImbalanceThresholds,
    pub type_inference: TypeInferenceConfig,
}
