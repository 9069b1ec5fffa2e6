use std::fmt;

use serde::{Deserialize, Serialize};

/// Closed, versioned set of check names the analyzer accepts.
///
/// Selection happens by name; names outside this set are ignored (never a
/// fatal error) and reported back to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckKind {
    EmptyDataset,
    DataLeakage,
    HighMissingValues,
    EmptyColumns,
    SingleValueColumns,
    TargetLeakagePatterns,
    ClassImbalance,
    HighCardinality,
    Duplicates,
    MixedDataTypes,
    Outliers,
    FeatureCorrelation,
    CategoricalCorrelation,
    MixedCorrelation,
    DatasetMissingness,
    HighZeroCounts,
    ExtremeTextLengths,
    DatetimeSkew,
    MissingPatterns,
    Skewness,
    DatasetDrift,
    UniformDistribution,
    UniqueValues,
    InfiniteValues,
    ConstantLength,
}

impl CheckKind {
    /// Canonical check list in execution order.
    pub const ALL: [CheckKind; 25] = [
        CheckKind::EmptyDataset,
        CheckKind::DataLeakage,
        CheckKind::HighMissingValues,
        CheckKind::EmptyColumns,
        CheckKind::SingleValueColumns,
        CheckKind::TargetLeakagePatterns,
        CheckKind::ClassImbalance,
        CheckKind::HighCardinality,
        CheckKind::Duplicates,
        CheckKind::MixedDataTypes,
        CheckKind::Outliers,
        CheckKind::FeatureCorrelation,
        CheckKind::CategoricalCorrelation,
        CheckKind::MixedCorrelation,
        CheckKind::DatasetMissingness,
        CheckKind::HighZeroCounts,
        CheckKind::ExtremeTextLengths,
        CheckKind::DatetimeSkew,
        CheckKind::MissingPatterns,
        CheckKind::Skewness,
        CheckKind::DatasetDrift,
        CheckKind::UniformDistribution,
        CheckKind::UniqueValues,
        CheckKind::InfiniteValues,
        CheckKind::ConstantLength,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            CheckKind::EmptyDataset => "empty_dataset",
            CheckKind::DataLeakage => "data_leakage",
            CheckKind::HighMissingValues => "high_missing_values",
            CheckKind::EmptyColumns => "empty_columns",
            CheckKind::SingleValueColumns => "single_value_columns",
            CheckKind::TargetLeakagePatterns => "target_leakage_patterns",
            CheckKind::ClassImbalance => "class_imbalance",
            CheckKind::HighCardinality => "high_cardinality",
            CheckKind::Duplicates => "duplicates",
            CheckKind::MixedDataTypes => "mixed_data_types",
            CheckKind::Outliers => "outliers",
            CheckKind::FeatureCorrelation => "feature_correlation",
            CheckKind::CategoricalCorrelation => "categorical_correlation",
            CheckKind::MixedCorrelation => "mixed_correlation",
            CheckKind::DatasetMissingness => "dataset_missingness",
            CheckKind::HighZeroCounts => "high_zero_counts",
            CheckKind::ExtremeTextLengths => "extreme_text_lengths",
            CheckKind::DatetimeSkew => "datetime_skew",
            CheckKind::MissingPatterns => "missing_patterns",
            CheckKind::Skewness => "skewness",
            CheckKind::DatasetDrift => "dataset_drift",
            CheckKind::UniformDistribution => "uniform_distribution",
            CheckKind::UniqueValues => "unique_values",
            CheckKind::InfiniteValues => "infinite_values",
            CheckKind::ConstantLength => "constant_length",
        }
    }

    /// Parse a canonical check name. Returns `None` for unknown names.
    pub fn parse(name: &str) -> Option<CheckKind> {
        CheckKind::ALL
            .iter()
            .copied()
            .find(|kind| kind.as_str() == name)
    }

    /// The three correlation pseudo-checks all run the interaction engine.
    pub fn is_correlation(self) -> bool {
        matches!(
            self,
            CheckKind::FeatureCorrelation
                | CheckKind::CategoricalCorrelation
                | CheckKind::MixedCorrelation
        )
    }
}

impl fmt::Display for CheckKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_round_trips_every_name() {
        for kind in CheckKind::ALL {
            assert_eq!(CheckKind::parse(kind.as_str()), Some(kind));
        }
    }

    #[test]
    fn unknown_name_is_rejected() {
        assert_eq!(CheckKind::parse("no_such_check"), None);
        assert_eq!(CheckKind::parse(""), None);
    }

    #[test]
    fn correlation_pseudo_checks_are_flagged() {
        assert!(CheckKind::FeatureCorrelation.is_correlation());
        assert!(CheckKind::MixedCorrelation.is_correlation());
        assert!(!CheckKind::Outliers.is_correlation());
    }
}
