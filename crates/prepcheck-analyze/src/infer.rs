//! Semantic column typing.
//!
//! The classification is a cardinality/dtype heuristic tuned for
//! preprocessing decisions, not a type oracle. A numeric column holding
//! a handful of distinct codes reads as categorical here even though
//! its physical dtype is numeric.

use std::collections::BTreeSet;

use chrono::{Datelike, NaiveDate, NaiveDateTime};
use polars::prelude::{Column, DataFrame, DataType};
use prepcheck_model::{ColumnTypeMap, SemanticType, TypeInferenceConfig};

use crate::stats::{any_to_string, cell, is_missing, is_numeric_dtype};

const BOOLEAN_TOKENS: [&str; 6] = ["true", "false", "yes", "no", "t", "f"];

const DATE_FORMATS: [&str; 4] = ["%Y-%m-%d", "%d/%m/%Y", "%m/%d/%Y", "%Y%m%d"];
const DATETIME_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"];

/// How many leading non-missing values the string heuristics look at.
const PARSE_SAMPLE: usize = 50;

/// Classify every column of the dataset.
pub fn infer_column_types(df: &DataFrame, config: &TypeInferenceConfig) -> ColumnTypeMap {
    df.get_columns()
        .iter()
        .map(|column| (column.name().to_string(), infer_column(column, config)))
        .collect()
}

fn infer_column(column: &Column, config: &TypeInferenceConfig) -> SemanticType {
    let dtype = column.dtype();

    if matches!(dtype, DataType::Boolean) {
        return SemanticType::Boolean;
    }
    if dtype.is_date() || dtype.is_datetime() {
        return SemanticType::DateTime;
    }

    let values = non_missing_strings(column);
    if values.is_empty() {
        return SemanticType::Unsupported;
    }
    let distinct: BTreeSet<&str> = values.iter().map(String::as_str).collect();

    if is_numeric_dtype(dtype) {
        if distinct.len() <= config.num_low_cat_threshold {
            return SemanticType::Categorical;
        }
        return SemanticType::Numeric;
    }

    if dtype.is_categorical() {
        return SemanticType::Categorical;
    }

    if matches!(dtype, DataType::String) {
        if is_boolean_tokens(&distinct) {
            return SemanticType::Boolean;
        }
        if looks_like_datetime(&values) {
            return SemanticType::DateTime;
        }
        let ratio = distinct.len() as f64 / values.len() as f64;
        if distinct.len() <= config.cat_cardinality_threshold
            && ratio < config.cat_percentage_threshold
        {
            return SemanticType::Categorical;
        }
        return SemanticType::Text;
    }

    SemanticType::Unsupported
}

fn non_missing_strings(column: &Column) -> Vec<String> {
    let mut values = Vec::new();
    for idx in 0..column.len() {
        let value = cell(column, idx);
        if !is_missing(&value) {
            values.push(any_to_string(value).trim().to_string());
        }
    }
    values
}

fn is_boolean_tokens(distinct: &BTreeSet<&str>) -> bool {
    !distinct.is_empty()
        && distinct
            .iter()
            .all(|v| BOOLEAN_TOKENS.contains(&v.to_ascii_lowercase().as_str()))
}

/// True when every sampled value parses under a single date(time) format.
fn looks_like_datetime(values: &[String]) -> bool {
    let sample: Vec<&str> = values.iter().take(PARSE_SAMPLE).map(String::as_str).collect();
    if sample.is_empty() {
        return false;
    }
    for format in DATE_FORMATS {
        if sample
            .iter()
            .all(|v| NaiveDate::parse_from_str(v, format).is_ok())
        {
            return true;
        }
    }
    for format in DATETIME_FORMATS {
        if sample
            .iter()
            .all(|v| NaiveDateTime::parse_from_str(v, format).is_ok())
        {
            return true;
        }
    }
    false
}

/// Year of a value parsing under any supported date(time) format.
pub(crate) fn parse_date_year(value: &str) -> Option<i32> {
    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(value, format) {
            return Some(date.year());
        }
    }
    for format in DATETIME_FORMATS {
        if let Ok(datetime) = NaiveDateTime::parse_from_str(value, format) {
            return Some(datetime.date().year());
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use polars::prelude::df;
    use prepcheck_model::ThresholdConfig;

    use super::*;

    fn types_of(df: &DataFrame) -> ColumnTypeMap {
        infer_column_types(df, &ThresholdConfig::default().type_inference)
    }

    #[test]
    fn classifies_basic_columns() {
        let frame = df![
            "amount" => (0..50i64).collect::<Vec<_>>(),
            "flag" => ["yes", "no", "yes", "no", "yes"]
                .iter()
                .cycle()
                .take(50)
                .copied()
                .collect::<Vec<_>>(),
        ]
        .unwrap();
        let types = types_of(&frame);
        assert_eq!(types["amount"], SemanticType::Numeric);
        assert_eq!(types["flag"], SemanticType::Boolean);
    }

    #[test]
    fn low_cardinality_numeric_reads_as_categorical() {
        // Heuristic behavior: a 0/1/2 code column is treated as categorical
        // even though the dtype is integer.
        let codes: Vec<i64> = (0..60).map(|i| i % 3).collect();
        let frame = df!["code" => codes].unwrap();
        assert_eq!(types_of(&frame)["code"], SemanticType::Categorical);
    }

    #[test]
    fn iso_date_strings_read_as_datetime() {
        let dates: Vec<String> = (1..=20).map(|d| format!("2024-01-{d:02}")).collect();
        let frame = df!["observed" => dates].unwrap();
        assert_eq!(types_of(&frame)["observed"], SemanticType::DateTime);
    }

    #[test]
    fn high_cardinality_strings_read_as_text() {
        let ids: Vec<String> = (0..100).map(|i| format!("user-{i:05}")).collect();
        let frame = df!["user_id" => ids].unwrap();
        assert_eq!(types_of(&frame)["user_id"], SemanticType::Text);
    }

    #[test]
    fn repeated_labels_read_as_categorical() {
        let labels: Vec<&str> = ["red", "green", "blue"]
            .iter()
            .cycle()
            .take(120)
            .copied()
            .collect();
        let frame = df!["color" => labels].unwrap();
        assert_eq!(types_of(&frame)["color"], SemanticType::Categorical);
    }

    #[test]
    fn all_null_column_is_unsupported() {
        let frame = df!["empty" => [None::<&str>, None, None, None]].unwrap();
        assert_eq!(types_of(&frame)["empty"], SemanticType::Unsupported);
    }
}
