use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Semantic column type inferred from cardinality and dtype heuristics.
///
/// This classification is heuristic, not guaranteed-correct: it trades
/// precision for speed (e.g. a low-cardinality numeric code column is
/// reclassified as Categorical).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum SemanticType {
    Numeric,
    Categorical,
    Text,
    DateTime,
    Boolean,
    Unsupported,
}

impl SemanticType {
    pub fn as_str(self) -> &'static str {
        match self {
            SemanticType::Numeric => "Numeric",
            SemanticType::Categorical => "Categorical",
            SemanticType::Text => "Text",
            SemanticType::DateTime => "DateTime",
            SemanticType::Boolean => "Boolean",
            SemanticType::Unsupported => "Unsupported",
        }
    }
}

impl fmt::Display for SemanticType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Column name to semantic type, computed once per analysis and read-only
/// afterwards.
pub type ColumnTypeMap = BTreeMap<String, SemanticType>;
