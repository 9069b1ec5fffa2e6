//! Code-generation strategies, one per fix type.
//!
//! Each strategy renders a fix two ways: imperative pandas statements for
//! the cleaning script, and (where the fix maps onto a transformer) an
//! sklearn constructor expression for the pipeline builder.

use prepcheck_model::{FixSuggestion, FixType};

/// Renders one fix type into generated Python.
pub trait FixStrategy {
    /// Pandas statements applying the fix to a frame named `df`.
    fn pandas_code(&self, fix: &FixSuggestion) -> String;

    /// Sklearn transformer expression and the columns it applies to, or
    /// `None` when the fix has no transformer equivalent.
    fn sklearn_transformer(&self, fix: &FixSuggestion) -> Option<(String, Vec<String>)>;

    /// Import lines the rendered code relies on.
    fn imports(&self, fix: &FixSuggestion) -> Vec<&'static str>;
}

/// Strategy lookup for a fix type. Total over the closed enum.
pub fn strategy_for(fix_type: FixType) -> &'static dyn FixStrategy {
    match fix_type {
        FixType::DropColumn => &DropColumn,
        FixType::DropDuplicates => &DropDuplicates,
        FixType::Impute => &Impute,
        FixType::Encode => &Encode,
        FixType::Scale => &Scale,
        FixType::Transform => &Transform,
        FixType::ClipOutliers => &ClipOutliers,
        FixType::CastType => &CastType,
    }
}

fn py_list(columns: &[String]) -> String {
    let quoted: Vec<String> = columns.iter().map(|c| format!("'{c}'")).collect();
    format!("[{}]", quoted.join(", "))
}

struct DropColumn;

impl FixStrategy for DropColumn {
    fn pandas_code(&self, fix: &FixSuggestion) -> String {
        format!(
            "df = df.drop(columns={}, errors='ignore')",
            py_list(&fix.columns)
        )
    }

    fn sklearn_transformer(&self, fix: &FixSuggestion) -> Option<(String, Vec<String>)> {
        // ColumnTransformer accepts the literal 'drop' in place of an
        // estimator.
        Some(("'drop'".to_string(), fix.columns.clone()))
    }

    fn imports(&self, _fix: &FixSuggestion) -> Vec<&'static str> {
        vec![]
    }
}

struct DropDuplicates;

impl FixStrategy for DropDuplicates {
    fn pandas_code(&self, fix: &FixSuggestion) -> String {
        let keep = fix
            .parameters
            .get("keep")
            .and_then(|v| v.as_str())
            .unwrap_or("first");
        format!("df = df.drop_duplicates(keep='{keep}')")
    }

    fn sklearn_transformer(&self, _fix: &FixSuggestion) -> Option<(String, Vec<String>)> {
        None
    }

    fn imports(&self, _fix: &FixSuggestion) -> Vec<&'static str> {
        vec![]
    }
}

struct Impute;

impl FixStrategy for Impute {
    fn pandas_code(&self, fix: &FixSuggestion) -> String {
        let method = fix.method.as_deref().unwrap_or("median");
        let mut lines = Vec::new();
        let replace_infinite = fix
            .parameters
            .get("replace_infinite")
            .and_then(|v| v.as_bool())
            .unwrap_or(false);
        for column in &fix.columns {
            if replace_infinite {
                lines.push(format!(
                    "df['{column}'] = df['{column}'].replace([np.inf, -np.inf], np.nan)"
                ));
            }
            let fill = match method {
                "mean" => format!("df['{column}'].mean()"),
                "most_frequent" => format!("df['{column}'].mode().iloc[0]"),
                "constant" => fix
                    .parameters
                    .get("fill_value")
                    .map(|v| v.to_string())
                    .unwrap_or_else(|| "0".to_string()),
                _ => format!("df['{column}'].median()"),
            };
            lines.push(format!("df['{column}'] = df['{column}'].fillna({fill})"));
        }
        lines.join("\n")
    }

    fn sklearn_transformer(&self, fix: &FixSuggestion) -> Option<(String, Vec<String>)> {
        let strategy = fix.method.as_deref().unwrap_or("median");
        Some((
            format!("SimpleImputer(strategy='{strategy}')"),
            fix.columns.clone(),
        ))
    }

    fn imports(&self, fix: &FixSuggestion) -> Vec<&'static str> {
        if fix.parameters.contains_key("replace_infinite") {
            vec!["import numpy as np"]
        } else {
            vec![]
        }
    }
}

struct Encode;

impl FixStrategy for Encode {
    fn pandas_code(&self, fix: &FixSuggestion) -> String {
        let method = fix.method.as_deref().unwrap_or("onehot");
        match method {
            "frequency" => fix
                .columns
                .iter()
                .map(|column| {
                    format!(
                        "df['{column}'] = df['{column}'].map(df['{column}'].value_counts(normalize=True))"
                    )
                })
                .collect::<Vec<_>>()
                .join("\n"),
            "label" | "ordinal" => fix
                .columns
                .iter()
                .map(|column| {
                    format!("df['{column}'] = df['{column}'].astype('category').cat.codes")
                })
                .collect::<Vec<_>>()
                .join("\n"),
            _ => format!("df = pd.get_dummies(df, columns={})", py_list(&fix.columns)),
        }
    }

    fn sklearn_transformer(&self, fix: &FixSuggestion) -> Option<(String, Vec<String>)> {
        match fix.method.as_deref().unwrap_or("onehot") {
            "onehot" => Some((
                "OneHotEncoder(handle_unknown='ignore')".to_string(),
                fix.columns.clone(),
            )),
            "ordinal" | "label" => Some((
                "OrdinalEncoder(handle_unknown='use_encoded_value', unknown_value=-1)".to_string(),
                fix.columns.clone(),
            )),
            // Frequency encoding has no stock sklearn transformer.
            _ => None,
        }
    }

    fn imports(&self, _fix: &FixSuggestion) -> Vec<&'static str> {
        vec![]
    }
}

struct Scale;

impl FixStrategy for Scale {
    fn pandas_code(&self, fix: &FixSuggestion) -> String {
        let method = fix.method.as_deref().unwrap_or("standard");
        fix.columns
            .iter()
            .map(|column| match method {
                "minmax" => format!(
                    "df['{column}'] = (df['{column}'] - df['{column}'].min()) / (df['{column}'].max() - df['{column}'].min())"
                ),
                "maxabs" => format!(
                    "df['{column}'] = df['{column}'] / df['{column}'].abs().max()"
                ),
                "robust" => format!(
                    "df['{column}'] = (df['{column}'] - df['{column}'].median()) / (df['{column}'].quantile(0.75) - df['{column}'].quantile(0.25))"
                ),
                _ => format!(
                    "df['{column}'] = (df['{column}'] - df['{column}'].mean()) / df['{column}'].std()"
                ),
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn sklearn_transformer(&self, fix: &FixSuggestion) -> Option<(String, Vec<String>)> {
        let constructor = match fix.method.as_deref().unwrap_or("standard") {
            "minmax" => "MinMaxScaler()",
            "robust" => "RobustScaler()",
            "maxabs" => "MaxAbsScaler()",
            _ => "StandardScaler()",
        };
        Some((constructor.to_string(), fix.columns.clone()))
    }

    fn imports(&self, _fix: &FixSuggestion) -> Vec<&'static str> {
        vec![]
    }
}

struct Transform;

impl FixStrategy for Transform {
    fn pandas_code(&self, fix: &FixSuggestion) -> String {
        let method = fix.method.as_deref().unwrap_or("log1p");
        fix.columns
            .iter()
            .map(|column| match method {
                "log" => format!("df['{column}'] = np.log(df['{column}'])"),
                "sqrt" => format!("df['{column}'] = np.sqrt(df['{column}'])"),
                "boxcox" => format!(
                    "df['{column}'], _ = stats.boxcox(df['{column}'])"
                ),
                "yeojohnson" => format!(
                    "df['{column}'], _ = stats.yeojohnson(df['{column}'])"
                ),
                _ => format!("df['{column}'] = np.log1p(df['{column}'])"),
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn sklearn_transformer(&self, fix: &FixSuggestion) -> Option<(String, Vec<String>)> {
        let constructor = match fix.method.as_deref().unwrap_or("log1p") {
            "yeojohnson" => "PowerTransformer(method='yeo-johnson')".to_string(),
            "boxcox" => "PowerTransformer(method='box-cox')".to_string(),
            _ => "FunctionTransformer(np.log1p)".to_string(),
        };
        Some((constructor, fix.columns.clone()))
    }

    fn imports(&self, fix: &FixSuggestion) -> Vec<&'static str> {
        match fix.method.as_deref().unwrap_or("log1p") {
            "boxcox" | "yeojohnson" => vec!["from scipy import stats"],
            _ => vec!["import numpy as np"],
        }
    }
}

struct ClipOutliers;

impl FixStrategy for ClipOutliers {
    fn pandas_code(&self, fix: &FixSuggestion) -> String {
        fix.columns
            .iter()
            .map(|column| {
                [
                    format!("q1, q3 = df['{column}'].quantile(0.25), df['{column}'].quantile(0.75)"),
                    "iqr = q3 - q1".to_string(),
                    format!(
                        "df['{column}'] = df['{column}'].clip(q1 - 1.5 * iqr, q3 + 1.5 * iqr)"
                    ),
                ]
                .join("\n")
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn sklearn_transformer(&self, _fix: &FixSuggestion) -> Option<(String, Vec<String>)> {
        None
    }

    fn imports(&self, _fix: &FixSuggestion) -> Vec<&'static str> {
        vec![]
    }
}

struct CastType;

impl FixStrategy for CastType {
    fn pandas_code(&self, fix: &FixSuggestion) -> String {
        let target = fix.method.as_deref().unwrap_or("numeric");
        fix.columns
            .iter()
            .map(|column| match target {
                "string" => format!("df['{column}'] = df['{column}'].astype(str)"),
                _ => format!(
                    "df['{column}'] = pd.to_numeric(df['{column}'], errors='coerce')"
                ),
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn sklearn_transformer(&self, _fix: &FixSuggestion) -> Option<(String, Vec<String>)> {
        None
    }

    fn imports(&self, _fix: &FixSuggestion) -> Vec<&'static str> {
        vec![]
    }
}

/// Import line for an sklearn constructor expression.
pub(crate) fn sklearn_import(constructor: &str) -> Option<&'static str> {
    if constructor.starts_with("SimpleImputer") {
        Some("from sklearn.impute import SimpleImputer")
    } else if constructor.starts_with("OneHotEncoder") {
        Some("from sklearn.preprocessing import OneHotEncoder")
    } else if constructor.starts_with("OrdinalEncoder") {
        Some("from sklearn.preprocessing import OrdinalEncoder")
    } else if constructor.starts_with("StandardScaler") {
        Some("from sklearn.preprocessing import StandardScaler")
    } else if constructor.starts_with("MinMaxScaler") {
        Some("from sklearn.preprocessing import MinMaxScaler")
    } else if constructor.starts_with("RobustScaler") {
        Some("from sklearn.preprocessing import RobustScaler")
    } else if constructor.starts_with("MaxAbsScaler") {
        Some("from sklearn.preprocessing import MaxAbsScaler")
    } else if constructor.starts_with("PowerTransformer") {
        Some("from sklearn.preprocessing import PowerTransformer")
    } else if constructor.starts_with("FunctionTransformer") {
        Some("from sklearn.preprocessing import FunctionTransformer")
    } else {
        None
    }
}
