use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    /// A fix suggestion was constructed without any target columns.
    /// This is a registry bug, not a data problem, so it is a hard failure.
    #[error("fix suggestion for '{fix_type}' must name at least one column")]
    EmptyColumnList { fix_type: String },
    #[error("{0}")]
    Message(String),
}

pub type Result<T> = std::result::Result<T, ModelError>;
