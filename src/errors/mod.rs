use anyhow::Context as _;
use thiserror::Error;

/// Document-level failure: nothing can be extracted from the input
#[derive(Debug, Error)]
pub enum MalformedInputError {
    #[error("XML is not well-formed: {0}")]
    NotWellFormed(#[from] roxmltree::Error),
    #[error("no play-by-play event container found in {dialect} document")]
    NoEventContainer { dialect: String },
}

/// Add context to read errors
pub fn read_context(path: &str) -> String {
    format!("Failed to read input file: {}", path)
}

/// Add context to write errors
pub fn write_context(name: &str) -> String {
    format!("Failed to write output table: {}", name)
}

/// Add context to serialization errors
pub fn serialize_context(data_type: &str) -> String {
    format!("Failed to serialize {}", data_type)
}

/// Wrap result with read context
pub fn with_read_context<T, E>(result: Result<T, E>, path: &str) -> anyhow::Result<T>
where
    E: std::error::Error + Send + Sync + 'static,
{
    result.context(read_context(path))
}

/// Wrap result with write context
pub fn with_write_context<T, E>(result: Result<T, E>, name: &str) -> anyhow::Result<T>
where
    E: std::error::Error + Send + Sync + 'static,
{
    result.context(write_context(name))
}
