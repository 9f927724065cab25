use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ListingError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to read export {path}: {source}")]
    ExportRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Query error: {0}")]
    Query(#[from] QueryError),

    #[error("Settings error: {0}")]
    Settings(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

pub type Result<T> = std::result::Result<T, ListingError>;

/// A query that could not be compiled.
///
/// Recoverable: the engine keeps its record set and accepts the next query.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QueryError {
    #[error("invalid regular expression {pattern:?}: {message}")]
    InvalidRegex { pattern: String, message: String },

    /// A wildcard whose compiled form exceeds the size limit.
    #[error("wildcard pattern of {length} characters is too large to compile")]
    PatternTooLarge { length: usize },
}
