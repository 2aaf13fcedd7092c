/// Error types for kmpscout.
///
/// The matching engine itself only ever fails with [`SearchError::InvalidPattern`]:
/// an empty pattern, or a prefix table that was built for a different pattern.
/// Every other edge case (empty text, pattern longer than text, an out-of-range
/// segment hint) is a defined, non-error outcome.
///
/// The remaining variants belong to the harness side of the crate: loading a
/// benchmark configuration and generating synthetic texts.
///
/// ```rust,ignore
/// match sequential_search(text, pattern) {
///     Ok(matches) => // Process matches,
///     Err(SearchError::InvalidPattern(reason)) => // Reject the input,
///     Err(e) => // Handle other errors
/// }
/// ```
use thiserror::Error;

/// Result type for search operations
pub type SearchResult<T> = Result<T, SearchError>;

/// Errors that can occur during search operations
#[derive(Error, Debug)]
pub enum SearchError {
    #[error("Invalid pattern: {0}")]
    InvalidPattern(String),
    #[error("Invalid scenario: {0}")]
    InvalidScenario(String),
    #[error("Configuration error: {0}")]
    ConfigError(String),
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl SearchError {
    pub fn invalid_pattern(reason: impl Into<String>) -> Self {
        Self::InvalidPattern(reason.into())
    }

    pub fn invalid_scenario(reason: impl Into<String>) -> Self {
        Self::InvalidScenario(reason.into())
    }

    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::ConfigError(msg.into())
    }

    /// Rejection for a zero-length pattern
    pub(crate) fn empty_pattern() -> Self {
        Self::invalid_pattern("pattern must contain at least one symbol")
    }

    /// Rejection for a prefix table that does not belong to the pattern
    pub(crate) fn table_mismatch(table_len: usize, pattern_len: usize) -> Self {
        Self::invalid_pattern(format!(
            "prefix table has {} entries but pattern has {} symbols",
            table_len, pattern_len
        ))
    }
}

impl From<config::ConfigError> for SearchError {
    fn from(err: config::ConfigError) -> Self {
        Self::ConfigError(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let err = SearchError::invalid_pattern("empty");
        assert!(matches!(err, SearchError::InvalidPattern(_)));

        let err = SearchError::invalid_scenario("too many embeddings");
        assert!(matches!(err, SearchError::InvalidScenario(_)));

        let err = SearchError::config_error("Missing required field");
        assert!(matches!(err, SearchError::ConfigError(_)));

        let err: SearchError = std::io::Error::new(std::io::ErrorKind::NotFound, "gone").into();
        assert!(matches!(err, SearchError::IoError(_)));
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            SearchError::empty_pattern().to_string(),
            "Invalid pattern: pattern must contain at least one symbol"
        );
        assert_eq!(
            SearchError::table_mismatch(3, 4).to_string(),
            "Invalid pattern: prefix table has 3 entries but pattern has 4 symbols"
        );
        assert_eq!(
            SearchError::config_error("Missing required field").to_string(),
            "Configuration error: Missing required field"
        );
    }
}
