//! Grimoire CLI — error types.

use grimoire_core::error::DomainError;
use thiserror::Error;

/// Startup and replay errors for the CLI.
#[derive(Debug, Error)]
pub enum AppError {
    /// A required environment variable is missing or invalid.
    #[error("configuration error: {0}")]
    Config(String),

    /// Reading the catalog or script failed.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    /// The character catalog is not valid YAML for a catalog.
    #[error("catalog error: {0}")]
    Catalog(#[from] serde_yaml::Error),

    /// A script line could not be parsed or refers to something missing.
    #[error("script line {line}: {message}")]
    Script {
        /// One-based line number.
        line: usize,
        /// What was wrong with it.
        message: String,
    },

    /// A script step was rejected by the domain.
    #[error("script line {line}: {source}")]
    Step {
        /// One-based line number.
        line: usize,
        /// The domain error.
        #[source]
        source: DomainError,
    },

    /// Writing the report failed.
    #[error("output error: {0}")]
    Output(#[from] serde_json::Error),

    /// A domain error outside any script step.
    #[error(transparent)]
    Domain(#[from] DomainError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_error_names_line_and_cause() {
        let err = AppError::Step {
            line: 4,
            source: DomainError::NotFound("no group is active".into()),
        };

        assert_eq!(err.to_string(), "script line 4: not found: no group is active");
    }
}
