//! Error types for span sampling operations.
//!
//! This module provides structured error types for all operations in the
//! `span-sampler` crate: grammar initialisation, parsing, argument
//! validation, and weighted selection.

use thiserror::Error;

use crate::language::SupportedLanguage;

/// Errors from span sampling operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SamplingError {
    /// Failed to initialise the Tree-sitter parser for a language.
    #[error("failed to initialise parser for {language}: {message}")]
    ParserInitError {
        /// The language that failed to initialise.
        language: SupportedLanguage,
        /// Description of the failure.
        message: String,
    },

    /// Failed to parse source code.
    #[error("failed to parse {language}: {message}")]
    ParseError {
        /// The language that failed to parse.
        language: SupportedLanguage,
        /// Description of the failure.
        message: String,
    },

    /// A sampling parameter is outside its permitted domain.
    #[error("invalid {parameter}: {message}")]
    InvalidArgument {
        /// Name of the offending parameter.
        parameter: &'static str,
        /// Description of the constraint that was violated.
        message: String,
    },

    /// The candidate weights cannot be turned into a probability
    /// distribution (for example, every weight is zero).
    #[error("degenerate candidate weights: {message}")]
    DegenerateWeights {
        /// Description of the numeric problem.
        message: String,
    },
}

impl SamplingError {
    /// Creates a parser initialisation error.
    #[must_use]
    pub fn parser_init(language: SupportedLanguage, message: impl Into<String>) -> Self {
        Self::ParserInitError {
            language,
            message: message.into(),
        }
    }

    /// Creates a parse error.
    #[must_use]
    pub fn parse(language: SupportedLanguage, message: impl Into<String>) -> Self {
        Self::ParseError {
            language,
            message: message.into(),
        }
    }

    /// Creates an invalid argument error.
    #[must_use]
    pub fn invalid_argument(parameter: &'static str, message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            parameter,
            message: message.into(),
        }
    }

    /// Creates a degenerate weights error.
    #[must_use]
    pub fn degenerate_weights(message: impl Into<String>) -> Self {
        Self::DegenerateWeights {
            message: message.into(),
        }
    }
}
