/*!
 * Error types for the mergecat application.
 *
 * This module contains custom error types for different parts of the application,
 * using the thiserror crate for ergonomic error definitions.
 */

// Allow dead code - error types are for library consumers
#![allow(dead_code)]

use thiserror::Error;

/// Errors that can occur when calling a translation provider API
#[derive(Error, Debug)]
pub enum ProviderError {
    /// Error when making an API request fails
    #[error("API request failed: {0}")]
    RequestFailed(String),

    /// Error when parsing an API response fails
    #[error("Failed to parse API response: {0}")]
    ParseError(String),

    /// Error returned by the API itself
    #[error("API responded with error: {status_code} - {message}")]
    ApiError {
        /// HTTP status code
        status_code: u16,
        /// Error message from the API
        message: String
    },

    /// Error related to rate limiting
    #[error("Rate limit exceeded: {0}")]
    RateLimitExceeded(String),

    /// Error with authentication
    #[error("Authentication error: {0}")]
    AuthenticationError(String),
}

/// Errors that can occur while reading or writing catalog files
#[derive(Error, Debug)]
pub enum CatalogError {
    /// The MO file does not start with the gettext magic number
    #[error("Not a valid MO catalog: bad magic number {0:#010x}")]
    BadMagic(u32),

    /// The MO file ended before the advertised data
    #[error("Truncated MO catalog: {0}")]
    Truncated(String),

    /// An MO string table offset points outside the file
    #[error("Malformed MO catalog: offset out of bounds at entry {index}")]
    BadOffset {
        /// Index in the string table
        index: usize
    },

    /// A catalog string is not valid UTF-8
    #[error("Catalog string at entry {index} is not valid UTF-8")]
    InvalidUtf8 {
        /// Index in the string table
        index: usize
    },

    /// A PO file line could not be parsed
    #[error("PO syntax error at line {line}: {message}")]
    PoSyntax {
        /// 1-based line number
        line: usize,
        /// What went wrong
        message: String
    },

    /// An underlying file operation failed
    #[error("Catalog file error: {0}")]
    Io(#[from] std::io::Error),
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Error from a provider
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    /// Error from catalog parsing or serialization
    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

// Utility functions for error conversion
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}
