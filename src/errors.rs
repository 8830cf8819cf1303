/*!
 * Error types for the site-translate application.
 *
 * This module contains custom error types for different parts of the application,
 * using the thiserror crate for ergonomic error definitions.
 */

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur when talking to a translation provider
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

    /// Error establishing or maintaining a connection
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// Error related to rate limiting
    #[error("Rate limit exceeded: {0}")]
    RateLimitExceeded(String),

    /// The account's character quota is used up
    #[error("Quota exceeded: {0}")]
    QuotaExceeded(String),

    /// Error with authentication
    #[error("Authentication error: {0}")]
    AuthenticationError(String),
}

/// Errors that fail a single page translation job
#[derive(Error, Debug)]
pub enum AppError {
    /// The source page exists but could not be read
    #[error("Cannot read source page {}: {message}", path.display())]
    SourceRead {
        /// Source page path
        path: PathBuf,
        /// Underlying I/O error chain
        message: String,
    },

    /// The translated page could not be written
    #[error("Cannot write translated page {}: {message}", path.display())]
    OutputWrite {
        /// Output page path
        path: PathBuf,
        /// Underlying I/O error chain
        message: String,
    },
}
