/*!
 * Tests for error types and conversions
 */

use std::path::PathBuf;
use site_translate::errors::{ProviderError, AppError};

#[test]
fn test_providerError_apiError_shouldDisplayStatusAndMessage() {
    let error = ProviderError::ApiError {
        status_code: 400,
        message: "Value for 'target_lang' not supported".to_string(),
    };
    let display = format!("{}", error);
    assert!(display.contains("400"));
    assert!(display.contains("target_lang"));
}

#[test]
fn test_providerError_quotaExceeded_shouldDisplayCorrectly() {
    let error = ProviderError::QuotaExceeded("Character limit reached".to_string());
    let display = format!("{}", error);
    assert!(display.contains("Quota exceeded"));
    assert!(display.contains("Character limit reached"));
}

#[test]
fn test_providerError_authenticationError_shouldDisplayCorrectly() {
    let error = ProviderError::AuthenticationError("Invalid API key".to_string());
    let display = format!("{}", error);
    assert!(display.contains("Authentication error"));
    assert!(display.contains("Invalid API key"));
}

#[test]
fn test_appError_outputWrite_shouldDisplayPathAndCause() {
    let error = AppError::OutputWrite {
        path: PathBuf::from("site/fr/index.html"),
        message: "Failed to write to file: read-only file system".to_string(),
    };
    let display = error.to_string();
    assert!(display.contains("Cannot write translated page"));
    assert!(display.contains("site/fr/index.html"));
    assert!(display.contains("read-only file system"));
}

#[test]
fn test_appError_sourceRead_shouldDisplayPathAndCause() {
    let error = AppError::SourceRead {
        path: PathBuf::from("site/index.html"),
        message: "stream did not contain valid UTF-8".to_string(),
    };
    let display = error.to_string();
    assert!(display.contains("Cannot read source page site/index.html"));
    assert!(display.contains("valid UTF-8"));
}
