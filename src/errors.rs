/*!
 * Error types for the mixalign application.
 *
 * This module contains custom error types for different parts of the application,
 * using the thiserror crate for ergonomic error definitions.
 */

// Allow dead code - error types are for library consumers
#![allow(dead_code)]

use thiserror::Error;

/// Errors that can occur when parsing Mix transcripts.
///
/// Only `MalformedRecord` is fatal: a line that claims to be an FR record
/// but does not carry the FR tag comes from a corpus file outside the
/// supported dialect and cannot be safely guessed at. Every other
/// irregularity in a document degrades to an empty result or a skipped
/// element so that corpus-scale batch scans keep going.
#[derive(Error, Debug)]
pub enum MixError {
    /// A line expected to be an FR record did not match the FR structure
    #[error("expected an FR record, got: {line}")]
    MalformedRecord {
        /// The offending input line, verbatim
        line: String,
    },

    /// Error reading a corpus file
    #[error("failed to read mix file: {0}")]
    Read(String),
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Error from Mix parsing
    #[error("Mix error: {0}")]
    Mix(#[from] MixError),

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
