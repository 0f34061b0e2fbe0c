//! Error types for Sheetcut operations.
//!
//! This module provides the main error type [`SheetcutError`]. Note that the
//! raster export pipeline only reports *fatal* problems through it; failures
//! after the pipeline has been launched are logged and swallowed.

use std::{io, ops::Range};

use thiserror::Error;

/// The main error type for Sheetcut operations.
#[derive(Debug, Error)]
pub enum SheetcutError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid job: {message}")]
    Job {
        message: String,
        /// Byte range of the offending input in `src`, when known.
        span: Option<Range<usize>>,
        src: String,
    },

    #[error("Optimizer error: {0}")]
    Optimizer(String),

    #[error("Export error: {0}")]
    Export(Box<dyn std::error::Error + Send + Sync>),
}

impl SheetcutError {
    /// Create a new `Job` error with the job source it was found in.
    pub fn new_job_error(
        message: impl Into<String>,
        span: Option<Range<usize>>,
        src: impl Into<String>,
    ) -> Self {
        Self::Job {
            message: message.into(),
            span,
            src: src.into(),
        }
    }
}

impl From<crate::export::Error> for SheetcutError {
    fn from(error: crate::export::Error) -> Self {
        Self::Export(Box::new(error))
    }
}
