//! Error types module
//!
//! This module provides the unified error type used at the library boundary.
//! Field-extraction misses are not errors anywhere in Flyerscan; they are
//! represented as absent values and left for the human reviewer to fill in.

use crate::ocr::OcrError;

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("OCR engine error: {0}")]
    Ocr(#[from] OcrError),

    #[error("Extraction pipeline setup failed")]
    Extraction(#[source] anyhow::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl AppError {
    /// Whether retrying the same call can reasonably succeed.
    pub fn is_recoverable(&self) -> bool {
        match self {
            AppError::Ocr(err) => err.is_recoverable(),
            AppError::Extraction(_) => false,
            AppError::InvalidInput(_) => false,
        }
    }
}
