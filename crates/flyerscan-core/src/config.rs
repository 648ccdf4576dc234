//! Configuration module
//!
//! Scanner configuration sourced from environment variables with sensible
//! defaults. Flyerscan is a pure library; configuration covers only the OCR
//! collaborator session, not any server or storage concerns.

use std::env;

use crate::constants::{DEFAULT_OCR_LANGUAGE, DEFAULT_OCR_TIMEOUT_SECS};
use crate::error::AppError;

/// Batch scanner configuration
#[derive(Clone, Debug)]
pub struct ScannerConfig {
    /// Language hint handed to `OcrEngine::initialize`, e.g. "eng".
    pub ocr_language: String,
    /// Upper bound in seconds for one `recognize` call before the image is
    /// marked failed.
    pub ocr_timeout_secs: u64,
}

impl ScannerConfig {
    /// Build configuration from `FLYERSCAN_*` environment variables, falling
    /// back to defaults for anything unset or unparseable.
    pub fn from_env() -> Self {
        let ocr_language = env::var("FLYERSCAN_OCR_LANGUAGE")
            .ok()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_OCR_LANGUAGE.to_string());

        let ocr_timeout_secs = env::var("FLYERSCAN_OCR_TIMEOUT_SECS")
            .ok()
            .and_then(|s| s.parse::<u64>().ok())
            .unwrap_or(DEFAULT_OCR_TIMEOUT_SECS);

        Self {
            ocr_language,
            ocr_timeout_secs,
        }
    }

    /// Reject configurations the scanner cannot run with.
    pub fn validate(&self) -> Result<(), AppError> {
        if self.ocr_language.trim().is_empty() {
            return Err(AppError::InvalidInput(
                "OCR language must not be empty".to_string(),
            ));
        }
        if self.ocr_timeout_secs == 0 {
            return Err(AppError::InvalidInput(
                "OCR timeout must be at least one second".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for ScannerConfig {
    fn default() -> Self {
        Self {
            ocr_language: DEFAULT_OCR_LANGUAGE.to_string(),
            ocr_timeout_secs: DEFAULT_OCR_TIMEOUT_SECS,
        }
    }
}
