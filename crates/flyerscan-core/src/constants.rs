//! Shared constants
//!
//! Limits and defaults used across the extraction pipeline.

/// Maximum number of characters of recognized text carried into a draft's
/// description field.
pub const DESCRIPTION_MAX_CHARS: usize = 200;

/// Default language hint passed to the OCR engine.
pub const DEFAULT_OCR_LANGUAGE: &str = "eng";

/// Default upper bound in seconds for a single image recognition call.
pub const DEFAULT_OCR_TIMEOUT_SECS: u64 = 120;
