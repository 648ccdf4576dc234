//! Flyerscan Core Library
//!
//! This crate provides core domain models, error types, configuration, and the
//! OCR collaborator boundary shared across all Flyerscan components.

pub mod config;
pub mod constants;
pub mod error;
pub mod models;
pub mod ocr;

// Re-export commonly used types
pub use config::ScannerConfig;
pub use error::AppError;
pub use ocr::{OcrEngine, OcrError, ProgressSink};
