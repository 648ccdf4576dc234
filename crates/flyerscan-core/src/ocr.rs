//! OCR collaborator boundary
//!
//! The recognition engine is consumed as a black box behind [`OcrEngine`] and
//! injected into the batch scanner. Implementations wrap whatever actually
//! performs recognition (Tesseract, a vision API, a test double); Flyerscan
//! never touches pixels itself.
//!
//! Lifecycle: `initialize` once per batch, `recognize` once per image in
//! order, `terminate` after the batch completes or fails.

use std::sync::Arc;

use async_trait::async_trait;

use crate::models::ImageRef;

/// Callback receiving the engine's fractional progress (0.0..=1.0) for the
/// image currently being recognized.
pub type ProgressSink = Arc<dyn Fn(f32) + Send + Sync>;

/// OCR collaborator errors
#[derive(Debug, thiserror::Error)]
pub enum OcrError {
    #[error("Engine initialization failed: {0}")]
    Init(String),

    #[error("Recognition failed for {image}: {reason}")]
    Recognize { image: ImageRef, reason: String },

    #[error("Recognition of {image} exceeded {timeout_secs}s")]
    Timeout { image: ImageRef, timeout_secs: u64 },

    #[error("Engine teardown failed: {0}")]
    Terminate(String),
}

impl OcrError {
    /// Teardown failures leave nothing to retry; everything else is worth
    /// another attempt once the engine or input is fixed.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, OcrError::Terminate(_))
    }
}

/// Recognition engine abstraction
///
/// One engine instance serves one batch at a time. Callers hold it behind an
/// `Arc<dyn OcrEngine>` and pass it into the scanner explicitly; there is no
/// process-wide engine.
#[async_trait]
pub trait OcrEngine: Send + Sync {
    /// Prepare the engine for a batch, with a language hint such as "eng".
    async fn initialize(&self, language: &str) -> Result<(), OcrError>;

    /// Recognize one image, reporting fractional progress to `progress` as
    /// recognition advances. Returns the raw recognized text.
    async fn recognize(&self, image: &ImageRef, progress: ProgressSink)
        -> Result<String, OcrError>;

    /// Release engine resources after the batch.
    async fn terminate(&self) -> Result<(), OcrError>;
}
