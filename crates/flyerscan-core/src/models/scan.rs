use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque handle to an uploaded flyer image.
///
/// Flyerscan never dereferences the handle; only the OCR engine implementation
/// knows how to resolve it (file path, object key, upload id, ...).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ImageRef(String);

impl ImageRef {
    pub fn new(handle: impl Into<String>) -> Self {
        Self(handle.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ImageRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Raw OCR output for one image, immutable for the duration of a batch run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawScan {
    pub image: ImageRef,
    pub recognized_text: String,
}

impl RawScan {
    pub fn new(image: ImageRef, recognized_text: impl Into<String>) -> Self {
        Self {
            image,
            recognized_text: recognized_text.into(),
        }
    }
}
