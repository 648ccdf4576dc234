//! Data models for the extraction pipeline
//!
//! This module contains the data structures flowing from the OCR boundary
//! through extraction into the review queue.

mod draft;
mod scan;

// Re-export all models for convenient imports
pub use draft::{format_hhmm, EventDraft};
pub use scan::{ImageRef, RawScan};
