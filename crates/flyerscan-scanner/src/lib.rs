//! Flyerscan Batch Scanner
//!
//! Drives an injected OCR engine over a batch of flyer images, one image at
//! a time, and turns each recognition result into an event draft via the
//! extraction pipeline. Sequential processing bounds the engine's peak load
//! and keeps per-image progress reporting simple.

pub mod batch;

pub use batch::{BatchScanner, ScanOutcome};
