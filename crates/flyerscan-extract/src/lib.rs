//! Flyerscan Extraction Library
//!
//! Heuristic extraction of structured event fields from raw OCR text. Each
//! extractor runs an ordered cascade of patterns over the full recognized
//! text and returns on the first success; pattern order encodes confidence.
//! Flyers are visually designed, not structured documents, so everything here
//! is best-effort with deterministic fallbacks — a miss is an absent value
//! for the reviewer to fill in, never an error.

pub mod assembler;
pub mod date;
pub mod location;
pub mod normalize;
pub mod ticket;
pub mod time_range;
pub mod title;

// Re-export commonly used types
pub use assembler::DraftAssembler;
pub use date::DateExtractor;
pub use location::LocationExtractor;
pub use normalize::normalize_time;
pub use ticket::TicketLinkExtractor;
pub use time_range::{TimeRange, TimeRangeExtractor};
pub use title::TitleExtractor;
