//! Draft assembly
//!
//! Pure composition of the five field extractors over one raw scan. The
//! assembler owns the compiled extractors so the pattern cascades are built
//! once per pipeline, not once per image.

use anyhow::{Context, Result};
use chrono::Utc;
use tracing::debug;
use uuid::Uuid;

use flyerscan_core::constants::DESCRIPTION_MAX_CHARS;
use flyerscan_core::models::{EventDraft, RawScan};

use crate::date::DateExtractor;
use crate::location::LocationExtractor;
use crate::ticket::TicketLinkExtractor;
use crate::time_range::TimeRangeExtractor;
use crate::title::TitleExtractor;

pub struct DraftAssembler {
    title: TitleExtractor,
    date: DateExtractor,
    times: TimeRangeExtractor,
    location: LocationExtractor,
    ticket: TicketLinkExtractor,
}

impl DraftAssembler {
    pub fn new() -> Result<Self> {
        Ok(Self {
            title: TitleExtractor::new().context("Failed to build title extractor")?,
            date: DateExtractor::new().context("Failed to build date extractor")?,
            times: TimeRangeExtractor::new().context("Failed to build time range extractor")?,
            location: LocationExtractor::new().context("Failed to build location extractor")?,
            ticket: TicketLinkExtractor::new().context("Failed to build ticket link extractor")?,
        })
    }

    /// Build one draft from one scan. No side effects, no I/O; absent fields
    /// stay absent for the reviewer.
    pub fn assemble(&self, scan: &RawScan) -> EventDraft {
        let text = &scan.recognized_text;
        let times = self.times.extract(text);
        let draft = EventDraft {
            id: Uuid::new_v4(),
            title: self.title.extract(text),
            date: self.date.extract(text),
            start_time: times.start,
            end_time: times.end,
            location: self.location.extract(text),
            description: text.chars().take(DESCRIPTION_MAX_CHARS).collect(),
            ticket_link: self.ticket.extract(text),
            image: scan.image.clone(),
            extracted_at: Utc::now(),
        };
        debug!(
            image = %draft.image,
            title = %draft.title,
            date = ?draft.date,
            "assembled event draft"
        );
        draft
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use flyerscan_core::models::{format_hhmm, ImageRef};

    const FLYER: &str = "CLUB NEON PRESENTS The Night Owls\n\
         July 4, 2024\n\
         DOORS 7PM ... ENDS 11PM\n\
         VENUE: The Echo Lounge\n\
         TICKETS: eventbrite.com/e/night-owls";

    fn assembler() -> DraftAssembler {
        DraftAssembler::new().unwrap()
    }

    fn scan(text: &str) -> RawScan {
        RawScan::new(ImageRef::new("upload-1.jpg"), text)
    }

    #[test]
    fn test_assembles_all_fields() {
        let draft = assembler().assemble(&scan(FLYER));
        assert_eq!(draft.title, "Night Owls");
        assert_eq!(draft.date, NaiveDate::from_ymd_opt(2024, 7, 4));
        assert_eq!(draft.start_time.map(format_hhmm).as_deref(), Some("19:00"));
        assert_eq!(draft.end_time.map(format_hhmm).as_deref(), Some("23:00"));
        assert_eq!(draft.location.as_deref(), Some("Echo Lounge"));
        assert_eq!(
            draft.ticket_link.as_deref(),
            Some("https://eventbrite.com/e/night-owls")
        );
        assert_eq!(draft.image, ImageRef::new("upload-1.jpg"));
    }

    #[test]
    fn test_description_is_leading_slice() {
        let long = "x".repeat(500);
        let draft = assembler().assemble(&scan(&long));
        assert_eq!(draft.description.chars().count(), DESCRIPTION_MAX_CHARS);
    }

    #[test]
    fn test_empty_scan_still_drafts() {
        let draft = assembler().assemble(&scan(""));
        assert_eq!(draft.title, "Untitled Event");
        assert!(draft.date.is_none());
        assert!(draft.start_time.is_none());
        assert!(draft.end_time.is_none());
        assert!(draft.location.is_none());
        assert!(draft.ticket_link.is_none());
        assert!(draft.description.is_empty());
    }

    #[test]
    fn test_drafts_get_distinct_ids() {
        let asm = assembler();
        let a = asm.assemble(&scan(FLYER));
        let b = asm.assemble(&scan(FLYER));
        assert_ne!(a.id, b.id);
        assert_eq!(a.title, b.title);
    }
}
