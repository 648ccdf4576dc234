//! Start/end time extraction
//!
//! Four regex families scan the text independently and pool their matches
//! into one candidate set: bare tokens ("7:30pm", "19:30"), start-labeled
//! tokens ("DOORS 8pm"), end-labeled tokens ("ENDS 11pm"), and ranges
//! ("8pm - 11pm", "8 to 11"). Candidates are normalized to canonical `HH:mm`,
//! deduplicated with set semantics, and ordered lexicographically — the
//! simple, reproducible string sort the pipeline has always used as its
//! tie-break. The two lowest become start and end; a lone survivor becomes
//! the start only.

use std::collections::BTreeSet;

use anyhow::{Context, Result};
use chrono::NaiveTime;
use regex::Regex;

use crate::normalize::normalize_time;
use flyerscan_core::models::format_hhmm;

/// Extracted start/end pair; either side may be absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TimeRange {
    pub start: Option<NaiveTime>,
    pub end: Option<NaiveTime>,
}

pub struct TimeRangeExtractor {
    bare: Regex,
    start_labeled: Regex,
    end_labeled: Regex,
    range: Regex,
}

/// A clock token: "7", "7:30", optionally marked am/pm. Hour-only tokens
/// require the marker so stray counts ("3 bands") never pool as times.
const TOKEN: &str = r"\d{1,2}:\d{2}\s*(?:am|pm)?|\d{1,2}\s*(?:am|pm)";

impl TimeRangeExtractor {
    pub fn new() -> Result<Self> {
        Ok(Self {
            bare: Regex::new(&format!(r"(?i)\b({TOKEN})\b"))
                .context("Failed to compile bare time pattern")?,
            start_labeled: Regex::new(&format!(
                r"(?i)\b(?:DOORS?|OPENS?|STARTS?|SHOWTIME|BEGINS?)\s*(?:@|AT)?\s*({TOKEN}|\d{{1,2}})\b"
            ))
            .context("Failed to compile start-labeled pattern")?,
            end_labeled: Regex::new(&format!(
                r"(?i)\b(?:ENDS?|TILL?|UNTIL|CLOSES?)\s*(?:@|AT)?\s*({TOKEN}|\d{{1,2}})\b"
            ))
            .context("Failed to compile end-labeled pattern")?,
            range: Regex::new(&format!(
                r"(?i)\b({TOKEN}|\d{{1,2}})\s*(?:-|–|—|to)\s*({TOKEN}|\d{{1,2}})\b"
            ))
            .context("Failed to compile range pattern")?,
        })
    }

    /// Pool, dedupe, sort, pick. Tokens that fail clock normalization are
    /// dropped from the pool rather than raised.
    pub fn extract(&self, text: &str) -> TimeRange {
        let mut pool: BTreeSet<String> = BTreeSet::new();
        let mut add = |token: &str| {
            if let Some(time) = normalize_time(token) {
                pool.insert(format_hhmm(time));
            }
        };

        for caps in self.bare.captures_iter(text) {
            add(&caps[1]);
        }
        for caps in self.start_labeled.captures_iter(text) {
            add(&caps[1]);
        }
        for caps in self.end_labeled.captures_iter(text) {
            add(&caps[1]);
        }
        for caps in self.range.captures_iter(text) {
            add(&caps[1]);
            add(&caps[2]);
        }

        let mut ordered = pool.into_iter().filter_map(|s| parse_hhmm(&s));
        TimeRange {
            start: ordered.next(),
            end: ordered.next(),
        }
    }
}

fn parse_hhmm(s: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(s, "%H:%M").ok()
}
