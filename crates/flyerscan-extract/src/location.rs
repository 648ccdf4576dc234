//! Venue / location extraction
//!
//! Cascade: explicit label, an "at ..." line, a postal-style street address,
//! a capitalized venue name with a recognizable suffix, a "City, ST" pair
//! over the fixed US state table, and finally a parenthesized venue mention.
//! No fallback: a flyer with no recognizable venue yields an absent location.

use anyhow::{Context, Result};
use regex::Regex;

/// US state abbreviations for the "City, ST" pattern.
const US_STATES: &[&str] = &[
    "AL", "AK", "AZ", "AR", "CA", "CO", "CT", "DE", "FL", "GA", "HI", "ID", "IL", "IN", "IA",
    "KS", "KY", "LA", "ME", "MD", "MA", "MI", "MN", "MS", "MO", "MT", "NE", "NV", "NH", "NJ",
    "NM", "NY", "NC", "ND", "OH", "OK", "OR", "PA", "RI", "SC", "SD", "TN", "TX", "UT", "VT",
    "VA", "WA", "WV", "WI", "WY", "DC",
];

/// Venue-type suffixes for the named-venue pattern.
const VENUE_SUFFIXES: &str = "Club|Lounge|Arena|Theatre|Theater|Hall|Ballroom|Bar|Tavern|\
     Stadium|Amphitheatre|Amphitheater|Pavilion|Garden|Gardens|Room|Center|Centre|Warehouse|\
     Brewery|Gallery";

pub struct LocationExtractor {
    labeled: Regex,
    at_line: Regex,
    street_address: Regex,
    named_venue: Regex,
    city_state: Regex,
    parenthesized: Regex,
    paren_venue_hint: Regex,
    leading_preposition: Regex,
}

impl LocationExtractor {
    pub fn new() -> Result<Self> {
        let states = US_STATES.join("|");
        Ok(Self {
            labeled: Regex::new(r"(?im)^\s*(?:AT|VENUE|LOCATION|WHERE)\s*:\s*(.+)$")
                .context("Failed to compile location label pattern")?,
            at_line: Regex::new(r"(?im)^at\s+(.+)$")
                .context("Failed to compile at-line pattern")?,
            street_address: Regex::new(
                r"(?m)\b(\d{1,5}\s+[A-Za-z0-9'. ]+?\s(?:Street|St|Avenue|Ave|Boulevard|Blvd|Road|Rd|Drive|Dr|Lane|Ln|Way|Place|Pl)\.?)(?:\s|,|$)",
            )
            .context("Failed to compile street address pattern")?,
            named_venue: Regex::new(&format!(
                r"\b((?:[A-Z][A-Za-z'&.]*\s+){{0,4}}(?:{VENUE_SUFFIXES}))\b"
            ))
            .context("Failed to compile named venue pattern")?,
            city_state: Regex::new(&format!(r"\b([A-Z][A-Za-z. ]+?,\s*(?:{states}))\b"))
                .context("Failed to compile city-state pattern")?,
            parenthesized: Regex::new(r"\(([^()]+)\)")
                .context("Failed to compile parenthesized pattern")?,
            paren_venue_hint: Regex::new(&format!(r"(?i)\b(?:{VENUE_SUFFIXES}|venue)\b"))
                .context("Failed to compile venue hint pattern")?,
            leading_preposition: Regex::new(r"(?i)^(?:at|in|the)\s+")
                .context("Failed to compile leading preposition pattern")?,
        })
    }

    /// Extract the venue/location string, or `None` when nothing matches.
    pub fn extract(&self, text: &str) -> Option<String> {
        let cascade = [
            &self.labeled,
            &self.at_line,
            &self.street_address,
            &self.named_venue,
            &self.city_state,
        ];
        for pattern in cascade {
            if let Some(caps) = pattern.captures(text) {
                if let Some(location) = self.clean(&caps[1]) {
                    return Some(location);
                }
            }
        }

        // Parenthesized asides only count when they actually talk about a
        // venue; "(21+)" and "(free)" are common flyer noise.
        for caps in self.parenthesized.captures_iter(text) {
            if self.paren_venue_hint.is_match(&caps[1]) {
                if let Some(location) = self.clean(&caps[1]) {
                    return Some(location);
                }
            }
        }
        None
    }

    /// Strip a leading at/in/the and trailing punctuation.
    fn clean(&self, captured: &str) -> Option<String> {
        let stripped = self.leading_preposition.replace(captured.trim(), "");
        let location = stripped.trim().trim_end_matches(['.', ',', ';']).trim();
        if location.is_empty() {
            None
        } else {
            Some(location.to_string())
        }
    }
}
