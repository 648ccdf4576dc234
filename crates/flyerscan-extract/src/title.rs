//! Event title extraction
//!
//! Flyer headlines are the least predictable field: the title may follow a
//! presenter credit, precede a "TOUR"/"FESTIVAL" suffix, shout in all caps,
//! or hide in quotes. The cascade tries labeled and typographic cues first
//! and only then falls back to the first non-empty line.

use anyhow::{Context, Result};
use regex::Regex;

/// Title returned when the recognized text is entirely empty.
pub const UNTITLED_EVENT: &str = "Untitled Event";

pub struct TitleExtractor {
    presenter: Regex,
    genre_suffix: Regex,
    caps_opening_line: Regex,
    caps_run: Regex,
    quoted: Regex,
    labeled: Regex,
    leading_article: Regex,
}

impl TitleExtractor {
    pub fn new() -> Result<Self> {
        Ok(Self {
            // Keyword patterns are deliberately case-sensitive: flyer credits
            // and labels are set in caps, and lowercase "presents"/"show" in
            // running text is almost never the headline.
            presenter: Regex::new(r"(?m)(?:PROUDLY\s+PRESENTS|PRESENTS|FEATURING)\s*:?\s*(.+)$")
                .context("Failed to compile presenter pattern")?,
            genre_suffix: Regex::new(
                r"(?m)^(.{3,60}?)\s+(?:TOUR|CONCERT|FESTIVAL|SHOW|PERFORMANCE)\b",
            )
            .context("Failed to compile genre suffix pattern")?,
            caps_opening_line: Regex::new(r"(?m)\A\s*([A-Z0-9][^a-z\r\n]{2,}?)\s*$")
                .context("Failed to compile opening line pattern")?,
            caps_run: Regex::new(r"(?m)^([^a-z\r\n]{10,})")
                .context("Failed to compile caps run pattern")?,
            quoted: Regex::new("[\"\u{201c}]([^\"\u{201d}\r\n]{2,})[\"\u{201d}]")
                .context("Failed to compile quoted pattern")?,
            labeled: Regex::new(r"(?m)^(?:EVENT|SHOW|GIG|PARTY)\s*:\s*(.+)$")
                .context("Failed to compile label pattern")?,
            leading_article: Regex::new(r"(?i)^(?:THE|AN|A)\s+")
                .context("Failed to compile leading article pattern")?,
        })
    }

    /// Extract the event title. Always produces something: the cascade falls
    /// back to the first non-empty line, and on fully empty input to
    /// [`UNTITLED_EVENT`].
    pub fn extract(&self, text: &str) -> String {
        let cascade = [
            &self.presenter,
            &self.genre_suffix,
            &self.caps_opening_line,
            &self.caps_run,
            &self.quoted,
            &self.labeled,
        ];
        for pattern in cascade {
            if let Some(caps) = pattern.captures(text) {
                if let Some(title) = self.clean(&caps[1]) {
                    return title;
                }
            }
        }

        text.lines()
            .map(str::trim)
            .find(|line| !line.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| UNTITLED_EVENT.to_string())
    }

    /// Strip a leading article and surrounding noise from a captured title.
    /// Returns `None` when nothing useful survives, so the cascade moves on.
    fn clean(&self, captured: &str) -> Option<String> {
        let trimmed = captured.trim().trim_matches(|c| c == ':' || c == '-');
        let stripped = self.leading_article.replace(trimmed.trim(), "");
        let title = stripped.trim();
        if title.is_empty() {
            None
        } else {
            Some(title.to_string())
        }
    }
}
