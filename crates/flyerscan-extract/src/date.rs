//! Event date extraction
//!
//! Cascade over full textual dates, numeric dates, line-initial dates,
//! labeled dates, and parenthesized dates. Every matched substring is
//! validated against the calendar before it wins; a candidate that fails
//! validation is skipped and the cascade continues. When no full pattern
//! parses, a last-resort component reconstruction looks for a month name, a
//! day number, and a year scattered anywhere in the text. The extractor
//! never guesses: missing components mean an absent date.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use regex::Regex;

/// Month-name alternation shared by several patterns. Longer names first so
/// the alternation never stops at a prefix.
const MONTH_PATTERN: &str = "January|February|March|April|May|June|July|August|September|October|\
     November|December|Jan|Feb|Mar|Apr|Jun|Jul|Aug|Sept|Sep|Oct|Nov|Dec";

/// Map a matched month name (full or abbreviated, any case) to 1..=12.
fn month_number(name: &str) -> Option<u32> {
    let lower = name.to_lowercase();
    let prefix = lower.get(..3)?;
    match prefix {
        "jan" => Some(1),
        "feb" => Some(2),
        "mar" => Some(3),
        "apr" => Some(4),
        "may" => Some(5),
        "jun" => Some(6),
        "jul" => Some(7),
        "aug" => Some(8),
        "sep" => Some(9),
        "oct" => Some(10),
        "nov" => Some(11),
        "dec" => Some(12),
        _ => None,
    }
}

pub struct DateExtractor {
    month_day_year: Regex,
    day_month_year: Regex,
    numeric: Regex,
    line_initial: Regex,
    labeled: Regex,
    parenthesized: Regex,
    loose_numeric: Regex,
    any_month: Regex,
    any_day: Regex,
    any_year: Regex,
}

impl DateExtractor {
    pub fn new() -> Result<Self> {
        Ok(Self {
            month_day_year: Regex::new(&format!(
                r"(?i)\b({m})\.?\s+(\d{{1,2}})(?:st|nd|rd|th)?\s*,?\s*(\d{{4}})\b",
                m = MONTH_PATTERN
            ))
            .context("Failed to compile month-day-year pattern")?,
            day_month_year: Regex::new(&format!(
                r"(?i)\b(\d{{1,2}})(?:st|nd|rd|th)?\s+(?:of\s+)?({m})\.?\s*,?\s*(\d{{4}})\b",
                m = MONTH_PATTERN
            ))
            .context("Failed to compile day-month-year pattern")?,
            numeric: Regex::new(r"\b(\d{1,2})[/-](\d{1,2})[/-](\d{4})\b")
                .context("Failed to compile numeric date pattern")?,
            line_initial: Regex::new(&format!(
                r"(?im)^\s*(\d{{1,2}})(?:st|nd|rd|th)?\s+(?:of\s+)?({m})\b\.?\s*,?\s*(\d{{4}})?",
                m = MONTH_PATTERN
            ))
            .context("Failed to compile line-initial date pattern")?,
            labeled: Regex::new(r"(?im)^\s*(?:DATE|WHEN)\s*:\s*(.+)$")
                .context("Failed to compile labeled date pattern")?,
            parenthesized: Regex::new(r"\(([^()]*\d{2}[^()]*)\)")
                .context("Failed to compile parenthesized date pattern")?,
            loose_numeric: Regex::new(r"\b(\d{1,2})[./-](\d{1,2})[./-](\d{2,4})\b")
                .context("Failed to compile loose numeric date pattern")?,
            any_month: Regex::new(&format!(r"(?i)\b({m})\b", m = MONTH_PATTERN))
                .context("Failed to compile month component pattern")?,
            any_day: Regex::new(r"\b(\d{1,2})(?:st|nd|rd|th)?\b")
                .context("Failed to compile day component pattern")?,
            any_year: Regex::new(r"\b(2\d{3})\b")
                .context("Failed to compile year component pattern")?,
        })
    }

    /// Extract the first calendar-valid date, or `None`.
    pub fn extract(&self, text: &str) -> Option<NaiveDate> {
        if let Some(date) = self.full_patterns(text) {
            return Some(date);
        }

        // Label-prefixed and parenthesized candidates restrict the search to
        // the captured fragment; the narrower context justifies the looser
        // numeric forms (dot separators, two-digit years) on top of the full
        // patterns.
        for caps in self.labeled.captures_iter(text) {
            if let Some(date) = self.fragment(&caps[1]) {
                return Some(date);
            }
        }
        for caps in self.parenthesized.captures_iter(text) {
            if let Some(date) = self.fragment(&caps[1]) {
                return Some(date);
            }
        }

        self.reconstruct_components(text)
    }

    /// Priority 1-3: adjacent full-date patterns, first calendar-valid match
    /// wins.
    fn full_patterns(&self, text: &str) -> Option<NaiveDate> {
        for caps in self.month_day_year.captures_iter(text) {
            let month = month_number(&caps[1]);
            let date = month.and_then(|m| ymd(&caps[3], m, &caps[2]));
            if date.is_some() {
                return date;
            }
        }
        for caps in self.day_month_year.captures_iter(text) {
            let month = month_number(&caps[2]);
            let date = month.and_then(|m| ymd(&caps[3], m, &caps[1]));
            if date.is_some() {
                return date;
            }
        }
        // Numeric dates read month-first, matching the source behavior
        // (07/04/2024 is the 4th of July).
        for caps in self.numeric.captures_iter(text) {
            let month: Option<u32> = caps[1].parse().ok();
            let date = month.and_then(|m| ymd(&caps[3], m, &caps[2]));
            if date.is_some() {
                return date;
            }
        }
        for caps in self.line_initial.captures_iter(text) {
            // A line-initial "15 August" often carries its year elsewhere on
            // the flyer; borrow it rather than discarding a precise day+month.
            let year = match caps.get(3) {
                Some(y) => y.as_str().to_string(),
                None => match self.any_year.captures(text) {
                    Some(y) => y[1].to_string(),
                    None => continue,
                },
            };
            let month = month_number(&caps[2]);
            let date = month.and_then(|m| ymd(&year, m, &caps[1]));
            if date.is_some() {
                return date;
            }
        }
        None
    }

    /// Fragment search used for label-prefixed and parenthesized candidates:
    /// the full patterns plus month-first numeric forms with dot separators
    /// and two-digit years.
    fn fragment(&self, fragment: &str) -> Option<NaiveDate> {
        if let Some(date) = self.full_patterns(fragment) {
            return Some(date);
        }
        for caps in self.loose_numeric.captures_iter(fragment) {
            let month: Option<u32> = caps[1].parse().ok();
            let year: Option<i32> = caps[3].parse().ok().map(|y: i32| {
                if y < 100 {
                    2000 + y
                } else {
                    y
                }
            });
            let date = month.and_then(|m| {
                year.and_then(|y| {
                    caps[2]
                        .parse()
                        .ok()
                        .and_then(|d| NaiveDate::from_ymd_opt(y, m, d))
                })
            });
            if date.is_some() {
                return date;
            }
        }
        None
    }

    /// Last resort: independently locate month name, day, and year anywhere
    /// in the text and recombine them. All three must be present.
    fn reconstruct_components(&self, text: &str) -> Option<NaiveDate> {
        let month = self
            .any_month
            .captures(text)
            .and_then(|caps| month_number(&caps[1]))?;
        let year: i32 = self.any_year.captures(text)?[1].parse().ok()?;
        let day = self
            .any_day
            .captures_iter(text)
            .filter_map(|caps| caps[1].parse::<u32>().ok())
            .find(|d| (1..=31).contains(d))?;
        NaiveDate::from_ymd_opt(year, month, day)
    }
}

/// Calendar-validate a year/month/day triple from matched strings.
fn ymd(year: &str, month: u32, day: &str) -> Option<NaiveDate> {
    let year: i32 = year.parse().ok()?;
    let day: u32 = day.parse().ok()?;
    NaiveDate::from_ymd_opt(year, month, day)
}
