//! Ticket link extraction
//!
//! Cascade: label-prefixed URL, URL on a known ticketing domain, any bare
//! http(s) URL, and finally a schemeless known-domain path. Whatever matches
//! is normalized to carry an `https://` scheme. No fallback.

use anyhow::{Context, Result};
use regex::Regex;

/// Ticketing domains recognized without any label or scheme.
const TICKETING_DOMAINS: &str =
    "eventbrite|ticketmaster|dice|stubhub|livenation|axs|seetickets|ticketweb";

pub struct TicketLinkExtractor {
    labeled: Regex,
    known_domain_url: Regex,
    any_url: Regex,
    bare_known_domain: Regex,
}

impl TicketLinkExtractor {
    pub fn new() -> Result<Self> {
        Ok(Self {
            labeled: Regex::new(
                r"(?im)\b(?:tickets?|tix|buy|rsvp)\s*(?:@|:)?\s*((?:https?://)?[\w-]+(?:\.[\w-]+)+(?:/\S*)?)",
            )
            .context("Failed to compile labeled link pattern")?,
            known_domain_url: Regex::new(&format!(
                r"(?i)\b(https?://(?:www\.)?(?:{TICKETING_DOMAINS})\.[a-z]{{2,}}\S*)"
            ))
            .context("Failed to compile known domain pattern")?,
            any_url: Regex::new(r"(?i)\b(https?://\S+)")
                .context("Failed to compile bare URL pattern")?,
            bare_known_domain: Regex::new(&format!(
                r"(?i)\b((?:www\.)?(?:{TICKETING_DOMAINS})\.[a-z]{{2,}}(?:/\S*)?)"
            ))
            .context("Failed to compile schemeless domain pattern")?,
        })
    }

    /// Extract the ticket URL, normalized to an `https://` scheme, or `None`.
    pub fn extract(&self, text: &str) -> Option<String> {
        let cascade = [
            &self.labeled,
            &self.known_domain_url,
            &self.any_url,
            &self.bare_known_domain,
        ];
        for pattern in cascade {
            if let Some(caps) = pattern.captures(text) {
                if let Some(link) = normalize_link(&caps[1]) {
                    return Some(link);
                }
            }
        }
        None
    }
}

/// Trim trailing flyer punctuation and force a scheme.
fn normalize_link(captured: &str) -> Option<String> {
    let trimmed = captured.trim_end_matches(['.', ',', ';', ')', '!', '?']);
    if trimmed.is_empty() {
        return None;
    }
    let lower = trimmed.to_lowercase();
    if lower.starts_with("http://") || lower.starts_with("https://") {
        Some(trimmed.to_string())
    } else {
        Some(format!("https://{trimmed}"))
    }
}
