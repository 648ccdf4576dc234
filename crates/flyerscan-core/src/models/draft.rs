use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::scan::ImageRef;

/// Render a clock time in the canonical `HH:mm` form used throughout the
/// extraction pipeline.
pub fn format_hhmm(time: NaiveTime) -> String {
    time.format("%H:%M").to_string()
}

/// Structured, partially-filled candidate event produced from one scanned
/// flyer image.
///
/// Any field the extractors missed is absent and left for the human reviewer
/// to fill in; absence is never an error. The draft is mutable while queued
/// for review and is consumed by approval or rejection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventDraft {
    pub id: Uuid,
    pub title: String,
    pub date: Option<NaiveDate>,
    #[serde(with = "hhmm_opt")]
    pub start_time: Option<NaiveTime>,
    #[serde(with = "hhmm_opt")]
    pub end_time: Option<NaiveTime>,
    pub location: Option<String>,
    /// Leading slice of the recognized text, kept as reviewer context.
    pub description: String,
    pub ticket_link: Option<String>,
    pub image: ImageRef,
    pub extracted_at: DateTime<Utc>,
}

/// Serde helper for `Option<NaiveTime>` as `"HH:mm"` (chrono's default
/// rendering carries seconds, which the draft format never does).
mod hhmm_opt {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%H:%M";

    pub fn serialize<S>(time: &Option<NaiveTime>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match time {
            Some(t) => serializer.serialize_some(&t.format(FORMAT).to_string()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveTime>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value: Option<String> = Option::deserialize(deserializer)?;
        value
            .map(|s| NaiveTime::parse_from_str(&s, FORMAT).map_err(serde::de::Error::custom))
            .transpose()
    }
}
