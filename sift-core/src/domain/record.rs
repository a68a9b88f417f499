//! Analysis record domain types

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

/// Analysis record keyed by session identifier
///
/// Created when a session produces its search query; the two analysis
/// channels are filled in later, independently, by the external pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisRecord {
    #[serde(alias = "_id")]
    pub session_id: String,
    pub query: String,
    #[serde(rename = "timestamp")]
    pub created_at: DateTime<Utc>,
    #[serde(
        rename = "youtube_groq_analysis",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub youtube_analysis: Option<String>,
    #[serde(
        rename = "reddit_groq_insight",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub reddit_insight: Option<String>,
}

impl AnalysisRecord {
    /// Creates a record with no analysis output yet
    pub fn new(session_id: impl Into<String>, query: impl Into<String>) -> Self {
        Self {
            session_id: session_id.into(),
            query: query.into(),
            created_at: Utc::now(),
            youtube_analysis: None,
            reddit_insight: None,
        }
    }

    /// A record is complete once both analysis channels are present
    pub fn is_complete(&self) -> bool {
        is_present(&self.youtube_analysis) && is_present(&self.reddit_insight)
    }
}

/// Returns true when an optional text field holds a non-empty value
pub fn is_present(field: &Option<String>) -> bool {
    field.as_deref().is_some_and(|value| !value.is_empty())
}

/// Parses a record timestamp
///
/// Accepts RFC 3339 as well as the naive ISO-8601 form (no offset) written by
/// the session backend, which is interpreted as UTC.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Utc));
    }

    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|naive| naive.and_utc())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn test_new_record_is_incomplete() {
        let record = AnalysisRecord::new("S1", "running shoes ad");
        assert!(!record.is_complete());
    }

    #[test]
    fn test_completeness_requires_both_channels() {
        let mut record = AnalysisRecord::new("S1", "q");

        record.youtube_analysis = Some("yt-analysis".to_string());
        assert!(!record.is_complete());

        record.reddit_insight = Some(String::new());
        assert!(!record.is_complete());

        record.reddit_insight = Some("reddit-insight".to_string());
        assert!(record.is_complete());
    }

    #[test]
    fn test_deserialize_accepts_document_id() {
        let json = r#"{
            "_id": "20250119_041143",
            "query": "eco friendly water bottle",
            "timestamp": "2025-01-19T04:11:43Z",
            "youtube_groq_analysis": "yt"
        }"#;

        let record: AnalysisRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.session_id, "20250119_041143");
        assert_eq!(record.youtube_analysis.as_deref(), Some("yt"));
        assert_eq!(record.reddit_insight, None);
    }

    #[test]
    fn test_serialize_uses_wire_names() {
        let mut record = AnalysisRecord::new("S1", "q");
        record.reddit_insight = Some("r".to_string());

        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["session_id"], "S1");
        assert_eq!(value["reddit_groq_insight"], "r");
        assert!(value.get("youtube_groq_analysis").is_none());
        assert!(value.get("timestamp").is_some());
    }

    #[test]
    fn test_parse_timestamp_formats() {
        let rfc = parse_timestamp("2025-01-19T04:11:43+00:00").unwrap();
        assert_eq!(rfc.hour(), 4);

        let naive = parse_timestamp("2025-01-19T04:11:43.512345").unwrap();
        assert_eq!(naive.day(), 19);
        assert_eq!(naive.second(), 43);

        assert!(parse_timestamp("yesterday").is_none());
    }
}
