//! Lookup DTOs for the `/api/db` endpoint

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::domain::poll::PartialRecord;
use crate::domain::record::{AnalysisRecord, parse_timestamp};

/// Request body for a record lookup
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LookupRequest {
    pub session_id: String,
}

/// Successful lookup reply
///
/// Every record field may be missing while the pipeline is still running.
/// `processed` mirrors the completeness predicate as computed by the server.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LookupResponse {
    #[serde(default, alias = "_id", skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
    #[serde(
        rename = "timestamp",
        default,
        deserialize_with = "lenient_timestamp",
        skip_serializing_if = "Option::is_none"
    )]
    pub created_at: Option<DateTime<Utc>>,
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
    #[serde(default)]
    pub processed: bool,
    /// Hint for clients that the record is still being produced
    #[serde(rename = "_polling", default)]
    pub polling: bool,
}

impl LookupResponse {
    /// Converts the reply into the mergeable subset of record fields
    pub fn into_partial(self) -> PartialRecord {
        PartialRecord {
            query: self.query,
            created_at: self.created_at,
            youtube_analysis: self.youtube_analysis,
            reddit_insight: self.reddit_insight,
        }
    }
}

impl From<AnalysisRecord> for LookupResponse {
    fn from(record: AnalysisRecord) -> Self {
        let processed = record.is_complete();
        Self {
            session_id: Some(record.session_id),
            query: Some(record.query),
            created_at: Some(record.created_at),
            youtube_analysis: record.youtube_analysis,
            reddit_insight: record.reddit_insight,
            processed,
            polling: !processed,
        }
    }
}

/// Timestamps that fail to parse are treated as absent rather than
/// failing the whole reply.
fn lenient_timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.as_deref().and_then(parse_timestamp))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_reply_deserializes() {
        let json = r#"{"_id": "S1", "query": "q", "processed": false, "_polling": true}"#;
        let reply: LookupResponse = serde_json::from_str(json).unwrap();

        assert_eq!(reply.session_id.as_deref(), Some("S1"));
        assert!(reply.polling);
        assert!(!reply.processed);
        assert_eq!(reply.youtube_analysis, None);
    }

    #[test]
    fn test_empty_object_deserializes() {
        let reply: LookupResponse = serde_json::from_str("{}").unwrap();
        assert_eq!(reply.into_partial(), PartialRecord::default());
    }

    #[test]
    fn test_unparseable_timestamp_is_absent() {
        let json = r#"{"timestamp": "not a date", "youtube_groq_analysis": "yt"}"#;
        let reply: LookupResponse = serde_json::from_str(json).unwrap();

        assert_eq!(reply.created_at, None);
        assert_eq!(reply.youtube_analysis.as_deref(), Some("yt"));
    }

    #[test]
    fn test_from_complete_record_sets_flags() {
        let mut record = AnalysisRecord::new("S1", "q");
        record.youtube_analysis = Some("a".to_string());
        record.reddit_insight = Some("b".to_string());

        let reply = LookupResponse::from(record);
        assert!(reply.processed);
        assert!(!reply.polling);

        let value = serde_json::to_value(&reply).unwrap();
        assert_eq!(value["_polling"], false);
        assert_eq!(value["youtube_groq_analysis"], "a");
    }
}
