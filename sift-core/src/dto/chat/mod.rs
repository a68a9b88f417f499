//! Chat session DTOs
//!
//! Shapes exchanged with the conversational session service that issues
//! session identifiers.

use serde::{Deserialize, Serialize};

/// Reply to `POST /chat/start`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StartChatResponse {
    pub message: String,
    pub session_id: String,
    #[serde(default)]
    pub is_complete: bool,
}

/// Body of `POST /chat/message`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessageRequest {
    pub message: String,
    pub session_id: String,
}

/// Reply to `POST /chat/message`
///
/// Once `is_complete` is true the session has produced its search query and
/// the analysis pipeline has been started for it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessageResponse {
    pub message: String,
    pub is_complete: bool,
    pub session_id: String,
    #[serde(default)]
    pub youtube_results: Option<Vec<VideoReference>>,
    #[serde(default)]
    pub processed: bool,
}

/// A video returned by the search step of a completed conversation
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VideoReference {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub link: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_incomplete_reply_without_results() {
        let json = r#"{
            "message": "Who is the target audience?",
            "is_complete": false,
            "session_id": "20250119_041143",
            "youtube_results": null,
            "processed": false
        }"#;

        let reply: ChatMessageResponse = serde_json::from_str(json).unwrap();
        assert!(!reply.is_complete);
        assert!(reply.youtube_results.is_none());
    }

    #[test]
    fn test_video_reference_tolerates_missing_fields() {
        let json = r#"{"title": "Best bottles 2025"}"#;
        let video: VideoReference = serde_json::from_str(json).unwrap();
        assert_eq!(video.title, "Best bottles 2025");
        assert!(video.link.is_empty());
    }
}
