//! Search ingestion DTOs
//!
//! Used by producers to register a search and attach analysis output to it.

use serde::{Deserialize, Serialize};

/// Request to register a new search
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateSearch {
    pub query: String,
}

/// Analysis output for one or both channels of a search
///
/// Missing fields leave the stored value untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AttachAnalysis {
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

impl AttachAnalysis {
    /// True when the request carries no non-empty output
    pub fn is_empty(&self) -> bool {
        let blank = |field: &Option<String>| field.as_deref().is_none_or(str::is_empty);
        blank(&self.youtube_analysis) && blank(&self.reddit_insight)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attach_analysis_is_empty() {
        assert!(AttachAnalysis::default().is_empty());

        let blank = AttachAnalysis {
            youtube_analysis: Some(String::new()),
            reddit_insight: None,
        };
        assert!(blank.is_empty());

        let attach: AttachAnalysis =
            serde_json::from_str(r#"{"reddit_groq_insight": "insight"}"#).unwrap();
        assert!(!attach.is_empty());
    }
}
