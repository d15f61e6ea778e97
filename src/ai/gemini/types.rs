//! Gemini `generateContent` payload types.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};

/// Gemini content container used in both requests and responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Content {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default)]
    pub parts: Vec<Part>,
}

impl Content {
    pub fn user(parts: Vec<Part>) -> Self {
        Self {
            role: Some("user".to_string()),
            parts,
        }
    }
}

/// Untagged union of text and inline media content parts.
///
/// Variant order matters for `#[serde(untagged)]` decoding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Part {
    Text {
        text: String,
    },
    InlineData {
        #[serde(rename = "inlineData")]
        inline_data: InlineData,
    },
}

impl Part {
    pub fn text(text: impl Into<String>) -> Self {
        Part::Text { text: text.into() }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Part::Text { text } => Some(text),
            Part::InlineData { .. } => None,
        }
    }
}

/// Base64 inline payload used for image/vision requests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InlineData {
    pub mime_type: String,
    pub data: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
}

impl GenerateContentRequest {
    /// Checks the payload shape before it is dispatched.
    pub fn validate(&self) -> Result<()> {
        if self.contents.is_empty() {
            return Err(Error::Invariant("request has no contents".to_string()));
        }
        for content in &self.contents {
            if content.parts.is_empty() {
                return Err(Error::Invariant("request content has no parts".to_string()));
            }
            for part in &content.parts {
                match part {
                    Part::Text { text } if text.trim().is_empty() => {
                        return Err(Error::Invariant("request has an empty text part".to_string()));
                    }
                    Part::InlineData { inline_data } if inline_data.mime_type.is_empty() => {
                        return Err(Error::Invariant(
                            "inline data part is missing its MIME type".to_string(),
                        ));
                    }
                    _ => {}
                }
            }
        }
        Ok(())
    }
}

/// Top-level `generateContent` response envelope.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
    pub prompt_feedback: Option<PromptFeedback>,
}

/// Candidate completion item returned by Gemini.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    // Absent when the candidate was stopped for safety.
    pub content: Option<Content>,
    pub finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptFeedback {
    pub block_reason: Option<String>,
}

impl GenerateContentResponse {
    /// Concatenated text parts of the first candidate.
    pub fn text(&self) -> Option<String> {
        let content = self.candidates.first()?.content.as_ref()?;
        let text: String = content.parts.iter().filter_map(Part::as_text).collect();
        if text.is_empty() {
            None
        } else {
            Some(text)
        }
    }

    pub fn finish_reason(&self) -> Option<&str> {
        self.candidates.first()?.finish_reason.as_deref()
    }

    pub fn block_reason(&self) -> Option<&str> {
        self.prompt_feedback
            .as_ref()
            .and_then(|f| f.block_reason.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_request_serializes_gemini_shape() {
        let request = GenerateContentRequest {
            contents: vec![Content::user(vec![
                Part::text("What is this?"),
                Part::InlineData {
                    inline_data: InlineData {
                        mime_type: "image/png".to_string(),
                        data: "iVBORw==".to_string(),
                    },
                },
            ])],
        };

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "contents": [{
                    "role": "user",
                    "parts": [
                        { "text": "What is this?" },
                        { "inlineData": { "mimeType": "image/png", "data": "iVBORw==" } }
                    ]
                }]
            })
        );
    }

    #[test]
    fn test_validate_rejects_malformed_requests() {
        let empty = GenerateContentRequest { contents: vec![] };
        assert!(matches!(empty.validate(), Err(Error::Invariant(_))));

        let no_parts = GenerateContentRequest {
            contents: vec![Content::user(vec![])],
        };
        assert!(no_parts.validate().is_err());

        let blank_text = GenerateContentRequest {
            contents: vec![Content::user(vec![Part::text("  ")])],
        };
        assert!(blank_text.validate().is_err());

        let no_mime = GenerateContentRequest {
            contents: vec![Content::user(vec![Part::InlineData {
                inline_data: InlineData {
                    mime_type: String::new(),
                    data: String::new(),
                },
            }])],
        };
        assert!(no_mime.validate().is_err());
    }

    #[test]
    fn test_response_text_joins_text_parts() {
        let response: GenerateContentResponse = serde_json::from_value(serde_json::json!({
            "candidates": [{
                "content": { "role": "model", "parts": [{ "text": "Step 1. " }, { "text": "**4**" }] },
                "finishReason": "STOP"
            }]
        }))
        .unwrap();

        assert_eq!(response.text().as_deref(), Some("Step 1. **4**"));
    }

    #[test]
    fn test_response_without_candidates_exposes_block_reason() {
        let response: GenerateContentResponse = serde_json::from_value(serde_json::json!({
            "promptFeedback": { "blockReason": "SAFETY" }
        }))
        .unwrap();

        assert!(response.text().is_none());
        assert_eq!(response.block_reason(), Some("SAFETY"));
    }

    #[test]
    fn test_candidate_without_content_has_no_text() {
        let response: GenerateContentResponse = serde_json::from_value(serde_json::json!({
            "candidates": [{ "finishReason": "SAFETY" }]
        }))
        .unwrap();

        assert!(response.text().is_none());
        assert_eq!(response.finish_reason(), Some("SAFETY"));
    }
}
