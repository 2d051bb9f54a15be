//! generateContent request body and prompt construction.

use serde::{Deserialize, Serialize};

/// Characters of page text submitted for analysis.
pub const MAX_INPUT_CHARS: usize = 3000;

const PROMPT_PREFIX: &str = "Analyze this content and provide key insights: ";

/// Build the analysis prompt from page text, keeping the first [`MAX_INPUT_CHARS`] characters.
pub fn build_prompt(text: &str) -> String {
    let mut prompt = String::with_capacity(PROMPT_PREFIX.len() + text.len().min(MAX_INPUT_CHARS * 4));
    prompt.push_str(PROMPT_PREFIX);
    prompt.extend(text.chars().take(MAX_INPUT_CHARS));
    prompt
}

/// Request body for `models/{model}:generateContent`.
#[derive(Debug, Clone, Serialize)]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
}

impl GenerateContentRequest {
    /// A single user turn holding `prompt`.
    pub fn from_prompt(prompt: impl Into<String>) -> Self {
        Self { contents: vec![Content { role: Some("user".to_string()), parts: vec![Part { text: Some(prompt.into()) }] }] }
    }
}

/// A turn of conversation content.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default)]
    pub parts: Vec<Part>,
}

/// A content part; only text parts are produced or read.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}
