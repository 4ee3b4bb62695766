//! Chat-completions wire types and per-style prompts.

use docsum_core::SummaryStyle;
use serde::{Deserialize, Serialize};

/// Path appended to the configured base URL.
pub const CHAT_COMPLETIONS_PATH: &str = "v1/chat/completions";

/// System instruction sent with every request.
pub const SYSTEM_PROMPT: &str = "You are a helpful assistant that summarizes text content.";

/// Sampling temperature.
pub const TEMPERATURE: f32 = 0.7;

/// Upper bound on generated tokens.
pub const MAX_TOKENS: u32 = 500;

/// The instruction prefix for each style.
pub fn style_prompt(style: SummaryStyle) -> &'static str {
    match style {
        SummaryStyle::Brief => "Provide a brief, concise summary in 2-3 sentences.",
        SummaryStyle::Detailed => {
            "Provide a detailed summary covering all main points and key details."
        }
        SummaryStyle::BulletPoints => {
            "Provide a summary in bullet points, highlighting the key takeaways."
        }
    }
}

/// One chat message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// `system`, `user` or `assistant`.
    pub role: String,
    /// Message text. The service may send `null`.
    #[serde(default)]
    pub content: Option<String>,
}

impl ChatMessage {
    fn new(role: &str, content: String) -> Self {
        Self {
            role: role.to_string(),
            content: Some(content),
        }
    }
}

/// Request body for `POST /v1/chat/completions`.
#[derive(Debug, Clone, Serialize)]
pub struct ChatCompletionRequest {
    /// Model name.
    pub model: String,
    /// Conversation, system prompt first.
    pub messages: Vec<ChatMessage>,
    /// Sampling temperature.
    pub temperature: f32,
    /// Upper bound on generated tokens.
    pub max_tokens: u32,
}

impl ChatCompletionRequest {
    /// Build the summarization request for `content` in `style`.
    pub fn summarize(model: &str, content: &str, style: SummaryStyle) -> Self {
        Self {
            model: model.to_string(),
            messages: vec![
                ChatMessage::new("system", SYSTEM_PROMPT.to_string()),
                ChatMessage::new(
                    "user",
                    format!("{}\n\nText to summarize:\n{content}", style_prompt(style)),
                ),
            ],
            temperature: TEMPERATURE,
            max_tokens: MAX_TOKENS,
        }
    }
}

/// Response body. Fields not modeled here are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatCompletionResponse {
    /// Generated alternatives; only the first is used.
    #[serde(default)]
    pub choices: Vec<ChatChoice>,
}

/// One generated alternative.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatChoice {
    /// The generated message.
    pub message: ChatMessage,
}

impl ChatCompletionResponse {
    /// Trimmed text of the first choice, if it has any.
    pub fn first_text(&self) -> Option<String> {
        self.choices
            .first()
            .and_then(|c| c.message.content.as_deref())
            .map(str::trim)
            .filter(|text| !text.is_empty())
            .map(str::to_string)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_carries_style_prompt_and_content() {
        let req = ChatCompletionRequest::summarize("m", "hello world", SummaryStyle::BulletPoints);
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["model"], "m");
        assert_eq!(json["max_tokens"], 500);
        assert_eq!(json["messages"][0]["role"], "system");
        assert_eq!(json["messages"][0]["content"], SYSTEM_PROMPT);
        let user = json["messages"][1]["content"].as_str().unwrap();
        assert!(user.starts_with("Provide a summary in bullet points"));
        assert!(user.ends_with("Text to summarize:\nhello world"));
    }

    #[test]
    fn every_style_has_distinct_prompt() {
        let prompts: std::collections::HashSet<_> =
            SummaryStyle::ALL.into_iter().map(style_prompt).collect();
        assert_eq!(prompts.len(), SummaryStyle::ALL.len());
    }

    #[test]
    fn first_text_trims_and_rejects_blank() {
        let parse = |v: serde_json::Value| -> ChatCompletionResponse {
            serde_json::from_value(v).unwrap()
        };
        let ok = parse(serde_json::json!({
            "id": "x",
            "choices": [{"index": 0, "message": {"role": "assistant", "content": "  done \n"}}]
        }));
        assert_eq!(ok.first_text().as_deref(), Some("done"));

        let blank = parse(serde_json::json!({
            "choices": [{"message": {"role": "assistant", "content": "   "}}]
        }));
        assert!(blank.first_text().is_none());

        let null = parse(serde_json::json!({
            "choices": [{"message": {"role": "assistant", "content": null}}]
        }));
        assert!(null.first_text().is_none());

        assert!(parse(serde_json::json!({})).first_text().is_none());
    }
}
