//! HTTP client for the chat-completion service

use crate::error::{Result, ResumeGptError};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<Message>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Message {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: Message,
}

/// One request/reply exchange per call, no retry and no streaming.
pub struct CompletionClient {
    http: reqwest::Client,
    base_url: String,
    model: String,
    api_key: String,
}

impl CompletionClient {
    pub fn new(base_url: &str, model: &str, api_key: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.to_string(),
            api_key,
        }
    }

    /// Submit a single user-role prompt and return the raw reply text.
    pub async fn complete(&self, prompt: &str) -> Result<String> {
        let request = ChatRequest {
            model: self.model.clone(),
            messages: vec![Message {
                role: "user".to_string(),
                content: prompt.to_string(),
            }],
        };

        let response = self
            .http
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ResumeGptError::ServiceUnavailable(format!(
                "completion request failed with status {}: {}",
                status,
                truncate(&body, 300)
            )));
        }

        let reply: ChatResponse = response.json().await.map_err(|e| {
            ResumeGptError::ServiceUnavailable(format!("unreadable completion reply: {}", e))
        })?;

        reply
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| {
                ResumeGptError::ServiceUnavailable("completion reply contained no choices".into())
            })
    }
}

fn truncate(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
