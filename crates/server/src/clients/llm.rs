//! OpenAI-compatible LLM client for query analysis.
//!
//! Asks the chat-completions endpoint for a strict JSON object
//! `{"intent": ..., "keywords": [...]}` and parses it tolerantly: models
//! routinely wrap JSON in Markdown code fences despite instructions not to.
//! Any parse failure is a [`BackendError::Malformed`], which the analyzer
//! treats as a cue to fall back to rule-based analysis.

use crate::clients::{check_status, transport_error};
use async_trait::async_trait;
use callrank_core::{BackendError, Intent, LlmAnalysis, LlmBackend};
use serde::Deserialize;
use serde_json::json;

const SYSTEM_PROMPT: &str = "You classify call-center search queries. \
Respond with a single JSON object {\"intent\": string, \"keywords\": [string]} \
and nothing else. intent must be one of: incoming_calls, complaint, \
operator_conduct, sales, positive_feedback, generic. keywords are the \
content-bearing search terms from the query.";

/// Client for an OpenAI-compatible chat-completions API.
pub struct LlmClient {
    client: reqwest::Client,
    base_url: String,
    model: String,
    api_key: Option<String>,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Deserialize)]
struct ChatMessage {
    content: String,
}

#[derive(Deserialize)]
struct AnalysisJson {
    intent: String,
    #[serde(default)]
    keywords: Vec<String>,
}

impl LlmClient {
    pub fn new(
        client: reqwest::Client,
        base_url: impl Into<String>,
        model: impl Into<String>,
        api_key: Option<String>,
    ) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            model: model.into(),
            api_key,
        }
    }
}

#[async_trait]
impl LlmBackend for LlmClient {
    async fn extract(&self, query: &str) -> Result<LlmAnalysis, BackendError> {
        let url = format!("{}/v1/chat/completions", self.base_url);
        let body = json!({
            "model": self.model,
            "temperature": 0,
            "messages": [
                { "role": "system", "content": SYSTEM_PROMPT },
                { "role": "user", "content": query },
            ]
        });

        let mut request = self.client.post(&url).json(&body);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }
        let resp = request.send().await.map_err(transport_error)?;
        let resp = check_status(resp).await?;

        let parsed: ChatResponse = resp
            .json()
            .await
            .map_err(|e| BackendError::Malformed(e.to_string()))?;
        let content = parsed
            .choices
            .first()
            .map(|c| c.message.content.as_str())
            .ok_or_else(|| BackendError::Malformed("empty choices array".into()))?;

        let analysis: AnalysisJson = serde_json::from_str(strip_code_fences(content))
            .map_err(|e| BackendError::Malformed(format!("unparseable analysis JSON: {e}")))?;

        if Intent::from_label(&analysis.intent).is_none() {
            return Err(BackendError::Malformed(format!(
                "unknown intent label '{}'",
                analysis.intent
            )));
        }

        Ok(LlmAnalysis {
            intent: analysis.intent,
            keywords: analysis.keywords,
        })
    }
}

/// Strips a surrounding Markdown code fence (with optional language tag)
/// from a model response, returning the inner text.
fn strip_code_fences(content: &str) -> &str {
    let trimmed = content.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    // Drop the language tag line, e.g. "```json".
    let body = match rest.split_once('\n') {
        Some((_, body)) => body,
        None => rest,
    };
    body.strip_suffix("```").unwrap_or(body).trim()
}
