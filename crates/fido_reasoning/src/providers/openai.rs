//! OpenAI-compatible chat-completions client.

use crate::llm::{CompletionParams, GoalModel};
use crate::retry::{send_with_retry, RetryPolicy};
use anyhow::{Context, Result};
use reqwest::Client;
use serde_json::{json, Value};
use std::env;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct OpenAiModel {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
    retry: RetryPolicy,
}

impl OpenAiModel {
    /// Reads `OPENAI_API_KEY` from the environment; a missing key is an
    /// immediate error rather than a silent mock fallback.
    pub fn new(model: &str, base_url: Option<&str>) -> Result<Self> {
        let api_key =
            env::var("OPENAI_API_KEY").context("OPENAI_API_KEY environment variable not set")?;
        let base_url = base_url
            .map(str::to_string)
            .or_else(|| env::var("OPENAI_BASE_URL").ok())
            .unwrap_or_else(|| "https://api.openai.com/v1".to_string())
            .trim_end_matches('/')
            .to_string();

        Ok(Self {
            client: Client::builder()
                .timeout(Duration::from_secs(60))
                .build()?,
            api_key,
            base_url,
            model: model.to_string(),
            retry: RetryPolicy::default(),
        })
    }
}

#[async_trait::async_trait]
impl GoalModel for OpenAiModel {
    async fn complete(
        &self,
        system: &str,
        user: &str,
        params: &CompletionParams,
    ) -> Result<String> {
        let payload = json!({
            "model": self.model,
            "messages": [
                {"role": "system", "content": system},
                {"role": "user", "content": user},
            ],
            "max_tokens": params.max_tokens,
            "temperature": params.temperature,
        });

        let url = format!("{}/chat/completions", self.base_url);
        let response = send_with_retry(&self.retry, "openai", || async {
            self.client
                .post(&url)
                .header("Authorization", format!("Bearer {}", self.api_key))
                .json(&payload)
                .send()
                .await
                .context("Failed to send request to OpenAI")
        })
        .await?;

        let body: Value = response.json().await.context("Invalid JSON from OpenAI")?;
        let content = body["choices"][0]["message"]["content"]
            .as_str()
            .map(str::trim)
            .unwrap_or_default();
        if content.is_empty() {
            anyhow::bail!("OpenAI returned an empty completion");
        }
        Ok(content.to_string())
    }
}
