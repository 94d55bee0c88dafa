use anyhow::Result;
use async_trait::async_trait;

/// Sampling parameters for a completion request.
#[derive(Debug, Clone)]
pub struct CompletionParams {
    pub max_tokens: u32,
    pub temperature: f32,
}

impl Default for CompletionParams {
    fn default() -> Self {
        Self {
            max_tokens: 512,
            temperature: 0.7,
        }
    }
}

/// The generative-text collaborator that proposes goals.
///
/// Implementations return the raw completion text; parsing and validation
/// happen downstream in `fido_behavior`.
#[async_trait]
pub trait GoalModel: Send + Sync {
    async fn complete(&self, system: &str, user: &str, params: &CompletionParams)
        -> Result<String>;
}
