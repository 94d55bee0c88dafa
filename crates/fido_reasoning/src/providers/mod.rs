pub mod mock;
pub mod openai;

pub use mock::MockModel;
pub use openai::OpenAiModel;

use crate::llm::GoalModel;
use anyhow::Result;
use fido_core::LlmConfig;
use std::sync::Arc;

/// Construct a model client from config. `mock` is always available for
/// offline runs and tests.
pub fn from_config(config: &LlmConfig) -> Result<Arc<dyn GoalModel>> {
    match config.provider.as_str() {
        "openai" => Ok(Arc::new(OpenAiModel::new(
            &config.model,
            config.base_url.as_deref(),
        )?)),
        "mock" => Ok(Arc::new(MockModel::default())),
        other => anyhow::bail!("unknown LLM provider '{}'", other),
    }
}
