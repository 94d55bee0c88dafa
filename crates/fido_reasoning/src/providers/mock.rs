//! Canned-response model for tests and offline runs.

use crate::llm::{CompletionParams, GoalModel};
use anyhow::Result;

#[derive(Debug, Clone)]
pub struct MockModel {
    response: String,
}

impl Default for MockModel {
    fn default() -> Self {
        Self {
            response: r#"[("Jump", [("Excitement", 0.4), ("Happy", 0.3)]), ("Sit", [("Happy", 0.25)])]"#
                .to_string(),
        }
    }
}

impl MockModel {
    pub fn with_response(response: impl Into<String>) -> Self {
        Self {
            response: response.into(),
        }
    }
}

#[async_trait::async_trait]
impl GoalModel for MockModel {
    async fn complete(&self, _system: &str, _user: &str, _params: &CompletionParams) -> Result<String> {
        Ok(self.response.clone())
    }
}
