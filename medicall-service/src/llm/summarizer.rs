use std::sync::Arc;

use super::{LanguageModel, prompts::condition_summary_prompt};
use crate::error::{ModelError, Result};

/// Used in place of a summary when the model call fails
pub const SUMMARY_FALLBACK: &str = "Failed to summarize condition.";

/// Condenses a free-text condition into one sentence for hospital staff
#[derive(Clone)]
pub struct ConditionSummarizer {
    model: Arc<dyn LanguageModel>,
}

impl ConditionSummarizer {
    pub fn new(model: Arc<dyn LanguageModel>) -> Self {
        Self { model }
    }

    pub async fn summarize(&self, condition: &str) -> Result<String> {
        let reply = self
            .model
            .complete(&condition_summary_prompt(condition))
            .await?;

        let summary = reply.replace("**", "").trim().to_string();
        if summary.is_empty() {
            return Err(ModelError::EmptyReply.into());
        }
        Ok(summary)
    }
}
