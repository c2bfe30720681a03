use async_trait::async_trait;
use tracing::warn;

use medicall_flow::{Context, NextAction, Result, Task, TaskResult};

use super::session_keys;

use crate::llm::{ConditionSummarizer, SUMMARY_FALLBACK};
use crate::models::MedicallRequest;

pub struct SummarizeConditionTask {
    summarizer: ConditionSummarizer,
}

impl SummarizeConditionTask {
    pub fn new(summarizer: ConditionSummarizer) -> Self {
        Self { summarizer }
    }
}

#[async_trait]
impl Task for SummarizeConditionTask {
    async fn run(&self, context: Context) -> Result<TaskResult> {
        let request: MedicallRequest = context.require(session_keys::REQUEST).await?;

        let summary = self
            .summarizer
            .summarize(&request.patient_condition)
            .await
            .unwrap_or_else(|e| {
                warn!(error = %e, "Condition summary unavailable");
                SUMMARY_FALLBACK.to_string()
            });

        context.set(session_keys::CONDITION_SUMMARY, summary).await?;
        Ok(TaskResult::new(NextAction::Continue))
    }
}
