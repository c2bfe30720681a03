use async_trait::async_trait;
use tracing::info;

use medicall_flow::{Context, NextAction, Result, Task, TaskResult};

use super::session_keys;

use crate::llm::SuitabilityFilter;
use crate::models::EnrichedHospital;

/// Keeps the hospitals the model judges able to treat the summarized
/// condition, in their original order.
pub struct FilterHospitalsTask {
    suitability: SuitabilityFilter,
}

impl FilterHospitalsTask {
    pub fn new(suitability: SuitabilityFilter) -> Self {
        Self { suitability }
    }
}

#[async_trait]
impl Task for FilterHospitalsTask {
    async fn run(&self, context: Context) -> Result<TaskResult> {
        let hospitals: Vec<EnrichedHospital> =
            context.require(session_keys::ENRICHED_HOSPITALS).await?;
        let summary: String = context.require(session_keys::CONDITION_SUMMARY).await?;

        let total = hospitals.len();
        let mut suitable = Vec::with_capacity(total);
        for hospital in hospitals {
            if self
                .suitability
                .admits(&summary, &hospital.name, &hospital.departments)
                .await
            {
                suitable.push(hospital);
            }
        }

        info!(total, suitable = suitable.len(), "Suitability filter applied");
        context.set(session_keys::HOSPITAL_LIST, suitable).await?;

        Ok(TaskResult::new(NextAction::Continue))
    }
}
