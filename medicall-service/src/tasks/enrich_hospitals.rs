use async_trait::async_trait;
use tracing::{info, warn};

use medicall_flow::{Context, NextAction, Result, Task, TaskResult};

use super::session_keys;

use crate::config::DEFAULT_MAX_CANDIDATES;
use crate::llm::{DepartmentInferrer, TravelEstimator};
use crate::models::{EnrichedHospital, HospitalCandidate, MedicallRequest, TravelEstimate};

/// Attaches a travel estimate and departments to the first `max_candidates`
/// hospitals, one model call after another. The cap never exceeds
/// [`DEFAULT_MAX_CANDIDATES`].
pub struct EnrichHospitalsTask {
    travel: TravelEstimator,
    departments: DepartmentInferrer,
    max_candidates: usize,
}

impl EnrichHospitalsTask {
    pub fn new(travel: TravelEstimator, departments: DepartmentInferrer, max_candidates: usize) -> Self {
        Self {
            travel,
            departments,
            max_candidates: max_candidates.min(DEFAULT_MAX_CANDIDATES),
        }
    }
}

#[async_trait]
impl Task for EnrichHospitalsTask {
    async fn run(&self, context: Context) -> Result<TaskResult> {
        let request: MedicallRequest = context.require(session_keys::REQUEST).await?;
        let candidates: Vec<HospitalCandidate> = context.require(session_keys::CANDIDATES).await?;

        info!(
            candidates = candidates.len(),
            limit = self.max_candidates,
            "Enriching hospitals"
        );

        let mut enriched = Vec::with_capacity(candidates.len().min(self.max_candidates));
        for candidate in candidates.into_iter().take(self.max_candidates) {
            let travel = self
                .travel
                .estimate(&candidate, request.location)
                .await
                .unwrap_or_else(|e| {
                    warn!(hospital = %candidate.name, error = %e, "Travel estimate unavailable");
                    TravelEstimate::unknown()
                });

            let departments = self
                .departments
                .infer(&candidate.name)
                .await
                .unwrap_or_else(|e| {
                    warn!(hospital = %candidate.name, error = %e, "Departments unavailable");
                    Vec::new()
                });

            enriched.push(EnrichedHospital::new(candidate, travel, departments));
        }

        let count = enriched.len();
        context.set(session_keys::ENRICHED_HOSPITALS, enriched).await?;

        Ok(TaskResult::new_with_status(
            NextAction::Continue,
            format!("Enriched {} hospitals", count),
        ))
    }
}
