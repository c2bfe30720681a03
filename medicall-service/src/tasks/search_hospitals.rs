use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, warn};

use medicall_flow::{Context, NextAction, Result, Task, TaskResult};

use super::session_keys;

use crate::models::{HospitalCandidate, MedicallRequest};
use crate::places::PlaceSearch;

/// Looks up hospitals around the patient. An unreachable places API or an
/// empty result ends the run with nothing to dispatch.
pub struct SearchHospitalsTask {
    places: Arc<dyn PlaceSearch>,
}

impl SearchHospitalsTask {
    pub fn new(places: Arc<dyn PlaceSearch>) -> Self {
        Self { places }
    }
}

#[async_trait]
impl Task for SearchHospitalsTask {
    async fn run(&self, context: Context) -> Result<TaskResult> {
        let request: MedicallRequest = context.require(session_keys::REQUEST).await?;
        let location = request.location;

        let candidates: Vec<HospitalCandidate> = match self
            .places
            .search_hospitals(location.latitude, location.longitude, request.search_radius)
            .await
        {
            Ok(candidates) => candidates,
            Err(e) => {
                warn!(error = %e, "Hospital search failed");
                return Ok(TaskResult::new_with_status(
                    NextAction::End,
                    format!("Hospital search failed: {}", e),
                ));
            }
        };

        if candidates.is_empty() {
            info!(radius = request.search_radius, "No hospitals found nearby");
            return Ok(TaskResult::new_with_status(
                NextAction::End,
                "No hospitals found nearby",
            ));
        }

        let count = candidates.len();
        context.set(session_keys::CANDIDATES, candidates).await?;

        Ok(TaskResult::new_with_status(
            NextAction::Continue,
            format!("Found {} candidate hospitals", count),
        ))
    }
}
