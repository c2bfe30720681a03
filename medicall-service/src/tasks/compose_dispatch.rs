use async_trait::async_trait;

use medicall_flow::{Context, NextAction, Result, Task, TaskResult};

use super::session_keys;

use crate::models::MedicallRequest;

/// Builds the ARS message read out to the candidate hospitals
pub struct ComposeDispatchTask;

#[async_trait]
impl Task for ComposeDispatchTask {
    async fn run(&self, context: Context) -> Result<TaskResult> {
        let request: MedicallRequest = context.require(session_keys::REQUEST).await?;
        let summary: String = context.require(session_keys::CONDITION_SUMMARY).await?;

        let message = ars_message(&summary, request.search_radius);
        context.set(session_keys::ARS_MESSAGE, &message).await?;

        Ok(TaskResult::new_with_status(NextAction::End, message))
    }
}

/// Search radius in whole kilometers, rounded half away from zero
pub fn radius_km(radius_meters: u32) -> u64 {
    (f64::from(radius_meters) / 1000.0).round() as u64
}

pub fn ars_message(condition_summary: &str, radius_meters: u32) -> String {
    format!(
        "This is Medicall, an AI-powered emergency room matching system. A patient with {} \
         has been reported within {} km. If your hospital can admit the patient, press 1. \
         If not, press 2.",
        condition_summary,
        radius_km(radius_meters)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn radius_rounds_to_nearest_km() {
        assert_eq!(radius_km(5000), 5);
        assert_eq!(radius_km(12500), 13);
        assert_eq!(radius_km(1499), 1);
        assert_eq!(radius_km(400), 0);
    }

    #[test]
    fn message_embeds_summary_and_radius() {
        let message = ars_message("an elderly woman with a suspected hip fracture", 12500);
        assert!(message.contains("A patient with an elderly woman with a suspected hip fracture has been reported"));
        assert!(message.contains("within 13 km."));
        assert!(message.ends_with("If not, press 2."));
    }
}
