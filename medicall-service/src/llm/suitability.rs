use std::sync::Arc;

use tracing::{info, warn};

use super::{LanguageModel, prompts::suitability_prompt};
use crate::error::Result;

/// Yes/no judgement of whether a hospital can plausibly treat a condition
#[derive(Clone)]
pub struct SuitabilityFilter {
    model: Arc<dyn LanguageModel>,
}

impl SuitabilityFilter {
    pub fn new(model: Arc<dyn LanguageModel>) -> Self {
        Self { model }
    }

    pub async fn is_suitable(
        &self,
        condition_summary: &str,
        hospital_name: &str,
        departments: &[String],
    ) -> Result<bool> {
        let prompt = suitability_prompt(condition_summary, hospital_name, departments);
        let reply = self.model.complete(&prompt).await?;
        let verdict = parse_verdict(&reply);

        info!(
            hospital = %hospital_name,
            departments = ?departments,
            condition = %condition_summary,
            reply = %reply.trim(),
            suitable = verdict,
            "Suitability decision"
        );

        Ok(verdict)
    }

    /// Same as [`SuitabilityFilter::is_suitable`], with a failed model call
    /// counting as "not suitable"
    pub async fn admits(&self, condition_summary: &str, hospital_name: &str, departments: &[String]) -> bool {
        match self
            .is_suitable(condition_summary, hospital_name, departments)
            .await
        {
            Ok(verdict) => verdict,
            Err(e) => {
                warn!(hospital = %hospital_name, error = %e, "Suitability check failed, excluding hospital");
                false
            }
        }
    }
}

/// Only an exact "yes" (ignoring case and surrounding whitespace) passes
pub fn parse_verdict(reply: &str) -> bool {
    reply.trim().to_lowercase() == "yes"
}
