use std::sync::Arc;

use serde::Deserialize;
use tracing::{info, warn};

use super::{LanguageModel, extract::try_extract_json_object, prompts::patient_analysis_prompt};
use crate::models::{PatientAnalysis, PatientInfo};

const FALLBACK_RECOMMENDATION: &str = "Direct evaluation by medical staff is required";

#[derive(Debug, Deserialize)]
struct AnalysisReply {
    required_services: Vec<String>,
    recommendations: Vec<String>,
}

/// Suggests required medical services and first actions for a patient
#[derive(Clone)]
pub struct PatientAnalyzer {
    model: Arc<dyn LanguageModel>,
}

impl PatientAnalyzer {
    pub fn new(model: Arc<dyn LanguageModel>) -> Self {
        Self { model }
    }

    /// Never fails: a broken model reply is reported in [`PatientAnalysis::error`]
    /// alongside a conservative recommendation.
    pub async fn analyze(&self, patient: &PatientInfo) -> PatientAnalysis {
        match self.request_analysis(patient).await {
            Ok(reply) => {
                info!(
                    services = reply.required_services.len(),
                    recommendations = reply.recommendations.len(),
                    "Patient analysis completed"
                );
                PatientAnalysis {
                    error: None,
                    required_services: reply.required_services,
                    recommendations: reply.recommendations,
                }
            }
            Err(e) => {
                warn!(error = %e, "Patient analysis failed");
                PatientAnalysis {
                    error: Some(format!("Error while analyzing patient status: {}", e)),
                    required_services: Vec::new(),
                    recommendations: vec![FALLBACK_RECOMMENDATION.to_string()],
                }
            }
        }
    }

    async fn request_analysis(&self, patient: &PatientInfo) -> anyhow::Result<AnalysisReply> {
        let prompt = patient_analysis_prompt(patient)?;
        let response = self.model.complete(&prompt).await?;

        let fields = try_extract_json_object(&response)?;
        let reply = serde_json::from_value::<AnalysisReply>(serde_json::Value::Object(fields))
            .map_err(|e| anyhow::anyhow!("Unexpected analysis format: {}", e))?;
        Ok(reply)
    }
}
