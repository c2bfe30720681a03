use std::sync::Arc;

use super::{
    LanguageModel,
    extract::{text_field, try_extract_json_object},
    prompts::travel_estimate_prompt,
};
use crate::config::TravelUnits;
use crate::error::Result;
use crate::models::{HospitalCandidate, Location, TravelEstimate, UNKNOWN};

/// Asks the model for road distance and driving time from the patient to a hospital
#[derive(Clone)]
pub struct TravelEstimator {
    model: Arc<dyn LanguageModel>,
    region: String,
    units: TravelUnits,
}

impl TravelEstimator {
    pub fn new(model: Arc<dyn LanguageModel>, region: impl Into<String>, units: TravelUnits) -> Self {
        Self {
            model,
            region: region.into(),
            units,
        }
    }

    /// Fails when the model call fails or the reply holds no JSON object.
    /// A missing field on its own only degrades that field to "Unknown".
    pub async fn estimate(&self, hospital: &HospitalCandidate, patient: Location) -> Result<TravelEstimate> {
        let prompt = travel_estimate_prompt(
            &hospital.name,
            patient,
            hospital.location(),
            &self.region,
            self.units,
        );
        let reply = self.model.complete(&prompt).await?;
        let fields = try_extract_json_object(&reply)?;

        Ok(TravelEstimate {
            distance: text_field(&fields, "distance").unwrap_or_else(|| UNKNOWN.to_string()),
            travel_time: text_field(&fields, "travel_time").unwrap_or_else(|| UNKNOWN.to_string()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::testing::{ScriptedModel, failure, reply};

    fn hospital() -> HospitalCandidate {
        HospitalCandidate {
            name: "Severance Hospital".to_string(),
            phone_number: "+821599-1004".to_string(),
            address: "50-1 Yonsei-ro".to_string(),
            latitude: 37.5622,
            longitude: 126.9408,
        }
    }

    const PATIENT: Location = Location {
        latitude: 37.5665,
        longitude: 126.978,
    };

    fn estimator(model: Arc<dyn LanguageModel>) -> TravelEstimator {
        TravelEstimator::new(model, "Seoul, South Korea", TravelUnits::Omit)
    }

    #[tokio::test]
    async fn parses_fenced_reply() {
        let model = Arc::new(ScriptedModel::new(|_: &str| {
            reply("```json\n{\"distance\": \"4.1\", \"travel_time\": \"14\"}\n```")
        }));
        let estimate = estimator(model.clone()).estimate(&hospital(), PATIENT).await.unwrap();

        assert_eq!(estimate.distance, "4.1");
        assert_eq!(estimate.travel_time, "14");
        assert_eq!(model.prompt_count("Name: \"Severance Hospital\""), 1);
    }

    #[tokio::test]
    async fn missing_field_degrades_to_unknown() {
        let model = Arc::new(ScriptedModel::new(|_: &str| reply("{\"distance\": 2.5}")));
        let estimate = estimator(model).estimate(&hospital(), PATIENT).await.unwrap();

        assert_eq!(estimate.distance, "2.5");
        assert_eq!(estimate.travel_time, "Unknown");
    }

    #[tokio::test]
    async fn prose_reply_is_an_error() {
        let model = Arc::new(ScriptedModel::new(|_: &str| reply("About ten minutes by car.")));
        assert!(estimator(model).estimate(&hospital(), PATIENT).await.is_err());
    }

    #[tokio::test]
    async fn model_failure_is_an_error() {
        let model = Arc::new(ScriptedModel::new(|_: &str| failure()));
        assert!(estimator(model).estimate(&hospital(), PATIENT).await.is_err());
    }
}
