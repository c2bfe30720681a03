use std::sync::Arc;

use super::{
    LanguageModel,
    extract::{string_list, try_extract_json_object},
    prompts::departments_prompt,
};
use crate::error::Result;
use crate::models::MAX_DEPARTMENTS;

/// Guesses a hospital's three representative departments from its name
#[derive(Clone)]
pub struct DepartmentInferrer {
    model: Arc<dyn LanguageModel>,
    region: String,
}

impl DepartmentInferrer {
    pub fn new(model: Arc<dyn LanguageModel>, region: impl Into<String>) -> Self {
        Self {
            model,
            region: region.into(),
        }
    }

    pub async fn infer(&self, hospital_name: &str) -> Result<Vec<String>> {
        let reply = self
            .model
            .complete(&departments_prompt(hospital_name, &self.region))
            .await?;
        let fields = try_extract_json_object(&reply)?;

        let mut departments = string_list(&fields, "departments").unwrap_or_default();
        departments.truncate(MAX_DEPARTMENTS);
        Ok(departments)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::testing::{ScriptedModel, failure, reply};

    #[tokio::test]
    async fn reads_departments_array() {
        let model = Arc::new(ScriptedModel::new(|_: &str| {
            reply(r#"{"departments": ["Cardiology", "Emergency Medicine", "Neurology"]}"#)
        }));
        let departments = DepartmentInferrer::new(model, "Seoul, South Korea")
            .infer("Samsung Medical Center")
            .await
            .unwrap();
        assert_eq!(departments, vec!["Cardiology", "Emergency Medicine", "Neurology"]);
    }

    #[tokio::test]
    async fn truncates_to_three() {
        let model = Arc::new(ScriptedModel::new(|_: &str| {
            reply(r#"Here you go: {"departments": ["A", "B", "C", "D", "E"]}"#)
        }));
        let departments = DepartmentInferrer::new(model, "Seoul").infer("Big Hospital").await.unwrap();
        assert_eq!(departments.len(), 3);
    }

    #[tokio::test]
    async fn absent_field_is_empty() {
        let model = Arc::new(ScriptedModel::new(|_: &str| reply(r#"{"specialties": ["A"]}"#)));
        let departments = DepartmentInferrer::new(model, "Seoul").infer("Clinic").await.unwrap();
        assert!(departments.is_empty());
    }

    #[tokio::test]
    async fn model_failure_is_an_error() {
        let model = Arc::new(ScriptedModel::new(|_: &str| failure()));
        assert!(DepartmentInferrer::new(model, "Seoul").infer("Clinic").await.is_err());
    }
}
