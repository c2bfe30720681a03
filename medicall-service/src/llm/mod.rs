//! Generative model access and the prompt-driven assessment steps built on it.

pub mod analyzer;
pub mod departments;
pub mod extract;
pub mod prompts;
pub mod suitability;
pub mod summarizer;
pub mod travel;

use async_trait::async_trait;
use rig::{
    agent::Agent,
    client::CompletionClient,
    completion::{CompletionModel, Prompt},
    providers::gemini,
};
use serde_json::{Value, json};

use crate::error::{ModelError, Result};

pub use analyzer::PatientAnalyzer;
pub use departments::DepartmentInferrer;
pub use suitability::SuitabilityFilter;
pub use summarizer::{ConditionSummarizer, SUMMARY_FALLBACK};
pub use travel::TravelEstimator;

/// Single-turn text completion. Every assessment step talks to the model
/// through this trait so tests can swap in scripted replies.
#[async_trait]
pub trait LanguageModel: Send + Sync {
    async fn complete(&self, prompt: &str) -> Result<String>;
}

/// [`LanguageModel`] backed by a rig agent
pub struct RigModel<M: CompletionModel> {
    agent: Agent<M>,
}

pub type GeminiModel = RigModel<gemini::completion::CompletionModel>;

impl GeminiModel {
    pub fn gemini(api_key: &str, model: &str, temperature: f64) -> Self {
        Self::with_client(&gemini::Client::new(api_key), model, temperature)
    }

    pub fn with_client(client: &gemini::Client, model: &str, temperature: f64) -> Self {
        let agent = client
            .agent(model)
            .temperature(temperature)
            .additional_params(generation_params(temperature))
            .build();
        Self { agent }
    }
}

/// The Gemini provider requires a `generationConfig` object on every request
fn generation_params(temperature: f64) -> Value {
    json!({ "generationConfig": { "temperature": temperature } })
}

#[async_trait]
impl<M> LanguageModel for RigModel<M>
where
    M: CompletionModel + 'static,
{
    async fn complete(&self, prompt: &str) -> Result<String> {
        let reply = self
            .agent
            .prompt(prompt)
            .await
            .map_err(|e| ModelError::Request(e.to_string()))?;

        if reply.trim().is_empty() {
            return Err(ModelError::EmptyReply.into());
        }
        Ok(reply)
    }
}
