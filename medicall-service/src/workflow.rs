use std::sync::Arc;

use medicall_flow::{Context, Graph, GraphBuilder, Task};
use tracing::{error, info};

use crate::config::DispatchSettings;
use crate::error::Result;
use crate::llm::{
    ConditionSummarizer, DepartmentInferrer, LanguageModel, SuitabilityFilter, TravelEstimator,
};
use crate::models::{MedicallRequest, MedicallResponse};
use crate::places::PlaceSearch;
use crate::tasks::{
    ComposeDispatchTask, EnrichHospitalsTask, FilterHospitalsTask, SearchHospitalsTask,
    SummarizeConditionTask, session_keys,
};

/// search -> enrich -> summarize -> filter -> compose
pub fn build_dispatch_workflow(
    places: Arc<dyn PlaceSearch>,
    model: Arc<dyn LanguageModel>,
    settings: &DispatchSettings,
) -> Graph {
    let search_task: Arc<dyn Task> = Arc::new(SearchHospitalsTask::new(places));
    let enrich_task: Arc<dyn Task> = Arc::new(EnrichHospitalsTask::new(
        TravelEstimator::new(
            model.clone(),
            settings.service_region.clone(),
            settings.travel_units,
        ),
        DepartmentInferrer::new(model.clone(), settings.service_region.clone()),
        settings.max_candidates,
    ));
    let summarize_task: Arc<dyn Task> =
        Arc::new(SummarizeConditionTask::new(ConditionSummarizer::new(model.clone())));
    let filter_task: Arc<dyn Task> =
        Arc::new(FilterHospitalsTask::new(SuitabilityFilter::new(model)));
    let compose_task: Arc<dyn Task> = Arc::new(ComposeDispatchTask);

    let search_id = search_task.id().to_string();
    let enrich_id = enrich_task.id().to_string();
    let summarize_id = summarize_task.id().to_string();
    let filter_id = filter_task.id().to_string();
    let compose_id = compose_task.id().to_string();

    GraphBuilder::new("medicall_dispatch")
        .add_task(search_task)
        .add_task(enrich_task)
        .add_task(summarize_task)
        .add_task(filter_task)
        .add_task(compose_task)
        .add_edge(&search_id, &enrich_id)
        .add_edge(&enrich_id, &summarize_id)
        .add_edge(&summarize_id, &filter_id)
        .add_edge(&filter_id, &compose_id)
        .build()
}

/// Runs the dispatch workflow for one request at a time. Built once at
/// startup and shared by every request handler.
#[derive(Clone)]
pub struct Dispatcher {
    graph: Arc<Graph>,
}

impl Dispatcher {
    pub fn new(graph: Graph) -> Self {
        Self {
            graph: Arc::new(graph),
        }
    }

    /// Never fails: an error anywhere in the run yields the empty response
    pub async fn dispatch(&self, request: MedicallRequest) -> MedicallResponse {
        match self.try_dispatch(request).await {
            Ok(response) => response,
            Err(e) => {
                error!(error = %e, "Dispatch workflow failed");
                MedicallResponse::empty()
            }
        }
    }

    async fn try_dispatch(&self, request: MedicallRequest) -> Result<MedicallResponse> {
        let context = Context::new();
        context.set(session_keys::REQUEST, &request).await?;

        let result = self.graph.run(context.clone()).await?;
        info!(
            last_task = %result.task_id,
            status = ?result.status_message,
            "Dispatch workflow finished"
        );

        // Runs that stop at the search step leave both keys unset
        Ok(MedicallResponse {
            hospital_list: context
                .get(session_keys::HOSPITAL_LIST)
                .await
                .unwrap_or_default(),
            ars_message: context
                .get(session_keys::ARS_MESSAGE)
                .await
                .unwrap_or_default(),
        })
    }
}
