use std::sync::Arc;

use axum::{
    Router,
    extract::{Query, Request, State},
    http::HeaderValue,
    middleware::{Next, from_fn},
    response::{Json, Response},
    routing::{get, post},
};
use serde_json::{Value, json};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{Instrument, info};
use uuid::Uuid;

use crate::{
    config::{Config, DispatchSettings},
    llm::{GeminiModel, LanguageModel, PatientAnalyzer},
    models::{MedicallRequest, MedicallResponse, PatientAnalysis, PatientInfo, PatientInfoQuery},
    places::{PlaceSearch, PlacesClient},
    workflow::{Dispatcher, build_dispatch_workflow},
};

#[derive(Clone)]
pub struct AppState {
    pub dispatcher: Dispatcher,
    pub analyzer: PatientAnalyzer,
}

impl AppState {
    /// Wires the pipeline around the given places source and model
    pub fn new(
        places: Arc<dyn PlaceSearch>,
        model: Arc<dyn LanguageModel>,
        settings: &DispatchSettings,
    ) -> Self {
        let graph = build_dispatch_workflow(places, model.clone(), settings);
        Self {
            dispatcher: Dispatcher::new(graph),
            analyzer: PatientAnalyzer::new(model),
        }
    }

    /// Production wiring: Places API over reqwest and a Gemini model via rig
    pub fn from_config(config: &Config) -> Self {
        let places: Arc<dyn PlaceSearch> = Arc::new(PlacesClient::new(
            reqwest::Client::new(),
            config.places_endpoint.clone(),
            config.places_api_key.clone(),
            config.dispatch.country_code.clone(),
        ));
        let model: Arc<dyn LanguageModel> = Arc::new(GeminiModel::gemini(
            &config.gemini_api_key,
            &config.model,
            config.temperature,
        ));
        Self::new(places, model, &config.dispatch)
    }
}

pub fn create_app(config: &Config) -> Router {
    build_router(AppState::from_config(config))
}

pub fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health_check))
        .route("/medicall", post(medicall))
        .route(
            "/analyze-patient",
            get(analyze_patient_query).post(analyze_patient),
        )
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive())
                .layer(from_fn(correlation_id_middleware)),
        )
        .with_state(app_state)
}

/// Tags every request with a correlation ID header and a tracing span
async fn correlation_id_middleware(mut request: Request, next: Next) -> Response {
    let correlation_id = Uuid::new_v4().to_string();

    if let Ok(value) = HeaderValue::from_str(&correlation_id) {
        request.headers_mut().insert("x-correlation-id", value);
    }

    let span = tracing::info_span!("http_request", correlation_id = %correlation_id);
    next.run(request).instrument(span).await
}

async fn root() -> Json<Value> {
    Json(json!({ "message": "Medicall API is running" }))
}

async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

async fn medicall(
    State(state): State<AppState>,
    Json(request): Json<MedicallRequest>,
) -> Json<MedicallResponse> {
    info!(
        latitude = request.location.latitude,
        longitude = request.location.longitude,
        radius = request.search_radius,
        condition_length = request.patient_condition.len(),
        "Processing medicall request"
    );

    let response = state.dispatcher.dispatch(request).await;

    info!(
        hospitals = response.hospital_list.len(),
        "Medicall request completed"
    );
    Json(response)
}

async fn analyze_patient(
    State(state): State<AppState>,
    Json(patient): Json<PatientInfo>,
) -> Json<PatientAnalysis> {
    info!(age = patient.age, symptoms = patient.symptoms.len(), "Analyzing patient");
    Json(state.analyzer.analyze(&patient).await)
}

async fn analyze_patient_query(
    State(state): State<AppState>,
    Query(query): Query<PatientInfoQuery>,
) -> Json<PatientAnalysis> {
    let patient = PatientInfo::from(query);
    info!(age = patient.age, symptoms = patient.symptoms.len(), "Analyzing patient");
    Json(state.analyzer.analyze(&patient).await)
}
