pub mod compose_dispatch;
pub mod enrich_hospitals;
pub mod filter_hospitals;
pub mod search_hospitals;
pub mod summarize_condition;

pub use compose_dispatch::{ComposeDispatchTask, ars_message, radius_km};
pub use enrich_hospitals::EnrichHospitalsTask;
pub use filter_hospitals::FilterHospitalsTask;
pub use search_hospitals::SearchHospitalsTask;
pub use summarize_condition::SummarizeConditionTask;

/// Context keys shared by the dispatch tasks
pub mod session_keys {
    pub const REQUEST: &str = "request";
    pub const CANDIDATES: &str = "candidates";
    pub const ENRICHED_HOSPITALS: &str = "enriched_hospitals";
    pub const CONDITION_SUMMARY: &str = "condition_summary";
    pub const HOSPITAL_LIST: &str = "hospital_list";
    pub const ARS_MESSAGE: &str = "ars_message";
}
