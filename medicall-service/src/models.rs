use serde::{Deserialize, Serialize};

pub const DEFAULT_SEARCH_RADIUS: u32 = 5000;
pub const UNKNOWN: &str = "Unknown";
pub const MAX_DEPARTMENTS: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
}

/// Body of `POST /medicall`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MedicallRequest {
    pub location: Location,
    /// Search radius in meters
    #[serde(default = "default_search_radius")]
    pub search_radius: u32,
    pub patient_condition: String,
}

fn default_search_radius() -> u32 {
    DEFAULT_SEARCH_RADIUS
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MedicallResponse {
    pub hospital_list: Vec<EnrichedHospital>,
    pub ars_message: String,
}

impl MedicallResponse {
    /// The response used whenever the search yields nothing or the run fails
    pub fn empty() -> Self {
        Self {
            hospital_list: Vec::new(),
            ars_message: String::new(),
        }
    }
}

/// A hospital as returned by the places search, after deduplication
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HospitalCandidate {
    pub name: String,
    pub phone_number: String,
    pub address: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl HospitalCandidate {
    pub fn location(&self) -> Location {
        Location {
            latitude: self.latitude,
            longitude: self.longitude,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TravelEstimate {
    pub distance: String,
    pub travel_time: String,
}

impl TravelEstimate {
    pub fn unknown() -> Self {
        Self {
            distance: UNKNOWN.to_string(),
            travel_time: UNKNOWN.to_string(),
        }
    }
}

/// A candidate hospital with travel estimate and departments attached
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrichedHospital {
    pub name: String,
    pub phone_number: String,
    pub address: String,
    pub distance: String,
    pub travel_time: String,
    pub departments: Vec<String>,
}

impl EnrichedHospital {
    pub fn new(
        candidate: HospitalCandidate,
        travel: TravelEstimate,
        mut departments: Vec<String>,
    ) -> Self {
        departments.truncate(MAX_DEPARTMENTS);
        Self {
            name: candidate.name,
            phone_number: candidate.phone_number,
            address: candidate.address,
            distance: travel.distance,
            travel_time: travel.travel_time,
            departments,
        }
    }
}

/// Patient description accepted by the `/analyze-patient` endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatientInfo {
    pub age: u32,
    pub gender: String,
    pub symptoms: Vec<String>,
    pub duration: String,
}

/// Query-string form of [`PatientInfo`]; symptoms are comma separated
#[derive(Debug, Clone, Deserialize)]
pub struct PatientInfoQuery {
    pub age: u32,
    pub gender: String,
    pub symptoms: String,
    pub duration: String,
}

impl From<PatientInfoQuery> for PatientInfo {
    fn from(query: PatientInfoQuery) -> Self {
        let symptoms = query
            .symptoms
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();
        Self {
            age: query.age,
            gender: query.gender,
            symptoms,
            duration: query.duration,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatientAnalysis {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub required_services: Vec<String>,
    pub recommendations: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn request_radius_defaults_to_five_km() {
        let request: MedicallRequest = serde_json::from_value(json!({
            "location": {"latitude": 37.5, "longitude": 127.0},
            "patient_condition": "chest pain"
        }))
        .unwrap();
        assert_eq!(request.search_radius, 5000);
    }

    #[test]
    fn enriched_hospital_keeps_at_most_three_departments() {
        let candidate = HospitalCandidate {
            name: "Seoul General".to_string(),
            phone_number: "+8202-111-2222".to_string(),
            address: "Jongno".to_string(),
            latitude: 37.57,
            longitude: 126.98,
        };
        let departments = ["A", "B", "C", "D"].iter().map(|s| s.to_string()).collect();
        let hospital = EnrichedHospital::new(candidate, TravelEstimate::unknown(), departments);

        assert_eq!(hospital.departments, vec!["A", "B", "C"]);
        assert_eq!(hospital.distance, "Unknown");
    }

    #[test]
    fn query_symptoms_are_split_and_trimmed() {
        let info: PatientInfo = PatientInfoQuery {
            age: 58,
            gender: "male".to_string(),
            symptoms: "chest pain, shortness of breath ,".to_string(),
            duration: "30 minutes".to_string(),
        }
        .into();
        assert_eq!(info.symptoms, vec!["chest pain", "shortness of breath"]);
    }

    #[test]
    fn analysis_omits_error_when_absent() {
        let analysis = PatientAnalysis {
            error: None,
            required_services: vec!["Emergency room".to_string()],
            recommendations: vec![],
        };
        let value = serde_json::to_value(&analysis).unwrap();
        assert!(value.get("error").is_none());
    }
}
