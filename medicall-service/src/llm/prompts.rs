use crate::config::TravelUnits;
use crate::models::{Location, PatientInfo};

pub fn condition_summary_prompt(condition: &str) -> String {
    format!(
        r#"The following is a description of a patient's emergency condition.
Please summarize it into one concise and informative sentence for hospital staff.

Condition:
{condition}
"#
    )
}

pub fn travel_estimate_prompt(
    hospital_name: &str,
    patient: Location,
    hospital: Location,
    region: &str,
    units: TravelUnits,
) -> String {
    let (example, unit_rule) = match units {
        TravelUnits::Omit => (
            r#"{
  "distance": "X.X",
  "travel_time": "X"
}"#,
            "Do not include distance unit (km) and travel time unit (min).",
        ),
        TravelUnits::Include => (
            r#"{
  "distance": "X.X km",
  "travel_time": "X min"
}"#,
            "Express distance in km and travel time in minutes.",
        ),
    };

    format!(
        r#"You are acting as a navigation assistant for paramedics.

You are assisting paramedics by estimating the realistic driving distance and travel time between a patient and a hospital in {region}.

This estimation must be based on actual roads, not straight-line (air) distance.

Patient location:
- Latitude: {patient_lat}
- Longitude: {patient_lng}

Hospital:
- Name: "{hospital_name}"
- Latitude: {hospital_lat}
- Longitude: {hospital_lng}

Assumptions:
- Use average daytime traffic in {region}.
- Assume a standard car route using public roads and highways.
- Avoid estimating based on straight-line distance or walking paths.

Return only a JSON object like:
{example}

{unit_rule}
Do not include explanations, markdown, or extra text.
"#,
        patient_lat = patient.latitude,
        patient_lng = patient.longitude,
        hospital_lat = hospital.latitude,
        hospital_lng = hospital.longitude,
    )
}

pub fn departments_prompt(hospital_name: &str, region: &str) -> String {
    format!(
        r#"You are an assistant helping paramedics understand the key medical specialties of the hospital below.

Hospital name: "{hospital_name}"
Location: {region}

Based on this hospital's name and typical structure of major hospitals in this region, provide exactly 3 English department names that best represent this hospital's primary specialties.
Avoid repeating the same set of departments for different hospitals unless clearly appropriate.

Return only a JSON object like:
{{
  "departments": ["Cardiology", "Emergency Medicine", "Neurology"]
}}
"#
    )
}

pub fn suitability_prompt(condition_summary: &str, hospital_name: &str, departments: &[String]) -> String {
    format!(
        r#"A patient has the following condition: {condition_summary}

Hospital name: {hospital_name}
Departments: {departments}

Based on the hospital's name and its listed departments, does it seem likely that this hospital could appropriately handle the patient's condition?

Consider hospitals that are general, large, or specialized in relevant areas as likely suitable.

Respond with "Yes" if the hospital might reasonably be able to treat the patient, even if not explicitly listed. Otherwise, respond with "No".

Answer only with "Yes" or "No".
"#,
        departments = departments.join(", "),
    )
}

pub fn patient_analysis_prompt(patient: &PatientInfo) -> serde_json::Result<String> {
    let patient_json = serde_json::to_string(patient)?;
    Ok(format!(
        r#"Review the following patient information and determine the medical services required and the actions to take.
Patient information: {patient_json}

Respond with a JSON object in this format:
{{
    "required_services": ["list of required medical services, e.g. Emergency room, Cardiology, Surgery"],
    "recommendations": ["list of recommended actions, e.g. Visit the emergency room immediately, Measure blood pressure"]
}}
"#
    ))
}
