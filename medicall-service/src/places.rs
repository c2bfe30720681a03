//! Nearby hospital search against the Places API (`places:searchNearby`).

use std::collections::HashSet;

use async_trait::async_trait;
use serde_json::{Value, json};
use tracing::{debug, info};

use crate::error::{PlacesError, Result};
use crate::models::{HospitalCandidate, UNKNOWN};

const FIELD_MASK: &str =
    "places.displayName,places.nationalPhoneNumber,places.location,places.formattedAddress";

/// Source of hospitals around a point
#[async_trait]
pub trait PlaceSearch: Send + Sync {
    async fn search_hospitals(
        &self,
        latitude: f64,
        longitude: f64,
        radius_meters: u32,
    ) -> Result<Vec<HospitalCandidate>>;
}

#[derive(Clone)]
pub struct PlacesClient {
    http: reqwest::Client,
    endpoint: String,
    api_key: String,
    country_code: String,
}

impl PlacesClient {
    pub fn new(
        http: reqwest::Client,
        endpoint: impl Into<String>,
        api_key: impl Into<String>,
        country_code: impl Into<String>,
    ) -> Self {
        Self {
            http,
            endpoint: endpoint.into(),
            api_key: api_key.into(),
            country_code: country_code.into(),
        }
    }
}

#[async_trait]
impl PlaceSearch for PlacesClient {
    async fn search_hospitals(
        &self,
        latitude: f64,
        longitude: f64,
        radius_meters: u32,
    ) -> Result<Vec<HospitalCandidate>> {
        let payload = search_payload(latitude, longitude, radius_meters);
        debug!(latitude, longitude, radius_meters, "Searching nearby hospitals");

        let response = self
            .http
            .post(&self.endpoint)
            .header("X-Goog-Api-Key", &self.api_key)
            .header("X-Goog-FieldMask", FIELD_MASK)
            .header("Accept-Language", "en")
            .json(&payload)
            .send()
            .await
            .map_err(|e| PlacesError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(PlacesError::Status {
                status: status.as_u16(),
                body,
            }
            .into());
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| PlacesError::UnexpectedBody(e.to_string()))?;

        let hospitals = parse_hospitals(&body, &self.country_code)?;
        info!(count = hospitals.len(), "Nearby hospital search completed");
        Ok(hospitals)
    }
}

fn search_payload(latitude: f64, longitude: f64, radius_meters: u32) -> Value {
    json!({
        "includedTypes": ["hospital"],
        "locationRestriction": {
            "circle": {
                "center": {"latitude": latitude, "longitude": longitude},
                "radius": f64::from(radius_meters)
            }
        }
    })
}

/// Turns a search response into candidates. Items without a phone number or
/// coordinates are skipped, and only the first item per phone number is kept.
pub fn parse_hospitals(body: &Value, country_code: &str) -> Result<Vec<HospitalCandidate>> {
    let object = body
        .as_object()
        .ok_or_else(|| PlacesError::UnexpectedBody("response is not a JSON object".to_string()))?;

    let Some(places) = object.get("places").and_then(Value::as_array) else {
        return Ok(Vec::new());
    };

    let mut seen_numbers = HashSet::new();
    let mut hospitals = Vec::new();

    for item in places {
        let Some(national) = item
            .get("nationalPhoneNumber")
            .and_then(Value::as_str)
            .filter(|p| !p.trim().is_empty())
        else {
            continue;
        };
        let phone_number = format!("{}{}", country_code, national.trim());

        let location = item.get("location");
        let latitude = location.and_then(|l| l.get("latitude")).and_then(Value::as_f64);
        let longitude = location.and_then(|l| l.get("longitude")).and_then(Value::as_f64);
        let (Some(latitude), Some(longitude)) = (latitude, longitude) else {
            continue;
        };

        if !seen_numbers.insert(phone_number.clone()) {
            continue;
        }

        let name = item
            .get("displayName")
            .and_then(|d| d.get("text"))
            .and_then(Value::as_str)
            .unwrap_or(UNKNOWN)
            .to_string();
        let address = item
            .get("formattedAddress")
            .and_then(Value::as_str)
            .unwrap_or(UNKNOWN)
            .to_string();

        hospitals.push(HospitalCandidate {
            name,
            phone_number,
            address,
            latitude,
            longitude,
        });
    }

    Ok(hospitals)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DispatchError;
    use axum::{
        Json, Router,
        http::{HeaderMap, StatusCode},
        routing::post,
    };

    fn place(name: &str, phone: Option<&str>, lat: Option<f64>, lng: Option<f64>) -> Value {
        let mut item = json!({
            "displayName": {"text": name},
            "formattedAddress": format!("{} street", name),
            "location": {}
        });
        if let Some(phone) = phone {
            item["nationalPhoneNumber"] = json!(phone);
        }
        if let Some(lat) = lat {
            item["location"]["latitude"] = json!(lat);
        }
        if let Some(lng) = lng {
            item["location"]["longitude"] = json!(lng);
        }
        item
    }

    #[test]
    fn prefixes_country_code_and_keeps_order() {
        let body = json!({"places": [
            place("Alpha", Some("02-111-1111"), Some(37.1), Some(127.1)),
            place("Beta", Some("02-222-2222"), Some(37.2), Some(127.2)),
        ]});
        let hospitals = parse_hospitals(&body, "+82").unwrap();

        assert_eq!(hospitals.len(), 2);
        assert_eq!(hospitals[0].name, "Alpha");
        assert_eq!(hospitals[0].phone_number, "+8202-111-1111");
        assert_eq!(hospitals[0].address, "Alpha street");
        assert_eq!(hospitals[1].latitude, 37.2);
    }

    #[test]
    fn duplicate_phone_numbers_keep_first_occurrence() {
        let body = json!({"places": [
            place("Main Campus", Some("02-333-3333"), Some(37.1), Some(127.1)),
            place("Annex", Some("02-333-3333"), Some(37.3), Some(127.3)),
            place("Other", Some("02-444-4444"), Some(37.4), Some(127.4)),
        ]});
        let hospitals = parse_hospitals(&body, "+82").unwrap();

        let names: Vec<_> = hospitals.iter().map(|h| h.name.as_str()).collect();
        assert_eq!(names, vec!["Main Campus", "Other"]);
    }

    #[test]
    fn skips_items_without_phone_or_coordinates() {
        let body = json!({"places": [
            place("No Phone", None, Some(37.1), Some(127.1)),
            place("Blank Phone", Some("  "), Some(37.1), Some(127.1)),
            place("No Lat", Some("02-1"), None, Some(127.1)),
            place("No Lng", Some("02-2"), Some(37.1), None),
            place("Complete", Some("02-3"), Some(37.1), Some(127.1)),
        ]});
        let hospitals = parse_hospitals(&body, "+82").unwrap();

        assert_eq!(hospitals.len(), 1);
        assert_eq!(hospitals[0].name, "Complete");
    }

    #[test]
    fn item_skipped_for_coordinates_does_not_reserve_its_phone() {
        let body = json!({"places": [
            place("Broken", Some("02-5"), None, None),
            place("Working", Some("02-5"), Some(37.5), Some(127.5)),
        ]});
        let hospitals = parse_hospitals(&body, "+82").unwrap();

        assert_eq!(hospitals.len(), 1);
        assert_eq!(hospitals[0].name, "Working");
    }

    #[test]
    fn missing_name_and_address_default_to_unknown() {
        let body = json!({"places": [{
            "nationalPhoneNumber": "031-000-0000",
            "location": {"latitude": 37.0, "longitude": 127.0}
        }]});
        let hospitals = parse_hospitals(&body, "+82").unwrap();

        assert_eq!(hospitals[0].name, "Unknown");
        assert_eq!(hospitals[0].address, "Unknown");
    }

    #[test]
    fn body_without_places_is_empty() {
        assert!(parse_hospitals(&json!({}), "+82").unwrap().is_empty());
    }

    #[test]
    fn non_object_body_is_a_failure() {
        let err = parse_hospitals(&json!(["not", "an", "object"]), "+82").unwrap_err();
        assert!(matches!(err, DispatchError::Places(PlacesError::UnexpectedBody(_))));
    }

    #[test]
    fn payload_restricts_to_hospitals_in_circle() {
        let payload = search_payload(37.5, 127.0, 3000);
        assert_eq!(payload["includedTypes"], json!(["hospital"]));
        assert_eq!(payload["locationRestriction"]["circle"]["radius"], json!(3000.0));
        assert_eq!(
            payload["locationRestriction"]["circle"]["center"]["latitude"],
            json!(37.5)
        );
    }

    /// Serves `router` on a local port and returns the search endpoint URL
    async fn serve(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{}/searchNearby", addr)
    }

    fn client(endpoint: String) -> PlacesClient {
        PlacesClient::new(reqwest::Client::new(), endpoint, "places-key", "+82")
    }

    #[tokio::test]
    async fn client_sends_headers_and_parses_places() {
        let router = Router::new().route(
            "/searchNearby",
            post(|headers: HeaderMap, Json(payload): Json<Value>| async move {
                if headers.get("X-Goog-Api-Key").and_then(|v| v.to_str().ok()) != Some("places-key")
                    || headers.get("X-Goog-FieldMask").and_then(|v| v.to_str().ok()) != Some(FIELD_MASK)
                    || payload["locationRestriction"]["circle"]["radius"] != json!(2000.0)
                {
                    return (StatusCode::BAD_REQUEST, Json(json!({"error": "bad request"})));
                }
                (
                    StatusCode::OK,
                    Json(json!({"places": [
                        place("Alpha", Some("02-111-1111"), Some(37.1), Some(127.1)),
                        place("Beta", Some("02-222-2222"), Some(37.2), Some(127.2)),
                    ]})),
                )
            }),
        );
        let endpoint = serve(router).await;

        let hospitals = client(endpoint).search_hospitals(37.5, 127.0, 2000).await.unwrap();

        let phones: Vec<_> = hospitals.iter().map(|h| h.phone_number.as_str()).collect();
        assert_eq!(phones, vec!["+8202-111-1111", "+8202-222-2222"]);
    }

    #[tokio::test]
    async fn error_status_is_reported_with_body() {
        let router = Router::new().route(
            "/searchNearby",
            post(|| async { (StatusCode::FORBIDDEN, "API key not valid") }),
        );
        let endpoint = serve(router).await;

        let err = client(endpoint).search_hospitals(37.5, 127.0, 5000).await.unwrap_err();

        assert!(matches!(
            err,
            DispatchError::Places(PlacesError::Status { status: 403, ref body }) if body == "API key not valid"
        ));
    }

    #[tokio::test]
    async fn non_json_success_body_is_unexpected() {
        let router = Router::new().route(
            "/searchNearby",
            post(|| async { (StatusCode::OK, "<html>maintenance</html>") }),
        );
        let endpoint = serve(router).await;

        let err = client(endpoint).search_hospitals(37.5, 127.0, 5000).await.unwrap_err();

        assert!(matches!(err, DispatchError::Places(PlacesError::UnexpectedBody(_))));
    }

    #[tokio::test]
    async fn unreachable_endpoint_is_a_transport_error() {
        let err = client("http://127.0.0.1:1/searchNearby".to_string())
            .search_hospitals(37.5, 127.0, 5000)
            .await
            .unwrap_err();

        assert!(matches!(err, DispatchError::Places(PlacesError::Transport(_))));
    }
}
