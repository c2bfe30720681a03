//! Service configuration loaded from environment variables

use std::str::FromStr;

use tracing::warn;

pub const DEFAULT_PLACES_ENDPOINT: &str = "https://places.googleapis.com/v1/places:searchNearby";
pub const DEFAULT_MODEL: &str = "gemini-2.0-flash-lite";
pub const DEFAULT_TEMPERATURE: f64 = 0.4;
pub const DEFAULT_MAX_CANDIDATES: usize = 20;

/// Whether the travel prompt asks for bare numbers or values with units
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TravelUnits {
    #[default]
    Omit,
    Include,
}

impl FromStr for TravelUnits {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "omit" | "none" => Ok(TravelUnits::Omit),
            "include" | "units" => Ok(TravelUnits::Include),
            other => Err(format!("unknown travel unit mode: {}", other)),
        }
    }
}

/// Knobs of the dispatch pipeline itself
#[derive(Debug, Clone)]
pub struct DispatchSettings {
    /// Prefix added to national phone numbers
    pub country_code: String,
    /// Region named in the model prompts
    pub service_region: String,
    /// Upper bound on hospitals enriched per request, never above
    /// [`DEFAULT_MAX_CANDIDATES`]
    pub max_candidates: usize,
    pub travel_units: TravelUnits,
}

impl Default for DispatchSettings {
    fn default() -> Self {
        Self {
            country_code: "+82".to_string(),
            service_region: "Seoul, South Korea".to_string(),
            max_candidates: DEFAULT_MAX_CANDIDATES,
            travel_units: TravelUnits::Omit,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub bind_address: String,
    pub places_api_key: String,
    pub places_endpoint: String,
    pub gemini_api_key: String,
    pub model: String,
    pub temperature: f64,
    pub dispatch: DispatchSettings,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// API keys are not validated here; a missing key makes the first
    /// external call fail, which the pipeline already handles.
    pub fn from_env() -> Self {
        let port = env_parse("PORT", 3000u16);
        let defaults = DispatchSettings::default();

        let config = Self {
            bind_address: format!("0.0.0.0:{}", port),
            places_api_key: env_or("GOOGLE_PLACES_API_KEY", ""),
            places_endpoint: env_or("PLACES_ENDPOINT", DEFAULT_PLACES_ENDPOINT),
            gemini_api_key: env_or("GOOGLE_API_KEY", ""),
            model: env_or("GEMINI_MODEL", DEFAULT_MODEL),
            temperature: env_parse("GEMINI_TEMPERATURE", DEFAULT_TEMPERATURE),
            dispatch: DispatchSettings {
                country_code: env_or("COUNTRY_CODE", &defaults.country_code),
                service_region: env_or("SERVICE_REGION", &defaults.service_region),
                max_candidates: max_candidates_from_env(),
                travel_units: env_parse("TRAVEL_UNITS", defaults.travel_units),
            },
        };

        if config.places_api_key.is_empty() {
            warn!("GOOGLE_PLACES_API_KEY not set, hospital search will fail");
        }
        if config.gemini_api_key.is_empty() {
            warn!("GOOGLE_API_KEY not set, model calls will fail");
        }

        config
    }
}

/// `MAX_CANDIDATES` can lower the enrichment cap but never raise it
fn max_candidates_from_env() -> usize {
    let requested = env_parse("MAX_CANDIDATES", DEFAULT_MAX_CANDIDATES);
    if requested > DEFAULT_MAX_CANDIDATES {
        warn!(
            requested,
            limit = DEFAULT_MAX_CANDIDATES,
            "MAX_CANDIDATES above limit, clamping"
        );
    }
    requested.min(DEFAULT_MAX_CANDIDATES)
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_parse<T: FromStr>(key: &str, default: T) -> T {
    match std::env::var(key) {
        Ok(raw) => raw.parse().unwrap_or_else(|_| {
            warn!(key, value = %raw, "Ignoring unparsable environment value");
            default
        }),
        Err(_) => default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn travel_units_parse() {
        assert_eq!("omit".parse::<TravelUnits>(), Ok(TravelUnits::Omit));
        assert_eq!(" Include ".parse::<TravelUnits>(), Ok(TravelUnits::Include));
        assert!("miles".parse::<TravelUnits>().is_err());
    }

    #[test]
    fn dispatch_defaults() {
        let settings = DispatchSettings::default();
        assert_eq!(settings.country_code, "+82");
        assert_eq!(settings.max_candidates, 20);
        assert_eq!(settings.travel_units, TravelUnits::Omit);
    }
}
