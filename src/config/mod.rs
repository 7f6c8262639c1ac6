use crate::utils::error::{GeoError, Result};
use crate::utils::validation::{validate_non_empty_string, validate_url, Validate};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// Identifier of the geocoder used when callers do not name one explicitly.
pub const DEFAULT_GEOCODER_NAME: &str = "default";

/// Top-level configuration: a named-geocoder mapping plus the name of the
/// entry to use when no geocoder is requested explicitly.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeomonkeyConfig {
    #[serde(default = "default_geocoder_name")]
    pub default_geocoder: String,
    pub geocoders: HashMap<String, GeocoderEntry>,
}

fn default_geocoder_name() -> String {
    DEFAULT_GEOCODER_NAME.to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeocoderEntry {
    pub backend: BackendKind,
    pub endpoint: String,
    pub api_key: Option<String>,
    /// When set, the geocode-populate-save cycle runs on the job queue
    /// instead of inline. Scheduled cycles always persist the record.
    #[serde(default, rename = "async")]
    pub run_async: bool,
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BackendKind {
    /// JSON geocoding API in the Google Maps response shape.
    Google,
    /// CSV-over-HTTP service in the rpc.geocoder.us response shape.
    GeocoderUs,
}

impl GeomonkeyConfig {
    pub fn from_toml_str(raw: &str) -> Result<Self> {
        let config: GeomonkeyConfig = toml::from_str(raw)?;
        Ok(config)
    }

    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_toml_str(&raw)
    }
}

impl Validate for GeomonkeyConfig {
    fn validate(&self) -> Result<()> {
        validate_non_empty_string("default_geocoder", &self.default_geocoder)?;

        if self.geocoders.is_empty() {
            return Err(GeoError::MissingConfigError {
                field: "geocoders".to_string(),
            });
        }

        for (name, entry) in &self.geocoders {
            validate_url(&format!("geocoders.{}.endpoint", name), &entry.endpoint)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
        default_geocoder = "main"

        [geocoders.main]
        backend = "geocoder-us"
        endpoint = "http://rpc.geocoder.us/service/csv"

        [geocoders.google]
        backend = "google"
        endpoint = "https://maps.googleapis.com/maps/api/geocode/json"
        api_key = "test-key"
        async = true
        timeout_seconds = 15
    "#;

    #[test]
    fn test_parse_sample_config() {
        let config = GeomonkeyConfig::from_toml_str(SAMPLE).unwrap();
        assert_eq!(config.default_geocoder, "main");
        assert_eq!(config.geocoders.len(), 2);

        let main = &config.geocoders["main"];
        assert_eq!(main.backend, BackendKind::GeocoderUs);
        assert!(!main.run_async);
        assert!(main.api_key.is_none());

        let google = &config.geocoders["google"];
        assert_eq!(google.backend, BackendKind::Google);
        assert!(google.run_async);
        assert_eq!(google.timeout_seconds, Some(15));
    }

    #[test]
    fn test_default_geocoder_name_falls_back() {
        let raw = r#"
            [geocoders.default]
            backend = "google"
            endpoint = "https://example.com/geocode"
        "#;
        let config = GeomonkeyConfig::from_toml_str(raw).unwrap();
        assert_eq!(config.default_geocoder, DEFAULT_GEOCODER_NAME);
    }

    #[test]
    fn test_validate_rejects_bad_endpoint() {
        let raw = r#"
            [geocoders.default]
            backend = "google"
            endpoint = "not-a-url"
        "#;
        let config = GeomonkeyConfig::from_toml_str(raw).unwrap();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_empty_mapping() {
        let config = GeomonkeyConfig::from_toml_str("geocoders = {}").unwrap();
        assert!(matches!(
            config.validate(),
            Err(GeoError::MissingConfigError { .. })
        ));
    }
}
