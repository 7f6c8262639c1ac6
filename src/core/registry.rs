use crate::adapters::backends::build_backend;
use crate::config::GeomonkeyConfig;
use crate::core::geocoder::Geocoder;
use crate::domain::ports::{GeocodeBackend, GeocodeCache, JobQueue};
use crate::utils::error::{GeoError, Result};
use std::collections::HashMap;
use std::sync::Arc;

struct Registered {
    backend: Arc<dyn GeocodeBackend>,
    run_async: bool,
}

/// Process-wide registry of configured geocoders, built once at startup and
/// passed explicitly to whatever needs to resolve one.
pub struct GeocoderRegistry {
    geocoders: HashMap<String, Registered>,
    default_name: String,
    cache: Arc<dyn GeocodeCache>,
    queue: Arc<dyn JobQueue>,
}

impl GeocoderRegistry {
    /// Builds one backend per configured entry. The cache and job queue are
    /// shared by every geocoder the registry hands out.
    pub fn from_config(
        config: &GeomonkeyConfig,
        cache: Arc<dyn GeocodeCache>,
        queue: Arc<dyn JobQueue>,
    ) -> Result<Self> {
        let mut geocoders = HashMap::new();
        for (name, entry) in &config.geocoders {
            geocoders.insert(
                name.clone(),
                Registered {
                    backend: build_backend(entry)?,
                    run_async: entry.run_async,
                },
            );
        }

        Ok(Self {
            geocoders,
            default_name: config.default_geocoder.clone(),
            cache,
            queue,
        })
    }

    pub fn default_name(&self) -> &str {
        &self.default_name
    }

    /// Resolves a named geocoder, or the configured default when `name` is
    /// omitted. Each resolution constructs a fresh wrapper around the shared
    /// backend, cache and queue.
    pub fn resolve(&self, name: Option<&str>) -> Result<Geocoder> {
        let name = name.unwrap_or(&self.default_name);
        let registered =
            self.geocoders
                .get(name)
                .ok_or_else(|| GeoError::ConfigurationError {
                    name: name.to_string(),
                })?;

        Ok(Geocoder::new(
            name,
            Arc::clone(&registered.backend),
            Arc::clone(&self.cache),
            Arc::clone(&self.queue),
            registered.run_async,
        ))
    }
}
