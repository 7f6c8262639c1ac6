pub mod geocoder_us;
pub mod google;

use crate::config::{BackendKind, GeocoderEntry};
use crate::domain::ports::GeocodeBackend;
use crate::utils::error::Result;
use std::sync::Arc;
use std::time::Duration;

pub use geocoder_us::GeocoderUsBackend;
pub use google::GoogleBackend;

/// Builds the backend selected by a configuration entry.
pub fn build_backend(entry: &GeocoderEntry) -> Result<Arc<dyn GeocodeBackend>> {
    let client = http_client(entry)?;
    let backend: Arc<dyn GeocodeBackend> = match entry.backend {
        BackendKind::Google => Arc::new(GoogleBackend::new(
            client,
            entry.endpoint.clone(),
            entry.api_key.clone(),
        )),
        BackendKind::GeocoderUs => Arc::new(GeocoderUsBackend::new(client, entry.endpoint.clone())),
    };
    Ok(backend)
}

fn http_client(entry: &GeocoderEntry) -> Result<reqwest::Client> {
    let mut builder = reqwest::Client::builder();
    if let Some(timeout) = entry.timeout_seconds {
        builder = builder.timeout(Duration::from_secs(timeout));
    }
    Ok(builder.build()?)
}
