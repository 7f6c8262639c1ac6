pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

pub use adapters::backends::{GeocoderUsBackend, GoogleBackend};
pub use adapters::cache::InMemoryCache;
pub use adapters::queue::TokioJobQueue;
pub use config::{BackendKind, GeocoderEntry, GeomonkeyConfig, DEFAULT_GEOCODER_NAME};
pub use crate::core::{
    generate_cache_key, ConcernSnapshot, Geocoder, GeocoderRegistry, RecordOutcome, Tracked,
};
pub use domain::model::{GeocodeResult, GeocodedAddress};
pub use domain::ports::{GeocodeBackend, GeocodeCache, GeocodedRecord, JobHandle, JobQueue};
pub use utils::error::{GeoError, Result};
