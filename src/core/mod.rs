pub mod geocoder;
pub mod registry;
pub mod tracked;

pub use geocoder::{generate_cache_key, Geocoder, RecordOutcome};
pub use registry::GeocoderRegistry;
pub use tracked::{ConcernSnapshot, Tracked};
