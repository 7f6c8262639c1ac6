use crate::domain::model::GeocodedAddress;
use crate::utils::error::{GeoError, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::future::Future;
use std::pin::Pin;
use std::time::Duration;

/// A geocoding backend: resolves a free-text address into a qualified
/// address plus coordinates, or fails. Implementations do not cache.
#[async_trait]
pub trait GeocodeBackend: Send + Sync {
    async fn lookup(&self, address: &str) -> Result<GeocodedAddress>;
}

/// Cache service consumed by the geocoder. A `ttl` of `None` means the entry
/// never expires.
#[async_trait]
pub trait GeocodeCache: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<GeocodedAddress>>;
    async fn set(&self, key: &str, value: &GeocodedAddress, ttl: Option<Duration>) -> Result<()>;
}

pub type BoxedJob = Pin<Box<dyn Future<Output = ()> + Send + 'static>>;

/// Handle to a job submitted for out-of-band execution. There is no result
/// channel; `join` only observes completion.
pub struct JobHandle {
    inner: tokio::task::JoinHandle<()>,
}

impl JobHandle {
    pub fn new(inner: tokio::task::JoinHandle<()>) -> Self {
        Self { inner }
    }

    pub async fn join(self) {
        let _ = self.inner.await;
    }
}

/// Task queue consumed by asynchronous geocoders. Submission is
/// fire-and-forget from the caller's perspective.
pub trait JobQueue: Send + Sync {
    fn submit(&self, job: BoxedJob) -> JobHandle;
}

/// Capability trait for persisted records that carry geo fields.
///
/// Conforming types expose the concern fields whose change should trigger
/// re-geocoding, a setter for the geo fields populated by a geocode cycle,
/// and the underlying persistence operation.
#[async_trait]
pub trait GeocodedRecord: Send {
    /// Field names whose change since load should trigger re-geocoding.
    fn concern_fields(&self) -> &[&'static str];

    /// Current value of a concern field, by name. `None` for unknown fields.
    fn concern_value(&self, field: &str) -> Option<String>;

    /// Assigns the result of a geocode cycle. `geocoded` is the wall-clock
    /// completion time and doubles as the "has been geocoded" flag.
    fn set_geo_fields(
        &mut self,
        qualified_address: String,
        latitude: f64,
        longitude: f64,
        geocoded: DateTime<Utc>,
    );

    /// Persists the record through the underlying storage layer.
    async fn save(&mut self) -> Result<()>;

    /// Address used to geocode this record. With a single concern field its
    /// value is used verbatim; types with several concern fields must
    /// override this.
    fn geocoding_query(&self) -> Result<String> {
        match self.concern_fields() {
            [field] => {
                let field = *field;
                self.concern_value(field)
                    .ok_or_else(|| GeoError::UnknownConcernFieldError {
                        field: field.to_string(),
                        type_name: std::any::type_name::<Self>(),
                    })
            }
            _ => Err(GeoError::QueryNotImplementedError {
                type_name: std::any::type_name::<Self>(),
            }),
        }
    }
}
