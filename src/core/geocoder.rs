use crate::domain::model::{GeocodeResult, GeocodedAddress};
use crate::domain::ports::{GeocodeBackend, GeocodeCache, GeocodedRecord, JobHandle, JobQueue};
use crate::utils::error::{GeoError, Result};
use chrono::Utc;
use regex::Regex;
use std::sync::{Arc, OnceLock};

/// Normalizes an address into a cache key: lowercase, then strip everything
/// outside `[a-z0-9]`. "123 Main St." and "123 main st" collide on purpose,
/// trading spelling precision for cache hit rate.
pub fn generate_cache_key(address: &str) -> String {
    static NON_KEY_CHARS: OnceLock<Regex> = OnceLock::new();
    let pattern = NON_KEY_CHARS.get_or_init(|| Regex::new(r"[^a-z0-9]").expect("static pattern"));
    pattern
        .replace_all(&address.to_lowercase(), "")
        .into_owned()
}

/// Outcome of a record-populating geocode dispatch.
pub enum RecordOutcome<R> {
    /// Inline path: the populated record, already persisted if commit was
    /// requested.
    Completed(R),
    /// Scheduled path: the cycle continues on the job queue. Failures inside
    /// the job are logged, never surfaced here.
    Scheduled(JobHandle),
}

/// Cache-aware geocoder bound to one configured backend.
///
/// Holds the last raw result in place, so a single instance is not meant for
/// concurrent reuse; the registry hands out a fresh one per resolution.
pub struct Geocoder {
    name: String,
    backend: Arc<dyn GeocodeBackend>,
    cache: Arc<dyn GeocodeCache>,
    queue: Arc<dyn JobQueue>,
    run_async: bool,
    last: Option<GeocodedAddress>,
}

impl std::fmt::Debug for Geocoder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Geocoder")
            .field("name", &self.name)
            .field("run_async", &self.run_async)
            .field("last", &self.last)
            .finish_non_exhaustive()
    }
}

impl Geocoder {
    pub fn new(
        name: impl Into<String>,
        backend: Arc<dyn GeocodeBackend>,
        cache: Arc<dyn GeocodeCache>,
        queue: Arc<dyn JobQueue>,
        run_async: bool,
    ) -> Self {
        Self {
            name: name.into(),
            backend,
            cache,
            queue,
            run_async,
            last: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_async(&self) -> bool {
        self.run_async
    }

    /// Raw result of the most recent `geocode` call, coordinate-less ones
    /// included.
    pub fn last_result(&self) -> Option<&GeocodedAddress> {
        self.last.as_ref()
    }

    /// Resolves `address` to a qualified address and coordinate pair, serving
    /// from the cache when a normalized-key entry exists and storing fresh
    /// backend results with no expiration.
    ///
    /// A result without a usable coordinate pair fails with
    /// [`GeoError::LookupError`] whether it came from the cache or a live
    /// fetch, so corrupt cache entries surface as lookup failures.
    pub async fn geocode(&mut self, address: &str) -> Result<GeocodeResult> {
        let key = generate_cache_key(address);

        let resolved = match self.cache.get(&key).await? {
            Some(cached) => {
                tracing::debug!(%address, %key, "address geocoded from cache");
                cached
            }
            None => {
                let fresh = self.backend.lookup(address).await?;
                self.cache.set(&key, &fresh, None).await?;
                tracing::debug!(%address, %key, "address geocoded from backend and cached");
                fresh
            }
        };

        let fix = resolved.fix();
        let qualified_address = resolved.qualified_address.clone();
        self.last = Some(resolved);

        match fix {
            Some((latitude, longitude)) => Ok(GeocodeResult {
                qualified_address,
                latitude,
                longitude,
            }),
            None => Err(GeoError::LookupError {
                geocoder: self.name.clone(),
                address: address.to_string(),
            }),
        }
    }

    /// Geocodes `address` and assigns the geo fields plus the completion
    /// timestamp onto `record`, persisting it iff `commit`.
    pub async fn populate<R>(&mut self, address: &str, record: &mut R, commit: bool) -> Result<()>
    where
        R: GeocodedRecord + ?Sized,
    {
        let result = self.geocode(address).await?;
        record.set_geo_fields(
            result.qualified_address,
            result.latitude,
            result.longitude,
            Utc::now(),
        );
        if commit {
            record.save().await?;
        }
        Ok(())
    }

    /// Record-populating entry point honoring the configured execution mode.
    ///
    /// Synchronous geocoders populate inline and hand the record back. When
    /// the geocoder is configured `async`, the whole geocode-populate-save
    /// cycle is submitted to the job queue instead and the record travels
    /// with the job; scheduled cycles always persist, overriding `commit`.
    pub async fn geocode_record<R>(
        mut self,
        address: String,
        mut record: R,
        commit: bool,
    ) -> Result<RecordOutcome<R>>
    where
        R: GeocodedRecord + 'static,
    {
        if self.run_async {
            if !commit {
                tracing::debug!(
                    geocoder = %self.name,
                    "scheduled geocode always persists; commit flag overridden"
                );
            }
            let queue = Arc::clone(&self.queue);
            let handle = queue.submit(Box::pin(async move {
                if let Err(err) = self.populate(&address, &mut record, true).await {
                    tracing::warn!(%address, "scheduled geocode failed: {err}");
                }
            }));
            return Ok(RecordOutcome::Scheduled(handle));
        }

        self.populate(&address, &mut record, commit).await?;
        Ok(RecordOutcome::Completed(record))
    }
}
