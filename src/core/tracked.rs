use crate::core::geocoder::RecordOutcome;
use crate::core::registry::GeocoderRegistry;
use crate::domain::ports::{GeocodedRecord, JobHandle};
use crate::utils::error::Result;
use std::collections::HashMap;

/// Immutable snapshot of a record's concern-field values, captured when the
/// record is loaded from storage.
#[derive(Debug, Clone, PartialEq)]
pub struct ConcernSnapshot {
    values: HashMap<&'static str, Option<String>>,
}

impl ConcernSnapshot {
    pub fn capture<R: GeocodedRecord + ?Sized>(record: &R) -> Self {
        let values = record
            .concern_fields()
            .iter()
            .map(|field| (*field, record.concern_value(field)))
            .collect();
        Self { values }
    }

    /// Concern fields whose current value differs from the snapshot.
    pub fn changed_fields<R: GeocodedRecord + ?Sized>(&self, record: &R) -> Vec<&'static str> {
        record
            .concern_fields()
            .iter()
            .copied()
            .filter(|field| {
                let current = record.concern_value(field);
                match self.values.get(field) {
                    Some(original) => *original != current,
                    None => true,
                }
            })
            .collect()
    }

    pub fn is_dirty<R: GeocodedRecord + ?Sized>(&self, record: &R) -> bool {
        !self.changed_fields(record).is_empty()
    }
}

/// Dirty-tracking wrapper applied to a [`GeocodedRecord`] at load time.
///
/// Saving through the wrapper re-geocodes first whenever any concern field
/// changed since the snapshot was captured. The snapshot is refreshed only by
/// loading the record again, never after a save.
pub struct Tracked<R: GeocodedRecord> {
    record: R,
    snapshot: ConcernSnapshot,
}

impl<R: GeocodedRecord> Tracked<R> {
    /// Wraps a freshly loaded (or constructed) record, capturing the concern
    /// snapshot as of now.
    pub fn load(record: R) -> Self {
        let snapshot = ConcernSnapshot::capture(&record);
        Self { record, snapshot }
    }

    pub fn record(&self) -> &R {
        &self.record
    }

    pub fn record_mut(&mut self) -> &mut R {
        &mut self.record
    }

    pub fn snapshot(&self) -> &ConcernSnapshot {
        &self.snapshot
    }

    pub fn into_inner(self) -> R {
        self.record
    }

    /// Save hook: when any concern field changed since load, dispatches a
    /// geocode on the registry's default geocoder before persisting.
    ///
    /// With a synchronous geocoder the populated fields are written back and
    /// persist with this save. With an asynchronous one the record saves
    /// immediately as-is and the geocode-populate-save cycle re-saves it out
    /// of band; the returned handle observes that job's completion.
    pub async fn save(&mut self, registry: &GeocoderRegistry) -> Result<Option<JobHandle>>
    where
        R: Clone + 'static,
    {
        let mut scheduled = None;

        if self.snapshot.is_dirty(&self.record) {
            let query = self.record.geocoding_query()?;
            let geocoder = registry.resolve(None)?;
            match geocoder
                .geocode_record(query, self.record.clone(), false)
                .await?
            {
                RecordOutcome::Completed(populated) => self.record = populated,
                RecordOutcome::Scheduled(handle) => scheduled = Some(handle),
            }
        }

        self.record.save().await?;
        Ok(scheduled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::{DateTime, Utc};

    #[derive(Debug, Clone, Default)]
    struct Venue {
        name: String,
        address: String,
        latitude: Option<f64>,
        longitude: Option<f64>,
        qualified_address: Option<String>,
        geocoded: Option<DateTime<Utc>>,
    }

    #[async_trait]
    impl GeocodedRecord for Venue {
        fn concern_fields(&self) -> &[&'static str] {
            &["address"]
        }

        fn concern_value(&self, field: &str) -> Option<String> {
            match field {
                "address" => Some(self.address.clone()),
                "name" => Some(self.name.clone()),
                _ => None,
            }
        }

        fn set_geo_fields(
            &mut self,
            qualified_address: String,
            latitude: f64,
            longitude: f64,
            geocoded: DateTime<Utc>,
        ) {
            self.qualified_address = Some(qualified_address);
            self.latitude = Some(latitude);
            self.longitude = Some(longitude);
            self.geocoded = Some(geocoded);
        }

        async fn save(&mut self) -> Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_snapshot_clean_after_load() {
        let venue = Venue {
            address: "123 Main St".to_string(),
            ..Venue::default()
        };
        let tracked = Tracked::load(venue);
        assert!(!tracked.snapshot().is_dirty(tracked.record()));
    }

    #[test]
    fn test_changed_concern_field_is_dirty() {
        let venue = Venue {
            address: "123 Main St".to_string(),
            ..Venue::default()
        };
        let mut tracked = Tracked::load(venue);
        tracked.record_mut().address = "456 Elm St".to_string();

        assert_eq!(
            tracked.snapshot().changed_fields(tracked.record()),
            vec!["address"]
        );
    }

    #[test]
    fn test_non_concern_field_change_stays_clean() {
        let venue = Venue {
            name: "Old Name".to_string(),
            address: "123 Main St".to_string(),
            ..Venue::default()
        };
        let mut tracked = Tracked::load(venue);
        tracked.record_mut().name = "New Name".to_string();

        assert!(!tracked.snapshot().is_dirty(tracked.record()));
    }

    #[test]
    fn test_single_concern_query_uses_field_verbatim() {
        let venue = Venue {
            address: "123 Main St., Springfield".to_string(),
            ..Venue::default()
        };
        assert_eq!(
            venue.geocoding_query().unwrap(),
            "123 Main St., Springfield"
        );
    }
}
