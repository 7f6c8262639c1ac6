use serde::{Deserialize, Serialize};

/// Raw outcome of a backend lookup. Also the cache entry payload, so stale
/// or coordinate-less entries must round-trip unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeocodedAddress {
    pub qualified_address: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl GeocodedAddress {
    pub fn new(
        qualified_address: impl Into<String>,
        latitude: Option<f64>,
        longitude: Option<f64>,
    ) -> Self {
        Self {
            qualified_address: qualified_address.into(),
            latitude,
            longitude,
        }
    }

    /// Coordinate pair, if the lookup produced a usable fix. A coordinate of
    /// exactly zero counts as absent.
    pub fn fix(&self) -> Option<(f64, f64)> {
        match (self.latitude, self.longitude) {
            (Some(lat), Some(lng)) if lat != 0.0 && lng != 0.0 => Some((lat, lng)),
            _ => None,
        }
    }
}

/// A successful geocode as handed back to callers: qualified address plus a
/// guaranteed coordinate pair.
#[derive(Debug, Clone, PartialEq)]
pub struct GeocodeResult {
    pub qualified_address: String,
    pub latitude: f64,
    pub longitude: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fix_requires_both_coordinates() {
        let full = GeocodedAddress::new("Springfield", Some(42.1), Some(-71.3));
        assert_eq!(full.fix(), Some((42.1, -71.3)));

        let missing_lng = GeocodedAddress::new("Springfield", Some(42.1), None);
        assert_eq!(missing_lng.fix(), None);

        let empty = GeocodedAddress::new("", None, None);
        assert_eq!(empty.fix(), None);
    }

    #[test]
    fn test_zero_coordinate_counts_as_absent() {
        let zeroed = GeocodedAddress::new("Null Island", Some(0.0), Some(0.0));
        assert_eq!(zeroed.fix(), None);
    }

    #[test]
    fn test_cache_payload_round_trip() {
        let original = GeocodedAddress::new("100, Main St, Springfield", Some(42.1), Some(-71.3));
        let payload = serde_json::to_string(&original).unwrap();
        let restored: GeocodedAddress = serde_json::from_str(&payload).unwrap();
        assert_eq!(restored, original);
    }
}
