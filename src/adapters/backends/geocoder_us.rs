use crate::domain::model::GeocodedAddress;
use crate::domain::ports::GeocodeBackend;
use crate::utils::error::{GeoError, Result};
use async_trait::async_trait;
use reqwest::Client;

/// Backend for CSV-over-HTTP lookup services in the rpc.geocoder.us shape:
/// a 200 response whose body is `lat,long,...,addressParts`.
pub struct GeocoderUsBackend {
    client: Client,
    endpoint: String,
}

impl GeocoderUsBackend {
    pub fn new(client: Client, endpoint: String) -> Self {
        Self { client, endpoint }
    }
}

#[async_trait]
impl GeocodeBackend for GeocoderUsBackend {
    async fn lookup(&self, address: &str) -> Result<GeocodedAddress> {
        let response = self
            .client
            .get(&self.endpoint)
            .query(&[("address", address)])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(GeoError::BackendStatusError {
                status: status.as_u16(),
            });
        }

        let body = response.text().await?;
        parse_csv_body(&body)
    }
}

/// Splits `lat,long,...,addressParts`; everything after the coordinates is
/// rejoined with ", " into the qualified address.
fn parse_csv_body(body: &str) -> Result<GeocodedAddress> {
    let segments: Vec<&str> = body.trim().split(',').map(str::trim).collect();
    if segments.len() < 3 {
        return Err(GeoError::BackendError {
            message: format!("unexpected CSV response: \"{}\"", body.trim()),
        });
    }

    let latitude = segments[0]
        .parse::<f64>()
        .map_err(|e| GeoError::BackendError {
            message: format!("invalid latitude \"{}\": {}", segments[0], e),
        })?;
    let longitude = segments[1]
        .parse::<f64>()
        .map_err(|e| GeoError::BackendError {
            message: format!("invalid longitude \"{}\": {}", segments[1], e),
        })?;

    let qualified_address = segments[2..].join(", ");

    Ok(GeocodedAddress::new(
        qualified_address,
        Some(latitude),
        Some(longitude),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_csv_body() {
        let result = parse_csv_body("42.1,-71.3,100,Main St,Springfield").unwrap();
        assert_eq!(result.qualified_address, "100, Main St, Springfield");
        assert_eq!(result.fix(), Some((42.1, -71.3)));
    }

    #[test]
    fn test_parse_csv_body_trims_whitespace() {
        let result = parse_csv_body(" 42.1, -71.3, 100, Main St, Springfield \n").unwrap();
        assert_eq!(result.qualified_address, "100, Main St, Springfield");
    }

    #[test]
    fn test_parse_csv_body_rejects_short_response() {
        assert!(matches!(
            parse_csv_body("couldn't find this address"),
            Err(GeoError::BackendError { .. })
        ));
    }

    #[test]
    fn test_parse_csv_body_rejects_bad_coordinates() {
        assert!(matches!(
            parse_csv_body("not-a-number,-71.3,Main St,Springfield"),
            Err(GeoError::BackendError { .. })
        ));
    }
}
