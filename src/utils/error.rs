use thiserror::Error;

#[derive(Error, Debug)]
pub enum GeoError {
    #[error("no geocoder named \"{name}\" is configured; add it under [geocoders] or define a valid default_geocoder")]
    ConfigurationError { name: String },

    #[error("geocoder \"{geocoder}\" did not return a location for \"{address}\"")]
    LookupError { geocoder: String, address: String },

    #[error("backend request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("backend returned unusable data: {message}")]
    BackendError { message: String },

    #[error("backend responded with status {status}")]
    BackendStatusError { status: u16 },

    #[error("cache error: {message}")]
    CacheError { message: String },

    #[error("serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("configuration file error: {0}")]
    ConfigFileError(#[from] toml::de::Error),

    #[error("invalid configuration value for {field}: {value} ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("missing required configuration field: {field}")]
    MissingConfigError { field: String },

    #[error("{type_name} must provide geocoding_query when more than one concern field is configured")]
    QueryNotImplementedError { type_name: &'static str },

    #[error("record type {type_name} has no concern field named \"{field}\"")]
    UnknownConcernFieldError {
        field: String,
        type_name: &'static str,
    },

    #[error("persistence error: {message}")]
    PersistenceError { message: String },
}

pub type Result<T> = std::result::Result<T, GeoError>;
