use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::env;
use std::error::Error;
use std::fmt;

/// One ranked autocomplete suggestion from the geocoding provider. The
/// structured address components vary by place type, so they pass through
/// loosely typed.
#[derive(Debug, Serialize, Deserialize)]
pub struct LocationSuggestion {
    pub display_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lat: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lon: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<Value>,
}

#[derive(Debug)]
pub enum LocationSearchError {
    EnvironmentError(String),
    HttpError(reqwest::Error),
    ResponseError(String),
}

impl fmt::Display for LocationSearchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LocationSearchError::EnvironmentError(msg) => write!(f, "Environment error: {}", msg),
            LocationSearchError::HttpError(err) => write!(f, "HTTP error: {}", err),
            LocationSearchError::ResponseError(msg) => write!(f, "Response error: {}", msg),
        }
    }
}

impl Error for LocationSearchError {}

impl From<reqwest::Error> for LocationSearchError {
    fn from(err: reqwest::Error) -> Self {
        LocationSearchError::HttpError(err)
    }
}

pub struct LocationService {
    client: Client,
    api_key: String,
}

impl LocationService {
    pub fn new() -> Result<Self, LocationSearchError> {
        let api_key = env::var("LOCATIONIQ_API_KEY").map_err(|_| {
            LocationSearchError::EnvironmentError("LOCATIONIQ_API_KEY not set".to_string())
        })?;

        Ok(Self {
            client: Client::new(),
            api_key,
        })
    }

    pub async fn autocomplete(
        &self,
        query: &str,
        limit: u32,
    ) -> Result<Vec<LocationSuggestion>, LocationSearchError> {
        let response = self
            .client
            .get("https://api.locationiq.com/v1/autocomplete.php")
            .query(&[
                ("key", self.api_key.as_str()),
                ("q", query),
                ("limit", &limit.to_string()),
                ("format", "json"),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(LocationSearchError::ResponseError(format!(
                "LocationIQ returned error status: {}",
                response.status()
            )));
        }

        let suggestions: Vec<LocationSuggestion> = response.json().await?;

        Ok(suggestions)
    }
}
