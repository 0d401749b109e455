// Copyright (c) Friend Focus Team
// SPDX-License-Identifier: Apache-2.0

//! Thin proxy over the Google Places API: autocomplete suggestions and place
//! details. No retries; a failed upstream call surfaces as an error.

use serde::{Deserialize, Serialize};
use thiserror::Error;

const PLACES_BASE_URL: &str = "https://maps.googleapis.com/maps/api/place";

#[derive(Debug, Error)]
pub enum PlacesError {
    #[error("places request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("places API returned status {0}")]
    Upstream(String),
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PlaceSuggestion {
    pub description: String,
    pub place_id: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PlaceDetails {
    pub name: Option<String>,
    pub formatted_address: Option<String>,
}

#[derive(Debug, Deserialize)]
struct AutocompleteResponse {
    #[serde(default)]
    predictions: Vec<PlaceSuggestion>,
    status: String,
}

#[derive(Debug, Deserialize)]
struct DetailsResponse {
    result: Option<PlaceDetails>,
    status: String,
}

pub struct PlacesClient {
    http: reqwest::Client,
    api_key: String,
}

impl PlacesClient {
    pub fn new(api_key: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key,
        }
    }

    /// Autocomplete suggestions for a partial address or place name.
    pub async fn autocomplete(&self, input: &str) -> Result<Vec<PlaceSuggestion>, PlacesError> {
        let url = format!("{}/autocomplete/json", PLACES_BASE_URL);
        let resp = self
            .http
            .get(&url)
            .query(&[("input", input), ("key", self.api_key.as_str())])
            .send()
            .await?
            .error_for_status()?;

        let body: AutocompleteResponse = resp.json().await?;
        if body.status != "OK" && body.status != "ZERO_RESULTS" {
            return Err(PlacesError::Upstream(body.status));
        }
        Ok(body.predictions)
    }

    /// Details for a place previously returned by autocomplete.
    pub async fn details(&self, place_id: &str) -> Result<Option<PlaceDetails>, PlacesError> {
        let url = format!("{}/details/json", PLACES_BASE_URL);
        let resp = self
            .http
            .get(&url)
            .query(&[
                ("place_id", place_id),
                ("fields", "name,formatted_address"),
                ("key", self.api_key.as_str()),
            ])
            .send()
            .await?
            .error_for_status()?;

        let body: DetailsResponse = resp.json().await?;
        if body.status != "OK" && body.status != "ZERO_RESULTS" && body.status != "NOT_FOUND" {
            return Err(PlacesError::Upstream(body.status));
        }
        Ok(body.result)
    }
}
