use crate::error::{AppError, Result};
use crate::models::Coordinates;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

const OPEN_ELEVATION_BASE_URL: &str = "https://api.open-elevation.com";

/// Abstract elevation capability: given a path and a sample budget, return
/// one elevation value (meters) per sampled point, in path order.
#[async_trait]
pub trait ElevationProvider: Send + Sync {
    async fn sample_elevations(
        &self,
        path: &[Coordinates],
        sample_count: usize,
    ) -> Result<Vec<f64>>;
}

/// Thin a path down to `count` points at evenly spaced indices, always
/// keeping the first and last point. Paths at or under the budget pass
/// through unchanged.
pub fn sample_path(path: &[Coordinates], count: usize) -> Vec<Coordinates> {
    if count >= path.len() || path.len() < 2 {
        return path.to_vec();
    }
    let count = count.max(2);

    let last = path.len() - 1;
    (0..count)
        .map(|i| {
            let idx = (i as f64 * last as f64 / (count - 1) as f64).round() as usize;
            path[idx]
        })
        .collect()
}

/// Elevation client for Open-Elevation compatible lookup services.
#[derive(Clone)]
pub struct OpenElevationClient {
    client: Client,
    base_url: String,
}

impl OpenElevationClient {
    pub fn new() -> Self {
        OpenElevationClient {
            client: Client::new(),
            base_url: OPEN_ELEVATION_BASE_URL.to_string(),
        }
    }

    pub fn with_base_url(base_url: String) -> Self {
        OpenElevationClient {
            client: Client::new(),
            base_url,
        }
    }
}

impl Default for OpenElevationClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ElevationProvider for OpenElevationClient {
    async fn sample_elevations(
        &self,
        path: &[Coordinates],
        sample_count: usize,
    ) -> Result<Vec<f64>> {
        if path.len() < 2 {
            return Err(AppError::InvalidRequest(
                "Elevation sampling requires a path with at least 2 points".to_string(),
            ));
        }

        let samples = sample_path(path, sample_count);
        let body = LookupRequest {
            locations: samples
                .iter()
                .map(|c| LookupLocation {
                    latitude: c.lat,
                    longitude: c.lng,
                })
                .collect(),
        };

        tracing::debug!(
            path_points = path.len(),
            samples = samples.len(),
            "Elevation request: {} samples over {} path points",
            samples.len(), path.len()
        );

        let url = format!("{}/api/v1/lookup", self.base_url);
        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| AppError::ElevationApi(format!("Request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            tracing::warn!(
                status = %status,
                samples = samples.len(),
                "Elevation API HTTP error {}: {}",
                status, error_text
            );
            return Err(AppError::ElevationApi(format!(
                "HTTP {}: {}",
                status, error_text
            )));
        }

        let lookup: LookupResponse = response
            .json()
            .await
            .map_err(|e| AppError::ElevationApi(format!("Failed to parse response: {}", e)))?;

        if lookup.results.len() != samples.len() {
            return Err(AppError::ElevationApi(format!(
                "Expected {} elevation results, got {}",
                samples.len(),
                lookup.results.len()
            )));
        }

        Ok(lookup.results.into_iter().map(|r| r.elevation).collect())
    }
}

// Open-Elevation API request/response types

#[derive(Debug, Serialize)]
struct LookupRequest {
    locations: Vec<LookupLocation>,
}

#[derive(Debug, Serialize)]
struct LookupLocation {
    latitude: f64,
    longitude: f64,
}

#[derive(Debug, Deserialize)]
struct LookupResponse {
    results: Vec<LookupResult>,
}

#[derive(Debug, Deserialize)]
struct LookupResult {
    elevation: f64,
}
