use crate::error::{AppError, Result};
use crate::models::{Coordinates, TravelMode};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

const MAPBOX_DIRECTIONS_BASE_URL: &str = "https://api.mapbox.com/directions/v5/mapbox";

/// Abstract directions capability: given an origin and required intermediate
/// vias, return a single routed loop or fail. A provider "zero results"
/// outcome maps to [`AppError::NoRoute`], which callers treat as benign.
#[async_trait]
pub trait DirectionsProvider: Send + Sync {
    /// Route a loop from `origin` through `vias` (in order) and back to
    /// `origin`. No alternative routes are requested; the provider's first
    /// route is the result.
    async fn route_loop(
        &self,
        origin: &Coordinates,
        vias: &[Coordinates],
        mode: &TravelMode,
    ) -> Result<DirectionsResponse>;
}

/// How the client authenticates with the directions API.
#[derive(Clone, Debug)]
pub enum AuthMode {
    /// Current default: send `access_token` query param (direct Mapbox).
    DirectToken,
    /// Proxy mode: send `Authorization: Bearer` header.
    BearerHeader,
}

#[derive(Clone)]
pub struct MapboxClient {
    client: Client,
    api_key: String,
    base_url: String,
    auth_mode: AuthMode,
}

impl MapboxClient {
    pub fn new(api_key: String) -> Self {
        MapboxClient {
            client: Client::new(),
            api_key,
            base_url: MAPBOX_DIRECTIONS_BASE_URL.to_string(),
            auth_mode: AuthMode::DirectToken,
        }
    }

    pub fn with_config(api_key: String, base_url: String, auth_mode: AuthMode) -> Self {
        MapboxClient {
            client: Client::new(),
            api_key,
            base_url,
            auth_mode,
        }
    }
}

#[async_trait]
impl DirectionsProvider for MapboxClient {
    async fn route_loop(
        &self,
        origin: &Coordinates,
        vias: &[Coordinates],
        mode: &TravelMode,
    ) -> Result<DirectionsResponse> {
        if vias.is_empty() {
            return Err(AppError::InvalidRequest(
                "At least 1 via waypoint required for a loop".to_string(),
            ));
        }

        // Mapbox allows up to 25 waypoints; origin appears twice
        if vias.len() > 23 {
            return Err(AppError::InvalidRequest(
                "Maximum 23 via waypoints allowed".to_string(),
            ));
        }

        // Format coordinates as "lng,lat;lng,lat;..." with the origin
        // repeated at the end to close the loop
        let coordinates_str = std::iter::once(origin)
            .chain(vias.iter())
            .chain(std::iter::once(origin))
            .map(|c| format!("{},{}", c.lng, c.lat))
            .collect::<Vec<_>>()
            .join(";");

        let url = format!(
            "{}/{}/{}",
            self.base_url,
            mode.mapbox_profile(),
            coordinates_str
        );

        tracing::debug!(
            vias = vias.len(),
            mode = %mode.mapbox_profile(),
            "Directions request: loop through {} vias, profile {}",
            vias.len(), mode.mapbox_profile()
        );

        let mut request = self.client.get(&url).query(&[
            ("geometries", "geojson"),
            ("overview", "full"),
            ("steps", "false"),
            ("alternatives", "false"),
        ]);

        match self.auth_mode {
            AuthMode::DirectToken => {
                request = request.query(&[("access_token", &self.api_key)]);
            }
            AuthMode::BearerHeader => {
                request = request.bearer_auth(&self.api_key);
            }
        }

        let response = request
            .send()
            .await
            .map_err(|e| AppError::DirectionsApi(format!("Request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            tracing::warn!(
                status = %status,
                vias = vias.len(),
                "Directions API HTTP error {}: {}",
                status, error_text
            );
            return Err(AppError::DirectionsApi(format!(
                "HTTP {}: {}",
                status, error_text
            )));
        }

        let directions: MapboxDirectionsApiResponse = response
            .json()
            .await
            .map_err(|e| AppError::DirectionsApi(format!("Failed to parse response: {}", e)))?;

        // "NoRoute"/"NoSegment" mean the path network cannot connect the
        // waypoints. Expected for some candidate loops, so no warning here.
        if directions.code == "NoRoute"
            || directions.code == "NoSegment"
            || directions.routes.is_empty()
        {
            tracing::debug!(
                code = %directions.code,
                vias = vias.len(),
                "Directions API found no route through {} vias",
                vias.len()
            );
            return Err(AppError::NoRoute);
        }

        if directions.code != "Ok" {
            tracing::warn!(
                code = %directions.code,
                vias = vias.len(),
                "Directions API returned non-Ok code: {}",
                directions.code
            );
            return Err(AppError::DirectionsApi(format!(
                "Unexpected response code: {}",
                directions.code
            )));
        }

        // Convert first route to our format
        let route = &directions.routes[0];
        let leg_distances_m: Vec<f64> = route.legs.iter().map(|leg| leg.distance).collect();

        tracing::debug!(
            distance_km = %format!("{:.2}", leg_distances_m.iter().sum::<f64>() / 1000.0),
            legs = route.legs.len(),
            path_points = route.geometry.coordinates.len(),
            "Directions response: {} legs, {} path points",
            route.legs.len(), route.geometry.coordinates.len()
        );

        Ok(DirectionsResponse {
            leg_distances_m,
            geometry: route.geometry.coordinates.clone(),
        })
    }
}

// Mapbox API response types

#[derive(Debug, Deserialize)]
struct MapboxDirectionsApiResponse {
    #[serde(default)]
    routes: Vec<MapboxRoute>,
    code: String,
}

#[derive(Debug, Deserialize)]
struct MapboxRoute {
    legs: Vec<MapboxLeg>,
    geometry: MapboxGeometry,
}

#[derive(Debug, Deserialize)]
struct MapboxLeg {
    distance: f64, // meters
}

#[derive(Debug, Deserialize)]
struct MapboxGeometry {
    coordinates: Vec<[f64; 2]>, // [lng, lat] pairs
    #[allow(dead_code)]
    #[serde(rename = "type")]
    geometry_type: String,
}

// Our simplified response type

#[derive(Debug, Clone, Serialize)]
pub struct DirectionsResponse {
    /// Distance of each leg between consecutive waypoints, in meters.
    pub leg_distances_m: Vec<f64>,
    /// GeoJSON coordinates as [lng, lat] pairs
    pub geometry: Vec<[f64; 2]>,
}

impl DirectionsResponse {
    /// Total route length: the sum of all leg distances, converted to km.
    pub fn distance_km(&self) -> f64 {
        self.leg_distances_m.iter().sum::<f64>() / 1000.0
    }

    /// Convert GeoJSON coordinates to our Coordinates type
    pub fn to_coordinates(&self) -> Vec<Coordinates> {
        self.geometry
            .iter()
            .filter_map(|coord| Coordinates::new(coord[1], coord[0]).ok())
            .collect()
    }
}
