use super::scoring::elevation_gain_m;
use crate::error::AppError;
use crate::models::{Coordinates, CourseCandidate, TravelMode};
use crate::services::directions::DirectionsProvider;
use crate::services::elevation::ElevationProvider;
use std::sync::Arc;

/// Evaluates a single candidate via-point: obtains a routed loop and its
/// elevation profile, and turns the raw provider responses into a
/// [`CourseCandidate`] or a definite "no candidate" outcome.
///
/// Every failure is absorbed here; nothing an individual candidate does can
/// abort the overall selection.
pub struct CandidateEvaluator {
    directions: Arc<dyn DirectionsProvider>,
    elevation: Arc<dyn ElevationProvider>,
    max_elevation_samples: usize,
}

impl CandidateEvaluator {
    pub fn new(
        directions: Arc<dyn DirectionsProvider>,
        elevation: Arc<dyn ElevationProvider>,
        max_elevation_samples: usize,
    ) -> Self {
        Self {
            directions,
            elevation,
            max_elevation_samples,
        }
    }

    pub async fn evaluate(
        &self,
        start: &Coordinates,
        via: Coordinates,
        mode: &TravelMode,
    ) -> Option<CourseCandidate> {
        let directions = match self.directions.route_loop(start, &[via], mode).await {
            Ok(d) => d,
            Err(AppError::NoRoute) => {
                tracing::debug!(
                    via_lat = via.lat,
                    via_lng = via.lng,
                    "No route through candidate via ({:.4}, {:.4})",
                    via.lat, via.lng
                );
                return None;
            }
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    via_lat = via.lat,
                    via_lng = via.lng,
                    "Route query failed for candidate via ({:.4}, {:.4}): {}",
                    via.lat, via.lng, e
                );
                return None;
            }
        };

        let distance_km = directions.distance_km();
        let path = directions.to_coordinates();

        // Insufficient geometry to evaluate elevation
        if distance_km <= f64::EPSILON || path.len() < 2 {
            tracing::debug!(
                distance_km = distance_km,
                path_points = path.len(),
                "Discarding degenerate candidate loop ({} points, {:.3}km)",
                path.len(), distance_km
            );
            return None;
        }

        let sample_count = self.max_elevation_samples.min(path.len());
        let elevations = match self.elevation.sample_elevations(&path, sample_count).await {
            Ok(e) => e,
            Err(e) => {
                // A route without elevation data cannot be scored
                tracing::warn!(
                    error = %e,
                    distance_km = %format!("{:.2}", distance_km),
                    "Elevation query failed for {:.2}km candidate: {}",
                    distance_km, e
                );
                return None;
            }
        };

        let gain_m = elevation_gain_m(&elevations);

        tracing::debug!(
            distance_km = %format!("{:.2}", distance_km),
            elevation_gain_m = %format!("{:.1}", gain_m),
            path_points = path.len(),
            "Candidate evaluated: {:.2}km, {:.1}m gain",
            distance_km, gain_m
        );

        Some(CourseCandidate::new(distance_km, gain_m, path))
    }
}
