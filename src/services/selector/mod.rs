mod evaluator;
mod scoring;
mod waypoints;

use crate::config::SelectorConfig;
use crate::error::{AppError, Result};
use crate::models::{Coordinates, CourseCandidate, TravelMode};
use crate::services::directions::DirectionsProvider;
use crate::services::elevation::ElevationProvider;
use std::sync::Arc;

use evaluator::CandidateEvaluator;

pub struct CourseSelector {
    evaluator: CandidateEvaluator,
    config: SelectorConfig,
}

impl CourseSelector {
    pub fn new(
        directions: Arc<dyn DirectionsProvider>,
        elevation: Arc<dyn ElevationProvider>,
        config: SelectorConfig,
    ) -> Self {
        let evaluator =
            CandidateEvaluator::new(directions, elevation, config.max_elevation_samples);

        CourseSelector { evaluator, config }
    }

    /// Select the best closed-loop course for `start` and `desired_km`.
    ///
    /// Projects candidate vias around the start, routes and measures every
    /// candidate concurrently, then applies the two-tier tolerance policy.
    /// Returns `Ok(None)` when no candidate survives evaluation; only
    /// precondition failures surface as errors.
    pub async fn select_loop_course(
        &self,
        start: Coordinates,
        desired_km: f64,
        mode: &TravelMode,
    ) -> Result<Option<CourseCandidate>> {
        if !desired_km.is_finite() || desired_km <= 0.0 {
            return Err(AppError::InvalidRequest(
                "Desired distance must be positive".to_string(),
            ));
        }

        let vias = waypoints::via_waypoints(
            &start,
            desired_km,
            self.config.candidate_count,
            self.config.radius_factor,
        );

        tracing::info!(
            lat = start.lat,
            lng = start.lng,
            desired_km = desired_km,
            candidates = vias.len(),
            "Selecting loop course from ({:.4}, {:.4}), target {:.1}km, {} candidates",
            start.lat, start.lng, desired_km, vias.len()
        );

        // Fire all evaluations at once and settle every one; individual
        // failures already degraded to None inside the evaluator.
        let evaluations = vias
            .into_iter()
            .map(|via| self.evaluator.evaluate(&start, via, mode));
        let results = futures::future::join_all(evaluations).await;

        // Collected in waypoint order, which keeps tie-breaking stable
        let candidates: Vec<CourseCandidate> = results.into_iter().flatten().collect();

        tracing::info!(
            surviving = candidates.len(),
            total = self.config.candidate_count,
            "Candidate fan-out complete: {}/{} loops evaluated successfully",
            candidates.len(), self.config.candidate_count
        );

        let best = scoring::pick_best(candidates, desired_km, self.config.distance_tolerance);

        match &best {
            Some(course) => tracing::info!(
                distance_km = %format!("{:.2}", course.distance_km),
                elevation_gain_m = %format!("{:.1}", course.elevation_gain_m),
                "Selected course: {:.2}km, {:.1}m elevation gain",
                course.distance_km, course.elevation_gain_m
            ),
            None => tracing::info!("No suitable course found for {:.1}km target", desired_km),
        }

        Ok(best)
    }
}
