#![allow(dead_code)]

use async_trait::async_trait;
use courseloop::config::SelectorConfig;
use courseloop::error::{AppError, Result};
use courseloop::models::{Coordinates, TravelMode};
use courseloop::services::directions::{DirectionsProvider, DirectionsResponse};
use courseloop::services::elevation::ElevationProvider;
use courseloop::services::selector::CourseSelector;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

pub fn paris() -> Coordinates {
    Coordinates::new(48.8566, 2.3522).unwrap()
}

/// Scripted outcome for the candidate at one bearing sector.
#[derive(Clone)]
pub enum CandidateScript {
    /// Routable loop with the given total distance and elevation profile.
    Loop {
        distance_km: f64,
        elevations: Vec<f64>,
    },
    /// Provider reports no path through the via (benign zero-results case).
    NoRoute,
    /// Provider fails outright.
    ApiError,
    /// Route succeeds but with unusable geometry (zero distance, one point).
    Degenerate,
    /// Route succeeds but the elevation lookup fails.
    ElevationError { distance_km: f64 },
}

/// Shared script: maps a candidate's bearing sector index to its outcome.
/// Sectors without an entry behave as `NoRoute`.
pub struct Script {
    pub candidate_count: usize,
    pub outcomes: HashMap<usize, CandidateScript>,
}

impl Script {
    /// Which of the `candidate_count` evenly spaced bearings a via sits on.
    pub fn sector_of(&self, start: &Coordinates, via: &Coordinates) -> usize {
        let step = 360.0 / self.candidate_count as f64;
        let bearing = start.initial_bearing_to(via);
        (bearing / step).round() as usize % self.candidate_count
    }
}

pub struct ScriptedDirections {
    pub script: Arc<Script>,
    pub calls: AtomicUsize,
}

#[async_trait]
impl DirectionsProvider for ScriptedDirections {
    async fn route_loop(
        &self,
        origin: &Coordinates,
        vias: &[Coordinates],
        _mode: &TravelMode,
    ) -> Result<DirectionsResponse> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        assert_eq!(vias.len(), 1, "selector should route start -> via -> start");

        let via = &vias[0];
        let sector = self.script.sector_of(origin, via);

        match self.script.outcomes.get(&sector) {
            Some(CandidateScript::Loop { distance_km, .. })
            | Some(CandidateScript::ElevationError { distance_km }) => {
                let half_m = distance_km * 500.0;
                Ok(DirectionsResponse {
                    leg_distances_m: vec![half_m, half_m],
                    // Via point embedded so the elevation mock can recover
                    // the sector from the path
                    geometry: vec![
                        [origin.lng, origin.lat],
                        [via.lng, via.lat],
                        [origin.lng, origin.lat],
                    ],
                })
            }
            Some(CandidateScript::Degenerate) => Ok(DirectionsResponse {
                leg_distances_m: vec![0.0, 0.0],
                geometry: vec![[origin.lng, origin.lat]],
            }),
            Some(CandidateScript::ApiError) => Err(AppError::DirectionsApi(
                "scripted provider failure".to_string(),
            )),
            Some(CandidateScript::NoRoute) | None => Err(AppError::NoRoute),
        }
    }
}

pub struct ScriptedElevation {
    pub script: Arc<Script>,
    pub start: Coordinates,
}

#[async_trait]
impl ElevationProvider for ScriptedElevation {
    async fn sample_elevations(
        &self,
        path: &[Coordinates],
        _sample_count: usize,
    ) -> Result<Vec<f64>> {
        let sector = self.script.sector_of(&self.start, &path[1]);

        match self.script.outcomes.get(&sector) {
            Some(CandidateScript::Loop { elevations, .. }) => Ok(elevations.clone()),
            Some(CandidateScript::ElevationError { .. }) => Err(AppError::ElevationApi(
                "scripted elevation failure".to_string(),
            )),
            _ => panic!("elevation queried for a candidate without a routed loop"),
        }
    }
}

/// Build a selector wired to scripted providers, returning the directions
/// mock alongside so tests can assert on call counts.
pub fn scripted_selector(
    outcomes: HashMap<usize, CandidateScript>,
    config: SelectorConfig,
) -> (CourseSelector, Arc<ScriptedDirections>) {
    let script = Arc::new(Script {
        candidate_count: config.candidate_count,
        outcomes,
    });

    let directions = Arc::new(ScriptedDirections {
        script: script.clone(),
        calls: AtomicUsize::new(0),
    });
    let elevation = Arc::new(ScriptedElevation {
        script,
        start: paris(),
    });

    let selector = CourseSelector::new(directions.clone(), elevation, config);
    (selector, directions)
}
