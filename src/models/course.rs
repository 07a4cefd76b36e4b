use crate::models::Coordinates;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum TravelMode {
    #[default]
    Walk,
    Bike,
}

impl TravelMode {
    /// Returns the Mapbox profile name for this travel mode
    pub fn mapbox_profile(&self) -> &str {
        match self {
            TravelMode::Walk => "walking",
            TravelMode::Bike => "cycling",
        }
    }
}

impl fmt::Display for TravelMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TravelMode::Walk => write!(f, "walk"),
            TravelMode::Bike => write!(f, "bike"),
        }
    }
}

impl FromStr for TravelMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "walk" | "walking" => Ok(TravelMode::Walk),
            "bike" | "cycling" | "bicycle" => Ok(TravelMode::Bike),
            _ => Err(format!("Invalid travel mode: '{}'", s)),
        }
    }
}

/// A fully evaluated candidate loop: routed geometry plus both measurements.
///
/// Invariant (enforced by the evaluator, never surfaced otherwise):
/// `distance_km > 0` and `path` has at least 2 points.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CourseCandidate {
    pub id: Uuid,
    /// Total loop length, summed over the legs returned by the
    /// directions provider.
    pub distance_km: f64,
    /// Cumulative positive elevation delta along the sampled path.
    /// Descents contribute zero.
    pub elevation_gain_m: f64,
    /// Loop geometry from start back to start.
    pub path: Vec<Coordinates>,
}

impl CourseCandidate {
    pub fn new(distance_km: f64, elevation_gain_m: f64, path: Vec<Coordinates>) -> Self {
        CourseCandidate {
            id: Uuid::new_v4(),
            distance_km,
            elevation_gain_m,
            path,
        }
    }
}

// Request/Response types for API endpoints

#[derive(Debug, Deserialize)]
pub struct LoopCourseRequest {
    pub start_point: Coordinates,
    pub distance_km: f64,
    #[serde(default)]
    pub mode: TravelMode,
}

impl LoopCourseRequest {
    pub fn validate(&self) -> Result<(), String> {
        if !self.distance_km.is_finite() || self.distance_km <= 0.0 {
            return Err("distance_km must be positive".to_string());
        }
        if !(0.5..=50.0).contains(&self.distance_km) {
            return Err("distance_km must be between 0.5 and 50".to_string());
        }
        Ok(())
    }
}

#[derive(Debug, Serialize)]
pub struct CourseResponse {
    /// The winning candidate, or `None` when no suitable loop was found.
    pub course: Option<CourseCandidate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}
