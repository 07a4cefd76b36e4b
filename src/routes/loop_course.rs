use crate::cache;
use crate::constants::NO_COURSE_MESSAGE;
use crate::error::{AppError, Result};
use crate::models::course::{CourseResponse, LoopCourseRequest};
use crate::AppState;
use axum::{extract::State, Json};
use std::sync::Arc;

/// POST /courses/loop
/// Select the best closed-loop course starting and ending at the given point
pub async fn create_loop_course(
    State(state): State<Arc<AppState>>,
    Json(request): Json<LoopCourseRequest>,
) -> Result<Json<CourseResponse>> {
    // Validate request
    request.validate().map_err(AppError::InvalidRequest)?;

    tracing::info!(
        lat = request.start_point.lat,
        lng = request.start_point.lng,
        distance_km = request.distance_km,
        mode = %request.mode.mapbox_profile(),
        "Loop course request: ({:.4}, {:.4}), {:.1}km, mode={}",
        request.start_point.lat, request.start_point.lng,
        request.distance_km, request.mode.mapbox_profile()
    );

    let cache_key = cache::loop_course_cache_key(
        &request.start_point,
        request.distance_km,
        request.mode.mapbox_profile(),
    );

    // Check cache first
    if let Some(ref cache) = state.cache {
        if let Some(cached) = cache.get_cached_course(&cache_key).await {
            tracing::info!(
                "Cache hit for loop course: {:.2}km returned",
                cached.distance_km
            );
            return Ok(Json(CourseResponse {
                course: Some(cached),
                message: None,
            }));
        }
    }

    // Run the selection
    let course = state
        .selector
        .select_loop_course(request.start_point, request.distance_km, &request.mode)
        .await?;

    match course {
        Some(course) => {
            if let Some(ref cache) = state.cache {
                cache.cache_course(&cache_key, &course).await;
            }
            Ok(Json(CourseResponse {
                course: Some(course),
                message: None,
            }))
        }
        // Valid call, no suitable route: distinguished from errors
        None => Ok(Json(CourseResponse {
            course: None,
            message: Some(NO_COURSE_MESSAGE.to_string()),
        })),
    }
}
