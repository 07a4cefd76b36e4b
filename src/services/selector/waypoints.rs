use crate::models::Coordinates;

/// Project `count` candidate via-points encircling `start`, one per bearing
/// step of `360 / count` degrees, each at offset
/// `desired_distance_km * radius_factor * 1000` meters.
///
/// Routing start -> via -> start through each produces loops of roughly the
/// desired size: the snapped loop runs longer than the straight-line round
/// trip, hence the offset sits below half the desired distance.
pub fn via_waypoints(
    start: &Coordinates,
    desired_distance_km: f64,
    count: usize,
    radius_factor: f64,
) -> Vec<Coordinates> {
    let offset_m = desired_distance_km * radius_factor * 1000.0;
    let step_deg = 360.0 / count as f64;

    (0..count)
        .map(|i| start.destination_point(step_deg * i as f64, offset_m))
        .collect()
}
