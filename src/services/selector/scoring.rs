use crate::models::CourseCandidate;
use std::cmp::Ordering;

/// Cumulative positive elevation delta over an ordered sample sequence.
/// Descents contribute zero. Single left-to-right scan, no smoothing.
pub fn elevation_gain_m(samples: &[f64]) -> f64 {
    samples
        .windows(2)
        .map(|pair| (pair[1] - pair[0]).max(0.0))
        .sum()
}

/// Pick the single best candidate under the two-tier tolerance policy.
///
/// Candidates within `desired_km * (1 ± tolerance)` compete on elevation
/// gain first, distance error second: runners prefer flat routes as long as
/// the distance is close enough. When nothing is in tolerance, distance
/// error dominates and elevation gain only breaks ties, since a badly wrong
/// distance defeats the purpose regardless of flatness.
///
/// Sorts are stable, so candidates with identical keys resolve to their
/// input order.
pub fn pick_best(
    candidates: Vec<CourseCandidate>,
    desired_km: f64,
    tolerance: f64,
) -> Option<CourseCandidate> {
    if candidates.is_empty() {
        return None;
    }

    let min_km = desired_km * (1.0 - tolerance);
    let max_km = desired_km * (1.0 + tolerance);

    let distance_error = |c: &CourseCandidate| (c.distance_km - desired_km).abs();

    let mut in_tolerance: Vec<CourseCandidate> = candidates
        .iter()
        .filter(|c| (min_km..=max_km).contains(&c.distance_km))
        .cloned()
        .collect();

    if !in_tolerance.is_empty() {
        in_tolerance.sort_by(|a, b| {
            a.elevation_gain_m
                .partial_cmp(&b.elevation_gain_m)
                .unwrap_or(Ordering::Equal)
                .then_with(|| {
                    distance_error(a)
                        .partial_cmp(&distance_error(b))
                        .unwrap_or(Ordering::Equal)
                })
        });
        return in_tolerance.into_iter().next();
    }

    let mut all = candidates;
    all.sort_by(|a, b| {
        distance_error(a)
            .partial_cmp(&distance_error(b))
            .unwrap_or(Ordering::Equal)
            .then_with(|| {
                a.elevation_gain_m
                    .partial_cmp(&b.elevation_gain_m)
                    .unwrap_or(Ordering::Equal)
            })
    });
    all.into_iter().next()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Coordinates;

    fn candidate(distance_km: f64, elevation_gain_m: f64) -> CourseCandidate {
        let path = vec![
            Coordinates::new(48.8566, 2.3522).unwrap(),
            Coordinates::new(48.8600, 2.3600).unwrap(),
            Coordinates::new(48.8566, 2.3522).unwrap(),
        ];
        CourseCandidate::new(distance_km, elevation_gain_m, path)
    }

    #[test]
    fn test_gain_over_descending_sequence_is_zero() {
        assert_eq!(elevation_gain_m(&[100.0, 80.0, 50.0, 10.0]), 0.0);
    }

    #[test]
    fn test_gain_over_ascending_sequence_is_last_minus_first() {
        assert_eq!(elevation_gain_m(&[10.0, 25.0, 60.0, 110.0]), 100.0);
    }

    #[test]
    fn test_gain_ignores_descents_in_mixed_sequence() {
        // +20, -30 (ignored), +15
        assert_eq!(elevation_gain_m(&[50.0, 70.0, 40.0, 55.0]), 35.0);
    }

    #[test]
    fn test_gain_degenerate_sequences() {
        assert_eq!(elevation_gain_m(&[]), 0.0);
        assert_eq!(elevation_gain_m(&[42.0]), 0.0);
    }

    #[test]
    fn test_empty_set_yields_none() {
        assert!(pick_best(vec![], 5.0, 0.25).is_none());
    }

    #[test]
    fn test_in_tolerance_prefers_flattest() {
        // Acceptable range for 5km at 0.25: [3.75, 6.25]
        let a = candidate(5.0, 50.0);
        let b = candidate(4.0, 10.0);
        let c = candidate(6.5, 5.0); // out of tolerance despite lowest gain

        let best = pick_best(vec![a, b, c], 5.0, 0.25).unwrap();
        // B wins over A despite A being closer to 5km
        assert_eq!(best.distance_km, 4.0);
        assert_eq!(best.elevation_gain_m, 10.0);
    }

    #[test]
    fn test_in_tolerance_gain_tie_breaks_by_distance_error() {
        let a = candidate(5.8, 20.0);
        let b = candidate(5.1, 20.0);

        let best = pick_best(vec![a, b], 5.0, 0.25).unwrap();
        assert_eq!(best.distance_km, 5.1);
    }

    #[test]
    fn test_fallback_prefers_closest_distance() {
        // Everything outside [3.75, 6.25]
        let d = candidate(7.0, 20.0);
        let e = candidate(8.0, 5.0);

        let best = pick_best(vec![d, e], 5.0, 0.25).unwrap();
        // D wins despite higher gain than E
        assert_eq!(best.distance_km, 7.0);
    }

    #[test]
    fn test_fallback_distance_tie_breaks_by_gain() {
        let d = candidate(7.0, 20.0);
        let e = candidate(7.0, 5.0);

        let best = pick_best(vec![d, e], 5.0, 0.25).unwrap();
        assert_eq!(best.elevation_gain_m, 5.0);
    }

    #[test]
    fn test_identical_keys_resolve_to_input_order() {
        let first = candidate(5.0, 10.0);
        let second = candidate(5.0, 10.0);
        let first_id = first.id;

        let best = pick_best(vec![first, second], 5.0, 0.25).unwrap();
        assert_eq!(best.id, first_id);
    }

    #[test]
    fn test_tolerance_band_boundaries_inclusive() {
        let low = candidate(3.75, 100.0);
        let out = candidate(6.26, 0.0);

        // 3.75 is exactly on the band edge, so it is in tolerance and wins
        // over the flatter out-of-band candidate
        let best = pick_best(vec![low, out], 5.0, 0.25).unwrap();
        assert_eq!(best.distance_km, 3.75);
    }
}
