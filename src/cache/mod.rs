mod memory;

pub use memory::MemoryCacheService;

use crate::models::{Coordinates, CourseCandidate};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

/// Cache seam for selected courses. Only successful selections are cached;
/// the "none found" outcome is transient and re-evaluated each request.
#[async_trait]
pub trait CourseCache: Send + Sync {
    async fn get_cached_course(&self, key: &str) -> Option<CourseCandidate>;
    async fn cache_course(&self, key: &str, course: &CourseCandidate);
    async fn get_stats(&self) -> CacheStats;
    fn backend_name(&self) -> &'static str;
}

/// Generate a cache key for loop course selections.
/// Key includes: coordinates (3 decimal precision, ~100m), distance
/// (0.5km buckets), and travel mode.
pub fn loop_course_cache_key(start: &Coordinates, distance_km: f64, mode: &str) -> String {
    let mut hasher = DefaultHasher::new();

    let rounded = start.round(3);
    let lat = (rounded.lat * 1000.0).round() as i64;
    let lng = (rounded.lng * 1000.0).round() as i64;

    // Round distance to 0.5km buckets
    let distance_bucket = (distance_km * 2.0).round() as i64;

    lat.hash(&mut hasher);
    lng.hash(&mut hasher);
    distance_bucket.hash(&mut hasher);
    mode.hash(&mut hasher);

    format!("course:loop:{:x}", hasher.finish())
}

/// Cache statistics for monitoring
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub hit_rate: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cache_key_consistency() {
        let coord = Coordinates::new(48.8566, 2.3522).unwrap();

        let key1 = loop_course_cache_key(&coord, 5.0, "walking");
        let key2 = loop_course_cache_key(&coord, 5.0, "walking");

        assert_eq!(key1, key2);
    }

    #[test]
    fn test_cache_key_coordinate_precision() {
        // Small coordinate differences (within ~100m) should produce same key
        let coord1 = Coordinates::new(48.8566, 2.3522).unwrap();
        let coord2 = Coordinates::new(48.8567, 2.3523).unwrap(); // ~11m difference

        let key1 = loop_course_cache_key(&coord1, 5.0, "walking");
        let key2 = loop_course_cache_key(&coord2, 5.0, "walking");

        assert_eq!(key1, key2);
    }

    #[test]
    fn test_cache_key_distance_buckets() {
        let coord = Coordinates::new(48.8566, 2.3522).unwrap();

        // 4.8km and 5.2km should be in same bucket (5.0)
        let key1 = loop_course_cache_key(&coord, 4.8, "walking");
        let key2 = loop_course_cache_key(&coord, 5.2, "walking");
        assert_eq!(key1, key2);

        // 5.5km should be in a different bucket
        let key3 = loop_course_cache_key(&coord, 5.5, "walking");
        assert_ne!(key1, key3);
    }

    #[test]
    fn test_cache_key_mode_sensitivity() {
        let coord = Coordinates::new(48.8566, 2.3522).unwrap();

        let walk = loop_course_cache_key(&coord, 5.0, "walking");
        let bike = loop_course_cache_key(&coord, 5.0, "cycling");

        assert_ne!(walk, bike);
    }
}
