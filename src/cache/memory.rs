use crate::cache::{CacheStats, CourseCache};
use crate::models::CourseCandidate;
use async_trait::async_trait;
use moka::future::Cache;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// In-memory cache backed by moka with TTL and bounded capacity.
/// All methods are `&self` — no locking needed.
pub struct MemoryCacheService {
    courses: Cache<String, Arc<CourseCandidate>>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl MemoryCacheService {
    pub fn new(course_ttl_seconds: u64, max_capacity: u64) -> Self {
        let courses = Cache::builder()
            .time_to_live(Duration::from_secs(course_ttl_seconds))
            .max_capacity(max_capacity)
            .build();

        MemoryCacheService {
            courses,
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }
}

#[async_trait]
impl CourseCache for MemoryCacheService {
    async fn get_cached_course(&self, key: &str) -> Option<CourseCandidate> {
        match self.courses.get(key).await {
            Some(arc_course) => {
                self.hits.fetch_add(1, Ordering::Relaxed);
                tracing::debug!("Memory cache hit for course: {}", key);
                Some((*arc_course).clone())
            }
            None => {
                self.misses.fetch_add(1, Ordering::Relaxed);
                tracing::debug!("Memory cache miss for course: {}", key);
                None
            }
        }
    }

    async fn cache_course(&self, key: &str, course: &CourseCandidate) {
        self.courses
            .insert(key.to_string(), Arc::new(course.clone()))
            .await;
        tracing::debug!(
            "Memory cached {:.2}km course: {}",
            course.distance_km,
            key
        );
    }

    async fn get_stats(&self) -> CacheStats {
        let hits = self.hits.load(Ordering::Relaxed);
        let misses = self.misses.load(Ordering::Relaxed);
        let hit_rate = if hits + misses > 0 {
            (hits as f64 / (hits + misses) as f64) * 100.0
        } else {
            0.0
        };

        CacheStats {
            hits,
            misses,
            hit_rate,
        }
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}
