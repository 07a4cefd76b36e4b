//! Stable application-wide constants.
//!
//! Values here are structural invariants, algorithm coefficients, and default
//! fallbacks for env-var-based configuration. They should rarely change.
//! For knobs that benefit from runtime experimentation, see
//! [`SelectorConfig`](crate::config::SelectorConfig) instead.

// --- Server defaults (used when HOST / PORT env vars are absent) ---

/// Default bind address for the HTTP server.
pub const DEFAULT_HOST: &str = "0.0.0.0";
/// Default port for the HTTP server.
pub const DEFAULT_PORT: &str = "3000";

// --- Loop selection structural defaults ---

/// Number of candidate via-points projected around the start.
/// Evenly sampling 360 degrees approximates the intractable problem of
/// finding the optimal loop without restricting to a fixed template.
/// Overridden by `LOOP_CANDIDATE_COUNT`.
pub const DEFAULT_CANDIDATE_COUNT: usize = 8;

/// Via-point offset distance as a fraction of the desired course distance.
/// The routed loop (start -> via -> start, snapped to the path network) runs
/// longer than the straight-line round trip, so the offset sits well below
/// half the desired distance. Overridden by `LOOP_RADIUS_FACTOR`.
pub const DEFAULT_RADIUS_FACTOR: f64 = 0.4;

/// Acceptable distance band around the desired distance, as a fraction.
/// Candidates within the band compete on elevation gain; outside it, only
/// distance error matters. Overridden by `LOOP_DISTANCE_TOLERANCE`.
pub const DEFAULT_DISTANCE_TOLERANCE: f64 = 0.25;

/// Upper bound on elevation samples requested per candidate path.
/// The effective count is `min(this, path point count)`.
/// Overridden by `LOOP_MAX_ELEVATION_SAMPLES`.
pub const DEFAULT_MAX_ELEVATION_SAMPLES: usize = 128;

// --- Cache defaults ---

/// Default course cache TTL: 24 hours. Overridden by `COURSE_CACHE_TTL`.
pub const DEFAULT_COURSE_CACHE_TTL_SECONDS: u64 = 86_400;
/// Maximum entries for the in-memory course cache (LRU eviction).
pub const DEFAULT_MEMORY_CACHE_MAX_ENTRIES: u64 = 1_000;

// --- User-facing messages ---

/// Terminal message when no candidate loop survives evaluation.
pub const NO_COURSE_MESSAGE: &str =
    "no suitable course found, try adjusting the distance or start point";
