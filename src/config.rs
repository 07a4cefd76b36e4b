use crate::constants::*;
use std::env;

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub mapbox_api_key: String,
    /// When set, directions requests go through this base URL with bearer
    /// auth instead of hitting Mapbox directly with a token query param.
    pub mapbox_base_url: Option<String>,
    /// Base URL of the elevation lookup service.
    pub elevation_base_url: Option<String>,
    pub course_cache_ttl: u64,
    pub selector: SelectorConfig,
}

#[derive(Debug, Clone)]
pub struct SelectorConfig {
    /// Number of candidate via-points projected around the start point.
    pub candidate_count: usize,

    /// Via-point offset distance as a fraction of the desired distance.
    /// For a 5km course with factor 0.4, vias sit 2km from the start.
    pub radius_factor: f64,

    /// Acceptable distance band as a fraction of the desired distance.
    /// 0.25 means a 5km request accepts 3.75-6.25km loops.
    pub distance_tolerance: f64,

    /// Upper bound on elevation samples requested per candidate path.
    pub max_elevation_samples: usize,
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            candidate_count: DEFAULT_CANDIDATE_COUNT,
            radius_factor: DEFAULT_RADIUS_FACTOR,
            distance_tolerance: DEFAULT_DISTANCE_TOLERANCE,
            max_elevation_samples: DEFAULT_MAX_ELEVATION_SAMPLES,
        }
    }
}

impl SelectorConfig {
    pub fn from_env() -> Result<Self, String> {
        let defaults = Self::default();

        let config = Self {
            candidate_count: env::var("LOOP_CANDIDATE_COUNT")
                .unwrap_or_else(|_| defaults.candidate_count.to_string())
                .parse()
                .map_err(|_| "Invalid LOOP_CANDIDATE_COUNT")?,

            radius_factor: env::var("LOOP_RADIUS_FACTOR")
                .unwrap_or_else(|_| defaults.radius_factor.to_string())
                .parse()
                .map_err(|_| "Invalid LOOP_RADIUS_FACTOR")?,

            distance_tolerance: env::var("LOOP_DISTANCE_TOLERANCE")
                .unwrap_or_else(|_| defaults.distance_tolerance.to_string())
                .parse()
                .map_err(|_| "Invalid LOOP_DISTANCE_TOLERANCE")?,

            max_elevation_samples: env::var("LOOP_MAX_ELEVATION_SAMPLES")
                .unwrap_or_else(|_| defaults.max_elevation_samples.to_string())
                .parse()
                .map_err(|_| "Invalid LOOP_MAX_ELEVATION_SAMPLES")?,
        };

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.candidate_count == 0 {
            return Err("LOOP_CANDIDATE_COUNT must be at least 1".to_string());
        }
        if self.radius_factor <= 0.0 || self.radius_factor > 1.0 {
            return Err("LOOP_RADIUS_FACTOR must be in (0, 1]".to_string());
        }
        if self.distance_tolerance <= 0.0 || self.distance_tolerance >= 1.0 {
            return Err("LOOP_DISTANCE_TOLERANCE must be in (0, 1)".to_string());
        }
        if self.max_elevation_samples < 2 {
            return Err("LOOP_MAX_ELEVATION_SAMPLES must be at least 2".to_string());
        }
        Ok(())
    }
}

impl Config {
    pub fn from_env() -> Result<Self, String> {
        dotenv::dotenv().ok();

        Ok(Config {
            host: env::var("HOST").unwrap_or_else(|_| DEFAULT_HOST.to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| DEFAULT_PORT.to_string())
                .parse()
                .map_err(|_| "Invalid PORT")?,
            mapbox_api_key: env::var("MAPBOX_API_KEY").map_err(|_| "MAPBOX_API_KEY must be set")?,
            mapbox_base_url: env::var("MAPBOX_BASE_URL").ok(),
            elevation_base_url: env::var("ELEVATION_BASE_URL").ok(),
            course_cache_ttl: env::var("COURSE_CACHE_TTL")
                .unwrap_or_else(|_| DEFAULT_COURSE_CACHE_TTL_SECONDS.to_string())
                .parse()
                .map_err(|_| "Invalid COURSE_CACHE_TTL")?,
            selector: SelectorConfig::from_env()?,
        })
    }

    pub fn server_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selector_defaults() {
        let config = SelectorConfig::default();
        assert_eq!(config.candidate_count, 8);
        assert_eq!(config.radius_factor, 0.4);
        assert_eq!(config.distance_tolerance, 0.25);
        assert_eq!(config.max_elevation_samples, 128);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_selector_validation() {
        let config = SelectorConfig {
            candidate_count: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = SelectorConfig {
            radius_factor: 0.0,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = SelectorConfig {
            distance_tolerance: 1.0,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = SelectorConfig {
            max_elevation_samples: 1,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
