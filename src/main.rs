use axum::Router;
use courseloop::cache::{CourseCache, MemoryCacheService};
use courseloop::config::Config;
use courseloop::constants::DEFAULT_MEMORY_CACHE_MAX_ENTRIES;
use courseloop::services::directions::{AuthMode, DirectionsProvider, MapboxClient};
use courseloop::services::elevation::{ElevationProvider, OpenElevationClient};
use courseloop::services::selector::CourseSelector;
use courseloop::AppState;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "courseloop=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let config = Config::from_env().map_err(|e| format!("Failed to load configuration: {}", e))?;

    tracing::info!("Starting courseloop API server");
    tracing::info!(
        candidates = config.selector.candidate_count,
        radius_factor = config.selector.radius_factor,
        tolerance = config.selector.distance_tolerance,
        "Configuration loaded successfully"
    );

    // Initialize providers
    let directions: Arc<dyn DirectionsProvider> = if let Some(ref base_url) = config.mapbox_base_url
    {
        Arc::new(MapboxClient::with_config(
            config.mapbox_api_key.clone(),
            base_url.clone(),
            AuthMode::BearerHeader,
        ))
    } else {
        Arc::new(MapboxClient::new(config.mapbox_api_key.clone()))
    };

    let elevation: Arc<dyn ElevationProvider> = if let Some(ref base_url) =
        config.elevation_base_url
    {
        Arc::new(OpenElevationClient::with_base_url(base_url.clone()))
    } else {
        Arc::new(OpenElevationClient::new())
    };

    let selector = CourseSelector::new(directions, elevation, config.selector.clone());

    // In-memory course cache
    let cache: Arc<dyn CourseCache> = Arc::new(MemoryCacheService::new(
        config.course_cache_ttl,
        DEFAULT_MEMORY_CACHE_MAX_ENTRIES,
    ));

    // Create application state
    let state = Arc::new(AppState {
        selector,
        cache: Some(cache),
    });

    // Build router with CORS and tracing
    let app = Router::new()
        .nest("/api/v1", courseloop::routes::create_router(state))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http());

    // Start server
    let addr = config.server_address();
    tracing::info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
