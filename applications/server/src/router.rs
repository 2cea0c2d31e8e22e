/// HTTP router assembly
use crate::{api, state::AppState};
use axum::{
    routing::{get, post},
    Router,
};
use std::path::PathBuf;
use tower_http::{
    cors::CorsLayer,
    services::{ServeDir, ServeFile},
    trace::{DefaultMakeSpan, TraceLayer},
};

/// Build the application router
///
/// With `static_dir` set, every non-API path is served from that directory
/// (`/tracks/track1.mp3`, the web UI) with `index.html` as the SPA fallback.
pub fn create_router(app_state: AppState, static_dir: Option<PathBuf>) -> Router {
    let api_routes = Router::new()
        .route("/health", get(api::health::health))
        .route("/chat", post(api::chat::chat))
        .route("/audio", post(api::audio::resolve_command));

    let mut router = Router::new().nest("/api", api_routes);

    if let Some(dir) = static_dir {
        let index = dir.join("index.html");
        router = router.fallback_service(ServeDir::new(dir).fallback(ServeFile::new(index)));
    }

    router
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::default().include_headers(true)),
        )
        .layer(CorsLayer::permissive())
        .with_state(app_state)
}
