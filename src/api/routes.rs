use axum::{
    handler::HandlerWithoutStateExt,
    http::{header, Method},
    routing::{get, post},
    Router,
};
use std::path::Path;
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};

use super::handlers;
use crate::storage::{ArtifactStore, STORIES_URL_PREFIX};
use crate::story::StoryClient;
use crate::tts::SpeechSynthesizer;

pub struct AppState {
    pub story: StoryClient,
    pub speech: SpeechSynthesizer,
    pub store: ArtifactStore,
}

pub fn create_router(state: Arc<AppState>, static_dir: &Path) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE]);

    let api_routes = Router::new()
        .route("/languages", get(handlers::list_languages))
        .route("/prose-styles", get(handlers::list_prose_styles));

    let stories = ServeDir::new(state.store.dir())
        .not_found_service(handlers::file_not_found.into_service());

    Router::new()
        .nest("/api", api_routes)
        .route("/generate", post(handlers::generate))
        .route("/health", get(handlers::health))
        .nest_service(STORIES_URL_PREFIX, stories)
        .fallback_service(ServeDir::new(static_dir).append_index_html_on_directories(true))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
