use axum::{Extension, Router};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tower_sessions::{MemoryStore, SessionManagerLayer};

use crate::{
    config::startup::AppState,
    routes::{auth_route::auth_router, poll_route::poll_router},
};

pub fn create_app(
    app_state: AppState,
    session_layer: SessionManagerLayer<MemoryStore>,
    cors: CorsLayer,
) -> Router {
    Router::new()
        .nest("/api/auth", auth_router())
        .nest("/api/polls", poll_router())
        .layer(session_layer)
        .layer(TraceLayer::new_for_http())
        .layer(Extension(app_state))
        .layer(cors)
}
