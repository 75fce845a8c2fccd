use axum::{
    routing::{get, post},
    Router,
};

use crate::{
    controllers::poll_controller::{
        can_user_vote, cast_vote, close_poll_by_id, create_new_poll, get_all_polls,
        get_poll_by_id, get_poll_result, get_polls_by_creator, manage_all_polls,
    },
    middleware::auth::require_login,
};

pub fn poll_router() -> Router {
    Router::new()
        .route("/", get(get_all_polls).post(create_new_poll))
        .route(
            "/manage",
            get(manage_all_polls).route_layer(axum::middleware::from_fn(require_login)),
        )
        .route("/creator/{creator_id}", get(get_polls_by_creator))
        .route("/{poll_id}", get(get_poll_by_id))
        .route("/{poll_id}/vote", post(cast_vote))
        .route("/{poll_id}/close", post(close_poll_by_id))
        .route("/{poll_id}/can-vote", get(can_user_vote))
        .route("/{poll_id}/results", get(get_poll_result))
}
