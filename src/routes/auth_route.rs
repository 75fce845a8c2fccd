use axum::{
    routing::{get, post},
    Router,
};

use crate::controllers::auth_controller::{
    check_credentials, current_user, login, logout, register,
};

pub fn auth_router() -> Router {
    Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/logout", post(logout))
        .route("/me", get(current_user))
        .route("/validate", post(check_credentials))
}
