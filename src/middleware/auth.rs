use axum::{extract::Request, middleware::Next, response::Response};
use tower_sessions::Session;

use crate::{
    config::latency::Latency,
    error::{AppError, AuthError},
    repositories::account_directory::AccountDirectory,
};

/// Rejects callers without a session identity and hands the identity to the
/// handler as a request extension.
pub async fn require_login(mut req: Request, next: Next) -> Result<Response, AppError> {
    let session = req
        .extensions()
        .get::<Session>()
        .cloned()
        .ok_or(AuthError::NotLoggedIn)?;

    let identity = AccountDirectory::new(session, Latency::none())
        .current_identity()
        .await?
        .ok_or(AuthError::NotLoggedIn)?;

    req.extensions_mut().insert(identity);
    Ok(next.run(req).await)
}
