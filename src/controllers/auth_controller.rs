use axum::{extract::Extension, Json};
use axum_extra::extract::WithRejection;
use tower_sessions::Session;
use tracing::info;

use crate::{
    config::startup::AppState,
    dtos::{
        requests::{CredentialCheckDTO, LoginDTO, RegisterDTO},
        responses::{ApiSuccess, CredentialCheckResultDTO},
    },
    error::AppError,
    models::identity::{Identity, RegisterData},
    repositories::account_directory::AccountDirectory,
    utils::validation::{validate_email, validate_password},
};

fn directory(app_state: &AppState, session: Session) -> AccountDirectory {
    AccountDirectory::new(session, app_state.settings.latency())
}

//?POST:: api/auth/register
pub async fn register(
    Extension(app_state): Extension<AppState>,
    session: Session,
    WithRejection(Json(payload), _): WithRejection<Json<RegisterDTO>, AppError>,
) -> Result<ApiSuccess<Identity>, AppError> {
    let data = RegisterData {
        email: payload.email,
        password: payload.password,
        username: payload.username,
        first_name: payload.firstName,
        last_name: payload.lastName,
    };

    // Any registration failure is the caller's to fix.
    let identity = directory(&app_state, session)
        .register(data)
        .await
        .map_err(|e| match e {
            AppError::Validation(_) => e,
            other => AppError::Validation(other.to_string()),
        })?;

    Ok(ApiSuccess::created(identity).with_message("Registration successful"))
}

//?POST:: api/auth/login
pub async fn login(
    Extension(app_state): Extension<AppState>,
    session: Session,
    WithRejection(Json(payload), _): WithRejection<Json<LoginDTO>, AppError>,
) -> Result<ApiSuccess<Identity>, AppError> {
    if payload.email.is_empty() || payload.password.is_empty() {
        return Err(AppError::Validation(String::from(
            "Email and password are required",
        )));
    }

    let identity = directory(&app_state, session)
        .login(&payload.email, &payload.password)
        .await?;

    Ok(ApiSuccess::ok(identity).with_message("Login successful"))
}

//?POST:: api/auth/logout
pub async fn logout(
    Extension(app_state): Extension<AppState>,
    session: Session,
) -> Result<ApiSuccess<()>, AppError> {
    directory(&app_state, session).logout().await?;
    info!("Session identity cleared");
    Ok(ApiSuccess::message_only("Logged out"))
}

//*GET:: api/auth/me
pub async fn current_user(
    Extension(app_state): Extension<AppState>,
    session: Session,
) -> Result<ApiSuccess<Option<Identity>>, AppError> {
    let identity = directory(&app_state, session).current_identity().await?;
    Ok(ApiSuccess::ok(identity))
}

/// Form-side checks; registration itself does not enforce them.
//?POST:: api/auth/validate
pub async fn check_credentials(
    WithRejection(Json(payload), _): WithRejection<Json<CredentialCheckDTO>, AppError>,
) -> ApiSuccess<CredentialCheckResultDTO> {
    ApiSuccess::ok(CredentialCheckResultDTO {
        email_valid: validate_email(&payload.email),
        password: validate_password(&payload.password),
    })
}
