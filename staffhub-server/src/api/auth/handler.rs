//! Authentication Handlers
//!
//! Handles register, login, logout and current-account lookup

use std::time::Duration;

use axum::{
    Json,
    extract::State,
    http::{StatusCode, header::SET_COOKIE},
    response::AppendHeaders,
};
use shared::client::{LoginRequest, LoginResponse, RegisterRequest};
use shared::models::AccountInfo;

use crate::AppError;
use crate::auth::{CurrentUser, SessionService};
use crate::core::ServerState;
use crate::db::models::AccountCreate;
use crate::utils::validation::{
    MAX_EMAIL_LEN, MAX_NAME_LEN, validate_email, validate_password, validate_required_text,
};

/// Fixed delay for authentication to prevent timing attacks
const AUTH_FIXED_DELAY_MS: u64 = 500;

/// Register handler
///
/// Creates a dashboard account. The account id becomes the `created_by`
/// owner of every employee record it creates.
pub async fn register(
    State(state): State<ServerState>,
    Json(req): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<AccountInfo>), AppError> {
    validate_required_text(&req.name, "name", MAX_NAME_LEN)?;
    validate_required_text(&req.email, "email", MAX_EMAIL_LEN)?;
    validate_email(&req.email)?;
    validate_password(&req.password)?;

    let repo = state.account_repo().await?;
    let account = repo
        .create(AccountCreate {
            name: req.name,
            email: req.email,
            password: req.password,
        })
        .await?;

    tracing::info!(
        account = %crate::api::convert::option_record_id_to_string(&account.id),
        "Account registered"
    );

    Ok((StatusCode::CREATED, Json(account.into())))
}

/// Login handler
///
/// Authenticates account credentials, issues a session token and sets it
/// as an HttpOnly cookie
pub async fn login(
    State(state): State<ServerState>,
    Json(req): Json<LoginRequest>,
) -> Result<(AppendHeaders<[(http::HeaderName, String); 1]>, Json<LoginResponse>), AppError> {
    let repo = state.account_repo().await?;
    let account = repo.find_by_email(&req.email).await?;

    // Fixed delay to prevent timing attacks (before checking result)
    tokio::time::sleep(Duration::from_millis(AUTH_FIXED_DELAY_MS)).await;

    // Check authentication result - unified error message to prevent
    // account enumeration
    let account = match account {
        Some(a) => {
            let password_valid = a
                .verify_password(&req.password)
                .map_err(|e| AppError::internal(format!("Password verification failed: {}", e)))?;

            if !password_valid {
                tracing::warn!(email = %req.email, "Login failed - invalid credentials");
                return Err(AppError::invalid_credentials());
            }

            a
        }
        None => {
            tracing::warn!(email = %req.email, "Login failed - account not found");
            return Err(AppError::invalid_credentials());
        }
    };

    // Issue session token
    let session_service = state.session_service();
    let account_id = account
        .id
        .as_ref()
        .map(|t| t.to_string())
        .unwrap_or_default();

    let token = session_service
        .issue_token(&account_id, &account.email, &account.name)
        .map_err(|e| AppError::internal(format!("Failed to issue token: {}", e)))?;

    tracing::info!(
        account = %account_id,
        email = %account.email,
        "Account logged in successfully"
    );

    let cookie = session_service.session_cookie(&token);
    let response = LoginResponse {
        token,
        user: account.into(),
    };

    Ok((AppendHeaders([(SET_COOKIE, cookie)]), Json(response)))
}

/// Get current account info
pub async fn me(
    State(state): State<ServerState>,
    user: CurrentUser,
) -> Result<Json<AccountInfo>, AppError> {
    // Query fresh account data for name and created_at
    let repo = state.account_repo().await?;
    let account = repo
        .find_by_id(&user.id)
        .await?
        .ok_or_else(|| AppError::not_found("Account not found".to_string()))?;

    Ok(Json(account.into()))
}

/// Logout handler
///
/// Clears the session cookie; the token itself simply expires
pub async fn logout(
    user: CurrentUser,
) -> Result<(AppendHeaders<[(http::HeaderName, String); 1]>, Json<()>), AppError> {
    tracing::info!(
        account = %user.id,
        email = %user.email,
        "Account logged out"
    );

    Ok((
        AppendHeaders([(SET_COOKIE, SessionService::clear_session_cookie())]),
        Json(()),
    ))
}
