//! Employee API Handlers
//!
//! Ownership contract: every operation is scoped to the authenticated
//! account. Reads/updates/deletes filter on `created_by`; create writes it.
//! A record that does not exist and a record owned by another account are
//! both reported as 404.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use shared::client::DeleteAck;
use shared::models::{Employee, EmployeeCreate, EmployeeUpdate};

use crate::auth::CurrentUser;
use crate::core::ServerState;
use crate::db::models::NewEmployee;
use crate::utils::validation::{
    MAX_EMAIL_LEN, MAX_NAME_LEN, MAX_PHONE_LEN, require_text, validate_email,
    validate_optional_text, validate_phone,
};
use crate::utils::{AppError, AppResult};

/// List all employees owned by the caller, newest-created-first
pub async fn list(
    State(state): State<ServerState>,
    user: CurrentUser,
) -> AppResult<Json<Vec<Employee>>> {
    let repo = state.employee_repo().await?;
    let employees = repo.find_all_for_owner(&user.id).await?;
    Ok(Json(employees.into_iter().map(Employee::from).collect()))
}

/// Create a new employee owned by the caller
pub async fn create(
    State(state): State<ServerState>,
    user: CurrentUser,
    Json(payload): Json<EmployeeCreate>,
) -> AppResult<(StatusCode, Json<Employee>)> {
    // Required fields, checked in wire order so the first missing one is
    // the one reported
    let first_name = require_text(&payload.first_name, "firstName", MAX_NAME_LEN)?;
    let last_name = require_text(&payload.last_name, "lastName", MAX_NAME_LEN)?;
    let email = require_text(&payload.email, "email", MAX_EMAIL_LEN)?;
    let phone = require_text(&payload.phone, "phone", MAX_PHONE_LEN)?;
    let role = payload
        .role
        .ok_or_else(|| AppError::validation("role is required"))?;

    validate_email(&email)?;
    validate_phone(&phone)?;

    let repo = state.employee_repo().await?;
    let employee = repo
        .create(
            &user.id,
            NewEmployee {
                first_name,
                last_name,
                email,
                phone,
                role,
            },
        )
        .await?;

    tracing::info!(
        owner = %user.id,
        employee = %crate::api::convert::option_record_id_to_string(&employee.id),
        "Employee created"
    );

    Ok((StatusCode::CREATED, Json(employee.into())))
}

/// Update an owned employee (partial merge: only supplied fields change)
pub async fn update(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
    Json(payload): Json<EmployeeUpdate>,
) -> AppResult<Json<Employee>> {
    validate_optional_text(&payload.first_name, "firstName", MAX_NAME_LEN)?;
    validate_optional_text(&payload.last_name, "lastName", MAX_NAME_LEN)?;
    validate_optional_text(&payload.email, "email", MAX_EMAIL_LEN)?;
    validate_optional_text(&payload.phone, "phone", MAX_PHONE_LEN)?;
    if let Some(ref email) = payload.email {
        validate_email(email)?;
    }
    if let Some(ref phone) = payload.phone {
        validate_phone(phone)?;
    }

    let repo = state.employee_repo().await?;
    let employee = repo.update(&id, &user.id, payload).await?;

    Ok(Json(employee.into()))
}

/// Permanently delete an owned employee
pub async fn delete(
    State(state): State<ServerState>,
    user: CurrentUser,
    Path(id): Path<String>,
) -> AppResult<Json<DeleteAck>> {
    let repo = state.employee_repo().await?;
    repo.delete(&id, &user.id).await?;

    tracing::info!(owner = %user.id, employee = %id, "Employee deleted");

    Ok(Json(DeleteAck::employee()))
}
