//! # bt-api Handlers
//!
//! This module coordinates the flow between HTTP requests and core traits:
//! payload validation, creator-only authorization, the lifecycle check,
//! and repository calls, in that order.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use bt_core::error::AppError;
use bt_core::lifecycle::is_allowed_transition;
use bt_core::models::{
    Bug, BugChanges, BugFilter, CreateBugPayload, NewBug, Priority, Status, UpdateBugPayload,
};
use bt_core::validate::{validate_create, validate_update};
use serde::Deserialize;
use uuid::Uuid;

use crate::error::{ApiError, ApiResult};
use crate::middleware::Caller;
use crate::AppState;

pub const DEFAULT_PAGE: u32 = 1;
pub const DEFAULT_LIMIT: u32 = 10;

pub const MSG_INVALID_TRANSITION: &str = "Invalid status transition";

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub status: Option<String>,
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

fn not_found() -> ApiError {
    ApiError(AppError::NotFound("Bug".to_string()))
}

/// POST /api/bugs — authenticated.
///
/// `created_by` always comes from the verified caller; a value in the
/// payload would be ignored by deserialization.
pub async fn create_bug(
    State(state): State<AppState>,
    caller: Caller,
    Json(payload): Json<CreateBugPayload>,
) -> ApiResult<(StatusCode, Json<Bug>)> {
    let errors = validate_create(&payload);
    if !errors.is_empty() {
        return Err(AppError::Validation(errors).into());
    }

    let new = NewBug {
        // Validation guarantees presence of title/description here.
        title: payload.title.unwrap_or_default(),
        description: payload.description.unwrap_or_default(),
        priority: payload
            .priority
            .as_deref()
            .and_then(Priority::parse)
            .unwrap_or_default(),
        status: Status::default(),
        created_by: caller.0,
    };

    let bug = state.repo.create(new).await?;
    tracing::info!(bug_id = %bug.id, created_by = %bug.created_by, "bug created");
    Ok((StatusCode::CREATED, Json(bug)))
}

/// GET /api/bugs — open. An empty page is a success, not an error.
pub async fn list_bugs(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> ApiResult<Json<Vec<Bug>>> {
    let filter = BugFilter {
        // The client sends `?status=` for "All"; treat it as no filter.
        status: query.status.filter(|s| !s.is_empty()),
    };
    let page = query.page.unwrap_or(DEFAULT_PAGE);
    let limit = query.limit.unwrap_or(DEFAULT_LIMIT);

    let bugs = state.repo.find(filter, page, limit).await?;
    Ok(Json(bugs))
}

/// GET /api/bugs/{id} — open.
pub async fn get_bug(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<Bug>> {
    match state.repo.find_by_id(id).await? {
        Some(bug) => Ok(Json(bug)),
        None => Err(not_found()),
    }
}

/// PUT /api/bugs/{id} — authenticated, creator only.
///
/// Outcome precedence: 404 (unknown id), 403 (not the creator),
/// 400 (field rules), 400 (lifecycle), then the partial update.
pub async fn update_bug(
    State(state): State<AppState>,
    caller: Caller,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateBugPayload>,
) -> ApiResult<Json<Bug>> {
    let current = state.repo.find_by_id(id).await?.ok_or_else(not_found)?;

    if current.created_by != caller.0 {
        return Err(AppError::Forbidden("Only the creator may modify this bug".to_string()).into());
    }

    let errors = validate_update(&payload);
    if !errors.is_empty() {
        return Err(AppError::Validation(errors).into());
    }

    let next_status = payload.status.as_deref().and_then(Status::parse);
    if let Some(next) = next_status {
        if !is_allowed_transition(current.status, next) {
            tracing::warn!(bug_id = %id, from = current.status.as_str(), to = next.as_str(), "rejected status transition");
            return Err(AppError::Validation(vec![MSG_INVALID_TRANSITION.to_string()]).into());
        }
    }

    let changes = BugChanges {
        title: payload.title,
        description: payload.description,
        priority: payload.priority.as_deref().and_then(Priority::parse),
        status: next_status,
    };

    let updated = state.repo.update(id, changes).await?.ok_or_else(not_found)?;
    Ok(Json(updated))
}

/// DELETE /api/bugs/{id} — authenticated, creator only.
pub async fn delete_bug(
    State(state): State<AppState>,
    caller: Caller,
    Path(id): Path<Uuid>,
) -> ApiResult<Json<serde_json::Value>> {
    let current = state.repo.find_by_id(id).await?.ok_or_else(not_found)?;

    if current.created_by != caller.0 {
        return Err(AppError::Forbidden("Only the creator may delete this bug".to_string()).into());
    }

    if !state.repo.delete(id).await? {
        // Raced away between the lookup and the delete.
        return Err(not_found());
    }

    tracing::info!(bug_id = %id, "bug deleted");
    Ok(Json(serde_json::json!({ "message": "Bug deleted" })))
}
