//! # Payload Validation
//!
//! Field-level rules for incoming bug payloads. Each violated rule yields
//! one human-readable message; an empty list means the payload is clean.
//!
//! Create and update share the same rules but differ on when a rule fires:
//! create treats title/description as mandatory, update checks each field
//! only when it is present (partial-update semantics).

use crate::models::{CreateBugPayload, Priority, Status, UpdateBugPayload};

pub const MSG_TITLE_REQUIRED: &str = "Title is required";
pub const MSG_DESCRIPTION_REQUIRED: &str = "Description is required";
pub const MSG_PRIORITY_INVALID: &str = "Priority must be low, medium, or high";
pub const MSG_STATUS_INVALID: &str = "Status must be open, in-progress, or resolved";

fn is_blank(value: &Option<String>) -> bool {
    match value {
        Some(s) => s.trim().is_empty(),
        None => true,
    }
}

/// Validates a create payload. Priority is optional (it defaults), but a
/// supplied value must be in range.
pub fn validate_create(payload: &CreateBugPayload) -> Vec<String> {
    let mut errors = Vec::new();

    if is_blank(&payload.title) {
        errors.push(MSG_TITLE_REQUIRED.to_string());
    }
    if is_blank(&payload.description) {
        errors.push(MSG_DESCRIPTION_REQUIRED.to_string());
    }
    if let Some(p) = &payload.priority {
        if Priority::parse(p).is_none() {
            errors.push(MSG_PRIORITY_INVALID.to_string());
        }
    }

    errors
}

/// Validates an update payload. Absent fields are fine; present fields
/// must satisfy the same rules as on create.
pub fn validate_update(payload: &UpdateBugPayload) -> Vec<String> {
    let mut errors = Vec::new();

    if payload.title.is_some() && is_blank(&payload.title) {
        errors.push(MSG_TITLE_REQUIRED.to_string());
    }
    if payload.description.is_some() && is_blank(&payload.description) {
        errors.push(MSG_DESCRIPTION_REQUIRED.to_string());
    }
    if let Some(p) = &payload.priority {
        if Priority::parse(p).is_none() {
            errors.push(MSG_PRIORITY_INVALID.to_string());
        }
    }
    if let Some(s) = &payload.status {
        if Status::parse(s).is_none() {
            errors.push(MSG_STATUS_INVALID.to_string());
        }
    }

    errors
}
