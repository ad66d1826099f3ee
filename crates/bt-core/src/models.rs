//! # Domain Models
//!
//! These structs represent the core entities of the bug tracker.
//! We use UUID v7 for time-ordered, globally unique identification.

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, Utc};

/// Urgency of a bug. Defaults to `Medium` when omitted at creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "low" => Some(Priority::Low),
            "medium" => Some(Priority::Medium),
            "high" => Some(Priority::High),
            _ => None,
        }
    }
}

impl Default for Priority {
    fn default() -> Self {
        Priority::Medium
    }
}

/// Where a bug sits in its lifecycle. New bugs always start `Open`.
/// Which transitions are legal is decided by [`crate::lifecycle`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Status {
    Open,
    InProgress,
    Resolved,
}

impl Status {
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Open => "open",
            Status::InProgress => "in-progress",
            Status::Resolved => "resolved",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "open" => Some(Status::Open),
            "in-progress" => Some(Status::InProgress),
            "resolved" => Some(Status::Resolved),
            _ => None,
        }
    }
}

impl Default for Status {
    fn default() -> Self {
        Status::Open
    }
}

/// The tracked issue record.
///
/// `id`, `created_by` and `created_at` are assigned server-side at creation
/// and never overwritten by client input afterwards.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bug {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub priority: Priority,
    pub status: Status,
    /// Caller identity recorded at creation; the only identity allowed
    /// to mutate or delete this record.
    pub created_by: String,
    pub created_at: DateTime<Utc>,
}

/// Fully-validated fields handed to the repository on create.
/// Defaults for omitted priority/status have already been applied.
#[derive(Debug, Clone)]
pub struct NewBug {
    pub title: String,
    pub description: String,
    pub priority: Priority,
    pub status: Status,
    pub created_by: String,
}

/// Partial-update fields handed to the repository. `None` means
/// "leave unchanged". Identity and creation fields are not expressible
/// here on purpose.
#[derive(Debug, Clone, Default)]
pub struct BugChanges {
    pub title: Option<String>,
    pub description: Option<String>,
    pub priority: Option<Priority>,
    pub status: Option<Status>,
}

/// Listing restriction. An absent status means "no restriction"; the
/// match is exact and raw, so an unknown value matches nothing.
#[derive(Debug, Clone, Default)]
pub struct BugFilter {
    pub status: Option<String>,
}

/// Raw create payload as it arrives over the wire.
///
/// Enum-valued fields are plain strings here so an out-of-range value
/// surfaces as a validation message rather than a deserialization error.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateBugPayload {
    pub title: Option<String>,
    pub description: Option<String>,
    pub priority: Option<String>,
}

/// Raw update payload. Every field is optional; absence means unchanged.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateBugPayload {
    pub title: Option<String>,
    pub description: Option<String>,
    pub priority: Option<String>,
    pub status: Option<String>,
}
