//! # Core Traits (Ports)
//!
//! Any plugin must implement these traits to be used by the binary.

use async_trait::async_trait;
use crate::error::Result;
use crate::models::{Bug, BugChanges, BugFilter, NewBug};
use uuid::Uuid;

/// Data persistence contract for bug records.
///
/// The repository stores `priority`/`status` as opaque strings; enum
/// membership and lifecycle rules are enforced upstream in the handlers.
#[async_trait]
pub trait BugRepo: Send + Sync {
    /// Assigns id and creation timestamp, persists, returns the stored record.
    async fn create(&self, new: NewBug) -> Result<Bug>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Bug>>;

    /// Fetches one page of bugs, optionally restricted to an exact `status`
    /// match. Ordering is insertion order (ascending creation time, id as
    /// tiebreak) so pages are stable across requests.
    async fn find(&self, filter: BugFilter, page: u32, limit: u32) -> Result<Vec<Bug>>;

    /// Applies only the supplied fields; returns `None` if the id is absent.
    /// `id`, `created_by` and `created_at` are never touched.
    async fn update(&self, id: Uuid, changes: BugChanges) -> Result<Option<Bug>>;

    /// Returns `false` if the id did not resolve to a record.
    async fn delete(&self, id: Uuid) -> Result<bool>;
}

/// Identity contract: bearer-credential verification and issuance.
pub trait AuthProvider: Send + Sync {
    /// Verifies signature and expiry of a bearer token and extracts the
    /// caller identity it carries. Any failure maps to `Unauthorized`.
    fn verify(&self, token: &str) -> Result<String>;

    /// Mints a signed token carrying `caller_id`, valid for one hour.
    fn issue(&self, caller_id: &str) -> Result<String>;
}
