//! # bt-db-sqlite Implementation
//!
//! This module implements the data mapping between the SQLite relational model
//! and the `bt-core` domain models.

use async_trait::async_trait;
use bt_core::error::{AppError, Result};
use bt_core::models::{Bug, BugChanges, BugFilter, NewBug, Priority, Status};
use bt_core::traits::BugRepo;
use chrono::{DateTime, Utc};
use sqlx::sqlite::{SqlitePool, SqlitePoolOptions, SqliteRow};
use sqlx::Row;
use std::str::FromStr;
use uuid::Uuid;

pub struct SqliteBugRepo {
    pool: SqlitePool,
}

impl SqliteBugRepo {
    /// Connects to the store and ensures the schema exists.
    ///
    /// `sqlite::memory:` databases exist per connection, so the pool is
    /// capped at a single connection for those; otherwise the schema
    /// created here would not be visible to later queries.
    pub async fn connect(url: &str) -> Result<Self> {
        let options = sqlx::sqlite::SqliteConnectOptions::from_str(url)
            .map_err(internal)?
            .create_if_missing(true);

        let max_connections = if url.contains(":memory:") { 1 } else { 5 };
        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect_with(options)
            .await
            .map_err(internal)?;

        sqlx::query(
            "CREATE TABLE IF NOT EXISTS bugs (
                id          TEXT PRIMARY KEY,
                title       TEXT NOT NULL,
                description TEXT NOT NULL,
                priority    TEXT NOT NULL,
                status      TEXT NOT NULL,
                created_by  TEXT NOT NULL,
                created_at  TEXT NOT NULL
            )",
        )
        .execute(&pool)
        .await
        .map_err(internal)?;

        tracing::info!(url, "bug store ready");
        Ok(Self { pool })
    }

    /// Closes the underlying pool. Called once at process shutdown.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

fn internal(err: impl std::fmt::Display) -> AppError {
    AppError::Internal(err.to_string())
}

/// Maps a row back to the domain model. A priority/status string that no
/// longer parses means the row was written outside this adapter; surface
/// it as an internal error rather than guessing.
fn row_to_bug(row: &SqliteRow) -> Result<Bug> {
    let priority_raw: String = row.get("priority");
    let status_raw: String = row.get("status");
    Ok(Bug {
        id: row.get::<Uuid, _>("id"),
        title: row.get("title"),
        description: row.get("description"),
        priority: Priority::parse(&priority_raw)
            .ok_or_else(|| internal(format!("corrupt priority column: {priority_raw}")))?,
        status: Status::parse(&status_raw)
            .ok_or_else(|| internal(format!("corrupt status column: {status_raw}")))?,
        created_by: row.get("created_by"),
        created_at: row.get::<DateTime<Utc>, _>("created_at"),
    })
}

#[async_trait]
impl BugRepo for SqliteBugRepo {
    /// Assigns a v7 UUID and the creation timestamp, then persists.
    async fn create(&self, new: NewBug) -> Result<Bug> {
        let bug = Bug {
            id: Uuid::now_v7(),
            title: new.title,
            description: new.description,
            priority: new.priority,
            status: new.status,
            created_by: new.created_by,
            created_at: Utc::now(),
        };

        sqlx::query(
            "INSERT INTO bugs (id, title, description, priority, status, created_by, created_at)
             VALUES (?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(bug.id)
        .bind(&bug.title)
        .bind(&bug.description)
        .bind(bug.priority.as_str())
        .bind(bug.status.as_str())
        .bind(&bug.created_by)
        .bind(bug.created_at)
        .execute(&self.pool)
        .await
        .map_err(internal)?;

        Ok(bug)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Bug>> {
        let row = sqlx::query("SELECT * FROM bugs WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(internal)?;

        row.as_ref().map(row_to_bug).transpose()
    }

    /// Pages are cut after filtering: `OFFSET (page-1)*limit`. The status
    /// filter is an exact string match, so an unknown value simply matches
    /// nothing instead of erroring.
    async fn find(&self, filter: BugFilter, page: u32, limit: u32) -> Result<Vec<Bug>> {
        let page = page.max(1);
        let offset = i64::from(page - 1) * i64::from(limit);

        let rows = match filter.status {
            Some(s) => {
                sqlx::query(
                    "SELECT * FROM bugs WHERE status = ?
                     ORDER BY created_at ASC, id ASC LIMIT ? OFFSET ?",
                )
                .bind(s)
                .bind(i64::from(limit))
                .bind(offset)
                .fetch_all(&self.pool)
                .await
            }
            None => {
                sqlx::query("SELECT * FROM bugs ORDER BY created_at ASC, id ASC LIMIT ? OFFSET ?")
                    .bind(i64::from(limit))
                    .bind(offset)
                    .fetch_all(&self.pool)
                    .await
            }
        }
        .map_err(internal)?;

        rows.iter().map(row_to_bug).collect()
    }

    /// Read-modify-write of the mutable columns only. Two concurrent
    /// updates to the same record race here with last-write-wins.
    async fn update(&self, id: Uuid, changes: BugChanges) -> Result<Option<Bug>> {
        let current = match self.find_by_id(id).await? {
            Some(bug) => bug,
            None => return Ok(None),
        };

        let updated = Bug {
            title: changes.title.unwrap_or(current.title),
            description: changes.description.unwrap_or(current.description),
            priority: changes.priority.unwrap_or(current.priority),
            status: changes.status.unwrap_or(current.status),
            ..current
        };

        sqlx::query("UPDATE bugs SET title = ?, description = ?, priority = ?, status = ? WHERE id = ?")
            .bind(&updated.title)
            .bind(&updated.description)
            .bind(updated.priority.as_str())
            .bind(updated.status.as_str())
            .bind(updated.id)
            .execute(&self.pool)
            .await
            .map_err(internal)?;

        Ok(Some(updated))
    }

    async fn delete(&self, id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM bugs WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(internal)?;

        Ok(result.rows_affected() > 0)
    }
}
