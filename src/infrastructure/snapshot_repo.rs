use chrono::Utc;
use diesel::prelude::*;

use crate::db::DbPool;
use crate::domain::errors::CartError;
use crate::domain::ports::SnapshotStorage;
use crate::schema::cart_snapshots;

use super::models::{NewSnapshotRow, SnapshotRow};

// ── Error conversions (infrastructure concern only) ──────────────────────────

impl From<diesel::result::Error> for CartError {
    fn from(e: diesel::result::Error) -> Self {
        CartError::Storage(e.to_string())
    }
}

impl From<r2d2::Error> for CartError {
    fn from(e: r2d2::Error) -> Self {
        CartError::Storage(e.to_string())
    }
}

// ── Storage ───────────────────────────────────────────────────────────────────

/// One row per storage key; writes upsert the whole payload.
pub struct DieselSnapshotStorage {
    pool: DbPool,
}

impl DieselSnapshotStorage {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

impl SnapshotStorage for DieselSnapshotStorage {
    fn read(&self, key: &str) -> Result<Option<String>, CartError> {
        let mut conn = self.pool.get()?;

        let row = cart_snapshots::table
            .find(key)
            .select(SnapshotRow::as_select())
            .first(&mut conn)
            .optional()?;

        Ok(row.map(|r| r.payload))
    }

    fn write(&self, key: &str, value: &str) -> Result<(), CartError> {
        let mut conn = self.pool.get()?;

        let row = NewSnapshotRow {
            storage_key: key,
            payload: value,
            updated_at: Utc::now(),
        };
        diesel::insert_into(cart_snapshots::table)
            .values(&row)
            .on_conflict(cart_snapshots::storage_key)
            .do_update()
            .set(&row)
            .execute(&mut conn)?;

        Ok(())
    }
}
