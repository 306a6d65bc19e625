use chrono::{DateTime, Utc};
use diesel::prelude::*;

use crate::schema::cart_snapshots;

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = cart_snapshots)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct SnapshotRow {
    pub storage_key: String,
    pub payload: String,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Insertable, AsChangeset)]
#[diesel(table_name = cart_snapshots)]
pub struct NewSnapshotRow<'a> {
    pub storage_key: &'a str,
    pub payload: &'a str,
    pub updated_at: DateTime<Utc>,
}
