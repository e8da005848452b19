#![allow(dead_code)]

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

/// Row in `accounts`. Deliberately not `Serialize`: the password hash
/// must never cross the API boundary — responses use [`AccountPublic`].
#[derive(Debug, Clone, FromRow)]
pub struct AccountRow {
    pub id: Uuid,
    pub email: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

/// Public shape of an account. The `company_slug` is derived from the
/// owning company row, which is the single source of truth for the slug.
#[derive(Debug, Clone, Serialize)]
pub struct AccountPublic {
    pub id: Uuid,
    pub email: String,
    pub company_slug: String,
}
