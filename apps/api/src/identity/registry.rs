//! Identity registry for the account/company slug namespace.
//!
//! The company row is the single source of truth for the slug: accounts
//! store no copy, so the historical dual-write (company slug + account
//! slug claim) collapses into one atomic write and the two spaces cannot
//! diverge. An account's public display slug is derived by looking up its
//! company.

use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

use crate::errors::{on_unique_violation, AppError};
use crate::models::account::AccountRow;
use crate::models::company::{Brand, CompanyRow};
use crate::slug;

pub async fn find_account(pool: &PgPool, account_id: Uuid) -> Result<AccountRow, AppError> {
    let account: Option<AccountRow> = sqlx::query_as("SELECT * FROM accounts WHERE id = $1")
        .bind(account_id)
        .fetch_optional(pool)
        .await?;
    account.ok_or_else(|| AppError::NotFound("Account not found".to_string()))
}

/// Advisory availability check for the merged account/company namespace.
///
/// Because the company table is the only slug holder, a single existence
/// query covers the whole namespace. Callers must treat the answer as
/// advisory: the unique index on `companies.slug` is the final arbiter at
/// write time. A slug that fails normalization can never be claimed and is
/// reported unavailable rather than rejected.
pub async fn check_availability(pool: &PgPool, raw: &str) -> Result<bool, AppError> {
    let Ok(slug) = slug::normalize(raw) else {
        return Ok(false);
    };
    let taken: bool =
        sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM companies WHERE slug = $1)")
            .bind(&slug)
            .fetch_one(pool)
            .await?;
    Ok(!taken)
}

/// Claims a slug for a new account by inserting its company row.
///
/// Runs inside the registration transaction so account and company are
/// created all-or-nothing. The advisory pre-check gives the common case a
/// clean `SlugTaken` without waiting for the constraint; a concurrent
/// claim that slips past it is still rejected by the unique index.
pub async fn claim(
    tx: &mut Transaction<'_, Postgres>,
    slug: &str,
    account_id: Uuid,
    company_name: &str,
) -> Result<CompanyRow, AppError> {
    let taken: bool =
        sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM companies WHERE slug = $1)")
            .bind(slug)
            .fetch_one(&mut **tx)
            .await?;
    if taken {
        return Err(AppError::SlugTaken);
    }

    let company: CompanyRow = sqlx::query_as(
        r#"
        INSERT INTO companies (id, account_id, slug, name, brand)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(account_id)
    .bind(slug)
    .bind(company_name)
    .bind(sqlx::types::Json(Brand::default()))
    .fetch_one(&mut **tx)
    .await
    .map_err(|e| on_unique_violation(e, "companies_slug_key", AppError::SlugTaken))?;

    Ok(company)
}

/// Renames the caller's company slug.
///
/// A single UPDATE on the source-of-truth row: on conflict nothing is
/// mutated, so the rename is all-or-nothing from the caller's perspective.
pub async fn rename(pool: &PgPool, account_id: Uuid, raw: &str) -> Result<CompanyRow, AppError> {
    let slug = slug::normalize(raw)?;

    let company: Option<CompanyRow> = sqlx::query_as(
        r#"
        UPDATE companies
        SET slug = $1, updated_at = now()
        WHERE account_id = $2
        RETURNING *
        "#,
    )
    .bind(&slug)
    .bind(account_id)
    .fetch_optional(pool)
    .await
    .map_err(|e| on_unique_violation(e, "companies_slug_key", AppError::SlugTaken))?;

    company.ok_or_else(|| AppError::NotFound("Company not found".to_string()))
}
