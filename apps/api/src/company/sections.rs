//! Content section operations: append, update, delete, reorder.
//!
//! Order keys are zero-based integers. Append assigns `max + 1` (computed
//! inside the INSERT so concurrent appends cannot read the same max);
//! delete leaves gaps; reorder assigns each section its index in the
//! supplied sequence and is the only operation that compacts the keys.

use serde::Deserialize;
use sqlx::PgPool;
use uuid::Uuid;

use crate::company::store::{find_by_owner, load_profile};
use crate::errors::AppError;
use crate::models::company::{CompanyProfile, ContentSectionRow, SectionType};

#[derive(Debug, Deserialize)]
pub struct AppendSectionRequest {
    pub section_type: String,
    pub title: Option<String>,
    pub content: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateSectionRequest {
    pub section_type: Option<String>,
    pub title: Option<String>,
    pub content: Option<String>,
    pub position: Option<i32>,
}

#[derive(Debug, Deserialize)]
pub struct ReorderRequest {
    pub section_ids: Vec<Uuid>,
}

pub async fn append(
    pool: &PgPool,
    account_id: Uuid,
    req: AppendSectionRequest,
) -> Result<CompanyProfile, AppError> {
    let section_type = SectionType::parse(&req.section_type)?;
    let company = find_by_owner(pool, account_id).await?;

    // Position is derived inside the statement: two concurrent appends
    // cannot both read the same max and collide.
    sqlx::query(
        r#"
        INSERT INTO content_sections (id, company_id, section_type, title, content, position)
        SELECT $1, $2, $3, $4, $5, COALESCE(MAX(position) + 1, 0)
        FROM content_sections
        WHERE company_id = $2
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(company.id)
    .bind(section_type.as_str())
    .bind(&req.title)
    .bind(&req.content)
    .execute(pool)
    .await?;

    load_profile(pool, company).await
}

pub async fn update(
    pool: &PgPool,
    account_id: Uuid,
    section_id: Uuid,
    patch: UpdateSectionRequest,
) -> Result<CompanyProfile, AppError> {
    let company = find_by_owner(pool, account_id).await?;

    let existing: Option<ContentSectionRow> =
        sqlx::query_as("SELECT * FROM content_sections WHERE id = $1 AND company_id = $2")
            .bind(section_id)
            .bind(company.id)
            .fetch_optional(pool)
            .await?;
    let existing = existing.ok_or_else(|| AppError::NotFound("Section not found".to_string()))?;

    let section_type = match patch.section_type {
        Some(raw) => SectionType::parse(&raw)?.as_str().to_string(),
        None => existing.section_type,
    };
    let title = patch.title.or(existing.title);
    let content = patch.content.or(existing.content);
    let position = patch.position.unwrap_or(existing.position);

    sqlx::query(
        r#"
        UPDATE content_sections
        SET section_type = $1, title = $2, content = $3, position = $4
        WHERE id = $5
        "#,
    )
    .bind(&section_type)
    .bind(&title)
    .bind(&content)
    .bind(position)
    .bind(section_id)
    .execute(pool)
    .await?;

    load_profile(pool, company).await
}

/// Deletes a section. Remaining order keys are left as-is; gaps are only
/// resolved by an explicit reorder.
pub async fn delete(
    pool: &PgPool,
    account_id: Uuid,
    section_id: Uuid,
) -> Result<CompanyProfile, AppError> {
    let company = find_by_owner(pool, account_id).await?;

    let result = sqlx::query("DELETE FROM content_sections WHERE id = $1 AND company_id = $2")
        .bind(section_id)
        .bind(company.id)
        .execute(pool)
        .await?;
    if result.rows_affected() == 0 {
        return Err(AppError::NotFound("Section not found".to_string()));
    }

    load_profile(pool, company).await
}

/// Assigns each listed section the position equal to its index in the
/// supplied sequence. Sections omitted from the list are untouched.
/// Unknown or duplicated ids fail the whole call and nothing moves.
pub async fn reorder(
    pool: &PgPool,
    account_id: Uuid,
    req: ReorderRequest,
) -> Result<CompanyProfile, AppError> {
    let company = find_by_owner(pool, account_id).await?;

    let existing: Vec<Uuid> =
        sqlx::query_scalar("SELECT id FROM content_sections WHERE company_id = $1")
            .bind(company.id)
            .fetch_all(pool)
            .await?;

    validate_reorder_ids(&existing, &req.section_ids)?;

    let positions: Vec<i32> = (0..req.section_ids.len() as i32).collect();
    sqlx::query(
        r#"
        UPDATE content_sections AS s
        SET position = u.position
        FROM UNNEST($2::uuid[], $3::int[]) AS u (id, position)
        WHERE s.id = u.id AND s.company_id = $1
        "#,
    )
    .bind(company.id)
    .bind(&req.section_ids)
    .bind(&positions)
    .execute(pool)
    .await?;

    load_profile(pool, company).await
}

/// Rejects ids that do not exist under the profile, and duplicates, so a
/// typo cannot silently drop the intended ordering.
fn validate_reorder_ids(existing: &[Uuid], requested: &[Uuid]) -> Result<(), AppError> {
    let unknown: Vec<Uuid> = requested
        .iter()
        .filter(|id| !existing.contains(id))
        .copied()
        .collect();
    if !unknown.is_empty() {
        return Err(AppError::Validation(format!(
            "unknown section ids: {}",
            join_ids(&unknown)
        )));
    }

    let mut seen = Vec::with_capacity(requested.len());
    let mut duplicates = Vec::new();
    for id in requested {
        if seen.contains(id) {
            if !duplicates.contains(id) {
                duplicates.push(*id);
            }
        } else {
            seen.push(*id);
        }
    }
    if !duplicates.is_empty() {
        return Err(AppError::Validation(format!(
            "duplicate section ids: {}",
            join_ids(&duplicates)
        )));
    }

    Ok(())
}

fn join_ids(ids: &[Uuid]) -> String {
    ids.iter()
        .map(Uuid::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reorder_accepts_full_and_partial_coverage() {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        let c = Uuid::new_v4();
        let existing = vec![a, b, c];

        assert!(validate_reorder_ids(&existing, &[c, a, b]).is_ok());
        // omitting sections is allowed; they keep their positions
        assert!(validate_reorder_ids(&existing, &[b]).is_ok());
        assert!(validate_reorder_ids(&existing, &[]).is_ok());
    }

    #[test]
    fn test_reorder_rejects_unknown_ids() {
        let a = Uuid::new_v4();
        let stranger = Uuid::new_v4();
        let err = validate_reorder_ids(&[a], &[a, stranger]).unwrap_err();
        match err {
            AppError::Validation(msg) => assert!(msg.contains(&stranger.to_string())),
            other => panic!("expected Validation, got {other:?}"),
        }
    }

    #[test]
    fn test_reorder_rejects_duplicate_ids() {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        let err = validate_reorder_ids(&[a, b], &[a, b, a]).unwrap_err();
        match err {
            AppError::Validation(msg) => assert!(msg.contains("duplicate")),
            other => panic!("expected Validation, got {other:?}"),
        }
    }
}
