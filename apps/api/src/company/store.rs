use serde::Deserialize;
use sqlx::PgPool;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::company::{Brand, CompanyProfile, CompanyRow, ContentSectionRow};
use crate::slug;

/// Resolves the company owned by `account_id`, or `NotFound`.
pub async fn find_by_owner(pool: &PgPool, account_id: Uuid) -> Result<CompanyRow, AppError> {
    let company: Option<CompanyRow> =
        sqlx::query_as("SELECT * FROM companies WHERE account_id = $1")
            .bind(account_id)
            .fetch_optional(pool)
            .await?;
    company.ok_or_else(|| AppError::NotFound("Company not found".to_string()))
}

/// Loads the full profile (company + ordered sections) for a company row.
pub async fn load_profile(pool: &PgPool, company: CompanyRow) -> Result<CompanyProfile, AppError> {
    let sections: Vec<ContentSectionRow> = sqlx::query_as(
        "SELECT * FROM content_sections WHERE company_id = $1 ORDER BY position, id",
    )
    .bind(company.id)
    .fetch_all(pool)
    .await?;
    Ok(CompanyProfile::from_parts(company, sections))
}

/// Resolves a company by its public slug. A slug that fails normalization
/// can never match a stored one, so it resolves to `NotFound` rather than
/// a format error.
pub async fn find_by_slug(pool: &PgPool, raw_slug: &str) -> Result<CompanyRow, AppError> {
    let slug = slug::normalize(raw_slug)
        .map_err(|_| AppError::NotFound("Company not found".to_string()))?;

    let company: Option<CompanyRow> = sqlx::query_as("SELECT * FROM companies WHERE slug = $1")
        .bind(&slug)
        .fetch_optional(pool)
        .await?;
    company.ok_or_else(|| AppError::NotFound("Company not found".to_string()))
}

/// Public profile lookup by slug. The `published` flag is not a read gate.
pub async fn get_public(pool: &PgPool, raw_slug: &str) -> Result<CompanyProfile, AppError> {
    let company = find_by_slug(pool, raw_slug).await?;
    load_profile(pool, company).await
}

pub async fn get_owned(pool: &PgPool, account_id: Uuid) -> Result<CompanyProfile, AppError> {
    let company = find_by_owner(pool, account_id).await?;
    load_profile(pool, company).await
}

#[derive(Debug, Deserialize)]
pub struct UpdateCompanyRequest {
    pub name: Option<String>,
    pub brand: Option<BrandPatch>,
    pub published: Option<bool>,
}

#[derive(Debug, Deserialize)]
pub struct BrandPatch {
    pub primary_color: Option<String>,
    pub secondary_color: Option<String>,
    pub logo: Option<String>,
    pub banner: Option<String>,
    pub culture_video: Option<String>,
    pub subtitle: Option<String>,
}

/// Applies a partial-field merge to the owner's company.
pub async fn update(
    pool: &PgPool,
    account_id: Uuid,
    patch: UpdateCompanyRequest,
) -> Result<CompanyProfile, AppError> {
    if let Some(name) = &patch.name {
        if name.trim().is_empty() {
            return Err(AppError::Validation("name must not be empty".to_string()));
        }
    }

    let company = find_by_owner(pool, account_id).await?;

    let name = patch.name.unwrap_or(company.name);
    let brand = match patch.brand {
        Some(brand_patch) => merge_brand(company.brand.0, brand_patch),
        None => company.brand.0,
    };
    let published = patch.published.unwrap_or(company.published);

    let updated: CompanyRow = sqlx::query_as(
        r#"
        UPDATE companies
        SET name = $1, brand = $2, published = $3, updated_at = now()
        WHERE id = $4
        RETURNING *
        "#,
    )
    .bind(&name)
    .bind(sqlx::types::Json(&brand))
    .bind(published)
    .bind(company.id)
    .fetch_one(pool)
    .await?;

    load_profile(pool, updated).await
}

/// Field-wise merge: provided fields overwrite, absent fields keep the
/// current value.
fn merge_brand(current: Brand, patch: BrandPatch) -> Brand {
    Brand {
        primary_color: patch.primary_color.unwrap_or(current.primary_color),
        secondary_color: patch.secondary_color.unwrap_or(current.secondary_color),
        logo: patch.logo.or(current.logo),
        banner: patch.banner.or(current.banner),
        culture_video: patch.culture_video.or(current.culture_video),
        subtitle: patch.subtitle.unwrap_or(current.subtitle),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn empty_patch() -> BrandPatch {
        BrandPatch {
            primary_color: None,
            secondary_color: None,
            logo: None,
            banner: None,
            culture_video: None,
            subtitle: None,
        }
    }

    #[test]
    fn test_merge_brand_keeps_unpatched_fields() {
        let current = Brand {
            logo: Some("https://cdn.example.com/logo.png".to_string()),
            ..Brand::default()
        };
        let merged = merge_brand(current.clone(), empty_patch());
        assert_eq!(merged.primary_color, current.primary_color);
        assert_eq!(merged.logo, current.logo);
        assert_eq!(merged.subtitle, current.subtitle);
    }

    #[test]
    fn test_merge_brand_overwrites_patched_fields() {
        let merged = merge_brand(
            Brand::default(),
            BrandPatch {
                primary_color: Some("#000000".to_string()),
                banner: Some("https://cdn.example.com/banner.png".to_string()),
                ..empty_patch()
            },
        );
        assert_eq!(merged.primary_color, "#000000");
        assert_eq!(
            merged.banner.as_deref(),
            Some("https://cdn.example.com/banner.png")
        );
        // untouched field retains its default
        assert_eq!(merged.secondary_color, "#1E40AF");
    }
}
