//! Job catalog: postings scoped to a company, with sparse per-company slug
//! uniqueness. The partial unique index on `jobs (company_id, slug)` is the
//! final arbiter; advisory checks only shortcut the common case.

use serde::Deserialize;
use sqlx::PgPool;
use uuid::Uuid;

use crate::errors::{on_unique_violation, AppError};
use crate::models::job::{JobRow, JobStatus, JobType, SalaryRange};
use crate::slug;

#[derive(Debug, Deserialize)]
pub struct JobFilters {
    pub location: Option<String>,
    pub job_type: Option<String>,
    pub search: Option<String>,
}

/// Open postings for a company, newest first. Every supplied filter is a
/// case-insensitive substring match on its field; absent filters drop out
/// of the conjunction.
pub async fn list_open(
    pool: &PgPool,
    company_id: Uuid,
    filters: &JobFilters,
) -> Result<Vec<JobRow>, AppError> {
    let jobs: Vec<JobRow> = sqlx::query_as(
        r#"
        SELECT * FROM jobs
        WHERE company_id = $1
          AND status = 'open'
          AND ($2::text IS NULL OR location ILIKE $2)
          AND ($3::text IS NULL OR job_type ILIKE $3)
          AND ($4::text IS NULL OR title ILIKE $4)
        ORDER BY created_at DESC
        "#,
    )
    .bind(company_id)
    .bind(filters.location.as_deref().map(contains_pattern))
    .bind(filters.job_type.as_deref().map(contains_pattern))
    .bind(filters.search.as_deref().map(contains_pattern))
    .fetch_all(pool)
    .await?;
    Ok(jobs)
}

/// Resolves an open posting by its per-company slug. Closed postings do not
/// resolve, consistent with `list_open`.
pub async fn get_open_by_slug(
    pool: &PgPool,
    company_id: Uuid,
    raw_slug: &str,
) -> Result<JobRow, AppError> {
    let job_slug = slug::normalize(raw_slug)
        .map_err(|_| AppError::NotFound("Job not found".to_string()))?;

    let job: Option<JobRow> = sqlx::query_as(
        "SELECT * FROM jobs WHERE company_id = $1 AND slug = $2 AND status = 'open'",
    )
    .bind(company_id)
    .bind(&job_slug)
    .fetch_optional(pool)
    .await?;
    job.ok_or_else(|| AppError::NotFound("Job not found".to_string()))
}

/// All of a company's postings regardless of status, newest first.
pub async fn list_all(pool: &PgPool, company_id: Uuid) -> Result<Vec<JobRow>, AppError> {
    let jobs: Vec<JobRow> =
        sqlx::query_as("SELECT * FROM jobs WHERE company_id = $1 ORDER BY created_at DESC")
            .bind(company_id)
            .fetch_all(pool)
            .await?;
    Ok(jobs)
}

/// Advisory slug availability within one company. Absent slugs are always
/// available (sparse uniqueness); malformed ones can never be claimed.
pub async fn check_slug_available(
    pool: &PgPool,
    company_id: Uuid,
    raw: &str,
) -> Result<bool, AppError> {
    if raw.trim().is_empty() {
        return Ok(true);
    }
    let Ok(job_slug) = slug::normalize(raw) else {
        return Ok(false);
    };
    let taken: bool = sqlx::query_scalar(
        "SELECT EXISTS (SELECT 1 FROM jobs WHERE company_id = $1 AND slug = $2)",
    )
    .bind(company_id)
    .bind(&job_slug)
    .fetch_one(pool)
    .await?;
    Ok(!taken)
}

#[derive(Debug, Deserialize)]
pub struct CreateJobRequest {
    pub title: Option<String>,
    pub slug: Option<String>,
    pub department: Option<String>,
    pub location: Option<String>,
    pub job_type: Option<String>,
    pub description: Option<String>,
    #[serde(default)]
    pub requirements: Vec<String>,
    pub salary: Option<SalaryRange>,
    pub status: Option<String>,
}

/// A create request with required fields proven present and closed sets
/// validated.
#[derive(Debug)]
struct ValidatedJob {
    title: String,
    slug: Option<String>,
    department: Option<String>,
    location: String,
    job_type: JobType,
    description: String,
    requirements: Vec<String>,
    salary: Option<SalaryRange>,
    status: JobStatus,
}

impl CreateJobRequest {
    fn validate(self) -> Result<ValidatedJob, AppError> {
        let missing = missing_fields(&[
            ("title", self.title.as_deref()),
            ("location", self.location.as_deref()),
            ("job_type", self.job_type.as_deref()),
            ("description", self.description.as_deref()),
        ]);
        if !missing.is_empty() {
            return Err(AppError::Validation(format!(
                "missing required fields: {}",
                missing.join(", ")
            )));
        }

        let job_type = JobType::parse(self.job_type.as_deref().unwrap_or_default())?;
        let status = match self.status.as_deref() {
            Some(raw) => JobStatus::parse(raw)?,
            None => JobStatus::Open,
        };
        let slug = match self.slug.as_deref() {
            None => None,
            Some(raw) if raw.trim().is_empty() => None,
            Some(raw) => Some(slug::normalize(raw)?),
        };

        Ok(ValidatedJob {
            title: self.title.unwrap_or_default(),
            slug,
            department: self.department,
            location: self.location.unwrap_or_default(),
            job_type,
            description: self.description.unwrap_or_default(),
            requirements: self.requirements,
            salary: self.salary,
            status,
        })
    }
}

pub async fn create(
    pool: &PgPool,
    company_id: Uuid,
    req: CreateJobRequest,
) -> Result<JobRow, AppError> {
    let job = req.validate()?;

    if let Some(job_slug) = &job.slug {
        ensure_slug_free(pool, company_id, job_slug, None).await?;
    }

    let inserted: JobRow = sqlx::query_as(
        r#"
        INSERT INTO jobs
            (id, company_id, title, slug, department, location, job_type,
             description, requirements, salary, status)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(company_id)
    .bind(&job.title)
    .bind(&job.slug)
    .bind(&job.department)
    .bind(&job.location)
    .bind(job.job_type.as_str())
    .bind(&job.description)
    .bind(&job.requirements)
    .bind(job.salary.map(sqlx::types::Json))
    .bind(job.status.as_str())
    .fetch_one(pool)
    .await
    .map_err(|e| on_unique_violation(e, "jobs_company_slug_key", AppError::SlugTaken))?;

    Ok(inserted)
}

#[derive(Debug, Deserialize)]
pub struct UpdateJobRequest {
    pub title: Option<String>,
    /// `None` leaves the slug alone; an empty string clears it.
    pub slug: Option<String>,
    pub department: Option<String>,
    pub location: Option<String>,
    pub job_type: Option<String>,
    pub description: Option<String>,
    pub requirements: Option<Vec<String>>,
    pub salary: Option<SalaryRange>,
    pub status: Option<String>,
}

pub async fn update(
    pool: &PgPool,
    company_id: Uuid,
    job_id: Uuid,
    patch: UpdateJobRequest,
) -> Result<JobRow, AppError> {
    let existing: Option<JobRow> =
        sqlx::query_as("SELECT * FROM jobs WHERE id = $1 AND company_id = $2")
            .bind(job_id)
            .bind(company_id)
            .fetch_optional(pool)
            .await?;
    let existing = existing.ok_or_else(|| AppError::NotFound("Job not found".to_string()))?;

    let job_type = match patch.job_type.as_deref() {
        Some(raw) => JobType::parse(raw)?.as_str().to_string(),
        None => existing.job_type,
    };
    let status = match patch.status.as_deref() {
        Some(raw) => JobStatus::parse(raw)?.as_str().to_string(),
        None => existing.status,
    };
    let slug = patched_slug(existing.slug, patch.slug)?;
    if let Some(job_slug) = &slug {
        ensure_slug_free(pool, company_id, job_slug, Some(job_id)).await?;
    }

    let updated: JobRow = sqlx::query_as(
        r#"
        UPDATE jobs
        SET title = $1, slug = $2, department = $3, location = $4, job_type = $5,
            description = $6, requirements = $7, salary = $8, status = $9,
            updated_at = now()
        WHERE id = $10
        RETURNING *
        "#,
    )
    .bind(patch.title.unwrap_or(existing.title))
    .bind(&slug)
    .bind(patch.department.or(existing.department))
    .bind(patch.location.unwrap_or(existing.location))
    .bind(&job_type)
    .bind(patch.description.unwrap_or(existing.description))
    .bind(patch.requirements.unwrap_or(existing.requirements))
    .bind(patch.salary.map(sqlx::types::Json).or(existing.salary))
    .bind(&status)
    .bind(job_id)
    .fetch_one(pool)
    .await
    .map_err(|e| on_unique_violation(e, "jobs_company_slug_key", AppError::SlugTaken))?;

    Ok(updated)
}

pub async fn delete(pool: &PgPool, company_id: Uuid, job_id: Uuid) -> Result<(), AppError> {
    let result = sqlx::query("DELETE FROM jobs WHERE id = $1 AND company_id = $2")
        .bind(job_id)
        .bind(company_id)
        .execute(pool)
        .await?;
    if result.rows_affected() == 0 {
        return Err(AppError::NotFound("Job not found".to_string()));
    }
    Ok(())
}

/// Advisory per-company uniqueness check, optionally excluding the posting
/// being updated.
async fn ensure_slug_free(
    pool: &PgPool,
    company_id: Uuid,
    job_slug: &str,
    exclude: Option<Uuid>,
) -> Result<(), AppError> {
    let taken: bool = sqlx::query_scalar(
        r#"
        SELECT EXISTS (
            SELECT 1 FROM jobs
            WHERE company_id = $1 AND slug = $2 AND ($3::uuid IS NULL OR id <> $3)
        )
        "#,
    )
    .bind(company_id)
    .bind(job_slug)
    .bind(exclude)
    .fetch_one(pool)
    .await?;
    if taken {
        return Err(AppError::SlugTaken);
    }
    Ok(())
}

/// Names of required fields that are absent or blank.
fn missing_fields<'a>(fields: &[(&'a str, Option<&str>)]) -> Vec<&'a str> {
    fields
        .iter()
        .filter(|(_, value)| value.map_or(true, |v| v.trim().is_empty()))
        .map(|(name, _)| *name)
        .collect()
}

/// Resolves the slug a patch leaves behind: absent keeps the current value,
/// empty clears it, anything else is normalized.
fn patched_slug(
    current: Option<String>,
    patch: Option<String>,
) -> Result<Option<String>, AppError> {
    match patch {
        None => Ok(current),
        Some(raw) if raw.trim().is_empty() => Ok(None),
        Some(raw) => Ok(Some(slug::normalize(&raw)?)),
    }
}

/// Builds an ILIKE pattern matching `needle` anywhere in the field, with
/// pattern metacharacters escaped so user input matches literally.
fn contains_pattern(needle: &str) -> String {
    let escaped = needle
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{escaped}%")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_request() -> CreateJobRequest {
        CreateJobRequest {
            title: Some("Engineer".to_string()),
            slug: None,
            department: None,
            location: Some("Berlin".to_string()),
            job_type: Some("full-time".to_string()),
            description: Some("Build things".to_string()),
            requirements: vec![],
            salary: None,
            status: None,
        }
    }

    #[test]
    fn test_validate_accepts_minimal_posting() {
        let job = base_request().validate().unwrap();
        assert_eq!(job.title, "Engineer");
        assert_eq!(job.job_type, JobType::FullTime);
        assert_eq!(job.status, JobStatus::Open);
        assert!(job.slug.is_none());
    }

    #[test]
    fn test_validate_lists_all_missing_fields() {
        let req = CreateJobRequest {
            title: None,
            location: Some("  ".to_string()),
            ..base_request()
        };
        match req.validate() {
            Err(AppError::Validation(msg)) => {
                assert!(msg.contains("title"));
                assert!(msg.contains("location"));
            }
            other => panic!("expected Validation, got {other:?}"),
        }
    }

    #[test]
    fn test_validate_normalizes_slug_and_rejects_bad_ones() {
        let req = CreateJobRequest {
            slug: Some("  Senior-Engineer ".to_string()),
            ..base_request()
        };
        assert_eq!(req.validate().unwrap().slug.as_deref(), Some("senior-engineer"));

        let req = CreateJobRequest {
            slug: Some("senior engineer".to_string()),
            ..base_request()
        };
        assert!(matches!(req.validate(), Err(AppError::InvalidSlugFormat)));
    }

    #[test]
    fn test_validate_treats_blank_slug_as_absent() {
        let req = CreateJobRequest {
            slug: Some("   ".to_string()),
            ..base_request()
        };
        assert!(req.validate().unwrap().slug.is_none());
    }

    #[test]
    fn test_validate_rejects_unknown_job_type_and_status() {
        let req = CreateJobRequest {
            job_type: Some("gig".to_string()),
            ..base_request()
        };
        assert!(matches!(req.validate(), Err(AppError::Validation(_))));

        let req = CreateJobRequest {
            status: Some("paused".to_string()),
            ..base_request()
        };
        assert!(matches!(req.validate(), Err(AppError::Validation(_))));
    }

    #[test]
    fn test_patched_slug_semantics() {
        let current = Some("engineer".to_string());
        // absent: keep
        assert_eq!(
            patched_slug(current.clone(), None).unwrap().as_deref(),
            Some("engineer")
        );
        // empty: clear
        assert_eq!(patched_slug(current.clone(), Some("".to_string())).unwrap(), None);
        // present: normalize
        assert_eq!(
            patched_slug(current, Some(" Staff-Engineer ".to_string()))
                .unwrap()
                .as_deref(),
            Some("staff-engineer")
        );
        // malformed: reject
        assert!(matches!(
            patched_slug(None, Some("staff engineer".to_string())),
            Err(AppError::InvalidSlugFormat)
        ));
    }

    #[test]
    fn test_contains_pattern_escapes_metacharacters() {
        assert_eq!(contains_pattern("berlin"), "%berlin%");
        assert_eq!(contains_pattern("100%"), "%100\\%%");
        assert_eq!(contains_pattern("a_b"), "%a\\_b%");
        assert_eq!(contains_pattern("c\\d"), "%c\\\\d%");
    }
}
