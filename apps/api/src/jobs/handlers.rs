use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;
use uuid::Uuid;

use crate::auth::guard::AuthAccount;
use crate::company::store;
use crate::errors::AppError;
use crate::jobs::catalog::{self, CreateJobRequest, JobFilters, UpdateJobRequest};
use crate::models::job::JobRow;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct AvailabilityResponse {
    pub available: bool,
}

/// GET /api/v1/jobs/company/:slug
pub async fn handle_list_open(
    State(state): State<AppState>,
    Path(company_slug): Path<String>,
    Query(filters): Query<JobFilters>,
) -> Result<Json<Vec<JobRow>>, AppError> {
    let company = store::find_by_slug(&state.db, &company_slug).await?;
    let jobs = catalog::list_open(&state.db, company.id, &filters).await?;
    Ok(Json(jobs))
}

/// GET /api/v1/jobs/company/:company_slug/:job_slug
pub async fn handle_get_by_slug(
    State(state): State<AppState>,
    Path((company_slug, job_slug)): Path<(String, String)>,
) -> Result<Json<JobRow>, AppError> {
    let company = store::find_by_slug(&state.db, &company_slug).await?;
    let job = catalog::get_open_by_slug(&state.db, company.id, &job_slug).await?;
    Ok(Json(job))
}

/// GET /api/v1/jobs/my-jobs
pub async fn handle_list_mine(
    State(state): State<AppState>,
    AuthAccount(account_id): AuthAccount,
) -> Result<Json<Vec<JobRow>>, AppError> {
    let company = store::find_by_owner(&state.db, account_id).await?;
    let jobs = catalog::list_all(&state.db, company.id).await?;
    Ok(Json(jobs))
}

/// GET /api/v1/jobs/check-slug/:slug
pub async fn handle_check_slug(
    State(state): State<AppState>,
    AuthAccount(account_id): AuthAccount,
    Path(slug): Path<String>,
) -> Result<Json<AvailabilityResponse>, AppError> {
    let company = store::find_by_owner(&state.db, account_id).await?;
    let available = catalog::check_slug_available(&state.db, company.id, &slug).await?;
    Ok(Json(AvailabilityResponse { available }))
}

/// POST /api/v1/jobs/my-jobs
pub async fn handle_create(
    State(state): State<AppState>,
    AuthAccount(account_id): AuthAccount,
    Json(req): Json<CreateJobRequest>,
) -> Result<(StatusCode, Json<JobRow>), AppError> {
    let company = store::find_by_owner(&state.db, account_id).await?;
    let job = catalog::create(&state.db, company.id, req).await?;
    Ok((StatusCode::CREATED, Json(job)))
}

/// PUT /api/v1/jobs/my-jobs/:job_id
pub async fn handle_update(
    State(state): State<AppState>,
    AuthAccount(account_id): AuthAccount,
    Path(job_id): Path<Uuid>,
    Json(patch): Json<UpdateJobRequest>,
) -> Result<Json<JobRow>, AppError> {
    let company = store::find_by_owner(&state.db, account_id).await?;
    let job = catalog::update(&state.db, company.id, job_id, patch).await?;
    Ok(Json(job))
}

/// DELETE /api/v1/jobs/my-jobs/:job_id
pub async fn handle_delete(
    State(state): State<AppState>,
    AuthAccount(account_id): AuthAccount,
    Path(job_id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    let company = store::find_by_owner(&state.db, account_id).await?;
    catalog::delete(&state.db, company.id, job_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
