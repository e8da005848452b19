use axum::extract::{Path, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::auth::guard::AuthAccount;
use crate::company::sections::{
    self, AppendSectionRequest, ReorderRequest, UpdateSectionRequest,
};
use crate::company::store::{self, UpdateCompanyRequest};
use crate::errors::AppError;
use crate::identity::registry;
use crate::models::account::AccountPublic;
use crate::models::company::CompanyProfile;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct AvailabilityResponse {
    pub available: bool,
}

#[derive(Debug, Deserialize)]
pub struct RenameRequest {
    pub slug: String,
}

#[derive(Debug, Serialize)]
pub struct RenameResponse {
    pub company: CompanyProfile,
    pub account: AccountPublic,
}

/// GET /api/v1/companies/public/:slug
pub async fn handle_get_public(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<CompanyProfile>, AppError> {
    let profile = store::get_public(&state.db, &slug).await?;
    Ok(Json(profile))
}

/// GET /api/v1/companies/check-slug/:slug
pub async fn handle_check_slug(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<AvailabilityResponse>, AppError> {
    let available = registry::check_availability(&state.db, &slug).await?;
    Ok(Json(AvailabilityResponse { available }))
}

/// GET /api/v1/companies/my-company
pub async fn handle_get_own(
    State(state): State<AppState>,
    AuthAccount(account_id): AuthAccount,
) -> Result<Json<CompanyProfile>, AppError> {
    let profile = store::get_owned(&state.db, account_id).await?;
    Ok(Json(profile))
}

/// PUT /api/v1/companies/my-company
pub async fn handle_update(
    State(state): State<AppState>,
    AuthAccount(account_id): AuthAccount,
    Json(patch): Json<UpdateCompanyRequest>,
) -> Result<Json<CompanyProfile>, AppError> {
    let profile = store::update(&state.db, account_id, patch).await?;
    Ok(Json(profile))
}

/// PUT /api/v1/companies/my-company/slug
pub async fn handle_rename(
    State(state): State<AppState>,
    AuthAccount(account_id): AuthAccount,
    Json(req): Json<RenameRequest>,
) -> Result<Json<RenameResponse>, AppError> {
    let company = registry::rename(&state.db, account_id, &req.slug).await?;
    let account = registry::find_account(&state.db, account_id).await?;
    let profile = store::load_profile(&state.db, company).await?;
    Ok(Json(RenameResponse {
        account: AccountPublic {
            id: account.id,
            email: account.email,
            company_slug: profile.slug.clone(),
        },
        company: profile,
    }))
}

/// POST /api/v1/companies/my-company/sections
pub async fn handle_append_section(
    State(state): State<AppState>,
    AuthAccount(account_id): AuthAccount,
    Json(req): Json<AppendSectionRequest>,
) -> Result<Json<CompanyProfile>, AppError> {
    let profile = sections::append(&state.db, account_id, req).await?;
    Ok(Json(profile))
}

/// PUT /api/v1/companies/my-company/sections/:section_id
pub async fn handle_update_section(
    State(state): State<AppState>,
    AuthAccount(account_id): AuthAccount,
    Path(section_id): Path<Uuid>,
    Json(patch): Json<UpdateSectionRequest>,
) -> Result<Json<CompanyProfile>, AppError> {
    let profile = sections::update(&state.db, account_id, section_id, patch).await?;
    Ok(Json(profile))
}

/// DELETE /api/v1/companies/my-company/sections/:section_id
pub async fn handle_delete_section(
    State(state): State<AppState>,
    AuthAccount(account_id): AuthAccount,
    Path(section_id): Path<Uuid>,
) -> Result<Json<CompanyProfile>, AppError> {
    let profile = sections::delete(&state.db, account_id, section_id).await?;
    Ok(Json(profile))
}

/// PUT /api/v1/companies/my-company/sections/reorder
pub async fn handle_reorder_sections(
    State(state): State<AppState>,
    AuthAccount(account_id): AuthAccount,
    Json(req): Json<ReorderRequest>,
) -> Result<Json<CompanyProfile>, AppError> {
    let profile = sections::reorder(&state.db, account_id, req).await?;
    Ok(Json(profile))
}
