pub mod health;

use axum::{
    routing::{get, post, put},
    Router,
};

use crate::auth::handlers as auth;
use crate::company::handlers as companies;
use crate::jobs::handlers as jobs;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Auth
        .route("/api/v1/auth/register", post(auth::handle_register))
        .route("/api/v1/auth/login", post(auth::handle_login))
        // Company profiles
        .route(
            "/api/v1/companies/public/:slug",
            get(companies::handle_get_public),
        )
        .route(
            "/api/v1/companies/check-slug/:slug",
            get(companies::handle_check_slug),
        )
        .route(
            "/api/v1/companies/my-company",
            get(companies::handle_get_own).put(companies::handle_update),
        )
        .route(
            "/api/v1/companies/my-company/slug",
            put(companies::handle_rename),
        )
        .route(
            "/api/v1/companies/my-company/sections",
            post(companies::handle_append_section),
        )
        .route(
            "/api/v1/companies/my-company/sections/reorder",
            put(companies::handle_reorder_sections),
        )
        .route(
            "/api/v1/companies/my-company/sections/:section_id",
            put(companies::handle_update_section).delete(companies::handle_delete_section),
        )
        // Job catalog
        .route(
            "/api/v1/jobs/company/:company_slug",
            get(jobs::handle_list_open),
        )
        .route(
            "/api/v1/jobs/company/:company_slug/:job_slug",
            get(jobs::handle_get_by_slug),
        )
        .route(
            "/api/v1/jobs/my-jobs",
            get(jobs::handle_list_mine).post(jobs::handle_create),
        )
        .route("/api/v1/jobs/check-slug/:slug", get(jobs::handle_check_slug))
        .route(
            "/api/v1/jobs/my-jobs/:job_id",
            put(jobs::handle_update).delete(jobs::handle_delete),
        )
        .with_state(state)
}
