use axum::{extract::State, http::StatusCode, Json};
use serde::Deserialize;
use uuid::Uuid;

use models::project::{self, NewProject, ProjectPatch};
use service::project_service;

use super::require_company_id;
use crate::errors::JsonApiError;
use crate::extract::{ApiJson, ApiPath, ApiQuery};
use crate::state::AppState;

#[derive(Debug, Default, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ProjectListQuery {
    pub company_id: Option<Uuid>,
    /// One of planned, in_progress, completed, cancelled, on_hold.
    pub status: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CreateProjectBody {
    pub company_id: Option<Uuid>,
    #[serde(flatten)]
    pub project: NewProject,
}

#[utoipa::path(
    get, path = "/api/projects", tag = "projects",
    params(ProjectListQuery),
    responses(
        (status = 200, description = "Projects, oldest first", body = [crate::openapi::ProjectDoc]),
        (status = 400, description = "Unknown status", body = crate::openapi::ErrorResponse),
        (status = 404, description = "Company Not Found", body = crate::openapi::ErrorResponse)
    )
)]
pub async fn list(
    State(state): State<AppState>,
    ApiQuery(q): ApiQuery<ProjectListQuery>,
) -> Result<Json<Vec<project::Model>>, JsonApiError> {
    Ok(Json(project_service::list_projects(&state.db, q.company_id, q.status.as_deref()).await?))
}

#[utoipa::path(
    post, path = "/api/projects", tag = "projects",
    request_body = crate::openapi::NewProjectDoc,
    responses(
        (status = 201, description = "Created", body = crate::openapi::ProjectDoc),
        (status = 400, description = "Validation Error", body = crate::openapi::ErrorResponse),
        (status = 404, description = "Company Not Found", body = crate::openapi::ErrorResponse)
    )
)]
pub async fn create(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<CreateProjectBody>,
) -> Result<(StatusCode, Json<project::Model>), JsonApiError> {
    let company_id = require_company_id(body.company_id)?;
    let created = project_service::create_project(&state.db, company_id, body.project).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(
    get, path = "/api/projects/{id}", tag = "projects",
    params(("id" = Uuid, Path, description = "Project ID")),
    responses(
        (status = 200, description = "OK", body = crate::openapi::ProjectDoc),
        (status = 404, description = "Not Found", body = crate::openapi::ErrorResponse)
    )
)]
pub async fn get(State(state): State<AppState>, ApiPath(id): ApiPath<Uuid>) -> Result<Json<project::Model>, JsonApiError> {
    Ok(Json(project_service::get_project(&state.db, id).await?))
}

#[utoipa::path(
    put, path = "/api/projects/{id}", tag = "projects",
    params(("id" = Uuid, Path, description = "Project ID")),
    request_body = crate::openapi::ProjectPatchDoc,
    responses(
        (status = 200, description = "Updated", body = crate::openapi::ProjectDoc),
        (status = 400, description = "Validation Error", body = crate::openapi::ErrorResponse),
        (status = 404, description = "Not Found", body = crate::openapi::ErrorResponse)
    )
)]
pub async fn update(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
    ApiJson(patch): ApiJson<ProjectPatch>,
) -> Result<Json<project::Model>, JsonApiError> {
    Ok(Json(project_service::update_project(&state.db, id, patch).await?))
}

#[utoipa::path(
    delete, path = "/api/projects/{id}", tag = "projects",
    params(("id" = Uuid, Path, description = "Project ID")),
    responses((status = 204, description = "Deleted"), (status = 404, description = "Not Found", body = crate::openapi::ErrorResponse))
)]
pub async fn delete(State(state): State<AppState>, ApiPath(id): ApiPath<Uuid>) -> Result<StatusCode, JsonApiError> {
    project_service::delete_project(&state.db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
