use axum::{extract::State, http::StatusCode, Json};
use serde::Deserialize;
use uuid::Uuid;

use models::service::{self as offering, NewService, ServicePatch};
use service::offering_service;

use super::{require_company_id, CompanyScopeQuery};
use crate::errors::JsonApiError;
use crate::extract::{ApiJson, ApiPath, ApiQuery};
use crate::state::AppState;

/// Flat create body: the owning company travels in the payload.
#[derive(Debug, Deserialize)]
pub struct CreateServiceBody {
    pub company_id: Option<Uuid>,
    #[serde(flatten)]
    pub service: NewService,
}

#[utoipa::path(
    get, path = "/api/services", tag = "services",
    params(CompanyScopeQuery),
    responses(
        (status = 200, description = "Services, oldest first", body = [crate::openapi::ServiceDoc]),
        (status = 404, description = "Company Not Found", body = crate::openapi::ErrorResponse)
    )
)]
pub async fn list(
    State(state): State<AppState>,
    ApiQuery(q): ApiQuery<CompanyScopeQuery>,
) -> Result<Json<Vec<offering::Model>>, JsonApiError> {
    Ok(Json(offering_service::list_services(&state.db, q.company_id).await?))
}

#[utoipa::path(
    post, path = "/api/services", tag = "services",
    request_body = crate::openapi::NewServiceDoc,
    responses(
        (status = 201, description = "Created", body = crate::openapi::ServiceDoc),
        (status = 400, description = "Validation Error", body = crate::openapi::ErrorResponse),
        (status = 404, description = "Company Not Found", body = crate::openapi::ErrorResponse)
    )
)]
pub async fn create(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<CreateServiceBody>,
) -> Result<(StatusCode, Json<offering::Model>), JsonApiError> {
    let company_id = require_company_id(body.company_id)?;
    let created = offering_service::create_service(&state.db, company_id, body.service).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(
    get, path = "/api/services/{id}", tag = "services",
    params(("id" = Uuid, Path, description = "Service ID")),
    responses(
        (status = 200, description = "OK", body = crate::openapi::ServiceDoc),
        (status = 404, description = "Not Found", body = crate::openapi::ErrorResponse)
    )
)]
pub async fn get(State(state): State<AppState>, ApiPath(id): ApiPath<Uuid>) -> Result<Json<offering::Model>, JsonApiError> {
    Ok(Json(offering_service::get_service(&state.db, id).await?))
}

#[utoipa::path(
    put, path = "/api/services/{id}", tag = "services",
    params(("id" = Uuid, Path, description = "Service ID")),
    request_body = crate::openapi::ServicePatchDoc,
    responses(
        (status = 200, description = "Updated", body = crate::openapi::ServiceDoc),
        (status = 400, description = "Validation Error", body = crate::openapi::ErrorResponse),
        (status = 404, description = "Not Found", body = crate::openapi::ErrorResponse)
    )
)]
pub async fn update(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
    ApiJson(patch): ApiJson<ServicePatch>,
) -> Result<Json<offering::Model>, JsonApiError> {
    Ok(Json(offering_service::update_service(&state.db, id, patch).await?))
}

#[utoipa::path(
    delete, path = "/api/services/{id}", tag = "services",
    params(("id" = Uuid, Path, description = "Service ID")),
    responses((status = 204, description = "Deleted"), (status = 404, description = "Not Found", body = crate::openapi::ErrorResponse))
)]
pub async fn delete(State(state): State<AppState>, ApiPath(id): ApiPath<Uuid>) -> Result<StatusCode, JsonApiError> {
    offering_service::delete_service(&state.db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}
