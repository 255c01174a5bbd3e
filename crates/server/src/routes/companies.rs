use axum::{extract::State, http::StatusCode, Json};
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;

use models::company::{self, CompanyPatch, NewCompany};
use models::employee::{self, NewEmployee};
use models::project::{self, NewProject};
use models::service::{self as offering, NewService};
use service::company_service::{self, CompanyFilter, CompanySummary};
use service::{employee_service, offering_service, project_service};

use crate::errors::JsonApiError;
use crate::extract::{ApiJson, ApiPath, ApiQuery};
use crate::state::AppState;

#[derive(Debug, Default, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct CompanyListQuery {
    /// Only verified (`true`) or unverified (`false`) companies.
    pub is_verified: Option<bool>,
    /// Case-insensitive substring of the company name.
    pub name: Option<String>,
}

#[derive(Debug, Default, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct StatusQuery {
    pub status: Option<String>,
}

#[utoipa::path(
    get, path = "/api/companies", tag = "companies",
    params(CompanyListQuery),
    responses((status = 200, description = "Companies, oldest first", body = [crate::openapi::CompanyDoc]))
)]
pub async fn list(
    State(state): State<AppState>,
    ApiQuery(q): ApiQuery<CompanyListQuery>,
) -> Result<Json<Vec<company::Model>>, JsonApiError> {
    let filter = CompanyFilter { is_verified: q.is_verified, name: q.name };
    let rows = company_service::list_companies(&state.db, filter).await?;
    Ok(Json(rows))
}

#[utoipa::path(
    post, path = "/api/companies", tag = "companies",
    request_body = crate::openapi::NewCompanyDoc,
    responses(
        (status = 201, description = "Created", body = crate::openapi::CompanyDoc),
        (status = 400, description = "Validation Error", body = crate::openapi::ErrorResponse)
    )
)]
pub async fn create(
    State(state): State<AppState>,
    ApiJson(input): ApiJson<NewCompany>,
) -> Result<(StatusCode, Json<company::Model>), JsonApiError> {
    let created = company_service::create_company(&state.db, input).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(
    get, path = "/api/companies/{id}", tag = "companies",
    params(("id" = Uuid, Path, description = "Company ID")),
    responses(
        (status = 200, description = "OK", body = crate::openapi::CompanyDoc),
        (status = 400, description = "Malformed id", body = crate::openapi::ErrorResponse),
        (status = 404, description = "Not Found", body = crate::openapi::ErrorResponse)
    )
)]
pub async fn get(State(state): State<AppState>, ApiPath(id): ApiPath<Uuid>) -> Result<Json<company::Model>, JsonApiError> {
    Ok(Json(company_service::get_company(&state.db, id).await?))
}

#[utoipa::path(
    put, path = "/api/companies/{id}", tag = "companies",
    params(("id" = Uuid, Path, description = "Company ID")),
    request_body = crate::openapi::CompanyPatchDoc,
    responses(
        (status = 200, description = "Updated", body = crate::openapi::CompanyDoc),
        (status = 400, description = "Validation Error", body = crate::openapi::ErrorResponse),
        (status = 404, description = "Not Found", body = crate::openapi::ErrorResponse)
    )
)]
pub async fn update(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
    ApiJson(patch): ApiJson<CompanyPatch>,
) -> Result<Json<company::Model>, JsonApiError> {
    Ok(Json(company_service::update_company(&state.db, id, patch).await?))
}

#[utoipa::path(
    delete, path = "/api/companies/{id}", tag = "companies",
    params(("id" = Uuid, Path, description = "Company ID")),
    responses(
        (status = 204, description = "Deleted together with its services, projects and employees"),
        (status = 404, description = "Not Found", body = crate::openapi::ErrorResponse)
    )
)]
pub async fn delete(State(state): State<AppState>, ApiPath(id): ApiPath<Uuid>) -> Result<StatusCode, JsonApiError> {
    company_service::delete_company(&state.db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    get, path = "/api/companies/{id}/summary", tag = "companies",
    params(("id" = Uuid, Path, description = "Company ID")),
    responses(
        (status = 200, description = "Company with dependent counts", body = crate::openapi::CompanySummaryDoc),
        (status = 404, description = "Not Found", body = crate::openapi::ErrorResponse)
    )
)]
pub async fn summary(State(state): State<AppState>, ApiPath(id): ApiPath<Uuid>) -> Result<Json<CompanySummary>, JsonApiError> {
    Ok(Json(company_service::company_summary(&state.db, id).await?))
}

// Nested child collections: /api/companies/{id}/<children>

#[utoipa::path(
    get, path = "/api/companies/{id}/services", tag = "companies",
    params(("id" = Uuid, Path, description = "Company ID")),
    responses(
        (status = 200, description = "Services of the company", body = [crate::openapi::ServiceDoc]),
        (status = 404, description = "Company Not Found", body = crate::openapi::ErrorResponse)
    )
)]
pub async fn list_services(State(state): State<AppState>, ApiPath(id): ApiPath<Uuid>) -> Result<Json<Vec<offering::Model>>, JsonApiError> {
    Ok(Json(offering_service::list_services(&state.db, Some(id)).await?))
}

#[utoipa::path(
    post, path = "/api/companies/{id}/services", tag = "companies",
    params(("id" = Uuid, Path, description = "Company ID")),
    request_body = crate::openapi::NewServiceDoc,
    responses(
        (status = 201, description = "Created", body = crate::openapi::ServiceDoc),
        (status = 400, description = "Validation Error", body = crate::openapi::ErrorResponse),
        (status = 404, description = "Company Not Found", body = crate::openapi::ErrorResponse)
    )
)]
pub async fn add_service(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
    ApiJson(input): ApiJson<NewService>,
) -> Result<(StatusCode, Json<offering::Model>), JsonApiError> {
    let created = offering_service::create_service(&state.db, id, input).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(
    get, path = "/api/companies/{id}/projects", tag = "companies",
    params(("id" = Uuid, Path, description = "Company ID"), StatusQuery),
    responses(
        (status = 200, description = "Projects of the company", body = [crate::openapi::ProjectDoc]),
        (status = 400, description = "Unknown status", body = crate::openapi::ErrorResponse),
        (status = 404, description = "Company Not Found", body = crate::openapi::ErrorResponse)
    )
)]
pub async fn list_projects(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
    ApiQuery(q): ApiQuery<StatusQuery>,
) -> Result<Json<Vec<project::Model>>, JsonApiError> {
    Ok(Json(project_service::list_projects(&state.db, Some(id), q.status.as_deref()).await?))
}

#[utoipa::path(
    post, path = "/api/companies/{id}/projects", tag = "companies",
    params(("id" = Uuid, Path, description = "Company ID")),
    request_body = crate::openapi::NewProjectDoc,
    responses(
        (status = 201, description = "Created", body = crate::openapi::ProjectDoc),
        (status = 400, description = "Validation Error", body = crate::openapi::ErrorResponse),
        (status = 404, description = "Company Not Found", body = crate::openapi::ErrorResponse)
    )
)]
pub async fn add_project(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
    ApiJson(input): ApiJson<NewProject>,
) -> Result<(StatusCode, Json<project::Model>), JsonApiError> {
    let created = project_service::create_project(&state.db, id, input).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(
    get, path = "/api/companies/{id}/employees", tag = "companies",
    params(("id" = Uuid, Path, description = "Company ID")),
    responses(
        (status = 200, description = "Employees of the company", body = [crate::openapi::EmployeeDoc]),
        (status = 404, description = "Company Not Found", body = crate::openapi::ErrorResponse)
    )
)]
pub async fn list_employees(State(state): State<AppState>, ApiPath(id): ApiPath<Uuid>) -> Result<Json<Vec<employee::Model>>, JsonApiError> {
    Ok(Json(employee_service::list_employees(&state.db, Some(id)).await?))
}

#[utoipa::path(
    post, path = "/api/companies/{id}/employees", tag = "companies",
    params(("id" = Uuid, Path, description = "Company ID")),
    request_body = crate::openapi::NewEmployeeDoc,
    responses(
        (status = 201, description = "Created", body = crate::openapi::EmployeeDoc),
        (status = 400, description = "Validation Error", body = crate::openapi::ErrorResponse),
        (status = 404, description = "Company Not Found", body = crate::openapi::ErrorResponse)
    )
)]
pub async fn add_employee(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
    ApiJson(input): ApiJson<NewEmployee>,
) -> Result<(StatusCode, Json<employee::Model>), JsonApiError> {
    let created = employee_service::create_employee(&state.db, id, input).await?;
    info!(company_id = %id, employee_id = %created.id, "employee added to company");
    Ok((StatusCode::CREATED, Json(created)))
}
