use axum::{extract::State, http::StatusCode, Json};
use serde::Deserialize;
use uuid::Uuid;

use models::employee::{self, EmployeePatch, NewEmployee};
use service::employee_service::{self, TransferRequest};

use super::{require_company_id, CompanyScopeQuery};
use crate::errors::JsonApiError;
use crate::extract::{ApiJson, ApiPath, ApiQuery};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateEmployeeBody {
    pub company_id: Option<Uuid>,
    #[serde(flatten)]
    pub employee: NewEmployee,
}

#[utoipa::path(
    get, path = "/api/employees", tag = "employees",
    params(CompanyScopeQuery),
    responses(
        (status = 200, description = "Employees, oldest first", body = [crate::openapi::EmployeeDoc]),
        (status = 404, description = "Company Not Found", body = crate::openapi::ErrorResponse)
    )
)]
pub async fn list(
    State(state): State<AppState>,
    ApiQuery(q): ApiQuery<CompanyScopeQuery>,
) -> Result<Json<Vec<employee::Model>>, JsonApiError> {
    Ok(Json(employee_service::list_employees(&state.db, q.company_id).await?))
}

#[utoipa::path(
    post, path = "/api/employees", tag = "employees",
    request_body = crate::openapi::NewEmployeeDoc,
    responses(
        (status = 201, description = "Created", body = crate::openapi::EmployeeDoc),
        (status = 400, description = "Validation Error", body = crate::openapi::ErrorResponse),
        (status = 404, description = "Company Not Found", body = crate::openapi::ErrorResponse)
    )
)]
pub async fn create(
    State(state): State<AppState>,
    ApiJson(body): ApiJson<CreateEmployeeBody>,
) -> Result<(StatusCode, Json<employee::Model>), JsonApiError> {
    let company_id = require_company_id(body.company_id)?;
    let created = employee_service::create_employee(&state.db, company_id, body.employee).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(
    get, path = "/api/employees/{id}", tag = "employees",
    params(("id" = Uuid, Path, description = "Employee ID")),
    responses(
        (status = 200, description = "OK", body = crate::openapi::EmployeeDoc),
        (status = 404, description = "Not Found", body = crate::openapi::ErrorResponse)
    )
)]
pub async fn get(State(state): State<AppState>, ApiPath(id): ApiPath<Uuid>) -> Result<Json<employee::Model>, JsonApiError> {
    Ok(Json(employee_service::get_employee(&state.db, id).await?))
}

#[utoipa::path(
    put, path = "/api/employees/{id}", tag = "employees",
    params(("id" = Uuid, Path, description = "Employee ID")),
    request_body = crate::openapi::EmployeePatchDoc,
    responses(
        (status = 200, description = "Updated", body = crate::openapi::EmployeeDoc),
        (status = 400, description = "Validation Error", body = crate::openapi::ErrorResponse),
        (status = 404, description = "Not Found", body = crate::openapi::ErrorResponse)
    )
)]
pub async fn update(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
    ApiJson(patch): ApiJson<EmployeePatch>,
) -> Result<Json<employee::Model>, JsonApiError> {
    Ok(Json(employee_service::update_employee(&state.db, id, patch).await?))
}

#[utoipa::path(
    delete, path = "/api/employees/{id}", tag = "employees",
    params(("id" = Uuid, Path, description = "Employee ID")),
    responses((status = 204, description = "Deleted"), (status = 404, description = "Not Found", body = crate::openapi::ErrorResponse))
)]
pub async fn delete(State(state): State<AppState>, ApiPath(id): ApiPath<Uuid>) -> Result<StatusCode, JsonApiError> {
    employee_service::delete_employee(&state.db, id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    post, path = "/api/employees/{id}/transfer", tag = "employees",
    params(("id" = Uuid, Path, description = "Employee ID")),
    request_body = crate::openapi::TransferRequestDoc,
    responses(
        (status = 200, description = "Transferred", body = crate::openapi::EmployeeDoc),
        (status = 400, description = "Source and destination are the same company", body = crate::openapi::ErrorResponse),
        (status = 404, description = "Employee not in source company, or destination missing", body = crate::openapi::ErrorResponse)
    )
)]
pub async fn transfer(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<Uuid>,
    ApiJson(req): ApiJson<TransferRequest>,
) -> Result<Json<employee::Model>, JsonApiError> {
    let moved = employee_service::transfer_employee(&state.db, id, req.from_company_id, req.to_company_id).await?;
    Ok(Json(moved))
}
