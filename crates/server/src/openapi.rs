use std::collections::HashMap;

use utoipa::OpenApi;
use utoipa::ToSchema;
use uuid::Uuid;

// Documentation-only mirrors of the request/response payloads.

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

#[derive(ToSchema)]
pub struct ErrorResponse { pub error: String }

#[derive(ToSchema)]
pub struct CompanyDoc {
    pub id: Uuid,
    pub company_name: String,
    pub company_address: Option<String>,
    pub company_email: Option<String>,
    pub company_phone: Option<String>,
    pub website: Option<String>,
    pub description: Option<String>,
    pub founded_year: Option<i32>,
    pub is_verified: bool,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(ToSchema)]
pub struct NewCompanyDoc {
    pub company_name: String,
    pub company_address: Option<String>,
    pub company_email: Option<String>,
    pub company_phone: Option<String>,
    pub website: Option<String>,
    pub description: Option<String>,
    pub founded_year: Option<i32>,
    pub is_verified: Option<bool>,
}

#[derive(ToSchema)]
pub struct CompanyPatchDoc {
    pub company_name: Option<String>,
    pub company_address: Option<String>,
    pub company_email: Option<String>,
    pub company_phone: Option<String>,
    pub website: Option<String>,
    pub description: Option<String>,
    pub founded_year: Option<i32>,
    pub is_verified: Option<bool>,
}

#[derive(ToSchema)]
pub struct ServiceDoc {
    pub id: Uuid,
    pub company_id: Uuid,
    pub service_name: String,
    pub description: Option<String>,
    pub is_free: bool,
    pub eligibility_criteria: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

/// `company_id` is only read by the flat `POST /api/services`.
#[derive(ToSchema)]
pub struct NewServiceDoc {
    pub company_id: Option<Uuid>,
    pub service_name: String,
    pub description: Option<String>,
    pub is_free: Option<bool>,
    pub eligibility_criteria: Option<String>,
}

#[derive(ToSchema)]
pub struct ServicePatchDoc {
    pub service_name: Option<String>,
    pub description: Option<String>,
    pub is_free: Option<bool>,
    pub eligibility_criteria: Option<String>,
}

#[derive(ToSchema)]
pub struct ProjectDoc {
    pub id: Uuid,
    pub company_id: Uuid,
    pub project_name: String,
    pub location: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub status: String,
    pub description: Option<String>,
    pub beneficiary_info: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(ToSchema)]
pub struct NewProjectDoc {
    pub company_id: Option<Uuid>,
    pub project_name: String,
    pub location: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub status: Option<String>,
    pub description: Option<String>,
    pub beneficiary_info: Option<String>,
}

#[derive(ToSchema)]
pub struct ProjectPatchDoc {
    pub project_name: Option<String>,
    pub location: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub status: Option<String>,
    pub description: Option<String>,
    pub beneficiary_info: Option<String>,
}

#[derive(ToSchema)]
pub struct EmployeeDoc {
    pub id: Uuid,
    pub company_id: Uuid,
    pub full_name: String,
    pub position: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub specialization: Option<String>,
    pub join_date: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(ToSchema)]
pub struct NewEmployeeDoc {
    pub company_id: Option<Uuid>,
    pub full_name: String,
    pub position: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub specialization: Option<String>,
    pub join_date: Option<String>,
}

#[derive(ToSchema)]
pub struct EmployeePatchDoc {
    pub full_name: Option<String>,
    pub position: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub specialization: Option<String>,
    pub join_date: Option<String>,
}

#[derive(ToSchema)]
pub struct ProjectCountsDoc {
    pub total: u64,
    /// Project count keyed by status.
    pub by_status: HashMap<String, u64>,
}

#[derive(ToSchema)]
pub struct SummaryCountsDoc {
    pub services: u64,
    pub projects: ProjectCountsDoc,
    pub employees: u64,
}

#[derive(ToSchema)]
pub struct CompanySummaryDoc {
    pub company: CompanyDoc,
    pub counts: SummaryCountsDoc,
}

#[derive(ToSchema)]
pub struct TransferRequestDoc {
    pub from_company_id: Uuid,
    pub to_company_id: Uuid,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health::health,
        crate::routes::health::db_health,
        crate::routes::companies::list,
        crate::routes::companies::create,
        crate::routes::companies::get,
        crate::routes::companies::update,
        crate::routes::companies::delete,
        crate::routes::companies::summary,
        crate::routes::companies::list_services,
        crate::routes::companies::add_service,
        crate::routes::companies::list_projects,
        crate::routes::companies::add_project,
        crate::routes::companies::list_employees,
        crate::routes::companies::add_employee,
        crate::routes::services::list,
        crate::routes::services::create,
        crate::routes::services::get,
        crate::routes::services::update,
        crate::routes::services::delete,
        crate::routes::projects::list,
        crate::routes::projects::create,
        crate::routes::projects::get,
        crate::routes::projects::update,
        crate::routes::projects::delete,
        crate::routes::employees::list,
        crate::routes::employees::create,
        crate::routes::employees::get,
        crate::routes::employees::update,
        crate::routes::employees::delete,
        crate::routes::employees::transfer,
    ),
    components(
        schemas(
            HealthResponse,
            ErrorResponse,
            CompanyDoc,
            NewCompanyDoc,
            CompanyPatchDoc,
            ServiceDoc,
            NewServiceDoc,
            ServicePatchDoc,
            ProjectDoc,
            NewProjectDoc,
            ProjectPatchDoc,
            EmployeeDoc,
            NewEmployeeDoc,
            EmployeePatchDoc,
            ProjectCountsDoc,
            SummaryCountsDoc,
            CompanySummaryDoc,
            TransferRequestDoc,
        )
    ),
    tags(
        (name = "health"),
        (name = "companies"),
        (name = "services"),
        (name = "projects"),
        (name = "employees")
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    fn response_ref(doc: &serde_json::Value, path: &str, method: &str, status: &str) -> String {
        doc["paths"][path][method]["responses"][status]["content"]["application/json"]["schema"]["$ref"]
            .as_str()
            .unwrap_or_default()
            .to_string()
    }

    #[test]
    fn error_and_summary_bodies_are_documented() -> anyhow::Result<()> {
        let doc = serde_json::to_value(ApiDoc::openapi())?;
        assert_eq!(
            response_ref(&doc, "/api/companies/{id}/summary", "get", "200"),
            "#/components/schemas/CompanySummaryDoc"
        );
        assert_eq!(
            response_ref(&doc, "/api/companies/{id}/summary", "get", "404"),
            "#/components/schemas/ErrorResponse"
        );
        assert_eq!(
            response_ref(&doc, "/api/employees", "post", "400"),
            "#/components/schemas/ErrorResponse"
        );
        assert!(doc["components"]["schemas"]["SummaryCountsDoc"].is_object());
        Ok(())
    }
}
