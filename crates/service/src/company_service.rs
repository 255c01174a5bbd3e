use std::collections::BTreeMap;

use chrono::Utc;
use sea_orm::sea_query::{Expr, Func, LikeExpr};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, ModelTrait, PaginatorTrait,
    QueryFilter, QueryOrder,
};
use serde::Serialize;
use tracing::{info, instrument};
use uuid::Uuid;

use models::company::{self, CompanyPatch, NewCompany};
use models::{employee, project, service};
use crate::errors::ServiceError;

/// Optional filters for listing companies.
#[derive(Clone, Debug, Default)]
pub struct CompanyFilter {
    pub is_verified: Option<bool>,
    /// Case-insensitive substring of `company_name`.
    pub name: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ProjectCounts {
    pub total: u64,
    pub by_status: BTreeMap<String, u64>,
}

#[derive(Debug, Serialize)]
pub struct SummaryCounts {
    pub services: u64,
    pub projects: ProjectCounts,
    pub employees: u64,
}

#[derive(Debug, Serialize)]
pub struct CompanySummary {
    pub company: company::Model,
    pub counts: SummaryCounts,
}

/// Create a company.
#[instrument(skip(db, input))]
pub async fn create_company(db: &DatabaseConnection, input: NewCompany) -> Result<company::Model, ServiceError> {
    let am = input.into_active_model(Uuid::new_v4(), Utc::now().into())?;
    let created = am.insert(db).await?;
    info!(event = "company_created", company_id = %created.id, "company created");
    Ok(created)
}

/// Get company by id.
pub async fn get_company(db: &DatabaseConnection, id: Uuid) -> Result<company::Model, ServiceError> {
    company::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| ServiceError::not_found("company", id))
}

/// Fail with `NotFound` unless the company exists.
pub async fn ensure_company(db: &DatabaseConnection, id: Uuid) -> Result<(), ServiceError> {
    let n = company::Entity::find_by_id(id).count(db).await?;
    if n == 0 {
        return Err(ServiceError::not_found("company", id));
    }
    Ok(())
}

fn like_pattern(needle: &str) -> String {
    let escaped = needle
        .to_lowercase()
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{}%", escaped)
}

/// List companies, oldest first.
pub async fn list_companies(db: &DatabaseConnection, filter: CompanyFilter) -> Result<Vec<company::Model>, ServiceError> {
    let mut query = company::Entity::find();
    if let Some(v) = filter.is_verified {
        query = query.filter(company::Column::IsVerified.eq(v));
    }
    if let Some(name) = filter.name.as_deref().map(str::trim).filter(|n| !n.is_empty()) {
        query = query.filter(
            Expr::expr(Func::lower(Expr::col(company::Column::CompanyName)))
                .like(LikeExpr::new(like_pattern(name)).escape('\\')),
        );
    }
    let rows = query
        .order_by_asc(company::Column::CreatedAt)
        .order_by_asc(company::Column::Id)
        .all(db)
        .await?;
    Ok(rows)
}

/// Merge supplied fields into the company.
#[instrument(skip(db, patch))]
pub async fn update_company(db: &DatabaseConnection, id: Uuid, patch: CompanyPatch) -> Result<company::Model, ServiceError> {
    let current = get_company(db, id).await?;
    let am = patch.apply(current, Utc::now().into())?;
    let updated = am
        .update(db)
        .await
        .map_err(|e| ServiceError::on_write(e, "company", id))?;
    info!(event = "company_updated", company_id = %id, "company updated");
    Ok(updated)
}

/// Hard delete. Services, projects and employees go with it (FK cascade).
#[instrument(skip(db))]
pub async fn delete_company(db: &DatabaseConnection, id: Uuid) -> Result<(), ServiceError> {
    let res = company::Entity::delete_by_id(id).exec(db).await?;
    if res.rows_affected == 0 {
        return Err(ServiceError::not_found("company", id));
    }
    info!(event = "company_deleted", company_id = %id, "company deleted with dependents");
    Ok(())
}

/// Company record plus counts of its dependents.
pub async fn company_summary(db: &DatabaseConnection, id: Uuid) -> Result<CompanySummary, ServiceError> {
    let company = get_company(db, id).await?;
    let services = company.find_related(service::Entity).count(db).await?;
    let employees = company.find_related(employee::Entity).count(db).await?;
    let projects = company.find_related(project::Entity).all(db).await?;

    let mut by_status = BTreeMap::new();
    for p in &projects {
        *by_status.entry(p.status.clone()).or_insert(0u64) += 1;
    }

    Ok(CompanySummary {
        counts: SummaryCounts {
            services,
            projects: ProjectCounts { total: projects.len() as u64, by_status },
            employees,
        },
        company,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{get_db, tick};
    use crate::{employee_service, offering_service, project_service};
    use models::errors::ModelError;
    use models::project::NewProject;
    use models::service::NewService;
    use models::employee::NewEmployee;

    #[tokio::test]
    async fn company_crud_service() -> Result<(), anyhow::Error> {
        let db = get_db().await?;

        let input = NewCompany {
            company_email: Some("contact@osconstructionfree.example.org".into()),
            founded_year: Some(2020),
            is_verified: true,
            ..NewCompany::named("OSConstruction Free Services")
        };
        let c = create_company(&db, input).await?;
        assert_eq!(c.company_name, "OSConstruction Free Services");
        assert_eq!(c.created_at, c.updated_at);

        let found = get_company(&db, c.id).await?;
        assert_eq!(found, c);

        tick().await;
        let patch = CompanyPatch { website: Some("https://osc.example.org".into()), ..Default::default() };
        let updated = update_company(&db, c.id, patch).await?;
        assert_eq!(updated.website.as_deref(), Some("https://osc.example.org"));
        assert_eq!(updated.company_name, c.company_name);
        assert_eq!(updated.company_email, c.company_email);
        assert_eq!(updated.founded_year, c.founded_year);
        assert_eq!(updated.is_verified, c.is_verified);
        assert_eq!(updated.created_at, c.created_at);
        assert!(updated.updated_at > c.updated_at);

        delete_company(&db, c.id).await?;
        let after = get_company(&db, c.id).await;
        assert!(matches!(after, Err(ServiceError::NotFound(_))));
        Ok(())
    }

    #[tokio::test]
    async fn missing_name_is_a_validation_error() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let err = create_company(&db, NewCompany::default()).await.unwrap_err();
        assert!(matches!(err, ServiceError::Model(ModelError::Validation(_))));
        assert!(list_companies(&db, CompanyFilter::default()).await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn unknown_ids_are_not_found() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let id = Uuid::new_v4();
        assert!(matches!(get_company(&db, id).await, Err(ServiceError::NotFound(_))));
        assert!(matches!(delete_company(&db, id).await, Err(ServiceError::NotFound(_))));
        assert!(matches!(
            update_company(&db, id, CompanyPatch::default()).await,
            Err(ServiceError::NotFound(_))
        ));
        Ok(())
    }

    #[tokio::test]
    async fn list_is_ordered_by_creation_and_filterable() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let a = create_company(&db, NewCompany::named("Alpha Builders")).await?;
        tick().await;
        let b = create_company(&db, NewCompany { is_verified: true, ..NewCompany::named("Beta Roofing") }).await?;
        tick().await;
        let c = create_company(&db, NewCompany::named("Gamma 100% Builders")).await?;

        let all = list_companies(&db, CompanyFilter::default()).await?;
        assert_eq!(all.iter().map(|m| m.id).collect::<Vec<_>>(), vec![a.id, b.id, c.id]);

        let verified = list_companies(&db, CompanyFilter { is_verified: Some(true), ..Default::default() }).await?;
        assert_eq!(verified.len(), 1);
        assert_eq!(verified[0].id, b.id);

        let builders = list_companies(&db, CompanyFilter { name: Some("BUILDERS".into()), ..Default::default() }).await?;
        assert_eq!(builders.iter().map(|m| m.id).collect::<Vec<_>>(), vec![a.id, c.id]);

        let percent = list_companies(&db, CompanyFilter { name: Some("100%".into()), ..Default::default() }).await?;
        assert_eq!(percent.len(), 1);
        assert_eq!(percent[0].id, c.id);
        Ok(())
    }

    #[tokio::test]
    async fn delete_cascades_to_dependents() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let c = create_company(&db, NewCompany::named("Build Better Communities")).await?;
        let s = offering_service::create_service(&db, c.id, NewService::named("Home Repairs for Seniors")).await?;
        let p = project_service::create_project(&db, c.id, NewProject::named("Ramp Installs")).await?;
        let e = employee_service::create_employee(&db, c.id, NewEmployee::named("Dana Reyes")).await?;

        delete_company(&db, c.id).await?;

        assert!(matches!(offering_service::get_service(&db, s.id).await, Err(ServiceError::NotFound(_))));
        assert!(matches!(project_service::get_project(&db, p.id).await, Err(ServiceError::NotFound(_))));
        assert!(matches!(employee_service::get_employee(&db, e.id).await, Err(ServiceError::NotFound(_))));
        assert!(offering_service::list_services(&db, None).await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn summary_counts_dependents() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let c = create_company(&db, NewCompany::named("Summary Co")).await?;
        let other = create_company(&db, NewCompany::named("Other Co")).await?;
        offering_service::create_service(&db, c.id, NewService::named("Disaster Recovery")).await?;
        offering_service::create_service(&db, other.id, NewService::named("Not counted")).await?;
        project_service::create_project(&db, c.id, NewProject::named("A")).await?;
        project_service::create_project(&db, c.id, NewProject { status: Some("completed".into()), ..NewProject::named("B") }).await?;
        project_service::create_project(&db, c.id, NewProject { status: Some("completed".into()), ..NewProject::named("C") }).await?;
        employee_service::create_employee(&db, c.id, NewEmployee::named("Sam")).await?;

        let summary = company_summary(&db, c.id).await?;
        assert_eq!(summary.company.id, c.id);
        assert_eq!(summary.counts.services, 1);
        assert_eq!(summary.counts.employees, 1);
        assert_eq!(summary.counts.projects.total, 3);
        assert_eq!(summary.counts.projects.by_status.get("planned"), Some(&1));
        assert_eq!(summary.counts.projects.by_status.get("completed"), Some(&2));
        Ok(())
    }

    fn ok_or_not_found<T>(res: &Result<T, ServiceError>) -> bool {
        matches!(res, Ok(_) | Err(ServiceError::NotFound(_)))
    }

    #[tokio::test]
    async fn writes_racing_a_company_delete_are_not_found() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        for i in 0..10 {
            let c = create_company(&db, NewCompany::named(&format!("Racer {i}"))).await?;
            let (created, deleted) = tokio::join!(
                offering_service::create_service(&db, c.id, NewService::named("Home Repairs")),
                delete_company(&db, c.id),
            );
            assert!(ok_or_not_found(&created), "create: {created:?}");
            deleted?;

            let c = create_company(&db, NewCompany::named(&format!("Racer {i}b"))).await?;
            let patch = CompanyPatch { website: Some("https://racer.example.org".into()), ..Default::default() };
            let (updated, deleted) = tokio::join!(update_company(&db, c.id, patch), delete_company(&db, c.id));
            assert!(ok_or_not_found(&updated), "update: {updated:?}");
            deleted?;
        }
        assert!(offering_service::list_services(&db, None).await?.is_empty());
        Ok(())
    }

    #[test]
    fn vanished_rows_map_to_not_found() {
        let id = Uuid::new_v4();
        let err = ServiceError::on_write(sea_orm::DbErr::RecordNotUpdated, "company", id);
        assert!(matches!(err, ServiceError::NotFound(m) if m.contains(&id.to_string())));
        assert!(matches!(ServiceError::from(sea_orm::DbErr::RecordNotUpdated), ServiceError::NotFound(_)));
        let other = ServiceError::on_write(sea_orm::DbErr::Custom("boom".into()), "company", id);
        assert!(matches!(other, ServiceError::Db(_)));
    }
}
