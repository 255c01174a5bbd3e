use chrono::Utc;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder};
use tracing::{info, instrument};
use uuid::Uuid;

use models::project::{self, NewProject, ProjectPatch, ProjectStatus};
use crate::company_service::ensure_company;
use crate::errors::ServiceError;

/// Add a project to an existing company. Status defaults to `planned`.
#[instrument(skip(db, input))]
pub async fn create_project(db: &DatabaseConnection, company_id: Uuid, input: NewProject) -> Result<project::Model, ServiceError> {
    input.validate()?;
    ensure_company(db, company_id).await?;
    let am = input.into_active_model(Uuid::new_v4(), company_id, Utc::now().into())?;
    let created = am
        .insert(db)
        .await
        .map_err(|e| ServiceError::on_write(e, "company", company_id))?;
    info!(
        event = "project_created",
        project_id = %created.id,
        company_id = %company_id,
        status = %created.status,
        "project created"
    );
    Ok(created)
}

pub async fn get_project(db: &DatabaseConnection, id: Uuid) -> Result<project::Model, ServiceError> {
    project::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| ServiceError::not_found("project", id))
}

/// Projects ordered by creation, optionally scoped to a company and a status.
pub async fn list_projects(
    db: &DatabaseConnection,
    company_id: Option<Uuid>,
    status: Option<&str>,
) -> Result<Vec<project::Model>, ServiceError> {
    let mut query = project::Entity::find();
    if let Some(s) = status {
        let parsed: ProjectStatus = s.parse()?;
        query = query.filter(project::Column::Status.eq(parsed.as_str()));
    }
    if let Some(cid) = company_id {
        ensure_company(db, cid).await?;
        query = query.filter(project::Column::CompanyId.eq(cid));
    }
    let rows = query
        .order_by_asc(project::Column::CreatedAt)
        .order_by_asc(project::Column::Id)
        .all(db)
        .await?;
    Ok(rows)
}

#[instrument(skip(db, patch))]
pub async fn update_project(db: &DatabaseConnection, id: Uuid, patch: ProjectPatch) -> Result<project::Model, ServiceError> {
    let current = get_project(db, id).await?;
    let updated = patch
        .apply(current, Utc::now().into())?
        .update(db)
        .await
        .map_err(|e| ServiceError::on_write(e, "project", id))?;
    info!(event = "project_updated", project_id = %id, status = %updated.status, "project updated");
    Ok(updated)
}

#[instrument(skip(db))]
pub async fn delete_project(db: &DatabaseConnection, id: Uuid) -> Result<(), ServiceError> {
    let res = project::Entity::delete_by_id(id).exec(db).await?;
    if res.rows_affected == 0 {
        return Err(ServiceError::not_found("project", id));
    }
    info!(event = "project_deleted", project_id = %id, "project deleted");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::company_service::create_company;
    use crate::test_support::{get_db, tick};
    use chrono::NaiveDate;
    use models::company::NewCompany;
    use models::errors::ModelError;

    fn date(y: i32, m: u32, d: u32) -> chrono::NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[tokio::test]
    async fn project_lifecycle() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let c = create_company(&db, NewCompany::named("Build Better Communities")).await?;
        let p = create_project(
            &db,
            c.id,
            NewProject {
                location: Some("Springfield".into()),
                start_date: Some(date(2025, 4, 15)),
                end_date: Some(date(2025, 6, 30)),
                beneficiary_info: Some("Residents of the east district".into()),
                ..NewProject::named("Community Center Renovation")
            },
        )
        .await?;
        assert_eq!(p.status, "planned");
        assert_eq!(get_project(&db, p.id).await?, p);

        tick().await;
        let patch = ProjectPatch { status: Some("in-progress".into()), ..Default::default() };
        let updated = update_project(&db, p.id, patch).await?;
        assert_eq!(updated.status, "in_progress");
        assert_eq!(updated.start_date, p.start_date);
        assert_eq!(updated.location, p.location);
        assert!(updated.updated_at > p.updated_at);

        delete_project(&db, p.id).await?;
        assert!(matches!(get_project(&db, p.id).await, Err(ServiceError::NotFound(_))));
        Ok(())
    }

    #[tokio::test]
    async fn invalid_dates_and_status_are_rejected() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let c = create_company(&db, NewCompany::named("C")).await?;
        let backwards = NewProject {
            start_date: Some(date(2025, 6, 30)),
            end_date: Some(date(2025, 4, 15)),
            ..NewProject::named("Backwards")
        };
        assert!(matches!(
            create_project(&db, c.id, backwards).await,
            Err(ServiceError::Model(ModelError::Validation(_)))
        ));

        let p = create_project(&db, c.id, NewProject { start_date: Some(date(2025, 4, 15)), ..NewProject::named("P") }).await?;
        let patch = ProjectPatch { end_date: Some(date(2025, 1, 1)), ..Default::default() };
        assert!(matches!(update_project(&db, p.id, patch).await, Err(ServiceError::Model(_))));

        let patch = ProjectPatch { status: Some("finished".into()), ..Default::default() };
        assert!(matches!(update_project(&db, p.id, patch).await, Err(ServiceError::Model(_))));

        // stored row unchanged
        assert_eq!(get_project(&db, p.id).await?, p);
        Ok(())
    }

    #[tokio::test]
    async fn list_filters_by_company_and_status() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let a = create_company(&db, NewCompany::named("A")).await?;
        let b = create_company(&db, NewCompany::named("B")).await?;
        let p1 = create_project(&db, a.id, NewProject::named("One")).await?;
        tick().await;
        let p2 = create_project(&db, a.id, NewProject { status: Some("completed".into()), ..NewProject::named("Two") }).await?;
        create_project(&db, b.id, NewProject { status: Some("completed".into()), ..NewProject::named("Three") }).await?;

        let for_a = list_projects(&db, Some(a.id), None).await?;
        assert_eq!(for_a.iter().map(|p| p.id).collect::<Vec<_>>(), vec![p1.id, p2.id]);

        let done_a = list_projects(&db, Some(a.id), Some("completed")).await?;
        assert_eq!(done_a.len(), 1);
        assert_eq!(done_a[0].id, p2.id);

        assert_eq!(list_projects(&db, None, Some("completed")).await?.len(), 2);
        assert!(matches!(list_projects(&db, None, Some("done")).await, Err(ServiceError::Model(_))));
        assert!(matches!(
            list_projects(&db, Some(Uuid::new_v4()), None).await,
            Err(ServiceError::NotFound(_))
        ));
        Ok(())
    }
}
