use chrono::Utc;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder};
use tracing::{info, instrument};
use uuid::Uuid;

use models::service::{self, NewService, ServicePatch};
use crate::company_service::ensure_company;
use crate::errors::ServiceError;

/// Add a service to an existing company.
#[instrument(skip(db, input))]
pub async fn create_service(db: &DatabaseConnection, company_id: Uuid, input: NewService) -> Result<service::Model, ServiceError> {
    input.validate()?;
    ensure_company(db, company_id).await?;
    let am = input.into_active_model(Uuid::new_v4(), company_id, Utc::now().into())?;
    let created = am
        .insert(db)
        .await
        .map_err(|e| ServiceError::on_write(e, "company", company_id))?;
    info!(event = "service_created", service_id = %created.id, company_id = %company_id, "service created");
    Ok(created)
}

pub async fn get_service(db: &DatabaseConnection, id: Uuid) -> Result<service::Model, ServiceError> {
    service::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| ServiceError::not_found("service", id))
}

/// All services, or only those of `company_id` when given.
pub async fn list_services(db: &DatabaseConnection, company_id: Option<Uuid>) -> Result<Vec<service::Model>, ServiceError> {
    let mut query = service::Entity::find();
    if let Some(cid) = company_id {
        ensure_company(db, cid).await?;
        query = query.filter(service::Column::CompanyId.eq(cid));
    }
    let rows = query
        .order_by_asc(service::Column::CreatedAt)
        .order_by_asc(service::Column::Id)
        .all(db)
        .await?;
    Ok(rows)
}

#[instrument(skip(db, patch))]
pub async fn update_service(db: &DatabaseConnection, id: Uuid, patch: ServicePatch) -> Result<service::Model, ServiceError> {
    let current = get_service(db, id).await?;
    let updated = patch
        .apply(current, Utc::now().into())?
        .update(db)
        .await
        .map_err(|e| ServiceError::on_write(e, "service", id))?;
    info!(event = "service_updated", service_id = %id, "service updated");
    Ok(updated)
}

#[instrument(skip(db))]
pub async fn delete_service(db: &DatabaseConnection, id: Uuid) -> Result<(), ServiceError> {
    let res = service::Entity::delete_by_id(id).exec(db).await?;
    if res.rows_affected == 0 {
        return Err(ServiceError::not_found("service", id));
    }
    info!(event = "service_deleted", service_id = %id, "service deleted");
    Ok(())
}
