use chrono::Utc;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder, Set};
use serde::Deserialize;
use tracing::{info, instrument, warn};
use uuid::Uuid;

use models::employee::{self, EmployeePatch, NewEmployee};
use crate::company_service::ensure_company;
use crate::errors::ServiceError;

/// Request to move an employee from one company to another.
#[derive(Clone, Debug, Deserialize)]
pub struct TransferRequest {
    pub from_company_id: Uuid,
    pub to_company_id: Uuid,
}

#[instrument(skip(db, input))]
pub async fn create_employee(db: &DatabaseConnection, company_id: Uuid, input: NewEmployee) -> Result<employee::Model, ServiceError> {
    input.validate()?;
    ensure_company(db, company_id).await?;
    let am = input.into_active_model(Uuid::new_v4(), company_id, Utc::now().into())?;
    let created = am
        .insert(db)
        .await
        .map_err(|e| ServiceError::on_write(e, "company", company_id))?;
    info!(event = "employee_created", employee_id = %created.id, company_id = %company_id, "employee created");
    Ok(created)
}

pub async fn get_employee(db: &DatabaseConnection, id: Uuid) -> Result<employee::Model, ServiceError> {
    employee::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| ServiceError::not_found("employee", id))
}

pub async fn list_employees(db: &DatabaseConnection, company_id: Option<Uuid>) -> Result<Vec<employee::Model>, ServiceError> {
    let mut query = employee::Entity::find();
    if let Some(cid) = company_id {
        ensure_company(db, cid).await?;
        query = query.filter(employee::Column::CompanyId.eq(cid));
    }
    let rows = query
        .order_by_asc(employee::Column::CreatedAt)
        .order_by_asc(employee::Column::Id)
        .all(db)
        .await?;
    Ok(rows)
}

#[instrument(skip(db, patch))]
pub async fn update_employee(db: &DatabaseConnection, id: Uuid, patch: EmployeePatch) -> Result<employee::Model, ServiceError> {
    let current = get_employee(db, id).await?;
    let updated = patch
        .apply(current, Utc::now().into())?
        .update(db)
        .await
        .map_err(|e| ServiceError::on_write(e, "employee", id))?;
    info!(event = "employee_updated", employee_id = %id, "employee updated");
    Ok(updated)
}

#[instrument(skip(db))]
pub async fn delete_employee(db: &DatabaseConnection, id: Uuid) -> Result<(), ServiceError> {
    let res = employee::Entity::delete_by_id(id).exec(db).await?;
    if res.rows_affected == 0 {
        return Err(ServiceError::not_found("employee", id));
    }
    info!(event = "employee_deleted", employee_id = %id, "employee deleted");
    Ok(())
}

/// Reassign an employee. The employee must currently belong to
/// `from_company_id` and the destination company must exist.
#[instrument(skip(db))]
pub async fn transfer_employee(
    db: &DatabaseConnection,
    employee_id: Uuid,
    from_company_id: Uuid,
    to_company_id: Uuid,
) -> Result<employee::Model, ServiceError> {
    if from_company_id == to_company_id {
        return Err(ServiceError::Validation(
            "from_company_id and to_company_id must differ".into(),
        ));
    }
    let current = get_employee(db, employee_id).await?;
    if current.company_id != from_company_id {
        warn!(
            event = "employee_transfer_rejected",
            employee_id = %employee_id,
            actual_company_id = %current.company_id,
            from_company_id = %from_company_id,
            "employee does not belong to source company"
        );
        return Err(ServiceError::NotFound(format!(
            "employee with id {} not found in company {}",
            employee_id, from_company_id
        )));
    }
    ensure_company(db, to_company_id).await?;

    let mut am: employee::ActiveModel = current.into();
    am.company_id = Set(to_company_id);
    am.updated_at = Set(Utc::now().into());
    let moved = am.update(db).await.map_err(|e| match e {
        DbErr::RecordNotUpdated => ServiceError::not_found("employee", employee_id),
        e => ServiceError::on_write(e, "company", to_company_id),
    })?;
    info!(
        event = "employee_transferred",
        employee_id = %employee_id,
        from_company_id = %from_company_id,
        to_company_id = %to_company_id,
        "employee transferred"
    );
    Ok(moved)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::company_service::create_company;
    use crate::test_support::{get_db, tick};
    use models::company::NewCompany;
    use models::errors::ModelError;

    #[tokio::test]
    async fn employee_crud_and_scoping() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let a = create_company(&db, NewCompany::named("A")).await?;
        let b = create_company(&db, NewCompany::named("B")).await?;
        let e1 = create_employee(
            &db,
            a.id,
            NewEmployee { position: Some("Site Lead".into()), ..NewEmployee::named("Dana Reyes") },
        )
        .await?;
        create_employee(&db, b.id, NewEmployee::named("Sam Ortiz")).await?;

        let for_a = list_employees(&db, Some(a.id)).await?;
        assert_eq!(for_a.len(), 1);
        assert_eq!(for_a[0].id, e1.id);

        tick().await;
        let patch = EmployeePatch { specialization: Some("Roofing".into()), ..Default::default() };
        let updated = update_employee(&db, e1.id, patch).await?;
        assert_eq!(updated.specialization.as_deref(), Some("Roofing"));
        assert_eq!(updated.position.as_deref(), Some("Site Lead"));
        assert_eq!(updated.full_name, "Dana Reyes");

        delete_employee(&db, e1.id).await?;
        assert!(matches!(get_employee(&db, e1.id).await, Err(ServiceError::NotFound(_))));
        assert!(list_employees(&db, Some(a.id)).await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn invalid_email_is_rejected_before_insert() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let c = create_company(&db, NewCompany::named("C")).await?;
        let input = NewEmployee { email: Some("not-an-email".into()), ..NewEmployee::named("X") };
        assert!(matches!(
            create_employee(&db, c.id, input).await,
            Err(ServiceError::Model(ModelError::Validation(_)))
        ));
        assert!(list_employees(&db, None).await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn transfer_moves_employee() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let a = create_company(&db, NewCompany::named("A")).await?;
        let b = create_company(&db, NewCompany::named("B")).await?;
        let e = create_employee(&db, a.id, NewEmployee::named("Dana")).await?;

        // wrong source
        assert!(matches!(
            transfer_employee(&db, e.id, b.id, a.id).await,
            Err(ServiceError::NotFound(_))
        ));
        // missing destination
        assert!(matches!(
            transfer_employee(&db, e.id, a.id, Uuid::new_v4()).await,
            Err(ServiceError::NotFound(_))
        ));
        assert_eq!(get_employee(&db, e.id).await?.company_id, a.id);

        let moved = transfer_employee(&db, e.id, a.id, b.id).await?;
        assert_eq!(moved.company_id, b.id);
        assert_eq!(moved.full_name, e.full_name);
        assert!(list_employees(&db, Some(a.id)).await?.is_empty());
        assert_eq!(list_employees(&db, Some(b.id)).await?.len(), 1);
        Ok(())
    }

    #[tokio::test]
    async fn transfer_to_same_company_is_rejected() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        let a = create_company(&db, NewCompany::named("A")).await?;
        let e = create_employee(&db, a.id, NewEmployee::named("Dana")).await?;
        assert!(matches!(
            transfer_employee(&db, e.id, a.id, a.id).await,
            Err(ServiceError::Validation(m)) if m.contains("must differ")
        ));
        assert_eq!(get_employee(&db, e.id).await?.updated_at, e.updated_at);
        Ok(())
    }

    #[tokio::test]
    async fn transfer_racing_destination_delete_is_not_found() -> Result<(), anyhow::Error> {
        let db = get_db().await?;
        for i in 0..10 {
            let a = create_company(&db, NewCompany::named(&format!("From {i}"))).await?;
            let b = create_company(&db, NewCompany::named(&format!("To {i}"))).await?;
            let e = create_employee(&db, a.id, NewEmployee::named("Dana")).await?;
            let (moved, deleted) = tokio::join!(
                transfer_employee(&db, e.id, a.id, b.id),
                crate::company_service::delete_company(&db, b.id),
            );
            assert!(matches!(moved, Ok(_) | Err(ServiceError::NotFound(_))), "transfer: {moved:?}");
            deleted?;
        }
        Ok(())
    }
}
