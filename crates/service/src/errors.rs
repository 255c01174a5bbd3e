use models::errors::ModelError;
use sea_orm::{DbErr, SqlErr};
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("validation error: {0}")]
    Validation(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("database error: {0}")]
    Db(String),
    #[error(transparent)]
    Model(#[from] ModelError),
}

impl ServiceError {
    pub fn not_found(entity: &str, id: Uuid) -> Self {
        Self::NotFound(format!("{} with id {} not found", entity, id))
    }

    /// Write that lost a race with a delete: the updated row or the
    /// referenced company disappeared after the existence check.
    pub fn on_write(e: DbErr, entity: &str, id: Uuid) -> Self {
        if is_missing_row(&e) {
            Self::not_found(entity, id)
        } else {
            e.into()
        }
    }
}

fn is_missing_row(e: &DbErr) -> bool {
    matches!(e, DbErr::RecordNotUpdated)
        || matches!(e.sql_err(), Some(SqlErr::ForeignKeyConstraintViolation(_)))
}

impl From<DbErr> for ServiceError {
    fn from(e: DbErr) -> Self {
        if is_missing_row(&e) {
            return Self::NotFound(format!("referenced record no longer exists: {e}"));
        }
        Self::Db(e.to_string())
    }
}
