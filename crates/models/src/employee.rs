use sea_orm::{entity::prelude::*, Set};
use uuid::Uuid;
use serde::{Deserialize, Serialize};

use crate::{company, errors::ModelError, validate};

/// Staff or volunteer record of one company.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "os_construction_employees")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub company_id: Uuid,
    pub full_name: String,
    pub position: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub specialization: Option<String>,
    pub join_date: Option<Date>,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation { Company }

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Company => Entity::belongs_to(company::Entity)
                .from(Column::CompanyId)
                .to(company::Column::Id)
                .on_delete(ForeignKeyAction::Cascade)
                .into(),
        }
    }
}

impl Related<company::Entity> for Entity {
    fn to() -> RelationDef { Relation::Company.def() }
}

impl ActiveModelBehavior for ActiveModel {}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct NewEmployee {
    #[serde(default)]
    pub full_name: String,
    pub position: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub specialization: Option<String>,
    pub join_date: Option<Date>,
    #[serde(flatten)]
    pub read_only: validate::ReadOnlyFields,
}

fn check_fields(
    position: Option<&str>,
    email: Option<&str>,
    phone: Option<&str>,
    specialization: Option<&str>,
) -> Result<(), ModelError> {
    validate::optional_len("position", position, 100)?;
    validate::email("email", email)?;
    validate::optional_len("phone", phone, 50)?;
    validate::optional_len("specialization", specialization, 100)
}

impl NewEmployee {
    pub fn named(name: &str) -> Self {
        Self { full_name: name.to_string(), ..Self::default() }
    }

    pub fn validate(&self) -> Result<(), ModelError> {
        self.read_only.check()?;
        validate::required_text("full_name", &self.full_name, 255)?;
        check_fields(
            self.position.as_deref(),
            self.email.as_deref(),
            self.phone.as_deref(),
            self.specialization.as_deref(),
        )
    }

    pub fn into_active_model(self, id: Uuid, company_id: Uuid, now: DateTimeWithTimeZone) -> Result<ActiveModel, ModelError> {
        self.validate()?;
        Ok(ActiveModel {
            id: Set(id),
            company_id: Set(company_id),
            full_name: Set(self.full_name),
            position: Set(self.position),
            email: Set(self.email),
            phone: Set(self.phone),
            specialization: Set(self.specialization),
            join_date: Set(self.join_date),
            created_at: Set(now),
            updated_at: Set(now),
        })
    }
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct EmployeePatch {
    pub full_name: Option<String>,
    pub position: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub specialization: Option<String>,
    pub join_date: Option<Date>,
    #[serde(flatten)]
    pub read_only: validate::ReadOnlyFields,
}

impl EmployeePatch {
    pub fn validate(&self) -> Result<(), ModelError> {
        self.read_only.check()?;
        if let Some(name) = &self.full_name {
            validate::required_text("full_name", name, 255)?;
        }
        check_fields(
            self.position.as_deref(),
            self.email.as_deref(),
            self.phone.as_deref(),
            self.specialization.as_deref(),
        )
    }

    pub fn apply(self, current: Model, now: DateTimeWithTimeZone) -> Result<ActiveModel, ModelError> {
        self.validate()?;
        let mut am: ActiveModel = current.into();
        if let Some(v) = self.full_name { am.full_name = Set(v); }
        if let Some(v) = self.position { am.position = Set(Some(v)); }
        if let Some(v) = self.email { am.email = Set(Some(v)); }
        if let Some(v) = self.phone { am.phone = Set(Some(v)); }
        if let Some(v) = self.specialization { am.specialization = Set(Some(v)); }
        if let Some(v) = self.join_date { am.join_date = Set(Some(v)); }
        am.updated_at = Set(now);
        Ok(am)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn join_date_parses_iso_dates() {
        let input: NewEmployee = serde_json::from_str(
            r#"{"full_name":"Dana Reyes","position":"Site Lead","join_date":"2023-09-01"}"#,
        ).unwrap();
        assert!(input.validate().is_ok());
        assert_eq!(input.join_date.map(|d| d.to_string()).as_deref(), Some("2023-09-01"));
    }

    #[test]
    fn invalid_email_is_rejected() {
        let input = NewEmployee { email: Some("dana-at-example".into()), ..NewEmployee::named("Dana") };
        assert!(matches!(input.validate(), Err(ModelError::Validation(m)) if m.contains("email")));
    }

    #[test]
    fn overlong_position_is_rejected_on_patch() {
        let patch = EmployeePatch { position: Some("x".repeat(101)), ..Default::default() };
        assert!(patch.validate().is_err());
    }
}
