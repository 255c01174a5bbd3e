use sea_orm::{entity::prelude::*, Set};
use uuid::Uuid;
use serde::{Deserialize, Serialize};

use crate::{employee, errors::ModelError, project, service, validate};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "os_construction")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub company_name: String,
    pub company_address: Option<String>,
    pub company_email: Option<String>,
    pub company_phone: Option<String>,
    pub website: Option<String>,
    pub description: Option<String>,
    pub founded_year: Option<i32>,
    pub is_verified: bool,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Services,
    Projects,
    Employees,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Services => Entity::has_many(service::Entity).into(),
            Relation::Projects => Entity::has_many(project::Entity).into(),
            Relation::Employees => Entity::has_many(employee::Entity).into(),
        }
    }
}

impl Related<service::Entity> for Entity {
    fn to() -> RelationDef { Relation::Services.def() }
}

impl Related<project::Entity> for Entity {
    fn to() -> RelationDef { Relation::Projects.def() }
}

impl Related<employee::Entity> for Entity {
    fn to() -> RelationDef { Relation::Employees.def() }
}

impl ActiveModelBehavior for ActiveModel {}

/// Payload for creating a company. Only `company_name` is required.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct NewCompany {
    #[serde(default)]
    pub company_name: String,
    pub company_address: Option<String>,
    pub company_email: Option<String>,
    pub company_phone: Option<String>,
    pub website: Option<String>,
    pub description: Option<String>,
    pub founded_year: Option<i32>,
    #[serde(default)]
    pub is_verified: bool,
    #[serde(flatten)]
    pub read_only: validate::ReadOnlyFields,
}

impl NewCompany {
    pub fn named(name: &str) -> Self {
        Self { company_name: name.to_string(), ..Self::default() }
    }

    pub fn validate(&self) -> Result<(), ModelError> {
        self.read_only.check()?;
        validate::required_text("company_name", &self.company_name, 255)?;
        validate::email("company_email", self.company_email.as_deref())?;
        validate::phone("company_phone", self.company_phone.as_deref())?;
        validate::optional_len("website", self.website.as_deref(), 255)?;
        validate::founded_year(self.founded_year)
    }

    pub fn into_active_model(self, id: Uuid, now: DateTimeWithTimeZone) -> Result<ActiveModel, ModelError> {
        self.validate()?;
        Ok(ActiveModel {
            id: Set(id),
            company_name: Set(self.company_name),
            company_address: Set(self.company_address),
            company_email: Set(self.company_email),
            company_phone: Set(self.company_phone),
            website: Set(self.website),
            description: Set(self.description),
            founded_year: Set(self.founded_year),
            is_verified: Set(self.is_verified),
            created_at: Set(now),
            updated_at: Set(now),
        })
    }
}

/// Partial update; absent (or null) fields keep their stored value.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct CompanyPatch {
    pub company_name: Option<String>,
    pub company_address: Option<String>,
    pub company_email: Option<String>,
    pub company_phone: Option<String>,
    pub website: Option<String>,
    pub description: Option<String>,
    pub founded_year: Option<i32>,
    pub is_verified: Option<bool>,
    #[serde(flatten)]
    pub read_only: validate::ReadOnlyFields,
}

impl CompanyPatch {
    pub fn validate(&self) -> Result<(), ModelError> {
        self.read_only.check()?;
        if let Some(name) = &self.company_name {
            validate::required_text("company_name", name, 255)?;
        }
        validate::email("company_email", self.company_email.as_deref())?;
        validate::phone("company_phone", self.company_phone.as_deref())?;
        validate::optional_len("website", self.website.as_deref(), 255)?;
        validate::founded_year(self.founded_year)
    }

    /// Merge into the stored row and stamp `updated_at`.
    pub fn apply(self, current: Model, now: DateTimeWithTimeZone) -> Result<ActiveModel, ModelError> {
        self.validate()?;
        let mut am: ActiveModel = current.into();
        if let Some(v) = self.company_name { am.company_name = Set(v); }
        if let Some(v) = self.company_address { am.company_address = Set(Some(v)); }
        if let Some(v) = self.company_email { am.company_email = Set(Some(v)); }
        if let Some(v) = self.company_phone { am.company_phone = Set(Some(v)); }
        if let Some(v) = self.website { am.website = Set(Some(v)); }
        if let Some(v) = self.description { am.description = Set(Some(v)); }
        if let Some(v) = self.founded_year { am.founded_year = Set(Some(v)); }
        if let Some(v) = self.is_verified { am.is_verified = Set(v); }
        am.updated_at = Set(now);
        Ok(am)
    }
}
