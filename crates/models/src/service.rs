use sea_orm::{entity::prelude::*, Set};
use uuid::Uuid;
use serde::{Deserialize, Serialize};

use crate::{company, errors::ModelError, validate};

/// A free offering provided by one company.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "os_construction_services")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub company_id: Uuid,
    pub service_name: String,
    pub description: Option<String>,
    pub is_free: bool,
    pub eligibility_criteria: Option<String>,
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

fn default_is_free() -> bool { true }

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct NewService {
    #[serde(default)]
    pub service_name: String,
    pub description: Option<String>,
    #[serde(default = "default_is_free")]
    pub is_free: bool,
    pub eligibility_criteria: Option<String>,
    #[serde(flatten)]
    pub read_only: validate::ReadOnlyFields,
}

impl NewService {
    pub fn named(name: &str) -> Self {
        Self {
            service_name: name.to_string(),
            description: None,
            is_free: true,
            eligibility_criteria: None,
            read_only: Default::default(),
        }
    }

    pub fn validate(&self) -> Result<(), ModelError> {
        self.read_only.check()?;
        validate::required_text("service_name", &self.service_name, 255)
    }

    pub fn into_active_model(self, id: Uuid, company_id: Uuid, now: DateTimeWithTimeZone) -> Result<ActiveModel, ModelError> {
        self.validate()?;
        Ok(ActiveModel {
            id: Set(id),
            company_id: Set(company_id),
            service_name: Set(self.service_name),
            description: Set(self.description),
            is_free: Set(self.is_free),
            eligibility_criteria: Set(self.eligibility_criteria),
            created_at: Set(now),
            updated_at: Set(now),
        })
    }
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct ServicePatch {
    pub service_name: Option<String>,
    pub description: Option<String>,
    pub is_free: Option<bool>,
    pub eligibility_criteria: Option<String>,
    #[serde(flatten)]
    pub read_only: validate::ReadOnlyFields,
}

impl ServicePatch {
    pub fn validate(&self) -> Result<(), ModelError> {
        self.read_only.check()?;
        if let Some(name) = &self.service_name {
            validate::required_text("service_name", name, 255)?;
        }
        Ok(())
    }

    pub fn apply(self, current: Model, now: DateTimeWithTimeZone) -> Result<ActiveModel, ModelError> {
        self.validate()?;
        let mut am: ActiveModel = current.into();
        if let Some(v) = self.service_name { am.service_name = Set(v); }
        if let Some(v) = self.description { am.description = Set(Some(v)); }
        if let Some(v) = self.is_free { am.is_free = Set(v); }
        if let Some(v) = self.eligibility_criteria { am.eligibility_criteria = Set(Some(v)); }
        am.updated_at = Set(now);
        Ok(am)
    }
}
