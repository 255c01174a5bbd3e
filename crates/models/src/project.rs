use std::fmt;
use std::str::FromStr;

use sea_orm::{entity::prelude::*, Set};
use uuid::Uuid;
use serde::{Deserialize, Serialize};

use crate::{company, errors::ModelError, validate};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "os_construction_projects")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub company_id: Uuid,
    pub project_name: String,
    pub location: Option<String>,
    pub start_date: Option<Date>,
    pub end_date: Option<Date>,
    pub status: String,
    pub description: Option<String>,
    pub beneficiary_info: Option<String>,
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

/// Lifecycle of a project. Stored as its snake_case name.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ProjectStatus {
    #[default]
    Planned,
    InProgress,
    Completed,
    Cancelled,
    OnHold,
}

impl ProjectStatus {
    pub const ALL: [ProjectStatus; 5] = [
        ProjectStatus::Planned,
        ProjectStatus::InProgress,
        ProjectStatus::Completed,
        ProjectStatus::Cancelled,
        ProjectStatus::OnHold,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectStatus::Planned => "planned",
            ProjectStatus::InProgress => "in_progress",
            ProjectStatus::Completed => "completed",
            ProjectStatus::Cancelled => "cancelled",
            ProjectStatus::OnHold => "on_hold",
        }
    }
}

impl fmt::Display for ProjectStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(self.as_str()) }
}

impl FromStr for ProjectStatus {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('-', "_");
        Self::ALL
            .into_iter()
            .find(|st| st.as_str() == normalized)
            .ok_or_else(|| {
                let names: Vec<&str> = Self::ALL.iter().map(|st| st.as_str()).collect();
                ModelError::validation(format!("status must be one of {}", names.join(", ")))
            })
    }
}

fn check_dates(start: Option<Date>, end: Option<Date>) -> Result<(), ModelError> {
    if let (Some(start), Some(end)) = (start, end) {
        if end < start {
            return Err(ModelError::validation("end_date must not be before start_date"));
        }
    }
    Ok(())
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct NewProject {
    #[serde(default)]
    pub project_name: String,
    pub location: Option<String>,
    pub start_date: Option<Date>,
    pub end_date: Option<Date>,
    pub status: Option<String>,
    pub description: Option<String>,
    pub beneficiary_info: Option<String>,
    #[serde(flatten)]
    pub read_only: validate::ReadOnlyFields,
}

impl NewProject {
    pub fn named(name: &str) -> Self {
        Self { project_name: name.to_string(), ..Self::default() }
    }

    /// Validates and returns the resolved status.
    pub fn validate(&self) -> Result<ProjectStatus, ModelError> {
        self.read_only.check()?;
        validate::required_text("project_name", &self.project_name, 255)?;
        check_dates(self.start_date, self.end_date)?;
        match &self.status {
            Some(s) => s.parse(),
            None => Ok(ProjectStatus::default()),
        }
    }

    pub fn into_active_model(self, id: Uuid, company_id: Uuid, now: DateTimeWithTimeZone) -> Result<ActiveModel, ModelError> {
        let status = self.validate()?;
        Ok(ActiveModel {
            id: Set(id),
            company_id: Set(company_id),
            project_name: Set(self.project_name),
            location: Set(self.location),
            start_date: Set(self.start_date),
            end_date: Set(self.end_date),
            status: Set(status.as_str().to_string()),
            description: Set(self.description),
            beneficiary_info: Set(self.beneficiary_info),
            created_at: Set(now),
            updated_at: Set(now),
        })
    }
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct ProjectPatch {
    pub project_name: Option<String>,
    pub location: Option<String>,
    pub start_date: Option<Date>,
    pub end_date: Option<Date>,
    pub status: Option<String>,
    pub description: Option<String>,
    pub beneficiary_info: Option<String>,
    #[serde(flatten)]
    pub read_only: validate::ReadOnlyFields,
}

impl ProjectPatch {
    /// Date ordering is checked against the merged record, so a patch that
    /// only moves `end_date` is still compared with the stored `start_date`.
    pub fn apply(self, current: Model, now: DateTimeWithTimeZone) -> Result<ActiveModel, ModelError> {
        self.read_only.check()?;
        if let Some(name) = &self.project_name {
            validate::required_text("project_name", name, 255)?;
        }
        let status = self.status.as_deref().map(str::parse::<ProjectStatus>).transpose()?;
        check_dates(self.start_date.or(current.start_date), self.end_date.or(current.end_date))?;

        let mut am: ActiveModel = current.into();
        if let Some(v) = self.project_name { am.project_name = Set(v); }
        if let Some(v) = self.location { am.location = Set(Some(v)); }
        if let Some(v) = self.start_date { am.start_date = Set(Some(v)); }
        if let Some(v) = self.end_date { am.end_date = Set(Some(v)); }
        if let Some(v) = status { am.status = Set(v.as_str().to_string()); }
        if let Some(v) = self.description { am.description = Set(Some(v)); }
        if let Some(v) = self.beneficiary_info { am.beneficiary_info = Set(Some(v)); }
        am.updated_at = Set(now);
        Ok(am)
    }
}
