//! Field-level validation shared by the entity input types.

use chrono::{Datelike, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::ModelError;

/// Columns owned by storage. Present in a payload only to be rejected.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ReadOnlyFields {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_id: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<serde_json::Value>,
}

impl ReadOnlyFields {
    pub fn check(&self) -> Result<(), ModelError> {
        if self.id.is_some() { return Err(ModelError::ReadOnly("id")); }
        if self.company_id.is_some() { return Err(ModelError::ReadOnly("company_id")); }
        if self.created_at.is_some() { return Err(ModelError::ReadOnly("created_at")); }
        if self.updated_at.is_some() { return Err(ModelError::ReadOnly("updated_at")); }
        Ok(())
    }
}

pub fn required_text(field: &str, value: &str, max: usize) -> Result<(), ModelError> {
    if value.trim().is_empty() {
        return Err(ModelError::validation(format!("{field} is required")));
    }
    max_len(field, value, max)
}

pub fn max_len(field: &str, value: &str, max: usize) -> Result<(), ModelError> {
    if value.chars().count() > max {
        return Err(ModelError::validation(format!("{field} must be at most {max} characters")));
    }
    Ok(())
}

pub fn optional_len(field: &str, value: Option<&str>, max: usize) -> Result<(), ModelError> {
    match value {
        Some(v) => max_len(field, v, max),
        None => Ok(()),
    }
}

pub fn email(field: &str, value: Option<&str>) -> Result<(), ModelError> {
    let Some(v) = value else { return Ok(()) };
    max_len(field, v, 255)?;
    let valid = match v.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.contains('@')
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
                && !v.chars().any(char::is_whitespace)
        }
        None => false,
    };
    if !valid {
        return Err(ModelError::validation(format!("{field} is not a valid email address")));
    }
    Ok(())
}

pub fn phone(field: &str, value: Option<&str>) -> Result<(), ModelError> {
    let Some(v) = value else { return Ok(()) };
    let len = v.trim().chars().count();
    if !(5..=50).contains(&len) {
        return Err(ModelError::validation(format!("{field} must be between 5 and 50 characters")));
    }
    Ok(())
}

pub fn founded_year(value: Option<i32>) -> Result<(), ModelError> {
    let Some(year) = value else { return Ok(()) };
    let current = Utc::now().year();
    if !(1800..=current).contains(&year) {
        return Err(ModelError::validation(format!("founded_year must be between 1800 and {current}")));
    }
    Ok(())
}
