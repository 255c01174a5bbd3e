//! Data access layer: business-oriented CRUD operations on top of models.
//! - Every function takes an injected `DatabaseConnection`; there is no global client.
//! - Reuses validation and entity definitions in the `models` crate.
//! - Each operation issues single-row statements; cascades are left to the FK.

pub mod errors;
pub mod company_service;
pub mod offering_service;
pub mod project_service;
pub mod employee_service;
#[cfg(test)]
pub mod test_support;
