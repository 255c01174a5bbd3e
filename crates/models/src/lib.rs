//! Entities of the construction-services directory and their input types.
//!
//! Every child table (`service`, `project`, `employee`) belongs to exactly
//! one `company`; the FK cascades on delete.

pub mod errors;
pub mod db;
pub mod validate;
pub mod company;
pub mod service;
pub mod project;
pub mod employee;
