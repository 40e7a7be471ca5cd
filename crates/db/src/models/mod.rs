//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` entity struct matching the database row
//! - A create DTO for inserts
//! - An update DTO (all `Option` fields) for patches, where the entity
//!   is mutable in scope

pub mod answer_option;
pub mod question;
pub mod reporting;
pub mod stats;
pub mod survey;
pub mod user;
pub mod vote;
