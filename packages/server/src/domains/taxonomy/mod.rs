//! Taxonomy domain - the five named reference lists used as filter dimensions
//! (insurances, locations, age groups, conditions, medications).

pub mod actions;
pub mod models;

pub use models::entity::{Entity, EntityKind, EntityOptions};
