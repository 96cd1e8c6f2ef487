//! Test fixtures for creating test data.
//!
//! These fixtures use the model and action methods directly to create
//! test data.

use anyhow::Result;
use intake_core::domains::psychiatrists::actions::{create_psychiatrist, UpsertPsychiatrist};
use intake_core::domains::psychiatrists::models::psychiatrist::{
    AssociationSets, PsychiatristAttributes,
};
use intake_core::domains::taxonomy::models::entity::{Entity, EntityKind};
use sqlx::PgPool;

/// Create a reference row in the given category and return its id.
pub async fn create_test_entity(pool: &PgPool, kind: EntityKind, name: &str) -> Result<i32> {
    let entity = Entity::create(kind, name, pool).await?;
    Ok(entity.id)
}

/// Default attributes for a test psychiatrist accepting patients.
pub fn test_attributes(first_name: &str, last_name: &str) -> PsychiatristAttributes {
    PsychiatristAttributes {
        first_name: first_name.to_string(),
        last_name: last_name.to_string(),
        credentials: "MD".to_string(),
        notes: String::new(),
        initial_appt_length: 60,
        follow_up_appt_length: 30,
        num_patients_accepted: 5,
        requires_in_person_first_meeting: false,
    }
}

/// Create a psychiatrist with the given attributes and association sets,
/// returning its id.
pub async fn create_test_psychiatrist(
    pool: &PgPool,
    attributes: PsychiatristAttributes,
    associations: AssociationSets,
) -> Result<i32> {
    let input = UpsertPsychiatrist {
        attributes,
        associations,
    };
    let data = create_psychiatrist(&input, pool).await?;
    Ok(data.id)
}
