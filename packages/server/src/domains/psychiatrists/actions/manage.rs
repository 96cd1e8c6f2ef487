//! Admin-side psychiatrist mutations.
//!
//! Every action validates its inputs before touching storage; the store
//! wraps each upsert and its five-set replacement in one transaction.

use std::str::FromStr;

use sqlx::PgPool;
use tracing::info;

use crate::common::IntakeError;
use crate::domains::psychiatrists::data::PsychiatristData;
use crate::domains::psychiatrists::models::psychiatrist::{
    AssociationSets, Credentials, Psychiatrist, PsychiatristAttributes, FOLLOW_UP_APPT_LENGTHS,
    INITIAL_APPT_LENGTHS,
};

/// Full create/update submission: scalar attributes plus the five
/// association id-sets, replaced wholesale on update.
#[derive(Debug, Clone)]
pub struct UpsertPsychiatrist {
    pub attributes: PsychiatristAttributes,
    pub associations: AssociationSets,
}

fn validate_attributes(attrs: &PsychiatristAttributes) -> Result<(), IntakeError> {
    if attrs.first_name.trim().is_empty() || attrs.last_name.trim().is_empty() {
        return Err(IntakeError::Validation(
            "First and last name are required".to_string(),
        ));
    }
    if Credentials::from_str(&attrs.credentials).is_err() {
        return Err(IntakeError::Validation(format!(
            "Invalid credentials: {}",
            attrs.credentials
        )));
    }
    if !INITIAL_APPT_LENGTHS.contains(&attrs.initial_appt_length) {
        return Err(IntakeError::Validation(format!(
            "Invalid initial appointment length: {}",
            attrs.initial_appt_length
        )));
    }
    if !FOLLOW_UP_APPT_LENGTHS.contains(&attrs.follow_up_appt_length) {
        return Err(IntakeError::Validation(format!(
            "Invalid follow-up appointment length: {}",
            attrs.follow_up_appt_length
        )));
    }
    if attrs.num_patients_accepted < 0 {
        return Err(IntakeError::Validation(
            "Accepted patient count must not be negative".to_string(),
        ));
    }
    Ok(())
}

pub async fn create_psychiatrist(
    input: &UpsertPsychiatrist,
    pool: &PgPool,
) -> Result<PsychiatristData, IntakeError> {
    validate_attributes(&input.attributes)?;

    let psychiatrist =
        Psychiatrist::create(&input.attributes, &input.associations, pool).await?;
    info!(id = psychiatrist.id, "Psychiatrist created");

    let associations = Psychiatrist::association_sets(psychiatrist.id, pool).await?;
    Ok(PsychiatristData::from_parts(psychiatrist, associations))
}

pub async fn update_psychiatrist(
    id: i32,
    input: &UpsertPsychiatrist,
    pool: &PgPool,
) -> Result<PsychiatristData, IntakeError> {
    validate_attributes(&input.attributes)?;

    let psychiatrist = Psychiatrist::update(id, &input.attributes, &input.associations, pool)
        .await?
        .ok_or_else(|| IntakeError::NotFound(format!("No psychiatrist with id {}", id)))?;
    info!(id, "Psychiatrist updated");

    let associations = Psychiatrist::association_sets(id, pool).await?;
    Ok(PsychiatristData::from_parts(psychiatrist, associations))
}

pub async fn remove_psychiatrist(id: i32, pool: &PgPool) -> Result<(), IntakeError> {
    let deleted = Psychiatrist::delete(id, pool).await?;
    if deleted == 0 {
        return Err(IntakeError::NotFound(format!(
            "No psychiatrist with id {}",
            id
        )));
    }
    info!(id, "Psychiatrist deleted");
    Ok(())
}
