//! Psychiatrist query actions
//!
//! Read-side operations for the admin list, the edit list, and the detail
//! view. All lists come back id-ascending.

use sqlx::PgPool;

use crate::common::IntakeError;
use crate::domains::psychiatrists::data::{
    PsychiatristData, PsychiatristDetail, PsychiatristSummary,
};
use crate::domains::psychiatrists::models::psychiatrist::Psychiatrist;
use crate::domains::taxonomy::models::entity::EntityKind;

/// All psychiatrists with their association id-sets flattened.
pub async fn list_psychiatrists(pool: &PgPool) -> Result<Vec<PsychiatristData>, IntakeError> {
    let psychiatrists = Psychiatrist::find_all(pool).await?;

    let ids: Vec<i32> = psychiatrists.iter().map(|p| p.id).collect();
    let mut sets = Psychiatrist::association_sets_for(&ids, pool).await?;

    Ok(psychiatrists
        .into_iter()
        .map(|p| {
            let associations = sets.remove(&p.id).unwrap_or_default();
            PsychiatristData::from_parts(p, associations)
        })
        .collect())
}

/// Name-only rows for the edit list.
pub async fn list_summaries(pool: &PgPool) -> Result<Vec<PsychiatristSummary>, IntakeError> {
    sqlx::query_as::<_, PsychiatristSummary>(
        "SELECT id, first_name, last_name FROM psychiatrists ORDER BY id",
    )
    .fetch_all(pool)
    .await
    .map_err(Into::into)
}

/// One psychiatrist with each association resolved to named entities.
pub async fn get_psychiatrist_details(
    id: i32,
    pool: &PgPool,
) -> Result<PsychiatristDetail, IntakeError> {
    let psychiatrist = Psychiatrist::find_by_id(id, pool)
        .await?
        .ok_or_else(|| IntakeError::NotFound(format!("No psychiatrist with id {}", id)))?;

    let insurances = Psychiatrist::associated_entities(id, EntityKind::Insurance, pool).await?;
    let locations = Psychiatrist::associated_entities(id, EntityKind::Location, pool).await?;
    let age_groups = Psychiatrist::associated_entities(id, EntityKind::AgeGroup, pool).await?;
    let condition_restrictions =
        Psychiatrist::associated_entities(id, EntityKind::Condition, pool).await?;
    let medication_restrictions =
        Psychiatrist::associated_entities(id, EntityKind::Medication, pool).await?;

    Ok(PsychiatristDetail {
        id: psychiatrist.id,
        first_name: psychiatrist.first_name,
        last_name: psychiatrist.last_name,
        credentials: psychiatrist.credentials,
        notes: psychiatrist.notes,
        initial_appt_length: psychiatrist.initial_appt_length,
        follow_up_appt_length: psychiatrist.follow_up_appt_length,
        num_patients_accepted: psychiatrist.num_patients_accepted,
        requires_in_person_first_meeting: psychiatrist.requires_in_person_first_meeting,
        insurances,
        locations,
        age_groups,
        condition_restrictions,
        medication_restrictions,
    })
}
