use anyhow::Result;
use sqlx::PgPool;

use crate::domains::psychiatrists::models::psychiatrist::Psychiatrist;

/// Filter values supplied by a search request. Absent/empty fields do not
/// filter on their dimension.
#[derive(Debug, Clone, Default)]
pub struct SearchCriteria {
    pub insurance_id: Option<i32>,
    pub insurance_id2: Option<i32>,
    pub location_id: Option<i32>,
    pub age_group_id: Option<i32>,
    pub medication_ids: Vec<i32>,
    pub condition_ids: Vec<i32>,
    pub prefer_telehealth: bool,
}

impl Psychiatrist {
    /// The matching query: a boolean conjunction over fixed predicates.
    ///
    /// Insurance/location/age-group criteria require membership in the
    /// association set (both insurance ids when two are given); medication
    /// and condition ids must NOT intersect the restriction sets; the
    /// telehealth flag admits only providers without an in-person first
    /// meeting. Providers with no open patient slots never match.
    pub async fn search(criteria: &SearchCriteria, pool: &PgPool) -> Result<Vec<Self>> {
        sqlx::query_as::<_, Self>(
            "SELECT p.*
             FROM psychiatrists p
             WHERE p.num_patients_accepted > 0
               AND ($1::int IS NULL OR EXISTS (
                     SELECT 1 FROM psychiatrist_insurances a
                     WHERE a.psychiatrist_id = p.id AND a.insurance_id = $1))
               AND ($2::int IS NULL OR EXISTS (
                     SELECT 1 FROM psychiatrist_insurances a
                     WHERE a.psychiatrist_id = p.id AND a.insurance_id = $2))
               AND ($3::int IS NULL OR EXISTS (
                     SELECT 1 FROM psychiatrist_locations a
                     WHERE a.psychiatrist_id = p.id AND a.location_id = $3))
               AND ($4::int IS NULL OR EXISTS (
                     SELECT 1 FROM psychiatrist_age_groups a
                     WHERE a.psychiatrist_id = p.id AND a.age_group_id = $4))
               AND (cardinality($5::int[]) = 0 OR NOT EXISTS (
                     SELECT 1 FROM psychiatrist_medication_restrictions a
                     WHERE a.psychiatrist_id = p.id AND a.medication_id = ANY($5)))
               AND (cardinality($6::int[]) = 0 OR NOT EXISTS (
                     SELECT 1 FROM psychiatrist_condition_restrictions a
                     WHERE a.psychiatrist_id = p.id AND a.condition_id = ANY($6)))
               AND (NOT $7 OR p.requires_in_person_first_meeting = false)
             ORDER BY p.id",
        )
        .bind(criteria.insurance_id)
        .bind(criteria.insurance_id2)
        .bind(criteria.location_id)
        .bind(criteria.age_group_id)
        .bind(&criteria.medication_ids)
        .bind(&criteria.condition_ids)
        .bind(criteria.prefer_telehealth)
        .fetch_all(pool)
        .await
        .map_err(Into::into)
    }
}
