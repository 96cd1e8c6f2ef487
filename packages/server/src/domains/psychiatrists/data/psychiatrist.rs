use serde::Serialize;

use crate::domains::psychiatrists::models::psychiatrist::{AssociationSets, Psychiatrist};
use crate::domains::taxonomy::models::entity::Entity;

/// Public API representation of a psychiatrist with its association id-sets
/// flattened (search results and the admin list).
#[derive(Debug, Clone, Serialize)]
pub struct PsychiatristData {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub credentials: String,
    pub notes: String,
    pub initial_appt_length: i32,
    pub follow_up_appt_length: i32,
    pub num_patients_accepted: i32,
    pub requires_in_person_first_meeting: bool,
    pub insurances: Vec<i32>,
    pub locations: Vec<i32>,
    pub age_groups: Vec<i32>,
    pub condition_restrictions: Vec<i32>,
    pub medication_restrictions: Vec<i32>,
}

impl PsychiatristData {
    pub fn from_parts(psychiatrist: Psychiatrist, associations: AssociationSets) -> Self {
        Self {
            id: psychiatrist.id,
            first_name: psychiatrist.first_name,
            last_name: psychiatrist.last_name,
            credentials: psychiatrist.credentials,
            notes: psychiatrist.notes,
            initial_appt_length: psychiatrist.initial_appt_length,
            follow_up_appt_length: psychiatrist.follow_up_appt_length,
            num_patients_accepted: psychiatrist.num_patients_accepted,
            requires_in_person_first_meeting: psychiatrist.requires_in_person_first_meeting,
            insurances: associations.insurances,
            locations: associations.locations,
            age_groups: associations.age_groups,
            condition_restrictions: associations.conditions,
            medication_restrictions: associations.medications,
        }
    }
}

/// One psychiatrist with its associations resolved to named entities
/// (the edit/detail view).
#[derive(Debug, Clone, Serialize)]
pub struct PsychiatristDetail {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub credentials: String,
    pub notes: String,
    pub initial_appt_length: i32,
    pub follow_up_appt_length: i32,
    pub num_patients_accepted: i32,
    pub requires_in_person_first_meeting: bool,
    pub insurances: Vec<Entity>,
    pub locations: Vec<Entity>,
    pub age_groups: Vec<Entity>,
    pub condition_restrictions: Vec<Entity>,
    pub medication_restrictions: Vec<Entity>,
}

/// Name-only row for the provider edit list.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct PsychiatristSummary {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
}
