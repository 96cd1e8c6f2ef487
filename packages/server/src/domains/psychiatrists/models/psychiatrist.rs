use std::collections::HashMap;

use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{PgPool, Postgres, Transaction};

use crate::domains::taxonomy::models::entity::{Entity, EntityKind};

/// Appointment lengths (minutes) accepted for an initial visit.
pub const INITIAL_APPT_LENGTHS: [i32; 5] = [15, 30, 45, 60, 90];

/// Appointment lengths (minutes) accepted for a follow-up visit.
pub const FOLLOW_UP_APPT_LENGTHS: [i32; 4] = [15, 30, 45, 60];

/// Provider credentials.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Credentials {
    Md,
    Do,
    Np,
    PhdNp,
}

impl std::fmt::Display for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Credentials::Md => write!(f, "MD"),
            Credentials::Do => write!(f, "DO"),
            Credentials::Np => write!(f, "NP"),
            Credentials::PhdNp => write!(f, "PhD/NP"),
        }
    }
}

impl std::str::FromStr for Credentials {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "MD" => Ok(Credentials::Md),
            "DO" => Ok(Credentials::Do),
            "NP" => Ok(Credentials::Np),
            "PhD/NP" => Ok(Credentials::PhdNp),
            _ => Err(anyhow::anyhow!("Invalid credentials: {}", s)),
        }
    }
}

/// Psychiatrist model - SQL persistence layer
#[derive(sqlx::FromRow, Debug, Clone)]
pub struct Psychiatrist {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub credentials: String,
    pub notes: String,
    pub initial_appt_length: i32,
    pub follow_up_appt_length: i32,
    pub num_patients_accepted: i32,
    pub requires_in_person_first_meeting: bool,
    pub created_at: DateTime<Utc>,
}

/// Scalar attributes submitted when creating or updating a psychiatrist.
#[derive(Debug, Clone, Deserialize)]
pub struct PsychiatristAttributes {
    pub first_name: String,
    pub last_name: String,
    pub credentials: String,
    pub notes: String,
    pub initial_appt_length: i32,
    pub follow_up_appt_length: i32,
    pub num_patients_accepted: i32,
    pub requires_in_person_first_meeting: bool,
}

/// The five association id-sets of a psychiatrist. One shape serves both
/// submission (ids to store) and listing (ids flattened out of the join
/// tables).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AssociationSets {
    pub insurances: Vec<i32>,
    pub locations: Vec<i32>,
    pub age_groups: Vec<i32>,
    pub conditions: Vec<i32>,
    pub medications: Vec<i32>,
}

impl AssociationSets {
    pub fn for_kind(&self, kind: EntityKind) -> &[i32] {
        match kind {
            EntityKind::Insurance => &self.insurances,
            EntityKind::Location => &self.locations,
            EntityKind::AgeGroup => &self.age_groups,
            EntityKind::Condition => &self.conditions,
            EntityKind::Medication => &self.medications,
        }
    }

    pub fn for_kind_mut(&mut self, kind: EntityKind) -> &mut Vec<i32> {
        match kind {
            EntityKind::Insurance => &mut self.insurances,
            EntityKind::Location => &mut self.locations,
            EntityKind::AgeGroup => &mut self.age_groups,
            EntityKind::Condition => &mut self.conditions,
            EntityKind::Medication => &mut self.medications,
        }
    }
}

impl Psychiatrist {
    /// Find all psychiatrists, id-ascending.
    pub async fn find_all(pool: &PgPool) -> Result<Vec<Self>> {
        sqlx::query_as::<_, Self>("SELECT * FROM psychiatrists ORDER BY id")
            .fetch_all(pool)
            .await
            .map_err(Into::into)
    }

    /// Find one psychiatrist by id.
    pub async fn find_by_id(id: i32, pool: &PgPool) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>("SELECT * FROM psychiatrists WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await
            .map_err(Into::into)
    }

    /// Insert a psychiatrist and its five association sets in one transaction.
    pub async fn create(
        attrs: &PsychiatristAttributes,
        associations: &AssociationSets,
        pool: &PgPool,
    ) -> Result<Self> {
        let mut tx = pool.begin().await?;

        let psychiatrist = sqlx::query_as::<_, Self>(
            "INSERT INTO psychiatrists (
                first_name,
                last_name,
                credentials,
                notes,
                initial_appt_length,
                follow_up_appt_length,
                num_patients_accepted,
                requires_in_person_first_meeting
             )
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING *",
        )
        .bind(&attrs.first_name)
        .bind(&attrs.last_name)
        .bind(&attrs.credentials)
        .bind(&attrs.notes)
        .bind(attrs.initial_appt_length)
        .bind(attrs.follow_up_appt_length)
        .bind(attrs.num_patients_accepted)
        .bind(attrs.requires_in_person_first_meeting)
        .fetch_one(&mut *tx)
        .await?;

        replace_associations(&mut tx, psychiatrist.id, associations).await?;

        tx.commit().await?;
        Ok(psychiatrist)
    }

    /// Update the row and wholesale-replace all five association sets in one
    /// transaction. Returns None when the id does not exist.
    pub async fn update(
        id: i32,
        attrs: &PsychiatristAttributes,
        associations: &AssociationSets,
        pool: &PgPool,
    ) -> Result<Option<Self>> {
        let mut tx = pool.begin().await?;

        let psychiatrist = sqlx::query_as::<_, Self>(
            "UPDATE psychiatrists
             SET first_name = $2,
                 last_name = $3,
                 credentials = $4,
                 notes = $5,
                 initial_appt_length = $6,
                 follow_up_appt_length = $7,
                 num_patients_accepted = $8,
                 requires_in_person_first_meeting = $9
             WHERE id = $1
             RETURNING *",
        )
        .bind(id)
        .bind(&attrs.first_name)
        .bind(&attrs.last_name)
        .bind(&attrs.credentials)
        .bind(&attrs.notes)
        .bind(attrs.initial_appt_length)
        .bind(attrs.follow_up_appt_length)
        .bind(attrs.num_patients_accepted)
        .bind(attrs.requires_in_person_first_meeting)
        .fetch_optional(&mut *tx)
        .await?;

        let Some(psychiatrist) = psychiatrist else {
            return Ok(None);
        };

        replace_associations(&mut tx, id, associations).await?;

        tx.commit().await?;
        Ok(Some(psychiatrist))
    }

    /// Delete a psychiatrist. Join rows cascade. Returns rows affected.
    pub async fn delete(id: i32, pool: &PgPool) -> Result<u64> {
        let result = sqlx::query("DELETE FROM psychiatrists WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }

    /// Flattened association id-sets for one psychiatrist.
    pub async fn association_sets(id: i32, pool: &PgPool) -> Result<AssociationSets> {
        let mut sets = AssociationSets::default();
        for kind in EntityKind::ALL {
            let ids: Vec<(i32,)> = sqlx::query_as(&format!(
                "SELECT {col} FROM {table} WHERE psychiatrist_id = $1 ORDER BY {col}",
                col = kind.association_column(),
                table = kind.association_table(),
            ))
            .bind(id)
            .fetch_all(pool)
            .await?;
            *sets.for_kind_mut(kind) = ids.into_iter().map(|(entity_id,)| entity_id).collect();
        }
        Ok(sets)
    }

    /// Batch-load flattened association id-sets for many psychiatrists.
    pub async fn association_sets_for(
        ids: &[i32],
        pool: &PgPool,
    ) -> Result<HashMap<i32, AssociationSets>> {
        let mut by_psychiatrist: HashMap<i32, AssociationSets> = ids
            .iter()
            .map(|&id| (id, AssociationSets::default()))
            .collect();

        for kind in EntityKind::ALL {
            let rows: Vec<(i32, i32)> = sqlx::query_as(&format!(
                "SELECT psychiatrist_id, {col} FROM {table}
                 WHERE psychiatrist_id = ANY($1)
                 ORDER BY psychiatrist_id, {col}",
                col = kind.association_column(),
                table = kind.association_table(),
            ))
            .bind(ids)
            .fetch_all(pool)
            .await?;

            for (psychiatrist_id, entity_id) in rows {
                if let Some(sets) = by_psychiatrist.get_mut(&psychiatrist_id) {
                    sets.for_kind_mut(kind).push(entity_id);
                }
            }
        }

        Ok(by_psychiatrist)
    }

    /// Association entities of one category resolved to `{id, name}` rows.
    pub async fn associated_entities(
        id: i32,
        kind: EntityKind,
        pool: &PgPool,
    ) -> Result<Vec<Entity>> {
        sqlx::query_as::<_, Entity>(&format!(
            "SELECT e.id, e.name
             FROM {entity_table} e
             INNER JOIN {assoc_table} a ON a.{col} = e.id
             WHERE a.psychiatrist_id = $1
             ORDER BY e.id",
            entity_table = kind.table(),
            assoc_table = kind.association_table(),
            col = kind.association_column(),
        ))
        .bind(id)
        .fetch_all(pool)
        .await
        .map_err(Into::into)
    }
}

/// Clear-then-recreate every association set of one psychiatrist. Runs inside
/// the caller's transaction so a partially-replaced state is never visible.
async fn replace_associations(
    tx: &mut Transaction<'_, Postgres>,
    psychiatrist_id: i32,
    associations: &AssociationSets,
) -> Result<()> {
    for kind in EntityKind::ALL {
        sqlx::query(&format!(
            "DELETE FROM {} WHERE psychiatrist_id = $1",
            kind.association_table()
        ))
        .bind(psychiatrist_id)
        .execute(&mut **tx)
        .await?;

        for &entity_id in associations.for_kind(kind) {
            sqlx::query(&format!(
                "INSERT INTO {table} (psychiatrist_id, {col}) VALUES ($1, $2)
                 ON CONFLICT DO NOTHING",
                table = kind.association_table(),
                col = kind.association_column(),
            ))
            .bind(psychiatrist_id)
            .bind(entity_id)
            .execute(&mut **tx)
            .await?;
        }
    }
    Ok(())
}
