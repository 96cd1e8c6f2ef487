use anyhow::Result;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::common::IntakeError;

/// A named reference-list row used as a filter dimension.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Entity {
    pub id: i32,
    pub name: String,
}

/// The five taxonomy categories. Each maps to its own table plus a
/// psychiatrist association table, so every category shares one code path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Insurance,
    Location,
    AgeGroup,
    Condition,
    Medication,
}

impl EntityKind {
    pub const ALL: [EntityKind; 5] = [
        EntityKind::Insurance,
        EntityKind::Location,
        EntityKind::AgeGroup,
        EntityKind::Condition,
        EntityKind::Medication,
    ];

    /// Table holding the reference rows for this category.
    pub fn table(&self) -> &'static str {
        match self {
            EntityKind::Insurance => "insurances",
            EntityKind::Location => "locations",
            EntityKind::AgeGroup => "age_groups",
            EntityKind::Condition => "conditions",
            EntityKind::Medication => "medications",
        }
    }

    /// Join table linking psychiatrists to this category.
    pub fn association_table(&self) -> &'static str {
        match self {
            EntityKind::Insurance => "psychiatrist_insurances",
            EntityKind::Location => "psychiatrist_locations",
            EntityKind::AgeGroup => "psychiatrist_age_groups",
            EntityKind::Condition => "psychiatrist_condition_restrictions",
            EntityKind::Medication => "psychiatrist_medication_restrictions",
        }
    }

    /// Entity-side column in the association table.
    pub fn association_column(&self) -> &'static str {
        match self {
            EntityKind::Insurance => "insurance_id",
            EntityKind::Location => "location_id",
            EntityKind::AgeGroup => "age_group_id",
            EntityKind::Condition => "condition_id",
            EntityKind::Medication => "medication_id",
        }
    }
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EntityKind::Insurance => write!(f, "insurance"),
            EntityKind::Location => write!(f, "location"),
            EntityKind::AgeGroup => write!(f, "age_group"),
            EntityKind::Condition => write!(f, "condition"),
            EntityKind::Medication => write!(f, "medication"),
        }
    }
}

impl std::str::FromStr for EntityKind {
    type Err = IntakeError;

    fn from_str(s: &str) -> Result<Self, IntakeError> {
        match s {
            "insurance" => Ok(EntityKind::Insurance),
            "location" => Ok(EntityKind::Location),
            "age_group" | "ageGroup" => Ok(EntityKind::AgeGroup),
            "condition" => Ok(EntityKind::Condition),
            "medication" => Ok(EntityKind::Medication),
            other => Err(IntakeError::UnknownEntityKind(other.to_string())),
        }
    }
}

impl Entity {
    /// List one category, id-ascending.
    pub async fn find_all(kind: EntityKind, pool: &PgPool) -> Result<Vec<Self>> {
        sqlx::query_as::<_, Entity>(&format!(
            "SELECT id, name FROM {} ORDER BY id",
            kind.table()
        ))
        .fetch_all(pool)
        .await
        .map_err(Into::into)
    }

    /// Insert a new row, letting the database assign the id.
    pub async fn create(kind: EntityKind, name: &str, pool: &PgPool) -> Result<Self> {
        sqlx::query_as::<_, Entity>(&format!(
            "INSERT INTO {} (name) VALUES ($1) RETURNING id, name",
            kind.table()
        ))
        .bind(name)
        .fetch_one(pool)
        .await
        .map_err(Into::into)
    }

    /// Rename a row. Returns None when the id does not exist.
    pub async fn rename(
        id: i32,
        kind: EntityKind,
        name: &str,
        pool: &PgPool,
    ) -> Result<Option<Self>> {
        sqlx::query_as::<_, Entity>(&format!(
            "UPDATE {} SET name = $2 WHERE id = $1 RETURNING id, name",
            kind.table()
        ))
        .bind(id)
        .bind(name)
        .fetch_optional(pool)
        .await
        .map_err(Into::into)
    }

    /// Delete a row. Association rows cascade. Returns rows affected.
    pub async fn delete(id: i32, kind: EntityKind, pool: &PgPool) -> Result<u64> {
        let result = sqlx::query(&format!("DELETE FROM {} WHERE id = $1", kind.table()))
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected())
    }
}

/// All five reference lists at once, the bootstrap payload for both the
/// public filter form and the admin page.
#[derive(Debug, Clone, Serialize)]
pub struct EntityOptions {
    pub insurances: Vec<Entity>,
    pub locations: Vec<Entity>,
    pub age_groups: Vec<Entity>,
    pub conditions: Vec<Entity>,
    pub medications: Vec<Entity>,
}

impl EntityOptions {
    pub async fn load(pool: &PgPool) -> Result<Self> {
        let (insurances, locations, age_groups, conditions, medications) = tokio::try_join!(
            Entity::find_all(EntityKind::Insurance, pool),
            Entity::find_all(EntityKind::Location, pool),
            Entity::find_all(EntityKind::AgeGroup, pool),
            Entity::find_all(EntityKind::Condition, pool),
            Entity::find_all(EntityKind::Medication, pool),
        )?;

        Ok(Self {
            insurances,
            locations,
            age_groups,
            conditions,
            medications,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn kind_round_trips_through_display() {
        for kind in EntityKind::ALL {
            let parsed = EntityKind::from_str(&kind.to_string()).unwrap();
            assert_eq!(parsed, kind);
        }
    }

    #[test]
    fn unknown_kind_is_rejected() {
        let err = EntityKind::from_str("specialty").unwrap_err();
        assert!(matches!(err, IntakeError::UnknownEntityKind(_)));
        assert!(err.to_string().contains("specialty"));
    }

    #[test]
    fn camel_case_age_group_is_accepted() {
        assert_eq!(
            EntityKind::from_str("ageGroup").unwrap(),
            EntityKind::AgeGroup
        );
    }
}
