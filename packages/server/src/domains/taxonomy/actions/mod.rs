//! Taxonomy actions
//!
//! Admin-side mutations over the reference lists. Every action validates its
//! inputs before touching storage and raises a descriptive fault otherwise.

use sqlx::PgPool;
use tracing::info;

use crate::common::IntakeError;
use crate::domains::taxonomy::models::entity::{Entity, EntityKind, EntityOptions};

/// All five reference lists, for the filter form and admin bootstrap.
pub async fn list_options(pool: &PgPool) -> Result<EntityOptions, IntakeError> {
    EntityOptions::load(pool).await.map_err(Into::into)
}

fn parse_kind(kind: &str) -> Result<EntityKind, IntakeError> {
    kind.parse()
}

fn validated_name(name: &str) -> Result<&str, IntakeError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(IntakeError::Validation(
            "Entity name must not be empty".to_string(),
        ));
    }
    Ok(trimmed)
}

/// Create a reference row in the named category.
pub async fn add_entity(kind: &str, name: &str, pool: &PgPool) -> Result<Entity, IntakeError> {
    let kind = parse_kind(kind)?;
    let name = validated_name(name)?;

    let entity = Entity::create(kind, name, pool).await?;
    info!(kind = %kind, id = entity.id, "Entity created");
    Ok(entity)
}

/// Rename an existing reference row.
pub async fn rename_entity(
    kind: &str,
    id: i32,
    name: &str,
    pool: &PgPool,
) -> Result<Entity, IntakeError> {
    let kind = parse_kind(kind)?;
    let name = validated_name(name)?;

    let entity = Entity::rename(id, kind, name, pool)
        .await?
        .ok_or_else(|| IntakeError::NotFound(format!("No {} with id {}", kind, id)))?;
    info!(kind = %kind, id, "Entity renamed");
    Ok(entity)
}

/// Delete a reference row. Referencing association rows cascade away.
pub async fn remove_entity(kind: &str, id: i32, pool: &PgPool) -> Result<(), IntakeError> {
    let kind = parse_kind(kind)?;

    let deleted = Entity::delete(id, kind, pool).await?;
    if deleted == 0 {
        return Err(IntakeError::NotFound(format!(
            "No {} with id {}",
            kind, id
        )));
    }
    info!(kind = %kind, id, "Entity deleted");
    Ok(())
}
