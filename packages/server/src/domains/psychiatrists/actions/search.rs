//! Public search action.

use sqlx::PgPool;
use tracing::debug;

use crate::common::IntakeError;
use crate::domains::psychiatrists::data::PsychiatristData;
use crate::domains::psychiatrists::models::psychiatrist::Psychiatrist;
use crate::domains::psychiatrists::models::search::SearchCriteria;

/// Run the matching query and flatten each hit's association id-sets.
/// Results come back id-ascending.
pub async fn search_psychiatrists(
    criteria: &SearchCriteria,
    pool: &PgPool,
) -> Result<Vec<PsychiatristData>, IntakeError> {
    let psychiatrists = Psychiatrist::search(criteria, pool).await?;
    debug!(matches = psychiatrists.len(), "Search completed");

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
