//! Entity store integration tests.

mod common;

use common::{create_test_entity, create_test_psychiatrist, test_attributes, TestHarness};
use intake_core::common::IntakeError;
use intake_core::domains::psychiatrists::models::psychiatrist::{AssociationSets, Psychiatrist};
use intake_core::domains::taxonomy::actions::{add_entity, remove_entity, rename_entity};
use intake_core::domains::taxonomy::models::entity::{Entity, EntityKind};
use test_context::test_context;

#[test_context(TestHarness)]
#[tokio::test]
async fn created_entity_is_retrievable_in_its_category(ctx: &TestHarness) {
    let created = add_entity("insurance", "Aetna", &ctx.db_pool).await.unwrap();

    let all = Entity::find_all(EntityKind::Insurance, &ctx.db_pool)
        .await
        .unwrap();
    assert!(all.iter().any(|e| e.id == created.id && e.name == "Aetna"));

    // Ids ascend within a category listing
    let ids: Vec<i32> = all.iter().map(|e| e.id).collect();
    let mut sorted = ids.clone();
    sorted.sort_unstable();
    assert_eq!(ids, sorted);
}

#[test_context(TestHarness)]
#[tokio::test]
async fn empty_name_is_a_validation_fault(ctx: &TestHarness) {
    let err = add_entity("insurance", "   ", &ctx.db_pool).await.unwrap_err();
    assert!(matches!(err, IntakeError::Validation(_)));
}

#[test_context(TestHarness)]
#[tokio::test]
async fn unknown_category_is_rejected(ctx: &TestHarness) {
    let err = add_entity("specialty", "Forensics", &ctx.db_pool)
        .await
        .unwrap_err();
    assert!(matches!(err, IntakeError::UnknownEntityKind(_)));

    let err = remove_entity("specialty", 1, &ctx.db_pool).await.unwrap_err();
    assert!(matches!(err, IntakeError::UnknownEntityKind(_)));
}

#[test_context(TestHarness)]
#[tokio::test]
async fn rename_persists(ctx: &TestHarness) {
    let created = add_entity("medication", "Lithum", &ctx.db_pool).await.unwrap();

    let renamed = rename_entity("medication", created.id, "Lithium", &ctx.db_pool)
        .await
        .unwrap();
    assert_eq!(renamed.name, "Lithium");

    let all = Entity::find_all(EntityKind::Medication, &ctx.db_pool)
        .await
        .unwrap();
    assert!(all.iter().any(|e| e.id == created.id && e.name == "Lithium"));
}

#[test_context(TestHarness)]
#[tokio::test]
async fn rename_unknown_id_is_not_found(ctx: &TestHarness) {
    let err = rename_entity("location", 999_999, "Nowhere", &ctx.db_pool)
        .await
        .unwrap_err();
    assert!(matches!(err, IntakeError::NotFound(_)));
}

#[test_context(TestHarness)]
#[tokio::test]
async fn delete_unknown_id_is_not_found(ctx: &TestHarness) {
    let err = remove_entity("condition", 999_999, &ctx.db_pool)
        .await
        .unwrap_err();
    assert!(matches!(err, IntakeError::NotFound(_)));
}

#[test_context(TestHarness)]
#[tokio::test]
async fn deleting_a_referenced_entity_clears_the_association(ctx: &TestHarness) {
    let loc = create_test_entity(&ctx.db_pool, EntityKind::Location, "Duluth")
        .await
        .unwrap();
    let psychiatrist_id = create_test_psychiatrist(
        &ctx.db_pool,
        test_attributes("Cass", "Cade"),
        AssociationSets {
            locations: vec![loc],
            ..Default::default()
        },
    )
    .await
    .unwrap();

    remove_entity("location", loc, &ctx.db_pool).await.unwrap();

    let sets = Psychiatrist::association_sets(psychiatrist_id, &ctx.db_pool)
        .await
        .unwrap();
    assert!(
        sets.locations.is_empty(),
        "Cascade should clear the orphaned association row"
    );
}
