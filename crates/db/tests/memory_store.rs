//! Contract tests for the in-memory record store.
//!
//! The same behaviour is expected from the PostgreSQL store (see
//! `pg_store.rs`): canonical ordering, defaults, unique numbers, patch
//! semantics, and tolerant related-report resolution.

use assert_matches::assert_matches;
use chrono::Utc;
use harsia_db::models::admin_user::CreateAdminUser;
use harsia_db::models::recommendation::{CreateRecommendation, UpdateRecommendation};
use harsia_db::models::report::{CreateReport, UpdateReport};
use harsia_db::store::{
    AuthorizationStore, CollectionStore, MemoryRecordStore, Recommendations, Reports, StoreError,
};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn new_report(number: &str, published: Option<&str>) -> CreateReport {
    CreateReport {
        report_number: number.to_string(),
        title_en: format!("Report {number}"),
        title_gr: format!("Έκθεση {number}"),
        description_en: "Summary".to_string(),
        description_gr: "Περίληψη".to_string(),
        publication_date: published.map(|d| d.parse().unwrap()),
        ..Default::default()
    }
}

fn new_recommendation(number: &str, related: Option<i64>) -> CreateRecommendation {
    CreateRecommendation {
        recommendation_number: number.to_string(),
        title_en: "Improve training".to_string(),
        title_gr: "Βελτίωση εκπαίδευσης".to_string(),
        description_en: "d".to_string(),
        description_gr: "δ".to_string(),
        issue_date: "2023-05-05".parse().unwrap(),
        recipient_en: "Operator".to_string(),
        recipient_gr: "Φορέας".to_string(),
        related_report_id: related,
        ..Default::default()
    }
}

// ---------------------------------------------------------------------------
// Reports
// ---------------------------------------------------------------------------

#[tokio::test]
async fn insert_applies_defaults() {
    let store = MemoryRecordStore::new();
    let report = CollectionStore::<Reports>::insert(&store, new_report("R-1", None))
        .await
        .unwrap();
    assert_eq!(report.status, "Draft");
    assert_eq!(report.category, "Accident");
    assert_eq!(report.created_at, report.updated_at);
}

#[tokio::test]
async fn list_is_newest_publication_first_with_undated_last() {
    let store = MemoryRecordStore::new();
    for (n, d) in [
        ("R-1", Some("2021-06-01")),
        ("R-2", None),
        ("R-3", Some("2023-02-01")),
    ] {
        CollectionStore::<Reports>::insert(&store, new_report(n, d))
            .await
            .unwrap();
    }
    let numbers: Vec<String> = CollectionStore::<Reports>::list(&store)
        .await
        .unwrap()
        .into_iter()
        .map(|r| r.report_number)
        .collect();
    assert_eq!(numbers, vec!["R-3", "R-1", "R-2"]);
}

#[tokio::test]
async fn duplicate_report_number_conflicts() {
    let store = MemoryRecordStore::new();
    CollectionStore::<Reports>::insert(&store, new_report("R-1", None))
        .await
        .unwrap();
    let err = CollectionStore::<Reports>::insert(&store, new_report("R-1", None))
        .await
        .unwrap_err();
    assert_matches!(err, StoreError::Conflict(msg) if msg.contains("uq_investigation_reports_report_number"));
}

#[tokio::test]
async fn invalid_enumeration_is_rejected() {
    let store = MemoryRecordStore::new();
    let input = CreateReport {
        category: Some("Mishap".into()),
        ..new_report("R-1", None)
    };
    let err = CollectionStore::<Reports>::insert(&store, input)
        .await
        .unwrap_err();
    assert_matches!(err, StoreError::Invalid(_));
    assert!(CollectionStore::<Reports>::list(&store).await.unwrap().is_empty());
}

#[tokio::test]
async fn update_patches_only_given_fields() {
    let store = MemoryRecordStore::new();
    let created = CollectionStore::<Reports>::insert(&store, new_report("R-1", None))
        .await
        .unwrap();
    let stamp = Utc::now();
    let patch = UpdateReport {
        status: Some("Final".into()),
        ..Default::default()
    };
    let updated = CollectionStore::<Reports>::update(&store, created.id, patch, stamp)
        .await
        .unwrap();
    assert_eq!(updated.status, "Final");
    assert_eq!(updated.title_en, created.title_en);
    assert_eq!(updated.updated_at, stamp);
}

#[tokio::test]
async fn missing_ids_are_not_found() {
    let store = MemoryRecordStore::new();
    assert_matches!(
        CollectionStore::<Reports>::get(&store, 99).await,
        Err(StoreError::NotFound { id: 99, .. })
    );
    assert_matches!(
        CollectionStore::<Reports>::delete(&store, 99).await,
        Err(StoreError::NotFound { .. })
    );
    assert_matches!(
        CollectionStore::<Reports>::update(&store, 99, UpdateReport::default(), Utc::now()).await,
        Err(StoreError::NotFound { .. })
    );
}

// ---------------------------------------------------------------------------
// Recommendations
// ---------------------------------------------------------------------------

#[tokio::test]
async fn recommendation_resolves_related_report() {
    let store = MemoryRecordStore::new();
    let report = CollectionStore::<Reports>::insert(&store, new_report("R-1", None))
        .await
        .unwrap();
    let rec = CollectionStore::<Recommendations>::insert(
        &store,
        new_recommendation("SR-1", Some(report.id)),
    )
    .await
    .unwrap();
    assert_eq!(rec.status, "Open");
    assert_eq!(rec.category, "Operational");
    let related = rec.related_report.unwrap();
    assert_eq!(related.report_number, "R-1");
}

#[tokio::test]
async fn dangling_reference_reads_as_none() {
    let store = MemoryRecordStore::new();
    let report = CollectionStore::<Reports>::insert(&store, new_report("R-1", None))
        .await
        .unwrap();
    let rec = CollectionStore::<Recommendations>::insert(
        &store,
        new_recommendation("SR-1", Some(report.id)),
    )
    .await
    .unwrap();
    CollectionStore::<Reports>::delete(&store, report.id)
        .await
        .unwrap();

    let reread = CollectionStore::<Recommendations>::get(&store, rec.id)
        .await
        .unwrap();
    assert_eq!(reread.related_report_id, Some(report.id));
    assert_eq!(reread.related_report, None);
}

#[tokio::test]
async fn recommendation_update_can_rename_to_own_number() {
    let store = MemoryRecordStore::new();
    let rec = CollectionStore::<Recommendations>::insert(&store, new_recommendation("SR-1", None))
        .await
        .unwrap();
    let patch = UpdateRecommendation {
        recommendation_number: Some("SR-1".into()),
        status: Some("Implemented".into()),
        ..Default::default()
    };
    let updated = CollectionStore::<Recommendations>::update(&store, rec.id, patch, Utc::now())
        .await
        .unwrap();
    assert_eq!(updated.status, "Implemented");
}

// ---------------------------------------------------------------------------
// Authorization
// ---------------------------------------------------------------------------

#[tokio::test]
async fn admin_lookup_by_email() {
    let store = MemoryRecordStore::new();
    store
        .seed_admin_user(CreateAdminUser {
            email: "admin@harsia.gr".into(),
            name: "Admin".into(),
            role: None,
        })
        .await
        .unwrap();
    let user = store
        .find_admin_user_by_email("admin@harsia.gr")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(user.role, "admin");
    assert!(store
        .find_admin_user_by_email("nobody@harsia.gr")
        .await
        .unwrap()
        .is_none());
}
