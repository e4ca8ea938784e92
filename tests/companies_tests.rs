mod common;

use common::{new_company, seed, test_pool};
use jobly::JoblyError;
use jobly::db::companies;
use jobly::db::models::{CompanyFilter, CompanyUpdate};

fn handles(list: &[jobly::db::Company]) -> Vec<&str> {
    list.iter().map(|c| c.handle.as_str()).collect()
}

#[tokio::test]
async fn create_then_get_round_trips() {
    let pool = test_pool().await;
    let created = companies::create(&pool, &new_company("new", "New", Some(1)))
        .await
        .expect("create failed");

    let detail = companies::get(&pool, "new").await.expect("get failed");
    assert_eq!(detail.company, created);
    assert!(detail.jobs.is_empty());

    let json = serde_json::to_value(&detail).unwrap();
    assert_eq!(json["jobs"], serde_json::json!([]));
    assert_eq!(json["numEmployees"], 1);
    assert_eq!(json["logoUrl"], "http://new.img");
}

#[tokio::test]
async fn create_duplicate_handle_fails() {
    let pool = test_pool().await;
    seed(&pool).await;

    let err = companies::create(&pool, &new_company("c1", "Other", None))
        .await
        .unwrap_err();
    assert!(matches!(err, JoblyError::Duplicate(ref m) if m == "Duplicate company: c1"));
    assert!(err.is_bad_request());
}

#[tokio::test]
async fn create_duplicate_name_names_the_clashing_name() {
    let pool = test_pool().await;
    seed(&pool).await;

    let err = companies::create(&pool, &new_company("c9", "C1", None))
        .await
        .unwrap_err();
    assert!(matches!(err, JoblyError::Duplicate(ref m) if m == "Duplicate company name: C1"));
    assert!(companies::get(&pool, "c9").await.is_err());
}

#[tokio::test]
async fn update_to_taken_name_names_the_clashing_name() {
    let pool = test_pool().await;
    seed(&pool).await;

    let data = CompanyUpdate {
        name: Some("C1".into()),
        ..Default::default()
    };
    let err = companies::update(&pool, "c2", &data).await.unwrap_err();
    assert!(matches!(err, JoblyError::Duplicate(ref m) if m == "Duplicate company name: C1"));
    assert_eq!(companies::get(&pool, "c2").await.unwrap().company.name, "C2");
}

#[tokio::test]
async fn find_all_orders_by_name_and_matches_empty_filter() {
    let pool = test_pool().await;
    seed(&pool).await;
    companies::create(&pool, &new_company("a0", "Aardvark", None))
        .await
        .unwrap();

    let all = companies::find_all(&pool).await.unwrap();
    assert_eq!(handles(&all), vec!["a0", "c1", "c2", "c3"]);

    let filtered = companies::find_filtered(&pool, &CompanyFilter::default())
        .await
        .unwrap();
    assert_eq!(filtered, all);
}

#[tokio::test]
async fn name_filter_is_case_insensitive_substring() {
    let pool = test_pool().await;
    seed(&pool).await;

    let filter = CompanyFilter {
        name: Some("c".into()),
        ..Default::default()
    };
    let found = companies::find_filtered(&pool, &filter).await.unwrap();
    assert_eq!(handles(&found), vec!["c1", "c2", "c3"]);

    let filter = CompanyFilter {
        name: Some("c2".into()),
        ..Default::default()
    };
    let found = companies::find_filtered(&pool, &filter).await.unwrap();
    assert_eq!(handles(&found), vec!["c2"]);
}

#[tokio::test]
async fn name_filter_folds_non_ascii_case() {
    let pool = test_pool().await;
    seed(&pool).await;
    companies::create(&pool, &new_company("ae", "Ärzte Élan", None))
        .await
        .unwrap();

    for needle in ["ärzte", "élan", "ÄRZTE ÉLAN"] {
        let filter = CompanyFilter {
            name: Some(needle.into()),
            ..Default::default()
        };
        let found = companies::find_filtered(&pool, &filter).await.unwrap();
        assert_eq!(handles(&found), vec!["ae"], "needle {needle:?}");
    }
}

#[tokio::test]
async fn name_filter_treats_wildcards_and_quotes_as_text() {
    let pool = test_pool().await;
    seed(&pool).await;

    for needle in ["%", "_", "' OR 1=1 --"] {
        let filter = CompanyFilter {
            name: Some(needle.into()),
            ..Default::default()
        };
        let found = companies::find_filtered(&pool, &filter).await.unwrap();
        assert!(found.is_empty(), "{needle:?} should match nothing");
    }
    assert_eq!(companies::find_all(&pool).await.unwrap().len(), 3);
}

#[tokio::test]
async fn employee_bounds_are_inclusive_and_narrow_monotonically() {
    let pool = test_pool().await;
    seed(&pool).await;

    let min_only = CompanyFilter {
        min_employees: Some(2),
        ..Default::default()
    };
    let max_only = CompanyFilter {
        max_employees: Some(2),
        ..Default::default()
    };
    let both = CompanyFilter {
        min_employees: Some(2),
        max_employees: Some(2),
        ..Default::default()
    };

    let by_min = companies::find_filtered(&pool, &min_only).await.unwrap();
    let by_max = companies::find_filtered(&pool, &max_only).await.unwrap();
    let by_both = companies::find_filtered(&pool, &both).await.unwrap();

    assert_eq!(handles(&by_min), vec!["c2", "c3"]);
    assert_eq!(handles(&by_max), vec!["c1", "c2"]);
    assert_eq!(handles(&by_both), vec!["c2"]);

    let intersection: Vec<_> = by_min.iter().filter(|c| by_max.contains(c)).collect();
    assert_eq!(intersection, by_both.iter().collect::<Vec<_>>());
}

#[tokio::test]
async fn all_three_filters_combine() {
    let pool = test_pool().await;
    seed(&pool).await;

    let filter = CompanyFilter {
        name: Some("3".into()),
        min_employees: Some(1),
        max_employees: Some(3),
    };
    let found = companies::find_filtered(&pool, &filter).await.unwrap();
    assert_eq!(handles(&found), vec!["c3"]);
}

#[tokio::test]
async fn get_includes_jobs_in_id_order() {
    let pool = test_pool().await;
    let seeded = seed(&pool).await;

    let detail = companies::get(&pool, "c1").await.unwrap();
    assert_eq!(detail.jobs, seeded.jobs);

    let empty = companies::get(&pool, "c2").await.unwrap();
    assert!(empty.jobs.is_empty());
}

#[tokio::test]
async fn get_missing_is_not_found() {
    let pool = test_pool().await;
    let err = companies::get(&pool, "nope").await.unwrap_err();
    assert!(matches!(err, JoblyError::NotFound(ref m) if m == "No company: nope"));
}

#[tokio::test]
async fn update_touches_only_given_fields() {
    let pool = test_pool().await;
    let seeded = seed(&pool).await;

    let data = CompanyUpdate {
        name: Some("New".into()),
        num_employees: Some(None),
        ..Default::default()
    };
    let updated = companies::update(&pool, "c1", &data).await.unwrap();

    let before = &seeded.companies[0];
    assert_eq!(updated.handle, "c1");
    assert_eq!(updated.name, "New");
    assert_eq!(updated.num_employees, None);
    assert_eq!(updated.description, before.description);
    assert_eq!(updated.logo_url, before.logo_url);

    let stored = companies::get(&pool, "c1").await.unwrap().company;
    assert_eq!(stored, updated);
}

#[tokio::test]
async fn update_with_no_data_is_rejected_without_mutation() {
    let pool = test_pool().await;
    let seeded = seed(&pool).await;

    let err = companies::update(&pool, "c1", &CompanyUpdate::default())
        .await
        .unwrap_err();
    assert!(matches!(err, JoblyError::BadRequest(ref m) if m == "No data"));

    let stored = companies::get(&pool, "c1").await.unwrap().company;
    assert_eq!(stored, seeded.companies[0]);
}

#[tokio::test]
async fn update_missing_is_not_found() {
    let pool = test_pool().await;
    seed(&pool).await;

    let data = CompanyUpdate {
        description: Some("x".into()),
        ..Default::default()
    };
    let err = companies::update(&pool, "nope", &data).await.unwrap_err();
    assert!(matches!(err, JoblyError::NotFound(_)));
    assert_eq!(companies::find_all(&pool).await.unwrap().len(), 3);
}

#[tokio::test]
async fn remove_cascades_to_jobs() {
    let pool = test_pool().await;
    seed(&pool).await;

    companies::remove(&pool, "c1").await.unwrap();

    let err = companies::get(&pool, "c1").await.unwrap_err();
    assert!(matches!(err, JoblyError::NotFound(_)));
    assert!(jobly::db::jobs::find_all(&pool).await.unwrap().is_empty());
}

#[tokio::test]
async fn remove_missing_is_not_found() {
    let pool = test_pool().await;
    seed(&pool).await;

    let err = companies::remove(&pool, "nope").await.unwrap_err();
    assert!(matches!(err, JoblyError::NotFound(_)));
    assert_eq!(companies::find_all(&pool).await.unwrap().len(), 3);
}
