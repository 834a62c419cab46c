use postnr::notifier::MemoryChangeNotifier;
use postnr::reconcile::{ReconcileOptions, Reconciler};
use postnr::store::RegionStore;
use postnr::test_utils::records::{record, source};
use postnr::test_utils::store::{insert_municipality, insert_zip_code, store_with_counties};
use postnr::types::{MunicipalityId, ZipCodeId};
use postnr_telemetry::tracing::init_test_tracing;

fn oslo_options() -> ReconcileOptions {
    ReconcileOptions {
        oslo_districts: true,
    }
}

#[tokio::test]
async fn overlay_creates_district_municipalities_under_oslo() {
    init_test_tracing();

    let store = store_with_counties(&[("03", "Oslo")]).await;
    let notifier = MemoryChangeNotifier::new();
    let reconciler =
        Reconciler::with_options(1, store.clone(), notifier.clone(), oslo_options());

    let summary = reconciler
        .run(source(vec![record("0050", "Oslo", "0301", "Oslo")]))
        .await
        .unwrap();

    // Overlay setup writes are not run mutations: only the zip counts.
    assert_eq!(summary.added, 1);

    for district_id in ["0301", "0302", "0310", "0317"] {
        let district = store
            .find_municipality(&MunicipalityId::new(district_id))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(district.county_id.as_str(), "03");
    }

    // The district table names the capital's center, not the authority's
    // blanket "Oslo" municipality row.
    let sentrum = store
        .find_municipality(&MunicipalityId::new("0301"))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(sentrum.name, "Sentrum");
}

#[tokio::test]
async fn oslo_zip_codes_resolve_to_their_district() {
    init_test_tracing();

    let store = store_with_counties(&[("03", "Oslo")]).await;
    let notifier = MemoryChangeNotifier::new();
    let reconciler =
        Reconciler::with_options(1, store.clone(), notifier.clone(), oslo_options());

    // The authority lists 0585 under the blanket municipality 0301; the
    // static membership table puts it in Bjerke (0310).
    reconciler
        .run(source(vec![record("0585", "Oslo", "0301", "Oslo")]))
        .await
        .unwrap();

    let zip_code = store
        .find_zip_code(&ZipCodeId::new("0585"))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(zip_code.municipality_id.as_str(), "0310");
}

#[tokio::test]
async fn districts_are_exempt_from_stale_detection() {
    init_test_tracing();

    let store = store_with_counties(&[("03", "Oslo")]).await;
    let notifier = MemoryChangeNotifier::new();
    let reconciler =
        Reconciler::with_options(1, store.clone(), notifier.clone(), oslo_options());

    // No incoming record references any district, yet none may be reported
    // stale: the overlay owns them, not the stream.
    let summary = reconciler
        .run(source(vec![record("0050", "Oslo", "0301", "Oslo")]))
        .await
        .unwrap();

    assert!(summary.municipalities_to_delete.is_empty());
}

#[tokio::test]
async fn overlay_does_not_touch_other_counties() {
    init_test_tracing();

    let store = store_with_counties(&[("03", "Oslo"), ("50", "Trøndelag")]).await;
    let notifier = MemoryChangeNotifier::new();
    let reconciler =
        Reconciler::with_options(1, store.clone(), notifier.clone(), oslo_options());

    reconciler
        .run(source(vec![record("7013", "Trondheim", "5001", "Trondheim")]))
        .await
        .unwrap();

    let zip_code = store
        .find_zip_code(&ZipCodeId::new("7013"))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(zip_code.municipality_id.as_str(), "5001");
}

#[tokio::test]
async fn blanket_oslo_row_does_not_rename_existing_districts() {
    init_test_tracing();

    let store = store_with_counties(&[("03", "Oslo")]).await;
    insert_municipality(&store, "0310", "Bjerke", "03").await;
    insert_zip_code(&store, "0585", "Oslo", "0310").await;

    let notifier = MemoryChangeNotifier::new();
    let reconciler =
        Reconciler::with_options(1, store.clone(), notifier.clone(), oslo_options());

    let summary = reconciler
        .run(source(vec![record("0585", "Oslo", "0301", "Oslo")]))
        .await
        .unwrap();

    // The incoming Oslo municipality row is skipped; the zip already sits in
    // its district, so nothing changes.
    assert_eq!(summary.changed, 0);
    assert!(summary.zip_code_moves.is_empty());

    let district = store
        .find_municipality(&MunicipalityId::new("0310"))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(district.name, "Bjerke");
}
