use postnr::error::ErrorKind;
use postnr::notifier::MemoryChangeNotifier;
use postnr::postnr_error;
use postnr::reconcile::Reconciler;
use postnr::source::MemoryRecordSource;
use postnr::store::RegionStore;
use postnr::test_utils::records::{record, source};
use postnr::test_utils::store::{insert_municipality, insert_zip_code, store_with_counties};
use postnr::types::{Event, EventType, MunicipalityId, ZipCodeId};
use postnr_telemetry::tracing::init_test_tracing;

#[tokio::test]
async fn new_municipality_and_zip_code_are_created() {
    init_test_tracing();

    let store = store_with_counties(&[("03", "Oslo")]).await;
    let notifier = MemoryChangeNotifier::new();
    let reconciler = Reconciler::new(1, store.clone(), notifier.clone());

    let summary = reconciler
        .run(source(vec![record("0585", "Postboks", "0301", "Oslo Sentrum")]))
        .await
        .unwrap();

    assert_eq!(summary.added, 2);
    assert_eq!(summary.changed, 0);
    assert!(summary.municipality_moves.is_empty());
    assert!(summary.zip_code_moves.is_empty());
    assert!(summary.municipalities_to_delete.is_empty());
    assert!(summary.zip_codes_to_delete.is_empty());

    let municipality = store
        .find_municipality(&MunicipalityId::new("0301"))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(municipality.name, "Oslo Sentrum");
    assert_eq!(municipality.county_id.as_str(), "03");

    let zip_code = store
        .find_zip_code(&ZipCodeId::new("0585"))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(zip_code.name, "Postboks");
    assert_eq!(zip_code.municipality_id.as_str(), "0301");

    // Nothing moved and nothing went stale, so the only notification is the
    // per-run summary.
    let events = notifier.events().await;
    assert_eq!(events.len(), 1);
    assert!(matches!(&events[0], Event::ZipCodesUpdated(event) if event.added == 2));
}

#[tokio::test]
async fn unpadded_municipality_ids_reuse_the_padded_entity() {
    init_test_tracing();

    let store = store_with_counties(&[("03", "Oslo")]).await;
    let notifier = MemoryChangeNotifier::new();
    let reconciler = Reconciler::new(1, store.clone(), notifier.clone());

    // The authority is not consistent about zero-padding; both spellings must
    // resolve to the same municipality.
    let summary = reconciler
        .run(source(vec![
            record("0585", "Postboks", "0301", "Oslo Sentrum"),
            record("0151", "Oslo", "301", "Oslo Sentrum"),
        ]))
        .await
        .unwrap();

    // One municipality, two zip codes.
    assert_eq!(summary.added, 3);
    assert_eq!(summary.changed, 0);
}

#[tokio::test]
async fn second_run_with_unchanged_stream_is_a_noop() {
    init_test_tracing();

    let store = store_with_counties(&[("03", "Oslo"), ("50", "Trøndelag")]).await;
    let notifier = MemoryChangeNotifier::new();
    let reconciler = Reconciler::new(1, store.clone(), notifier.clone());

    let records = vec![
        record("0585", "Postboks", "0301", "Oslo Sentrum"),
        record("7013", "Trondheim", "5001", "Trondheim"),
    ];

    let first = reconciler
        .run(MemoryRecordSource::new(records.clone()))
        .await
        .unwrap();
    assert_eq!(first.added, 4);

    notifier.clear().await;

    let second = reconciler
        .run(MemoryRecordSource::new(records))
        .await
        .unwrap();

    assert_eq!(second.added, 0);
    assert_eq!(second.changed, 0);
    assert!(second.municipality_moves.is_empty());
    assert!(second.zip_code_moves.is_empty());
    assert!(second.municipalities_to_delete.is_empty());
    assert!(second.zip_codes_to_delete.is_empty());

    // No reassignment or deletion notifications; only the summary fires
    // again.
    let events = notifier.events().await;
    assert_eq!(events.len(), 1);
    assert!(matches!(&events[0], Event::ZipCodesUpdated(event) if event.changed == 0));
}

#[tokio::test]
async fn municipality_county_reassignment_is_reported() {
    init_test_tracing();

    // Post county-merge situation: the municipality row still carries the old
    // county while its id derives the new one.
    let store = store_with_counties(&[("16", "Sør-Trøndelag"), ("50", "Trøndelag")]).await;
    insert_municipality(&store, "5001", "Trondheim", "16").await;

    let notifier = MemoryChangeNotifier::new();
    let reconciler = Reconciler::new(1, store.clone(), notifier.clone());

    let summary = reconciler
        .run(source(vec![record("7013", "Trondheim", "5001", "Trondheim")]))
        .await
        .unwrap();

    assert_eq!(summary.added, 1); // the zip code
    assert_eq!(summary.changed, 1); // the municipality, counted once
    assert_eq!(
        summary.municipality_moves.get(&MunicipalityId::new("5001")),
        Some(&("16".into(), "50".into()))
    );

    let events = notifier
        .events_of_type(EventType::MunicipalityCountyUpdated)
        .await;
    assert_eq!(events.len(), 1);
    let Event::MunicipalityCountyUpdated(event) = &events[0] else {
        panic!("filtered on event type");
    };
    assert_eq!(event.old_county_id.as_str(), "16");
    // The carried entity already has its new owner assigned.
    assert_eq!(event.municipality.id.as_str(), "5001");
    assert_eq!(event.municipality.county_id.as_str(), "50");

    let municipality = store
        .find_municipality(&MunicipalityId::new("5001"))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(municipality.county_id.as_str(), "50");
}

#[tokio::test]
async fn zip_code_municipality_reassignment_is_reported() {
    init_test_tracing();

    let store = store_with_counties(&[("03", "Oslo")]).await;
    insert_municipality(&store, "0301", "Oslo Sentrum", "03").await;
    insert_municipality(&store, "0302", "Gamle Oslo", "03").await;
    insert_zip_code(&store, "0585", "Postboks", "0301").await;

    let notifier = MemoryChangeNotifier::new();
    let reconciler = Reconciler::new(1, store.clone(), notifier.clone());

    let summary = reconciler
        .run(source(vec![record("0585", "Postboks", "0302", "Gamle Oslo")]))
        .await
        .unwrap();

    assert_eq!(summary.added, 0);
    assert_eq!(summary.changed, 1);
    assert_eq!(
        summary.zip_code_moves.get(&ZipCodeId::new("0585")),
        Some(&("0301".into(), "0302".into()))
    );

    let events = notifier
        .events_of_type(EventType::ZipCodeMunicipalityUpdated)
        .await;
    assert_eq!(events.len(), 1);
    let Event::ZipCodeMunicipalityUpdated(event) = &events[0] else {
        panic!("filtered on event type");
    };
    assert_eq!(event.old_municipality_id.as_str(), "0301");
    assert_eq!(event.zip_code.municipality_id.as_str(), "0302");

    let zip_code = store
        .find_zip_code(&ZipCodeId::new("0585"))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(zip_code.municipality_id.as_str(), "0302");
}

#[tokio::test]
async fn entity_changed_in_several_fields_counts_once() {
    init_test_tracing();

    let store = store_with_counties(&[("16", "Sør-Trøndelag"), ("50", "Trøndelag")]).await;
    insert_municipality(&store, "5001", "Trondhjem", "16").await;

    let notifier = MemoryChangeNotifier::new();
    let reconciler = Reconciler::new(1, store.clone(), notifier.clone());

    // Name and owning county both differ from the stored entity.
    let summary = reconciler
        .run(source(vec![record("7013", "Trondheim", "5001", "Trondheim")]))
        .await
        .unwrap();

    assert_eq!(summary.changed, 1);

    let municipality = store
        .find_municipality(&MunicipalityId::new("5001"))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(municipality.name, "Trondheim");
    assert_eq!(municipality.county_id.as_str(), "50");
}

#[tokio::test]
async fn name_overwrite_alone_counts_as_changed_without_events() {
    init_test_tracing();

    let store = store_with_counties(&[("03", "Oslo")]).await;
    insert_municipality(&store, "0301", "Olso Sentrum", "03").await;
    insert_zip_code(&store, "0585", "Postboks", "0301").await;

    let notifier = MemoryChangeNotifier::new();
    let reconciler = Reconciler::new(1, store.clone(), notifier.clone());

    let summary = reconciler
        .run(source(vec![record("0585", "Postboks", "0301", "Oslo Sentrum")]))
        .await
        .unwrap();

    assert_eq!(summary.added, 0);
    assert_eq!(summary.changed, 1);
    assert!(summary.municipality_moves.is_empty());

    // A plain rename is not a structural change; no reassignment event fires.
    assert!(
        notifier
            .events_of_type(EventType::MunicipalityCountyUpdated)
            .await
            .is_empty()
    );

    let municipality = store
        .find_municipality(&MunicipalityId::new("0301"))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(municipality.name, "Oslo Sentrum");
}

#[tokio::test]
async fn stale_entities_are_reported_but_not_deleted() {
    init_test_tracing();

    let store = store_with_counties(&[("03", "Oslo")]).await;
    insert_municipality(&store, "0301", "Oslo Sentrum", "03").await;
    insert_municipality(&store, "0302", "Gamle Oslo", "03").await;
    insert_zip_code(&store, "0585", "Postboks", "0301").await;
    insert_zip_code(&store, "9999", "Nedlagt", "0302").await;

    let notifier = MemoryChangeNotifier::new();
    let reconciler = Reconciler::new(1, store.clone(), notifier.clone());

    let summary = reconciler
        .run(source(vec![record("0585", "Postboks", "0301", "Oslo Sentrum")]))
        .await
        .unwrap();

    let stale_municipalities: Vec<_> = summary
        .municipalities_to_delete
        .iter()
        .map(|municipality| municipality.id.as_str())
        .collect();
    assert_eq!(stale_municipalities, vec!["0302"]);

    let stale_zip_codes: Vec<_> = summary
        .zip_codes_to_delete
        .iter()
        .map(|zip_code| zip_code.id.as_str())
        .collect();
    assert_eq!(stale_zip_codes, vec!["9999"]);

    // Deletion is an external decision; the entities are still there.
    assert!(
        store
            .find_municipality(&MunicipalityId::new("0302"))
            .await
            .unwrap()
            .is_some()
    );
    assert!(
        store
            .find_zip_code(&ZipCodeId::new("9999"))
            .await
            .unwrap()
            .is_some()
    );

    // Summary first, then the two deletion-candidate notifications.
    let events = notifier.events().await;
    let event_types: Vec<_> = events.iter().map(|event| event.event_type()).collect();
    assert_eq!(
        event_types,
        vec![
            EventType::ZipCodesUpdated,
            EventType::MunicipalitiesToDeleteFound,
            EventType::ZipCodesToDeleteFound,
        ]
    );
}

#[tokio::test]
async fn unknown_county_aborts_the_run_keeping_prior_records() {
    init_test_tracing();

    let store = store_with_counties(&[("03", "Oslo")]).await;
    let notifier = MemoryChangeNotifier::new();
    let reconciler = Reconciler::new(1, store.clone(), notifier.clone());

    // The second record derives county "11", which the store does not know.
    let error = reconciler
        .run(source(vec![
            record("0585", "Postboks", "0301", "Oslo Sentrum"),
            record("4001", "Stavanger", "1103", "Stavanger"),
            record("0151", "Oslo", "0302", "Gamle Oslo"),
        ]))
        .await
        .unwrap_err();

    assert_eq!(error.kind(), ErrorKind::UnknownCounty);

    // Records before the failure stay applied; the failing record and
    // everything after it apply nothing.
    assert!(
        store
            .find_zip_code(&ZipCodeId::new("0585"))
            .await
            .unwrap()
            .is_some()
    );
    assert!(
        store
            .find_municipality(&MunicipalityId::new("1103"))
            .await
            .unwrap()
            .is_none()
    );
    assert!(
        store
            .find_zip_code(&ZipCodeId::new("0151"))
            .await
            .unwrap()
            .is_none()
    );

    // No summary or stale detection for an aborted run.
    assert!(notifier.events().await.is_empty());
}

#[tokio::test]
async fn source_failure_propagates_unmodified() {
    init_test_tracing();

    let store = store_with_counties(&[("03", "Oslo")]).await;
    let notifier = MemoryChangeNotifier::new();
    let reconciler = Reconciler::new(1, store.clone(), notifier.clone());

    let error = reconciler
        .run(MemoryRecordSource::failing_after(
            vec![record("0585", "Postboks", "0301", "Oslo Sentrum")],
            postnr_error!(ErrorKind::SourceIoError, "upstream file was truncated"),
        ))
        .await
        .unwrap_err();

    assert_eq!(error.kind(), ErrorKind::SourceIoError);

    // The record produced before the failure was fully applied.
    assert!(
        store
            .find_zip_code(&ZipCodeId::new("0585"))
            .await
            .unwrap()
            .is_some()
    );
    assert!(notifier.events().await.is_empty());
}

#[tokio::test]
async fn duplicate_zip_records_apply_last_write_wins() {
    init_test_tracing();

    let store = store_with_counties(&[("03", "Oslo")]).await;
    let notifier = MemoryChangeNotifier::new();
    let reconciler = Reconciler::new(1, store.clone(), notifier.clone());

    let summary = reconciler
        .run(source(vec![
            record("0585", "Postboks", "0301", "Oslo Sentrum"),
            record("0585", "Refstad", "0301", "Oslo Sentrum"),
        ]))
        .await
        .unwrap();

    // First sighting creates, second updates the name in place.
    assert_eq!(summary.added, 2);
    assert_eq!(summary.changed, 1);

    let zip_code = store
        .find_zip_code(&ZipCodeId::new("0585"))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(zip_code.name, "Refstad");
}
