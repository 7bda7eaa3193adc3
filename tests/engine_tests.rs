//! End-to-end engine scenarios: lending lifecycle, reservations,
//! reviews, recommendations, statistics and the snapshot round trip.

use atheneum_engine::{
    config::{EngineConfig, ReservationConfig},
    error::{EngineError, ErrorCode, Outcome},
    models::{BookStatus, NewBook, NewReview, SearchQuery, TransactionKind, TransactionStatus},
    LibraryEngine,
};

fn new_book(id: &str, title: &str, author: &str, category: &str, year: i32, copies: u32) -> NewBook {
    NewBook {
        id: id.into(),
        title: title.into(),
        author: author.into(),
        publisher: "Test House".into(),
        isbn: format!("isbn-{id}"),
        publication_year: year,
        category: category.into(),
        total_copies: copies,
        location: "A-1".into(),
        description: String::new(),
        pages: 300,
        language: "English".into(),
    }
}

fn engine_with_catalog() -> LibraryEngine {
    let mut engine = LibraryEngine::new(EngineConfig::default());
    engine
        .add_book(new_book("B001", "Dune", "Frank Herbert", "SciFi", 1965, 2))
        .unwrap();
    engine
        .add_book(new_book("B002", "Dune Messiah", "Frank Herbert", "SciFi", 1969, 1))
        .unwrap();
    engine
        .add_book(new_book("B003", "Emma", "Jane Austen", "Classic", 1815, 3))
        .unwrap();
    engine
}

#[test]
fn duplicate_book_id_is_a_conflict() {
    let mut engine = engine_with_catalog();
    let err = engine
        .add_book(new_book("B001", "Other", "Someone", "SciFi", 2000, 1))
        .unwrap_err();
    assert!(matches!(err, EngineError::Conflict(_)));
}

#[test]
fn borrow_exhausts_copies_then_fails_unavailable() {
    // Scenario A: total=2, two borrows drain the pool, the third fails.
    let mut engine = engine_with_catalog();
    assert!(engine.get_book("B001").unwrap().is_available());

    engine.borrow_book("u1", "B001", Some(7)).unwrap();
    assert_eq!(engine.get_book("B001").unwrap().available_copies, 1);

    engine.borrow_book("u2", "B001", Some(7)).unwrap();
    let book = engine.get_book("B001").unwrap();
    assert_eq!(book.available_copies, 0);
    assert_eq!(book.status, BookStatus::Borrowed);
    assert!(!book.is_available());

    let err = engine.borrow_book("u3", "B001", Some(7)).unwrap_err();
    assert!(matches!(err, EngineError::Unavailable(_)));
}

#[test]
fn borrow_missing_book_is_not_found() {
    let mut engine = engine_with_catalog();
    let err = engine.borrow_book("u1", "B999", None).unwrap_err();
    assert!(matches!(err, EngineError::NotFound(_)));
}

#[test]
fn return_restores_copies_and_charges_no_fine_when_on_time() {
    // Scenario B
    let mut engine = engine_with_catalog();
    let first = engine.borrow_book("u1", "B001", Some(7)).unwrap();
    engine.borrow_book("u2", "B001", Some(7)).unwrap();

    let fine = engine.return_book(&first).unwrap();
    assert_eq!(fine, 0.0);

    let book = engine.get_book("B001").unwrap();
    assert_eq!(book.available_copies, 1);
    assert_eq!(book.status, BookStatus::Available);

    let closed = engine.get_transaction(&first).unwrap();
    assert_eq!(closed.status, TransactionStatus::Completed);
    assert!(closed.returned_at.is_some());
}

#[test]
fn double_return_is_invalid_state() {
    let mut engine = engine_with_catalog();
    let loan = engine.borrow_book("u1", "B003", None).unwrap();
    engine.return_book(&loan).unwrap();
    let err = engine.return_book(&loan).unwrap_err();
    assert!(matches!(err, EngineError::InvalidState(_)));
}

#[test]
fn returning_a_non_borrow_entry_is_invalid_state() {
    let mut engine = engine_with_catalog();
    engine.borrow_book("u1", "B002", None).unwrap();
    let (reservation, _) = engine.reserve_book("u2", "B002").unwrap();
    // find the ledger entry logged for the reservation
    let entry = engine
        .all_transactions()
        .into_iter()
        .find(|t| t.kind == TransactionKind::Reservation && t.book_id == "B002")
        .unwrap();
    let err = engine.return_book(&entry.id).unwrap_err();
    assert!(matches!(err, EngineError::InvalidState(_)));
    // unrelated: cancelling twice is invalid too
    engine.cancel_reservation(&reservation.id).unwrap();
    let err = engine.cancel_reservation(&reservation.id).unwrap_err();
    assert!(matches!(err, EngineError::InvalidState(_)));
}

#[test]
fn late_return_charges_the_flat_daily_fine() {
    let mut engine = engine_with_catalog();
    let rate = engine.config().lending.fine_per_day;

    // due date one day in the past, so the loan comes back a day late
    let loan = engine.borrow_book("u1", "B001", Some(-1)).unwrap();
    let fine = engine.return_book(&loan).unwrap();
    assert_eq!(fine, rate);

    let closed = engine.get_transaction(&loan).unwrap();
    assert_eq!(closed.fine_amount, rate);
    assert_eq!(engine.statistics().total_fines, rate);
}

#[test]
fn overdue_listing_contains_only_open_past_due_loans() {
    let mut engine = engine_with_catalog();
    let late = engine.borrow_book("u1", "B001", Some(-1)).unwrap();
    engine.borrow_book("u2", "B003", Some(7)).unwrap();

    let overdue = engine.overdue_transactions();
    assert_eq!(overdue.len(), 1);
    assert_eq!(overdue[0].id, late);

    engine.return_book(&late).unwrap();
    assert!(engine.overdue_transactions().is_empty());
}

#[test]
fn copy_pool_invariant_holds_through_mixed_activity() {
    let mut engine = engine_with_catalog();
    let l1 = engine.borrow_book("u1", "B001", None).unwrap();
    let _l2 = engine.borrow_book("u2", "B001", None).unwrap();
    let l3 = engine.borrow_book("u3", "B003", None).unwrap();
    engine.return_book(&l1).unwrap();
    engine.return_book(&l3).unwrap();

    for book in engine.all_books() {
        assert!(book.available_copies <= book.total_copies);
        let active_borrows = engine
            .all_transactions()
            .iter()
            .filter(|t| {
                t.book_id == book.id
                    && t.kind == TransactionKind::Borrow
                    && t.status == TransactionStatus::Active
            })
            .count() as u32;
        assert_eq!(book.available_copies, book.total_copies - active_borrows);
    }
}

#[test]
fn reserving_an_available_book_is_rejected() {
    let mut engine = engine_with_catalog();
    let err = engine.reserve_book("u1", "B001").unwrap_err();
    assert!(matches!(err, EngineError::InvalidState(_)));
}

#[test]
fn reservations_queue_in_first_reserved_first_served_order() {
    // Scenario C: three reservers get slots 0, 1, 2 and drain in order.
    let mut engine = engine_with_catalog();
    engine.borrow_book("reader", "B002", None).unwrap();

    let (r1, p1) = engine.reserve_book("u1", "B002").unwrap();
    let (r2, p2) = engine.reserve_book("u2", "B002").unwrap();
    let (r3, p3) = engine.reserve_book("u3", "B002").unwrap();
    assert_eq!(
        (r1.priority, r2.priority, r3.priority),
        (0, 1, 2)
    );
    assert_eq!((p1, p2, p3), (1, 2, 3));

    assert_eq!(engine.next_reservation_for("B002").unwrap().id, r1.id);
    assert_eq!(engine.next_reservation_for("B002").unwrap().id, r2.id);
    assert_eq!(engine.next_reservation_for("B002").unwrap().id, r3.id);
    assert!(engine.next_reservation_for("B002").is_none());
}

#[test]
fn cancelled_reservations_are_skipped_but_keep_their_slot() {
    let mut engine = engine_with_catalog();
    engine.borrow_book("reader", "B002", None).unwrap();

    let (r1, _) = engine.reserve_book("u1", "B002").unwrap();
    let (r2, _) = engine.reserve_book("u2", "B002").unwrap();
    engine.cancel_reservation(&r1.id).unwrap();

    // the cancelled head is consumed silently; u2 is next
    assert_eq!(engine.next_reservation_for("B002").unwrap().id, r2.id);

    // slot 0 and 1 stay occupied: the next reserver gets slot 2
    let (r3, _) = engine.reserve_book("u3", "B002").unwrap();
    assert_eq!(r3.priority, 2);
}

#[test]
fn expired_reservations_are_skipped_when_drained() {
    let config = EngineConfig {
        reservations: ReservationConfig { expiry_days: -1 },
        ..EngineConfig::default()
    };
    let mut engine = LibraryEngine::new(config);
    engine
        .add_book(new_book("B001", "Dune", "Frank Herbert", "SciFi", 1965, 1))
        .unwrap();
    engine.borrow_book("reader", "B001", None).unwrap();

    // expires_at is already in the past at creation time
    engine.reserve_book("u1", "B001").unwrap();
    assert_eq!(engine.reservation_queue_len("B001"), 1);

    assert!(engine.next_reservation_for("B001").is_none());
    assert_eq!(engine.reservation_queue_len("B001"), 0);
}

#[test]
fn review_ratings_are_validated_and_averaged() {
    // Scenario D
    let mut engine = engine_with_catalog();

    for bad in [0u8, 6] {
        let err = engine
            .add_review("u1", "B001", NewReview { rating: bad, text: String::new() })
            .unwrap_err();
        assert!(matches!(err, EngineError::Validation(_)));
    }

    engine
        .add_review("u1", "B001", NewReview { rating: 5, text: "great".into() })
        .unwrap();
    engine
        .add_review("u2", "B001", NewReview { rating: 3, text: "fine".into() })
        .unwrap();
    assert_eq!(engine.get_book("B001").unwrap().rating, 4.0);
    assert_eq!(engine.book_reviews("B001").len(), 2);
}

#[test]
fn review_for_missing_book_is_not_found() {
    let mut engine = engine_with_catalog();
    let err = engine
        .add_review("u1", "B999", NewReview { rating: 3, text: String::new() })
        .unwrap_err();
    assert!(matches!(err, EngineError::NotFound(_)));
}

#[test]
fn recommendations_rank_neighbors_by_weight() {
    // Scenario E: A->B(0.8), A->C(0.5) at depth 1.
    let mut engine = LibraryEngine::new(EngineConfig::default());
    engine.add_book(new_book("A", "Alpha", "X", "T", 2000, 1)).unwrap();
    engine.add_book(new_book("B", "Beta", "X", "T", 2000, 1)).unwrap();
    engine.add_book(new_book("C", "Gamma", "X", "T", 2000, 1)).unwrap();
    engine.relate_books("A", "B", 0.8).unwrap();
    engine.relate_books("A", "C", 0.5).unwrap();

    let recs = engine.recommend("A", Some(1));
    assert_eq!(
        recs,
        vec![("Beta".to_string(), 0.8), ("Gamma".to_string(), 0.5)]
    );
    // raw-id variant ranks identically
    assert_eq!(
        engine.recommend_ids("A", Some(1)),
        vec![("B".to_string(), 0.8), ("C".to_string(), 0.5)]
    );
}

#[test]
fn recommendations_drop_deleted_books() {
    let mut engine = LibraryEngine::new(EngineConfig::default());
    engine.add_book(new_book("A", "Alpha", "X", "T", 2000, 1)).unwrap();
    engine.add_book(new_book("B", "Beta", "X", "T", 2000, 1)).unwrap();
    engine.relate_books("A", "B", 1.0).unwrap();
    engine.delete_book("B").unwrap();
    assert!(engine.recommend("A", Some(2)).is_empty());
}

#[test]
fn relating_unknown_books_fails() {
    let mut engine = engine_with_catalog();
    assert!(matches!(
        engine.relate_books("B001", "B999", 0.5),
        Err(EngineError::NotFound(_))
    ));
    assert!(matches!(
        engine.relate_books("B001", "B002", 1.5),
        Err(EngineError::Validation(_))
    ));
}

#[test]
fn search_applies_all_non_empty_criteria() {
    let mut engine = engine_with_catalog();

    let by_author = engine.search("u1", &SearchQuery {
        author: "herbert".into(),
        ..SearchQuery::default()
    });
    assert_eq!(by_author.len(), 2);

    let narrowed = engine.search("u1", &SearchQuery {
        author: "herbert".into(),
        year: 1969,
        ..SearchQuery::default()
    });
    assert_eq!(narrowed.len(), 1);
    assert_eq!(narrowed[0].id, "B002");

    let wildcard = engine.search("u2", &SearchQuery::default());
    assert_eq!(wildcard.len(), 3);

    // every search was logged with its result count
    let history = engine.user_search_history("u1");
    assert_eq!(history.len(), 2);
    assert_eq!(history[0].results_count, 2);
    assert_eq!(history[1].results_count, 1);
}

#[test]
fn secondary_lookups_follow_updates() {
    let mut engine = engine_with_catalog();
    assert_eq!(engine.lookup_by_title("dune").unwrap().id, "B001");

    engine
        .update_book("B001", atheneum_engine::models::BookUpdate {
            title: Some("Dune (Annotated)".into()),
            ..Default::default()
        })
        .unwrap();

    assert!(engine.lookup_by_title("dune").is_none());
    assert_eq!(engine.lookup_by_title("dune (annotated)").unwrap().id, "B001");
    assert_eq!(engine.lookup_by_author("jane austen").unwrap().id, "B003");
}

#[test]
fn category_change_moves_the_book_between_shelves() {
    let mut engine = engine_with_catalog();
    engine
        .update_book("B003", atheneum_engine::models::BookUpdate {
            category: Some("Romance".into()),
            ..Default::default()
        })
        .unwrap();

    assert!(engine.books_in_category("Classic").is_empty());
    let romance = engine.books_in_category("Romance");
    assert_eq!(romance.len(), 1);
    assert_eq!(romance[0].id, "B003");
}

#[test]
fn delete_removes_from_every_index() {
    let mut engine = engine_with_catalog();
    engine.delete_book("B003").unwrap();
    assert_eq!(engine.book_count(), 2);
    assert!(engine.get_book("B003").is_none());
    assert!(engine.lookup_by_title("emma").is_none());
    assert!(engine.books_in_category("Classic").is_empty());
    assert!(matches!(
        engine.delete_book("B003"),
        Err(EngineError::NotFound(_))
    ));
}

#[test]
fn statistics_aggregate_catalog_and_ledger() {
    let mut engine = engine_with_catalog();
    let l1 = engine.borrow_book("u1", "B002", None).unwrap();
    engine.borrow_book("u2", "B001", None).unwrap();
    engine.borrow_book("u3", "B001", None).unwrap();
    engine.return_book(&l1).unwrap();
    engine
        .add_review("u1", "B002", NewReview { rating: 4, text: String::new() })
        .unwrap();
    engine
        .add_review("u2", "B003", NewReview { rating: 2, text: String::new() })
        .unwrap();

    let stats = engine.statistics();
    assert_eq!(stats.total_books, 3);
    // B001 is fully borrowed; B002 came back; B003 untouched
    assert_eq!(stats.available_books, 2);
    assert_eq!(stats.borrowed_books, 1);
    assert_eq!(stats.average_rating, 3.0);
    assert_eq!(stats.most_borrowed_book, "Dune");
    assert_eq!(stats.most_borrowed_category, "SciFi");
    assert_eq!(stats.total_fines, 0.0);
}

#[test]
fn popularity_rankings_follow_borrow_counts() {
    let mut engine = engine_with_catalog();
    engine.borrow_book("u1", "B003", None).unwrap();
    engine.borrow_book("u2", "B003", None).unwrap();
    engine.borrow_book("u3", "B001", None).unwrap();

    let popular = engine.popular_books(2);
    assert_eq!(popular[0].id, "B003");
    assert_eq!(popular[1].id, "B001");
}

#[test]
fn snapshot_round_trip_preserves_every_collection() {
    let mut engine = engine_with_catalog();
    let loan = engine.borrow_book("u1", "B002", None).unwrap();
    engine.reserve_book("u2", "B002").unwrap();
    engine
        .add_review("u1", "B001", NewReview { rating: 5, text: "classic".into() })
        .unwrap();
    engine.search("u1", &SearchQuery { title: "dune".into(), ..Default::default() });
    engine.return_book(&loan).unwrap();

    let snapshot = engine.export_snapshot();
    let mut restored = LibraryEngine::new(EngineConfig::default());
    let reports = restored.ingest_snapshot(snapshot.clone());
    assert!(reports.iter().all(|r| r.rejected == 0));

    let round_tripped = restored.export_snapshot();
    assert_eq!(
        serde_json::to_value(&snapshot.books).unwrap(),
        serde_json::to_value(&round_tripped.books).unwrap()
    );
    assert_eq!(snapshot.transactions.len(), round_tripped.transactions.len());
    assert_eq!(snapshot.reservations.len(), round_tripped.reservations.len());
    assert_eq!(snapshot.reviews.len(), round_tripped.reviews.len());
    assert_eq!(snapshot.search_history.len(), round_tripped.search_history.len());

    // restored engine answers queries identically
    assert_eq!(restored.get_book("B001").unwrap().rating, 5.0);
    assert_eq!(restored.lookup_by_author("frank herbert").unwrap().author, "Frank Herbert");
}

#[test]
fn ingest_rejects_bad_records_without_aborting() {
    let mut engine = LibraryEngine::new(EngineConfig::default());
    let mut good = Vec::new();
    for book in engine_with_catalog().export_books() {
        good.push(book);
    }
    let mut broken = good[0].clone();
    broken.available_copies = broken.total_copies + 1;
    good.push(broken);

    let report = engine.ingest_books(good);
    assert_eq!(report.imported, 3);
    assert_eq!(report.rejected, 1);
    assert_eq!(report.warnings.len(), 1);
    assert_eq!(engine.book_count(), 3);
}

#[test]
fn ingested_reservations_restore_queue_order_and_slots() {
    let mut source = engine_with_catalog();
    source.borrow_book("reader", "B002", None).unwrap();
    let (r1, _) = source.reserve_book("u1", "B002").unwrap();
    let (r2, _) = source.reserve_book("u2", "B002").unwrap();
    source.cancel_reservation(&r1.id).unwrap();

    let mut restored = LibraryEngine::new(EngineConfig::default());
    restored.ingest_books(source.export_books());
    restored.ingest_reservations(source.export_reservations());

    // only the active entry is queued; the cancelled slot stays burnt
    assert_eq!(restored.next_reservation_for("B002").unwrap().id, r2.id);
    let (r3, _) = restored.reserve_book("u3", "B002").unwrap();
    assert_eq!(r3.priority, 2);
}

#[test]
fn file_store_round_trips_through_the_data_directory() {
    let dir = tempfile::tempdir().unwrap();
    let store = atheneum_engine::persistence::FileStore::new(dir.path());

    let mut engine = engine_with_catalog();
    engine.borrow_book("u1", "B002", None).unwrap();
    engine.reserve_book("u2", "B002").unwrap();
    engine
        .add_review("u1", "B003", NewReview { rating: 4, text: String::new() })
        .unwrap();

    let saved = store.save(&engine);
    assert!(saved.iter().all(|r| r.success));

    let mut restored = LibraryEngine::new(EngineConfig::default());
    let loaded = store.load(&mut restored);
    assert!(loaded.iter().all(|r| r.success));

    assert_eq!(restored.book_count(), 3);
    assert_eq!(restored.get_book("B002").unwrap().available_copies, 0);
    assert_eq!(restored.get_book("B003").unwrap().rating, 4.0);
    assert_eq!(restored.all_transactions().len(), engine.all_transactions().len());
    assert_eq!(restored.reservation_queue_len("B002"), 1);
}

#[test]
fn file_store_load_from_empty_directory_is_a_no_op() {
    let dir = tempfile::tempdir().unwrap();
    let store = atheneum_engine::persistence::FileStore::new(dir.path());
    let mut engine = LibraryEngine::new(EngineConfig::default());
    let loaded = store.load(&mut engine);
    assert!(loaded.iter().all(|r| r.success && r.count == 0));
    assert_eq!(engine.book_count(), 0);
}

#[test]
fn outcome_envelope_wraps_engine_results() {
    let mut engine = engine_with_catalog();
    let outcome = Outcome::from(engine.borrow_book("u1", "B999", None));
    assert!(!outcome.success);
    assert_eq!(outcome.code, ErrorCode::NotFound as u32);
    assert!(outcome.message.contains("B999"));

    let outcome = Outcome::from_result(engine.borrow_book("u1", "B001", None), "borrowed");
    assert!(outcome.success);
    assert!(outcome.payload.is_some());
}
