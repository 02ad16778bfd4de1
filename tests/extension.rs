#![forbid(unsafe_code)]
use chrono::NaiveDate;
use lodgebook::{
    engine::{extension_conflicts, extension_window},
    evaluate_extension, evaluate_new_booking, Booking, BookingId, BookingStore, ExtraNights,
    MemoryStore, NewBooking, Outcome, ReasonClass, ReasonCode,
};

fn day(n: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 7, n).unwrap()
}

fn book(store: &mut MemoryStore, guest: &str, unit: &str, from: u32, nights: u32) -> Booking {
    let req = NewBooking::new(guest, unit, day(from), nights).unwrap();
    match evaluate_new_booking(store, req).unwrap() {
        Outcome::Accepted(b) => b,
        Outcome::Rejected(r) => panic!("unexpected rejection: {r}"),
    }
}

#[test]
fn extends_free_unit() {
    let mut store = MemoryStore::new();
    let a = book(&mut store, "GuestA", "1", 1, 5);
    let outcome = evaluate_extension(&mut store, &a.id, "2").unwrap();
    let updated = outcome.booking().expect("accepted");
    assert_eq!(updated.nights, 7);
    assert_eq!(updated.id, a.id);
    assert_eq!(updated.check_out(), day(8));
    assert_eq!(store.find_by_id(&a.id).unwrap().unwrap().nights, 7);
}

#[test]
fn extension_into_next_booking_conflicts() {
    let mut store = MemoryStore::new();
    let a = book(&mut store, "GuestA", "1", 1, 5);
    // arrive exactement au départ de GuestA
    book(&mut store, "GuestC", "1", 6, 2);
    let outcome = evaluate_extension(&mut store, &a.id, "1").unwrap();
    assert_eq!(outcome, Outcome::Rejected(ReasonCode::ExtensionConflict));
    assert_eq!(store.find_by_id(&a.id).unwrap().unwrap().nights, 5);
}

#[test]
fn extension_stopping_at_next_arrival_is_accepted() {
    let mut store = MemoryStore::new();
    let a = book(&mut store, "GuestA", "1", 1, 5);
    book(&mut store, "GuestC", "1", 8, 2);
    let outcome = evaluate_extension(&mut store, &a.id, "2").unwrap();
    assert_eq!(outcome.booking().map(|b| b.nights), Some(7));
    let outcome = evaluate_extension(&mut store, &a.id, "1").unwrap();
    assert_eq!(outcome.reason(), Some(ReasonCode::ExtensionConflict));
}

#[test]
fn earlier_and_other_unit_bookings_do_not_block() {
    let mut store = MemoryStore::new();
    book(&mut store, "GuestB", "1", 1, 3);
    let a = book(&mut store, "GuestA", "1", 4, 2);
    book(&mut store, "GuestC", "2", 6, 5);
    let outcome = evaluate_extension(&mut store, &a.id, "4").unwrap();
    assert!(outcome.is_accepted());
}

#[test]
fn invalid_extra_nights_are_rejected() {
    let mut store = MemoryStore::new();
    let a = book(&mut store, "GuestA", "1", 1, 5);
    for raw in ["0", "-1", "abc", "", "1.5", "99999999999"] {
        let outcome = evaluate_extension(&mut store, &a.id, raw).unwrap();
        assert_eq!(outcome.reason(), Some(ReasonCode::InvalidExtraNights), "{raw:?}");
    }
    assert_eq!(ReasonCode::InvalidExtraNights.class(), ReasonClass::ClientError);
}

#[test]
fn validation_runs_before_lookup() {
    let mut store = MemoryStore::new();
    let outcome = evaluate_extension(&mut store, &BookingId::new("missing"), "0").unwrap();
    assert_eq!(outcome.reason(), Some(ReasonCode::InvalidExtraNights));
}

#[test]
fn unknown_booking_is_not_found() {
    let mut store = MemoryStore::new();
    book(&mut store, "GuestA", "1", 1, 5);
    let outcome = evaluate_extension(&mut store, &BookingId::new("missing"), "2").unwrap();
    assert_eq!(outcome.reason(), Some(ReasonCode::BookingNotFound));
    assert_eq!(ReasonCode::BookingNotFound.class(), ReasonClass::NotFound);
    assert_eq!(ReasonCode::ExtensionConflict.class(), ReasonClass::Conflict);
}

#[test]
fn conflict_check_is_repeatable() {
    let mut store = MemoryStore::new();
    let a = book(&mut store, "GuestA", "1", 1, 5);
    book(&mut store, "GuestC", "1", 6, 2);
    let extra = ExtraNights::parse("1").unwrap();
    let window = extension_window(&a, extra).unwrap();
    assert_eq!(window.check_in, day(6));
    assert_eq!(window.check_out, day(7));
    let others = store.find_by_unit_before("1", window.check_out, Some(&a.id)).unwrap();
    let first = extension_conflicts(&a, window, &others);
    let second = extension_conflicts(&a, window, &others);
    assert!(first);
    assert_eq!(first, second);
}

#[test]
fn extra_nights_parsing() {
    assert_eq!(ExtraNights::parse(" 3 ").map(ExtraNights::get), Ok(3));
    assert!(ExtraNights::new(0).is_none());
    assert_eq!(ExtraNights::parse("two"), Err(ReasonCode::InvalidExtraNights));
}
