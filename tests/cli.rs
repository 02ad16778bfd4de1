#![forbid(unsafe_code)]
use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::tempdir;

fn cli(store: &std::path::Path) -> Command {
    let mut cmd = Command::cargo_bin("lodgebook-cli").unwrap();
    cmd.arg("--store").arg(store);
    cmd
}

#[test]
fn book_then_reject_same_dates() {
    let dir = tempdir().unwrap();
    let store = dir.path().join("bookings.json");

    cli(&store)
        .args(["book", "--guest", "GuestA", "--unit", "1", "--check-in", "2025-09-01", "--nights", "5"])
        .assert()
        .success()
        .stdout(predicate::str::contains("2025-09-01 → 2025-09-06"));

    cli(&store)
        .args(["book", "--guest", "GuestB", "--unit", "1", "--check-in", "2025-09-01", "--nights", "1"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("UNIT_OCCUPIED"));

    cli(&store)
        .args(["book", "--guest", "GuestA", "--unit", "2", "--check-in", "2025-10-01", "--nights", "1"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("GUEST_ALREADY_BOOKED"));
}

#[test]
fn invalid_booking_request_is_client_error() {
    let dir = tempdir().unwrap();
    let store = dir.path().join("bookings.json");

    cli(&store)
        .args(["book", "--guest", "GuestA", "--unit", "1", "--check-in", "2025-09-01", "--nights", "0"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("at least 1"));

    cli(&store)
        .args(["book", "--guest", "  ", "--unit", "1", "--check-in", "2025-09-01", "--nights", "2"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("guest name cannot be empty"));

    assert!(!store.exists());
}

#[test]
fn extend_maps_outcomes_to_exit_codes() {
    let dir = tempdir().unwrap();
    let store = dir.path().join("bookings.json");

    let out = cli(&store)
        .args(["book", "--guest", "GuestA", "--unit", "1", "--check-in", "2025-09-01", "--nights", "5"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    let line = String::from_utf8(out).unwrap();
    let id = line.split(" | ").next().unwrap().trim().to_string();

    cli(&store)
        .args(["extend", "--id", &id, "--extra-nights", "0"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("INVALID_EXTRA_NIGHTS"));

    cli(&store)
        .args(["extend", "--id", "unknown", "--extra-nights", "1"])
        .assert()
        .code(3)
        .stderr(predicate::str::contains("BOOKING_NOT_FOUND"));

    cli(&store)
        .args(["book", "--guest", "GuestC", "--unit", "1", "--check-in", "2025-09-06", "--nights", "2"])
        .assert()
        .success();

    cli(&store)
        .args(["extend", "--id", &id, "--extra-nights", "1"])
        .assert()
        .code(4)
        .stderr(predicate::str::contains("EXTENSION_CONFLICT"));

    cli(&store).args(["check"]).assert().success();
}

#[test]
fn import_skips_rejected_rows_and_check_flags_bad_store() {
    let dir = tempdir().unwrap();
    let store = dir.path().join("bookings.json");
    let csv = dir.path().join("in.csv");
    fs::write(
        &csv,
        "guest_name,unit_id,check_in,nights\nGuestA,1,2025-09-01,5\nGuestB,1,2025-09-03,1\nGuestC,1,2025-09-06,1\n",
    )
    .unwrap();

    cli(&store)
        .args(["import", "--csv"])
        .arg(&csv)
        .assert()
        .code(2)
        .stdout(predicate::str::contains("imported 2/3"));

    // duplique GuestA hors moteur pour simuler un écrivain concurrent
    let mut ledger: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&store).unwrap()).unwrap();
    let mut dup = ledger["bookings"][0].clone();
    dup["id"] = serde_json::Value::String("dup".into());
    ledger["bookings"].as_array_mut().unwrap().push(dup);
    let raw = serde_json::to_string(&ledger).unwrap();
    fs::write(&store, raw).unwrap();

    cli(&store)
        .args(["check"])
        .assert()
        .code(5)
        .stderr(predicate::str::contains("violation"));
}
