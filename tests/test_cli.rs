//! End-to-end runs of the demonstration binary

use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn runs_all_routines_in_sequence() {
    Command::cargo_bin("framelite")
        .unwrap()
        .assert()
        .success()
        .stdout(predicate::str::contains("After writing and reading a JSON file:"))
        .stdout(predicate::str::contains("Average age grouped by sex:"))
        .stdout(predicate::str::contains("Rows with a parsable boarding date:"))
        .stdout(predicate::str::contains("Built from records:"));
}

#[test]
fn runs_a_single_routine() {
    Command::cargo_bin("framelite")
        .unwrap()
        .args(["--routine", "cleaning"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Fares clamped at 100:"))
        .stdout(predicate::str::contains("After dropping duplicate rows:"));
}

#[test]
fn rejects_unknown_routine() {
    Command::cargo_bin("framelite")
        .unwrap()
        .args(["--routine", "nonsense"])
        .assert()
        .failure();
}
