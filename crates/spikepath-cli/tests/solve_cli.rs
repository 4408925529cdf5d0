//! CLI smoke tests over the compiled binary

use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn solve_reference_board_prints_throws() {
    let mut cmd = Command::cargo_bin("spikepath").unwrap();
    cmd.args([
        "solve",
        "--cells",
        "9",
        "--dice-sides",
        "4",
        "--ladder",
        "2:6",
        "--snake",
        "8:3",
    ]);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("throws: 2, 3"))
        .stdout(predicate::str::contains("ladder up to cell 6"));
}

#[test]
fn solve_all_enumerates_histories() {
    let mut cmd = Command::cargo_bin("spikepath").unwrap();
    cmd.args(["solve", "--cells", "6", "--dice-sides", "4", "--all"]);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("solution 3:"));
}

#[test]
fn export_prints_interchange_text() {
    let mut cmd = Command::cargo_bin("spikepath").unwrap();
    cmd.args(["export", "--cells", "9", "--dice-sides", "4", "--ladder", "2:6"]);
    cmd.assert()
        .success()
        .stdout(predicate::str::contains("input_train B0 train=1 loop=false"))
        .stdout(predicate::str::contains("synapse B0 B4 w=1 d=1"));
}

#[test]
fn invalid_board_exits_nonzero() {
    let mut cmd = Command::cargo_bin("spikepath").unwrap();
    cmd.args(["solve", "--cells", "9", "--ladder", "6:2"]);
    cmd.assert().failure();
}

#[test]
fn malformed_jump_flag_is_a_usage_error() {
    let mut cmd = Command::cargo_bin("spikepath").unwrap();
    cmd.args(["solve", "--ladder", "2-6"]);
    cmd.assert().failure();
}
