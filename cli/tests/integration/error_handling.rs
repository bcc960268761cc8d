//! Error handling integration tests for the ocp CLI.
//!
//! These tests verify the exit-code policy:
//! - 1: the source object could not be opened
//! - 2: the output file could not be created
//! No failure is silently absorbed, and a failed source lookup must not
//! leave an empty output file behind.

#[path = "../common/mod.rs"]
mod common;

use assert_cmd::cargo::cargo_bin_cmd;
use common::TestFixture;
use predicates::prelude::*;

#[test]
fn test_missing_key_exits_1_without_creating_output() {
    let fixture = TestFixture::new();
    let out = fixture.out_path("never-created.txt");

    let mut cmd = cargo_bin_cmd!("ocp");
    cmd.env("RUST_LOG", "info")
        .arg("--backend")
        .arg("fs")
        .arg("--bucket")
        .arg(fixture.bucket_arg())
        .arg("--key")
        .arg("missing.txt")
        .arg("--output")
        .arg(&out)
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("failed to open source object"));

    assert!(!out.exists(), "failed lookup must not create an output file");
}

#[test]
fn test_unwritable_output_exits_2() {
    let fixture = TestFixture::new();
    fixture.put_object("data.txt", b"content");
    let out = fixture.out_path("no/such/dir/out.txt");

    let mut cmd = cargo_bin_cmd!("ocp");
    cmd.env("RUST_LOG", "info")
        .arg("--backend")
        .arg("fs")
        .arg("--bucket")
        .arg(fixture.bucket_arg())
        .arg("--key")
        .arg("data.txt")
        .arg("--output")
        .arg(&out)
        .assert()
        .failure()
        .code(2)
        .stderr(predicate::str::contains("failed to create output file"));
}

#[test]
fn test_escaping_key_is_rejected() {
    let fixture = TestFixture::new();

    let mut cmd = cargo_bin_cmd!("ocp");
    cmd.env("RUST_LOG", "info")
        .arg("--backend")
        .arg("fs")
        .arg("--bucket")
        .arg(fixture.bucket_arg())
        .arg("--key")
        .arg("../../etc/passwd")
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("invalid object key"));
}

#[test]
fn test_json_error_report() {
    let fixture = TestFixture::new();
    let out = fixture.out_path("out.txt");

    let mut cmd = cargo_bin_cmd!("ocp");
    cmd.env("RUST_LOG", "info")
        .arg("--backend")
        .arg("fs")
        .arg("--bucket")
        .arg(fixture.bucket_arg())
        .arg("--key")
        .arg("missing.txt")
        .arg("--format")
        .arg("json")
        .arg("--output")
        .arg(&out)
        .assert()
        .failure()
        .code(1)
        .stdout(predicate::str::contains("\"status\":\"error\""))
        .stdout(predicate::str::contains("\"code\":\"open_failed\""));
}
