//! Basic functionality integration tests for the ocp CLI.
//!
//! All tests run against the fs backend, which serves objects from a local
//! directory through the same ObjectStore capability as S3.

#[path = "../common/mod.rs"]
mod common;

use assert_cmd::cargo::cargo_bin_cmd;
use common::TestFixture;
use predicates::prelude::*;
use std::fs;

#[test]
fn test_copy_object_to_file() {
    let fixture = TestFixture::new();
    fixture.put_object("data.txt", b"hello object store");
    let out = fixture.out_path("data.txt");

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
        .success()
        .stderr(predicate::str::contains("copied 18 bytes"));

    assert_eq!(fs::read(&out).unwrap(), b"hello object store");
}

#[test]
fn test_copy_object_to_stdout() {
    let fixture = TestFixture::new();
    fixture.put_object("data.txt", b"to stdout");

    let mut cmd = cargo_bin_cmd!("ocp");
    cmd.arg("--backend")
        .arg("fs")
        .arg("--bucket")
        .arg(fixture.bucket_arg())
        .arg("--key")
        .arg("data.txt")
        .assert()
        .success()
        .stdout(predicate::eq("to stdout"));
}

#[test]
fn test_leading_slash_key_is_bucket_relative() {
    let fixture = TestFixture::new();
    fixture.put_object("path/to/file.txt", b"nested");
    let out = fixture.out_path("file.txt");

    let mut cmd = cargo_bin_cmd!("ocp");
    cmd.arg("--backend")
        .arg("fs")
        .arg("--bucket")
        .arg(fixture.bucket_arg())
        .arg("--key")
        .arg("/path/to/file.txt")
        .arg("--output")
        .arg(&out)
        .assert()
        .success();

    assert_eq!(fs::read(&out).unwrap(), b"nested");
}

#[test]
fn test_empty_object_copies_zero_bytes() {
    let fixture = TestFixture::new();
    fixture.put_object("empty.bin", b"");
    let out = fixture.out_path("empty.bin");

    let mut cmd = cargo_bin_cmd!("ocp");
    cmd.env("RUST_LOG", "info")
        .arg("--backend")
        .arg("fs")
        .arg("--bucket")
        .arg(fixture.bucket_arg())
        .arg("--key")
        .arg("empty.bin")
        .arg("--output")
        .arg(&out)
        .assert()
        .success()
        .stderr(predicate::str::contains("copied 0 bytes"));

    assert_eq!(fs::metadata(&out).unwrap().len(), 0);
}

#[test]
fn test_output_file_is_truncated() {
    let fixture = TestFixture::new();
    fixture.put_object("short.txt", b"new");
    let out = fixture.out_path("short.txt");
    fs::write(&out, "previous much longer contents").unwrap();

    let mut cmd = cargo_bin_cmd!("ocp");
    cmd.arg("--backend")
        .arg("fs")
        .arg("--bucket")
        .arg(fixture.bucket_arg())
        .arg("--key")
        .arg("short.txt")
        .arg("--output")
        .arg(&out)
        .assert()
        .success();

    assert_eq!(fs::read(&out).unwrap(), b"new");
}

#[test]
fn test_chunk_size_does_not_change_output() {
    let fixture = TestFixture::new();
    let data: Vec<u8> = (0..=255u8).cycle().take(10_000).collect();
    fixture.put_object("blob.bin", &data);

    for chunk_size in ["1", "7", "4096"] {
        let out = fixture.out_path(&format!("blob-{chunk_size}.bin"));

        let mut cmd = cargo_bin_cmd!("ocp");
        cmd.env("RUST_LOG", "info")
            .arg("--backend")
            .arg("fs")
            .arg("--bucket")
            .arg(fixture.bucket_arg())
            .arg("--key")
            .arg("blob.bin")
            .arg("--chunk-size")
            .arg(chunk_size)
            .arg("--output")
            .arg(&out)
            .assert()
            .success()
            .stderr(predicate::str::contains("copied 10000 bytes"));

        assert_eq!(fs::read(&out).unwrap(), data);
    }
}

#[test]
fn test_json_report() {
    let fixture = TestFixture::new();
    fixture.put_object("data.txt", b"json report payload");
    let out = fixture.out_path("data.txt");

    let mut cmd = cargo_bin_cmd!("ocp");
    cmd.arg("--backend")
        .arg("fs")
        .arg("--bucket")
        .arg(fixture.bucket_arg())
        .arg("--key")
        .arg("data.txt")
        .arg("--format")
        .arg("json")
        .arg("--output")
        .arg(&out)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"status\":\"ok\""))
        .stdout(predicate::str::contains("\"bytes_copied\":19"));

    assert_eq!(fs::read(&out).unwrap(), b"json report payload");
}
