//! End-to-end tests for `feint jwt`.

use assert_cmd::Command;
use base64::engine::general_purpose::URL_SAFE;
use base64::Engine;
use predicates::prelude::*;
use serde_json::{json, Value};

const VECTOR: &str = "eyJhbGciOiJIUzI1NiJ9.eyJzdWIiOiJ4In0.sig";

fn decode_segment(segment: &str) -> Value {
    let padded = match segment.len() % 4 {
        0 => segment.to_string(),
        rem => format!("{}{}", segment, "=".repeat(4 - rem)),
    };
    serde_json::from_slice(&URL_SAFE.decode(padded).unwrap()).unwrap()
}

fn forged_token(stdout: &[u8]) -> String {
    let text = String::from_utf8(stdout.to_vec()).unwrap();
    text.lines().last().unwrap().trim().to_string()
}

#[test]
fn forges_the_known_vector() {
    let assert = Command::cargo_bin("feint")
        .unwrap()
        .args(["jwt", VECTOR])
        .assert()
        .success()
        .stdout(predicate::str::contains("Forged JWT with alg:none"));

    let token = forged_token(&assert.get_output().stdout);
    assert!(token.ends_with('.'), "empty signature segment expected");

    let parts: Vec<&str> = token.split('.').collect();
    assert_eq!(parts.len(), 3);
    assert_eq!(parts[2], "");

    assert_eq!(
        decode_segment(parts[0]),
        json!({"alg": "none", "typ": "JWT"})
    );
    assert_eq!(
        decode_segment(parts[1]),
        json!({
            "sub": "x",
            "nameid": "1",
            "unique_name": "admin@example.com",
            "role": "admin",
            "exp": 1999999999u64,
        })
    );
}

#[test]
fn prints_the_decoded_originals() {
    Command::cargo_bin("feint")
        .unwrap()
        .args(["jwt", VECTOR])
        .assert()
        .success()
        .stdout(predicate::str::contains("Original header"))
        .stdout(predicate::str::contains("\"HS256\""))
        .stdout(predicate::str::contains("\"sub\": \"x\""));
}

#[test]
fn claim_flag_retargets_an_override() {
    let assert = Command::cargo_bin("feint")
        .unwrap()
        .args(["jwt", VECTOR, "--claim", "role=auditor", "--claim", "lvl=3"])
        .assert()
        .success();

    let token = forged_token(&assert.get_output().stdout);
    let payload = decode_segment(token.split('.').nth(1).unwrap());
    assert_eq!(payload["role"], json!("auditor"));
    assert_eq!(payload["lvl"], json!(3));
    assert_eq!(payload["nameid"], json!("1"));
}

#[test]
fn wrong_part_count_fails_without_token_output() {
    Command::cargo_bin("feint")
        .unwrap()
        .args(["jwt", "only.two"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("expected 3"))
        .stdout(predicate::str::contains("Forged").not());
}

#[test]
fn non_json_segment_fails_cleanly() {
    Command::cargo_bin("feint")
        .unwrap()
        .args(["jwt", "AQAB.AQAB.sig"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::is_empty().not());
}
