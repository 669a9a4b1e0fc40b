use assert_cmd::Command;
use predicates::prelude::*;
use std::io::Write;
use tempfile::NamedTempFile;

fn sample_workload_json() -> String {
    serde_json::json!({
        "visits": [{
            "start_offset": 0.0,
            "visit": {
                "reqs": [{
                    "scheduled_offset": 0.0,
                    "req": {
                        "id": "r1",
                        "content": "hello",
                        "dep_id": null,
                        "gen_params": { "max_tokens": null, "temperature": null, "top_p": null, "stop": [] }
                    }
                }]
            }
        }]
    })
    .to_string()
}

#[test]
fn workload_validate_accepts_a_well_formed_file() {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{}", sample_workload_json()).unwrap();

    Command::cargo_bin("chatload")
        .unwrap()
        .args(["workload", "validate"])
        .arg(file.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("ok: 1 visits"));
}

#[test]
fn workload_validate_rejects_out_of_order_visits() {
    let bad = serde_json::json!({
        "visits": [
            { "start_offset": 5.0, "visit": { "reqs": [] } },
            { "start_offset": 1.0, "visit": { "reqs": [] } }
        ]
    });
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{bad}").unwrap();

    Command::cargo_bin("chatload")
        .unwrap()
        .args(["workload", "validate"])
        .arg(file.path())
        .assert()
        .failure();
}

#[test]
fn datasets_list_includes_every_registered_normalizer() {
    Command::cargo_bin("chatload")
        .unwrap()
        .args(["datasets", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("oasst1"))
        .stdout(predicate::str::contains("dolly"));
}

#[test]
fn endpoints_list_includes_every_registered_adapter() {
    Command::cargo_bin("chatload")
        .unwrap()
        .args(["endpoints", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("openai"));
}
