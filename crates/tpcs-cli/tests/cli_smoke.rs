//! End-to-end runs of the `tpcs` binary against payload files.

use std::io::Write;
use std::process::{Command, Output};

use serde_json::{json, Value};

fn payload(answers: impl Fn(u8) -> Value) -> Value {
    let mut data = serde_json::Map::new();
    data.insert("email".into(), json!("respondent@example.com"));
    data.insert("respondent_id".into(), json!("r-42"));
    for item in 1..=24_u8 {
        data.insert(format!("Q{item}"), answers(item));
    }
    json!({ "data": data })
}

fn run(args: &[&str], body: &Value) -> Output {
    let mut file = tempfile::NamedTempFile::new().expect("temp payload");
    write!(file, "{body}").expect("write payload");

    let mut command_args: Vec<String> = args.iter().map(|arg| arg.to_string()).collect();
    command_args.insert(1, file.path().to_string_lossy().into_owned());

    Command::new(env!("CARGO_BIN_EXE_tpcs"))
        .args(&command_args)
        .env("TPCS_LOG", "tpcs=warn")
        .env_remove("TPCS_CONFIG")
        .env_remove("RESEND_API_KEY")
        .env_remove("FROM_EMAIL")
        .output()
        .expect("failed to run tpcs binary")
}

fn stdout_json(output: &Output) -> Value {
    let stdout = String::from_utf8_lossy(&output.stdout);
    serde_json::from_str(stdout.trim()).unwrap_or_else(|error| {
        panic!(
            "stdout is not JSON ({error}).\nstdout:\n{stdout}\nstderr:\n{}",
            String::from_utf8_lossy(&output.stderr)
        )
    })
}

#[test]
fn score_prints_result_for_valid_payload() {
    // direct items answer +2, reverse items answer -2: every letter dimension positive
    let body = payload(|item| if item % 2 == 1 { json!(2) } else { json!("-2") });
    let output = run(&["score"], &body);

    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    let report = stdout_json(&output);
    assert_eq!(report["ok"], true);
    assert_eq!(report["respondent_id"], "r-42");
    assert_eq!(report["result"]["code"], "EARC");
    assert_eq!(report["result"]["family"], "Alpha");
    assert_eq!(report["result"]["quality"]["mirror_consistency"], 1.0);
    assert_eq!(report["result"]["quality"]["flags"], json!(["ok"]));
    assert!(report.get("delivery").is_none());
}

#[test]
fn score_with_dynamics_preset_uses_its_vocabulary() {
    let body = payload(|item| if item % 2 == 1 { json!(2) } else { json!(-2) });
    let output = run(&["score", "--preset", "dynamics"], &body);

    let report = stdout_json(&output);
    assert_eq!(report["result"]["code"], "LARC");
    assert_eq!(report["result"]["family"], "Dynamique");
}

#[test]
fn invalid_answer_exits_with_offending_item() {
    let body = payload(|item| if item == 9 { json!(3.5) } else { json!(0) });
    let output = run(&["score"], &body);

    assert_eq!(output.status.code(), Some(2));
    let report = stdout_json(&output);
    assert_eq!(report["ok"], false);
    assert_eq!(report["item"], 9);
    assert_eq!(report["raw"], "3.5");
    assert_eq!(report["reason"], "not_integral");
}

#[test]
fn notify_without_credentials_is_skipped() {
    let body = payload(|_| json!(1));
    let output = run(&["score", "--notify"], &body);

    assert!(output.status.success());
    let report = stdout_json(&output);
    assert_eq!(report["delivery"]["status"], "skipped");
}

#[test]
fn validate_reports_dialect_or_failure() {
    let output = run(&["validate"], &payload(|_| json!("Neutre")));
    assert!(output.status.success());
    assert_eq!(stdout_json(&output)["dialect"], "data_fields");

    let output = run(&["validate"], &payload(|item| if item == 24 { json!("4") } else { json!(0) }));
    assert_eq!(output.status.code(), Some(2));
    assert_eq!(stdout_json(&output)["item"], 24);
}

#[test]
fn config_prints_effective_toml() {
    let output = Command::new(env!("CARGO_BIN_EXE_tpcs"))
        .args(["config", "--preset", "dynamics"])
        .env_remove("TPCS_CONFIG")
        .output()
        .expect("failed to run tpcs binary");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("tie_break = [\"D6\"]"), "stdout:\n{stdout}");
    assert!(stdout.contains("Dynamique"), "stdout:\n{stdout}");
}
